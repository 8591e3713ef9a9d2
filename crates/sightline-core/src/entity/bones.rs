use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoStaticStr};

use crate::entity::layout::BONE_STRIDE;

/// Skeleton bones read for each entity.
///
/// Declaration order is the draw order. The string form is the name the
/// target's model uses for the bone.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Bone {
    Head,
    #[strum(serialize = "neck_0")]
    #[serde(rename = "neck_0")]
    Neck,
    #[strum(serialize = "spine_1")]
    #[serde(rename = "spine_1")]
    SpineUpper,
    #[strum(serialize = "spine_2")]
    #[serde(rename = "spine_2")]
    SpineLower,
    Pelvis,
    #[strum(serialize = "arm_upper_L")]
    #[serde(rename = "arm_upper_L")]
    ArmUpperLeft,
    #[strum(serialize = "arm_lower_L")]
    #[serde(rename = "arm_lower_L")]
    ArmLowerLeft,
    #[strum(serialize = "hand_L")]
    #[serde(rename = "hand_L")]
    HandLeft,
    #[strum(serialize = "arm_upper_R")]
    #[serde(rename = "arm_upper_R")]
    ArmUpperRight,
    #[strum(serialize = "arm_lower_R")]
    #[serde(rename = "arm_lower_R")]
    ArmLowerRight,
    #[strum(serialize = "hand_R")]
    #[serde(rename = "hand_R")]
    HandRight,
    #[strum(serialize = "leg_upper_L")]
    #[serde(rename = "leg_upper_L")]
    LegUpperLeft,
    #[strum(serialize = "leg_lower_L")]
    #[serde(rename = "leg_lower_L")]
    LegLowerLeft,
    #[strum(serialize = "ankle_L")]
    #[serde(rename = "ankle_L")]
    AnkleLeft,
    #[strum(serialize = "leg_upper_R")]
    #[serde(rename = "leg_upper_R")]
    LegUpperRight,
    #[strum(serialize = "leg_lower_R")]
    #[serde(rename = "leg_lower_R")]
    LegLowerRight,
    #[strum(serialize = "ankle_R")]
    #[serde(rename = "ankle_R")]
    AnkleRight,
}

impl Bone {
    /// Index into the model's bone array.
    pub fn index(self) -> u64 {
        match self {
            Bone::Head => 6,
            Bone::Neck => 5,
            Bone::SpineUpper => 4,
            Bone::SpineLower => 2,
            Bone::Pelvis => 0,
            Bone::ArmUpperLeft => 8,
            Bone::ArmLowerLeft => 9,
            Bone::HandLeft => 10,
            Bone::ArmUpperRight => 13,
            Bone::ArmLowerRight => 14,
            Bone::HandRight => 15,
            Bone::LegUpperLeft => 22,
            Bone::LegLowerLeft => 23,
            Bone::AnkleLeft => 24,
            Bone::LegUpperRight => 25,
            Bone::LegLowerRight => 26,
            Bone::AnkleRight => 27,
        }
    }

    /// Byte offset of this bone's position within the bone array.
    pub fn offset(self) -> u64 {
        self.index() * BONE_STRIDE
    }

    /// Pairs joined by a line when the skeleton is drawn.
    pub const LINKS: [(Bone, Bone); 16] = [
        (Bone::Head, Bone::Neck),
        (Bone::Neck, Bone::SpineUpper),
        (Bone::SpineUpper, Bone::SpineLower),
        (Bone::SpineLower, Bone::Pelvis),
        (Bone::SpineUpper, Bone::ArmUpperLeft),
        (Bone::ArmUpperLeft, Bone::ArmLowerLeft),
        (Bone::ArmLowerLeft, Bone::HandLeft),
        (Bone::SpineUpper, Bone::ArmUpperRight),
        (Bone::ArmUpperRight, Bone::ArmLowerRight),
        (Bone::ArmLowerRight, Bone::HandRight),
        (Bone::Pelvis, Bone::LegUpperLeft),
        (Bone::LegUpperLeft, Bone::LegLowerLeft),
        (Bone::LegLowerLeft, Bone::AnkleLeft),
        (Bone::Pelvis, Bone::LegUpperRight),
        (Bone::LegUpperRight, Bone::LegLowerRight),
        (Bone::LegLowerRight, Bone::AnkleRight),
    ];
}
