use std::collections::BTreeMap;

use serde::Serialize;

use crate::entity::Bone;
use crate::math::{Rect, Vector2, Vector3};

/// One drawable entity produced by a traversal pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    /// Pawn address the entity was read from. Only meaningful within the pass.
    pub pawn: u64,
    pub health: i32,
    pub team: i32,
    pub name: String,
    /// Screen position of every bone that was read.
    pub bones: BTreeMap<Bone, Vector2>,
    /// `x` is the head's screen x, `y` and `z` the screen y of the top and
    /// bottom of the head marker.
    pub head_screen: Vector3,
    pub origin_world: Vector3,
    pub origin_screen: Vector2,
    pub rect: Rect,
    /// Taxicab distance from the local player, in world units.
    pub distance: f32,
}

impl Entity {
    pub fn summary(&self) -> EntitySummary {
        EntitySummary {
            rect: self.rect,
            team: self.team,
            health: self.health,
            name: self.name.clone(),
        }
    }

    /// Screen segments for the skeleton, skipping links whose bones were not read.
    pub fn skeleton_lines(&self) -> Vec<(Vector2, Vector2)> {
        Bone::LINKS
            .iter()
            .filter_map(|(a, b)| Some((*self.bones.get(a)?, *self.bones.get(b)?)))
            .collect()
    }
}

/// Reduced view of an [`Entity`] for consumers that only draw boxes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntitySummary {
    pub rect: Rect,
    pub team: i32,
    pub health: i32,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entity_with_bones(bones: &[(Bone, Vector2)]) -> Entity {
        Entity {
            pawn: 0x2000,
            health: 90,
            team: 3,
            name: "bot".to_string(),
            bones: bones.iter().copied().collect(),
            head_screen: Vector3::new(10.0, 5.0, 15.0),
            origin_world: Vector3::new(0.0, 0.0, 0.0),
            origin_screen: Vector2::new(10.0, 100.0),
            rect: Rect {
                top: 0.0,
                left: 0.0,
                right: 20.0,
                bottom: 100.0,
            },
            distance: 300.0,
        }
    }

    #[test]
    fn test_summary() {
        let entity = entity_with_bones(&[]);
        let summary = entity.summary();

        assert_eq!(summary.rect, entity.rect);
        assert_eq!(summary.team, 3);
        assert_eq!(summary.health, 90);
        assert_eq!(summary.name, "bot");
    }

    #[test]
    fn test_skeleton_lines_skip_missing_bones() {
        let entity = entity_with_bones(&[
            (Bone::Head, Vector2::new(1.0, 1.0)),
            (Bone::Neck, Vector2::new(1.0, 2.0)),
        ]);

        let lines = entity.skeleton_lines();
        assert_eq!(lines, vec![(Vector2::new(1.0, 1.0), Vector2::new(1.0, 2.0))]);
    }

    #[test]
    fn test_serializes_bone_names() {
        let entity = entity_with_bones(&[(Bone::Head, Vector2::new(1.0, 1.0))]);
        let json = serde_json::to_value(&entity).unwrap();
        assert!(json["bones"]["head"].is_object());
    }
}
