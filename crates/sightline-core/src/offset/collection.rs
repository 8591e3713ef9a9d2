use serde::{Deserialize, Deserializer, Serialize};

use crate::offset::parse_hex_value;

/// Byte offsets into the target's structures.
///
/// Module-relative: `view_matrix`, `local_player_pawn`, `entity_list`.
/// Everything else is relative to the object it is read from (controller,
/// pawn or scene node). A zero value is not rejected here; reading through
/// it simply lands on the wrong field and fails or filters downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetTable {
    #[serde(rename = "dwViewMatrix", default, deserialize_with = "offset_value")]
    pub view_matrix: u64,
    #[serde(rename = "dwLocalPlayerPawn", default, deserialize_with = "offset_value")]
    pub local_player_pawn: u64,
    #[serde(rename = "dwEntityList", default, deserialize_with = "offset_value")]
    pub entity_list: u64,
    /// Controller → pawn handle.
    #[serde(rename = "m_hPlayerPawn", default, deserialize_with = "offset_value")]
    pub player_pawn: u64,
    #[serde(rename = "m_iHealth", default, deserialize_with = "offset_value")]
    pub health: u64,
    #[serde(rename = "m_lifeState", default, deserialize_with = "offset_value")]
    pub life_state: u64,
    #[serde(rename = "m_iTeamNum", default, deserialize_with = "offset_value")]
    pub team: u64,
    #[serde(rename = "m_vOldOrigin", default, deserialize_with = "offset_value")]
    pub old_origin: u64,
    #[serde(rename = "m_pGameSceneNode", default, deserialize_with = "offset_value")]
    pub game_scene_node: u64,
    #[serde(rename = "m_modelState", default, deserialize_with = "offset_value")]
    pub model_state: u64,
    #[serde(rename = "m_boneArray", default, deserialize_with = "offset_value")]
    pub bone_array: u64,
    #[serde(rename = "m_nodeToWorld", default, deserialize_with = "offset_value")]
    pub node_to_world: u64,
    /// Controller → pointer to the sanitized name string.
    #[serde(
        rename = "m_sSanitizedPlayerName",
        default,
        deserialize_with = "offset_value"
    )]
    pub sanitized_player_name: u64,
}

impl OffsetTable {
    /// File keys of every offset that is still zero.
    pub fn missing(&self) -> Vec<&'static str> {
        self.fields()
            .into_iter()
            .filter(|(_, value)| *value == 0)
            .map(|(name, _)| name)
            .collect()
    }

    /// Check if every offset has been supplied
    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    fn fields(&self) -> [(&'static str, u64); 13] {
        [
            ("dwViewMatrix", self.view_matrix),
            ("dwLocalPlayerPawn", self.local_player_pawn),
            ("dwEntityList", self.entity_list),
            ("m_hPlayerPawn", self.player_pawn),
            ("m_iHealth", self.health),
            ("m_lifeState", self.life_state),
            ("m_iTeamNum", self.team),
            ("m_vOldOrigin", self.old_origin),
            ("m_pGameSceneNode", self.game_scene_node),
            ("m_modelState", self.model_state),
            ("m_boneArray", self.bone_array),
            ("m_nodeToWorld", self.node_to_world),
            ("m_sSanitizedPlayerName", self.sanitized_player_name),
        ]
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawOffset {
    Number(u64),
    Text(String),
}

/// Accept either a JSON number or a hex string such as `"0x1A2B"`.
fn offset_value<'de, D>(deserializer: D) -> std::result::Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    match RawOffset::deserialize(deserializer)? {
        RawOffset::Number(value) => Ok(value),
        RawOffset::Text(text) => parse_hex_value(&text).map_err(serde::de::Error::custom),
    }
}
