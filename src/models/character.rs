// Character description types
// Author: kelexine (https://github.com/kelexine)

use serde::{Deserialize, Serialize};

/// Structured description of a 2D character sprite.
///
/// Every field is guaranteed present after normalization; consumers never
/// need null or type checks. Unknown fields produced by the model are
/// dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterDescription {
    pub character_id: String,
    pub one_line_summary: String,
    pub pose: PoseDescription,
    pub art_style: String,
    pub body_base: String,
    pub head_and_face: String,
    pub hair: String,
    pub outfit: String,
    pub equipment_and_props: Vec<String>,
    pub color_palette: Vec<String>,
    pub rendering_constraints: Vec<String>,
}

/// Pose sub-record of a character description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseDescription {
    pub overall_pose: String,
    pub action: String,
    pub motion_state: String,
    pub is_airborne: bool,
    pub movement_direction: String,
    pub speed_or_intensity: String,
    pub ground_contact_points: Vec<String>,
    pub weight_shift_and_balance: String,
    pub body_orientation: String,
    pub head_orientation: String,
    pub gaze_direction: String,
    pub arm_positions: Vec<String>,
    pub leg_positions: Vec<String>,
    pub facial_expression: String,
    pub camera_movement_or_zoom: String,
}

impl CharacterDescription {
    /// Pretty-printed JSON rendering, used when embedding descriptions
    /// into generation prompts and when fingerprinting for cache keys.
    pub fn to_pretty_json(&self) -> crate::error::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
