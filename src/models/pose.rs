// Pose update merging
// Author: kelexine (https://github.com/kelexine)

use super::character::{CharacterDescription, PoseDescription};
use serde_json::Value;
use tracing::debug;

/// Merge a pose-edit model response into an existing description.
///
/// Only the pose sub-record can change; every other field of the result is
/// identical to `original`. The original pose's field set is authoritative:
/// a candidate value is copied only when its JSON type matches the original
/// field's type (string↔string, bool↔bool, or string-array↔string-array
/// with every element a string). Mismatched or missing fields retain the
/// original value, and fields the original pose doesn't have are never
/// introduced. A malformed or partial model response therefore cannot
/// corrupt non-pose data.
pub fn merge_pose_update(original: &CharacterDescription, response: &Value) -> CharacterDescription {
    let mut merged = original.clone();
    merged.pose = merge_pose_candidate(&original.pose, response);
    merged
}

/// Merge a pose candidate into the original pose, field by field.
///
/// If the response carries a nested `pose` object that object is the
/// candidate; otherwise the whole response is treated as the candidate.
pub fn merge_pose_candidate(original: &PoseDescription, response: &Value) -> PoseDescription {
    let candidate = match response.get("pose") {
        Some(pose) if pose.is_object() => pose,
        _ => response,
    };

    let Some(candidate_map) = candidate.as_object() else {
        debug!("Pose candidate is not an object, keeping original pose");
        return original.clone();
    };

    // Serialization of PoseDescription cannot fail; the fallbacks keep the
    // function total anyway.
    let Ok(Value::Object(mut original_map)) = serde_json::to_value(original) else {
        return original.clone();
    };

    for (key, original_value) in original_map.iter_mut() {
        let Some(candidate_value) = candidate_map.get(key) else {
            continue;
        };
        if types_match(original_value, candidate_value) {
            *original_value = candidate_value.clone();
        } else {
            debug!(field = %key, "Pose candidate field has mismatched type, keeping original");
        }
    }

    serde_json::from_value(Value::Object(original_map)).unwrap_or_else(|_| original.clone())
}

/// Type compatibility check for a single pose field.
fn types_match(original: &Value, candidate: &Value) -> bool {
    match original {
        Value::String(_) => candidate.is_string(),
        Value::Bool(_) => candidate.is_boolean(),
        Value::Array(_) => candidate
            .as_array()
            .is_some_and(|items| items.iter().all(Value::is_string)),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::character::fixtures::sample_description;
    use serde_json::json;

    #[test]
    fn test_nested_pose_object_is_candidate() {
        let original = sample_description();
        let response = json!({
            "character_id": "evil_twin",
            "pose": { "overall_pose": "jumping", "is_airborne": true }
        });

        let merged = merge_pose_update(&original, &response);
        assert_eq!(merged.pose.overall_pose, "jumping");
        assert!(merged.pose.is_airborne);
        // Top-level noise outside the pose never leaks in
        assert_eq!(merged.character_id, original.character_id);
    }

    #[test]
    fn test_whole_response_as_candidate() {
        let original = sample_description();
        let response = json!({ "overall_pose": "crouching" });

        let merged = merge_pose_update(&original, &response);
        assert_eq!(merged.pose.overall_pose, "crouching");
        assert_eq!(merged.pose.action, original.pose.action);
    }

    #[test]
    fn test_non_pose_fields_untouched() {
        let original = sample_description();
        let response = json!({
            "pose": {
                "overall_pose": "running",
                "arm_positions": ["pumping"],
                "facial_expression": "determined"
            }
        });

        let merged = merge_pose_update(&original, &response);
        assert_eq!(merged.art_style, original.art_style);
        assert_eq!(merged.outfit, original.outfit);
        assert_eq!(merged.color_palette, original.color_palette);
        assert_eq!(merged.one_line_summary, original.one_line_summary);
    }

    #[test]
    fn test_type_mismatch_retains_original() {
        let original = sample_description();
        let response = json!({
            "pose": {
                "overall_pose": 42,
                "is_airborne": "yes",
                "arm_positions": "raised"
            }
        });

        let merged = merge_pose_update(&original, &response);
        assert_eq!(merged.pose.overall_pose, original.pose.overall_pose);
        assert_eq!(merged.pose.is_airborne, original.pose.is_airborne);
        assert_eq!(merged.pose.arm_positions, original.pose.arm_positions);
    }

    #[test]
    fn test_array_with_non_string_element_rejected() {
        let original = sample_description();
        let response = json!({ "pose": { "arm_positions": ["raised", 7] } });

        let merged = merge_pose_update(&original, &response);
        assert_eq!(merged.pose.arm_positions, original.pose.arm_positions);
    }

    #[test]
    fn test_unknown_pose_fields_never_introduced() {
        let original = sample_description();
        let response = json!({ "pose": { "tail_position": "curled" } });

        let merged = merge_pose_update(&original, &response);
        assert_eq!(merged, original);
    }

    #[test]
    fn test_non_object_response_is_noop() {
        let original = sample_description();
        let merged = merge_pose_update(&original, &json!("standing now"));
        assert_eq!(merged, original);
    }
}
