// Template-driven normalization of raw model output
// Author: kelexine (https://github.com/kelexine)

use serde_json::{Map, Value};

/// Placeholder substituted for missing or empty string fields.
///
/// The template's own string values are examples, never defaults; a string
/// the model failed to produce is always reported as `"unknown"`.
pub const UNKNOWN_PLACEHOLDER: &str = "unknown";

/// Recursively reconcile `input` against `template`, producing a value with
/// exactly the template's shape.
///
/// Rules, keyed by the template field's type:
/// - Object: recurse per template key; input keys absent from the template
///   are discarded, missing input keys recurse with a null placeholder.
/// - Array: input array verbatim if it is an array, else the template array.
/// - String: input string if non-empty and non-whitespace, else `"unknown"`.
/// - Number/boolean: input value on type match, else the template value.
/// - Anything else: input value if present, else the template value.
///
/// Normalizing an already complete, well-typed value is a no-op.
pub fn normalize_against_template(template: &Value, input: &Value) -> Value {
    match template {
        Value::Object(template_map) => {
            let mut result = Map::with_capacity(template_map.len());
            for (key, template_value) in template_map {
                let input_value = input.get(key).unwrap_or(&Value::Null);
                result.insert(key.clone(), normalize_against_template(template_value, input_value));
            }
            Value::Object(result)
        }
        Value::Array(template_array) => {
            if input.is_array() {
                input.clone()
            } else {
                Value::Array(template_array.clone())
            }
        }
        Value::String(_) => match input {
            Value::String(s) if !s.trim().is_empty() => input.clone(),
            _ => Value::String(UNKNOWN_PLACEHOLDER.to_string()),
        },
        Value::Number(_) => {
            if input.is_number() {
                input.clone()
            } else {
                template.clone()
            }
        }
        Value::Bool(_) => {
            if input.is_boolean() {
                input.clone()
            } else {
                template.clone()
            }
        }
        _ => {
            if input.is_null() {
                template.clone()
            } else {
                input.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn template() -> Value {
        json!({
            "character_id": "example_character",
            "one_line_summary": "One sentence about the character.",
            "pose": {
                "overall_pose": "standing",
                "gaze_direction": "forward",
                "is_airborne": false,
                "arm_positions": []
            },
            "color_palette": []
        })
    }

    #[test]
    fn test_idempotent_on_complete_input() {
        let input = json!({
            "character_id": "c1",
            "one_line_summary": "A knight.",
            "pose": {
                "overall_pose": "running",
                "gaze_direction": "left",
                "is_airborne": true,
                "arm_positions": ["raised"]
            },
            "color_palette": ["teal"]
        });

        assert_eq!(normalize_against_template(&template(), &input), input);
    }

    #[test]
    fn test_missing_string_becomes_unknown() {
        // The remote returned a partial pose: gaze_direction is absent
        let input = json!({
            "character_id": "c1",
            "pose": { "overall_pose": "standing" }
        });

        let out = normalize_against_template(&template(), &input);
        assert_eq!(out["character_id"], "c1");
        assert_eq!(out["pose"]["overall_pose"], "standing");
        assert_eq!(out["pose"]["gaze_direction"], UNKNOWN_PLACEHOLDER);
        assert_eq!(out["one_line_summary"], UNKNOWN_PLACEHOLDER);
    }

    #[test]
    fn test_template_string_never_used_as_default() {
        let out = normalize_against_template(&template(), &json!({}));
        // Never the template's own example text
        assert_eq!(out["character_id"], UNKNOWN_PLACEHOLDER);
        assert_eq!(out["pose"]["overall_pose"], UNKNOWN_PLACEHOLDER);
    }

    #[test]
    fn test_whitespace_string_becomes_unknown() {
        let input = json!({ "character_id": "   " });
        let out = normalize_against_template(&template(), &input);
        assert_eq!(out["character_id"], UNKNOWN_PLACEHOLDER);
    }

    #[test]
    fn test_unknown_input_keys_discarded() {
        let input = json!({ "character_id": "c1", "made_up": 42 });
        let out = normalize_against_template(&template(), &input);
        assert!(out.get("made_up").is_none());
    }

    #[test]
    fn test_mistyped_array_falls_back_to_template() {
        let input = json!({ "color_palette": "teal" });
        let out = normalize_against_template(&template(), &input);
        assert_eq!(out["color_palette"], json!([]));
    }

    #[test]
    fn test_array_input_used_verbatim() {
        let input = json!({ "color_palette": ["teal", "silver"] });
        let out = normalize_against_template(&template(), &input);
        assert_eq!(out["color_palette"], json!(["teal", "silver"]));
    }

    #[test]
    fn test_mistyped_bool_falls_back_to_template() {
        let input = json!({ "pose": { "is_airborne": "yes" } });
        let out = normalize_against_template(&template(), &input);
        assert_eq!(out["pose"]["is_airborne"], false);
    }

    #[test]
    fn test_bool_input_used_on_type_match() {
        let input = json!({ "pose": { "is_airborne": true } });
        let out = normalize_against_template(&template(), &input);
        assert_eq!(out["pose"]["is_airborne"], true);
    }

    #[test]
    fn test_non_object_input_fills_whole_template() {
        let out = normalize_against_template(&template(), &json!("garbage"));
        assert_eq!(out["character_id"], UNKNOWN_PLACEHOLDER);
        assert_eq!(out["pose"]["is_airborne"], false);
        assert_eq!(out["color_palette"], json!([]));
    }
}
