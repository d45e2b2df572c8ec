// Cache key derivation
// Author: kelexine (https://github.com/kelexine)

use crate::error::Result;
use crate::models::CharacterDescription;
use sha2::{Digest, Sha256};

/// SHA-256 hex fingerprint of arbitrary content.
///
/// Collision-resistant and stable across runs and process restarts, so
/// identical inputs always land on the same cache file.
pub fn fingerprint(input: impl AsRef<[u8]>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_ref());
    format!("{:x}", hasher.finalize())
}

// The operation tag strings are part of the on-disk format: changing them
// orphans every existing cache entry.

/// Cache key for describing a base64-encoded image.
pub fn describe_key(base64_image: &str) -> String {
    let image_fingerprint = fingerprint(base64_image);
    fingerprint(format!("describeFromBase64|img={}", image_fingerprint))
}

/// Cache key for a pose update of a given description and prompt.
pub fn pose_update_key(description: &CharacterDescription, pose_prompt: &str) -> Result<String> {
    let description_fingerprint = fingerprint(serde_json::to_string(description)?);
    let prompt_fingerprint = fingerprint(pose_prompt);
    Ok(fingerprint(format!(
        "updatePoseDescription|desc={}|prompt={}",
        description_fingerprint, prompt_fingerprint
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::character::fixtures::sample_description;

    #[test]
    fn test_fingerprint_is_hex_sha256() {
        let fp = fingerprint("hello");
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
        // Known digest of "hello"
        assert_eq!(
            fp,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_describe_key_deterministic() {
        assert_eq!(describe_key("QUJD"), describe_key("QUJD"));
        assert_ne!(describe_key("QUJD"), describe_key("QUJE"));
    }

    #[test]
    fn test_describe_key_pins_disk_format() {
        // sha256("describeFromBase64|img=" + sha256("QUJD")); existing cache
        // directories depend on this exact value
        assert_eq!(
            describe_key("QUJD"),
            "ad077e75c5a802a8b8e674b682195b81b8959646e4d075ae2b6ddaf30dd3aaba"
        );
    }

    #[test]
    fn test_pose_update_key_varies_with_both_inputs() {
        let desc = sample_description();
        let mut other = desc.clone();
        other.outfit = "red cloak".to_string();

        let base = pose_update_key(&desc, "jump").unwrap();
        assert_eq!(base, pose_update_key(&desc, "jump").unwrap());
        assert_ne!(base, pose_update_key(&desc, "crouch").unwrap());
        assert_ne!(base, pose_update_key(&other, "jump").unwrap());
    }

    #[test]
    fn test_operations_never_share_keys() {
        // The operation tag keeps the two key spaces disjoint even for
        // overlapping raw content.
        let desc = sample_description();
        let describe = describe_key("payload");
        let pose = pose_update_key(&desc, "payload").unwrap();
        assert_ne!(describe, pose);
    }
}
