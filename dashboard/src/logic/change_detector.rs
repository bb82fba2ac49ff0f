//! Change Detector - Fingerprint gate for view regions
//!
//! A fingerprint is the SHA-256 of the fragment's canonical JSON
//! serialization (object keys sorted), so equality is structural.

use std::collections::HashMap;

use serde::Serialize;
use sha2::{Digest, Sha256};

/// Regions gated by fingerprints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Detections,
    Logs,
}

pub type Fingerprint = [u8; 32];

/// Fingerprint of a serializable fragment, `None` if it cannot be serialized
pub fn fingerprint<T: Serialize + ?Sized>(fragment: &T) -> Option<Fingerprint> {
    match serde_json::to_vec(fragment) {
        Ok(bytes) => Some(Sha256::digest(&bytes).into()),
        Err(e) => {
            log::warn!("Cannot fingerprint fragment: {}", e);
            None
        }
    }
}

#[derive(Debug)]
pub struct ChangeDetector {
    enabled: bool,
    rendered: HashMap<Region, Fingerprint>,
}

impl Default for ChangeDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self {
            enabled: true,
            rendered: HashMap::new(),
        }
    }

    /// Detector that grants every render (basic profile)
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            rendered: HashMap::new(),
        }
    }

    #[cfg(test)]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// True (and remembers the new fingerprint) iff the fragment differs
    /// from the last one rendered for `region`, or nothing was rendered yet.
    pub fn should_render<T: Serialize + ?Sized>(&mut self, region: Region, fragment: &T) -> bool {
        if !self.enabled {
            return true;
        }

        let Some(next) = fingerprint(fragment) else {
            self.rendered.remove(&region);
            return true;
        };

        if self.rendered.get(&region) == Some(&next) {
            return false;
        }

        log::debug!("{:?} changed ({})", region, hex::encode(&next[..8]));
        self.rendered.insert(region, next);
        true
    }

    /// Hex fingerprint last rendered for a region
    #[cfg(test)]
    pub fn rendered_fingerprint(&self, region: Region) -> Option<String> {
        self.rendered.get(&region).map(hex::encode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_fragment_renders() {
        let mut detector = ChangeDetector::new();
        assert!(detector.should_render(Region::Detections, &json!([])));
        assert!(detector.rendered_fingerprint(Region::Detections).is_some());
        assert!(detector.rendered_fingerprint(Region::Logs).is_none());
    }

    #[test]
    fn test_identical_fragment_suppressed() {
        let mut detector = ChangeDetector::new();
        let logs = json!(["a", "b", "c"]);

        assert!(detector.should_render(Region::Logs, &logs));
        assert!(!detector.should_render(Region::Logs, &logs.clone()));
        assert!(!detector.should_render(Region::Logs, &vec!["a", "b", "c"]));
    }

    #[test]
    fn test_structural_equality_ignores_key_order() {
        let mut detector = ChangeDetector::new();
        let a: serde_json::Value =
            serde_json::from_str(r#"[{"label":"cup","confidence":0.5}]"#).unwrap();
        let b: serde_json::Value =
            serde_json::from_str(r#"[{"confidence":0.5,"label":"cup"}]"#).unwrap();

        assert!(detector.should_render(Region::Detections, &a));
        assert!(!detector.should_render(Region::Detections, &b));
    }

    #[test]
    fn test_change_renders_and_updates() {
        let mut detector = ChangeDetector::new();

        assert!(detector.should_render(Region::Logs, &json!(["a"])));
        assert!(detector.should_render(Region::Logs, &json!(["a", "b"])));
        assert!(!detector.should_render(Region::Logs, &json!(["a", "b"])));
        assert!(detector.should_render(Region::Logs, &json!(["a"])));
    }

    #[test]
    fn test_regions_are_independent() {
        let mut detector = ChangeDetector::new();
        let fragment = json!([]);

        assert!(detector.should_render(Region::Detections, &fragment));
        assert!(detector.should_render(Region::Logs, &fragment));
        assert!(!detector.should_render(Region::Detections, &fragment));
    }

    #[test]
    fn test_disabled_grants_every_render() {
        let mut disabled = ChangeDetector::disabled();
        assert!(!disabled.is_enabled());
        assert!(disabled.should_render(Region::Logs, &json!(["x"])));
        assert!(disabled.should_render(Region::Logs, &json!(["x"])));
    }
}
