use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Face analysis result as served by `/v1/face/extract` and accepted
/// back by `/v1/report/compose`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaceResult {
    #[serde(default = "default_quality")]
    pub quality: f64,
    #[serde(default)]
    pub landmarks: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    pub features: BTreeMap<String, f64>,
    #[serde(default)]
    pub regions: BTreeMap<String, f64>,
    #[serde(default)]
    pub traits: BTreeMap<String, f64>,
}

fn default_quality() -> f64 {
    0.9
}

impl Default for FaceResult {
    fn default() -> Self {
        Self {
            quality: default_quality(),
            landmarks: None,
            features: BTreeMap::new(),
            regions: BTreeMap::new(),
            traits: BTreeMap::new(),
        }
    }
}

/// Body of `POST /v1/face/extract`.
#[derive(Debug, Clone, Deserialize)]
pub struct FaceInput {
    pub image_base64: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_uses_defaults() {
        let face: FaceResult = serde_json::from_str("{}").unwrap();
        assert_eq!(face, FaceResult::default());
        assert_eq!(face.quality, 0.9);
    }

    #[test]
    fn landmarks_serialize_as_null_when_absent() {
        let json = serde_json::to_value(FaceResult::default()).unwrap();
        assert!(json["landmarks"].is_null());
        assert!(json["regions"].as_object().unwrap().is_empty());
    }
}
