use serde::Serialize;

use crate::options::Resolution;

pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";
pub const HIGH_RESOLUTION_IMAGE_MODEL: &str = "gemini-3-pro-image-preview";
pub const ASPECT_RATIO: &str = "4:3";
pub const HIGH_RESOLUTION_TIER: &str = "2K";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationParameters {
    pub model_id: &'static str,
    pub aspect_ratio: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resolution_tier: Option<&'static str>,
}

pub fn select_parameters(resolution: Resolution) -> GenerationParameters {
    match resolution {
        Resolution::High => GenerationParameters {
            model_id: HIGH_RESOLUTION_IMAGE_MODEL,
            aspect_ratio: ASPECT_RATIO,
            resolution_tier: Some(HIGH_RESOLUTION_TIER),
        },
        Resolution::Low | Resolution::Medium => GenerationParameters {
            model_id: DEFAULT_IMAGE_MODEL,
            aspect_ratio: ASPECT_RATIO,
            resolution_tier: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_resolution_switches_model_and_adds_tier() {
        let params = select_parameters(Resolution::High);
        assert_eq!(params.model_id, HIGH_RESOLUTION_IMAGE_MODEL);
        assert_ne!(params.model_id, DEFAULT_IMAGE_MODEL);
        assert_eq!(params.resolution_tier, Some("2K"));
        assert_eq!(params.aspect_ratio, "4:3");
    }

    #[test]
    fn low_and_medium_use_default_model_without_tier() {
        for resolution in [Resolution::Low, Resolution::Medium] {
            let params = select_parameters(resolution);
            assert_eq!(params.model_id, DEFAULT_IMAGE_MODEL);
            assert_eq!(params.aspect_ratio, "4:3");
            assert!(params.resolution_tier.is_none());
        }
    }

    #[test]
    fn tier_is_omitted_from_wire_form_when_absent() {
        let value = serde_json::to_value(select_parameters(Resolution::Low)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "modelId": DEFAULT_IMAGE_MODEL, "aspectRatio": "4:3" })
        );
        let value = serde_json::to_value(select_parameters(Resolution::High)).unwrap();
        assert_eq!(value["resolutionTier"], "2K");
    }
}
