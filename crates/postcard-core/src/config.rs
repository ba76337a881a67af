//! Editor configuration.

use crate::catalog::STAMP_EMPTY;
use crate::widgets::{MarkWidget, TextWidget};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Editor configuration.
///
/// Every field has a default, so a partial JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Font family of labels added without a palette choice.
    pub default_font_family: String,
    /// Text of labels added without a palette choice.
    pub placeholder_text: String,
    /// Edge length of drawn marks.
    pub mark_size: f64,
    /// Stamp swap transition length in milliseconds.
    pub stamp_animation_ms: u64,
    /// Image shown in the stamp slot at start.
    pub empty_stamp_src: String,
    /// Upscale factor applied when exporting.
    pub export_scale: f64,
    /// Name of the downloaded file.
    pub export_filename: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            default_font_family: TextWidget::DEFAULT_FONT_FAMILY.to_string(),
            placeholder_text: TextWidget::PLACEHOLDER_TEXT.to_string(),
            mark_size: MarkWidget::SIZE,
            stamp_animation_ms: 400,
            empty_stamp_src: STAMP_EMPTY.to_string(),
            export_scale: 2.0,
            export_filename: "postcard.png".to_string(),
        }
    }
}

impl EditorConfig {
    /// Parse a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Stamp swap transition length.
    pub fn stamp_animation(&self) -> Duration {
        Duration::from_millis(self.stamp_animation_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EditorConfig::default();
        assert_eq!(config.default_font_family, "Unbounded");
        assert_eq!(config.export_filename, "postcard.png");
        assert_eq!(config.stamp_animation(), Duration::from_millis(400));
    }

    #[test]
    fn test_partial_json() {
        let config = EditorConfig::from_json(r#"{"export_scale": 3.0}"#).unwrap();
        assert!((config.export_scale - 3.0).abs() < f64::EPSILON);
        assert_eq!(config.placeholder_text, "Double click to edit");
    }

    #[test]
    fn test_invalid_json() {
        assert!(EditorConfig::from_json("{").is_err());
    }
}
