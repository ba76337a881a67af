//! Drag-and-drop payloads carried from palette entries to the canvas.

use crate::catalog::{FontOption, StickerOption};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use thiserror::Error;

/// MIME type of the structured payload.
pub const MIME_JSON: &str = "application/json";
/// MIME type of the plain-text fallback.
pub const MIME_TEXT: &str = "text/plain";
/// Drop effect advertised by palette drag sources.
pub const DROP_EFFECT: &str = "copy";

/// Payload errors.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("No structured payload")]
    Missing,
    #[error("Malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("Unrecognized payload")]
    Unrecognized,
}

/// A recognized drop payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    /// A text snippet in a given font.
    Font { family: String, text: String },
    /// A sticker image.
    Sticker { src: String },
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

impl DragPayload {
    /// Parse the structured form.
    ///
    /// A font payload needs a non-empty `family` and `text`; a sticker payload
    /// needs `type == "sticker"` and a non-empty `src`. Font wins when both
    /// shapes are present. Other fields, whatever their type, are ignored.
    pub fn parse(json: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(json)?;
        if let (Some(family), Some(text)) = (string_field(&value, "family"), string_field(&value, "text")) {
            return Ok(DragPayload::Font { family, text });
        }
        match (value.get("type").and_then(Value::as_str), string_field(&value, "src")) {
            (Some("sticker"), Some(src)) => Ok(DragPayload::Sticker { src }),
            _ => Err(PayloadError::Unrecognized),
        }
    }

    /// Serialize to the structured form.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let value = match self {
            DragPayload::Font { family, text } => json!({ "family": family, "text": text }),
            DragPayload::Sticker { src } => json!({ "type": "sticker", "src": src }),
        };
        serde_json::to_string(&value)
    }
}

/// The two parallel representations set on a drag data channel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragData {
    /// `application/json` entry.
    pub json: Option<String>,
    /// `text/plain` entry.
    pub plain_text: Option<String>,
}

impl DragData {
    /// Build drag data from raw channel entries.
    pub fn new(json: Option<String>, plain_text: Option<String>) -> Self {
        Self { json, plain_text }
    }

    /// Drag data for a font palette entry.
    pub fn for_font(option: &FontOption) -> Result<Self, serde_json::Error> {
        let payload = DragPayload::Font {
            family: option.family.to_string(),
            text: option.sample_text.to_string(),
        };
        Ok(Self {
            json: Some(payload.to_json()?),
            plain_text: Some(option.sample_text.to_string()),
        })
    }

    /// Drag data for a sticker palette entry.
    pub fn for_sticker(option: &StickerOption) -> Result<Self, serde_json::Error> {
        let payload = DragPayload::Sticker {
            src: option.src.to_string(),
        };
        Ok(Self {
            json: Some(payload.to_json()?),
            plain_text: None,
        })
    }

    /// Read both entries from a drag data channel by MIME type. Empty
    /// entries count as absent.
    pub fn from_channel(mut get: impl FnMut(&str) -> Option<String>) -> Self {
        Self {
            json: non_empty(get(MIME_JSON)),
            plain_text: non_empty(get(MIME_TEXT)),
        }
    }

    /// Entries to set on a drag data channel, as (MIME type, value).
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [(MIME_JSON, self.json.as_deref()), (MIME_TEXT, self.plain_text.as_deref())]
            .into_iter()
            .filter_map(|(mime, value)| value.map(|v| (mime, v)))
            .collect()
    }

    /// Parse the structured entry. The plain-text fallback is never used
    /// for drops.
    pub fn payload(&self) -> Result<DragPayload, PayloadError> {
        match self.json.as_deref() {
            Some(json) if !json.is_empty() => DragPayload::parse(json),
            _ => Err(PayloadError::Missing),
        }
    }
}
