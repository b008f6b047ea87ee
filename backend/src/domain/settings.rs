//! Free-form OCR configuration values.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One opaque OCR configuration value with its generated identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OcrSetting {
    pub id: Uuid,
    pub value: String,
}

impl OcrSetting {
    /// Wrap a raw value with a fresh identifier.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            value: value.into(),
        }
    }
}
