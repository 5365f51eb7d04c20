//! Media-related types.

use serde::Serialize;

/// Parameters for `storeMediaFile`.
///
/// cardlink always uploads file contents inline, so only the base64 `data`
/// source is modelled.
#[derive(Debug, Clone, Serialize)]
pub struct StoreMediaParams {
    /// Filename to save as in the collection's media folder.
    pub filename: String,
    /// Base64-encoded file data.
    pub data: String,
}

impl StoreMediaParams {
    /// Create params for storing base64-encoded data.
    pub fn from_base64(filename: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            data: data.into(),
        }
    }
}
