//! Envelope types for the AnkiConnect wire protocol.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// AnkiConnect protocol version spoken by this crate.
const API_VERSION: u8 = 6;

/// `{"action", "version", "key"?, "params"?}` as posted to AnkiConnect.
#[derive(Debug, Serialize)]
pub(crate) struct AnkiRequest<'a, T> {
    pub action: &'a str,
    pub version: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<T>,
}

impl<'a, T> AnkiRequest<'a, T> {
    pub fn new(action: &'a str, params: Option<T>, key: Option<&'a str>) -> Self {
        Self {
            action,
            version: API_VERSION,
            key,
            params,
        }
    }
}

/// `{"result", "error"}` as returned by AnkiConnect.
#[derive(Debug, Deserialize)]
pub(crate) struct AnkiResponse<T> {
    pub result: Option<T>,
    pub error: Option<String>,
}

impl<T> AnkiResponse<T> {
    /// Collapse the envelope into a value or a typed error.
    ///
    /// An error string always wins over a result, even if both are present.
    pub fn into_result(self) -> Result<T> {
        match (self.result, self.error) {
            (_, Some(err)) if err.contains("permission") => Err(Error::PermissionDenied),
            (_, Some(err)) => Err(Error::AnkiConnect(err)),
            (Some(result), None) => Ok(result),
            (None, None) => Err(Error::EmptyResponse),
        }
    }
}
