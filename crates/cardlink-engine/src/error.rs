//! Error types for cardlink-engine.
//!
//! Errors from engine workflows fall into two categories:
//!
//! 1. **Client errors**: Wrapped from the underlying [`cardlink::Error`] type
//! 2. **Workflow errors**: Raised by the engine itself (missing media, bad input)
//!
//! # Example
//!
//! ```no_run
//! use cardlink_engine::{BulkRequest, Engine, Error};
//!
//! # async fn example(request: BulkRequest) {
//! let engine = Engine::new();
//!
//! match engine.cards().add_bulk(&request).await {
//!     Ok(result) => println!("{} created", result.summary.successful),
//!     Err(Error::MissingMedia(paths)) => eprintln!("missing: {}", paths.join(", ")),
//!     Err(Error::Client(cardlink::Error::ConnectionRefused)) => eprintln!("Is Anki running?"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! # }
//! ```

use std::fmt;

/// Result type for cardlink-engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during engine operations.
#[derive(Debug)]
pub enum Error {
    /// An error from the underlying cardlink client.
    Client(cardlink::Error),

    /// One or more media paths were missing or unreadable during pre-flight.
    ///
    /// Holds every offending path, in request order.
    MissingMedia(Vec<String>),

    /// A media file was read during pre-flight but Anki refused to store it.
    MediaUpload {
        /// The filename the upload was stored under.
        filename: String,
        /// What went wrong.
        source: Box<Error>,
    },

    /// An I/O error occurred.
    Io(std::io::Error),

    /// The request was rejected before reaching Anki.
    Validation(String),
}

impl Error {
    /// A stable snake_case label for the error, suitable for machine consumers.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Client(cardlink::Error::ConnectionRefused) => "connection_refused",
            Error::Client(cardlink::Error::PermissionDenied) => "permission_denied",
            Error::Client(cardlink::Error::AnkiConnect(_)) => "anki_connect",
            Error::Client(_) => "transport",
            Error::MissingMedia(_) => "missing_media",
            Error::MediaUpload { .. } => "media_upload",
            Error::Io(_) => "io",
            Error::Validation(_) => "validation",
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Client(e) => Some(e),
            Error::MediaUpload { source, .. } => Some(source.as_ref()),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Client(e) => write!(f, "{}", e),
            Error::MissingMedia(paths) => {
                write!(f, "media files missing or unreadable: {}", paths.join(", "))
            }
            Error::MediaUpload { filename, source } => {
                write!(f, "failed to store media file '{}': {}", filename, source)
            }
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Validation(msg) => write!(f, "validation error: {}", msg),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<cardlink::Error> for Error {
    fn from(err: cardlink::Error) -> Self {
        Error::Client(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_media_lists_every_path() {
        let err = Error::MissingMedia(vec!["/a.mp3".into(), "/b.png".into()]);
        assert_eq!(err.to_string(), "media files missing or unreadable: /a.mp3, /b.png");
        assert_eq!(err.kind(), "missing_media");
    }

    #[test]
    fn test_client_kinds() {
        assert_eq!(
            Error::from(cardlink::Error::ConnectionRefused).kind(),
            "connection_refused"
        );
        assert_eq!(
            Error::from(cardlink::Error::AnkiConnect("deck was not found".into())).kind(),
            "anki_connect"
        );
        assert_eq!(Error::from(cardlink::Error::EmptyResponse).kind(), "transport");
    }

    #[test]
    fn test_media_upload_has_source() {
        use std::error::Error as _;

        let err = Error::MediaUpload {
            filename: "clip.mp3".into(),
            source: Box::new(Error::Client(cardlink::Error::EmptyResponse)),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().starts_with("failed to store media file 'clip.mp3'"));
    }
}
