//! Uploading local media files into the collection.
//!
//! Two policies share the same upload primitive:
//!
//! - [`BestEffort`] uploads what it can and skips files it cannot read or
//!   store. Used when creating a single card.
//! - [`ValidateThenCommit`] reads every file before uploading anything and
//!   fails the whole request if any is missing or unreadable. Used for bulk
//!   creation.
//!
//! Both return the stored filenames in input order. A stored filename is the
//! last segment of its source path; duplicates are kept (Anki keeps the last
//! upload under that name).

use std::future::Future;
use std::path::{Path, PathBuf};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use cardlink::{AnkiClient, StoreMediaParams};
use futures::future::join_all;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Broad category of a media file, from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    /// mp3, wav, m4a, aac, flac, opus
    Audio,
    /// jpg, jpeg, png, gif, webp, svg
    Image,
    /// Anything else. Never embedded.
    Unknown,
}

impl MediaKind {
    /// Classify a filename by extension, case-insensitively.
    pub fn from_filename(filename: &str) -> Self {
        let ext = Path::new(filename)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);

        match ext.as_deref() {
            Some("mp3" | "wav" | "m4a" | "aac" | "flac" | "opus") => MediaKind::Audio,
            Some("jpg" | "jpeg" | "png" | "gif" | "webp" | "svg") => MediaKind::Image,
            _ => MediaKind::Unknown,
        }
    }
}

/// A local file on its way into the media folder.
#[derive(Debug, Clone)]
pub struct MediaAttachment {
    /// Path as given by the caller.
    pub source_path: PathBuf,
    /// Name the file is stored under.
    pub filename: String,
    /// Category inferred from the filename.
    pub kind: MediaKind,
}

impl MediaAttachment {
    /// Build an attachment from a path. `None` if the path has no final
    /// segment (e.g. `/` or `..`).
    pub fn from_path(path: &str) -> Option<Self> {
        let source_path = PathBuf::from(path);
        let filename = source_path.file_name()?.to_str()?.to_string();
        let kind = MediaKind::from_filename(&filename);
        Some(Self {
            source_path,
            filename,
            kind,
        })
    }
}

/// A file read from disk and encoded, ready for `storeMediaFile`.
#[derive(Debug, Clone)]
pub struct PreparedMedia {
    /// Where the bytes came from and what they are stored as.
    pub attachment: MediaAttachment,
    /// Base64 of the file contents.
    pub data: String,
}

impl PreparedMedia {
    /// Read and encode the attachment's source file.
    pub async fn read(attachment: MediaAttachment) -> std::io::Result<Self> {
        let bytes = tokio::fs::read(&attachment.source_path).await?;
        Ok(Self {
            attachment,
            data: STANDARD.encode(bytes),
        })
    }

    async fn store(&self, client: &AnkiClient) -> Result<()> {
        let params = StoreMediaParams::from_base64(&self.attachment.filename, self.data.as_str());
        client.media().store(&params).await?;
        Ok(())
    }
}

/// A policy for turning a list of local paths into stored media.
pub trait MediaStrategy {
    /// Upload `paths` and return the stored filenames, in input order.
    fn resolve(
        &self,
        client: &AnkiClient,
        paths: &[String],
    ) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Upload each file independently; failures are logged and skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct BestEffort;

impl MediaStrategy for BestEffort {
    async fn resolve(&self, client: &AnkiClient, paths: &[String]) -> Result<Vec<String>> {
        let mut stored = Vec::with_capacity(paths.len());

        for path in paths {
            let Some(attachment) = MediaAttachment::from_path(path) else {
                warn!(path = %path, "Skipping media path without a filename");
                continue;
            };

            let prepared = match PreparedMedia::read(attachment).await {
                Ok(prepared) => prepared,
                Err(e) => {
                    warn!(path = %path, error = %e, "Skipping unreadable media file");
                    continue;
                }
            };

            match prepared.store(client).await {
                Ok(()) => {
                    debug!(filename = %prepared.attachment.filename, "Stored media file");
                    stored.push(prepared.attachment.filename);
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "Skipping media file");
                }
            }
        }

        Ok(stored)
    }
}

/// Read every file up front, then upload all of them.
///
/// Nothing is uploaded unless every path can be read. The reads run
/// concurrently; uploads run one at a time and touch only Anki.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidateThenCommit;

impl ValidateThenCommit {
    /// Pre-flight. Returns the encoded files, or [`Error::MissingMedia`]
    /// naming every path that is missing or cannot be read.
    pub async fn validate(&self, paths: &[String]) -> Result<Vec<PreparedMedia>> {
        let reads = paths.iter().map(|path| async move {
            let prepared = match MediaAttachment::from_path(path) {
                Some(attachment) => PreparedMedia::read(attachment)
                    .await
                    .inspect_err(|e| debug!(path = %path, error = %e, "Media pre-flight failed"))
                    .ok(),
                None => None,
            };
            (path, prepared)
        });

        let mut prepared = Vec::with_capacity(paths.len());
        let mut missing = Vec::new();
        for (path, result) in join_all(reads).await {
            match result {
                Some(p) => prepared.push(p),
                None => missing.push(path.clone()),
            }
        }

        if missing.is_empty() {
            Ok(prepared)
        } else {
            Err(Error::MissingMedia(missing))
        }
    }
}

impl MediaStrategy for ValidateThenCommit {
    async fn resolve(&self, client: &AnkiClient, paths: &[String]) -> Result<Vec<String>> {
        let prepared = self.validate(paths).await?;
        let mut stored = Vec::with_capacity(prepared.len());

        for media in prepared {
            media.store(client).await.map_err(|e| Error::MediaUpload {
                filename: media.attachment.filename.clone(),
                source: Box::new(e),
            })?;
            debug!(filename = %media.attachment.filename, "Stored media file");
            stored.push(media.attachment.filename);
        }

        Ok(stored)
    }
}
