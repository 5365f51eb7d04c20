//! Media-related AnkiConnect actions.

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::StoreMediaParams;

/// Provides access to media-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::media()`].
#[derive(Debug)]
pub struct MediaActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

impl<'a> MediaActions<'a> {
    /// Store a file in the collection's media folder.
    ///
    /// Returns the filename Anki stored the file under.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use cardlink::{AnkiClient, StoreMediaParams};
    ///
    /// # async fn example() -> cardlink::Result<()> {
    /// let client = AnkiClient::new();
    /// let params = StoreMediaParams::from_base64("hello.txt", "SGVsbG8gV29ybGQ=");
    /// let stored = client.media().store(&params).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn store(&self, params: &StoreMediaParams) -> Result<String> {
        self.client.invoke("storeMediaFile", params).await
    }
}
