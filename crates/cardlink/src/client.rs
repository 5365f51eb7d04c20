//! The AnkiConnect client and builder.

use std::time::Duration;

use reqwest::Client;
use serde::{Serialize, de::DeserializeOwned};

use crate::actions::{CardActions, DeckActions, MediaActions, NoteActions};
use crate::error::{Error, Result};
use crate::request::{AnkiRequest, AnkiResponse};

const DEFAULT_URL: &str = "http://127.0.0.1:8765";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the four AnkiConnect action groups cardlink uses: decks,
/// cards, notes and media.
///
/// Holds no collection state; every call is a fresh POST, so repeated reads
/// can differ if another program edits the collection in between.
///
/// ```no_run
/// use cardlink::AnkiClient;
///
/// # async fn example() -> cardlink::Result<()> {
/// let client = AnkiClient::new();
/// let decks = client.decks().names().await?;
/// println!("{} decks", decks.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct AnkiClient {
    http: Client,
    endpoint: String,
    api_key: Option<String>,
}

impl AnkiClient {
    /// A client for `http://127.0.0.1:8765` with a 30 second timeout.
    pub fn new() -> Self {
        ClientBuilder::new().build()
    }

    /// Start configuring a client.
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// The AnkiConnect endpoint this client posts to.
    pub fn url(&self) -> &str {
        &self.endpoint
    }

    /// `deckNames`.
    pub fn decks(&self) -> DeckActions<'_> {
        DeckActions { client: self }
    }

    /// `findCards` and `cardsInfo`.
    pub fn cards(&self) -> CardActions<'_> {
        CardActions { client: self }
    }

    /// `addNote`.
    pub fn notes(&self) -> NoteActions<'_> {
        NoteActions { client: self }
    }

    /// `storeMediaFile`.
    pub fn media(&self) -> MediaActions<'_> {
        MediaActions { client: self }
    }

    /// Run `action` with `params`.
    pub(crate) async fn invoke<P, R>(&self, action: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        self.post(&AnkiRequest::new(action, Some(params), self.api_key.as_deref()))
            .await
    }

    /// Run `action` with no `params` key at all.
    pub(crate) async fn invoke_bare<R>(&self, action: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        self.post(&AnkiRequest::<()>::new(action, None, self.api_key.as_deref()))
            .await
    }

    async fn post<P, R>(&self, request: &AnkiRequest<'_, P>) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        response.json::<AnkiResponse<R>>().await?.into_result()
    }
}

impl Default for AnkiClient {
    fn default() -> Self {
        Self::new()
    }
}

// A refused connection almost always means Anki is not running.
fn send_error(err: reqwest::Error) -> Error {
    if err.is_connect() {
        Error::ConnectionRefused
    } else {
        Error::Http(err)
    }
}

/// Configures an [`AnkiClient`].
///
/// ```no_run
/// use std::time::Duration;
/// use cardlink::AnkiClient;
///
/// let client = AnkiClient::builder()
///     .url("http://localhost:8765")
///     .api_key("my-secret-key")
///     .timeout(Duration::from_secs(60))
///     .build();
/// ```
#[derive(Debug, Clone)]
pub struct ClientBuilder {
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self {
            endpoint: DEFAULT_URL.to_string(),
            api_key: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// AnkiConnect endpoint. Defaults to `http://127.0.0.1:8765`.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.endpoint = url.into();
        self
    }

    /// Key sent with every request; only needed when the add-on sets `apiKey`.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Per-request timeout. Defaults to 30 seconds.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    /// Build the client. If reqwest rejects the settings, the client falls
    /// back to reqwest's defaults.
    pub fn build(self) -> AnkiClient {
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        AnkiClient {
            http,
            endpoint: self.endpoint,
            api_key: self.api_key,
        }
    }
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
