//! Flashcard workflows on top of the [`cardlink`] AnkiConnect client.
//!
//! `cardlink` maps AnkiConnect actions one to one; this crate combines them
//! into the operations the MCP server exposes: paging through a deck,
//! searching, and creating cards with attached media.
//!
//! # Quick Start
//!
//! ```no_run
//! use cardlink_engine::{BulkRequest, CardRequest, Engine};
//!
//! # async fn example() -> cardlink_engine::Result<()> {
//! let engine = Engine::new();
//!
//! let decks = engine.cards().deck_names().await?;
//!
//! let request = BulkRequest {
//!     deck_name: "Spanish".to_string(),
//!     cards: vec![
//!         CardRequest::new("hola {hola.mp3}", "hello"),
//!         CardRequest::new("adiós", "goodbye"),
//!     ],
//!     media: vec!["/tmp/hola.mp3".to_string()],
//!     ..Default::default()
//! };
//! let result = engine.cards().add_bulk(&request).await?;
//! println!("{} of {} created", result.summary.successful, result.summary.total);
//! # Ok(())
//! # }
//! ```

mod error;

pub mod cards;
pub mod media;
pub mod status;
pub mod substitute;

pub use cards::{
    AddedCard, BulkOptions, BulkRequest, BulkResult, BulkSummary, CardOutcome, CardRecord,
    CardRequest, CardType,
};
pub use error::{Error, Result};
pub use status::{LifecycleState, decode_status};

// Re-export client types for convenience
pub use cardlink::{AnkiClient, ClientBuilder};

use cards::CardEngine;

/// What an empty or absent deck filter means when listing cards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptyDeckPolicy {
    /// List cards from every deck.
    #[default]
    AllDecks,
    /// Refuse the request with [`Error::Validation`].
    Reject,
}

/// Engine-wide settings.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Handling of an empty deck filter in [`CardEngine::in_deck`].
    pub empty_deck: EmptyDeckPolicy,
}

/// Entry point for card workflows.
///
/// Cheap to clone; holds no cached collection data.
#[derive(Debug, Clone)]
pub struct Engine {
    client: AnkiClient,
    options: EngineOptions,
}

impl Engine {
    /// Create a new engine with default client settings.
    ///
    /// Connects to AnkiConnect at `http://127.0.0.1:8765`.
    pub fn new() -> Self {
        Self::from_client(AnkiClient::new())
    }

    /// Create an engine from an existing client.
    pub fn from_client(client: AnkiClient) -> Self {
        Self {
            client,
            options: EngineOptions::default(),
        }
    }

    /// Replace the engine options.
    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Get a reference to the underlying client.
    pub fn client(&self) -> &AnkiClient {
        &self.client
    }

    /// The engine's options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Access card workflows.
    pub fn cards(&self) -> CardEngine<'_> {
        CardEngine::new(&self.client, &self.options)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
