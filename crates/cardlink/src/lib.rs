//! Async Rust client for the AnkiConnect calls cardlink needs.
//!
//! AnkiConnect is an Anki add-on that exposes the open collection over a
//! local JSON-over-HTTP API. This crate covers deck listing, card search and
//! lookup, note creation, and media upload.
//!
//! # Quick Start
//!
//! ```no_run
//! use cardlink::{AnkiClient, NoteBuilder};
//!
//! # async fn example() -> cardlink::Result<()> {
//! let client = AnkiClient::new();
//!
//! let decks = client.decks().names().await?;
//! println!("Decks: {:?}", decks);
//!
//! let note = NoteBuilder::new("Default", "Basic")
//!     .field("Front", "hola")
//!     .field("Back", "hello")
//!     .build();
//! let note_id = client.notes().add(&note).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! - Anki must be running with the [AnkiConnect](https://ankiweb.net/shared/info/2055492159) add-on installed
//! - By default, the client connects to `http://127.0.0.1:8765`

pub mod actions;
pub mod client;
pub mod error;
pub mod query;
mod request;
pub mod types;

pub use client::{AnkiClient, ClientBuilder};
pub use error::{Error, Result};
pub use query::Query;
pub use types::{CardField, CardInfo, Note, NoteBuilder, NoteOptions, StoreMediaParams};
