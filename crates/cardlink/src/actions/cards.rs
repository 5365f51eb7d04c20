//! Card-related AnkiConnect actions.
//!
//! Cards are generated from notes; one note can produce several cards.
//!
//! # Example
//!
//! ```no_run
//! use cardlink::{AnkiClient, Query};
//!
//! # async fn example() -> cardlink::Result<()> {
//! let client = AnkiClient::new();
//!
//! let ids = client.cards().find(&Query::new().deck("Japanese").build()).await?;
//! let cards = client.cards().info(&ids[..ids.len().min(5)]).await?;
//! for card in cards {
//!     println!("{} in {}", card.card_id, card.deck_name);
//! }
//! # Ok(())
//! # }
//! ```

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::CardInfo;

/// Provides access to card-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::cards()`].
#[derive(Debug)]
pub struct CardActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct FindCardsParams<'a> {
    query: &'a str,
}

#[derive(Serialize)]
struct CardsInfoParams<'a> {
    cards: &'a [i64],
}

impl<'a> CardActions<'a> {
    /// Find cards matching an Anki search query.
    ///
    /// Returns card IDs in the order Anki reports them. Use
    /// [`info()`](Self::info) to fetch the cards themselves.
    pub async fn find(&self, query: &str) -> Result<Vec<i64>> {
        self.client
            .invoke("findCards", FindCardsParams { query })
            .await
    }

    /// Get detailed information about cards.
    ///
    /// Results come back in the same order as `card_ids`.
    pub async fn info(&self, card_ids: &[i64]) -> Result<Vec<CardInfo>> {
        self.client
            .invoke("cardsInfo", CardsInfoParams { cards: card_ids })
            .await
    }
}
