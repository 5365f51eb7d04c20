//! Listing, searching and creating cards.
//!
//! # Example
//!
//! ```no_run
//! use cardlink_engine::{CardRequest, Engine};
//!
//! # async fn example() -> cardlink_engine::Result<()> {
//! let engine = Engine::new();
//!
//! let page = engine.cards().in_deck(Some("Spanish"), 10, 0).await?;
//! let hits = engine.cards().search("hola", Some("Spanish")).await?;
//!
//! let card = CardRequest::new("Listen: {hola.mp3}", "hello").media(["/tmp/hola.mp3"]);
//! let added = engine.cards().add("Spanish", &card).await?;
//! println!("note {} with media {:?}", added.note_id, added.stored_media);
//! # Ok(())
//! # }
//! ```

use cardlink::{AnkiClient, CardInfo, Note, NoteBuilder, Query};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::media::{BestEffort, MediaStrategy, ValidateThenCommit};
use crate::status::{LifecycleState, decode_status};
use crate::substitute::substitute_placeholders;
use crate::{EmptyDeckPolicy, EngineOptions, Error, Result};

/// Name of the extra field that carries [`CardRequest::note`].
pub const NOTE_FIELD: &str = "Note";

/// Card template to create.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    /// Front to back.
    #[default]
    Basic,
    /// Fill-in-the-blank.
    Cloze,
    /// Front to back and back to front.
    Reverse,
}

impl CardType {
    /// The Anki note type used for this card type.
    pub fn model_name(&self) -> &'static str {
        match self {
            CardType::Basic => "Basic",
            CardType::Cloze => "Cloze",
            CardType::Reverse => "Basic (and reversed card)",
        }
    }

    /// Note fields that receive the front and back text.
    pub fn field_names(&self) -> (&'static str, &'static str) {
        match self {
            CardType::Cloze => ("Text", "Back Extra"),
            CardType::Basic | CardType::Reverse => ("Front", "Back"),
        }
    }
}

/// One card to create.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    /// Front text; may contain `{filename}` placeholders.
    pub front: String,
    /// Back text; may contain `{filename}` placeholders.
    pub back: String,
    /// Tags, in order.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Extra content stored in the [`NOTE_FIELD`] field.
    #[serde(default)]
    pub note: Option<String>,
    /// Template to use. Ignored by bulk creation, which always uses Basic.
    #[serde(default)]
    pub card_type: CardType,
    /// Local files to upload before creating the card.
    #[serde(default)]
    pub media: Vec<String>,
}

impl CardRequest {
    /// A basic card with no tags, note or media.
    pub fn new(front: impl Into<String>, back: impl Into<String>) -> Self {
        Self {
            front: front.into(),
            back: back.into(),
            ..Default::default()
        }
    }

    /// Set the tags.
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the extra note text.
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Set the card type.
    pub fn card_type(mut self, card_type: CardType) -> Self {
        self.card_type = card_type;
        self
    }

    /// Set the media paths.
    pub fn media(mut self, paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.media = paths.into_iter().map(Into::into).collect();
        self
    }
}

/// Options for bulk creation.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOptions {
    /// Let Anki create notes that duplicate an existing first field.
    #[serde(default)]
    pub allow_duplicates: Option<bool>,
}

/// Many cards for one deck, sharing one media list.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkRequest {
    /// Target deck for every card.
    pub deck_name: String,
    /// Cards, created in this order.
    pub cards: Vec<CardRequest>,
    /// Media shared by all cards. Per-card `media` is not used in bulk mode.
    #[serde(default)]
    pub media: Vec<String>,
    /// Bulk options.
    #[serde(default)]
    pub options: BulkOptions,
}

/// Outcome of one card in a bulk request.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardOutcome {
    /// Position of the card in the request.
    pub card_index: usize,
    /// Whether the note was created.
    pub success: bool,
    /// ID of the created note.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note_id: Option<i64>,
    /// Why creation failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Counts for a bulk request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    /// Cards in the request.
    pub total: usize,
    /// Cards created.
    pub successful: usize,
    /// Cards that failed.
    pub failed: usize,
}

/// Result of a bulk request that got past media handling.
///
/// `summary.total == per_card_results.len()`,
/// `summary.successful + summary.failed == summary.total`, and
/// `success == (summary.failed == 0)`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkResult {
    /// True iff no card failed.
    pub success: bool,
    /// One entry per requested card, in request order.
    pub per_card_results: Vec<CardOutcome>,
    /// Counts.
    pub summary: BulkSummary,
    /// Media filenames stored before the cards were created.
    pub stored_media: Vec<String>,
}

impl BulkResult {
    fn from_outcomes(per_card_results: Vec<CardOutcome>, stored_media: Vec<String>) -> Self {
        let successful = per_card_results.iter().filter(|r| r.success).count();
        let summary = BulkSummary {
            total: per_card_results.len(),
            successful,
            failed: per_card_results.len() - successful,
        };
        Self {
            success: summary.failed == 0,
            per_card_results,
            summary,
            stored_media,
        }
    }
}

/// A successfully created card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddedCard {
    /// ID of the new note.
    pub note_id: i64,
    /// Deck the note was added to.
    pub deck_name: String,
    /// Media filenames that were stored for this card.
    pub stored_media: Vec<String>,
}

/// A card as shown to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    /// Card ID.
    pub id: i64,
    /// `Front` field, else the rendered question.
    pub front: String,
    /// `Back` field, else the rendered answer.
    pub back: String,
    /// Deck the card is in.
    pub deck_name: String,
    /// Decoded queue; `unknown` when Anki did not report one.
    pub state: LifecycleState,
}

impl From<CardInfo> for CardRecord {
    fn from(info: CardInfo) -> Self {
        let front = info
            .field("Front")
            .map(str::to_string)
            .unwrap_or_else(|| info.question.clone());
        let back = info
            .field("Back")
            .map(str::to_string)
            .unwrap_or_else(|| info.answer.clone());

        Self {
            id: info.card_id,
            front,
            back,
            deck_name: info.deck_name,
            state: info
                .queue
                .map_or(LifecycleState::Unknown, |q| decode_status(i64::from(q))),
        }
    }
}

/// Card workflow engine.
#[derive(Debug)]
pub struct CardEngine<'a> {
    client: &'a AnkiClient,
    options: &'a EngineOptions,
}

impl<'a> CardEngine<'a> {
    pub(crate) fn new(client: &'a AnkiClient, options: &'a EngineOptions) -> Self {
        Self { client, options }
    }

    /// All deck names, in the order Anki returns them.
    pub async fn deck_names(&self) -> Result<Vec<String>> {
        Ok(self.client.decks().names().await?)
    }

    /// A page of cards from a deck.
    ///
    /// `offset` and `limit` slice the list of matching card IDs, so only the
    /// cards on the page are fetched. An empty or absent `deck` follows the
    /// engine's [`EmptyDeckPolicy`].
    pub async fn in_deck(
        &self,
        deck: Option<&str>,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<CardRecord>> {
        let query = match non_empty(deck) {
            Some(deck) => Query::new().deck(deck).build(),
            None => match self.options.empty_deck {
                EmptyDeckPolicy::AllDecks => Query::new().all_decks().build(),
                EmptyDeckPolicy::Reject => {
                    return Err(Error::Validation("deckName must not be empty".to_string()));
                }
            },
        };

        let ids = self.client.cards().find(&query).await?;
        let page: Vec<i64> = ids.into_iter().skip(offset).take(limit).collect();
        debug!(query = %query, page = page.len(), offset, limit, "Resolved card page");

        self.records(&page).await
    }

    /// Cards matching an Anki search, optionally within one deck.
    ///
    /// With a deck the query becomes `deck:"<deck>" (<query>)`; without one
    /// the query is sent as-is.
    pub async fn search(&self, query: &str, deck: Option<&str>) -> Result<Vec<CardRecord>> {
        let query = match non_empty(deck) {
            Some(deck) => Query::new().deck(deck).group(query).build(),
            None => query.to_string(),
        };

        let ids = self.client.cards().find(&query).await?;
        debug!(query = %query, count = ids.len(), "Search matched cards");

        self.records(&ids).await
    }

    /// Create one card.
    ///
    /// Media is uploaded best-effort: files that cannot be read or stored are
    /// skipped, and their placeholders stay as written.
    pub async fn add(&self, deck: &str, card: &CardRequest) -> Result<AddedCard> {
        let stored_media = BestEffort.resolve(self.client, &card.media).await?;

        let note = build_note(deck, card.card_type, card, &stored_media, None);
        let note_id = self.client.notes().add(&note).await?;

        info!(note_id, deck = %deck, model = %note.model_name, "Card created");
        Ok(AddedCard {
            note_id,
            deck_name: deck.to_string(),
            stored_media,
        })
    }

    /// Create many cards in one deck.
    ///
    /// Every media path is checked before anything is uploaded; a missing
    /// file fails the request with [`Error::MissingMedia`] and nothing is
    /// created. After the media is stored, cards are created in order and
    /// each card's failure is recorded without stopping the rest.
    ///
    /// Every card uses the `Basic` note type regardless of its `card_type`.
    pub async fn add_bulk(&self, request: &BulkRequest) -> Result<BulkResult> {
        let stored_media = ValidateThenCommit
            .resolve(self.client, &request.media)
            .await?;
        debug!(
            cards = request.cards.len(),
            media = stored_media.len(),
            "Media stored, creating cards"
        );

        let mut outcomes = Vec::with_capacity(request.cards.len());
        for (card_index, card) in request.cards.iter().enumerate() {
            if card.card_type != CardType::Basic {
                debug!(card_index, card_type = ?card.card_type, "Bulk creation uses Basic");
            }

            let note = build_note(
                &request.deck_name,
                CardType::Basic,
                card,
                &stored_media,
                request.options.allow_duplicates,
            );

            let outcome = match self.client.notes().add(&note).await {
                Ok(note_id) => CardOutcome {
                    card_index,
                    success: true,
                    note_id: Some(note_id),
                    error: None,
                },
                Err(e) => {
                    warn!(card_index, error = %e, "Card creation failed");
                    CardOutcome {
                        card_index,
                        success: false,
                        note_id: None,
                        error: Some(e.to_string()),
                    }
                }
            };
            outcomes.push(outcome);
        }

        let result = BulkResult::from_outcomes(outcomes, stored_media);
        info!(
            deck = %request.deck_name,
            total = result.summary.total,
            successful = result.summary.successful,
            failed = result.summary.failed,
            "Bulk creation completed"
        );
        Ok(result)
    }

    async fn records(&self, ids: &[i64]) -> Result<Vec<CardRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let infos = self.client.cards().info(ids).await?;
        let returned = infos.len();
        let records: Vec<CardRecord> = infos
            .into_iter()
            .filter(CardInfo::exists)
            .map(CardRecord::from)
            .collect();

        if records.len() < returned {
            debug!(
                skipped = returned - records.len(),
                "Skipped cards deleted since the search"
            );
        }
        Ok(records)
    }
}

fn non_empty(deck: Option<&str>) -> Option<&str> {
    deck.filter(|d| !d.trim().is_empty())
}

fn build_note(
    deck: &str,
    card_type: CardType,
    card: &CardRequest,
    stored_media: &[String],
    allow_duplicates: Option<bool>,
) -> Note {
    let (front_field, back_field) = card_type.field_names();

    let mut builder = NoteBuilder::new(deck, card_type.model_name())
        .field(front_field, substitute_placeholders(&card.front, stored_media))
        .field(back_field, substitute_placeholders(&card.back, stored_media))
        .tags(card.tags.iter().cloned());

    if let Some(note) = &card.note {
        builder = builder.field(NOTE_FIELD, note.as_str());
    }
    if let Some(allow) = allow_duplicates {
        builder = builder.allow_duplicate(allow);
    }

    builder.build()
}
