//! Tool parameter types.
//!
//! Field names are camelCase on the wire; the doc comments become the
//! parameter descriptions clients see in the tool schema.

use cardlink_engine::{BulkOptions, BulkRequest, CardRequest, CardType};
use rmcp::schemars;

fn default_limit() -> usize {
    10
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GetCardsInDeckParams {
    /// Name of the deck to read cards from. Use list_anki_decks to see available deck names.
    #[serde(default)]
    pub deck_name: Option<String>,
    /// Maximum number of cards to return (default: 10)
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Number of cards to skip for pagination (default: 0)
    #[serde(default)]
    pub offset: usize,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchCardsParams {
    /// Anki search query, e.g. "hola" or "front:hola*"
    pub query: String,
    /// Optional deck to limit the search to. Searches all decks when omitted.
    #[serde(default)]
    pub deck_name: Option<String>,
}

/// Card template to use.
#[derive(Debug, Clone, Copy, Default, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum CardTypeParam {
    /// Front to back
    #[default]
    Basic,
    /// Fill-in-the-blank
    Cloze,
    /// Front to back and back to front
    Reverse,
}

impl From<CardTypeParam> for CardType {
    fn from(param: CardTypeParam) -> Self {
        match param {
            CardTypeParam::Basic => CardType::Basic,
            CardTypeParam::Cloze => CardType::Cloze,
            CardTypeParam::Reverse => CardType::Reverse,
        }
    }
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCardParams {
    /// Front side content. Can include HTML and media references like {audio.mp3} or {image.jpg}
    pub front: String,
    /// Back side content. Can include HTML and media references like {audio.mp3} or {image.jpg}
    pub back: String,
    /// Name of an existing deck to add the card to
    pub deck_name: String,
    /// Local file paths to store in Anki's media collection. Reference them in front/back as {filename}
    #[serde(default)]
    pub media: Vec<String>,
    /// Tags to attach to the card
    #[serde(default)]
    pub tags: Vec<String>,
    /// Additional notes or context stored in a separate "Note" field
    #[serde(default)]
    pub note: Option<String>,
    /// Card template: "basic", "cloze" or "reverse" (default: "basic")
    #[serde(default)]
    pub card_type: CardTypeParam,
}

impl AddCardParams {
    pub fn to_request(&self) -> CardRequest {
        CardRequest {
            front: self.front.clone(),
            back: self.back.clone(),
            tags: self.tags.clone(),
            note: self.note.clone(),
            card_type: self.card_type.into(),
            media: self.media.clone(),
        }
    }
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkCardParams {
    /// Front side content. Can include media references like {audio.mp3}
    pub front: String,
    /// Back side content. Can include media references like {image.jpg}
    pub back: String,
    /// Tags to attach to this card
    #[serde(default)]
    pub tags: Vec<String>,
    /// Additional notes or context stored in a separate "Note" field
    #[serde(default)]
    pub note: Option<String>,
    /// Accepted for compatibility and ignored: bulk cards always use the Basic note type
    #[serde(default)]
    pub card_type: CardTypeParam,
}

#[derive(Debug, Default, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkOptionsParams {
    /// Whether to allow cards that duplicate an existing card's front
    #[serde(default)]
    pub allow_duplicates: Option<bool>,
}

#[derive(Debug, serde::Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddBulkCardsParams {
    /// Cards to create, in order
    pub cards: Vec<BulkCardParams>,
    /// Name of an existing deck to add every card to
    pub deck_name: String,
    /// Local file paths shared by all cards. All must exist or nothing is created
    #[serde(default)]
    pub media: Vec<String>,
    /// Additional options for bulk creation
    #[serde(default)]
    pub options: Option<BulkOptionsParams>,
}

impl AddBulkCardsParams {
    pub fn to_request(&self) -> BulkRequest {
        let cards = self
            .cards
            .iter()
            .map(|c| CardRequest {
                front: c.front.clone(),
                back: c.back.clone(),
                tags: c.tags.clone(),
                note: c.note.clone(),
                card_type: c.card_type.into(),
                media: Vec::new(),
            })
            .collect();

        BulkRequest {
            deck_name: self.deck_name.clone(),
            cards,
            media: self.media.clone(),
            options: BulkOptions {
                allow_duplicates: self.options.as_ref().and_then(|o| o.allow_duplicates),
            },
        }
    }
}
