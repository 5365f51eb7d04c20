//! Card-related types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Information about a card, as returned by `cardsInfo`.
///
/// AnkiConnect answers `{}` for an ID whose card no longer exists and omits
/// keys for some others, so every field falls back to a default. Such a
/// card has a `card_id` of 0; see [`CardInfo::exists`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardInfo {
    /// The card ID.
    #[serde(default)]
    pub card_id: i64,
    /// The note ID this card was generated from.
    #[serde(default, alias = "note", alias = "nid")]
    pub note_id: i64,
    /// The deck this card belongs to.
    #[serde(default)]
    pub deck_name: String,
    /// The note type (model) name.
    #[serde(default)]
    pub model_name: String,
    /// The rendered question side (HTML).
    #[serde(default)]
    pub question: String,
    /// The rendered answer side (HTML).
    #[serde(default)]
    pub answer: String,
    /// Field values from the note.
    #[serde(default)]
    pub fields: HashMap<String, CardField>,
    /// The queue the card is in (-1 = suspended, -2 = sibling buried, -3 = manually buried,
    /// 0 = new, 1 = learning, 2 = review, 3 = day learn, 4 = preview).
    /// `None` when AnkiConnect did not report it.
    #[serde(default)]
    pub queue: Option<i32>,
}

impl CardInfo {
    /// False for the empty record AnkiConnect returns for a deleted card.
    pub fn exists(&self) -> bool {
        self.card_id != 0
    }

    /// The value of a note field, if the note has it.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|f| f.value.as_str())
    }
}

/// A field value with its position in the note type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CardField {
    /// The field value (HTML).
    pub value: String,
    /// The field's position in the note type.
    #[serde(default)]
    pub order: i32,
}
