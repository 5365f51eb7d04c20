//! Note-related types.

use std::collections::HashMap;

use serde::Serialize;

/// A new note to be added to Anki.
///
/// Use [`NoteBuilder`] to construct one.
///
/// Field values are HTML. Field names are case-sensitive and must match the
/// note type's field names exactly.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    /// The deck to add the note to.
    pub deck_name: String,
    /// The note type (model) name.
    pub model_name: String,
    /// Field values, keyed by field name.
    pub fields: HashMap<String, String>,
    /// Tags for the note.
    pub tags: Vec<String>,
    /// Options for duplicate handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<NoteOptions>,
}

/// Options for adding notes.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    /// Allow a note whose first field duplicates an existing one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub allow_duplicate: Option<bool>,
}

/// Builder for creating notes with a fluent API.
///
/// # Example
///
/// ```
/// use cardlink::NoteBuilder;
///
/// let note = NoteBuilder::new("My Deck", "Basic")
///     .field("Front", "What is the capital of France?")
///     .field("Back", "Paris")
///     .tag("geography")
///     .build();
///
/// assert_eq!(note.fields["Back"], "Paris");
/// ```
#[derive(Debug, Clone, Default)]
pub struct NoteBuilder {
    deck_name: String,
    model_name: String,
    fields: HashMap<String, String>,
    tags: Vec<String>,
    options: Option<NoteOptions>,
}

impl NoteBuilder {
    /// Create a new note builder for `deck` using note type `model`.
    pub fn new(deck: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            deck_name: deck.into(),
            model_name: model.into(),
            ..Default::default()
        }
    }

    /// Set a field value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Add a tag to the note.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add multiple tags to the note.
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Allow duplicate notes.
    pub fn allow_duplicate(mut self, allow: bool) -> Self {
        self.options
            .get_or_insert_with(NoteOptions::default)
            .allow_duplicate = Some(allow);
        self
    }

    /// Build the note.
    pub fn build(self) -> Note {
        Note {
            deck_name: self.deck_name,
            model_name: self.model_name,
            fields: self.fields,
            tags: self.tags,
            options: self.options,
        }
    }
}
