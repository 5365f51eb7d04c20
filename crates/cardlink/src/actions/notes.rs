//! Note-related AnkiConnect actions.

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::Note;

/// Provides access to note-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::notes()`].
#[derive(Debug)]
pub struct NoteActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct AddNoteParams<'a> {
    note: &'a Note,
}

impl<'a> NoteActions<'a> {
    /// Add a new note.
    ///
    /// Returns the ID of the created note. Anki rejects duplicates of the
    /// first field unless the note allows them.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use cardlink::{AnkiClient, NoteBuilder};
    /// # async fn example() -> cardlink::Result<()> {
    /// let client = AnkiClient::new();
    /// let note = NoteBuilder::new("Default", "Basic")
    ///     .field("Front", "Hello")
    ///     .field("Back", "World")
    ///     .build();
    /// let note_id = client.notes().add(&note).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add(&self, note: &Note) -> Result<i64> {
        self.client.invoke("addNote", AddNoteParams { note }).await
    }
}
