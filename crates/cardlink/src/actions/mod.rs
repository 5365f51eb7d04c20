//! Action modules for AnkiConnect operations.
//!
//! Each module groups the calls for one kind of collection object.

mod cards;
mod decks;
mod media;
mod notes;

pub use cards::CardActions;
pub use decks::DeckActions;
pub use media::MediaActions;
pub use notes::NoteActions;
