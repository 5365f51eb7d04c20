//! Domain types for AnkiConnect.

mod card;
mod media;
mod note;

pub use card::{CardField, CardInfo};
pub use media::StoreMediaParams;
pub use note::{Note, NoteBuilder, NoteOptions};
