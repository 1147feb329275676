//! Types returned by or sent to AnkiConnect.

mod card;
mod note;
mod review;

pub use card::CardInfo;
pub use note::{DuplicateScope, NewNote, NoteBuilder, NoteOptions};
pub use review::ReviewEntry;
