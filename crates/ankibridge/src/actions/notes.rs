//! Note-related AnkiConnect actions.

use std::collections::HashMap;

use serde::Serialize;

use crate::client::AnkiClient;
use crate::error::Result;
use crate::types::NewNote;

/// Provides access to note-related AnkiConnect operations.
///
/// Obtained via [`AnkiClient::notes()`].
#[derive(Debug)]
pub struct NoteActions<'a> {
    pub(crate) client: &'a AnkiClient,
}

#[derive(Serialize)]
struct AddNoteParams<'a> {
    note: &'a NewNote,
}

#[derive(Serialize)]
struct UpdateFieldsParams<'a> {
    note: NoteFieldsUpdate<'a>,
}

#[derive(Serialize)]
struct NoteFieldsUpdate<'a> {
    id: i64,
    fields: &'a HashMap<String, String>,
}

impl<'a> NoteActions<'a> {
    /// Add a note, returning its new ID.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use ankibridge::{AnkiClient, NoteBuilder};
    /// # async fn example() -> ankibridge::Result<()> {
    /// let client = AnkiClient::new();
    /// let note = NoteBuilder::new("Default", "Basic")
    ///     .field("Front", "Hello")
    ///     .field("Back", "World")
    ///     .build();
    /// let id = client.notes().add(&note).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add(&self, note: &NewNote) -> Result<i64> {
        self.client.call("addNote", AddNoteParams { note }).await
    }

    /// Replace the given fields of an existing note.
    ///
    /// Fields not present in `fields` are left untouched.
    pub async fn update_fields(&self, note_id: i64, fields: &HashMap<String, String>) -> Result<()> {
        self.client
            .call_void(
                "updateNoteFields",
                UpdateFieldsParams {
                    note: NoteFieldsUpdate {
                        id: note_id,
                        fields,
                    },
                },
            )
            .await
    }
}
