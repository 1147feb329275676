//! Note-related types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A new note to be added to Anki.
///
/// Use [`NoteBuilder`] for a more ergonomic way to construct notes.
/// Field names are case-sensitive and must match the model's field names exactly.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    /// The deck to add the note to.
    pub deck_name: String,
    /// The note type (model) name.
    pub model_name: String,
    /// Field values, keyed by field name.
    pub fields: HashMap<String, String>,
    /// Tags for the note.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Options for duplicate handling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<NoteOptions>,
}

/// Options for adding notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NoteOptions {
    /// Allow duplicate notes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allow_duplicate: Option<bool>,
    /// Scope for duplicate checking.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_scope: Option<DuplicateScope>,
}

/// Scope for duplicate note checking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum DuplicateScope {
    /// Check only within the target deck.
    Deck,
    /// Check across the whole collection.
    Collection,
}

/// Builder for [`NewNote`].
///
/// # Example
///
/// ```
/// use ankibridge::NoteBuilder;
///
/// let note = NoteBuilder::new("Japanese", "Basic")
///     .field("Front", "食べる")
///     .field("Back", "to eat")
///     .tag("verb")
///     .build();
/// assert_eq!(note.fields.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct NoteBuilder {
    note: NewNote,
}

impl NoteBuilder {
    /// Start a note for the given deck and model.
    pub fn new(deck: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            note: NewNote {
                deck_name: deck.into(),
                model_name: model.into(),
                fields: HashMap::new(),
                tags: Vec::new(),
                options: None,
            },
        }
    }

    /// Set a field value.
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.note.fields.insert(name.into(), value.into());
        self
    }

    /// Set all field values at once, replacing any set so far.
    pub fn fields(mut self, fields: HashMap<String, String>) -> Self {
        self.note.fields = fields;
        self
    }

    /// Add a single tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.note.tags.push(tag.into());
        self
    }

    /// Add several tags.
    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.note.tags.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Set duplicate-handling options.
    pub fn options(mut self, options: NoteOptions) -> Self {
        self.note.options = Some(options);
        self
    }

    /// Finish building the note.
    pub fn build(self) -> NewNote {
        self.note
    }
}
