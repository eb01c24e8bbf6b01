use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// Note as stored in the notes table
#[derive(Serialize, Deserialize, FromRow, Debug, Clone, PartialEq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

// Form body for both create and edit submissions.
// Missing fields decode as empty strings so they fail validation with a 400.
#[derive(Deserialize, Debug, Default)]
pub struct NoteForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl NoteForm {
    /// Both fields must be non-empty.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.is_empty() || self.content.is_empty() {
            return Err(EMPTY_NOTE_MESSAGE);
        }
        Ok(())
    }
}

pub const EMPTY_NOTE_MESSAGE: &str = "Note title and content cannot be empty";

// What the templates see for a single note
#[derive(Serialize, Debug)]
pub struct NoteView {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: String, // RFC 3339, for <time datetime>
    pub created: String,    // human readable
}

impl From<&Note> for NoteView {
    fn from(note: &Note) -> Self {
        NoteView {
            id: note.id,
            title: note.title.clone(),
            content: note.content.clone(),
            created_at: note.created_at.to_rfc3339(),
            created: note.created_at.format("%Y-%m-%d %H:%M").to_string(),
        }
    }
}
