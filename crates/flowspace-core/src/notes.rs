//! Notes scratchpad store.
//!
//! Notes are created and removed, never edited. Removal goes through a
//! confirmation gate; a declined confirmation leaves the list untouched.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::events::Event;
use crate::ids::next_id;
use crate::storage::{keys, LocalStore};

pub const DELETE_PROMPT: &str = "Delete this note?";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: i64,
    pub text: String,
}

/// Asks the user before a destructive action.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysConfirm;

impl Confirm for AlwaysConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NeverConfirm;

impl Confirm for NeverConfirm {
    fn confirm(&mut self, _prompt: &str) -> bool {
        false
    }
}

pub struct NotesStore {
    store: LocalStore,
    notes: Vec<Note>,
}

impl NotesStore {
    pub fn load(store: LocalStore) -> Self {
        let notes = store.load(keys::NOTES, Vec::new());
        Self { store, notes }
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// Append a note as written. Blank text is ignored.
    pub fn add(&mut self, text: &str) -> Option<Event> {
        if text.trim().is_empty() {
            return None;
        }
        let id = next_id(self.notes.iter().map(|n| n.id));
        self.notes.push(Note {
            id,
            text: text.to_string(),
        });
        self.persist();
        Some(Event::NoteAdded { id, at: Utc::now() })
    }

    /// Remove a note once `gate` approves. Unknown ids are not prompted for.
    pub fn remove(&mut self, id: i64, gate: &mut dyn Confirm) -> Option<Event> {
        let index = self.notes.iter().position(|n| n.id == id)?;
        if !gate.confirm(DELETE_PROMPT) {
            tracing::debug!(id, "note removal declined");
            return None;
        }
        self.notes.remove(index);
        self.persist();
        Some(Event::NoteRemoved { id, at: Utc::now() })
    }

    fn persist(&self) {
        self.store.save(keys::NOTES, &self.notes);
    }
}
