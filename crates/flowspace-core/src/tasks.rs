//! Task list store.
//!
//! Ordered collection of tasks persisted under `todos`. Insertion order is
//! display order.

use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::events::Event;
use crate::ids::next_id;
use crate::storage::{keys, LocalStore};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        })
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(ValidationError::InvalidValue {
                field: "priority".into(),
                message: format!("'{other}' is not one of low, medium, high"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
}

pub struct TaskList {
    store: LocalStore,
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn load(store: LocalStore) -> Self {
        let tasks = store.load(keys::TASKS, Vec::new());
        Self { store, tasks }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: i64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }

    /// Append a task. Blank text is ignored.
    pub fn add(&mut self, text: &str, priority: Priority) -> Option<Event> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = next_id(self.tasks.iter().map(|t| t.id));
        self.tasks.push(Task {
            id,
            text: text.to_string(),
            completed: false,
            priority,
        });
        self.persist();
        Some(Event::TaskAdded {
            id,
            priority,
            at: Utc::now(),
        })
    }

    /// Flip a task's completed flag. Unknown ids are ignored.
    pub fn toggle(&mut self, id: i64) -> Option<Event> {
        let task = self.tasks.iter_mut().find(|t| t.id == id)?;
        task.completed = !task.completed;
        let completed = task.completed;
        self.persist();
        Some(Event::TaskToggled {
            id,
            completed,
            at: Utc::now(),
        })
    }

    pub fn remove(&mut self, id: i64) -> Option<Event> {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        if self.tasks.len() == before {
            return None;
        }
        self.persist();
        Some(Event::TaskRemoved { id, at: Utc::now() })
    }

    fn persist(&self) {
        self.store.save(keys::TASKS, &self.tasks);
    }
}
