use std::io::{BufRead, Write};

use clap::Subcommand;
use flowspace_core::notes::{AlwaysConfirm, Confirm};
use flowspace_core::NotesStore;

use super::{open_workspace, print_json, CmdResult};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Add a note
    Add {
        /// Note text, kept as written
        text: String,
    },
    /// List notes in insertion order
    List,
    /// Delete a note after confirmation
    Remove {
        /// Note ID
        id: i64,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

/// Asks on stderr and reads the answer from stdin. Anything but y/yes
/// declines.
struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        let mut stderr = std::io::stderr();
        if write!(stderr, "{prompt} [y/N] ").and_then(|_| stderr.flush()).is_err() {
            return false;
        }
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
    }
}

pub fn run(action: NoteAction) -> CmdResult {
    let ws = open_workspace()?;
    let mut notes = NotesStore::load(ws.ctx.store().clone());

    match action {
        NoteAction::Add { text } => {
            let event = notes.add(&text).ok_or("note text is empty")?;
            print_json(&event)?;
        }
        NoteAction::List => print_json(notes.notes())?,
        NoteAction::Remove { id, yes } => {
            if !notes.notes().iter().any(|n| n.id == id) {
                return Err(format!("note not found: {id}").into());
            }
            let (mut always, mut ask) = (AlwaysConfirm, StdinConfirm);
            let gate: &mut dyn Confirm = if yes { &mut always } else { &mut ask };
            match notes.remove(id, gate) {
                Some(event) => print_json(&event)?,
                None => eprintln!("kept note {id}"),
            }
        }
    }
    Ok(())
}
