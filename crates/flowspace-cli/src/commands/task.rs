//! Task management commands for CLI.

use clap::Subcommand;
use flowspace_core::{Priority, TaskList};

use super::{open_workspace, print_json, CmdResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task text
        text: String,
        /// low, medium or high
        #[arg(long, short, default_value_t = Priority::Medium)]
        priority: Priority,
    },
    /// List tasks in insertion order
    List,
    /// Flip a task between open and completed
    Toggle {
        /// Task ID
        id: i64,
    },
    /// Delete a task
    Remove {
        /// Task ID
        id: i64,
    },
}

pub fn run(action: TaskAction) -> CmdResult {
    let ws = open_workspace()?;
    let mut tasks = TaskList::load(ws.ctx.store().clone());

    match action {
        TaskAction::Add { text, priority } => {
            let event = tasks.add(&text, priority).ok_or("task text is empty")?;
            print_json(&event)?;
        }
        TaskAction::List => print_json(tasks.tasks())?,
        TaskAction::Toggle { id } => {
            let event = tasks
                .toggle(id)
                .ok_or_else(|| format!("task not found: {id}"))?;
            print_json(&event)?;
        }
        TaskAction::Remove { id } => {
            let event = tasks
                .remove(id)
                .ok_or_else(|| format!("task not found: {id}"))?;
            print_json(&event)?;
        }
    }
    Ok(())
}
