use flowspace_core::{NotesStore, StatsSnapshot, TaskList};

use super::{open_workspace, print_json, CmdResult};

pub fn run() -> CmdResult {
    let ws = open_workspace()?;
    let tasks = TaskList::load(ws.ctx.store().clone());
    let notes = NotesStore::load(ws.ctx.store().clone());

    let stats = StatsSnapshot::from_parts(tasks.tasks(), ws.ctx.counters(), notes.len());
    print_json(&stats)
}
