use clap::Subcommand;

use super::{open_workspace, print_json, CmdResult};

#[derive(Subcommand)]
pub enum ThemeAction {
    /// Print the current theme
    Show,
    /// Switch between light and dark
    Toggle,
}

pub fn run(action: ThemeAction) -> CmdResult {
    let mut ws = open_workspace()?;

    match action {
        ThemeAction::Show => print_json(&ws.ctx.theme()),
        ThemeAction::Toggle => print_json(&ws.ctx.toggle_theme()),
    }
}
