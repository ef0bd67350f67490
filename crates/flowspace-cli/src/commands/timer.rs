use clap::Subcommand;
use flowspace_core::timer::{FeedbackPrefs, FocusTimer, TerminalBell};
use flowspace_core::Event;

use super::{open_workspace, print_json, print_json_line, CmdResult, Workspace};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Print current timer state as JSON
    Status,
    /// Start if paused, pause if running
    Toggle,
    /// Pause and refill the current session
    Reset,
    /// Switch to a paused focus session of the given length
    Set {
        /// Session length in minutes
        minutes: u32,
    },
    /// Change the current session length without switching mode
    Length {
        /// Session length in minutes
        minutes: u32,
    },
    /// List the configured quick-set lengths
    Presets,
    /// Count down in the foreground until the session completes
    Run {
        /// Only print transitions, not the per-second state
        #[arg(long)]
        quiet: bool,
    },
}

fn load_timer(ws: &Workspace) -> FocusTimer {
    FocusTimer::load(&ws.ctx, ws.config.timer_settings(), Box::new(TerminalBell))
        .with_feedback(FeedbackPrefs::from(&ws.config.notifications))
}

pub async fn run(action: TimerAction) -> CmdResult {
    let mut ws = open_workspace()?;
    let mut timer = load_timer(&ws);

    match action {
        TimerAction::Status => print_json(&timer.snapshot())?,
        TimerAction::Toggle => print_json(&timer.start_pause(&ws.ctx))?,
        TimerAction::Reset => print_json(&timer.reset(&ws.ctx))?,
        TimerAction::Set { minutes } => print_json(&timer.quick_set(&ws.ctx, minutes)?)?,
        TimerAction::Length { minutes } => {
            print_json(&timer.set_session_minutes(&ws.ctx, minutes)?)?
        }
        TimerAction::Presets => print_json(&ws.config.timer.presets)?,
        TimerAction::Run { quiet } => run_foreground(&mut ws, &mut timer, quiet).await,
    }
    Ok(())
}

/// Drive the timer until it completes or Ctrl-C arrives. An interrupted
/// session is left paused, with any pending mode switch already applied, so
/// the next invocation never sees a half-finished completion.
async fn run_foreground(ws: &mut Workspace, timer: &mut FocusTimer, quiet: bool) {
    if !timer.state().is_running {
        print_json_line(&timer.start_pause(&ws.ctx));
    }

    let print = |event: &Event| {
        if !quiet || !matches!(event, Event::StateSnapshot { .. }) {
            print_json_line(event);
        }
    };

    let interrupted = tokio::select! {
        _ = timer.run_session(&mut ws.ctx, print) => false,
        _ = tokio::signal::ctrl_c() => true,
    };

    if interrupted {
        tracing::info!("interrupted, pausing timer");
        if let Some(switched) = timer.apply_pending_flip(&ws.ctx) {
            print_json_line(&switched);
        } else if timer.state().is_running {
            print_json_line(&timer.start_pause(&ws.ctx));
        }
    }
}
