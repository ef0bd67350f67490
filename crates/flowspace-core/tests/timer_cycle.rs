//! Focus/break cycle tests driven through the public timer API.
//!
//! Covers the full focus → break → focus round trip and checks, over random
//! command sequences, that the countdown never leaves its bounds and the
//! focus counters never shrink.

use flowspace_core::timer::{TimerEngine, TimerMode, TimerSettings};
use flowspace_core::{Event, FocusCounters};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn run_to_completion(engine: &mut TimerEngine, counters: &mut FocusCounters) -> Event {
    if !engine.is_running() {
        engine.start_pause();
    }
    let budget = engine.time_left() + 1;
    for _ in 0..budget {
        if let Some(done) = engine.tick(counters) {
            return done;
        }
    }
    panic!("session did not complete within {budget} ticks");
}

// ============================================================================
// Full Cycle
// ============================================================================

#[test]
fn focus_break_focus_round_trip() {
    let mut engine = TimerEngine::new(TimerSettings::default());
    let mut counters = FocusCounters::default();

    let done = run_to_completion(&mut engine, &mut counters);
    assert!(matches!(
        done,
        Event::TimerCompleted {
            mode: TimerMode::Focus,
            credited_minutes: Some(25),
            sessions_completed: 1,
            total_focus_minutes: 25,
            ..
        }
    ));
    assert!(!engine.is_running());
    assert_eq!(engine.time_left(), 0);

    let switched = engine.apply_pending_flip().expect("flip pending");
    assert!(matches!(
        switched,
        Event::ModeSwitched {
            from: TimerMode::Focus,
            to: TimerMode::Break,
            session_minutes: 5,
            time_left_secs: 300,
            ..
        }
    ));

    let done = run_to_completion(&mut engine, &mut counters);
    assert!(matches!(
        done,
        Event::TimerCompleted {
            mode: TimerMode::Break,
            credited_minutes: None,
            ..
        }
    ));
    assert_eq!(counters.sessions_completed, 1);

    engine.apply_pending_flip();
    assert_eq!(engine.mode(), TimerMode::Focus);
    assert_eq!(engine.session_minutes(), 25);
    assert_eq!(engine.time_left(), 1500);
}

#[test]
fn custom_focus_length_is_credited_then_forgotten() {
    let mut engine = TimerEngine::new(TimerSettings::default());
    let mut counters = FocusCounters::default();

    engine.quick_set(50).unwrap();
    run_to_completion(&mut engine, &mut counters);
    assert_eq!(counters.total_focus_minutes, 50);

    engine.apply_pending_flip();
    run_to_completion(&mut engine, &mut counters);
    engine.apply_pending_flip();

    // Back to focus at the default length, not the last custom one.
    assert_eq!(engine.session_minutes(), 25);
}

#[test]
fn starting_during_completion_delay_runs_next_mode() {
    let mut engine = TimerEngine::new(TimerSettings::default());
    let mut counters = FocusCounters::default();
    engine.quick_set(1).unwrap();
    run_to_completion(&mut engine, &mut counters);

    let started = engine.start_pause();
    assert!(matches!(
        started,
        Event::TimerStarted {
            mode: TimerMode::Break,
            time_left_secs: 300,
            ..
        }
    ));
    assert_eq!(engine.pending_flip(), None);
}

#[test]
fn quick_set_during_completion_delay_cancels_flip() {
    let mut engine = TimerEngine::new(TimerSettings::default());
    let mut counters = FocusCounters::default();
    engine.quick_set(1).unwrap();
    run_to_completion(&mut engine, &mut counters);

    engine.quick_set(15).unwrap();
    assert_eq!(engine.apply_pending_flip(), None);
    assert_eq!(engine.mode(), TimerMode::Focus);
    assert_eq!(engine.time_left(), 900);
}

#[test]
fn zero_crossing_credits_once() {
    let mut engine = TimerEngine::new(TimerSettings::default());
    let mut counters = FocusCounters::default();
    engine.quick_set(1).unwrap();
    run_to_completion(&mut engine, &mut counters);

    for _ in 0..10 {
        assert!(engine.tick(&mut counters).is_none());
        assert!(engine.complete(&mut counters).is_none());
    }
    assert_eq!(counters.sessions_completed, 1);
}

#[test]
fn display_formats_minutes_and_seconds() {
    let mut engine = TimerEngine::new(TimerSettings::default());
    assert_eq!(engine.display(), "25:00");
    engine.quick_set(120).unwrap();
    assert_eq!(engine.display(), "120:00");
    engine.quick_set(1).unwrap();
    engine.start_pause();
    let mut counters = FocusCounters::default();
    for _ in 0..51 {
        engine.tick(&mut counters);
    }
    assert_eq!(engine.display(), "00:09");
}

// ============================================================================
// Property Tests
// ============================================================================

#[derive(Debug, Clone)]
enum Command {
    StartPause,
    Reset,
    QuickSet(u32),
    SetMinutes(u32),
    Tick(u16),
    Complete,
    Flip,
}

fn command() -> impl Strategy<Value = Command> {
    prop_oneof![
        3 => Just(Command::StartPause),
        1 => Just(Command::Reset),
        1 => (0u32..90).prop_map(Command::QuickSet),
        1 => (0u32..90).prop_map(Command::SetMinutes),
        4 => (1u16..400).prop_map(Command::Tick),
        1 => Just(Command::Complete),
        1 => Just(Command::Flip),
    ]
}

proptest! {
    #[test]
    fn countdown_stays_in_bounds(commands in prop::collection::vec(command(), 1..60)) {
        let mut engine = TimerEngine::new(TimerSettings::default());
        let mut counters = FocusCounters::default();

        for cmd in commands {
            let before = counters;
            match cmd {
                Command::StartPause => { engine.start_pause(); }
                Command::Reset => { engine.reset(); }
                Command::QuickSet(m) => {
                    let snapshot = engine.state();
                    if engine.quick_set(m).is_err() {
                        prop_assert_eq!(m, 0);
                        prop_assert_eq!(engine.state(), snapshot);
                    }
                }
                Command::SetMinutes(m) => {
                    let snapshot = engine.state();
                    if engine.set_session_minutes(m).is_err() {
                        prop_assert_eq!(m, 0);
                        prop_assert_eq!(engine.state(), snapshot);
                    }
                }
                Command::Tick(n) => {
                    for _ in 0..n {
                        engine.tick(&mut counters);
                    }
                }
                Command::Complete => { engine.complete(&mut counters); }
                Command::Flip => { engine.apply_pending_flip(); }
            }

            let state = engine.state();
            prop_assert!(state.session_minutes > 0);
            prop_assert!(state.time_left <= state.full_secs());
            prop_assert!(counters.sessions_completed >= before.sessions_completed);
            prop_assert!(counters.total_focus_minutes >= before.total_focus_minutes);
            if engine.pending_flip().is_some() {
                prop_assert!(!state.is_running);
            }
        }
    }

    #[test]
    fn each_focus_completion_credits_its_length(minutes in 1u32..30, rounds in 1usize..4) {
        let mut engine = TimerEngine::new(TimerSettings::default());
        let mut counters = FocusCounters::default();

        for _ in 0..rounds {
            engine.quick_set(minutes).unwrap();
            run_to_completion(&mut engine, &mut counters);
        }
        prop_assert_eq!(counters.sessions_completed, rounds as u64);
        prop_assert_eq!(counters.total_focus_minutes, u64::from(minutes) * rounds as u64);
    }
}
