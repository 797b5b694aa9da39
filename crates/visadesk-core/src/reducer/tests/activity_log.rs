use super::*;
use pretty_assertions::assert_eq;

use crate::state::LogEntry;
use crate::state::ACTIVITY_LOG_CAP;

#[test]
fn stale_completions_are_logged_at_debug() {
    let mut state = state();
    user(&mut state, UserAction::GenerateStrategy);
    user(&mut state, UserAction::GenerateStrategy);
    runtime(
        &mut state,
        RuntimeAction::StrategyResolved {
            run_id: 1,
            result: StrategyResult::narrative_only("late"),
        },
    );
    let last = state.activity.last().expect("log entry");
    assert_eq!(last.level, LogLevel::Debug);
    assert!(last.message.contains("stale strategy #1"));
}

#[test]
fn activity_log_is_bounded() {
    let mut state = state();
    for i in 0..(ACTIVITY_LOG_CAP + 10) {
        runtime(
            &mut state,
            RuntimeAction::AppendLog(LogEntry::new(LogLevel::Info, format!("entry {i}"))),
        );
    }
    assert_eq!(state.activity.len(), ACTIVITY_LOG_CAP);

    runtime(&mut state, RuntimeAction::ClearLogs);
    assert!(state.activity.is_empty());
}
