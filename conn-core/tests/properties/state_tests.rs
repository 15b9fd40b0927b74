//! Property-based tests for session state transitions

use conn_core::SessionState;
use proptest::prelude::*;

const ALL: [SessionState; 9] = [
    SessionState::Idle,
    SessionState::Resolved,
    SessionState::Authenticated,
    SessionState::ChannelOpen,
    SessionState::RawMode,
    SessionState::PtyRequested,
    SessionState::ShellRunning,
    SessionState::Closed,
    SessionState::Failed,
];

fn arb_state() -> impl Strategy<Value = SessionState> {
    prop::sample::select(ALL.to_vec())
}

proptest! {
    /// No transition leaves a terminal state
    #[test]
    fn terminal_states_are_final(from in arb_state(), to in arb_state()) {
        if from.is_terminal() {
            prop_assert!(!from.can_advance_to(to));
        }
    }

    /// Every state has at most one forward successor besides `Failed`
    #[test]
    fn forward_successor_is_unique(from in arb_state()) {
        let successors = ALL
            .iter()
            .filter(|to| **to != SessionState::Failed && from.can_advance_to(**to))
            .count();
        prop_assert!(successors <= 1);
    }

    /// `Closed` is only reachable from a running shell
    #[test]
    fn closed_requires_running_shell(from in arb_state()) {
        prop_assert_eq!(
            from.can_advance_to(SessionState::Closed),
            from == SessionState::ShellRunning
        );
    }
}
