//! Debug domain: tests for hotkey mapping and status messages.

use std::collections::HashSet;

use super::{DebugAction, DebugState};

#[test]
fn test_hotkeys_are_unique() {
    let keys: HashSet<_> = DebugAction::ALL.iter().map(|a| a.key()).collect();
    assert_eq!(keys.len(), DebugAction::ALL.len());
}

#[test]
fn test_status_message_expires() {
    let mut state = DebugState::default();
    assert!(!state.tick_message(1.0));

    state.set_message("hello", 1.0);
    assert!(!state.tick_message(0.5));
    assert!(state.status_message.is_some());
    assert!(state.tick_message(0.6));
    assert!(state.status_message.is_none());
}
