//! Combo window state machine
//!
//! Two states: idle (`combo == 0`, no timer) and active (`combo > 0`, timer
//! holds the last action's timestamp). Every action moves to active and
//! restamps the timer; expiry only ever measures from the latest stamp, so a
//! decay fire scheduled for an older action cannot clobber a refreshed
//! window.

use super::state::GameState;
use crate::consts::{COMBO_BASE_WINDOW_MS, COMBO_WINDOW_PER_LEVEL_MS};

/// Length of the decay window at a given ComboMaster level (ms)
pub fn window_ms(combo_master_level: u32) -> f64 {
    COMBO_BASE_WINDOW_MS + f64::from(combo_master_level) * COMBO_WINDOW_PER_LEVEL_MS
}

/// Advance the combo for an action at `now_ms`. Returns the new combo count.
pub fn bump(state: &mut GameState, now_ms: f64) -> u32 {
    state.combo += 1;
    state.combo_timer = Some(now_ms);
    state.combo
}

/// When the currently active window expires, if one is active
pub fn deadline(state: &GameState) -> Option<f64> {
    state
        .combo_timer
        .map(|stamp| stamp + window_ms(state.upgrades.combo_master))
}

/// Reset the combo if its window has elapsed by `now_ms`.
///
/// Returns true when a reset happened. A stale fire (scheduled before a
/// newer action restamped the timer) sees an unexpired deadline and leaves
/// the state alone.
pub fn try_expire(state: &mut GameState, now_ms: f64) -> bool {
    match deadline(state) {
        Some(d) if now_ms >= d => {
            state.combo = 0;
            state.combo_timer = None;
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_action_activates() {
        let mut state = GameState::new();
        assert_eq!(bump(&mut state, 1000.0), 1);
        assert_eq!(state.combo_timer, Some(1000.0));
        assert_eq!(deadline(&state), Some(3000.0));
    }

    #[test]
    fn test_expiry_resets_to_idle() {
        let mut state = GameState::new();
        bump(&mut state, 1000.0);
        assert!(!try_expire(&mut state, 2999.0));
        assert!(try_expire(&mut state, 3000.0));
        assert_eq!(state.combo, 0);
        assert_eq!(state.combo_timer, None);
        // Idle state has nothing to expire
        assert!(!try_expire(&mut state, 9000.0));
    }

    #[test]
    fn test_late_action_extends_window() {
        // Combo at 5, next action lands 1900ms after the previous one,
        // just inside the 2000ms window
        let mut state = GameState::new();
        for i in 0..5 {
            bump(&mut state, f64::from(i) * 100.0);
        }
        assert_eq!(state.combo, 5);
        let last = state.combo_timer.unwrap();

        bump(&mut state, last + 1900.0);
        assert_eq!(state.combo, 6);

        // The fire scheduled off the old action is now stale
        assert!(!try_expire(&mut state, last + 2000.0));
        assert_eq!(state.combo, 6);

        // The window now runs from the newest action
        assert!(try_expire(&mut state, last + 1900.0 + 2000.0));
        assert_eq!(state.combo, 0);
    }

    #[test]
    fn test_combo_master_widens_window() {
        assert_eq!(window_ms(0), 2000.0);
        assert_eq!(window_ms(3), 2600.0);

        let mut state = GameState::new();
        state.upgrades.combo_master = 3;
        bump(&mut state, 0.0);
        assert!(!try_expire(&mut state, 2500.0));
        assert!(try_expire(&mut state, 2600.0));
    }
}
