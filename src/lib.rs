//! Blob Clicker - an incremental clicker game
//!
//! Core modules:
//! - `game`: Deterministic progression engine (economy, combos, milestones, transitions)
//! - `catalog`: Data-driven upgrade definitions
//! - `persistence`: Save/load with integrity verification

pub mod catalog;
pub mod game;
pub mod persistence;

pub use catalog::{UpgradeDef, UpgradeKind};
pub use game::{ClickOutcome, GameState, GameStore, PurchaseError, TickOutcome};

/// Game tuning constants
pub mod consts {
    /// Passive income cadence (the host drives `tick` at this interval)
    pub const TICK_INTERVAL_SECS: f64 = 1.0;

    /// Base combo window before ComboMaster extensions (ms)
    pub const COMBO_BASE_WINDOW_MS: f64 = 2000.0;
    /// Extra combo window per ComboMaster level (ms)
    pub const COMBO_WINDOW_PER_LEVEL_MS: f64 = 200.0;
    /// Yield bonus contributed by each combo step (before ComboMaster scaling)
    pub const COMBO_STEP: f64 = 0.1;

    /// Critical hits double the action's yield
    pub const CRIT_MULTIPLIER: f64 = 2.0;
    /// An action this many times over base click power counts as a mega hit
    pub const MEGA_HIT_FACTOR: f64 = 10.0;

    /// Experience required for the first level-up
    pub const BASE_EXPERIENCE_TO_NEXT: f64 = 100.0;
    /// Experience requirement growth per level
    pub const EXPERIENCE_GROWTH: f64 = 1.5;

    /// Unique-color count at which the ColorMastery bonus saturates.
    /// Tuning value, not an invariant of the achievement set.
    pub const COLOR_SATURATION: f64 = 100.0;
}
