//! Economy math
//!
//! Pure functions over a state snapshot and the upgrade catalog. Nothing in
//! here mutates state except [`apply_experience`], which is the single place
//! points and experience are credited.

use rand::Rng;

use super::state::GameState;
use crate::catalog::UpgradeKind;
use crate::consts::{COLOR_SATURATION, COMBO_STEP, CRIT_MULTIPLIER, EXPERIENCE_GROWTH};

/// Price of the next level of an upgrade currently owned at `current_level`
pub fn upgrade_cost(kind: UpgradeKind, current_level: u32) -> f64 {
    let def = kind.def();
    (def.base_price * def.price_scale.powi(current_level as i32)).floor()
}

/// One click's computed yield
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickYield {
    pub points: f64,
    pub critical: bool,
}

/// Multiplier applied to every point source
fn global_multiplier(state: &GameState) -> f64 {
    let def = UpgradeKind::Multiplier.def();
    1.0 + f64::from(state.upgrades.multiplier) * def.effect
}

/// Compute one action's point yield.
///
/// Uses the combo value as already advanced for this action. The critical
/// draw is the only random input in the economy; chance is clamped so
/// heavily upgraded crits become certain instead of overflowing.
pub fn click_yield<R: Rng>(state: &GameState, rng: &mut R) -> ClickYield {
    let crit_def = UpgradeKind::CriticalClick.def();
    let crit_chance =
        (f64::from(state.upgrades.critical_click) * crit_def.effect).clamp(0.0, 1.0);
    let critical = crit_chance > 0.0 && rng.random::<f64>() < crit_chance;
    let crit_mult = if critical { CRIT_MULTIPLIER } else { 1.0 };

    let combo_def = UpgradeKind::ComboMaster.def();
    let combo_scale = 1.0 + f64::from(state.upgrades.combo_master) * combo_def.effect;
    let combo_mult = 1.0 + f64::from(state.combo) * COMBO_STEP * combo_scale;

    let color_def = UpgradeKind::ColorMastery.def();
    let unique_colors = state.achievements.colors_unlocked.len() as f64;
    let color_bonus = 1.0
        + f64::from(state.upgrades.color_mastery) * color_def.effect
            * (unique_colors / COLOR_SATURATION);

    let base = state.points_per_click * crit_mult * combo_mult * color_bonus;
    ClickYield {
        points: base * global_multiplier(state),
        critical,
    }
}

/// Points generated per one-second tick by the auto clicker
pub fn passive_yield(state: &GameState) -> f64 {
    let def = UpgradeKind::AutoClicker.def();
    f64::from(state.upgrades.auto_clicker) * def.effect * global_multiplier(state)
}

/// Credit `gained` points and experience, then unroll any level-ups.
///
/// Handles multi-level jumps from one large gain. Returns the number of
/// levels gained. Terminates because the requirement is strictly positive
/// and non-decreasing.
pub fn apply_experience(state: &mut GameState, gained: f64) -> u32 {
    debug_assert!(gained >= 0.0, "experience gain must be non-negative");
    if gained <= 0.0 {
        return 0;
    }

    state.points += gained;
    state.experience += gained;

    let mut levels = 0;
    while state.experience >= state.experience_to_next {
        state.experience -= state.experience_to_next;
        state.level += 1;
        state.experience_to_next = (state.experience_to_next * EXPERIENCE_GROWTH).floor();
        levels += 1;
    }
    levels
}
