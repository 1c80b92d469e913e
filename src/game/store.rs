//! The game store: canonical state plus its transition operations
//!
//! All mutation goes through `click`, `tick`, `purchase`, and
//! `expire_combo`. Each transition is a single synchronous method, so on a
//! single-threaded host no observer ever sees a half-applied update; a host
//! that dispatches from multiple threads must serialize calls behind a lock
//! to keep purchase's check-then-act and the milestone old/new comparison
//! intact.

use std::fmt;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::combo;
use super::economy;
use super::milestones::{self, MetricSnapshot, Milestone};
use super::state::GameState;
use crate::catalog::{self, UpgradeKind};
use crate::consts::MEGA_HIT_FACTOR;

/// Result of one click, with the cue flags collaborators pick effects from
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    pub points_gained: f64,
    pub critical: bool,
    /// Yield landed above `MEGA_HIT_FACTOR` times base click power
    pub mega_hit: bool,
    /// Combo count including this action
    pub combo: u32,
    pub levels_gained: u32,
    pub milestones: Vec<Milestone>,
    /// Screen position of the action, passed through for cue placement
    pub position: Option<(f32, f32)>,
}

/// Result of one passive-income tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickOutcome {
    pub points_gained: f64,
    pub levels_gained: u32,
    pub milestones: Vec<Milestone>,
}

/// Successful purchase summary
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseReceipt {
    pub kind: UpgradeKind,
    pub cost: f64,
    pub new_level: u32,
    /// This was the kind's first level
    pub first_of_kind: bool,
    /// This purchase brought every kind to level 10 or above
    pub all_at_ten: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseError {
    InsufficientFunds,
}

impl fmt::Display for PurchaseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PurchaseError::InsufficientFunds => write!(f, "not enough points"),
        }
    }
}

/// Owns the canonical [`GameState`] and the session RNG
pub struct GameStore {
    state: GameState,
    rng: Pcg32,
}

impl GameStore {
    /// Fresh session. The seed comes from the host (wall clock is fine);
    /// tests pin it to get a fixed critical-hit sequence.
    pub fn new(seed: u64) -> Self {
        catalog::debug_validate();
        Self {
            state: GameState::new(),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Session hydrated from a loaded save
    pub fn with_state(state: GameState, seed: u64) -> Self {
        catalog::debug_validate();
        Self {
            state,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Read-only snapshot for rendering
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Price of the next level, for shop display and affordability checks
    pub fn cost_of(&self, kind: UpgradeKind) -> f64 {
        economy::upgrade_cost(kind, self.state.upgrades.level(kind))
    }

    /// Apply one player action.
    ///
    /// Always succeeds; a zero-effect click is still a click. The acting
    /// color joins the unique-color set only after the yield is computed,
    /// so each click is paid at the bonus it was made under.
    pub fn click(
        &mut self,
        now_ms: f64,
        color: Option<&str>,
        position: Option<(f32, f32)>,
    ) -> ClickOutcome {
        let old = MetricSnapshot::of(&self.state);

        combo::bump(&mut self.state, now_ms);
        let yielded = economy::click_yield(&self.state, &mut self.rng);
        let levels_gained = economy::apply_experience(&mut self.state, yielded.points);

        self.state.achievements.total_clicks += 1;
        self.state.achievements.max_combo =
            self.state.achievements.max_combo.max(self.state.combo);
        if let Some(color) = color {
            self.state
                .achievements
                .colors_unlocked
                .insert(color.to_owned());
        }

        ClickOutcome {
            points_gained: yielded.points,
            critical: yielded.critical,
            mega_hit: yielded.points > MEGA_HIT_FACTOR * self.state.points_per_click,
            combo: self.state.combo,
            levels_gained,
            milestones: milestones::crossed(&old, &MetricSnapshot::of(&self.state)),
            position,
        }
    }

    /// Apply passive income for an elapsed interval (1 Hz cadence).
    ///
    /// No-op without an auto clicker. Negative elapsed time is a caller bug.
    pub fn tick(&mut self, elapsed_secs: f64) -> TickOutcome {
        debug_assert!(elapsed_secs >= 0.0, "tick elapsed time must be non-negative");
        if elapsed_secs <= 0.0 {
            if elapsed_secs < 0.0 {
                log::warn!("ignoring tick with negative elapsed time {elapsed_secs}");
            }
            return TickOutcome::default();
        }
        if self.state.upgrades.auto_clicker == 0 {
            return TickOutcome::default();
        }

        let old = MetricSnapshot::of(&self.state);
        let gained = economy::passive_yield(&self.state) * elapsed_secs;
        let levels_gained = economy::apply_experience(&mut self.state, gained);

        TickOutcome {
            points_gained: gained,
            levels_gained,
            milestones: milestones::crossed(&old, &MetricSnapshot::of(&self.state)),
        }
    }

    /// Buy one level of an upgrade. All-or-nothing: on insufficient funds
    /// the state is untouched.
    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<PurchaseReceipt, PurchaseError> {
        let cost = self.cost_of(kind);
        if self.state.points < cost {
            return Err(PurchaseError::InsufficientFunds);
        }

        let was_all_ten = self.state.upgrades.all_at_least(10);
        self.state.points -= cost;
        let level = self.state.upgrades.level_mut(kind);
        *level += 1;
        let new_level = *level;
        if kind == UpgradeKind::ClickPower {
            self.state.refresh_points_per_click();
        }

        Ok(PurchaseReceipt {
            kind,
            cost,
            new_level,
            first_of_kind: new_level == 1,
            all_at_ten: !was_all_ten && self.state.upgrades.all_at_least(10),
        })
    }

    /// Deadline of the active combo window, for decay scheduling
    pub fn combo_deadline(&self) -> Option<f64> {
        combo::deadline(&self.state)
    }

    /// Decay-timer entry point; stale fires are inert. Returns true when
    /// the combo actually reset.
    pub fn expire_combo(&mut self, now_ms: f64) -> bool {
        combo::try_expire(&mut self.state, now_ms)
    }
}
