//! Deterministic progression engine
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - State changes only through the store's transition methods
//! - Injected RNG only (one seeded generator per session)
//! - No rendering or platform dependencies

pub mod combo;
pub mod economy;
pub mod milestones;
pub mod state;
pub mod store;

pub use economy::{apply_experience, click_yield, passive_yield, upgrade_cost};
pub use milestones::{MetricSnapshot, Milestone, MilestoneMetric};
pub use state::{Achievements, GameState, UpgradeLevels};
pub use store::{ClickOutcome, GameStore, PurchaseError, PurchaseReceipt, TickOutcome};
