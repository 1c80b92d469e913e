//! Game state and its default shape
//!
//! All state that must survive a reload lives here.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::catalog::UpgradeKind;
use crate::consts::BASE_EXPERIENCE_TO_NEXT;

/// Owned upgrade levels, one per catalog kind.
///
/// Kinds added after a save was written hydrate to level 0 via the field
/// defaults, so old saves keep loading as the catalog grows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeLevels {
    #[serde(default)]
    pub click_power: u32,
    #[serde(default)]
    pub auto_clicker: u32,
    #[serde(default)]
    pub multiplier: u32,
    #[serde(default)]
    pub combo_master: u32,
    #[serde(default)]
    pub critical_click: u32,
    #[serde(default)]
    pub color_mastery: u32,
}

impl UpgradeLevels {
    pub fn level(&self, kind: UpgradeKind) -> u32 {
        match kind {
            UpgradeKind::ClickPower => self.click_power,
            UpgradeKind::AutoClicker => self.auto_clicker,
            UpgradeKind::Multiplier => self.multiplier,
            UpgradeKind::ComboMaster => self.combo_master,
            UpgradeKind::CriticalClick => self.critical_click,
            UpgradeKind::ColorMastery => self.color_mastery,
        }
    }

    pub fn level_mut(&mut self, kind: UpgradeKind) -> &mut u32 {
        match kind {
            UpgradeKind::ClickPower => &mut self.click_power,
            UpgradeKind::AutoClicker => &mut self.auto_clicker,
            UpgradeKind::Multiplier => &mut self.multiplier,
            UpgradeKind::ComboMaster => &mut self.combo_master,
            UpgradeKind::CriticalClick => &mut self.critical_click,
            UpgradeKind::ColorMastery => &mut self.color_mastery,
        }
    }

    /// True when every kind is at or above the given level
    pub fn all_at_least(&self, level: u32) -> bool {
        UpgradeKind::ALL.iter().all(|k| self.level(*k) >= level)
    }
}

/// Monotonically growing trophy record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievements {
    #[serde(default)]
    pub total_clicks: u64,
    #[serde(default)]
    pub max_combo: u32,
    /// Unique colors seen across all clicks. Serializes as an ordered list;
    /// the order carries no meaning.
    #[serde(default)]
    pub colors_unlocked: BTreeSet<String>,
}

/// Complete progression state (serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Spendable currency; only purchases decrease it
    pub points: f64,
    /// Derived from the ClickPower level, recomputed on purchase
    pub points_per_click: f64,
    pub level: u32,
    pub experience: f64,
    pub experience_to_next: f64,
    /// Consecutive actions inside the decay window
    pub combo: u32,
    /// Epoch ms of the action that last refreshed the combo window
    pub combo_timer: Option<f64>,
    #[serde(default)]
    pub upgrades: UpgradeLevels,
    #[serde(default)]
    pub achievements: Achievements,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            points: 0.0,
            points_per_click: 1.0,
            level: 1,
            experience: 0.0,
            experience_to_next: BASE_EXPERIENCE_TO_NEXT,
            combo: 0,
            combo_timer: None,
            upgrades: UpgradeLevels::default(),
            achievements: Achievements::default(),
        }
    }
}

impl GameState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn upgrade_level(&self, kind: UpgradeKind) -> u32 {
        self.upgrades.level(kind)
    }

    /// Recompute the derived click power from the current ClickPower level
    pub fn refresh_points_per_click(&mut self) {
        let def = UpgradeKind::ClickPower.def();
        self.points_per_click = 1.0 + def.effect * f64::from(self.upgrades.click_power);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let state = GameState::new();
        assert_eq!(state.points, 0.0);
        assert_eq!(state.points_per_click, 1.0);
        assert_eq!(state.level, 1);
        assert_eq!(state.experience_to_next, 100.0);
        assert_eq!(state.combo, 0);
        assert!(state.combo_timer.is_none());
        assert!(state.achievements.colors_unlocked.is_empty());
        assert!(state.upgrades.all_at_least(0));
        assert!(!state.upgrades.all_at_least(1));
    }

    #[test]
    fn test_refresh_points_per_click() {
        let mut state = GameState::new();
        state.upgrades.click_power = 3;
        state.refresh_points_per_click();
        assert_eq!(state.points_per_click, 4.0);
    }

    #[test]
    fn test_old_save_without_new_fields_defaults_to_zero() {
        // A save written before newer upgrade kinds existed
        let json = r##"{
            "points": 12.0,
            "pointsPerClick": 2.0,
            "level": 3,
            "experience": 5.0,
            "experienceToNext": 225.0,
            "combo": 0,
            "comboTimer": null,
            "upgrades": {"clickPower": 1},
            "achievements": {"totalClicks": 40, "maxCombo": 7, "colorsUnlocked": ["#ff0000"]}
        }"##;
        let state: GameState = serde_json::from_str(json).unwrap();
        assert_eq!(state.upgrades.click_power, 1);
        assert_eq!(state.upgrades.color_mastery, 0);
        assert_eq!(state.achievements.total_clicks, 40);
        assert_eq!(state.achievements.colors_unlocked.len(), 1);
    }
}
