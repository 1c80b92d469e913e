//! Data-driven upgrade catalog
//!
//! One immutable definition per upgrade kind: cost curve parameters, effect
//! magnitude, and the descriptive text the shop panel shows.

use serde::{Deserialize, Serialize};

/// The fixed set of purchasable upgrades
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeKind {
    ClickPower,
    AutoClicker,
    Multiplier,
    ComboMaster,
    CriticalClick,
    ColorMastery,
}

impl UpgradeKind {
    /// All kinds, in shop display order
    pub const ALL: [UpgradeKind; 6] = [
        UpgradeKind::ClickPower,
        UpgradeKind::AutoClicker,
        UpgradeKind::Multiplier,
        UpgradeKind::ComboMaster,
        UpgradeKind::CriticalClick,
        UpgradeKind::ColorMastery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeKind::ClickPower => "clickPower",
            UpgradeKind::AutoClicker => "autoClicker",
            UpgradeKind::Multiplier => "multiplier",
            UpgradeKind::ComboMaster => "comboMaster",
            UpgradeKind::CriticalClick => "criticalClick",
            UpgradeKind::ColorMastery => "colorMastery",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "clickPower" => Some(UpgradeKind::ClickPower),
            "autoClicker" => Some(UpgradeKind::AutoClicker),
            "multiplier" => Some(UpgradeKind::Multiplier),
            "comboMaster" => Some(UpgradeKind::ComboMaster),
            "criticalClick" => Some(UpgradeKind::CriticalClick),
            "colorMastery" => Some(UpgradeKind::ColorMastery),
            _ => None,
        }
    }

    /// Static definition for this kind
    pub fn def(&self) -> &'static UpgradeDef {
        match self {
            UpgradeKind::ClickPower => &CLICK_POWER,
            UpgradeKind::AutoClicker => &AUTO_CLICKER,
            UpgradeKind::Multiplier => &MULTIPLIER,
            UpgradeKind::ComboMaster => &COMBO_MASTER,
            UpgradeKind::CriticalClick => &CRITICAL_CLICK,
            UpgradeKind::ColorMastery => &COLOR_MASTERY,
        }
    }
}

/// Immutable tuning for one upgrade kind
#[derive(Debug, Clone)]
pub struct UpgradeDef {
    /// Cost of the first level
    pub base_price: f64,
    /// Geometric cost growth per owned level (> 1)
    pub price_scale: f64,
    /// Per-level effect magnitude (meaning depends on the kind)
    pub effect: f64,
    /// One-line shop description
    pub description: &'static str,
    /// Longer tooltip text
    pub details: &'static str,
    /// Display accent color (CSS hex)
    pub color: &'static str,
}

static CLICK_POWER: UpgradeDef = UpgradeDef {
    base_price: 10.0,
    price_scale: 1.15,
    effect: 1.0,
    description: "Increases points per click by +1",
    details: "Each level adds 1 to your base click power. This is multiplied by other bonuses.",
    color: "#8b5cf6",
};

static AUTO_CLICKER: UpgradeDef = UpgradeDef {
    base_price: 50.0,
    price_scale: 1.2,
    effect: 0.1,
    description: "Automatically generates points every second",
    details: "Each level adds 0.1 points per second. This is multiplied by your multiplier.",
    color: "#3b82f6",
};

static MULTIPLIER: UpgradeDef = UpgradeDef {
    base_price: 100.0,
    price_scale: 1.3,
    effect: 0.5,
    description: "Multiplies ALL points gained by 50%",
    details: "Each level adds a 50% multiplier to all points gained, including auto-clicker.",
    color: "#10b981",
};

static COMBO_MASTER: UpgradeDef = UpgradeDef {
    base_price: 200.0,
    price_scale: 1.25,
    effect: 0.2,
    description: "Improves combo duration and power by 20%",
    details: "Each level increases combo duration and makes combos more powerful.",
    color: "#f59e0b",
};

static CRITICAL_CLICK: UpgradeDef = UpgradeDef {
    base_price: 150.0,
    price_scale: 1.35,
    effect: 0.1,
    description: "10% chance for 2x critical hits",
    details: "Each level adds 10% chance for clicks to deal double damage.",
    color: "#ef4444",
};

static COLOR_MASTERY: UpgradeDef = UpgradeDef {
    base_price: 300.0,
    price_scale: 1.4,
    effect: 0.15,
    description: "Gain bonus points for unique colors",
    details: "Each level increases the bonus you get for collecting unique colors.",
    color: "#ec4899",
};

/// Assert every definition is usable. A broken entry is a config bug, not a
/// runtime condition, so this only runs in debug builds.
pub fn debug_validate() {
    for kind in UpgradeKind::ALL {
        let def = kind.def();
        debug_assert!(def.base_price > 0.0, "{}: base_price must be > 0", kind.as_str());
        debug_assert!(def.price_scale > 1.0, "{}: price_scale must be > 1", kind.as_str());
        debug_assert!(def.effect > 0.0, "{}: effect must be > 0", kind.as_str());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_entries_valid() {
        for kind in UpgradeKind::ALL {
            let def = kind.def();
            assert!(def.base_price > 0.0);
            assert!(def.price_scale > 1.0);
            assert!(def.effect > 0.0);
            assert!(!def.description.is_empty());
        }
    }

    #[test]
    fn test_kind_string_round_trip() {
        for kind in UpgradeKind::ALL {
            assert_eq!(UpgradeKind::from_str(kind.as_str()), Some(kind));
        }
        assert_eq!(UpgradeKind::from_str("megaClicker"), None);
    }

    #[test]
    fn test_kind_serializes_as_camel_case() {
        let json = serde_json::to_string(&UpgradeKind::ClickPower).unwrap();
        assert_eq!(json, "\"clickPower\"");
    }
}
