//! Milestone thresholds and crossing detection
//!
//! A milestone fires exactly once: on the transition where the tracked value
//! moves from below a threshold to at-or-above it. Detection compares the
//! state before and after a transition, so one large jump can fire several
//! thresholds and a later transition re-checks none of them.

use super::state::GameState;

/// Metrics with milestone tables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MilestoneMetric {
    Points,
    Combo,
    Level,
    Colors,
}

/// Ascending point thresholds
const POINT_MILESTONES: [u64; 6] = [100, 1_000, 10_000, 100_000, 1_000_000, 10_000_000];
/// Ascending combo streak thresholds
const COMBO_MILESTONES: [u64; 4] = [10, 25, 50, 100];
/// Ascending level thresholds
const LEVEL_MILESTONES: [u64; 5] = [5, 10, 25, 50, 100];
/// Ascending unique-color thresholds
const COLOR_MILESTONES: [u64; 4] = [10, 25, 50, 100];

impl MilestoneMetric {
    fn thresholds(&self) -> &'static [u64] {
        match self {
            MilestoneMetric::Points => &POINT_MILESTONES,
            MilestoneMetric::Combo => &COMBO_MILESTONES,
            MilestoneMetric::Level => &LEVEL_MILESTONES,
            MilestoneMetric::Colors => &COLOR_MILESTONES,
        }
    }

    const ALL: [MilestoneMetric; 4] = [
        MilestoneMetric::Points,
        MilestoneMetric::Combo,
        MilestoneMetric::Level,
        MilestoneMetric::Colors,
    ];
}

/// A single threshold crossing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Milestone {
    pub metric: MilestoneMetric,
    pub threshold: u64,
}

impl Milestone {
    /// Announcement line for the HUD
    pub fn describe(&self) -> String {
        match self.metric {
            MilestoneMetric::Points => format!("Reached {} points!", self.threshold),
            MilestoneMetric::Combo => format!("{}x combo streak!", self.threshold),
            MilestoneMetric::Level => format!("Level {} reached!", self.threshold),
            MilestoneMetric::Colors => format!("{} unique colors collected!", self.threshold),
        }
    }
}

/// The milestone-relevant values of a state, captured before a transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricSnapshot {
    points: f64,
    combo: u32,
    level: u32,
    colors: usize,
}

impl MetricSnapshot {
    pub fn of(state: &GameState) -> Self {
        Self {
            points: state.points,
            combo: state.combo,
            level: state.level,
            colors: state.achievements.colors_unlocked.len(),
        }
    }

    fn value(&self, metric: MilestoneMetric) -> f64 {
        match metric {
            MilestoneMetric::Points => self.points,
            MilestoneMetric::Combo => f64::from(self.combo),
            MilestoneMetric::Level => f64::from(self.level),
            MilestoneMetric::Colors => self.colors as f64,
        }
    }
}

/// All thresholds crossed between two snapshots, in table order
pub fn crossed(old: &MetricSnapshot, new: &MetricSnapshot) -> Vec<Milestone> {
    let mut hits = Vec::new();
    for metric in MilestoneMetric::ALL {
        let (before, after) = (old.value(metric), new.value(metric));
        for &threshold in metric.thresholds() {
            let t = threshold as f64;
            if before < t && after >= t {
                hits.push(Milestone { metric, threshold });
            }
        }
    }
    hits
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(points: f64, combo: u32, level: u32, colors: usize) -> MetricSnapshot {
        MetricSnapshot {
            points,
            combo,
            level,
            colors,
        }
    }

    #[test]
    fn test_point_threshold_fires_once() {
        // 950 -> 1030 crosses 1000
        let hits = crossed(&snapshot(950.0, 0, 1, 0), &snapshot(1030.0, 0, 1, 0));
        assert_eq!(
            hits,
            vec![Milestone {
                metric: MilestoneMetric::Points,
                threshold: 1000
            }]
        );

        // 1030 -> 1100 must not re-fire
        let hits = crossed(&snapshot(1030.0, 0, 1, 0), &snapshot(1100.0, 0, 1, 0));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_large_jump_fires_every_crossed_threshold() {
        let hits = crossed(&snapshot(50.0, 0, 1, 0), &snapshot(20_000.0, 0, 1, 0));
        let thresholds: Vec<u64> = hits.iter().map(|m| m.threshold).collect();
        assert_eq!(thresholds, vec![100, 1_000, 10_000]);
    }

    #[test]
    fn test_exact_landing_counts() {
        let hits = crossed(&snapshot(999.0, 0, 1, 0), &snapshot(1000.0, 0, 1, 0));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_multiple_metrics_in_one_transition() {
        let hits = crossed(
            &snapshot(90.0, 9, 4, 9),
            &snapshot(120.0, 10, 5, 10),
        );
        assert_eq!(hits.len(), 4);
    }

    #[test]
    fn test_spending_does_not_fire() {
        // Points dropping below and back is a purchase concern; only upward
        // crossings count
        let hits = crossed(&snapshot(1500.0, 0, 1, 0), &snapshot(900.0, 0, 1, 0));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_tables_are_ascending() {
        for metric in MilestoneMetric::ALL {
            let t = metric.thresholds();
            assert!(t.windows(2).all(|w| w[0] < w[1]));
        }
    }
}
