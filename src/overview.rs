//! Headline figures of the dashboard
//!
//! None of these are measured, they are simulated with random numbers.

use rand::Rng;
use serde::Serialize;

/// Direction a figure moved in
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

impl Trend {
    /// Trend following the sign of a change
    pub fn from_change(change: i64) -> Self {
        match change {
            change if change > 0 => Self::Up,
            change if change < 0 => Self::Down,
            _ => Self::Neutral,
        }
    }

    /// Up with the given probability, down otherwise
    fn random<R: Rng>(rng: &mut R, up: f64) -> Self {
        if rng.gen_bool(up) {
            Self::Up
        } else {
            Self::Down
        }
    }

    /// Label shown next to the figure
    pub fn label(self) -> &'static str {
        match self {
            Self::Up => "+5%",
            Self::Down => "-3%",
            Self::Neutral => "0%",
        }
    }
}

/// Trend for each of the figures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Trends {
    pub aliases: Trend,
    pub protected_accounts: Trend,
    pub alerts: Trend,
    pub protection_score: Trend,
}

/// The headline figures
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overview {
    /// Active aliases
    pub aliases: u32,

    /// Accounts behind a protected alias
    pub protected_accounts: u32,

    /// Leak alerts raised
    pub alerts: u32,

    /// Protection score in percent, at most 100
    pub protection_score: u32,

    pub trends: Trends,
}

impl Overview {
    /// Figures used when the upstream can not be reached
    pub fn demo() -> Self {
        Self {
            aliases: 24,
            protected_accounts: 182,
            alerts: 3,
            protection_score: 97,
            trends: Trends {
                aliases: Trend::Up,
                protected_accounts: Trend::Up,
                alerts: Trend::Down,
                protection_score: Trend::Up,
            },
        }
    }

    /// Randomized figures around the demo values
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            aliases: 24 + rng.gen_range(0..10),
            protected_accounts: 182 + rng.gen_range(0..20),
            alerts: 3 + rng.gen_range(0..4),
            protection_score: 92 + rng.gen_range(0..8),
            trends: Trends {
                aliases: Trend::random(rng, 0.5),
                protected_accounts: Trend::random(rng, 0.7),
                alerts: Trend::random(rng, 0.5),
                protection_score: Trend::random(rng, 0.6),
            },
        }
    }

    /// Figures after a number of days of the given daily activity
    pub fn simulate(self, days: u32, activity: &Activity) -> Self {
        let days = i64::from(days);
        let apply = |value: u32, change: i64| {
            let value = i64::from(value).saturating_add(change.saturating_mul(days));
            u32::try_from(value.max(0)).unwrap_or(u32::MAX)
        };

        Self {
            aliases: apply(self.aliases, activity.aliases),
            protected_accounts: apply(self.protected_accounts, activity.protected_accounts),
            alerts: apply(self.alerts, activity.alerts),
            protection_score: apply(self.protection_score, activity.protection_score).min(100),
            trends: Trends {
                aliases: Trend::from_change(activity.aliases),
                protected_accounts: Trend::from_change(activity.protected_accounts),
                alerts: Trend::from_change(activity.alerts),
                protection_score: Trend::from_change(activity.protection_score),
            },
        }
    }

    /// Figures after a leak was found
    pub fn with_leak(self) -> Self {
        Self {
            alerts: self.alerts.saturating_add(1),
            trends: Trends {
                alerts: Trend::Up,
                ..self.trends
            },
            ..self
        }
    }
}

/// Daily change of each figure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activity {
    pub aliases: i64,
    pub protected_accounts: i64,
    pub alerts: i64,
    pub protection_score: i64,
}

impl Activity {
    /// Random daily activity
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self {
            aliases: rng.gen_range(-1..=3),
            protected_accounts: rng.gen_range(2..=11),
            alerts: rng.gen_range(-1..=2),
            protection_score: rng.gen_range(0..=2),
        }
    }
}

/// Height of the leak chart in pixels
const CHART_HEIGHT: f64 = 200.0;

/// Room kept free above the highest bar
const CHART_HEADROOM: f64 = 30.0;

/// Horizontal distance between bars
const BAR_SPACING: u32 = 40;

/// Offset of the first bar
const BAR_OFFSET: u32 = 20;

/// Color class of a bar
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Warning,
    Danger,
}

impl Severity {
    fn from_value(value: u32) -> Self {
        if value > 5 {
            Self::Danger
        } else if value > 3 {
            Self::Warning
        } else {
            Self::Success
        }
    }
}

/// Single bar of the leak chart
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bar {
    pub label: &'static str,
    pub value: u32,
    pub height: f64,
    pub offset: u32,
    pub severity: Severity,
}

/// Leaks per day of the last week
pub fn weekly_leaks() -> [(&'static str, u32); 7] {
    [
        ("Mon", 3),
        ("Tue", 5),
        ("Wed", 2),
        ("Thu", 4),
        ("Fri", 6),
        ("Sat", 8),
        ("Sun", 5),
    ]
}

/// Lay out the bars of a chart, scaled to the highest value
pub fn chart_bars(data: &[(&'static str, u32)]) -> Vec<Bar> {
    let max = data.iter().map(|(_, value)| *value).max().unwrap_or(0);

    data.iter()
        .zip(0u32..)
        .map(|(&(label, value), index)| Bar {
            label,
            value,
            height: if max == 0 {
                0.0
            } else {
                f64::from(value) / f64::from(max) * (CHART_HEIGHT - CHART_HEADROOM)
            },
            offset: index * BAR_SPACING + BAR_OFFSET,
            severity: Severity::from_value(value),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn test_random_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let overview = Overview::random(&mut rng);

            assert!((24..34).contains(&overview.aliases));
            assert!((182..202).contains(&overview.protected_accounts));
            assert!((3..7).contains(&overview.alerts));
            assert!((92..100).contains(&overview.protection_score));
            assert_ne!(Trend::Neutral, overview.trends.aliases);
        }
    }

    #[test]
    fn test_simulate() {
        let activity = Activity {
            aliases: 3,
            protected_accounts: 2,
            alerts: -1,
            protection_score: 0,
        };

        let overview = Overview::demo().simulate(7, &activity);

        assert_eq!(45, overview.aliases);
        assert_eq!(196, overview.protected_accounts);
        assert_eq!(0, overview.alerts);
        assert_eq!(97, overview.protection_score);
        assert_eq!(Trend::Up, overview.trends.aliases);
        assert_eq!(Trend::Down, overview.trends.alerts);
        assert_eq!(Trend::Neutral, overview.trends.protection_score);
    }

    #[test]
    fn test_simulate_caps_score() {
        let activity = Activity {
            aliases: 0,
            protected_accounts: 2,
            alerts: 0,
            protection_score: 2,
        };

        let overview = Overview::demo().simulate(365, &activity);

        assert_eq!(100, overview.protection_score);
    }

    #[test]
    fn test_random_activity_in_range() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..100 {
            let activity = Activity::random(&mut rng);

            assert!((-1..=3).contains(&activity.aliases));
            assert!((2..=11).contains(&activity.protected_accounts));
            assert!((-1..=2).contains(&activity.alerts));
            assert!((0..=2).contains(&activity.protection_score));
        }
    }

    #[test]
    fn test_with_leak() {
        let overview = Overview::demo().with_leak();

        assert_eq!(4, overview.alerts);
        assert_eq!(Trend::Up, overview.trends.alerts);
        assert_eq!(24, overview.aliases);
    }

    #[test]
    fn test_chart_bars() {
        let bars = chart_bars(&weekly_leaks());

        assert_eq!(7, bars.len());

        let highest = &bars[5];
        assert_eq!("Sat", highest.label);
        assert!((highest.height - 170.0).abs() < f64::EPSILON);
        assert_eq!(220, highest.offset);
        assert_eq!(Severity::Danger, highest.severity);

        assert_eq!(Severity::Success, bars[0].severity);
        assert_eq!(Severity::Warning, bars[1].severity);
        assert_eq!(20, bars[0].offset);
    }

    #[test]
    fn test_chart_bars_without_leaks() {
        let bars = chart_bars(&[("Mon", 0), ("Tue", 0)]);

        assert!(bars.iter().all(|bar| bar.height == 0.0));
    }
}
