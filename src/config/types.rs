//! Configuration types for hours classification.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::BTreeMap;

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::Regime;

/// Default daily overtime threshold in hours.
pub const DEFAULT_DAILY_OVERTIME_HOURS: Decimal = Decimal::from_parts(8, 0, 0, false, 0);

/// Default daily double-time threshold in hours.
pub const DEFAULT_DAILY_DOUBLETIME_HOURS: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Default weekly regular-hours cap.
pub const DEFAULT_WEEKLY_REGULAR_HOURS: Decimal = Decimal::from_parts(40, 0, 0, false, 0);

/// Hour thresholds shared by the rule engines.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Thresholds {
    /// Daily hours beyond which time is overtime (tiered regime only).
    pub daily_overtime_hours: Decimal,
    /// Daily hours beyond which time is double-time (tiered regime only).
    pub daily_doubletime_hours: Decimal,
    /// Weekly regular hours beyond which time is overtime.
    pub weekly_regular_hours: Decimal,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            daily_overtime_hours: DEFAULT_DAILY_OVERTIME_HOURS,
            daily_doubletime_hours: DEFAULT_DAILY_DOUBLETIME_HOURS,
            weekly_regular_hours: DEFAULT_WEEKLY_REGULAR_HOURS,
        }
    }
}

/// How the requested period is divided into weekly accumulation windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum WeekBoundary {
    /// The whole requested range is one window; the weekly accumulator never resets.
    #[default]
    Period,
    /// Entries are bucketed by the calendar week containing their start (UTC).
    CalendarWeek {
        /// First day of each calendar week.
        week_starts_on: Weekday,
    },
}

/// Contents of `rules.yaml`.
#[derive(Debug, Clone, Deserialize)]
pub struct RulesFile {
    /// Hour thresholds.
    pub thresholds: Thresholds,
    /// Weekly window policy.
    #[serde(default)]
    pub week_boundary: WeekBoundary,
}

/// A jurisdiction on the allow-list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Jurisdiction {
    /// Human-readable name (e.g. "California").
    pub name: String,
    /// The regime applied to workers in this jurisdiction.
    pub regime: Regime,
}

/// Contents of `jurisdictions.yaml`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JurisdictionConfig {
    /// Regime used when a payroll code does not resolve.
    pub default_regime: Regime,
    /// Allow-list keyed by jurisdiction token.
    pub jurisdictions: BTreeMap<String, Jurisdiction>,
}

impl JurisdictionConfig {
    /// Looks up a jurisdiction token, ignoring ASCII case.
    pub fn get(&self, token: &str) -> Option<&Jurisdiction> {
        self.jurisdictions.get(&token.to_ascii_uppercase())
    }

    /// Finds the longest allow-list token that prefixes `code`, ignoring
    /// ASCII case and surrounding whitespace.
    pub fn match_prefix(&self, code: &str) -> Option<(&str, &Jurisdiction)> {
        let code = code.trim().to_ascii_uppercase();
        self.jurisdictions
            .iter()
            .filter(|(token, _)| !token.is_empty() && code.starts_with(&token.to_ascii_uppercase()))
            .max_by_key(|(token, _)| token.len())
            .map(|(token, jurisdiction)| (token.as_str(), jurisdiction))
    }
}

impl Default for JurisdictionConfig {
    fn default() -> Self {
        let jurisdictions = [
            ("CA", "California", Regime::TieredDailyWeekly),
            ("NV", "Nevada", Regime::FlatWeekly),
            ("MI", "Michigan", Regime::FlatWeekly),
        ]
        .into_iter()
        .map(|(token, name, regime)| {
            (
                token.to_string(),
                Jurisdiction {
                    name: name.to_string(),
                    regime,
                },
            )
        })
        .collect();

        Self {
            default_regime: Regime::FlatWeekly,
            jurisdictions,
        }
    }
}

/// The complete rule configuration for a computation run.
///
/// Built either from YAML files via [`ConfigLoader`](super::ConfigLoader) or
/// from [`RuleConfig::default`], which carries the standard 8/12/40 thresholds
/// and the CA/NV/MI allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleConfig {
    thresholds: Thresholds,
    week_boundary: WeekBoundary,
    jurisdictions: JurisdictionConfig,
}

impl RuleConfig {
    /// Creates a new RuleConfig from its component parts.
    ///
    /// Jurisdiction tokens are normalized to upper case.
    pub fn new(
        thresholds: Thresholds,
        week_boundary: WeekBoundary,
        jurisdictions: JurisdictionConfig,
    ) -> Self {
        let normalized = jurisdictions
            .jurisdictions
            .into_iter()
            .map(|(token, jurisdiction)| (token.trim().to_ascii_uppercase(), jurisdiction))
            .collect();
        Self {
            thresholds,
            week_boundary,
            jurisdictions: JurisdictionConfig {
                default_regime: jurisdictions.default_regime,
                jurisdictions: normalized,
            },
        }
    }

    /// Returns a copy of this configuration with a different week boundary.
    pub fn with_week_boundary(mut self, week_boundary: WeekBoundary) -> Self {
        self.week_boundary = week_boundary;
        self
    }

    /// Returns the hour thresholds.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Returns the weekly window policy.
    pub fn week_boundary(&self) -> WeekBoundary {
        self.week_boundary
    }

    /// Returns the jurisdiction allow-list.
    pub fn jurisdictions(&self) -> &JurisdictionConfig {
        &self.jurisdictions
    }

    /// Checks that the thresholds describe a usable rule set.
    pub fn validate(&self) -> EngineResult<()> {
        let t = &self.thresholds;
        for (name, value) in [
            ("daily_overtime_hours", t.daily_overtime_hours),
            ("daily_doubletime_hours", t.daily_doubletime_hours),
            ("weekly_regular_hours", t.weekly_regular_hours),
        ] {
            if value <= Decimal::ZERO {
                return Err(EngineError::InvalidConfig {
                    message: format!("{} must be positive, got {}", name, value),
                });
            }
        }

        if t.daily_doubletime_hours < t.daily_overtime_hours {
            return Err(EngineError::InvalidConfig {
                message: format!(
                    "daily_doubletime_hours ({}) must not be below daily_overtime_hours ({})",
                    t.daily_doubletime_hours, t.daily_overtime_hours
                ),
            });
        }

        if let Some(token) = self
            .jurisdictions
            .jurisdictions
            .keys()
            .find(|token| token.is_empty() || !token.chars().all(|c| c.is_ascii_alphabetic()))
        {
            return Err(EngineError::InvalidConfig {
                message: format!("jurisdiction token '{}' must be ASCII letters", token),
            });
        }

        Ok(())
    }
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self::new(
            Thresholds::default(),
            WeekBoundary::default(),
            JurisdictionConfig::default(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let thresholds = Thresholds::default();
        assert_eq!(thresholds.daily_overtime_hours, Decimal::from(8));
        assert_eq!(thresholds.daily_doubletime_hours, Decimal::from(12));
        assert_eq!(thresholds.weekly_regular_hours, Decimal::from(40));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(RuleConfig::default().validate().is_ok());
        assert_eq!(RuleConfig::default().week_boundary(), WeekBoundary::Period);
    }

    #[test]
    fn test_tokens_normalized_to_upper_case() {
        let mut jurisdictions = JurisdictionConfig::default();
        jurisdictions.jurisdictions.insert(
            "wa".to_string(),
            Jurisdiction {
                name: "Washington".to_string(),
                regime: Regime::FlatWeekly,
            },
        );
        let config = RuleConfig::new(Thresholds::default(), WeekBoundary::Period, jurisdictions);
        assert!(config.jurisdictions().jurisdictions.contains_key("WA"));
        assert_eq!(config.jurisdictions().get("wa").unwrap().name, "Washington");
    }

    #[test]
    fn test_match_prefix_prefers_longest_token() {
        let mut config = JurisdictionConfig::default();
        config.jurisdictions.insert(
            "CALIFORNIA".to_string(),
            Jurisdiction {
                name: "California".to_string(),
                regime: Regime::TieredDailyWeekly,
            },
        );

        let (token, _) = config.match_prefix("californiaHQ").unwrap();
        assert_eq!(token, "CALIFORNIA");
        let (token, _) = config.match_prefix(" cawest01").unwrap();
        assert_eq!(token, "CA");
        assert!(config.match_prefix("TX-1").is_none());
        assert!(config.match_prefix("").is_none());
    }

    #[test]
    fn test_doubletime_below_overtime_rejected() {
        let thresholds = Thresholds {
            daily_overtime_hours: Decimal::from(10),
            daily_doubletime_hours: Decimal::from(8),
            weekly_regular_hours: Decimal::from(40),
        };
        let config = RuleConfig::new(
            thresholds,
            WeekBoundary::Period,
            JurisdictionConfig::default(),
        );
        match config.validate() {
            Err(EngineError::InvalidConfig { message }) => {
                assert!(message.contains("daily_doubletime_hours"));
            }
            other => panic!("Expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_zero_weekly_threshold_rejected() {
        let thresholds = Thresholds {
            weekly_regular_hours: Decimal::ZERO,
            ..Thresholds::default()
        };
        let config = RuleConfig::new(
            thresholds,
            WeekBoundary::Period,
            JurisdictionConfig::default(),
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_week_boundary_deserialization() {
        let period: WeekBoundary = serde_yaml::from_str("mode: period").unwrap();
        assert_eq!(period, WeekBoundary::Period);

        let calendar: WeekBoundary =
            serde_yaml::from_str("mode: calendar_week\nweek_starts_on: sunday").unwrap();
        assert_eq!(
            calendar,
            WeekBoundary::CalendarWeek {
                week_starts_on: Weekday::Sun
            }
        );
    }

    #[test]
    fn test_with_week_boundary() {
        let config = RuleConfig::default().with_week_boundary(WeekBoundary::CalendarWeek {
            week_starts_on: Weekday::Mon,
        });
        assert!(matches!(
            config.week_boundary(),
            WeekBoundary::CalendarWeek { .. }
        ));
    }
}
