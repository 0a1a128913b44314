//! Tiered daily/weekly rule engine (California-style).
//!
//! Each entry is split into daily regular, overtime and double-time hours,
//! then any daily regular hours that would push the worker's weekly regular
//! total past the weekly cap are moved to overtime. The weekly accumulator
//! makes the per-entry result depend on entry order, so entries must arrive
//! sorted ascending by start time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::Thresholds;

use super::aggregate::HoursTotals;

/// How one entry's hours were classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailySplit {
    /// The entry duration.
    pub hours: Decimal,
    /// Regular hours after the weekly transfer.
    pub regular: Decimal,
    /// Daily overtime plus any weekly overflow.
    pub overtime: Decimal,
    /// Hours past the daily double-time threshold.
    pub doubletime: Decimal,
    /// The part of `overtime` moved over from daily regular by the weekly cap.
    pub weekly_overflow: Decimal,
}

/// State threaded through the fold over one worker's entries for one week.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredState {
    /// Hours already classified as regular in the current week.
    pub weekly_regular_accumulator: Decimal,
    /// Running totals.
    pub totals: HoursTotals,
}

impl TieredState {
    /// Classifies one entry and returns the advanced state with the split.
    ///
    /// # Examples
    ///
    /// ```
    /// use overtime_engine::calculation::TieredState;
    /// use overtime_engine::config::Thresholds;
    /// use rust_decimal::Decimal;
    ///
    /// let state = TieredState::default();
    /// let (state, split) = state.apply_entry(Decimal::new(1300, 2), &Thresholds::default());
    ///
    /// assert_eq!(split.regular, Decimal::from(8));
    /// assert_eq!(split.overtime, Decimal::from(4));
    /// assert_eq!(split.doubletime, Decimal::from(1));
    /// assert_eq!(state.weekly_regular_accumulator, Decimal::from(8));
    /// ```
    pub fn apply_entry(self, hours: Decimal, thresholds: &Thresholds) -> (Self, DailySplit) {
        // Daily double-time split
        let (doubletime, remaining) = if hours > thresholds.daily_doubletime_hours {
            (
                hours - thresholds.daily_doubletime_hours,
                thresholds.daily_doubletime_hours,
            )
        } else {
            (Decimal::ZERO, hours)
        };

        // Daily overtime split
        let (mut regular, mut overtime) = if remaining > thresholds.daily_overtime_hours {
            (
                thresholds.daily_overtime_hours,
                remaining - thresholds.daily_overtime_hours,
            )
        } else {
            (remaining, Decimal::ZERO)
        };

        // Weekly transfer is measured on daily regular hours, not raw hours
        let mut weekly_overflow = Decimal::ZERO;
        if self.weekly_regular_accumulator + regular > thresholds.weekly_regular_hours {
            let space = (thresholds.weekly_regular_hours - self.weekly_regular_accumulator)
                .max(Decimal::ZERO);
            weekly_overflow = regular - space;
            regular = space;
            overtime += weekly_overflow;
        }

        let split = DailySplit {
            hours,
            regular,
            overtime,
            doubletime,
            weekly_overflow,
        };

        let next = TieredState {
            weekly_regular_accumulator: self.weekly_regular_accumulator + regular,
            totals: self.totals
                + HoursTotals {
                    regular,
                    overtime,
                    doubletime,
                    total: hours,
                },
        };

        (next, split)
    }
}

/// The result of running the tiered engine over one week of entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TieredOutcome {
    /// Totals for the week.
    pub totals: HoursTotals,
    /// Per-entry classification, in input order.
    pub splits: Vec<DailySplit>,
}

/// Runs the tiered engine over one week of entry durations.
///
/// `hours` must be in chronological order. The weekly accumulator starts at
/// zero.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::calculate_tiered;
/// use overtime_engine::config::Thresholds;
/// use rust_decimal::Decimal;
///
/// let week = vec![Decimal::from(9); 5];
/// let outcome = calculate_tiered(&week, &Thresholds::default());
///
/// assert_eq!(outcome.totals.regular, Decimal::from(40));
/// assert_eq!(outcome.totals.overtime, Decimal::from(5));
/// assert_eq!(outcome.totals.doubletime, Decimal::ZERO);
/// assert_eq!(outcome.totals.total, Decimal::from(45));
/// ```
pub fn calculate_tiered(hours: &[Decimal], thresholds: &Thresholds) -> TieredOutcome {
    let (state, splits) = hours.iter().fold(
        (TieredState::default(), Vec::with_capacity(hours.len())),
        |(state, mut splits), &entry_hours| {
            let (next, split) = state.apply_entry(entry_hours, thresholds);
            splits.push(split);
            (next, splits)
        },
    );

    TieredOutcome {
        totals: state.totals,
        splits,
    }
}
