//! Flat weekly rule engine (Nevada/Michigan-style).
//!
//! Only the weekly total matters: hours up to the weekly threshold are
//! regular, the rest overtime. No daily tiers and no double-time, so the
//! result does not depend on entry order.

use rust_decimal::Decimal;

use crate::config::Thresholds;

use super::aggregate::HoursTotals;

/// Runs the flat weekly engine over one week of entry durations.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::calculate_flat_weekly;
/// use overtime_engine::config::Thresholds;
/// use rust_decimal::Decimal;
///
/// let week = vec![Decimal::from(14); 3];
/// let totals = calculate_flat_weekly(&week, &Thresholds::default());
///
/// assert_eq!(totals.regular, Decimal::from(40));
/// assert_eq!(totals.overtime, Decimal::from(2));
/// assert_eq!(totals.doubletime, Decimal::ZERO);
/// ```
pub fn calculate_flat_weekly(hours: &[Decimal], thresholds: &Thresholds) -> HoursTotals {
    let total: Decimal = hours.iter().copied().sum();
    let cap = thresholds.weekly_regular_hours;

    let (regular, overtime) = if total > cap {
        (cap, total - cap)
    } else {
        (total, Decimal::ZERO)
    };

    HoursTotals {
        regular,
        overtime,
        doubletime: Decimal::ZERO,
        total,
    }
}
