//! End-to-end hours computation for a batch of workers.
//!
//! Validates entries, groups them per worker in chronological order, resolves
//! each worker's regime once, dispatches to the matching rule engine per
//! weekly window, and finalizes the summaries. Per-entry and per-worker
//! problems become warnings; only an invariant violation aborts the run.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rust_decimal::Decimal;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

use crate::config::{RuleConfig, Thresholds};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    ComputationWarning, HoursReport, HoursSummary, Regime, TimeEntry, WarningCode, Worker,
    WorkerRegimeAssignment,
};

use super::aggregate::{HoursTotals, finalize_summary};
use super::flat_weekly::calculate_flat_weekly;
use super::jurisdiction::resolve_regime;
use super::tiered::calculate_tiered;
use super::week_boundary::{WorkedInterval, split_into_weeks};

/// One worker's owned, sorted input. Batches share nothing, so they can be
/// computed on any thread.
#[derive(Debug, Clone)]
struct WorkerBatch {
    assignment: WorkerRegimeAssignment,
    display_name: Option<String>,
    intervals: Vec<WorkedInterval>,
}

#[derive(Debug, Default)]
struct ComputationPlan {
    batches: Vec<WorkerBatch>,
    warnings: Vec<ComputationWarning>,
}

/// Applies a regime's rule engine to one weekly window.
///
/// `week` must be sorted ascending by start.
pub fn apply_regime(regime: Regime, week: &[WorkedInterval], thresholds: &Thresholds) -> HoursTotals {
    let hours: Vec<Decimal> = week.iter().map(|interval| interval.hours).collect();
    match regime {
        Regime::TieredDailyWeekly => calculate_tiered(&hours, thresholds).totals,
        Regime::FlatWeekly => calculate_flat_weekly(&hours, thresholds),
    }
}

/// Computes one worker's summary from intervals sorted ascending by start.
///
/// Returns `Ok(None)` for a worker with zero hours.
///
/// # Errors
///
/// Returns [`EngineError::ComputationInvariantViolation`] if the rounded
/// buckets do not add up to the rounded total.
pub fn compute_worker_summary(
    assignment: &WorkerRegimeAssignment,
    display_name: Option<&str>,
    intervals: &[WorkedInterval],
    config: &RuleConfig,
) -> EngineResult<Option<HoursSummary>> {
    let totals: HoursTotals = split_into_weeks(intervals, config.week_boundary())
        .into_iter()
        .map(|week| apply_regime(assignment.regime, week, config.thresholds()))
        .sum();

    let summary = finalize_summary(assignment, display_name, totals)?;

    if let Some(summary) = &summary {
        debug!(
            worker_id = %summary.worker_id,
            regime = %summary.regime,
            regular = %summary.regular_hours,
            overtime = %summary.overtime_hours,
            doubletime = %summary.doubletime_hours,
            total = %summary.total_hours,
            "Computed worker hours"
        );
    }

    Ok(summary)
}

fn compute_batch(batch: &WorkerBatch, config: &RuleConfig) -> EngineResult<Option<HoursSummary>> {
    compute_worker_summary(
        &batch.assignment,
        batch.display_name.as_deref(),
        &batch.intervals,
        config,
    )
}

/// Computes regular, overtime and double-time hours for every worker.
///
/// `workers` is the worker directory; entries whose worker is missing from it
/// are computed under the default regime and flagged. Entries may arrive in
/// any order; each worker's entries are sorted by start before classification.
///
/// # Returns
///
/// An [`HoursReport`] with one summary per worker with nonzero hours, ordered
/// by worker id, plus warnings for dropped entries, inferred regimes, and
/// empty input. Calling this twice with the same input yields identical
/// reports.
///
/// # Errors
///
/// Returns [`EngineError::ComputationInvariantViolation`] if any worker's
/// rounded buckets fail to add up to the total. No report is produced.
///
/// # Examples
///
/// ```
/// use overtime_engine::calculation::compute_hours;
/// use overtime_engine::config::RuleConfig;
/// use overtime_engine::models::{TimeEntry, Worker};
/// use chrono::{TimeZone, Utc};
/// use rust_decimal::Decimal;
///
/// let entries: Vec<TimeEntry> = (12..=16)
///     .map(|day| TimeEntry {
///         id: None,
///         worker_id: "w_001".to_string(),
///         start: Utc.with_ymd_and_hms(2026, 1, day, 8, 0, 0).unwrap(),
///         end: Utc.with_ymd_and_hms(2026, 1, day, 17, 0, 0).unwrap(),
///     })
///     .collect();
/// let workers = vec![Worker {
///     id: "w_001".to_string(),
///     display_name: None,
///     payroll_code: Some("CA-main".to_string()),
/// }];
///
/// let report = compute_hours(&entries, &workers, &RuleConfig::default()).unwrap();
/// let summary = report.summary_for("w_001").unwrap();
/// assert_eq!(summary.regular_hours, Decimal::from(40));
/// assert_eq!(summary.overtime_hours, Decimal::from(5));
/// assert_eq!(summary.total_hours, Decimal::from(45));
/// ```
pub fn compute_hours(
    entries: &[TimeEntry],
    workers: &[Worker],
    config: &RuleConfig,
) -> EngineResult<HoursReport> {
    let plan = plan_computation(entries, workers, config);

    let mut summaries = Vec::with_capacity(plan.batches.len());
    for batch in &plan.batches {
        if let Some(summary) = compute_batch(batch, config)? {
            summaries.push(summary);
        }
    }

    Ok(HoursReport {
        summaries,
        warnings: plan.warnings,
    })
}

/// Same as [`compute_hours`], but fans each worker out to a blocking task.
///
/// Each worker's sorted entries are processed sequentially inside one task;
/// workers run in parallel. Results are gathered and re-sorted, so the report
/// is identical to the one [`compute_hours`] returns.
///
/// # Errors
///
/// Returns [`EngineError::ComputationInvariantViolation`] as
/// [`compute_hours`] does, or [`EngineError::CalculationError`] if a worker
/// task panics.
pub async fn compute_hours_concurrent(
    entries: &[TimeEntry],
    workers: &[Worker],
    config: Arc<RuleConfig>,
) -> EngineResult<HoursReport> {
    let plan = plan_computation(entries, workers, &config);
    let summaries = gather_batches(plan.batches, config, compute_batch).await?;

    Ok(HoursReport {
        summaries,
        warnings: plan.warnings,
    })
}

type BatchFn = fn(&WorkerBatch, &RuleConfig) -> EngineResult<Option<HoursSummary>>;

/// Runs `compute` for every batch on the blocking pool and collects the
/// summaries sorted by worker id. The first failure is returned and the
/// remaining tasks are dropped with the set.
async fn gather_batches(
    batches: Vec<WorkerBatch>,
    config: Arc<RuleConfig>,
    compute: BatchFn,
) -> EngineResult<Vec<HoursSummary>> {
    let mut tasks = JoinSet::new();
    for batch in batches {
        let config = Arc::clone(&config);
        tasks.spawn_blocking(move || compute(&batch, &config));
    }

    let mut summaries = Vec::with_capacity(tasks.len());
    while let Some(joined) = tasks.join_next().await {
        let result = joined.map_err(|err| EngineError::CalculationError {
            message: format!("worker task failed: {}", err),
        })?;
        if let Some(summary) = result? {
            summaries.push(summary);
        }
    }
    summaries.sort_by(|a, b| a.worker_id.cmp(&b.worker_id));

    Ok(summaries)
}

/// Validates entries, groups them per worker and resolves regimes.
fn plan_computation(
    entries: &[TimeEntry],
    workers: &[Worker],
    config: &RuleConfig,
) -> ComputationPlan {
    let mut warnings = Vec::new();
    let mut grouped: BTreeMap<&str, Vec<WorkedInterval>> = BTreeMap::new();

    for entry in entries {
        if entry.worker_id.trim().is_empty() {
            let err = EngineError::MissingWorkerId {
                entry_id: entry.label().to_string(),
            };
            warn!(entry_id = %entry.label(), "Dropping time entry without worker id");
            warnings.push(ComputationWarning {
                code: WarningCode::MissingWorkerId,
                worker_id: None,
                entry_id: entry.id.clone(),
                message: err.to_string(),
            });
            continue;
        }

        match entry.duration_hours() {
            Ok(hours) => grouped
                .entry(entry.worker_id.as_str())
                .or_default()
                .push(WorkedInterval {
                    entry_id: entry.id.clone(),
                    start: entry.start,
                    hours,
                }),
            Err(err) => {
                warn!(
                    worker_id = %entry.worker_id,
                    entry_id = %entry.label(),
                    error = %err,
                    "Dropping invalid time entry"
                );
                warnings.push(ComputationWarning {
                    code: WarningCode::InvalidInterval,
                    worker_id: Some(entry.worker_id.clone()),
                    entry_id: entry.id.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    if grouped.is_empty() {
        info!(entries = entries.len(), "No eligible time entries in period");
        warnings.push(ComputationWarning {
            code: WarningCode::EmptyInput,
            worker_id: None,
            entry_id: None,
            message: "no eligible time entries for the requested period".to_string(),
        });
        return ComputationPlan {
            batches: Vec::new(),
            warnings,
        };
    }

    // First directory record wins for duplicate ids.
    let mut directory: HashMap<&str, &Worker> = HashMap::with_capacity(workers.len());
    for worker in workers {
        directory.entry(worker.id.as_str()).or_insert(worker);
    }

    let batches = grouped
        .into_iter()
        .map(|(worker_id, mut intervals)| {
            intervals.sort_by(|a, b| a.start.cmp(&b.start));

            let worker = directory.get(worker_id);
            let code = worker.and_then(|w| w.payroll_code.as_deref());
            let resolution = resolve_regime(code, config.jurisdictions());

            if resolution.inferred {
                let err = EngineError::UnresolvedJurisdiction {
                    worker_id: worker_id.to_string(),
                    code: code.map(str::to_string),
                };
                warn!(
                    worker_id = %worker_id,
                    code = ?code,
                    in_directory = worker.is_some(),
                    default_regime = %resolution.regime,
                    "Jurisdiction not resolved, using default regime"
                );
                warnings.push(ComputationWarning {
                    code: WarningCode::UnresolvedJurisdiction,
                    worker_id: Some(worker_id.to_string()),
                    entry_id: None,
                    message: err.to_string(),
                });
            }

            WorkerBatch {
                assignment: WorkerRegimeAssignment::new(worker_id, &resolution),
                display_name: worker.and_then(|w| w.display_name.clone()),
                intervals,
            }
        })
        .collect();

    ComputationPlan { batches, warnings }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeekBoundary;
    use chrono::{DateTime, Duration, TimeZone, Utc, Weekday};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, day, hour, 0, 0).unwrap()
    }

    /// An entry starting at 08:00 on 2026-01-`day` lasting `seconds`.
    fn entry(id: &str, worker_id: &str, day: u32, seconds: i64) -> TimeEntry {
        let start = at(day, 8);
        TimeEntry {
            id: Some(id.to_string()),
            worker_id: worker_id.to_string(),
            start,
            end: start + Duration::seconds(seconds),
        }
    }

    fn hours(h: i64) -> i64 {
        h * 3600
    }

    fn worker(id: &str, code: Option<&str>) -> Worker {
        Worker {
            id: id.to_string(),
            display_name: Some(format!("Worker {}", id)),
            payroll_code: code.map(str::to_string),
        }
    }

    fn compute(entries: &[TimeEntry], workers: &[Worker]) -> HoursReport {
        compute_hours(entries, workers, &RuleConfig::default()).unwrap()
    }

    #[test]
    fn test_single_8_hour_entry_tiered() {
        let report = compute(&[entry("e1", "w1", 12, hours(8))], &[worker("w1", Some("CA"))]);
        let summary = report.summary_for("w1").unwrap();
        assert_eq!(summary.regular_hours, dec("8"));
        assert_eq!(summary.overtime_hours, dec("0"));
        assert_eq!(summary.doubletime_hours, dec("0"));
        assert_eq!(summary.total_hours, dec("8"));
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn test_single_8_01_hour_entry_tiered() {
        let report = compute(
            &[entry("e1", "w1", 12, hours(8) + 36)],
            &[worker("w1", Some("CA"))],
        );
        let summary = report.summary_for("w1").unwrap();
        assert_eq!(summary.regular_hours, dec("8"));
        assert_eq!(summary.overtime_hours, dec("0.01"));
        assert_eq!(summary.doubletime_hours, dec("0"));
    }

    #[test]
    fn test_12_50_hour_entry_tiered() {
        let report = compute(
            &[entry("e1", "w1", 12, hours(12) + 1800)],
            &[worker("w1", Some("CA"))],
        );
        let summary = report.summary_for("w1").unwrap();
        assert_eq!(summary.regular_hours, dec("8"));
        assert_eq!(summary.overtime_hours, dec("4"));
        assert_eq!(summary.doubletime_hours, dec("0.5"));
        assert_eq!(summary.total_hours, dec("12.5"));
    }

    #[test]
    fn test_flat_weekly_never_has_doubletime() {
        let entries = vec![
            entry("e1", "w1", 12, hours(14)),
            entry("e2", "w1", 13, hours(14)),
            entry("e3", "w1", 14, hours(14)),
        ];
        let report = compute(&entries, &[worker("w1", Some("NV-reno"))]);
        let summary = report.summary_for("w1").unwrap();
        assert_eq!(summary.regime, Regime::FlatWeekly);
        assert_eq!(summary.regular_hours, dec("40"));
        assert_eq!(summary.overtime_hours, dec("2"));
        assert_eq!(summary.doubletime_hours, dec("0"));
    }

    #[test]
    fn test_unsorted_entries_are_sorted_before_classification() {
        // Chronologically: 10, 10, 10, 10, 4, 8.
        let sorted = vec![
            entry("e1", "w1", 12, hours(10)),
            entry("e2", "w1", 13, hours(10)),
            entry("e3", "w1", 14, hours(10)),
            entry("e4", "w1", 15, hours(10)),
            entry("e5", "w1", 16, hours(4)),
            entry("e6", "w1", 17, hours(8)),
        ];
        let mut shuffled = sorted.clone();
        shuffled.reverse();
        shuffled.swap(1, 4);

        let workers = [worker("w1", Some("CA"))];
        assert_eq!(compute(&sorted, &workers), compute(&shuffled, &workers));
    }

    #[test]
    fn test_invalid_interval_dropped_without_affecting_others() {
        let mut bad = entry("bad", "w2", 12, hours(8));
        std::mem::swap(&mut bad.start, &mut bad.end);

        let entries = vec![
            entry("e1", "w1", 12, hours(9)),
            bad,
            entry("e2", "w2", 13, hours(6)),
        ];
        let workers = [worker("w1", Some("CA")), worker("w2", Some("CA"))];
        let report = compute(&entries, &workers);

        assert_eq!(report.summary_for("w1").unwrap().total_hours, dec("9"));
        assert_eq!(report.summary_for("w2").unwrap().total_hours, dec("6"));
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code, WarningCode::InvalidInterval);
        assert_eq!(report.warnings[0].worker_id.as_deref(), Some("w2"));
        assert_eq!(report.warnings[0].entry_id.as_deref(), Some("bad"));
    }

    #[test]
    fn test_zero_length_entry_is_invalid() {
        let report = compute(&[entry("e1", "w1", 12, 0)], &[worker("w1", Some("CA"))]);
        assert!(report.summaries.is_empty());
        assert!(report.has_warning(WarningCode::InvalidInterval));
        assert!(report.has_warning(WarningCode::EmptyInput));
    }

    #[test]
    fn test_missing_worker_id_dropped() {
        let entries = vec![entry("e1", "  ", 12, hours(8)), entry("e2", "w1", 12, hours(8))];
        let report = compute(&entries, &[worker("w1", Some("CA"))]);
        assert_eq!(report.summaries.len(), 1);
        assert_eq!(report.warnings[0].code, WarningCode::MissingWorkerId);
        assert_eq!(report.warnings[0].entry_id.as_deref(), Some("e1"));
    }

    #[test]
    fn test_directory_worker_without_entries_is_excluded() {
        let workers = [worker("w1", Some("CA")), worker("idle", Some("CA"))];
        let report = compute(&[entry("e1", "w1", 12, hours(8))], &workers);
        assert_eq!(report.summaries.len(), 1);
        assert!(report.summary_for("idle").is_none());
    }

    #[test]
    fn test_sub_cent_entry_worker_is_excluded() {
        // 10 seconds rounds to 0.00 hours
        let report = compute(&[entry("e1", "w1", 12, 10)], &[worker("w1", Some("CA"))]);
        assert!(report.summaries.is_empty());
        assert!(!report.has_warning(WarningCode::EmptyInput));
    }

    #[test]
    fn test_empty_input_yields_empty_report_with_warning() {
        let report = compute(&[], &[worker("w1", Some("CA"))]);
        assert!(report.summaries.is_empty());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].code, WarningCode::EmptyInput);
    }

    #[test]
    fn test_unknown_code_flagged_and_defaulted() {
        let entries = vec![entry("e1", "w1", 12, hours(13))];
        let report = compute(&entries, &[worker("w1", Some("TX-dallas"))]);
        let summary = report.summary_for("w1").unwrap();
        assert_eq!(summary.regime, Regime::FlatWeekly);
        assert!(summary.regime_inferred);
        assert_eq!(summary.regular_hours, dec("13"));
        assert_eq!(summary.doubletime_hours, dec("0"));
        assert_eq!(report.warnings[0].code, WarningCode::UnresolvedJurisdiction);
        assert!(report.warnings[0].message.contains("TX-dallas"));
    }

    #[test]
    fn test_worker_missing_from_directory_flagged() {
        let report = compute(&[entry("e1", "ghost", 12, hours(8))], &[]);
        let summary = report.summary_for("ghost").unwrap();
        assert!(summary.regime_inferred);
        assert_eq!(summary.display_name, None);
        assert!(report.has_warning(WarningCode::UnresolvedJurisdiction));
    }

    #[test]
    fn test_summaries_ordered_by_worker_id_with_display_names() {
        let entries = vec![
            entry("e1", "w3", 12, hours(8)),
            entry("e2", "w1", 12, hours(8)),
            entry("e3", "w2", 12, hours(8)),
        ];
        let workers = [
            worker("w1", Some("CA")),
            worker("w2", Some("NV")),
            worker("w3", Some("MI")),
        ];
        let report = compute(&entries, &workers);
        let ids: Vec<&str> = report.summaries.iter().map(|s| s.worker_id.as_str()).collect();
        assert_eq!(ids, vec!["w1", "w2", "w3"]);
        assert_eq!(report.summaries[0].display_name.as_deref(), Some("Worker w1"));
        assert_eq!(report.summaries[0].regime, Regime::TieredDailyWeekly);
        assert_eq!(report.summaries[1].regime, Regime::FlatWeekly);
    }

    #[test]
    fn test_duplicate_directory_records_first_wins() {
        let workers = [worker("w1", Some("CA")), worker("w1", Some("NV"))];
        let report = compute(&[entry("e1", "w1", 12, hours(8))], &workers);
        assert_eq!(
            report.summary_for("w1").unwrap().regime,
            Regime::TieredDailyWeekly
        );
    }

    #[test]
    fn test_period_window_never_resets() {
        // Mon 12th through Mon 19th, seven 8-hour days.
        let entries: Vec<_> = [12, 13, 14, 15, 16, 17, 19]
            .iter()
            .map(|&d| entry(&format!("e{}", d), "w1", d, hours(8)))
            .collect();
        let report = compute(&entries, &[worker("w1", Some("CA"))]);
        let summary = report.summary_for("w1").unwrap();
        assert_eq!(summary.regular_hours, dec("40"));
        assert_eq!(summary.overtime_hours, dec("16"));
    }

    #[test]
    fn test_calendar_week_resets_accumulator() {
        let entries: Vec<_> = [12, 13, 14, 15, 16, 17, 19]
            .iter()
            .map(|&d| entry(&format!("e{}", d), "w1", d, hours(8)))
            .collect();
        let config = RuleConfig::default().with_week_boundary(WeekBoundary::CalendarWeek {
            week_starts_on: Weekday::Mon,
        });
        let report = compute_hours(&entries, &[worker("w1", Some("CA"))], &config).unwrap();
        let summary = report.summary_for("w1").unwrap();
        assert_eq!(summary.regular_hours, dec("48"));
        assert_eq!(summary.overtime_hours, dec("8"));
        assert_eq!(summary.total_hours, dec("56"));
    }

    #[test]
    fn test_calendar_week_flat_threshold_per_week() {
        let entries: Vec<_> = [12, 13, 14, 15, 16, 19, 20, 21, 22, 23]
            .iter()
            .map(|&d| entry(&format!("e{}", d), "w1", d, hours(9)))
            .collect();
        let config = RuleConfig::default().with_week_boundary(WeekBoundary::CalendarWeek {
            week_starts_on: Weekday::Mon,
        });
        let report = compute_hours(&entries, &[worker("w1", Some("NV"))], &config).unwrap();
        let summary = report.summary_for("w1").unwrap();
        assert_eq!(summary.regular_hours, dec("80"));
        assert_eq!(summary.overtime_hours, dec("10"));
    }

    #[test]
    fn test_identical_input_identical_output() {
        let entries = vec![
            entry("e1", "w1", 12, hours(9) + 1234),
            entry("e2", "w2", 12, hours(13) + 17),
            entry("e3", "w1", 13, hours(11) + 599),
        ];
        let workers = [worker("w1", Some("CA")), worker("w2", None)];
        let first = serde_json::to_string(&compute(&entries, &workers)).unwrap();
        let second = serde_json::to_string(&compute(&entries, &workers)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_all_summaries_balanced() {
        let entries: Vec<_> = (12..=25)
            .map(|d| entry(&format!("e{}", d), "w1", d, hours(7) + i64::from(d) * 617))
            .collect();
        let report = compute(&entries, &[worker("w1", Some("CA"))]);
        assert!(report.summaries.iter().all(HoursSummary::is_balanced));
    }

    #[test]
    fn test_apply_regime_dispatch() {
        let week = vec![WorkedInterval {
            entry_id: None,
            start: at(12, 8),
            hours: dec("13"),
        }];
        let thresholds = Thresholds::default();

        let tiered = apply_regime(Regime::TieredDailyWeekly, &week, &thresholds);
        assert_eq!(tiered.doubletime, dec("1"));

        let flat = apply_regime(Regime::FlatWeekly, &week, &thresholds);
        assert_eq!(flat.doubletime, dec("0"));
        assert_eq!(flat.regular, dec("13"));
    }

    #[tokio::test]
    async fn test_concurrent_matches_sequential() {
        let mut entries = Vec::new();
        for w in 0..20 {
            for d in 12..=18 {
                let seconds = hours(6) + i64::from(w * 997 + d * 131) % hours(8);
                entries.push(entry(&format!("e{}_{}", w, d), &format!("w{:02}", w), d, seconds));
            }
        }
        let workers: Vec<Worker> = (0..20)
            .map(|w| {
                let code = match w % 3 {
                    0 => Some("CA-01"),
                    1 => Some("NV-02"),
                    _ => None,
                };
                worker(&format!("w{:02}", w), code)
            })
            .collect();
        let config = RuleConfig::default();

        let sequential = compute_hours(&entries, &workers, &config).unwrap();
        let concurrent = compute_hours_concurrent(&entries, &workers, Arc::new(config))
            .await
            .unwrap();

        assert_eq!(sequential, concurrent);
        assert_eq!(concurrent.summaries.len(), 20);
    }

    fn three_worker_batches(config: &RuleConfig) -> Vec<WorkerBatch> {
        let entries = [
            entry("e1", "w1", 12, hours(8)),
            entry("e2", "w2", 12, hours(9)),
            entry("e3", "w3", 12, hours(10)),
        ];
        let workers = [
            worker("w1", Some("CA")),
            worker("w2", Some("CA")),
            worker("w3", Some("NV")),
        ];
        plan_computation(&entries, &workers, config).batches
    }

    fn fail_for_w2(batch: &WorkerBatch, config: &RuleConfig) -> EngineResult<Option<HoursSummary>> {
        if batch.assignment.worker_id == "w2" {
            return Err(EngineError::ComputationInvariantViolation {
                worker_id: "w2".to_string(),
                regular: dec("8"),
                overtime: dec("1"),
                doubletime: dec("0"),
                total: dec("10"),
            });
        }
        compute_batch(batch, config)
    }

    fn panic_for_w3(batch: &WorkerBatch, config: &RuleConfig) -> EngineResult<Option<HoursSummary>> {
        if batch.assignment.worker_id == "w3" {
            panic!("batch for w3 blew up");
        }
        compute_batch(batch, config)
    }

    #[tokio::test]
    async fn test_gather_collects_sorted_summaries() {
        let config = Arc::new(RuleConfig::default());
        let batches = three_worker_batches(&config);

        let summaries = gather_batches(batches, config, compute_batch).await.unwrap();
        let ids: Vec<&str> = summaries.iter().map(|s| s.worker_id.as_str()).collect();
        assert_eq!(ids, vec!["w1", "w2", "w3"]);
    }

    #[tokio::test]
    async fn test_gather_propagates_batch_error() {
        let config = Arc::new(RuleConfig::default());
        let batches = three_worker_batches(&config);

        match gather_batches(batches, config, fail_for_w2).await {
            Err(EngineError::ComputationInvariantViolation { worker_id, .. }) => {
                assert_eq!(worker_id, "w2");
            }
            other => panic!("Expected ComputationInvariantViolation, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_gather_maps_panicked_task_to_calculation_error() {
        let config = Arc::new(RuleConfig::default());
        let batches = three_worker_batches(&config);

        match gather_batches(batches, config, panic_for_w3).await {
            Err(EngineError::CalculationError { message }) => {
                assert!(message.starts_with("worker task failed"), "got: {}", message);
            }
            other => panic!("Expected CalculationError, got {:?}", other),
        }
    }
}
