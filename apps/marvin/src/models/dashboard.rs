//! Dashboard aggregate types. Built by `aggregate::aggregate`, never persisted.

use super::CheckResult;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
/// Rollup of every recorded run of one checker.
pub struct CheckerStats {
    pub name: String,
    pub total_runs: usize,
    pub latest_run: DateTime<FixedOffset>,
    pub total_issues: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Aggregate root driving the dashboard.
///
/// `checkers` and `latest_results` are built from the same grouping pass and
/// always carry the same set of checker names.
pub struct DashboardData {
    pub checkers: Vec<CheckerStats>,
    pub total_checks: usize,
    pub latest_results: BTreeMap<String, CheckResult>,
    pub all_results: Vec<CheckResult>,
}
