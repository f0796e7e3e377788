//! Result aggregation for the dashboard.
//!
//! `aggregate` is a pure function of its input: it groups runs by checker,
//! rolls up counters over every run, and picks one latest run per checker.
//!
//! Latest selection orders runs by timestamp instant. Runs with the exact same
//! instant are ordered by their canonical JSON encoding (object keys sorted),
//! and the greatest one wins, so the outcome never depends on input order.

use crate::models::{CheckResult, CheckerStats, DashboardData, Summary};
use chrono::{DateTime, FixedOffset};
use serde_json::Value as Json;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

/// Build the dashboard aggregate from a flat, unordered set of runs.
pub fn aggregate(results: Vec<CheckResult>) -> DashboardData {
    let mut groups: HashMap<&str, Vec<&CheckResult>> = HashMap::new();
    for r in &results {
        groups.entry(r.checker.as_str()).or_default().push(r);
    }

    let mut checkers: Vec<CheckerStats> = Vec::with_capacity(groups.len());
    let mut latest_results: BTreeMap<String, CheckResult> = BTreeMap::new();
    for (name, runs) in &groups {
        let latest = match runs.iter().copied().max_by(|a, b| cmp_recency(a, b)) {
            Some(r) => r,
            None => continue,
        };
        let mut stats = CheckerStats {
            name: name.to_string(),
            total_runs: runs.len(),
            latest_run: latest.timestamp,
            total_issues: 0,
            error_count: 0,
            warning_count: 0,
            info_count: 0,
        };
        for r in runs {
            stats.total_issues = stats.total_issues.saturating_add(r.summary.total_issues);
            stats.error_count = stats.error_count.saturating_add(r.summary.error_count);
            stats.warning_count = stats.warning_count.saturating_add(r.summary.warning_count);
            stats.info_count = stats.info_count.saturating_add(r.summary.info_count);
        }
        checkers.push(stats);
        latest_results.insert(name.to_string(), latest.clone());
    }
    drop(groups);

    checkers.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name))
    });

    DashboardData {
        checkers,
        total_checks: results.len(),
        latest_results,
        all_results: results,
    }
}

/// Total order used to pick the latest run of a checker.
fn cmp_recency(a: &CheckResult, b: &CheckResult) -> Ordering {
    a.timestamp
        .cmp(&b.timestamp)
        .then_with(|| canonical_key(a).cmp(&canonical_key(b)))
}

fn canonical_key(r: &CheckResult) -> String {
    let mut v = serde_json::to_value(r).unwrap_or_default();
    sort_object_keys(&mut v);
    v.to_string()
}

fn sort_object_keys(v: &mut Json) {
    match v {
        Json::Object(map) => {
            let mut entries: Vec<(String, Json)> = std::mem::take(map).into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            for (k, mut val) in entries {
                sort_object_keys(&mut val);
                map.insert(k, val);
            }
        }
        Json::Array(items) => items.iter_mut().for_each(sort_object_keys),
        _ => {}
    }
}

impl DashboardData {
    /// Sum of the latest run's summary of every checker.
    pub fn overall_summary(&self) -> Summary {
        let mut s = Summary::default();
        for r in self.latest_results.values() {
            s.accumulate(&r.summary);
        }
        s
    }

    /// Most recent timestamp across all latest runs; `None` when nothing ran.
    pub fn latest_check_time(&self) -> Option<DateTime<FixedOffset>> {
        self.latest_results.values().map(|r| r.timestamp).max()
    }

    pub fn latest_result(&self, checker: &str) -> Option<&CheckResult> {
        self.latest_results.get(checker)
    }

    /// Checker names in display order.
    pub fn checker_names(&self) -> Vec<&str> {
        self.checkers.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.total_checks == 0
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::models::{Issue, Severity};
    use chrono::{Duration, TimeZone, Utc};
    use serde_json::json;
    use std::collections::HashSet;

    pub(crate) fn at(minutes: i64) -> DateTime<FixedOffset> {
        (Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes))
            .fixed_offset()
    }

    pub(crate) fn run(checker: &str, ts: DateTime<FixedOffset>, counts: (usize, usize, usize)) -> CheckResult {
        let (errors, warnings, infos) = counts;
        let mut issues = Vec::new();
        for (n, sev) in [(errors, Severity::Error), (warnings, Severity::Warning), (infos, Severity::Info)] {
            for i in 0..n {
                issues.push(Issue {
                    file: format!("docs/{}.md", i),
                    line: i + 1,
                    column: 1,
                    severity: sev,
                    message: "finding".into(),
                    rule: "rule".into(),
                    context: None,
                });
            }
        }
        CheckResult {
            checker: checker.into(),
            timestamp: ts,
            path: "docs/".into(),
            summary: Summary::from_issues(2, if issues.is_empty() { 0 } else { 1 }, &issues),
            issues,
            metadata: serde_json::Map::new(),
        }
    }

    fn assert_invariant(d: &DashboardData) {
        let names: HashSet<&str> = d.checkers.iter().map(|c| c.name.as_str()).collect();
        let keys: HashSet<&str> = d.latest_results.keys().map(String::as_str).collect();
        assert_eq!(names, keys);
        assert_eq!(names.len(), d.checkers.len());
    }

    #[test]
    fn test_empty_input_is_idempotent() {
        let first = aggregate(Vec::new());
        for _ in 0..3 {
            let again = aggregate(Vec::new());
            assert_eq!(again, first);
        }
        assert_eq!(first.total_checks, 0);
        assert!(first.checkers.is_empty());
        assert!(first.latest_results.is_empty());
        assert!(first.all_results.is_empty());
        assert_eq!(first.latest_check_time(), None);
        assert_eq!(first.overall_summary(), Summary::default());
    }

    #[test]
    fn test_vale_and_markdownlint_history() {
        let a = run("vale", at(0), (1, 2, 0));
        let b = run("vale", at(10), (0, 0, 0));
        let c = run("markdownlint", at(5), (0, 5, 0));
        let d = aggregate(vec![a, c, b.clone()]);

        assert_eq!(d.total_checks, 3);
        assert_eq!(d.checker_names(), vec!["markdownlint", "vale"]);
        let md = &d.checkers[0];
        assert_eq!((md.total_runs, md.total_issues, md.warning_count), (1, 5, 5));
        let vale = &d.checkers[1];
        assert_eq!(vale.total_runs, 2);
        assert_eq!(vale.total_issues, 3);
        assert_eq!(vale.error_count, 1);
        assert_eq!(vale.latest_run, at(10));
        assert_eq!(d.latest_result("vale"), Some(&b));
        assert_eq!(d.latest_result("vale").unwrap().summary.total_issues, 0);
        assert_invariant(&d);
    }

    #[test]
    fn test_grouping_keeps_every_run() {
        let input = vec![
            run("vale", at(3), (1, 0, 0)),
            run("markdownlint", at(1), (0, 1, 0)),
            run("vale", at(2), (0, 0, 4)),
            run("custom", at(9), (2, 2, 2)),
            run("vale", at(7), (0, 1, 0)),
        ];
        let d = aggregate(input.clone());
        assert_eq!(d.all_results, input);
        let runs: usize = d.checkers.iter().map(|c| c.total_runs).sum();
        assert_eq!(runs, d.total_checks);
        assert_eq!(runs, input.len());
        for c in &d.checkers {
            let mine: Vec<&CheckResult> = input.iter().filter(|r| r.checker == c.name).collect();
            let max_ts = mine.iter().map(|r| r.timestamp).max().unwrap();
            assert_eq!(c.latest_run, max_ts);
            assert_eq!(d.latest_results[&c.name].timestamp, c.latest_run);
            assert_eq!(c.total_issues, mine.iter().map(|r| r.summary.total_issues).sum::<usize>());
            assert_eq!(c.error_count, mine.iter().map(|r| r.summary.error_count).sum::<usize>());
            assert_eq!(c.warning_count, mine.iter().map(|r| r.summary.warning_count).sum::<usize>());
            assert_eq!(c.info_count, mine.iter().map(|r| r.summary.info_count).sum::<usize>());
        }
        assert_invariant(&d);
    }

    #[test]
    fn test_checkers_sorted_case_insensitively() {
        let input = vec![
            run("vale", at(0), (0, 0, 0)),
            run("Zeta", at(0), (0, 0, 0)),
            run("alpha", at(0), (0, 0, 0)),
            run("Markdownlint", at(0), (0, 0, 0)),
        ];
        let mut reversed = input.clone();
        reversed.reverse();
        for set in [input, reversed] {
            let d = aggregate(set);
            assert_eq!(d.checker_names(), vec!["alpha", "Markdownlint", "vale", "Zeta"]);
        }
    }

    #[test]
    fn test_timestamp_tie_is_order_independent() {
        let mut x = run("vale", at(4), (1, 0, 0));
        x.metadata.insert("config_file".into(), json!(".vale.ini"));
        let y = run("vale", at(4), (0, 3, 0));
        // Same instant written with a different offset.
        let mut z = run("vale", at(4), (0, 0, 1));
        z.timestamp = at(4).with_timezone(&FixedOffset::east_opt(2 * 3600).unwrap());

        let orders = vec![
            vec![x.clone(), y.clone(), z.clone()],
            vec![z.clone(), y.clone(), x.clone()],
            vec![y.clone(), x.clone(), z.clone()],
        ];
        let picks: Vec<CheckResult> = orders
            .into_iter()
            .map(|o| aggregate(o).latest_results["vale"].clone())
            .collect();
        assert_eq!(picks[0], picks[1]);
        assert_eq!(picks[1], picks[2]);
    }

    #[test]
    fn test_overall_summary_uses_latest_runs_only() {
        let d = aggregate(vec![
            run("vale", at(0), (5, 5, 5)),
            run("vale", at(1), (1, 0, 0)),
            run("markdownlint", at(2), (0, 2, 0)),
        ]);
        let s = d.overall_summary();
        assert_eq!(s.total_issues, 3);
        assert_eq!(s.error_count, 1);
        assert_eq!(s.warning_count, 2);
        assert_eq!(s.total_files, 4);
        assert_eq!(d.latest_check_time(), Some(at(2)));
    }

    #[test]
    fn test_huge_counters_saturate_instead_of_overflowing() {
        let mut big = run("vale", at(0), (0, 0, 0));
        big.summary.total_issues = usize::MAX;
        big.summary.error_count = usize::MAX;
        let mut again = big.clone();
        again.timestamp = at(1);

        let d = aggregate(vec![big, again]);
        let vale = &d.checkers[0];
        assert_eq!(vale.total_runs, 2);
        assert_eq!(vale.total_issues, usize::MAX);
        assert_eq!(vale.error_count, usize::MAX);
        assert_eq!(d.overall_summary().error_count, usize::MAX);
    }
}
