use crate::client::{CaseOutcome, ExecutionResult, Summary};
use crate::suite::AssertionResult;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub base_url: String,
    pub results: Vec<ExecutionResult>,
    pub summary: Summary,
}

impl RunReport {
    pub fn new(base_url: &str, started_at: DateTime<Utc>, results: Vec<ExecutionResult>) -> Self {
        let summary = Summary::from_results(&results);
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            base_url: base_url.to_string(),
            results,
            summary,
        }
    }
}

fn outcome_label(outcome: CaseOutcome) -> &'static str {
    match outcome {
        CaseOutcome::Passed => "[PASS]",
        CaseOutcome::Failed => "[FAIL]",
        CaseOutcome::Errored => "[ERROR]",
    }
}

fn render_check(check: &AssertionResult) -> String {
    let mark = if check.passed { "ok  " } else { "FAIL" };
    format!(
        "    {mark} {} ({})\n",
        check.assertion.description(),
        check.detail
    )
}

pub fn render_summary_line(summary: &Summary) -> String {
    format!(
        "summary: total={} passed={} failed={} errored={}\n",
        summary.total, summary.passed, summary.failed, summary.errored
    )
}

/// Human-readable report ending with a `key=value` summary line.
pub fn render_text(report: &RunReport) -> String {
    let mut out = String::new();
    for result in &report.results {
        let label = outcome_label(result.outcome());
        match (result.status, &result.error) {
            (Some(status), _) => out.push_str(&format!(
                "{label} {} {} {} -> {status} ({} ms)\n",
                result.case_name, result.method, result.url, result.elapsed_ms
            )),
            (None, error) => out.push_str(&format!(
                "{label} {} {} {} -> {}\n",
                result.case_name,
                result.method,
                result.url,
                error.as_deref().unwrap_or("no response")
            )),
        }
        for check in result.status_check.iter().chain(result.assertions.iter()) {
            out.push_str(&render_check(check));
        }
    }
    out.push('\n');
    out.push_str(&render_summary_line(&report.summary));
    out
}
