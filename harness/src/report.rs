//! Caller-facing run report.
//!
//! `status` is `"OK"` with the path, its length and elapsed seconds, or
//! `"ERROR"` with a human-readable message. Termination reason and counters
//! ride along for diagnostics.

use serde::Serialize;

use speedrun_search::outcome::{RunReport, RunResult, SearchStats, TerminationReason};

pub const START_MISSING_MESSAGE: &str = "Start Wikipedia page does not exist.";
pub const END_MISSING_MESSAGE: &str = "End Wikipedia page does not exist.";
pub const NOT_FOUND_MESSAGE: &str = "No path found within the given limits.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReportStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "ERROR")]
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub status: ReportStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_links: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub elapsed_time: Option<f64>,
    pub termination: Option<TerminationReason>,
    pub stats: SearchStats,
}

impl RunSummary {
    #[must_use]
    pub fn from_report(report: &RunReport) -> Self {
        let mut summary = Self {
            status: ReportStatus::Error,
            message: None,
            links: None,
            n_links: None,
            elapsed_time: None,
            termination: report.termination,
            stats: report.stats,
        };
        match &report.result {
            RunResult::Found { path, elapsed } => {
                summary.status = ReportStatus::Ok;
                summary.n_links = Some(path.len());
                summary.links = Some(path.clone());
                summary.elapsed_time = Some(elapsed.as_secs_f64());
            }
            RunResult::NotFound => summary.message = Some(NOT_FOUND_MESSAGE),
            RunResult::StartMissing => summary.message = Some(START_MISSING_MESSAGE),
            RunResult::EndMissing => summary.message = Some(END_MISSING_MESSAGE),
        }
        summary
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.status == ReportStatus::Ok
    }
}
