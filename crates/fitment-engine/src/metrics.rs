//! Metrics for the fitment engine
//!
//! Labels carry only stage and outcome, never descriptor content.

use metrics::{counter, histogram};
use std::time::Duration;

pub const OUTCOME_OK: &str = "ok";
pub const OUTCOME_ERROR: &str = "error";
pub const OUTCOME_TIMEOUT: &str = "timeout";

pub fn record_resolve(stage: &str, outcome: &str, duration: Duration) {
    counter!("fitment_resolve_total", "stage" => stage.to_string(), "outcome" => outcome.to_string())
        .increment(1);
    histogram!("fitment_resolve_duration_seconds", "stage" => stage.to_string(), "outcome" => outcome.to_string())
        .record(duration.as_secs_f64());
}

pub fn record_parts_fetch(outcome: &str, duration: Duration) {
    counter!("fitment_parts_fetch_total", "outcome" => outcome.to_string()).increment(1);
    histogram!("fitment_parts_fetch_duration_seconds", "outcome" => outcome.to_string())
        .record(duration.as_secs_f64());
}

pub fn record_inquiry(outcome: &str) {
    counter!("fitment_inquiry_total", "outcome" => outcome.to_string()).increment(1);
}
