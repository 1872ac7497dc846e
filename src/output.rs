//! Report emission for a graded class.
//!
//! Supports log-line and JSON output.

use anyhow::Result;
use tracing::{debug, info};

use crate::analyzers::types::{ClassReport, GradedStudent};

/// Logs the overall topper and each university's topper, in university order.
pub fn print_report(report: &ClassReport) {
    debug!("{:#?}", report);

    match &report.overall_topper {
        Some(topper) => log_topper("Overall topper", topper),
        None => info!(students = report.student_count, "No students graded"),
    }

    for topper in report.university_toppers.values() {
        log_topper("University topper", topper);
    }
}

fn log_topper(label: &str, topper: &GradedStudent) {
    info!(
        name = %topper.student.full_name(),
        university = %topper.student.university,
        final_score = topper.final_score,
        grade = %topper.grade,
        "{label}"
    );
}

/// Logs the report as pretty-printed JSON.
pub fn print_json(report: &ClassReport) -> Result<()> {
    info!("{}", to_json(report)?);
    Ok(())
}

pub fn to_json(report: &ClassReport) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}
