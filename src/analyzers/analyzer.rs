use crate::analyzers::aggregate::aggregate_students;
use crate::analyzers::grade::calculate_grades;
use crate::analyzers::types::ClassReport;
use crate::error::GradeError;
use crate::parser::{ParseConfig, parse_csv};
use std::path::Path;
use tracing::info;

/// Parses, grades, and aggregates a grades CSV file.
///
/// Each stage consumes the full output of the one before it.
#[tracing::instrument(skip(path, config), fields(path = %path.display()))]
pub fn analyze(path: &Path, config: &ParseConfig) -> Result<ClassReport, GradeError> {
    let students = parse_csv(path, config)?;
    info!(students = students.len(), "Parsed grades file");

    let graded = calculate_grades(students);
    let report = aggregate_students(&graded);

    info!(
        students = report.student_count,
        universities = report.university_toppers.len(),
        "Aggregation complete"
    );
    Ok(report)
}
