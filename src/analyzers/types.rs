//! Data types used by the grading pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// One data row of the grades CSV.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentRecord {
    pub first_name: String,
    pub last_name: String,
    pub university: String,
    pub test_scores: [i64; 4],
}

impl StudentRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Letter grade assigned from a final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Grade {
    A,
    B,
    C,
    F,
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::F => "F",
        };
        f.write_str(letter)
    }
}

/// A [`StudentRecord`] with its computed final score and grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradedStudent {
    pub student: StudentRecord,
    pub final_score: f64,
    pub grade: Grade,
}

/// Toppers overall and per university. `overall_topper` is `None` when
/// there were no students.
#[derive(Debug, Serialize)]
pub struct ClassReport {
    pub generated_at: DateTime<Utc>,
    pub student_count: usize,
    pub overall_topper: Option<GradedStudent>,
    pub university_toppers: BTreeMap<String, GradedStudent>,
}
