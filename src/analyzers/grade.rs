use crate::analyzers::types::{Grade, GradedStudent, StudentRecord};

/// Converts a final score into a letter grade.
///
/// | Range       | Grade |
/// |-------------|-------|
/// | >= 70       | A     |
/// | >= 50       | B     |
/// | >= 35       | C     |
/// | < 35        | F     |
///
/// Negative scores (only possible with negative test scores) fall through to F.
pub fn grade(score: f64) -> Grade {
    match score {
        s if s >= 70.0 => Grade::A,
        s if s >= 50.0 => Grade::B,
        s if s >= 35.0 => Grade::C,
        _ => Grade::F,
    }
}

/// Mean of the four test scores.
pub fn final_score(student: &StudentRecord) -> f64 {
    let total: f64 = student.test_scores.iter().map(|&s| s as f64).sum();
    total / 4.0
}

impl GradedStudent {
    pub fn from_record(student: StudentRecord) -> Self {
        let final_score = final_score(&student);
        GradedStudent {
            grade: grade(final_score),
            final_score,
            student,
        }
    }
}

/// Grades every student, preserving input order.
pub fn calculate_grades(students: Vec<StudentRecord>) -> Vec<GradedStudent> {
    students.into_iter().map(GradedStudent::from_record).collect()
}
