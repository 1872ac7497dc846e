use crate::analyzers::types::{ClassReport, GradedStudent};
use chrono::Utc;
use std::collections::BTreeMap;

/// Returns the student with the highest final score, or `None` for empty input.
///
/// Ties go to the student seen first.
pub fn find_overall_topper(graded: &[GradedStudent]) -> Option<&GradedStudent> {
    let mut topper: Option<&GradedStudent> = None;

    for student in graded {
        match topper {
            Some(best) if student.final_score <= best.final_score => {}
            _ => topper = Some(student),
        }
    }

    topper
}

/// Maps each university to its highest-scoring student.
///
/// A university enters the map on first sighting and its entry is only
/// replaced by a strictly higher final score.
pub fn find_topper_per_university(graded: &[GradedStudent]) -> BTreeMap<&str, &GradedStudent> {
    let mut toppers: BTreeMap<&str, &GradedStudent> = BTreeMap::new();

    for student in graded {
        toppers
            .entry(student.student.university.as_str())
            .and_modify(|best| {
                if student.final_score > best.final_score {
                    *best = student;
                }
            })
            .or_insert(student);
    }

    toppers
}

/// Builds a [`ClassReport`] from graded students.
pub fn aggregate_students(graded: &[GradedStudent]) -> ClassReport {
    let university_toppers = find_topper_per_university(graded)
        .into_iter()
        .map(|(university, student)| (university.to_string(), student.clone()))
        .collect();

    ClassReport {
        generated_at: Utc::now(),
        student_count: graded.len(),
        overall_topper: find_overall_topper(graded).cloned(),
        university_toppers,
    }
}
