//! Student grading and topper aggregation.
//!
//! This module turns parsed student rows into graded students, then
//! finds the top scorer overall and per university.

pub mod aggregate;
pub mod analyzer;
pub mod grade;
pub mod types;
