//! CSV parser for student grade files.
//!
//! The first physical line is always a header and is discarded as raw
//! bytes, whatever it holds. Every following line must hold
//! `firstName,lastName,university,test1,test2,test3,test4`.
//! The first bad row aborts the parse.
//!
//! Row indexes count physical lines after the header, starting at 0. A
//! blank line anywhere after the header is a row with one empty field and
//! fails the field count check. A single newline ending the last row is
//! just its terminator, not a blank line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use crate::analyzers::types::StudentRecord;
use crate::error::GradeError;

/// Number of fields in a student row.
pub const STUDENT_FIELD_COUNT: usize = 7;

/// Schema settings for [`parse_csv`].
#[derive(Debug, Clone)]
pub struct ParseConfig {
    pub delimiter: u8,
    pub field_count: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            field_count: STUDENT_FIELD_COUNT,
        }
    }
}

/// Reads a grades CSV file into student records, in file order.
///
/// # Errors
///
/// Returns [`GradeError`] if the file cannot be opened, has no header line,
/// or any data row is blank, has the wrong number of fields, or has a
/// non-integer score.
pub fn parse_csv(path: impl AsRef<Path>, config: &ParseConfig) -> Result<Vec<StudentRecord>, GradeError> {
    let path = path.as_ref();

    let file = File::open(path).map_err(|source| GradeError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let mut header = Vec::new();
    let read = reader
        .read_until(b'\n', &mut header)
        .map_err(|source| GradeError::Header {
            path: path.to_path_buf(),
            source,
        })?;
    if read == 0 {
        return Err(GradeError::MissingHeader {
            path: path.to_path_buf(),
        });
    }
    debug!(path = %path.display(), header = %String::from_utf8_lossy(&header).trim_end(), "Discarded header line");

    // Fields are split on the raw delimiter; quotes carry no meaning.
    let mut builder = ReaderBuilder::new();
    builder
        .delimiter(config.delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false);

    let mut students = Vec::new();
    let mut record = StringRecord::new();

    for (row, line) in reader.split(b'\n').enumerate() {
        let line = line.map_err(|source| GradeError::Read {
            row,
            source: source.into(),
        })?;

        let mut rdr = builder.from_reader(line.as_slice());
        let has_fields = rdr
            .read_record(&mut record)
            .map_err(|source| GradeError::Read { row, source })?;
        if !has_fields {
            return Err(GradeError::FieldCount {
                row,
                expected: config.field_count,
                found: 1,
                fields: vec![String::new()],
            });
        }

        debug!(row, ?record, "Parsing student row");
        students.push(parse_student(row, &record, config)?);
    }

    debug!(path = %path.display(), rows = students.len(), "Parsed student rows");
    Ok(students)
}

/// Converts one data row into a [`StudentRecord`].
pub fn parse_student(row: usize, record: &StringRecord, config: &ParseConfig) -> Result<StudentRecord, GradeError> {
    let fields: Vec<&str> = record.iter().collect();

    let field_count_error = || GradeError::FieldCount {
        row,
        expected: config.field_count,
        found: fields.len(),
        fields: fields.iter().map(|f| f.to_string()).collect(),
    };

    if fields.len() != config.field_count {
        return Err(field_count_error());
    }

    let [first_name, last_name, university, scores @ ..] = fields.as_slice() else {
        return Err(field_count_error());
    };
    let [t1, t2, t3, t4, ..] = scores else {
        return Err(field_count_error());
    };

    let mut test_scores = [0i64; 4];
    for (i, (slot, value)) in test_scores.iter_mut().zip([t1, t2, t3, t4]).enumerate() {
        *slot = value.parse().map_err(|source| GradeError::ScoreParse {
            row,
            column: 3 + i,
            value: value.to_string(),
            source,
        })?;
    }

    Ok(StudentRecord {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        university: university.to_string(),
        test_scores,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        let path = env::temp_dir().join(format!("student_grader_{name}.csv"));
        fs::write(&path, contents).unwrap();
        path
    }

    const HEADER: &str = "firstName,lastName,university,test1,test2,test3,test4\n";

    #[test]
    fn test_parse_valid_rows() {
        let path = write_temp(
            "valid",
            &format!("{HEADER}Ada,Lovelace,X Univ,70,81,90,62\nAlan,Turing,Y Univ,55,60,65,70\n"),
        );

        let students = parse_csv(&path, &ParseConfig::default()).unwrap();
        assert_eq!(students.len(), 2);
        assert_eq!(students[0].first_name, "Ada");
        assert_eq!(students[0].university, "X Univ");
        assert_eq!(students[0].test_scores, [70, 81, 90, 62]);
        assert_eq!(students[1].full_name(), "Alan Turing");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_without_trailing_newline() {
        let path = write_temp("no_newline", &format!("{HEADER}Ada,Lovelace,X Univ,1,2,3,4"));

        let students = parse_csv(&path, &ParseConfig::default()).unwrap();
        assert_eq!(students.len(), 1);
        assert_eq!(students[0].test_scores, [1, 2, 3, 4]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_crlf_line_endings() {
        let path = write_temp(
            "crlf",
            "first,last,uni,a,b,c,d\r\nAda,Lovelace,X Univ,1,2,3,4\r\n",
        );

        let students = parse_csv(&path, &ParseConfig::default()).unwrap();
        assert_eq!(students[0].test_scores, [1, 2, 3, 4]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_negative_scores_are_accepted() {
        let path = write_temp("negative", &format!("{HEADER}Ada,Lovelace,X Univ,-5,200,0,7\n"));

        let students = parse_csv(&path, &ParseConfig::default()).unwrap();
        assert_eq!(students[0].test_scores, [-5, 200, 0, 7]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_header_only_is_empty() {
        let path = write_temp("header_only", HEADER);

        let students = parse_csv(&path, &ParseConfig::default()).unwrap();
        assert!(students.is_empty());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_header_content_is_ignored() {
        let path = write_temp("odd_header", "whatever\nAda,Lovelace,X Univ,1,2,3,4\n");

        let students = parse_csv(&path, &ParseConfig::default()).unwrap();
        assert_eq!(students.len(), 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_blank_first_line_is_the_header() {
        let path = write_temp(
            "blank_header",
            "\nAda,Lovelace,X Univ,1,2,3,4\nBob,Byrne,Y Univ,5,6,7,8\n",
        );

        let students = parse_csv(&path, &ParseConfig::default()).unwrap();
        let names: Vec<_> = students.iter().map(|s| s.first_name.as_str()).collect();
        assert_eq!(names, vec!["Ada", "Bob"]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_blank_line_between_rows_fails() {
        let path = write_temp(
            "blank_middle",
            &format!("{HEADER}Ada,Lovelace,X Univ,1,2,3,4\n\nBob,Byrne,Y Univ,5,6,7,8\n"),
        );

        let err = parse_csv(&path, &ParseConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            GradeError::FieldCount {
                row: 1,
                found: 1,
                ..
            }
        ));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_blank_first_data_line_fails() {
        let path = write_temp("blank_first_row", &format!("{HEADER}\nAda,Lovelace,X Univ,1,2,3,4\n"));

        let err = parse_csv(&path, &ParseConfig::default()).unwrap_err();
        assert_eq!(err.row(), Some(0));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_blank_last_line_fails() {
        let path = write_temp("trailing_blank", &format!("{HEADER}Ada,Lovelace,X Univ,1,2,3,4\n\n"));

        let err = parse_csv(&path, &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, GradeError::FieldCount { row: 1, .. }));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_non_utf8_header_is_ignored() {
        let path = env::temp_dir().join("student_grader_latin1_header.csv");
        fs::write(&path, b"pr\xe9nom,nom,u,a,b,c,d\nAda,Lovelace,X Univ,1,2,3,4\n").unwrap();

        let students = parse_csv(&path, &ParseConfig::default()).unwrap();
        assert_eq!(students[0].first_name, "Ada");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_non_utf8_row_fails() {
        let path = env::temp_dir().join("student_grader_latin1_row.csv");
        fs::write(&path, b"h\nAda,Lovelace,X Univ,1,2,3,4\nRen\xe9,Roy,X Univ,1,2,3,4\n").unwrap();

        let err = parse_csv(&path, &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, GradeError::Read { row: 1, .. }));

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_empty_file_is_missing_header() {
        let path = write_temp("empty", "");

        let err = parse_csv(&path, &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, GradeError::MissingHeader { .. }));
        assert!(err.is_file_access());

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file() {
        let path = env::temp_dir().join("student_grader_does_not_exist.csv");
        let _ = fs::remove_file(&path);

        let err = parse_csv(&path, &ParseConfig::default()).unwrap_err();
        assert!(matches!(err, GradeError::Open { .. }));
    }

    #[test]
    fn test_six_fields_reports_row() {
        let path = write_temp(
            "six_fields",
            &format!("{HEADER}Ada,Lovelace,X Univ,1,2,3,4\nAlan,Turing,Y Univ,1,2,3\n"),
        );

        let err = parse_csv(&path, &ParseConfig::default()).unwrap_err();
        match err {
            GradeError::FieldCount {
                row,
                expected,
                found,
                fields,
            } => {
                assert_eq!(row, 1);
                assert_eq!(expected, 7);
                assert_eq!(found, 6);
                assert_eq!(fields[0], "Alan");
            }
            other => panic!("unexpected error: {other}"),
        }

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_non_numeric_score() {
        let path = write_temp("abc", &format!("{HEADER}Ada,Lovelace,X Univ,1,abc,3,4\n"));

        let err = parse_csv(&path, &ParseConfig::default()).unwrap_err();
        match err {
            GradeError::ScoreParse {
                row, column, value, ..
            } => {
                assert_eq!(row, 0);
                assert_eq!(column, 4);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_custom_delimiter() {
        let path = write_temp("semicolon", "h\nAda;Lovelace;X Univ;10;20;30;40\n");
        let config = ParseConfig {
            delimiter: b';',
            ..ParseConfig::default()
        };

        let students = parse_csv(&path, &config).unwrap();
        assert_eq!(students[0].test_scores, [10, 20, 30, 40]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_parse_student_short_schema() {
        let record = StringRecord::from(vec!["Ada", "Lovelace", "X Univ"]);
        let config = ParseConfig {
            field_count: 3,
            ..ParseConfig::default()
        };

        let err = parse_student(0, &record, &config).unwrap_err();
        assert!(matches!(err, GradeError::FieldCount { found: 3, .. }));
    }
}
