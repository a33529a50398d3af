//! Errors raised while turning delimited text into ride records.

use thiserror::Error;

/// A row of the source dataset that could not be accepted.
///
/// `line` is the 1-based line of the source text, header included.
#[derive(Error, Debug)]
pub enum DatasetError {
    /// The reader itself failed (bad quoting, wrong field count, missing header column, ...).
    #[error("line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    /// A required field was empty.
    #[error("line {line}: missing value for `{field}`")]
    MissingField { line: u64, field: &'static str },

    /// A field was present but not a valid number, date, code or label.
    #[error("line {line}: invalid value `{value}` for `{field}`")]
    InvalidValue {
        line: u64,
        field: &'static str,
        value: String,
    },

    /// `cnt` disagrees with `casual + registered`.
    #[error("line {line}: cnt {cnt} does not equal casual {casual} + registered {registered}")]
    CountMismatch {
        line: u64,
        casual: u64,
        registered: u64,
        cnt: u64,
    },
}

impl DatasetError {
    /// Source line the error refers to.
    pub fn line(&self) -> u64 {
        match self {
            DatasetError::Csv { line, .. }
            | DatasetError::MissingField { line, .. }
            | DatasetError::InvalidValue { line, .. }
            | DatasetError::CountMismatch { line, .. } => *line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = DatasetError::MissingField {
            line: 7,
            field: "casual",
        };
        assert_eq!(err.to_string(), "line 7: missing value for `casual`");
        assert_eq!(err.line(), 7);
    }

    #[test]
    fn test_count_mismatch_display() {
        let err = DatasetError::CountMismatch {
            line: 3,
            casual: 1,
            registered: 2,
            cnt: 4,
        };
        let msg = err.to_string();
        assert!(msg.starts_with("line 3:"));
        assert!(msg.contains("cnt 4"));
        assert!(msg.contains("casual 1"));
        assert!(msg.contains("registered 2"));
    }

    #[test]
    fn test_invalid_value_display() {
        let err = DatasetError::InvalidValue {
            line: 12,
            field: "mnth",
            value: "Smarch".to_string(),
        };
        assert_eq!(err.to_string(), "line 12: invalid value `Smarch` for `mnth`");
    }
}
