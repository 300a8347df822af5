// Copyright 2025 Parabench Contributors
// SPDX-License-Identifier: Apache-2.0

//! Kernel stdout parsing.
//!
//! The wire format is a single comma-separated line:
//! `variant_id,thread_count,elapsed_seconds[,result_value]`. Anything else
//! is rejected outright, carrying the offending raw text; there is no
//! best-effort partial parse.

use thiserror::Error;

/// Malformed kernel output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// stdout did not contain exactly one non-empty line.
    #[error("expected exactly one output line, found {count}: {raw:?}")]
    LineCount {
        /// Non-empty lines seen.
        count: usize,
        /// Raw stdout as captured.
        raw: String,
    },
    /// The line had the wrong number of comma-separated fields.
    #[error("expected {expected} fields, found {found}: {raw:?}")]
    FieldCount {
        /// Fields the kernel contract requires.
        expected: usize,
        /// Fields actually present.
        found: usize,
        /// The offending line.
        raw: String,
    },
    /// A field that must be numeric failed to parse or is out of domain.
    #[error("invalid numeric field {field:?} in {raw:?}")]
    InvalidNumber {
        /// The field that failed.
        field: String,
        /// The offending line.
        raw: String,
    },
}

/// One successfully parsed kernel output line.
#[derive(Debug, Clone, PartialEq)]
pub struct KernelOutput {
    /// Method selector echoed back by the kernel.
    pub variant_id: u32,
    /// Thread count echoed back by the kernel.
    pub threads: u32,
    /// Measured wall-clock time in seconds.
    pub elapsed_secs: f64,
    /// Computed result value, for kernels that report one.
    pub value: Option<f64>,
}

/// Parse one kernel output line.
///
/// `expected_fields` is 3 for kernels reporting only a time and 4 for
/// kernels that append a computed result value.
pub fn parse(raw_stdout: &str, expected_fields: usize) -> Result<KernelOutput, ParseError> {
    let lines: Vec<&str> = raw_stdout
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    let line = match lines.as_slice() {
        [line] => *line,
        _ => {
            return Err(ParseError::LineCount {
                count: lines.len(),
                raw: raw_stdout.to_string(),
            })
        }
    };

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != expected_fields {
        return Err(ParseError::FieldCount {
            expected: expected_fields,
            found: fields.len(),
            raw: line.to_string(),
        });
    }

    let variant_id = numeric::<u32>(fields[0], line)?;
    let threads = numeric::<u32>(fields[1], line)?;
    let elapsed_secs = numeric::<f64>(fields[2], line)?;
    let value = if expected_fields > 3 {
        Some(numeric::<f64>(fields[3], line)?)
    } else {
        None
    };

    Ok(KernelOutput {
        variant_id,
        threads,
        elapsed_secs,
        value,
    })
}

fn numeric<T: std::str::FromStr>(field: &str, line: &str) -> Result<T, ParseError> {
    field.trim().parse().map_err(|_| ParseError::InvalidNumber {
        field: field.to_string(),
        raw: line.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_four_field_line() {
        let output = parse("1,4,0.023410,1.99998", 4).unwrap();
        assert_eq!(output.variant_id, 1);
        assert_eq!(output.threads, 4);
        assert_eq!(output.elapsed_secs, 0.023410);
        assert_eq!(output.value, Some(1.99998));
    }

    #[test]
    fn test_parses_three_field_line_without_value() {
        let output = parse("3,1,12.5\n", 3).unwrap();
        assert_eq!(output.variant_id, 3);
        assert_eq!(output.threads, 1);
        assert_eq!(output.elapsed_secs, 12.5);
        assert_eq!(output.value, None);
    }

    #[test]
    fn test_non_numeric_field_is_rejected() {
        match parse("1,4,abc", 3) {
            Err(ParseError::InvalidNumber { field, .. }) => assert_eq!(field, "abc"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_field_count_is_rejected() {
        match parse("1,4", 4) {
            Err(ParseError::FieldCount {
                expected, found, ..
            }) => {
                assert_eq!(expected, 4);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_multiple_lines_are_rejected() {
        match parse("1,4,0.5\n1,4,0.6\n", 3) {
            Err(ParseError::LineCount { count, .. }) => assert_eq!(count, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_empty_output_is_rejected() {
        match parse("", 3) {
            Err(ParseError::LineCount { count, .. }) => assert_eq!(count, 0),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_error_carries_offending_text() {
        match parse("1,4,abc", 3) {
            Err(ParseError::InvalidNumber { raw, .. }) => assert_eq!(raw, "1,4,abc"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
