//! Delimited text ingestion: one point per line, one coordinate per field.

use std::io::{self, BufRead};

use thiserror::Error;
use wishart_core::{DataSourceError, DenseVectors};

/// Errors raised while reading delimited points.
#[derive(Debug, Error)]
pub enum DelimitedError {
    /// Reading from the underlying stream failed.
    #[error("failed to read line {line}: {source}")]
    Read {
        /// One-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A field could not be parsed as a number.
    #[error("line {line}, field {field}: `{value}` is not a number")]
    InvalidNumber {
        /// One-based line number.
        line: usize,
        /// One-based field number.
        field: usize,
        /// Offending field text.
        value: String,
    },
    /// The parsed rows do not form a valid point set.
    #[error(transparent)]
    Points(#[from] DataSourceError),
}

/// Reads points from `reader`, skipping blank lines.
///
/// Fields are trimmed before parsing, so `1, 2` and `1,2` are equivalent.
///
/// # Errors
/// Returns [`DelimitedError::InvalidNumber`] for unparsable fields and
/// [`DelimitedError::Points`] when rows differ in length, contain non-finite
/// values, or the input holds no points.
///
/// # Examples
/// ```
/// use wishart_cli::delimited::read_points;
/// use wishart_core::DataSource;
///
/// let points = read_points("demo", "0,0\n\n3, 4\n".as_bytes(), ',')?;
/// assert_eq!(points.len(), 2);
/// assert_eq!(points.dimension(), 2);
/// # Ok::<(), wishart_cli::delimited::DelimitedError>(())
/// ```
pub fn read_points(
    name: &str,
    reader: impl BufRead,
    delimiter: char,
) -> Result<DenseVectors, DelimitedError> {
    let mut rows = Vec::new();
    for (offset, line) in reader.lines().enumerate() {
        let number = offset + 1;
        let text = line.map_err(|source| DelimitedError::Read {
            line: number,
            source,
        })?;
        if text.trim().is_empty() {
            continue;
        }
        rows.push(parse_row(&text, delimiter, number)?);
    }
    Ok(DenseVectors::try_from_rows(name, rows)?)
}

fn parse_row(text: &str, delimiter: char, line: usize) -> Result<Vec<f32>, DelimitedError> {
    text.split(delimiter)
        .enumerate()
        .map(|(index, raw)| {
            let value = raw.trim();
            value
                .parse::<f32>()
                .map_err(|_| DelimitedError::InvalidNumber {
                    line,
                    field: index + 1,
                    value: value.to_owned(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use wishart_core::DataSource;

    #[rstest]
    #[case::comma("1,2\n3,4\n", ',')]
    #[case::tab("1\t2\n3\t4", '\t')]
    #[case::padded(" 1 ; 2 \n3;4\n\n", ';')]
    fn reads_rows(#[case] input: &str, #[case] delimiter: char) {
        let points = read_points("rows", input.as_bytes(), delimiter).expect("input is valid");
        assert_eq!(points.name(), "rows");
        assert_eq!(points.point(1).expect("second row"), &[3.0, 4.0]);
    }

    #[test]
    fn reports_the_offending_field() {
        let err = read_points("bad", "1,2\n3,x\n".as_bytes(), ',').expect_err("x is not numeric");
        assert!(matches!(
            err,
            DelimitedError::InvalidNumber { line: 2, field: 2, ref value } if value == "x"
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = read_points("ragged", "1,2\n3\n".as_bytes(), ',').expect_err("rows differ");
        assert!(matches!(
            err,
            DelimitedError::Points(DataSourceError::DimensionMismatch {
                index: 1,
                expected: 2,
                found: 1,
            })
        ));
    }

    #[test]
    fn blank_input_is_empty() {
        let err = read_points("blank", "\n \n".as_bytes(), ',').expect_err("no rows");
        assert!(matches!(err, DelimitedError::Points(DataSourceError::EmptyData)));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = read_points("nan", "1,NaN\n".as_bytes(), ',').expect_err("NaN is rejected");
        assert!(matches!(
            err,
            DelimitedError::Points(DataSourceError::NonFinite { .. })
        ));
    }
}
