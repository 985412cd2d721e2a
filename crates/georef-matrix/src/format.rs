//! Text representation of matrices.
//!
//! The [`std::fmt::Display`] output is meant for diagnostics: one row per line, right-aligned
//! columns inside a box-drawing border, with a number of fraction digits chosen from the spread
//! of the element values. [`read_matrix`] reads back that output as well as plain
//! whitespace-separated rows.

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::{
    error::MatrixError,
    fixed::{Matrix1, Matrix2, Matrix3, Matrix4},
    general::GeneralMatrix,
    matrix::Matrix,
    traits::MatrixOps,
};

/// Upper bound on the number of fraction digits written by the display.
const MAX_FRACTION_DIGITS: i32 = 12;

/// Options for [`read_matrix`].
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOptions {
    /// Expected number of rows, if known.
    pub num_rows: Option<usize>,
    /// Expected number of columns, if known.
    pub num_cols: Option<usize>,
    /// Character separating the integer and fraction parts of a number.
    pub decimal_separator: char,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            num_rows: None,
            num_cols: None,
            decimal_separator: '.',
        }
    }
}

impl ReadOptions {
    /// The expected shape, a single given dimension meaning a square matrix.
    fn expected_shape(&self) -> (Option<usize>, Option<usize>) {
        match (self.num_rows, self.num_cols) {
            (Some(rows), None) => (Some(rows), Some(rows)),
            (None, Some(cols)) => (Some(cols), Some(cols)),
            shape => shape,
        }
    }
}

/// Number of fraction digits giving about four significant digits relative to the spread of the
/// finite values, or none if they are all integers.
fn fraction_digits(values: &[f64]) -> usize {
    let finite = values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .collect::<Vec<_>>();
    if finite.iter().all(|v| v.fract() == 0.0) {
        return 0;
    }
    let n = finite.len() as f64;
    let mean = finite.iter().sum::<f64>() / n;
    let std_dev = (finite.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n).sqrt();
    let scale = if std_dev > 0.0 { std_dev } else { mean.abs() };
    let digits = 3 - scale.log10().floor() as i32;
    digits.clamp(1, MAX_FRACTION_DIGITS) as usize
}

fn format_value(value: f64, digits: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "∞".to_string()
    } else if value == f64::NEG_INFINITY {
        "-∞".to_string()
    } else if value == 0.0 {
        // no "-0"
        format!("{:.*}", digits, 0.0)
    } else {
        format!("{:.*}", digits, value)
    }
}

/// Write the boxed representation of any matrix.
pub fn write_matrix<M: MatrixOps>(f: &mut impl fmt::Write, matrix: &M) -> fmt::Result {
    let (rows, cols) = (matrix.num_rows(), matrix.num_cols());
    let elements = matrix.elements();
    let digits = fraction_digits(&elements);
    let cells = elements
        .iter()
        .map(|&v| format_value(v, digits))
        .collect::<Vec<_>>();

    let widths = (0..cols)
        .map(|col| {
            (0..rows)
                .map(|row| cells[row * cols + col].chars().count())
                .max()
                .unwrap_or(0)
        })
        .collect::<Vec<_>>();
    let inner_width = widths.iter().sum::<usize>() + 2 * cols;

    writeln!(f, "┌{:inner_width$}┐", "")?;
    for row in 0..rows {
        let line = (0..cols)
            .map(|col| format!("{:>width$}", cells[row * cols + col], width = widths[col]))
            .collect::<Vec<_>>()
            .join("  ");
        writeln!(f, "│ {line} │")?;
    }
    writeln!(f, "└{:inner_width$}┘", "")
}

macro_rules! impl_display {
    ($($ty:ty),+) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    write_matrix(f, self)
                }
            }
        )+
    };
}

impl_display!(Matrix1, Matrix2, Matrix3, Matrix4, GeneralMatrix, Matrix);

fn parse_failure(line_number: usize, line: &str, reason: impl Into<String>) -> MatrixError {
    MatrixError::ParseFailure {
        line_number,
        line: line.to_string(),
        reason: reason.into(),
    }
}

fn parse_value(token: &str, decimal_separator: char) -> Result<f64, String> {
    match token {
        "∞" | "+∞" => return Ok(f64::INFINITY),
        "-∞" | "−∞" => return Ok(f64::NEG_INFINITY),
        _ => {}
    }
    let token = if decimal_separator == '.' {
        token.to_string()
    } else {
        token.replace(decimal_separator, ".")
    };
    token
        .replace('−', "-")
        .parse::<f64>()
        .map_err(|e| format!("{}: {}", token, e))
}

fn is_box_border(c: char) -> bool {
    matches!(c, '│' | '┌' | '┐' | '└' | '┘')
}

/// Read a matrix written one row per line, elements separated by white spaces.
///
/// Reading stops at the first blank line after some rows, at the end of input, or once
/// `options.num_rows` rows have been read. The number of columns is taken from the first row when
/// not given. Box-drawing borders as written by the display are skipped.
///
/// # Errors
///
/// * [`MatrixError::ParseFailure`] if a value cannot be parsed, a row length differs from the
///   number of columns, or the input holds no row.
/// * [`MatrixError::MismatchedDimension`] if fewer rows than expected were read.
/// * [`MatrixError::Io`] if reading fails.
///
/// Example:
///
/// ```
/// use georef_matrix::{format::{read_matrix, ReadOptions}, MatrixOps};
///
/// let text = "2 0 10\n0 2 20\n0 0 1\n";
/// let m = read_matrix(text.as_bytes(), &ReadOptions::default()).unwrap();
/// assert!(m.is_affine());
/// ```
pub fn read_matrix<R: BufRead>(reader: R, options: &ReadOptions) -> Result<Matrix, MatrixError> {
    let (num_rows, mut num_cols) = options.expected_shape();
    let mut elements = Vec::new();
    let mut rows_read = 0;
    let mut last_line_number = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;
        last_line_number = line_number;

        let trimmed = line.trim();
        if trimmed.starts_with('┌') {
            continue;
        }
        let content = trimmed.trim_matches(is_box_border).trim();
        if content.is_empty() || trimmed.starts_with('└') {
            if rows_read == 0 {
                continue;
            }
            break;
        }

        let row = content
            .split_whitespace()
            .map(|token| parse_value(token, options.decimal_separator))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|reason| parse_failure(line_number, &line, reason))?;

        let expected_cols = *num_cols.get_or_insert(row.len());
        if row.len() != expected_cols {
            return Err(parse_failure(
                line_number,
                &line,
                format!("expected {} values, found {}", expected_cols, row.len()),
            ));
        }
        elements.extend(row);
        rows_read += 1;
        if Some(rows_read) == num_rows {
            break;
        }
    }

    let num_cols = match num_cols {
        Some(cols) if rows_read > 0 => cols,
        _ => {
            return Err(parse_failure(
                last_line_number + 1,
                "",
                "no matrix row found",
            ))
        }
    };
    if let Some(expected_rows) = num_rows {
        if rows_read != expected_rows {
            return Err(MatrixError::MismatchedDimension {
                left_name: "expected rows",
                left: expected_rows,
                right_name: "rows read",
                right: rows_read,
            });
        }
    }
    log::debug!("read {}x{} matrix", rows_read, num_cols);
    Matrix::from_elements(rows_read, num_cols, &elements)
}

/// Read a matrix from a text file. See [`read_matrix`].
///
/// # Arguments
///
/// * `path` - The path to the text file.
/// * `options` - The expected shape and number format.
pub fn read_matrix_file(
    path: impl AsRef<Path>,
    options: &ReadOptions,
) -> Result<Matrix, MatrixError> {
    let file = File::open(path)?;
    read_matrix(BufReader::new(file), options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrices;

    #[test]
    fn test_display_integers() -> Result<(), MatrixError> {
        let m = GeneralMatrix::from_rows(&[[1.0, 0.0, -180.0], [0.0, 1.0, -90.0]])?;
        assert_eq!(
            m.to_string(),
            "┌            ┐\n│ 1  0  -180 │\n│ 0  1   -90 │\n└            ┘\n"
        );
        Ok(())
    }

    #[test]
    fn test_display_special_values() -> Result<(), MatrixError> {
        let m = matrices::create(2, 2, &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -0.0])?;
        let text = m.to_string();
        assert!(text.contains("NaN"));
        assert!(text.contains(" ∞"));
        assert!(text.contains("-∞"));
        assert!(!text.contains("-0"));
        Ok(())
    }

    #[test]
    fn test_fraction_digits() {
        assert_eq!(fraction_digits(&[1.0, 0.0, 100.0]), 0);
        assert_eq!(fraction_digits(&[0.5, 0.5]), 4);
        assert_eq!(fraction_digits(&[0.0001, 0.0002]), 8);
        assert_eq!(fraction_digits(&[f64::NAN, 2.0]), 0);
        assert_eq!(fraction_digits(&[1e-30, 0.0]), MAX_FRACTION_DIGITS as usize);
    }

    #[test]
    fn test_read_matrix() -> Result<(), MatrixError> {
        let text = "2 0 10\n0 4 20\n0 0 1\n\nthis line is never read\n";
        let m = read_matrix(text.as_bytes(), &ReadOptions::default())?;
        assert!(matches!(m, Matrix::Size3(_)));
        assert_eq!(
            m.elements(),
            vec![2.0, 0.0, 10.0, 0.0, 4.0, 20.0, 0.0, 0.0, 1.0]
        );
        Ok(())
    }

    #[test]
    fn test_read_matrix_special_values() -> Result<(), MatrixError> {
        let text = "1 NaN\n-∞ ∞\n";
        let m = read_matrix(text.as_bytes(), &ReadOptions::default())?;
        let e = m.elements();
        assert!(e[1].is_nan());
        assert_eq!(e[2], f64::NEG_INFINITY);
        assert_eq!(e[3], f64::INFINITY);
        Ok(())
    }

    #[test]
    fn test_read_matrix_decimal_separator() -> Result<(), MatrixError> {
        let options = ReadOptions {
            decimal_separator: ',',
            ..Default::default()
        };
        let m = read_matrix("0,5 1\n2 2,25\n".as_bytes(), &options)?;
        assert_eq!(m.elements(), vec![0.5, 1.0, 2.0, 2.25]);
        Ok(())
    }

    #[test]
    fn test_read_matrix_ragged_row() {
        let res = read_matrix("1 2 3\n4 5\n".as_bytes(), &ReadOptions::default());
        match res {
            Err(MatrixError::ParseFailure {
                line_number, line, ..
            }) => {
                assert_eq!(line_number, 2);
                assert_eq!(line, "4 5");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_read_matrix_bad_number() {
        let res = read_matrix("1 x\n".as_bytes(), &ReadOptions::default());
        assert!(matches!(
            res,
            Err(MatrixError::ParseFailure { line_number: 1, .. })
        ));
    }

    #[test]
    fn test_read_matrix_assumes_square() -> Result<(), MatrixError> {
        let options = ReadOptions {
            num_rows: Some(2),
            ..Default::default()
        };
        // the third row is not read, the row count being known
        let m = read_matrix("1 2\n3 4\n5 6\n".as_bytes(), &options)?;
        assert_eq!((m.num_rows(), m.num_cols()), (2, 2));

        let res = read_matrix("1 2 3\n".as_bytes(), &options);
        assert!(matches!(res, Err(MatrixError::ParseFailure { .. })));

        let res = read_matrix("1 2\n".as_bytes(), &options);
        assert!(matches!(
            res,
            Err(MatrixError::MismatchedDimension {
                left: 2,
                right: 1,
                ..
            })
        ));
        Ok(())
    }

    #[test]
    fn test_read_matrix_empty() {
        let res = read_matrix("\n\n".as_bytes(), &ReadOptions::default());
        assert!(matches!(res, Err(MatrixError::ParseFailure { .. })));
    }

    #[test]
    fn test_read_back_display() -> Result<(), MatrixError> {
        let m = matrices::create(2, 3, &[0.5, 0.0, 12.25, 0.0, -0.75, f64::NAN])?;
        let text = m.to_string();
        let back = read_matrix(text.as_bytes(), &ReadOptions::default())?;
        assert!(matrices::equals(&m, &back, 0.0, false));
        Ok(())
    }

    #[test]
    fn test_read_matrix_file_missing() {
        let res = read_matrix_file("/nonexistent/matrix.txt", &ReadOptions::default());
        assert!(matches!(res, Err(MatrixError::Io(_))));
    }
}
