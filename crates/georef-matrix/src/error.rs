use crate::axis::AxisDirection;

/// An error type for the matrix operations.
#[derive(thiserror::Error, Debug)]
pub enum MatrixError {
    /// The number of elements does not match the declared matrix size.
    #[error("Data length ({actual}) does not match the matrix size ({expected})")]
    IllegalSize {
        /// Length required by the declared dimensions.
        expected: usize,
        /// Length actually provided.
        actual: usize,
    },

    /// A row, column or dimension index is outside the valid range.
    #[error("Index {index} is out of range [0, {bound})")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Exclusive upper bound of the valid range.
        bound: usize,
    },

    /// The matrix has no inverse.
    #[error("The matrix is singular and cannot be inverted")]
    SingularMatrix,

    /// The matrix is not affine where an affine matrix is required.
    #[error("The matrix is not affine")]
    NotAffine,

    /// The matrix is not the 3x3 matrix of a two-dimensional transform.
    #[error("Expected a 3x3 matrix for a two-dimensional transform, got {rows}x{cols}")]
    NotTwoDimensional {
        /// Number of rows of the matrix.
        rows: usize,
        /// Number of columns of the matrix.
        cols: usize,
    },

    /// Two source axes are colinear with the same target axis.
    #[error("Axis directions {source_axis:?} and {target_axis:?} are colinear")]
    ColinearAxis {
        /// The source axis found as a second match.
        source_axis: AxisDirection,
        /// The target axis being mapped.
        target_axis: AxisDirection,
    },

    /// No source axis can be mapped to the target axis.
    #[error("Cannot map axis {0:?} to any source axis")]
    NoSourceAxis(AxisDirection),

    /// Two objects which must share a dimension do not.
    #[error("Mismatched dimensions: {left_name} ({left}) != {right_name} ({right})")]
    MismatchedDimension {
        /// Label for the left-hand object.
        left_name: &'static str,
        /// Dimension of the left-hand object.
        left: usize,
        /// Label for the right-hand object.
        right_name: &'static str,
        /// Dimension of the right-hand object.
        right: usize,
    },

    /// The text representation of a matrix could not be parsed.
    #[error("Parse error at line {line_number} \"{line}\": {reason}")]
    ParseFailure {
        /// One-based number of the offending line.
        line_number: usize,
        /// Content of the offending line.
        line: String,
        /// What went wrong.
        reason: String,
    },

    /// Error reading a matrix file.
    #[error("error reading matrix file")]
    Io(#[from] std::io::Error),
}

impl MatrixError {
    /// Shortcut for the common "expected n elements, got m" failure.
    pub(crate) fn illegal_size(expected: usize, actual: usize) -> Self {
        MatrixError::IllegalSize { expected, actual }
    }

    /// Returns an error if `index` is not in `[0, bound)`.
    pub(crate) fn check_index(index: usize, bound: usize) -> Result<(), Self> {
        if index < bound {
            Ok(())
        } else {
            Err(MatrixError::IndexOutOfRange { index, bound })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_index() {
        assert!(MatrixError::check_index(2, 3).is_ok());
        assert!(matches!(
            MatrixError::check_index(3, 3),
            Err(MatrixError::IndexOutOfRange { index: 3, bound: 3 })
        ));
    }

    #[test]
    fn test_error_messages() {
        let err = MatrixError::illegal_size(4, 3);
        assert_eq!(
            err.to_string(),
            "Data length (3) does not match the matrix size (4)"
        );
        let err = MatrixError::NoSourceAxis(AxisDirection::North);
        assert_eq!(err.to_string(), "Cannot map axis North to any source axis");
    }
}
