//! Bridge to the `faer` dense matrix primitive.
//!
//! Matrices in this crate are stored row-major; these helpers copy them into `faer::Mat` for the
//! products and inversions that are not written in closed form.

use faer::prelude::SolverCore;

use crate::error::MatrixError;

/// Copy a row-major `rows x cols` slice into a faer matrix.
///
/// PRECONDITION: `elements.len() == rows * cols`.
pub(crate) fn to_faer(elements: &[f64], rows: usize, cols: usize) -> faer::Mat<f64> {
    faer::Mat::<f64>::from_fn(rows, cols, |i, j| elements[i * cols + j])
}

/// Copy a faer matrix into a row-major vector.
pub(crate) fn from_faer(mat: &faer::Mat<f64>) -> Vec<f64> {
    let mut out = Vec::with_capacity(mat.nrows() * mat.ncols());
    for i in 0..mat.nrows() {
        for j in 0..mat.ncols() {
            out.push(mat.read(i, j));
        }
    }
    out
}

/// Compute the `lhs_rows x rhs_cols` product of two row-major matrices.
///
/// # Errors
///
/// Returns [`MatrixError::IllegalSize`] if `lhs_cols != rhs_rows`.
pub(crate) fn multiply(
    lhs: &[f64],
    (lhs_rows, lhs_cols): (usize, usize),
    rhs: &[f64],
    (rhs_rows, rhs_cols): (usize, usize),
) -> Result<Vec<f64>, MatrixError> {
    if lhs_cols != rhs_rows {
        return Err(MatrixError::illegal_size(lhs_cols, rhs_rows));
    }
    let a = to_faer(lhs, lhs_rows, lhs_cols);
    let b = to_faer(rhs, rhs_rows, rhs_cols);
    let product = &a * &b;
    Ok(from_faer(&product))
}

/// Invert a row-major `size x size` matrix through a partial-pivoting LU decomposition.
///
/// The matrix is singular when its determinant is exactly zero, or when a finite input yields a
/// non-finite inverse (a zero pivot). A small nonzero determinant is not singular. Matrices
/// containing NaN are inverted as is and propagate NaN.
///
/// # Errors
///
/// Returns [`MatrixError::SingularMatrix`] if the matrix has no inverse.
pub(crate) fn invert(elements: &[f64], size: usize) -> Result<Vec<f64>, MatrixError> {
    if elements.len() != size * size {
        return Err(MatrixError::illegal_size(size * size, elements.len()));
    }
    let mat = to_faer(elements, size, size);

    if mat.determinant() == 0.0 {
        return Err(MatrixError::SingularMatrix);
    }

    let inverse = from_faer(&mat.partial_piv_lu().inverse());
    let finite_input = elements.iter().all(|v| v.is_finite());
    if finite_input && inverse.iter().any(|v| !v.is_finite()) {
        return Err(MatrixError::SingularMatrix);
    }
    Ok(inverse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_faer_roundtrip() {
        let m = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let mat = to_faer(&m, 2, 3);
        assert_eq!(mat.read(1, 0), 4.0);
        assert_eq!(from_faer(&mat), m.to_vec());
    }

    #[test]
    fn test_multiply_rectangular() -> Result<(), MatrixError> {
        let a = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let b = [1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
        let c = multiply(&a, (2, 3), &b, (3, 2))?;
        assert_eq!(c, vec![4.0, 5.0, 10.0, 11.0]);
        assert!(multiply(&a, (2, 3), &b, (2, 3)).is_err());
        Ok(())
    }

    #[test]
    fn test_invert_3x3() -> Result<(), MatrixError> {
        let m = [2.0, 0.0, 1.0, 0.0, 4.0, 0.0, 0.0, 0.0, 1.0];
        let inv = invert(&m, 3)?;
        let expected = [0.5, 0.0, -0.5, 0.0, 0.25, 0.0, 0.0, 0.0, 1.0];
        for (a, b) in inv.iter().zip(expected.iter()) {
            assert_relative_eq!(a, b, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_invert_singular() {
        // second row is twice the first
        let m = [1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 1.0, 1.0];
        assert!(matches!(invert(&m, 3), Err(MatrixError::SingularMatrix)));
        let m = [1.0, 2.0, 2.0, 4.0];
        assert!(matches!(invert(&m, 2), Err(MatrixError::SingularMatrix)));
        let m = [1.0, 2.0, 3.0, 0.0, 0.0, 0.0, 4.0, 5.0, 6.0];
        assert!(matches!(invert(&m, 3), Err(MatrixError::SingularMatrix)));
    }

    #[test]
    fn test_invert_small_scale_large_translation() -> Result<(), MatrixError> {
        // determinant 1e-18, far below any bound scaled by the translation magnitudes
        let m = [
            1e-6, 0.0, 0.0, 100.0, //
            0.0, 1e-6, 0.0, 100.0, //
            0.0, 0.0, 1e-6, 100.0, //
            0.0, 0.0, 0.0, 1.0,
        ];
        let inv = invert(&m, 4)?;
        assert_relative_eq!(inv[0], 1e6, max_relative = 1e-12);
        assert_relative_eq!(inv[3], -1e8, max_relative = 1e-12);
        assert_relative_eq!(inv[15], 1.0, max_relative = 1e-12);
        Ok(())
    }
}
