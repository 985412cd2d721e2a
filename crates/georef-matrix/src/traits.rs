use crate::{error::MatrixError, ops};

/// The operation contract implemented by every matrix representation.
///
/// Elements are addressed as `(row, col)` and exchanged in row-major order. Implementations
/// mutate `self` in place; [`Clone`] is the deep value copy.
pub trait MatrixOps: Clone {
    /// Number of rows (target dimensions + 1 for an affine transform).
    fn num_rows(&self) -> usize;

    /// Number of columns (source dimensions + 1 for an affine transform).
    fn num_cols(&self) -> usize;

    /// Whether the matrix has as many rows as columns.
    fn is_square(&self) -> bool {
        self.num_rows() == self.num_cols()
    }

    /// Returns the element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if the position is outside the matrix.
    fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError>;

    /// Sets the element at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if the position is outside the matrix.
    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError>;

    /// Returns a copy of all elements in row-major order.
    fn elements(&self) -> Vec<f64>;

    /// Replaces all elements from a row-major slice.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IllegalSize`] if `elements.len() != num_rows * num_cols`.
    fn set_elements(&mut self, elements: &[f64]) -> Result<(), MatrixError>;

    /// Sets all elements to zero.
    fn set_zero(&mut self);

    /// Sets the diagonal to one and all other elements to zero.
    fn set_identity(&mut self);

    /// Whether the matrix is exactly the identity.
    fn is_identity(&self) -> bool {
        self.is_identity_within(0.0)
    }

    /// Whether every diagonal element is within `tolerance` of 1 and every other element within
    /// `tolerance` of 0. Non-square matrices are never identity.
    fn is_identity_within(&self, tolerance: f64) -> bool {
        ops::is_identity(
            &self.elements(),
            self.num_rows(),
            self.num_cols(),
            tolerance,
        )
    }

    /// Whether the matrix is square and its last row is exactly `[0, ..., 0, 1]`.
    fn is_affine(&self) -> bool {
        ops::is_affine(&self.elements(), self.num_rows(), self.num_cols())
    }

    /// Negates all elements.
    fn negate(&mut self);

    /// Transposes the matrix in place.
    fn transpose(&mut self);

    /// Inverts the matrix in place.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SingularMatrix`] if the matrix has no inverse. The matrix is left
    /// unchanged in that case.
    fn invert(&mut self) -> Result<(), MatrixError>;

    /// Sets `self` to `self × other`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IllegalSize`] if `self.num_cols() != other.num_rows()`.
    fn multiply(&mut self, other: &Self) -> Result<(), MatrixError>;

    /// Divides every column by its Euclidean magnitude and returns the magnitudes.
    ///
    /// Columns of magnitude zero are left unchanged.
    fn normalize_columns(&mut self) -> Vec<f64>;

    /// Element-wise comparison with an absolute tolerance.
    ///
    /// Matrices of different shapes are never equal. NaN equals NaN and infinities equal
    /// infinities of the same sign.
    fn equals_within(&self, other: &Self, tolerance: f64) -> bool {
        self.num_rows() == other.num_rows()
            && self.num_cols() == other.num_cols()
            && self
                .elements()
                .iter()
                .zip(other.elements().iter())
                .all(|(&a, &b)| ops::values_equal(a, b, tolerance))
    }

    /// Applies the matrix to a coordinate tuple.
    ///
    /// A point with `num_cols` coordinates is multiplied as is; a point with `num_cols - 1`
    /// coordinates is handled in homogeneous coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IllegalSize`] for any other point length.
    fn transform_point(&self, point: &[f64]) -> Result<Vec<f64>, MatrixError> {
        ops::transform_point(&self.elements(), self.num_rows(), self.num_cols(), point)
            .ok_or_else(|| MatrixError::illegal_size(self.num_cols(), point.len()))
    }
}
