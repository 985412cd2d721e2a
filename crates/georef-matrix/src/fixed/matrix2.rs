use crate::error::MatrixError;

define_fixed_matrix!(
    /// A 2x2 matrix, typically the affine transform of a one-dimensional coordinate.
    ///
    /// ```text
    /// ┌         ┐
    /// │ m00 m01 │
    /// │ m10 m11 │
    /// └         ┘
    /// ```
    Matrix2,
    2,
    [
        m00 => (0, 0), m01 => (0, 1),
        m10 => (1, 0), m11 => (1, 1),
    ],
    affine: [m10] m11
);

impl Matrix2 {
    /// Create a matrix from its elements in row-major order.
    #[inline]
    pub fn new(m00: f64, m01: f64, m10: f64, m11: f64) -> Self {
        Self { m00, m01, m10, m11 }
    }

    /// The determinant `m00·m11 − m01·m10`.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.m00 * self.m11 - self.m01 * self.m10
    }

    /// Returns the transposed matrix.
    #[inline]
    pub fn transposed(&self) -> Self {
        Self::new(self.m00, self.m10, self.m01, self.m11)
    }

    /// Returns the product `self × other`.
    pub fn product(&self, other: &Self) -> Self {
        Self::new(
            self.m00 * other.m00 + self.m01 * other.m10,
            self.m00 * other.m01 + self.m01 * other.m11,
            self.m10 * other.m00 + self.m11 * other.m10,
            self.m10 * other.m01 + self.m11 * other.m11,
        )
    }

    /// Returns the inverse computed from the adjugate.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SingularMatrix`] if the determinant is exactly zero.
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(MatrixError::SingularMatrix);
        }
        Ok(Self::new(
            self.m11 / det,
            -self.m01 / det,
            -self.m10 / det,
            self.m00 / det,
        ))
    }
}
