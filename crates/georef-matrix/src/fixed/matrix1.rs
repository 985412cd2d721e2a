use crate::error::MatrixError;

define_fixed_matrix!(
    /// A 1x1 matrix, the degenerate transform of a zero-dimensional space.
    Matrix1,
    1,
    [m00 => (0, 0)],
    affine: [] m00
);

impl Matrix1 {
    /// Create a matrix holding a single element.
    #[inline]
    pub fn new(m00: f64) -> Self {
        Self { m00 }
    }

    /// Returns the transposed matrix, which is the matrix itself.
    #[inline]
    pub fn transposed(&self) -> Self {
        *self
    }

    /// Returns the product `self × other`.
    #[inline]
    pub fn product(&self, other: &Self) -> Self {
        Self::new(self.m00 * other.m00)
    }

    /// Returns the reciprocal.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SingularMatrix`] if the element is zero.
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        if self.m00 == 0.0 {
            return Err(MatrixError::SingularMatrix);
        }
        Ok(Self::new(1.0 / self.m00))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixOps;

    #[test]
    fn test_matrix1_invert() -> Result<(), MatrixError> {
        let mut m = Matrix1::new(4.0);
        m.invert()?;
        assert_eq!(m.m00, 0.25);
        Ok(())
    }

    #[test]
    fn test_matrix1_singular() {
        let mut m = Matrix1::new(0.0);
        assert!(matches!(m.invert(), Err(MatrixError::SingularMatrix)));
        assert_eq!(m.m00, 0.0);
    }

    #[test]
    fn test_matrix1_access() -> Result<(), MatrixError> {
        let mut m = Matrix1::default();
        assert!(m.is_identity());
        assert!(m.is_affine());
        m.set(0, 0, 3.0)?;
        assert_eq!(m.get(0, 0)?, 3.0);
        assert!(!m.is_affine());
        assert!(matches!(
            m.get(0, 1),
            Err(MatrixError::IndexOutOfRange { index: 1, bound: 1 })
        ));
        Ok(())
    }
}
