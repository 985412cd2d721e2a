use crate::{affine::AffineTransform2D, dense, error::MatrixError};

define_fixed_matrix!(
    /// A 3x3 matrix, typically the affine transform of a two-dimensional coordinate.
    ///
    /// ```text
    /// ┌             ┐
    /// │ m00 m01 m02 │
    /// │ m10 m11 m12 │
    /// │ m20 m21 m22 │
    /// └             ┘
    /// ```
    Matrix3,
    3,
    [
        m00 => (0, 0), m01 => (0, 1), m02 => (0, 2),
        m10 => (1, 0), m11 => (1, 1), m12 => (1, 2),
        m20 => (2, 0), m21 => (2, 1), m22 => (2, 2),
    ],
    affine: [m20, m21] m22
);

impl Matrix3 {
    /// Create a matrix from its elements in row-major order.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn new(
        m00: f64,
        m01: f64,
        m02: f64,
        m10: f64,
        m11: f64,
        m12: f64,
        m20: f64,
        m21: f64,
        m22: f64,
    ) -> Self {
        Self {
            m00,
            m01,
            m02,
            m10,
            m11,
            m12,
            m20,
            m21,
            m22,
        }
    }

    /// Returns the transposed matrix.
    pub fn transposed(&self) -> Self {
        Self::new(
            self.m00, self.m10, self.m20, self.m01, self.m11, self.m21, self.m02, self.m12,
            self.m22,
        )
    }

    /// Returns the product `self × other`, computed by the dense primitive.
    pub fn product(&self, other: &Self) -> Self {
        let product = &self.to_faer() * &other.to_faer();
        Self::from_faer(&product)
    }

    /// Returns the inverse.
    ///
    /// Affine matrices are inverted in closed form through [`AffineTransform2D`]; other matrices
    /// go through the dense LU inversion.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SingularMatrix`] if the matrix has no inverse.
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        if self.is_affine() {
            let affine = AffineTransform2D::from_matrix(self)?;
            return Ok(affine.inverse()?.to_matrix());
        }
        Self::from_elements(&dense::invert(&self.to_array(), 3)?)
    }

    /// Returns the equivalent six-parameter affine transform.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotAffine`] if the last row is not `[0, 0, 1]`.
    pub fn to_affine_transform_2d(&self) -> Result<AffineTransform2D, MatrixError> {
        AffineTransform2D::from_matrix(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixOps;
    use approx::assert_relative_eq;

    #[test]
    fn test_matrix3_invert_affine() -> Result<(), MatrixError> {
        let m = Matrix3::new(2.0, 0.0, 4.0, 0.0, 8.0, -16.0, 0.0, 0.0, 1.0);
        let mut inv = m;
        inv.invert()?;
        assert_eq!(
            inv.to_array(),
            [0.5, 0.0, -2.0, 0.0, 0.125, 2.0, 0.0, 0.0, 1.0]
        );
        assert!((m * inv).is_identity());
        Ok(())
    }

    #[test]
    fn test_matrix3_invert_general() -> Result<(), MatrixError> {
        let m = Matrix3::new(2.0, 1.0, 0.0, 1.0, 3.0, 1.0, 0.0, 1.0, 4.0);
        let inv = m.inverse()?;
        assert!(!inv.is_affine());
        assert!((m * inv).is_identity_within(1e-12));
        Ok(())
    }

    #[test]
    fn test_matrix3_singular() {
        let m = Matrix3::new(1.0, 2.0, 3.0, 2.0, 4.0, 6.0, 0.0, 0.0, 1.0);
        assert!(matches!(m.inverse(), Err(MatrixError::SingularMatrix)));
    }

    #[test]
    fn test_matrix3_product() {
        let a = Matrix3::new(1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0);
        let p = a * Matrix3::IDENTITY;
        assert_eq!(p, a);
        let t = a * a.transposed();
        assert_relative_eq!(t.m00, 14.0);
        assert_relative_eq!(t.m12, 122.0);
    }

    #[test]
    fn test_matrix3_access() -> Result<(), MatrixError> {
        let mut m = Matrix3::ZERO;
        m.set(1, 2, 7.0)?;
        assert_eq!(m.m12, 7.0);
        assert_eq!(m.get(1, 2)?, 7.0);
        assert!(matches!(
            m.set(3, 0, 1.0),
            Err(MatrixError::IndexOutOfRange { index: 3, bound: 3 })
        ));
        m.set_identity();
        assert!(m.is_identity());
        assert!(m.to_affine_transform_2d()?.is_identity_within(0.0));
        Ok(())
    }
}
