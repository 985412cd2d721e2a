use crate::{dense, error::MatrixError};

define_fixed_matrix!(
    /// A 4x4 matrix, typically the affine transform of a three-dimensional coordinate.
    Matrix4,
    4,
    [
        m00 => (0, 0), m01 => (0, 1), m02 => (0, 2), m03 => (0, 3),
        m10 => (1, 0), m11 => (1, 1), m12 => (1, 2), m13 => (1, 3),
        m20 => (2, 0), m21 => (2, 1), m22 => (2, 2), m23 => (2, 3),
        m30 => (3, 0), m31 => (3, 1), m32 => (3, 2), m33 => (3, 3),
    ],
    affine: [m30, m31, m32] m33
);

impl Matrix4 {
    /// Create a matrix from its rows.
    pub fn from_rows(rows: [[f64; 4]; 4]) -> Self {
        let [[m00, m01, m02, m03], [m10, m11, m12, m13], [m20, m21, m22, m23], [m30, m31, m32, m33]] =
            rows;
        Self {
            m00,
            m01,
            m02,
            m03,
            m10,
            m11,
            m12,
            m13,
            m20,
            m21,
            m22,
            m23,
            m30,
            m31,
            m32,
            m33,
        }
    }

    /// Returns the transposed matrix.
    pub fn transposed(&self) -> Self {
        Self::from_rows([
            [self.m00, self.m10, self.m20, self.m30],
            [self.m01, self.m11, self.m21, self.m31],
            [self.m02, self.m12, self.m22, self.m32],
            [self.m03, self.m13, self.m23, self.m33],
        ])
    }

    /// Returns the product `self × other`, computed by the dense primitive.
    pub fn product(&self, other: &Self) -> Self {
        let product = &self.to_faer() * &other.to_faer();
        Self::from_faer(&product)
    }

    /// Returns the inverse computed by the dense LU inversion.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SingularMatrix`] if the matrix has no inverse.
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        Self::from_elements(&dense::invert(&self.to_array(), 4)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MatrixOps;

    #[test]
    fn test_matrix4_invert() -> Result<(), MatrixError> {
        let m = Matrix4::from_rows([
            [2.0, 0.0, 0.0, 10.0],
            [0.0, 4.0, 0.0, 20.0],
            [0.0, 0.0, 0.5, 30.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let mut inv = m;
        inv.invert()?;
        assert!(inv.is_affine());
        assert!((m * inv).is_identity_within(1e-12));
        assert!((inv.m03 + 5.0).abs() < 1e-12);
        assert!((inv.m23 + 60.0).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn test_matrix4_singular() {
        let mut m = Matrix4::IDENTITY;
        m.m22 = 0.0;
        assert!(matches!(m.inverse(), Err(MatrixError::SingularMatrix)));
    }

    #[test]
    fn test_matrix4_transpose() {
        let mut m = Matrix4::IDENTITY;
        m.m03 = 5.0;
        m.transpose();
        assert_eq!(m.m30, 5.0);
        assert_eq!(m.m03, 0.0);
        assert!(!m.is_affine());
    }

    #[test]
    fn test_matrix4_from_elements_size() {
        assert!(matches!(
            Matrix4::from_elements(&[1.0; 9]),
            Err(MatrixError::IllegalSize {
                expected: 16,
                actual: 9
            })
        ));
    }
}
