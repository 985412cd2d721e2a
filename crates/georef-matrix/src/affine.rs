//! Two-dimensional affine transforms as six parameters.
//!
//! An [`AffineTransform2D`] is the compact form of a 3x3 affine matrix:
//!
//! ```text
//! ┌                                     ┐
//! │ scale_x  shear_x  translate_x       │
//! │ shear_y  scale_y  translate_y       │
//! │ 0        0        1                 │
//! └                                     ┘
//! ```

use crate::{error::MatrixError, fixed::Matrix3};

/// A two-dimensional affine transform.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AffineTransform2D {
    /// Scale factor along x (matrix element 0,0).
    pub scale_x: f64,
    /// Shear applied to y when computing x (matrix element 0,1).
    pub shear_x: f64,
    /// Translation along x (matrix element 0,2).
    pub translate_x: f64,
    /// Shear applied to x when computing y (matrix element 1,0).
    pub shear_y: f64,
    /// Scale factor along y (matrix element 1,1).
    pub scale_y: f64,
    /// Translation along y (matrix element 1,2).
    pub translate_y: f64,
}

impl Default for AffineTransform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl AffineTransform2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        shear_x: 0.0,
        translate_x: 0.0,
        shear_y: 0.0,
        scale_y: 1.0,
        translate_y: 0.0,
    };

    /// Create a transform from its parameters in matrix row-major order.
    pub fn new(
        scale_x: f64,
        shear_x: f64,
        translate_x: f64,
        shear_y: f64,
        scale_y: f64,
        translate_y: f64,
    ) -> Self {
        Self {
            scale_x,
            shear_x,
            translate_x,
            shear_y,
            scale_y,
            translate_y,
        }
    }

    /// Create the transform equivalent to a 3x3 matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::NotAffine`] if the last row of the matrix is not `[0, 0, 1]`.
    pub fn from_matrix(matrix: &Matrix3) -> Result<Self, MatrixError> {
        if !matrix.is_affine() {
            return Err(MatrixError::NotAffine);
        }
        Ok(Self::new(
            matrix.m00, matrix.m01, matrix.m02, matrix.m10, matrix.m11, matrix.m12,
        ))
    }

    /// Returns the equivalent 3x3 matrix.
    pub fn to_matrix(&self) -> Matrix3 {
        Matrix3::new(
            self.scale_x,
            self.shear_x,
            self.translate_x,
            self.shear_y,
            self.scale_y,
            self.translate_y,
            0.0,
            0.0,
            1.0,
        )
    }

    /// Determinant of the linear part.
    #[inline]
    pub fn determinant(&self) -> f64 {
        self.scale_x * self.scale_y - self.shear_x * self.shear_y
    }

    /// Whether every parameter is within `tolerance` of the identity.
    pub fn is_identity_within(&self, tolerance: f64) -> bool {
        (self.scale_x - 1.0).abs() <= tolerance
            && (self.scale_y - 1.0).abs() <= tolerance
            && self.shear_x.abs() <= tolerance
            && self.shear_y.abs() <= tolerance
            && self.translate_x.abs() <= tolerance
            && self.translate_y.abs() <= tolerance
    }

    /// Returns the inverse transform.
    ///
    /// Transforms without shear are inverted with one division per axis, which keeps exact
    /// results for power-of-two scales.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::SingularMatrix`] if the determinant is zero or not finite.
    pub fn inverse(&self) -> Result<Self, MatrixError> {
        if self.shear_x == 0.0 && self.shear_y == 0.0 {
            if self.scale_x == 0.0 || self.scale_y == 0.0 {
                return Err(MatrixError::SingularMatrix);
            }
            return Ok(Self::new(
                1.0 / self.scale_x,
                0.0,
                -self.translate_x / self.scale_x,
                0.0,
                1.0 / self.scale_y,
                -self.translate_y / self.scale_y,
            ));
        }

        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return Err(MatrixError::SingularMatrix);
        }
        Ok(Self::new(
            self.scale_y / det,
            -self.shear_x / det,
            (self.shear_x * self.translate_y - self.scale_y * self.translate_x) / det,
            -self.shear_y / det,
            self.scale_x / det,
            (self.shear_y * self.translate_x - self.scale_x * self.translate_y) / det,
        ))
    }

    /// Sets `self` to `self × other`: `other` is applied first.
    pub fn concatenate(&mut self, other: &Self) {
        *self = Self::new(
            self.scale_x * other.scale_x + self.shear_x * other.shear_y,
            self.scale_x * other.shear_x + self.shear_x * other.scale_y,
            self.scale_x * other.translate_x + self.shear_x * other.translate_y + self.translate_x,
            self.shear_y * other.scale_x + self.scale_y * other.shear_y,
            self.shear_y * other.shear_x + self.scale_y * other.scale_y,
            self.shear_y * other.translate_x + self.scale_y * other.translate_y + self.translate_y,
        );
    }

    /// Sets `self` to `other × self`: `other` is applied last.
    pub fn pre_concatenate(&mut self, other: &Self) {
        let mut result = *other;
        result.concatenate(self);
        *self = result;
    }

    /// Apply the transform to a point.
    #[inline]
    pub fn transform_point(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.scale_x * x + self.shear_x * y + self.translate_x,
            self.shear_y * x + self.scale_y * y + self.translate_y,
        )
    }

    /// Magnitude of the first row of the linear part.
    pub fn scale_x0(&self) -> f64 {
        self.scale_x.hypot(self.shear_x)
    }

    /// Magnitude of the second row of the linear part.
    pub fn scale_y0(&self) -> f64 {
        self.shear_y.hypot(self.scale_y)
    }

    /// An estimate of the overall scale, the mean of [`scale_x0`](Self::scale_x0) and
    /// [`scale_y0`](Self::scale_y0).
    ///
    /// This is an approximation suited to choosing tolerances or display resolutions, not a
    /// canonical definition of scale for sheared or anisotropic transforms.
    pub fn global_scale(&self) -> f64 {
        0.5 * (self.scale_x0() + self.scale_y0())
    }

    /// Snap the parameters to integers when they are within `tolerance` of one.
    ///
    /// Nothing changes unless the four scale and shear terms are all almost integers and the
    /// rounded linear part keeps a nonzero term in each row. When that holds, the two
    /// translation terms are rounded independently of each other.
    pub fn round_if_almost_integer(&mut self, tolerance: f64) {
        let near = |v: f64| {
            let r = v.round();
            ((r - v).abs() <= tolerance).then_some(r)
        };
        let (Some(m00), Some(m01), Some(m10), Some(m11)) = (
            near(self.scale_x),
            near(self.shear_x),
            near(self.shear_y),
            near(self.scale_y),
        ) else {
            return;
        };
        if (m00 == 0.0 && m01 == 0.0) || (m10 == 0.0 && m11 == 0.0) {
            return;
        }
        self.scale_x = m00;
        self.shear_x = m01;
        self.shear_y = m10;
        self.scale_y = m11;
        if let Some(tx) = near(self.translate_x) {
            self.translate_x = tx;
        }
        if let Some(ty) = near(self.translate_y) {
            self.translate_y = ty;
        }
    }
}

impl From<AffineTransform2D> for Matrix3 {
    fn from(affine: AffineTransform2D) -> Self {
        affine.to_matrix()
    }
}

impl TryFrom<&Matrix3> for AffineTransform2D {
    type Error = MatrixError;

    fn try_from(matrix: &Matrix3) -> Result<Self, Self::Error> {
        Self::from_matrix(matrix)
    }
}
