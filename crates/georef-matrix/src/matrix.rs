use crate::{
    dense,
    error::MatrixError,
    fixed::{Matrix1, Matrix2, Matrix3, Matrix4},
    general::GeneralMatrix,
    matrices,
    traits::MatrixOps,
};

/// A matrix in the most suitable representation for its size.
///
/// Square matrices of sizes 1 to 4 use the closed-form fixed types; every other shape uses
/// [`GeneralMatrix`]. Use [`Matrix::to_optimal`] to move a general matrix of a small square
/// shape to its fixed representation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Matrix {
    /// A 1x1 matrix.
    Size1(Matrix1),
    /// A 2x2 matrix.
    Size2(Matrix2),
    /// A 3x3 matrix.
    Size3(Matrix3),
    /// A 4x4 matrix.
    Size4(Matrix4),
    /// A matrix of any other shape.
    General(GeneralMatrix),
}

/// Apply the same expression to whichever representation the matrix holds.
macro_rules! dispatch {
    ($matrix:expr, $m:ident => $body:expr) => {
        match $matrix {
            Matrix::Size1($m) => $body,
            Matrix::Size2($m) => $body,
            Matrix::Size3($m) => $body,
            Matrix::Size4($m) => $body,
            Matrix::General($m) => $body,
        }
    };
}

impl Matrix {
    /// Create a square identity matrix.
    pub fn identity(size: usize) -> Self {
        Self::diagonal(size, size)
    }

    /// Create a matrix with ones on the diagonal and zeros elsewhere.
    pub fn diagonal(num_rows: usize, num_cols: usize) -> Self {
        if num_rows != num_cols {
            return Matrix::General(GeneralMatrix::diagonal(num_rows, num_cols));
        }
        match num_rows {
            1 => Matrix::Size1(Matrix1::IDENTITY),
            2 => Matrix::Size2(Matrix2::IDENTITY),
            3 => Matrix::Size3(Matrix3::IDENTITY),
            4 => Matrix::Size4(Matrix4::IDENTITY),
            size => Matrix::General(GeneralMatrix::identity(size)),
        }
    }

    /// Create a matrix filled with zeros.
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        let mut m = Self::diagonal(num_rows, num_cols);
        m.set_zero();
        m
    }

    /// Create a matrix from row-major elements.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IllegalSize`] if `elements.len() != num_rows * num_cols`.
    pub fn from_elements(
        num_rows: usize,
        num_cols: usize,
        elements: &[f64],
    ) -> Result<Self, MatrixError> {
        if elements.len() != num_rows * num_cols {
            return Err(MatrixError::illegal_size(
                num_rows * num_cols,
                elements.len(),
            ));
        }
        if num_rows != num_cols {
            return Ok(Matrix::General(GeneralMatrix::from_elements(
                num_rows,
                num_cols,
                elements.to_vec(),
            )?));
        }
        Ok(match num_rows {
            1 => Matrix::Size1(Matrix1::from_elements(elements)?),
            2 => Matrix::Size2(Matrix2::from_elements(elements)?),
            3 => Matrix::Size3(Matrix3::from_elements(elements)?),
            4 => Matrix::Size4(Matrix4::from_elements(elements)?),
            _ => Matrix::General(GeneralMatrix::from_elements(
                num_rows,
                num_cols,
                elements.to_vec(),
            )?),
        })
    }

    /// Whether the matrix already uses the most suitable representation for its shape.
    pub fn is_optimal(&self) -> bool {
        match self {
            Matrix::General(m) => !(m.is_square() && (1..=4).contains(&m.num_rows())),
            _ => true,
        }
    }

    /// Returns a copy in the most suitable representation for its shape.
    pub fn to_optimal(&self) -> Self {
        match self {
            Matrix::General(m) if !self.is_optimal() => Self::from_general(m),
            other => other.clone(),
        }
    }

    /// Copy a general matrix into the most suitable representation for its shape.
    pub fn from_general(m: &GeneralMatrix) -> Self {
        let size = m.num_rows();
        if size != m.num_cols() {
            return Matrix::General(m.clone());
        }
        match size {
            1 => Matrix::Size1(Matrix1::from_fn(|row, col| m.at(row, col))),
            2 => Matrix::Size2(Matrix2::from_fn(|row, col| m.at(row, col))),
            3 => Matrix::Size3(Matrix3::from_fn(|row, col| m.at(row, col))),
            4 => Matrix::Size4(Matrix4::from_fn(|row, col| m.at(row, col))),
            _ => Matrix::General(m.clone()),
        }
    }

    /// Convert into the general representation.
    pub fn into_general(self) -> GeneralMatrix {
        match self {
            Matrix::General(m) => m,
            other => {
                let (rows, cols) = (other.num_rows(), other.num_cols());
                let elements = other.elements();
                GeneralMatrix::from_fn(rows, cols, |row, col| elements[row * cols + col])
            }
        }
    }

    /// Copy into a dense faer matrix.
    pub fn to_faer(&self) -> faer::Mat<f64> {
        match self {
            Matrix::Size1(m) => m.to_faer(),
            Matrix::Size2(m) => m.to_faer(),
            Matrix::Size3(m) => m.to_faer(),
            Matrix::Size4(m) => m.to_faer(),
            Matrix::General(m) => dense::to_faer(m.as_slice(), m.num_rows(), m.num_cols()),
        }
    }

    /// Whether both matrices use the same representation.
    pub fn same_representation(&self, other: &Self) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

impl MatrixOps for Matrix {
    fn num_rows(&self) -> usize {
        dispatch!(self, m => m.num_rows())
    }

    fn num_cols(&self) -> usize {
        dispatch!(self, m => m.num_cols())
    }

    fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        dispatch!(self, m => m.get(row, col))
    }

    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        dispatch!(self, m => m.set(row, col, value))
    }

    fn elements(&self) -> Vec<f64> {
        dispatch!(self, m => m.elements())
    }

    fn set_elements(&mut self, elements: &[f64]) -> Result<(), MatrixError> {
        dispatch!(self, m => m.set_elements(elements))
    }

    fn set_zero(&mut self) {
        dispatch!(self, m => m.set_zero())
    }

    fn set_identity(&mut self) {
        dispatch!(self, m => m.set_identity())
    }

    fn is_identity_within(&self, tolerance: f64) -> bool {
        dispatch!(self, m => m.is_identity_within(tolerance))
    }

    fn is_affine(&self) -> bool {
        dispatch!(self, m => MatrixOps::is_affine(m))
    }

    fn negate(&mut self) {
        dispatch!(self, m => m.negate())
    }

    fn transpose(&mut self) {
        dispatch!(self, m => m.transpose())
    }

    /// Inverts through [`matrices::invert`].
    fn invert(&mut self) -> Result<(), MatrixError> {
        *self = matrices::invert(self)?;
        Ok(())
    }

    /// Multiplies through [`matrices::multiply`].
    fn multiply(&mut self, other: &Self) -> Result<(), MatrixError> {
        *self = matrices::multiply(self, other)?;
        Ok(())
    }

    fn normalize_columns(&mut self) -> Vec<f64> {
        dispatch!(self, m => m.normalize_columns())
    }
}

impl From<Matrix1> for Matrix {
    fn from(m: Matrix1) -> Self {
        Matrix::Size1(m)
    }
}

impl From<Matrix2> for Matrix {
    fn from(m: Matrix2) -> Self {
        Matrix::Size2(m)
    }
}

impl From<Matrix3> for Matrix {
    fn from(m: Matrix3) -> Self {
        Matrix::Size3(m)
    }
}

impl From<Matrix4> for Matrix {
    fn from(m: Matrix4) -> Self {
        Matrix::Size4(m)
    }
}

impl From<GeneralMatrix> for Matrix {
    fn from(m: GeneralMatrix) -> Self {
        Matrix::General(m)
    }
}
