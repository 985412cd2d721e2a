use crate::{
    affine::AffineTransform2D, axis::AxisDirection, dense, envelope::Envelope,
    error::MatrixError, fixed::Matrix3, matrix::Matrix, matrices, ops, traits::MatrixOps,
};

/// A dense matrix of arbitrary size stored in row-major order.
///
/// Products and inversions are delegated to the `faer` dense primitive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneralMatrix {
    num_rows: usize,
    num_cols: usize,
    elements: Vec<f64>,
}

impl GeneralMatrix {
    /// Create a square identity matrix.
    pub fn identity(size: usize) -> Self {
        Self::diagonal(size, size)
    }

    /// Create a `num_rows x num_cols` matrix with ones on the diagonal and zeros elsewhere.
    pub fn diagonal(num_rows: usize, num_cols: usize) -> Self {
        let mut m = Self::zeros(num_rows, num_cols);
        for i in 0..num_rows.min(num_cols) {
            m.elements[i * num_cols + i] = 1.0;
        }
        m
    }

    /// Create a `num_rows x num_cols` matrix filled with zeros.
    pub fn zeros(num_rows: usize, num_cols: usize) -> Self {
        Self {
            num_rows,
            num_cols,
            elements: vec![0.0; num_rows * num_cols],
        }
    }

    /// Create a `num_rows x num_cols` matrix whose element at `(row, col)` is `f(row, col)`.
    pub fn from_fn(
        num_rows: usize,
        num_cols: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Self {
        let elements = (0..num_rows * num_cols)
            .map(|k| f(k / num_cols, k % num_cols))
            .collect();
        Self {
            num_rows,
            num_cols,
            elements,
        }
    }

    /// Create a matrix from row-major elements.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IllegalSize`] if `elements.len() != num_rows * num_cols`.
    pub fn from_elements(
        num_rows: usize,
        num_cols: usize,
        elements: Vec<f64>,
    ) -> Result<Self, MatrixError> {
        if elements.len() != num_rows * num_cols {
            return Err(MatrixError::illegal_size(
                num_rows * num_cols,
                elements.len(),
            ));
        }
        Ok(Self {
            num_rows,
            num_cols,
            elements,
        })
    }

    /// Create a matrix from a list of rows.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IllegalSize`] if the rows do not all have the length of the first.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MatrixError> {
        let num_cols = rows.first().map_or(0, |row| row.as_ref().len());
        let mut elements = Vec::with_capacity(rows.len() * num_cols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != num_cols {
                return Err(MatrixError::illegal_size(num_cols, row.len()));
            }
            elements.extend_from_slice(row);
        }
        Ok(Self {
            num_rows: rows.len(),
            num_cols,
            elements,
        })
    }

    /// Create the 3x3 matrix of a two-dimensional affine transform.
    pub fn from_affine_transform_2d(affine: &AffineTransform2D) -> Self {
        Self {
            num_rows: 3,
            num_cols: 3,
            elements: affine.to_matrix().to_array().to_vec(),
        }
    }

    /// Create the affine transform mapping the `src` region onto the `dst` region.
    ///
    /// The result has `dst.dimension() + 1` rows and `src.dimension() + 1` columns. Each common
    /// dimension gets the scale and translation mapping the source span onto the target span;
    /// extra source dimensions are dropped and extra target dimensions are set to zero.
    pub fn from_envelopes(src: &Envelope, dst: &Envelope) -> Self {
        let src_dim = src.dimension();
        let dst_dim = dst.dimension();
        let mut m = Self::zeros(dst_dim + 1, src_dim + 1);
        for i in 0..src_dim.min(dst_dim) {
            let scale = dst.span(i) / src.span(i);
            let translate = dst.lower(i) - src.lower(i) * scale;
            m.put(i, i, scale);
            m.put(i, src_dim, translate);
        }
        m.put(dst_dim, src_dim, 1.0);
        m
    }

    /// Create the permutation matrix reordering and flipping `src_axes` into `dst_axes`.
    ///
    /// Each target axis is matched to the source axis with the same absolute direction: the
    /// element is `+1` when the directions are equal and `-1` when they are opposite.
    ///
    /// # Errors
    ///
    /// * [`MatrixError::ColinearAxis`] if two source axes match the same target axis.
    /// * [`MatrixError::NoSourceAxis`] if a target axis has no matching source axis.
    pub fn from_axis_directions(
        src_axes: &[AxisDirection],
        dst_axes: &[AxisDirection],
    ) -> Result<Self, MatrixError> {
        Self::map_axes(src_axes, dst_axes, None)
    }

    /// Create the matrix reordering `src_axes` into `dst_axes` and mapping the source region
    /// onto the target region.
    ///
    /// A reversed axis is mapped from the source upper corner, so that the region still maps
    /// onto the target region.
    ///
    /// # Errors
    ///
    /// * [`MatrixError::MismatchedDimension`] if an envelope and its axes disagree in length.
    /// * [`MatrixError::ColinearAxis`] / [`MatrixError::NoSourceAxis`] as in
    ///   [`from_axis_directions`](Self::from_axis_directions).
    pub fn from_envelopes_and_axes(
        src: &Envelope,
        src_axes: &[AxisDirection],
        dst: &Envelope,
        dst_axes: &[AxisDirection],
    ) -> Result<Self, MatrixError> {
        if src.dimension() != src_axes.len() {
            return Err(MatrixError::MismatchedDimension {
                left_name: "source envelope",
                left: src.dimension(),
                right_name: "source axes",
                right: src_axes.len(),
            });
        }
        if dst.dimension() != dst_axes.len() {
            return Err(MatrixError::MismatchedDimension {
                left_name: "target envelope",
                left: dst.dimension(),
                right_name: "target axes",
                right: dst_axes.len(),
            });
        }
        Self::map_axes(src_axes, dst_axes, Some((src, dst)))
    }

    fn map_axes(
        src_axes: &[AxisDirection],
        dst_axes: &[AxisDirection],
        envelopes: Option<(&Envelope, &Envelope)>,
    ) -> Result<Self, MatrixError> {
        let src_dim = src_axes.len();
        let mut m = Self::zeros(dst_axes.len() + 1, src_dim + 1);

        for (dst_index, &dst_dir) in dst_axes.iter().enumerate() {
            let search = dst_dir.absolute();
            let mut found = false;
            for (src_index, &src_dir) in src_axes.iter().enumerate() {
                if src_dir.absolute() != search {
                    continue;
                }
                if found {
                    return Err(MatrixError::ColinearAxis {
                        source_axis: src_dir,
                        target_axis: dst_dir,
                    });
                }
                found = true;

                let sign = if src_dir == dst_dir { 1.0 } else { -1.0 };
                match envelopes {
                    Some((src, dst)) => {
                        let scale = sign * dst.span(dst_index) / src.span(src_index);
                        let src_corner = if sign > 0.0 {
                            src.lower(src_index)
                        } else {
                            src.upper(src_index)
                        };
                        let translate = dst.lower(dst_index) - scale * src_corner;
                        m.put(dst_index, src_index, scale);
                        m.put(dst_index, src_dim, translate);
                    }
                    None => m.put(dst_index, src_index, sign),
                }
            }
            if !found {
                return Err(MatrixError::NoSourceAxis(dst_dir));
            }
        }
        m.put(dst_axes.len(), src_dim, 1.0);
        Ok(m)
    }

    /// The elements in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.elements
    }

    /// Consume the matrix and return its row-major elements.
    pub fn into_elements(self) -> Vec<f64> {
        self.elements
    }

    /// Unchecked element read.
    ///
    /// PRECONDITION: `row < num_rows` and `col < num_cols`.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> f64 {
        self.elements[row * self.num_cols + col]
    }

    /// Unchecked element write.
    ///
    /// PRECONDITION: `row < num_rows` and `col < num_cols`.
    #[inline]
    pub(crate) fn put(&mut self, row: usize, col: usize, value: f64) {
        self.elements[row * self.num_cols + col] = value;
    }

    /// Returns the equivalent two-dimensional affine transform.
    ///
    /// # Errors
    ///
    /// * [`MatrixError::NotTwoDimensional`] if the matrix is not 3x3.
    /// * [`MatrixError::NotAffine`] if the last row is not `[0, 0, 1]`.
    pub fn to_affine_transform_2d(&self) -> Result<AffineTransform2D, MatrixError> {
        if self.num_rows != 3 || self.num_cols != 3 {
            return Err(MatrixError::NotTwoDimensional {
                rows: self.num_rows,
                cols: self.num_cols,
            });
        }
        AffineTransform2D::from_matrix(&Matrix3::from_elements(&self.elements)?)
    }

    /// Remove the rows in `lower..upper`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if the range is not within `[0, num_rows]`.
    pub fn remove_rows(&mut self, lower: usize, upper: usize) -> Result<(), MatrixError> {
        MatrixError::check_index(upper, self.num_rows + 1)?;
        MatrixError::check_index(lower, upper + 1)?;
        self.elements
            .drain(lower * self.num_cols..upper * self.num_cols);
        self.num_rows -= upper - lower;
        Ok(())
    }

    /// Remove the columns in `lower..upper`.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if the range is not within `[0, num_cols]`.
    pub fn remove_columns(&mut self, lower: usize, upper: usize) -> Result<(), MatrixError> {
        MatrixError::check_index(upper, self.num_cols + 1)?;
        MatrixError::check_index(lower, upper + 1)?;
        let num_cols = self.num_cols;
        let mut k = 0;
        self.elements.retain(|_| {
            let col = k % num_cols;
            k += 1;
            col < lower || col >= upper
        });
        self.num_cols -= upper - lower;
        Ok(())
    }

    /// Apply `x' = x * scale + offset` to source dimension `src_dim` before this transform.
    ///
    /// PRECONDITION: the matrix is affine, the last column holding the translations.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if `src_dim` is not a source dimension.
    pub fn convert_before(
        &mut self,
        src_dim: usize,
        scale: f64,
        offset: f64,
    ) -> Result<(), MatrixError> {
        let last_col = self.num_cols.saturating_sub(1);
        MatrixError::check_index(src_dim, last_col)?;
        for row in 0..self.num_rows {
            let element = self.at(row, src_dim);
            if offset != 0.0 {
                self.put(row, last_col, self.at(row, last_col) + element * offset);
            }
            self.put(row, src_dim, element * scale);
        }
        Ok(())
    }

    /// Apply `y' = y * scale + offset` to target dimension `dst_dim` after this transform.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::IndexOutOfRange`] if `dst_dim` is not a target dimension.
    pub fn convert_after(
        &mut self,
        dst_dim: usize,
        scale: f64,
        offset: f64,
    ) -> Result<(), MatrixError> {
        let last_row = self.num_rows.saturating_sub(1);
        MatrixError::check_index(dst_dim, last_row)?;
        for col in 0..self.num_cols {
            let value = self.at(dst_dim, col) * scale + self.at(last_row, col) * offset;
            self.put(dst_dim, col, value);
        }
        Ok(())
    }
}

impl MatrixOps for GeneralMatrix {
    #[inline]
    fn num_rows(&self) -> usize {
        self.num_rows
    }

    #[inline]
    fn num_cols(&self) -> usize {
        self.num_cols
    }

    fn get(&self, row: usize, col: usize) -> Result<f64, MatrixError> {
        MatrixError::check_index(row, self.num_rows)?;
        MatrixError::check_index(col, self.num_cols)?;
        Ok(self.at(row, col))
    }

    fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), MatrixError> {
        MatrixError::check_index(row, self.num_rows)?;
        MatrixError::check_index(col, self.num_cols)?;
        self.put(row, col, value);
        Ok(())
    }

    fn elements(&self) -> Vec<f64> {
        self.elements.clone()
    }

    fn set_elements(&mut self, elements: &[f64]) -> Result<(), MatrixError> {
        if elements.len() != self.elements.len() {
            return Err(MatrixError::illegal_size(
                self.elements.len(),
                elements.len(),
            ));
        }
        self.elements.copy_from_slice(elements);
        Ok(())
    }

    fn set_zero(&mut self) {
        self.elements.fill(0.0);
    }

    fn set_identity(&mut self) {
        *self = Self::diagonal(self.num_rows, self.num_cols);
    }

    fn is_identity_within(&self, tolerance: f64) -> bool {
        ops::is_identity(&self.elements, self.num_rows, self.num_cols, tolerance)
    }

    fn is_affine(&self) -> bool {
        ops::is_affine(&self.elements, self.num_rows, self.num_cols)
    }

    fn negate(&mut self) {
        self.elements.iter_mut().for_each(|v| *v = -*v);
    }

    fn transpose(&mut self) {
        let mut transposed = Self::zeros(self.num_cols, self.num_rows);
        for row in 0..self.num_rows {
            for col in 0..self.num_cols {
                transposed.put(col, row, self.at(row, col));
            }
        }
        *self = transposed;
    }

    /// Inverts through [`matrices::invert`], so non-square matrices get the generalized inverse
    /// and their shape changes accordingly.
    fn invert(&mut self) -> Result<(), MatrixError> {
        let inverse = matrices::invert(&Matrix::General(self.clone()))?;
        *self = inverse.into_general();
        Ok(())
    }

    fn multiply(&mut self, other: &Self) -> Result<(), MatrixError> {
        let elements = dense::multiply(
            &self.elements,
            (self.num_rows, self.num_cols),
            &other.elements,
            (other.num_rows, other.num_cols),
        )?;
        self.num_cols = other.num_cols;
        self.elements = elements;
        Ok(())
    }

    fn normalize_columns(&mut self) -> Vec<f64> {
        ops::normalize_columns(&mut self.elements, self.num_rows, self.num_cols)
    }
}
