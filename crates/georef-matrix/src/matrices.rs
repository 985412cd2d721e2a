//! Factories and size-independent algorithms over [`Matrix`].
//!
//! The factories pick the most suitable representation for the requested shape. The algorithms
//! (multiplication, inversion, comparison, rounding) accept any representation and convert
//! between them as needed.

use crate::{
    affine::AffineTransform2D,
    dense,
    error::MatrixError,
    fixed::Matrix3,
    general::GeneralMatrix,
    matrix::Matrix,
    ops,
    traits::MatrixOps,
};

/// Relative tolerance used by [`ComparisonMode::Approximate`].
pub const COMPARISON_THRESHOLD: f64 = 1e-14;

/// Sentinel written by the inversions for a dimension that cannot be recovered.
///
/// This is a marker, not a numeric result: a row holding it in its translation column describes
/// a source dimension independent of every target dimension.
pub const INDEPENDENT_DIMENSION: f64 = f64::NAN;

/// How strictly two matrices are compared by [`equals_mode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonMode {
    /// Same representation and bit-identical elements.
    Strict,
    /// Equal element values, whatever the representation.
    ByContract,
    /// Same as [`ComparisonMode::ByContract`]; matrices carry no metadata.
    IgnoreMetadata,
    /// Element values equal within [`COMPARISON_THRESHOLD`], relative to their magnitude.
    Approximate,
}

/// Create a square identity matrix.
pub fn create_identity(size: usize) -> Matrix {
    Matrix::identity(size)
}

/// Create a matrix with ones on the diagonal and zeros elsewhere.
pub fn create_diagonal(num_rows: usize, num_cols: usize) -> Matrix {
    Matrix::diagonal(num_rows, num_cols)
}

/// Create a matrix filled with zeros.
pub fn create_zero(num_rows: usize, num_cols: usize) -> Matrix {
    Matrix::zeros(num_rows, num_cols)
}

/// Create a matrix from row-major elements.
///
/// # Errors
///
/// Returns [`MatrixError::IllegalSize`] if `elements.len() != num_rows * num_cols`.
pub fn create(num_rows: usize, num_cols: usize, elements: &[f64]) -> Result<Matrix, MatrixError> {
    Matrix::from_elements(num_rows, num_cols, elements)
}

/// Create the matrix keeping only the `keep` dimensions of a `source_dim` coordinate.
///
/// The result has `keep.len() + 1` rows and `source_dim + 1` columns, with a 1 at
/// `(j, keep[j])` for every kept dimension and at the bottom-right corner.
///
/// # Errors
///
/// Returns [`MatrixError::IndexOutOfRange`] if any `keep[j] >= source_dim`.
///
/// Example:
///
/// ```
/// use georef_matrix::{matrices, MatrixOps};
///
/// let filter = matrices::create_dimension_filter(3, &[0, 2]).unwrap();
/// assert_eq!(filter.transform_point(&[10.0, 20.0, 30.0]).unwrap(), vec![10.0, 30.0]);
/// ```
pub fn create_dimension_filter(source_dim: usize, keep: &[usize]) -> Result<Matrix, MatrixError> {
    let mut m = GeneralMatrix::zeros(keep.len() + 1, source_dim + 1);
    for (j, &dim) in keep.iter().enumerate() {
        MatrixError::check_index(dim, source_dim)?;
        m.put(j, dim, 1.0);
    }
    m.put(keep.len(), source_dim, 1.0);
    Ok(Matrix::General(m).to_optimal())
}

/// Create the matrix applying `sub_matrix` to some dimensions and leaving the others unchanged.
///
/// The first `first_affected` and the last `num_trailing` coordinates pass through; the
/// coordinates between them are transformed by the affine `sub_matrix`.
pub fn create_pass_through<M: MatrixOps>(
    first_affected: usize,
    sub_matrix: &M,
    num_trailing: usize,
) -> Matrix {
    let sub_src = sub_matrix.num_cols().saturating_sub(1);
    let sub_dst = sub_matrix.num_rows().saturating_sub(1);
    let sub = sub_matrix.elements();
    let sub_cols = sub_matrix.num_cols();
    let src_dim = first_affected + sub_src + num_trailing;
    let dst_dim = first_affected + sub_dst + num_trailing;

    let mut m = GeneralMatrix::zeros(dst_dim + 1, src_dim + 1);
    for i in 0..first_affected {
        m.put(i, i, 1.0);
    }
    for j in 0..sub_dst {
        for i in 0..sub_src {
            m.put(first_affected + j, first_affected + i, sub[j * sub_cols + i]);
        }
        m.put(first_affected + j, src_dim, sub[j * sub_cols + sub_src]);
    }
    for k in 0..num_trailing {
        m.put(
            first_affected + sub_dst + k,
            first_affected + sub_src + k,
            1.0,
        );
    }
    m.put(dst_dim, src_dim, 1.0);
    Matrix::General(m).to_optimal()
}

/// Create an affine matrix from its linear part and translation vector.
///
/// # Errors
///
/// Returns [`MatrixError::MismatchedDimension`] if `translation.len()` differs from the number of
/// rows of `derivative`.
pub fn create_affine<M: MatrixOps>(
    derivative: &M,
    translation: &[f64],
) -> Result<Matrix, MatrixError> {
    let (rows, cols) = (derivative.num_rows(), derivative.num_cols());
    if translation.len() != rows {
        return Err(MatrixError::MismatchedDimension {
            left_name: "derivative rows",
            left: rows,
            right_name: "translation",
            right: translation.len(),
        });
    }
    let linear = derivative.elements();
    let mut m = GeneralMatrix::zeros(rows + 1, cols + 1);
    for j in 0..rows {
        for i in 0..cols {
            m.put(j, i, linear[j * cols + i]);
        }
        m.put(j, cols, translation[j]);
    }
    m.put(rows, cols, 1.0);
    Ok(Matrix::General(m).to_optimal())
}

/// Copy any matrix into the most suitable representation for its shape.
pub fn copy<M: MatrixOps>(matrix: &M) -> Matrix {
    let (rows, cols) = (matrix.num_rows(), matrix.num_cols());
    let elements = matrix.elements();
    Matrix::from_general(&GeneralMatrix::from_fn(rows, cols, |row, col| {
        elements[row * cols + col]
    }))
}

/// Returns `matrix` in the most suitable representation for its shape.
pub fn to_optimal(matrix: Matrix) -> Matrix {
    if matrix.is_optimal() {
        matrix
    } else {
        matrix.to_optimal()
    }
}

/// Whether the matrix is affine with an identity linear part.
pub fn is_translation<M: MatrixOps>(matrix: &M) -> bool {
    if !matrix.is_affine() {
        return false;
    }
    let size = matrix.num_rows();
    let elements = matrix.elements();
    (0..size - 1).all(|j| {
        (0..size - 1).all(|i| elements[j * size + i] == if i == j { 1.0 } else { 0.0 })
    })
}

/// Resize an affine matrix to `new_source_dim` source and `new_target_dim` target dimensions.
///
/// Scale, shear and translation terms of the dimensions that still exist are kept, and the last
/// row stays `[0, ..., 0, 1]`. A dimension that is new on both sides gets a pass-through 1 on the
/// diagonal. A new target dimension whose index is an old source dimension gets no scale, so that
/// it is not driven by an input it never depended on.
///
/// # Errors
///
/// Returns [`MatrixError::IllegalSize`] if the matrix has no rows or no columns.
pub fn resize_affine<M: MatrixOps>(
    matrix: &M,
    new_source_dim: usize,
    new_target_dim: usize,
) -> Result<Matrix, MatrixError> {
    let (rows, cols) = (matrix.num_rows(), matrix.num_cols());
    if rows == 0 || cols == 0 {
        return Err(MatrixError::illegal_size(1, rows * cols));
    }
    let (old_target_dim, old_source_dim) = (rows - 1, cols - 1);
    let elements = matrix.elements();
    let at = |row: usize, col: usize| elements[row * cols + col];

    let mut resized = GeneralMatrix::zeros(new_target_dim + 1, new_source_dim + 1);
    let common_src = old_source_dim.min(new_source_dim);
    for j in 0..old_target_dim.min(new_target_dim) {
        for i in 0..common_src {
            resized.put(j, i, at(j, i));
        }
        resized.put(j, new_source_dim, at(j, old_source_dim));
    }
    for i in 0..common_src {
        resized.put(new_target_dim, i, at(old_target_dim, i));
    }
    resized.put(
        new_target_dim,
        new_source_dim,
        at(old_target_dim, old_source_dim),
    );
    for j in old_target_dim.max(old_source_dim)..new_target_dim.min(new_source_dim) {
        resized.put(j, j, 1.0);
    }
    Ok(Matrix::General(resized).to_optimal())
}

/// Reverse the direction of source dimension `dim`, whose values span `span` units.
///
/// Column `dim` is negated and `scale * span` is added to each row's translation, so the reversed
/// axis still maps onto the same range.
///
/// # Errors
///
/// Returns [`MatrixError::IndexOutOfRange`] if `dim` is not a source dimension.
pub fn reverse_axis_direction<M: MatrixOps>(
    matrix: &mut M,
    dim: usize,
    span: f64,
) -> Result<(), MatrixError> {
    let last_col = matrix.num_cols().saturating_sub(1);
    MatrixError::check_index(dim, last_col)?;
    for row in 0..matrix.num_rows() {
        let scale = matrix.get(row, dim)?;
        if scale != 0.0 {
            matrix.set(row, dim, -scale)?;
            let translate = matrix.get(row, last_col)?;
            matrix.set(row, last_col, translate + scale * span)?;
        }
    }
    Ok(())
}

/// Returns the product `m1 × m2`.
///
/// Two 3x3 affine matrices are concatenated as [`AffineTransform2D`]; other operands are
/// multiplied in their common fixed representation when they share one, and through the dense
/// primitive otherwise.
///
/// # Errors
///
/// Returns [`MatrixError::IllegalSize`] if `m1.num_cols() != m2.num_rows()`.
pub fn multiply(m1: &Matrix, m2: &Matrix) -> Result<Matrix, MatrixError> {
    if m1.num_cols() != m2.num_rows() {
        return Err(MatrixError::illegal_size(m1.num_cols(), m2.num_rows()));
    }
    if let (Some(mut a), Some(b)) = (as_affine_2d(m1), as_affine_2d(m2)) {
        a.concatenate(&b);
        return Ok(Matrix::Size3(a.to_matrix()));
    }
    let product = match (m1, m2) {
        (Matrix::Size1(a), Matrix::Size1(b)) => Matrix::Size1(a.product(b)),
        (Matrix::Size2(a), Matrix::Size2(b)) => Matrix::Size2(a.product(b)),
        (Matrix::Size3(a), Matrix::Size3(b)) => Matrix::Size3(a.product(b)),
        (Matrix::Size4(a), Matrix::Size4(b)) => Matrix::Size4(a.product(b)),
        _ => {
            let elements = dense::multiply(
                &m1.elements(),
                (m1.num_rows(), m1.num_cols()),
                &m2.elements(),
                (m2.num_rows(), m2.num_cols()),
            )?;
            Matrix::from_elements(m1.num_rows(), m2.num_cols(), &elements)?
        }
    };
    Ok(product)
}

/// The 3x3 affine matrix as an affine transform, if it is one.
fn as_affine_2d(matrix: &Matrix) -> Option<AffineTransform2D> {
    if matrix.num_rows() != 3 || matrix.num_cols() != 3 {
        return None;
    }
    let m = Matrix3::from_elements(&matrix.elements()).ok()?;
    AffineTransform2D::from_matrix(&m).ok()
}

/// Returns the inverse of `matrix`, generalized to non-square matrices.
///
/// * Square matrices go through [`invert_square`].
/// * With fewer rows than columns, some source dimensions are not used by the transform. Up to
///   `num_cols - num_rows` all-zero columns are omitted, searching from the last column since
///   trailing dimensions (time for instance) are the most often independent. The remaining square
///   matrix is inverted and a row is inserted for each omitted dimension, zero everywhere except
///   for [`INDEPENDENT_DIMENSION`] in its last column.
/// * With more rows than columns, up to `num_rows - num_cols` target dimensions holding a constant
///   (rows with an all-zero linear part) are dropped and the remaining square matrix inverted;
///   the inverse ignores the dropped dimensions.
///
/// # Errors
///
/// Returns [`MatrixError::SingularMatrix`] if no inverse exists, including when not enough
/// dimensions can be omitted from a non-square matrix.
pub fn invert(matrix: &Matrix) -> Result<Matrix, MatrixError> {
    let (rows, cols) = (matrix.num_rows(), matrix.num_cols());
    if rows < cols {
        invert_dimension_reduction(matrix)
    } else if rows > cols {
        invert_dimension_increase(matrix)
    } else {
        invert_square(matrix)
    }
}

fn invert_dimension_reduction(matrix: &Matrix) -> Result<Matrix, MatrixError> {
    let (rows, cols) = (matrix.num_rows(), matrix.num_cols());
    let elements = matrix.elements();
    let needed = cols - rows;

    let mut omitted = Vec::with_capacity(needed);
    for col in (0..cols).rev() {
        if omitted.len() == needed {
            break;
        }
        if (0..rows).all(|row| elements[row * cols + col] == 0.0) {
            omitted.push(col);
        }
    }
    if omitted.len() < needed {
        log::debug!(
            "cannot invert {}x{} matrix: {} zero columns found, {} needed",
            rows,
            cols,
            omitted.len(),
            needed
        );
        return Err(MatrixError::SingularMatrix);
    }
    omitted.sort_unstable();
    log::debug!("omitting source dimensions {:?} before inversion", omitted);

    let kept = (0..cols)
        .filter(|col| !omitted.contains(col))
        .collect::<Vec<_>>();
    let square = (0..rows)
        .flat_map(|row| kept.iter().map(move |&col| (row, col)))
        .map(|(row, col)| elements[row * cols + col])
        .collect::<Vec<_>>();
    let inverse = invert_square(&Matrix::from_elements(rows, rows, &square)?)?.elements();

    let mut result = GeneralMatrix::zeros(cols, rows);
    let mut k = 0;
    for j in 0..cols {
        if omitted.contains(&j) {
            result.put(j, rows - 1, INDEPENDENT_DIMENSION);
        } else {
            for i in 0..rows {
                result.put(j, i, inverse[k * rows + i]);
            }
            k += 1;
        }
    }
    Ok(Matrix::General(result))
}

fn invert_dimension_increase(matrix: &Matrix) -> Result<Matrix, MatrixError> {
    let (rows, cols) = (matrix.num_rows(), matrix.num_cols());
    let elements = matrix.elements();
    let needed = rows - cols;
    let last_col = cols - 1;

    let mut dropped = Vec::with_capacity(needed);
    for row in (0..rows - 1).rev() {
        if dropped.len() == needed {
            break;
        }
        if (0..last_col).all(|col| elements[row * cols + col] == 0.0) {
            dropped.push(row);
        }
    }
    if dropped.len() < needed {
        log::debug!(
            "cannot invert {}x{} matrix: {} constant rows found, {} needed",
            rows,
            cols,
            dropped.len(),
            needed
        );
        return Err(MatrixError::SingularMatrix);
    }
    dropped.sort_unstable();
    log::debug!("dropping constant target dimensions {:?} before inversion", dropped);

    let square = (0..rows)
        .filter(|row| !dropped.contains(row))
        .flat_map(|row| elements[row * cols..(row + 1) * cols].iter().copied())
        .collect::<Vec<_>>();
    let inverse = invert_square(&Matrix::from_elements(cols, cols, &square)?)?.elements();

    let mut result = GeneralMatrix::zeros(cols, rows);
    let mut k = 0;
    for j in 0..rows {
        if dropped.contains(&j) {
            continue;
        }
        for i in 0..cols {
            result.put(i, j, inverse[i * cols + k]);
        }
        k += 1;
    }
    Ok(Matrix::General(result))
}

/// A NaN that can be replaced by a finite value before inversion.
#[derive(Debug, Clone, Copy)]
enum NanSubstitution {
    /// NaN scale at `(row, col)`, alone in its row and column.
    Scale { row: usize, col: usize },
    /// NaN translation in `row`, with the row's only linear term (if any) in `scale_col`.
    Translation {
        row: usize,
        scale_col: Option<usize>,
    },
}

/// Locate the NaN elements of a square matrix and check whether all of them can be replaced.
///
/// Returns `None` if the matrix holds a NaN that cannot be resolved, in which case no
/// substitution must happen.
fn resolvable_nans(elements: &[f64], size: usize) -> Option<Vec<NanSubstitution>> {
    let last = size - 1;
    let at = |row: usize, col: usize| elements[row * size + col];

    if (0..size).any(|col| at(last, col).is_nan()) {
        return None;
    }

    let mut substitutions = Vec::new();
    for row in 0..last {
        let nan_cols = (0..last).filter(|&col| at(row, col).is_nan()).collect::<Vec<_>>();
        let nonzero_cols = (0..last).filter(|&col| at(row, col) != 0.0).collect::<Vec<_>>();
        let translation_is_nan = at(row, last).is_nan();

        match (nan_cols.as_slice(), nonzero_cols.as_slice()) {
            ([col], [nonzero]) if col == nonzero => {
                let col = *col;
                if (0..last).any(|other| other != row && at(other, col) != 0.0) {
                    return None;
                }
                substitutions.push(NanSubstitution::Scale { row, col });
            }
            ([], nonzero) if translation_is_nan && nonzero.len() <= 1 => {
                substitutions.push(NanSubstitution::Translation {
                    row,
                    scale_col: nonzero.first().copied(),
                });
            }
            ([], _) if !translation_is_nan => {}
            _ => return None,
        }
    }
    Some(substitutions)
}

/// Returns the inverse of a square matrix, tolerating some NaN elements.
///
/// A NaN marks an unknown coefficient of an otherwise independent dimension. Such a NaN can be
/// resolved when it is the only linear term of its row and of its column, or when it is the
/// translation of a row with at most one linear term. Resolved NaNs are replaced by 1 (linear
/// part) or 0 (translation) for the inversion, then the matching scale and nonzero translation
/// of the inverse are set back to NaN. If any NaN cannot be resolved, the matrix is inverted as
/// is and the NaNs propagate.
///
/// 3x3 affine matrices are inverted in closed form; other matrices in their most suitable
/// representation.
///
/// # Errors
///
/// Returns [`MatrixError::SingularMatrix`] if the matrix is not square or has no inverse.
pub fn invert_square(matrix: &Matrix) -> Result<Matrix, MatrixError> {
    let size = matrix.num_rows();
    if size != matrix.num_cols() || size == 0 {
        return Err(MatrixError::SingularMatrix);
    }
    let mut elements = matrix.elements();
    let last = size - 1;

    let substitutions = if elements.iter().any(|v| v.is_nan()) {
        match resolvable_nans(&elements, size) {
            Some(subs) => {
                log::debug!("replacing {} NaN elements before inversion", subs.len());
                subs
            }
            None => {
                log::debug!("NaN elements cannot be resolved, inverting as is");
                Vec::new()
            }
        }
    } else {
        Vec::new()
    };
    for sub in &substitutions {
        match *sub {
            NanSubstitution::Scale { row, col } => {
                elements[row * size + col] = 1.0;
                if elements[row * size + last].is_nan() {
                    elements[row * size + last] = 0.0;
                }
            }
            NanSubstitution::Translation { row, .. } => elements[row * size + last] = 0.0,
        }
    }

    let mut inverse = match Matrix::from_elements(size, size, &elements)? {
        Matrix::Size1(m) => Matrix::Size1(m.inverse()?),
        Matrix::Size2(m) => Matrix::Size2(m.inverse()?),
        Matrix::Size3(m) => {
            if m.is_affine() {
                log::debug!("inverting 3x3 affine matrix in closed form");
            }
            Matrix::Size3(m.inverse()?)
        }
        Matrix::Size4(m) => Matrix::Size4(m.inverse()?),
        Matrix::General(m) => Matrix::General(GeneralMatrix::from_elements(
            size,
            size,
            dense::invert(m.as_slice(), size)?,
        )?),
    };

    for sub in &substitutions {
        let (row, col) = match *sub {
            NanSubstitution::Scale { row, col } => (row, col),
            NanSubstitution::Translation {
                row,
                scale_col: Some(col),
            } => (row, col),
            NanSubstitution::Translation { scale_col: None, .. } => continue,
        };
        // the inverse maps target `row` back to source `col`
        inverse.set(col, row, INDEPENDENT_DIMENSION)?;
        if inverse.get(col, last)? != 0.0 {
            inverse.set(col, last, INDEPENDENT_DIMENSION)?;
        }
    }
    Ok(inverse)
}

/// Round the elements that are close to an integer once multiplied by `scale`.
///
/// For each row, `tolerance` is scaled by the magnitude of the row's linear part (all columns but
/// the last). Each element of the row, translation included, whose `value * scale` is within that
/// tolerance of an integer is replaced by `integer / scale`.
///
/// # Errors
///
/// Returns the error of [`MatrixOps::set_elements`] if the matrix rejects its own element count.
pub fn filter_rounding_errors<M: MatrixOps>(
    matrix: &mut M,
    scale: f64,
    tolerance: f64,
) -> Result<(), MatrixError> {
    let cols = matrix.num_cols();
    if cols == 0 {
        return Ok(());
    }
    let mut elements = matrix.elements();
    for row in elements.chunks_mut(cols) {
        let magnitude = row[..cols - 1]
            .iter()
            .map(|v| v * v)
            .sum::<f64>()
            .sqrt();
        let row_tolerance = tolerance * magnitude;
        for value in row.iter_mut() {
            let scaled = *value * scale;
            let rounded = scaled.round();
            if (rounded - scaled).abs() <= row_tolerance {
                *value = rounded / scale;
            }
        }
    }
    matrix.set_elements(&elements)
}

/// Element-wise comparison of two matrices of any representation.
///
/// The tolerance for each pair of elements is `epsilon`, or `epsilon * max(|v1|, |v2|)` when
/// `relative` is set. NaN equals NaN and infinities equal infinities of the same sign. Matrices
/// of different shapes are never equal.
pub fn equals<A: MatrixOps, B: MatrixOps>(m1: &A, m2: &B, epsilon: f64, relative: bool) -> bool {
    if m1.num_rows() != m2.num_rows() || m1.num_cols() != m2.num_cols() {
        return false;
    }
    m1.elements()
        .iter()
        .zip(m2.elements().iter())
        .all(|(&v1, &v2)| {
            let tolerance = if relative {
                epsilon * v1.abs().max(v2.abs())
            } else {
                epsilon
            };
            ops::values_equal(v1, v2, tolerance)
        })
}

/// Compare two matrices according to `mode`.
pub fn equals_mode(m1: &Matrix, m2: &Matrix, mode: ComparisonMode) -> bool {
    match mode {
        ComparisonMode::Strict => {
            m1.same_representation(m2)
                && m1.num_rows() == m2.num_rows()
                && m1.num_cols() == m2.num_cols()
                && m1
                    .elements()
                    .iter()
                    .zip(m2.elements().iter())
                    .all(|(a, b)| a.to_bits() == b.to_bits())
        }
        ComparisonMode::ByContract | ComparisonMode::IgnoreMetadata => equals(m1, m2, 0.0, false),
        ComparisonMode::Approximate => equals(m1, m2, COMPARISON_THRESHOLD, true),
    }
}
