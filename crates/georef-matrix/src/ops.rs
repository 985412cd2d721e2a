//! Size-independent kernels over row-major element slices.
//!
//! These are shared by the general matrix and by the default methods of
//! [`MatrixOps`](crate::MatrixOps).

/// Whether two values are equal within `tolerance`, treating NaN as equal to NaN and
/// infinities as equal to infinities of the same sign.
pub(crate) fn values_equal(v1: f64, v2: f64, tolerance: f64) -> bool {
    (v1 - v2).abs() <= tolerance || (v1.is_nan() && v2.is_nan()) || v1 == v2
}

/// Whether the `rows x cols` row-major matrix is the identity within `tolerance`.
pub(crate) fn is_identity(elements: &[f64], rows: usize, cols: usize, tolerance: f64) -> bool {
    if rows != cols {
        return false;
    }
    elements.iter().enumerate().all(|(k, &value)| {
        let expected = if k / cols == k % cols { 1.0 } else { 0.0 };
        (value - expected).abs() <= tolerance
    })
}

/// Whether the `rows x cols` row-major matrix is square with a last row `[0, ..., 0, 1]`.
pub(crate) fn is_affine(elements: &[f64], rows: usize, cols: usize) -> bool {
    if rows != cols || rows == 0 {
        return false;
    }
    let last_row = &elements[(rows - 1) * cols..rows * cols];
    let (last, others) = match last_row.split_last() {
        Some(split) => split,
        None => return false,
    };
    *last == 1.0 && others.iter().all(|&v| v == 0.0)
}

/// Divides each column by its Euclidean magnitude and returns the magnitudes.
///
/// Columns with a zero magnitude are left unchanged.
pub(crate) fn normalize_columns(elements: &mut [f64], rows: usize, cols: usize) -> Vec<f64> {
    let mut magnitudes = vec![0.0; cols];
    for (col, magnitude) in magnitudes.iter_mut().enumerate() {
        let sum_sq = (0..rows)
            .map(|row| elements[row * cols + col].powi(2))
            .sum::<f64>();
        *magnitude = sum_sq.sqrt();
        if *magnitude != 0.0 {
            for row in 0..rows {
                elements[row * cols + col] /= *magnitude;
            }
        }
    }
    magnitudes
}

/// Applies the `rows x cols` matrix to `point`.
///
/// A point of `cols` coordinates is multiplied directly. A point of `cols - 1` coordinates is
/// treated as homogeneous: a trailing 1 is appended and the result is divided by its last
/// coordinate, which is then dropped. Returns `None` for any other length.
pub(crate) fn transform_point(
    elements: &[f64],
    rows: usize,
    cols: usize,
    point: &[f64],
) -> Option<Vec<f64>> {
    let homogeneous = if point.len() == cols {
        false
    } else if point.len() + 1 == cols && rows > 0 {
        true
    } else {
        return None;
    };

    let coord = |i: usize| if i < point.len() { point[i] } else { 1.0 };
    let mut out = (0..rows)
        .map(|row| {
            (0..cols)
                .map(|col| elements[row * cols + col] * coord(col))
                .sum::<f64>()
        })
        .collect::<Vec<_>>();

    if homogeneous {
        let w = out.pop().unwrap_or(1.0);
        if w != 1.0 {
            out.iter_mut().for_each(|v| *v /= w);
        }
    }
    Some(out)
}
