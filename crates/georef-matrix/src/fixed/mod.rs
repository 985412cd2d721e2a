//! Square matrices of sizes 1 to 4 with their elements stored as named fields.
//!
//! We provide a small `macro_rules!` helper for the element plumbing shared by every size
//! (field access, bulk copies, zero/identity, negation, identity and affine tests). Transposition,
//! products and inversion are written per size: in closed form for sizes 1 and 2, through the
//! `faer` dense primitive for sizes 3 and 4.

/// Macro to define a fixed-size square matrix type.
///
/// # Arguments
///
/// * `name`    - The name of the matrix type.
/// * `size`    - The number of rows and columns.
/// * `fields`  - The element fields with their `(row, col)` position, in row-major order.
/// * `affine`  - The fields of the last row that must be zero, then the corner field that must
///   be one, for the matrix to be affine.
macro_rules! define_fixed_matrix {
    (
        $(#[$meta:meta])*
        $name:ident,
        $size:literal,
        [$($field:ident => ($row:literal, $col:literal)),+ $(,)?],
        affine: [$($zero:ident),*] $one:ident
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            $(
                #[doc = concat!("Element at row ", stringify!($row), ", column ", stringify!($col), ".")]
                pub $field: f64,
            )+
        }

        impl $name {
            /// Number of rows and columns.
            pub const SIZE: usize = $size;

            /// The identity matrix.
            pub const IDENTITY: Self = Self {
                $($field: if $row == $col { 1.0 } else { 0.0 }),+
            };

            /// The zero matrix.
            pub const ZERO: Self = Self { $($field: 0.0),+ };

            /// Create a matrix from row-major elements.
            ///
            /// # Errors
            ///
            /// Returns [`MatrixError::IllegalSize`](crate::MatrixError::IllegalSize) if the
            /// slice does not hold exactly `SIZE * SIZE` elements.
            pub fn from_elements(elements: &[f64]) -> Result<Self, crate::MatrixError> {
                if elements.len() != $size * $size {
                    return Err(crate::MatrixError::illegal_size($size * $size, elements.len()));
                }
                Ok(Self {
                    $($field: elements[$row * $size + $col]),+
                })
            }

            /// Create a matrix whose element at `(row, col)` is `f(row, col)`.
            pub fn from_fn(mut f: impl FnMut(usize, usize) -> f64) -> Self {
                Self {
                    $($field: f($row, $col)),+
                }
            }

            /// Returns the elements in row-major order.
            #[inline]
            pub fn to_array(&self) -> [f64; $size * $size] {
                [$(self.$field),+]
            }

            /// Whether the last row is exactly `[0, ..., 0, 1]`.
            #[inline]
            pub fn is_affine(&self) -> bool {
                $(self.$zero == 0.0 &&)* self.$one == 1.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::IDENTITY
            }
        }

        impl From<$name> for [f64; $size * $size] {
            #[inline]
            fn from(m: $name) -> Self {
                m.to_array()
            }
        }

        impl std::ops::Mul<$name> for $name {
            type Output = $name;

            #[inline]
            fn mul(self, rhs: $name) -> Self::Output {
                self.product(&rhs)
            }
        }

        impl crate::traits::MatrixOps for $name {
            #[inline]
            fn num_rows(&self) -> usize {
                $size
            }

            #[inline]
            fn num_cols(&self) -> usize {
                $size
            }

            fn get(&self, row: usize, col: usize) -> Result<f64, crate::MatrixError> {
                match (row, col) {
                    $(($row, $col) => Ok(self.$field),)+
                    _ => Err(Self::out_of_range(row, col)),
                }
            }

            fn set(&mut self, row: usize, col: usize, value: f64) -> Result<(), crate::MatrixError> {
                match (row, col) {
                    $(($row, $col) => self.$field = value,)+
                    _ => return Err(Self::out_of_range(row, col)),
                }
                Ok(())
            }

            fn elements(&self) -> Vec<f64> {
                self.to_array().to_vec()
            }

            fn set_elements(&mut self, elements: &[f64]) -> Result<(), crate::MatrixError> {
                *self = Self::from_elements(elements)?;
                Ok(())
            }

            fn set_zero(&mut self) {
                *self = Self::ZERO;
            }

            fn set_identity(&mut self) {
                *self = Self::IDENTITY;
            }

            fn is_identity_within(&self, tolerance: f64) -> bool {
                $((self.$field - if $row == $col { 1.0 } else { 0.0 }).abs() <= tolerance)&&+
            }

            fn is_affine(&self) -> bool {
                $name::is_affine(self)
            }

            fn negate(&mut self) {
                $(self.$field = -self.$field;)+
            }

            fn transpose(&mut self) {
                *self = self.transposed();
            }

            fn invert(&mut self) -> Result<(), crate::MatrixError> {
                *self = self.inverse()?;
                Ok(())
            }

            fn multiply(&mut self, other: &Self) -> Result<(), crate::MatrixError> {
                *self = self.product(other);
                Ok(())
            }

            fn normalize_columns(&mut self) -> Vec<f64> {
                let mut elements = self.to_array();
                let magnitudes = crate::ops::normalize_columns(&mut elements, $size, $size);
                *self = Self::from_fn(|row, col| elements[row * $size + col]);
                magnitudes
            }
        }

        impl $name {
            /// Copy into a dense faer matrix.
            pub(crate) fn to_faer(&self) -> faer::Mat<f64> {
                let mut mat = faer::Mat::<f64>::zeros($size, $size);
                $(mat.write($row, $col, self.$field);)+
                mat
            }

            /// Copy the leading `SIZE x SIZE` block of a dense faer matrix.
            ///
            /// PRECONDITION: `mat` has at least `SIZE` rows and columns.
            // unused by the sizes multiplied in closed form
            #[allow(dead_code)]
            pub(crate) fn from_faer(mat: &faer::Mat<f64>) -> Self {
                Self { $($field: mat.read($row, $col)),+ }
            }

            fn out_of_range(row: usize, col: usize) -> crate::MatrixError {
                if row >= $size {
                    crate::MatrixError::IndexOutOfRange { index: row, bound: $size }
                } else {
                    crate::MatrixError::IndexOutOfRange { index: col, bound: $size }
                }
            }
        }
    };
}

mod matrix1;
mod matrix2;
mod matrix3;
mod matrix4;

pub use matrix1::Matrix1;
pub use matrix2::Matrix2;
pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
