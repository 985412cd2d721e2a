#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

pub mod affine;

pub mod axis;

mod dense;

/// Coordinate envelopes.
pub mod envelope;

/// Error types for the matrix operations.
pub mod error;

pub mod fixed;

pub mod format;

/// Matrices of arbitrary size.
pub mod general;

pub mod matrices;

/// Matrices in their most suitable representation.
pub mod matrix;

mod ops;

/// The matrix operation contract.
pub mod traits;

pub use crate::{
    affine::AffineTransform2D,
    axis::AxisDirection,
    envelope::Envelope,
    error::MatrixError,
    fixed::{Matrix1, Matrix2, Matrix3, Matrix4},
    general::GeneralMatrix,
    matrix::Matrix,
    traits::MatrixOps,
};
