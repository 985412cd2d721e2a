use crate::error::MatrixError;

/// A multi-dimensional rectangular region given by its lower and upper corners.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Envelope {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Envelope {
    /// Create an envelope from its corners.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixError::MismatchedDimension`] if the corners do not have the same length.
    pub fn new(lower: Vec<f64>, upper: Vec<f64>) -> Result<Self, MatrixError> {
        if lower.len() != upper.len() {
            return Err(MatrixError::MismatchedDimension {
                left_name: "lower corner",
                left: lower.len(),
                right_name: "upper corner",
                right: upper.len(),
            });
        }
        Ok(Self { lower, upper })
    }

    /// Number of dimensions.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// The lower corner coordinates.
    pub fn lower_corner(&self) -> &[f64] {
        &self.lower
    }

    /// The upper corner coordinates.
    pub fn upper_corner(&self) -> &[f64] {
        &self.upper
    }

    /// Lower coordinate along `dim`.
    ///
    /// PRECONDITION: `dim < self.dimension()`.
    pub fn lower(&self, dim: usize) -> f64 {
        self.lower[dim]
    }

    /// Upper coordinate along `dim`.
    ///
    /// PRECONDITION: `dim < self.dimension()`.
    pub fn upper(&self, dim: usize) -> f64 {
        self.upper[dim]
    }

    /// Extent of the envelope along `dim`.
    ///
    /// PRECONDITION: `dim < self.dimension()`.
    pub fn span(&self, dim: usize) -> f64 {
        self.upper[dim] - self.lower[dim]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_envelope_span() -> Result<(), MatrixError> {
        let env = Envelope::new(vec![-180.0, -90.0], vec![180.0, 90.0])?;
        assert_eq!(env.dimension(), 2);
        assert_eq!(env.span(0), 360.0);
        assert_eq!(env.span(1), 180.0);
        assert_eq!(env.lower(1), -90.0);
        Ok(())
    }

    #[test]
    fn test_envelope_mismatched_corners() {
        let res = Envelope::new(vec![0.0, 0.0], vec![1.0]);
        assert!(matches!(res, Err(MatrixError::MismatchedDimension { .. })));
    }
}
