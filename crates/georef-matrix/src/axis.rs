//! Axis directions of a coordinate system.

/// Direction of a coordinate system axis.
///
/// Directions come in opposite pairs (north/south, east/west, ...). The first member of each pair
/// is the *absolute* direction; the geocentric axes and [`AxisDirection::Other`] have no opposite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AxisDirection {
    /// Positive toward the north.
    North,
    /// Positive toward the south.
    South,
    /// Positive toward the east.
    East,
    /// Positive toward the west.
    West,
    /// Positive upward, away from the Earth centre.
    Up,
    /// Positive downward, toward the Earth centre.
    Down,
    /// Positive toward the future.
    Future,
    /// Positive toward the past.
    Past,
    /// Grid column index increasing.
    ColumnPositive,
    /// Grid column index decreasing.
    ColumnNegative,
    /// Grid row index increasing.
    RowPositive,
    /// Grid row index decreasing.
    RowNegative,
    /// Toward the right of a display.
    DisplayRight,
    /// Toward the left of a display.
    DisplayLeft,
    /// Toward the top of a display.
    DisplayUp,
    /// Toward the bottom of a display.
    DisplayDown,
    /// Geocentric X axis.
    GeocentricX,
    /// Geocentric Y axis.
    GeocentricY,
    /// Geocentric Z axis.
    GeocentricZ,
    /// Unspecified direction.
    Other,
}

impl AxisDirection {
    /// Returns the positive member of this direction's opposite pair.
    pub fn absolute(self) -> Self {
        use AxisDirection::*;
        match self {
            South => North,
            West => East,
            Down => Up,
            Past => Future,
            ColumnNegative => ColumnPositive,
            RowNegative => RowPositive,
            DisplayLeft => DisplayRight,
            DisplayDown => DisplayUp,
            other => other,
        }
    }

    /// Returns the opposite direction, or the direction itself if it has none.
    pub fn opposite(self) -> Self {
        use AxisDirection::*;
        match self {
            North => South,
            South => North,
            East => West,
            West => East,
            Up => Down,
            Down => Up,
            Future => Past,
            Past => Future,
            ColumnPositive => ColumnNegative,
            ColumnNegative => ColumnPositive,
            RowPositive => RowNegative,
            RowNegative => RowPositive,
            DisplayRight => DisplayLeft,
            DisplayLeft => DisplayRight,
            DisplayUp => DisplayDown,
            DisplayDown => DisplayUp,
            other => other,
        }
    }

    /// Whether this direction is the negative member of its opposite pair.
    pub fn is_opposite(self) -> bool {
        self.absolute() != self
    }
}
