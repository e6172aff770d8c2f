// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

/// Reasons an [`IntervalTree`](crate::IntervalTree) cannot be built.
///
/// Callers that hit one of these can still fall back to scanning every piece.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// Extents need at least one dimension.
    ZeroDimensions,
    /// More dimensions than box corners can be enumerated for.
    TooManyDimensions {
        /// Requested dimension count.
        dimensions: usize,
        /// Largest supported dimension count.
        max: usize,
    },
    /// A piece's extent slice does not hold a `[min, max]` pair per dimension.
    ExtentLength {
        /// Expected slice length.
        expected: usize,
        /// Supplied slice length.
        actual: usize,
    },
    /// A piece has `min > max` (or a NaN bound) in some dimension.
    InvertedExtent {
        /// Offending piece id.
        piece: usize,
        /// Offending dimension.
        dimension: usize,
    },
    /// A piece id is not below the declared piece count.
    PieceOutOfRange {
        /// Offending piece id.
        piece: usize,
        /// Declared piece count.
        count: usize,
    },
    /// The builder finished without extents for this piece.
    MissingPiece {
        /// First piece id that was never set.
        piece: usize,
    },
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDimensions => f.write_str("interval tree needs at least one dimension"),
            Self::TooManyDimensions { dimensions, max } => write!(
                f,
                "interval tree supports at most {max} dimensions, got {dimensions}"
            ),
            Self::ExtentLength { expected, actual } => write!(
                f,
                "piece extents must have {expected} values, got {actual}"
            ),
            Self::InvertedExtent { piece, dimension } => write!(
                f,
                "piece {piece} has an inverted or NaN extent in dimension {dimension}"
            ),
            Self::PieceOutOfRange { piece, count } => {
                write!(f, "piece {piece} out of range for a tree of {count} pieces")
            }
            Self::MissingPiece { piece } => write!(f, "no extents were given for piece {piece}"),
        }
    }
}

impl core::error::Error for BuildError {}
