// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental collection of piece extents ahead of a bulk build.

use alloc::vec;
use alloc::vec::Vec;

use crate::{BuildError, IntervalTree, MAX_DIMENSIONS};

/// Collects per-piece extents, in any order, and then builds an [`IntervalTree`].
///
/// Extents are flat slices holding a `[min, max]` pair per dimension:
/// `[min_0, max_0, min_1, max_1, ...]`.
///
/// ```
/// use understory_interval::IntervalTreeBuilder;
///
/// let mut builder = IntervalTreeBuilder::new(1, 2).unwrap();
/// builder.set_piece(1, &[5.0, 9.0]).unwrap();
/// builder.set_piece(0, &[0.0, 4.0]).unwrap();
/// let tree = builder.build().unwrap();
/// assert_eq!(tree.query_plane(&[1.0], 6.0), [1]);
/// ```
#[derive(Clone, Debug)]
pub struct IntervalTreeBuilder {
    dimensions: usize,
    extents: Vec<f64>,
    present: Vec<bool>,
}

impl IntervalTreeBuilder {
    /// Prepares a builder for `piece_count` pieces with ids `0..piece_count`.
    pub fn new(dimensions: usize, piece_count: usize) -> Result<Self, BuildError> {
        check_dimensions(dimensions)?;
        Ok(Self {
            dimensions,
            extents: vec![0.0; 2 * dimensions * piece_count],
            present: vec![false; piece_count],
        })
    }

    /// Number of dimensions per extent.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of pieces the tree will hold.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.present.len()
    }

    /// Stores the extents of `piece`, replacing any earlier value.
    pub fn set_piece(&mut self, piece: usize, extents: &[f64]) -> Result<(), BuildError> {
        let stride = 2 * self.dimensions;
        let count = self.present.len();
        if piece >= count {
            return Err(BuildError::PieceOutOfRange { piece, count });
        }
        if extents.len() != stride {
            return Err(BuildError::ExtentLength {
                expected: stride,
                actual: extents.len(),
            });
        }
        if let Some(dimension) = extents
            .chunks_exact(2)
            .position(|pair| pair[0].is_nan() || pair[1].is_nan() || pair[0] > pair[1])
        {
            return Err(BuildError::InvertedExtent { piece, dimension });
        }

        self.extents[piece * stride..(piece + 1) * stride].copy_from_slice(extents);
        self.present[piece] = true;
        Ok(())
    }

    /// Builds the tree.
    ///
    /// Fails with [`BuildError::MissingPiece`] if some piece was never set.
    pub fn build(self) -> Result<IntervalTree, BuildError> {
        if let Some(piece) = self.present.iter().position(|&set| !set) {
            return Err(BuildError::MissingPiece { piece });
        }
        Ok(IntervalTree::from_pieces(self.dimensions, self.extents))
    }
}

fn check_dimensions(dimensions: usize) -> Result<(), BuildError> {
    match dimensions {
        0 => Err(BuildError::ZeroDimensions),
        1..=MAX_DIMENSIONS => Ok(()),
        _ => Err(BuildError::TooManyDimensions {
            dimensions,
            max: MAX_DIMENSIONS,
        }),
    }
}
