// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The implicit binary tree and its queries.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

use crate::{BuildError, IntervalTreeBuilder};

/// Largest dimension count a tree supports.
///
/// The plane test enumerates box corners with a `u32` bitmask, one bit per dimension.
pub const MAX_DIMENSIONS: usize = 31;

/// A complete binary tree of bounding extents over a fixed set of pieces.
///
/// Nodes live in flat arrays: node `i` has children `2i + 1` and `2i + 2`, and
/// the root (node 0) bounds every piece. A tree over `n > 0` pieces has
/// `2n - 1` nodes, the last `n` of which are leaves holding one piece each.
/// Every internal node's extent is the per-dimension union of its children's.
///
/// Extents are in whatever value space the caller indexes: physical
/// coordinates, or per-piece ranges of derived scalar quantities.
///
/// The tree is read-only once built.
pub struct IntervalTree {
    dimensions: usize,
    /// `[min, max]` per dimension per node.
    node_bounds: Vec<f64>,
    /// `Some(piece)` for leaves.
    node_piece: Vec<Option<usize>>,
    /// Leaf node of each piece.
    piece_node: Vec<usize>,
}

impl fmt::Debug for IntervalTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntervalTree")
            .field("dimensions", &self.dimensions)
            .field("pieces", &self.piece_count())
            .field("nodes", &self.node_count())
            .finish_non_exhaustive()
    }
}

impl IntervalTree {
    /// Builds a tree from one extent slice per piece; piece ids are slice positions.
    ///
    /// See [`IntervalTreeBuilder`] for the extent layout and failure cases.
    pub fn build<P: AsRef<[f64]>>(dimensions: usize, pieces: &[P]) -> Result<Self, BuildError> {
        let mut builder = IntervalTreeBuilder::new(dimensions, pieces.len())?;
        for (piece, extents) in pieces.iter().enumerate() {
            builder.set_piece(piece, extents.as_ref())?;
        }
        builder.build()
    }

    /// Lays out already validated extents (`2 * dimensions` values per piece).
    pub(crate) fn from_pieces(dimensions: usize, extents: Vec<f64>) -> Self {
        let stride = 2 * dimensions;
        let piece_count = extents.len() / stride;
        if piece_count == 0 {
            return Self {
                dimensions,
                node_bounds: Vec::new(),
                node_piece: Vec::new(),
                piece_node: Vec::new(),
            };
        }

        let node_count = 2 * piece_count - 1;
        let first_leaf = piece_count - 1;

        let mut leaves = vec![1_usize; node_count];
        for node in (0..first_leaf).rev() {
            leaves[node] = leaves[2 * node + 1] + leaves[2 * node + 2];
        }

        // Top-down: each internal node splits its pieces at the median centroid
        // of their widest axis, sized to the leaf counts of its two subtrees.
        let centroid = |piece: usize, axis: usize| {
            let at = piece * stride + 2 * axis;
            0.5 * (extents[at] + extents[at + 1])
        };
        let mut order: Vec<usize> = (0..piece_count).collect();
        let mut node_piece = vec![None; node_count];
        let mut piece_node = vec![0; piece_count];
        let mut pending = vec![(0_usize, 0_usize, piece_count)];
        while let Some((node, start, end)) = pending.pop() {
            if node >= first_leaf {
                debug_assert_eq!(end - start, 1, "leaf {node} must receive one piece");
                let piece = order[start];
                node_piece[node] = Some(piece);
                piece_node[piece] = node;
                continue;
            }
            let left = 2 * node + 1;
            let mid = start + leaves[left];
            let span = &mut order[start..end];
            let axis = widest_axis(span, dimensions, centroid);
            span.select_nth_unstable_by(mid - start, |&a, &b| {
                centroid(a, axis).total_cmp(&centroid(b, axis))
            });
            pending.push((left + 1, mid, end));
            pending.push((left, start, mid));
        }

        let mut node_bounds = vec![0.0; node_count * stride];
        for node in first_leaf..node_count {
            if let Some(piece) = node_piece[node] {
                node_bounds[node * stride..(node + 1) * stride]
                    .copy_from_slice(&extents[piece * stride..(piece + 1) * stride]);
            }
        }
        for node in (0..first_leaf).rev() {
            let (head, children) = node_bounds.split_at_mut((2 * node + 1) * stride);
            let parent = &mut head[node * stride..(node + 1) * stride];
            let (left, right) = children[..2 * stride].split_at(stride);
            for d in 0..dimensions {
                parent[2 * d] = left[2 * d].min(right[2 * d]);
                parent[2 * d + 1] = left[2 * d + 1].max(right[2 * d + 1]);
            }
        }

        tracing::debug!(
            pieces = piece_count,
            dimensions,
            nodes = node_count,
            "built interval tree"
        );

        Self {
            dimensions,
            node_bounds,
            node_piece,
            piece_node,
        }
    }

    /// Number of dimensions per extent.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    /// Number of pieces indexed.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.piece_node.len()
    }

    /// Returns `true` if the tree indexes no pieces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.piece_node.is_empty()
    }

    /// Number of nodes, `2 * piece_count - 1` for a non-empty tree.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_piece.len()
    }

    /// Number of edges from the root to the deepest leaf.
    #[must_use]
    pub fn height(&self) -> u32 {
        self.node_count().checked_ilog2().unwrap_or(0)
    }

    /// Lower bound of all pieces in dimension `d`; `+inf` for an empty tree.
    ///
    /// # Panics
    ///
    /// Panics if `d >= self.dimensions()`.
    #[must_use]
    pub fn dimension_min(&self, d: usize) -> f64 {
        self.check_dimension(d);
        self.node_bounds.get(2 * d).copied().unwrap_or(f64::INFINITY)
    }

    /// Upper bound of all pieces in dimension `d`; `-inf` for an empty tree.
    ///
    /// # Panics
    ///
    /// Panics if `d >= self.dimensions()`.
    #[must_use]
    pub fn dimension_max(&self, d: usize) -> f64 {
        self.check_dimension(d);
        self.node_bounds
            .get(2 * d + 1)
            .copied()
            .unwrap_or(f64::NEG_INFINITY)
    }

    /// The extents stored for `piece`, laid out as passed to the builder.
    #[must_use]
    pub fn piece_extents(&self, piece: usize) -> Option<&[f64]> {
        self.piece_node.get(piece).map(|&node| self.bounds(node))
    }

    /// Visits every piece whose extent may contain a solution of
    /// `coefficients · x = target`, in no particular order.
    ///
    /// See [`query_plane`](Self::query_plane) for the test applied per node.
    ///
    /// # Panics
    ///
    /// Panics if `coefficients.len() != self.dimensions()`.
    pub fn visit_plane<F: FnMut(usize)>(&self, coefficients: &[f64], target: f64, f: F) {
        self.check_coefficients(coefficients);
        self.walk(|bounds| box_meets_plane(bounds, coefficients, target), f);
    }

    /// Ids of the pieces whose extent may contain a solution of
    /// `coefficients · x = target`, strictly ascending.
    ///
    /// A node is descended into when the linear form, evaluated at the node's
    /// box corners, either hits `target` exactly or takes values on both sides
    /// of it. Internal node boxes are unions of their children, so the result
    /// may include pieces whose own extent misses the plane only through that
    /// looser bound at an ancestor; it never omits a piece whose extent
    /// contains a solution. Piece extents may be unbounded; `coefficients` and
    /// `target` are expected to be finite.
    ///
    /// # Panics
    ///
    /// Panics if `coefficients.len() != self.dimensions()`.
    #[must_use]
    pub fn query_plane(&self, coefficients: &[f64], target: f64) -> Vec<usize> {
        self.check_coefficients(coefficients);
        let mut out = Vec::new();
        let visited = self.walk(
            |bounds| box_meets_plane(bounds, coefficients, target),
            |piece| out.push(piece),
        );
        out.sort_unstable();
        tracing::trace!(visited, candidates = out.len(), "interval tree plane query");
        out
    }

    /// Ids of the pieces whose extent overlaps the closed box `min..=max`,
    /// strictly ascending.
    ///
    /// # Panics
    ///
    /// Panics if `min` or `max` does not have one value per dimension.
    #[must_use]
    pub fn query_box(&self, min: &[f64], max: &[f64]) -> Vec<usize> {
        assert!(
            min.len() == self.dimensions && max.len() == self.dimensions,
            "query box must have {} dimensions",
            self.dimensions
        );
        let mut out = Vec::new();
        let visited = self.walk(
            |bounds| {
                bounds
                    .chunks_exact(2)
                    .zip(min.iter().zip(max))
                    .all(|(b, (&lo, &hi))| b[0] <= hi && b[1] >= lo)
            },
            |piece| out.push(piece),
        );
        out.sort_unstable();
        tracing::trace!(visited, candidates = out.len(), "interval tree box query");
        out
    }

    /// Depth-first traversal that only descends into nodes passing `test`.
    ///
    /// Returns the number of nodes visited.
    fn walk<T, F>(&self, mut test: T, mut f: F) -> usize
    where
        T: FnMut(&[f64]) -> bool,
        F: FnMut(usize),
    {
        if self.is_empty() {
            return 0;
        }
        // Depth-first with the left child on top: at most `height + 1` entries.
        let mut stack: SmallVec<[usize; 64]> = SmallVec::new();
        stack.push(0);
        let mut visited = 0;
        while let Some(node) = stack.pop() {
            visited += 1;
            if !test(self.bounds(node)) {
                continue;
            }
            match self.node_piece[node] {
                Some(piece) => f(piece),
                None => {
                    stack.push(2 * node + 2);
                    stack.push(2 * node + 1);
                }
            }
        }
        visited
    }

    fn bounds(&self, node: usize) -> &[f64] {
        let stride = 2 * self.dimensions;
        &self.node_bounds[node * stride..(node + 1) * stride]
    }

    fn check_dimension(&self, d: usize) {
        assert!(
            d < self.dimensions,
            "dimension {d} out of range for a {}-dimensional tree",
            self.dimensions
        );
    }

    fn check_coefficients(&self, coefficients: &[f64]) {
        assert_eq!(
            coefficients.len(),
            self.dimensions,
            "plane query needs one coefficient per dimension"
        );
    }
}

/// Corner test for `coefficients · x = target` against one box.
///
/// The form is linear, so over the box it takes every value between its
/// smallest and largest corner value: the box meets the plane exactly when
/// some corner lies on the plane or two corners lie on opposite sides.
///
/// Axes with a zero coefficient do not contribute, so an infinite extent along
/// them never turns a corner value into NaN.
fn box_meets_plane(bounds: &[f64], coefficients: &[f64], target: f64) -> bool {
    let at_corner = |mask: u32| -> f64 {
        coefficients
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0.0)
            .map(|(d, c)| c * bounds[2 * d + ((mask >> d) & 1) as usize])
            .sum()
    };

    let at_min = at_corner(0);
    if at_min == target {
        return true;
    }
    let above = at_min > target;
    let corners = 1_u32 << coefficients.len();
    (1..corners).any(|mask| {
        let value = at_corner(mask);
        value == target || (value > target) != above
    })
}

fn widest_axis<C>(pieces: &[usize], dimensions: usize, centroid: C) -> usize
where
    C: Fn(usize, usize) -> f64,
{
    let mut best = (0, f64::NEG_INFINITY);
    for axis in 0..dimensions {
        let (lo, hi) = pieces
            .iter()
            .map(|&piece| centroid(piece, axis))
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), c| {
                (lo.min(c), hi.max(c))
            });
        if hi - lo > best.1 {
            best = (axis, hi - lo);
        }
    }
    best.0
}
