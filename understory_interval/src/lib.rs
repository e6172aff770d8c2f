// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_interval --heading-base-level=0

//! Understory Interval: an implicit bounding-interval tree over the pieces of a
//! decomposed dataset.
//!
//! Each piece (a domain, a block) contributes one `[min, max]` extent per
//! dimension. Dimensions need not be physical space: a common use is indexing
//! the per-domain range of one or more scalar fields, so that a selection such
//! as "cells where `a·x = c`" can skip every domain whose ranges cannot contain
//! a solution before any data is loaded.
//!
//! - [`IntervalTree::query_plane`]: pieces whose extent may meet the hyperplane
//!   `coefficients · x = target`.
//! - [`IntervalTree::query_box`]: pieces whose extent overlaps an axis-aligned box.
//! - [`IntervalTree::dimension_min`] / [`IntervalTree::dimension_max`]: bounds
//!   of the whole dataset.
//!
//! Query results are strictly ascending piece ids, ready to merge against other
//! sorted id lists. Plane queries are conservative: they may report a piece
//! whose extent misses the plane, but never skip one that meets it.
//!
//! The tree is a complete binary tree stored in flat arrays (node `i` has
//! children `2i + 1` and `2i + 2`), built once per decomposition and read-only
//! afterwards. Traversal is iterative with a small inline stack.
//!
//! ## Example
//!
//! ```rust
//! use understory_interval::IntervalTree;
//!
//! // Four pieces tiling [0, 4] x [0, 1], one unit wide each.
//! let pieces = [
//!     [0.0, 1.0, 0.0, 1.0],
//!     [1.0, 2.0, 0.0, 1.0],
//!     [2.0, 3.0, 0.0, 1.0],
//!     [3.0, 4.0, 0.0, 1.0],
//! ];
//! let tree = IntervalTree::build(2, &pieces).unwrap();
//!
//! // The line x + y = 2.5 crosses pieces 1 and 2.
//! assert_eq!(tree.query_plane(&[1.0, 1.0], 2.5), [1, 2]);
//! assert_eq!(tree.dimension_max(0), 4.0);
//! ```
//!
//! ## Float semantics
//!
//! Extents must not be NaN; the builder rejects NaN and inverted extents.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod builder;
mod error;
mod tree;

pub use builder::IntervalTreeBuilder;
pub use error::BuildError;
pub use tree::{IntervalTree, MAX_DIMENSIONS};
