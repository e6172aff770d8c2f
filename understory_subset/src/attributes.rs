// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat persisted form of a [`SetArray`](crate::SetArray).

use alloc::string::String;
use alloc::vec::Vec;

/// Every configuration field of a set array as plain values.
///
/// Produced by [`SetArray::to_attributes`](crate::SetArray::to_attributes) and
/// consumed by [`SetArray::from_attributes`](crate::SetArray::from_attributes).
/// Converting a valid bundle to an array and back yields an equal bundle.
///
/// With the `serde` feature the bundle serializes as a flat map keyed by the
/// field names below.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AttributeBundle {
    /// Name prefix, or a `printf`-style template when it contains `%`.
    pub prefix: String,
    /// Explicit per-set names; when non-empty these win over `prefix`.
    pub names: Vec<String>,
    /// Number of sets in the array.
    pub count: usize,
    /// Number rendered into the name of the first set.
    pub first_display_index: i64,
    /// Whether generated sets carry their local index as an id.
    pub use_unique_ids: bool,
    /// Category of the collection the array materializes.
    pub category: String,
    /// [`Role`](crate::Role) code of that collection.
    pub role: i32,
    /// Handle of the set the collection subdivides.
    pub parent: usize,
    /// Global id of the first set.
    pub first_global_index: usize,
    /// Position of the array within its owning collection's children.
    pub owner_collection_offset: usize,
}
