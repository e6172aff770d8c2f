// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single selectable unit.

use alloc::string::String;

use smallvec::SmallVec;

/// One atomic selectable unit: a domain, a material slab, a block.
///
/// Sets are produced on demand by [`SetArray::get_set`](crate::SetArray::get_set)
/// and owned by whoever asked for them; they hold no reference back to the
/// array that generated them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Set {
    name: String,
    id: Option<usize>,
    map_outs: SmallVec<[usize; 1]>,
}

impl Set {
    /// Creates a set with no collection memberships.
    ///
    /// `id` is `None` when the set has no independently assigned id and is
    /// identified purely by its position.
    #[must_use]
    pub fn new(name: impl Into<String>, id: Option<usize>) -> Self {
        Self {
            name: name.into(),
            id,
            map_outs: SmallVec::new(),
        }
    }

    /// Records that this set participates in the collection at local offset `collection`.
    #[must_use]
    pub fn with_map_out(mut self, collection: usize) -> Self {
        if !self.map_outs.contains(&collection) {
            self.map_outs.push(collection);
        }
        self
    }

    /// The set's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The independently assigned id, if any.
    #[must_use]
    pub fn id(&self) -> Option<usize> {
        self.id
    }

    /// Local offsets of the collections this set maps into.
    #[must_use]
    pub fn map_outs(&self) -> &[usize] {
        &self.map_outs
    }

    /// Consumes the set and returns its name.
    #[must_use]
    pub fn into_name(self) -> String {
        self.name
    }
}
