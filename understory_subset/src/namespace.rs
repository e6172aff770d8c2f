// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local-to-global index mappings for collections.

use alloc::vec::Vec;
use core::iter::{Copied, FusedIterator};
use core::ops::Range;
use core::slice;

/// Maps the local member index of a collection to a global set id.
///
/// Both variants describe an ordered sequence of global ids; a `Range` and an
/// `Enumerated` namespace holding the same ids are interchangeable.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Namespace {
    /// The contiguous ids `first..first + count`.
    Range {
        /// First global id.
        first: usize,
        /// Number of ids.
        count: usize,
    },
    /// An explicit, ordered list of global ids.
    Enumerated(Vec<usize>),
}

impl Namespace {
    /// Creates a contiguous namespace.
    ///
    /// # Panics
    ///
    /// Panics if `first + count` overflows.
    #[must_use]
    pub fn range(first: usize, count: usize) -> Self {
        assert!(
            first.checked_add(count).is_some(),
            "namespace range {first} + {count} overflows"
        );
        Self::Range { first, count }
    }

    /// Creates an enumerated namespace from an ordered id list.
    #[must_use]
    pub fn enumerated(indices: impl Into<Vec<usize>>) -> Self {
        Self::Enumerated(indices.into())
    }

    /// Number of members.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Range { count, .. } => *count,
            Self::Enumerated(indices) => indices.len(),
        }
    }

    /// Returns `true` if the namespace has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Global id of the member at `local`, if in range.
    #[must_use]
    pub fn get(&self, local: usize) -> Option<usize> {
        match self {
            Self::Range { first, count } => (local < *count).then(|| first + local),
            Self::Enumerated(indices) => indices.get(local).copied(),
        }
    }

    /// Returns `true` if `global` is a member.
    #[must_use]
    pub fn contains(&self, global: usize) -> bool {
        self.local_index_of(global).is_some()
    }

    /// Local index of the member with global id `global`.
    ///
    /// O(1) for ranges, a linear scan for enumerated namespaces.
    #[must_use]
    pub fn local_index_of(&self, global: usize) -> Option<usize> {
        match self {
            Self::Range { first, count } => global
                .checked_sub(*first)
                .filter(|&offset| offset < *count),
            Self::Enumerated(indices) => indices.iter().position(|&i| i == global),
        }
    }

    /// Returns `true` if every member is a valid index into a selection of `len` sets.
    #[must_use]
    pub fn fits(&self, len: usize) -> bool {
        match self {
            Self::Range { first, count } => first.checked_add(*count).is_some_and(|end| end <= len),
            Self::Enumerated(indices) => indices.iter().all(|&i| i < len),
        }
    }

    /// Iterates the member global ids in local order.
    pub fn iter(&self) -> NamespaceIter<'_> {
        let inner = match self {
            Self::Range { first, count } => Inner::Range(*first..first.saturating_add(*count)),
            Self::Enumerated(indices) => Inner::Enumerated(indices.iter().copied()),
        };
        NamespaceIter { inner }
    }

    /// Converts to an enumerated namespace with the same members.
    #[must_use]
    pub fn into_enumerated(self) -> Self {
        match self {
            Self::Range { first, count } => Self::Enumerated((first..first + count).collect()),
            enumerated => enumerated,
        }
    }
}

impl<'a> IntoIterator for &'a Namespace {
    type Item = usize;
    type IntoIter = NamespaceIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the global ids of a [`Namespace`].
#[derive(Clone, Debug)]
pub struct NamespaceIter<'a> {
    inner: Inner<'a>,
}

#[derive(Clone, Debug)]
enum Inner<'a> {
    Range(Range<usize>),
    Enumerated(Copied<slice::Iter<'a, usize>>),
}

impl Iterator for NamespaceIter<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        match &mut self.inner {
            Inner::Range(r) => r.next(),
            Inner::Enumerated(it) => it.next(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            Inner::Range(r) => r.size_hint(),
            Inner::Enumerated(it) => it.size_hint(),
        }
    }
}

impl ExactSizeIterator for NamespaceIter<'_> {}

impl FusedIterator for NamespaceIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn range_and_enumerated_agree() {
        let range = Namespace::range(10, 4);
        let enumerated = Namespace::enumerated(vec![10, 11, 12, 13]);

        assert_eq!(range.len(), enumerated.len());
        assert!(range.iter().eq(enumerated.iter()));
        for local in 0..5 {
            assert_eq!(range.get(local), enumerated.get(local));
        }
        for global in 8..16 {
            assert_eq!(range.contains(global), enumerated.contains(global));
            assert_eq!(range.local_index_of(global), enumerated.local_index_of(global));
        }
        assert_eq!(range.into_enumerated(), enumerated);
    }

    #[test]
    fn enumerated_keeps_caller_order() {
        let ns = Namespace::enumerated(vec![7, 2, 9]);
        assert_eq!(ns.get(0), Some(7));
        assert_eq!(ns.local_index_of(9), Some(2));
        assert!(!ns.contains(3));
        assert!(ns.fits(10));
        assert!(!ns.fits(9));
    }

    #[test]
    fn empty_range() {
        let ns = Namespace::range(5, 0);
        assert!(ns.is_empty());
        assert_eq!(ns.iter().len(), 0);
        assert!(!ns.contains(5));
        assert!(ns.fits(5));
    }
}
