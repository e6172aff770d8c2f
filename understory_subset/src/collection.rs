// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named, typed groupings of sets.

use alloc::string::String;

use crate::{Namespace, NamespaceIter, SelectionState, SetState};

/// What kind of subdivision a collection describes.
///
/// The integer codes returned by [`Role::code`] are the persisted form used in
/// [`AttributeBundle`](crate::AttributeBundle).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    /// Whole-mesh topology.
    Topology,
    /// One entry per processor/file the data was written from.
    Processor,
    /// Blocks (groups of domains).
    Block,
    /// Domains.
    Domain,
    /// Arbitrary assemblies of other sets.
    Assembly,
    /// Materials.
    Material,
    /// Boundaries.
    Boundary,
    /// Species within a material.
    Species,
    /// Values of an enumerated scalar.
    Enumeration,
    /// Anything a reader defines for itself.
    UserDefined,
}

impl Role {
    /// Stable integer code.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Topology => 0,
            Self::Processor => 1,
            Self::Block => 2,
            Self::Domain => 3,
            Self::Assembly => 4,
            Self::Material => 5,
            Self::Boundary => 6,
            Self::Species => 7,
            Self::Enumeration => 8,
            Self::UserDefined => 9,
        }
    }

    /// Parses a code produced by [`Role::code`].
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::Topology,
            1 => Self::Processor,
            2 => Self::Block,
            3 => Self::Domain,
            4 => Self::Assembly,
            5 => Self::Material,
            6 => Self::Boundary,
            7 => Self::Species,
            8 => Self::Enumeration,
            9 => Self::UserDefined,
            _ => return None,
        })
    }
}

/// A named grouping of member sets, addressed through its own [`Namespace`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Collection {
    category: String,
    role: Role,
    parent: usize,
    namespace: Namespace,
}

impl Collection {
    /// Creates a collection under the set with handle `parent`.
    #[must_use]
    pub fn new(category: impl Into<String>, role: Role, parent: usize, namespace: Namespace) -> Self {
        Self {
            category: category.into(),
            role,
            parent,
            namespace,
        }
    }

    /// Category name, for example `"domains"` or `"mat1"`.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Role of the collection.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Handle of the set this collection subdivides.
    #[must_use]
    pub fn parent(&self) -> usize {
        self.parent
    }

    /// The local-to-global mapping.
    #[must_use]
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// Number of member sets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.namespace.len()
    }

    /// Returns `true` if the collection has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.namespace.is_empty()
    }

    /// Global ids of the member sets in local order.
    pub fn subsets(&self) -> NamespaceIter<'_> {
        self.namespace.iter()
    }

    /// Returns `true` if the set with global id `global` is a member.
    #[must_use]
    pub fn contains(&self, global: usize) -> bool {
        self.namespace.contains(global)
    }

    /// Aggregate usage of the members; see [`SetState::aggregate`].
    ///
    /// # Panics
    ///
    /// Panics if a member id is out of range for `selection`.
    #[must_use]
    pub fn state(&self, selection: &SelectionState) -> SetState {
        SetState::aggregate(self.subsets().map(|global| selection[global]))
    }
}
