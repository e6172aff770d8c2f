// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index-parameterized generator standing in for many same-template sets.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::ops::Range;

use crate::{
    AttributeBundle, Collection, ConfigError, NamePattern, Namespace, Role, SelectionState, Set,
    SetState, Turn,
};

/// How a [`SetArray`] derives the names of its sets.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NamingMode {
    /// One stored name per set.
    ExplicitNameList,
    /// A `printf`-style template with one integer placeholder.
    PrintfPattern,
    /// The prefix followed by the decimal display number.
    DefaultPrefixIndexPattern,
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Naming {
    Explicit(Vec<String>),
    Pattern(NamePattern),
    Prefix,
}

/// Stands in for `count` sets that share a naming convention.
///
/// Nothing per-set is stored unless the array uses an explicit name list:
/// [`get_set`](Self::get_set) builds a [`Set`] on demand, and selection state
/// lives in a shared [`SelectionState`] at the global ids
/// `first_global_index..first_global_index + count`.
///
/// ```
/// use understory_subset::{Role, SelectionState, SetArray, SetState, Turn};
///
/// let domains = SetArray::builder("domains", Role::Domain)
///     .prefix("domain")
///     .count(5)
///     .unique_ids(true)
///     .first_global_index(1)
///     .build()
///     .unwrap();
///
/// let set = domains.get_set(3);
/// assert_eq!(set.name(), "domain3");
/// assert_eq!(set.id(), Some(3));
/// assert_eq!(domains.resolve_global_index("domain3"), Some(4));
///
/// let mut selection = SelectionState::new(6);
/// domains.bulk_set_state(&mut selection, Turn::On, false);
/// assert_eq!(domains.aggregate_state(&selection), SetState::AllUsed);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SetArray {
    prefix: String,
    naming: Naming,
    count: usize,
    first_display_index: i64,
    assign_unique_ids: bool,
    category: String,
    role: Role,
    parent: usize,
    first_global_index: usize,
    owner_collection_offset: usize,
}

impl SetArray {
    /// Starts configuring an array whose collection has `category` and `role`.
    #[must_use]
    pub fn builder(category: impl Into<String>, role: Role) -> SetArrayBuilder {
        SetArrayBuilder::new(category, role)
    }

    /// Reconstructs an array from its persisted form.
    ///
    /// The naming mode is chosen from the bundle: a non-empty name list selects
    /// [`NamingMode::ExplicitNameList`], otherwise a prefix containing `%` selects
    /// [`NamingMode::PrintfPattern`], otherwise
    /// [`NamingMode::DefaultPrefixIndexPattern`].
    pub fn from_attributes(bundle: AttributeBundle) -> Result<Self, ConfigError> {
        let array = Self::validate(bundle).inspect_err(|err| {
            tracing::debug!(error = %err, "rejected set array configuration");
        })?;
        tracing::debug!(
            category = %array.category,
            count = array.count,
            first_global_index = array.first_global_index,
            mode = ?array.naming_mode(),
            "configured set array"
        );
        Ok(array)
    }

    fn validate(bundle: AttributeBundle) -> Result<Self, ConfigError> {
        let AttributeBundle {
            prefix,
            names,
            count,
            first_display_index,
            use_unique_ids,
            category,
            role,
            parent,
            first_global_index,
            owner_collection_offset,
        } = bundle;

        let role = Role::from_code(role).ok_or(ConfigError::UnknownRole(role))?;
        first_global_index
            .checked_add(count)
            .ok_or(ConfigError::CountOverflow)?;
        i64::try_from(count)
            .ok()
            .and_then(|count| first_display_index.checked_add(count))
            .ok_or(ConfigError::CountOverflow)?;

        let naming = if !names.is_empty() {
            if names.len() != count {
                return Err(ConfigError::NameCountMismatch {
                    names: names.len(),
                    count,
                });
            }
            let mut seen = BTreeSet::new();
            if let Some(name) = names.iter().find(|name| !seen.insert(name.as_str())) {
                return Err(ConfigError::DuplicateName(name.clone()));
            }
            Naming::Explicit(names)
        } else if prefix.contains('%') {
            Naming::Pattern(NamePattern::new(&prefix)?)
        } else {
            Naming::Prefix
        };

        Ok(Self {
            prefix,
            naming,
            count,
            first_display_index,
            assign_unique_ids: use_unique_ids,
            category,
            role,
            parent,
            first_global_index,
            owner_collection_offset,
        })
    }

    /// Returns the persisted form of this array.
    #[must_use]
    pub fn to_attributes(&self) -> AttributeBundle {
        AttributeBundle {
            prefix: self.prefix.clone(),
            names: match &self.naming {
                Naming::Explicit(names) => names.clone(),
                Naming::Pattern(_) | Naming::Prefix => Vec::new(),
            },
            count: self.count,
            first_display_index: self.first_display_index,
            use_unique_ids: self.assign_unique_ids,
            category: self.category.clone(),
            role: self.role.code(),
            parent: self.parent,
            first_global_index: self.first_global_index,
            owner_collection_offset: self.owner_collection_offset,
        }
    }

    /// How names are derived.
    #[must_use]
    pub fn naming_mode(&self) -> NamingMode {
        match self.naming {
            Naming::Explicit(_) => NamingMode::ExplicitNameList,
            Naming::Pattern(_) => NamingMode::PrintfPattern,
            Naming::Prefix => NamingMode::DefaultPrefixIndexPattern,
        }
    }

    /// Number of sets the array stands in for.
    #[must_use]
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if the array stands in for no sets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The global ids covered by this array.
    #[must_use]
    pub fn range(&self) -> Range<usize> {
        self.first_global_index..self.first_global_index + self.count
    }

    /// Name prefix or template.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Category of the materialized collection.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Role of the materialized collection.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Handle of the set the materialized collection subdivides.
    #[must_use]
    pub fn parent(&self) -> usize {
        self.parent
    }

    /// Global id of the first set.
    #[must_use]
    pub fn first_global_index(&self) -> usize {
        self.first_global_index
    }

    /// Number rendered into the name of the first set.
    #[must_use]
    pub fn first_display_index(&self) -> i64 {
        self.first_display_index
    }

    /// Whether generated sets carry an id.
    #[must_use]
    pub fn assigns_unique_ids(&self) -> bool {
        self.assign_unique_ids
    }

    /// Position of this array within its owning collection's children.
    #[must_use]
    pub fn owner_collection_offset(&self) -> usize {
        self.owner_collection_offset
    }

    fn display_index(&self, local: usize) -> i64 {
        // `validate` guarantees `first_display_index + count` fits in an `i64`.
        self.first_display_index + local as i64
    }

    /// Builds the set at `local`.
    ///
    /// # Panics
    ///
    /// Panics if `local >= self.len()`.
    #[must_use]
    pub fn get_set(&self, local: usize) -> Set {
        assert!(
            local < self.count,
            "set index {local} out of range for an array of {} sets",
            self.count
        );
        let name = match &self.naming {
            Naming::Explicit(names) => names[local].clone(),
            Naming::Pattern(pattern) => pattern.format(self.display_index(local)),
            Naming::Prefix => format!("{}{}", self.prefix, self.display_index(local)),
        };
        Set::new(name, self.set_global_id(local)).with_map_out(self.owner_collection_offset)
    }

    /// Builds every set in local order.
    pub fn sets(&self) -> impl Iterator<Item = Set> + '_ {
        (0..self.count).map(|local| self.get_set(local))
    }

    /// The id a generated set at `local` carries, if the array assigns ids.
    #[must_use]
    pub fn set_global_id(&self, local: usize) -> Option<usize> {
        self.assign_unique_ids.then_some(local)
    }

    /// Materializes the collection this array describes.
    ///
    /// The namespace is a [`Namespace::Range`] over [`range`](Self::range); an
    /// enumerated namespace over the same ids is equivalent.
    #[must_use]
    pub fn make_collection(&self) -> Collection {
        Collection::new(
            self.category.clone(),
            self.role,
            self.parent,
            Namespace::range(self.first_global_index, self.count),
        )
    }

    /// Aggregate usage of the array's sets; see [`SetState::aggregate`].
    ///
    /// # Panics
    ///
    /// Panics if the array's range does not fit in `selection`.
    #[must_use]
    pub fn aggregate_state(&self, selection: &SelectionState) -> SetState {
        SetState::aggregate(selection.as_slice()[self.range()].iter().copied())
    }

    /// Turns every set of the array on or off.
    ///
    /// With `for_load_balancing`, turning off a set that is fully used records
    /// [`SetState::AllUsedByOtherWorker`] instead; see [`Turn::apply`].
    ///
    /// # Panics
    ///
    /// Panics if the array's range does not fit in `selection`.
    pub fn bulk_set_state(&self, selection: &mut SelectionState, turn: Turn, for_load_balancing: bool) {
        for slot in selection.slots_mut(self.range()) {
            *slot = turn.apply(*slot, for_load_balancing);
        }
    }

    /// Turns on exactly the sets at the local indices in `candidates` and turns
    /// every other set of the array off.
    ///
    /// `candidates` must be strictly ascending, which is what
    /// spatial queries over the array's pieces return.
    ///
    /// # Panics
    ///
    /// Panics if a candidate is out of range, or if the array's range does not
    /// fit in `selection`.
    pub fn restrict_to(
        &self,
        selection: &mut SelectionState,
        candidates: &[usize],
        for_load_balancing: bool,
    ) {
        debug_assert!(
            candidates.windows(2).all(|w| w[0] < w[1]),
            "restriction candidates must be strictly ascending"
        );
        assert!(
            candidates.last().is_none_or(|&last| last < self.count),
            "restriction candidate out of range for an array of {} sets",
            self.count
        );

        let mut next = candidates.iter().copied().peekable();
        for (local, slot) in selection.slots_mut(self.range()).iter_mut().enumerate() {
            let turn = if next.next_if_eq(&local).is_some() {
                Turn::On
            } else {
                Turn::Off
            };
            *slot = turn.apply(*slot, for_load_balancing);
        }
        tracing::trace!(
            category = %self.category,
            selected = candidates.len(),
            count = self.count,
            "restricted set array"
        );
    }

    /// Global id of the set named `name`, or `None` if no set of this array has
    /// that name.
    #[must_use]
    pub fn resolve_global_index(&self, name: &str) -> Option<usize> {
        let display = match &self.naming {
            Naming::Explicit(names) => {
                return names
                    .iter()
                    .position(|n| n == name)
                    .map(|local| self.first_global_index + local);
            }
            Naming::Pattern(pattern) => pattern.parse(name)?,
            Naming::Prefix => {
                let digits = name.strip_prefix(self.prefix.as_str())?;
                let value: i64 = digits.parse().ok()?;
                // Reject forms the formatter never produces, such as `+3` or `03`.
                if value.to_string() != digits {
                    return None;
                }
                value
            }
        };
        let local = usize::try_from(display.checked_sub(self.first_display_index)?).ok()?;
        (local < self.count).then(|| self.first_global_index + local)
    }
}

impl TryFrom<AttributeBundle> for SetArray {
    type Error = ConfigError;

    fn try_from(bundle: AttributeBundle) -> Result<Self, ConfigError> {
        Self::from_attributes(bundle)
    }
}

/// Typed configuration for a [`SetArray`].
///
/// Construct with [`SetArray::builder`]. [`build`](Self::build) applies the same
/// validation as [`SetArray::from_attributes`].
#[derive(Clone, Debug)]
pub struct SetArrayBuilder {
    bundle: AttributeBundle,
}

impl SetArrayBuilder {
    fn new(category: impl Into<String>, role: Role) -> Self {
        Self {
            bundle: AttributeBundle {
                category: category.into(),
                role: role.code(),
                ..AttributeBundle::default()
            },
        }
    }

    /// Sets the name prefix, or a `printf`-style template if it contains `%`.
    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bundle.prefix = prefix.into();
        self
    }

    /// Uses one explicit name per set and sets the count to match.
    #[must_use]
    pub fn names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.bundle.names = names.into_iter().map(Into::into).collect();
        self.bundle.count = self.bundle.names.len();
        self
    }

    /// Sets the number of sets.
    #[must_use]
    pub fn count(mut self, count: usize) -> Self {
        self.bundle.count = count;
        self
    }

    /// Sets the number rendered into the first set's name.
    #[must_use]
    pub fn first_display_index(mut self, first: i64) -> Self {
        self.bundle.first_display_index = first;
        self
    }

    /// Whether generated sets carry their local index as an id.
    #[must_use]
    pub fn unique_ids(mut self, enabled: bool) -> Self {
        self.bundle.use_unique_ids = enabled;
        self
    }

    /// Sets the handle of the set the collection subdivides.
    #[must_use]
    pub fn parent(mut self, parent: usize) -> Self {
        self.bundle.parent = parent;
        self
    }

    /// Sets the global id of the first set.
    #[must_use]
    pub fn first_global_index(mut self, first: usize) -> Self {
        self.bundle.first_global_index = first;
        self
    }

    /// Sets the array's position within its owning collection's children.
    #[must_use]
    pub fn owner_collection_offset(mut self, offset: usize) -> Self {
        self.bundle.owner_collection_offset = offset;
        self
    }

    /// Validates the configuration and builds the array.
    pub fn build(self) -> Result<SetArray, ConfigError> {
        SetArray::from_attributes(self.bundle)
    }
}
