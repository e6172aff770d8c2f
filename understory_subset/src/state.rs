// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-set usage state and the flat selection vector it lives in.

use alloc::vec::Vec;
use core::ops::{Index, Range};

/// Usage state of a single set, or the aggregate state of a group of sets.
///
/// The numeric codes returned by [`SetState::code`] are stable and are what
/// gets exchanged with other workers when they agree on ownership.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SetState {
    /// Not selected.
    #[default]
    NoneUsed,
    /// Partially selected (only meaningful for aggregates and for sets with subsets).
    SomeUsed,
    /// Fully selected and produced by this worker.
    AllUsed,
    /// Fully selected, but another parallel worker currently produces it.
    AllUsedByOtherWorker,
}

impl SetState {
    /// Returns the stable numeric code of this state.
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::NoneUsed => 0,
            Self::SomeUsed => 1,
            Self::AllUsed => 2,
            Self::AllUsedByOtherWorker => 3,
        }
    }

    /// Parses a numeric code produced by [`SetState::code`].
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NoneUsed),
            1 => Some(Self::SomeUsed),
            2 => Some(Self::AllUsed),
            3 => Some(Self::AllUsedByOtherWorker),
            _ => None,
        }
    }

    /// Returns `true` for every state except [`SetState::NoneUsed`].
    #[must_use]
    pub const fn is_used(self) -> bool {
        !matches!(self, Self::NoneUsed)
    }

    /// Returns `true` if the set is fully selected, regardless of which worker produces it.
    #[must_use]
    pub const fn is_all(self) -> bool {
        matches!(self, Self::AllUsed | Self::AllUsedByOtherWorker)
    }

    /// Classifies a group of member states into a single aggregate.
    ///
    /// - Any member that is [`SomeUsed`](Self::SomeUsed) makes the group `SomeUsed`.
    /// - All members fully selected (either flavor) gives [`AllUsed`](Self::AllUsed).
    /// - All members unselected gives [`NoneUsed`](Self::NoneUsed).
    /// - Anything else, including a mix of fully selected and unselected members and
    ///   an empty group, is reported as `SomeUsed`.
    ///
    /// The result is never [`AllUsedByOtherWorker`](Self::AllUsedByOtherWorker).
    ///
    /// ```
    /// use understory_subset::SetState::{self, *};
    ///
    /// assert_eq!(SetState::aggregate([AllUsed, AllUsedByOtherWorker]), AllUsed);
    /// assert_eq!(SetState::aggregate([NoneUsed, NoneUsed]), NoneUsed);
    /// assert_eq!(SetState::aggregate([NoneUsed, AllUsed]), SomeUsed);
    /// ```
    pub fn aggregate<I>(states: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut none = 0_usize;
        let mut all = 0_usize;
        for state in states {
            match state {
                Self::SomeUsed => return Self::SomeUsed,
                Self::NoneUsed => none += 1,
                Self::AllUsed | Self::AllUsedByOtherWorker => all += 1,
            }
        }

        match (none, all) {
            (0, all) if all > 0 => Self::AllUsed,
            (none, 0) if none > 0 => Self::NoneUsed,
            // Mixed members, or no members at all.
            _ => Self::SomeUsed,
        }
    }
}

/// Target of a bulk mutation: turn a group of sets fully on or fully off.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Turn {
    /// Deselect.
    Off,
    /// Select fully.
    On,
}

impl Turn {
    /// Returns the state a slot currently in `current` ends up in.
    ///
    /// During a load-balancing pass, turning off a fully selected set records
    /// [`SetState::AllUsedByOtherWorker`] instead of [`SetState::NoneUsed`].
    #[must_use]
    pub const fn apply(self, current: SetState, for_load_balancing: bool) -> SetState {
        match self {
            Self::On => SetState::AllUsed,
            Self::Off if for_load_balancing && current.is_all() => SetState::AllUsedByOtherWorker,
            Self::Off => SetState::NoneUsed,
        }
    }
}

impl From<Turn> for SetState {
    fn from(turn: Turn) -> Self {
        match turn {
            Turn::Off => Self::NoneUsed,
            Turn::On => Self::AllUsed,
        }
    }
}

/// Flat usage vector indexed by global set id.
///
/// Callers read it freely, but mutation goes through the bulk operations on
/// [`SetArray`](crate::SetArray) or through a wholesale [`reset`](Self::reset)
/// between restriction cycles.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionState {
    states: Vec<SetState>,
}

impl SelectionState {
    /// Creates a selection vector of `len` sets, all [`SetState::NoneUsed`].
    #[must_use]
    pub fn new(len: usize) -> Self {
        Self {
            states: alloc::vec![SetState::NoneUsed; len],
        }
    }

    /// Wraps an existing state vector, for example one received from the
    /// collective step that reconciles ownership across workers.
    #[must_use]
    pub fn from_states(states: Vec<SetState>) -> Self {
        Self { states }
    }

    /// Returns the number of sets tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Returns `true` if no sets are tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns the state of the set with global id `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<SetState> {
        self.states.get(index).copied()
    }

    /// Returns all states in global id order.
    #[must_use]
    pub fn as_slice(&self) -> &[SetState] {
        &self.states
    }

    /// Counts the sets currently in `state`.
    #[must_use]
    pub fn count(&self, state: SetState) -> usize {
        self.states.iter().filter(|&&s| s == state).count()
    }

    /// Overwrites every entry with `state`.
    pub fn reset(&mut self, state: SetState) {
        self.states.fill(state);
    }

    /// Consumes the selection and returns the underlying vector.
    #[must_use]
    pub fn into_states(self) -> Vec<SetState> {
        self.states
    }

    /// Mutable access to a contiguous run of global ids.
    ///
    /// Panics if `range` is out of bounds.
    pub(crate) fn slots_mut(&mut self, range: Range<usize>) -> &mut [SetState] {
        let len = self.states.len();
        assert!(
            range.end <= len,
            "global ids {range:?} out of range for a selection of {len} sets"
        );
        &mut self.states[range]
    }
}

impl Index<usize> for SelectionState {
    type Output = SetState;

    fn index(&self, index: usize) -> &SetState {
        &self.states[index]
    }
}

impl FromIterator<SetState> for SelectionState {
    fn from_iter<I: IntoIterator<Item = SetState>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}
