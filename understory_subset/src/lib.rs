// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_subset --heading-base-level=0

//! Understory Subset: a compact, lazily materialized description of which pieces
//! of a domain-decomposed dataset exist and which are currently selected.
//!
//! Decomposed meshes can have hundreds of thousands of domains, each possibly
//! split further into materials or species. Building one object per piece up
//! front does not scale, so this crate describes pieces through a handful of
//! small types:
//!
//! - [`SetArray`]: an index-parameterized generator standing in for many sets
//!   that share a naming convention. It builds a [`Set`] only when asked.
//! - [`Set`]: one atomic selectable unit (a domain, a material slab, a block).
//! - [`Collection`]: a named, typed grouping of member sets addressed through a
//!   [`Namespace`].
//! - [`Namespace`]: a local-to-global index mapping, either a contiguous range
//!   or an explicit list.
//! - [`SelectionState`]: the flat usage vector over every set, indexed by global
//!   set id, holding one [`SetState`] per set.
//!
//! Sets that are fully selected but produced by another parallel worker are
//! recorded as [`SetState::AllUsedByOtherWorker`], keeping "never needed" apart
//! from "needed, but produced elsewhere" during load balancing.
//!
//! ## Example
//!
//! ```rust
//! use understory_subset::{Role, SelectionState, SetArray, SetState, Turn};
//!
//! // 1000 domains named dom0001.. dom1000, at global ids 1..=1000.
//! let domains = SetArray::builder("domains", Role::Domain)
//!     .prefix("dom%04d")
//!     .count(1000)
//!     .first_display_index(1)
//!     .first_global_index(1)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(domains.get_set(41).name(), "dom0042");
//! assert_eq!(domains.resolve_global_index("dom0042"), Some(42));
//!
//! let mut selection = SelectionState::new(1001);
//! domains.bulk_set_state(&mut selection, Turn::On, false);
//!
//! // A spatial query narrowed the work down to three domains.
//! domains.restrict_to(&mut selection, &[3, 17, 512], false);
//! assert_eq!(domains.aggregate_state(&selection), SetState::SomeUsed);
//! assert_eq!(selection.count(SetState::AllUsed), 3);
//! ```
//!
//! ## Persistence
//!
//! [`SetArray::to_attributes`] and [`SetArray::from_attributes`] convert to and
//! from an [`AttributeBundle`], a flat record of plain values. With the `serde`
//! feature the bundle derives `Serialize` and `Deserialize`.
//!
//! ## Features
//!
//! - `std` *(default)*: no effect beyond linking the standard library.
//! - `serde`: serialization for [`AttributeBundle`], [`SetState`] and [`Role`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod array;
mod attributes;
mod collection;
mod error;
mod namespace;
pub mod pattern;
mod set;
mod state;

pub use array::{NamingMode, SetArray, SetArrayBuilder};
pub use attributes::AttributeBundle;
pub use collection::{Collection, Role};
pub use error::ConfigError;
pub use namespace::{Namespace, NamespaceIter};
pub use pattern::{NamePattern, PatternError};
pub use set::Set;
pub use state::{SelectionState, SetState, Turn};
