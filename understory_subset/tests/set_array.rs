// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tests for the `understory_subset` crate.
//!
//! These exercise `SetArray` naming in all three modes, the persisted bundle
//! form, and how bulk mutation and aggregation interact with a shared
//! `SelectionState`.

use understory_subset::{
    AttributeBundle, ConfigError, NamingMode, PatternError, Role, SelectionState, SetArray,
    SetState, Turn,
};

fn prefix_array() -> SetArray {
    SetArray::builder("domains", Role::Domain)
        .prefix("domain")
        .count(5)
        .unique_ids(true)
        .first_global_index(7)
        .build()
        .unwrap()
}

fn pattern_array() -> SetArray {
    SetArray::builder("blocks", Role::Block)
        .prefix("block_%03d.h5")
        .count(12)
        .first_display_index(1)
        .first_global_index(3)
        .parent(1)
        .owner_collection_offset(2)
        .build()
        .unwrap()
}

fn named_array() -> SetArray {
    SetArray::builder("materials", Role::Material)
        .names(["steel", "water", "air"])
        .unique_ids(true)
        .first_global_index(20)
        .build()
        .unwrap()
}

#[test]
fn prefix_scenario() {
    let array = prefix_array();
    let set = array.get_set(3);
    assert_eq!(set.name(), "domain3");
    assert_eq!(set.id(), Some(3));
    assert_eq!(array.resolve_global_index("domain3"), Some(7 + 3));
}

#[test]
fn names_resolve_back_to_global_ids_in_every_mode() {
    for array in [prefix_array(), pattern_array(), named_array()] {
        for local in 0..array.len() {
            let name = array.get_set(local).into_name();
            assert_eq!(
                array.resolve_global_index(&name),
                Some(array.first_global_index() + local),
                "{name} in {:?} mode",
                array.naming_mode()
            );
        }
    }
}

#[test]
fn pattern_names_use_display_offset() {
    let array = pattern_array();
    assert_eq!(array.get_set(0).name(), "block_001.h5");
    assert_eq!(array.get_set(11).name(), "block_012.h5");
    assert_eq!(array.resolve_global_index("block_001.h5"), Some(3));
    // Display numbers outside `first_display_index..first_display_index + count`.
    assert_eq!(array.resolve_global_index("block_000.h5"), None);
    assert_eq!(array.resolve_global_index("block_013.h5"), None);
    assert_eq!(array.resolve_global_index("block_1.h5"), None);
}

#[test]
fn unknown_names_are_not_found() {
    assert_eq!(named_array().resolve_global_index("lead"), None);
    assert_eq!(prefix_array().resolve_global_index("block3"), None);
    assert_eq!(pattern_array().resolve_global_index("block_002.h6"), None);
}

#[test]
fn unique_ids_are_local_indices() {
    let array = named_array();
    assert_eq!(array.set_global_id(2), Some(2));
    assert_eq!(array.get_set(2).id(), Some(2));
    assert_eq!(pattern_array().set_global_id(2), None);
}

#[test]
fn attributes_round_trip() {
    for array in [prefix_array(), pattern_array(), named_array()] {
        let bundle = array.to_attributes();
        let rebuilt = SetArray::from_attributes(bundle.clone()).unwrap();
        assert_eq!(rebuilt.to_attributes(), bundle);
        assert_eq!(rebuilt, array);
    }
}

#[cfg(feature = "serde")]
#[test]
fn attributes_persist_as_json() {
    let bundle = pattern_array().to_attributes();
    let json = serde_json::to_string(&bundle).unwrap();
    let back: AttributeBundle = serde_json::from_str(&json).unwrap();
    assert_eq!(back, bundle);
    assert_eq!(SetArray::try_from(back).unwrap(), pattern_array());
}

#[test]
fn mismatched_name_list_fails_fast() {
    let bundle = AttributeBundle {
        names: vec!["a".into(), "b".into()],
        count: 3,
        role: Role::Material.code(),
        ..AttributeBundle::default()
    };
    assert_eq!(
        SetArray::from_attributes(bundle),
        Err(ConfigError::NameCountMismatch { names: 2, count: 3 })
    );
}

#[test]
fn repeated_explicit_name_is_rejected() {
    let err = SetArray::builder("materials", Role::Material)
        .names(["steel", "copper", "steel"])
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::DuplicateName("steel".into()));
}

#[test]
fn bad_role_and_template_are_rejected() {
    let bundle = AttributeBundle {
        role: 42,
        ..AttributeBundle::default()
    };
    assert_eq!(
        SetArray::from_attributes(bundle),
        Err(ConfigError::UnknownRole(42))
    );

    let err = SetArray::builder("domains", Role::Domain)
        .prefix("dom%d_%d")
        .count(4)
        .build()
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidPattern(PatternError::MultiplePlaceholders)
    );

    let err = SetArray::builder("domains", Role::Domain)
        .count(2)
        .first_global_index(usize::MAX)
        .build()
        .unwrap_err();
    assert_eq!(err, ConfigError::CountOverflow);
}

#[test]
fn empty_bundle_is_an_empty_prefix_array() {
    let array = SetArray::from_attributes(AttributeBundle::default()).unwrap();
    assert!(array.is_empty());
    assert_eq!(array.naming_mode(), NamingMode::DefaultPrefixIndexPattern);
    assert_eq!(array.role(), Role::Topology);
}

#[test]
fn aggregate_classifies_uniform_and_mixed_ranges() {
    let array = prefix_array();
    let mut selection = SelectionState::new(12);
    assert_eq!(array.aggregate_state(&selection), SetState::NoneUsed);

    array.bulk_set_state(&mut selection, Turn::On, false);
    assert_eq!(array.aggregate_state(&selection), SetState::AllUsed);

    // Entries outside the array's range do not matter.
    assert_eq!(selection[6], SetState::NoneUsed);
    assert_eq!(selection[12 - 1], SetState::AllUsed);

    // Whole-member none/all mix with no partial member.
    array.restrict_to(&mut selection, &[0, 4], false);
    assert_eq!(array.aggregate_state(&selection), SetState::SomeUsed);
}

#[test]
fn aggregate_counts_other_worker_as_used() {
    let array = prefix_array();
    let mut states = vec![SetState::NoneUsed; 12];
    states[7..12].fill(SetState::AllUsedByOtherWorker);
    states[9] = SetState::AllUsed;
    let selection = SelectionState::from_states(states);
    assert_eq!(array.aggregate_state(&selection), SetState::AllUsed);
}

#[test]
fn aggregate_reports_partial_member() {
    let array = prefix_array();
    let mut states = vec![SetState::AllUsed; 12];
    states[8] = SetState::SomeUsed;
    let selection = SelectionState::from_states(states);
    assert_eq!(array.aggregate_state(&selection), SetState::SomeUsed);
}

#[test]
fn empty_array_aggregates_to_some_used() {
    let array = SetArray::builder("domains", Role::Domain)
        .prefix("d")
        .first_global_index(2)
        .build()
        .unwrap();
    let selection = SelectionState::new(4);
    assert_eq!(array.aggregate_state(&selection), SetState::SomeUsed);
}

#[test]
fn load_balancing_off_keeps_ownership_elsewhere() {
    let array = prefix_array();
    let mut selection = SelectionState::new(12);
    array.bulk_set_state(&mut selection, Turn::On, false);

    array.bulk_set_state(&mut selection, Turn::Off, true);
    for global in array.range() {
        assert_eq!(selection[global], SetState::AllUsedByOtherWorker);
    }
    assert_eq!(selection.count(SetState::NoneUsed), 7);

    // A second pass leaves the marker in place; a plain pass clears it.
    array.bulk_set_state(&mut selection, Turn::Off, true);
    assert_eq!(selection.count(SetState::AllUsedByOtherWorker), 5);
    array.bulk_set_state(&mut selection, Turn::Off, false);
    assert_eq!(selection.count(SetState::NoneUsed), 12);
}

#[test]
fn restrict_to_candidates_during_load_balancing() {
    let array = prefix_array();
    let mut selection = SelectionState::new(12);
    array.bulk_set_state(&mut selection, Turn::On, false);

    array.restrict_to(&mut selection, &[1, 3], true);
    let states: Vec<_> = array.range().map(|g| selection[g]).collect();
    assert_eq!(
        states,
        [
            SetState::AllUsedByOtherWorker,
            SetState::AllUsed,
            SetState::AllUsedByOtherWorker,
            SetState::AllUsed,
            SetState::AllUsedByOtherWorker,
        ]
    );
}

#[test]
#[should_panic(expected = "out of range")]
fn restrict_to_rejects_foreign_candidates() {
    let array = prefix_array();
    let mut selection = SelectionState::new(12);
    array.restrict_to(&mut selection, &[2, 5], false);
}

#[test]
#[should_panic(expected = "out of range")]
fn bulk_set_state_requires_room_in_selection() {
    let array = prefix_array();
    let mut selection = SelectionState::new(8);
    array.bulk_set_state(&mut selection, Turn::On, false);
}

#[test]
fn collection_view_matches_array_state() {
    let array = pattern_array();
    let mut selection = SelectionState::new(15);
    array.restrict_to(&mut selection, &[0, 5], false);

    let collection = array.make_collection();
    assert_eq!(collection.len(), 12);
    assert_eq!(collection.category(), "blocks");
    assert_eq!(collection.state(&selection), array.aggregate_state(&selection));
    assert!(collection.subsets().eq(array.range()));
    assert!(array.sets().all(|set| set.map_outs() == [2]));
}
