#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{fresh_type, stacks_lock};
use errforge_core::{set_stacks, stacks, stacks_enabled};
use serde_json::json;

#[test]
fn test_toggle_defaults_off_and_round_trips() {
    let _guard = stacks_lock();
    set_stacks(false);

    assert!(!stacks(None));
    assert!(stacks(Some(true)));
    assert!(stacks_enabled());
    assert!(!stacks(Some(false)));
}

#[test]
fn test_toggle_affects_existing_instance_to_string() {
    let _guard = stacks_lock();
    set_stacks(false);

    let ty = fresh_type("ToggleString");
    let err = ty.instantiate("toggled").unwrap();
    let header = format!("{}: toggled", ty.name());

    let without = err.to_string();
    assert_eq!(without, format!("{}\nCode: {}", header, ty.code()));

    set_stacks(true);
    let with = err.to_string();
    assert!(with.starts_with(&without));
    assert!(with.ends_with(err.stack()));
    assert!(with.len() > without.len());
    // Header plus call-site frames, even though the toggle was off at capture
    assert!(err.stack().lines().count() > 1);

    set_stacks(false);
    assert_eq!(err.to_string(), without);
}

#[test]
fn test_toggle_affects_to_json() {
    let _guard = stacks_lock();
    set_stacks(false);

    let ty = fresh_type("ToggleJson");
    let err = ty.instantiate(json!({"message": "structured"})).unwrap();
    assert!(err.to_json().get("stack").is_none());

    set_stacks(true);
    let value = err.to_json();
    assert_eq!(value["stack"], err.stack());

    set_stacks(false);
    assert!(err.to_json().get("stack").is_none());
}

#[test]
fn test_to_json_does_not_mutate_instance() {
    let _guard = stacks_lock();
    set_stacks(true);

    let ty = fresh_type("JsonPure");
    let err = ty.instantiate(json!({"message": "pure", "k": "v"})).unwrap();
    let before = err.extra().clone();
    let _ = err.to_json();
    assert_eq!(err.extra(), &before);
    assert_eq!(err.get("stack"), Some(json!(err.stack())));

    set_stacks(false);
}

#[test]
fn test_stack_header_names_type_and_message() {
    let _guard = stacks_lock();
    set_stacks(true);

    let ty = fresh_type("StackHeader");
    let err = ty.instantiate("with frames").unwrap();
    let first_line = err.stack().lines().next().unwrap();
    assert_eq!(first_line, format!("{}: with frames", ty.name()));

    set_stacks(false);
}
