#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::fresh_type;
use errforge_core::errors::{FactoryError, FactoryErrorKind};
use errforge_core::{construct, TypeConfig};
use serde_json::json;

#[test]
fn test_missing_name_verifiable_by_kind() {
    let err = construct(None, None, TypeConfig::new().with_code(4_500_000)).unwrap_err();

    assert_eq!(err.kind(), FactoryErrorKind::MissingName);
    assert_eq!(err.code(), "ERR_MISSING_NAME");
}

#[test]
fn test_blank_name_is_missing_name() {
    let err = construct(None, Some(""), TypeConfig::new().with_name("\n")).unwrap_err();
    assert_eq!(err.kind(), FactoryErrorKind::MissingName);
}

#[test]
fn test_protected_override_distinct_from_missing_name() {
    let ty = fresh_type("ErrFacility");
    let err = ty.instantiate(json!({"stack": "forged"})).unwrap_err();

    assert_eq!(err.kind(), FactoryErrorKind::ProtectedOverride);
    assert_eq!(err.code(), "ERR_PROTECTED_OVERRIDE");
    assert_ne!(err.kind(), FactoryErrorKind::MissingName);
}

#[test]
fn test_protected_override_reports_first_offending_key() {
    let ty = fresh_type("ErrFacilityOrder");
    // stack is checked before name, name before code
    let err = ty
        .instantiate(json!({"code": 1, "name": "Other", "stack": "s"}))
        .unwrap_err();
    assert_eq!(
        err,
        FactoryError::ProtectedOverride {
            key: "stack".to_string()
        }
    );

    let err = ty.instantiate(json!({"code": 1, "name": "Other"})).unwrap_err();
    assert_eq!(
        err,
        FactoryError::ProtectedOverride {
            key: "name".to_string()
        }
    );
}

#[test]
fn test_error_display_is_human_readable() {
    let ty = fresh_type("ErrFacilityDisplay");
    let err = ty.instantiate(json!({"code": 7})).unwrap_err();

    let message = err.to_string();
    assert!(message.contains("\"code\""));
    assert!(message.contains("protected"));
}

#[test]
fn test_error_usable_with_question_mark() {
    fn build() -> Result<u32, Box<dyn std::error::Error>> {
        let ty = TypeConfig::new().construct()?;
        Ok(ty.code())
    }

    let err = build().unwrap_err();
    assert_eq!(err.to_string(), FactoryError::MissingName.to_string());
}
