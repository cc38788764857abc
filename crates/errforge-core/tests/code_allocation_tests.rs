#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use std::collections::HashSet;
use std::sync::OnceLock;
use std::thread;

use common::unique_name;
use errforge_core::registry::{Registry, FIRST_FREE_CODE};
use errforge_core::{construct, find_by_code, next_free_code, ErrorType, TypeConfig};
use proptest::prelude::*;

#[test]
fn test_next_free_code_never_below_600() {
    assert!(next_free_code() >= FIRST_FREE_CODE);
}

#[test]
fn test_allocated_code_skips_explicitly_taken_code() {
    // Take whatever the allocator would hand out next, explicitly
    let taken = TypeConfig::new()
        .with_name(unique_name("TakenExplicitly"))
        .with_code(next_free_code())
        .construct()
        .unwrap();
    let allocated = construct(None, Some(&unique_name("AllocatedAfter")), TypeConfig::new()).unwrap();

    assert!(allocated.code() > taken.code());
    assert_eq!(find_by_code(taken.code()), Some(taken));
}

#[test]
fn test_concurrent_constructs_get_distinct_codes() {
    let handles: Vec<_> = (0..8)
        .map(|_| {
            thread::spawn(|| {
                (0..16)
                    .map(|_| {
                        TypeConfig::new()
                            .with_name(unique_name("Concurrent"))
                            .construct()
                            .unwrap()
                            .code()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let mut seen = HashSet::new();
    for handle in handles {
        for code in handle.join().unwrap() {
            assert!(code >= FIRST_FREE_CODE);
            assert!(seen.insert(code), "code {} allocated twice", code);
        }
    }
}

proptest! {
    #[test]
    fn prop_fresh_types_get_distinct_codes_from_600(count in 1usize..40) {
        let mut seen = HashSet::new();
        for _ in 0..count {
            let ty = construct(None, Some(&unique_name("PropFresh")), TypeConfig::new()).unwrap();
            prop_assert!(ty.code() >= FIRST_FREE_CODE);
            prop_assert!(seen.insert(ty.code()));
        }
    }

    #[test]
    fn prop_local_allocator_never_reuses_registered_codes(
        explicit in proptest::collection::vec(590u32..700, 0..30),
        allocations in 1usize..30,
    ) {
        // One globally registered type, far from the allocator's range, stands
        // in for every entry of the local registry.
        let stand_in = stand_in_type();
        let mut registry = Registry::new();
        for code in &explicit {
            registry.register(&format!("Explicit{}", code), *code, stand_in.clone());
        }

        let mut previous = None;
        for idx in 0..allocations {
            let code = registry.next_free_code();
            prop_assert!(code >= FIRST_FREE_CODE);
            prop_assert!(registry.find_by_code(code).is_none());
            if let Some(prev) = previous {
                prop_assert!(code > prev);
            }
            registry.register(&format!("Allocated{}", idx), code, stand_in.clone());
            previous = Some(code);
        }
    }
}

fn stand_in_type() -> ErrorType {
    static STAND_IN: OnceLock<ErrorType> = OnceLock::new();
    STAND_IN
        .get_or_init(|| {
            TypeConfig::new()
                .with_name("LocalRegistryStandIn")
                .with_code(4_300_000)
                .construct()
                .unwrap()
        })
        .clone()
}
