//! Error Hierarchy Demonstration
//!
//! This example builds a small error hierarchy with the type factory.
#![allow(clippy::unwrap_used, clippy::expect_used)]
//!
//! Key concepts illustrated:
//! 1. Constructing types under a parent
//! 2. Registry lookups by name and by code
//! 3. Positional and options forms of instance construction
//! 4. Per-hierarchy formatter overrides
//! 5. The stack-trace toggle

use std::sync::Arc;

use errforge_core::render::format_default;
use errforge_core::{
    construct, find, set_stacks, ErrorFormatter, ErrorInstance, ErrorType, TypeConfig,
};
use serde_json::json;

struct OneLineFormatter;

impl ErrorFormatter for OneLineFormatter {
    fn format(&self, error: &ErrorInstance) -> String {
        format!("[{}] {}", error.code(), error.message())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== errforge Hierarchy Demo ===\n");

    // ===== Part 1: Building a hierarchy =====
    println!("## Part 1: Construction\n");

    let fatal = TypeConfig::new().with_name("FatalError").construct()?;
    let db = construct(
        Some(&fatal),
        None,
        TypeConfig::new()
            .with_name("FatalDBError")
            .with_default_message("A Fatal Database Error Occurred.")
            .with_default_response("Check the database connection settings."),
    )?;
    let timeout = TypeConfig::new()
        .with_name("DBTimeoutError")
        .with_parent(&db)
        .with_status(504)
        .construct()?;

    for ty in [&fatal, &db, &timeout] {
        let lineage: Vec<_> = ty.ancestors().map(ErrorType::name).collect();
        println!("✓ {} (code {}) lineage: {}", ty, ty.code(), lineage.join(" -> "));
    }
    println!();

    // ===== Part 2: Registry lookups =====
    println!("## Part 2: Lookups\n");

    assert_eq!(find("FatalDBError"), Some(db.clone()));
    assert_eq!(find(timeout.code()), Some(timeout.clone()));
    println!("✓ FatalDBError found by name, DBTimeoutError found by code\n");

    // ===== Part 3: Instances =====
    println!("## Part 3: Instances\n");

    let err = db.default_instance();
    println!("{}\n", err);

    let err = timeout.instantiate(json!({
        "msg": "Query exceeded 30s",
        "expl": "The orders table is locked.",
        "query": "SELECT * FROM orders"
    }))?;
    println!("{}\n", err);
    println!("{}\n", serde_json::to_string_pretty(&err)?);
    assert!(err.is_instance_of(&fatal));

    match fatal.instantiate(json!({"code": 1})) {
        Ok(_) => unreachable!("code is protected"),
        Err(e) => println!("✓ Rejected override: {} ({})\n", e, e.code()),
    }

    // ===== Part 4: Formatter overrides =====
    println!("## Part 4: Formatter override\n");

    db.set_formatter(Arc::new(OneLineFormatter));
    let err = timeout.instantiate("Inherited formatter")?;
    println!("{}", err);
    db.clear_formatter();
    println!("{}\n", format_default(&err));

    // ===== Part 5: Stack toggle =====
    println!("## Part 5: Stacks\n");

    set_stacks(true);
    println!("{}", fatal.instantiate("With a stack")?);
    set_stacks(false);

    println!("\n=== Demo Complete ===");
    Ok(())
}
