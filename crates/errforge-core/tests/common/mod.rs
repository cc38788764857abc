use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use errforge_core::{ErrorType, TypeConfig};

static NEXT_SUFFIX: AtomicUsize = AtomicUsize::new(0);
static STACKS_LOCK: Mutex<()> = Mutex::new(());

/// Create a type name no other test in this binary will use
///
/// The registry is process-wide, so tests sharing a name would overwrite
/// each other's registrations.
#[allow(dead_code)]
pub fn unique_name(prefix: &str) -> String {
    format!("{}{}", prefix, NEXT_SUFFIX.fetch_add(1, Ordering::SeqCst))
}

/// Construct a fresh root-level type with a unique name
#[allow(dead_code)]
pub fn fresh_type(prefix: &str) -> ErrorType {
    TypeConfig::new()
        .with_name(unique_name(prefix))
        .construct()
        .unwrap()
}

/// Hold while flipping the stack toggle or asserting on output it affects
#[allow(dead_code)]
pub fn stacks_lock() -> MutexGuard<'static, ()> {
    STACKS_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
}
