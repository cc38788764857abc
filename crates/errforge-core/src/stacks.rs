//! Process-wide stack-trace toggle
//!
//! Representation methods read the toggle when they run, not when an
//! instance is built, so flipping it changes how existing instances format.

use std::sync::atomic::{AtomicBool, Ordering};

/// Environment variable consulted by [`init_from_env`]
pub const STACKS_ENV_VAR: &str = "ERRFORGE_STACKS";

static STACKS: AtomicBool = AtomicBool::new(false);

/// Serializes unit tests that flip the toggle or assert on toggle-sensitive output
#[cfg(test)]
pub(crate) static TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

/// Get or set the stack-trace toggle
///
/// `None` reads the current value; `Some(flag)` stores it. Either way the
/// value now in effect is returned.
pub fn stacks(enable: Option<bool>) -> bool {
    if let Some(flag) = enable {
        set_stacks(flag);
    }
    stacks_enabled()
}

/// Whether string and structured representations include the stack
pub fn stacks_enabled() -> bool {
    STACKS.load(Ordering::SeqCst)
}

/// Turn stack output on or off
pub fn set_stacks(enable: bool) {
    STACKS.store(enable, Ordering::SeqCst);
    tracing::debug!(stacks = enable, "stack-trace toggle updated");
}

/// Seed the toggle from `ERRFORGE_STACKS`
///
/// Accepts `1`, `true`, `yes` and `on` (any case) as enabled; any other value
/// disables. Leaves the toggle untouched when the variable is unset.
pub fn init_from_env() -> bool {
    if let Ok(raw) = std::env::var(STACKS_ENV_VAR) {
        set_stacks(parse_flag(&raw));
    }
    stacks_enabled()
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_getter_setter() {
        let _guard = TEST_LOCK
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        assert!(stacks(Some(true)));
        assert!(stacks(None));
        assert!(!stacks(Some(false)));
        assert!(!stacks_enabled());
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("off"));
        assert!(!parse_flag(""));
    }
}
