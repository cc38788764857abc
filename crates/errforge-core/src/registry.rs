//! Code registry
//!
//! Two lookups, code to type and name to type, plus the free-code cursor used
//! when `construct` is not given an explicit code.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use crate::descriptor::ErrorType;

/// First code handed out by the automatic allocator
pub const FIRST_FREE_CODE: u32 = 600;

/// Lookup key: a numeric code or a type name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    Code(u32),
    Name(String),
}

impl Key {
    /// Parse textual input, treating an all-digit string as a code
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.parse::<u32>() {
            Ok(code) if trimmed.bytes().all(|b| b.is_ascii_digit()) => Key::Code(code),
            _ => Key::Name(trimmed.to_string()),
        }
    }
}

impl From<u32> for Key {
    fn from(code: u32) -> Self {
        Key::Code(code)
    }
}

impl From<&str> for Key {
    fn from(name: &str) -> Self {
        Key::Name(name.to_string())
    }
}

impl From<String> for Key {
    fn from(name: String) -> Self {
        Key::Name(name)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Code(code) => write!(f, "{}", code),
            Key::Name(name) => f.write_str(name),
        }
    }
}

/// What an upsert displaced, if anything
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Displaced {
    /// Type previously registered under the same code
    pub by_code: Option<ErrorType>,
    /// Type previously registered under the same name
    pub by_name: Option<ErrorType>,
}

impl Displaced {
    /// Whether the upsert replaced a different type
    pub fn is_empty(&self) -> bool {
        self.by_code.is_none() && self.by_name.is_none()
    }
}

/// Code and name lookup tables with a monotonic free-code cursor
///
/// Not synchronized on its own; the process-wide registry wraps one in a
/// mutex so allocation and registration cannot interleave.
#[derive(Debug, Clone)]
pub struct Registry {
    by_code: HashMap<u32, ErrorType>,
    by_name: HashMap<String, ErrorType>,
    cursor: u32,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry with the cursor at [`FIRST_FREE_CODE`]
    pub fn new() -> Self {
        Self {
            by_code: HashMap::new(),
            by_name: HashMap::new(),
            cursor: FIRST_FREE_CODE,
        }
    }

    /// Upsert a type under both its name and its code
    ///
    /// Existing entries are overwritten; the displaced types are returned so
    /// the caller can report the collision.
    pub fn register(&mut self, name: &str, code: u32, ty: ErrorType) -> Displaced {
        let by_code = self
            .by_code
            .insert(code, ty.clone())
            .filter(|previous| *previous != ty);
        let by_name = self
            .by_name
            .insert(name.to_string(), ty.clone())
            .filter(|previous| *previous != ty);
        Displaced { by_code, by_name }
    }

    /// Look up a type by code
    pub fn find_by_code(&self, code: u32) -> Option<ErrorType> {
        self.by_code.get(&code).cloned()
    }

    /// Look up a type by name
    pub fn find_by_name(&self, name: &str) -> Option<ErrorType> {
        self.by_name.get(name).cloned()
    }

    /// Look up a type by code or name
    pub fn find(&self, key: &Key) -> Option<ErrorType> {
        match key {
            Key::Code(code) => self.find_by_code(*code),
            Key::Name(name) => self.find_by_name(name),
        }
    }

    /// Allocate the next unused code
    ///
    /// Scans upward from the cursor past every registered code and leaves the
    /// cursor on the returned value, so a code once passed over is never
    /// offered again even if it is free.
    pub fn next_free_code(&mut self) -> u32 {
        while self.by_code.contains_key(&self.cursor) {
            self.cursor += 1;
        }
        self.cursor
    }

    /// Every registered type, ordered by code
    pub fn types(&self) -> Vec<ErrorType> {
        let mut entries: Vec<_> = self.by_code.iter().collect();
        entries.sort_by_key(|(code, _)| **code);
        entries.into_iter().map(|(_, ty)| ty.clone()).collect()
    }

    /// Number of registered codes
    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

static GLOBAL: OnceLock<Mutex<Registry>> = OnceLock::new();

/// Lock the process-wide registry
///
/// A poisoned lock is recovered: every registry mutation is a single map
/// insert, so no half-applied state can be observed.
pub(crate) fn global() -> MutexGuard<'static, Registry> {
    GLOBAL
        .get_or_init(|| Mutex::new(Registry::new()))
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
}

/// Register a type in the process-wide registry
pub fn register(name: &str, code: u32, ty: ErrorType) -> Displaced {
    global().register(name, code, ty)
}

/// Find a type by code or name in the process-wide registry
///
/// # Example
///
/// ```
/// use errforge_core::{construct, find, TypeConfig};
///
/// let ty = construct(None, Some("RegistryDocError"), TypeConfig::new()).unwrap();
/// assert_eq!(find("RegistryDocError"), Some(ty.clone()));
/// assert_eq!(find(ty.code()), Some(ty));
/// assert_eq!(find("NoSuchRegistryDocError"), None);
/// ```
pub fn find(key: impl Into<Key>) -> Option<ErrorType> {
    global().find(&key.into())
}

/// Find a type by code in the process-wide registry
pub fn find_by_code(code: u32) -> Option<ErrorType> {
    global().find_by_code(code)
}

/// Find a type by name in the process-wide registry
pub fn find_by_name(name: &str) -> Option<ErrorType> {
    global().find_by_name(name)
}

/// Allocate the next unused code from the process-wide registry
pub fn next_free_code() -> u32 {
    global().next_free_code()
}

/// Every type in the process-wide registry, ordered by code
pub fn registered_types() -> Vec<ErrorType> {
    global().types()
}
