//! Caller-supplied namespaces of error types
//!
//! A scope only offers named access to the types constructed into it; the
//! registry stays the source of truth for lookups by code.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::descriptor::ErrorType;

/// Named collection of error types
#[derive(Debug, Default)]
pub struct Scope {
    members: Mutex<BTreeMap<String, ErrorType>>,
}

impl Scope {
    /// Create an empty scope
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a type under its own name, replacing any previous member
    pub fn insert(&self, ty: ErrorType) -> Option<ErrorType> {
        self.members
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(ty.name().to_string(), ty)
    }

    /// Get a member by name
    pub fn get(&self, name: &str) -> Option<ErrorType> {
        self.members
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Member names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.members
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the scope has no members
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
