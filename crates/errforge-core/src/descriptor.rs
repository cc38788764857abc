//! Error type descriptors
//!
//! A descriptor is the immutable record one `construct` call produces. The
//! parent links form a tree rooted at the platform error type, represented
//! here by a descriptor with no parent.

use std::fmt;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use crate::render::{DefaultFormatter, ErrorFormatter};

pub(crate) struct Descriptor {
    pub(crate) name: String,
    pub(crate) parent: Option<ErrorType>,
    pub(crate) code: u32,
    pub(crate) status_code: Option<u16>,
    pub(crate) default_message: String,
    pub(crate) default_explanation: Option<String>,
    pub(crate) default_response: Option<String>,
    pub(crate) formatter: RwLock<Option<Arc<dyn ErrorFormatter>>>,
}

/// Handle to a factory-built error type
///
/// Cloning is cheap and every clone refers to the same type; equality is
/// identity, so two separately constructed types with the same name and code
/// are still different types.
#[derive(Clone)]
pub struct ErrorType {
    inner: Arc<Descriptor>,
}

impl ErrorType {
    pub(crate) fn from_descriptor(descriptor: Descriptor) -> Self {
        Self {
            inner: Arc::new(descriptor),
        }
    }

    /// Get the type name (also its registry key)
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Get the type's registered code
    pub fn code(&self) -> u32 {
        self.inner.code
    }

    /// Get the default HTTP status, if one was configured
    pub fn status_code(&self) -> Option<u16> {
        self.inner.status_code
    }

    /// Get the parent type, or `None` for a direct child of the platform error type
    pub fn parent(&self) -> Option<&ErrorType> {
        self.inner.parent.as_ref()
    }

    /// Get the message used when an instance supplies none
    pub fn default_message(&self) -> &str {
        &self.inner.default_message
    }

    /// Get the default explanation, inherited from the nearest ancestor that has one
    pub fn default_explanation(&self) -> Option<&str> {
        self.ancestors()
            .find_map(|ty| ty.inner.default_explanation.as_deref())
    }

    /// Get the default response, inherited from the nearest ancestor that has one
    pub fn default_response(&self) -> Option<&str> {
        self.ancestors()
            .find_map(|ty| ty.inner.default_response.as_deref())
    }

    /// Iterate over this type and then each ancestor up to the root
    pub fn ancestors(&self) -> Ancestors<'_> {
        Ancestors { next: Some(self) }
    }

    /// Whether this type is `other` or descends from it
    pub fn is_subtype_of(&self, other: &ErrorType) -> bool {
        self.ancestors().any(|ty| ty == other)
    }

    /// Override how instances of this type and its descendants are represented
    ///
    /// Descendants that install their own formatter keep theirs.
    pub fn set_formatter(&self, formatter: Arc<dyn ErrorFormatter>) {
        if let Ok(mut slot) = self.inner.formatter.write() {
            *slot = Some(formatter);
        }
    }

    /// Drop a formatter installed with [`set_formatter`](Self::set_formatter)
    pub fn clear_formatter(&self) {
        if let Ok(mut slot) = self.inner.formatter.write() {
            *slot = None;
        }
    }

    /// Resolve the formatter in effect: nearest ancestor override, else the default
    pub fn formatter(&self) -> Arc<dyn ErrorFormatter> {
        self.ancestors()
            .find_map(|ty| ty.inner.formatter.read().ok().and_then(|f| f.clone()))
            .unwrap_or_else(|| Arc::new(DefaultFormatter))
    }

    /// Summarize the type for listings
    pub fn summary(&self) -> TypeSummary {
        TypeSummary {
            name: self.name().to_string(),
            code: self.code(),
            status_code: self.status_code(),
            parent: self.parent().map(|p| p.name().to_string()),
            lineage: self.ancestors().map(|ty| ty.name().to_string()).collect(),
            default_message: self.default_message().to_string(),
            default_explanation: self.default_explanation().map(str::to_string),
            default_response: self.default_response().map(str::to_string),
        }
    }
}

impl PartialEq for ErrorType {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for ErrorType {}

impl fmt::Debug for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorType")
            .field("name", &self.inner.name)
            .field("code", &self.inner.code)
            .field("status_code", &self.inner.status_code)
            .field("parent", &self.parent().map(ErrorType::name))
            .finish()
    }
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Iterator over a type and its ancestors, nearest first
pub struct Ancestors<'a> {
    next: Option<&'a ErrorType>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a ErrorType;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = current.parent();
        Some(current)
    }
}

/// Serializable view of a type, used by listings and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSummary {
    pub name: String,
    pub code: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// The type followed by its ancestors, nearest first
    pub lineage: Vec<String>,
    pub default_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_explanation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_response: Option<String>,
}
