//! Owner handles for routes.
//!
//! Every route belongs to an extension (a component of the host application).
//! The core only needs a stable name from it; everything else about the owner
//! is opaque. Registries resolve `(kind, name)` pairs to shared handles and
//! back the error-route fallback.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// An opaque route owner with a stable name.
///
/// The name participates in route identity, so it must not change for the
/// lifetime of the registration.
pub trait Extension: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;
}

/// Resolves owner handles by kind and name.
pub trait ExtensionRegistry {
    fn extension(&self, kind: &str, name: &str) -> Option<Arc<dyn Extension>>;
}

/// Minimal named component, sufficient for providers, tests and
/// applications without a richer extension system.
///
/// # Examples
///
/// ```
/// use cadre_router::{Component, Extension};
///
/// let owner = Component::new("content");
/// assert_eq!(owner.name(), "content");
/// ```
#[derive(Debug, Clone)]
pub struct Component {
    name: String,
}

impl Component {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Extension for Component {
    fn name(&self) -> &str {
        &self.name
    }
}

/// In-memory registry keyed by `(kind, name)`.
#[derive(Debug, Default)]
pub struct SimpleRegistry {
    entries: HashMap<(String, String), Arc<dyn Extension>>,
}

impl SimpleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: impl Into<String>, extension: Arc<dyn Extension>) {
        self.entries
            .insert((kind.into(), extension.name().to_string()), extension);
    }
}

impl ExtensionRegistry for SimpleRegistry {
    fn extension(&self, kind: &str, name: &str) -> Option<Arc<dyn Extension>> {
        self.entries
            .get(&(kind.to_string(), name.to_string()))
            .map(Arc::clone)
    }
}
