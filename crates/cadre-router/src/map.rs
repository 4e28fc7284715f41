//! Insertion-ordered route collection.
//!
//! Iteration order is load-bearing: forward matching is first-match-wins in
//! registration order, so providers register specific routes before general
//! ones. The map indexes routes two ways: by literal path (one route per
//! distinct path) and by identity (the set of targets registered under any
//! path).

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use crate::extension::ExtensionRegistry;
use crate::route::{Method, Route};

/// Ordered collection of registered routes.
#[derive(Debug, Default)]
pub struct RouteMap {
    routes: Vec<Route>,
    by_path: HashMap<String, usize>,
    ids: HashSet<Uuid>,
}

impl RouteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route.
    ///
    /// Idempotent on path: a route whose path is already present is dropped
    /// from the path index, but its identity is still recorded, so
    /// `has_route` answers "was this target registered under any path".
    pub fn set(&mut self, route: Route) {
        self.ids.insert(route.id());

        if !self.by_path.contains_key(route.path()) {
            self.by_path.insert(route.path().to_string(), self.routes.len());
            self.routes.push(route);
        }
    }

    pub fn has_path(&self, path: &str) -> bool {
        self.by_path.contains_key(path)
    }

    pub fn has_route(&self, id: &Uuid) -> bool {
        self.ids.contains(id)
    }

    /// Returns an owned copy of the route registered under `path`.
    ///
    /// The copy's home flag is reset, per the clone contract.
    pub fn get(&self, path: &str) -> Option<Route> {
        self.by_path.get(path).map(|&i| self.routes[i].clone())
    }

    /// All registered variants of one identity, as owned copies, optionally
    /// filtered by request method.
    pub fn routes(&self, id: &Uuid, method: Option<Method>) -> Vec<Route> {
        self.variants(id)
            .into_iter()
            .filter(|route| method.map_or(true, |m| route.allows(m)))
            .cloned()
            .collect()
    }

    /// Borrowed variants of one identity, in registration order.
    ///
    /// Reverse resolution scores variants through this accessor because the
    /// registered route's home flag must stay observable; owned copies
    /// always reset it.
    pub fn variants(&self, id: &Uuid) -> Vec<&Route> {
        if !self.has_route(id) {
            return Vec::new();
        }

        self.routes.iter().filter(|route| route.id() == *id).collect()
    }

    /// Iterates all routes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Route> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Removes the route registered under `path`. The identity stays
    /// registered; identities are only dropped by `clear`.
    pub fn remove(&mut self, path: &str) {
        if let Some(index) = self.by_path.remove(path) {
            self.routes.remove(index);
            for slot in self.by_path.values_mut() {
                if *slot > index {
                    *slot -= 1;
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.routes.clear();
        self.by_path.clear();
        self.ids.clear();
    }
}

/// Builds a RouteMap from some external source of routes (static lists,
/// JSON map files, menu rows).
pub trait RouteMapBuilder {
    fn build(&self, registry: &dyn ExtensionRegistry) -> RouteMap;
}
