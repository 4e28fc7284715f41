//! JSON static route maps.
//!
//! File layout: top level keyed by HTTP method, each value keyed by path
//! template, each entry holding the target fields:
//!
//! ```json
//! {
//!   "GET": {
//!     "article/[int:id]": {
//!       "component": "content",
//!       "controller": "article",
//!       "action": "view",
//!       "vars": { "layout": "default" }
//!     }
//!   }
//! }
//! ```
//!
//! Registration order follows document order, which is why the parse goes
//! through the order-preserving `Vars` map.

use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

use crate::extension::ExtensionRegistry;
use crate::map::{RouteMap, RouteMapBuilder};
use crate::route::{Method, Route, Target};
use crate::vars::Vars;

/// Provider backed by a JSON map file.
#[derive(Debug)]
pub struct StaticMapProvider {
    path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct MapEntry {
    component: String,
    controller: String,
    #[serde(default = "default_action")]
    action: String,
    #[serde(default)]
    vars: Vars,
    #[serde(default)]
    params: Vars,
}

fn default_action() -> String {
    "index".to_string()
}

impl StaticMapProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> anyhow::Result<Vars> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("reading route map {}", self.path.display()))?;
        let doc = serde_json::from_str(&text)
            .with_context(|| format!("parsing route map {}", self.path.display()))?;
        Ok(doc)
    }
}

/// Builds a RouteMap from in-memory JSON in the map-file layout.
///
/// Malformed entries are skipped with a warning; a document that is not an
/// object at all yields an empty map.
pub fn from_json_str(text: &str, registry: &dyn ExtensionRegistry) -> RouteMap {
    match serde_json::from_str::<Vars>(text) {
        Ok(doc) => routes_from_doc(&doc, registry),
        Err(err) => {
            warn!(error = %err, "malformed route map document, starting with an empty route set");
            RouteMap::new()
        }
    }
}

fn routes_from_doc(doc: &Vars, registry: &dyn ExtensionRegistry) -> RouteMap {
    let mut map = RouteMap::new();

    for (method, entries) in doc {
        if Method::parse(method).is_none() {
            warn!(method = %method, "unknown method key in route map, skipping");
            continue;
        }

        let Some(entries) = entries.as_object() else {
            warn!(method = %method, "route map method section is not an object, skipping");
            continue;
        };

        for (template, entry) in entries {
            let entry: MapEntry = match serde_json::from_value(entry.clone()) {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(template = %template, error = %err, "malformed route entry, skipping");
                    continue;
                }
            };

            let Some(owner) = registry.extension("component", &entry.component) else {
                warn!(component = %entry.component, template = %template, "unknown component for route entry, skipping");
                continue;
            };

            let target = Target::new(entry.controller, entry.action, entry.params, Vars::new());
            map.set(Route::new(
                owner,
                &[method.as_str()],
                template,
                target,
                entry.vars,
            ));
        }
    }

    map
}

impl RouteMapBuilder for StaticMapProvider {
    fn build(&self, registry: &dyn ExtensionRegistry) -> RouteMap {
        match self.load() {
            Ok(doc) => routes_from_doc(&doc, registry),
            Err(err) => {
                warn!(error = %err, "unusable route map file, starting with an empty route set");
                RouteMap::new()
            }
        }
    }
}
