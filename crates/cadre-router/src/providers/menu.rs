//! Menu-backed route provider.
//!
//! Consumes a ready-made sequence of menu rows (fetched elsewhere; the core
//! has no database access) and materializes one route per component row. A
//! row's path is built by walking its parent chain and joining aliases
//! root-to-leaf; home rows get the literal path `/`.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::Deserialize;
use tracing::warn;
use uuid::Uuid;

use crate::extension::ExtensionRegistry;
use crate::map::{RouteMap, RouteMapBuilder};
use crate::route::{Route, Target};
use crate::vars::Vars;

/// One menu row, scoped to an application.
#[derive(Debug, Clone, Deserialize)]
pub struct MenuItem {
    pub id: u64,
    #[serde(default)]
    pub parent_id: Option<u64>,
    /// Stored route identity, used to group sibling rows of one target.
    pub route_id: Uuid,
    pub alias: String,
    pub component: String,
    /// `controller.action`, or a bare action handled by the component's
    /// default controller.
    pub action: String,
    #[serde(default)]
    pub vars: Vars,
    #[serde(default)]
    pub params: Vars,
    #[serde(default)]
    pub metadata: Vars,
    #[serde(default)]
    pub home: bool,
}

/// Provider over pre-fetched menu rows.
#[derive(Debug)]
pub struct MenuProvider {
    application_id: u64,
    items: Vec<MenuItem>,
}

impl MenuProvider {
    pub fn new(application_id: u64, items: Vec<MenuItem>) -> Self {
        Self {
            application_id,
            items,
        }
    }

    pub fn application_id(&self) -> u64 {
        self.application_id
    }

    /// All rows registered under one route identity.
    pub fn routes_for(&self, route_id: &Uuid) -> Vec<&MenuItem> {
        self.items
            .iter()
            .filter(|item| item.route_id == *route_id)
            .collect()
    }

    /// Joins aliases root-to-leaf. Cycles and dangling parent references cut
    /// the walk short with a warning instead of recursing forever.
    fn materialize_path(&self, by_id: &HashMap<u64, &MenuItem>, item: &MenuItem) -> String {
        if item.home {
            return "/".to_string();
        }

        let mut aliases = vec![item.alias.as_str()];
        let mut seen: HashSet<u64> = HashSet::from([item.id]);
        let mut cursor = item.parent_id;

        while let Some(parent_id) = cursor {
            let Some(parent) = by_id.get(&parent_id) else {
                warn!(item = item.id, parent = parent_id, "menu row references a missing parent, path truncated");
                break;
            };
            if !seen.insert(parent.id) {
                warn!(item = item.id, "cycle in menu parent chain, path truncated");
                break;
            }

            aliases.push(parent.alias.as_str());
            cursor = parent.parent_id;
        }

        aliases.reverse();
        aliases.join("/").trim_start_matches('/').to_string()
    }
}

fn split_action(component: &str, action: &str) -> (String, String) {
    match action.split_once('.') {
        Some((controller, action)) => (controller.to_string(), action.to_string()),
        None => (component.to_string(), action.to_string()),
    }
}

impl RouteMapBuilder for MenuProvider {
    fn build(&self, registry: &dyn ExtensionRegistry) -> RouteMap {
        let mut map = RouteMap::new();
        let by_id: HashMap<u64, &MenuItem> = self.items.iter().map(|item| (item.id, item)).collect();
        // Parent links resolve against rows already processed; menu tables
        // list parents before children.
        let mut built: HashMap<u64, Arc<Route>> = HashMap::new();

        for item in &self.items {
            let Some(owner) = registry.extension("component", &item.component) else {
                warn!(component = %item.component, item = item.id, "unknown component for menu row, skipping");
                continue;
            };

            let (controller, action) = split_action(&item.component, &item.action);
            let target = Target::new(controller, action, item.params.clone(), item.metadata.clone());
            let path = self.materialize_path(&by_id, item);

            let mut route = Route::new(owner, &["GET", "POST"], &path, target, item.vars.clone());
            route.set_menu(item.id);
            if item.home {
                route.set_home(true);
            }
            if let Some(parent_id) = item.parent_id {
                if let Some(parent) = built.get(&parent_id) {
                    route.set_parent(Arc::clone(parent));
                }
            }

            built.insert(item.id, Arc::new(route.clone()));
            map.set(route);
        }

        map
    }
}
