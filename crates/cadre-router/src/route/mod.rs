//! Route values: methods, targets and registered routes.

pub mod pattern;

use std::fmt;
use std::sync::Arc;

use uuid::Uuid;

use crate::extension::Extension;
use crate::vars::Vars;

/// HTTP verbs a route may accept. Anything outside this set never matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Parses an upper-case verb; anything unrecognized yields `None` (the
    /// caller drops it silently, per the allow-list contract).
    pub fn parse(verb: &str) -> Option<Self> {
        match verb {
            "GET" => Some(Method::Get),
            "POST" => Some(Method::Post),
            "PUT" => Some(Method::Put),
            "DELETE" => Some(Method::Delete),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable handler descriptor: controller, action, selection params and
/// presentation metadata. The core never mutates a Target after consuming it.
#[derive(Debug, Clone)]
pub struct Target {
    controller: String,
    action: String,
    params: Vars,
    metadata: Vars,
}

impl Target {
    pub fn new(
        controller: impl Into<String>,
        action: impl Into<String>,
        params: Vars,
        metadata: Vars,
    ) -> Self {
        Self {
            controller: controller.into(),
            action: action.into(),
            params,
            metadata,
        }
    }

    pub fn controller(&self) -> &str {
        &self.controller
    }

    pub fn action(&self) -> &str {
        &self.action
    }

    pub fn params(&self) -> &Vars {
        &self.params
    }

    pub fn metadata(&self) -> &Vars {
        &self.metadata
    }
}

/// Deterministic route identity over (owner name, controller, action).
///
/// UUIDv3 in the OID namespace; the same inputs always produce the same
/// bytes, which is what lets several path templates register as variants of
/// one logical target.
///
/// # Examples
///
/// ```
/// use cadre_router::route_id;
///
/// let a = route_id("content", "article", "view");
/// let b = route_id("content", "article", "view");
/// assert_eq!(a, b);
/// assert_ne!(a, route_id("content", "article", "list"));
/// ```
pub fn route_id(owner: &str, controller: &str, action: &str) -> Uuid {
    Uuid::new_v3(
        &Uuid::NAMESPACE_OID,
        format!("route/{owner}/{controller}/{action}").as_bytes(),
    )
}

/// One registered mapping from a path template to a target.
///
/// Routes are immutable by convention once registered; matching works on
/// clones. Cloning deep-copies the variable bag and always resets the home
/// flag: "home" is a property of the registered route, never of a clone
/// produced during matching.
#[derive(Debug)]
pub struct Route {
    id: Uuid,
    owner: Arc<dyn Extension>,
    target: Target,
    path: String,
    vars: Vars,
    methods: Vec<Method>,
    menu: Option<u64>,
    home: bool,
    parent: Option<Arc<Route>>,
}

impl Route {
    /// Creates a route for `owner`, keeping only recognized verbs from
    /// `methods` and stripping the template's leading slash.
    ///
    /// An empty method set is accepted: the route simply never matches.
    pub fn new(
        owner: Arc<dyn Extension>,
        methods: &[&str],
        path: &str,
        target: Target,
        vars: Vars,
    ) -> Self {
        let id = route_id(owner.name(), target.controller(), target.action());

        Self {
            id,
            owner,
            target,
            path: path.trim_start_matches('/').to_string(),
            vars,
            methods: methods.iter().filter_map(|m| Method::parse(m)).collect(),
            menu: None,
            home: false,
            parent: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> &Arc<dyn Extension> {
        &self.owner
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn set_target(&mut self, target: Target) {
        self.target = target;
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<String>) {
        self.path = path.into();
    }

    pub fn vars(&self) -> &Vars {
        &self.vars
    }

    pub fn vars_mut(&mut self) -> &mut Vars {
        &mut self.vars
    }

    /// Selection metadata, distinct from `vars`: participates in variant
    /// weighting, never in match output.
    pub fn params(&self) -> &Vars {
        self.target.params()
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn allows(&self, method: Method) -> bool {
        self.methods.contains(&method)
    }

    pub fn is_home(&self) -> bool {
        self.home
    }

    pub fn set_home(&mut self, home: bool) {
        self.home = home;
    }

    pub fn parent(&self) -> Option<&Arc<Route>> {
        self.parent.as_ref()
    }

    pub fn set_parent(&mut self, parent: Arc<Route>) {
        self.parent = Some(parent);
    }

    /// Menu row this route was materialized from, if any. Association only.
    pub fn menu(&self) -> Option<u64> {
        self.menu
    }

    pub fn set_menu(&mut self, menu_id: u64) {
        self.menu = Some(menu_id);
    }
}

impl Clone for Route {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            owner: Arc::clone(&self.owner),
            target: self.target.clone(),
            path: self.path.clone(),
            vars: self.vars.clone(),
            methods: self.methods.clone(),
            menu: self.menu,
            // Home status never survives a copy.
            home: false,
            parent: self.parent.clone(),
        }
    }
}
