//! Forward matching and reverse resolution.
//!
//! The router scans its RouteMap in registration order and returns the first
//! route accepting the request: registration order *is* the priority list,
//! there is no specificity scoring. The inverse direction picks the best-fit
//! variant of a route identity by weighting caller variables against each
//! variant's declared variables, then rehydrates that variant's template.

use once_cell::sync::OnceCell;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::config::RouterConfig;
use crate::error::MatchError;
use crate::extension::ExtensionRegistry;
use crate::map::RouteMap;
use crate::request::RequestContext;
use crate::route::{pattern, route_id, Route, Target};
use crate::vars::{self, Vars};

/// The routing engine.
///
/// Holds the route map for the lifetime of the request scope; the map is
/// read-only once matching starts. Base and root URLs are computed lazily
/// from the request the router was constructed with and cached thereafter.
pub struct Router {
    config: RouterConfig,
    map: RouteMap,
    friendly: bool,
    root_path: String,
    secure: bool,
    host: String,
    script_name: String,
    root: OnceCell<String>,
    base: OnceCell<String>,
    current: Option<Route>,
}

impl Router {
    pub fn new(config: RouterConfig, request: &RequestContext, map: RouteMap) -> Self {
        let friendly = config.friendly_url;
        let root_path = config.normalized_root_path();

        Self {
            config,
            map,
            friendly,
            root_path,
            secure: request.secure(),
            host: request.host().to_string(),
            script_name: request.script_name().to_string(),
            root: OnceCell::new(),
            base: OnceCell::new(),
            current: None,
        }
    }

    pub fn map(&self) -> &RouteMap {
        &self.map
    }

    pub fn is_friendly(&self) -> bool {
        self.friendly
    }

    /// The route produced by the last successful match, if any.
    pub fn current(&self) -> Option<&Route> {
        self.current.as_ref()
    }

    /// Matches an inbound request against the route map.
    ///
    /// On success the returned route is a clone of the registered one with
    /// path captures and query parameters merged into its variables (query
    /// wins on key collisions), and the merged set is reported back into the
    /// request's query sink.
    pub fn match_request(&mut self, request: &mut RequestContext) -> Result<Route, MatchError> {
        let raw = if self.friendly {
            request.path().to_string()
        } else {
            // Non-friendly deployments carry the logical path in the
            // reserved `route` query key.
            request
                .take_query("route")
                .and_then(|v| vars::scalar(&v))
                .unwrap_or_else(|| request.path().to_string())
        };
        let url = self.normalize_path(&raw);

        for route in self.map.iter() {
            if !route.allows(request.method()) {
                continue;
            }

            let template = route.path();
            let captured = if template.starts_with('@') {
                match pattern::compiled(template) {
                    Ok(regex) => named_captures(&regex, &url),
                    Err(err) => {
                        warn!(template, error = %err, "skipping unusable route template");
                        continue;
                    }
                }
            } else if let Some(position) = template.find('[') {
                // Cheap rejection on the literal prefix before compiling.
                // A URL that stops at an optional block boundary is shorter
                // than the literal prefix, so either side may be the prefix.
                let literal = &template[..position];
                if !url.starts_with(literal) && !literal.starts_with(url.as_str()) {
                    continue;
                }
                match pattern::compiled(template) {
                    Ok(regex) => named_captures(&regex, &url),
                    Err(err) => {
                        warn!(template, error = %err, "skipping unusable route template");
                        continue;
                    }
                }
            } else if url == template || (template.is_empty() && url == "/") {
                Some(Vars::new())
            } else {
                None
            };

            let Some(captured) = captured else { continue };

            let mut matched = route.clone();
            for (key, value) in captured {
                matched.vars_mut().insert(key, value);
            }
            // Query parameters take precedence over path captures.
            for (key, value) in request.query() {
                matched.vars_mut().insert(key.clone(), value.clone());
            }
            request.merge_query(matched.vars());

            debug!(path = %url, route = %matched.id(), "matched route");
            self.current = Some(matched.clone());
            return Ok(matched);
        }

        debug!(path = %url, "no route matched");
        Err(MatchError::NotFound)
    }

    /// Builds a URL for a target identified by owner/controller/action.
    pub fn create(
        &self,
        owner: &str,
        controller: &str,
        action: &str,
        route_vars: Option<Vars>,
    ) -> Option<String> {
        self.build_route(&route_id(owner, controller, action), route_vars)
    }

    /// Builds a URL for a registered route identity.
    ///
    /// Friendly mode picks the best-fit variant and rehydrates its template;
    /// an unknown identity yields `None` (the caller falls back to a default
    /// link, this is not an error). Non-friendly mode never consults the map
    /// and always produces an entry-script URL with flat query parameters.
    pub fn build_route(&self, id: &Uuid, route_vars: Option<Vars>) -> Option<String> {
        if !self.friendly {
            return Some(self.script_url(route_vars.unwrap_or_default()));
        }

        if !self.map.has_route(id) {
            return None;
        }

        let variants = self.map.variants(id);
        let caller = route_vars.unwrap_or_default();
        let mut weight = 0usize;
        let mut current = *variants.first()?;

        if !caller.is_empty() {
            for &route in &variants {
                // Placeholder names count as declared variables for this
                // variant when the caller supplies them.
                let mut declared = route.vars().clone();
                for ph in pattern::placeholders(route.path()) {
                    if ph.name.is_empty() {
                        continue;
                    }
                    if let Some(value) = caller.get(&ph.name) {
                        declared.insert(ph.name.clone(), value.clone());
                    }
                }

                if has_conflict(&caller, &declared) {
                    continue;
                }

                let candidate_weight = vars::weight(&caller, &declared);
                if candidate_weight > weight {
                    weight = candidate_weight;
                    current = route;
                }
            }
        }

        if current.is_home() {
            return Some(self.base().to_string());
        }

        let mut url = current.path().trim_start_matches('/').to_string();
        let mut leftover = caller;

        for (index, ph) in pattern::placeholders(current.path()).iter().enumerate() {
            let value = if ph.name.is_empty() {
                None
            } else {
                leftover.get(&ph.name).and_then(vars::scalar)
            };

            if let Some(value) = value {
                url = url.replace(ph.block_sans_pre(), &value);
                leftover.shift_remove(&ph.name);
            } else if ph.optional && index != 0 {
                // Unbound optional blocks vanish with their separator,
                // except the very first block: a route's leading segment is
                // never collapsed away.
                url = url.replace(&ph.block, "");
            } else {
                url = url.replace(ph.block_sans_pre(), "");
            }
        }

        // Route-intrinsic variables were never caller-supplied query params.
        for key in current.vars().keys() {
            leftover.shift_remove(key);
        }

        let mut built = append_segment(self.base(), &url);
        if !built.ends_with('/') {
            built.push('/');
        }

        let query = vars::build_query(&leftover);
        if !query.is_empty() {
            built.push('?');
            built.push_str(&query);
        }

        Some(built)
    }

    /// Scheme + host (+ configured root path), trailing-slash terminated.
    /// Computed once per router.
    pub fn root(&self) -> &str {
        self.root.get_or_init(|| {
            let scheme = if self.secure { "https" } else { "http" };
            let host = self.config.domain.as_deref().unwrap_or(&self.host);
            let mut root = format!("{scheme}://{host}/");

            let root_path = self.config.root_path.trim_matches('/');
            if !root_path.is_empty() {
                root.push_str(root_path);
                root.push('/');
            }

            root
        })
    }

    /// Root plus the entry script's directory and the configured base URI.
    /// Computed once per router.
    pub fn base(&self) -> &str {
        self.base.get_or_init(|| {
            let mut base = self.root().to_string();

            let dir = script_dir(&self.script_name);
            if !dir.is_empty() {
                base.push_str(&dir);
                base.push('/');
            }

            let base_uri = self.config.base_uri.trim_matches('/');
            if !base_uri.is_empty() {
                base.push_str(base_uri);
                base.push('/');
            }

            base
        })
    }

    /// Installs the errors-component fallback route as current. Returns
    /// false when the registry has no errors component.
    pub fn set_error(&mut self, registry: &dyn ExtensionRegistry) -> bool {
        let Some(owner) = registry.extension("component", "errors") else {
            warn!("no errors component registered, error route unavailable");
            return false;
        };

        let target = Target::new("errors", "index", Vars::new(), Vars::new());
        self.current = Some(Route::new(owner, &["GET", "POST"], "", target, Vars::new()));
        true
    }

    /// Strips the configured root path and base URI, trims slashes, and
    /// normalizes an empty result to `/`.
    fn normalize_path(&self, path: &str) -> String {
        let mut url = path.trim_start_matches('/').to_string();

        for prefix in [
            self.root_path.trim_end_matches('/'),
            self.config.base_uri.trim_matches('/'),
        ] {
            if prefix.is_empty() {
                continue;
            }
            // Only strip whole segments: "app" must not eat into "apple/42".
            if let Some(rest) = url.strip_prefix(prefix) {
                if rest.is_empty() || rest.starts_with('/') {
                    url = rest.trim_start_matches('/').to_string();
                }
            }
        }

        let trimmed = url.trim_matches('/');
        if trimmed.is_empty() {
            "/".to_string()
        } else {
            trimmed.to_string()
        }
    }

    fn script_url(&self, mut route_vars: Vars) -> String {
        // The reserved `#` key becomes the fragment, not a query pair.
        let fragment = route_vars.shift_remove("#").and_then(|v| vars::scalar(&v));

        let mut url = format!("{}index.php", self.base());

        let query = vars::build_query(&route_vars);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        if let Some(fragment) = fragment {
            url.push('#');
            url.push_str(&fragment);
        }

        url
    }
}

/// Extracts named captures as string variables. Positional captures are
/// discarded; optional groups that did not participate are absent.
fn named_captures(regex: &Regex, url: &str) -> Option<Vars> {
    let caps = regex.captures(url)?;

    let mut captured = Vars::new();
    for name in regex.capture_names().flatten() {
        if let Some(m) = caps.name(name) {
            captured.insert(name.to_string(), Value::String(m.as_str().to_string()));
        }
    }

    Some(captured)
}

/// A caller variable conflicts when it collides with a differing declared
/// value. Numeric keys, nulls and structured values never participate.
fn has_conflict(caller: &Vars, declared: &Vars) -> bool {
    caller.iter().any(|(key, value)| {
        !vars::is_numeric_key(key)
            && !value.is_null()
            && !value.is_object()
            && !value.is_array()
            && declared
                .get(key.as_str())
                .is_some_and(|existing| existing != value)
    })
}

fn append_segment(base: &str, segment: &str) -> String {
    let segment = segment.trim_matches('/');
    if segment.is_empty() {
        base.to_string()
    } else {
        format!("{base}{segment}")
    }
}

fn script_dir(script_name: &str) -> String {
    // Invalid URL characters are percent-encoded to keep broken server
    // values from leaking into generated links.
    let sanitized = script_name
        .replace('\'', "%27")
        .replace('"', "%22")
        .replace('<', "%3C")
        .replace('>', "%3E");

    match sanitized.rsplit_once('/') {
        Some((dir, _file)) => dir.trim_matches('/').to_string(),
        None => String::new(),
    }
}
