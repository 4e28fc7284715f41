//! # Cadre Router
//!
//! URL routing engine: maps inbound requests (method + path) to a registered
//! target (an owner/controller/action triple plus named variables) and,
//! inversely, builds canonical URLs from a route identity and a set of
//! variable bindings.
//!
//! - Typed path templates: `article/[int:id]`, `tag/[str:slug]?`,
//!   `asset/[uuid4:id]`, raw `@`-regex escape hatch
//! - First-match-wins scanning in registration order: registration order is
//!   the priority list, there is no specificity sorting
//! - Reverse resolution with weighted variant selection and template
//!   rehydration, or entry-script URLs in non-friendly mode
//! - Deterministic route identities (UUIDv3 over owner/controller/action),
//!   so several templates can register as variants of one target
//! - Providers for JSON static maps and menu-row hierarchies, degrading to
//!   empty route sets instead of failing startup
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use cadre_router::{
//!     Component, Method, RequestContext, Route, RouteMap, Router, RouterConfig, Target, Vars,
//! };
//!
//! let owner = Arc::new(Component::new("content"));
//! let target = Target::new("article", "view", Vars::new(), Vars::new());
//!
//! let mut map = RouteMap::new();
//! map.set(Route::new(owner, &["GET"], "article/[int:id]", target, Vars::new()));
//!
//! let mut request = RequestContext::new(Method::Get, "/article/42").with_host("example.org");
//! let mut router = Router::new(
//!     RouterConfig { friendly_url: true, ..RouterConfig::default() },
//!     &request,
//!     map,
//! );
//!
//! let matched = router.match_request(&mut request).unwrap();
//! assert_eq!(matched.vars()["id"], "42");
//!
//! // And back again.
//! let url = router.build_route(&matched.id(), Some(matched.vars().clone())).unwrap();
//! assert_eq!(url, "http://example.org/article/42/");
//! ```

mod config;
mod error;
mod extension;
mod map;
mod request;
mod router;

pub mod providers;
pub mod route;
pub mod vars;

pub use config::RouterConfig;
pub use error::{MatchError, PatternError};
pub use extension::{Component, Extension, ExtensionRegistry, SimpleRegistry};
pub use map::{RouteMap, RouteMapBuilder};
pub use request::RequestContext;
pub use route::{route_id, Method, Route, Target};
pub use router::Router;
pub use vars::Vars;
