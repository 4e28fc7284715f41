//! Route-map providers.
//!
//! Providers populate a RouteMap once at startup. They share one failure
//! policy: a broken source degrades to an empty (or partial) route set with
//! a warning; startup is never failed by a provider.

pub mod menu;
pub mod static_map;

pub use menu::{MenuItem, MenuProvider};
pub use static_map::StaticMapProvider;
