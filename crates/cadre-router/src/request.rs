//! Explicit request context.
//!
//! The router never reads process-global state; the HTTP boundary constructs
//! one of these per request and hands it in. After a successful match the
//! router reports the merged route variables back through `merge_query`, so
//! downstream dispatch sees path captures as ordinary query parameters.

use serde_json::Value;

use crate::route::Method;
use crate::vars::Vars;

/// What the routing core consumes from one inbound HTTP request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path: String,
    secure: bool,
    host: String,
    script_name: String,
    query: Vars,
}

impl RequestContext {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            secure: false,
            host: "localhost".to_string(),
            script_name: String::new(),
            query: Vars::new(),
        }
    }

    pub fn with_secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Path of the entry script, when the application lives in a
    /// sub-directory of the host (e.g. `/subdir/index.php`). Participates in
    /// base-URL detection only.
    pub fn with_script_name(mut self, script_name: impl Into<String>) -> Self {
        self.script_name = script_name.into();
        self
    }

    pub fn with_query(mut self, query: Vars) -> Self {
        self.query = query;
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn secure(&self) -> bool {
        self.secure
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn script_name(&self) -> &str {
        &self.script_name
    }

    pub fn query(&self) -> &Vars {
        &self.query
    }

    /// Removes and returns one query value (used for the reserved `route`
    /// key in non-friendly mode).
    pub fn take_query(&mut self, key: &str) -> Option<Value> {
        self.query.shift_remove(key)
    }

    /// Replaces/extends query pairs with derived route variables. Existing
    /// keys are overwritten; this is the sink the router reports matched
    /// variables through.
    pub fn merge_query(&mut self, vars: &Vars) {
        for (key, value) in vars {
            self.query.insert(key.clone(), value.clone());
        }
    }
}
