//! Ordered variable bags and query-string helpers
//!
//! Route variables keep their insertion order; it is observable both in
//! reverse-resolved query strings and in static-map registration. The alias
//! relies on `serde_json`'s `preserve_order` feature.

use serde_json::Value;

/// Ordered key → value mapping used for route variables, selection params
/// and query-string pairs.
pub type Vars = serde_json::Map<String, Value>;

/// Extracts a plain-string rendering of a scalar JSON value.
///
/// Structured values (arrays, objects) and nulls have no place in a URL and
/// yield `None`.
///
/// # Examples
///
/// ```
/// use cadre_router::vars::scalar;
/// use serde_json::json;
///
/// assert_eq!(scalar(&json!("en")), Some("en".to_string()));
/// assert_eq!(scalar(&json!(42)), Some("42".to_string()));
/// assert_eq!(scalar(&json!(true)), Some("true".to_string()));
/// assert_eq!(scalar(&json!(null)), None);
/// assert_eq!(scalar(&json!(["a"])), None);
/// ```
pub fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Counts the key+value pairs of `caller` that are present identically in
/// `vars`. This is the selection weight used to pick among route variants
/// during reverse resolution.
///
/// # Examples
///
/// ```
/// use cadre_router::vars::weight;
/// use serde_json::json;
///
/// let caller = json!({"type": "b", "page": 2}).as_object().unwrap().clone();
/// let vars = json!({"type": "b", "page": 3}).as_object().unwrap().clone();
/// assert_eq!(weight(&caller, &vars), 1);
/// ```
pub fn weight(caller: &Vars, vars: &Vars) -> usize {
    caller
        .iter()
        .filter(|(key, value)| vars.get(key.as_str()) == Some(value))
        .count()
}

/// True for keys that parse as numbers. Numeric keys are artifacts of
/// positional captures and never participate in variant selection.
pub fn is_numeric_key(key: &str) -> bool {
    key.parse::<f64>().is_ok()
}

/// Serializes scalar pairs as an `application/x-www-form-urlencoded` query
/// string, in map order. Non-scalar values are silently skipped.
///
/// # Examples
///
/// ```
/// use cadre_router::vars::build_query;
/// use serde_json::json;
///
/// let vars = json!({"q": "a b", "page": 2}).as_object().unwrap().clone();
/// assert_eq!(build_query(&vars), "q=a%20b&page=2");
/// ```
pub fn build_query(vars: &Vars) -> String {
    vars.iter()
        .filter_map(|(key, value)| {
            scalar(value).map(|v| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(&v))
            })
        })
        .collect::<Vec<_>>()
        .join("&")
}
