//! Path-template compilation.
//!
//! A template is literal text with zero or more placeholder blocks of the
//! form `(/|.)?[type:name]?`: an optional separator, a typed named capture,
//! and an optional-marker. `compile` turns a template into an anchored,
//! case-sensitive regular expression with named groups; `placeholders` is the
//! shared scanner that both the compiler and reverse resolution use.
//!
//! Templates starting with `@` bypass the grammar: the remainder is used
//! verbatim as the regex body (still anchored). Templates without any `[` are
//! never compiled at all; the router matches them by string equality, which
//! also keeps literal regex metacharacters in them inert.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::PatternError;

/// Scanner for placeholder blocks: separator, type, name, optional marker.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(/|\.)?\[([^:\]]*)(?::([^:\]]*))?\](\?)?").expect("placeholder grammar"));

/// Compiled templates, keyed by the literal template string. Patterns are
/// pure functions of their template, so the cache is shared process-wide.
static COMPILED: Lazy<Mutex<HashMap<String, Regex>>> = Lazy::new(|| Mutex::new(HashMap::new()));

/// One placeholder block found in a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// The full matched block, including any leading separator.
    pub block: String,
    /// Leading separator: `"/"`, `"."`, or empty.
    pub pre: String,
    /// Match-type token (may be empty for the default type).
    pub kind: String,
    /// Capture name (may be empty for an anonymous capture).
    pub name: String,
    /// Whether the block carried a trailing `?`.
    pub optional: bool,
}

impl Placeholder {
    /// The block without its leading separator, as it appears in rehydrated
    /// URLs when the separator must survive.
    pub fn block_sans_pre(&self) -> &str {
        &self.block[self.pre.len()..]
    }
}

/// Resolves a match-type token to its character-class fragment.
///
/// Unknown tokens are returned verbatim, so a template may embed a custom
/// regex fragment directly in the type position.
///
/// # Examples
///
/// ```
/// use cadre_router::route::pattern::match_type;
///
/// assert_eq!(match_type("int"), "[0-9]+");
/// assert_eq!(match_type(""), "[^/.]+");
/// assert_eq!(match_type("[a-z]{2}"), "[a-z]{2}");
/// ```
pub fn match_type(kind: &str) -> &str {
    match kind {
        "int" => "[0-9]+",
        "str" => "[0-9A-Za-z-]+",
        "uuid4" => "[0-9a-f]{8}-[0-9a-f]{4}-4[0-9a-f]{3}-[89ab][0-9a-f]{3}-[0-9a-f]{12}",
        "h" => "[0-9A-Fa-f]+",
        "*" => ".+?",
        "**" => ".+",
        "" => "[^/.]+",
        other => other,
    }
}

/// Scans a template for placeholder blocks, left to right.
///
/// # Examples
///
/// ```
/// use cadre_router::route::pattern::placeholders;
///
/// let found = placeholders("article/[int:id]/rev.[h:hash]?");
/// assert_eq!(found.len(), 2);
/// assert_eq!(found[0].name, "id");
/// assert_eq!(found[0].pre, "/");
/// assert!(!found[0].optional);
/// assert_eq!(found[1].kind, "h");
/// assert_eq!(found[1].pre, ".");
/// assert!(found[1].optional);
/// ```
pub fn placeholders(template: &str) -> Vec<Placeholder> {
    PLACEHOLDER
        .captures_iter(template)
        .map(|caps| Placeholder {
            block: caps[0].to_string(),
            pre: caps.get(1).map_or(String::new(), |m| m.as_str().to_string()),
            kind: caps.get(2).map_or(String::new(), |m| m.as_str().to_string()),
            name: caps.get(3).map_or(String::new(), |m| m.as_str().to_string()),
            optional: caps.get(4).is_some(),
        })
        .collect()
}

/// Compiles a template into its anchored matcher, memoized per template
/// string.
///
/// `Regex` is cheap to clone (it is reference-counted internally), so cache
/// hits hand out clones.
pub fn compiled(template: &str) -> Result<Regex, PatternError> {
    if let Some(regex) = COMPILED.lock().unwrap().get(template) {
        return Ok(regex.clone());
    }

    let regex = compile(template)?;
    COMPILED
        .lock()
        .unwrap()
        .insert(template.to_string(), regex.clone());
    Ok(regex)
}

/// Compiles a template without consulting the cache.
///
/// Placeholder blocks become `(?:<sep>(?P<name><type>)<opt>)<opt>`: the outer
/// optional layer lets an optional block vanish together with its separator
/// without breaking the surrounding literal text. A `.` separator is escaped;
/// all other literal template text passes through untouched.
///
/// # Examples
///
/// ```
/// use cadre_router::route::pattern::compile;
///
/// let re = compile("item/[int:id]").unwrap();
/// assert!(re.is_match("item/42"));
/// assert!(!re.is_match("item/abc"));
/// assert!(!re.is_match("prefix/item/42"));
/// ```
pub fn compile(template: &str) -> Result<Regex, PatternError> {
    let body = match template.strip_prefix('@') {
        Some(raw) => raw.to_string(),
        None => expand(template),
    };

    Regex::new(&format!("^{body}$")).map_err(|source| PatternError::Invalid {
        template: template.to_string(),
        source,
    })
}

fn expand(template: &str) -> String {
    let mut pattern = template.to_string();

    for ph in placeholders(template) {
        let pre = if ph.pre == "." { "\\." } else { ph.pre.as_str() };
        let opt = if ph.optional { "?" } else { "" };
        let name = if ph.name.is_empty() {
            String::new()
        } else {
            format!("?P<{}>", ph.name)
        };
        let replacement = format!("(?:{pre}({name}{ty}){opt}){opt}", ty = match_type(&ph.kind));
        pattern = pattern.replace(&ph.block, &replacement);
    }

    pattern
}
