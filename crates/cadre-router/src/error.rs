//! Error taxonomy for the routing core.
//!
//! Forward matching has exactly one routine failure: `MatchError::NotFound`,
//! which the HTTP boundary maps to a 404. Reverse resolution never errors;
//! an unknown route id yields a `None` sentinel so callers can fall back to
//! a default link. Provider problems degrade to empty route sets and are
//! logged, never raised.

use thiserror::Error;

/// Failure of a forward match.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MatchError {
    /// The route map was exhausted with no candidate accepting the request.
    #[error("no route matches the request")]
    NotFound,
}

/// Failure to turn a path template into a usable matcher.
///
/// Reachable through raw `@`-templates (whose body is caller-supplied regex)
/// and through unknown match-type tokens spliced verbatim into the pattern.
#[derive(Debug, Error)]
pub enum PatternError {
    #[error("invalid route template `{template}`: {source}")]
    Invalid {
        template: String,
        #[source]
        source: regex::Error,
    },
}
