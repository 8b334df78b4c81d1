//! Routing error types.

use thiserror::Error;

/// No declared route matches a path.
///
/// Raised both when nothing matches structurally and when a typed parameter
/// fails to decode. The dispatcher turns it into a 404.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no route matches path `{path}`")]
pub struct RouteNotFound {
    pub path: String,
}

/// A pattern string could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("placeholder starting at byte {0} is not closed")]
    UnclosedPlaceholder(usize),

    #[error("empty placeholder at byte {0}")]
    EmptyPlaceholder(usize),

    #[error("invalid parameter name `{0}`")]
    InvalidParameterName(String),

    #[error("unknown converter `{0}`")]
    UnknownConverter(String),

    #[error("parameter `{0}` appears more than once")]
    DuplicateParameter(String),
}

/// A route table could not be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
    #[error("route `{name}` has an invalid pattern `{pattern}`: {source}")]
    Pattern {
        name: String,
        pattern: String,
        #[source]
        source: PatternError,
    },

    #[error("route name `{0}` is declared more than once")]
    DuplicateName(String),
}

/// Reverse resolution failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
    #[error("no route named `{0}`")]
    UnknownRoute(String),

    #[error("route `{route}` needs argument `{param}`")]
    MissingArgument { route: String, param: String },

    #[error("route `{route}` has no parameter `{param}`")]
    UnexpectedArgument { route: String, param: String },

    #[error("argument `{param}` = `{value}` is not a valid {converter} for route `{route}`")]
    InvalidArgument {
        route: String,
        param: String,
        value: String,
        converter: &'static str,
    },
}
