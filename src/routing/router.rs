//! Route lookup and dispatch.
//!
//! # Responsibilities
//! - Store compiled routes in declaration order
//! - Look up the first route matching a path
//! - Return the matched route with decoded parameters, or explicit no-match
//! - Resolve route names back to paths
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) scan in declaration order; first match wins
//! - Route names validated unique at build time
//! - Explicit RouteNotFound rather than silent default

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::handler::{Handler, SharedHandler};
use crate::routing::converter::Converter;
use crate::routing::error::{ReverseError, RouteNotFound, RouterError};
use crate::routing::params::Params;
use crate::routing::pattern::Pattern;

/// A compiled route: pattern, handler and symbolic name.
#[derive(Clone)]
pub struct Route {
    name: String,
    pattern: Pattern,
    handler: SharedHandler,
}

impl Route {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn handler(&self) -> &SharedHandler {
        &self.handler
    }

    /// Serializable summary for listings.
    pub fn info(&self) -> RouteInfo<'_> {
        RouteInfo {
            name: &self.name,
            pattern: self.pattern.as_str(),
            parameters: self
                .pattern
                .parameters()
                .map(|(name, converter)| ParamInfo { name, converter })
                .collect(),
        }
    }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("name", &self.name)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Serialize)]
pub struct RouteInfo<'a> {
    pub name: &'a str,
    pub pattern: &'a str,
    pub parameters: Vec<ParamInfo<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ParamInfo<'a> {
    pub name: &'a str,
    pub converter: Converter,
}

/// Result of a successful lookup.
#[derive(Debug)]
pub struct RouteMatch<'r> {
    route: &'r Route,
    params: Params,
}

impl<'r> RouteMatch<'r> {
    pub fn route(&self) -> &'r Route {
        self.route
    }

    pub fn name(&self) -> &'r str {
        &self.route.name
    }

    pub fn handler(&self) -> &'r SharedHandler {
        &self.route.handler
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn into_params(self) -> Params {
        self.params
    }
}

/// Immutable, ordered route table.
#[derive(Debug, Clone)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn builder() -> RouterBuilder {
        RouterBuilder::default()
    }

    /// Find the first route matching `path`.
    ///
    /// `path` is relative to the mount prefix. A route whose parameters fail
    /// to decode is skipped.
    pub fn match_path(&self, path: &str) -> Result<RouteMatch<'_>, RouteNotFound> {
        if path.is_empty() {
            return Err(RouteNotFound {
                path: String::new(),
            });
        }

        self.routes
            .iter()
            .find_map(|route| {
                route
                    .pattern
                    .match_path(path)
                    .map(|params| RouteMatch { route, params })
            })
            .ok_or_else(|| RouteNotFound {
                path: path.to_string(),
            })
    }

    /// Build the path of the route called `name` from string arguments.
    pub fn reverse(&self, name: &str, args: &[(&str, &str)]) -> Result<String, ReverseError> {
        let route = self
            .get(name)
            .ok_or_else(|| ReverseError::UnknownRoute(name.to_string()))?;
        route.pattern.reverse(name, args)
    }

    pub fn get(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Collects route declarations; validation runs in [`RouterBuilder::build`].
#[derive(Default)]
pub struct RouterBuilder {
    declared: Vec<(String, SharedHandler, String)>,
}

impl RouterBuilder {
    /// Declare a route. Order of declaration is match order.
    pub fn route(
        self,
        pattern: impl Into<String>,
        handler: impl Handler,
        name: impl Into<String>,
    ) -> Self {
        let handler: SharedHandler = Arc::new(handler);
        self.route_shared(pattern, handler, name)
    }

    /// Same as [`RouterBuilder::route`] for an already shared handler.
    pub fn route_shared(
        mut self,
        pattern: impl Into<String>,
        handler: SharedHandler,
        name: impl Into<String>,
    ) -> Self {
        self.declared.push((pattern.into(), handler, name.into()));
        self
    }

    pub fn build(self) -> Result<Router, RouterError> {
        let mut routes: Vec<Route> = Vec::with_capacity(self.declared.len());

        for (raw, handler, name) in self.declared {
            if routes.iter().any(|r| r.name == name) {
                return Err(RouterError::DuplicateName(name));
            }
            let pattern = Pattern::parse(&raw).map_err(|source| RouterError::Pattern {
                name: name.clone(),
                pattern: raw.clone(),
                source,
            })?;
            routes.push(Route {
                name,
                pattern,
                handler,
            });
        }

        Ok(Router { routes })
    }
}
