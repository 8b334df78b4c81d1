//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming path (mount prefix already stripped)
//!     → router.rs (scan routes in declaration order)
//!     → pattern.rs (structural match of literal text and placeholders)
//!     → converter.rs (decode placeholders: str, int, slug, uuid, path)
//!     → Return: RouteMatch { route, params } or RouteNotFound
//!
//! Route Compilation (at startup):
//!     (pattern, handler, name)[]
//!     → Parse patterns into tokens
//!     → Reject duplicate names
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - No regex: converters are character-class predicates
//! - Deterministic: same input always matches same route
//! - First match wins (declaration order)

pub mod converter;
pub mod error;
pub mod params;
pub mod pattern;
pub mod router;

pub use converter::{Converter, ParamValue};
pub use error::{PatternError, ReverseError, RouteNotFound, RouterError};
pub use params::Params;
pub use pattern::Pattern;
pub use router::{Route, RouteInfo, RouteMatch, Router, RouterBuilder};
