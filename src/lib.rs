//! Route table and HTTP front end for the events resource.

pub mod config;
pub mod events;
pub mod handler;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::ServiceConfig;
pub use events::event_routes;
pub use handler::Handler;
pub use http::HttpServer;
pub use lifecycle::shutdown::Shutdown;
pub use routing::{RouteNotFound, Router};
