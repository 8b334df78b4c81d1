//! URL table of the events resource.
//!
//! | pattern | name |
//! |---|---|
//! | `event_list_create` | `event_list_create` |
//! | `event_detail/<uuid:pk>/` | `event_detail` |
//!
//! The table is mounted under the service prefix (`/api/` by default). The
//! handlers are supplied by the caller; what they do with events is theirs.

use crate::handler::Handler;
use crate::routing::{Router, RouterError};

/// Route name of the list/create endpoint.
pub const EVENT_LIST_CREATE: &str = "event_list_create";

/// Route name of the detail endpoint.
pub const EVENT_DETAIL: &str = "event_detail";

/// Parameter carrying the event UUID on the detail route.
pub const EVENT_PK: &str = "pk";

/// Build the events route table.
pub fn event_routes(
    event_list: impl Handler,
    event_detail: impl Handler,
) -> Result<Router, RouterError> {
    Router::builder()
        .route("event_list_create", event_list, EVENT_LIST_CREATE)
        .route("event_detail/<uuid:pk>/", event_detail, EVENT_DETAIL)
        .build()
}
