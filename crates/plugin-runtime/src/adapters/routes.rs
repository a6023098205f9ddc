//! HTTP routes of the poll add-on.

use crate::ports::RouteTable;

const POLL_ROUTE: &str = "/api/v1/polls/{id}";

/// The route table served once the add-on is active.
pub fn poll_api_routes() -> RouteTable {
    RouteTable::new()
        .route("GET", "/")
        .route("GET", "/api/v1/configuration")
        .route("POST", format!("{POLL_ROUTE}/vote/{{optionNumber}}"))
        .route("POST", format!("{POLL_ROUTE}/votes/reset"))
        .route("POST", format!("{POLL_ROUTE}/option/add/request"))
        .route("POST", format!("{POLL_ROUTE}/option/add"))
        .route("POST", format!("{POLL_ROUTE}/end"))
        .route("POST", format!("{POLL_ROUTE}/end/confirm"))
        .route("POST", format!("{POLL_ROUTE}/delete"))
        .route("POST", format!("{POLL_ROUTE}/delete/confirm"))
        .route("POST", format!("{POLL_ROUTE}/metadata"))
}
