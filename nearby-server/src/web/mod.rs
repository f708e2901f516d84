//! Web layer for the nearby-transit service.
//!
//! Provides the JSON HTTP endpoints; the page that renders these
//! results lives elsewhere and consumes this contract.

mod dto;
mod routes;
mod state;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
