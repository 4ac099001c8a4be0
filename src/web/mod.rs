//! Web boundary layer
//!
//! Thin axum wiring over the search orchestrators.

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
