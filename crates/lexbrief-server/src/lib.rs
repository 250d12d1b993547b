//! LexBrief server: router and shared state, used by the `lexbrief` binary
//! and the integration tests.

pub mod routes;
pub mod state;

pub use routes::build_router;
pub use state::AppState;
