//! HTTP server: shared state, handlers, route table and builder
//!
//! `ServerBuilder` opens the data files named in the configuration, wires the
//! services into an [`AppState`] and exposes them through the REST routes in
//! [`router`].

pub mod builder;
pub mod handlers;
pub mod router;
pub mod state;

pub use builder::ServerBuilder;
pub use router::build_router;
pub use state::AppState;
