//! Web server and request handling

pub mod handler;

pub use handler::{AppState, build_router, serve};
