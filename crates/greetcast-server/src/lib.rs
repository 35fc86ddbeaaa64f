//! HTTP surface and request orchestration for greetcast.

pub mod extract;
pub mod greeting;
pub mod handlers;
pub mod http;

pub use http::{build_router, AppState};
