//! Browser bindings: fetch transport, storage, routing, view tasks.

mod http;
pub mod route;
pub mod router;
mod storage;
pub mod task;

pub use http::FetchClient;
pub use storage::BrowserStorage;
