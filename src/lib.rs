//! Client core for the campus housing & dining services.
//!
//! Everything here is UI-agnostic and runs natively under `cargo test`; the
//! `campus-frontend` crate binds it to the browser.

pub mod actions;
pub mod api;
pub mod config;
pub mod error;
pub mod guard;
pub mod request;
pub mod session;
pub mod task;
pub mod validation;
pub mod view_state;

pub use config::ApiConfig;
pub use error::{ApiError, ApiErrorStatus, ApiResult};
pub use view_state::ViewState;

#[cfg(target_arch = "wasm32")]
#[doc(hidden)]
pub use web_sys as __web_sys;

// =========================================================
// 跨平台日志宏
// =========================================================

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => ($crate::__web_sys::console::log_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_info {
    ($($t:tt)*) => (println!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => ($crate::__web_sys::console::warn_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_warn {
    ($($t:tt)*) => (eprintln!($($t)*))
}

#[cfg(target_arch = "wasm32")]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => ($crate::__web_sys::console::error_1(&format!($($t)*).into()))
}

#[cfg(not(target_arch = "wasm32"))]
#[macro_export]
macro_rules! log_error {
    ($($t:tt)*) => (eprintln!($($t)*))
}
