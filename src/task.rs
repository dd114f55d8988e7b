//! Future combinators shared by the views.

use crate::error::{ApiError, ApiErrorStatus, ApiResult};
use futures::future::{self, Either};
use std::future::Future;
use std::pin::pin;

pub const TIMEOUT_MESSAGE: &str = "The request timed out.";

/// Races `request` against `timer`. If the timer wins, the request is dropped
/// and a transport error is returned.
///
/// The timer is passed in so the caller picks the clock (browser timeout in
/// the app, tokio in tests).
pub async fn with_timeout<T, F, D>(request: F, timer: D) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
    D: Future<Output = ()>,
{
    match future::select(pin!(request), pin!(timer)).await {
        Either::Left((res, _)) => res,
        Either::Right(((), _)) => {
            crate::log_warn!("[timeout] request abandoned");
            Err(ApiError::new(ApiErrorStatus::Transport, TIMEOUT_MESSAGE))
        }
    }
}
