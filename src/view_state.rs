use crate::error::ApiResult;

/// What a data-driven view is currently showing. Exactly one variant holds at
/// any time.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    pub fn from_result(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => ViewState::Success(data),
            Err(err) => ViewState::Error(err.message),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Success(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Error(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Success(data) => ViewState::Success(f(data)),
            ViewState::Error(msg) => ViewState::Error(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ApiError, ApiErrorStatus};

    #[test]
    fn result_maps_onto_exactly_one_state() {
        let ok: ViewState<Vec<u8>> = ViewState::from_result(Ok(vec![]));
        assert_eq!(ok.data(), Some(&vec![]));
        assert!(ok.error().is_none() && !ok.is_loading());

        let err: ViewState<u8> =
            ViewState::from_result(Err(ApiError::new(ApiErrorStatus::Server, "boom")));
        assert_eq!(err.error(), Some("boom"));
        assert!(err.data().is_none());
    }

    #[test]
    fn starts_loading() {
        assert!(ViewState::<()>::default().is_loading());
    }
}
