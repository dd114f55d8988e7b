//! Per-domain API gateways.
//!
//! Each gateway wraps one backend. A method maps one client intent to exactly
//! one request: no retries, no caching, no de-duplication.

mod dining;
mod housing;
mod identity;

pub use dining::DiningApi;
pub use housing::HousingApi;
pub use identity::IdentityApi;

use crate::error::{ApiError, ApiResult};
use crate::request::{HttpClient, HttpRequest};
use campus_shared::protocol::ApiRequest;
use campus_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE};

/// Shared request plumbing behind every gateway.
#[derive(Debug, Clone)]
pub struct Gateway<C> {
    client: C,
    base_url: String,
    token: Option<String>,
}

impl<C: HttpClient> Gateway<C> {
    pub fn new(client: C, base_url: &str, token: Option<String>) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self {
            client,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn build<R: ApiRequest>(&self, req: &R) -> HttpRequest {
        let mut http = HttpRequest::new(&self.url(&req.path()), R::METHOD);
        if R::AUTHORIZED {
            if let Some(token) = &self.token {
                http = http.with_header(HEADER_AUTHORIZATION, &format!("Bearer {token}"));
            }
        }
        for (key, value) in req.headers() {
            http = http.with_header(key, &value);
        }
        if let Some(body) = req.body() {
            http = http
                .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON)
                .with_body(body);
        }
        http
    }

    /// Sends `req` and decodes the response. `op` names the intent in logs.
    pub async fn call<R: ApiRequest>(&self, op: &str, req: &R) -> ApiResult<R::Response> {
        let res = self.client.send(self.build(req)).await.map_err(|e| {
            let err = ApiError::from(e);
            crate::log_error!("[{}] transport failure: {}", op, err);
            err
        })?;

        if !res.ok() {
            let err = ApiError::from_response(&res);
            crate::log_warn!("[{}] {} {}: {}", op, res.status, err.status, err);
            return Err(err);
        }

        res.json::<R::Response>().map_err(|e| {
            let err = ApiError::from_decode(&e);
            crate::log_error!("[{}] {}", op, err);
            err
        })
    }
}
