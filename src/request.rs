use campus_shared::protocol::HttpMethod;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

#[cfg(test)]
use std::cell::RefCell;

// =========================================================
// 核心抽象层 (HTTP Interface Abstraction)
// =========================================================

/// 通用 HTTP 请求结构
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: HashMap<String, String>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(url: &str, method: HttpMethod) -> Self {
        Self {
            url: url.to_string(),
            method,
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn with_header(mut self, key: &str, value: &str) -> Self {
        self.headers.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body.to_string());
        self
    }
}

/// 通用 HTTP 响应结构
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Decodes the body. An empty body decodes like JSON `null`, so unit and
    /// `Option` responses accept `204 No Content`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        if self.body.trim().is_empty() {
            serde_json::from_str("null")
        } else {
            serde_json::from_str(&self.body)
        }
    }
}

/// The request never produced an HTTP response (network down, CORS, aborted).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct TransportError(pub String);

/// HTTP 客户端特性 (Trait)
///
/// (?Send) because browser fetch futures are not `Send`.
#[async_trait::async_trait(?Send)]
pub trait HttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError>;
}

#[async_trait::async_trait(?Send)]
impl<C: HttpClient + ?Sized> HttpClient for &C {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(req).await
    }
}

// =========================================================
// 测试实现 (Mock)
// =========================================================

/// Recorded request: (method, url, headers, body).
#[cfg(test)]
pub type RecordedRequest = (String, String, HashMap<String, String>, Option<String>);

#[cfg(test)]
pub struct MockHttpClient {
    // ("METHOD URL", Ok((status, body)) | Err(transport message))
    responses: RefCell<HashMap<String, Result<(u16, String), String>>>,
    pub requests: RefCell<Vec<RecordedRequest>>,
}

#[cfg(test)]
impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(HashMap::new()),
            requests: RefCell::new(Vec::new()),
        }
    }

    fn key(method: HttpMethod, url: &str) -> String {
        format!("{} {}", method.as_str(), url)
    }

    pub fn mock_response(&self, method: HttpMethod, url: &str, status: u16, body: serde_json::Value) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), Ok((status, body.to_string())));
    }

    pub fn mock_text(&self, method: HttpMethod, url: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), Ok((status, body.to_string())));
    }

    pub fn mock_transport_error(&self, method: HttpMethod, url: &str, message: &str) {
        self.responses
            .borrow_mut()
            .insert(Self::key(method, url), Err(message.to_string()));
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_body(&self) -> Option<serde_json::Value> {
        self.requests
            .borrow()
            .last()
            .and_then(|r| r.3.as_deref())
            .and_then(|b| serde_json::from_str(b).ok())
    }
}

#[cfg(test)]
#[async_trait::async_trait(?Send)]
impl HttpClient for MockHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push((
            req.method.as_str().to_string(),
            req.url.clone(),
            req.headers.clone(),
            req.body.clone(),
        ));

        let responses = self.responses.borrow();
        match responses.get(&Self::key(req.method, &req.url)) {
            Some(Ok((status, body))) => Ok(HttpResponse {
                status: *status,
                body: body.clone(),
            }),
            Some(Err(message)) => Err(TransportError(message.clone())),
            None => Ok(HttpResponse {
                status: 404,
                body: "Not Found".to_string(),
            }),
        }
    }
}
