//! Browser fetch transport for the core gateways.

use campus::request::{HttpClient, HttpRequest, HttpResponse, TransportError};
use campus_shared::protocol::HttpMethod;
use gloo_net::http::{Request, RequestBuilder};

/// `HttpClient` backed by `window.fetch` (via gloo-net).
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchClient;

fn transport(err: gloo_net::Error) -> TransportError {
    TransportError(err.to_string())
}

#[async_trait::async_trait(?Send)]
impl HttpClient for FetchClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder: RequestBuilder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };
        for (key, value) in &req.headers {
            builder = builder.header(key, value);
        }

        let request = match req.body {
            Some(body) => builder.body(body).map_err(transport)?,
            None => builder.build().map_err(transport)?,
        };

        let res = request.send().await.map_err(transport)?;
        let status = res.status();
        let body = res.text().await.map_err(transport)?;
        Ok(HttpResponse { status, body })
    }
}
