use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use shared::client::{ApiRequest, ApiResponse, HttpTransport, Method, TransportError};
use tracing::debug;

#[derive(Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

#[async_trait(?Send)]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
        };
        let mut builder = self.http.request(method, request.url.clone());
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = request.body {
            builder = builder.header(CONTENT_TYPE, "application/json").body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| TransportError::new(error.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError::new(error.to_string()))?;
        debug!(method = %request.method, url = %request.url, status, "Api exchange");
        Ok(ApiResponse { status, body })
    }
}
