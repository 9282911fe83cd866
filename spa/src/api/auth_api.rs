use async_trait::async_trait;
use gloo_net::http::Request;
use shared::client::{ApiError, ApiRequest, ApiResponse, AuthClient, HttpTransport, Method, TransportError};

use crate::api::API_BASE_URL;

/// Browser `fetch` transport.
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = request.url.as_str();
        let builder = match request.method {
            Method::Get => Request::get(url),
            Method::Post => Request::post(url),
            Method::Put => Request::put(url),
        };
        let builder = match &request.bearer {
            Some(token) => builder.header("Authorization", &format!("Bearer {token}")),
            None => builder,
        };
        let sent = match request.body {
            Some(body) => {
                builder
                    .header("Content-Type", "application/json")
                    .body(body)
                    .map_err(|error| TransportError::new(error.to_string()))?
                    .send()
                    .await
            }
            None => builder.send().await,
        };
        let response = sent.map_err(|error| TransportError::new(error.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| TransportError::new(error.to_string()))?;
        log::debug!(
            "Api exchange, method={method}, url={url}, status={status}",
            method = request.method,
        );
        Ok(ApiResponse { status, body })
    }
}

pub fn auth_client() -> Result<AuthClient<GlooTransport>, ApiError> {
    AuthClient::new(API_BASE_URL, GlooTransport)
}
