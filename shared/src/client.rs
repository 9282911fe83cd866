//! Client for the user API: login, profile fetch and profile update.
//!
//! The HTTP exchange itself is delegated to an [`HttpTransport`], so the same
//! client runs in the browser and on the command line.

use async_trait::async_trait;
use secrecy::ExposeSecret;
use serde::de::DeserializeOwned;
use serde::Serialize;
use strum_macros::{AsRefStr, Display};
use url::Url;

use crate::validators::valid_email;
use crate::{ApiEnvelope, LoginFieldErrors, LoginResponse, UserCredentials, UserName, UserProfile};

pub const DEFAULT_BASE_URL: &str = "http://localhost:3001/api/v1/user";

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: Url,
    pub bearer: Option<String>,
    /// JSON encoded body.
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failure to obtain any HTTP response.
#[derive(thiserror::Error, Debug)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait(?Send)]
pub trait HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("invalid_endpoint")]
    InvalidEndpoint(#[from] url::ParseError),
    #[error("transport_error: {0}")]
    Transport(#[from] TransportError),
    #[error("response_error: status={status}, data={data}")]
    Response {
        status: u16,
        message: Option<String>,
        /// Raw response body.
        data: String,
    },
    #[error("schema_error: {0}")]
    Schema(String),
    #[error("serialize_error")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

pub struct AuthClient<T> {
    base_url: Url,
    transport: T,
}

impl<T: HttpTransport> AuthClient<T> {
    pub fn new(base_url: &str, transport: T) -> Result<Self, ApiError> {
        // Url::join replaces the last segment unless the base ends with a slash.
        let base_url = if base_url.ends_with('/') {
            Url::parse(base_url)?
        } else {
            Url::parse(&format!("{base_url}/"))?
        };
        Ok(Self {
            base_url,
            transport,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub async fn login(&self, credentials: &UserCredentials) -> Result<String, ApiError> {
        let body = serde_json::to_string(&LoginRequest {
            email: &credentials.email,
            password: credentials.password.expose_secret(),
        })?;
        let request = ApiRequest {
            method: Method::Post,
            url: self.base_url.join("login")?,
            bearer: None,
            body: Some(body),
        };
        log::info!("Doing login, endpoint={}", request.url);
        let envelope: ApiEnvelope<LoginResponse> = self.exchange(request).await?;
        let Some(LoginResponse { token }) = envelope.body else {
            return Err(schema_error("login response without body"));
        };
        log::info!("Api auth login, email={}", credentials.email);
        Ok(token)
    }

    pub async fn fetch_profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        let request = ApiRequest {
            method: Method::Post,
            url: self.base_url.join("profile")?,
            bearer: bearer(token),
            body: None,
        };
        let envelope: ApiEnvelope<UserProfile> = self.exchange(request).await?;
        let Some(profile) = envelope.body else {
            return Err(schema_error("profile response without body"));
        };
        let message = valid_email(&profile.email);
        if !message.is_empty() {
            return Err(schema_error(&format!(
                "profile email rejected, email={email}, reason={message}",
                email = profile.email
            )));
        }
        log::info!("Api get user profile, id={}", profile.id);
        Ok(profile)
    }

    /// Returns the names echoed by the server, or the submitted ones when the
    /// response carries no body.
    pub async fn update_profile(
        &self,
        token: &str,
        user_name: &UserName,
    ) -> Result<UserName, ApiError> {
        let request = ApiRequest {
            method: Method::Put,
            url: self.base_url.join("profile")?,
            bearer: bearer(token),
            body: Some(serde_json::to_string(user_name)?),
        };
        let envelope: ApiEnvelope<UserName> = self.exchange(request).await?;
        let updated = envelope.body.unwrap_or_else(|| user_name.clone());
        log::info!(
            "Api update user profile, first_name={first}, last_name={last}",
            first = updated.first_name,
            last = updated.last_name,
        );
        Ok(updated)
    }

    async fn exchange<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> Result<ApiEnvelope<R>, ApiError> {
        let method = request.method;
        let url = request.url.clone();
        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(error) => {
                log::warn!("Api transport failure, method={method}, url={url}, error={error}");
                return Err(error.into());
            }
        };

        if !response.is_success() {
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&response.body)
                .ok()
                .and_then(|envelope| envelope.message);
            log::warn!(
                "Api error response, method={method}, url={url}, status={status}, response={body}",
                status = response.status,
                body = response.body,
            );
            return Err(ApiError::Response {
                status: response.status,
                message,
                data: response.body,
            });
        }

        serde_json::from_str::<ApiEnvelope<R>>(&response.body)
            .map_err(|error| schema_error(&format!("method={method}, url={url}, error={error}")))
    }
}

fn bearer(token: &str) -> Option<String> {
    if token.is_empty() {
        None
    } else {
        Some(token.to_owned())
    }
}

fn schema_error(details: &str) -> ApiError {
    log::warn!("Api response rejected, {details}");
    ApiError::Schema(details.to_owned())
}

impl LoginFieldErrors {
    /// Maps a failed login onto the form fields. The server only sends free
    /// text, so the field is picked by looking for "User" or "Password" in the
    /// raw payload. Returns false when the error was left unclassified.
    pub fn apply_login_error(&mut self, error: &ApiError) -> bool {
        let ApiError::Response { data, message, .. } = error else {
            log::warn!("Login failed, error={error}");
            return false;
        };
        let message = message.clone().unwrap_or_default();
        let mut classified = false;
        if data.contains("User") {
            self.email = message.clone();
            self.password.clear();
            classified = true;
        }
        if data.contains("Password") {
            self.password = message;
            self.email.clear();
            classified = true;
        }
        if !classified {
            log::warn!("Login failed with unclassified response, data={data}");
        }
        classified
    }
}
