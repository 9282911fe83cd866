use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::validators::{compose, EMAIL_FIELD, PASSWORD_FIELD};

pub mod client;
pub mod epoch;
pub mod guard;
pub mod persist;
pub mod session;
pub mod validators;

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserName {
    pub first_name: String,
    pub last_name: String,
}

impl UserName {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

/// Profile as returned by `POST /profile`. Only the names reach the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub id: String,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    pub fn user_name(&self) -> UserName {
        UserName::new(self.first_name.clone(), self.last_name.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct UserCredentials {
    pub email: String,
    pub password: SecretString,
}

impl UserCredentials {
    pub fn new(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_owned(),
            password: SecretString::from(password.trim().to_owned()),
        }
    }

    /// Client-side checks run before the credentials are submitted.
    pub fn validate(&self) -> LoginFieldErrors {
        let email = compose(EMAIL_FIELD)(&self.email);
        let password = compose(PASSWORD_FIELD)(self.password.expose_secret());
        LoginFieldErrors {
            email: email.to_owned(),
            password: password.to_owned(),
        }
    }
}

/// Messages shown next to the login form fields; empty means no error.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginFieldErrors {
    pub email: String,
    pub password: String,
}

impl LoginFieldErrors {
    pub fn is_empty(&self) -> bool {
        self.email.is_empty() && self.password.is_empty()
    }
}

/// Every API response is wrapped as `{ status, message, body }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: Option<u16>,
    pub message: Option<String>,
    pub body: Option<T>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}
