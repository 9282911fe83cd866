#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use serde_json::json;
use shared::client::{ApiRequest, ApiResponse, AuthClient, HttpTransport, TransportError};

pub const TEST_BASE_URL: &str = "http://localhost:3001/api/v1/user";

/// Transport answering from a queue of canned responses and recording every
/// request it receives.
#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Rc<RefCell<VecDeque<Result<ApiResponse, TransportError>>>>,
    requests: Rc<RefCell<Vec<ApiRequest>>>,
}

impl FakeTransport {
    pub fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.responses.borrow_mut().push_back(Ok(ApiResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.responses.borrow_mut().push_back(Ok(ApiResponse {
            status,
            body: body.to_owned(),
        }));
        self
    }

    pub fn fail(&self, message: &str) -> &Self {
        self.responses
            .borrow_mut()
            .push_back(Err(TransportError::new(message)));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(request);
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::new("no canned response left")))
    }
}

pub fn client(transport: &FakeTransport) -> AuthClient<FakeTransport> {
    AuthClient::new(TEST_BASE_URL, transport.clone()).expect("test base url is valid")
}

pub fn profile_body(first_name: &str, last_name: &str) -> serde_json::Value {
    json!({
        "status": 200,
        "message": "Successfully got user profile data",
        "body": {
            "firstName": first_name,
            "lastName": last_name,
            "createdAt": "2023-05-02T08:21:33.123Z",
            "email": "tony@stark.com",
            "id": "6450c8bd8e2b5c3a2c0e4f01",
            "updatedAt": "2023-05-04T10:05:12.456Z"
        }
    })
}
