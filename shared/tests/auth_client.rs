mod common;

use common::{client, profile_body, FakeTransport};
use serde_json::json;
use shared::client::{ApiError, Method};
use shared::epoch::RequestEpoch;
use shared::guard::{navigate, Navigation, Route};
use shared::session::{SessionCommand, SessionStore};
use shared::{LoginFieldErrors, UserCredentials, UserName};

#[tokio::test]
async fn test_login_sets_token_and_opens_profile() -> anyhow::Result<()> {
    let transport = FakeTransport::default();
    transport.respond(
        200,
        json!({"status": 200, "message": "User successfully logged in", "body": {"token": "T1"}}),
    );
    let client = client(&transport);
    let store = SessionStore::default();
    assert!(matches!(
        navigate(store.session(), Route::Profile),
        Navigation::Redirect { to: Route::Login, .. }
    ));

    let token = client
        .login(&UserCredentials::new("tony@stark.com", "password123"))
        .await?;
    let store = store.reduce(SessionCommand::SetToken(token));

    assert_eq!(store.session().token, "T1");
    assert_eq!(navigate(store.session(), Route::Profile), Navigation::Permit);

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url.as_str(), "http://localhost:3001/api/v1/user/login");
    assert_eq!(request.bearer, None);
    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap_or(""))?;
    assert_eq!(
        body,
        json!({"email": "tony@stark.com", "password": "password123"})
    );
    Ok(())
}

#[tokio::test]
async fn test_login_user_not_found_blames_email_field() -> anyhow::Result<()> {
    let transport = FakeTransport::default();
    transport.respond(400, json!({"message": "User not found"}));
    let client = client(&transport);

    let mut errors = LoginFieldErrors {
        email: String::new(),
        password: "stale message".to_owned(),
    };
    let error = client
        .login(&UserCredentials::new("nobody@stark.com", "password123"))
        .await
        .expect_err("login must fail");

    assert!(matches!(error, ApiError::Response { status: 400, .. }));
    assert!(errors.apply_login_error(&error));
    assert_eq!(errors.email, "User not found");
    assert_eq!(errors.password, "");
    Ok(())
}

#[tokio::test]
async fn test_login_invalid_password_blames_password_field() -> anyhow::Result<()> {
    let transport = FakeTransport::default();
    transport.respond(
        400,
        json!({"status": 400, "message": "Error: Password is invalid"}),
    );
    let client = client(&transport);

    let mut errors = LoginFieldErrors {
        email: "stale message".to_owned(),
        password: String::new(),
    };
    let error = client
        .login(&UserCredentials::new("tony@stark.com", "wrongpass1"))
        .await
        .expect_err("login must fail");

    assert!(errors.apply_login_error(&error));
    assert_eq!(errors.email, "");
    assert_eq!(errors.password, "Error: Password is invalid");
    Ok(())
}

#[tokio::test]
async fn test_unclassified_login_errors_leave_fields_untouched() -> anyhow::Result<()> {
    let transport = FakeTransport::default();
    transport
        .respond(500, json!({"status": 500, "message": "Internal Server Error"}))
        .fail("connection refused");
    let client = client(&transport);
    let credentials = UserCredentials::new("tony@stark.com", "password123");
    let mut errors = LoginFieldErrors {
        email: "kept".to_owned(),
        password: String::new(),
    };

    let response_error = client.login(&credentials).await.expect_err("500");
    assert!(!errors.apply_login_error(&response_error));

    let transport_error = client.login(&credentials).await.expect_err("no response");
    assert!(matches!(transport_error, ApiError::Transport(_)));
    assert!(!errors.apply_login_error(&transport_error));

    assert_eq!(errors.email, "kept");
    assert_eq!(errors.password, "");
    Ok(())
}

#[tokio::test]
async fn test_login_with_invalid_token_commits_nothing() -> anyhow::Result<()> {
    let transport = FakeTransport::default();
    transport
        .respond(200, json!({"status": 200, "body": {"token": 42}}))
        .respond(200, json!({"status": 200, "message": "ok"}));
    let client = client(&transport);
    let credentials = UserCredentials::new("tony@stark.com", "password123");
    let store = SessionStore::default();

    // Non-string token, then no body at all
    for _ in 0..2 {
        let result = client.login(&credentials).await;
        assert!(matches!(result, Err(ApiError::Schema(_))), "{result:?}");
    }
    assert!(!store.is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_fetch_profile_projects_names() -> anyhow::Result<()> {
    let transport = FakeTransport::default();
    transport.respond(200, profile_body("Tony", "Stark"));
    let client = client(&transport);
    let store = SessionStore::default().reduce(SessionCommand::SetToken("T1".to_owned()));

    let profile = client.fetch_profile(&store.session().token).await?;
    assert_eq!(profile.email, "tony@stark.com");
    let store = store.reduce(SessionCommand::SetUserName(profile.user_name()));
    assert_eq!(*store.memoized_user(), UserName::new("Tony", "Stark"));

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url.path(), "/api/v1/user/profile");
    assert_eq!(request.bearer.as_deref(), Some("T1"));
    assert_eq!(request.body, None);
    Ok(())
}

#[tokio::test]
async fn test_fetch_profile_without_token_sends_no_bearer() -> anyhow::Result<()> {
    let transport = FakeTransport::default();
    transport.respond(401, json!({"status": 401, "message": "Unauthorized"}));
    let client = client(&transport);

    let error = client.fetch_profile("").await.expect_err("unauthorized");
    match error {
        ApiError::Response { status, message, .. } => {
            assert_eq!(status, 401);
            assert_eq!(message.as_deref(), Some("Unauthorized"));
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(transport.requests()[0].bearer, None);
    Ok(())
}

#[tokio::test]
async fn test_profile_failing_schema_is_rejected() -> anyhow::Result<()> {
    let mut bad_date = profile_body("Tony", "Stark");
    bad_date["body"]["createdAt"] = json!("yesterday");
    let mut bad_email = profile_body("Tony", "Stark");
    bad_email["body"]["email"] = json!("tony");
    let mut missing_name = profile_body("Tony", "Stark");
    missing_name["body"]
        .as_object_mut()
        .expect("profile body is an object")
        .remove("lastName");

    let transport = FakeTransport::default();
    transport
        .respond(200, bad_date)
        .respond(200, bad_email)
        .respond(200, missing_name)
        .respond_raw(200, "<html>");
    let client = client(&transport);
    let store = SessionStore::default().reduce(SessionCommand::SetToken("T1".to_owned()));

    for _ in 0..4 {
        let result = client.fetch_profile(&store.session().token).await;
        assert!(matches!(result, Err(ApiError::Schema(_))), "{result:?}");
    }
    assert_eq!(*store.session().user_name, UserName::default());
    Ok(())
}

#[tokio::test]
async fn test_update_profile_then_edit_user_name() -> anyhow::Result<()> {
    let transport = FakeTransport::default();
    transport
        .respond(200, profile_body("Jane", "Doe"))
        .respond(200, json!({"status": 200, "message": "ok"}));
    let client = client(&transport);
    let store = SessionStore::default().reduce(SessionCommand::SetToken("T1".to_owned()));
    let edited = UserName::new("Jane", "Doe");

    let updated = client.update_profile("T1", &edited).await?;
    assert_eq!(updated, edited);
    let store = store.reduce(SessionCommand::EditUserName(updated));
    let first = store.memoized_user();
    assert_eq!(*first, UserName::new("Jane", "Doe"));
    assert!(std::rc::Rc::ptr_eq(&first, &store.memoized_user()));

    // A response without body echoes the submitted names
    let echoed = client.update_profile("T1", &UserName::new("Mary", "Jo")).await?;
    assert_eq!(echoed, UserName::new("Mary", "Jo"));

    let request = &transport.requests()[0];
    assert_eq!(request.method, Method::Put);
    assert_eq!(request.bearer.as_deref(), Some("T1"));
    let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap_or(""))?;
    assert_eq!(body, json!({"firstName": "Jane", "lastName": "Doe"}));
    Ok(())
}

#[tokio::test]
async fn test_rejected_update_keeps_user_name() -> anyhow::Result<()> {
    let transport = FakeTransport::default();
    transport.respond(
        401,
        json!({"status": 401, "message": "Invalid token"}),
    );
    let client = client(&transport);
    let store = SessionStore::default()
        .reduce(SessionCommand::SetToken("T1".to_owned()))
        .reduce(SessionCommand::SetUserName(UserName::new("Tony", "Stark")));
    let before = store.memoized_user();

    let store = match client
        .update_profile("T1", &UserName::new("Jane", "Doe"))
        .await
    {
        Ok(updated) => store.reduce(SessionCommand::EditUserName(updated)),
        Err(error) => {
            assert!(matches!(error, ApiError::Response { status: 401, .. }));
            store
        }
    };

    assert_eq!(*store.memoized_user(), UserName::new("Tony", "Stark"));
    assert!(std::rc::Rc::ptr_eq(&before, &store.memoized_user()));
    Ok(())
}

#[tokio::test]
async fn test_superseded_response_is_dropped() -> anyhow::Result<()> {
    let transport = FakeTransport::default();
    transport
        .respond(200, profile_body("Old", "Name"))
        .respond(200, profile_body("New", "Name"));
    let client = client(&transport);
    let epoch = RequestEpoch::default();
    let mut store = SessionStore::default().reduce(SessionCommand::SetToken("T1".to_owned()));

    let stale_ticket = epoch.begin();
    let stale = client.fetch_profile("T1").await?;
    let fresh_ticket = epoch.begin();
    let fresh = client.fetch_profile("T1").await?;

    for (ticket, profile) in [(stale_ticket, stale), (fresh_ticket, fresh)] {
        if ticket.is_current() {
            store = store.reduce(SessionCommand::SetUserName(profile.user_name()));
        }
    }
    assert_eq!(*store.memoized_user(), UserName::new("New", "Name"));
    Ok(())
}

#[test]
fn test_base_url_with_trailing_slash() {
    let transport = FakeTransport::default();
    let client = shared::client::AuthClient::new("http://bank.test/api/v1/user/", transport)
        .expect("valid url");
    assert_eq!(client.base_url().as_str(), "http://bank.test/api/v1/user/");

    let invalid = shared::client::AuthClient::new("not a url", FakeTransport::default());
    assert!(matches!(invalid, Err(ApiError::InvalidEndpoint(_))));
}
