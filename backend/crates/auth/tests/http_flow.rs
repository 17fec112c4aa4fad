//! End-to-end tests of the auth router over the in-memory credential store.

use std::sync::Arc;

use auth::models::user_id::UserId;
use auth::{AuthConfig, InMemoryUserRepository, TokenService, auth_router_generic};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

const PASSWORD: &str = "Abcd123!";

struct TestApp {
    router: Router,
    repo: InMemoryUserRepository,
    tokens: TokenService,
}

impl TestApp {
    fn new() -> Self {
        let config = AuthConfig::new("access-secret-for-tests", "refresh-secret-for-tests")
            .unwrap()
            .with_test_bcrypt_cost();
        let repo = InMemoryUserRepository::new();

        Self {
            router: auth_router_generic(repo.clone(), config.clone()),
            repo,
            tokens: TokenService::new(Arc::new(config)),
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, Some(body), None).await
    }

    async fn signup(&self, name: &str, email: &str, password: &str) -> (StatusCode, Value) {
        self.post(
            "/signup",
            json!({ "name": name, "email": email, "password": password }),
        )
        .await
    }

    async fn login(&self, email: &str, password: &str) -> (StatusCode, Value) {
        self.post("/login", json!({ "email": email, "password": password }))
            .await
    }

    /// Sign up Ann and log in; returns (access, refresh)
    async fn ann_session(&self) -> (String, String) {
        let (status, _) = self.signup("Ann", "ANN@x.com", PASSWORD).await;
        assert_eq!(status, StatusCode::CREATED);
        self.login_ann().await
    }

    async fn login_ann(&self) -> (String, String) {
        let (status, body) = self.login("ann@x.com", PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
        (
            body["accessToken"].as_str().unwrap().to_string(),
            body["refreshToken"].as_str().unwrap().to_string(),
        )
    }

    async fn refresh(&self, refresh_token: &str) -> (StatusCode, Value) {
        self.post("/refresh", json!({ "refreshToken": refresh_token }))
            .await
    }

    async fn logout(&self, refresh_token: &str) -> (StatusCode, Value) {
        self.post("/logout", json!({ "refreshToken": refresh_token }))
            .await
    }

    async fn profile(&self, access_token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, "/profile", None, access_token).await
    }
}

#[tokio::test]
async fn signup_login_profile_scenario() {
    let app = TestApp::new();

    let (status, body) = app.signup("Ann", "ANN@x.com", PASSWORD).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "User registered successfully");
    assert!(UserId::parse_str(body["userId"].as_str().unwrap()).is_ok());

    let (status, body) = app.login("ann@x.com", PASSWORD).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Login Successful");
    let access = body["accessToken"].as_str().unwrap();
    assert!(body["refreshToken"].as_str().is_some());

    let (status, body) = app.profile(Some(access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "name": "Ann", "email": "ann@x.com" }));
}

#[tokio::test]
async fn long_names_round_trip_through_the_profile() {
    let app = TestApp::new();
    let name = "Ann Marie ".repeat(30);

    let (status, _) = app.signup(&name, "ann@x.com", PASSWORD).await;
    assert_eq!(status, StatusCode::CREATED);

    let (access, _) = app.login_ann().await;
    let (status, body) = app.profile(Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], name.trim());
}

#[tokio::test]
async fn wrong_password_and_unknown_email_look_the_same() {
    let app = TestApp::new();
    app.signup("Ann", "ann@x.com", PASSWORD).await;

    let (wrong_status, wrong_body) = app.login("ann@x.com", "Abcd1234!").await;
    let (unknown_status, unknown_body) = app.login("bob@x.com", PASSWORD).await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_body["message"], "Invalid email or password");
    assert_eq!(unknown_status, wrong_status);
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn weak_passwords_are_rejected_without_creating_a_user() {
    let app = TestApp::new();

    // too short, no uppercase, no lowercase, no digit, no special character
    for password in ["Ab1!", "abcd123!", "ABCD123!", "Abcdefg!", "Abcd1234"] {
        let (status, body) = app.signup("Ann", "ann@x.com", password).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "password: {password}");
        assert!(
            body["message"]
                .as_str()
                .unwrap()
                .starts_with("Password must be at least 8 characters"),
        );
    }

    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn signup_validation_errors() {
    let app = TestApp::new();

    let (status, body) = app.signup("  ", "ann@x.com", PASSWORD).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");

    let (status, body) = app.post("/signup", json!({ "name": "Ann" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");

    let (status, body) = app.signup("Ann", "ann.x.com", PASSWORD).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email format");

    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::POST)
        .uri("/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_email_conflicts_case_insensitively() {
    let app = TestApp::new();

    let (status, _) = app.signup("Ann", "ann@x.com", PASSWORD).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app.signup("Other Ann", " Ann@X.com ", PASSWORD).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "User already exists");
    assert_eq!(app.repo.len().await, 1);
}

#[tokio::test]
async fn login_requires_both_fields() {
    let app = TestApp::new();

    let (status, body) = app.login("ann@x.com", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");

    let (status, body) = app.login("not-an-email", PASSWORD).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Invalid email format");
}

#[tokio::test]
async fn refresh_issues_a_working_access_token() {
    let app = TestApp::new();
    let (_, refresh) = app.ann_session().await;

    let (status, body) = app.refresh(&refresh).await;
    assert_eq!(status, StatusCode::OK);
    let access = body["accessToken"].as_str().unwrap();

    let (status, _) = app.profile(Some(access)).await;
    assert_eq!(status, StatusCode::OK);

    // not rotated: the same refresh token keeps working
    let (status, _) = app.refresh(&refresh).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn second_login_supersedes_first_refresh_token() {
    let app = TestApp::new();
    let (_, first) = app.ann_session().await;
    let (_, second) = app.login_ann().await;
    assert_ne!(first, second);

    let (status, body) = app.refresh(&first).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Refresh token not recognized");

    let (status, _) = app.refresh(&second).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn refresh_for_unknown_user_is_forbidden() {
    let app = TestApp::new();

    let orphan = app.tokens.issue_refresh_token(&UserId::new()).unwrap();
    let (status, _) = app.refresh(&orphan).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn refresh_rejects_missing_and_invalid_tokens() {
    let app = TestApp::new();
    let (access, _) = app.ann_session().await;

    let (status, body) = app.post("/refresh", json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Refresh Token required");

    let (status, body) = app.refresh("garbage").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid or expired refresh token");

    // an access token is signed with the other secret
    let (status, _) = app.refresh(&access).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn null_fields_are_reported_like_missing_ones() {
    let app = TestApp::new();

    let (status, body) = app.post("/refresh", json!({ "refreshToken": null })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Refresh Token required");

    let (status, body) = app.post("/logout", json!({ "refreshToken": null })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Refresh token required");

    let (status, body) = app
        .post(
            "/signup",
            json!({ "name": null, "email": "ann@x.com", "password": PASSWORD }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");

    let (status, body) = app
        .post("/login", json!({ "email": "ann@x.com", "password": null }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "All fields are required");

    assert!(app.repo.is_empty().await);
}

#[tokio::test]
async fn logout_revokes_the_refresh_token() {
    let app = TestApp::new();
    let (access, refresh) = app.ann_session().await;

    let (status, body) = app.logout(&refresh).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out successfully");

    let (status, _) = app.refresh(&refresh).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // access tokens stay valid until they expire
    let (status, _) = app.profile(Some(&access)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn stale_logout_does_not_end_newer_session() {
    let app = TestApp::new();
    let (_, first) = app.ann_session().await;
    let (_, second) = app.login_ann().await;

    let (status, _) = app.logout(&first).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app.refresh(&second).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn logout_error_codes() {
    let app = TestApp::new();

    let (status, body) = app.post("/logout", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "Refresh token required");

    let (status, _) = app.logout("garbage").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let orphan = app.tokens.issue_refresh_token(&UserId::new()).unwrap();
    let (status, body) = app.logout(&orphan).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}

#[tokio::test]
async fn profile_requires_a_valid_bearer_token() {
    let app = TestApp::new();
    let (_, refresh) = app.ann_session().await;

    let (status, body) = app.profile(None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Access Denied!!! Invalid token");

    let (status, body) = app.profile(Some("garbage")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");

    // a refresh token is not an access token
    let (status, _) = app.profile(Some(&refresh)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let request = Request::builder()
        .uri("/profile")
        .header(header::AUTHORIZATION, "Token abc")
        .body(Body::empty())
        .unwrap();
    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_of_deleted_user_is_not_found() {
    let app = TestApp::new();
    let (access, _) = app.ann_session().await;

    let user_id = app.tokens.verify_user(&access, auth::TokenKind::Access).unwrap();
    app.repo.remove(&user_id).await;

    let (status, body) = app.profile(Some(&access)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User not found");
}
