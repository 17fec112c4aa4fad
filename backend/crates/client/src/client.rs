//! Auth Client
//!
//! Talks to `/auth/*` under a base URL such as `http://localhost:5000/api`.
//! Authorized requests carry `Authorization: Bearer <access token>`; a 401
//! triggers exactly one refresh of the access token and one retry.

use reqwest::{Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::error::{ClientError, ClientResult};
use crate::store::{MemoryTokenStore, StoredTokens, TokenStore};
use crate::validation::{
    FIELDS_REQUIRED_MESSAGE, INVALID_EMAIL_MESSAGE, WEAK_PASSWORD_MESSAGE, is_strong_password,
    is_valid_email, normalize_email,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupResponse {
    pub message: String,
    pub user_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginBody {
    #[serde(default)]
    access_token: String,
    #[serde(default)]
    refresh_token: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefreshBody {
    access_token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenBody<'a> {
    refresh_token: &'a str,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

pub struct AuthClient<S = MemoryTokenStore> {
    http: reqwest::Client,
    base_url: String,
    store: S,
}

impl AuthClient<MemoryTokenStore> {
    /// Client with an in-memory token store
    pub fn in_memory(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::new(base_url, MemoryTokenStore::new())
    }
}

impl<S> AuthClient<S>
where
    S: TokenStore,
{
    pub fn new(base_url: impl Into<String>, store: S) -> ClientResult<Self> {
        let http = reqwest::Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self::with_http_client(base_url, store, http))
    }

    pub fn with_http_client(base_url: impl Into<String>, store: S, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_logged_in(&self) -> ClientResult<bool> {
        Ok(self.store.load()?.is_some())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ========================================================================
    // Unauthenticated calls
    // ========================================================================

    /// POST /auth/signup
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<SignupResponse> {
        let name = name.trim();
        let email = normalize_email(email);

        if name.is_empty() || email.is_empty() || password.is_empty() {
            return Err(ClientError::Validation(FIELDS_REQUIRED_MESSAGE));
        }
        if !is_valid_email(&email) {
            return Err(ClientError::Validation(INVALID_EMAIL_MESSAGE));
        }
        if !is_strong_password(password) {
            return Err(ClientError::Validation(WEAK_PASSWORD_MESSAGE));
        }

        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(&json!({ "name": name, "email": email, "password": password }))
            .send()
            .await?;

        parse(response).await
    }

    /// POST /auth/login; stores the token pair on success
    pub async fn login(&self, email: &str, password: &str) -> ClientResult<()> {
        let email = normalize_email(email);

        if email.is_empty() || password.is_empty() {
            return Err(ClientError::Validation(FIELDS_REQUIRED_MESSAGE));
        }
        if !is_valid_email(&email) {
            return Err(ClientError::Validation(INVALID_EMAIL_MESSAGE));
        }

        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;

        let body: LoginBody = parse(response).await?;
        if body.access_token.is_empty() || body.refresh_token.is_empty() {
            return Err(ClientError::InvalidResponse(
                "Login response is invalid. Please try again.",
            ));
        }

        self.store.save(&StoredTokens {
            access_token: body.access_token,
            refresh_token: body.refresh_token,
        })?;

        tracing::debug!("Logged in");
        Ok(())
    }

    /// POST /auth/refresh; stores and returns the new access token
    pub async fn refresh(&self) -> ClientResult<String> {
        let tokens = self.store.load()?.ok_or(ClientError::NotLoggedIn)?;

        let response = self
            .http
            .post(self.url("/auth/refresh"))
            .json(&RefreshTokenBody {
                refresh_token: &tokens.refresh_token,
            })
            .send()
            .await?;

        let body: RefreshBody = parse(response).await?;
        self.store.set_access_token(body.access_token.clone())?;

        Ok(body.access_token)
    }

    /// POST /auth/logout
    ///
    /// Local tokens are cleared even if the server call fails.
    pub async fn logout(&self) -> ClientResult<()> {
        let Some(tokens) = self.store.load()? else {
            return Ok(());
        };
        self.store.clear()?;

        let response = self
            .http
            .post(self.url("/auth/logout"))
            .json(&RefreshTokenBody {
                refresh_token: &tokens.refresh_token,
            })
            .send()
            .await?;

        let _: Value = parse(response).await?;

        tracing::debug!("Logged out");
        Ok(())
    }

    // ========================================================================
    // Authorized calls
    // ========================================================================

    /// GET /auth/profile
    pub async fn profile(&self) -> ClientResult<Profile> {
        self.send(Method::GET, "/auth/profile", None).await
    }

    /// Authorized request with one refresh-and-retry on 401
    ///
    /// If the refresh itself is rejected the stored tokens are dropped and
    /// `SessionExpired` is returned. Transport failures leave them in place.
    pub async fn send<T>(&self, method: Method, path: &str, body: Option<&Value>) -> ClientResult<T>
    where
        T: DeserializeOwned,
    {
        let tokens = self.store.load()?.ok_or(ClientError::NotLoggedIn)?;

        let response = self
            .authorized(method.clone(), path, body, &tokens.access_token)
            .await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            return parse(response).await;
        }

        tracing::debug!(path, "Access token rejected, refreshing");

        let access_token = match self.refresh().await {
            Ok(token) => token,
            Err(ClientError::Api { status, .. }) => {
                tracing::debug!(status, "Refresh rejected, dropping session");
                self.store.clear()?;
                return Err(ClientError::SessionExpired);
            }
            Err(e) => return Err(e),
        };

        let response = self.authorized(method, path, body, &access_token).await?;
        parse(response).await
    }

    async fn authorized(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        access_token: &str,
    ) -> ClientResult<Response> {
        let mut request = self
            .http
            .request(method, self.url(path))
            .bearer_auth(access_token);
        if let Some(body) = body {
            request = request.json(body);
        }

        Ok(request.send().await?)
    }
}

/// Decode a success body, or turn the status and `message` into an error
async fn parse<T>(response: Response) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);

    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
