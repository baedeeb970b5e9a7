//! HTTP client for the match sync API.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::sync::{CredentialStore, MatchUpload, SyncError, TokenPair};

/// Destination for completed match uploads.
#[async_trait]
pub trait MatchUploader: Send + Sync {
    /// Uploads one match.
    async fn upload_match(&self, upload: &MatchUpload) -> Result<(), SyncError>;
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh_token: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access_token: String,
}

/// Client for the sync API.
///
/// Authenticated requests carry the stored access token as a bearer token.
/// A 401 triggers one token refresh and one retry; a second rejection is
/// reported as [`SyncError::Unauthorized`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
    credentials: Arc<dyn CredentialStore>,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url`.
    #[instrument(skip(credentials))]
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialStore>) -> Self {
        info!("Creating API client");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
            credentials,
        }
    }

    /// Whether an access token is stored.
    pub fn is_logged_in(&self) -> Result<bool, SyncError> {
        Ok(self.credentials.load()?.is_some())
    }

    /// Logs in and stores the returned tokens.
    #[instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, SyncError> {
        let body = self
            .send("/auth/login", &Credentials { email, password }, None)
            .await?;
        let tokens: TokenPair = parse(&body)?;
        self.credentials.save(&tokens)?;
        info!("Logged in");
        Ok(tokens)
    }

    /// Creates an account, then logs in with it.
    #[instrument(skip(self, password))]
    pub async fn register(&self, email: &str, password: &str) -> Result<TokenPair, SyncError> {
        self.send("/auth/register", &Credentials { email, password }, None)
            .await?;
        info!("Account registered");
        self.login(email, password).await
    }

    /// Forgets stored tokens.
    #[instrument(skip(self))]
    pub fn logout(&self) -> Result<(), SyncError> {
        self.credentials.clear()
    }

    /// Exchanges the refresh token for a new access token and stores it.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<String, SyncError> {
        let tokens = self.credentials.load()?.ok_or(SyncError::Unauthorized)?;
        let body = self
            .send(
                "/auth/refresh",
                &RefreshRequest {
                    refresh_token: &tokens.refresh_token,
                },
                None,
            )
            .await?;
        let refreshed: RefreshResponse = parse(&body)?;
        self.credentials.save(&TokenPair::new(
            refreshed.access_token.clone(),
            tokens.refresh_token,
        ))?;
        debug!("Access token refreshed");
        Ok(refreshed.access_token)
    }

    /// Sends an authenticated POST, refreshing the token once on a 401.
    #[instrument(skip(self, payload))]
    async fn post_authenticated<B>(&self, path: &str, payload: &B) -> Result<String, SyncError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let tokens = self.credentials.load()?.ok_or(SyncError::Unauthorized)?;
        match self.send(path, payload, Some(&tokens.access_token)).await {
            Err(SyncError::Unauthorized) => {
                warn!("Access token rejected, refreshing");
                let access_token = self.refresh().await?;
                self.send(path, payload, Some(&access_token)).await
            }
            other => other,
        }
    }

    /// Sends one POST and maps the status to a result.
    async fn send<B>(&self, path: &str, payload: &B, bearer: Option<&str>) -> Result<String, SyncError>
    where
        B: Serialize + ?Sized + Sync,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, authenticated = bearer.is_some(), "Sending request");

        let mut request = self.client.post(&url).json(payload);
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            debug!(status = %status, "Request succeeded");
            return Ok(body);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(SyncError::Unauthorized);
        }
        warn!(status = %status, body = %body, "Request failed");
        Err(SyncError::Server {
            status: status.as_u16(),
            message: body,
        })
    }
}

fn parse<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, SyncError> {
    serde_json::from_str(body).map_err(|e| SyncError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl MatchUploader for ApiClient {
    #[instrument(skip(self, upload), fields(client_id = %upload.client_id))]
    async fn upload_match(&self, upload: &MatchUpload) -> Result<(), SyncError> {
        self.post_authenticated("/matches", upload).await?;
        info!("Match uploaded");
        Ok(())
    }
}
