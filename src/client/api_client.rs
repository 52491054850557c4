use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response};
use std::time::Duration;

use crate::api::models::{AuthIn, AuthResponse, ErrorBody, HealthResponse, MatchIn, ResetResponse};
use crate::client::session::SessionStore;
use crate::domain::{rank_players, Match, Player, RankedPlayer, WeekInfo, WeeklyArchive};

const TIMEOUT_SECS: u64 = 30;

/// Thin client over the REST surface. Holds an explicit session store
/// for the bearer token; every call is a single request with no retry.
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: SessionStore,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, session: SessionStore) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            base_url: base_url.into(),
            session,
        })
    }

    pub fn session(&self) -> &SessionStore {
        &self.session
    }

    pub async fn health(&self) -> Result<HealthResponse> {
        let response = self
            .http
            .get(self.url("/healthz"))
            .send()
            .await
            .context("Failed to send health request")?;
        Self::parse(response, "API Error").await
    }

    pub async fn list_players(&self) -> Result<Vec<Player>> {
        let response = self
            .http
            .get(self.url("/api/players"))
            .send()
            .await
            .context("Failed to send players request")?;
        Self::parse(response, "Failed to fetch players").await
    }

    pub async fn create_player(&self, name: &str, email: Option<&str>) -> Result<Player> {
        let body = serde_json::json!({ "name": name, "email": email });
        let response = self
            .http
            .post(self.url("/api/players"))
            .json(&body)
            .send()
            .await
            .context("Failed to send create-player request")?;
        Self::parse(response, "Failed to create player").await
    }

    pub async fn list_matches(&self) -> Result<Vec<Match>> {
        let response = self
            .http
            .get(self.url("/api/matches"))
            .send()
            .await
            .context("Failed to send matches request")?;
        Self::parse(response, "Failed to fetch matches").await
    }

    /// Most recent matches, capped for display
    pub async fn recent_matches(&self, limit: usize) -> Result<Vec<Match>> {
        let mut matches = self.list_matches().await?;
        matches.truncate(limit);
        Ok(matches)
    }

    /// The live leaderboard: players ranked by points with win rates
    pub async fn leaderboard(&self) -> Result<Vec<RankedPlayer>> {
        Ok(rank_players(self.list_players().await?))
    }

    pub async fn create_match(&self, input: &MatchIn) -> Result<Match> {
        let request = self.http.post(self.url("/api/matches")).json(input);
        let response = self
            .with_auth(request)
            .send()
            .await
            .context("Failed to send create-match request")?;
        Self::parse(response, "Failed to create match").await
    }

    /// Register a new player; the returned token and profile are stored
    /// in the session
    pub async fn register(&mut self, name: &str, email: &str) -> Result<AuthResponse> {
        let payload = AuthIn {
            name: name.to_string(),
            email: email.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/auth/register"))
            .json(&payload)
            .send()
            .await
            .context("Failed to send register request")?;

        let auth: AuthResponse = Self::parse(response, "Failed to register").await?;
        self.session
            .set(auth.access_token.clone(), auth.player.clone())?;
        Ok(auth)
    }

    pub async fn login(&mut self, name: &str, email: &str) -> Result<AuthResponse> {
        let payload = AuthIn {
            name: name.to_string(),
            email: email.to_string(),
        };
        let response = self
            .http
            .post(self.url("/api/auth/login"))
            .json(&payload)
            .send()
            .await
            .context("Failed to send login request")?;

        let auth: AuthResponse = Self::parse(response, "Failed to login").await?;
        self.session
            .set(auth.access_token.clone(), auth.player.clone())?;
        Ok(auth)
    }

    /// Drop the stored token and profile
    pub fn logout(&mut self) -> Result<()> {
        self.session.clear()
    }

    pub async fn me(&self) -> Result<Player> {
        let request = self.http.get(self.url("/api/auth/users/me"));
        let response = self
            .with_auth(request)
            .send()
            .await
            .context("Failed to send current-user request")?;
        Self::parse(response, "Failed to fetch current user").await
    }

    pub async fn list_archived_weeks(&self) -> Result<Vec<WeekInfo>> {
        let response = self
            .http
            .get(self.url("/api/archives/weeks"))
            .send()
            .await
            .context("Failed to send archived-weeks request")?;
        Self::parse(response, "Failed to fetch archived weeks").await
    }

    pub async fn archived_leaderboard(&self, week_start: &str) -> Result<Vec<WeeklyArchive>> {
        let url = self.url(&format!("/api/archives/weeks/{}/leaderboard", week_start));
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("Failed to send archived-leaderboard request")?;
        Self::parse(response, "Failed to fetch weekly leaderboard").await
    }

    pub async fn trigger_reset(&self) -> Result<ResetResponse> {
        let request = self.http.post(self.url("/api/archives/reset"));
        let response = self
            .with_auth(request)
            .send()
            .await
            .context("Failed to send reset request")?;
        Self::parse(response, "Failed to trigger reset").await
    }

    // --- Helper Methods ---

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the bearer header when a session token is available
    fn with_auth(&self, request: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Decode a success body, or surface the server's `detail` message,
    /// falling back to a generic one when the body has none
    async fn parse<T: serde::de::DeserializeOwned>(
        response: Response,
        fallback: &str,
    ) -> Result<T> {
        if response.status().is_success() {
            return response
                .json()
                .await
                .context("Failed to decode response body");
        }

        let detail = response
            .json::<ErrorBody>()
            .await
            .map(|body| body.detail)
            .unwrap_or_else(|_| fallback.to_string());
        anyhow::bail!(detail)
    }
}

impl super::archives::LeaderboardSource for ApiClient {
    fn fetch_week(
        &self,
        week_start: &str,
    ) -> impl std::future::Future<Output = Result<Vec<WeeklyArchive>>> + Send {
        self.archived_leaderboard(week_start)
    }
}
