//! HTTP client for the remote energy-data and auth service.

pub mod error;
pub mod models;

pub use error::ClientError;
pub use models::*;

use std::time::Duration;

use reqwest::{
    header::{HeaderMap, HeaderValue, USER_AGENT},
    Response,
};
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::{
    config::BackendConfig,
    session::{SessionContext, SessionStore},
};

#[derive(Clone)]
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
}

impl BackendClient {
    pub fn new(cfg: &BackendConfig) -> Result<Self, ClientError> {
        Self::with_base_url(cfg.base_url.clone(), Duration::from_secs(cfg.http_timeout_seconds))
    }

    pub fn with_base_url(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("home-energy-monitor/0.1"));
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;
        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    /// Fetch the household's consumption for `range` with the session's token.
    pub async fn fetch_energy_data<S: SessionStore>(
        &self,
        session: &SessionContext<S>,
        range: &DateRange,
    ) -> Result<EnergyDataResponse, ClientError> {
        let token = session.access_token().ok_or(ClientError::NotAuthenticated)?;

        let resp = self
            .client
            .get(self.url("/api/energy-data"))
            .bearer_auth(token)
            .query(range)
            .send()
            .await?;
        let data: EnergyDataResponse = read_json(resp, "Failed to fetch energy data").await?;
        debug!(
            household_id = data.household_id,
            points = data.timeseries_data.len(),
            "fetched energy data"
        );
        Ok(data)
    }

    /// Exchange credentials for a token and start the session.
    pub async fn login<S: SessionStore>(
        &self,
        session: &SessionContext<S>,
        email: &str,
        password: &str,
    ) -> Result<(), ClientError> {
        self.authenticate(session, email, password, "Login failed.").await
    }

    /// Create the account, then log in with the same credentials.
    pub async fn signup<S: SessionStore>(
        &self,
        session: &SessionContext<S>,
        form: &SignupForm,
    ) -> Result<(), ClientError> {
        form.validate()?;
        if !form.agree_terms {
            return Err(ClientError::TermsNotAccepted);
        }

        let resp = self
            .client
            .post(self.url("/auth/signup"))
            .json(form)
            .send()
            .await?;
        ensure_success(resp, "Failed to create account.").await?;
        info!(email = %form.email, "account created");

        self.authenticate(session, &form.email, &form.password, "Automatic login failed.")
            .await
    }

    async fn authenticate<S: SessionStore>(
        &self,
        session: &SessionContext<S>,
        email: &str,
        password: &str,
        fallback: &str,
    ) -> Result<(), ClientError> {
        let resp = self
            .client
            .post(self.url("/auth/login"))
            .json(&LoginRequest { email, password })
            .send()
            .await?;
        let token: TokenResponse = read_json(resp, fallback).await?;
        session.login(email, token.access_token);
        Ok(())
    }
}

async fn ensure_success(resp: Response, fallback: &str) -> Result<Response, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = resp
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.msg)
        .unwrap_or_else(|| fallback.to_string());
    warn!(status = status.as_u16(), %message, "backend request failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

async fn read_json<T: DeserializeOwned>(resp: Response, fallback: &str) -> Result<T, ClientError> {
    let resp = ensure_success(resp, fallback).await?;
    Ok(resp.json::<T>().await?)
}
