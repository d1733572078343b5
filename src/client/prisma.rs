//! Prisma Cloud API client implementation
//!
//! One client speaks to both surfaces: the CSPM API (login, accounts,
//! alerts, entitlement collections) and the CWP console (defenders,
//! discovery, images, console collections). The session token obtained
//! from `POST {cspm}/login` is sent as `x-redlock-auth` on every request.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::{debug, info, warn};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;

use super::api::{AuthApi, CollectionApi, ExportApi, ListingApi};
use super::models::{
    Alert, AlertCsvJob, AlertQuery, CloudAccount, ConfigItem, ConfigSearchRequest,
    ConfigSearchResponse, CspmCollection, CspmCollectionPage, CspmCollectionSpec, CwpCollection,
    CwpCollectionSpec, Defender, DiscoveryEntity, Image,
};
use super::pagination::{decode_page, PageOutcome, PageQuery};
use crate::config::Config;
use crate::error::{ApiError, Result};

/// Session token header used by both API surfaces.
const AUTH_HEADER: &str = "x-redlock-auth";

/// Client-side politeness limit, requests per second.
const RATE_LIMIT_PER_SECOND: u32 = 6;

/// Explicit request timeout; a hung console call must not block forever.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Which API surface a path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiBase {
    Cspm,
    Cwp,
}

/// Prisma Cloud API client.
pub struct PrismaClient {
    http: HttpClient,
    cspm_base: String,
    cwp_base: String,
    username: String,
    password: String,
    reauth_every: u64,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    session: Arc<RwLock<SessionState>>,
}

/// Internal session state.
///
/// The vendor token exposes no usable TTL, so staleness is assumed after
/// a fixed request count rather than measured against an expiry.
#[derive(Debug, Default)]
struct SessionState {
    token: Option<String>,
    requests_since_login: u64,
}

impl PrismaClient {
    /// Create a client from loaded configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let quota = Quota::per_second(std::num::NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap());
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            http,
            cspm_base: config.cspm_api_url.clone(),
            cwp_base: config.cwp_api_url.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
            reauth_every: config.reauth_every_pages,
            rate_limiter,
            session: Arc::new(RwLock::new(SessionState::default())),
        })
    }

    fn base_url(&self, base: ApiBase) -> &str {
        match base {
            ApiBase::Cspm => &self.cspm_base,
            ApiBase::Cwp => &self.cwp_base,
        }
    }

    /// Perform the login request and return the fresh token.
    ///
    /// Any failure here is `AuthFailed`: a missing `token` field must
    /// never degrade into a silently accepted empty credential.
    async fn perform_login(&self) -> Result<String> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}/login", self.cspm_base);
        let body = serde_json::json!({
            "username": self.username,
            "password": self.password,
        });

        let response = self
            .http
            .post(&url)
            .header("Content-Type", "application/json; charset=UTF-8")
            .header("Accept", "application/json; charset=UTF-8")
            .json(&body)
            .send()
            .await
            .map_err(|e| ApiError::AuthFailed(format!("login request failed: {e}")))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::AuthFailed(format!("unreadable login response: {e}")))?;

        if !status.is_success() {
            return Err(ApiError::AuthFailed(format!("login returned {status}")).into());
        }

        let parsed: Value = serde_json::from_str(&text)
            .map_err(|_| ApiError::AuthFailed("login response was not JSON".to_string()))?;

        match parsed.get("token").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => Ok(token.to_string()),
            _ => Err(ApiError::AuthFailed("no token field in login response".to_string()).into()),
        }
    }

    /// Store a fresh token, resetting the staleness counter.
    async fn store_token(&self, token: String) {
        let mut session = self.session.write().await;
        session.token = Some(token);
        session.requests_since_login = 0;
    }

    /// Current token, re-logging-in proactively every `reauth_every`
    /// requests or when no session exists yet.
    async fn token(&self) -> Result<String> {
        let mut session = self.session.write().await;

        let stale =
            session.token.is_none() || session.requests_since_login >= self.reauth_every;
        if stale {
            drop(session);
            let token = self.perform_login().await?;
            info!("session token refreshed");
            let mut session = self.session.write().await;
            session.token = Some(token.clone());
            session.requests_since_login = 1;
            return Ok(token);
        }

        session.requests_since_login += 1;
        Ok(session.token.clone().expect("token present when not stale"))
    }

    /// Send one authenticated request, classifying non-2xx statuses.
    ///
    /// A 401 triggers exactly one re-login and a retry of the same
    /// request; transient retry with backoff belongs to the caller
    /// (see [`crate::pipeline`]).
    async fn send(
        &self,
        method: Method,
        base: ApiBase,
        path: &str,
        body: Option<Value>,
    ) -> Result<reqwest::Response> {
        let url = format!("{}{}", self.base_url(base), path);
        let mut refreshed = false;

        loop {
            self.rate_limiter.until_ready().await;
            let token = self.token().await?;

            let mut request = self
                .http
                .request(method.clone(), &url)
                .header(AUTH_HEADER, &token)
                .header("Accept", "application/json");
            if let Some(ref json) = body {
                request = request.json(json);
            }

            let response = request.send().await.map_err(ApiError::from)?;
            let status = response.status();

            if status.is_success() {
                return Ok(response);
            }

            if status == StatusCode::UNAUTHORIZED && !refreshed {
                warn!("session rejected mid-run, re-authenticating");
                let token = self.perform_login().await?;
                self.store_token(token).await;
                refreshed = true;
                continue;
            }

            return Err(Self::status_error(status, response).await.into());
        }
    }

    /// Map a non-2xx response to the error taxonomy: 5xx and 429 are
    /// retryable, 4xx (other than the 401 handled above) are fatal.
    async fn status_error(status: StatusCode, response: reqwest::Response) -> ApiError {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::FORBIDDEN => ApiError::Forbidden,
            StatusCode::NOT_FOUND => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "resource not found".to_string());
                ApiError::NotFound(body)
            }
            StatusCode::TOO_MANY_REQUESTS => {
                let retry_after = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse::<u64>().ok())
                    .unwrap_or(60);
                ApiError::RateLimited(Duration::from_secs(retry_after))
            }
            status if status.is_server_error() => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| format!("server error {status}"));
                ApiError::Server(body)
            }
            _ => {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "bad request".to_string());
                ApiError::BadRequest(format!("{status}: {body}"))
            }
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, base: ApiBase, path: &str) -> Result<T> {
        let response = self.send(Method::GET, base, path, None).await?;
        let text = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("{path}: {e}")).into())
    }

    async fn request_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        base: ApiBase,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        let response = self.send(method, base, path, Some(body)).await?;
        let text = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&text)
            .map_err(|e| ApiError::Decode(format!("{path}: {e}")).into())
    }

    /// Submit a write whose response body is irrelevant.
    async fn request_ok<B: Serialize>(
        &self,
        method: Method,
        base: ApiBase,
        path: &str,
        body: &B,
    ) -> Result<()> {
        let body = serde_json::to_value(body)?;
        self.send(method, base, path, Some(body)).await?;
        Ok(())
    }

    /// Fetch one page of an offset-paginated array endpoint.
    async fn get_page<T: DeserializeOwned>(
        &self,
        base: ApiBase,
        path: &str,
    ) -> Result<PageOutcome<T>> {
        let response = self.send(Method::GET, base, path, None).await?;
        let text = response.text().await.map_err(ApiError::from)?;
        debug!("page fetch {path}: {} bytes", text.len());
        Ok(decode_page(&text)?)
    }

    async fn get_bytes(&self, base: ApiBase, path: &str) -> Result<Vec<u8>> {
        let response = self.send(Method::GET, base, path, None).await?;
        let bytes = response.bytes().await.map_err(ApiError::from)?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl AuthApi for PrismaClient {
    async fn authenticate(&self) -> Result<String> {
        self.perform_login().await
    }

    async fn login(&self) -> Result<()> {
        let token = self.perform_login().await?;
        self.store_token(token).await;
        info!("login successful");
        Ok(())
    }
}

#[async_trait]
impl ListingApi for PrismaClient {
    async fn defenders_page(&self, query: PageQuery) -> Result<PageOutcome<Defender>> {
        let path = format!("/api/v33.03/defenders?{}", query.to_query());
        self.get_page(ApiBase::Cwp, &path).await
    }

    async fn undefended_page(
        &self,
        provider: &str,
        query: PageQuery,
    ) -> Result<PageOutcome<DiscoveryEntity>> {
        let path = format!(
            "/api/v33.01/cloud/discovery/entities?provider={provider}&defended=false&{}",
            query.to_query()
        );
        self.get_page(ApiBase::Cwp, &path).await
    }

    async fn images_page(&self, query: PageQuery) -> Result<PageOutcome<Image>> {
        let path = format!("/api/v33.00/images?{}", query.to_query());
        self.get_page(ApiBase::Cwp, &path).await
    }

    async fn console_version(&self) -> Result<String> {
        let response = self
            .send(Method::GET, ApiBase::Cwp, "/api/v1/version", None)
            .await?;
        let text = response.text().await.map_err(ApiError::from)?;
        let version = text.trim().trim_matches('"').to_string();
        if version.is_empty() {
            return Err(ApiError::Decode("empty console version".to_string()).into());
        }
        Ok(version)
    }

    async fn list_accounts(&self) -> Result<Vec<CloudAccount>> {
        self.get_json(ApiBase::Cspm, "/cloud").await
    }

    async fn list_alerts(&self, query: &AlertQuery) -> Result<Vec<Alert>> {
        let path = format!("/v2/alert?{}", query.to_query());
        // The v2 endpoint answers either a bare array or an
        // `{"items": [...]}` envelope depending on tenant version.
        let value: Value = self.get_json(ApiBase::Cspm, &path).await?;
        let items = match value {
            Value::Array(_) => value,
            Value::Object(ref map) => map.get("items").cloned().unwrap_or(Value::Array(vec![])),
            _ => Value::Array(vec![]),
        };
        serde_json::from_value(items)
            .map_err(|e| ApiError::Decode(format!("alert list: {e}")).into())
    }

    async fn list_cspm_collections(&self) -> Result<Vec<CspmCollection>> {
        let page: CspmCollectionPage = self
            .get_json(ApiBase::Cspm, "/entitlement/api/v1/collection?page_size=500")
            .await?;
        Ok(page.value)
    }

    async fn list_cwp_collections(&self) -> Result<Vec<CwpCollection>> {
        self.get_json(ApiBase::Cwp, "/api/v1/collections").await
    }

    async fn search_config(&self, rql: &str, limit: usize) -> Result<Vec<ConfigItem>> {
        let request = ConfigSearchRequest::last_day(rql, limit);
        let response: ConfigSearchResponse = self
            .request_json(Method::POST, ApiBase::Cspm, "/search/api/v2/config", &request)
            .await?;
        Ok(response.items)
    }
}

#[async_trait]
impl CollectionApi for PrismaClient {
    async fn create_cspm_collection(&self, spec: &CspmCollectionSpec) -> Result<()> {
        self.request_ok(
            Method::POST,
            ApiBase::Cspm,
            "/entitlement/api/v1/collection",
            spec,
        )
        .await
    }

    async fn update_cspm_collection(&self, id: &str, spec: &CspmCollectionSpec) -> Result<()> {
        let path = format!("/entitlement/api/v1/collection/{id}");
        self.request_ok(Method::PUT, ApiBase::Cspm, &path, spec).await
    }

    async fn create_cwp_collection(&self, spec: &CwpCollectionSpec) -> Result<()> {
        self.request_ok(Method::POST, ApiBase::Cwp, "/api/v1/collections", spec)
            .await
    }

    async fn update_cwp_collection(&self, name: &str, spec: &CwpCollectionSpec) -> Result<()> {
        let path = format!("/api/v1/collections/{name}");
        self.request_ok(Method::PUT, ApiBase::Cwp, &path, spec).await
    }
}

#[async_trait]
impl ExportApi for PrismaClient {
    async fn submit_alert_csv(&self) -> Result<AlertCsvJob> {
        self.request_json(
            Method::POST,
            ApiBase::Cspm,
            "/alert/csv",
            &serde_json::json!({}),
        )
        .await
    }

    async fn alert_csv_status(&self, job: &AlertCsvJob) -> Result<AlertCsvJob> {
        // statusUri may come back absolute; reduce it to a path so the
        // shared request plumbing attaches the auth header.
        let path = match job.status_uri {
            Some(ref uri) => uri
                .strip_prefix(&self.cspm_base)
                .unwrap_or(uri)
                .to_string(),
            None => format!("/alert/csv/{}/status", job.id),
        };
        self.get_json(ApiBase::Cspm, &path).await
    }

    async fn download_alert_csv(&self, job_id: &str) -> Result<Vec<u8>> {
        let path = format!("/alert/csv/{job_id}/download");
        self.get_bytes(ApiBase::Cspm, &path).await
    }
}
