//! Endor Labs API client implementation

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::{Client as HttpClient, Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use tokio::sync::RwLock;

use super::EndorApi;
use super::models::{Credential, QueryKind, QueryPage, QueryRequest, QueryResponse, SessionToken};
use crate::error::{ApiError, Result};

/// Endor Labs API host
pub const API_HOST: &str = "https://api.endorlabs.com";

const AUTH_TIMEOUT: Duration = Duration::from_secs(60);
const QUERY_TIMEOUT: Duration = Duration::from_secs(600);
const DELETE_TIMEOUT: Duration = Duration::from_secs(60);

/// The backend rejects some default client user agents.
const CLIENT_USER_AGENT: &str = "curl/7.68.0";
const REQUEST_TIMEOUT_HEADER: &str = "Request-Timeout";

/// Endor Labs API client.
///
/// Built once per run. The session token is set after [`EndorApi::authenticate`]
/// and attached to every later request; it is never refreshed.
pub struct EndorClient {
    http: HttpClient,
    base_url: String,
    token: Arc<RwLock<Option<SessionToken>>>,
}

impl EndorClient {
    /// Create a client for the given API host (e.g. `https://api.endorlabs.com`).
    pub fn new(api_host: &str) -> Result<Self> {
        let http = HttpClient::builder()
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: format!("{}/v1", api_host.trim_end_matches('/')),
            token: Arc::new(RwLock::new(None)),
        })
    }

    /// Set the session token used for authorized requests
    pub async fn set_token(&self, token: SessionToken) {
        *self.token.write().await = Some(token);
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Start a request carrying the bearer token and client headers.
    async fn authorized(&self, method: Method, url: &str) -> Result<RequestBuilder> {
        let token = self.token.read().await;
        let token = token.as_ref().ok_or(ApiError::MissingToken)?;

        Ok(self
            .http
            .request(method, url)
            .header(USER_AGENT, CLIENT_USER_AGENT)
            .header(ACCEPT, "*/*")
            .header(AUTHORIZATION, format!("Bearer {}", token.as_str()))
            .header(REQUEST_TIMEOUT_HEADER, QUERY_TIMEOUT.as_secs().to_string()))
    }
}

/// Read a response body for error reporting without failing the caller.
async fn body_text(response: reqwest::Response) -> String {
    response
        .text()
        .await
        .unwrap_or_else(|e| format!("<unreadable body: {}>", e))
}

#[async_trait]
impl EndorApi for EndorClient {
    async fn authenticate(&self, credential: &Credential) -> Result<SessionToken> {
        #[derive(Deserialize)]
        struct LoginResponse {
            #[serde(default)]
            token: Option<String>,
        }

        let url = self.url("/auth/api-key");
        debug!("POST {}", url);

        let response = self
            .http
            .post(&url)
            .header(REQUEST_TIMEOUT_HEADER, AUTH_TIMEOUT.as_secs().to_string())
            .json(credential)
            .timeout(AUTH_TIMEOUT)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        let body = body_text(response).await;
        if status != StatusCode::OK {
            return Err(ApiError::AuthFailed {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let login: LoginResponse = serde_json::from_str(&body).map_err(|e| {
            ApiError::InvalidResponse(format!(
                "Failed to parse login response: {}. Body was: {}",
                e, body
            ))
        })?;

        login
            .token
            .filter(|t| !t.is_empty())
            .map(SessionToken::new)
            .ok_or_else(|| ApiError::MissingToken.into())
    }

    async fn query_page(&self, namespace: &str, request: &QueryRequest) -> Result<QueryPage> {
        let url = self.url(&format!("/namespaces/{}/queries", namespace));
        debug!(
            "POST {} (kind={}, page_token={:?})",
            url,
            request.kind(),
            request.page_token()
        );

        let response = self
            .authorized(Method::POST, &url)
            .await?
            .json(request)
            .timeout(QUERY_TIMEOUT)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(ApiError::QueryFailed {
                status: status.as_u16(),
                body: body_text(response).await,
            }
            .into());
        }

        let data: QueryResponse = response
            .json()
            .await
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        Ok(QueryPage::from(data))
    }

    async fn delete_entity(&self, kind: QueryKind, tenant: &str, uuid: &str) -> Result<()> {
        let url = self.url(&format!(
            "/namespaces/{}/{}/{}",
            tenant,
            kind.resource_path(),
            uuid
        ));
        debug!("DELETE {}", url);

        let response = self
            .authorized(Method::DELETE, &url)
            .await?
            .timeout(DELETE_TIMEOUT)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status == StatusCode::OK {
            Ok(())
        } else {
            Err(ApiError::DeleteFailed {
                status: status.as_u16(),
                body: body_text(response).await,
            }
            .into())
        }
    }
}
