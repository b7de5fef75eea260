//! Blocking REST client shared by all API trait implementations.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::api::errors::{ApiError, ApiResult};
use crate::domain::session::Session;
use crate::models::config::ClientConfig;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

/// Marker of a check-in reply body, present on 4xx replies that still carry one.
#[derive(Debug, Deserialize)]
struct ScanFlag {
    success: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(config: &ClientConfig) -> ApiResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub(crate) fn get_json<T: DeserializeOwned>(
        &self,
        session: &Session,
        path: &str,
        query: &[(&str, String)],
    ) -> ApiResult<T> {
        let request = self.client.get(self.url(path)).query(query);
        let (status, body) = self.execute(request, Some(session))?;
        ensure_success(status, &body)?;
        Ok(serde_json::from_str(&body)?)
    }

    pub(crate) fn post_json<B, T>(
        &self,
        session: Option<&Session>,
        path: &str,
        payload: &B,
    ) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(payload);
        let (status, body) = self.execute(request, session)?;
        ensure_success(status, &body)?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Posts without interpreting the response body.
    pub(crate) fn post_empty(&self, session: &Session, path: &str) -> ApiResult<()> {
        let request = self.client.post(self.url(path));
        let (status, body) = self.execute(request, Some(session))?;
        ensure_success(status, &body)
    }

    /// Posts a check-in call.
    ///
    /// Client errors whose body carries a `success` flag (such as "already
    /// scanned") are parsed like successful replies. Any other error status
    /// becomes a rejection with the server's message.
    pub(crate) fn post_scan<B, T>(&self, session: &Session, path: &str, payload: &B) -> ApiResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(self.url(path)).json(payload);
        let (status, body) = self.execute(request, Some(session))?;
        if !status.is_success() && (status.is_server_error() || !has_scan_flag(&body)) {
            return Err(rejection(status, &body));
        }
        serde_json::from_str(&body).map_err(|err| {
            if status.is_success() {
                ApiError::from(err)
            } else {
                rejection(status, &body)
            }
        })
    }

    fn execute(
        &self,
        request: RequestBuilder,
        session: Option<&Session>,
    ) -> ApiResult<(StatusCode, String)> {
        let request = match session {
            Some(session) => request.bearer_auth(session.token()),
            None => request,
        };

        let response = request.send()?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }
        let body = response.text()?;
        Ok((status, body))
    }
}

fn ensure_success(status: StatusCode, body: &str) -> ApiResult<()> {
    if status.is_success() {
        Ok(())
    } else {
        Err(rejection(status, body))
    }
}

fn has_scan_flag(body: &str) -> bool {
    serde_json::from_str::<ScanFlag>(body).is_ok_and(|flag| flag.success.is_some())
}

/// Builds a rejection from the server's error body, if it has one.
fn rejection(status: StatusCode, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|body| body.message.or(body.error))
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());

    match message {
        Some(message) => ApiError::Rejected(message),
        None => ApiError::Rejected(format!("Request failed with status {status}")),
    }
}
