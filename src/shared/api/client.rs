use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::shared::errors::{AppError, AppResult};
use crate::shared::session::Session;
use crate::{log_debug, log_warn};

use super::envelope::ApiEnvelope;

/// HTTP client for the Qalam REST API.
///
/// Every request carries the bearer credential and the `Accept-Language`
/// header taken from the session context, decodes the standard response
/// envelope, and normalizes transport, HTTP, and `succeeded: false`
/// failures into [`AppError`]. There is no automatic retry; errors are
/// surfaced to the caller.
pub struct ApiClient {
    http: Client,
    session: Arc<Session>,
}

impl ApiClient {
    pub fn new(session: Arc<Session>) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("qalam-admin/1.0")
            .build()
            .map_err(|e| {
                AppError::NetworkError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { http, session })
    }

    pub async fn get_data<T>(&self, path: &str) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.request::<T>(Method::GET, path, None).await?.require_data()
    }

    pub async fn post_data<T>(&self, path: &str, body: Value) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.request::<T>(Method::POST, path, Some(body))
            .await?
            .require_data()
    }

    pub async fn put_data<T>(&self, path: &str, body: Value) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.request::<T>(Method::PUT, path, Some(body))
            .await?
            .require_data()
    }

    pub async fn patch_data<T>(&self, path: &str, body: Value) -> AppResult<T>
    where
        T: DeserializeOwned,
    {
        self.request::<T>(Method::PATCH, path, Some(body))
            .await?
            .require_data()
    }

    /// POST against an endpoint whose envelope carries no payload; returns
    /// the envelope `message` (the user-facing confirmation text).
    pub async fn post_message(&self, path: &str, body: Option<Value>) -> AppResult<String> {
        let envelope = self.request::<Value>(Method::POST, path, body).await?;
        Ok(envelope.message)
    }

    pub async fn delete(&self, path: &str) -> AppResult<()> {
        self.request::<Value>(Method::DELETE, path, None).await?;
        Ok(())
    }

    async fn request<T>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> AppResult<ApiEnvelope<T>>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.session.base_url(), path);
        let mut request = self
            .http
            .request(method.clone(), &url)
            .header(ACCEPT, "application/json")
            .header(ACCEPT_LANGUAGE, self.session.locale().accept_language());

        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if let Some(body) = &body {
            request = request.json(body);
        }

        let started = Instant::now();
        let response = request.send().await.map_err(AppError::from)?;
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            AppError::NetworkError(format!("Failed to read response body: {}", e))
        })?;
        log_debug!(
            "{} {} -> {} in {}ms",
            method,
            path,
            status,
            started.elapsed().as_millis()
        );

        let envelope: ApiEnvelope<T> = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(err) if status.is_success() => {
                return Err(AppError::SerializationError(format!(
                    "Failed to parse {} response: {}. Response: {}",
                    path,
                    err,
                    preview(&text)
                )));
            }
            // Error statuses may come from infrastructure with a non-envelope body.
            Err(_) => return Err(Self::status_error(status, None)),
        };

        if !status.is_success() {
            return Err(Self::status_error(status, Some(envelope.message)));
        }

        if !envelope.succeeded {
            log_warn!("{} {} rejected: {}", method, path, envelope.message);
            return Err(AppError::ApiError(envelope.message));
        }

        Ok(envelope)
    }

    /// Map an error status to the crate taxonomy, preferring the server's
    /// envelope `message` when one was present.
    fn status_error(status: StatusCode, message: Option<String>) -> AppError {
        let message = message
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| format!("Request failed with status {}", status));

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::Unauthorized(message),
            StatusCode::NOT_FOUND => AppError::NotFound(message),
            _ => AppError::ApiError(message),
        }
    }
}

fn preview(text: &str) -> String {
    if text.chars().count() > 200 {
        format!("{}...", text.chars().take(200).collect::<String>())
    } else {
        text.to_string()
    }
}
