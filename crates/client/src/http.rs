use std::time::Duration;

use configs::ApiConfig;
use models::ApiEnvelope;
use reqwest::multipart::Form;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::errors::ClientError;

/// Thin wrapper around [`reqwest::Client`] that owns the backend origin and
/// the session cookie jar, and decodes `{ success, data, message }`
/// envelopes into typed results.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            // Session is carried via cookie, the fetch `credentials: include`
            // equivalent; there is no bearer token in application code.
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let mut base_url = config.base_url.clone();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let req = self.http.get(self.url(path));
        self.execute(path, req).await
    }

    /// GET where the envelope may carry no `data`, e.g. `/users/logout`.
    pub async fn get_opt<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ClientError> {
        let req = self.http.get(self.url(path));
        self.execute_opt(path, req).await
    }

    pub async fn post_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let req = self.http.post(self.url(path)).json(body);
        self.execute(path, req).await
    }

    /// POST where the envelope may carry no `data`, e.g.
    /// `/users/change-password`.
    pub async fn post_json_opt<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<Option<T>, ClientError> {
        let req = self.http.post(self.url(path)).json(body);
        self.execute_opt(path, req).await
    }

    pub async fn put_json<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        let req = self.http.put(self.url(path)).json(body);
        self.execute(path, req).await
    }

    pub async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<Option<T>, ClientError> {
        let req = self.http.post(self.url(path)).multipart(form);
        self.execute_opt(path, req).await
    }

    pub async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<Option<T>, ClientError> {
        let req = self.http.put(self.url(path)).multipart(form);
        self.execute_opt(path, req).await
    }

    /// POST with no body, for endpoints like `/users/refresh-token` where
    /// only the envelope outcome matters.
    pub async fn post_empty(&self, path: &str) -> Result<(), ClientError> {
        let req = self.http.post(self.url(path));
        self.execute_opt::<serde_json::Value>(path, req).await.map(|_| ())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let req = self.http.delete(self.url(path));
        self.execute_opt::<serde_json::Value>(path, req).await.map(|_| ())
    }

    /// Execute and require `data` to be present.
    async fn execute<T: DeserializeOwned>(
        &self,
        path: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        match self.execute_opt(path, req).await? {
            Some(data) => Ok(data),
            None => Err(ClientError::Decode(format!("missing data in response from /{path}"))),
        }
    }

    /// Execute and decode the envelope, tolerating an absent `data` field.
    async fn execute_opt<T: DeserializeOwned>(
        &self,
        path: &str,
        req: reqwest::RequestBuilder,
    ) -> Result<Option<T>, ClientError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| ClientError::Network(e.to_string()))?;
        debug!(path, status = status.as_u16(), "api response");

        if !status.is_success() {
            // Error bodies are usually envelopes too; fall back to the
            // status reason when they are not.
            let message = serde_json::from_str::<ApiEnvelope<serde_json::Value>>(&body)
                .ok()
                .and_then(|env| env.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request failed")
                        .to_string()
                });
            return Err(ClientError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: ApiEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))?;
        if !envelope.success {
            return Err(ClientError::Api(
                envelope
                    .message
                    .unwrap_or_else(|| "request failed".to_string()),
            ));
        }
        Ok(envelope.data)
    }
}
