use std::sync::Arc;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::config::PipelineConfig;
use crate::credentials::CredentialStore;
use crate::error::ApiError;
use crate::http_client::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::logger::Logger;

/// Single chokepoint for all outbound backend calls.
///
/// Every dispatch logs the request at debug level, injects the stored bearer
/// credential, and classifies failures by status code: 401 clears the
/// credential slot, 403 is warned about, 5xx gets an extra server-failure
/// event. Errors are always re-raised to the caller; the pipeline never
/// retries and never swallows.
pub struct ApiPipeline {
    config: PipelineConfig,
    transport: Arc<dyn HttpClient>,
    credentials: Arc<dyn CredentialStore>,
    logger: Arc<Logger>,
}

impl ApiPipeline {
    pub fn new(
        config: PipelineConfig,
        transport: Arc<dyn HttpClient>,
        credentials: Arc<dyn CredentialStore>,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            config,
            transport,
            credentials,
            logger,
        }
    }

    pub fn credentials(&self) -> Arc<dyn CredentialStore> {
        Arc::clone(&self.credentials)
    }

    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        self.dispatch(HttpMethod::Get, path, None).await
    }

    pub async fn get_with_query(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<Value, ApiError> {
        let path = append_query(path, query);
        self.dispatch(HttpMethod::Get, &path, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.dispatch(HttpMethod::Post, path, Some(body)).await
    }

    /// POST with no request body, used by auth endpoints like logout/refresh.
    pub async fn post_empty(&self, path: &str) -> Result<Value, ApiError> {
        self.dispatch(HttpMethod::Post, path, None).await
    }

    pub async fn put(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.dispatch(HttpMethod::Put, path, Some(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        self.dispatch(HttpMethod::Delete, path, None).await
    }

    async fn dispatch(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        let request_id = Uuid::new_v4().to_string();

        self.logger.debug(
            "api request",
            Some(&json!({
                "request_id": request_id,
                "method": method.as_str(),
                "path": path,
                "body": body.cloned().unwrap_or(Value::Null),
            })),
        );

        let url = format!("{}{}", self.config.base_url, path);
        let mut request =
            HttpRequest::new(method, url).with_timeout_ms(self.config.timeout_ms);
        for (name, value) in &self.config.default_headers {
            request = request.with_header(name.clone(), value.clone());
        }

        if let Some(body) = body {
            let payload = serde_json::to_string(body).map_err(|error| {
                self.logger.error(
                    "request aborted before dispatch",
                    Some(&json!({
                        "request_id": request_id,
                        "path": path,
                        "error": error.to_string(),
                    })),
                );
                ApiError::from(error)
            })?;
            request = request.with_body(payload);
        }

        if let Some(token) = self.credentials.token() {
            request = request.with_bearer(&token);
            self.logger.debug(
                "authorization token attached",
                Some(&json!({ "request_id": request_id })),
            );
        }

        let response = match self.transport.execute(request).await {
            Ok(response) => response,
            Err(error) => {
                self.log_failure(&request_id, method, path, None, error.message());
                return Err(ApiError::Transport(error));
            }
        };

        if response.is_success() {
            self.logger.debug(
                "api response",
                Some(&json!({
                    "request_id": request_id,
                    "status": response.status,
                    "path": path,
                    "body_bytes": response.body.len(),
                })),
            );
            return Ok(parse_success_body(&response));
        }

        let status = response.status;
        let message = failure_message(&response);
        self.log_failure(&request_id, method, path, Some(status), &message);

        match status {
            401 => {
                self.logger.warn(
                    "unauthorized, clearing stored credential",
                    Some(&json!({ "path": path })),
                );
                self.credentials.clear();
            }
            403 => {
                self.logger.warn(
                    "forbidden, insufficient permissions",
                    Some(&json!({ "path": path })),
                );
            }
            status if status >= 500 => {
                self.logger.error(
                    "server error occurred",
                    Some(&json!({ "status": status, "path": path })),
                );
            }
            _ => {}
        }

        Err(ApiError::Status { status, message })
    }

    fn log_failure(
        &self,
        request_id: &str,
        method: HttpMethod,
        path: &str,
        status: Option<u16>,
        message: &str,
    ) {
        let mut context = json!({
            "request_id": request_id,
            "method": method.as_str(),
            "path": path,
            "message": message,
        });
        // Transport failures carry no status field at all.
        if let Some(status) = status {
            context["status"] = json!(status);
        }
        self.logger.error("api error", Some(&context));
    }
}

/// Prefers the backend's structured `message` field, falling back to a
/// generic status line.
fn failure_message(response: &HttpResponse) -> String {
    serde_json::from_str::<Value>(&response.body)
        .ok()
        .and_then(|body| body.get("message")?.as_str().map(str::to_owned))
        .unwrap_or_else(|| format!("http status {}", response.status))
}

/// Success payloads pass through unchanged: JSON bodies are parsed, empty
/// bodies become null, anything else is carried as a raw string.
fn parse_success_body(response: &HttpResponse) -> Value {
    if response.body.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(&response.body)
        .unwrap_or_else(|_| Value::String(response.body.clone()))
}

fn append_query(path: &str, query: &[(String, String)]) -> String {
    if query.is_empty() {
        return path.to_owned();
    }
    let encoded = query
        .iter()
        .map(|(name, value)| {
            format!(
                "{}={}",
                urlencoding::encode(name),
                urlencoding::encode(value)
            )
        })
        .collect::<Vec<_>>()
        .join("&");
    format!("{path}?{encoded}")
}
