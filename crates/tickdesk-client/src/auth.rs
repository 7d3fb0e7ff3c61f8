use std::sync::Arc;

use serde_json::json;
use tickdesk_core::{ApiPipeline, CredentialStore, Logger};

use crate::models::{AuthSession, LoginRequest, RegisterRequest, UserProfile};
use crate::{report_failure, ClientError};

const AUTH_ENDPOINT: &str = "/auth";

/// Authentication operations against `/auth`.
///
/// Owns the credential slot alongside the pipeline: login and refresh
/// persist the returned token, logout clears it locally before notifying the
/// backend.
pub struct AuthClient {
    pipeline: Arc<ApiPipeline>,
    credentials: Arc<dyn CredentialStore>,
    logger: Arc<Logger>,
}

impl AuthClient {
    pub fn new(
        pipeline: Arc<ApiPipeline>,
        credentials: Arc<dyn CredentialStore>,
        logger: Arc<Logger>,
    ) -> Self {
        Self {
            pipeline,
            credentials,
            logger,
        }
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<AuthSession, ClientError> {
        self.logger.info(
            "user login attempt",
            Some(&json!({ "username": request.username })),
        );
        let body = serde_json::to_value(request)
            .map_err(|error| report_failure(&self.logger, "login payload was malformed", error))?;
        let value = self
            .pipeline
            .post(&format!("{AUTH_ENDPOINT}/login"), &body)
            .await
            .map_err(|error| report_failure(&self.logger, "login failed", error))?;
        let session: AuthSession = serde_json::from_value(value).map_err(|error| {
            report_failure(&self.logger, "session payload was malformed", error)
        })?;

        if let Some(token) = &session.token {
            self.credentials.store(token);
            self.logger.debug("auth token stored", None);
        }
        self.logger.info("user logged in", None);
        Ok(session)
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<AuthSession, ClientError> {
        self.logger.info(
            "user registration attempt",
            Some(&json!({ "username": request.username })),
        );
        let body = serde_json::to_value(request).map_err(|error| {
            report_failure(&self.logger, "registration payload was malformed", error)
        })?;
        let value = self
            .pipeline
            .post(&format!("{AUTH_ENDPOINT}/register"), &body)
            .await
            .map_err(|error| report_failure(&self.logger, "registration failed", error))?;
        let session = serde_json::from_value(value).map_err(|error| {
            report_failure(&self.logger, "session payload was malformed", error)
        })?;
        self.logger.info("user registered", None);
        Ok(session)
    }

    pub async fn profile(&self) -> Result<UserProfile, ClientError> {
        self.logger.info("fetching user profile", None);
        let value = self
            .pipeline
            .get(&format!("{AUTH_ENDPOINT}/profile"))
            .await
            .map_err(|error| report_failure(&self.logger, "failed to fetch profile", error))?;
        let profile = serde_json::from_value(value).map_err(|error| {
            report_failure(&self.logger, "profile payload was malformed", error)
        })?;
        self.logger.info("user profile fetched", None);
        Ok(profile)
    }

    /// Clears the stored credential, then notifies the backend. The local
    /// slot is cleared first so the session ends even when the POST fails.
    pub async fn logout(&self) -> Result<(), ClientError> {
        self.logger.info("user logout", None);
        self.credentials.clear();
        self.logger.debug("auth token cleared", None);
        self.pipeline
            .post_empty(&format!("{AUTH_ENDPOINT}/logout"))
            .await
            .map_err(|error| report_failure(&self.logger, "logout failed", error))?;
        self.logger.info("user logged out", None);
        Ok(())
    }

    /// Rotates the session token and persists the replacement.
    pub async fn refresh(&self) -> Result<AuthSession, ClientError> {
        self.logger.info("refreshing auth token", None);
        let value = self
            .pipeline
            .post_empty(&format!("{AUTH_ENDPOINT}/refresh"))
            .await
            .map_err(|error| report_failure(&self.logger, "token refresh failed", error))?;
        let session: AuthSession = serde_json::from_value(value).map_err(|error| {
            report_failure(&self.logger, "session payload was malformed", error)
        })?;

        if let Some(token) = &session.token {
            self.credentials.store(token);
        }
        self.logger.info("auth token refreshed", None);
        Ok(session)
    }
}
