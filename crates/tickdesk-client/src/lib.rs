//! Typed resource clients for the tickdesk backend.
//!
//! One client per backend resource (stocks, trades, options, dashboard,
//! auth). Every operation passes through the request pipeline, logs an
//! attempt event, logs success with a short summary, and error-logs before
//! re-raising on failure.

pub mod auth;
pub mod dashboard;
pub mod models;
pub mod options;
pub mod stocks;
pub mod trades;

use serde_json::json;
use thiserror::Error;
use tickdesk_core::{ApiError, Logger};

pub use auth::AuthClient;
pub use dashboard::DashboardClient;
pub use models::{
    AuthSession, ChainQuery, DashboardMetrics, LoginRequest, OptionContract, OptionsChain,
    OptionsSearch, PerformancePoint, PerformanceQuery, QuoteQuery, RegisterRequest, Stock,
    StockDraft, Trade, TradeClose, TradeDraft, TradeFilter, TradingSummary, UserProfile,
};
pub use options::OptionsClient;
pub use stocks::StockClient;
pub use trades::TradeClient;

/// Failure surfaced by a resource client.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Api(#[from] ApiError),

    /// A payload did not match the expected shape, in either direction.
    #[error("payload did not match the expected shape: {0}")]
    Payload(#[from] serde_json::Error),
}

impl ClientError {
    /// The backend status code, when one exists.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api(error) => error.status(),
            Self::Payload(_) => None,
        }
    }
}

/// Logs an error-level event for a failed operation and converts the error.
pub(crate) fn report_failure(
    logger: &Logger,
    message: &str,
    error: impl Into<ClientError>,
) -> ClientError {
    let error = error.into();
    logger.error(message, Some(&json!({ "error": error.to_string() })));
    error
}
