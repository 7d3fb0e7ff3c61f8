use serde::{Deserialize, Serialize};

/// Tracked stock entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stock {
    pub id: u64,
    pub ticker: String,
    pub company_name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Payload for creating or updating a stock.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockDraft {
    pub ticker: String,
    pub company_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Open or closed trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: u64,
    pub ticker: String,
    pub side: String,
    pub quantity: f64,
    pub price: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub opened_at: Option<String>,
    #[serde(default)]
    pub closed_at: Option<String>,
}

/// Payload for opening or amending a trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeDraft {
    pub ticker: String,
    pub side: String,
    pub quantity: f64,
    pub price: f64,
}

/// Payload for closing an open trade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeClose {
    pub close_price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<String>,
}

/// Query filter for trade listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeFilter {
    pub ticker: Option<String>,
    pub status: Option<String>,
}

impl TradeFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(ticker) = &self.ticker {
            pairs.push((String::from("ticker"), ticker.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push((String::from("status"), status.clone()));
        }
        pairs
    }
}

/// Single options contract quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionContract {
    pub ticker: String,
    pub expiration: String,
    pub strike: f64,
    pub contract_type: String,
    #[serde(default)]
    pub bid: Option<f64>,
    #[serde(default)]
    pub ask: Option<f64>,
    #[serde(default)]
    pub last: Option<f64>,
    #[serde(default)]
    pub volume: Option<u64>,
}

/// Options chain for one underlying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsChain {
    pub ticker: String,
    #[serde(default)]
    pub expirations: Vec<String>,
    pub contracts: Vec<OptionContract>,
}

/// Query refinements for a chain lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChainQuery {
    pub expiration: Option<String>,
    pub contract_type: Option<String>,
}

impl ChainQuery {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(expiration) = &self.expiration {
            pairs.push((String::from("expiration"), expiration.clone()));
        }
        if let Some(contract_type) = &self.contract_type {
            pairs.push((String::from("contractType"), contract_type.clone()));
        }
        pairs
    }
}

/// Query for batched option quotes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteQuery {
    pub tickers: Vec<String>,
}

impl QuoteQuery {
    pub fn to_query(&self) -> Vec<(String, String)> {
        if self.tickers.is_empty() {
            return Vec::new();
        }
        vec![(String::from("tickers"), self.tickers.join(","))]
    }
}

/// Structured criteria for an options search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionsSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_strike: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_strike: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
}

/// Headline dashboard metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardMetrics {
    pub total_value: f64,
    pub open_positions: u64,
    pub day_change: f64,
}

/// Aggregate trading summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingSummary {
    pub total_trades: u64,
    pub win_rate: f64,
    pub realized_pnl: f64,
}

/// One point on the performance chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub date: String,
    pub value: f64,
}

/// Query for the performance series.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerformanceQuery {
    pub period: Option<String>,
}

impl PerformanceQuery {
    pub fn to_query(&self) -> Vec<(String, String)> {
        self.period
            .as_ref()
            .map(|period| vec![(String::from("period"), period.clone())])
            .unwrap_or_default()
    }
}

/// Login credentials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Session returned by login/register/refresh. The token is optional; some
/// deployments only rotate it on refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<UserProfile>,
}

/// Authenticated user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
}
