use std::sync::Arc;

use serde_json::json;
use tickdesk_core::{ApiPipeline, Logger};

use crate::models::{Trade, TradeClose, TradeDraft, TradeFilter};
use crate::{report_failure, ClientError};

const TRADE_ENDPOINT: &str = "/trades";

/// Trade and order management against `/trades`.
pub struct TradeClient {
    pipeline: Arc<ApiPipeline>,
    logger: Arc<Logger>,
}

impl TradeClient {
    pub fn new(pipeline: Arc<ApiPipeline>, logger: Arc<Logger>) -> Self {
        Self { pipeline, logger }
    }

    pub async fn list(&self, filter: &TradeFilter) -> Result<Vec<Trade>, ClientError> {
        self.logger.info("fetching all trades", None);
        let value = self
            .pipeline
            .get_with_query(TRADE_ENDPOINT, &filter.to_query())
            .await
            .map_err(|error| report_failure(&self.logger, "failed to fetch trades", error))?;
        let trades: Vec<Trade> = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "trade list was malformed", error))?;
        self.logger
            .info("trades fetched", Some(&json!({ "count": trades.len() })));
        Ok(trades)
    }

    pub async fn get(&self, id: u64) -> Result<Trade, ClientError> {
        self.logger
            .info("fetching trade by id", Some(&json!({ "id": id })));
        let value = self
            .pipeline
            .get(&format!("{TRADE_ENDPOINT}/{id}"))
            .await
            .map_err(|error| report_failure(&self.logger, "failed to fetch trade", error))?;
        let trade = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "trade payload was malformed", error))?;
        self.logger
            .info("trade fetched", Some(&json!({ "id": id })));
        Ok(trade)
    }

    pub async fn create(&self, draft: &TradeDraft) -> Result<Trade, ClientError> {
        self.logger
            .info("creating trade", Some(&json!({ "ticker": draft.ticker })));
        let body = serde_json::to_value(draft)
            .map_err(|error| report_failure(&self.logger, "trade draft was malformed", error))?;
        let value = self
            .pipeline
            .post(TRADE_ENDPOINT, &body)
            .await
            .map_err(|error| report_failure(&self.logger, "failed to create trade", error))?;
        let trade: Trade = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "trade payload was malformed", error))?;
        self.logger
            .info("trade created", Some(&json!({ "id": trade.id })));
        Ok(trade)
    }

    pub async fn update(&self, id: u64, draft: &TradeDraft) -> Result<Trade, ClientError> {
        self.logger
            .info("updating trade", Some(&json!({ "id": id })));
        let body = serde_json::to_value(draft)
            .map_err(|error| report_failure(&self.logger, "trade draft was malformed", error))?;
        let value = self
            .pipeline
            .put(&format!("{TRADE_ENDPOINT}/{id}"), &body)
            .await
            .map_err(|error| report_failure(&self.logger, "failed to update trade", error))?;
        let trade = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "trade payload was malformed", error))?;
        self.logger
            .info("trade updated", Some(&json!({ "id": id })));
        Ok(trade)
    }

    /// Closes an open trade via `POST /trades/{id}/close`.
    pub async fn close(&self, id: u64, close: &TradeClose) -> Result<Trade, ClientError> {
        self.logger
            .info("closing trade", Some(&json!({ "id": id })));
        let body = serde_json::to_value(close)
            .map_err(|error| report_failure(&self.logger, "close payload was malformed", error))?;
        let value = self
            .pipeline
            .post(&format!("{TRADE_ENDPOINT}/{id}/close"), &body)
            .await
            .map_err(|error| report_failure(&self.logger, "failed to close trade", error))?;
        let trade = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "trade payload was malformed", error))?;
        self.logger
            .info("trade closed", Some(&json!({ "id": id })));
        Ok(trade)
    }

    pub async fn delete(&self, id: u64) -> Result<(), ClientError> {
        self.logger
            .info("deleting trade", Some(&json!({ "id": id })));
        self.pipeline
            .delete(&format!("{TRADE_ENDPOINT}/{id}"))
            .await
            .map_err(|error| report_failure(&self.logger, "failed to delete trade", error))?;
        self.logger
            .info("trade deleted", Some(&json!({ "id": id })));
        Ok(())
    }
}
