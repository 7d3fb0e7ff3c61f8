use std::sync::Arc;

use serde_json::json;
use tickdesk_core::{ApiPipeline, Logger};

use crate::models::{Stock, StockDraft};
use crate::{report_failure, ClientError};

const STOCK_ENDPOINT: &str = "/stocks";

/// CRUD operations against `/stocks`.
pub struct StockClient {
    pipeline: Arc<ApiPipeline>,
    logger: Arc<Logger>,
}

impl StockClient {
    pub fn new(pipeline: Arc<ApiPipeline>, logger: Arc<Logger>) -> Self {
        Self { pipeline, logger }
    }

    pub async fn list(&self) -> Result<Vec<Stock>, ClientError> {
        self.logger.info("fetching all stocks", None);
        let value = self
            .pipeline
            .get(STOCK_ENDPOINT)
            .await
            .map_err(|error| report_failure(&self.logger, "failed to fetch stocks", error))?;
        let stocks: Vec<Stock> = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "stock list was malformed", error))?;
        self.logger
            .info("stocks fetched", Some(&json!({ "count": stocks.len() })));
        Ok(stocks)
    }

    pub async fn get(&self, id: u64) -> Result<Stock, ClientError> {
        self.logger
            .info("fetching stock by id", Some(&json!({ "id": id })));
        let value = self
            .pipeline
            .get(&format!("{STOCK_ENDPOINT}/{id}"))
            .await
            .map_err(|error| report_failure(&self.logger, "failed to fetch stock", error))?;
        let stock = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "stock payload was malformed", error))?;
        self.logger
            .info("stock fetched", Some(&json!({ "id": id })));
        Ok(stock)
    }

    pub async fn create(&self, draft: &StockDraft) -> Result<Stock, ClientError> {
        self.logger
            .info("creating stock", Some(&json!({ "ticker": draft.ticker })));
        let body = serde_json::to_value(draft)
            .map_err(|error| report_failure(&self.logger, "stock draft was malformed", error))?;
        let value = self
            .pipeline
            .post(STOCK_ENDPOINT, &body)
            .await
            .map_err(|error| report_failure(&self.logger, "failed to create stock", error))?;
        let stock: Stock = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "stock payload was malformed", error))?;
        self.logger
            .info("stock created", Some(&json!({ "id": stock.id })));
        Ok(stock)
    }

    pub async fn update(&self, id: u64, draft: &StockDraft) -> Result<Stock, ClientError> {
        self.logger
            .info("updating stock", Some(&json!({ "id": id })));
        let body = serde_json::to_value(draft)
            .map_err(|error| report_failure(&self.logger, "stock draft was malformed", error))?;
        let value = self
            .pipeline
            .put(&format!("{STOCK_ENDPOINT}/{id}"), &body)
            .await
            .map_err(|error| report_failure(&self.logger, "failed to update stock", error))?;
        let stock = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "stock payload was malformed", error))?;
        self.logger
            .info("stock updated", Some(&json!({ "id": id })));
        Ok(stock)
    }

    pub async fn delete(&self, id: u64) -> Result<(), ClientError> {
        self.logger
            .info("deleting stock", Some(&json!({ "id": id })));
        self.pipeline
            .delete(&format!("{STOCK_ENDPOINT}/{id}"))
            .await
            .map_err(|error| report_failure(&self.logger, "failed to delete stock", error))?;
        self.logger
            .info("stock deleted", Some(&json!({ "id": id })));
        Ok(())
    }
}
