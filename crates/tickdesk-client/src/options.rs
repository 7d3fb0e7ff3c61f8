use std::sync::Arc;

use serde_json::json;
use tickdesk_core::{ApiPipeline, Logger};

use crate::models::{ChainQuery, OptionContract, OptionsChain, OptionsSearch, QuoteQuery};
use crate::{report_failure, ClientError};

const OPTIONS_ENDPOINT: &str = "/options";

/// Options chain and quote lookups against `/options`.
pub struct OptionsClient {
    pipeline: Arc<ApiPipeline>,
    logger: Arc<Logger>,
}

impl OptionsClient {
    pub fn new(pipeline: Arc<ApiPipeline>, logger: Arc<Logger>) -> Self {
        Self { pipeline, logger }
    }

    /// Fetches the options chain for one underlying ticker.
    pub async fn chain(&self, ticker: &str, query: &ChainQuery) -> Result<OptionsChain, ClientError> {
        self.logger
            .info("fetching options chain", Some(&json!({ "ticker": ticker })));
        let value = self
            .pipeline
            .get_with_query(&format!("{OPTIONS_ENDPOINT}/chain/{ticker}"), &query.to_query())
            .await
            .map_err(|error| {
                report_failure(&self.logger, "failed to fetch options chain", error)
            })?;
        let chain = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "chain payload was malformed", error))?;
        self.logger
            .info("options chain fetched", Some(&json!({ "ticker": ticker })));
        Ok(chain)
    }

    pub async fn quotes(&self, query: &QuoteQuery) -> Result<Vec<OptionContract>, ClientError> {
        self.logger.info("fetching options quotes", None);
        let value = self
            .pipeline
            .get_with_query(&format!("{OPTIONS_ENDPOINT}/quotes"), &query.to_query())
            .await
            .map_err(|error| {
                report_failure(&self.logger, "failed to fetch options quotes", error)
            })?;
        let quotes: Vec<OptionContract> = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "quote payload was malformed", error))?;
        self.logger
            .info("options quotes fetched", Some(&json!({ "count": quotes.len() })));
        Ok(quotes)
    }

    /// Searches contracts by structured criteria via `POST /options/search`.
    pub async fn search(&self, criteria: &OptionsSearch) -> Result<Vec<OptionContract>, ClientError> {
        self.logger.info("searching options", None);
        let body = serde_json::to_value(criteria).map_err(|error| {
            report_failure(&self.logger, "search criteria were malformed", error)
        })?;
        let value = self
            .pipeline
            .post(&format!("{OPTIONS_ENDPOINT}/search"), &body)
            .await
            .map_err(|error| report_failure(&self.logger, "failed to search options", error))?;
        let results: Vec<OptionContract> = serde_json::from_value(value)
            .map_err(|error| report_failure(&self.logger, "search payload was malformed", error))?;
        self.logger
            .info("options search completed", Some(&json!({ "count": results.len() })));
        Ok(results)
    }
}
