use std::sync::Arc;

use serde_json::json;
use tickdesk_core::{ApiPipeline, Logger};

use crate::models::{DashboardMetrics, PerformancePoint, PerformanceQuery, TradingSummary};
use crate::{report_failure, ClientError};

const DASHBOARD_ENDPOINT: &str = "/dashboard";

/// Analytics reads against `/dashboard`.
pub struct DashboardClient {
    pipeline: Arc<ApiPipeline>,
    logger: Arc<Logger>,
}

impl DashboardClient {
    pub fn new(pipeline: Arc<ApiPipeline>, logger: Arc<Logger>) -> Self {
        Self { pipeline, logger }
    }

    pub async fn metrics(&self) -> Result<DashboardMetrics, ClientError> {
        self.logger.info("fetching dashboard metrics", None);
        let value = self
            .pipeline
            .get(&format!("{DASHBOARD_ENDPOINT}/metrics"))
            .await
            .map_err(|error| {
                report_failure(&self.logger, "failed to fetch dashboard metrics", error)
            })?;
        let metrics = serde_json::from_value(value).map_err(|error| {
            report_failure(&self.logger, "metrics payload was malformed", error)
        })?;
        self.logger.info("dashboard metrics fetched", None);
        Ok(metrics)
    }

    pub async fn summary(&self) -> Result<TradingSummary, ClientError> {
        self.logger.info("fetching trading summary", None);
        let value = self
            .pipeline
            .get(&format!("{DASHBOARD_ENDPOINT}/summary"))
            .await
            .map_err(|error| {
                report_failure(&self.logger, "failed to fetch trading summary", error)
            })?;
        let summary = serde_json::from_value(value).map_err(|error| {
            report_failure(&self.logger, "summary payload was malformed", error)
        })?;
        self.logger.info("trading summary fetched", None);
        Ok(summary)
    }

    pub async fn performance(
        &self,
        query: &PerformanceQuery,
    ) -> Result<Vec<PerformancePoint>, ClientError> {
        self.logger.info("fetching performance data", None);
        let value = self
            .pipeline
            .get_with_query(&format!("{DASHBOARD_ENDPOINT}/performance"), &query.to_query())
            .await
            .map_err(|error| {
                report_failure(&self.logger, "failed to fetch performance data", error)
            })?;
        let points: Vec<PerformancePoint> = serde_json::from_value(value).map_err(|error| {
            report_failure(&self.logger, "performance payload was malformed", error)
        })?;
        self.logger
            .info("performance data fetched", Some(&json!({ "count": points.len() })));
        Ok(points)
    }
}
