//! Behavior tests for the resource clients: every call goes through the
//! pipeline, every outcome is logged, and auth operations maintain the
//! credential slot.

use serde_json::json;
use tickdesk_client::{
    AuthClient, ChainQuery, DashboardClient, LoginRequest, OptionsClient, StockClient,
    StockDraft, TradeClient, TradeClose, TradeFilter,
};
use tickdesk_core::{CredentialStore, HttpError, HttpResponse, LogLevel};
use tickdesk_tests::PipelineHarness;

// =============================================================================
// Stocks
// =============================================================================

#[tokio::test]
async fn stock_list_returns_typed_rows_and_logs_a_summary() {
    // Given: a backend with two stocks
    let harness = PipelineHarness::new(vec![Ok(HttpResponse::ok_json(
        "[{\"id\":1,\"ticker\":\"AAPL\",\"companyName\":\"Apple Inc.\"},\
         {\"id\":2,\"ticker\":\"MSFT\",\"companyName\":\"Microsoft\",\"category\":\"tech\"}]",
    ))]);
    let client = StockClient::new(harness.pipeline.clone(), harness.logger.clone());

    // When: the list is fetched
    let stocks = client.list().await.expect("list should succeed");

    // Then: rows decode and the summary carries the count
    assert_eq!(stocks.len(), 2);
    assert_eq!(stocks[0].ticker, "AAPL");
    assert_eq!(stocks[1].category.as_deref(), Some("tech"));

    let info = harness.sink.lines_at(LogLevel::Info);
    assert!(info.iter().any(|line| line.contains("fetching all stocks")));
    assert!(info
        .iter()
        .any(|line| line.contains("stocks fetched") && line.contains("\"count\":2")));
}

#[tokio::test]
async fn failed_stock_create_logs_an_error_and_reraises() {
    let harness = PipelineHarness::new(vec![Ok(HttpResponse::with_status(
        500,
        "{\"message\":\"db down\"}",
    ))]);
    let client = StockClient::new(harness.pipeline.clone(), harness.logger.clone());
    let draft = StockDraft {
        ticker: String::from("AAPL"),
        company_name: String::from("Apple Inc."),
        category: None,
    };

    let error = client
        .create(&draft)
        .await
        .expect_err("create should fail");

    assert_eq!(error.status(), Some(500));
    assert_eq!(error.to_string(), "db down");
    let errors = harness.sink.lines_at(LogLevel::Error);
    assert!(errors
        .iter()
        .any(|line| line.contains("failed to create stock")));
}

#[tokio::test]
async fn stock_delete_targets_the_resource_path() {
    let harness = PipelineHarness::new(vec![Ok(HttpResponse::with_status(204, ""))]);
    let client = StockClient::new(harness.pipeline.clone(), harness.logger.clone());

    client.delete(7).await.expect("delete should succeed");

    let requests = harness.transport.recorded_requests();
    assert_eq!(requests[0].url, "https://api.test/stocks/7");
}

// =============================================================================
// Trades
// =============================================================================

#[tokio::test]
async fn trade_close_posts_to_the_close_subresource() {
    let harness = PipelineHarness::new(vec![Ok(HttpResponse::ok_json(
        "{\"id\":5,\"ticker\":\"TSLA\",\"side\":\"buy\",\"quantity\":10.0,\
          \"price\":250.0,\"status\":\"closed\"}",
    ))]);
    let client = TradeClient::new(harness.pipeline.clone(), harness.logger.clone());

    let trade = client
        .close(
            5,
            &TradeClose {
                close_price: 260.5,
                closed_at: None,
            },
        )
        .await
        .expect("close should succeed");

    assert_eq!(trade.status.as_deref(), Some("closed"));
    let requests = harness.transport.recorded_requests();
    assert_eq!(requests[0].url, "https://api.test/trades/5/close");
    assert_eq!(
        requests[0].body.as_deref(),
        Some("{\"closePrice\":260.5}")
    );
}

#[tokio::test]
async fn trade_list_filter_becomes_a_query_string() {
    let harness = PipelineHarness::new(vec![Ok(HttpResponse::ok_json("[]"))]);
    let client = TradeClient::new(harness.pipeline.clone(), harness.logger.clone());

    let filter = TradeFilter {
        ticker: Some(String::from("TSLA")),
        status: Some(String::from("open")),
    };
    client.list(&filter).await.expect("list should succeed");

    let requests = harness.transport.recorded_requests();
    assert_eq!(
        requests[0].url,
        "https://api.test/trades?ticker=TSLA&status=open"
    );
}

// =============================================================================
// Options and dashboard
// =============================================================================

#[tokio::test]
async fn options_chain_builds_the_ticker_path_with_query() {
    let harness = PipelineHarness::new(vec![Ok(HttpResponse::ok_json(
        "{\"ticker\":\"AAPL\",\"contracts\":[]}",
    ))]);
    let client = OptionsClient::new(harness.pipeline.clone(), harness.logger.clone());

    let query = ChainQuery {
        expiration: Some(String::from("2026-09-18")),
        contract_type: None,
    };
    let chain = client
        .chain("AAPL", &query)
        .await
        .expect("chain should succeed");

    assert_eq!(chain.ticker, "AAPL");
    let requests = harness.transport.recorded_requests();
    assert_eq!(
        requests[0].url,
        "https://api.test/options/chain/AAPL?expiration=2026-09-18"
    );
}

#[tokio::test]
async fn dashboard_metrics_decode_into_typed_values() {
    let harness = PipelineHarness::new(vec![Ok(HttpResponse::ok_json(
        "{\"totalValue\":125000.5,\"openPositions\":8,\"dayChange\":-1.25}",
    ))]);
    let client = DashboardClient::new(harness.pipeline.clone(), harness.logger.clone());

    let metrics = client.metrics().await.expect("metrics should succeed");

    assert_eq!(metrics.open_positions, 8);
    assert!(metrics.day_change < 0.0);
    let requests = harness.transport.recorded_requests();
    assert_eq!(requests[0].url, "https://api.test/dashboard/metrics");
}

// =============================================================================
// Auth
// =============================================================================

fn auth_client(harness: &PipelineHarness) -> AuthClient {
    AuthClient::new(
        harness.pipeline.clone(),
        harness.pipeline.credentials(),
        harness.logger.clone(),
    )
}

#[tokio::test]
async fn login_stores_the_session_token() {
    // Given: a backend that issues a token
    let harness = PipelineHarness::new(vec![Ok(HttpResponse::ok_json(
        "{\"token\":\"tok123\",\"user\":{\"id\":1,\"username\":\"sam\"}}",
    ))]);
    let client = auth_client(&harness);

    // When: the user logs in
    let session = client
        .login(&LoginRequest {
            username: String::from("sam"),
            password: String::from("hunter2"),
        })
        .await
        .expect("login should succeed");

    // Then: the token is persisted for subsequent requests
    assert_eq!(session.token.as_deref(), Some("tok123"));
    assert_eq!(harness.credentials.token().as_deref(), Some("tok123"));
}

#[tokio::test]
async fn logout_clears_the_slot_even_when_the_backend_call_fails() {
    let harness = PipelineHarness::new(vec![Err(HttpError::connect("connection refused"))]);
    harness.credentials.store("tok123");
    let client = auth_client(&harness);

    let result = client.logout().await;

    assert!(result.is_err(), "backend failure should be re-raised");
    assert_eq!(harness.credentials.token(), None);
}

#[tokio::test]
async fn refresh_replaces_the_stored_token() {
    let harness = PipelineHarness::new(vec![Ok(HttpResponse::ok_json(
        "{\"token\":\"tok456\"}",
    ))]);
    harness.credentials.store("tok123");
    let client = auth_client(&harness);

    let session = client.refresh().await.expect("refresh should succeed");

    assert_eq!(session.token.as_deref(), Some("tok456"));
    assert_eq!(harness.credentials.token().as_deref(), Some("tok456"));

    // The refresh request itself was authenticated with the old token.
    let requests = harness.transport.recorded_requests();
    assert_eq!(
        requests[0].headers.get("authorization").map(String::as_str),
        Some("Bearer tok123")
    );
}

#[tokio::test]
async fn login_failure_surfaces_the_backend_message() {
    let harness = PipelineHarness::new(vec![Ok(HttpResponse::with_status(
        401,
        "{\"message\":\"bad credentials\"}",
    ))]);
    let client = auth_client(&harness);

    let error = client
        .login(&LoginRequest {
            username: String::from("sam"),
            password: String::from("wrong"),
        })
        .await
        .expect_err("login should fail");

    assert_eq!(error.status(), Some(401));
    assert_eq!(error.to_string(), "bad credentials");
    let errors = harness.sink.lines_at(LogLevel::Error);
    assert!(errors.iter().any(|line| line.contains("login failed")));

    let body = harness.transport.recorded_requests()[0]
        .body
        .clone()
        .expect("login request has a body");
    let decoded: serde_json::Value =
        serde_json::from_str(&body).expect("body should be JSON");
    assert_eq!(decoded, json!({ "username": "sam", "password": "wrong" }));
}
