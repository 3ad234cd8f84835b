//! REST API handlers.
//!
//! Owns request-parameter parsing and validation; the core crates receive
//! only well-formed parameters. Responses wrap payloads in a `data` field on
//! success and carry an `errors` array of human-readable messages on failure.

use std::collections::HashMap;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use tracing::{error, warn};

use fizzbuzz_core::FizzBuzzParams;
use fizzbuzz_metrics::{Outcome, render_prometheus};
use fizzbuzz_state::FrequencyLedger;

use crate::ApiState;

/// Success payload wrapper.
#[derive(serde::Serialize)]
struct DataResponse<T: serde::Serialize> {
    data: T,
}

/// Failure payload wrapper.
#[derive(serde::Serialize)]
struct ErrorsResponse {
    errors: Vec<String>,
}

fn error_response(errors: Vec<String>, status: StatusCode) -> impl IntoResponse {
    (status, Json(ErrorsResponse { errors }))
}

// ── Sequence generation ────────────────────────────────────────

/// POST /fizzbuzz/run
///
/// Validation failures are a 400. A ledger failure is downgraded to a logged
/// warning and a dedicated metric status: the already-computed sequence is
/// still returned with a 200.
pub async fn run<L>(
    State(state): State<ApiState<L>>,
    Query(raw): Query<HashMap<String, String>>,
) -> impl IntoResponse
where
    L: FrequencyLedger + Clone + 'static,
{
    state.metrics.record_request("run").await;

    let params = match parse_fizzbuzz_params(&raw) {
        Ok(params) => params,
        Err(errors) => {
            state.metrics.record_outcome("run", Outcome::Error).await;
            warn!(?errors, "rejected fizzbuzz request");
            return error_response(errors, StatusCode::BAD_REQUEST).into_response();
        }
    };

    let sequence = fizzbuzz_core::generate(&params);

    match state.ledger.record_occurrence(&params) {
        Ok(()) => state.metrics.record_outcome("run", Outcome::Success).await,
        Err(e) => {
            warn!(error = %e, "failed to save request stats");
            state
                .metrics
                .record_outcome("run", Outcome::ErrorOnStatSave)
                .await;
        }
    }

    Json(DataResponse { data: sequence }).into_response()
}

// ── Stats ──────────────────────────────────────────────────────

/// GET /fizzbuzz/stats/most-requested
///
/// An empty ledger answers 200 with a null `data`; a storage failure is a
/// hard 500.
pub async fn most_requested<L>(State(state): State<ApiState<L>>) -> impl IntoResponse
where
    L: FrequencyLedger + Clone + 'static,
{
    state.metrics.record_request("stats").await;

    match state.ledger.most_frequent() {
        Ok(record) => {
            state.metrics.record_outcome("stats", Outcome::Success).await;
            Json(DataResponse { data: record }).into_response()
        }
        Err(e) => {
            error!(error = %e, "failed to retrieve fizzbuzz stats");
            state.metrics.record_outcome("stats", Outcome::Error).await;
            error_response(vec![e.to_string()], StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
    }
}

// ── Prometheus ─────────────────────────────────────────────────

/// GET /metrics
pub async fn prometheus_metrics<L>(State(state): State<ApiState<L>>) -> impl IntoResponse
where
    L: FrequencyLedger + Clone + 'static,
{
    let snapshots = state.metrics.snapshot().await;
    let body = render_prometheus(&snapshots);
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}

// ── Parameter validation ───────────────────────────────────────

/// Parse and validate the five query parameters.
///
/// All parameters are mandatory. Integer parse failures and a non-positive
/// limit are collected into one message list rather than reported
/// first-error-wins; a limit that fails to parse also fails the positivity
/// check.
fn parse_fizzbuzz_params(raw: &HashMap<String, String>) -> Result<FizzBuzzParams, Vec<String>> {
    let int1_raw = raw.get("int1").map(String::as_str).unwrap_or_default();
    let int2_raw = raw.get("int2").map(String::as_str).unwrap_or_default();
    let limit_raw = raw.get("limit").map(String::as_str).unwrap_or_default();
    let str1 = raw.get("str1").map(String::as_str).unwrap_or_default();
    let str2 = raw.get("str2").map(String::as_str).unwrap_or_default();

    if int1_raw.is_empty()
        || int2_raw.is_empty()
        || limit_raw.is_empty()
        || str1.is_empty()
        || str2.is_empty()
    {
        return Err(vec![
            "int1, int2, limit, str1 and str2 are all mandatory".to_string(),
        ]);
    }

    let mut errors = Vec::new();

    let int1 = int1_raw.parse::<i64>().unwrap_or_else(|e| {
        errors.push(format!("int1 err: {e}"));
        0
    });
    let int2 = int2_raw.parse::<i64>().unwrap_or_else(|e| {
        errors.push(format!("int2 err: {e}"));
        0
    });
    let limit = limit_raw.parse::<i64>().unwrap_or_else(|e| {
        errors.push(format!("limit err: {e}"));
        0
    });
    if limit <= 0 {
        errors.push("limit must be greater than 0".to_string());
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(FizzBuzzParams {
        int1,
        int2,
        limit,
        str1: str1.to_string(),
        str2: str2.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use fizzbuzz_metrics::RequestMetrics;
    use fizzbuzz_state::{FrequencyRecord, StatsError, StatsResult, StatsStore};

    /// Ledger that fails every operation, for error-path coverage.
    #[derive(Clone)]
    struct FailingLedger;

    impl FrequencyLedger for FailingLedger {
        fn record_occurrence(&self, _params: &FizzBuzzParams) -> StatsResult<()> {
            Err(StatsError::Write("connection reset".to_string()))
        }

        fn most_frequent(&self) -> StatsResult<Option<FrequencyRecord>> {
            Err(StatsError::Read("connection reset".to_string()))
        }
    }

    fn test_state() -> ApiState<StatsStore> {
        ApiState {
            ledger: StatsStore::open_in_memory().unwrap(),
            metrics: RequestMetrics::new(),
        }
    }

    fn failing_state() -> ApiState<FailingLedger> {
        ApiState {
            ledger: FailingLedger,
            metrics: RequestMetrics::new(),
        }
    }

    fn query(pairs: &[(&str, &str)]) -> Query<HashMap<String, String>> {
        Query(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn standard_query() -> Query<HashMap<String, String>> {
        query(&[
            ("int1", "3"),
            ("int2", "5"),
            ("limit", "15"),
            ("str1", "fizz"),
            ("str2", "buzz"),
        ])
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn run_missing_parameters() {
        let resp = run(State(test_state()), query(&[])).await.into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(
            body["errors"][0],
            "int1, int2, limit, str1 and str2 are all mandatory"
        );
    }

    #[tokio::test]
    async fn run_invalid_parameters_collects_all_errors() {
        let resp = run(
            State(test_state()),
            query(&[
                ("int1", "abc"),
                ("int2", "5"),
                ("limit", "zero"),
                ("str1", "fizz"),
                ("str2", "buzz"),
            ]),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        let errors = body["errors"].as_array().unwrap();
        // Bad int1, bad limit, and the positivity check on the unparsed limit.
        assert_eq!(errors.len(), 3);
    }

    #[tokio::test]
    async fn run_rejects_non_positive_limit() {
        let resp = run(
            State(test_state()),
            query(&[
                ("int1", "3"),
                ("int2", "5"),
                ("limit", "-1"),
                ("str1", "fizz"),
                ("str2", "buzz"),
            ]),
        )
        .await
        .into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = body_json(resp).await;
        assert_eq!(body["errors"][0], "limit must be greater than 0");
    }

    #[tokio::test]
    async fn run_returns_wrapped_sequence() {
        let resp = run(State(test_state()), standard_query())
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        let data = body["data"].as_array().unwrap();
        assert_eq!(data.len(), 15);
        assert_eq!(data[2], "fizz");
        assert_eq!(data[4], "buzz");
        assert_eq!(data[14], "fizzbuzz");
    }

    #[tokio::test]
    async fn run_records_occurrence_in_ledger() {
        let state = test_state();

        run(State(state.clone()), standard_query()).await;
        run(State(state.clone()), standard_query()).await;

        let record = state.ledger.most_frequent().unwrap().unwrap();
        assert_eq!(record.hits, 2);
    }

    #[tokio::test]
    async fn run_succeeds_even_when_ledger_fails() {
        let resp = run(State(failing_state()), standard_query())
            .await
            .into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 15);
    }

    #[tokio::test]
    async fn run_ledger_failure_counts_as_stat_save_error() {
        let state = failing_state();

        run(State(state.clone()), standard_query()).await;

        let snapshot = state.metrics.snapshot().await;
        assert_eq!(snapshot[0].job, "run");
        assert_eq!(snapshot[0].requests, 1);
        assert_eq!(snapshot[0].error_on_stat_save, 1);
        assert_eq!(snapshot[0].success, 0);
    }

    #[tokio::test]
    async fn most_requested_empty_ledger_returns_null_data() {
        let resp = most_requested(State(test_state())).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn most_requested_returns_top_record() {
        let state = test_state();

        for _ in 0..2 {
            run(State(state.clone()), standard_query()).await;
        }
        run(
            State(state.clone()),
            query(&[
                ("int1", "2"),
                ("int2", "7"),
                ("limit", "10"),
                ("str1", "a"),
                ("str2", "b"),
            ]),
        )
        .await;

        let resp = most_requested(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body = body_json(resp).await;
        assert_eq!(body["data"]["int1"], 3);
        assert_eq!(body["data"]["int2"], 5);
        assert_eq!(body["data"]["limit"], 15);
        assert_eq!(body["data"]["str1"], "fizz");
        assert_eq!(body["data"]["str2"], "buzz");
        assert_eq!(body["data"]["hits"], 2);
    }

    #[tokio::test]
    async fn most_requested_ledger_failure_is_500() {
        let resp = most_requested(State(failing_state())).await.into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(resp).await;
        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].as_str().unwrap().contains("read error"));
    }

    #[tokio::test]
    async fn prometheus_endpoint_returns_text() {
        let state = test_state();
        run(State(state.clone()), standard_query()).await;

        let resp = prometheus_metrics(State(state)).await.into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let content_type = resp.headers().get("content-type").unwrap().to_str().unwrap();
        assert!(content_type.contains("text/plain"));

        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(body.contains("fizzbuzz_processed_ops_total{job=\"run\",status=\"request\"} 1"));
        assert!(body.contains("fizzbuzz_processed_ops_total{job=\"run\",status=\"success\"} 1"));
    }

    #[test]
    fn parse_accepts_negative_divisors() {
        let raw: HashMap<String, String> = [
            ("int1", "-3"),
            ("int2", "5"),
            ("limit", "15"),
            ("str1", "fizz"),
            ("str2", "buzz"),
        ]
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        let params = parse_fizzbuzz_params(&raw).unwrap();
        assert_eq!(params.int1, -3);
    }
}
