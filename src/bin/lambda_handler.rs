//! AWS Lambda handler for life expectancy requests
//!
//! Accepts `{"birthdate": "YYYY-MM-DD", "gender": "m|f|all"}` via JSON and
//! returns the estimation result, or `{"error": message}` on invalid input.
//!
//! Supports Lambda Function URLs for direct HTTP access. The table is loaded
//! once at startup; a malformed dataset aborts initialization.

use chrono::Utc;
use lambda_http::{run, service_fn, Body, Error, Request, Response};
use life_expectancy_system::table::loader;
use life_expectancy_system::{compute_life_expectancy, EstimateError, LifeExpectancyTable};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Input fields for the estimation
///
/// Both fields are kept as raw JSON values so that missing and non-string
/// inputs can be rejected uniformly before reaching the estimator.
#[derive(Debug, Deserialize)]
struct EstimateRequest {
    #[serde(default)]
    birthdate: Option<Value>,
    #[serde(default)]
    gender: Option<Value>,
}

fn error_response(status: u16, message: &str) -> Response<Body> {
    let payload = serde_json::json!({ "error": message });
    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(payload.to_string()))
        .unwrap()
}

fn json_response<T: Serialize>(body: &T) -> Response<Body> {
    Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// Lambda handler function
async fn handler(event: Request, table: &LifeExpectancyTable) -> Result<Response<Body>, Error> {
    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)
            .unwrap());
    }

    // Parse request body
    let body = event.body();
    let body_str = match body {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => "{}".to_string(),
    };

    let request: EstimateRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => {
            return Ok(error_response(400, &format!("Invalid JSON: {}", e)));
        }
    };

    let (Some(Value::String(birthdate)), Some(Value::String(gender))) =
        (request.birthdate, request.gender)
    else {
        return Ok(error_response(400, "Birthdate and gender are required."));
    };

    match compute_life_expectancy(table, &birthdate, &gender, Utc::now().date_naive()) {
        Ok(result) => Ok(json_response(&result)),
        Err(EstimateError::NoDataForAge(age)) => {
            // Table gap: a configuration fault, not a user input problem
            log::error!("Life expectancy table has no entry for age {}", age);
            Ok(error_response(
                400,
                "Unexpected error computing life expectancy.",
            ))
        }
        Err(e) => Ok(error_response(400, &e.to_string())),
    }
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();

    let table = Arc::new(loader::embedded_2023()?);
    log::info!(
        "Life expectancy table ready: ages {}..={}, reference year {}",
        table.min_age(),
        table.max_age(),
        table.reference_year()
    );

    run(service_fn(move |event: Request| {
        let table = Arc::clone(&table);
        async move { handler(event, &table).await }
    }))
    .await
}
