// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use activity_calendar::error::AppError;
use activity_calendar::models::ValidationError;
use axum::body::to_bytes;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;

async fn render(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_validation_error_is_bad_request() {
    let (status, body) = render(ValidationError::NegativeDistance(-1.0).into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "validation_error");
    assert!(body["details"].is_string());
}

#[tokio::test]
async fn test_authentication_error_is_unauthorized() {
    let (status, body) = render(AppError::Authentication).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "not_authenticated");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_api_error_is_bad_gateway() {
    let (status, body) = render(AppError::Api("HTTP 503: unavailable".to_string())).await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "activity_api_error");
    assert_eq!(body["details"], "HTTP 503: unavailable");
}

#[tokio::test]
async fn test_storage_and_internal_errors_hide_details() {
    let (status, body) = render(AppError::Storage("disk full".to_string())).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "storage_error");
    assert!(body.get("details").is_none());

    let (status, body) = render(anyhow::anyhow!("boom").into()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "internal_error");
    assert!(body.get("details").is_none());
}

#[test]
fn test_validation_error_message() {
    let err: AppError = ValidationError::EmptyId.into();
    assert!(err.to_string().starts_with("Validation failed"));
}
