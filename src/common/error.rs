// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error")]
    ValidationError(#[from] validator::ValidationErrors),

    // Requested id has no matching row. Rendered as a bare 404.
    #[error("Resource not found")]
    NotFound,

    // Includes foreign-key violations (e.g. an order for a customer that does not exist).
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(errors) => {
                let mut details: HashMap<String, Vec<String>> = HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "One or more fields are invalid.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::NotFound => return StatusCode::NOT_FOUND.into_response(),

            ref e => {
                tracing::error!("Internal server error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred.")
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::{ValidationError, ValidationErrors};

    async fn body_bytes(response: Response) -> Vec<u8> {
        response
            .into_body()
            .collect()
            .await
            .expect("body should be readable")
            .to_bytes()
            .to_vec()
    }

    #[tokio::test]
    async fn not_found_is_an_empty_404() {
        let response = AppError::NotFound.into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn validation_errors_list_every_field() {
        let mut errors = ValidationErrors::new();
        let mut err = ValidationError::new("length");
        err.message = Some("fullName must not be empty".into());
        errors.add("full_name", err);

        let response = AppError::ValidationError(errors).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).expect("json body");
        assert_eq!(body["details"]["full_name"][0], "fullName must not be empty");
    }

    #[tokio::test]
    async fn database_errors_become_500_without_leaking_details() {
        let response = AppError::DatabaseError(sqlx::Error::RowNotFound).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: serde_json::Value =
            serde_json::from_slice(&body_bytes(response).await).expect("json body");
        assert_eq!(body["error"], "An unexpected error occurred.");
    }
}
