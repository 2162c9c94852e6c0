use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing location: {0}")]
    MissingLocation(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Directions API error: {0}")]
    DirectionsApi(String),

    #[error("Incident source error: {0}")]
    IncidentSource(String),

    #[error("No routes found")]
    NoRoutesFound,
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::MissingLocation(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::DirectionsApi(ref e) => {
                tracing::error!("Directions API error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error")
            }
            AppError::IncidentSource(ref e) => {
                tracing::error!("Incident source error: {}", e);
                (StatusCode::BAD_GATEWAY, "Incident data service error")
            }
            AppError::NoRoutesFound => {
                tracing::info!("No routes found for request");
                (StatusCode::NOT_FOUND, "No routes found")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (AppError::MissingLocation("origin".into()), StatusCode::BAD_REQUEST),
            (AppError::InvalidRequest("dial".into()), StatusCode::BAD_REQUEST),
            (AppError::DirectionsApi("down".into()), StatusCode::BAD_GATEWAY),
            (AppError::IncidentSource("down".into()), StatusCode::BAD_GATEWAY),
            (AppError::NoRoutesFound, StatusCode::NOT_FOUND),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_no_routes_message() {
        assert_eq!(AppError::NoRoutesFound.to_string(), "No routes found");
    }
}
