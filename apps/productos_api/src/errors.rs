// productos_api/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use dispatch::DispatchError;
use serde_json::json;
use thiserror::Error;

/// Generic message for 500s that were not mapped to an endpoint-specific one.
const GENERIC_SERVER_ERROR: &str = "Error interno del servidor";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  /// Unique-constraint violation on `codigo`. Surfaces as a 500 like any other
  /// persistence failure.
  #[error("Duplicate codigo: {0}")]
  DuplicateCodigo(String),

  #[error("Database Error: {0}")]
  Sqlx(#[from] sqlx::Error),

  #[error("Dispatch Error: {source}")]
  Dispatch {
    #[from] // Allows conversion from dispatch::DispatchError
    source: DispatchError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),

  /// An unexpected failure that has already been logged; only the public
  /// message reaches the client.
  #[error("{public_message}")]
  Server { public_message: &'static str },
}

impl AppError {
  /// True when the underlying database error is a unique-constraint violation
  /// (e.g. a duplicate `codigo`).
  pub fn is_unique_violation(&self) -> bool {
    match self {
      AppError::DuplicateCodigo(_) => true,
      AppError::Sqlx(sqlx::Error::Database(db_err)) => db_err.is_unique_violation(),
      _ => false,
    }
  }

  /// Keeps client-facing errors as they are. Anything else is logged with its
  /// full detail and replaced by a 500 carrying `public_message`.
  pub fn into_public(self, public_message: &'static str) -> AppError {
    match self {
      AppError::Validation(_) | AppError::NotFound(_) | AppError::Server { .. } => self,
      other => {
        tracing::error!(error = %other, unique_violation = other.is_unique_violation(), "{}", public_message);
        AppError::Server { public_message }
      }
    }
  }
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::Validation(_) => StatusCode::BAD_REQUEST,
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::Validation(m) => {
        tracing::warn!(application_error = %self, "Responding with validation error");
        HttpResponse::BadRequest().json(json!({"error": m}))
      }
      // Not-found responses carry no body.
      AppError::NotFound(_) => HttpResponse::NotFound().finish(),
      AppError::Server { public_message } => HttpResponse::InternalServerError().json(json!({"error": public_message})),
      _ => {
        tracing::error!(application_error = %self, "Responding with error");
        HttpResponse::InternalServerError().json(json!({"error": GENERIC_SERVER_ERROR}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;
  use actix_web::body::MessageBody;

  fn body_string(resp: HttpResponse) -> String {
    let bytes = resp.into_body().try_into_bytes().unwrap_or_default();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  #[test]
  fn not_found_has_empty_body() {
    let resp = AppError::NotFound("ProductoId=7".to_string()).error_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(resp), "");
  }

  #[test]
  fn internal_details_never_reach_the_client() {
    let err = AppError::Internal("connection reset by peer at 10.0.0.3".to_string());
    let resp = err.error_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_string(resp);
    assert!(!body.contains("10.0.0.3"));
    assert!(body.contains(GENERIC_SERVER_ERROR));
  }

  #[test]
  fn into_public_keeps_client_errors() {
    let validation = AppError::Validation("Codigo es requerido".to_string()).into_public("x");
    assert!(matches!(validation, AppError::Validation(_)));

    let not_found = AppError::NotFound("1".to_string()).into_public("x");
    assert!(matches!(not_found, AppError::NotFound(_)));
  }

  #[test]
  fn into_public_replaces_unexpected_errors() {
    let err = AppError::Sqlx(sqlx::Error::PoolTimedOut).into_public("Error al eliminar el producto");
    assert!(matches!(err, AppError::Server { public_message } if public_message == "Error al eliminar el producto"));
    let resp = err.error_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body_string(resp).contains("Error al eliminar el producto"));
  }

  #[test]
  fn duplicate_codigo_is_a_server_error() {
    let err = AppError::DuplicateCodigo("P1".to_string());
    assert!(err.is_unique_violation());
    assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    let public = err.into_public("Error al crear el producto. Verifique si el código ya existe.");
    assert!(matches!(public, AppError::Server { .. }));
  }

  #[test]
  fn dispatch_errors_convert() {
    let err: AppError = DispatchError::HandlerNotRegistered {
      request_type: "GetProductosQuery".to_string(),
    }
    .into();
    assert!(matches!(err, AppError::Dispatch { .. }));
    assert!(!err.is_unique_violation());
  }
}
