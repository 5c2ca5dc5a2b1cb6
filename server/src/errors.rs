// server/src/errors.rs

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use user_orders::{RepositoryError, ValidationError};

pub const USER_NOT_FOUND: &str = "User not found";

#[derive(Debug, Error)]
pub enum AppError {
  #[error("{0}")]
  NotFound(String),

  #[error("{0}")]
  MethodNotSupported(String),

  #[error("Arguments not valid")]
  ValidationFailed(#[from] ValidationError),

  // Holds the extractor's own message for the logs; clients only see the generic one.
  #[error("Invalid arguments: {0}")]
  TypeMismatch(String),

  #[error("Repository Error: {0}")]
  Repository(#[from] RepositoryError),

  #[error("Configuration Error: {0}")]
  Config(String),
}

impl AppError {
  pub fn user_not_found() -> Self {
    AppError::NotFound(USER_NOT_FOUND.to_string())
  }

  /// Message placed in the response body.
  pub fn client_message(&self) -> String {
    match self {
      AppError::NotFound(m) | AppError::MethodNotSupported(m) => m.clone(),
      AppError::ValidationFailed(_) => "Arguments not valid".to_string(),
      AppError::TypeMismatch(_) => "Invalid arguments".to_string(),
      AppError::Repository(_) | AppError::Config(_) => "Internal server error".to_string(),
    }
  }
}

/// Body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorMessage {
  pub message: String,
}

impl ResponseError for AppError {
  fn status_code(&self) -> StatusCode {
    match self {
      AppError::NotFound(_) => StatusCode::NOT_FOUND,
      AppError::MethodNotSupported(_) => StatusCode::METHOD_NOT_ALLOWED,
      AppError::ValidationFailed(_) | AppError::TypeMismatch(_) => StatusCode::BAD_REQUEST,
      AppError::Repository(_) | AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  fn error_response(&self) -> HttpResponse {
    match self {
      AppError::ValidationFailed(e) => {
        tracing::warn!(violations = ?e.violations, "Responding with validation error");
      }
      AppError::Repository(_) | AppError::Config(_) => {
        tracing::error!(application_error = %self, "Responding with error");
      }
      _ => tracing::warn!(application_error = %self, "Responding with error"),
    }
    HttpResponse::build(self.status_code()).json(ErrorMessage {
      message: self.client_message(),
    })
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
