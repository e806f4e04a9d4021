use std::fmt;

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

use crate::models::api_response::failure_response;

const UNKNOWN_CAUSE: &str = "Unknown error";

/// The single failure a balance lookup can end in.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to fetch token balance: {message}")]
pub struct BalanceFetchError {
    message: String,
}

impl BalanceFetchError {
    pub fn new(cause: impl fmt::Display) -> Self {
        let message = cause.to_string();
        if message.trim().is_empty() {
            return Self::unknown();
        }
        Self { message }
    }

    pub fn unknown() -> Self {
        Self {
            message: UNKNOWN_CAUSE.to_string(),
        }
    }

    /// Message of the underlying cause, without the common prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Error, Debug)]
pub enum CustomError {
    #[error("Invalid input: {0}")]
    ValidationError(String),

    #[error(transparent)]
    BalanceFetch(#[from] BalanceFetchError),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
}

impl ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match self {
            CustomError::ValidationError(_) => StatusCode::BAD_REQUEST,
            CustomError::BalanceFetch(_) => StatusCode::BAD_GATEWAY,
            CustomError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        failure_response(self.status_code(), self.to_string())
    }
}
