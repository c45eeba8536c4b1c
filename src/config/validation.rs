//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, page sizes >= 1)
//! - Check the bind address and auth header are usable
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ApiConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::HeaderName;
use thiserror::Error;

use crate::config::schema::ApiConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ApiConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    if config.auth.api_key.is_empty() {
        errors.push(ValidationError::new("auth.api_key", "must not be empty"));
    }

    if HeaderName::from_bytes(config.auth.header_name.as_bytes()).is_err() {
        errors.push(ValidationError::new(
            "auth.header_name",
            format!("'{}' is not a valid header name", config.auth.header_name),
        ));
    }

    let pagination = &config.pagination;
    if pagination.default_page == 0 {
        errors.push(ValidationError::new("pagination.default_page", "must be at least 1"));
    }
    if pagination.default_limit == 0 {
        errors.push(ValidationError::new("pagination.default_limit", "must be at least 1"));
    }
    if let Some(max_limit) = pagination.max_limit {
        if max_limit < pagination.default_limit {
            errors.push(ValidationError::new(
                "pagination.max_limit",
                format!(
                    "{} is smaller than default_limit {}",
                    max_limit, pagination.default_limit
                ),
            ));
        }
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
