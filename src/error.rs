//! Error types and handling for the SacredPath planner

use thiserror::Error;

/// Main error type for the planner
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Missing or invalid configuration, e.g. no forecast API key
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Forecast retrieval failed (network, HTTP status or decoding)
    #[error("Retrieval error: {message}")]
    Retrieval { message: String },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl PlannerError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new retrieval error
    pub fn retrieval<S: Into<String>>(message: S) -> Self {
        Self::Retrieval {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            PlannerError::Config { .. } => {
                "Configuration error. Please check your config file and API keys.".to_string()
            }
            PlannerError::Retrieval { .. } => {
                "Unable to fetch weather forecasts. Please check your internet connection."
                    .to_string()
            }
            PlannerError::Validation { message } => {
                format!("Invalid input: {message}")
            }
            PlannerError::Io { .. } => {
                "File operation failed. Please check file permissions.".to_string()
            }
        }
    }
}

impl From<reqwest_middleware::Error> for PlannerError {
    fn from(err: reqwest_middleware::Error) -> Self {
        match err {
            reqwest_middleware::Error::Reqwest(e) => e.into(),
            other => PlannerError::retrieval(other.to_string()),
        }
    }
}

// Request URLs carry the API key, so they never make it into the message
impl From<reqwest::Error> for PlannerError {
    fn from(err: reqwest::Error) -> Self {
        PlannerError::retrieval(err.without_url().to_string())
    }
}
