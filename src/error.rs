//! Error types and handling for the `AirRoute` pipeline

use thiserror::Error;

/// Generic notification shown for every failure that is not a validation problem
pub const GENERIC_USER_MESSAGE: &str = "An error occurred. Please try again.";

/// Notification shown when the start or end text is missing
pub const MISSING_INPUT_MESSAGE: &str = "Please enter both start and end locations!";

/// Main error type for the `AirRoute` application
#[derive(Error, Debug)]
pub enum AirRouteError {
    /// Missing or malformed user input, raised before any remote call
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// The geocoder returned no candidates for a location text
    #[error("Location not found: {query}")]
    NotFound { query: String },

    /// The router reported that no feasible path exists
    #[error("No route found: {message}")]
    NoRoute { message: String },

    /// Transport failure, timeout, non-2xx status or unreadable payload from a provider
    #[error("Upstream error from {service}: {message}")]
    Upstream {
        service: &'static str,
        message: String,
    },

    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl AirRouteError {
    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new not-found error for the given query text
    pub fn not_found<S: Into<String>>(query: S) -> Self {
        Self::NotFound {
            query: query.into(),
        }
    }

    /// Create a new no-route error
    pub fn no_route<S: Into<String>>(message: S) -> Self {
        Self::NoRoute {
            message: message.into(),
        }
    }

    /// Create a new upstream error attributed to `service`
    pub fn upstream<S: Into<String>>(service: &'static str, message: S) -> Self {
        Self::Upstream {
            service,
            message: message.into(),
        }
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Wrap a transport-level `reqwest` failure. The URL is dropped so credentials
    /// passed as query parameters never reach the logs.
    #[must_use]
    pub fn transport(service: &'static str, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else {
            err.without_url().to_string()
        };
        Self::upstream(service, message)
    }

    /// Stable machine-readable error kind
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            AirRouteError::Validation { .. } => "validation",
            AirRouteError::NotFound { .. } => "not_found",
            AirRouteError::NoRoute { .. } => "no_route",
            AirRouteError::Upstream { .. } => "upstream",
            AirRouteError::Config { .. } => "config",
        }
    }

    /// Get the user-facing notification. Only missing input gets a specific
    /// message; the detailed error is meant for the logs.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            AirRouteError::Validation { .. } => MISSING_INPUT_MESSAGE.to_string(),
            _ => GENERIC_USER_MESSAGE.to_string(),
        }
    }
}
