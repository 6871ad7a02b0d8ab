//! CLI error types with miette diagnostics.
//!
//! Maps API and config errors into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use pfsense_config::ConfigError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not reach the appliance")]
    #[diagnostic(
        code(pfsense::connection_failed),
        help(
            "Check that the appliance is running and the REST API package is installed.\n\
             Self-signed certificate? Try --insecure (-k)."
        )
    )]
    ConnectionFailed {
        #[source]
        source: pfsense_api::Error,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(pfsense::timeout),
        help("Raise the limit with --timeout or the profile's `timeout` setting.")
    )]
    Timeout {
        #[source]
        source: pfsense_api::Error,
    },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed")]
    #[diagnostic(
        code(pfsense::auth_failed),
        help(
            "Verify the profile's auth_mode and credentials.\n\
             Store a secret with: pfsense config set-secret <password|client-token|token>"
        )
    )]
    AuthFailed {
        #[source]
        source: pfsense_api::Error,
    },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(pfsense::not_found),
        help("Run: pfsense {list_command} to see available {resource_type}s")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(pfsense::api_error))]
    Api(pfsense_api::Error),

    // ── Config ───────────────────────────────────────────────────────
    #[error("No appliance configured")]
    #[diagnostic(
        code(pfsense::no_config),
        help(
            "Add a profile to {path}\n\
             or pass --url together with PFSENSE_USERNAME / PFSENSE_PASSWORD."
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(pfsense::config))]
    Config(#[from] ConfigError),

    #[error("invalid {field}: {reason}")]
    #[diagnostic(code(pfsense::validation))]
    Validation { field: String, reason: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(pfsense::io))]
    Io(#[from] std::io::Error),
}

impl From<pfsense_api::Error> for CliError {
    fn from(err: pfsense_api::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout { source: err }
        } else if err.is_unauthorized() {
            Self::AuthFailed { source: err }
        } else if matches!(err, pfsense_api::Error::Transport(_) | pfsense_api::Error::Tls(_)) {
            Self::ConnectionFailed { source: err }
        } else {
            Self::Api(err)
        }
    }
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::AuthFailed { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Api(err) if err.is_not_found() => exit_code::NOT_FOUND,
            Self::Config(ConfigError::NoCredentials { .. }) => exit_code::AUTH,
            Self::NoConfig { .. } | Self::Validation { .. } => exit_code::USAGE,
            Self::Api(_) | Self::Config(_) | Self::Io(_) => exit_code::GENERAL,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_maps_to_auth_exit_code() {
        let err = CliError::from(pfsense_api::Error::Status {
            status: 401,
            body: String::new(),
        });
        assert!(matches!(err, CliError::AuthFailed { .. }));
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }

    #[test]
    fn not_found_status_exit_code() {
        let err = CliError::from(pfsense_api::Error::Status {
            status: 404,
            body: String::new(),
        });
        assert_eq!(err.exit_code(), exit_code::NOT_FOUND);
    }

    #[test]
    fn server_error_is_general() {
        let err = CliError::from(pfsense_api::Error::Status {
            status: 500,
            body: "boom".into(),
        });
        assert_eq!(err.exit_code(), exit_code::GENERAL);
        assert!(err.to_string().contains("500"));
    }

    #[test]
    fn missing_credentials_is_auth() {
        let err = CliError::from(ConfigError::NoCredentials {
            profile: "home".into(),
        });
        assert_eq!(err.exit_code(), exit_code::AUTH);
    }
}
