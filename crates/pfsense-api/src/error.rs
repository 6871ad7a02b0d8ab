use thiserror::Error;

/// Top-level error type for the `pfsense-api` crate.
///
/// Every public operation fails with one of three broad kinds:
/// transport (the HTTP exchange itself failed or returned a non-success
/// status), encode (the request body could not be serialized), or decode
/// (the response did not match the expected envelope/payload shape).
/// Use [`Error::is_transport`], [`Error::is_encode`] and [`Error::is_decode`]
/// to branch on the kind without matching every variant.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The appliance answered with a non-success HTTP status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Credentials could not be turned into a valid auth header.
    #[error("Authentication setup failed: {message}")]
    Authentication { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// Request body serialization failed.
    #[error("Encode error: {0}")]
    Encode(#[source] serde_json::Error),

    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Decode { message: String, body: String },
}

impl Error {
    /// Returns `true` if the HTTP call itself failed (network, TLS, or a
    /// non-success status). No response decoding was attempted.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::Tls(_)
        )
    }

    /// Returns `true` if the request body could not be serialized.
    pub fn is_encode(&self) -> bool {
        matches!(self, Self::Encode(_))
    }

    /// Returns `true` if the response body did not match the expected shape.
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::Decode { .. })
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Returns `true` if the appliance rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }

    /// Returns `true` if the request timed out.
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::Transport(e) => e.is_timeout(),
            _ => false,
        }
    }
}
