use reqwest::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

use crate::error::Error;

/// Which authentication mode the appliance's REST API is configured for.
///
/// Marker enum (no data) -- the actual secrets live in [`Credentials`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    /// Local user database, sent as HTTP basic auth.
    Local,
    /// API client id + token pair.
    Token,
    /// Pre-issued JWT, sent as a bearer token.
    Jwt,
    /// No credentials attached.
    None,
}

/// Credentials for authenticating with the appliance.
///
/// Each variant carries the secret material needed for its auth mode.
#[derive(Debug, Clone)]
pub enum Credentials {
    /// `Authorization: Basic ...` from a local username and password.
    Local {
        username: String,
        password: SecretString,
    },

    /// `Authorization: <client_id> <client_token>`.
    Token {
        client_id: String,
        client_token: SecretString,
    },

    /// `Authorization: Bearer <token>`.
    Jwt { token: SecretString },

    /// Send requests without an `Authorization` header.
    None,
}

impl Credentials {
    pub fn mode(&self) -> AuthMode {
        match self {
            Self::Local { .. } => AuthMode::Local,
            Self::Token { .. } => AuthMode::Token,
            Self::Jwt { .. } => AuthMode::Jwt,
            Self::None => AuthMode::None,
        }
    }

    /// Attach these credentials to an outgoing request.
    pub(crate) fn apply(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::RequestBuilder, Error> {
        match self {
            Self::Local { username, password } => {
                Ok(request.basic_auth(username, Some(password.expose_secret())))
            }
            Self::Token {
                client_id,
                client_token,
            } => {
                let value =
                    sensitive_header(&format!("{client_id} {}", client_token.expose_secret()))?;
                Ok(request.header(AUTHORIZATION, value))
            }
            Self::Jwt { token } => {
                let value = sensitive_header(&format!("Bearer {}", token.expose_secret()))?;
                Ok(request.header(AUTHORIZATION, value))
            }
            Self::None => Ok(request),
        }
    }
}

fn sensitive_header(raw: &str) -> Result<HeaderValue, Error> {
    let mut value = HeaderValue::from_str(raw).map_err(|e| Error::Authentication {
        message: format!("invalid authorization header value: {e}"),
    })?;
    value.set_sensitive(true);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_matches_variant() {
        let creds = Credentials::Token {
            client_id: "abc".into(),
            client_token: SecretString::from("xyz".to_owned()),
        };
        assert_eq!(creds.mode(), AuthMode::Token);
        assert_eq!(Credentials::None.mode(), AuthMode::None);
    }

    #[test]
    fn rejects_header_with_newline() {
        let creds = Credentials::Jwt {
            token: SecretString::from("bad\ntoken".to_owned()),
        };
        let request = reqwest::Client::new().get("http://localhost/");
        let result = creds.apply(request);
        assert!(matches!(result, Err(Error::Authentication { .. })));
    }
}
