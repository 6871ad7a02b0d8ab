//! Shared configuration for pfSense API tools.
//!
//! TOML profiles, credential resolution (env + keyring + plaintext), and
//! translation of a profile into a ready [`pfsense_api::Client`].

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use pfsense_api::{Client, Credentials, TlsMode, TransportConfig};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const KEYRING_SERVICE: &str = "pfsense";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no credentials configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{profile}' not found")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build API client: {0}")]
    Client(#[from] pfsense_api::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Deserialize, Serialize)]
pub struct Config {
    /// Default profile name.
    pub default_profile: Option<String>,

    /// Global defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Named appliance profiles.
    #[serde(default)]
    pub profiles: HashMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: HashMap::new(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_timeout() -> u64 {
    30
}

/// A named appliance profile.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Profile {
    /// Appliance base URL (e.g., "https://192.168.1.1").
    pub url: String,

    /// Auth mode: "local", "token", "jwt", or "none".
    #[serde(default = "default_auth_mode")]
    pub auth_mode: String,

    /// Username for local auth.
    pub username: Option<String>,

    /// Password for local auth (plaintext; prefer keyring or env var).
    pub password: Option<String>,

    /// API client id for token auth.
    pub client_id: Option<String>,

    /// API client token (plaintext; prefer keyring or env var).
    pub client_token: Option<String>,

    /// Pre-issued JWT for jwt auth.
    pub token: Option<String>,

    /// Path to custom CA certificate.
    pub ca_cert: Option<PathBuf>,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,
}

fn default_auth_mode() -> String {
    "local".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "pfsense-rs", "pfsense").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("pfsense");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load Config from a specific file, layered over defaults and under
/// `PFSENSE_`-prefixed environment variables.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    debug!(path = %path.display(), "loading config");
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("PFSENSE_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Credential resolution ───────────────────────────────────────────

/// Resolve one secret: env var → system keyring → plaintext profile field.
fn resolve_secret(
    env_name: &str,
    profile_name: &str,
    entry: &str,
    plaintext: Option<&String>,
) -> Option<SecretString> {
    if let Ok(val) = std::env::var(env_name) {
        return Some(SecretString::from(val));
    }

    if let Ok(kr) = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{entry}")) {
        if let Ok(secret) = kr.get_password() {
            return Some(SecretString::from(secret));
        }
    }

    plaintext.map(|s| SecretString::from(s.clone()))
}

/// Store a secret in the system keyring under `<profile>/<entry>`.
pub fn store_secret(profile_name: &str, entry: &str, secret: &str) -> Result<(), ConfigError> {
    let kr = keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/{entry}")).map_err(
        |e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        },
    )?;
    kr.set_password(secret)
        .map_err(|e| ConfigError::Validation {
            field: "keyring".into(),
            reason: e.to_string(),
        })
}

/// Resolve `Credentials` from a profile's `auth_mode` field.
pub fn resolve_credentials(profile: &Profile, profile_name: &str) -> Result<Credentials, ConfigError> {
    let missing = || ConfigError::NoCredentials {
        profile: profile_name.into(),
    };

    match profile.auth_mode.as_str() {
        "local" => {
            let username = profile
                .username
                .clone()
                .or_else(|| std::env::var("PFSENSE_USERNAME").ok())
                .ok_or_else(missing)?;
            let password = resolve_secret(
                "PFSENSE_PASSWORD",
                profile_name,
                "password",
                profile.password.as_ref(),
            )
            .ok_or_else(missing)?;
            Ok(Credentials::Local { username, password })
        }
        "token" => {
            let client_id = profile
                .client_id
                .clone()
                .or_else(|| std::env::var("PFSENSE_CLIENT_ID").ok())
                .ok_or_else(missing)?;
            let client_token = resolve_secret(
                "PFSENSE_CLIENT_TOKEN",
                profile_name,
                "client-token",
                profile.client_token.as_ref(),
            )
            .ok_or_else(missing)?;
            Ok(Credentials::Token {
                client_id,
                client_token,
            })
        }
        "jwt" => {
            let token = resolve_secret("PFSENSE_TOKEN", profile_name, "token", profile.token.as_ref())
                .ok_or_else(missing)?;
            Ok(Credentials::Jwt { token })
        }
        "none" => Ok(Credentials::None),
        other => Err(ConfigError::Validation {
            field: "auth_mode".into(),
            reason: format!("expected 'local', 'token', 'jwt', or 'none', got '{other}'"),
        }),
    }
}

/// Build the transport settings for a profile.
pub fn transport_config(profile: &Profile, defaults: &Defaults) -> TransportConfig {
    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else if let Some(ref ca_path) = profile.ca_cert {
        TlsMode::CustomCa(ca_path.clone())
    } else {
        TlsMode::System
    };

    TransportConfig {
        tls,
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    }
}

/// Check the profile URL before any client is built.
pub fn validate_url(raw: &str) -> Result<url::Url, ConfigError> {
    let url: url::Url = raw.parse().map_err(|_| ConfigError::Validation {
        field: "url".into(),
        reason: format!("invalid URL: {raw}"),
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::Validation {
            field: "url".into(),
            reason: format!("unsupported scheme '{other}'"),
        }),
    }
}

/// Build a ready API client from a profile.
pub fn profile_to_client(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<Client, ConfigError> {
    let url = validate_url(&profile.url)?;
    let credentials = resolve_credentials(profile, profile_name)?;
    let transport = transport_config(profile, defaults);
    Ok(Client::new(url.as_str(), credentials, &transport)?)
}

impl Config {
    /// The profile named `name`, or the default profile when `name` is `None`.
    pub fn profile(&self, name: Option<&str>) -> Result<(String, &Profile), ConfigError> {
        let name = name
            .map(str::to_owned)
            .or_else(|| self.default_profile.clone())
            .unwrap_or_else(|| "default".into());
        self.profiles
            .get(&name)
            .map(|p| (name.clone(), p))
            .ok_or(ConfigError::UnknownProfile { profile: name })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pfsense_api::AuthMode;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = r#"
default_profile = "home"

[defaults]
output = "json"
timeout = 10

[profiles.home]
url = "https://192.168.1.1"
auth_mode = "token"
client_id = "61646d696e"
client_token = "plain-token"
insecure = true

[profiles.lab]
url = "https://lab-fw.example.net/pfsense"
username = "admin"
password = "pfsense"
ca_cert = "/etc/ssl/lab-ca.pem"
timeout = 5
"#;

    fn sample() -> Config {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, SAMPLE).unwrap();
        load_config_from(&path).unwrap()
    }

    #[test]
    fn loads_profiles_and_defaults() {
        let cfg = sample();
        assert_eq!(cfg.default_profile.as_deref(), Some("home"));
        assert_eq!(cfg.defaults.output, "json");
        assert_eq!(cfg.defaults.timeout, 10);
        assert!(!cfg.defaults.insecure);

        let (name, home) = cfg.profile(None).unwrap();
        assert_eq!(name, "home");
        assert_eq!(home.auth_mode, "token");

        let (_, lab) = cfg.profile(Some("lab")).unwrap();
        assert_eq!(lab.auth_mode, "local");
        assert_eq!(lab.timeout, Some(5));
    }

    #[test]
    fn unknown_profile_is_reported() {
        let cfg = sample();
        let err = cfg.profile(Some("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { ref profile } if profile == "nope"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(cfg.default_profile.as_deref(), Some("default"));
        assert_eq!(cfg.defaults.timeout, 30);
        assert!(cfg.profiles.is_empty());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.profiles.insert(
            "default".into(),
            Profile {
                url: "https://fw.local".into(),
                auth_mode: "none".into(),
                ..Profile::default()
            },
        );
        save_config_to(&cfg, &path).unwrap();

        let loaded = load_config_from(&path).unwrap();
        let (_, profile) = loaded.profile(None).unwrap();
        assert_eq!(profile.url, "https://fw.local");
        assert_eq!(profile.auth_mode, "none");
    }

    #[test]
    fn transport_respects_overrides() {
        let cfg = sample();
        let (_, home) = cfg.profile(Some("home")).unwrap();
        let t = transport_config(home, &cfg.defaults);
        assert!(matches!(t.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(t.timeout, Duration::from_secs(10));

        let (_, lab) = cfg.profile(Some("lab")).unwrap();
        let t = transport_config(lab, &cfg.defaults);
        assert!(matches!(t.tls, TlsMode::CustomCa(ref p) if p == Path::new("/etc/ssl/lab-ca.pem")));
        assert_eq!(t.timeout, Duration::from_secs(5));
    }

    #[test]
    fn plaintext_token_credentials() {
        let cfg = sample();
        let (name, home) = cfg.profile(Some("home")).unwrap();
        let creds = resolve_credentials(home, &name).unwrap();
        assert_eq!(creds.mode(), AuthMode::Token);
    }

    #[test]
    fn none_auth_needs_no_secrets() {
        let profile = Profile {
            url: "https://fw.local".into(),
            auth_mode: "none".into(),
            ..Profile::default()
        };
        let creds = resolve_credentials(&profile, "x").unwrap();
        assert_eq!(creds.mode(), AuthMode::None);

        let client = profile_to_client(&profile, "x", &Defaults::default()).unwrap();
        assert_eq!(client.base_url().as_str(), "https://fw.local/");
    }

    #[test]
    fn rejects_unknown_auth_mode() {
        let profile = Profile {
            url: "https://fw.local".into(),
            auth_mode: "kerberos".into(),
            ..Profile::default()
        };
        let err = resolve_credentials(&profile, "x").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "auth_mode"));
    }

    #[test]
    fn rejects_bad_urls() {
        assert!(validate_url("not a url").is_err());
        assert!(validate_url("ftp://fw.local").is_err());
        assert!(validate_url("https://fw.local:8443").is_ok());
    }
}
