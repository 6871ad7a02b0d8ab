//! CLI configuration: thin wrapper around `pfsense_config`.
//!
//! Adds resolution that respects `GlobalOpts` flag overrides
//! (--profile, --url, --insecure, --timeout).

use pfsense_api::Client;
use pfsense_config::ConfigError;

use crate::cli::GlobalOpts;
use crate::error::CliError;

pub use pfsense_config::{Config, Profile, config_path, load_config_or_default};

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Build an API client from the active profile with flag overrides applied.
///
/// Without a matching profile, `--url` plus `PFSENSE_*` credential
/// variables are enough (local auth).
pub fn build_client(global: &GlobalOpts) -> Result<Client, CliError> {
    let cfg = load_config_or_default();
    let (profile_name, mut profile) = match cfg.profile(global.profile.as_deref()) {
        Ok((name, profile)) => (name, profile.clone()),
        Err(ConfigError::UnknownProfile { profile }) => {
            let url = global.url.clone().ok_or_else(|| CliError::NoConfig {
                path: config_path().display().to_string(),
            })?;
            let fallback = Profile {
                url,
                auth_mode: "local".into(),
                ..Profile::default()
            };
            (profile, fallback)
        }
        Err(e) => return Err(e.into()),
    };

    apply_overrides(&mut profile, global);

    tracing::debug!(profile = %profile_name, url = %profile.url, "building client");
    Ok(pfsense_config::profile_to_client(
        &profile,
        &profile_name,
        &cfg.defaults,
    )?)
}

/// Fold `--url`, `--timeout` and `--insecure` into a profile.
fn apply_overrides(profile: &mut Profile, global: &GlobalOpts) {
    if let Some(ref url) = global.url {
        profile.url.clone_from(url);
    }
    if let Some(timeout) = global.timeout {
        profile.timeout = Some(timeout);
    }
    if global.insecure {
        profile.insecure = Some(true);
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::Cli;

    #[test]
    fn flags_override_profile_fields() {
        let cli = Cli::parse_from([
            "pfsense",
            "--url",
            "https://10.0.0.1",
            "--timeout",
            "5",
            "-k",
            "vlans",
            "list",
        ]);
        let mut profile = Profile {
            url: "https://192.168.1.1".into(),
            timeout: Some(30),
            ..Profile::default()
        };

        apply_overrides(&mut profile, &cli.global);

        assert_eq!(profile.url, "https://10.0.0.1");
        assert_eq!(profile.timeout, Some(5));
        assert_eq!(profile.insecure, Some(true));
    }

    #[test]
    fn absent_flags_leave_profile_alone() {
        let cli = Cli::parse_from(["pfsense", "vlans", "list"]);
        let mut profile = Profile {
            url: "https://192.168.1.1".into(),
            insecure: Some(false),
            ..Profile::default()
        };

        apply_overrides(&mut profile, &cli.global);

        assert_eq!(profile.url, "https://192.168.1.1");
        assert_eq!(profile.timeout, None);
        assert_eq!(profile.insecure, Some(false));
    }
}
