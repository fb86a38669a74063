//! Shared configuration for the larder TUI.
//!
//! TOML profiles merged with `LARDER_`-prefixed environment variables,
//! and translation to `larder_api` connection settings.

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use larder_api::{TlsMode, TransportConfig};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no profile named '{profile}' in config")]
    UnknownProfile { profile: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    /// Named server profiles.
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
    #[serde(default)]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            insecure: false,
            timeout: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// A named server profile.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Profile {
    /// Service base URL (e.g., "https://kitchen.example.com/api").
    pub server: String,

    /// Override insecure TLS setting.
    pub insecure: Option<bool>,

    /// Override timeout in seconds.
    pub timeout: Option<u64>,
}

// ── Resolved settings ───────────────────────────────────────────────

/// Everything `larder-api` needs to build a client.
#[derive(Debug, Clone)]
pub struct ApiSettings {
    pub url: url::Url,
    pub transport: TransportConfig,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("dev", "larder", "larder").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("larder");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load a Config from an explicit file path (plus env overrides).
pub fn load_config_from(path: &std::path::Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LARDER_").split("_"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    save_config_to(cfg, &config_path())
}

/// Serialize config to TOML at an explicit path, creating parent
/// directories as needed.
pub fn save_config_to(cfg: &Config, path: &std::path::Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

// ── Profile resolution ──────────────────────────────────────────────

/// Look up a profile by name, falling back to the config's default.
pub fn resolve_profile<'a>(
    cfg: &'a Config,
    name: Option<&'a str>,
) -> Result<(&'a str, &'a Profile), ConfigError> {
    let profile_name = name
        .or(cfg.default_profile.as_deref())
        .unwrap_or("default");
    let profile = cfg
        .profiles
        .get(profile_name)
        .ok_or_else(|| ConfigError::UnknownProfile {
            profile: profile_name.into(),
        })?;
    Ok((profile_name, profile))
}

/// Build `ApiSettings` from a profile, applying global defaults.
pub fn profile_to_api_settings(
    profile: &Profile,
    defaults: &Defaults,
) -> Result<ApiSettings, ConfigError> {
    let url: url::Url = profile
        .server
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "server".into(),
            reason: format!("invalid URL: {}", profile.server),
        })?;

    let tls = if profile.insecure.unwrap_or(defaults.insecure) {
        TlsMode::DangerAcceptInvalid
    } else {
        TlsMode::System
    };

    let timeout = Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout));

    Ok(ApiSettings {
        url,
        transport: TransportConfig { tls, timeout },
    })
}

// ── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn load_profiles_from_toml() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("config.toml");
        let mut f = std::fs::File::create(&path).expect("create config");
        writeln!(
            f,
            r#"
default_profile = "staging"

[defaults]
timeout = 15

[profiles.staging]
server = "https://staging.larder.dev/api"
insecure = true
"#
        )
        .expect("write config");

        let cfg = load_config_from(&path).expect("load config");
        assert_eq!(cfg.default_profile.as_deref(), Some("staging"));
        assert_eq!(cfg.defaults.timeout, 15);

        let (name, profile) = resolve_profile(&cfg, None).expect("resolve");
        assert_eq!(name, "staging");
        assert_eq!(profile.server, "https://staging.larder.dev/api");
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("config.toml");

        let cfg = Config {
            default_profile: Some("prod".into()),
            defaults: Defaults::default(),
            profiles: HashMap::from([(
                "prod".into(),
                Profile {
                    server: "https://kitchen.example.com/api".into(),
                    insecure: Some(false),
                    timeout: Some(10),
                },
            )]),
        };

        save_config_to(&cfg, &path).expect("save config");

        let loaded = load_config_from(&path).expect("load config");
        assert_eq!(loaded.default_profile.as_deref(), Some("prod"));

        let (_, profile) = resolve_profile(&loaded, None).expect("resolve");
        assert_eq!(profile.server, "https://kitchen.example.com/api");
        assert_eq!(profile.timeout, Some(10));
    }

    #[test]
    fn unknown_profile_is_an_error() {
        let cfg = Config::default();
        let err = resolve_profile(&cfg, Some("nope")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProfile { .. }));
    }

    #[test]
    fn settings_apply_defaults_and_overrides() {
        let profile = Profile {
            server: "https://kitchen.example.com/api".into(),
            insecure: None,
            timeout: Some(5),
        };
        let defaults = Defaults {
            insecure: true,
            timeout: 30,
        };

        let settings = profile_to_api_settings(&profile, &defaults).expect("settings");
        assert_eq!(settings.url.host_str(), Some("kitchen.example.com"));
        assert_eq!(settings.transport.timeout, Duration::from_secs(5));
        assert!(matches!(
            settings.transport.tls,
            TlsMode::DangerAcceptInvalid
        ));
    }

    #[test]
    fn invalid_server_url_is_rejected() {
        let profile = Profile {
            server: "not a url".into(),
            insecure: None,
            timeout: None,
        };
        let err = profile_to_api_settings(&profile, &Defaults::default()).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }
}
