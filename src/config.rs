//! Application-level configuration loading: the contest universe and the jury roster.

use std::{env, fs, io::ErrorKind, path::PathBuf};

use serde::Deserialize;
use tracing::{info, warn};

/// Default location on disk where the server looks for the JSON configuration.
const DEFAULT_CONFIG_PATH: &str = "config/app.json";
/// Environment variable that overrides [`DEFAULT_CONFIG_PATH`].
const CONFIG_PATH_ENV: &str = "JURYBOARD_BACK_CONFIG_PATH";
/// Label attached to jury scores whose id is missing from the roster.
pub const UNKNOWN_JURY_LABEL: &str = "Unknown jury member";

/// Jury member entry from the configured roster.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct JuryMember {
    /// Opaque identity used by submissions and the audit log.
    pub id: String,
    /// Display name resolved into standings and audit entries.
    pub name: String,
}

#[derive(Debug, Clone)]
/// Immutable runtime configuration shared across the application.
pub struct AppConfig {
    contests: Vec<String>,
    jury: Vec<JuryMember>,
}

impl AppConfig {
    /// Load the application configuration from disk, falling back to baked-in defaults.
    pub fn load() -> Self {
        let path = resolve_config_path();
        match fs::read_to_string(&path) {
            Ok(contents) => match serde_json::from_str::<RawConfig>(&contents) {
                Ok(raw) => {
                    let app_config: Self = raw.into();
                    info!(
                        path = %path.display(),
                        contests = app_config.contests.len(),
                        jury = app_config.jury.len(),
                        "loaded contest universe and jury roster from config"
                    );
                    app_config
                }
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        error = %err,
                        "failed to parse config; falling back to defaults"
                    );
                    Self::default()
                }
            },
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!(
                    path = %path.display(),
                    "config file not found; using built-in defaults"
                );
                Self::default()
            }
            Err(err) => {
                warn!(
                    path = %path.display(),
                    error = %err,
                    "failed to read config; falling back to defaults"
                );
                Self::default()
            }
        }
    }

    /// The fixed set of contest identifiers standings are computed over.
    pub fn contests(&self) -> &[String] {
        &self.contests
    }

    /// Whether a contest id belongs to the configured universe.
    pub fn is_known_contest(&self, contest_id: &str) -> bool {
        self.contests.iter().any(|id| id == contest_id)
    }

    /// The configured jury roster.
    pub fn jury(&self) -> &[JuryMember] {
        &self.jury
    }

    /// Resolve a jury id to its display name, if the roster knows it.
    pub fn jury_name(&self, jury_id: &str) -> Option<&str> {
        self.jury
            .iter()
            .find(|member| member.id == jury_id)
            .map(|member| member.name.as_str())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            contests: default_contests(),
            jury: default_jury(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of the configuration file located at [`DEFAULT_CONFIG_PATH`].
struct RawConfig {
    contests: Vec<String>,
    jury: Vec<RawJuryMember>,
}

impl From<RawConfig> for AppConfig {
    fn from(value: RawConfig) -> Self {
        Self {
            contests: value.contests,
            jury: value.jury.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
/// JSON representation of a jury roster entry in the configuration file.
struct RawJuryMember {
    id: String,
    name: String,
}

impl From<RawJuryMember> for JuryMember {
    fn from(value: RawJuryMember) -> Self {
        Self {
            id: value.id,
            name: value.name,
        }
    }
}

/// Resolve the configuration path taking the environment override into account.
fn resolve_config_path() -> PathBuf {
    env::var_os(CONFIG_PATH_ENV)
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Contest rounds shipped with the binary.
fn default_contests() -> Vec<String> {
    [
        "visit-card",
        "clinical-case",
        "practical-skills",
        "mind-battle",
        "jury-question",
    ]
    .into_iter()
    .map(str::to_owned)
    .collect()
}

/// Placeholder jury roster used until a deployment provides its own.
fn default_jury() -> Vec<JuryMember> {
    (1..=6)
        .map(|index| JuryMember {
            id: index.to_string(),
            name: format!("Jury member {index}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_five_contests_and_six_jury_members() {
        let config = AppConfig::default();
        assert_eq!(config.contests().len(), 5);
        assert_eq!(config.jury().len(), 6);
        assert!(config.is_known_contest("visit-card"));
        assert!(!config.is_known_contest("karaoke"));
    }

    #[test]
    fn raw_config_parses_and_resolves_names() {
        let raw: RawConfig = serde_json::from_str(
            r#"{
                "contests": ["finals"],
                "jury": [{"id": "j1", "name": "Dr. Adams"}]
            }"#,
        )
        .expect("valid config json");
        let config: AppConfig = raw.into();
        assert_eq!(config.contests(), ["finals".to_owned()]);
        assert_eq!(config.jury_name("j1"), Some("Dr. Adams"));
        assert_eq!(config.jury_name("j2"), None);
    }
}
