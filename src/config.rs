use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Sentinel left in unconfigured credential fields. Any remote field still
/// containing it counts as missing, and the process runs in local mode.
pub const PLACEHOLDER: &str = "REPLACE_WITH";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,

    pub remote: RemoteConfig,

    pub users: UsersConfig,

    pub kitsu: KitsuConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            remote: RemoteConfig::default(),
            users: UsersConfig::default(),
            kitsu: KitsuConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Directory holding the local snapshot files (catalog, user list,
    /// session).
    pub data_dir: String,

    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: "data".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Cloud document-store credentials. All three fields must be filled in
/// (and the placeholder removed) before remote mode activates; otherwise
/// the process stays on the local snapshot without touching the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub api_key: String,

    pub project_id: String,

    pub app_id: String,

    pub request_timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_key: "REPLACE_WITH_YOUR_API_KEY".to_string(),
            project_id: String::new(),
            app_id: String::new(),
            request_timeout_seconds: 15,
        }
    }
}

impl RemoteConfig {
    /// True when every credential field is present and none still carries
    /// the placeholder. This is a one-shot, startup-time decision; there is
    /// no mid-session promotion to remote mode.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        [&self.api_key, &self.project_id, &self.app_id]
            .iter()
            .all(|v| !v.is_empty() && !v.contains(PLACEHOLDER))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// Accounts registered with one of these emails are provisioned as
    /// admins. Checked once at registration; the stored role is
    /// authoritative afterwards.
    pub admin_emails: Vec<String>,
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            admin_emails: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KitsuConfig {
    /// Result cap for metadata searches.
    pub page_limit: u32,
}

impl Default for KitsuConfig {
    fn default() -> Self {
        Self { page_limit: 5 }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let paths = Self::config_paths();

        for path in &paths {
            if path.exists() {
                info!("Loading config from: {}", path.display());
                return Self::load_from_path(path);
            }
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::default_config_path();
        self.save_to_path(&path)
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        info!("Config saved to: {}", path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.general.data_dir.is_empty() {
            anyhow::bail!("general.data_dir must not be empty");
        }
        if self.kitsu.page_limit == 0 {
            anyhow::bail!("kitsu.page_limit must be at least 1");
        }
        Ok(())
    }

    fn config_paths() -> Vec<PathBuf> {
        let mut paths = vec![];

        paths.push(PathBuf::from("config.toml"));

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("anivault").join("config.toml"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".anivault").join("config.toml"));
        }

        paths
    }

    fn default_config_path() -> PathBuf {
        PathBuf::from("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_remote_config_is_not_configured() {
        let config = Config::default();
        assert!(!config.remote.is_configured());
    }

    #[test]
    fn placeholder_in_any_field_disables_remote() {
        let remote = RemoteConfig {
            api_key: "AIzaRealLookingKey".to_string(),
            project_id: "REPLACE_WITH_PROJECT".to_string(),
            app_id: "1:42:web:abc".to_string(),
            request_timeout_seconds: 15,
        };
        assert!(!remote.is_configured());
    }

    #[test]
    fn fully_filled_remote_config_is_configured() {
        let remote = RemoteConfig {
            api_key: "AIzaRealLookingKey".to_string(),
            project_id: "anivault-demo".to_string(),
            app_id: "1:42:web:abc".to_string(),
            request_timeout_seconds: 15,
        };
        assert!(remote.is_configured());
    }

    #[test]
    fn empty_field_disables_remote() {
        let remote = RemoteConfig {
            api_key: "AIzaRealLookingKey".to_string(),
            project_id: String::new(),
            app_id: "1:42:web:abc".to_string(),
            request_timeout_seconds: 15,
        };
        assert!(!remote.is_configured());
    }

    #[test]
    fn config_round_trips_through_toml() {
        let mut config = Config::default();
        config.users.admin_emails = vec!["admin@example.com".to_string()];
        config.remote.project_id = "anivault-demo".to_string();

        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();

        assert_eq!(parsed.users.admin_emails, config.users.admin_emails);
        assert_eq!(parsed.remote.project_id, "anivault-demo");
        assert_eq!(parsed.kitsu.page_limit, 5);
    }
}
