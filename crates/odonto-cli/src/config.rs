use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use odonto_client::client::ClientConfig;
use odonto_client::retry::RetryPolicy;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Overrides the configured backend URL when set.
pub const BASE_URL_ENV: &str = "ODONTO_BASE_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OdontoConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,
    /// Added in v1; older configs get the default.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    pub created_at: jiff::Timestamp,
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl OdontoConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            config_version: CURRENT_VERSION,
            base_url: base_url.into(),
            api_token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            created_at: jiff::Timestamp::now(),
        }
    }

    /// Client settings, with [`BASE_URL_ENV`] taking precedence over the
    /// stored base URL.
    pub fn client_config(&self) -> ClientConfig {
        let base_url = std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| self.base_url.clone());

        ClientConfig {
            base_url,
            api_token: self.api_token.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            retry: RetryPolicy::default(),
        }
    }
}

/// Redacted config info safe to print.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigInfo {
    pub base_url: String,
    pub timeout_secs: u64,
    pub created_at: String,
    pub token_hint: Option<String>,
}

fn config_dir() -> eyre::Result<PathBuf> {
    let base = dirs::config_dir().ok_or_else(|| eyre::eyre!("no config directory found"))?;
    Ok(base.join("com.odonto.cli"))
}

pub fn config_path() -> eyre::Result<PathBuf> {
    Ok(config_dir()?.join("config.json"))
}

pub fn has_config() -> bool {
    config_path().map(|p| p.exists()).unwrap_or(false)
}

pub fn load_config() -> eyre::Result<OdontoConfig> {
    load_config_from(&config_path()?)
}

pub fn load_config_from(path: &Path) -> eyre::Result<OdontoConfig> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| eyre::eyre!("failed to read config at {}: {e}", path.display()))?;

    // Parse as raw JSON so we can run migrations before deserializing.
    let json: serde_json::Value = serde_json::from_str(&contents)?;
    let on_disk_version = match json.get("config_version") {
        None => 0,
        Some(value) => value
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| eyre::eyre!("invalid config_version {value} in {}", path.display()))?,
    };

    let migrated = migrate(json, on_disk_version)?;
    let config: OdontoConfig = serde_json::from_value(migrated)?;
    Ok(config)
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
/// Each migration is a pure transform on the raw JSON value.
pub fn migrate(mut json: serde_json::Value, from_version: u32) -> eyre::Result<serde_json::Value> {
    if from_version > CURRENT_VERSION {
        return Err(eyre::eyre!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION}). \
             Please update odonto."
        ));
    }

    // v0 → v1: unversioned file, `timeout_secs` added
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| eyre::eyre!("config is not a JSON object"))?;
        obj.entry("timeout_secs")
            .or_insert(serde_json::Value::Number(DEFAULT_TIMEOUT_SECS.into()));
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        tracing::info!("migrated config v0 → v1 (added timeout_secs)");
    }

    Ok(json)
}

pub fn save_config(config: &OdontoConfig) -> eyre::Result<PathBuf> {
    save_config_to(&config_dir()?, config)
}

pub fn save_config_to(dir: &Path, config: &OdontoConfig) -> eyre::Result<PathBuf> {
    std::fs::create_dir_all(dir)?;

    // Always write the current version, regardless of what was loaded.
    let mut stamped = config.clone();
    stamped.config_version = CURRENT_VERSION;

    let path = dir.join("config.json");
    let json = serde_json::to_string_pretty(&stamped)?;

    let tmp_path = dir.join("config.json.tmp");
    std::fs::write(&tmp_path, json.as_bytes())?;

    // The file may hold an API token.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&tmp_path, std::fs::Permissions::from_mode(0o600))?;
    }

    std::fs::rename(&tmp_path, &path)?;

    tracing::info!(path = %path.display(), "config saved");
    Ok(path)
}

pub fn delete_config() -> eyre::Result<()> {
    let path = config_path()?;
    if path.exists() {
        std::fs::remove_file(&path)?;
        tracing::info!(path = %path.display(), "config deleted");
    }
    Ok(())
}

pub fn config_info(config: &OdontoConfig) -> ConfigInfo {
    ConfigInfo {
        base_url: config.base_url.clone(),
        timeout_secs: config.timeout_secs,
        created_at: config.created_at.to_string(),
        token_hint: config.api_token.as_deref().map(redact_token),
    }
}

fn redact_token(token: &str) -> String {
    if token.len() <= 8 || !token.is_ascii() {
        return "****".to_string();
    }
    let prefix = &token[..4];
    let suffix = &token[token.len() - 4..];
    format!("{prefix}...{suffix}")
}
