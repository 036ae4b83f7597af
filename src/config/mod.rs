use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod check; // missing-field detection and repair, src/config/check.rs

pub const CONFIG_FILE_NAME: &str = "spot.conf";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// File name of the persisted bearer token inside the config directory.
    #[serde(default = "default_token_file")]
    pub token_file: String,
    #[serde(default = "default_notification_secs")]
    pub notification_secs: u64,
    #[serde(default = "default_report_title_prefix")]
    pub report_title_prefix: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory the config was loaded from; never written to the file.
    #[serde(skip)]
    pub dir: PathBuf,
}

fn default_api_base_url() -> String {
    "http://localhost:5000/api".to_string()
}
fn default_token_file() -> String {
    "spot_token".to_string()
}
fn default_notification_secs() -> u64 {
    3
}
fn default_report_title_prefix() -> String {
    "Weekly report - ".to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            token_file: default_token_file(),
            notification_secs: default_notification_secs(),
            report_title_prefix: default_report_title_prefix(),
            request_timeout_secs: default_request_timeout_secs(),
            log_level: default_log_level(),
            dir: Self::default_dir(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn default_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("spot")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".spot")
        }
    }

    /// Explicit directory if given, platform default otherwise.
    pub fn resolve_dir(custom: Option<&Path>) -> PathBuf {
        custom
            .map(Path::to_path_buf)
            .unwrap_or_else(Self::default_dir)
    }

    pub fn file_in(dir: &Path) -> PathBuf {
        dir.join(CONFIG_FILE_NAME)
    }

    /// Return the full path of the config file
    pub fn config_file(&self) -> PathBuf {
        Self::file_in(&self.dir)
    }

    /// Return the full path of the persisted bearer token
    pub fn token_path(&self) -> PathBuf {
        self.dir.join(&self.token_file)
    }

    pub fn notification_ttl(&self) -> Duration {
        Duration::from_secs(self.notification_secs)
    }

    /// Load configuration from `dir`, or return defaults if the file is absent
    pub fn load_from(dir: &Path) -> AppResult<Self> {
        let path = Self::file_in(dir);

        let mut cfg: Config = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("{}: {e}", path.display())))?
        } else {
            Config::default()
        };

        cfg.dir = dir.to_path_buf();
        Ok(cfg)
    }

    pub fn save(&self) -> AppResult<()> {
        fs::create_dir_all(&self.dir).map_err(|_| AppError::ConfigSave)?;
        let yaml = serde_yaml::to_string(self)?;
        fs::write(self.config_file(), yaml).map_err(|_| AppError::ConfigSave)?;
        Ok(())
    }

    /// Create the directory and a default config file there.
    ///
    /// An existing file is left alone unless `overwrite` is set. Returns the
    /// config that is now in effect.
    pub fn init_all(dir: &Path, api_base_url: Option<&str>, overwrite: bool) -> AppResult<Self> {
        fs::create_dir_all(dir)?;
        let path = Self::file_in(dir);

        if path.exists() && !overwrite {
            return Self::load_from(dir);
        }

        let mut cfg = Config {
            dir: dir.to_path_buf(),
            ..Config::default()
        };
        if let Some(url) = api_base_url {
            cfg.api_base_url = url.trim_end_matches('/').to_string();
        }

        cfg.save()?;
        Ok(cfg)
    }
}
