// src/core/config_manager.rs
//! Unified configuration: optional YAML file, overridden by environment variables

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;

const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_DAILY_API_URL: &str = "https://api.daily.co/v1";
const DEFAULT_JITSI_URL: &str = "https://meet.jit.si";
const DEFAULT_CONFIG_FILE: &str = "talentmatch.yaml";

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub api: ApiConfig,
    pub video: VideoConfig,
    pub smtp: SmtpConfig,
    pub session_path: PathBuf,
    pub log_file: Option<PathBuf>,
    /// YAML file the values were layered over, when one was found.
    pub config_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    /// `None` leaves requests without a deadline.
    pub timeout_seconds: Option<u64>,
}

impl ApiConfig {
    /// Request timeout shared by the backend and Daily clients.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }
}

#[derive(Debug, Clone)]
pub struct VideoConfig {
    pub daily_api_key: Option<String>,
    pub daily_api_url: String,
    pub jitsi_base_url: String,
}

#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    /// Implicit TLS when true, STARTTLS otherwise.
    pub secure: bool,
    pub user: String,
    pub password: String,
    pub from: String,
}

/// One section of the YAML file. Every key is optional.
#[derive(Debug, Clone, Default, Deserialize)]
struct FileSection {
    api_base_url: Option<String>,
    timeout_seconds: Option<u64>,
    session_path: Option<PathBuf>,
    daily_api_url: Option<String>,
    jitsi_base_url: Option<String>,
    smtp_host: Option<String>,
    smtp_port: Option<u16>,
    smtp_secure: Option<bool>,
    smtp_from: Option<String>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: FileSection,
    #[serde(default)]
    production: FileSection,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("TALENTMATCH_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_FILE));

        Self::load_from(&config_path, Self::get_environment(), |key| {
            std::env::var(key).ok()
        })
    }

    fn load_from(
        path: &Path,
        environment: String,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let section = Self::load_file_section(path, &environment)?;
        let config_file = section.is_some().then(|| path.to_path_buf());

        let mut config = Self::from_parts(environment, section.unwrap_or_default(), lookup)?;
        config.config_file = config_file;
        Ok(config)
    }

    /// Runs once the subscriber is installed; `load` happens before logging exists.
    pub fn log_summary(&self) {
        info!("Loaded configuration for environment: {}", self.environment);
        match &self.config_file {
            Some(path) => info!("Configuration file: {}", path.display()),
            None => info!("No configuration file, using environment only"),
        }
        info!("Backend: {}", self.api.base_url);
    }

    fn get_environment() -> String {
        std::env::var("TALENTMATCH_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    fn load_file_section(path: &Path, environment: &str) -> Result<Option<FileSection>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let file: ConfigFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        Ok(Some(match environment {
            "production" => file.production,
            _ => file.local,
        }))
    }

    /// Resolve the final values. `lookup` reads one environment variable.
    fn from_parts(
        environment: String,
        file: FileSection,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let timeout_seconds = match lookup("TALENTMATCH_TIMEOUT_SECS") {
            Some(raw) => Some(
                raw.parse::<u64>()
                    .context("TALENTMATCH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            None => file.timeout_seconds,
        };

        let smtp_port = match lookup("SMTP_PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("SMTP_PORT must be a valid port number")?,
            None => file.smtp_port.unwrap_or(587),
        };

        let smtp_secure = match lookup("SMTP_SECURE") {
            Some(raw) => raw == "true",
            None => file.smtp_secure.unwrap_or(false),
        };

        let data_dir = if environment == "production" {
            PathBuf::from("/app")
        } else {
            PathBuf::from(".talentmatch")
        };

        let session_path = lookup("TALENTMATCH_SESSION_PATH")
            .map(PathBuf::from)
            .or(file.session_path)
            .unwrap_or_else(|| data_dir.join("session.json"));

        Ok(Self {
            api: ApiConfig {
                base_url: lookup("TALENTMATCH_API_URL")
                    .or(file.api_base_url)
                    .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                timeout_seconds,
            },
            video: VideoConfig {
                daily_api_key: lookup("DAILY_API_KEY").filter(|key| !key.is_empty()),
                daily_api_url: lookup("DAILY_API_URL")
                    .or(file.daily_api_url)
                    .unwrap_or_else(|| DEFAULT_DAILY_API_URL.to_string()),
                jitsi_base_url: lookup("JITSI_BASE_URL")
                    .or(file.jitsi_base_url)
                    .unwrap_or_else(|| DEFAULT_JITSI_URL.to_string()),
            },
            smtp: SmtpConfig {
                host: lookup("SMTP_HOST")
                    .or(file.smtp_host)
                    .unwrap_or_else(|| "smtp.example.com".to_string()),
                port: smtp_port,
                secure: smtp_secure,
                user: lookup("SMTP_USER").unwrap_or_else(|| "user@example.com".to_string()),
                password: lookup("SMTP_PASSWORD").unwrap_or_else(|| "password".to_string()),
                from: lookup("SMTP_FROM")
                    .or(file.smtp_from)
                    .unwrap_or_else(|| "TalentMatch <noreply@talentmatch.com>".to_string()),
            },
            session_path,
            log_file: lookup("TALENTMATCH_LOG_FILE")
                .map(PathBuf::from)
                .or(file.log_file),
            config_file: None,
            environment,
        })
    }

    /// Override the API base URL (command-line flag).
    pub fn with_api_url(mut self, url: Option<String>) -> Self {
        if let Some(url) = url {
            self.api.base_url = url;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config =
            ConfigManager::from_parts("local".into(), FileSection::default(), env(&[])).unwrap();

        assert_eq!(config.api.base_url, DEFAULT_API_URL);
        assert_eq!(config.api.timeout(), None);
        assert_eq!(config.session_path, PathBuf::from(".talentmatch/session.json"));
        assert_eq!(config.video.jitsi_base_url, "https://meet.jit.si");
        assert!(config.video.daily_api_key.is_none());
        assert_eq!(config.smtp.port, 587);
        assert!(!config.smtp.secure);
    }

    #[test]
    fn test_env_overrides_file() {
        let file = FileSection {
            api_base_url: Some("http://file:5000/api".into()),
            smtp_port: Some(2525),
            ..Default::default()
        };
        let config = ConfigManager::from_parts(
            "production".into(),
            file,
            env(&[
                ("TALENTMATCH_API_URL", "http://env:5000/api"),
                ("SMTP_SECURE", "true"),
                ("DAILY_API_KEY", "secret"),
            ]),
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://env:5000/api");
        assert_eq!(config.smtp.port, 2525);
        assert!(config.smtp.secure);
        assert_eq!(config.video.daily_api_key.as_deref(), Some("secret"));
        assert_eq!(config.session_path, PathBuf::from("/app/session.json"));
    }

    #[test]
    fn test_rejects_bad_numbers() {
        let result = ConfigManager::from_parts(
            "local".into(),
            FileSection::default(),
            env(&[("SMTP_PORT", "not-a-port")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_yaml_sections() {
        let file: ConfigFile = serde_yaml::from_str(
            "local:\n  api_base_url: http://localhost:8000/api\nproduction:\n  timeout_seconds: 20\n",
        )
        .unwrap();

        assert_eq!(
            file.local.api_base_url.as_deref(),
            Some("http://localhost:8000/api")
        );
        assert_eq!(file.production.timeout_seconds, Some(20));
    }

    #[test]
    fn test_load_from_records_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("talentmatch.yaml");
        std::fs::write(
            &path,
            "local:\n  jitsi_base_url: https://jitsi.local\nproduction:\n  timeout_seconds: 20\n",
        )
        .unwrap();

        let config = ConfigManager::load_from(&path, "production".into(), env(&[])).unwrap();
        assert_eq!(config.config_file.as_deref(), Some(path.as_path()));
        assert_eq!(config.api.timeout(), Some(Duration::from_secs(20)));
        assert_eq!(config.video.jitsi_base_url, DEFAULT_JITSI_URL);

        let missing = dir.path().join("absent.yaml");
        let config = ConfigManager::load_from(&missing, "local".into(), env(&[])).unwrap();
        assert!(config.config_file.is_none());
        assert_eq!(config.api.base_url, DEFAULT_API_URL);
    }
}
