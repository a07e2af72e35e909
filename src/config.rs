use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable selecting the backend base URL.
pub const API_URL_ENV: &str = "FINESIGHT_API_URL";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Share of total expenses above which a discretionary category is flagged.
    #[serde(default = "default_discretionary_warning_ratio")]
    pub discretionary_warning_ratio: f64,
}

#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_url: Option<String>,
}

impl Config {
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        home.join(".config/finesight/config.toml")
    }

    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(|p| p.to_path_buf())
            .unwrap_or_else(Self::default_path);
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = fs::read_to_string(&path)
            .with_context(|| format!("failed reading config: {}", path.display()))?;
        let parsed: Self = toml::from_str(&data)
            .with_context(|| format!("failed parsing TOML config: {}", path.display()))?;
        Ok(parsed)
    }

    /// Applies the `FINESIGHT_API_URL` environment variable. Sits between the
    /// config file and CLI flags in precedence, so call it before
    /// [`Config::apply_overrides`].
    pub fn apply_env(&mut self) {
        if let Ok(url) = env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api.base_url = url.trim().to_string();
            }
        }
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(base_url) = overrides.base_url {
            self.api.base_url = base_url;
        }
    }

    pub fn write_template(path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed creating config directory: {}", parent.display())
            })?;
        }
        fs::write(path, Self::default_template())
            .with_context(|| format!("failed writing config template: {}", path.display()))
    }

    pub fn default_template() -> String {
        let template = r#"[api]
base_url = "http://localhost:8000"

[display]
discretionary_warning_ratio = 0.05
"#;
        template.to_string()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            discretionary_warning_ratio: default_discretionary_warning_ratio(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_discretionary_warning_ratio() -> f64 {
    0.05
}

#[cfg(test)]
mod tests {
    use super::Config;

    #[test]
    fn template_round_trips() {
        let config: Config =
            toml::from_str(&Config::default_template()).expect("template should parse");
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert!((config.display.discretionary_warning_ratio - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Some(std::path::Path::new(
            "/nonexistent/finesight/config.toml",
        )))
        .expect("missing config should not be an error");
        assert_eq!(config.api.base_url, "http://localhost:8000");
    }
}
