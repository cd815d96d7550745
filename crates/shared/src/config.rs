//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Remote API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session storage configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Report export configuration.
    #[serde(default)]
    pub report: ReportConfig,
    /// Receipt printing configuration.
    #[serde(default)]
    pub receipt: ReceiptConfig,
}

/// Remote API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the back-office server, without the `/api/v1` suffix.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Header that carries the session token.
    #[serde(default = "default_auth_header")]
    pub auth_header: String,
    /// Scheme prepended to the token; empty sends the bare token.
    #[serde(default = "default_auth_scheme")]
    pub auth_scheme: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_auth_header() -> String {
    "Authorization".to_string()
}

fn default_auth_scheme() -> String {
    "Bearer".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            auth_header: default_auth_header(),
            auth_scheme: default_auth_scheme(),
        }
    }
}

/// Session storage configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Directory holding `session.json` and `kitchen_access.json`.
    #[serde(default = "default_session_dir")]
    pub dir: PathBuf,
}

fn default_session_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".pasok")
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            dir: default_session_dir(),
        }
    }
}

/// Report export configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportConfig {
    /// IANA time zone used to truncate transaction instants to dates.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Directory where exported files are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Business name printed on report and receipt headers.
    #[serde(default = "default_business_name")]
    pub business_name: String,
}

fn default_timezone() -> String {
    "Asia/Jakarta".to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("exports")
}

fn default_business_name() -> String {
    "Pasok".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            output_dir: default_output_dir(),
            business_name: default_business_name(),
        }
    }
}

/// A supplier-name pattern mapped to a receipt template.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReceiptTemplateRule {
    /// Case-insensitive substring matched against the supplier name.
    pub pattern: String,
    /// Template name (`generic`, `bordered`, `compact`, `letterhead`).
    pub template: String,
}

/// Receipt printing configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceiptConfig {
    /// Template rules, checked in order; the first match wins.
    #[serde(default = "default_template_rules")]
    pub templates: Vec<ReceiptTemplateRule>,
}

fn default_template_rules() -> Vec<ReceiptTemplateRule> {
    [
        ("sumber rejeki", "bordered"),
        ("makmur", "letterhead"),
        ("tani", "compact"),
    ]
    .into_iter()
    .map(|(pattern, template)| ReceiptTemplateRule {
        pattern: pattern.to_string(),
        template: template.to_string(),
    })
    .collect()
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            templates: default_template_rules(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("PASOK")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Base URL of the versioned API, e.g. `http://host/api/v1`.
    #[must_use]
    pub fn api_root(&self) -> String {
        format!("{}/api/v1", self.api.base_url.trim_end_matches('/'))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(["PASOK__API__BASE_URL", "PASOK__REPORT__TIMEZONE"], || {
            let config = AppConfig::load().unwrap();
            assert_eq!(config.api.base_url, "http://localhost:5000");
            assert_eq!(config.api.timeout_secs, 30);
            assert_eq!(config.api.auth_header, "Authorization");
            assert_eq!(config.report.timezone, "Asia/Jakarta");
            assert_eq!(config.receipt.templates.len(), 3);
        });
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("PASOK__API__BASE_URL", Some("https://pasok.example/")),
                ("PASOK__API__TIMEOUT_SECS", Some("5")),
                ("PASOK__REPORT__TIMEZONE", Some("Asia/Makassar")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.api.timeout_secs, 5);
                assert_eq!(config.report.timezone, "Asia/Makassar");
                assert_eq!(config.api_root(), "https://pasok.example/api/v1");
            },
        );
    }
}
