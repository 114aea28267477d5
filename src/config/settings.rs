use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub product: ProductConfig,
    pub request: RequestConfig,
    pub selector: SelectorConfig,
    pub alert: AlertConfig,
    pub settings: SettingsConfig,
    pub email: EmailConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductConfig {
    /// Page to poll for the price.
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    /// HTTP User-Agent header sent with every poll.
    pub user_agent: String,
    /// HTTP timeout; a hung request must not stall the monitor forever.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// CSS selector locating the price element on the page.
    pub price_css_selector: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertConfig {
    /// Alert when the observed price is at or below this value.
    pub price_threshold: f64,
    /// What to do when sending the alert email fails.
    #[serde(default)]
    pub on_send_failure: SendFailurePolicy,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsConfig {
    /// Seconds to sleep between poll cycles.
    pub check_interval_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailConfig {
    pub smtp_server: String,
    pub smtp_port: u16,
    pub email_address: String,
    pub email_password: String,
    pub to_address: String,
    /// SMTP session timeout.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

/// Policy for a failed alert dispatch: crash the monitor (like configuration
/// errors do) or log the failed cycle and keep polling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SendFailurePolicy {
    #[default]
    Fatal,
    Continue,
}

fn default_timeout_seconds() -> u64 {
    30
}

impl Config {
    /// Load configuration from a TOML file. Every failure here is fatal:
    /// without a complete configuration there is nothing to monitor.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.product.url.is_empty() {
            anyhow::bail!("product.url must not be empty");
        }
        if self.alert.price_threshold <= 0.0 {
            anyhow::bail!(
                "alert.price_threshold must be positive, got {}",
                self.alert.price_threshold
            );
        }
        if self.settings.check_interval_seconds == 0 {
            anyhow::bail!("settings.check_interval_seconds must be at least 1");
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request.timeout_seconds)
    }

    pub fn smtp_timeout(&self) -> Duration {
        Duration::from_secs(self.email.timeout_seconds)
    }

    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.settings.check_interval_seconds)
    }
}
