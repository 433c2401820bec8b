use crate::error::{HarnessError, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowserKind {
    Chrome,
    Firefox,
}

impl FromStr for BrowserKind {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "chrome" | "chromium" => Ok(BrowserKind::Chrome),
            "firefox" => Ok(BrowserKind::Firefox),
            other => Err(HarnessError::Config(format!("unsupported browser: {}", other))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub log_level: String,

    // Browser
    pub webdriver_url: String,
    pub browser: BrowserKind,
    pub headless: bool,

    // Timeouts
    pub navigation_timeout_ms: u64,
    pub element_timeout_ms: u64,
    pub poll_interval_ms: u64,
    pub scenario_timeout_ms: u64,

    // Files
    pub table_artifact_path: PathBuf,
    pub fixtures_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: "https://emicalculator.net/".to_string(),
            log_level: "info".to_string(),
            webdriver_url: "http://localhost:9515".to_string(),
            browser: BrowserKind::Chrome,
            headless: true,
            navigation_timeout_ms: 30_000,
            element_timeout_ms: 10_000,
            poll_interval_ms: 100,
            scenario_timeout_ms: 120_000,
            table_artifact_path: PathBuf::from("tableData.json"),
            fixtures_path: PathBuf::from("data/loandata.json"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup; unset or unparsable values keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Config::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let millis = |key: &str, fallback: u64| {
            get(key)
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(fallback)
        };

        let browser = match get("BROWSER") {
            Some(name) => name.parse()?,
            None => defaults.browser,
        };

        Ok(Config {
            base_url: get("EMI_BASE_URL").unwrap_or(defaults.base_url),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
            webdriver_url: get("WEBDRIVER_URL").unwrap_or(defaults.webdriver_url),
            browser,
            headless: get("HEADLESS")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(defaults.headless),
            navigation_timeout_ms: millis("NAVIGATION_TIMEOUT_MS", defaults.navigation_timeout_ms),
            element_timeout_ms: millis("ELEMENT_TIMEOUT_MS", defaults.element_timeout_ms),
            poll_interval_ms: millis("POLL_INTERVAL_MS", defaults.poll_interval_ms).max(1),
            scenario_timeout_ms: millis("SCENARIO_TIMEOUT_MS", defaults.scenario_timeout_ms),
            table_artifact_path: get("TABLE_ARTIFACT_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.table_artifact_path),
            fixtures_path: get("FIXTURES_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.fixtures_path),
        })
    }

    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn scenario_timeout(&self) -> Duration {
        Duration::from_millis(self.scenario_timeout_ms)
    }
}
