//! Suite configuration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};
use crate::globals::{Timeouts, WEBDRIVER_UNIVERSITY_HOMEPAGE_URL};

/// Path of the login portal below the site root
pub const LOGIN_PORTAL_PATH: &str = "/Login-Portal/index.html";

/// Suite configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    /// Root URL of the site under test
    pub base_url: String,

    /// WebDriver server endpoint (chromedriver, geckodriver, Selenium grid)
    pub webdriver_url: String,

    /// Browser to request from the WebDriver server
    pub browser: Browser,

    /// Run the browser without a visible window
    pub headless: bool,

    /// Where failure screenshots are written
    pub screenshot_dir: PathBuf,

    /// Browser window dimensions
    pub window: WindowSize,

    /// Wait policies for every session
    pub timeouts: Timeouts,

    /// Local WebDriver server process
    pub driver: DriverConfig,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            base_url: WEBDRIVER_UNIVERSITY_HOMEPAGE_URL.to_string(),
            webdriver_url: "http://localhost:4444".to_string(),
            browser: Browser::default(),
            headless: true,
            screenshot_dir: PathBuf::from("target/screenshots"),
            window: WindowSize::default(),
            timeouts: Timeouts::DEFAULT,
            driver: DriverConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
}

impl Default for WindowSize {
    fn default() -> Self {
        Self { width: 1920, height: 1080 }
    }
}

/// Configuration for spawning a local WebDriver server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Spawn the driver binary instead of using an already running server
    pub spawn: bool,

    /// Driver binary (None = the browser's default driver on PATH)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub binary: Option<PathBuf>,

    /// Port to listen on (None = find free port)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// How long to wait for the driver to report ready
    pub startup_timeout_secs: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            spawn: false,
            binary: None,
            port: None,
            startup_timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Browser {
    #[default]
    Chrome,
    Firefox,
    Edge,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chrome => "chrome",
            Browser::Firefox => "firefox",
            Browser::Edge => "edge",
        }
    }

    /// WebDriver server binary that drives this browser
    pub fn default_driver_binary(&self) -> &'static str {
        match self {
            Browser::Chrome => "chromedriver",
            Browser::Firefox => "geckodriver",
            Browser::Edge => "msedgedriver",
        }
    }

    /// Command-line arguments that make the driver listen on `port`
    pub fn driver_port_args(&self, port: u16) -> Vec<String> {
        match self {
            Browser::Chrome | Browser::Edge => vec![format!("--port={}", port)],
            Browser::Firefox => vec!["--port".to_string(), port.to_string()],
        }
    }
}

impl fmt::Display for Browser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Browser {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "chrome" | "chromium" => Ok(Browser::Chrome),
            "firefox" | "gecko" => Ok(Browser::Firefox),
            "edge" | "msedge" => Ok(Browser::Edge),
            other => Err(Error::UnsupportedBrowser(other.to_string())),
        }
    }
}

impl SuiteConfig {
    /// Load configuration from file, falling back to defaults when absent
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading suite config from {}", path.display());
            let content = std::fs::read_to_string(path)?;
            let config: Self = toml::from_str(&content)?;
            Ok(config)
        } else {
            debug!("No suite config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `WDU_*` overrides from the process environment
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `WDU_*` overrides resolved through `lookup`
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("WDU_BASE_URL") {
            self.base_url = url;
        }
        if let Some(url) = lookup("WDU_WEBDRIVER_URL") {
            self.webdriver_url = url;
        }
        if let Some(browser) = lookup("WDU_BROWSER") {
            self.browser = browser.parse()?;
        }
        if let Some(headless) = lookup("WDU_HEADLESS") {
            self.headless = parse_flag("WDU_HEADLESS", &headless)?;
        }
        if let Some(dir) = lookup("WDU_SCREENSHOT_DIR") {
            self.screenshot_dir = PathBuf::from(dir);
        }
        Ok(())
    }

    /// Reject values no session could be opened with
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("base_url", &self.base_url), ("webdriver_url", &self.webdriver_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be an http(s) URL, got '{}'",
                    name, url
                )));
            }
        }
        if self.window.width == 0 || self.window.height == 0 {
            return Err(Error::InvalidConfig(format!(
                "window must be non-zero, got {}x{}",
                self.window.width, self.window.height
            )));
        }
        if self.timeouts.explicit_secs == 0 {
            return Err(Error::InvalidConfig(
                "timeouts.explicit_secs must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Full URL of the login portal
    pub fn login_page_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), LOGIN_PORTAL_PATH)
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(Error::InvalidConfig(format!(
            "{} must be a boolean, got '{}'",
            key, other
        ))),
    }
}
