//! WDU Common Library
//!
//! Global constants, suite configuration and error types shared by the
//! WebDriverUniversity login suite.

pub mod config;
pub mod error;
pub mod globals;

// Re-export commonly used types
pub use config::{Browser, DriverConfig, SuiteConfig, WindowSize};
pub use error::{Error, Result};
pub use globals::{
    Timeouts, DEFAULT_EXPLICIT_TIMEOUT, DEFAULT_IMPLICIT_TIMEOUT, PAGE_LOAD_TIMEOUT,
    WEBDRIVER_UNIVERSITY_HOMEPAGE_URL,
};

/// Default configuration file, relative to the working directory
pub fn default_config_path() -> std::path::PathBuf {
    std::path::PathBuf::from("wdu.toml")
}
