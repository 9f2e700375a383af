//! Error types for browser-driven login tests

use thiserror::Error;

use crate::steps::StepKind;

#[derive(Error, Debug)]
pub enum E2eError {
    #[error("Configuration error: {0}")]
    Config(#[from] wdu_common::Error),

    #[error("WebDriver error: {0}")]
    WebDriver(#[from] thirtyfour::error::WebDriverError),

    #[error("WebDriver server failed to start: {0}")]
    DriverStartup(String),

    #[error("WebDriver server health check failed after {0} attempts")]
    DriverHealthCheck(usize),

    #[error("No alert with text '{expected}' appeared within {seconds}s")]
    AlertTimeout { expected: String, seconds: u64 },

    #[error("Assertion failed: expected '{expected}', got '{actual}'")]
    AssertionFailed { expected: String, actual: String },

    #[error("No login step matches '{kind} {text}'")]
    UnboundStep { kind: StepKind, text: String },

    #[error("No browser session is open")]
    NoSession,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

pub type E2eResult<T> = Result<T, E2eError>;
