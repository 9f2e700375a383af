//! WebDriver session lifecycle

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thirtyfour::{ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tracing::{debug, info, warn};

use wdu_common::{Browser, SuiteConfig};

use crate::error::E2eResult;

/// Open a browser session against the configured WebDriver server
///
/// The session gets the page-load and implicit timeouts from the config.
/// Headed sessions are maximised, headless ones sized to `config.window`.
/// If any of that setup fails the session is quit before returning the error.
pub async fn open_session(config: &SuiteConfig) -> E2eResult<WebDriver> {
    info!(
        browser = %config.browser,
        headless = config.headless,
        "Opening WebDriver session at {}",
        config.webdriver_url
    );

    let server_url = config.webdriver_url.as_str();
    let driver = match config.browser {
        Browser::Chrome => {
            let mut caps = DesiredCapabilities::chrome();
            if config.headless {
                caps.set_headless()?;
            }
            WebDriver::new(server_url, caps).await?
        }
        Browser::Edge => {
            let mut caps = DesiredCapabilities::edge();
            if config.headless {
                caps.set_headless()?;
            }
            WebDriver::new(server_url, caps).await?
        }
        Browser::Firefox => {
            let mut caps = DesiredCapabilities::firefox();
            if config.headless {
                caps.set_headless()?;
            }
            WebDriver::new(server_url, caps).await?
        }
    };

    if let Err(e) = configure_session(&driver, config).await {
        warn!("Session setup failed, quitting: {}", e);
        if let Err(quit_err) = driver.quit().await {
            warn!("Failed to quit session: {}", quit_err);
        }
        return Err(e);
    }

    Ok(driver)
}

async fn configure_session(driver: &WebDriver, config: &SuiteConfig) -> E2eResult<()> {
    driver.set_page_load_timeout(config.timeouts.page_load()).await?;
    driver.set_implicit_wait_timeout(config.timeouts.implicit()).await?;

    if config.headless {
        driver
            .set_window_rect(0, 0, config.window.width.into(), config.window.height.into())
            .await?;
    } else {
        driver.maximize_window().await?;
    }

    debug!(
        page_load_secs = config.timeouts.page_load_secs,
        implicit_secs = config.timeouts.implicit_secs,
        "Session configured"
    );
    Ok(())
}

/// Save a PNG of the current page under `dir`, named after `scenario`
pub async fn capture_screenshot(driver: &WebDriver, dir: &Path, scenario: &str) -> E2eResult<PathBuf> {
    std::fs::create_dir_all(dir)?;

    let path = dir.join(screenshot_file_name(scenario, Utc::now()));
    driver.screenshot(&path).await?;

    info!("Screenshot saved to {}", path.display());
    Ok(path)
}

/// `<slug>_<UTC timestamp>.png`, where the slug keeps lowercase alphanumerics
/// and collapses everything else to single dashes
pub fn screenshot_file_name(scenario: &str, at: DateTime<Utc>) -> String {
    let mut slug = String::with_capacity(scenario.len());
    for c in scenario.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    let slug = if slug.is_empty() { "scenario" } else { slug };

    format!("{}_{}.png", slug, at.format("%Y%m%dT%H%M%S"))
}

/// Whether a WebDriver server answers `GET /status` at `webdriver_url`
pub async fn probe_webdriver(webdriver_url: &str) -> bool {
    let status_url = format!("{}/status", webdriver_url.trim_end_matches('/'));
    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(2))
        .build()
    {
        Ok(client) => client,
        Err(e) => {
            warn!("Failed to build HTTP client: {}", e);
            return false;
        }
    };

    match client.get(&status_url).send().await {
        Ok(resp) if resp.status().is_success() => {
            // Grids report readiness under value.ready; plain drivers may omit it
            match resp.json::<serde_json::Value>().await {
                Ok(body) => body["value"]["ready"].as_bool().unwrap_or(true),
                Err(_) => true,
            }
        }
        Ok(resp) => {
            debug!("WebDriver status returned {}", resp.status());
            false
        }
        Err(e) => {
            debug!("WebDriver status check failed: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_screenshot_file_name() {
        let at = Utc.with_ymd_and_hms(2024, 3, 9, 14, 5, 7).unwrap();

        assert_eq!(
            screenshot_file_name("Validate - Successful & Unsuccessful Login", at),
            "validate-successful-unsuccessful-login_20240309T140507.png"
        );
        assert_eq!(
            screenshot_file_name("  Login #2 ", at),
            "login-2_20240309T140507.png"
        );
        assert_eq!(screenshot_file_name("***", at), "scenario_20240309T140507.png");
    }

    #[tokio::test]
    async fn test_probe_unreachable_server() {
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        assert!(!probe_webdriver(&format!("http://127.0.0.1:{}", port)).await);
    }
}
