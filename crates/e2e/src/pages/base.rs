//! Shared WebDriver helpers for page objects

use std::future::Future;
use std::time::Duration;
use thirtyfour::error::WebDriverErrorInner;
use thirtyfour::prelude::*;
use tokio::time::{sleep, Instant};
use tracing::{debug, info};

use wdu_common::Timeouts;

use crate::error::{E2eError, E2eResult};

/// Interval between polls of an explicit wait
pub const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// Element and alert helpers every page object builds on
pub struct BasePage {
    driver: WebDriver,
    timeouts: Timeouts,
}

impl BasePage {
    pub fn new(driver: WebDriver, timeouts: Timeouts) -> Self {
        Self { driver, timeouts }
    }

    pub fn into_driver(self) -> WebDriver {
        self.driver
    }

    pub async fn navigate_to(&self, url: &str) -> E2eResult<()> {
        info!("Navigating to {}", url);
        self.driver.goto(url).await?;
        Ok(())
    }

    /// Wait for the element to become clickable, clear it, then type `text`
    ///
    /// Empty `text` leaves the field cleared.
    pub async fn send_keys(&self, by: By, text: &str) -> E2eResult<()> {
        let element = self.wait_for_clickable(by).await?;
        element.clear().await?;
        if !text.is_empty() {
            element.send_keys(text).await?;
        }
        Ok(())
    }

    pub async fn wait_and_click(&self, by: By) -> E2eResult<()> {
        let element = self.wait_for_clickable(by).await?;
        element.click().await?;
        Ok(())
    }

    /// Wait for a JavaScript alert, accept it and require its text to equal `expected`
    ///
    /// Only "no such alert" is retried. Any other WebDriver error ends the wait.
    pub async fn wait_for_alert_and_validate_text(&self, expected: &str) -> E2eResult<()> {
        let timeout = self.timeouts.explicit();
        let driver = &self.driver;

        let actual = poll_until(timeout, POLL_INTERVAL, || async move {
            match driver.get_alert_text().await {
                Ok(text) => Some(Ok(text)),
                Err(e) if matches!(&*e, WebDriverErrorInner::NoSuchAlert(_)) => None,
                Err(e) => Some(Err(e)),
            }
        })
        .await
        .ok_or_else(|| E2eError::AlertTimeout {
            expected: expected.to_string(),
            seconds: timeout.as_secs(),
        })??;

        debug!("Alert text: {}", actual);
        self.driver.accept_alert().await?;

        ensure_text(expected, &actual)
    }

    async fn wait_for_clickable(&self, by: By) -> E2eResult<WebElement> {
        let element = self
            .driver
            .query(by)
            .wait(self.timeouts.explicit(), POLL_INTERVAL)
            .and_clickable()
            .first()
            .await?;
        Ok(element)
    }
}

/// Exact string comparison used by every text assertion
pub fn ensure_text(expected: &str, actual: &str) -> E2eResult<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(E2eError::AssertionFailed {
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// Call `probe` until it yields a value or `timeout` elapses
///
/// `probe` always runs at least once.
pub async fn poll_until<T, F, Fut>(timeout: Duration, interval: Duration, mut probe: F) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(value) = probe().await {
            return Some(value);
        }
        let now = Instant::now();
        if now >= deadline {
            return None;
        }
        sleep(interval.min(deadline - now)).await;
    }
}
