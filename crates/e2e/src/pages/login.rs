//! Login portal page object

use async_trait::async_trait;
use std::fmt;
use thirtyfour::prelude::*;

use wdu_common::SuiteConfig;

use super::{BasePage, LoginActions};
use crate::error::E2eResult;

const USERNAME_FIELD_ID: &str = "text";
const PASSWORD_FIELD_ID: &str = "password";
const LOGIN_BUTTON_ID: &str = "login-button";

/// `/Login-Portal/index.html`
pub struct LoginPage {
    base: BasePage,
    url: String,
}

impl LoginPage {
    pub fn new(driver: WebDriver, config: &SuiteConfig) -> Self {
        Self {
            base: BasePage::new(driver, config.timeouts),
            url: config.login_page_url(),
        }
    }

    /// Give up the page and hand back its session, e.g. to quit it
    pub fn into_driver(self) -> WebDriver {
        self.base.into_driver()
    }
}

impl fmt::Debug for LoginPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginPage")
            .field("url", &self.url)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl LoginActions for LoginPage {
    async fn navigate_to_login_page(&self) -> E2eResult<()> {
        self.base.navigate_to(&self.url).await
    }

    async fn set_username(&self, username: &str) -> E2eResult<()> {
        self.base.send_keys(By::Id(USERNAME_FIELD_ID), username).await
    }

    async fn set_password(&self, password: &str) -> E2eResult<()> {
        self.base.send_keys(By::Id(PASSWORD_FIELD_ID), password).await
    }

    async fn click_login_button(&self) -> E2eResult<()> {
        self.base.wait_and_click(By::Id(LOGIN_BUTTON_ID)).await
    }

    async fn wait_for_alert_and_validate_text(&self, expected: &str) -> E2eResult<()> {
        self.base.wait_for_alert_and_validate_text(expected).await
    }
}
