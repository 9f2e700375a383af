//! Page objects for the WebDriverUniversity site

use async_trait::async_trait;

use crate::error::E2eResult;

pub mod base;
pub mod login;

pub use base::BasePage;
pub use login::LoginPage;

/// Alert shown after a login with valid credentials
pub const SUCCESSFUL_LOGIN_MESSAGE: &str = "validation succeeded";

/// Alert shown after a login with invalid or missing credentials
pub const UNSUCCESSFUL_LOGIN_MESSAGE: &str = "validation failed";

/// Everything a login step can ask of the login page
#[async_trait]
pub trait LoginActions: Send + Sync {
    async fn navigate_to_login_page(&self) -> E2eResult<()>;

    async fn set_username(&self, username: &str) -> E2eResult<()>;

    async fn set_password(&self, password: &str) -> E2eResult<()>;

    async fn click_login_button(&self) -> E2eResult<()>;

    /// Wait for an alert and require its text to equal `expected` exactly
    async fn wait_for_alert_and_validate_text(&self, expected: &str) -> E2eResult<()>;

    async fn validate_successful_login_message(&self) -> E2eResult<()> {
        self.wait_for_alert_and_validate_text(SUCCESSFUL_LOGIN_MESSAGE).await
    }

    async fn validate_unsuccessful_login_message(&self) -> E2eResult<()> {
        self.wait_for_alert_and_validate_text(UNSUCCESSFUL_LOGIN_MESSAGE).await
    }
}
