//! Per-scenario state: one browser session and its login page

use cucumber::World;
use once_cell::sync::OnceCell;
use tracing::{info, warn};

use wdu_common::SuiteConfig;
use wdu_e2e::{driver, E2eError, E2eResult, LoginPage, LoginStep, StepKind};

static SUITE_CONFIG: OnceCell<SuiteConfig> = OnceCell::new();

/// Install the resolved configuration before any scenario runs
pub fn install_config(config: SuiteConfig) {
    if SUITE_CONFIG.set(config).is_err() {
        warn!("Suite config already installed, keeping the first one");
    }
}

fn suite_config() -> &'static SuiteConfig {
    SUITE_CONFIG.get_or_init(SuiteConfig::default)
}

#[derive(Debug, Default, World)]
pub struct LoginWorld {
    page: Option<LoginPage>,
}

impl LoginWorld {
    /// Resolve `text` under `kind` and run it
    ///
    /// Unbound text fails before any browser session is opened.
    pub async fn run_text(&mut self, kind: StepKind, text: &str) -> E2eResult<()> {
        let step = LoginStep::bind(kind, text)?;
        self.run(step).await
    }

    /// Forward a step to this scenario's login page, opening the session on first use
    async fn run(&mut self, step: LoginStep) -> E2eResult<()> {
        let page = self.page().await?;
        step.execute(page).await
    }

    async fn page(&mut self) -> E2eResult<&LoginPage> {
        if self.page.is_none() {
            let config = suite_config();
            let session = driver::open_session(config).await?;
            self.page = Some(LoginPage::new(session, config));
        }
        self.page.as_ref().ok_or(E2eError::NoSession)
    }

    /// Close the session, keeping a screenshot first when the scenario failed
    pub async fn teardown(&mut self, scenario: &str, failed: bool) {
        let Some(page) = self.page.take() else {
            return;
        };
        let session = page.into_driver();

        if failed {
            let config = suite_config();
            if let Err(e) = driver::capture_screenshot(&session, &config.screenshot_dir, scenario).await {
                warn!("Failed to capture screenshot for '{}': {}", scenario, e);
            }
        }

        match session.quit().await {
            Ok(()) => info!("Closed browser session for '{}'", scenario),
            Err(e) => warn!("Failed to quit browser session for '{}': {}", scenario, e),
        }
    }
}
