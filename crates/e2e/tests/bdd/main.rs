//! Cucumber harness entry point
//!
//! Runs the login features against a live WebDriver server.
//! Run with: cargo test --package wdu-e2e --test bdd -- --browser firefox
//!
//! Without a reachable WebDriver server the suite is skipped unless
//! `--require-webdriver` (or `WDU_REQUIRE_WEBDRIVER=1`) is given.

mod steps;
mod world;

use std::path::PathBuf;
use std::process::ExitCode;

use cucumber::{cli, event::ScenarioFinished, writer::Stats as _, World as _};
use futures::FutureExt as _;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use wdu_common::{Browser, SuiteConfig};
use wdu_e2e::{driver, DriverService, E2eError, E2eResult};
use world::LoginWorld;

const FEATURES: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/features");

#[derive(clap::Args, Debug, Clone)]
struct SuiteOpts {
    /// Suite configuration file
    #[arg(
        long = "config",
        env = "WDU_CONFIG",
        default_value_os_t = wdu_common::default_config_path()
    )]
    config_path: PathBuf,

    /// Browser to use (chrome, firefox, edge)
    #[arg(long)]
    browser: Option<Browser>,

    /// Show the browser window
    #[arg(long)]
    headed: bool,

    /// WebDriver server URL
    #[arg(long)]
    webdriver_url: Option<String>,

    /// Spawn a local driver binary for the session
    #[arg(long)]
    spawn_driver: bool,

    /// Fail instead of skipping when no WebDriver server answers
    #[arg(
        long,
        env = "WDU_REQUIRE_WEBDRIVER",
        action = clap::ArgAction::SetTrue,
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    require_webdriver: bool,
}

fn resolve_config(opts: &SuiteOpts) -> E2eResult<SuiteConfig> {
    let mut config = SuiteConfig::load(&opts.config_path)?;
    config.apply_env()?;

    if let Some(browser) = opts.browser {
        config.browser = browser;
    }
    if opts.headed {
        config.headless = false;
    }
    if let Some(url) = &opts.webdriver_url {
        config.webdriver_url = url.clone();
    }
    if opts.spawn_driver {
        config.driver.spawn = true;
    }

    config.validate()?;
    Ok(config)
}

/// Exit code for a suite that could not be set up
const SETUP_FAILED: u8 = 2;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let opts = cli::Opts::<_, _, _, SuiteOpts>::parsed();
    let suite = opts.custom.clone();

    let mut config = match resolve_config(&suite) {
        Ok(config) => config,
        Err(e) => {
            error!("Error: {}", e);
            return ExitCode::from(SETUP_FAILED);
        }
    };

    // Keep the driver process alive for the whole run. Every exit below
    // returns from main, so the handle is dropped and the driver stopped.
    let _service = if config.driver.spawn {
        match DriverService::spawn(&config).await {
            Ok(service) => {
                config.webdriver_url = service.url().to_string();
                Some(service)
            }
            Err(e) => {
                error!("Error: {}", e);
                return ExitCode::from(SETUP_FAILED);
            }
        }
    } else {
        None
    };

    if !driver::probe_webdriver(&config.webdriver_url).await {
        if suite.require_webdriver {
            error!(
                "Error: {}",
                E2eError::DriverStartup(format!("no WebDriver server at {}", config.webdriver_url))
            );
            return ExitCode::from(SETUP_FAILED);
        }
        warn!(
            "No WebDriver server at {}, skipping login features",
            config.webdriver_url
        );
        return ExitCode::SUCCESS;
    }

    info!(
        browser = %config.browser,
        headless = config.headless,
        "Running login features against {}",
        config.base_url
    );
    world::install_config(config);

    let writer = LoginWorld::cucumber()
        .max_concurrent_scenarios(1)
        .after(|_feature, _rule, scenario, event, world| {
            let failed = matches!(
                event,
                ScenarioFinished::StepFailed(..) | ScenarioFinished::BeforeHookFailed(..)
            );
            async move {
                if let Some(world) = world {
                    world.teardown(&scenario.name, failed).await;
                }
            }
            .boxed_local()
        })
        .with_cli(opts)
        .run(FEATURES)
        .await;

    if writer.execution_has_failed() {
        error!(
            "{} step(s) failed, {} parsing error(s), {} hook error(s)",
            writer.failed_steps(),
            writer.parsing_errors(),
            writer.hook_errors()
        );
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
