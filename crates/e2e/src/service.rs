//! Driver service management - spawning and health checking a local WebDriver server

use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};
use tokio::time::sleep;
use tracing::info;

use wdu_common::SuiteConfig;

use crate::driver::probe_webdriver;
use crate::error::{E2eError, E2eResult};

/// Handle to a running chromedriver / geckodriver / msedgedriver process
pub struct DriverService {
    child: Child,
    url: String,
}

impl DriverService {
    /// Spawn the driver binary for the configured browser
    pub async fn spawn(config: &SuiteConfig) -> E2eResult<Self> {
        let port = match config.driver.port {
            Some(port) => port,
            None => find_free_port()?,
        };
        let url = format!("http://127.0.0.1:{}", port);
        let binary = config
            .driver
            .binary
            .clone()
            .unwrap_or_else(|| PathBuf::from(config.browser.default_driver_binary()));

        info!("Spawning {} on port {}", binary.display(), port);

        let child = Command::new(&binary)
            .args(config.browser.driver_port_args(port))
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| {
                E2eError::DriverStartup(format!("Failed to spawn {}: {}", binary.display(), e))
            })?;

        let handle = DriverService { child, url };

        // Dropping the handle on failure reaps the child
        handle
            .wait_for_ready(Duration::from_secs(config.driver.startup_timeout_secs))
            .await?;

        info!("WebDriver server is ready at {}", handle.url);
        Ok(handle)
    }

    /// Poll the server until it answers, at least once even with a zero timeout
    async fn wait_for_ready(&self, timeout: Duration) -> E2eResult<()> {
        let start = Instant::now();
        let mut attempts = 0;

        loop {
            attempts += 1;
            if probe_webdriver(&self.url).await {
                return Ok(());
            }
            if start.elapsed() >= timeout {
                return Err(E2eError::DriverHealthCheck(attempts));
            }
            if attempts == 1 {
                info!("Waiting for WebDriver server to start...");
            }
            sleep(Duration::from_millis(100)).await;
        }
    }

    /// Base URL sessions should be opened against
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Stop the driver process
    pub fn stop(&mut self) -> E2eResult<()> {
        if let Ok(Some(_)) = self.child.try_wait() {
            return Ok(());
        }

        info!("Stopping WebDriver server (pid: {})", self.child.id());

        #[cfg(unix)]
        {
            use nix::sys::signal::{kill, Signal};
            use nix::unistd::Pid;

            let pid = Pid::from_raw(self.child.id() as i32);
            if kill(pid, Signal::SIGTERM).is_ok() {
                std::thread::sleep(Duration::from_millis(200));
            }
        }

        // Force kill if still running
        let _ = self.child.kill();
        self.child.wait()?;

        Ok(())
    }
}

impl Drop for DriverService {
    fn drop(&mut self) {
        let _ = self.stop();
    }
}

/// Find a free port to use
fn find_free_port() -> std::io::Result<u16> {
    use std::net::TcpListener;

    let listener = TcpListener::bind("127.0.0.1:0")?;
    Ok(listener.local_addr()?.port())
}
