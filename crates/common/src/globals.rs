//! Framework-wide constants

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const WEBDRIVER_UNIVERSITY_HOMEPAGE_URL: &str = "https://www.webdriveruniversity.com";

/// Default explicit wait timeout (seconds)
pub const DEFAULT_EXPLICIT_TIMEOUT: u64 = 10;

/// Page load timeout (seconds)
pub const PAGE_LOAD_TIMEOUT: u64 = 60;

/// Implicit wait timeout (seconds). Zero leaves all waiting to explicit waits.
pub const DEFAULT_IMPLICIT_TIMEOUT: u64 = 0;

/// Wait policies applied to a browser session, in whole seconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timeouts {
    /// How long element and alert waits poll before failing
    pub explicit_secs: u64,

    /// How long a navigation may take to finish loading
    pub page_load_secs: u64,

    /// Driver-side implicit element lookup wait
    pub implicit_secs: u64,
}

impl Timeouts {
    pub const DEFAULT: Self = Self {
        explicit_secs: DEFAULT_EXPLICIT_TIMEOUT,
        page_load_secs: PAGE_LOAD_TIMEOUT,
        implicit_secs: DEFAULT_IMPLICIT_TIMEOUT,
    };

    pub fn explicit(&self) -> Duration {
        Duration::from_secs(self.explicit_secs)
    }

    pub fn page_load(&self) -> Duration {
        Duration::from_secs(self.page_load_secs)
    }

    pub fn implicit(&self) -> Duration {
        Duration::from_secs(self.implicit_secs)
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self::DEFAULT
    }
}
