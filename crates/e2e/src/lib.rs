//! WDU E2E Test Framework
//!
//! Browser-driven login tests for webdriveruniversity.com:
//! - Opens WebDriver sessions (optionally against a spawned local driver)
//! - Wraps the login portal in a page object
//! - Maps Cucumber step phrases onto page-object calls
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │              Cucumber harness (tests/bdd)                   │
//! │    LoginWorld ── one session + LoginPage per scenario       │
//! ├─────────────────────────────────────────────────────────────┤
//! │  LoginStep (phrase table)                                   │
//! │    ├── bind(kind, text) -> LoginStep                        │
//! │    └── execute(&dyn LoginActions)                           │
//! ├─────────────────────────────────────────────────────────────┤
//! │  pages                                                      │
//! │    ├── LoginActions (capability set)                        │
//! │    ├── LoginPage: LoginActions                              │
//! │    └── BasePage (explicit waits, alerts)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  driver::open_session / DriverService  ── thirtyfour        │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod driver;
pub mod error;
pub mod pages;
pub mod service;
pub mod steps;

pub use error::{E2eError, E2eResult};
pub use pages::{LoginActions, LoginPage};
pub use service::DriverService;
pub use steps::{LoginStep, StepKind};
