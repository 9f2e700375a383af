//! Login step phrases and the page action each one forwards to

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fmt;
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::pages::LoginActions;

/// Gherkin step keyword a phrase is registered under
///
/// `And` and `But` take the kind of the step before them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Given,
    When,
    Then,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepKind::Given => "Given",
            StepKind::When => "When",
            StepKind::Then => "Then",
        };
        f.write_str(name)
    }
}

/// A login step, keyed by its natural-language phrase
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginStep {
    AccessLoginPage,
    EnterUsername(String),
    EnterPassword(String),
    ClickLoginButton,
    ExpectSuccessfulLogin,
    ExpectUnsuccessfulLogin,
    ExpectValidationMessage(String),
}

// `{string}` matches a double- or single-quoted value, possibly empty,
// with backslash escapes inside the quotes
const STRING_PARAM: &str = r#"(?:"((?:[^"\\]|\\.)*)"|'((?:[^'\\]|\\.)*)')"#;

type StepBuilder = fn(String) -> LoginStep;

static STEP_TABLE: Lazy<Vec<(Regex, StepBuilder)>> = Lazy::new(|| {
    let entry = |pattern: &str, build: StepBuilder| {
        let pattern = format!("^{}$", pattern.replace("{string}", STRING_PARAM));
        let regex = Regex::new(&pattern).expect("valid step pattern");
        (regex, build)
    };

    vec![
        entry("I access the webdriver university login page", |_| LoginStep::AccessLoginPage),
        entry("I enter a username {string}", LoginStep::EnterUsername),
        entry("I enter a password {string}", LoginStep::EnterPassword),
        entry("I click on the login button", |_| LoginStep::ClickLoginButton),
        entry(
            "I should be presented with the successful login message",
            |_| LoginStep::ExpectSuccessfulLogin,
        ),
        entry(
            "I should be presented with the unsuccessful login message",
            |_| LoginStep::ExpectUnsuccessfulLogin,
        ),
        entry(
            "I should be presented with the following login validation message {string}",
            LoginStep::ExpectValidationMessage,
        ),
    ]
});

static KEYWORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:Given|When|Then|And|But|\*)\s+").expect("valid keyword regex"));

impl LoginStep {
    /// Match step text, with or without its Gherkin keyword
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        match_phrase(&KEYWORD.replace(text, ""))
    }

    /// Resolve the text of a `kind` step, as the Cucumber bindings receive it
    pub fn bind(kind: StepKind, text: &str) -> E2eResult<Self> {
        match match_phrase(text.trim()) {
            Some(step) if step.kind() == kind => Ok(step),
            _ => Err(E2eError::UnboundStep {
                kind,
                text: text.to_string(),
            }),
        }
    }

    /// The keyword this step is written under
    pub fn kind(&self) -> StepKind {
        match self {
            LoginStep::AccessLoginPage => StepKind::Given,
            LoginStep::EnterUsername(_) | LoginStep::EnterPassword(_) | LoginStep::ClickLoginButton => {
                StepKind::When
            }
            LoginStep::ExpectSuccessfulLogin
            | LoginStep::ExpectUnsuccessfulLogin
            | LoginStep::ExpectValidationMessage(_) => StepKind::Then,
        }
    }

    /// The canonical step text
    pub fn phrase(&self) -> String {
        match self {
            LoginStep::AccessLoginPage => "I access the webdriver university login page".to_string(),
            LoginStep::EnterUsername(username) => format!("I enter a username {}", quote(username)),
            LoginStep::EnterPassword(password) => format!("I enter a password {}", quote(password)),
            LoginStep::ClickLoginButton => "I click on the login button".to_string(),
            LoginStep::ExpectSuccessfulLogin => {
                "I should be presented with the successful login message".to_string()
            }
            LoginStep::ExpectUnsuccessfulLogin => {
                "I should be presented with the unsuccessful login message".to_string()
            }
            LoginStep::ExpectValidationMessage(message) => format!(
                "I should be presented with the following login validation message {}",
                quote(message)
            ),
        }
    }

    /// Forward the step to its page action
    pub async fn execute(&self, page: &dyn LoginActions) -> E2eResult<()> {
        debug!("Executing step: {}", self);

        match self {
            LoginStep::AccessLoginPage => page.navigate_to_login_page().await,
            LoginStep::EnterUsername(username) => page.set_username(username).await,
            LoginStep::EnterPassword(password) => page.set_password(password).await,
            LoginStep::ClickLoginButton => page.click_login_button().await,
            LoginStep::ExpectSuccessfulLogin => page.validate_successful_login_message().await,
            LoginStep::ExpectUnsuccessfulLogin => page.validate_unsuccessful_login_message().await,
            LoginStep::ExpectValidationMessage(message) => {
                page.wait_for_alert_and_validate_text(message).await
            }
        }
    }
}

impl fmt::Display for LoginStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.phrase())
    }
}

fn match_phrase(text: &str) -> Option<LoginStep> {
    STEP_TABLE
        .iter()
        .find_map(|(regex, build)| regex.captures(text).map(|caps| build(string_param(&caps))))
}

fn string_param(caps: &Captures<'_>) -> String {
    caps.get(1)
        .or_else(|| caps.get(2))
        .map(|m| unescape(m.as_str()))
        .unwrap_or_default()
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.extend(chars.next());
        } else {
            out.push(c);
        }
    }
    out
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
