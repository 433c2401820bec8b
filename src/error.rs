use crate::calculators::{CalculatorVariant, ScenarioState};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("Element not found: {what} (waited {waited_ms} ms)")]
    ElementNotFound { what: String, waited_ms: u64 },

    #[error("Cannot {operation} while scenario is {state:?}")]
    OutOfOrder {
        operation: &'static str,
        state: ScenarioState,
    },

    #[error("Expected {expected} but page was filled for {actual:?}")]
    VariantMismatch {
        expected: String,
        actual: Option<CalculatorVariant>,
    },

    #[error("Scenario timed out after {0} ms")]
    ScenarioTimeout(u64),

    #[error("WebDriver error: {0}")]
    WebDriver(String),

    #[error("Artifact error: {0}")]
    Artifact(String),

    #[error("Fixture error: {0}")]
    Fixture(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T, E = HarnessError> = std::result::Result<T, E>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    Navigation,
    ElementNotFound,
    OutOfOrder,
    VariantMismatch,
    ScenarioTimeout,
    WebDriver,
    Artifact,
    Fixture,
    Parse,
    Config,
}

impl HarnessError {
    pub fn code(&self) -> ErrorCode {
        match self {
            HarnessError::Navigation(_) => ErrorCode::Navigation,
            HarnessError::ElementNotFound { .. } => ErrorCode::ElementNotFound,
            HarnessError::OutOfOrder { .. } => ErrorCode::OutOfOrder,
            HarnessError::VariantMismatch { .. } => ErrorCode::VariantMismatch,
            HarnessError::ScenarioTimeout(_) => ErrorCode::ScenarioTimeout,
            HarnessError::WebDriver(_) => ErrorCode::WebDriver,
            HarnessError::Artifact(_) => ErrorCode::Artifact,
            HarnessError::Fixture(_) => ErrorCode::Fixture,
            HarnessError::Parse(_) => ErrorCode::Parse,
            HarnessError::Config(_) => ErrorCode::Config,
        }
    }

    /// Failures that end the whole scenario rather than a single operation.
    pub fn is_fatal_to_scenario(&self) -> bool {
        matches!(
            self,
            HarnessError::Navigation(_) | HarnessError::ScenarioTimeout(_)
        )
    }
}

impl From<fantoccini::error::CmdError> for HarnessError {
    fn from(err: fantoccini::error::CmdError) -> Self {
        HarnessError::WebDriver(err.to_string())
    }
}

impl From<fantoccini::error::NewSessionError> for HarnessError {
    fn from(err: fantoccini::error::NewSessionError) -> Self {
        HarnessError::Navigation(format!("could not start WebDriver session: {}", err))
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(err: serde_json::Error) -> Self {
        HarnessError::Artifact(err.to_string())
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(err: std::io::Error) -> Self {
        HarnessError::Artifact(err.to_string())
    }
}
