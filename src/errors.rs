use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for configuration and storage failures.
#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = StdResult<T, AdvisorError>;

impl From<std::io::Error> for AdvisorError {
    fn from(err: std::io::Error) -> Self {
        AdvisorError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for AdvisorError {
    fn from(err: serde_json::Error) -> Self {
        AdvisorError::ConfigError(err.to_string())
    }
}

/// Misuse of the wizard engine by its caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error("Unknown field: {0}")]
    UnknownField(String),
    #[error("Field `{0}` is not a stepper field")]
    NotAStepper(String),
    #[error("Form `{0}` declares no steps")]
    EmptyForm(String),
    #[error("Field `{field}` is placed on step {step} but the form has {total} steps")]
    StepOutOfRange {
        field: String,
        step: usize,
        total: usize,
    },
}

/// Failures while handing the collected farm profile to the save endpoint.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    #[error("Submit is only available on the final step (currently on step {step} of {total})")]
    NotAtFinalStep { step: usize, total: usize },
    #[error("Could not reach the farm service: {0}")]
    Transport(String),
    #[error("Farm service rejected the request with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Invalid request: {0}")]
    Request(String),
}

impl SubmitError {
    /// Whether another attempt could plausibly succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            SubmitError::Transport(_) => true,
            SubmitError::Rejected { status, .. } => *status >= 500 || *status == 408,
            SubmitError::NotAtFinalStep { .. } | SubmitError::Request(_) => false,
        }
    }
}

/// Alias tables whose targets fall outside the canonical list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegionTableError {
    #[error("Alias `{alias}` points to unknown region `{target}`")]
    UnknownTarget { alias: String, target: String },
    #[error("Duplicate canonical region: {0}")]
    DuplicateRegion(String),
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] AdvisorError),
    #[error(transparent)]
    Wizard(#[from] WizardError),
    #[error(transparent)]
    Submit(#[from] SubmitError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(AdvisorError::from(err))
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable_but_client_errors_are_not() {
        assert!(SubmitError::Transport("refused".into()).is_retryable());
        assert!(SubmitError::Rejected {
            status: 503,
            body: String::new()
        }
        .is_retryable());
        assert!(!SubmitError::Rejected {
            status: 422,
            body: "bad".into()
        }
        .is_retryable());
        assert!(!SubmitError::NotAtFinalStep { step: 1, total: 3 }.is_retryable());
    }

    #[test]
    fn io_errors_map_to_storage() {
        let err: AdvisorError = std::io::Error::new(std::io::ErrorKind::Other, "disk").into();
        assert!(matches!(err, AdvisorError::StorageError(msg) if msg.contains("disk")));
    }
}
