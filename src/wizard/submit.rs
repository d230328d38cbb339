use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::api::FarmStore;
use crate::errors::SubmitError;

use super::engine::FormWizardEngine;

pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// What a failed farm save means for the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SaveFailurePolicy {
    /// Report the failure and continue as if the save had worked.
    #[default]
    Proceed,
    /// Stop and surface the failure.
    Block,
    /// Re-attempt retryable failures, then surface the last one.
    Retry { attempts: u32 },
}

impl fmt::Display for SaveFailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveFailurePolicy::Proceed => f.write_str("proceed"),
            SaveFailurePolicy::Block => f.write_str("block"),
            SaveFailurePolicy::Retry { attempts } => write!(f, "retry:{}", attempts),
        }
    }
}

impl FromStr for SaveFailurePolicy {
    type Err = String;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let normalized = input.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "proceed" => Ok(SaveFailurePolicy::Proceed),
            "block" => Ok(SaveFailurePolicy::Block),
            "retry" => Ok(SaveFailurePolicy::Retry {
                attempts: DEFAULT_RETRY_ATTEMPTS,
            }),
            other => other
                .strip_prefix("retry:")
                .and_then(|count| count.parse::<u32>().ok())
                .filter(|attempts| *attempts > 0)
                .map(|attempts| SaveFailurePolicy::Retry { attempts })
                .ok_or_else(|| {
                    format!(
                        "unknown save-failure policy `{}` (expected proceed, block, retry or retry:N)",
                        input.trim()
                    )
                }),
        }
    }
}

impl TryFrom<String> for SaveFailurePolicy {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<SaveFailurePolicy> for String {
    fn from(policy: SaveFailurePolicy) -> Self {
        policy.to_string()
    }
}

/// How a submission ended when it did not fail outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Saved { attempts: u32 },
    ProceededWithoutSaving(SubmitError),
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, SubmitOutcome::Saved { .. })
    }
}

/// Submits the wizard and applies `policy` to a failed save.
///
/// Submitting from a step other than the last one is a caller error and is
/// returned as is under every policy.
pub fn submit_with_policy<S>(
    engine: &FormWizardEngine,
    store: &S,
    policy: SaveFailurePolicy,
) -> Result<SubmitOutcome, SubmitError>
where
    S: FarmStore + ?Sized,
{
    let max_attempts = match policy {
        SaveFailurePolicy::Retry { attempts } => attempts.max(1),
        SaveFailurePolicy::Proceed | SaveFailurePolicy::Block => 1,
    };

    let mut attempt = 0;
    let failure = loop {
        attempt += 1;
        match engine.submit(store) {
            Ok(()) => {
                tracing::info!(attempt, "farm details saved");
                return Ok(SubmitOutcome::Saved { attempts: attempt });
            }
            Err(err @ SubmitError::NotAtFinalStep { .. }) => return Err(err),
            Err(err) => {
                tracing::warn!(attempt, error = %err, "farm details save failed");
                if attempt >= max_attempts || !err.is_retryable() {
                    break err;
                }
            }
        }
    };

    match policy {
        SaveFailurePolicy::Proceed => Ok(SubmitOutcome::ProceededWithoutSaving(failure)),
        SaveFailurePolicy::Block | SaveFailurePolicy::Retry { .. } => Err(failure),
    }
}
