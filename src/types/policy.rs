use serde::{Deserialize, Serialize};

/// What to do when a single item cannot be read or copied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Log, record the failure and keep going.
    #[default]
    Skip,
    /// The first failure ends the run.
    Abort,
}
