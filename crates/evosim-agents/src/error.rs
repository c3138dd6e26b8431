//! Error types for the evosim-agents crate.

use evosim_brain::BrainError;

/// Errors that can occur while creating or updating creatures.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// A child's controller could not be built from its parent's weights.
    #[error("child controller rejected: {0}")]
    Controller(#[from] BrainError),
}
