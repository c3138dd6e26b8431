//! Error types for the engine binary.

/// Top-level error for the engine binary.
///
/// Each variant wraps one subsystem's error so `main` can propagate with
/// `?`.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: evosim_core::ConfigError,
    },

    /// The world could not be built.
    #[error("build error: {source}")]
    Build {
        /// The underlying build error.
        #[from]
        source: evosim_core::BuildError,
    },

    /// The tick loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: evosim_core::RunnerError,
    },

    /// The run report could not be serialized.
    #[error("report error: {source}")]
    Report {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
