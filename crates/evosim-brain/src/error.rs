//! Error types for the `evosim-brain` crate.

/// Errors from controller evaluation and heredity.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BrainError {
    /// The input vector length differs from the configured input count.
    ///
    /// Callers treat this as "no decision this tick", never as fatal.
    #[error("input dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Configured input count.
        expected: usize,
        /// Length of the vector supplied.
        actual: usize,
    },

    /// A parent weight vector does not fit this network's topology.
    #[error("weight shape mismatch at neuron {neuron}: expected {expected} weights, got {actual}")]
    TopologyMismatch {
        /// Flat neuron index (layer order, then neuron order) where the
        /// shapes diverge.
        neuron: usize,
        /// Weights expected at that position (0 past the last neuron).
        expected: usize,
        /// Weights supplied at that position (0 past the last neuron).
        actual: usize,
    },

    /// Mutation rate must be a probability.
    #[error("mutation rate must be within [0, 1], got {0}")]
    InvalidMutationRate(f64),
}
