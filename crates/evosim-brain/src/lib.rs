//! Feed-forward neural controller for the Evosim simulation.
//!
//! Each creature owns one [`NeuralNetwork`] with a topology fixed at
//! construction. Only weights and biases change, and only through explicit
//! randomization or heredity from a parent. There is no training signal:
//! the population's controllers drift purely through who survives and
//! reproduces.
//!
//! # Modules
//!
//! - [`activation`] -- The saturating sigmoid.
//! - [`error`] -- Error types ([`BrainError`]).
//! - [`network`] -- [`Neuron`], [`NeuronLayer`], [`Topology`], and
//!   [`NeuralNetwork`] with forward evaluation and heredity.
//!
//! [`Neuron`]: network::Neuron
//! [`NeuronLayer`]: network::NeuronLayer
//! [`Topology`]: network::Topology
//! [`NeuralNetwork`]: network::NeuralNetwork

pub mod activation;
pub mod error;
pub mod network;

pub use activation::sigmoid;
pub use error::BrainError;
pub use network::{NeuralNetwork, Neuron, NeuronLayer, Topology};
