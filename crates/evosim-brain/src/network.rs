//! Fixed-topology feed-forward network.
//!
//! The input layer is a notional identity layer: the sensor vector is fed
//! straight into the first computing layer. Every computing layer maps its
//! input vector through `sigmoid(bias + sum(w * x))` per neuron. Hidden
//! layers are all the same width; the output layer's width is the output
//! count.
//!
//! Weight vectors are exported and inherited in a stable order: computing
//! layers front to back, neurons in layer order. Biases are never part of
//! heredity.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::activation::sigmoid;
use crate::error::BrainError;

/// Shape of a network. Fixed for the lifetime of a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topology {
    /// Length of the input vector.
    pub inputs: usize,
    /// Length of the output vector.
    pub outputs: usize,
    /// Number of hidden layers (may be zero).
    pub hidden_layers: usize,
    /// Neurons in each hidden layer.
    pub neurons_per_hidden_layer: usize,
}

impl Topology {
    /// Create a topology.
    pub const fn new(
        inputs: usize,
        outputs: usize,
        hidden_layers: usize,
        neurons_per_hidden_layer: usize,
    ) -> Self {
        Self {
            inputs,
            outputs,
            hidden_layers,
            neurons_per_hidden_layer,
        }
    }

    /// `(neuron count, inputs per neuron)` for each computing layer.
    fn layer_shapes(&self) -> Vec<(usize, usize)> {
        let mut shapes = Vec::with_capacity(self.hidden_layers.saturating_add(1));
        let mut fan_in = self.inputs;
        for _ in 0..self.hidden_layers {
            shapes.push((self.neurons_per_hidden_layer, fan_in));
            fan_in = self.neurons_per_hidden_layer;
        }
        shapes.push((self.outputs, fan_in));
        shapes
    }
}

/// A single unit: one weight per input plus a bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Neuron {
    weights: Vec<f64>,
    bias: f64,
}

impl Neuron {
    /// A neuron with `fan_in` zero weights and a zero bias.
    pub fn zeroed(fan_in: usize) -> Self {
        Self {
            weights: vec![0.0; fan_in],
            bias: 0.0,
        }
    }

    /// Incoming weights.
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Bias term.
    pub const fn bias(&self) -> f64 {
        self.bias
    }

    /// `sigmoid(bias + sum(w_i * x_i))`.
    pub fn activate(&self, inputs: &[f64]) -> f64 {
        let net = self
            .weights
            .iter()
            .zip(inputs)
            .fold(self.bias, |acc, (w, x)| w.mul_add(*x, acc));
        sigmoid(net)
    }

    fn randomize(&mut self, rng: &mut impl Rng) {
        for weight in &mut self.weights {
            *weight = rng.random_range(-1.0..=1.0);
        }
        self.bias = rng.random_range(-1.0..=1.0);
    }
}

/// An ordered set of neurons evaluated against the same input vector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuronLayer {
    neurons: Vec<Neuron>,
}

impl NeuronLayer {
    /// `width` zeroed neurons, each with `fan_in` weights.
    pub fn zeroed(width: usize, fan_in: usize) -> Self {
        Self {
            neurons: (0..width).map(|_| Neuron::zeroed(fan_in)).collect(),
        }
    }

    /// Neurons in evaluation order.
    pub fn neurons(&self) -> &[Neuron] {
        &self.neurons
    }

    /// Number of neurons.
    pub const fn len(&self) -> usize {
        self.neurons.len()
    }

    /// True for a zero-width layer.
    pub const fn is_empty(&self) -> bool {
        self.neurons.is_empty()
    }

    /// One activation per neuron.
    pub fn forward(&self, inputs: &[f64]) -> Vec<f64> {
        self.neurons.iter().map(|n| n.activate(inputs)).collect()
    }
}

/// A creature's controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuralNetwork {
    topology: Topology,
    layers: Vec<NeuronLayer>,
}

impl NeuralNetwork {
    /// Build a network with every weight and bias set to zero.
    ///
    /// A zeroed network outputs exactly `0.5` on every channel regardless
    /// of input.
    pub fn build(topology: Topology) -> Self {
        let layers = topology
            .layer_shapes()
            .into_iter()
            .map(|(width, fan_in)| NeuronLayer::zeroed(width, fan_in))
            .collect();
        Self { topology, layers }
    }

    /// The shape this network was built with.
    pub const fn topology(&self) -> Topology {
        self.topology
    }

    /// Computing layers, hidden layers first, output layer last.
    pub fn layers(&self) -> &[NeuronLayer] {
        &self.layers
    }

    /// Computing neurons in export order.
    pub fn neurons(&self) -> impl Iterator<Item = &Neuron> {
        self.layers.iter().flat_map(|layer| layer.neurons.iter())
    }

    fn neurons_mut(&mut self) -> impl Iterator<Item = &mut Neuron> {
        self.layers
            .iter_mut()
            .flat_map(|layer| layer.neurons.iter_mut())
    }

    /// Total number of weights across all computing neurons.
    pub fn weight_count(&self) -> usize {
        self.neurons().map(|n| n.weights.len()).sum()
    }

    /// Draw every weight and bias independently and uniformly from
    /// `[-1, 1]`.
    pub fn randomize_weights(&mut self, rng: &mut impl Rng) {
        for neuron in self.neurons_mut() {
            neuron.randomize(rng);
        }
    }

    /// Snapshot of every neuron's weight vector in export order.
    pub fn weights(&self) -> Vec<Vec<f64>> {
        self.neurons().map(|n| n.weights.clone()).collect()
    }

    /// Copy a parent's weights into this network with per-weight mutation.
    ///
    /// Each weight independently becomes a fresh uniform draw from
    /// `[-1, 1]` with probability `mutation_rate`, otherwise the parent's
    /// value. Biases are left as they are. Nothing is written unless the
    /// parent's shape matches exactly and the rate is a probability.
    pub fn inherit_weights(
        &mut self,
        parent: &[Vec<f64>],
        mutation_rate: f64,
        rng: &mut impl Rng,
    ) -> Result<(), BrainError> {
        if !(0.0..=1.0).contains(&mutation_rate) {
            return Err(BrainError::InvalidMutationRate(mutation_rate));
        }
        self.check_shape(parent)?;

        for (neuron, source) in self.neurons_mut().zip(parent) {
            for (weight, &inherited) in neuron.weights.iter_mut().zip(source) {
                *weight = if rng.random::<f64>() < mutation_rate {
                    rng.random_range(-1.0..=1.0)
                } else {
                    inherited
                };
            }
        }
        Ok(())
    }

    fn check_shape(&self, parent: &[Vec<f64>]) -> Result<(), BrainError> {
        let mut supplied = parent.iter();
        let mut index = 0_usize;
        for neuron in self.neurons() {
            let expected = neuron.weights.len();
            match supplied.next() {
                Some(weights) if weights.len() == expected => {}
                other => {
                    return Err(BrainError::TopologyMismatch {
                        neuron: index,
                        expected,
                        actual: other.map_or(0, Vec::len),
                    });
                }
            }
            index = index.saturating_add(1);
        }
        if let Some(extra) = supplied.next() {
            return Err(BrainError::TopologyMismatch {
                neuron: index,
                expected: 0,
                actual: extra.len(),
            });
        }
        Ok(())
    }

    /// Forward pass.
    ///
    /// The input length is checked before any weight is read. On success
    /// the result has exactly `topology().outputs` entries, each in
    /// `[0, 1]`.
    pub fn infer(&self, inputs: &[f64]) -> Result<Vec<f64>, BrainError> {
        if inputs.len() != self.topology.inputs {
            return Err(BrainError::DimensionMismatch {
                expected: self.topology.inputs,
                actual: inputs.len(),
            });
        }
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        Ok(activations)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn standard() -> Topology {
        Topology::new(13, 8, 2, 10)
    }

    fn randomized(seed: u64) -> NeuralNetwork {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut net = NeuralNetwork::build(standard());
        net.randomize_weights(&mut rng);
        net
    }

    #[test]
    fn build_shapes_layers() {
        let net = NeuralNetwork::build(standard());
        let widths: Vec<usize> = net.layers().iter().map(NeuronLayer::len).collect();
        assert_eq!(widths, vec![10, 10, 8]);

        let fan_ins: Vec<usize> = net
            .layers()
            .iter()
            .map(|l| l.neurons()[0].weights().len())
            .collect();
        assert_eq!(fan_ins, vec![13, 10, 10]);
        assert_eq!(net.weight_count(), 10 * 13 + 10 * 10 + 8 * 10);
    }

    #[test]
    fn no_hidden_layers_connects_inputs_to_outputs() {
        let net = NeuralNetwork::build(Topology::new(3, 2, 0, 0));
        assert_eq!(net.layers().len(), 1);
        assert_eq!(net.layers()[0].len(), 2);
        assert_eq!(net.layers()[0].neurons()[0].weights().len(), 3);
        assert_eq!(net.infer(&[1.0, 2.0, 3.0]).unwrap().len(), 2);
    }

    #[test]
    fn zeroed_network_outputs_half() {
        let net = NeuralNetwork::build(standard());
        let out = net.infer(&[0.7; 13]).unwrap();
        assert_eq!(out.len(), 8);
        for v in out {
            assert!((v - 0.5).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn randomize_stays_in_unit_range() {
        let net = randomized(1);
        let mut nonzero = 0;
        for neuron in net.neurons() {
            assert!((-1.0..=1.0).contains(&neuron.bias()));
            for &w in neuron.weights() {
                assert!((-1.0..=1.0).contains(&w));
                if w.abs() > 0.0 {
                    nonzero += 1;
                }
            }
        }
        assert!(nonzero > 0);
    }

    #[test]
    fn infer_output_shape_and_range() {
        let net = randomized(2);
        let inputs: Vec<f64> = (0..13_u8).map(|i| f64::from(i) / 13.0).collect();
        let out = net.infer(&inputs).unwrap();
        assert_eq!(out.len(), 8);
        for v in out {
            assert!(v > 0.0 && v < 1.0, "output {v} outside (0, 1)");
        }
    }

    #[test]
    fn infer_rejects_wrong_length() {
        let net = randomized(3);
        let err = net.infer(&[0.0; 12]).unwrap_err();
        assert_eq!(
            err,
            BrainError::DimensionMismatch {
                expected: 13,
                actual: 12
            }
        );
        assert!(net.infer(&[]).is_err());
        assert!(net.infer(&[0.0; 14]).is_err());
    }

    #[test]
    fn infer_is_deterministic() {
        let net = randomized(4);
        let inputs = [0.3; 13];
        assert_eq!(net.infer(&inputs).unwrap(), net.infer(&inputs).unwrap());
    }

    #[test]
    fn weights_export_in_layer_order() {
        let net = randomized(5);
        let exported = net.weights();
        assert_eq!(exported.len(), 28);
        assert_eq!(exported[0], net.layers()[0].neurons()[0].weights());
        assert_eq!(exported[27], net.layers()[2].neurons()[7].weights());
    }

    #[test]
    fn inherit_without_mutation_copies_weights_only() {
        let parent = randomized(6);
        let mut child = randomized(7);
        let child_biases: Vec<f64> = child.neurons().map(Neuron::bias).collect();

        let mut rng = SmallRng::seed_from_u64(8);
        child.inherit_weights(&parent.weights(), 0.0, &mut rng).unwrap();

        assert_eq!(child.weights(), parent.weights());
        let after: Vec<f64> = child.neurons().map(Neuron::bias).collect();
        assert_eq!(after, child_biases);
    }

    #[test]
    fn inherit_with_full_mutation_redraws_every_weight() {
        let mut child = NeuralNetwork::build(standard());
        let parent: Vec<Vec<f64>> = child
            .weights()
            .iter()
            .map(|w| vec![5.0; w.len()])
            .collect();

        let mut rng = SmallRng::seed_from_u64(9);
        child.inherit_weights(&parent, 1.0, &mut rng).unwrap();

        for neuron in child.neurons() {
            for &w in neuron.weights() {
                assert!((-1.0..=1.0).contains(&w));
            }
        }
    }

    #[test]
    fn inherit_partial_mutation_changes_some() {
        let mut child = NeuralNetwork::build(standard());
        let parent: Vec<Vec<f64>> = child
            .weights()
            .iter()
            .map(|w| vec![5.0; w.len()])
            .collect();

        let mut rng = SmallRng::seed_from_u64(10);
        child.inherit_weights(&parent, 0.5, &mut rng).unwrap();

        let flat: Vec<f64> = child.weights().into_iter().flatten().collect();
        let kept = flat.iter().filter(|&&w| (w - 5.0).abs() < f64::EPSILON).count();
        assert!(kept > 0 && kept < flat.len());
    }

    #[test]
    fn inherit_rejects_shape_mismatch_without_writing() {
        let mut child = randomized(11);
        let before = child.weights();
        let mut rng = SmallRng::seed_from_u64(12);

        let mut short = before.clone();
        short.pop();
        let err = child.inherit_weights(&short, 0.0, &mut rng).unwrap_err();
        assert!(matches!(err, BrainError::TopologyMismatch { neuron: 27, .. }));

        let mut long = before.clone();
        long.push(vec![0.0]);
        assert!(child.inherit_weights(&long, 0.0, &mut rng).is_err());

        let mut ragged = before.clone();
        ragged[3].push(0.0);
        let err = child.inherit_weights(&ragged, 0.0, &mut rng).unwrap_err();
        assert_eq!(
            err,
            BrainError::TopologyMismatch {
                neuron: 3,
                expected: 13,
                actual: 14
            }
        );

        assert_eq!(child.weights(), before);
    }

    #[test]
    fn inherit_rejects_bad_rate() {
        let mut child = randomized(13);
        let parent = child.weights();
        let mut rng = SmallRng::seed_from_u64(14);
        for rate in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                child.inherit_weights(&parent, rate, &mut rng),
                Err(BrainError::InvalidMutationRate(_))
            ));
        }
    }

    #[test]
    fn serde_roundtrip_preserves_behaviour() {
        let net = randomized(15);
        let json = serde_json::to_string(&net).unwrap();
        let back: NeuralNetwork = serde_json::from_str(&json).unwrap();
        let inputs = [0.25; 13];
        let a = net.infer(&inputs).unwrap();
        let b = back.infer(&inputs).unwrap();
        for (x, y) in a.iter().zip(&b) {
            assert!((x - y).abs() < 1e-12);
        }
    }
}
