//! Neural network implementation for vehicle brains.
//!
//! A brain is an ordered stack of fully-connected [`Perceptron`] layers with a
//! step activation. Evolution works purely through mutation: the fittest brain
//! is cloned and each clone is nudged towards random values.

use ndarray::Array1;
use serde::{Deserialize, Serialize};

use super::error::{Result, SimError};

pub mod perceptron;

pub use perceptron::Perceptron;

/// Feed-forward network that maps sensor readings to driving controls.
///
/// `Clone` is a deep copy: the clone owns independent weight storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brain {
    /// Ordered layers from input to output.
    pub layers: Vec<Perceptron>,
}

impl Brain {
    /// Creates a new brain with random weights.
    ///
    /// `layer_sizes` lists the neuron count of every level, input first,
    /// e.g. `[9, 10, 6, 4]`.
    pub fn new(layer_sizes: &[usize]) -> Result<Self> {
        if layer_sizes.len() < 2 {
            return Err(SimError::TooFewLayers(layer_sizes.len()));
        }
        if layer_sizes.contains(&0) {
            return Err(SimError::EmptyLayer(layer_sizes.to_vec()));
        }

        let layers = layer_sizes
            .windows(2)
            .map(|pair| Perceptron::new_random(pair[0], pair[1]))
            .collect();

        Ok(Self { layers })
    }

    /// Builds a brain from existing layers, checking that they chain.
    pub fn from_layers(layers: Vec<Perceptron>) -> Result<Self> {
        let brain = Self { layers };
        brain.validate()?;
        Ok(brain)
    }

    /// Checks the structural invariants of the layer stack.
    ///
    /// Used after deserialization, where the layers come from outside.
    pub fn validate(&self) -> Result<()> {
        if self.layers.is_empty() {
            return Err(SimError::TooFewLayers(0));
        }

        for (index, layer) in self.layers.iter().enumerate() {
            if layer.input_count() == 0 || layer.output_count() == 0 {
                return Err(SimError::EmptyLayer(self.shape()));
            }
            if layer.biases.len() != layer.output_count() {
                return Err(SimError::BiasMismatch {
                    index,
                    weights: layer.output_count(),
                    biases: layer.biases.len(),
                });
            }
            if index > 0 {
                let found = self.layers[index - 1].output_count();
                if layer.input_count() != found {
                    return Err(SimError::LayerMismatch {
                        index,
                        expected: layer.input_count(),
                        found,
                    });
                }
            }
        }

        Ok(())
    }

    /// Neuron counts of every level, input first.
    pub fn shape(&self) -> Vec<usize> {
        let mut shape = Vec::with_capacity(self.layers.len() + 1);
        if let Some(first) = self.layers.first() {
            shape.push(first.input_count());
        }
        shape.extend(self.layers.iter().map(Perceptron::output_count));
        shape
    }

    /// Number of inputs the first layer expects.
    pub fn input_count(&self) -> usize {
        self.layers.first().map_or(0, Perceptron::input_count)
    }

    /// Number of outputs the last layer produces.
    pub fn output_count(&self) -> usize {
        self.layers.last().map_or(0, Perceptron::output_count)
    }

    /// Runs a forward pass through every layer in order.
    #[inline]
    pub fn think(&self, inputs: &Array1<f32>) -> Array1<f32> {
        let mut output = inputs.clone();
        for layer in &self.layers {
            output = layer.forward(&output);
        }
        output
    }

    /// Mutates every layer independently by `amount` in [0, 1].
    pub fn mutate(&mut self, amount: f32) {
        for layer in &mut self.layers {
            layer.mutate(amount);
        }
    }

    /// Re-randomizes every layer.
    pub fn randomize(&mut self) {
        for layer in &mut self.layers {
            layer.randomize();
        }
    }

    /// Total number of weights and biases.
    pub fn parameter_count(&self) -> usize {
        self.layers
            .iter()
            .map(|layer| layer.weights.len() + layer.biases.len())
            .sum()
    }
}
