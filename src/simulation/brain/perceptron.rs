//! Single fully-connected layer with a step activation.

use ndarray::{Array1, Array2, Zip};
use ndarray_rand::RandomExt;
use ndarray_rand::rand_distr::Uniform;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::simulation::geometric_utils::lerp;

/// A single fully-connected layer of the network.
///
/// Neuron `o` fires (outputs 1) when `Σ inputs[i] * weights[[i, o]]` exceeds
/// `biases[o]`, otherwise it outputs 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Perceptron {
    /// Weight matrix (`input_count` × `output_count`).
    pub weights: Array2<f32>,
    /// Firing thresholds (`output_count`).
    pub biases: Array1<f32>,
}

impl Perceptron {
    /// Creates a new layer with weights and biases uniform in [-1, 1].
    pub fn new_random(input_count: usize, output_count: usize) -> Self {
        let mut layer = Self {
            weights: Array2::zeros((input_count, output_count)),
            biases: Array1::zeros(output_count),
        };
        layer.randomize();
        layer
    }

    /// Number of inputs the layer consumes.
    pub fn input_count(&self) -> usize {
        self.weights.nrows()
    }

    /// Number of neurons in the layer.
    pub fn output_count(&self) -> usize {
        self.weights.ncols()
    }

    /// Overwrites every weight and bias with a fresh draw from [-1, 1].
    pub fn randomize(&mut self) {
        self.weights = Array2::random(
            self.weights.dim(),
            Uniform::new_inclusive(-1.0_f32, 1.0),
        );
        self.biases = Array1::random(self.biases.len(), Uniform::new_inclusive(-1.0_f32, 1.0));
    }

    /// Performs a forward pass with a hard threshold.
    ///
    /// `inputs` must hold exactly [`Self::input_count`] values.
    #[inline]
    pub fn forward(&self, inputs: &Array1<f32>) -> Array1<f32> {
        debug_assert_eq!(inputs.len(), self.input_count());
        let sums = inputs.dot(&self.weights);
        Zip::from(&sums)
            .and(&self.biases)
            .map_collect(|&sum, &bias| if sum > bias { 1.0 } else { 0.0 })
    }

    /// Moves every weight and bias towards a fresh random value in [-1, 1].
    ///
    /// `amount = 0` leaves the layer unchanged, `amount = 1` re-randomizes it.
    pub fn mutate(&mut self, amount: f32) {
        let mut rng = rand::rng();
        self.weights
            .mapv_inplace(|w| lerp(w, rng.random_range(-1.0..=1.0), amount));
        self.biases
            .mapv_inplace(|b| lerp(b, rng.random_range(-1.0..=1.0), amount));
    }
}
