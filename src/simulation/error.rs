//! Error type for construction-time invariant violations and storage failures.
//!
//! Per-tick simulation is infallible; everything that can go wrong is caught
//! when networks, sensors, vehicles or populations are built or loaded.

use thiserror::Error;

/// Errors raised while building or loading simulation state.
#[derive(Debug, Error)]
pub enum SimError {
    /// A network needs at least an input and an output size.
    #[error("network needs at least two layer sizes, got {0}")]
    TooFewLayers(usize),
    /// Every layer must have at least one neuron.
    #[error("layer sizes must be non-zero, got {0:?}")]
    EmptyLayer(Vec<usize>),
    /// A layer's input count does not match the previous layer's output count.
    #[error("layer {index} expects {expected} inputs but the previous layer produces {found}")]
    LayerMismatch {
        /// Index of the offending layer.
        index: usize,
        /// Inputs the layer expects.
        expected: usize,
        /// Outputs produced by the previous layer.
        found: usize,
    },
    /// A layer's bias vector length differs from its weight matrix output count.
    #[error("layer {index} has {weights} weight columns but {biases} biases")]
    BiasMismatch {
        /// Index of the offending layer.
        index: usize,
        /// Output count of the weight matrix.
        weights: usize,
        /// Length of the bias vector.
        biases: usize,
    },
    /// The sensor ray count does not match the network input count.
    #[error("sensor casts {rays} rays but the network expects {inputs} inputs")]
    SensorMismatch {
        /// Number of sensor rays.
        rays: usize,
        /// Network input count.
        inputs: usize,
    },
    /// The network does not produce one output per control.
    #[error("network must produce {expected} control outputs, got {found}")]
    ControlMismatch {
        /// Required output count.
        expected: usize,
        /// Actual output count.
        found: usize,
    },
    /// A stored network was built for a different configuration.
    #[error("stored network shape {found:?} does not match configured shape {expected:?}")]
    ShapeMismatch {
        /// Shape derived from the current parameters.
        expected: Vec<usize>,
        /// Shape of the loaded network.
        found: Vec<usize>,
    },
    /// Parameters failed validation.
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    /// Filesystem failure while reading or writing state.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// Malformed JSON.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the simulation.
pub type Result<T> = std::result::Result<T, SimError>;
