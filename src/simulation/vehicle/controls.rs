//! Driving controls and the behavior that sets them.

use ndarray::Array1;

use super::autopilot::Autopilot;

/// The four boolean driving inputs resolved before each move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Controls {
    /// Accelerate forward.
    pub forward: bool,
    /// Turn left.
    pub left: bool,
    /// Turn right.
    pub right: bool,
    /// Accelerate backwards.
    pub reverse: bool,
}

impl Controls {
    /// Controls with only `forward` held.
    pub fn forward_only() -> Self {
        Self {
            forward: true,
            ..Self::default()
        }
    }

    /// Reads network outputs in the order forward, left, right, reverse.
    ///
    /// An output fires when it exceeds 0.5.
    pub fn from_outputs(outputs: &Array1<f32>) -> Self {
        let fired = |i: usize| outputs.get(i).is_some_and(|&v| v > 0.5);
        Self {
            forward: fired(0),
            left: fired(1),
            right: fired(2),
            reverse: fired(3),
        }
    }
}

/// Who decides a vehicle's controls.
#[derive(Debug, Clone)]
pub enum Behavior {
    /// Sensor + network + overtaking logic.
    Autopilot(Box<Autopilot>),
    /// Always holds forward; used for traffic.
    FixedForward,
    /// Controls are set from outside before each tick.
    Manual,
    /// No controls at all.
    Parked,
}

impl Behavior {
    /// Controls a freshly created vehicle starts with.
    pub fn initial_controls(&self) -> Controls {
        match self {
            Behavior::FixedForward => Controls::forward_only(),
            _ => Controls::default(),
        }
    }
}
