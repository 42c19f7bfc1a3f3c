//! # Drive-Evo - Neuro-evolution of Self-Driving Vehicles
//!
//! A population of vehicles drives along a straight multi-lane road among slower
//! traffic. Each vehicle perceives the road through a fan of sensor rays and is
//! steered by a small feed-forward network with hard-threshold neurons. The
//! vehicle that travels furthest seeds the next generation through mutation.
//!
//! ## Features
//!
//! - Kinematic vehicle model with acceleration, friction and speed-dependent steering
//! - Ray-casting sensors against road borders and traffic polygons
//! - Polygon collision detection with sticky damage
//! - Step-activation perceptron networks with interpolation-based mutation
//! - Lane-change overtaking state machine layered over the network
//! - Persistence of the best network as JSON
//!
//! ## Core Modules
//!
//! - [`simulation::vehicle`] - Vehicle kinematics and driving behavior
//! - [`simulation::brain`] - Neural network implementation
//! - [`simulation::sensor`] - Ray-casting perception
//! - [`simulation::population`] - Tick loop and generation advance
//! - [`simulation::persistence`] - Storage of the fittest network

/// Core simulation logic and data structures.
pub mod simulation {
    /// Feed-forward network used to drive vehicles.
    pub mod brain;
    /// Error type shared by all construction-time checks.
    pub mod error;
    /// Segment and polygon intersection primitives.
    pub mod geometric_utils;
    /// Simulation parameters.
    pub mod params;
    /// Storage of the best network between generations.
    pub mod persistence;
    /// Population of vehicles, tick loop and generation advance.
    pub mod population;
    /// Straight multi-lane road geometry.
    pub mod road;
    /// Ray-casting sensor attached to networked vehicles.
    pub mod sensor;
    /// Per-generation statistics.
    pub mod stats;
    /// Vehicle kinematics, controls and the overtaking state machine.
    pub mod vehicle;
}
