//! Population of networked vehicles and the traffic they drive through.
//!
//! The population owns the road, the traffic and the networked vehicles. It
//! handles:
//! - Advancing every vehicle by one tick
//! - Tracking the vehicle that has travelled furthest
//! - Replacing the whole population with mutated copies of the best network

use geo::Coord;
use rayon::prelude::*;
use tracing::{info, warn};

use super::brain::Brain;
use super::error::{Result, SimError};
use super::geometric_utils::Point;
use super::params::Params;
use super::persistence::BrainStore;
use super::road::Road;
use super::stats::{GenerationHistory, GenerationRecord};
use super::vehicle::{Behavior, Vehicle};

/// The complete simulation state.
#[derive(Debug, Clone)]
pub struct Population {
    params: Params,
    road: Road,
    vehicles: Vec<Vehicle>,
    traffic: Vec<Vehicle>,
    manual: Option<Vehicle>,
    best: usize,
    generation: u32,
    ticks: u64,
    history: GenerationHistory,
}

impl Population {
    /// Creates generation 1 with fully random networks.
    pub fn new(params: Params) -> Result<Self> {
        Self::seeded(params, None)
    }

    /// Creates generation 1 seeded from the store's network, if it holds one.
    pub fn resume(params: Params, store: &dyn BrainStore) -> Result<Self> {
        let seed = store.load()?;
        Self::seeded(params, seed.as_ref())
    }

    /// Creates generation 1 from an optional seed network.
    ///
    /// With a seed, vehicle 0 drives an exact copy and every other vehicle a
    /// copy mutated by `params.mutation_amount`. Without one, every network is random.
    pub fn seeded(params: Params, seed: Option<&Brain>) -> Result<Self> {
        params.validate()?;
        let road = Road::new(
            params.road.center_x,
            params.road.width,
            params.road.lane_count,
        )?;

        let vehicles = build_vehicles(&params, &road, seed)?;
        let traffic = build_traffic(&params, &road);
        let manual = build_manual(&params, &road);

        info!(
            population = vehicles.len(),
            traffic = traffic.len(),
            seeded = seed.is_some(),
            "population created"
        );

        Ok(Self {
            params,
            road,
            vehicles,
            traffic,
            manual,
            best: 0,
            generation: 1,
            ticks: 0,
            history: GenerationHistory::default(),
        })
    }

    /// Advances the simulation by one tick.
    ///
    /// Traffic moves first with no awareness of other vehicles. Networked and
    /// manual vehicles then move against the road and the updated traffic.
    /// Networked vehicles never see or hit each other.
    pub fn tick(&mut self) {
        for vehicle in &mut self.traffic {
            vehicle.update(&self.road, &[]);
        }

        let road = &self.road;
        let obstacles: Vec<&[Point]> = self.traffic.iter().map(Vehicle::polygon).collect();

        if self.params.parallel {
            self.vehicles
                .par_iter_mut()
                .for_each(|vehicle| vehicle.update(road, &obstacles));
        } else {
            for vehicle in &mut self.vehicles {
                vehicle.update(road, &obstacles);
            }
        }

        if let Some(manual) = &mut self.manual {
            manual.update(road, &obstacles);
        }

        self.best = fittest_index(&self.vehicles);
        self.ticks += 1;
    }

    /// Ends the current generation and starts the next one.
    ///
    /// The fittest network is saved to `store`, then every networked vehicle
    /// is rebuilt from what the store returns: vehicle 0 drives an exact copy,
    /// the rest drive mutated copies. An empty store yields random networks.
    /// Traffic and the manual vehicle are also reset to their starting
    /// positions, rather than left where they were, so every generation
    /// faces the same traffic.
    pub fn advance_generation(&mut self, store: &mut dyn BrainStore) -> Result<()> {
        let record = self.summarize();

        if let Some(brain) = self.best().brain() {
            store.save(brain)?;
        }
        let seed = store.load()?;
        if seed.is_none() {
            warn!("store returned no network, next generation starts random");
        }

        let vehicles = build_vehicles(&self.params, &self.road, seed.as_ref())?;

        info!(
            generation = record.generation,
            ticks = record.ticks,
            best_distance = record.best_distance,
            best_fitness = record.best_fitness,
            damaged = record.damaged,
            "generation finished"
        );

        self.history.record(record);
        self.vehicles = vehicles;
        self.traffic = build_traffic(&self.params, &self.road);
        self.manual = build_manual(&self.params, &self.road);
        self.best = 0;
        self.generation += 1;
        self.ticks = 0;
        Ok(())
    }

    /// Empties the store so the next generation starts from scratch.
    pub fn discard_best(&self, store: &mut dyn BrainStore) -> Result<()> {
        store.discard()
    }

    /// Simulation parameters.
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// The road.
    pub fn road(&self) -> &Road {
        &self.road
    }

    /// Networked vehicles of the current generation.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Traffic vehicles.
    pub fn traffic(&self) -> &[Vehicle] {
        &self.traffic
    }

    /// The manually driven vehicle, if enabled.
    pub fn manual(&self) -> Option<&Vehicle> {
        self.manual.as_ref()
    }

    /// Mutable access to the manual vehicle, for setting its controls.
    pub fn manual_mut(&mut self) -> Option<&mut Vehicle> {
        self.manual.as_mut()
    }

    /// Index of the networked vehicle furthest up the road.
    pub fn best_index(&self) -> usize {
        self.best
    }

    /// The networked vehicle furthest up the road.
    pub fn best(&self) -> &Vehicle {
        &self.vehicles[self.best]
    }

    /// Distance the best vehicle has travelled from the start line.
    pub fn best_distance(&self) -> f32 {
        self.params.start_y - self.best().pos().y
    }

    /// Current generation number, starting at 1.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Ticks simulated in the current generation.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Finished generations.
    pub fn history(&self) -> &GenerationHistory {
        &self.history
    }

    /// Number of damaged networked vehicles.
    pub fn damaged_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_damaged()).count()
    }

    /// Number of networked vehicles currently changing lanes.
    pub fn overtaking_count(&self) -> usize {
        self.vehicles.iter().filter(|v| v.is_overtaking()).count()
    }

    fn summarize(&self) -> GenerationRecord {
        GenerationRecord {
            generation: self.generation,
            ticks: self.ticks,
            best_distance: self.best_distance(),
            best_fitness: self.best().fitness(),
            damaged: self.damaged_count(),
            overtaking: self.overtaking_count(),
            population: self.vehicles.len(),
        }
    }
}

/// Index of the vehicle with the smallest y, first one on ties.
pub fn fittest_index(vehicles: &[Vehicle]) -> usize {
    vehicles
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.pos().y.total_cmp(&b.pos().y))
        .map_or(0, |(i, _)| i)
}

fn start_position(params: &Params, road: &Road) -> Point {
    Coord {
        x: road.lane_center(params.start_lane),
        y: params.start_y,
    }
}

fn build_vehicles(params: &Params, road: &Road, seed: Option<&Brain>) -> Result<Vec<Vehicle>> {
    let expected = params.layer_sizes();
    if let Some(seed) = seed {
        let found = seed.shape();
        if found != expected {
            return Err(SimError::ShapeMismatch { expected, found });
        }
    }

    let pos = start_position(params, road);
    (0..params.population_size)
        .map(|i| {
            let brain = match seed {
                Some(seed) => {
                    let mut brain = seed.clone();
                    if i > 0 {
                        brain.mutate(params.mutation_amount);
                    }
                    brain
                }
                None => Brain::new(&expected)?,
            };
            Vehicle::networked(
                pos,
                &params.vehicle,
                &params.sensor,
                params.overtake,
                brain,
            )
        })
        .collect()
}

fn build_traffic(params: &Params, road: &Road) -> Vec<Vehicle> {
    params
        .traffic
        .iter()
        .map(|t| {
            let pos = Coord {
                x: road.lane_center(t.lane),
                y: t.y,
            };
            Vehicle::new(pos, &params.vehicle, Behavior::FixedForward).with_max_speed(t.max_speed)
        })
        .collect()
}

fn build_manual(params: &Params, road: &Road) -> Option<Vehicle> {
    params.manual_vehicle.then(|| {
        Vehicle::new(
            start_position(params, road),
            &params.vehicle,
            Behavior::Manual,
        )
    })
}
