use serde::{Deserialize, Serialize};

/// Summary of one finished generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    /// Generation number, starting at 1.
    pub generation: u32,
    /// Ticks simulated before the generation ended.
    pub ticks: u64,
    /// Distance travelled by the furthest vehicle.
    pub best_distance: f32,
    /// Accumulated fitness of the furthest vehicle.
    pub best_fitness: f32,
    /// Vehicles damaged by the end of the generation.
    pub damaged: usize,
    /// Vehicles that were mid lane change at the end of the generation.
    pub overtaking: usize,
    /// Number of networked vehicles.
    pub population: usize,
}

/// History of finished generations, oldest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationHistory {
    records: Vec<GenerationRecord>,
}

impl GenerationHistory {
    /// Appends a finished generation.
    pub fn record(&mut self, record: GenerationRecord) {
        self.records.push(record);
    }

    /// All finished generations.
    pub fn records(&self) -> &[GenerationRecord] {
        &self.records
    }

    /// The most recently finished generation.
    pub fn last(&self) -> Option<&GenerationRecord> {
        self.records.last()
    }

    /// Longest distance reached by any finished generation.
    pub fn best_distance(&self) -> Option<f32> {
        self.records
            .iter()
            .map(|r| r.best_distance)
            .max_by(f32::total_cmp)
    }

    /// `(generation, best distance)` pairs for plotting.
    pub fn distance_points(&self) -> Vec<[f64; 2]> {
        self.records
            .iter()
            .map(|r| [r.generation as f64, r.best_distance as f64])
            .collect()
    }
}
