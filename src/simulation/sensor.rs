//! Ray-casting sensor mounted on a vehicle.
//!
//! The sensor holds no reference to its vehicle. The owner passes its current
//! [`Pose`] on every call, so rays always follow the latest position and heading.

use geo::Coord;
use ndarray::Array1;

use super::error::{Result, SimError};
use super::geometric_utils::{
    Point, Segment, Touch, edges, lerp, line_intersection, segment_intersection,
};

/// Position and heading of the vehicle carrying a sensor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    /// Vehicle centre.
    pub pos: Point,
    /// Heading in radians, 0 facing negative y.
    pub angle: f32,
}

/// A fan of rays spread symmetrically around the vehicle heading.
#[derive(Debug, Clone, PartialEq)]
pub struct Sensor {
    ray_count: usize,
    ray_length: f32,
    ray_spread: f32,
    rays: Vec<Segment>,
    readings: Vec<Option<Touch>>,
}

impl Sensor {
    /// Creates a sensor with `ray_count` rays of `ray_length` spread over `ray_spread` radians.
    pub fn new(ray_count: usize, ray_length: f32, ray_spread: f32) -> Result<Self> {
        if ray_count == 0 {
            return Err(SimError::InvalidParams(
                "sensor needs at least one ray".to_string(),
            ));
        }

        Ok(Self {
            ray_count,
            ray_length,
            ray_spread,
            rays: Vec::with_capacity(ray_count),
            readings: vec![None; ray_count],
        })
    }

    /// Number of rays.
    pub fn ray_count(&self) -> usize {
        self.ray_count
    }

    /// Length of each ray.
    pub fn ray_length(&self) -> f32 {
        self.ray_length
    }

    /// Angle between the outermost rays.
    pub fn ray_spread(&self) -> f32 {
        self.ray_spread
    }

    /// Rays cast on the last update, left-most first.
    pub fn rays(&self) -> &[Segment] {
        &self.rays
    }

    /// Nearest hit per ray from the last update.
    pub fn readings(&self) -> &[Option<Touch>] {
        &self.readings
    }

    /// Angle of ray `index` relative to the vehicle heading.
    pub fn ray_angle(&self, index: usize) -> f32 {
        let t = if self.ray_count == 1 {
            0.5
        } else {
            index as f32 / (self.ray_count - 1) as f32
        };
        lerp(self.ray_spread / 2.0, -self.ray_spread / 2.0, t)
    }

    /// Recomputes the ray segments from `pose`.
    pub fn cast_rays(&mut self, pose: Pose) {
        self.rays.clear();
        for i in 0..self.ray_count {
            let angle = self.ray_angle(i) + pose.angle;
            let end = Coord {
                x: pose.pos.x - angle.sin() * self.ray_length,
                y: pose.pos.y - angle.cos() * self.ray_length,
            };
            self.rays.push(Segment::new(pose.pos, end));
        }
    }

    /// Recasts rays and records the nearest hit for each.
    ///
    /// # Arguments
    ///
    /// * `pose` - Current pose of the owning vehicle
    /// * `borders` - Road border segments
    /// * `obstacles` - Polygons of other vehicles (never the owner's own)
    pub fn update(&mut self, pose: Pose, borders: &[Segment], obstacles: &[&[Point]]) {
        self.cast_rays(pose);
        self.readings = self
            .rays
            .iter()
            .map(|ray| nearest_touch(ray, borders, obstacles))
            .collect();
    }

    /// Network inputs for the current readings: `1 - offset`, 0 when nothing was hit.
    pub fn inputs(&self) -> Array1<f32> {
        self.readings
            .iter()
            .map(|reading| reading.map_or(0.0, |touch| 1.0 - touch.offset))
            .collect()
    }
}

fn nearest_touch(ray: &Segment, borders: &[Segment], obstacles: &[&[Point]]) -> Option<Touch> {
    let border_touches = borders
        .iter()
        .filter_map(|border| line_intersection(ray, border));

    let obstacle_touches = obstacles.iter().flat_map(move |polygon| {
        edges(*polygon).filter_map(move |(c, d)| segment_intersection(ray.start, ray.end, c, d))
    });

    border_touches
        .chain(obstacle_touches)
        .min_by(|a, b| a.offset.total_cmp(&b.offset))
}
