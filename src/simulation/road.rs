//! Straight multi-lane road.

use geo::Coord;

use super::error::{Result, SimError};
use super::geometric_utils::Segment;

/// A straight road running along the y axis with parallel lanes.
///
/// The two borders are vertical segments long enough to act as infinite
/// walls for sensors and collision checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Road {
    center_x: f32,
    width: f32,
    lane_count: usize,
    left: f32,
    right: f32,
    borders: [Segment; 2],
}

impl Road {
    /// Half-length of the border segments.
    pub const EXTENT: f32 = 1_000_000.0;

    /// Creates a road centred on `center_x`.
    pub fn new(center_x: f32, width: f32, lane_count: usize) -> Result<Self> {
        if lane_count == 0 {
            return Err(SimError::InvalidParams(
                "road needs at least one lane".to_string(),
            ));
        }
        if width.is_nan() || width <= 0.0 {
            return Err(SimError::InvalidParams(format!(
                "road width must be positive, got {width}"
            )));
        }

        let left = center_x - width / 2.0;
        let right = center_x + width / 2.0;
        let top = -Self::EXTENT;
        let bottom = Self::EXTENT;

        let borders = [
            Segment::new(Coord { x: left, y: top }, Coord { x: left, y: bottom }),
            Segment::new(Coord { x: right, y: top }, Coord { x: right, y: bottom }),
        ];

        Ok(Self {
            center_x,
            width,
            lane_count,
            left,
            right,
            borders,
        })
    }

    /// X coordinate of the road centre line.
    pub fn center_x(&self) -> f32 {
        self.center_x
    }

    /// Total road width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Number of lanes.
    pub fn lane_count(&self) -> usize {
        self.lane_count
    }

    /// X coordinate of the left border.
    pub fn left(&self) -> f32 {
        self.left
    }

    /// X coordinate of the right border.
    pub fn right(&self) -> f32 {
        self.right
    }

    /// Width of a single lane.
    pub fn lane_width(&self) -> f32 {
        self.width / self.lane_count as f32
    }

    /// The left and right border segments.
    pub fn borders(&self) -> &[Segment] {
        &self.borders
    }

    /// X coordinate of the centre of lane `index`.
    ///
    /// Indices past the last lane resolve to the last lane.
    pub fn lane_center(&self, index: usize) -> f32 {
        let lane_width = self.lane_width();
        self.left + lane_width / 2.0 + index.min(self.lane_count - 1) as f32 * lane_width
    }

    /// Index of the lane containing `x`, clamped to the road.
    pub fn lane_index(&self, x: f32) -> usize {
        let lane = ((x - self.left) / self.lane_width()).floor();
        if lane <= 0.0 {
            0
        } else {
            (lane as usize).min(self.lane_count - 1)
        }
    }
}
