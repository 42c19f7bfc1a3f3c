//! Geometric utility functions for ray casting and collision detection.

use geo::{Coord, Line};

/// A point in road space. `y` decreases as vehicles move forward.
pub type Point = Coord<f32>;

/// A line segment in road space.
pub type Segment = Line<f32>;

/// An intersection found along a segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Touch {
    /// The intersection point.
    pub point: Point,
    /// Fractional distance from the segment start, in [0, 1].
    pub offset: f32,
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Intersects segment `a`-`b` with segment `c`-`d`.
///
/// # Returns
///
/// The intersection point and its offset along `a`-`b`, or `None` when the
/// segments are parallel, degenerate or do not overlap. Endpoints count as hits.
pub fn segment_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Touch> {
    let t_top = (d.x - c.x) * (a.y - c.y) - (d.y - c.y) * (a.x - c.x);
    let u_top = (c.y - a.y) * (a.x - b.x) - (c.x - a.x) * (a.y - b.y);
    let bottom = (d.y - c.y) * (b.x - a.x) - (d.x - c.x) * (b.y - a.y);

    if bottom == 0.0 {
        return None;
    }

    let t = t_top / bottom;
    let u = u_top / bottom;
    if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
        Some(Touch {
            point: Coord {
                x: lerp(a.x, b.x, t),
                y: lerp(a.y, b.y, t),
            },
            offset: t,
        })
    } else {
        None
    }
}

/// Intersects a segment with another segment.
#[inline]
pub fn line_intersection(ray: &Segment, other: &Segment) -> Option<Touch> {
    segment_intersection(ray.start, ray.end, other.start, other.end)
}

/// Iterates the closed edges of a polygon, wrapping the last vertex to the first.
pub fn edges(polygon: &[Point]) -> impl Iterator<Item = (Point, Point)> + '_ {
    let n = polygon.len();
    (0..n).map(move |i| (polygon[i], polygon[(i + 1) % n]))
}

/// Returns `true` if any edge of `p` intersects any edge of `q`.
///
/// Containment without edge crossings is not reported.
pub fn polygons_intersect(p: &[Point], q: &[Point]) -> bool {
    edges(p).any(|(a, b)| edges(q).any(|(c, d)| segment_intersection(a, b, c, d).is_some()))
}
