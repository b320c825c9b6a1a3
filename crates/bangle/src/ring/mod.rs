use std::f64::consts::TAU;
use trinket::geom::Point;

pub mod charm;
pub mod layout;

pub use charm::{Charm, CharmId};
pub use layout::{LayoutError, RingLayout};

/// Increment applied per step while walking a charm toward its target angle.
pub const ANGLE_STEP: f64 = 0.1;
/// Separation slack below which two sectors count as touching, in pixels.
pub const OVERLAP_EPSILON: f64 = 0.5;
/// Longest neighbor-push chain a single move may trigger.
pub const MAX_CASCADE_DEPTH: usize = 32;
/// Fraction of the ring radius around the center where drops are discarded.
pub const DEAD_ZONE_FACTOR: f64 = 0.4;

/// Fixed geometry of the circular track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ring {
    pub center: Point,
    pub radius: f64,
}

impl Ring {
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Track length in pixel units; the capacity bound for charm footprints.
    pub fn circumference(&self) -> f64 {
        TAU * self.radius
    }

    pub fn point_at(&self, angle: f64) -> Point {
        Point::new(
            self.center.x + angle.cos() * self.radius,
            self.center.y + angle.sin() * self.radius,
        )
    }

    /// True for points so close to the center that a release there reads
    /// as "never mind" rather than a placement.
    pub fn in_dead_zone(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius * DEAD_ZONE_FACTOR
    }
}
