use std::f64::consts::{PI, TAU};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Folds an angle into [0, 2π). Idempotent.
pub fn normalize(angle: f64) -> f64 {
    let angle = angle % TAU;
    if angle < 0.0 { angle + TAU } else { angle }
}

/// Arc travelled going clockwise from `from` to `to`, in [0, 2π).
pub fn clockwise_distance(from: f64, to: f64) -> f64 {
    normalize(normalize(to) - normalize(from))
}

/// Arc travelled going counterclockwise from `from` to `to`, in [0, 2π).
pub fn counterclockwise_distance(from: f64, to: f64) -> f64 {
    normalize(normalize(from) - normalize(to))
}

pub fn is_clockwise_shorter(from: f64, to: f64) -> bool {
    clockwise_distance(from, to) < counterclockwise_distance(from, to)
}

/// Ring angle under a surface point, measured from `center`.
///
/// Uses the drawing-surface convention: y grows downward, angle 0 sits on
/// the positive x axis and grows clockwise on screen.
pub fn angle_at(center: Point, point: Point) -> f64 {
    normalize((center.y - point.y).atan2(center.x - point.x) + PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn normalize_lands_in_range() {
        for angle in [-17.3, -TAU, -PI, -0.1, 0.0, 0.1, PI, TAU, 17.3] {
            let n = normalize(angle);
            assert!((0.0..TAU).contains(&n), "normalize({angle}) = {n}");
        }
    }

    #[test]
    fn normalize_is_idempotent() {
        for angle in [-5.0, -0.25, 0.0, 1.5, 9.42] {
            let once = normalize(angle);
            assert!((normalize(once) - once).abs() < EPS);
            assert!((normalize(once + TAU) - once).abs() < EPS);
        }
    }

    #[test]
    fn distances_sum_to_full_turn() {
        let pairs = [(0.0, 1.0), (1.0, 0.0), (0.2, 6.0), (5.9, 0.3), (-1.0, 4.0)];
        for (from, to) in pairs {
            let sum = clockwise_distance(from, to) + counterclockwise_distance(from, to);
            assert!((sum - TAU).abs() < 1e-9, "cw+ccw for ({from},{to}) = {sum}");
        }
    }

    #[test]
    fn distances_are_zero_for_equal_angles() {
        assert_eq!(clockwise_distance(1.25, 1.25), 0.0);
        assert_eq!(counterclockwise_distance(1.25, 1.25), 0.0);
    }

    #[test]
    fn shorter_arc_picks_the_nearer_direction() {
        assert!(is_clockwise_shorter(0.0, 1.0));
        assert!(!is_clockwise_shorter(1.0, 0.0));
        // crossing the wraparound
        assert!(is_clockwise_shorter(6.0, 0.5));
        assert!(!is_clockwise_shorter(0.5, 6.0));
    }

    #[test]
    fn angle_at_inverts_ring_position() {
        let center = Point::new(250.0, 250.0);
        let radius = 100.0;
        for angle in [0.0, 0.7, PI, 4.5] {
            let p = Point::new(
                center.x + angle.cos() * radius,
                center.y + angle.sin() * radius,
            );
            assert!((angle_at(center, p) - angle).abs() < 1e-9);
        }
    }

    #[test]
    fn point_distance_is_euclidean() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert!((a.distance(b) - 5.0).abs() < EPS);
    }
}
