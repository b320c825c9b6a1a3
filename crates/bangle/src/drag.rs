use crate::ring::{Charm, Ring};
use trinket::geom::{self, Point};

/// A charm mid-flight between the palette (or its old spot on the ring)
/// and wherever the pointer releases it. While the gesture is live the
/// charm belongs to no collision set and tracks the cursor in pixel
/// space, independent of its ring angle.
#[derive(Debug, Clone)]
pub struct DragGesture {
    charm: Charm,
}

impl DragGesture {
    pub(crate) fn new(mut charm: Charm, position: Point) -> Self {
        charm.set_drag_position(Some(position));
        Self { charm }
    }

    pub fn charm(&self) -> &Charm {
        &self.charm
    }

    pub fn update(&mut self, position: Point) {
        self.charm.set_drag_position(Some(position));
    }

    /// Angle the charm would land at if released at `point`, or `None`
    /// when the release falls in the dead zone and the drop is discarded.
    pub fn drop_angle(&self, ring: &Ring, point: Point) -> Option<f64> {
        if ring.in_dead_zone(point) {
            return None;
        }
        Some(geom::angle_at(ring.center, point))
    }

    /// Hands the charm back for placement, with the pixel override gone.
    pub(crate) fn into_charm(mut self) -> Charm {
        self.charm.set_drag_position(None);
        self.charm
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ring::charm::CharmId;
    use trinket::asset::{AssetSource, ImageSize};

    fn gesture() -> DragGesture {
        let charm = Charm::new(
            CharmId(0),
            AssetSource::new("decorations/round.png"),
            ImageSize::new(40, 40),
            0.0,
        );
        DragGesture::new(charm, Point::new(10.0, 20.0))
    }

    #[test]
    fn the_charm_tracks_the_pointer_while_dragged() {
        let ring = Ring::new(Point::new(250.0, 250.0), 100.0);
        let mut gesture = gesture();

        assert_eq!(gesture.charm().center_position(&ring), Point::new(10.0, 20.0));
        gesture.update(Point::new(99.0, 45.0));
        assert_eq!(gesture.charm().center_position(&ring), Point::new(99.0, 45.0));

        let charm = gesture.into_charm();
        assert_eq!(charm.drag_position(), None);
    }

    #[test]
    fn drops_inside_the_dead_zone_are_discarded() {
        let ring = Ring::new(Point::new(250.0, 250.0), 100.0);
        let gesture = gesture();

        assert_eq!(gesture.drop_angle(&ring, Point::new(255.0, 250.0)), None);

        let angle = gesture.drop_angle(&ring, Point::new(350.0, 250.0));
        assert!(angle.is_some_and(|a| a.abs() < 1e-9));
    }
}
