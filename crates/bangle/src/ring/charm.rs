use super::{OVERLAP_EPSILON, Ring};
use derive_more::Display;
use std::f64::consts::TAU;
use trinket::asset::{AssetSource, ImageSize};
use trinket::geom::{self, Point};

/// Identity handle for a charm. Charms never compare equal by geometry;
/// identity is the only equality there is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub struct CharmId(pub(crate) u64);

/// A decoration placed on the ring: an image occupying an angular sector
/// derived from its pixel footprint and the ring radius.
#[derive(Debug, Clone)]
pub struct Charm {
    id: CharmId,
    source: AssetSource,
    size: ImageSize,
    angle: f64,
    selected: bool,
    drag_position: Option<Point>,
}

impl Charm {
    pub(crate) fn new(id: CharmId, source: AssetSource, size: ImageSize, angle: f64) -> Self {
        Self {
            id,
            source,
            size,
            angle: geom::normalize(angle),
            selected: false,
            drag_position: None,
        }
    }

    pub fn id(&self) -> CharmId {
        self.id
    }

    pub fn source(&self) -> &AssetSource {
        &self.source
    }

    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Position of the charm's center on the ring, in radians, always in
    /// [0, 2π).
    pub fn angle(&self) -> f64 {
        self.angle
    }

    pub(crate) fn set_angle(&mut self, angle: f64) {
        self.angle = geom::normalize(angle);
    }

    pub fn selected(&self) -> bool {
        self.selected
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    /// Pixel-space override set while the charm is being dragged.
    pub fn drag_position(&self) -> Option<Point> {
        self.drag_position
    }

    pub(crate) fn set_drag_position(&mut self, position: Option<Point>) {
        self.drag_position = position;
    }

    /// Radius of the charm's bounding circle, in pixels.
    pub fn radius(&self) -> f64 {
        self.size.bounding_radius()
    }

    /// Half the angular width the charm occupies on the ring.
    pub fn sector_half_angle(&self, ring: &Ring) -> f64 {
        (self.radius() / 2.0).atan2(ring.radius)
    }

    pub fn start_angle(&self, ring: &Ring) -> f64 {
        geom::normalize(self.angle - self.sector_half_angle(ring))
    }

    pub fn end_angle(&self, ring: &Ring) -> f64 {
        geom::normalize(self.angle + self.sector_half_angle(ring))
    }

    /// Angular width of the charm's footprint.
    pub fn sector_angle(&self, ring: &Ring) -> f64 {
        geom::clockwise_distance(self.start_angle(ring), self.end_angle(ring))
    }

    /// Where the charm is drawn: on the ring at its angle, unless a drag
    /// override pins it to the pointer.
    pub fn center_position(&self, ring: &Ring) -> Point {
        self.drag_position.unwrap_or_else(|| ring.point_at(self.angle))
    }

    pub fn contains_point(&self, ring: &Ring, point: Point) -> bool {
        self.center_position(ring).distance(point) < self.radius()
    }

    /// Chord-length approximation of angular overlap: the centers must sit
    /// at least the sum of the two sector chords apart. Separation within
    /// [`OVERLAP_EPSILON`] of that bound counts as touching, not
    /// overlapping.
    pub fn overlaps(&self, other: &Charm, ring: &Ring) -> bool {
        let distance = self
            .center_position(ring)
            .distance(other.center_position(ring));
        let min_separation = ring.radius * (self.sector_angle(ring) / 2.0).sin()
            + ring.radius * (other.sector_angle(ring) / 2.0).sin();

        min_separation - distance > OVERLAP_EPSILON
    }

    /// Rotation handed to the renderer so the image reads radially outward.
    pub fn rotation(&self) -> f64 {
        self.angle - TAU
    }
}
