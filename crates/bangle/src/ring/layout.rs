use super::charm::{Charm, CharmId};
use super::{ANGLE_STEP, MAX_CASCADE_DEPTH, Ring};
use std::f64::consts::TAU;
use strum::Display;
use thiserror::Error;
use trinket::asset::{AssetSource, ImageSize};
use trinket::geom::{self, Point};

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("ring is full: {needed:.0}px of charm footprint against {available:.0}px of track")]
    CapacityExceeded { needed: f64, available: f64 },
    #[error("collision cascade did not settle within the push limit")]
    Unstable,
    #[error("no charm with id {0}")]
    UnknownCharm(CharmId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
enum ArcDirection {
    Clockwise,
    Counterclockwise,
}

/// The ordered set of placed charms and the collision engine that keeps
/// their angular sectors disjoint.
///
/// Charms are stored in insertion order; angular order is derived by
/// nearest-angle search on every neighbor query, never cached. Resting
/// charms never overlap once an operation returns; overlap is transient
/// only while an incremental move is in flight, and a call into
/// [`RingLayout::move_to`] can recursively re-enter itself, so no charm's
/// angle is stable until the outermost call returns.
#[derive(Debug)]
pub struct RingLayout {
    ring: Ring,
    charms: Vec<Charm>,
    selected: Option<CharmId>,
    next_id: u64,
}

impl RingLayout {
    pub fn new(ring: Ring) -> Self {
        Self {
            ring,
            charms: Vec::new(),
            selected: None,
            next_id: 0,
        }
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn len(&self) -> usize {
        self.charms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.charms.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Charm> {
        self.charms.iter()
    }

    pub fn charm(&self, id: CharmId) -> Option<&Charm> {
        self.charms.iter().find(|charm| charm.id() == id)
    }

    fn charm_mut(&mut self, id: CharmId) -> Option<&mut Charm> {
        self.charms.iter_mut().find(|charm| charm.id() == id)
    }

    fn index_of(&self, id: CharmId) -> Option<usize> {
        self.charms.iter().position(|charm| charm.id() == id)
    }

    pub(crate) fn allocate_id(&mut self) -> CharmId {
        let id = CharmId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Pixel footprint already committed to the track: the sum of the
    /// charms' bounding-circle diameters.
    fn footprint(&self) -> f64 {
        self.charms.iter().map(|charm| 2.0 * charm.radius()).sum()
    }

    /// Rejects a candidate whose diameter would push the combined
    /// footprint past the track length.
    pub fn check_capacity(&self, size: ImageSize) -> Result<(), LayoutError> {
        let needed = self.footprint() + 2.0 * size.bounding_radius();
        let available = self.ring.circumference();
        if needed > available {
            return Err(LayoutError::CapacityExceeded { needed, available });
        }
        Ok(())
    }

    /// Appends a new charm at `angle` and settles it against its
    /// neighbors. The ring is left unchanged on a capacity rejection.
    pub fn place(
        &mut self,
        source: AssetSource,
        size: ImageSize,
        angle: f64,
    ) -> Result<CharmId, LayoutError> {
        let id = self.allocate_id();
        self.insert(Charm::new(id, source, size, angle))
    }

    pub(crate) fn insert(&mut self, charm: Charm) -> Result<CharmId, LayoutError> {
        self.check_capacity(charm.size())?;
        let id = charm.id();
        let angle = charm.angle();
        self.charms.push(charm);
        self.move_to(id, angle)?;
        Ok(id)
    }

    /// Removes by identity, returning the charm for re-insertion.
    pub fn remove(&mut self, id: CharmId) -> Option<Charm> {
        let index = self.index_of(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.charms.remove(index))
    }

    /// Topmost charm under a surface point. Later placements draw on top,
    /// so the scan runs newest first.
    pub fn charm_at(&self, point: Point) -> Option<CharmId> {
        self.charms
            .iter()
            .rev()
            .find(|charm| charm.contains_point(&self.ring, point))
            .map(|charm| charm.id())
    }

    pub fn select(&mut self, id: CharmId) -> Result<(), LayoutError> {
        if self.index_of(id).is_none() {
            return Err(LayoutError::UnknownCharm(id));
        }
        for charm in &mut self.charms {
            charm.set_selected(charm.id() == id);
        }
        self.selected = Some(id);
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        for charm in &mut self.charms {
            charm.set_selected(false);
        }
        self.selected = None;
    }

    pub fn selected(&self) -> Option<CharmId> {
        self.selected
    }

    /// Nearest other charm going clockwise, or `None` when the charm is
    /// alone on the ring. Ties fall to the earliest placement.
    pub fn neighbor_clockwise(&self, id: CharmId) -> Option<CharmId> {
        let charm = self.charm(id)?;
        self.charms
            .iter()
            .filter(|other| other.id() != id)
            .min_by(|a, b| {
                geom::clockwise_distance(charm.angle(), a.angle())
                    .total_cmp(&geom::clockwise_distance(charm.angle(), b.angle()))
            })
            .map(|other| other.id())
    }

    /// Nearest other charm going counterclockwise.
    pub fn neighbor_counterclockwise(&self, id: CharmId) -> Option<CharmId> {
        let charm = self.charm(id)?;
        self.charms
            .iter()
            .filter(|other| other.id() != id)
            .min_by(|a, b| {
                geom::clockwise_distance(a.angle(), charm.angle())
                    .total_cmp(&geom::clockwise_distance(b.angle(), charm.angle()))
            })
            .map(|other| other.id())
    }

    pub fn is_overlapping(&self, a: CharmId, b: CharmId) -> bool {
        match (self.charm(a), self.charm(b)) {
            (Some(a), Some(b)) => a.overlaps(b, &self.ring),
            _ => false,
        }
    }

    /// Walks a charm toward `target` in fixed [`ANGLE_STEP`] increments
    /// along the shorter arc, re-resolving neighbor collisions at every
    /// step. Moving in one jump could carry the charm straight past a
    /// neighbor and resolve against the wrong one.
    pub fn move_to(&mut self, id: CharmId, target: f64) -> Result<(), LayoutError> {
        let Some(charm) = self.charm(id) else {
            return Err(LayoutError::UnknownCharm(id));
        };
        let direction = if geom::is_clockwise_shorter(charm.angle(), target) {
            ArcDirection::Clockwise
        } else {
            ArcDirection::Counterclockwise
        };
        log::debug!(
            "moving charm {id} {direction} toward {:.3}",
            geom::normalize(target)
        );
        self.move_inner(id, target, 0)
    }

    fn move_inner(&mut self, id: CharmId, target: f64, depth: usize) -> Result<(), LayoutError> {
        if depth >= MAX_CASCADE_DEPTH {
            log::warn!("aborting cascade: push chain reached depth {depth} at charm {id}");
            return Err(LayoutError::Unstable);
        }
        let target = geom::normalize(target);

        // A full lap is ~63 steps; needing more than two means neighbors
        // keep shoving the charm off its path faster than it travels.
        let mut budget = (2.0 * TAU / ANGLE_STEP) as usize;
        loop {
            if budget == 0 {
                log::warn!("aborting move: charm {id} cannot settle at {target:.3}");
                return Err(LayoutError::Unstable);
            }
            budget -= 1;

            let current = self
                .charm(id)
                .ok_or(LayoutError::UnknownCharm(id))?
                .angle();
            let (direction, remaining) = if geom::is_clockwise_shorter(current, target) {
                (
                    ArcDirection::Clockwise,
                    geom::clockwise_distance(current, target),
                )
            } else {
                (
                    ArcDirection::Counterclockwise,
                    geom::counterclockwise_distance(current, target),
                )
            };

            if remaining <= ANGLE_STEP {
                return self.apply_angle(id, target, direction, depth);
            }
            let step = match direction {
                ArcDirection::Clockwise => current + ANGLE_STEP,
                ArcDirection::Counterclockwise => current - ANGLE_STEP,
            };
            self.apply_angle(id, step, direction, depth)?;
        }
    }

    /// Sets the angle, then runs one round of neighbor resolution. The
    /// side being moved into is cleared first so the trailing neighbor is
    /// never shoved into space the charm just vacated.
    fn apply_angle(
        &mut self,
        id: CharmId,
        angle: f64,
        direction: ArcDirection,
        depth: usize,
    ) -> Result<(), LayoutError> {
        self.charm_mut(id)
            .ok_or(LayoutError::UnknownCharm(id))?
            .set_angle(angle);

        let (Some(prev), Some(next)) = (
            self.neighbor_counterclockwise(id),
            self.neighbor_clockwise(id),
        ) else {
            return Ok(());
        };

        if prev == next {
            // A lone other charm serves as both neighbors. Resolve it once,
            // on the side it actually sits, so it is never pushed through
            // the mover or displaced twice.
            let charm = self.charm(id).ok_or(LayoutError::UnknownCharm(id))?;
            let other = self.charm(next).ok_or(LayoutError::UnknownCharm(next))?;
            let clockwise_of_us = geom::clockwise_distance(charm.angle(), other.angle())
                <= geom::counterclockwise_distance(charm.angle(), other.angle());
            return if clockwise_of_us {
                self.push_clockwise(id, depth)
            } else {
                self.push_counterclockwise(id, depth)
            };
        }

        match direction {
            ArcDirection::Clockwise => {
                self.push_clockwise(id, depth)?;
                self.push_counterclockwise(id, depth)
            }
            ArcDirection::Counterclockwise => {
                self.push_counterclockwise(id, depth)?;
                self.push_clockwise(id, depth)
            }
        }
    }

    /// Rotates the clockwise neighbor just far enough to clear the moving
    /// charm's sector. Neighbors are re-derived here because membership
    /// and ordering can change mid-cascade.
    fn push_clockwise(&mut self, id: CharmId, depth: usize) -> Result<(), LayoutError> {
        let Some(next_id) = self.neighbor_clockwise(id) else {
            return Ok(());
        };
        let (Some(charm), Some(next)) = (self.charm(id), self.charm(next_id)) else {
            return Ok(());
        };
        if !charm.overlaps(next, &self.ring) {
            return Ok(());
        }
        let clearance =
            geom::clockwise_distance(next.start_angle(&self.ring), charm.end_angle(&self.ring));
        log::debug!("charm {id} pushes {next_id} clockwise by {clearance:.3}");
        let target = next.angle() + clearance;
        self.move_inner(next_id, target, depth + 1)
    }

    fn push_counterclockwise(&mut self, id: CharmId, depth: usize) -> Result<(), LayoutError> {
        let Some(prev_id) = self.neighbor_counterclockwise(id) else {
            return Ok(());
        };
        let (Some(charm), Some(prev)) = (self.charm(id), self.charm(prev_id)) else {
            return Ok(());
        };
        if !charm.overlaps(prev, &self.ring) {
            return Ok(());
        }
        let clearance = geom::counterclockwise_distance(
            prev.end_angle(&self.ring),
            charm.start_angle(&self.ring),
        );
        log::debug!("charm {id} pushes {prev_id} counterclockwise by {clearance:.3}");
        let target = prev.angle() - clearance;
        self.move_inner(prev_id, target, depth + 1)
    }
}
