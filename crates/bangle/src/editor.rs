use crate::config::EditorConfig;
use crate::drag::DragGesture;
use crate::events::PointerEvent;
use crate::palette::Palette;
use crate::ring::charm::Charm;
use crate::ring::{CharmId, LayoutError, RingLayout};
use thiserror::Error;
use trinket::asset::{AssetError, AssetStore};
use trinket::geom::{self, Point};

#[derive(Debug, Error)]
pub enum EditorError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// What the embedding should do after an event was handled.
#[derive(Debug, Clone, Copy, Default)]
pub struct Response {
    pub redraw: bool,
}

impl Response {
    fn redraw() -> Self {
        Self { redraw: true }
    }

    fn ignored() -> Self {
        Self::default()
    }
}

#[derive(Debug)]
enum Mode {
    Idle,
    /// A detached charm follows the pointer in pixel space.
    Dragging(DragGesture),
    /// The selected charm follows the pointer's ring angle, collisions
    /// resolving live.
    Rotating(CharmId),
}

/// The interaction layer: owns the ring layout, the palette and the asset
/// registry, and turns translated pointer events into layout operations.
pub struct Editor {
    layout: RingLayout,
    palette: Palette,
    assets: AssetStore,
    mode: Mode,
}

impl Editor {
    pub fn new(config: &EditorConfig, assets: AssetStore) -> Self {
        let palette = Palette::new(
            config
                .palette
                .iter()
                .map(|entry| entry.asset.clone())
                .collect(),
        );
        palette.register_all(&assets);
        Self {
            layout: RingLayout::new(config.ring.to_ring()),
            palette,
            assets,
            mode: Mode::Idle,
        }
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn assets(&self) -> &AssetStore {
        &self.assets
    }

    pub fn dragging(&self) -> Option<&DragGesture> {
        match &self.mode {
            Mode::Dragging(gesture) => Some(gesture),
            _ => None,
        }
    }

    /// The first layout pass waits for every palette image to finish
    /// loading; until then all pointer input is deferred.
    pub fn ready(&self) -> bool {
        self.assets.all_loaded()
    }

    pub fn handle(&mut self, event: PointerEvent) -> Result<Response, EditorError> {
        if let Some(source) = self.assets.pending().into_iter().next() {
            return Err(AssetError::NotReady(source).into());
        }
        match event {
            PointerEvent::Down(point) => self.pointer_down(point),
            PointerEvent::Move(point) => self.pointer_move(point),
            PointerEvent::Up(point) => self.pointer_up(point),
            PointerEvent::DoubleClick(point) => self.double_click(point),
        }
    }

    fn pointer_down(&mut self, point: Point) -> Result<Response, EditorError> {
        match &self.mode {
            Mode::Dragging(_) => Ok(Response::ignored()),
            Mode::Rotating(_) => {
                self.layout.clear_selection();
                self.mode = Mode::Idle;
                Ok(Response::redraw())
            }
            Mode::Idle => {
                if let Some(slot) = self.palette.hit(&self.assets, point)? {
                    self.layout.check_capacity(slot.size)?;
                    let id = self.layout.allocate_id();
                    let charm = Charm::new(id, slot.source, slot.size, 0.0);
                    self.mode = Mode::Dragging(DragGesture::new(charm, point));
                    return Ok(Response::redraw());
                }
                if let Some(id) = self.layout.charm_at(point)
                    && let Some(charm) = self.layout.remove(id)
                {
                    // detached: a dragging charm pushes nobody
                    self.mode = Mode::Dragging(DragGesture::new(charm, point));
                    return Ok(Response::redraw());
                }
                Ok(Response::ignored())
            }
        }
    }

    fn pointer_move(&mut self, point: Point) -> Result<Response, EditorError> {
        match &mut self.mode {
            Mode::Dragging(gesture) => {
                gesture.update(point);
                Ok(Response::redraw())
            }
            Mode::Rotating(id) => {
                let id = *id;
                let target = geom::angle_at(self.layout.ring().center, point);
                self.layout.move_to(id, target)?;
                Ok(Response::redraw())
            }
            Mode::Idle => Ok(Response::ignored()),
        }
    }

    fn pointer_up(&mut self, point: Point) -> Result<Response, EditorError> {
        let Mode::Dragging(gesture) = std::mem::replace(&mut self.mode, Mode::Idle) else {
            return Ok(Response::ignored());
        };
        let Some(angle) = gesture.drop_angle(self.layout.ring(), point) else {
            log::debug!("drop inside the dead zone, discarding charm");
            return Ok(Response::redraw());
        };
        let mut charm = gesture.into_charm();
        charm.set_angle(angle);
        // a full rejection discards the charm and leaves the ring as it was
        let id = self.layout.insert(charm)?;
        self.layout.select(id)?;
        self.mode = Mode::Rotating(id);
        Ok(Response::redraw())
    }

    fn double_click(&mut self, point: Point) -> Result<Response, EditorError> {
        let Some(id) = self.layout.charm_at(point) else {
            return Ok(Response::ignored());
        };
        if matches!(&self.mode, Mode::Rotating(selected) if *selected == id) {
            self.mode = Mode::Idle;
        }
        self.layout.remove(id);
        Ok(Response::redraw())
    }
}
