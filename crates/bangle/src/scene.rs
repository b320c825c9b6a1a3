use crate::editor::Editor;
use crate::ring::{Charm, Ring};
use trinket::asset::{AssetError, AssetSource, ImageSize};
use trinket::geom::Point;

/// One renderer instruction. The core only computes where and at what
/// angle to draw; issuing the actual draw calls is the renderer's
/// business.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// Outline of the circular track.
    Ring { center: Point, radius: f64 },
    /// Image blit centered at `center`, rotated about it.
    Blit {
        source: AssetSource,
        center: Point,
        size: ImageSize,
        rotation: f64,
        selected: bool,
    },
}

/// Flattens the editor state into ordered renderer instructions: the
/// track first, then the palette row, then the placed charms, with a
/// dragged charm last so it paints on top of everything.
pub fn scene(editor: &Editor) -> Result<Vec<DrawCommand>, AssetError> {
    let ring = editor.layout().ring();
    let mut commands = vec![DrawCommand::Ring {
        center: ring.center,
        radius: ring.radius,
    }];

    for slot in editor.palette().slots(editor.assets())? {
        commands.push(DrawCommand::Blit {
            source: slot.source,
            center: slot.center,
            size: slot.size,
            rotation: 0.0,
            selected: false,
        });
    }

    for charm in editor.layout().iter() {
        commands.push(blit(charm, ring));
    }

    if let Some(gesture) = editor.dragging() {
        commands.push(blit(gesture.charm(), ring));
    }

    Ok(commands)
}

fn blit(charm: &Charm, ring: &Ring) -> DrawCommand {
    DrawCommand::Blit {
        source: charm.source().clone(),
        center: charm.center_position(ring),
        size: charm.size(),
        rotation: charm.rotation(),
        selected: charm.selected(),
    }
}
