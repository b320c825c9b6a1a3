use trinket::geom::Point;

/// Pointer input already translated into the drawing surface's local
/// coordinate space (origin at the surface's top-left).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down(Point),
    Move(Point),
    Up(Point),
    DoubleClick(Point),
}
