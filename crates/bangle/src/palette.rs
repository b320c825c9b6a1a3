use trinket::asset::{AssetError, AssetSource, AssetStore, ImageSize};
use trinket::geom::Point;

pub const PALETTE_START_X: f64 = 20.0;
pub const PALETTE_MARGIN: f64 = 10.0;
pub const PALETTE_LINE_Y: f64 = 50.0;

/// The strip of template decorations across the top of the surface. New
/// charms are dragged off of it; the entries themselves never move.
#[derive(Debug, Clone)]
pub struct Palette {
    sources: Vec<AssetSource>,
}

impl Palette {
    pub fn new(sources: Vec<AssetSource>) -> Self {
        Self { sources }
    }

    pub fn sources(&self) -> &[AssetSource] {
        &self.sources
    }

    pub fn register_all(&self, assets: &AssetStore) {
        for source in &self.sources {
            assets.register(source.clone());
        }
    }

    /// Entry geometry, left to right: each entry sits one margin past the
    /// previous entry's right edge. Entry widths come from the loaded
    /// images, so this fails until every palette asset has loaded.
    pub fn slots(&self, assets: &AssetStore) -> Result<Vec<PaletteSlot>, AssetError> {
        let mut slots = Vec::with_capacity(self.sources.len());
        let mut x = PALETTE_START_X;
        for source in &self.sources {
            let size = assets.size(source)?;
            slots.push(PaletteSlot {
                source: source.clone(),
                size,
                center: Point::new(x + f64::from(size.width) / 2.0, PALETTE_LINE_Y),
            });
            x += f64::from(size.width) + PALETTE_MARGIN;
        }
        Ok(slots)
    }

    /// Entry under the pointer, if any.
    pub fn hit(&self, assets: &AssetStore, point: Point) -> Result<Option<PaletteSlot>, AssetError> {
        Ok(self.slots(assets)?.into_iter().find(|slot| slot.contains(point)))
    }
}

#[derive(Debug, Clone)]
pub struct PaletteSlot {
    pub source: AssetSource,
    pub size: ImageSize,
    pub center: Point,
}

impl PaletteSlot {
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) < self.size.bounding_radius()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_store() -> (AssetStore, Vec<AssetSource>) {
        let sources = vec![
            AssetSource::new("decorations/flower.png"),
            AssetSource::new("decorations/heart.png"),
        ];
        let store = AssetStore::new();
        store.complete(sources[0].clone(), ImageSize::new(40, 40));
        store.complete(sources[1].clone(), ImageSize::new(60, 30));
        (store, sources)
    }

    #[test]
    fn entries_stack_left_to_right_with_margins() {
        let (store, sources) = loaded_store();
        let palette = Palette::new(sources);

        let slots = palette.slots(&store).unwrap();
        assert_eq!(slots.len(), 2);
        // 20 + 40/2, then 20 + 40 + 10 + 60/2
        assert_eq!(slots[0].center, Point::new(40.0, PALETTE_LINE_Y));
        assert_eq!(slots[1].center, Point::new(100.0, PALETTE_LINE_Y));
    }

    #[test]
    fn hit_finds_the_entry_under_the_pointer() {
        let (store, sources) = loaded_store();
        let palette = Palette::new(sources.clone());

        let hit = palette.hit(&store, Point::new(42.0, 52.0)).unwrap();
        assert_eq!(hit.map(|slot| slot.source), Some(sources[0].clone()));

        let miss = palette.hit(&store, Point::new(300.0, 52.0)).unwrap();
        assert!(miss.is_none());
    }

    #[test]
    fn unloaded_entries_defer_every_query() {
        let store = AssetStore::new();
        let source = AssetSource::new("decorations/star.png");
        store.register(source.clone());
        let palette = Palette::new(vec![source]);

        assert!(matches!(
            palette.hit(&store, Point::new(40.0, 50.0)),
            Err(AssetError::NotReady(_))
        ));
    }
}
