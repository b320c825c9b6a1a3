use derive_more::{AsRef, Deref, Display, From, Into};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct AssetSource(String);

crate::impl_string_newtype!(AssetSource);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Radius of the image's bounding circle, in pixels.
    pub fn bounding_radius(&self) -> f64 {
        f64::from(self.width.max(self.height)) / 2.0
    }
}

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("asset '{0}' has not finished loading")]
    NotReady(AssetSource),
    #[error("asset '{0}' was never registered")]
    Unknown(AssetSource),
}

/// Pixel dimensions of decoration images, reported by the external loader
/// as each image finishes decoding. Geometry queries fail with
/// [`AssetError::NotReady`] until then.
#[derive(Debug, Default)]
pub struct AssetStore {
    sizes: RwLock<HashMap<AssetSource, Option<ImageSize>>>,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, source: AssetSource) {
        self.sizes.write().entry(source).or_insert(None);
    }

    /// Records the dimensions reported by the loader.
    pub fn complete(&self, source: AssetSource, size: ImageSize) {
        log::debug!("asset '{}' loaded at {}x{}", source, size.width, size.height);
        self.sizes.write().insert(source, Some(size));
    }

    pub fn size(&self, source: &AssetSource) -> Result<ImageSize, AssetError> {
        match self.sizes.read().get(source) {
            Some(Some(size)) => Ok(*size),
            Some(None) => Err(AssetError::NotReady(source.clone())),
            None => Err(AssetError::Unknown(source.clone())),
        }
    }

    pub fn is_ready(&self, source: &AssetSource) -> bool {
        matches!(self.sizes.read().get(source), Some(Some(_)))
    }

    /// True once every registered asset has reported its dimensions.
    pub fn all_loaded(&self) -> bool {
        self.sizes.read().values().all(|size| size.is_some())
    }

    pub fn pending(&self) -> Vec<AssetSource> {
        self.sizes
            .read()
            .iter()
            .filter(|(_, size)| size.is_none())
            .map(|(source, _)| source.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registered_assets_are_not_ready_until_completed() {
        let store = AssetStore::new();
        let source = AssetSource::new("decorations/one.png");
        store.register(source.clone());

        assert!(matches!(store.size(&source), Err(AssetError::NotReady(_))));
        assert!(!store.all_loaded());

        store.complete(source.clone(), ImageSize::new(40, 40));
        assert_eq!(store.size(&source).unwrap(), ImageSize::new(40, 40));
        assert!(store.all_loaded());
        assert!(store.pending().is_empty());
    }

    #[test]
    fn unregistered_assets_are_unknown() {
        let store = AssetStore::new();
        let source = AssetSource::new("decorations/missing.png");
        assert!(matches!(store.size(&source), Err(AssetError::Unknown(_))));
    }

    #[test]
    fn completing_again_overwrites_the_size() {
        let store = AssetStore::new();
        let source = AssetSource::new("decorations/two.png");
        store.complete(source.clone(), ImageSize::new(10, 10));
        store.complete(source.clone(), ImageSize::new(64, 32));
        assert_eq!(store.size(&source).unwrap(), ImageSize::new(64, 32));
        assert_eq!(store.size(&source).unwrap().bounding_radius(), 32.0);
    }

    #[test]
    fn source_serializes_as_a_bare_string() {
        let source: AssetSource = serde_json::from_str("\"decorations/one.png\"").unwrap();
        assert_eq!(source, AssetSource::new("decorations/one.png"));
        assert_eq!(
            serde_json::to_string(&source).unwrap(),
            "\"decorations/one.png\""
        );
    }
}
