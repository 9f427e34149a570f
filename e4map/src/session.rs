use crate::color::Tint;
use crate::config::MapConfig;
use crate::error::{KeyParseError, MapError};
use crate::highlight::{DrawItem, HighlightCache};
use crate::metadata::{self, MetadataFile};
use crate::pixels::{PixelSource, load_image};
use crate::players::PlayerRegistry;
use crate::region::{RegionId, RenderOffset};
use crate::segment::RegionMap;
use image::RgbaImage;

/// Everything the picker needs for one map, assembled once at startup.
///
/// Regions, masks and highlight surfaces are read-only after construction,
/// except through [`MapSession::set_owner`], which keeps the highlight cache
/// in sync.
#[derive(Debug, Clone)]
pub struct MapSession {
    map: RegionMap,
    visible: RgbaImage,
    players: PlayerRegistry,
    default_tint: Tint,
    highlights: HighlightCache,
}

impl MapSession {
    /// Loads the key image, visible image and metadata named by `config`, then
    /// segments, joins and builds highlights. Any failure aborts the whole load.
    pub fn load(config: &MapConfig) -> Result<Self, MapError> {
        let key = load_image(&config.key_image)?;
        let visible = load_image(&config.visible_image)?;
        let records = metadata::load_metadata(&config.metadata)?;

        let session = Self::assemble(
            &key,
            visible,
            &records,
            config.player_registry(),
            config.default_tint(),
            config.offset(),
        )?;
        Ok(session)
    }

    /// Builds a session from already decoded inputs.
    pub fn assemble(
        key: &impl PixelSource,
        visible: RgbaImage,
        records: &MetadataFile,
        players: PlayerRegistry,
        default_tint: Tint,
        offset: RenderOffset,
    ) -> Result<Self, KeyParseError> {
        if key.dimensions() != visible.dimensions() {
            log::warn!(
                "Key image is {:?} but visible image is {:?}; hit testing uses the key image",
                key.dimensions(),
                visible.dimensions()
            );
        }

        let mut map = RegionMap::segment(key, offset);
        metadata::join(&mut map, records)?;
        let highlights = HighlightCache::build(&map, &players, default_tint);

        Ok(Self {
            map,
            visible,
            players,
            default_tint,
            highlights,
        })
    }

    pub fn map(&self) -> &RegionMap {
        &self.map
    }

    pub fn visible(&self) -> &RgbaImage {
        &self.visible
    }

    pub fn players(&self) -> &PlayerRegistry {
        &self.players
    }

    pub fn default_tint(&self) -> Tint {
        self.default_tint
    }

    pub fn highlights(&self) -> &HighlightCache {
        &self.highlights
    }

    /// Overlays to draw this frame, in region order.
    pub fn draw_list(&self) -> Vec<DrawItem<'_>> {
        self.highlights.draw_list(&self.map)
    }

    /// Changes a region's owner and rebuilds its highlight before returning.
    ///
    /// Returns `false` if `id` names no region.
    pub fn set_owner(&mut self, id: RegionId, owner: impl Into<String>) -> bool {
        let Some(region) = self.map.get_mut(id) else {
            return false;
        };
        region.owner = owner.into();
        self.highlights
            .refresh_region(&self.map, id, &self.players, self.default_tint);
        true
    }
}
