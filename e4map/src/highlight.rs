//! Ownership highlight overlays.
//!
//! A highlight surface is a full-size transparent image with the pixels of
//! one region set to its owner's tint. Surfaces are derived state: the cache
//! records the owner and tint each surface was built for, and
//! [`HighlightCache::refresh`] rebuilds any entry that no longer matches its
//! region.

use crate::color::Tint;
use crate::players::PlayerRegistry;
use crate::region::{Region, RegionId, RenderOffset};
use crate::segment::{NO_REGION, RegionMap};
use image::RgbaImage;

/// Cached overlay of one owned region.
#[derive(Debug, Clone, PartialEq)]
pub struct Highlight {
    pub surface: RgbaImage,
    /// Owner the surface was built for.
    pub owner: String,
    pub tint: Tint,
}

/// One overlay to draw this frame.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem<'a> {
    pub id: RegionId,
    pub surface: &'a RgbaImage,
    pub offset: RenderOffset,
}

/// Tint a region should be highlighted with, or `None` for an empty owner.
fn desired_tint(region: &Region, players: &PlayerRegistry, default_tint: Tint) -> Option<Tint> {
    region
        .is_highlighted()
        .then(|| players.tint_for(&region.owner, default_tint))
}

/// Renders one region's mask in `tint` over a fully transparent image the
/// size of the key image.
pub fn render_highlight(map: &RegionMap, id: RegionId, tint: Tint) -> RgbaImage {
    let (width, height) = map.dimensions();
    let mut surface = RgbaImage::new(width, height);
    if let Some(mask) = map.mask(id) {
        for (x, y) in mask.pixels() {
            surface.put_pixel(x, y, tint);
        }
    }
    surface
}

/// Renders every owned region into a single image in one pass over the
/// label grid. Equivalent to stacking all highlight surfaces, at the memory
/// cost of one image.
pub fn owner_overlay(map: &RegionMap, players: &PlayerRegistry, default_tint: Tint) -> RgbaImage {
    let tints: Vec<Option<Tint>> = map
        .iter()
        .map(|(_, region)| desired_tint(region, players, default_tint))
        .collect();

    let (width, height) = map.dimensions();
    let mut overlay = RgbaImage::new(width, height);
    for (idx, &label) in map.labels().iter().enumerate() {
        if label == NO_REGION {
            continue;
        }
        if let Some(tint) = tints[label as usize] {
            let (x, y) = map.coords_of(idx);
            overlay.put_pixel(x, y, tint);
        }
    }
    overlay
}

/// Highlight surfaces for every owned region, indexed by [`RegionId`].
#[derive(Debug, Clone, Default)]
pub struct HighlightCache {
    entries: Vec<Option<Highlight>>,
}

impl HighlightCache {
    /// Builds a surface for every region with a non-empty owner.
    ///
    /// All surfaces are filled in a single pass over the label grid.
    pub fn build(map: &RegionMap, players: &PlayerRegistry, default_tint: Tint) -> Self {
        let (width, height) = map.dimensions();
        let mut entries: Vec<Option<Highlight>> = map
            .iter()
            .map(|(_, region)| {
                desired_tint(region, players, default_tint).map(|tint| Highlight {
                    surface: RgbaImage::new(width, height),
                    owner: region.owner.clone(),
                    tint,
                })
            })
            .collect();

        for (idx, &label) in map.labels().iter().enumerate() {
            if label == NO_REGION {
                continue;
            }
            if let Some(highlight) = entries[label as usize].as_mut() {
                let (x, y) = map.coords_of(idx);
                highlight.surface.put_pixel(x, y, highlight.tint);
            }
        }

        let cache = Self { entries };
        log::info!(
            "Built {} highlight surfaces for {} regions",
            cache.len(),
            map.len()
        );
        cache
    }

    pub fn get(&self, id: RegionId) -> Option<&Highlight> {
        self.entries.get(id.index()).and_then(Option::as_ref)
    }

    /// Number of cached surfaces.
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops the cached surface of one region. The next [`refresh`](Self::refresh)
    /// rebuilds it if the region is still owned.
    pub fn invalidate(&mut self, id: RegionId) {
        if let Some(entry) = self.entries.get_mut(id.index()) {
            *entry = None;
        }
    }

    /// Brings a single entry in line with its region. Returns whether it changed.
    pub fn refresh_region(
        &mut self,
        map: &RegionMap,
        id: RegionId,
        players: &PlayerRegistry,
        default_tint: Tint,
    ) -> bool {
        let Some(region) = map.get(id) else {
            return false;
        };
        if self.entries.len() < map.len() {
            self.entries.resize(map.len(), None);
        }

        let desired = desired_tint(region, players, default_tint);
        let entry = &mut self.entries[id.index()];
        let current = entry.as_ref().map(|h| (h.owner.as_str(), h.tint));
        if current == desired.map(|tint| (region.owner.as_str(), tint)) {
            return false;
        }

        log::debug!(
            "Rebuilding highlight for {} {} (owner {:?})",
            id,
            region.color,
            region.owner
        );
        *entry = desired.map(|tint| Highlight {
            surface: render_highlight(map, id, tint),
            owner: region.owner.clone(),
            tint,
        });
        true
    }

    /// Rebuilds every entry whose owner or tint went stale, and drops entries
    /// for regions whose owner became empty. Returns the number of entries changed.
    pub fn refresh(&mut self, map: &RegionMap, players: &PlayerRegistry, default_tint: Tint) -> usize {
        self.entries.truncate(map.len());
        map.iter()
            .filter(|&(id, _)| self.refresh_region(map, id, players, default_tint))
            .count()
    }

    /// Overlays to draw, in region order.
    pub fn draw_list<'a>(&'a self, map: &'a RegionMap) -> Vec<DrawItem<'a>> {
        map.iter()
            .filter_map(|(id, region)| {
                self.get(id).map(|h| DrawItem {
                    id,
                    surface: &h.surface,
                    offset: region.offset,
                })
            })
            .collect()
    }
}
