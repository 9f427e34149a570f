use crate::region::{RegionId, RenderOffset};
use crate::segment::RegionMap;
use crate::session::MapSession;

/// Hover and selection state driven by pointer events.
///
/// Hover follows the pointer and clears as soon as it is over no region.
/// Selection is sticky: only a click that lands on a region replaces it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Picker {
    hovered: Option<RegionId>,
    selected: Option<RegionId>,
}

/// What the compositor draws for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameView {
    pub hovered: Option<String>,
    pub selected: Option<String>,
    /// Highlight overlays in draw order.
    pub overlays: Vec<(RegionId, RenderOffset)>,
}

impl Picker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hovered(&self) -> Option<RegionId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<RegionId> {
        self.selected
    }

    /// Recomputes hover for the pointer at `(x, y)`. Returns whether it changed.
    pub fn hover(&mut self, map: &RegionMap, x: i64, y: i64) -> bool {
        let hovered = map.region_id_at(x, y);
        let changed = hovered != self.hovered;
        self.hovered = hovered;
        changed
    }

    /// Pointer left the map surface.
    pub fn leave(&mut self) -> bool {
        self.hovered.take().is_some()
    }

    /// Selects the region under `(x, y)`. A click on no region, including
    /// one outside the map, keeps the previous selection.
    pub fn click(&mut self, map: &RegionMap, x: i64, y: i64) -> bool {
        match map.region_id_at(x, y) {
            Some(id) => {
                log::debug!("Selected region {} at ({}, {})", id, x, y);
                self.selected = Some(id);
                true
            }
            None => false,
        }
    }

    /// Display strings and overlays for the current state.
    pub fn frame(&self, session: &MapSession) -> FrameView {
        let info = |id: Option<RegionId>| {
            id.and_then(|id| session.map().get(id))
                .map(|region| region.display_info())
        };
        FrameView {
            hovered: info(self.hovered),
            selected: info(self.selected),
            overlays: session
                .draw_list()
                .iter()
                .map(|item| (item.id, item.offset))
                .collect(),
        }
    }
}
