//! Point queries against the segmented key image.

use crate::region::{Region, RegionId};
use crate::segment::RegionMap;

impl RegionMap {
    /// Looks up the region under a key-image pixel.
    ///
    /// Coordinates are signed so that pointer positions left of or above the
    /// map are rejected instead of wrapping. Returns `None` outside
    /// `[0, width) x [0, height)` and over border or transparent pixels.
    pub fn region_id_at(&self, x: i64, y: i64) -> Option<RegionId> {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return None;
        };
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.label_at_index(y as usize * self.width() as usize + x as usize)
    }

    pub fn region_at(&self, x: i64, y: i64) -> Option<&Region> {
        self.region_id_at(x, y).and_then(|id| self.get(id))
    }
}
