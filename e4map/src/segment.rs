//! Key-image segmentation.
//!
//! One pass over the key image assigns every qualifying pixel the index of
//! the region with its color. Membership for all regions lives in a single
//! shared label grid, so a point query is one array lookup and total mask
//! storage is independent of the region count.

use crate::color::ColorKey;
use crate::pixels::PixelSource;
use crate::region::{Region, RegionId, RenderOffset};
use std::collections::HashMap;

/// Label grid value for pixels that belong to no region.
pub(crate) const NO_REGION: u32 = u32::MAX;

/// The segmented key image: every region plus the pixel → region label grid.
#[derive(Debug, Clone)]
pub struct RegionMap {
    width: u32,
    height: u32,
    /// Row-major, `width * height` entries, `NO_REGION` for unlabelled pixels.
    labels: Vec<u32>,
    regions: Vec<Region>,
    by_color: HashMap<ColorKey, RegionId>,
}

impl RegionMap {
    /// Scans `source` once and builds one region per distinct qualifying color.
    ///
    /// Fully transparent and pure black pixels are skipped. An image with no
    /// qualifying pixels yields an empty map.
    pub fn segment(source: &impl PixelSource, offset: RenderOffset) -> Self {
        let (width, height) = source.dimensions();
        let mut labels = vec![NO_REGION; width as usize * height as usize];
        let mut regions: Vec<Region> = Vec::new();
        let mut by_color: HashMap<ColorKey, RegionId> = HashMap::new();

        for y in 0..height {
            for x in 0..width {
                let Some(key) = ColorKey::from_pixel(source.pixel(x, y)) else {
                    continue;
                };

                let id = *by_color.entry(key).or_insert_with(|| {
                    let id = RegionId(regions.len() as u32);
                    log::debug!("Discovered region {} with color {}", id, key);
                    regions.push(Region::new(key, offset));
                    id
                });

                labels[y as usize * width as usize + x as usize] = id.0;
                regions[id.index()].pixels += 1;
            }
        }

        let labelled: usize = regions.iter().map(|r| r.pixels).sum();
        log::info!(
            "Segmented {}x{} key image into {} regions ({} labelled pixels)",
            width,
            height,
            regions.len(),
            labelled
        );

        Self {
            width,
            height,
            labels,
            regions,
            by_color,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(id.index())
    }

    /// Region id for an exact color key.
    pub fn id_of(&self, color: ColorKey) -> Option<RegionId> {
        self.by_color.get(&color).copied()
    }

    pub fn by_color(&self, color: ColorKey) -> Option<&Region> {
        self.id_of(color).and_then(|id| self.get(id))
    }

    /// Regions in discovery order, which is stable for the whole session.
    pub fn iter(&self) -> impl Iterator<Item = (RegionId, &Region)> {
        self.regions
            .iter()
            .enumerate()
            .map(|(i, r)| (RegionId(i as u32), r))
    }

    /// Membership view for one region.
    pub fn mask(&self, id: RegionId) -> Option<Mask<'_>> {
        self.get(id).map(|_| Mask { map: self, id })
    }

    /// Region id at a row-major pixel index.
    pub(crate) fn label_at_index(&self, idx: usize) -> Option<RegionId> {
        match self.labels.get(idx).copied() {
            None | Some(NO_REGION) => None,
            Some(label) => Some(RegionId(label)),
        }
    }

    pub(crate) fn labels(&self) -> &[u32] {
        &self.labels
    }

    /// Pixel coordinates of a row-major label index.
    pub(crate) fn coords_of(&self, idx: usize) -> (u32, u32) {
        let width = self.width as usize;
        ((idx % width) as u32, (idx / width) as u32)
    }
}

/// Borrowed membership function of a single region.
#[derive(Debug, Clone, Copy)]
pub struct Mask<'a> {
    map: &'a RegionMap,
    id: RegionId,
}

impl Mask<'_> {
    pub fn id(&self) -> RegionId {
        self.id
    }

    /// Whether `(x, y)` belongs to this region. Out-of-bounds points never do.
    pub fn contains(&self, x: u32, y: u32) -> bool {
        if x >= self.map.width || y >= self.map.height {
            return false;
        }
        self.map.labels[y as usize * self.map.width as usize + x as usize] == self.id.0
    }

    /// Number of member pixels.
    pub fn len(&self) -> usize {
        self.map.regions[self.id.index()].pixels
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Member pixel coordinates in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        let map = self.map;
        let id = self.id.0;
        map.labels
            .iter()
            .enumerate()
            .filter(move |&(_, &label)| label == id)
            .map(move |(idx, _)| map.coords_of(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const GREEN: Rgba<u8> = Rgba([0, 255, 0, 255]);
    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    /// 2x2 key image: red top row, black border, green with zero alpha.
    fn tiny_key() -> RgbaImage {
        let mut img = RgbaImage::new(2, 2);
        img.put_pixel(0, 0, RED);
        img.put_pixel(1, 0, RED);
        img.put_pixel(0, 1, BLACK);
        img.put_pixel(1, 1, Rgba([0, 255, 0, 0]));
        img
    }

    #[test]
    fn test_segment_tiny_key() {
        let map = RegionMap::segment(&tiny_key(), RenderOffset::default());

        assert_eq!(map.len(), 1);
        let id = map.id_of(ColorKey::new(255, 0, 0)).unwrap();
        let mask = map.mask(id).unwrap();
        assert_eq!(mask.len(), 2);
        assert_eq!(mask.pixels().collect::<Vec<_>>(), vec![(0, 0), (1, 0)]);
        assert!(!mask.contains(0, 1));
        assert!(!mask.contains(1, 1));
        assert!(map.id_of(ColorKey::new(0, 255, 0)).is_none());
    }

    #[test]
    fn test_segment_empty_image() {
        let img = RgbaImage::from_pixel(4, 3, BLACK);
        let map = RegionMap::segment(&img, RenderOffset::default());
        assert!(map.is_empty());
        assert_eq!(map.dimensions(), (4, 3));

        let zero = RgbaImage::new(0, 0);
        assert!(RegionMap::segment(&zero, RenderOffset::default()).is_empty());
    }

    #[test]
    fn test_regions_in_discovery_order() {
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, BLUE);
        img.put_pixel(1, 0, RED);
        img.put_pixel(2, 0, BLUE);
        img.put_pixel(0, 1, GREEN);
        img.put_pixel(1, 1, BLACK);
        img.put_pixel(2, 1, RED);
        let map = RegionMap::segment(&img, RenderOffset::new(0, 0));

        let colors: Vec<_> = map.iter().map(|(_, r)| r.color).collect();
        assert_eq!(
            colors,
            vec![
                ColorKey::new(0, 0, 255),
                ColorKey::new(255, 0, 0),
                ColorKey::new(0, 255, 0)
            ]
        );
        let counts: Vec<_> = map.iter().map(|(_, r)| r.pixels).collect();
        assert_eq!(counts, vec![2, 2, 1]);
    }

    #[test]
    fn test_alpha_does_not_split_colors() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([9, 9, 9, 255]));
        img.put_pixel(1, 0, Rgba([9, 9, 9, 40]));
        let map = RegionMap::segment(&img, RenderOffset::default());
        assert_eq!(map.len(), 1);
        assert_eq!(map.by_color(ColorKey::new(9, 9, 9)).unwrap().pixels, 2);
    }

    #[test]
    fn test_masks_partition_the_image() {
        let mut img = RgbaImage::new(5, 4);
        for (x, y, p) in img.enumerate_pixels_mut() {
            *p = match (x + y) % 4 {
                0 => RED,
                1 => GREEN,
                2 => BLUE,
                _ => BLACK,
            };
        }
        let map = RegionMap::segment(&img, RenderOffset::default());

        for (x, y, p) in img.enumerate_pixels() {
            let owners: Vec<RegionId> = map
                .iter()
                .filter(|(id, _)| map.mask(*id).unwrap().contains(x, y))
                .map(|(id, _)| id)
                .collect();
            match ColorKey::from_pixel(p.0) {
                Some(key) => assert_eq!(owners, vec![map.id_of(key).unwrap()]),
                None => assert!(owners.is_empty()),
            }
        }
    }

    #[test]
    fn test_every_region_inherits_offset() {
        let map = RegionMap::segment(&tiny_key(), RenderOffset::new(3, -2));
        assert!(map.iter().all(|(_, r)| r.offset == RenderOffset::new(3, -2)));
    }

    #[test]
    fn test_coords_of_index() {
        let img = RgbaImage::from_pixel(7, 3, RED);
        let map = RegionMap::segment(&img, RenderOffset::default());

        assert_eq!(map.coords_of(0), (0, 0));
        assert_eq!(map.coords_of(6), (6, 0));
        assert_eq!(map.coords_of(7), (0, 1));
        assert_eq!(map.coords_of(20), (6, 2));

        let id = map.id_of(ColorKey::new(255, 0, 0)).unwrap();
        let pixels: Vec<_> = map.mask(id).unwrap().pixels().collect();
        assert_eq!(pixels.len(), 21);
        assert_eq!(pixels[8], (1, 1));
        assert_eq!(pixels.last(), Some(&(6, 2)));
    }
}
