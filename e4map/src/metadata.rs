//! Region metadata files and the color-keyed join onto a segmented map.
//!
//! The file is a JSON object keyed by `"(R, G, B)"`:
//!
//! ```json
//! { "(255, 0, 0)": { "name": "Redland", "owner": "Player1", "tpno": 2 } }
//! ```

use crate::color::ColorKey;
use crate::error::{AssetError, KeyParseError};
use crate::region::{Count, Region, Resources};
use crate::segment::RegionMap;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Metadata for one region. Every field is optional; absent fields keep
/// whatever the region already had.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RegionRecord {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub resources: Option<serde_json::Value>,
    #[serde(default)]
    pub tpno: Option<Count>,
    #[serde(default)]
    pub units: Option<Count>,
}

impl RegionRecord {
    /// Overwrites only the fields present in this record.
    pub fn apply_to(&self, region: &mut Region) {
        if let Some(name) = &self.name {
            region.name = name.clone();
        }
        if let Some(owner) = &self.owner {
            region.owner = owner.clone();
        }
        if let Some(resources) = &self.resources {
            region.resources = Resources(Some(resources.clone()));
        }
        if let Some(tpno) = self.tpno {
            region.trade_posts = tpno;
        }
        if let Some(units) = self.units {
            region.units = units;
        }
    }
}

/// Raw metadata file contents, keys not yet validated.
pub type MetadataFile = BTreeMap<String, RegionRecord>;

/// Reads and parses a metadata file.
pub fn load_metadata(path: &Path) -> Result<MetadataFile, AssetError> {
    log::info!("Loading region metadata from {:?}", path);
    let text = std::fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| AssetError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Outcome of [`join`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinReport {
    /// Records that found their region.
    pub matched: usize,
    /// Keys that parsed but name no region in this map.
    pub unmatched: Vec<ColorKey>,
}

/// Merges metadata records into the regions with matching color keys.
///
/// Every key is validated before any region is touched, so a malformed key
/// leaves the map exactly as it was. Records for colors absent from the map
/// are skipped.
pub fn join(map: &mut RegionMap, records: &MetadataFile) -> Result<JoinReport, KeyParseError> {
    let parsed = records
        .iter()
        .map(|(key, record)| Ok((key.parse::<ColorKey>()?, record)))
        .collect::<Result<Vec<_>, KeyParseError>>()?;

    let mut report = JoinReport::default();
    for (color, record) in parsed {
        let region = map.id_of(color).and_then(|id| map.get_mut(id));
        match region {
            Some(region) => {
                record.apply_to(region);
                report.matched += 1;
            }
            None => {
                log::debug!("No region with color {} in this map, skipping", color);
                report.unmatched.push(color);
            }
        }
    }

    log::info!(
        "Joined metadata: {} matched, {} without a region",
        report.matched,
        report.unmatched.len()
    );
    Ok(report)
}
