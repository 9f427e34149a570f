//! Region picking for color-keyed political maps.
//!
//! A key image paints every territory in its own flat RGB color. This crate
//! segments that image into regions, joins per-color metadata onto them,
//! builds owner-tinted highlight overlays and answers point queries for
//! hover and selection.

pub mod color;
pub mod config;
pub mod error;
pub mod highlight;
mod hit;
pub mod metadata;
pub mod picker;
pub mod pixels;
pub mod players;
pub mod region;
pub mod segment;
pub mod session;

pub use color::{ColorKey, DEFAULT_TINT, Tint};
pub use config::MapConfig;
pub use error::{AssetError, ConfigError, KeyParseError, MapError};
pub use highlight::{DrawItem, Highlight, HighlightCache};
pub use metadata::{JoinReport, MetadataFile, RegionRecord};
pub use picker::{FrameView, Picker};
pub use pixels::PixelSource;
pub use players::{Player, PlayerRegistry};
pub use region::{Count, Region, RegionId, RenderOffset, Resources};
pub use segment::{Mask, RegionMap};
pub use session::MapSession;
