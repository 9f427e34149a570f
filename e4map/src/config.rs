//! Map asset configuration.
//!
//! A config file is optional JSON; every field has a default matching the stock
//! Emjata map:
//!
//! ```json
//! {
//!     "key_image": "assets/Emjata2.png",
//!     "visible_image": "assets/Emjata.png",
//!     "metadata": "data/regions.json",
//!     "render_offset": [-7, 0],
//!     "default_tint": [255, 0, 0, 128],
//!     "players": [{ "name": "Player1", "color": [0, 255, 0, 128] }]
//! }
//! ```

use crate::color::{DEFAULT_TINT, Tint};
use crate::error::ConfigError;
use crate::players::{Player, PlayerRegistry, default_players};
use crate::region::RenderOffset;
use image::Rgba;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub color: [u8; 4],
}

impl From<&Player> for PlayerConfig {
    fn from(player: &Player) -> Self {
        Self {
            name: player.name.clone(),
            color: player.color.0,
        }
    }
}

/// Paths and per-map constants for one key/visible image pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Color-keyed region image used for hit testing.
    pub key_image: PathBuf,
    /// Image shown to the player.
    pub visible_image: PathBuf,
    /// Region metadata keyed by `"(R, G, B)"`.
    pub metadata: PathBuf,
    /// Drift between the key image and the visible image, in pixels.
    pub render_offset: [i32; 2],
    /// Tint for owners that are not a configured player.
    pub default_tint: [u8; 4],
    pub players: Vec<PlayerConfig>,
}

impl Default for MapConfig {
    fn default() -> Self {
        let offset = RenderOffset::default();
        Self {
            key_image: PathBuf::from("assets/Emjata2.png"),
            visible_image: PathBuf::from("assets/Emjata.png"),
            metadata: PathBuf::from("data/regions.json"),
            render_offset: [offset.dx, offset.dy],
            default_tint: DEFAULT_TINT.0,
            players: default_players().iter().map(PlayerConfig::from).collect(),
        }
    }
}

impl MapConfig {
    /// Default configuration with asset paths under `root`.
    pub fn with_root(root: &Path) -> Self {
        let mut config = Self::default();
        config.resolve_relative_to(root);
        config
    }

    /// Loads a config file. Relative asset paths are taken relative to the
    /// directory containing the file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        log::info!("Loading map config from {:?}", path);
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: MapConfig =
            serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        if let Some(dir) = path.parent() {
            config.resolve_relative_to(dir);
        }
        Ok(config)
    }

    fn resolve_relative_to(&mut self, root: &Path) {
        for path in [
            &mut self.key_image,
            &mut self.visible_image,
            &mut self.metadata,
        ] {
            if path.is_relative() {
                *path = root.join(&*path);
            }
        }
    }

    pub fn offset(&self) -> RenderOffset {
        RenderOffset::new(self.render_offset[0], self.render_offset[1])
    }

    pub fn default_tint(&self) -> Tint {
        Rgba(self.default_tint)
    }

    pub fn player_registry(&self) -> PlayerRegistry {
        PlayerRegistry::new(
            self.players
                .iter()
                .map(|p| Player::new(p.name.clone(), Rgba(p.color))),
        )
    }
}
