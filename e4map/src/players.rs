use crate::color::Tint;
use image::Rgba;
use std::collections::HashMap;

/// A faction that can own regions.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub name: String,
    /// Highlight color for this player's regions; alpha sets translucency.
    pub color: Tint,
}

impl Player {
    pub fn new(name: impl Into<String>, color: Tint) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}

/// Session-wide owner name → player lookup.
///
/// Built once at startup and passed explicitly to whatever needs to resolve
/// owner colors.
#[derive(Debug, Clone, Default)]
pub struct PlayerRegistry {
    players: Vec<Player>,
    by_name: HashMap<String, usize>,
}

impl PlayerRegistry {
    pub fn new(players: impl IntoIterator<Item = Player>) -> Self {
        let mut registry = Self::default();
        for player in players {
            registry.insert(player);
        }
        registry
    }

    /// Adds a player. A later player with the same name replaces the earlier one.
    pub fn insert(&mut self, player: Player) {
        if let Some(&idx) = self.by_name.get(&player.name) {
            log::warn!("Player {:?} declared twice, keeping the last", player.name);
            self.players[idx] = player;
        } else {
            self.by_name.insert(player.name.clone(), self.players.len());
            self.players.push(player);
        }
    }

    pub fn get(&self, name: &str) -> Option<&Player> {
        self.by_name.get(name).map(|&idx| &self.players[idx])
    }

    /// Tint for regions owned by `owner`, falling back to `default_tint`.
    pub fn tint_for(&self, owner: &str, default_tint: Tint) -> Tint {
        self.get(owner).map_or(default_tint, |p| p.color)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Player> {
        self.players.iter()
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }
}

/// The two stock players of the Emjata map.
pub fn default_players() -> Vec<Player> {
    vec![
        Player::new("Player1", Rgba([0, 255, 0, 128])),
        Player::new("Player2", Rgba([0, 0, 255, 128])),
    ]
}
