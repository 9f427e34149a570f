use crate::error::{KeyParseError, KeyParseReason};
use image::Rgba;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// RGBA color used to tint highlight overlays. Alpha controls translucency.
pub type Tint = Rgba<u8>;

/// Fallback tint for owners that are not a known player (semi-transparent red).
pub const DEFAULT_TINT: Tint = Rgba([255, 0, 0, 128]);

/// The exact RGB triple identifying one region in the key image.
///
/// Pure black is reserved for borders and background and never identifies a region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorKey {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorKey {
    pub const BLACK: ColorKey = ColorKey::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color key of an RGBA pixel, or `None` if the pixel is transparent or black.
    pub fn from_pixel([r, g, b, a]: [u8; 4]) -> Option<Self> {
        if a == 0 {
            return None;
        }
        let key = Self::new(r, g, b);
        (key != Self::BLACK).then_some(key)
    }
}

impl fmt::Display for ColorKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Serialize for ColorKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Parses the metadata key form `"(R, G, B)"`.
///
/// Whitespace around the triple and around each component is ignored.
impl FromStr for ColorKey {
    type Err = KeyParseError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let fail = |reason| KeyParseError {
            key: key.to_string(),
            reason,
        };

        let inner = key
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(|| fail(KeyParseReason::MissingParens))?;

        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(fail(KeyParseReason::WrongArity(parts.len())));
        }

        let mut channels = [0u8; 3];
        for (slot, part) in channels.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(fail(KeyParseReason::NotANumber(part.to_string())));
            }
            *slot = part
                .parse::<u8>()
                .map_err(|_| fail(KeyParseReason::OutOfRange(part.to_string())))?;
        }

        Ok(Self::new(channels[0], channels[1], channels[2]))
    }
}
