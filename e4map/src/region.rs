use crate::color::ColorKey;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

pub const DEFAULT_NAME: &str = "Unknown";
pub const DEFAULT_OWNER: &str = "Neutral";

/// Index of a region in discovery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RegionId(pub u32);

impl RegionId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Pixel offset applied when drawing a region's overlay on the visible map.
///
/// Corrects registration drift between the key image and the visible image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderOffset {
    pub dx: i32,
    pub dy: i32,
}

impl RenderOffset {
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

impl Default for RenderOffset {
    fn default() -> Self {
        Self::new(-7, 0)
    }
}

/// A display-only count that may be unset.
///
/// Metadata files write either a non-negative integer or the string `"None"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Count {
    #[default]
    Unset,
    Value(u32),
}

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Count::Unset => write!(f, "None"),
            Count::Value(n) => write!(f, "{}", n),
        }
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Count::Unset => serializer.serialize_none(),
            Count::Value(n) => serializer.serialize_u32(*n),
        }
    }
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountVisitor;

        impl Visitor<'_> for CountVisitor {
            type Value = Count;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "a non-negative integer or \"None\"")
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Count, E> {
                u32::try_from(v)
                    .map(Count::Value)
                    .map_err(|_| E::invalid_value(de::Unexpected::Unsigned(v), &self))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Count, E> {
                if v < 0 {
                    return Err(E::invalid_value(de::Unexpected::Signed(v), &self));
                }
                self.visit_u64(v as u64)
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Count, E> {
                if v == "None" {
                    Ok(Count::Unset)
                } else {
                    Err(E::invalid_value(de::Unexpected::Str(v), &self))
                }
            }

            fn visit_unit<E: de::Error>(self) -> Result<Count, E> {
                Ok(Count::Unset)
            }
        }

        deserializer.deserialize_any(CountVisitor)
    }
}

/// Free-form resource description; opaque to everything but display.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Resources(pub Option<serde_json::Value>);

impl fmt::Display for Resources {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            None | Some(serde_json::Value::Null) => write!(f, "None"),
            Some(serde_json::Value::String(s)) => write!(f, "{}", s),
            Some(other) => write!(f, "{}", other),
        }
    }
}

impl Serialize for Resources {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// One territory of the map: a color key plus its display metadata.
///
/// Membership is answered by the owning [`crate::RegionMap`]; a region only
/// carries its pixel count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub color: ColorKey,
    pub name: String,
    /// Controlling faction. An empty string means "never highlight".
    pub owner: String,
    pub resources: Resources,
    #[serde(rename = "tpno")]
    pub trade_posts: Count,
    pub units: Count,
    pub pixels: usize,
    #[serde(skip)]
    pub offset: RenderOffset,
}

impl Region {
    /// A freshly segmented region with default metadata.
    pub fn new(color: ColorKey, offset: RenderOffset) -> Self {
        Self {
            color,
            name: DEFAULT_NAME.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            resources: Resources::default(),
            trade_posts: Count::Unset,
            units: Count::Unset,
            pixels: 0,
            offset,
        }
    }

    /// Whether this region gets an ownership highlight.
    pub fn is_highlighted(&self) -> bool {
        !self.owner.is_empty()
    }

    /// The single-line hover/selection text shown to the player.
    pub fn display_info(&self) -> String {
        format!(
            "Region: {}, Owner: {}, Resources: {}, TP #: {}, Units: {}",
            self.name, self.owner, self.resources, self.trade_posts, self.units
        )
    }
}
