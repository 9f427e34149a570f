//! Error types for loading and assembling a region map.
//!
//! Everything here is a startup failure. Per-frame lookups that find no
//! region are plain `None`s and never show up in this module.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// A required input file could not be read or decoded.
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to decode image {path:?}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Why a metadata key failed to parse as an `(R, G, B)` triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyParseReason {
    /// The key is not wrapped in `(` and `)`.
    MissingParens,
    /// The key does not have exactly three components.
    WrongArity(usize),
    /// A component is not a base-10 integer.
    NotANumber(String),
    /// A component does not fit in a color channel.
    OutOfRange(String),
}

impl fmt::Display for KeyParseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyParseReason::MissingParens => write!(f, "expected a parenthesized triple"),
            KeyParseReason::WrongArity(n) => write!(f, "expected 3 components, found {}", n),
            KeyParseReason::NotANumber(s) => write!(f, "component {:?} is not a number", s),
            KeyParseReason::OutOfRange(s) => write!(f, "component {} is outside 0..=255", s),
        }
    }
}

/// A metadata key that is not a valid color triple.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid region key {key:?}: {reason}")]
pub struct KeyParseError {
    pub key: String,
    pub reason: KeyParseReason,
}

/// The map configuration file could not be loaded.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Any failure that aborts building a [`crate::MapSession`].
#[derive(Error, Debug)]
pub enum MapError {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    MetadataKey(#[from] KeyParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_error_names_the_key() {
        let err = KeyParseError {
            key: "(1, 2)".to_string(),
            reason: KeyParseReason::WrongArity(2),
        };
        let msg = err.to_string();
        assert!(msg.contains("\"(1, 2)\""));
        assert!(msg.contains("found 2"));
    }

    #[test]
    fn test_map_error_is_transparent() {
        let err: MapError = KeyParseError {
            key: "red".to_string(),
            reason: KeyParseReason::MissingParens,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "invalid region key \"red\": expected a parenthesized triple"
        );
    }
}
