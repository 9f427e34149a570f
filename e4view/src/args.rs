use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser, Debug, PartialEq)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Map config file (JSON). Without one, stock asset paths under --root are used.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding `assets/` and `data/` when no config file is given.
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Override the color-keyed region image.
    #[arg(long)]
    pub key_image: Option<PathBuf>,

    /// Override the visible map image.
    #[arg(long)]
    pub map_image: Option<PathBuf>,

    /// Override the region metadata file.
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// A key-image pixel coordinate written as `X,Y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl FromStr for Point {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (x, y) = s
            .split_once(',')
            .ok_or_else(|| format!("expected X,Y but got {:?}", s))?;
        let parse = |v: &str| {
            v.trim()
                .parse::<i64>()
                .map_err(|e| format!("bad coordinate {:?}: {}", v, e))
        };
        Ok(Point {
            x: parse(x)?,
            y: parse(y)?,
        })
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// List every region with its pixel count and info line (default).
    Regions {
        /// Print the regions as JSON instead.
        #[arg(long)]
        json: bool,
    },

    /// Print the info line of the region under a key-image pixel.
    ///
    /// Example: `probe 120 45`
    Probe {
        #[arg(allow_negative_numbers = true)]
        x: i64,
        #[arg(allow_negative_numbers = true)]
        y: i64,
    },

    /// Composite the visible map with ownership highlights into a PNG.
    Snapshot {
        /// Output path for the image.
        #[arg(short, long, default_value = "frame.png")]
        output: PathBuf,

        /// Pointer position to report as hovered (`X,Y`).
        #[arg(long, allow_hyphen_values = true)]
        hover: Option<Point>,

        /// Click position to report as selected (`X,Y`).
        #[arg(long, allow_hyphen_values = true)]
        select: Option<Point>,
    },

    /// Render all ownership highlights into a single transparent PNG.
    Overlay {
        /// Output path for the image.
        #[arg(short, long, default_value = "overlay.png")]
        output: PathBuf,
    },

    /// Replay a pointer-event script and print hover/selection after each event.
    ///
    /// Script lines: `move X Y`, `click X Y`, `leave`. `#` starts a comment.
    Replay {
        /// Path to the script file.
        script: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_point() {
        assert_eq!("3,4".parse::<Point>().unwrap(), Point { x: 3, y: 4 });
        assert_eq!(" -1 , 0".parse::<Point>().unwrap(), Point { x: -1, y: 0 });
        assert!("3".parse::<Point>().is_err());
        assert!("a,b".parse::<Point>().is_err());
    }

    #[test]
    fn test_parse_probe_negative() {
        let cli = Cli::try_parse_from(["e4view", "probe", "-5", "2"]).unwrap();
        assert_eq!(cli.command, Some(Commands::Probe { x: -5, y: 2 }));
    }

    #[test]
    fn test_parse_snapshot_points() {
        let cli = Cli::try_parse_from([
            "e4view",
            "--root",
            "maps",
            "snapshot",
            "--hover",
            "1,2",
            "--select",
            "-3,4",
        ])
        .unwrap();
        assert_eq!(cli.root, PathBuf::from("maps"));
        assert_eq!(
            cli.command,
            Some(Commands::Snapshot {
                output: PathBuf::from("frame.png"),
                hover: Some(Point { x: 1, y: 2 }),
                select: Some(Point { x: -3, y: 4 }),
            })
        );
    }

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::try_parse_from(["e4view"]).unwrap();
        assert_eq!(cli.command, None);
        assert_eq!(cli.log_level, "info");
    }
}
