//! Scripted pointer input for driving the picker without a window.
//!
//! One event per line:
//!
//! ```text
//! # comment
//! move 120 45
//! click 120 45
//! leave
//! ```

use anyhow::{Context, Result, bail};
use e4map::{MapSession, Picker};
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEvent {
    Move { x: i64, y: i64 },
    Click { x: i64, y: i64 },
    Leave,
}

/// Parses a replay script. Blank lines and `#` comments are skipped; the
/// first malformed line fails the whole script.
pub fn parse_script(text: &str) -> Result<Vec<PointerEvent>> {
    let mut events = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line_no = index + 1;
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        let event = parse_line(line).with_context(|| format!("line {}: {:?}", line_no, raw))?;
        events.push(event);
    }
    Ok(events)
}

fn parse_line(line: &str) -> Result<PointerEvent> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or("");
    let args: Vec<&str> = words.collect();

    let point = |args: &[&str]| -> Result<(i64, i64)> {
        let [x, y] = args else {
            bail!("expected two coordinates, got {}", args.len());
        };
        let x = x.parse().with_context(|| format!("bad x coordinate {:?}", x))?;
        let y = y.parse().with_context(|| format!("bad y coordinate {:?}", y))?;
        Ok((x, y))
    };

    match verb {
        "move" => {
            let (x, y) = point(&args)?;
            Ok(PointerEvent::Move { x, y })
        }
        "click" => {
            let (x, y) = point(&args)?;
            Ok(PointerEvent::Click { x, y })
        }
        "leave" if args.is_empty() => Ok(PointerEvent::Leave),
        "leave" => bail!("leave takes no arguments"),
        other => bail!("unknown event {:?}", other),
    }
}

/// Feeds `events` through a fresh [`Picker`] and writes the hover and
/// selection lines after each one. `-` marks an empty slot.
pub fn replay(session: &MapSession, events: &[PointerEvent], out: &mut impl Write) -> Result<Picker> {
    let mut picker = Picker::new();
    for event in events {
        match *event {
            PointerEvent::Move { x, y } => {
                picker.hover(session.map(), x, y);
            }
            PointerEvent::Click { x, y } => {
                // A click also moves the pointer there.
                picker.hover(session.map(), x, y);
                picker.click(session.map(), x, y);
            }
            PointerEvent::Leave => {
                picker.leave();
            }
        }
        log::trace!("{:?} -> {:?}", event, picker);

        let frame = picker.frame(session);
        writeln!(out, "hover: {}", frame.hovered.as_deref().unwrap_or("-"))?;
        writeln!(out, "selected: {}", frame.selected.as_deref().unwrap_or("-"))?;
    }
    Ok(picker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use e4map::{DEFAULT_TINT, MetadataFile, PlayerRegistry, RenderOffset, players};
    use image::{Rgba, RgbaImage};
    use serde_json::json;

    fn session() -> MapSession {
        let mut key = RgbaImage::new(3, 1);
        key.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        key.put_pixel(2, 0, Rgba([0, 255, 0, 255]));
        let records: MetadataFile = serde_json::from_value(json!({
            "(255, 0, 0)": { "name": "Redland", "owner": "Player1" },
            "(0, 255, 0)": { "name": "Greenvale" }
        }))
        .unwrap();
        MapSession::assemble(
            &key,
            RgbaImage::new(3, 1),
            &records,
            PlayerRegistry::new(players::default_players()),
            DEFAULT_TINT,
            RenderOffset::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_script() {
        let events = parse_script("# warm up\n\nmove 1 2\n  click -1 0  # off map\nleave\n").unwrap();
        assert_eq!(
            events,
            vec![
                PointerEvent::Move { x: 1, y: 2 },
                PointerEvent::Click { x: -1, y: 0 },
                PointerEvent::Leave,
            ]
        );
    }

    #[test]
    fn test_parse_script_reports_line() {
        let err = parse_script("move 1 2\nhop 3 4\n").unwrap_err();
        assert!(format!("{:#}", err).contains("line 2"));

        assert!(parse_script("move 1\n").is_err());
        assert!(parse_script("click a b\n").is_err());
        assert!(parse_script("leave now\n").is_err());
    }

    #[test]
    fn test_replay_prints_state_after_each_event() {
        let session = session();
        let events = parse_script("move 0 0\nclick 2 0\nmove 1 0\nclick 1 0\nleave\n").unwrap();
        let mut out = Vec::new();
        let picker = replay(&session, &events, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        let red = "Region: Redland, Owner: Player1, Resources: None, TP #: None, Units: None";
        let green = "Region: Greenvale, Owner: Neutral, Resources: None, TP #: None, Units: None";
        assert_eq!(
            lines,
            vec![
                format!("hover: {}", red),
                "selected: -".to_string(),
                format!("hover: {}", green),
                format!("selected: {}", green),
                "hover: -".to_string(),
                format!("selected: {}", green),
                "hover: -".to_string(),
                format!("selected: {}", green),
                "hover: -".to_string(),
                format!("selected: {}", green),
            ]
        );
        assert_eq!(picker.hovered(), None);
        assert!(picker.selected().is_some());
    }
}
