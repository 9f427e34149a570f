use crate::args::Point;
use crate::compositor::compose_frame;
use anyhow::{Context, Result};
use e4map::highlight::owner_overlay;
use e4map::{MapSession, Picker, Region};
use std::io::Write;
use std::path::Path;

/// Writes one line per region in discovery order, then a summary.
pub fn list_regions(session: &MapSession, json: bool, out: &mut impl Write) -> Result<()> {
    let map = session.map();
    if json {
        let regions: Vec<&Region> = map.iter().map(|(_, region)| region).collect();
        writeln!(out, "{}", serde_json::to_string_pretty(&regions)?)?;
        return Ok(());
    }

    for (_, region) in map.iter() {
        writeln!(
            out,
            "{}\t{}\t{}",
            region.color,
            region.pixels,
            region.display_info()
        )?;
    }
    let (width, height) = map.dimensions();
    let owned = map.iter().filter(|(_, r)| r.is_highlighted()).count();
    writeln!(
        out,
        "{} regions ({} highlighted) on a {}x{} key image",
        map.len(),
        owned,
        width,
        height
    )?;
    Ok(())
}

pub fn probe(session: &MapSession, x: i64, y: i64, out: &mut impl Write) -> Result<()> {
    match session.map().region_at(x, y) {
        Some(region) => writeln!(out, "{}", region.display_info())?,
        None => writeln!(out, "No region at ({}, {})", x, y)?,
    }
    Ok(())
}

/// Composites the frame the picker would draw after the given pointer
/// events and saves it as a PNG.
pub fn snapshot(
    session: &MapSession,
    output: &Path,
    hover: Option<Point>,
    select: Option<Point>,
    out: &mut impl Write,
) -> Result<()> {
    let mut picker = Picker::new();
    if let Some(p) = select {
        picker.click(session.map(), p.x, p.y);
    }
    if let Some(p) = hover {
        picker.hover(session.map(), p.x, p.y);
    }

    let frame = compose_frame(session);
    frame
        .save(output)
        .with_context(|| format!("Failed to write snapshot to {:?}", output))?;
    log::info!("Saved {}x{} frame to {:?}", frame.width(), frame.height(), output);

    let view = picker.frame(session);
    writeln!(out, "hover: {}", view.hovered.as_deref().unwrap_or("-"))?;
    writeln!(out, "selected: {}", view.selected.as_deref().unwrap_or("-"))?;
    Ok(())
}

pub fn overlay(session: &MapSession, output: &Path) -> Result<()> {
    let image = owner_overlay(session.map(), session.players(), session.default_tint());
    image
        .save(output)
        .with_context(|| format!("Failed to write overlay to {:?}", output))?;
    log::info!("Saved owner overlay to {:?}", output);
    Ok(())
}
