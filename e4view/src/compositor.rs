use e4map::MapSession;
use image::RgbaImage;
use image::imageops;

/// Draws one frame: the visible map with every highlight surface blended on
/// top at its region's offset, in region order. Surfaces are clipped at the
/// map edges.
pub fn compose_frame(session: &MapSession) -> RgbaImage {
    let mut frame = session.visible().clone();
    for item in session.draw_list() {
        imageops::overlay(
            &mut frame,
            item.surface,
            i64::from(item.offset.dx),
            i64::from(item.offset.dy),
        );
    }
    frame
}

#[cfg(test)]
mod tests {
    use super::*;
    use e4map::{DEFAULT_TINT, MetadataFile, PlayerRegistry, RenderOffset, players};
    use image::{Pixel, Rgba};
    use serde_json::json;

    const GROUND: Rgba<u8> = Rgba([40, 40, 40, 255]);

    fn session(offset: RenderOffset) -> MapSession {
        let mut key = RgbaImage::new(3, 1);
        key.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        key.put_pixel(2, 0, Rgba([0, 255, 0, 255]));
        let records: MetadataFile = serde_json::from_value(json!({
            "(255, 0, 0)": { "owner": "Player1" },
            "(0, 255, 0)": { "owner": "" }
        }))
        .unwrap();
        MapSession::assemble(
            &key,
            RgbaImage::from_pixel(3, 1, GROUND),
            &records,
            PlayerRegistry::new(players::default_players()),
            DEFAULT_TINT,
            offset,
        )
        .unwrap()
    }

    fn blended(tint: Rgba<u8>) -> Rgba<u8> {
        let mut p = GROUND;
        p.blend(&tint);
        p
    }

    #[test]
    fn test_compose_blends_owned_regions() {
        let session = session(RenderOffset::new(0, 0));
        let frame = compose_frame(&session);

        assert_eq!(frame.get_pixel(0, 0), &blended(Rgba([0, 255, 0, 128])));
        assert_eq!(frame.get_pixel(1, 0), &GROUND);
        // Empty owner: no highlight at all.
        assert_eq!(frame.get_pixel(2, 0), &GROUND);
    }

    #[test]
    fn test_compose_applies_offset() {
        let session = session(RenderOffset::new(1, 0));
        let frame = compose_frame(&session);

        assert_eq!(frame.get_pixel(0, 0), &GROUND);
        assert_eq!(frame.get_pixel(1, 0), &blended(Rgba([0, 255, 0, 128])));
    }

    #[test]
    fn test_compose_clips_negative_offset() {
        let session = session(RenderOffset::new(-7, 0));
        let frame = compose_frame(&session);
        assert!(frame.pixels().all(|p| p == &GROUND));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let session = session(RenderOffset::new(0, 0));
        assert_eq!(compose_frame(&session), compose_frame(&session));
    }

    #[test]
    fn test_compose_clips_to_smaller_visible_image() {
        let key = RgbaImage::from_pixel(4, 2, Rgba([255, 0, 0, 255]));
        let records: MetadataFile =
            serde_json::from_value(json!({ "(255, 0, 0)": { "owner": "Player1" } })).unwrap();
        let session = MapSession::assemble(
            &key,
            RgbaImage::from_pixel(2, 1, GROUND),
            &records,
            PlayerRegistry::new(players::default_players()),
            DEFAULT_TINT,
            RenderOffset::new(0, 0),
        )
        .unwrap();

        let frame = compose_frame(&session);
        assert_eq!(frame.dimensions(), (2, 1));
        let tinted = blended(Rgba([0, 255, 0, 128]));
        assert!(frame.pixels().all(|p| p == &tinted));
    }
}
