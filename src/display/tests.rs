use std::fs;

use super::fake::RecordingSink;
use super::*;
use crate::config::DisplaySettings;

fn renderer_with(settings: DisplaySettings) -> DisplayRenderer<RecordingSink> {
    DisplayRenderer::new(RecordingSink::default(), &settings, IconSet::glyphs_only(), 7)
}

fn renderer() -> DisplayRenderer<RecordingSink> {
    renderer_with(DisplaySettings::default())
}

fn render_n(r: &mut DisplayRenderer<RecordingSink>, n: usize) {
    for _ in 0..n {
        r.render();
    }
}

#[test]
fn action_overlay_shows_for_exactly_its_duration() {
    let mut r = renderer();
    r.set_action_image(ActionIcon::Cartridge);
    render_n(&mut r, 12);

    let frames = &r.sink().frames;
    for f in &frames[..10] {
        let asset = f.action.as_ref().unwrap();
        assert_eq!(asset.icon, ActionIcon::Cartridge);
    }
    assert!(frames[10].action.is_none());
    assert!(frames[11].action.is_none());
    assert_eq!(r.state().action_ticks, 0);
}

#[test]
fn new_action_restarts_the_countdown() {
    let mut r = renderer();
    r.set_action_image(ActionIcon::Play);
    render_n(&mut r, 8);
    r.set_action_image(ActionIcon::Next);
    render_n(&mut r, 10);
    assert_eq!(r.sink().last().action.as_ref().unwrap().icon, ActionIcon::Next);
    r.render();
    assert!(r.sink().last().action.is_none());
}

#[test]
fn volume_bar_shows_at_boot_and_only_on_change() {
    let mut r = renderer();
    render_n(&mut r, 10);
    assert!(r.sink().frames.iter().all(|f| f.volume_bar.is_some()));
    r.render();
    assert!(r.sink().last().volume_bar.is_none());

    // the control loop reports the same level every tick
    r.set_volume(0.0);
    r.render();
    assert!(r.sink().last().volume_bar.is_none());

    r.set_volume(0.5);
    r.render();
    assert_eq!(r.sink().last().volume_bar, Some(120));
    for _ in 0..9 {
        r.set_volume(0.5);
        r.render();
    }
    assert_eq!(r.sink().last().volume_bar, Some(120));
    r.set_volume(0.5);
    r.render();
    assert!(r.sink().last().volume_bar.is_none());
}

#[test]
fn token_label_lasts_longer_than_icons() {
    let mut r = renderer();
    r.set_token_label("cafebabe");
    render_n(&mut r, 100);
    assert_eq!(r.sink().last().label.as_deref(), Some("cafebabe"));
    r.render();
    assert!(r.sink().last().label.is_none());
}

#[test]
fn scroll_text_moves_left_and_wraps_once_fully_off_screen() {
    let settings = DisplaySettings {
        scroll_start_x: 10,
        scroll_speed: 5,
        glyph_width: 2,
        line_height: 40,
        ..DisplaySettings::default()
    };
    let mut r = renderer_with(settings);
    r.set_scroll_text("abc");
    render_n(&mut r, 5);

    let xs: Vec<i32> = r
        .sink()
        .frames
        .iter()
        .map(|f| f.scroll.as_ref().unwrap().x)
        .collect();
    assert_eq!(xs, vec![5, 0, -5, 10, 5]);
    assert_eq!(r.sink().last().scroll.as_ref().unwrap().y, 100);
}

#[test]
fn setting_scroll_text_restarts_from_the_right() {
    let mut r = renderer();
    r.set_scroll_text("one");
    render_n(&mut r, 4);
    r.set_scroll_text("two");
    r.render();
    let line = r.sink().last().scroll.clone().unwrap();
    assert_eq!(line.text, "two");
    assert_eq!(line.x, 280 - 3);
}

#[test]
fn empty_scroll_text_draws_nothing() {
    let mut r = renderer();
    r.set_scroll_text("");
    r.render();
    assert!(r.sink().last().scroll.is_none());
}

#[test]
fn oversized_glyphs_scroll_without_overflowing() {
    let settings = DisplaySettings {
        glyph_width: 300_000_000,
        ..DisplaySettings::default()
    };
    let mut r = renderer_with(settings);
    r.set_scroll_text("Track 0 by Artist");
    render_n(&mut r, 3);
    assert_eq!(r.sink().last().scroll.as_ref().unwrap().x, 280 - 9);
}

#[test]
fn pause_indicator_needs_advancing_every_tick() {
    let mut r = renderer();
    r.advance_pause_indicator();
    r.render();
    assert_eq!(r.sink().last().pause_indicator, Some(1));
    r.advance_pause_indicator();
    r.render();
    assert_eq!(r.sink().last().pause_indicator, Some(2));
    r.render();
    assert_eq!(r.sink().last().pause_indicator, None);
}

#[test]
fn offline_sink_does_not_stop_rendering() {
    let mut r = renderer();
    r.set_action_image(ActionIcon::Pause);
    r.sink_mut().offline = true;
    render_n(&mut r, 3);
    assert_eq!(r.sink().rejected, 3);
    assert!(r.sink().frames.is_empty());

    r.sink_mut().offline = false;
    r.render();
    assert_eq!(r.sink().frames.len(), 1);
    // timers kept running while the device was away
    assert_eq!(r.state().action_ticks, 6);
}

#[test]
fn warp_field_is_in_motion_from_the_first_frame() {
    let settings = DisplaySettings::default();
    let field = WarpField::new(&settings.background, 240, 240, 1);
    assert_eq!(field.star_count(), 30);
    assert!(field.polygon_count() >= 1);

    let still = WarpField::new(
        &crate::config::BackgroundSettings {
            fast_forward_ticks: 0,
            ..settings.background.clone()
        },
        240,
        240,
        1,
    );
    assert_eq!(still.polygon_count(), 0);
    assert_ne!(field.shapes(Rgb::ACCENT), still.shapes(Rgb::ACCENT));
}

#[test]
fn warp_field_reseed_is_deterministic() {
    let settings = DisplaySettings::default();
    let mut a = WarpField::new(&settings.background, 240, 240, 3);
    let b = WarpField::new(&settings.background, 240, 240, 3);
    assert_eq!(a.shapes(Rgb::ACCENT), b.shapes(Rgb::ACCENT));

    a.step();
    assert_ne!(a.shapes(Rgb::ACCENT), b.shapes(Rgb::ACCENT));
    a.reseed(3);
    assert_eq!(a.shapes(Rgb::ACCENT), b.shapes(Rgb::ACCENT));
}

#[test]
fn warp_field_keeps_stars_near_the_canvas() {
    let settings = DisplaySettings::default();
    let mut field = WarpField::new(&settings.background, 240, 240, 9);
    for _ in 0..500 {
        field.step();
    }
    assert_eq!(field.star_count(), 30);
    for shape in field.shapes(Rgb::ACCENT) {
        match shape {
            Shape::Square { x, y, .. } => {
                assert!((-8.0..=248.0).contains(&x));
                assert!((-8.0..=248.0).contains(&y));
            }
            Shape::Polygon { radius, .. } => assert!(radius <= 240.0 * 1.5),
        }
    }
}

#[test]
fn throttled_field_holds_still_between_steps() {
    let settings = crate::config::BackgroundSettings {
        throttle_frames: 2,
        ..DisplaySettings::default().background
    };
    let mut field = WarpField::new(&settings, 240, 240, 5);
    let first = field.shapes(Rgb::ACCENT);

    field.advance();
    field.advance();
    assert_eq!(field.shapes(Rgb::ACCENT), first);
    field.advance();
    let moved = field.shapes(Rgb::ACCENT);
    assert_ne!(moved, first);
    field.advance();
    assert_eq!(field.shapes(Rgb::ACCENT), moved);
}

#[test]
fn unthrottled_field_moves_every_frame() {
    let settings = DisplaySettings::default();
    let mut field = WarpField::new(&settings.background, 240, 240, 5);
    let first = field.shapes(Rgb::ACCENT);
    field.advance();
    assert_ne!(field.shapes(Rgb::ACCENT), first);
}

#[test]
fn polygon_vertices_lie_on_the_circle() {
    let square = Shape::Polygon {
        cx: 120.0,
        cy: 120.0,
        radius: 10.0,
        rotation: 0.0,
        sides: 4,
        color: Rgb::WHITE,
    };
    let v = square.vertices();
    assert_eq!(v.len(), 4);
    for (x, y) in v {
        let d = ((x - 120.0).powi(2) + (y - 120.0).powi(2)).sqrt();
        assert!((d - 10.0).abs() < 1e-3);
    }
}

#[test]
fn icon_set_resolves_bitmaps_that_exist() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("play.png"), b"png").unwrap();
    let icons = IconSet::resolve(dir.path());
    assert_eq!(
        icons.get(ActionIcon::Play).bitmap.as_deref(),
        Some(dir.path().join("play.png").as_path())
    );
    assert!(icons.get(ActionIcon::Cartridge).bitmap.is_none());
    assert_eq!(icons.get(ActionIcon::Next).icon, ActionIcon::Next);
}

#[test]
fn colors_scale_with_brightness() {
    assert_eq!(Rgb::ACCENT.scaled(0.0), Rgb(0, 0, 0));
    assert_eq!(Rgb::ACCENT.scaled(1.0), Rgb::ACCENT);
    assert_eq!(Rgb::ACCENT.scaled(0.5), Rgb(128, 0, 76));
}

#[test]
fn find_asset_only_returns_existing_files() {
    let dir = tempfile::tempdir().unwrap();
    let backdrop = dir.path().join("stephans_quintet.png");
    assert_eq!(find_asset(backdrop.clone(), "backdrop"), None);
    fs::write(&backdrop, b"png").unwrap();
    assert_eq!(find_asset(backdrop.clone(), "backdrop"), Some(backdrop));
    // a directory is not an asset
    assert_eq!(find_asset(dir.path().to_path_buf(), "backdrop"), None);
}

#[test]
fn frames_carry_backdrop_and_font_under_the_overlays() {
    let mut r = renderer()
        .with_backdrop(Some("images/stephans_quintet.png".into()))
        .with_font(Some("fonts/rainyhearts.ttf".into()));
    r.set_scroll_text("song");
    r.render();
    let frame = r.sink().last();
    assert_eq!(
        frame.backdrop.as_deref(),
        Some(std::path::Path::new("images/stephans_quintet.png"))
    );
    assert_eq!(
        frame.font.as_deref(),
        Some(std::path::Path::new("fonts/rainyhearts.ttf"))
    );

    let plain = {
        let mut r = renderer();
        r.render();
        r.sink().last().clone()
    };
    assert!(plain.backdrop.is_none());
    assert!(plain.font.is_none());
}
