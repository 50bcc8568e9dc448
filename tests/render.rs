use std::time::{Duration, Instant};

use cairo::{Context, Format, ImageSurface};
use trailpen::draw::{CairoCanvas, Canvas, Coordinate, Palette, color};
use trailpen::input::MouseButton;
use trailpen::{SessionSettings, StrokeSession};

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

/// Blue channel of the pixel at (x, y); ARgb32 is stored B, G, R, A in memory
/// on little-endian machines, and for gray pixels all channels are equal.
fn gray_level(surface: &mut ImageSurface, x: usize, y: usize) -> u8 {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    data[y * stride + x * 4]
}

#[test]
fn session_history_is_painted_onto_cairo_surface() {
    let (mut surface, ctx) = surface_with_context(64, 32);
    let now = Instant::now();
    let mut session = StrokeSession::new(SessionSettings::default(), now).unwrap();

    session
        .on_mouse_press(MouseButton::Left, Coordinate::new(4, 10))
        .unwrap();
    session
        .on_tick(now + Duration::from_millis(20), &Coordinate::new(30, 10))
        .unwrap();
    session
        .on_mouse_release(MouseButton::Left, Coordinate::new(60, 10))
        .unwrap();

    {
        let palette = Palette {
            line_width: 3.0,
            ..Palette::default()
        };
        let mut canvas = CairoCanvas::new(&ctx, palette);
        session.redraw(&mut canvas).unwrap();
    }
    drop(ctx);

    assert!(gray_level(&mut surface, 32, 10) < 64, "stroke pixel should be dark");
    assert_eq!(gray_level(&mut surface, 32, 25), 255, "background should be white");
}

#[test]
fn clear_resets_previous_frame() {
    let (mut surface, ctx) = surface_with_context(16, 16);
    {
        let palette = Palette {
            background: color::TRANSPARENT,
            pen: color::WHITE,
            line_width: 4.0,
        };
        let mut canvas = CairoCanvas::new(&ctx, palette);
        canvas
            .draw_segment(Coordinate::new(0, 8), Coordinate::new(15, 8))
            .unwrap();
        canvas.clear().unwrap();
        canvas.present().unwrap();
    }
    drop(ctx);

    let data = surface.data().unwrap();
    assert!(data.iter().all(|byte| *byte == 0));
}
