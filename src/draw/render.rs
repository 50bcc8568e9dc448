//! The drawing sink the engine renders into, and its Cairo implementation.

use super::color::Color;
use super::geometry::{Coordinate, Segment};
use crate::error::ResourceError;

/// Render surface collaborator: clear, draw line segments, present.
///
/// The engine only ever hands finalized segments to a canvas.
pub trait Canvas {
    fn clear(&mut self) -> Result<(), ResourceError>;
    fn draw_segment(&mut self, begin: Coordinate, end: Coordinate) -> Result<(), ResourceError>;
    fn present(&mut self) -> Result<(), ResourceError>;
}

/// Clears the canvas, draws `segments` in order, and presents.
///
/// Insertion order is render order: later segments paint over earlier ones.
pub fn render_history<C: Canvas + ?Sized>(
    canvas: &mut C,
    segments: &[Segment],
) -> Result<(), ResourceError> {
    canvas.clear()?;
    for segment in segments {
        canvas.draw_segment(segment.begin, segment.end)?;
    }
    canvas.present()
}

/// Static colors and line width used by [`CairoCanvas`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub pen: Color,
    pub line_width: f64,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: super::color::WHITE,
            pen: super::color::BLACK,
            line_width: 1.0,
        }
    }
}

/// [`Canvas`] backed by a Cairo context.
///
/// Presenting only flushes Cairo; handing the pixels to the compositor is the
/// backend's job once the canvas is dropped.
pub struct CairoCanvas<'a> {
    ctx: &'a cairo::Context,
    palette: Palette,
}

impl<'a> CairoCanvas<'a> {
    pub fn new(ctx: &'a cairo::Context, palette: Palette) -> Self {
        Self { ctx, palette }
    }
}

impl Canvas for CairoCanvas<'_> {
    fn clear(&mut self) -> Result<(), ResourceError> {
        let bg = self.palette.background;
        self.ctx.set_operator(cairo::Operator::Source);
        self.ctx.set_source_rgba(bg.r, bg.g, bg.b, bg.a);
        let painted = self.ctx.paint();
        self.ctx.set_operator(cairo::Operator::Over);
        painted.map_err(|e| ResourceError::Render(format!("clear failed: {e}")))
    }

    fn draw_segment(&mut self, begin: Coordinate, end: Coordinate) -> Result<(), ResourceError> {
        let pen = self.palette.pen;
        self.ctx.set_source_rgba(pen.r, pen.g, pen.b, pen.a);
        self.ctx.set_line_width(self.palette.line_width);
        self.ctx.set_line_cap(cairo::LineCap::Round);

        // Half-pixel offset keeps 1px lines on pixel centers instead of smearing across two.
        self.ctx.move_to(begin.x as f64 + 0.5, begin.y as f64 + 0.5);
        self.ctx.line_to(end.x as f64 + 0.5, end.y as f64 + 0.5);
        self.ctx
            .stroke()
            .map_err(|e| ResourceError::Render(format!("stroke {begin} -> {end} failed: {e}")))
    }

    fn present(&mut self) -> Result<(), ResourceError> {
        self.ctx.target().flush();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::geometry::SegmentKind;

    #[derive(Default)]
    struct RecordingCanvas {
        ops: Vec<String>,
    }

    impl Canvas for RecordingCanvas {
        fn clear(&mut self) -> Result<(), ResourceError> {
            self.ops.push("clear".into());
            Ok(())
        }

        fn draw_segment(
            &mut self,
            begin: Coordinate,
            end: Coordinate,
        ) -> Result<(), ResourceError> {
            self.ops.push(format!("{begin}-{end}"));
            Ok(())
        }

        fn present(&mut self) -> Result<(), ResourceError> {
            self.ops.push("present".into());
            Ok(())
        }
    }

    #[test]
    fn history_is_drawn_in_order_between_clear_and_present() {
        let segments = [
            Segment::new((0, 0).into(), (5, 0).into(), SegmentKind::Begin),
            Segment::new((5, 0).into(), (5, 5).into(), SegmentKind::Inter),
        ];
        let mut canvas = RecordingCanvas::default();

        render_history(&mut canvas, &segments).unwrap();

        assert_eq!(
            canvas.ops,
            vec!["clear", "(0, 0)-(5, 0)", "(5, 0)-(5, 5)", "present"]
        );
    }

    #[test]
    fn empty_history_still_clears_and_presents() {
        let mut canvas = RecordingCanvas::default();
        render_history(&mut canvas, &[]).unwrap();
        assert_eq!(canvas.ops, vec!["clear", "present"]);
    }
}
