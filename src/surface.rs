//! Drawing backend contract
//!
//! The control tree paints through this narrow trait; rounded-rect
//! primitives, text shaping, and clip regions are the backend's problem.

use crate::color::Color;
use crate::geometry::{Rect, Vec2};

/// Horizontal text alignment relative to the anchor point
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// The drawing operations a backend must provide.
pub trait DrawSurface {
    /// Fill a rounded rectangle. `radii` holds the x/y corner radii.
    fn fill_rounded_rect(&mut self, rect: Rect, radii: Vec2, color: Color, opacity: u8);

    /// Stroke a rounded rectangle outline.
    fn stroke_rounded_rect(
        &mut self,
        rect: Rect,
        radii: Vec2,
        stroke_width: f32,
        color: Color,
        opacity: u8,
    );

    /// Draw a line of shaped text at `anchor` with the given alignment.
    fn draw_text(
        &mut self,
        content: &str,
        anchor: Vec2,
        align: TextAlign,
        font_size: f32,
        color: Color,
        opacity: u8,
    );

    /// Intersect the clip region with `rect`. Paired with `pop_clip`.
    fn push_clip(&mut self, rect: Rect);

    /// Restore the clip region saved by the matching `push_clip`.
    fn pop_clip(&mut self);
}

/// One recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    FillRoundedRect {
        rect: Rect,
        radii: Vec2,
        color: Color,
        opacity: u8,
    },
    StrokeRoundedRect {
        rect: Rect,
        radii: Vec2,
        stroke_width: f32,
        color: Color,
        opacity: u8,
    },
    Text {
        content: String,
        anchor: Vec2,
        align: TextAlign,
        font_size: f32,
        color: Color,
        opacity: u8,
    },
    PushClip(Rect),
    PopClip,
}

/// A surface that records draw calls into a command list instead of
/// rasterizing. Useful for headless hosts that replay the list against a
/// real backend, and for asserting on render output in tests.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    ops: Vec<DrawOp>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// The operations recorded so far, in call order
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Drop all recorded operations
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl DrawSurface for RecordingSurface {
    fn fill_rounded_rect(&mut self, rect: Rect, radii: Vec2, color: Color, opacity: u8) {
        self.ops.push(DrawOp::FillRoundedRect {
            rect,
            radii,
            color,
            opacity,
        });
    }

    fn stroke_rounded_rect(
        &mut self,
        rect: Rect,
        radii: Vec2,
        stroke_width: f32,
        color: Color,
        opacity: u8,
    ) {
        self.ops.push(DrawOp::StrokeRoundedRect {
            rect,
            radii,
            stroke_width,
            color,
            opacity,
        });
    }

    fn draw_text(
        &mut self,
        content: &str,
        anchor: Vec2,
        align: TextAlign,
        font_size: f32,
        color: Color,
        opacity: u8,
    ) {
        self.ops.push(DrawOp::Text {
            content: content.to_string(),
            anchor,
            align,
            font_size,
            color,
            opacity,
        });
    }

    fn push_clip(&mut self, rect: Rect) {
        self.ops.push(DrawOp::PushClip(rect));
    }

    fn pop_clip(&mut self) {
        self.ops.push(DrawOp::PopClip);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_preserves_call_order() {
        let mut surface = RecordingSurface::new();
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);

        surface.push_clip(rect);
        surface.fill_rounded_rect(rect, Vec2::ZERO, Color::WHITE, 255);
        surface.pop_clip();

        assert_eq!(surface.ops().len(), 3);
        assert_eq!(surface.ops()[0], DrawOp::PushClip(rect));
        assert_eq!(surface.ops()[2], DrawOp::PopClip);
    }
}
