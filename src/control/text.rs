//! Text leaf control
//!
//! A text paints a single shaped line anchored inside its own footprint by
//! a nine-way [`ContentAlign`]. It owns no children and ignores input.

use crate::color::Color;
use crate::event::{FrameContext, PointerEvent};
use crate::geometry::{ContentAlign, Margin, Vec2};
use crate::surface::{DrawSurface, TextAlign};

use super::{Control, ControlBase};

pub struct Text {
    pub base: ControlBase,
    pub content: String,
    pub font_size: f32,
    /// Where the line sits inside the footprint
    pub text_position: ContentAlign,
    pub color: Color,
}

impl Text {
    /// A text with an unresolved footprint. Attaching it through
    /// [`attach_text`](super::attach_text) sizes it to the parent;
    /// otherwise give it a footprint with [`with_size`](Self::with_size).
    pub fn new(content: impl Into<String>) -> Self {
        let mut base = ControlBase::new(Vec2::splat(-1.0), Vec2::ZERO);
        base.margin = Margin::all(0.0);
        Self {
            base,
            content: content.into(),
            font_size: 12.0,
            text_position: ContentAlign::TopLeft,
            color: Color::BLACK,
        }
    }

    pub fn with_font_size(mut self, font_size: f32) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn with_text_position(mut self, position: ContentAlign) -> Self {
        self.text_position = position;
        self
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.base.size = Vec2::new(width, height);
        self
    }

    /// The baseline anchor and alignment for the current footprint.
    /// `scale.x` scales the font; `scale.y` has no effect on text.
    fn anchor(&self) -> (Vec2, TextAlign, f32) {
        let font = self.font_size * self.base.scale.x;
        let pos = self.base.position;
        let size = self.base.size;

        let (x, align) = match self.text_position.horizontal_factor() {
            f if f == 0.5 => (pos.x + size.x / 2.0, TextAlign::Center),
            f if f == 1.0 => (pos.x + size.x, TextAlign::Right),
            _ => (pos.x, TextAlign::Left),
        };
        let correction = match self.text_position.vertical_factor() {
            f if f == 0.5 => size.y / 2.0 - font / 1.5,
            f if f == 1.0 => size.y - font * 1.5,
            _ => 0.0,
        };
        (Vec2::new(x, pos.y + font + correction), align, font)
    }
}

impl Control for Text {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn render(&mut self, surface: &mut dyn DrawSurface, _ctx: &FrameContext) {
        let (anchor, align, font) = self.anchor();
        surface.draw_text(
            &self.content,
            anchor,
            align,
            font,
            self.color,
            self.base.opacity,
        );
    }

    fn input(&mut self, _event: &PointerEvent, _ctx: &FrameContext) {}
}
