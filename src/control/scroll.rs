//! Scroll composition
//!
//! Scrolling never touches the alignment algorithm: a scroll policy maps
//! the offset of the first child during the alignment pass, displacing the
//! whole rigid run because later offsets chain from it. The displacement is
//! `(children_extent - panel.size) * pct / 100` per axis, with the
//! percentage forced to 0 whenever the children underfill the panel.

use crate::color::Color;
use crate::event::{FrameContext, PointerEvent};
use crate::geometry::{Margin, Orientation, Rect, Vec2};
use crate::surface::DrawSurface;

use super::panel::{InteractionPolicy, Panel};
use super::{Composite, Control, ControlBase, ControlRef};

fn clamp_pct(pct: f32) -> f32 {
    pct.clamp(0.0, 100.0)
}

/// Scroll state shared by both variants.
struct ScrollPolicy {
    /// Percent scrolled per axis, always in [0, 100]
    scroll: Vec2,
    /// Wheel-delta multiplier per axis
    speed: Vec2,
    /// When set, wheel input only lands while the panel itself is hovering
    gated: bool,
}

impl ScrollPolicy {
    fn new(gated: bool) -> Self {
        Self {
            scroll: Vec2::ZERO,
            speed: Vec2::splat(10.0),
            gated,
        }
    }
}

impl InteractionPolicy for ScrollPolicy {
    fn align_offset(&mut self, panel: &Panel, offset: Vec2, index: usize) -> Vec2 {
        if index != 0 {
            return offset;
        }
        let extent = panel.children_extent();
        let size = panel.base.size;
        let mut shift = Vec2::ZERO;
        for axis in [crate::geometry::Axis::X, crate::geometry::Axis::Y] {
            let range = extent.axis(axis) - size.axis(axis);
            if range <= 0.0 {
                // nothing to scroll on this axis
                self.scroll.set_axis(axis, 0.0);
            } else {
                shift.set_axis(axis, range * self.scroll.axis(axis) / 100.0);
            }
        }
        offset - shift
    }

    fn on_event(&mut self, panel: &mut Panel, event: &PointerEvent) {
        if let PointerEvent::Wheel { delta_x, delta_y } = event {
            if self.gated && !panel.base.is_hovering {
                return;
            }
            self.scroll.x = clamp_pct(self.scroll.x + delta_x * self.speed.x);
            self.scroll.y = clamp_pct(self.scroll.y - delta_y * self.speed.y);
        }
    }
}

/// A clipping panel whose children scroll under the wheel while hovered.
pub struct ScrollPanel {
    panel: Panel,
    policy: ScrollPolicy,
}

impl ScrollPanel {
    pub fn new(color: Color, width: f32, height: f32) -> Self {
        Self {
            panel: Panel::new(color, width, height).with_clip(),
            policy: ScrollPolicy::new(true),
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.panel.base.position = Vec2::new(x, y);
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.panel.base.margin = margin;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.panel.orientation = orientation;
        self
    }

    pub fn with_scroll_speed(mut self, speed_x: f32, speed_y: f32) -> Self {
        self.policy.speed = Vec2::new(speed_x, speed_y);
        self
    }

    pub fn scroll_x(&self) -> f32 {
        self.policy.scroll.x
    }

    pub fn scroll_y(&self) -> f32 {
        self.policy.scroll.y
    }

    pub fn set_scroll_x(&mut self, pct: f32) {
        self.policy.scroll.x = clamp_pct(pct);
    }

    pub fn set_scroll_y(&mut self, pct: f32) {
        self.policy.scroll.y = clamp_pct(pct);
    }
}

impl Control for ScrollPanel {
    fn base(&self) -> &ControlBase {
        &self.panel.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.panel.base
    }

    fn render(&mut self, surface: &mut dyn DrawSurface, ctx: &FrameContext) {
        self.panel.render_with(surface, ctx, &mut self.policy);
    }

    fn input(&mut self, event: &PointerEvent, ctx: &FrameContext) {
        self.panel.input_with(event, ctx, &mut self.policy);
    }

    fn children(&self) -> &[ControlRef] {
        self.panel.children()
    }
}

impl Composite for ScrollPanel {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }
}

/// A transparent track with a proportional thumb overlay. Wheel input is
/// not gated on hover, so a bar parked beside its content still scrolls.
pub struct ScrollBar {
    panel: Panel,
    policy: ScrollPolicy,
    pub thumb_color: Color,
    /// Thumb never shrinks below this length
    pub min_thumb: f32,
}

impl ScrollBar {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            panel: Panel::new(Color::TRANSPARENT, width, height).with_clip(),
            policy: ScrollPolicy::new(false),
            thumb_color: Color::GREY,
            min_thumb: 16.0,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.panel.base.position = Vec2::new(x, y);
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.panel.base.margin = margin;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.panel.orientation = orientation;
        self
    }

    pub fn with_thumb_color(mut self, color: Color) -> Self {
        self.thumb_color = color;
        self
    }

    pub fn with_scroll_speed(mut self, speed_x: f32, speed_y: f32) -> Self {
        self.policy.speed = Vec2::new(speed_x, speed_y);
        self
    }

    /// Percent scrolled along the lay axis
    pub fn scroll(&self) -> f32 {
        self.policy.scroll.axis(self.panel.orientation.lay_axis())
    }

    pub fn set_scroll(&mut self, pct: f32) {
        let axis = self.panel.orientation.lay_axis();
        self.policy.scroll.set_axis(axis, clamp_pct(pct));
    }

    /// The thumb rect for the current scroll state, if there is overflow
    /// to indicate.
    fn thumb_rect(&self) -> Option<Rect> {
        let axis = self.panel.orientation.lay_axis();
        let track = self.panel.base.scaled_bounds();
        let track_len = match axis {
            crate::geometry::Axis::X => track.width,
            crate::geometry::Axis::Y => track.height,
        };
        let content = self.panel.children_extent().axis(axis);
        if content <= self.panel.base.size.axis(axis) || track_len <= 0.0 {
            return None;
        }

        let visible = self.panel.base.size.axis(axis) / content;
        let len = (track_len * visible).max(self.min_thumb).min(track_len);
        let along = self.policy.scroll.axis(axis) / 100.0 * (track_len - len);

        Some(match axis {
            crate::geometry::Axis::X => Rect::new(track.x + along, track.y, len, track.height),
            crate::geometry::Axis::Y => Rect::new(track.x, track.y + along, track.width, len),
        })
    }
}

impl Control for ScrollBar {
    fn base(&self) -> &ControlBase {
        &self.panel.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.panel.base
    }

    fn render(&mut self, surface: &mut dyn DrawSurface, ctx: &FrameContext) {
        self.panel.render_with(surface, ctx, &mut self.policy);
        // thumb overlays the children
        if let Some(thumb) = self.thumb_rect() {
            surface.fill_rounded_rect(
                thumb,
                self.panel.border_radius,
                self.thumb_color,
                self.panel.base.opacity,
            );
        }
    }

    fn input(&mut self, event: &PointerEvent, ctx: &FrameContext) {
        self.panel.input_with(event, ctx, &mut self.policy);
    }

    fn children(&self) -> &[ControlRef] {
        self.panel.children()
    }
}

impl Composite for ScrollBar {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{attach, shared};
    use crate::surface::{DrawOp, RecordingSurface};

    fn away() -> FrameContext {
        FrameContext::root(Vec2::new(-1000.0, -1000.0))
    }

    fn bare(width: f32, height: f32) -> ControlRef {
        shared(
            Panel::new(Color::BLACK, width, height).with_margin(Margin::all(0.0)),
        ) as ControlRef
    }

    #[test]
    fn test_scroll_percentage_clamps() {
        let mut scroll = ScrollPanel::new(Color::WHITE, 200.0, 200.0);
        scroll.set_scroll_y(150.0);
        assert_eq!(scroll.scroll_y(), 100.0);
        scroll.set_scroll_y(-5.0);
        assert_eq!(scroll.scroll_y(), 0.0);
    }

    #[test]
    fn test_half_scroll_shifts_run_by_half_the_overflow() {
        // 400 of content in a 200 panel at 50 percent: shift is -100
        let scroll = shared(
            ScrollPanel::new(Color::WHITE, 200.0, 200.0).with_margin(Margin::all(0.0)),
        );
        let a = bare(200.0, 50.0);
        let b = bare(200.0, 50.0);
        attach(&scroll, a.clone()).unwrap();
        attach(&scroll, b.clone()).unwrap();
        scroll.borrow_mut().set_scroll_x(50.0);

        let mut surface = RecordingSurface::new();
        scroll.borrow_mut().render(&mut surface, &away());

        assert_eq!(a.borrow().base().position.x, -100.0);
        // the run stays rigid: the second child keeps its packed distance
        assert_eq!(b.borrow().base().position.x, 100.0);
    }

    #[test]
    fn test_underfilled_axis_forces_percentage_to_zero() {
        let scroll = shared(
            ScrollPanel::new(Color::WHITE, 200.0, 200.0).with_margin(Margin::all(0.0)),
        );
        attach(&scroll, bare(100.0, 50.0)).unwrap();
        scroll.borrow_mut().set_scroll_x(80.0);

        let mut surface = RecordingSurface::new();
        scroll.borrow_mut().render(&mut surface, &away());

        assert_eq!(scroll.borrow().scroll_x(), 0.0);
        assert_eq!(
            scroll.borrow().children()[0].borrow().base().position.x,
            0.0
        );
    }

    #[test]
    fn test_wheel_is_gated_on_hover() {
        let mut scroll = ScrollPanel::new(Color::WHITE, 200.0, 200.0);
        let wheel = PointerEvent::Wheel {
            delta_x: 0.0,
            delta_y: -2.0,
        };

        // never rendered as hovering: the wheel is ignored
        scroll.input(&wheel, &away());
        assert_eq!(scroll.scroll_y(), 0.0);

        scroll.base_mut().is_hovering = true;
        scroll.input(&wheel, &away());
        assert_eq!(scroll.scroll_y(), 20.0);
    }

    #[test]
    fn test_bar_wheel_is_not_gated() {
        let mut bar = ScrollBar::new(200.0, 20.0);
        bar.input(
            &PointerEvent::Wheel {
                delta_x: 3.0,
                delta_y: 0.0,
            },
            &away(),
        );
        assert_eq!(bar.policy.scroll.x, 30.0);
    }

    #[test]
    fn test_thumb_is_the_visible_fraction_of_the_track() {
        let bar = shared(
            ScrollBar::new(200.0, 20.0).with_margin(Margin::all(0.0)),
        );
        attach(&bar, bare(400.0, 20.0)).unwrap();
        bar.borrow_mut().set_scroll(50.0);

        let mut surface = RecordingSurface::new();
        bar.borrow_mut().render(&mut surface, &away());

        // half the content is visible: a 100-long thumb, centered
        let thumb = surface.ops().iter().rev().find_map(|op| match op {
            DrawOp::FillRoundedRect { rect, color, .. } if *color == Color::GREY => Some(*rect),
            _ => None,
        });
        assert_eq!(thumb, Some(Rect::new(50.0, 0.0, 100.0, 20.0)));
    }

    #[test]
    fn test_no_thumb_without_overflow() {
        let bar = shared(ScrollBar::new(200.0, 20.0).with_margin(Margin::all(0.0)));
        attach(&bar, bare(100.0, 20.0)).unwrap();

        let mut surface = RecordingSurface::new();
        bar.borrow_mut().render(&mut surface, &away());
        assert!(!surface.ops().iter().any(|op| {
            matches!(op, DrawOp::FillRoundedRect { color, .. } if *color == Color::GREY)
        }));
    }
}
