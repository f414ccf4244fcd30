//! Panel - the composite control
//!
//! A panel owns the children list, the per-frame alignment algorithm, and
//! the ordered render/input chains. Every other composite (buttons, scroll
//! containers) embeds a panel and layers behavior on top of it through an
//! [`InteractionPolicy`].

use crate::color::Color;
use crate::error::ControlTreeError;
use crate::event::{FrameContext, PointerEvent};
use crate::geometry::{ContentAlign, Margin, Orientation, Rect, Vec2};
use crate::surface::DrawSurface;
use crate::transition::Interpolate;

use super::{same_control, Composite, Control, ControlBase, ControlRef};

/// Per-variant interaction hooks layered over a panel.
///
/// Defaults implement the plain hover/press state machine; variants
/// override only the transitions they change. Hooks run inside the panel's
/// render/input routines, so they must not restructure the panel's own
/// children list.
pub trait InteractionPolicy {
    /// Pointer is over the control (and the parent chain is hovering)
    fn on_hover(&mut self, panel: &mut Panel) {
        hover_visuals(panel);
    }

    /// Pointer left the bounds, or an ancestor stopped hovering
    fn on_leave(&mut self, panel: &mut Panel) {
        leave_visuals(panel);
    }

    /// Pointer-down landed while hovering
    fn on_clicked(&mut self, panel: &mut Panel) {
        panel.base.is_pressed = true;
    }

    /// Re-invoked every render frame while the control stays pressed
    fn on_pressed(&mut self, _panel: &mut Panel) {}

    /// Pointer-up arrived while pressed
    fn on_released(&mut self, panel: &mut Panel) {
        panel.base.is_pressed = false;
    }

    /// Runs once per render frame, after the hover/pressed hooks and
    /// before the children are aligned
    fn on_frame(&mut self, _panel: &mut Panel) {}

    /// Extra event handling after click/release detection and before the
    /// event is forwarded to children
    fn on_event(&mut self, _panel: &mut Panel, _event: &PointerEvent) {}

    /// The alignment hook: maps the computed layout offset for the child
    /// at `index` to a replacement offset. Scroll composition subtracts
    /// its displacement here without touching the base algorithm.
    fn align_offset(&mut self, _panel: &Panel, offset: Vec2, _index: usize) -> Vec2 {
        offset
    }
}

/// The stateless default policy used by a bare panel
#[derive(Debug, Default)]
pub struct DefaultInteraction;

impl InteractionPolicy for DefaultInteraction {}

/// Default hover visuals: promote the layer and converge on the hover style
pub fn hover_visuals(panel: &mut Panel) {
    panel.base.is_hovering = true;
    panel.base.render_layer = 1;
    panel.transition_color_to(panel.hover_color, panel.animation_speed);
    panel.transition_scale_to(panel.hover_scale, panel.animation_speed);
}

/// Default leave visuals: demote the layer and converge back on the base style
pub fn leave_visuals(panel: &mut Panel) {
    panel.base.is_hovering = false;
    panel.base.render_layer = 0;
    panel.transition_color_to(panel.color, panel.animation_speed);
    panel.transition_scale_to(Vec2::ONE, panel.animation_speed);
}

/// Composite control: children list, layout, and paint.
pub struct Panel {
    pub base: ControlBase,
    /// Insertion order; doubles as layout order, input order, and z-order
    /// before promotion
    children: Vec<ControlRef>,
    /// Paint order. Starts as insertion order; the promotion pass moves
    /// hovered children to the end so they paint last among siblings.
    render_chain: Vec<ControlRef>,
    pub orientation: Orientation,
    pub content_align: ContentAlign,
    /// Logical fill color; the target the rendered color converges back to
    pub color: Color,
    /// The animated fill actually painted this frame
    render_color: Color,
    pub hover_color: Color,
    pub border_color: Color,
    pub border_radius: Vec2,
    pub border_thickness: f32,
    pub hover_scale: Vec2,
    /// Interpolation factor applied per render call
    pub animation_speed: f32,
    /// When set, transitions snap to their target instead of stepping
    pub animation_disabled: bool,
    /// Clip children to the panel's scaled bounds during paint
    pub clip_children: bool,
}

impl Panel {
    pub fn new(color: Color, width: f32, height: f32) -> Self {
        Self {
            base: ControlBase::new(Vec2::new(width, height), Vec2::ZERO),
            children: Vec::new(),
            render_chain: Vec::new(),
            orientation: Orientation::Vertical,
            content_align: ContentAlign::TopLeft,
            color,
            render_color: color,
            hover_color: color,
            border_color: Color::TRANSPARENT,
            border_radius: Vec2::ZERO,
            border_thickness: 0.0,
            hover_scale: Vec2::ONE,
            animation_speed: 0.05,
            animation_disabled: true,
            clip_children: false,
        }
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.base.position = Vec2::new(x, y);
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.base.margin = margin;
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_content_align(mut self, align: ContentAlign) -> Self {
        self.content_align = align;
        self
    }

    pub fn with_hover_color(mut self, color: Color) -> Self {
        self.hover_color = color;
        self
    }

    pub fn with_hover_scale(mut self, scale: Vec2) -> Self {
        self.hover_scale = scale;
        self
    }

    pub fn with_border(mut self, color: Color, thickness: f32, radius: Vec2) -> Self {
        self.border_color = color;
        self.border_thickness = thickness;
        self.border_radius = radius;
        self
    }

    /// Enable animation with the given per-frame interpolation factor
    pub fn with_animation(mut self, speed: f32) -> Self {
        self.animation_speed = speed;
        self.animation_disabled = false;
        self
    }

    pub fn with_clip(mut self) -> Self {
        self.clip_children = true;
        self
    }

    /// The animated fill color painted this frame
    pub fn render_color(&self) -> Color {
        self.render_color
    }

    /// Move the rendered scale one step toward `target`, or snap to it
    /// when animation is disabled
    pub fn transition_scale_to(&mut self, target: Vec2, speed: f32) {
        self.base.scale = if self.animation_disabled {
            target
        } else {
            self.base.scale.step_toward(target, speed)
        };
    }

    /// Move the rendered color one step toward `target`, or snap to it
    /// when animation is disabled
    pub fn transition_color_to(&mut self, target: Color, speed: f32) {
        self.render_color = if self.animation_disabled {
            target
        } else {
            self.render_color.step_toward(target, speed)
        };
    }

    pub(crate) fn insert_child(&mut self, child: ControlRef) {
        self.render_chain.push(child.clone());
        self.children.push(child);
    }

    pub(crate) fn remove_child(&mut self, child: &ControlRef) -> Result<(), ControlTreeError> {
        let index = self
            .children
            .iter()
            .position(|c| same_control(c, child))
            .ok_or(ControlTreeError::NotAttached)?;
        self.children.remove(index);
        self.render_chain.retain(|c| !same_control(c, child));
        Ok(())
    }

    pub(crate) fn take_children(&mut self) -> Vec<ControlRef> {
        self.render_chain.clear();
        std::mem::take(&mut self.children)
    }

    /// One frame with an explicit policy. Order is load-bearing: self
    /// paint precedes the hover update, which precedes the alignment pass,
    /// which precedes the children's paint, which precedes re-promotion.
    pub fn render_with(
        &mut self,
        surface: &mut dyn DrawSurface,
        ctx: &FrameContext,
        policy: &mut dyn InteractionPolicy,
    ) {
        if self.clip_children {
            surface.push_clip(self.base.scaled_bounds());
        }
        self.paint(surface);

        if ctx.parent_hovering && self.base.scaled_bounds().contains(ctx.pointer) {
            policy.on_hover(self);
        } else {
            policy.on_leave(self);
        }
        if self.base.is_pressed {
            policy.on_pressed(self);
        }
        policy.on_frame(self);

        self.align_children(policy);

        let child_ctx = ctx.child(self.base.is_hovering);
        for child in &self.render_chain {
            child.borrow_mut().render(surface, &child_ctx);
        }

        if self.clip_children {
            surface.pop_clip();
        }
        self.promote_hovered();
    }

    /// One pumped event with an explicit policy: click on pointer-down
    /// while hovering, release on pointer-up while pressed, variant event
    /// handling, then forwarding to children in insertion order.
    pub fn input_with(
        &mut self,
        event: &PointerEvent,
        ctx: &FrameContext,
        policy: &mut dyn InteractionPolicy,
    ) {
        match event {
            PointerEvent::Down => {
                if self.base.is_hovering {
                    policy.on_clicked(self);
                }
            }
            PointerEvent::Up => {
                if self.base.is_pressed {
                    policy.on_released(self);
                }
            }
            PointerEvent::Wheel { .. } => {}
        }
        policy.on_event(self, event);

        for child in &self.children {
            child.borrow_mut().input(event, ctx);
        }
    }

    fn paint(&self, surface: &mut dyn DrawSurface) {
        let bounds = self.base.scaled_bounds();
        surface.fill_rounded_rect(bounds, self.border_radius, self.render_color, self.base.opacity);

        if self.border_thickness > 0.0 {
            let t = self.border_thickness;
            let border_rect = Rect::new(
                bounds.x - t / 2.0 + 1.0,
                bounds.y - t / 2.0 + 1.0,
                bounds.width + t - 2.0,
                bounds.height + t - 2.0,
            );
            let border_radii = Vec2::new(
                self.border_radius.x + t / 2.0,
                self.border_radius.y + t / 2.0,
            );
            surface.stroke_rounded_rect(
                border_rect,
                border_radii,
                t,
                self.border_color,
                self.base.opacity,
            );
        }
    }

    /// Total footprint of the children run: the sum of scaled extents plus
    /// both margins along the lay axis, the maximum along the cross axis.
    pub fn children_extent(&self) -> Vec2 {
        let lay = self.orientation.lay_axis();
        let cross = lay.other();
        let mut run = 0.0f32;
        let mut max_cross = 0.0f32;

        for child in &self.children {
            let child = child.borrow();
            let base = child.base();
            let extent = Vec2::new(base.size.x * base.scale.x, base.size.y * base.scale.y);
            run += extent.axis(lay) + base.margin.lead(lay) + base.margin.trail(lay);
            max_cross = max_cross
                .max(extent.axis(cross) + base.margin.lead(cross) + base.margin.trail(cross));
        }

        let mut total = Vec2::ZERO;
        total.set_axis(lay, run);
        total.set_axis(cross, max_cross);
        total
    }

    /// The alignment pass: positions every child for this frame. A pure
    /// function of orientation, anchor, margins, children order, and each
    /// child's own scaled size; running it twice with no state change
    /// yields identical positions.
    fn align_children(&mut self, policy: &mut dyn InteractionPolicy) {
        let lay = self.orientation.lay_axis();
        let cross = lay.other();
        let run = self.children_extent().axis(lay);
        let lay_factor = self.content_align.factor(lay);
        let cross_factor = self.content_align.factor(cross);

        // Lay-axis anchor shifts the whole run; chaining offsets from the
        // previous sibling carries it to every child.
        let mut cursor = lay_factor * (self.base.size.axis(lay) - run);

        for index in 0..self.children.len() {
            let (extent, margin) = {
                let child = self.children[index].borrow();
                let base = child.base();
                (
                    Vec2::new(base.size.x * base.scale.x, base.size.y * base.scale.y),
                    base.margin,
                )
            };

            let lay_offset = if index == 0 {
                cursor
            } else {
                cursor + margin.lead(lay)
            };
            let cross_extent = extent.axis(cross) + margin.lead(cross) + margin.trail(cross);
            let cross_offset = cross_factor * (self.base.size.axis(cross) - cross_extent);

            let mut offset = Vec2::ZERO;
            offset.set_axis(lay, lay_offset);
            offset.set_axis(cross, cross_offset);
            offset = policy.align_offset(self, offset, index);

            cursor = offset.axis(lay) + extent.axis(lay) + margin.trail(lay);

            self.children[index].borrow_mut().base_mut().position = Vec2::new(
                self.base.position.x + self.base.margin.left + offset.x,
                self.base.position.y + self.base.margin.top + offset.y,
            );
        }
    }

    /// Keep hovered children on top: move every child on the promoted
    /// layer to the end of the render chain, preserving their relative
    /// order.
    fn promote_hovered(&mut self) {
        let mut promoted = Vec::new();
        self.render_chain.retain(|child| {
            if child.borrow().base().render_layer == 1 {
                promoted.push(child.clone());
                false
            } else {
                true
            }
        });
        self.render_chain.extend(promoted);
    }
}

impl Control for Panel {
    fn base(&self) -> &ControlBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ControlBase {
        &mut self.base
    }

    fn render(&mut self, surface: &mut dyn DrawSurface, ctx: &FrameContext) {
        let mut policy = DefaultInteraction;
        self.render_with(surface, ctx, &mut policy);
    }

    fn input(&mut self, event: &PointerEvent, ctx: &FrameContext) {
        let mut policy = DefaultInteraction;
        self.input_with(event, ctx, &mut policy);
    }

    fn children(&self) -> &[ControlRef] {
        &self.children
    }
}

impl Composite for Panel {
    fn panel(&self) -> &Panel {
        self
    }

    fn panel_mut(&mut self) -> &mut Panel {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Palette;
    use crate::control::{attach, detach, shared};
    use crate::error::ControlTreeError;
    use crate::surface::{DrawOp, RecordingSurface};

    fn far_away() -> FrameContext {
        FrameContext::root(Vec2::new(-1000.0, -1000.0))
    }

    #[test]
    fn test_margin_packing_along_lay_axis() {
        let parent = shared(
            Panel::new(Color::WHITE, 600.0, 300.0).with_margin(Margin::all(5.0)),
        );
        let a = shared(
            Panel::new(Color::GREY, 100.0, 50.0).with_margin(Margin::new(5.0, 5.0, 7.0, 5.0)),
        );
        let b = shared(
            Panel::new(Color::BLACK, 80.0, 40.0).with_margin(Margin::new(3.0, 5.0, 5.0, 5.0)),
        );
        attach(&parent, a.clone() as ControlRef).unwrap();
        attach(&parent, b.clone() as ControlRef).unwrap();

        let mut surface = RecordingSurface::new();
        parent.borrow_mut().render(&mut surface, &far_away());

        let a_pos = a.borrow().base.position;
        let b_pos = b.borrow().base.position;
        // B packs after A: trailing edge + A's right margin + B's left margin
        assert_eq!(b_pos.x, a_pos.x + 100.0 + 7.0 + 3.0);
        // cross axis untouched by a TopLeft anchor
        assert_eq!(a_pos.y, b_pos.y);
    }

    #[test]
    fn test_layout_is_idempotent() {
        let parent = shared(
            Panel::new(Color::WHITE, 400.0, 200.0).with_content_align(ContentAlign::Center),
        );
        let a = shared(Panel::new(Color::GREY, 60.0, 40.0));
        let b = shared(Panel::new(Color::BLACK, 90.0, 30.0));
        attach(&parent, a.clone() as ControlRef).unwrap();
        attach(&parent, b.clone() as ControlRef).unwrap();

        let mut surface = RecordingSurface::new();
        parent.borrow_mut().render(&mut surface, &far_away());
        let first = (a.borrow().base.position, b.borrow().base.position);

        parent.borrow_mut().render(&mut surface, &far_away());
        let second = (a.borrow().base.position, b.borrow().base.position);

        assert_eq!(first, second);
    }

    #[test]
    fn test_content_align_center_and_bottom() {
        let parent = shared(
            Panel::new(Color::WHITE, 200.0, 100.0)
                .with_margin(Margin::all(0.0))
                .with_content_align(ContentAlign::Center),
        );
        let child = shared(Panel::new(Color::GREY, 50.0, 30.0).with_margin(Margin::all(0.0)));
        attach(&parent, child.clone() as ControlRef).unwrap();

        let mut surface = RecordingSurface::new();
        parent.borrow_mut().render(&mut surface, &far_away());
        let pos = child.borrow().base.position;
        assert_eq!(pos, Vec2::new(75.0, 35.0));

        parent.borrow_mut().content_align = ContentAlign::BottomLeft;
        parent.borrow_mut().render(&mut surface, &far_away());
        let pos = child.borrow().base.position;
        assert_eq!(pos, Vec2::new(0.0, 70.0));
    }

    #[test]
    fn test_hover_enters_and_leaves() {
        let palette = Palette::default();
        let mut panel = Panel::new(palette.muek, 200.0, 200.0)
            .with_hover_color(palette.light_muek)
            .with_animation(0.1);
        let mut surface = RecordingSurface::new();

        // margin 5 puts the bounds at (5,5)-(205,205)
        panel.render(&mut surface, &FrameContext::root(Vec2::new(100.0, 100.0)));
        assert!(panel.base.is_hovering);
        assert_eq!(panel.base.render_layer, 1);
        // rendered color moved strictly toward the hover color
        let moved = panel.render_color();
        assert!(moved.r > palette.muek.r && moved.r <= palette.light_muek.r);

        panel.render(&mut surface, &far_away());
        assert!(!panel.base.is_hovering);
        assert_eq!(panel.base.render_layer, 0);
    }

    #[test]
    fn test_child_inside_non_hovering_parent_never_hovers() {
        // child sticks far out of its 40x40 parent
        let parent = shared(Panel::new(Color::WHITE, 40.0, 40.0));
        let child = shared(Panel::new(Color::GREY, 200.0, 200.0));
        attach(&parent, child.clone() as ControlRef).unwrap();

        let mut surface = RecordingSurface::new();
        // inside the child's footprint, outside the parent's
        parent
            .borrow_mut()
            .render(&mut surface, &FrameContext::root(Vec2::new(150.0, 150.0)));
        assert!(!parent.borrow().base.is_hovering);
        assert!(!child.borrow().base.is_hovering);

        // inside both: the gate opens
        parent
            .borrow_mut()
            .render(&mut surface, &FrameContext::root(Vec2::new(20.0, 20.0)));
        assert!(parent.borrow().base.is_hovering);
        assert!(child.borrow().base.is_hovering);
    }

    #[test]
    fn test_hovered_child_paints_last() {
        let parent = shared(Panel::new(Color::WHITE, 300.0, 300.0));
        let a = shared(Panel::new(Color::rgb(1, 1, 1), 50.0, 50.0));
        let b = shared(Panel::new(Color::rgb(2, 2, 2), 50.0, 50.0));
        attach(&parent, a.clone() as ControlRef).unwrap();
        attach(&parent, b.clone() as ControlRef).unwrap();

        // hover A; promotion happens at the end of this frame
        let over_a = FrameContext::root(Vec2::new(20.0, 20.0));
        let mut surface = RecordingSurface::new();
        parent.borrow_mut().render(&mut surface, &over_a);
        assert_eq!(a.borrow().base.render_layer, 1);

        surface.clear();
        parent.borrow_mut().render(&mut surface, &over_a);
        let fills: Vec<Color> = surface
            .ops()
            .iter()
            .filter_map(|op| match op {
                DrawOp::FillRoundedRect { color, .. } => Some(*color),
                _ => None,
            })
            .collect();
        // parent first, then B, then the promoted A last
        assert_eq!(fills, vec![Color::WHITE, Color::rgb(2, 2, 2), Color::rgb(1, 1, 1)]);
        // layout order is untouched by promotion
        assert!(same_control(
            &parent.borrow().children()[0],
            &(a.clone() as ControlRef)
        ));
    }

    #[test]
    fn test_clip_brackets_children() {
        let parent = shared(Panel::new(Color::WHITE, 100.0, 100.0).with_clip());
        let child = shared(Panel::new(Color::GREY, 50.0, 50.0));
        attach(&parent, child as ControlRef).unwrap();

        let mut surface = RecordingSurface::new();
        parent.borrow_mut().render(&mut surface, &far_away());

        assert!(matches!(surface.ops()[0], DrawOp::PushClip(_)));
        assert_eq!(*surface.ops().last().unwrap(), DrawOp::PopClip);
    }

    #[test]
    fn test_attach_twice_is_rejected() {
        let first = shared(Panel::new(Color::WHITE, 100.0, 100.0));
        let second = shared(Panel::new(Color::WHITE, 100.0, 100.0));
        let child = shared(Panel::new(Color::GREY, 10.0, 10.0));

        attach(&first, child.clone() as ControlRef).unwrap();
        assert_eq!(
            attach(&second, child.clone() as ControlRef),
            Err(ControlTreeError::AlreadyAttached)
        );

        // detaching frees it for re-attachment
        detach(&first, &(child.clone() as ControlRef)).unwrap();
        attach(&second, child.clone() as ControlRef).unwrap();
        assert!(child.borrow().base.parent().is_some());
    }

    #[test]
    fn test_detach_unknown_child_is_rejected() {
        let parent = shared(Panel::new(Color::WHITE, 100.0, 100.0));
        let stranger = shared(Panel::new(Color::GREY, 10.0, 10.0));
        assert_eq!(
            detach(&parent, &(stranger as ControlRef)),
            Err(ControlTreeError::NotAttached)
        );
    }

    #[test]
    fn test_detached_control_receives_no_frames() {
        let parent = shared(Panel::new(Color::WHITE, 300.0, 300.0));
        let child = shared(Panel::new(Color::rgb(9, 9, 9), 50.0, 50.0));
        attach(&parent, child.clone() as ControlRef).unwrap();
        detach(&parent, &(child.clone() as ControlRef)).unwrap();

        let mut surface = RecordingSurface::new();
        parent.borrow_mut().render(&mut surface, &far_away());
        let painted_child = surface.ops().iter().any(|op| {
            matches!(op, DrawOp::FillRoundedRect { color, .. } if *color == Color::rgb(9, 9, 9))
        });
        assert!(!painted_child);
        assert!(!child.borrow().base.is_attached());
    }

    #[test]
    fn test_disabled_animation_snaps() {
        let mut panel = Panel::new(Color::rgb(10, 10, 10), 100.0, 100.0);
        assert!(panel.animation_disabled);
        panel.transition_color_to(Color::rgb(200, 200, 200), 0.05);
        assert_eq!(panel.render_color(), Color::rgb(200, 200, 200));
        panel.transition_scale_to(Vec2::splat(2.0), 0.05);
        assert_eq!(panel.base.scale, Vec2::splat(2.0));
    }

    #[test]
    fn test_border_skipped_when_thickness_zero() {
        let mut panel = Panel::new(Color::WHITE, 100.0, 100.0);
        let mut surface = RecordingSurface::new();
        panel.render(&mut surface, &far_away());
        assert!(!surface
            .ops()
            .iter()
            .any(|op| matches!(op, DrawOp::StrokeRoundedRect { .. })));
    }
}
