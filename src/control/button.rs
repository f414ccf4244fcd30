//! Button variants
//!
//! A button is a panel plus a policy layering click feedback on the base
//! hover state machine: a snap on click, a press transition held while the
//! pointer is down, and notification callbacks. The toggle variant adds a
//! latched checked state on top of the button policy.

use crate::color::Color;
use crate::event::{FrameContext, PointerEvent};
use crate::geometry::{ContentAlign, Margin, Vec2};
use crate::surface::DrawSurface;

use super::panel::{hover_visuals, leave_visuals, InteractionPolicy, Panel};
use super::{Composite, Control, ControlBase, ControlRef};

/// Notification callback fired by a button
pub type Notify = Box<dyn FnMut()>;

/// Click feedback over the default hover policy.
pub struct ButtonPolicy {
    pub disabled: bool,
    pub pressed_color: Color,
    pub disabled_color: Color,
    /// Snapped to on the down event
    pub clicked_scale: Vec2,
    /// Converged on while held
    pub pressed_scale: Vec2,
    on_click: Vec<Notify>,
    on_release: Vec<Notify>,
}

impl ButtonPolicy {
    fn new(pressed_color: Color) -> Self {
        Self {
            disabled: false,
            pressed_color,
            disabled_color: Color::GREY,
            clicked_scale: Vec2::splat(0.95),
            pressed_scale: Vec2::splat(0.98),
            on_click: Vec::new(),
            on_release: Vec::new(),
        }
    }
}

impl InteractionPolicy for ButtonPolicy {
    fn on_hover(&mut self, panel: &mut Panel) {
        if self.disabled {
            panel.base.is_hovering = false;
            panel.base.render_layer = 0;
            return;
        }
        hover_visuals(panel);
    }

    fn on_leave(&mut self, panel: &mut Panel) {
        if self.disabled {
            panel.base.is_hovering = false;
            panel.base.render_layer = 0;
            panel.transition_scale_to(Vec2::ONE, panel.animation_speed);
            return;
        }
        leave_visuals(panel);
    }

    fn on_clicked(&mut self, panel: &mut Panel) {
        if self.disabled {
            return;
        }
        panel.base.is_pressed = true;
        // immediate feedback; the held transition takes over next frame
        panel.base.scale = self.clicked_scale;
        for notify in &mut self.on_click {
            notify();
        }
    }

    fn on_pressed(&mut self, panel: &mut Panel) {
        panel.transition_color_to(self.pressed_color, panel.animation_speed);
        panel.transition_scale_to(self.pressed_scale, panel.animation_speed);
    }

    fn on_released(&mut self, panel: &mut Panel) {
        panel.base.is_pressed = false;
        panel.transition_color_to(panel.color, panel.animation_speed);
        panel.transition_scale_to(Vec2::ONE, panel.animation_speed);
        for notify in &mut self.on_release {
            notify();
        }
    }

    fn on_frame(&mut self, panel: &mut Panel) {
        if self.disabled {
            panel.transition_color_to(self.disabled_color, panel.animation_speed);
        }
    }
}

/// A clickable panel.
pub struct Button {
    panel: Panel,
    policy: ButtonPolicy,
}

impl Button {
    pub fn new(color: Color, width: f32, height: f32) -> Self {
        let panel = Panel::new(color, width, height)
            .with_border(Color::GREY, 2.0, Vec2::new(4.0, 4.0))
            .with_hover_scale(Vec2::splat(1.05))
            .with_animation(0.1);
        Self {
            panel,
            policy: ButtonPolicy::new(color),
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

    pub fn with_hover_color(mut self, color: Color) -> Self {
        self.panel.hover_color = color;
        self
    }

    pub fn with_pressed_color(mut self, color: Color) -> Self {
        self.policy.pressed_color = color;
        self
    }

    pub fn with_content_align(mut self, align: ContentAlign) -> Self {
        self.panel.content_align = align;
        self
    }

    pub fn disabled(&self) -> bool {
        self.policy.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.policy.disabled = disabled;
    }

    /// Register a callback fired on every accepted down event
    pub fn on_click(&mut self, notify: impl FnMut() + 'static) {
        self.policy.on_click.push(Box::new(notify));
    }

    /// Register a callback fired on every release
    pub fn on_release(&mut self, notify: impl FnMut() + 'static) {
        self.policy.on_release.push(Box::new(notify));
    }
}

impl Control for Button {
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

impl Composite for Button {
    fn panel(&self) -> &Panel {
        &self.panel
    }

    fn panel_mut(&mut self) -> &mut Panel {
        &mut self.panel
    }
}

/// Latched checked state over the button policy.
pub struct TogglePolicy {
    pub button: ButtonPolicy,
    pub checked: bool,
    pub checked_color: Color,
    pub checked_scale: Vec2,
    on_check: Vec<Notify>,
    on_uncheck: Vec<Notify>,
}

impl InteractionPolicy for TogglePolicy {
    fn on_hover(&mut self, panel: &mut Panel) {
        self.button.on_hover(panel);
    }

    fn on_leave(&mut self, panel: &mut Panel) {
        if self.checked {
            // keep the checked visuals; only the hover state clears
            panel.base.is_hovering = false;
            panel.base.render_layer = 0;
            return;
        }
        self.button.on_leave(panel);
    }

    fn on_clicked(&mut self, panel: &mut Panel) {
        if self.button.disabled {
            return;
        }
        self.button.on_clicked(panel);
        self.checked = !self.checked;
        // exactly one notification per accepted click
        let fired = if self.checked {
            &mut self.on_check
        } else {
            &mut self.on_uncheck
        };
        for notify in fired {
            notify();
        }
    }

    fn on_pressed(&mut self, panel: &mut Panel) {
        self.button.on_pressed(panel);
    }

    fn on_released(&mut self, panel: &mut Panel) {
        self.button.on_released(panel);
    }

    fn on_frame(&mut self, panel: &mut Panel) {
        self.button.on_frame(panel);
        if self.checked {
            panel.transition_color_to(self.checked_color, panel.animation_speed);
            panel.transition_scale_to(self.checked_scale, panel.animation_speed);
        }
    }
}

/// A button that latches between checked and unchecked on each click.
pub struct ToggleButton {
    panel: Panel,
    policy: TogglePolicy,
}

impl ToggleButton {
    pub fn new(color: Color, checked_color: Color, width: f32, height: f32) -> Self {
        let panel = Panel::new(color, width, height)
            .with_border(Color::GREY, 2.0, Vec2::new(4.0, 4.0))
            .with_hover_scale(Vec2::splat(1.05))
            .with_animation(0.1);
        Self {
            panel,
            policy: TogglePolicy {
                button: ButtonPolicy::new(color),
                checked: false,
                checked_color,
                checked_scale: Vec2::ONE,
                on_check: Vec::new(),
                on_uncheck: Vec::new(),
            },
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

    pub fn with_hover_color(mut self, color: Color) -> Self {
        self.panel.hover_color = color;
        self
    }

    pub fn checked(&self) -> bool {
        self.policy.checked
    }

    pub fn set_checked(&mut self, checked: bool) {
        self.policy.checked = checked;
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.policy.button.disabled = disabled;
    }

    /// Register a callback fired once each time the state latches on
    pub fn on_check(&mut self, notify: impl FnMut() + 'static) {
        self.policy.on_check.push(Box::new(notify));
    }

    /// Register a callback fired once each time the state latches off
    pub fn on_uncheck(&mut self, notify: impl FnMut() + 'static) {
        self.policy.on_uncheck.push(Box::new(notify));
    }
}

impl Control for ToggleButton {
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

impl Composite for ToggleButton {
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
    use crate::color::Palette;
    use crate::surface::RecordingSurface;
    use std::cell::Cell;
    use std::rc::Rc;

    fn over() -> FrameContext {
        // margin 5 on a button at the origin puts its bounds past (5,5)
        FrameContext::root(Vec2::new(50.0, 50.0))
    }

    fn away() -> FrameContext {
        FrameContext::root(Vec2::new(-1000.0, -1000.0))
    }

    #[test]
    fn test_hover_converges_to_hover_color() {
        let palette = Palette::default();
        let mut button =
            Button::new(palette.muek, 200.0, 200.0).with_hover_color(palette.light_muek);
        let mut surface = RecordingSurface::new();

        let mut previous = palette.muek;
        for _ in 0..200 {
            button.render(&mut surface, &over());
            let current = button.panel().render_color();
            assert!(current.r >= previous.r && current.g >= previous.g);
            previous = current;
        }
        assert_eq!(previous, palette.light_muek);
        assert!((button.base().scale.x - 1.05).abs() < 1e-3);
        assert!((button.base().scale.y - 1.05).abs() < 1e-3);
    }

    #[test]
    fn test_click_fires_once_and_snaps_scale() {
        let palette = Palette::default();
        let mut button = Button::new(palette.muek, 200.0, 200.0);
        let clicks = Rc::new(Cell::new(0));
        let releases = Rc::new(Cell::new(0));
        {
            let clicks = clicks.clone();
            button.on_click(move || clicks.set(clicks.get() + 1));
        }
        {
            let releases = releases.clone();
            button.on_release(move || releases.set(releases.get() + 1));
        }

        let mut surface = RecordingSurface::new();
        button.render(&mut surface, &over());
        assert!(button.base().is_hovering);

        button.input(&PointerEvent::Down, &over());
        assert_eq!(clicks.get(), 1);
        assert!(button.base().is_pressed);
        assert_eq!(button.base().scale, Vec2::splat(0.95));

        // holding across frames never re-fires the click
        button.render(&mut surface, &over());
        button.render(&mut surface, &over());
        assert_eq!(clicks.get(), 1);

        button.input(&PointerEvent::Up, &over());
        assert_eq!(releases.get(), 1);
        assert!(!button.base().is_pressed);
    }

    #[test]
    fn test_disabled_button_ignores_clicks() {
        let palette = Palette::default();
        let mut button = Button::new(palette.muek, 200.0, 200.0);
        button.set_disabled(true);
        let clicks = Rc::new(Cell::new(0));
        {
            let clicks = clicks.clone();
            button.on_click(move || clicks.set(clicks.get() + 1));
        }

        let mut surface = RecordingSurface::new();
        button.render(&mut surface, &over());
        assert!(!button.base().is_hovering);

        button.input(&PointerEvent::Down, &over());
        assert_eq!(clicks.get(), 0);
        assert!(!button.base().is_pressed);

        // frames converge on the disabled color whether hovered or not
        for _ in 0..200 {
            button.render(&mut surface, &away());
        }
        assert_eq!(button.panel().render_color(), Color::GREY);
    }

    #[test]
    fn test_disabling_under_the_pointer_demotes_the_layer() {
        let palette = Palette::default();
        let mut button = Button::new(palette.muek, 200.0, 200.0);
        let mut surface = RecordingSurface::new();

        button.render(&mut surface, &over());
        assert!(button.base().is_hovering);
        assert_eq!(button.base().render_layer, 1);

        // the pointer never moves; disabling alone must demote
        button.set_disabled(true);
        button.render(&mut surface, &over());
        assert!(!button.base().is_hovering);
        assert_eq!(button.base().render_layer, 0);
    }

    #[test]
    fn test_toggle_notifies_exactly_once_per_click() {
        let palette = Palette::default();
        let mut toggle =
            ToggleButton::new(palette.muek_red, palette.dark_muek_red, 200.0, 200.0);
        let checks = Rc::new(Cell::new(0));
        let unchecks = Rc::new(Cell::new(0));
        {
            let checks = checks.clone();
            toggle.on_check(move || checks.set(checks.get() + 1));
        }
        {
            let unchecks = unchecks.clone();
            toggle.on_uncheck(move || unchecks.set(unchecks.get() + 1));
        }

        let mut surface = RecordingSurface::new();
        toggle.render(&mut surface, &over());
        toggle.input(&PointerEvent::Down, &over());
        toggle.input(&PointerEvent::Up, &over());
        assert!(toggle.checked());
        assert_eq!((checks.get(), unchecks.get()), (1, 0));

        // frames while checked never re-notify
        for _ in 0..10 {
            toggle.render(&mut surface, &over());
        }
        assert_eq!((checks.get(), unchecks.get()), (1, 0));

        toggle.input(&PointerEvent::Down, &over());
        toggle.input(&PointerEvent::Up, &over());
        assert!(!toggle.checked());
        assert_eq!((checks.get(), unchecks.get()), (1, 1));
    }

    #[test]
    fn test_checked_toggle_holds_checked_color_off_hover() {
        let palette = Palette::default();
        let mut toggle =
            ToggleButton::new(palette.muek_red, palette.dark_muek_red, 200.0, 200.0);
        toggle.set_checked(true);

        let mut surface = RecordingSurface::new();
        for _ in 0..400 {
            toggle.render(&mut surface, &away());
        }
        assert_eq!(toggle.panel().render_color(), palette.dark_muek_red);
    }
}
