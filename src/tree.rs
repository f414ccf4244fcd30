//! The tree root owned by the host
//!
//! The host owns a `ControlTree`, pushes pointer state and pumped events
//! into it, and hands it a surface once per frame. Windowing, event
//! pumping, and presentation stay on the host's side of the line.

use crate::control::{same_control, set_root_attachment, ControlRef};
use crate::error::ControlTreeError;
use crate::event::{FrameContext, PointerEvent};
use crate::geometry::Vec2;
use crate::surface::DrawSurface;

/// Top-level list of controls.
#[derive(Default)]
pub struct ControlTree {
    children: Vec<ControlRef>,
}

impl ControlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a top-level control. Fails with `AlreadyAttached` when the
    /// control already lives in a tree.
    pub fn add(&mut self, control: ControlRef) -> Result<(), ControlTreeError> {
        if control.borrow().base().is_attached() {
            return Err(ControlTreeError::AlreadyAttached);
        }
        set_root_attachment(&control, true);
        self.children.push(control);
        crate::log!("tree: {} top-level controls", self.children.len());
        Ok(())
    }

    /// Remove a top-level control by identity. The control keeps its state
    /// and can be re-added.
    pub fn remove(&mut self, control: &ControlRef) -> Result<(), ControlTreeError> {
        let index = self
            .children
            .iter()
            .position(|c| same_control(c, control))
            .ok_or(ControlTreeError::NotAttached)?;
        let removed = self.children.remove(index);
        set_root_attachment(&removed, false);
        Ok(())
    }

    /// Detach every top-level control in order
    pub fn clear(&mut self) {
        for control in self.children.drain(..) {
            set_root_attachment(&control, false);
        }
    }

    pub fn controls(&self) -> &[ControlRef] {
        &self.children
    }

    /// One render pass over every top-level control
    pub fn render(&mut self, surface: &mut dyn DrawSurface, pointer: Vec2) {
        let ctx = FrameContext::root(pointer);
        for control in &self.children {
            control.borrow_mut().render(surface, &ctx);
        }
    }

    /// One input pass over every top-level control
    pub fn dispatch(&mut self, event: &PointerEvent, pointer: Vec2) {
        let ctx = FrameContext::root(pointer);
        for control in &self.children {
            control.borrow_mut().input(event, &ctx);
        }
    }
}
