//! Pointer events and the per-frame dispatch context

use crate::geometry::Vec2;

/// A discrete pointer event pumped in by the host loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// Primary pointer button pressed
    Down,
    /// Primary pointer button released
    Up,
    /// Wheel scrolled; deltas are in notches, positive right/up
    Wheel { delta_x: f32, delta_y: f32 },
}

/// Context threaded through one render or input pass.
///
/// `parent_hovering` carries the hover-eligibility gate down the tree: a
/// composite updates its own hover flag first, then rebuilds the context
/// for its children, so a child inside a non-hovering parent can never
/// hover no matter where the pointer is.
#[derive(Clone, Copy, Debug)]
pub struct FrameContext {
    /// Current pointer position in surface coordinates
    pub pointer: Vec2,
    /// Whether the enclosing control is hovering (true at the root)
    pub parent_hovering: bool,
}

impl FrameContext {
    /// Context for top-level controls, which have no parent to gate them
    pub fn root(pointer: Vec2) -> Self {
        Self {
            pointer,
            parent_hovering: true,
        }
    }

    /// Derive the context a composite hands to its children
    pub fn child(&self, parent_hovering: bool) -> Self {
        Self {
            pointer: self.pointer,
            parent_hovering,
        }
    }
}
