//! The control tree
//!
//! Every widget is a `Control`: a node with position, size, scale, margin,
//! and render/input entry points. Composites own an ordered children list
//! that doubles as layout order and z-order; leaves own none. Controls are
//! shared as `Rc<RefCell<dyn Control>>` so the host keeps a handle to a
//! control after attaching it.

pub mod button;
pub mod panel;
pub mod scroll;
pub mod text;

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::ControlTreeError;
use crate::event::{FrameContext, PointerEvent};
use crate::geometry::{ContentAlign, Margin, Rect, Vec2};
use crate::surface::DrawSurface;

pub use button::{Button, ToggleButton};
pub use panel::{DefaultInteraction, InteractionPolicy, Panel};
pub use scroll::{ScrollBar, ScrollPanel};
pub use text::Text;

/// Shared handle to a control in the tree
pub type ControlRef = Rc<RefCell<dyn Control>>;
/// Non-owning handle; the parent back-reference
pub type ControlWeak = Weak<RefCell<dyn Control>>;

/// Wrap a control in a shared handle
pub fn shared<T: Control + 'static>(control: T) -> Rc<RefCell<T>> {
    Rc::new(RefCell::new(control))
}

/// Where a control currently lives.
#[derive(Clone, Default)]
enum Attachment {
    #[default]
    Detached,
    /// Attached directly to the root tree
    Root,
    /// Attached to a parent control
    Parent(ControlWeak),
}

/// State shared by every control variant.
pub struct ControlBase {
    /// Top-left anchor, in resolved absolute coordinates. Recomputed for
    /// children by the parent's alignment pass every frame.
    pub position: Vec2,
    /// Unscaled footprint
    pub size: Vec2,
    /// Multiplies the visual footprint around its center; never changes `size`
    pub scale: Vec2,
    /// Spacing consumed by the parent's layout, never by self-painting
    pub margin: Margin,
    /// 0..=255
    pub opacity: u8,
    /// 0 = normal, 1 = promoted (drawn last among siblings)
    pub render_layer: i32,
    pub is_hovering: bool,
    pub is_pressed: bool,
    attachment: Attachment,
}

impl Default for ControlBase {
    fn default() -> Self {
        Self::new(Vec2::ZERO, Vec2::ZERO)
    }
}

impl ControlBase {
    pub fn new(size: Vec2, position: Vec2) -> Self {
        Self {
            position,
            size,
            scale: Vec2::ONE,
            margin: Margin::default(),
            opacity: 255,
            render_layer: 0,
            is_hovering: false,
            is_pressed: false,
            attachment: Attachment::Detached,
        }
    }

    /// The visual bounds: footprint `size * scale` centered on the unscaled
    /// footprint and shifted by the leading margins. Painting and hover
    /// testing both use this rect.
    pub fn scaled_bounds(&self) -> Rect {
        Rect::new(
            self.position.x - self.size.x * (self.scale.x - 1.0) / 2.0 + self.margin.left,
            self.position.y - self.size.y * (self.scale.y - 1.0) / 2.0 + self.margin.top,
            self.size.x * self.scale.x,
            self.size.y * self.scale.y,
        )
    }

    /// The parent control, if attached to one and it is still alive
    pub fn parent(&self) -> Option<ControlRef> {
        match &self.attachment {
            Attachment::Parent(weak) => weak.upgrade(),
            _ => None,
        }
    }

    /// Whether this control currently lives in a tree (root or parent)
    pub fn is_attached(&self) -> bool {
        match &self.attachment {
            Attachment::Detached => false,
            Attachment::Root => true,
            Attachment::Parent(weak) => weak.strong_count() > 0,
        }
    }

    fn set_attachment(&mut self, attachment: Attachment) {
        self.attachment = attachment;
    }
}

/// A node in the widget tree.
pub trait Control {
    fn base(&self) -> &ControlBase;
    fn base_mut(&mut self) -> &mut ControlBase;

    /// One frame: paint self, update interaction state, lay out and paint
    /// children. Must complete synchronously.
    fn render(&mut self, surface: &mut dyn DrawSurface, ctx: &FrameContext);

    /// One pumped event: detect click/release, then forward to children.
    fn input(&mut self, event: &PointerEvent, ctx: &FrameContext);

    /// Children in insertion order; empty for leaves
    fn children(&self) -> &[ControlRef] {
        &[]
    }
}

/// A control that owns children through an embedded [`Panel`].
pub trait Composite: Control {
    fn panel(&self) -> &Panel;
    fn panel_mut(&mut self) -> &mut Panel;
}

/// Identity comparison between shared control handles
pub(crate) fn same_control(a: &ControlRef, b: &ControlRef) -> bool {
    std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// Attach `child` to `parent`, appending it to the children list and the
/// render chain and setting the back-reference. Fails with
/// `AlreadyAttached` when the child already lives somewhere; detach it
/// first. Must not be called while `parent` is mid-traversal.
pub fn attach<P>(parent: &Rc<RefCell<P>>, child: ControlRef) -> Result<(), ControlTreeError>
where
    P: Composite + 'static,
{
    if child.borrow().base().is_attached() {
        return Err(ControlTreeError::AlreadyAttached);
    }
    let anchor: ControlRef = Rc::clone(parent) as ControlRef;
    if same_control(&anchor, &child) {
        return Err(ControlTreeError::AlreadyAttached);
    }

    child
        .borrow_mut()
        .base_mut()
        .set_attachment(Attachment::Parent(Rc::downgrade(&anchor)));
    parent.borrow_mut().panel_mut().insert_child(child);
    crate::log!(
        "attach: parent now has {} children",
        parent.borrow().children().len()
    );
    Ok(())
}

/// Detach `child` from `parent`, removing it from the children list and the
/// render chain and clearing the back-reference. The control keeps its
/// state and can be re-attached. Fails with `NotAttached` when the child is
/// not in this parent's list.
pub fn detach<P>(parent: &Rc<RefCell<P>>, child: &ControlRef) -> Result<(), ControlTreeError>
where
    P: Composite + 'static,
{
    parent.borrow_mut().panel_mut().remove_child(child)?;
    child
        .borrow_mut()
        .base_mut()
        .set_attachment(Attachment::Detached);
    Ok(())
}

/// Detach every child of `parent` in current order
pub fn clear<P>(parent: &Rc<RefCell<P>>)
where
    P: Composite + 'static,
{
    let children = parent.borrow_mut().panel_mut().take_children();
    for child in children {
        child
            .borrow_mut()
            .base_mut()
            .set_attachment(Attachment::Detached);
    }
}

/// Build a centered [`Text`] spanning `parent` and attach it. A text with
/// a negative footprint (the constructor default) inherits the parent's
/// size, so the nine-anchor placement spans the whole parent.
pub fn attach_text<P>(
    parent: &Rc<RefCell<P>>,
    text: Text,
) -> Result<Rc<RefCell<Text>>, ControlTreeError>
where
    P: Composite + 'static,
{
    let mut text = text;
    if text.base().size.x < 0.0 || text.base().size.y < 0.0 {
        text.base_mut().size = parent.borrow().base().size;
        text.text_position = ContentAlign::Center;
    }
    let handle = shared(text);
    attach(parent, handle.clone() as ControlRef)?;
    Ok(handle)
}

pub(crate) fn set_root_attachment(control: &ControlRef, at_root: bool) {
    control.borrow_mut().base_mut().set_attachment(if at_root {
        Attachment::Root
    } else {
        Attachment::Detached
    });
}
