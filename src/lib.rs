//! Muek - a retained-mode widget toolkit
//!
//! The host owns a [`tree::ControlTree`], attaches controls to it, and
//! drives it with a pointer position, pumped [`event::PointerEvent`]s, and
//! a [`surface::DrawSurface`] once per frame. Everything else (layout,
//! hover and press state, animated transitions, scroll composition) runs
//! inside the tree during that render call.
//!
//! ```no_run
//! use muek::color::Palette;
//! use muek::control::{shared, Button, ControlRef};
//! use muek::geometry::Vec2;
//! use muek::surface::RecordingSurface;
//! use muek::tree::ControlTree;
//!
//! let palette = Palette::default();
//! let mut tree = ControlTree::new();
//! let button = shared(Button::new(palette.muek, 200.0, 200.0)
//!     .with_hover_color(palette.light_muek));
//! tree.add(button.clone() as ControlRef).unwrap();
//!
//! let mut surface = RecordingSurface::new();
//! tree.render(&mut surface, Vec2::new(50.0, 50.0));
//! ```

// Include the log module so the log! macro works
#[macro_use]
pub mod log;

pub mod color;
pub mod config;
pub mod control;
pub mod error;
pub mod event;
pub mod geometry;
pub mod surface;
pub mod transition;
pub mod tree;
