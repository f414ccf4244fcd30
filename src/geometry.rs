//! Geometry value types: vectors, rects, margins, and layout enums

use std::ops::{Add, Mul, Sub};

/// A 2D vector of f32 components.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Create a vector with both components set to `v`
    pub const fn splat(v: f32) -> Self {
        Self { x: v, y: v }
    }

    /// Read the component on the given axis
    pub fn axis(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
        }
    }

    /// Write the component on the given axis
    pub fn set_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::X => self.x = value,
            Axis::Y => self.y = value,
        }
    }
}

impl Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f32> for Vec2 {
    type Output = Vec2;
    fn mul(self, rhs: f32) -> Vec2 {
        Vec2::new(self.x * rhs, self.y * rhs)
    }
}

/// A layout axis. `Orientation` maps onto one of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// The perpendicular axis
    pub fn other(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// An axis-aligned rectangle (top-left origin).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Whether `point` lies strictly inside this rect. Edges are excluded,
    /// so a zero- or negative-size rect contains nothing.
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.x
            && point.x < self.x + self.width
            && point.y > self.y
            && point.y < self.y + self.height
    }
}

/// Outer spacing reserved around a control. Consumed by the parent's
/// layout pass, never by the control's own painting.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self::all(5.0)
    }
}

impl Margin {
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    pub const fn all(v: f32) -> Self {
        Self::new(v, v, v, v)
    }

    /// Margin on the leading side of the given axis (left or top)
    pub fn lead(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.left,
            Axis::Y => self.top,
        }
    }

    /// Margin on the trailing side of the given axis (right or bottom)
    pub fn trail(&self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.right,
            Axis::Y => self.bottom,
        }
    }
}

/// Lay direction for a composite's children.
///
/// The names denote the direction children flow in, not the cross axis:
/// `Vertical` lays children out along X (left to right), `Horizontal`
/// along Y (top to bottom).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

impl Orientation {
    /// The axis children are laid end-to-end along
    pub fn lay_axis(self) -> Axis {
        match self {
            Orientation::Vertical => Axis::X,
            Orientation::Horizontal => Axis::Y,
        }
    }
}

/// One of nine anchors controlling how a composite offsets its run of
/// children: the lay-axis component shifts the whole run, the cross-axis
/// component offsets each child individually.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ContentAlign {
    #[default]
    TopLeft,
    Top,
    TopRight,
    Left,
    Center,
    Right,
    BottomLeft,
    Bottom,
    BottomRight,
}

impl ContentAlign {
    /// Horizontal alignment factor: 0 (left), 0.5 (center), 1 (right)
    pub fn horizontal_factor(self) -> f32 {
        match self {
            ContentAlign::TopLeft | ContentAlign::Left | ContentAlign::BottomLeft => 0.0,
            ContentAlign::Top | ContentAlign::Center | ContentAlign::Bottom => 0.5,
            ContentAlign::TopRight | ContentAlign::Right | ContentAlign::BottomRight => 1.0,
        }
    }

    /// Vertical alignment factor: 0 (top), 0.5 (middle), 1 (bottom)
    pub fn vertical_factor(self) -> f32 {
        match self {
            ContentAlign::TopLeft | ContentAlign::Top | ContentAlign::TopRight => 0.0,
            ContentAlign::Left | ContentAlign::Center | ContentAlign::Right => 0.5,
            ContentAlign::BottomLeft | ContentAlign::Bottom | ContentAlign::BottomRight => 1.0,
        }
    }

    /// Alignment factor along the given axis
    pub fn factor(self, axis: Axis) -> f32 {
        match axis {
            Axis::X => self.horizontal_factor(),
            Axis::Y => self.vertical_factor(),
        }
    }
}
