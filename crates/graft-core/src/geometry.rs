//! Geometry value types.

use serde::{Deserialize, Serialize};

/// A point in the parent's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A rectangle relative to the immediate parent's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (x + width).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (y + height).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Zero or negative extent in either axis. Degenerate rects are still
    /// applied by the layout pass; this only drives diagnostics.
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Expand the rect by per-edge amounts (negative values shrink).
    pub fn expanded(&self, left: f64, top: f64, right: f64, bottom: f64) -> Rect {
        Rect::new(
            self.x - left,
            self.y - top,
            self.width + left + right,
            self.height + top + bottom,
        )
    }
}

/// Edge-pinning metadata carried by a node, used by the layout pass to
/// choose constraint anchors. Nodes without authored pinning default to
/// top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Pinning {
    #[serde(default)]
    pub horizontal: HorizontalPin,
    #[serde(default)]
    pub vertical: VerticalPin,
}

impl Pinning {
    pub const fn new(horizontal: HorizontalPin, vertical: VerticalPin) -> Self {
        Self { horizontal, vertical }
    }
}

/// Horizontal pinning of a node inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum HorizontalPin {
    #[default]
    Left,
    Right,
    Center,
    /// Pinned to both edges; width follows the parent.
    LeftRight,
    /// Scales proportionally with the parent.
    Scale,
}

/// Vertical pinning of a node inside its parent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalPin {
    #[default]
    Top,
    Bottom,
    Center,
    /// Pinned to both edges; height follows the parent.
    TopBottom,
    /// Scales proportionally with the parent.
    Scale,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert!(!r.is_degenerate());
    }

    #[test]
    fn degenerate_rects() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_degenerate());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).is_degenerate());
    }

    #[test]
    fn expanded_rect() {
        let r = Rect::new(10.0, 10.0, 80.0, 20.0).expanded(2.0, 1.0, 2.0, 1.0);
        assert_eq!(r, Rect::new(8.0, 9.0, 84.0, 22.0));
    }

    #[test]
    fn pinning_defaults_to_top_left() {
        let pin = Pinning::default();
        assert_eq!(pin.horizontal, HorizontalPin::Left);
        assert_eq!(pin.vertical, VerticalPin::Top);
    }
}
