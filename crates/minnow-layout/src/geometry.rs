//! Viewport geometry used for visibility culling.

use serde::Serialize;

/// A rectangle positioned in document pixel space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Whether two rectangles overlap.
    ///
    /// Edges count: a rectangle that exactly touches another's edge is
    /// treated as intersecting. Culling relies on this so a line box
    /// sitting flush against the viewport border is still drawn.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && other.x <= self.x + self.width
            && self.y <= other.y + other.height
            && other.y <= self.y + self.height
    }
}

/// A viewport described by its center point and size, the way a scrolling
/// window reports its current view.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct View {
    /// Center of the view in document pixel space.
    pub center: (f32, f32),
    /// Width and height of the view.
    pub size: (f32, f32),
}

impl View {
    /// Create a view from its center point and size.
    #[must_use]
    pub fn new(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        View {
            center: (center_x, center_y),
            size: (width, height),
        }
    }

    /// The rectangle covered by this view: `(center - size / 2, size)`.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect {
            x: self.center.0 - self.size.0 / 2.0,
            y: self.center.1 - self.size.1 / 2.0,
            width: self.size.0,
            height: self.size.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect(x: f32, y: f32, width: f32, height: f32) -> Rect {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    #[test]
    fn overlapping_rects_intersect() {
        assert!(rect(0.0, 0.0, 10.0, 10.0).intersects(&rect(5.0, 5.0, 10.0, 10.0)));
    }

    #[test]
    fn disjoint_rects_do_not_intersect() {
        assert!(!rect(0.0, 0.0, 10.0, 10.0).intersects(&rect(20.0, 0.0, 5.0, 5.0)));
        assert!(!rect(0.0, 0.0, 10.0, 10.0).intersects(&rect(0.0, 30.0, 5.0, 5.0)));
    }

    #[test]
    fn edge_touching_counts_as_intersecting() {
        // Right edge of the first rect lands exactly on the left edge of
        // the second.
        assert!(rect(0.0, 0.0, 10.0, 10.0).intersects(&rect(10.0, 0.0, 5.0, 5.0)));
        assert!(rect(0.0, 0.0, 10.0, 10.0).intersects(&rect(0.0, 10.0, 5.0, 5.0)));
    }

    #[test]
    fn view_bounds_derive_from_center_and_size() {
        let view = View::new(100.0, 50.0, 40.0, 20.0);
        assert_eq!(view.bounds(), rect(80.0, 40.0, 40.0, 20.0));
    }
}
