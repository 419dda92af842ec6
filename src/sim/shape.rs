//! Shape primitives for containment testing
//!
//! All shapes live in the owning entity's local (object) space, centered
//! at the entity's position. World-space points are translated into local
//! space by the entity before any shape is consulted.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::error::{SimError, finite, finite_vec};

/// Minimum |2*area| for a triangle to count as non-degenerate.
const TRIANGLE_AREA_EPS: f32 = 1e-6;

/// Axis-aligned box in local space. Used both as the footprint of a
/// rectangle and as a fast-reject pre-filter for triangles and composites.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min: Vec2,
    pub max: Vec2,
}

impl BoundingBox {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    /// Tightest box around a set of points.
    pub fn of_points(points: &[Vec2]) -> Self {
        let mut min = points[0];
        let mut max = points[0];
        for p in &points[1..] {
            min = min.min(*p);
            max = max.max(*p);
        }
        Self { min, max }
    }

    /// Closed-interval test on both axes.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.min.x <= point.x
            && point.x <= self.max.x
            && self.min.y <= point.y
            && point.y <= self.max.y
    }

    /// Smallest box covering both inputs.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

/// A circle centered at the local origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    radius: f32,
}

impl Circle {
    pub fn new(radius: f32) -> Result<Self, SimError> {
        finite("circle radius", radius)?;
        if radius <= 0.0 {
            return Err(SimError::OutOfRange {
                what: "circle radius",
                value: radius,
            });
        }
        Ok(Self { radius })
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Boundary-inclusive membership, no square root.
    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        point.length_squared() <= self.radius * self.radius
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::new(Vec2::splat(-self.radius), Vec2::splat(self.radius))
    }
}

/// An axis-aligned rectangle given by two opposite corners (any order).
/// Also realizes axis-aligned squares.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    bbox: BoundingBox,
}

impl Rect {
    pub fn new(corner_a: Vec2, corner_b: Vec2) -> Result<Self, SimError> {
        finite_vec("rect corner", corner_a)?;
        finite_vec("rect corner", corner_b)?;
        if corner_a.x == corner_b.x || corner_a.y == corner_b.y {
            return Err(SimError::DegenerateShape("rectangle with zero extent"));
        }
        Ok(Self {
            bbox: BoundingBox::new(corner_a.min(corner_b), corner_a.max(corner_b)),
        })
    }

    #[inline]
    pub fn contains(&self, point: Vec2) -> bool {
        self.bbox.contains(point)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}

/// A triangle given by three vertices in local space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
    a: Vec2,
    b: Vec2,
    c: Vec2,
    bbox: BoundingBox,
}

impl Triangle {
    /// Rejects triangles whose signed area (via the cross product of two
    /// edges) is zero or near zero: collinear or duplicate vertices.
    pub fn new(a: Vec2, b: Vec2, c: Vec2) -> Result<Self, SimError> {
        finite_vec("triangle vertex", a)?;
        finite_vec("triangle vertex", b)?;
        finite_vec("triangle vertex", c)?;
        let twice_area = (b - a).perp_dot(c - a);
        if twice_area.abs() <= TRIANGLE_AREA_EPS {
            return Err(SimError::DegenerateShape("triangle with near-zero area"));
        }
        Ok(Self {
            a,
            b,
            c,
            bbox: BoundingBox::of_points(&[a, b, c]),
        })
    }

    pub fn vertices(&self) -> (Vec2, Vec2, Vec2) {
        (self.a, self.b, self.c)
    }

    /// Bounding-box fast reject, then barycentric coordinates via dot
    /// products. A denominator of exactly zero means the edge vectors
    /// collapsed to parallel under floating-point rounding; such a
    /// triangle contains nothing.
    pub fn contains(&self, point: Vec2) -> bool {
        if !self.bbox.contains(point) {
            return false;
        }

        let v0 = self.c - self.a;
        let v1 = self.b - self.a;
        let v2 = point - self.a;

        let dot00 = v0.dot(v0);
        let dot01 = v0.dot(v1);
        let dot02 = v0.dot(v2);
        let dot11 = v1.dot(v1);
        let dot12 = v1.dot(v2);

        let denom = dot00 * dot11 - dot01 * dot01;
        if denom == 0.0 {
            return false;
        }

        let u = (dot11 * dot02 - dot01 * dot12) / denom;
        let v = (dot00 * dot12 - dot01 * dot02) / denom;
        u >= 0.0 && v >= 0.0 && u + v <= 1.0
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}

/// A union of arbitrary sub-shapes, e.g. a hexagon built from six
/// triangles fanned around the local origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Composite {
    parts: Vec<Shape>,
    bbox: BoundingBox,
}

impl Composite {
    pub fn new(parts: Vec<Shape>) -> Result<Self, SimError> {
        let Some(first) = parts.first() else {
            return Err(SimError::DegenerateShape("composite with no parts"));
        };
        let bbox = parts[1..]
            .iter()
            .fold(first.bounding_box(), |acc, p| acc.union(&p.bounding_box()));
        Ok(Self { parts, bbox })
    }

    /// A regular hexagon of the given circumradius: six triangles fanned
    /// around the local origin.
    pub fn hexagon(radius: f32) -> Result<Self, SimError> {
        finite("hexagon radius", radius)?;
        if radius <= 0.0 {
            return Err(SimError::OutOfRange {
                what: "hexagon radius",
                value: radius,
            });
        }
        let vertex = |k: i32| {
            let theta = k as f32 * std::f32::consts::FRAC_PI_3;
            Vec2::new(radius * theta.cos(), radius * theta.sin())
        };
        let mut parts = Vec::with_capacity(6);
        for k in 0..6 {
            let tri = Triangle::new(Vec2::ZERO, vertex(k), vertex(k + 1))?;
            parts.push(Shape::Triangle(tri));
        }
        Composite::new(parts)
    }

    pub fn parts(&self) -> &[Shape] {
        &self.parts
    }

    /// Bounding-box reject, then true if any sub-shape contains the point.
    pub fn contains(&self, point: Vec2) -> bool {
        self.bbox.contains(point) && self.parts.iter().any(|p| p.contains(point))
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }
}

/// Closed set of shape variants an entity can wear.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Circle(Circle),
    Rect(Rect),
    Triangle(Triangle),
    Composite(Composite),
}

impl Shape {
    /// Local-space membership test.
    pub fn contains(&self, point: Vec2) -> bool {
        match self {
            Shape::Circle(c) => c.contains(point),
            Shape::Rect(r) => r.contains(point),
            Shape::Triangle(t) => t.contains(point),
            Shape::Composite(c) => c.contains(point),
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        match self {
            Shape::Circle(c) => c.bounding_box(),
            Shape::Rect(r) => r.bounding_box(),
            Shape::Triangle(t) => t.bounding_box(),
            Shape::Composite(c) => c.bounding_box(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_closed_interval() {
        let bbox = BoundingBox::new(Vec2::new(-1.0, -2.0), Vec2::new(3.0, 4.0));
        assert!(bbox.contains(Vec2::new(-1.0, -2.0)));
        assert!(bbox.contains(Vec2::new(3.0, 4.0)));
        assert!(bbox.contains(Vec2::ZERO));
        assert!(!bbox.contains(Vec2::new(3.1, 0.0)));
        assert!(!bbox.contains(Vec2::new(0.0, -2.1)));
    }

    #[test]
    fn test_circle_boundary_inclusive() {
        let circle = Circle::new(5.0).unwrap();
        assert!(circle.contains(Vec2::new(5.0, 0.0)));
        assert!(!circle.contains(Vec2::new(6.0, 0.0)));
        assert!(circle.contains(Vec2::new(3.0, 4.0)));
    }

    #[test]
    fn test_circle_rejects_bad_radius() {
        assert!(matches!(
            Circle::new(0.0),
            Err(SimError::OutOfRange { .. })
        ));
        assert!(matches!(
            Circle::new(-2.0),
            Err(SimError::OutOfRange { .. })
        ));
        assert!(matches!(
            Circle::new(f32::NAN),
            Err(SimError::InvalidValue { .. })
        ));
        assert!(matches!(
            Circle::new(f32::INFINITY),
            Err(SimError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_rect_from_any_corner_order() {
        let rect = Rect::new(Vec2::new(4.0, 3.0), Vec2::new(-4.0, -3.0)).unwrap();
        assert!(rect.contains(Vec2::ZERO));
        assert!(rect.contains(Vec2::new(4.0, 3.0)));
        assert!(!rect.contains(Vec2::new(4.1, 0.0)));
    }

    #[test]
    fn test_rect_rejects_zero_extent() {
        assert!(matches!(
            Rect::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 5.0)),
            Err(SimError::DegenerateShape(_))
        ));
        assert!(matches!(
            Rect::new(Vec2::new(0.0, 2.0), Vec2::new(5.0, 2.0)),
            Err(SimError::DegenerateShape(_))
        ));
    }

    #[test]
    fn test_triangle_rejects_degenerate() {
        // Collinear vertices
        assert!(matches!(
            Triangle::new(Vec2::ZERO, Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)),
            Err(SimError::DegenerateShape(_))
        ));
        // Duplicate vertices
        assert!(matches!(
            Triangle::new(Vec2::ZERO, Vec2::ZERO, Vec2::new(1.0, 0.0)),
            Err(SimError::DegenerateShape(_))
        ));
    }

    #[test]
    fn test_triangle_contains() {
        let tri = Triangle::new(
            Vec2::new(-2.0, -1.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(0.0, 2.0),
        )
        .unwrap();
        assert!(tri.contains(Vec2::ZERO));
        assert!(tri.contains(Vec2::new(0.0, 1.9)));
        assert!(!tri.contains(Vec2::new(1.9, 1.9))); // inside bbox, outside triangle
        assert!(!tri.contains(Vec2::new(5.0, 0.0)));
    }

    #[test]
    fn test_triangle_zero_denominator_reports_not_contained() {
        // Thin triangle with large coordinates: the true area is 2.5 and
        // construction passes, but the tiny y components vanish when the
        // dot products are accumulated in f32, so the barycentric
        // denominator cancels to exactly zero.
        let tri = Triangle::new(
            Vec2::ZERO,
            Vec2::new(10000.0, 0.001),
            Vec2::new(20000.0, 0.0025),
        )
        .unwrap();
        // Collinear-ish point inside the bounding box.
        let p = Vec2::new(15000.0, 0.00175);
        assert!(tri.bounding_box().contains(p));
        assert!(!tri.contains(p));
    }

    #[test]
    fn test_composite_hexagon() {
        let hex = Composite::hexagon(10.0).unwrap();
        assert_eq!(hex.parts().len(), 6);
        assert!(hex.contains(Vec2::ZERO));
        assert!(hex.contains(Vec2::new(9.9, 0.0)));
        // Outside the hexagon but inside its bounding box (near a corner
        // of the box, between two vertices).
        assert!(!hex.contains(Vec2::new(9.0, 8.0)));
        assert!(!hex.contains(Vec2::new(20.0, 0.0)));
    }

    #[test]
    fn test_composite_rejects_empty() {
        assert!(matches!(
            Composite::new(Vec::new()),
            Err(SimError::DegenerateShape(_))
        ));
    }

    #[test]
    fn test_composite_bbox_is_union() {
        let left = Shape::Rect(Rect::new(Vec2::new(-5.0, -1.0), Vec2::new(-3.0, 1.0)).unwrap());
        let right = Shape::Rect(Rect::new(Vec2::new(3.0, -2.0), Vec2::new(5.0, 2.0)).unwrap());
        let comp = Composite::new(vec![left, right]).unwrap();
        assert_eq!(comp.bounding_box().min, Vec2::new(-5.0, -2.0));
        assert_eq!(comp.bounding_box().max, Vec2::new(5.0, 2.0));
        // In the union bbox but in neither part
        assert!(!comp.contains(Vec2::ZERO));
    }
}
