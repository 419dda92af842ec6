//! Drawing port
//!
//! The core never draws; it delegates world-space primitives to a sink
//! implemented by the presenter. Calls are side-effecting leaf calls the
//! simulation neither waits on nor interprets.

use glam::Vec2;

use crate::sim::{FrameSnapshot, Shape};

/// Sink for world-space draw primitives.
pub trait DrawSink {
    fn circle(&mut self, center: Vec2, radius: f32);
    fn rect(&mut self, min: Vec2, max: Vec2);
    fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2);
    /// A single point, used for shots.
    fn point(&mut self, pos: Vec2);
}

/// Emit a shape at the given world origin, translating each local-space
/// primitive into world space.
pub fn draw_shape(shape: &Shape, origin: Vec2, sink: &mut dyn DrawSink) {
    match shape {
        Shape::Circle(c) => sink.circle(origin, c.radius()),
        Shape::Rect(r) => {
            let bbox = r.bounding_box();
            sink.rect(bbox.min + origin, bbox.max + origin);
        }
        Shape::Triangle(t) => {
            let (a, b, c) = t.vertices();
            sink.triangle(a + origin, b + origin, c + origin);
        }
        Shape::Composite(comp) => {
            for part in comp.parts() {
                draw_shape(part, origin, sink);
            }
        }
    }
}

/// Present a whole frame snapshot: every entity's shape at its position,
/// then every shot as a point.
pub fn draw_frame(snapshot: &FrameSnapshot, sink: &mut dyn DrawSink) {
    draw_shape(&snapshot.player.shape, snapshot.player.pos, sink);
    for enemy in &snapshot.enemies {
        draw_shape(&enemy.shape, enemy.pos, sink);
    }
    for shot in snapshot.player_shots.iter().chain(&snapshot.enemy_shots) {
        sink.point(shot.pos);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Circle, Composite, Rect, Shape};

    #[derive(Default)]
    struct Recorder {
        circles: Vec<(Vec2, f32)>,
        rects: Vec<(Vec2, Vec2)>,
        triangles: Vec<(Vec2, Vec2, Vec2)>,
        points: Vec<Vec2>,
    }

    impl DrawSink for Recorder {
        fn circle(&mut self, center: Vec2, radius: f32) {
            self.circles.push((center, radius));
        }
        fn rect(&mut self, min: Vec2, max: Vec2) {
            self.rects.push((min, max));
        }
        fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2) {
            self.triangles.push((a, b, c));
        }
        fn point(&mut self, pos: Vec2) {
            self.points.push(pos);
        }
    }

    #[test]
    fn test_circle_drawn_at_world_origin() {
        let shape = Shape::Circle(Circle::new(5.0).unwrap());
        let mut sink = Recorder::default();
        draw_shape(&shape, Vec2::new(100.0, 200.0), &mut sink);
        assert_eq!(sink.circles, vec![(Vec2::new(100.0, 200.0), 5.0)]);
    }

    #[test]
    fn test_rect_corners_translated() {
        let shape = Shape::Rect(Rect::new(Vec2::new(-2.0, -3.0), Vec2::new(2.0, 3.0)).unwrap());
        let mut sink = Recorder::default();
        draw_shape(&shape, Vec2::new(10.0, 10.0), &mut sink);
        assert_eq!(
            sink.rects,
            vec![(Vec2::new(8.0, 7.0), Vec2::new(12.0, 13.0))]
        );
    }

    #[test]
    fn test_composite_delegates_per_part() {
        let shape = Shape::Composite(Composite::hexagon(10.0).unwrap());
        let mut sink = Recorder::default();
        draw_shape(&shape, Vec2::ZERO, &mut sink);
        assert_eq!(sink.triangles.len(), 6);
    }
}
