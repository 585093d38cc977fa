//! Shape generation for 2D primitives
//!
//! Coordinates are screen pixels, origin top-left, y down. A batch can carry
//! a local transform so sprites are drawn in their own box and mirrored.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::Vertex;

/// Translation plus optional horizontal mirror inside a box of `width`
#[derive(Debug, Clone, Copy, PartialEq)]
struct Transform {
    origin: Vec2,
    mirror_width: Option<f32>,
}

impl Transform {
    const IDENTITY: Self = Self {
        origin: Vec2::ZERO,
        mirror_width: None,
    };

    #[inline]
    fn apply(&self, p: Vec2) -> Vec2 {
        let x = match self.mirror_width {
            Some(w) => w - p.x,
            None => p.x,
        };
        self.origin + Vec2::new(x, p.y)
    }
}

/// Accumulates triangles for one frame
#[derive(Debug, Clone)]
pub struct ShapeBatch {
    vertices: Vec<Vertex>,
    transform: Transform,
}

impl Default for ShapeBatch {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            transform: Transform::IDENTITY,
        }
    }

    pub fn with_capacity(vertices: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertices),
            transform: Transform::IDENTITY,
        }
    }

    /// Draw subsequent shapes relative to `origin`, mirrored within `width`
    /// when `flip` is set. Reset with `reset_transform`.
    pub fn set_local(&mut self, origin: Vec2, width: f32, flip: bool) {
        self.transform = Transform {
            origin,
            mirror_width: flip.then_some(width),
        };
    }

    pub fn reset_transform(&mut self) {
        self.transform = Transform::IDENTITY;
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Filled triangle
    pub fn triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        for p in [a, b, c] {
            let p = self.transform.apply(p);
            self.vertices.push(Vertex::new(p.x, p.y, color));
        }
    }

    /// Filled axis-aligned rectangle
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let tl = Vec2::new(x, y);
        let tr = Vec2::new(x + w, y);
        let bl = Vec2::new(x, y + h);
        let br = Vec2::new(x + w, y + h);

        // Two triangles
        self.triangle(tl, bl, tr, color);
        self.triangle(tr, bl, br, color);
    }

    /// Rectangle outline with the line centered on the edge
    pub fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, line: f32, color: [f32; 4]) {
        let half = line / 2.0;
        self.fill_rect(x - half, y - half, w + line, line, color);
        self.fill_rect(x - half, y + h - half, w + line, line, color);
        self.fill_rect(x - half, y + half, line, h - line, color);
        self.fill_rect(x + w - half, y + half, line, h - line, color);
    }

    /// Filled circle as a triangle fan
    pub fn circle(&mut self, center: Vec2, radius: f32, color: [f32; 4], segments: u32) {
        for i in 0..segments {
            let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
            let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

            self.triangle(
                center,
                center + Vec2::new(theta1.cos(), theta1.sin()) * radius,
                center + Vec2::new(theta2.cos(), theta2.sin()) * radius,
                color,
            );
        }
    }

    /// Open polyline of constant width
    pub fn polyline(&mut self, points: &[Vec2], width: f32, color: [f32; 4]) {
        for pair in points.windows(2) {
            let (p1, p2) = (pair[0], pair[1]);
            let dir = (p2 - p1).normalize_or_zero();
            let perp = Vec2::new(-dir.y, dir.x) * (width / 2.0);

            self.triangle(p1 + perp, p1 - perp, p2 + perp, color);
            self.triangle(p2 + perp, p1 - perp, p2 - perp, color);
        }
    }
}

/// Sample a quadratic Bézier curve into `segments + 1` points (at least two)
pub fn quadratic_curve(from: Vec2, control: Vec2, to: Vec2, segments: u32) -> Vec<Vec2> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            from * (u * u) + control * (2.0 * u * t) + to * (t * t)
        })
        .collect()
}
