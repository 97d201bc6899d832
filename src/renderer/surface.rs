//! CPU-side surface that records each frame as a vertex buffer
//!
//! A GPU backend uploads [`Frame::as_bytes`] as-is; the headless binary and the
//! tests only look at what was recorded.

use glam::Vec2;

use super::shapes;
use super::vertex::Vertex;
use super::{Color, Rect, Surface};

/// Segments used to approximate a circle of radius 1; scaled with radius
const SEGMENTS_PER_UNIT_RADIUS: f32 = 0.8;
const MIN_SEGMENTS: u32 = 12;
const MAX_SEGMENTS: u32 = 96;

/// One finished frame
#[derive(Debug, Clone, Default)]
pub struct Frame {
    /// Background color, if the frame was cleared
    pub clear: Option<Color>,
    /// Triangle list: background quad first, then everything drawn on top
    pub vertices: Vec<Vertex>,
    /// Number of draw calls that produced `vertices`
    pub draw_calls: usize,
}

impl Frame {
    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Surface that tessellates outlines into triangles
#[derive(Debug, Clone)]
pub struct VertexSurface {
    width: f32,
    height: f32,
    frame: Frame,
    last: Frame,
    frames_presented: u64,
}

impl VertexSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            frame: Frame::default(),
            last: Frame::default(),
            frames_presented: 0,
        }
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    /// Frame recorded so far
    pub fn current(&self) -> &Frame {
        &self.frame
    }

    /// Most recently presented frame
    pub fn last_frame(&self) -> &Frame {
        &self.last
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    fn segments_for(radius: f32) -> u32 {
        ((radius * SEGMENTS_PER_UNIT_RADIUS) as u32).clamp(MIN_SEGMENTS, MAX_SEGMENTS)
    }
}

impl Surface for VertexSurface {
    fn fill(&mut self, color: Color) -> Rect {
        // A clear replaces everything drawn so far
        self.frame.vertices.clear();
        self.frame.vertices.extend_from_slice(&shapes::quad(
            Vec2::ZERO,
            Vec2::new(self.width, self.height),
            color.rgba(),
        ));
        self.frame.clear = Some(color);
        self.frame.draw_calls += 1;
        Rect {
            x: 0.0,
            y: 0.0,
            w: self.width,
            h: self.height,
        }
    }

    fn circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) -> Rect {
        let half = width / 2.0;
        let inner = (radius - half).max(0.0);
        let outer = radius + half;
        self.frame.vertices.extend(shapes::ring(
            center,
            inner,
            outer,
            color.rgba(),
            Self::segments_for(radius),
        ));
        self.frame.draw_calls += 1;
        Rect {
            x: center.x - radius,
            y: center.y - radius,
            w: radius * 2.0,
            h: radius * 2.0,
        }
    }

    fn polygon(&mut self, points: &[Vec2], color: Color, width: f32) -> Rect {
        self.frame
            .vertices
            .extend(shapes::polygon_outline(points, width, color.rgba()));
        self.frame.draw_calls += 1;
        Rect::bounding(points)
    }

    fn flip(&mut self) {
        self.frames_presented += 1;
        self.last = std::mem::take(&mut self.frame);
    }
}
