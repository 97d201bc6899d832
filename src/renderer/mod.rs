//! Render surface abstraction
//!
//! The simulation decides what to draw and when; a [`Surface`] turns those
//! requests into pixels (or, for [`VertexSurface`], into vertex buffers).

pub mod shapes;
pub mod surface;
pub mod vertex;

pub use surface::{Frame, VertexSurface};
pub use vertex::Vertex;

use glam::Vec2;

/// Named colors the game uses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn rgba(self) -> [f32; 4] {
        match self {
            Color::White => vertex::colors::WHITE,
            Color::Black => vertex::colors::BLACK,
        }
    }
}

/// Axis-aligned area touched by a draw call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Bounding box of a set of points
    pub fn bounding(points: &[Vec2]) -> Self {
        let Some(first) = points.first() else {
            return Rect {
                x: 0.0,
                y: 0.0,
                w: 0.0,
                h: 0.0,
            };
        };
        let (min, max) = points
            .iter()
            .fold((*first, *first), |(min, max), p| (min.min(*p), max.max(*p)));
        Rect {
            x: min.x,
            y: min.y,
            w: max.x - min.x,
            h: max.y - min.y,
        }
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }
}

/// Drawing primitives the game needs
pub trait Surface {
    /// Clear the whole surface
    fn fill(&mut self, color: Color) -> Rect;

    /// Circle outline of the given line width
    fn circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) -> Rect;

    /// Closed polygon outline of the given line width
    fn polygon(&mut self, points: &[Vec2], color: Color, width: f32) -> Rect;

    /// Show the finished frame and start a new one
    fn flip(&mut self);
}
