mod polygon;

use crate::math::{interval::Interval, vector::Vector};

pub use polygon::{external_normals_into, ContactEdge, Polygon};

pub trait Projector {
    /// Range of vertex · axis over the whole shape.
    fn project(&self, axis: Vector) -> Interval;
}

/// Collision geometry of a body. Circles and boxes take their size from the
/// body's bounds, polygons carry their own world space vertices.
#[derive(Clone, Debug)]
pub enum Shape {
    Circle,
    Box,
    Polygon(Polygon),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShapeKind {
    Circle,
    Box,
    Polygon,
}

impl ShapeKind {
    /// Unknown names fall back to a box.
    pub fn from_name(name: &str) -> Self {
        match name {
            "circle" => ShapeKind::Circle,
            "box" | "rectangle" => ShapeKind::Box,
            "polygon" => ShapeKind::Polygon,
            unknown => {
                tracing::warn!(name = unknown, "unknown body type, using box");
                ShapeKind::Box
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShapeKind::Circle => "circle",
            ShapeKind::Box => "box",
            ShapeKind::Polygon => "polygon",
        }
    }
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Circle => ShapeKind::Circle,
            Shape::Box => ShapeKind::Box,
            Shape::Polygon(_) => ShapeKind::Polygon,
        }
    }

    pub fn as_polygon(&self) -> Option<&Polygon> {
        match self {
            Shape::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }
}
