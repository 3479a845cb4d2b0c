use crate::{
    errors::{PhysicsError, Result},
    math::{interval::Interval, point::Point, vector::Vector, FloatNum},
};

use super::Projector;

/// The edge of a polygon that faces a separating normal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContactEdge {
    pub point_a: Point,
    pub point_b: Point,
    /// Vertex with the largest projection onto the normal, one end of the edge.
    pub support_point: Point,
    /// `point_b - point_a`, not normalized.
    pub direction: Vector,
}

/// Convex polygon in world space.
///
/// Vertices may wind either way; the winding is detected once and edge normals
/// always point outward.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<Point>,
    normals: Vec<Vector>,
}

// Σ (x2 - x1)(y2 + y1)
fn winding(vertices: &[Point]) -> FloatNum {
    let n = vertices.len();
    (0..n)
        .map(|i| {
            let p1 = vertices[i];
            let p2 = vertices[(i + 1) % n];
            (p2.x() - p1.x()) * (p2.y() + p1.y())
        })
        .sum()
}

/// Writes the outward unit normal of every edge `i -> i + 1` into `normals`.
pub fn external_normals_into(vertices: &[Point], normals: &mut [Vector]) -> Result<()> {
    if vertices.len() != normals.len() {
        return Err(PhysicsError::EdgeCountMismatch {
            vertices: vertices.len(),
            normals: normals.len(),
        });
    }

    let clockwise = winding(vertices) <= 0.;
    let n = vertices.len();

    for (i, normal) in normals.iter_mut().enumerate() {
        let edge: Vector = (vertices[i], vertices[(i + 1) % n]).into();
        let perpendicular = if clockwise {
            edge.perpendicular_clockwise()
        } else {
            edge.perpendicular_anticlockwise()
        };
        *normal = perpendicular
            .try_normalize()
            .map_err(|_| PhysicsError::DegenerateEdge { index: i })?;
    }

    Ok(())
}

impl Polygon {
    pub fn new(vertices: impl Into<Vec<Point>>) -> Result<Self> {
        let vertices: Vec<Point> = vertices.into();
        if vertices.len() < 3 {
            return Err(PhysicsError::TooFewVertices {
                count: vertices.len(),
            });
        }

        let mut normals = vec![Vector::ZERO; vertices.len()];
        external_normals_into(&vertices, &mut normals)?;

        Ok(Self { vertices, normals })
    }

    /// Axis aligned rectangle, listed clockwise on a y-down canvas.
    pub fn rectangle(min: Point, max: Point) -> Result<Self> {
        Self::new(vec![
            min,
            (max.x(), min.y()).into(),
            max,
            (min.x(), max.y()).into(),
        ])
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn external_normals(&self) -> &[Vector] {
        &self.normals
    }

    /// Index of the vertex with the largest projection onto `normal`, the first
    /// one wins ties.
    pub fn support_index(&self, normal: Vector) -> usize {
        let mut best = 0;
        let mut best_projection = self.vertices[0].to_vector() * normal;
        for (i, vertex) in self.vertices.iter().enumerate().skip(1) {
            let projection = vertex.to_vector() * normal;
            if projection > best_projection {
                best = i;
                best_projection = projection;
            }
        }
        best
    }

    pub fn support_point(&self, normal: Vector) -> Point {
        self.vertices[self.support_index(normal)]
    }

    /// Of the two edges around the support vertex, the one closer to
    /// perpendicular to `separation_normal`.
    pub fn contact_edge(&self, separation_normal: Vector) -> ContactEdge {
        let n = self.vertices.len();
        let index = self.support_index(separation_normal);

        let support = self.vertices[index];
        let prev = self.vertices[(index + n - 1) % n];
        let next = self.vertices[(index + 1) % n];

        // both point toward the support vertex
        let from_prev = (support - prev).normalize();
        let from_next = (support - next).normalize();

        if from_prev * separation_normal <= from_next * separation_normal {
            ContactEdge {
                point_a: prev,
                point_b: support,
                support_point: support,
                direction: support - prev,
            }
        } else {
            ContactEdge {
                point_a: support,
                point_b: next,
                support_point: support,
                direction: next - support,
            }
        }
    }

    /// Mean of the vertices.
    pub fn centroid(&self) -> Point {
        let sum = self
            .vertices
            .iter()
            .fold(Vector::ZERO, |sum, p| sum + p.to_vector());
        (sum / self.vertices.len() as FloatNum).to_point()
    }

    pub fn envelope(&self) -> (Point, Point) {
        let first = self.vertices[0];
        self.vertices
            .iter()
            .skip(1)
            .fold((first, first), |(min, max), p| {
                (
                    (min.x().min(p.x()), min.y().min(p.y())).into(),
                    (max.x().max(p.x()), max.y().max(p.y())).into(),
                )
            })
    }

    pub fn translate(&mut self, offset: Vector) {
        self.vertices.iter_mut().for_each(|p| *p += offset);
    }

    pub fn rotate_about(&mut self, pivot: &Point, delta_angle: FloatNum) {
        if delta_angle == 0. {
            return;
        }
        self.vertices
            .iter_mut()
            .for_each(|p| *p = p.rotate_about(pivot, delta_angle));
        self.normals
            .iter_mut()
            .for_each(|n| *n = n.affine_transformation_rotate(delta_angle));
    }
}

impl Projector for Polygon {
    fn project(&self, axis: Vector) -> Interval {
        let first = self.vertices[0].to_vector() * axis;
        self.vertices
            .iter()
            .skip(1)
            .fold(Interval::new(first, first), |mut interval, p| {
                interval.include(p.to_vector() * axis);
                interval
            })
    }
}
