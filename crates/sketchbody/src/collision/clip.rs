use crate::math::{num::is_same_sign, point::Point, vector::Vector, FloatNum};

// inset so points lying on the plane are kept
const CLIP_EPSILON: FloatNum = 1e-5;

/// At most two points, stored inline.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClipPoints {
    points: [Point; 2],
    count: usize,
}

impl ClipPoints {
    fn push(&mut self, point: Point) {
        if self.count < self.points.len() {
            self.points[self.count] = point;
            self.count += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn as_slice(&self) -> &[Point] {
        &self.points[..self.count]
    }
}

/// Keep the part of segment `a -> b` with `normal · p - offset <= 0`.
///
/// Endpoints on the kept side survive and, when the endpoints straddle the
/// plane, the crossing point is added. Never more than two points.
pub fn clip(a: Point, b: Point, normal: Vector, offset: FloatNum) -> ClipPoints {
    let mut result = ClipPoints::default();

    let d1 = normal * a.to_vector() - offset;
    let d2 = normal * b.to_vector() - offset;

    if d1 <= CLIP_EPSILON {
        result.push(a);
    }
    if d2 <= CLIP_EPSILON {
        result.push(b);
    }

    if !is_same_sign(d1, d2) && d1 != 0. && d2 != 0. {
        let u = d1 / (d1 - d2);
        let crossing = a + (b - a) * u;
        result.push(crossing);
    }

    result
}

#[cfg(test)]
mod tests {
    use rand::Rng;

    use super::*;

    #[test]
    fn test_keeps_inside_points() {
        let kept = clip((0., 0.).into(), (0., 1.).into(), (1., 0.).into(), 1.);
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_straddling_segment_is_cut() {
        let kept = clip((0., 0.).into(), (2., 0.).into(), (1., 0.).into(), 1.);
        assert_eq!(kept.as_slice(), &[Point::new(0., 0.), Point::new(1., 0.)]);
    }

    #[test]
    fn test_outside_segment_is_dropped() {
        let kept = clip((2., 0.).into(), (3., 0.).into(), (1., 0.).into(), 1.);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_never_more_than_two_points() {
        let mut rng = rand::thread_rng();
        for _ in 0..1000 {
            let a = Point::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
            let b = Point::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0));
            let normal = Vector::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0));
            let offset: FloatNum = rng.gen_range(-5.0..5.0);
            assert!(clip(a, b, normal, offset).len() <= 2);
        }
    }
}
