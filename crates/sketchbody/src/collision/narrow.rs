//! Narrow phase tests. Each one fills the manifold with a normal pointing from
//! A toward B, the penetration depth, and the contact points.

use crate::{
    math::{
        axis::AxisDirection, interval::Interval, num::limit_at_range, point::Point,
        vector::Vector, FloatNum,
    },
    shape::{Polygon, Projector},
};

use super::{clip::clip, manifold::Manifold};

const DEPTH_EPSILON: FloatNum = 1e-5;

fn sign(value: FloatNum) -> FloatNum {
    if value < 0. {
        -1.
    } else {
        1.
    }
}

pub(crate) fn circle_circle(manifold: &mut Manifold) -> bool {
    let a = *manifold.a();
    let b = *manifold.b();

    let a_to_b = b.position() - a.position();
    let radius = a.radius() + b.radius();
    let distance_squared = a_to_b.abs_squared();

    if distance_squared > radius * radius {
        return false;
    }

    let distance = distance_squared.sqrt();
    let normal = if distance == 0. {
        manifold.set_penetration(a.radius());
        Vector::from(AxisDirection::X)
    } else {
        manifold.set_penetration(radius - distance);
        a_to_b / distance
    };
    manifold.set_normal(normal);
    manifold.push_contact(a.position() + normal * a.radius());
    true
}

pub(crate) fn box_box(manifold: &mut Manifold) -> bool {
    let a = *manifold.a();
    let b = *manifold.b();

    let a_to_b = b.position() - a.position();
    let extents_a = a.half_extents();
    let extents_b = b.half_extents();

    let x_overlap = extents_a.x() + extents_b.x() - a_to_b.x().abs();
    if x_overlap <= 0. {
        return false;
    }
    let y_overlap = extents_a.y() + extents_b.y() - a_to_b.y().abs();
    if y_overlap <= 0. {
        return false;
    }

    let (axis, penetration) = if x_overlap < y_overlap {
        (AxisDirection::X, x_overlap)
    } else {
        (AxisDirection::Y, y_overlap)
    };
    let normal = Vector::from(axis) * sign(axis.component(a_to_b));
    manifold.set_normal(normal);
    manifold.set_penetration(penetration);

    // centre of the overlap rectangle
    let overlap_min: Point = (
        (a.position().x() - extents_a.x()).max(b.position().x() - extents_b.x()),
        (a.position().y() - extents_a.y()).max(b.position().y() - extents_b.y()),
    )
        .into();
    let overlap_max: Point = (
        (a.position().x() + extents_a.x()).min(b.position().x() + extents_b.x()),
        (a.position().y() + extents_a.y()).min(b.position().y() + extents_b.y()),
    )
        .into();
    manifold.push_contact(overlap_min.lerp(&overlap_max, 0.5));
    true
}

/// A is the box, B the circle.
pub(crate) fn box_circle(manifold: &mut Manifold) -> bool {
    let a = *manifold.a();
    let b = *manifold.b();

    let a_to_b = b.position() - a.position();
    let extents = a.half_extents();

    let mut closest: Vector = (
        limit_at_range(a_to_b.x(), -extents.x()..=extents.x()),
        limit_at_range(a_to_b.y(), -extents.y()..=extents.y()),
    )
        .into();

    let mut face = None;
    if closest == a_to_b {
        // centre inside the box, push the closest point to the nearer face
        let axis = if a_to_b.x().abs() > a_to_b.y().abs() {
            AxisDirection::X
        } else {
            AxisDirection::Y
        };
        let face_sign = sign(axis.component(closest));
        match axis {
            AxisDirection::X => closest.set_x(|_| extents.x() * face_sign),
            AxisDirection::Y => closest.set_y(|_| extents.y() * face_sign),
        }
        face = Some(Vector::from(axis) * face_sign);
    }

    let to_centre = a_to_b - closest;
    let distance_squared = to_centre.abs_squared();
    let radius = b.radius();

    if distance_squared > radius * radius && face.is_none() {
        return false;
    }

    let distance = distance_squared.sqrt();
    let normal = match face {
        Some(face) if distance <= FloatNum::EPSILON => face,
        Some(_) => -(to_centre / distance),
        None if distance <= FloatNum::EPSILON => return false,
        None => to_centre / distance,
    };

    manifold.set_normal(normal);
    manifold.set_penetration(radius - distance);
    manifold.push_contact(b.position() - normal * radius);
    true
}

/// A is the circle, B the box.
pub(crate) fn circle_box(manifold: &mut Manifold) -> bool {
    manifold.swap_bodies();
    let is_collision = box_circle(manifold);
    manifold.swap_bodies();
    if is_collision {
        let normal = -manifold.normal();
        manifold.set_normal(normal);
    }
    is_collision
}

pub(crate) fn polygon_polygon(manifold: &mut Manifold, a: &Polygon, b: &Polygon) -> bool {
    let mut min_overlap = FloatNum::MAX;
    let mut separating_axis = Vector::ZERO;

    for &axis in a.external_normals().iter().chain(b.external_normals()) {
        let projection_a = a.project(axis);
        let projection_b = b.project(axis);

        if !projection_a.overlaps(&projection_b) {
            return false;
        }

        let (overlap, axis) = containment_corrected_overlap(projection_a, projection_b, axis);
        if overlap < min_overlap {
            min_overlap = overlap;
            separating_axis = axis;
        }
    }

    let a_to_b = b.centroid() - a.centroid();
    if a_to_b * separating_axis < 0. {
        separating_axis = -separating_axis;
    }

    manifold.set_normal(separating_axis);
    manifold.set_penetration(min_overlap);
    clip_contacts(manifold, a, b, separating_axis)
}

// when one projection contains the other the plain overlap underestimates the
// distance needed to separate them
fn containment_corrected_overlap(
    projection_a: Interval,
    projection_b: Interval,
    axis: Vector,
) -> (FloatNum, Vector) {
    let overlap = projection_a.overlap(&projection_b);

    if projection_a.contains_exclusive(&projection_b)
        || projection_b.contains_exclusive(&projection_a)
    {
        let max = (projection_a.max() - projection_b.max()).abs();
        let min = (projection_a.min() - projection_b.min()).abs();
        if max > min {
            return (overlap + min, -axis);
        } else {
            return (overlap + max, axis);
        }
    }

    (overlap, axis)
}

fn clip_contacts(manifold: &mut Manifold, a: &Polygon, b: &Polygon, normal: Vector) -> bool {
    let edge_a = a.contact_edge(normal);
    let edge_b = b.contact_edge(-normal);

    let (reference, incident, flip) = if (edge_a.direction.normalize() * normal).abs()
        <= (edge_b.direction.normalize() * normal).abs()
    {
        (edge_a, edge_b, false)
    } else {
        (edge_b, edge_a, true)
    };

    let reference_direction = reference.direction.normalize();

    let offset = reference_direction * reference.point_a.to_vector();
    let clipped = clip(
        incident.point_a,
        incident.point_b,
        -reference_direction,
        -offset,
    );
    if clipped.len() < 2 {
        return false;
    }

    let offset = reference_direction * reference.point_b.to_vector();
    let clipped = clip(
        clipped.as_slice()[0],
        clipped.as_slice()[1],
        reference_direction,
        offset,
    );
    if clipped.len() < 2 {
        return false;
    }

    // face normal of the reference edge pointing into its own polygon
    let mut reference_normal = reference_direction.perpendicular_clockwise();
    let inward = if flip { normal } else { -normal };
    if reference_normal * inward < 0. {
        reference_normal = -reference_normal;
    }
    let face_depth = reference_normal * reference.support_point.to_vector();

    manifold.clear_contacts();
    for &point in clipped.as_slice() {
        let depth = reference_normal * point.to_vector() - face_depth;
        if depth >= -DEPTH_EPSILON {
            manifold.push_contact(point);
        }
    }

    manifold.is_colliding()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::manifold::ManifoldBody;

    fn manifold_with(a: ManifoldBody, b: ManifoldBody) -> Manifold {
        let mut manifold = Manifold::default();
        *manifold.a_mut() = a;
        *manifold.b_mut() = b;
        manifold
    }

    fn circle(x: FloatNum, y: FloatNum, radius: FloatNum) -> ManifoldBody {
        ManifoldBody::for_test((x, y).into(), radius, (radius, radius).into())
    }

    fn aabb(x: FloatNum, y: FloatNum, half_width: FloatNum, half_height: FloatNum) -> ManifoldBody {
        ManifoldBody::for_test(
            (x, y).into(),
            half_width.max(half_height),
            (half_width, half_height).into(),
        )
    }

    fn square(cx: FloatNum, cy: FloatNum, half: FloatNum) -> Polygon {
        Polygon::rectangle((cx - half, cy - half).into(), (cx + half, cy + half).into()).unwrap()
    }

    #[test]
    fn test_circle_circle_single_contact() {
        let mut manifold = manifold_with(circle(0., 0., 1.), circle(1.5, 0., 1.));
        assert!(circle_circle(&mut manifold));
        assert_eq!(manifold.contacts_count(), 1);
        assert!((manifold.penetration() - 0.5).abs() < 1e-6);
        assert_eq!(manifold.normal(), Vector::new(1., 0.));
        assert_eq!(manifold.contacts()[0], Point::new(1., 0.));
    }

    #[test]
    fn test_circle_circle_coincident() {
        let mut manifold = manifold_with(circle(2., 2., 1.), circle(2., 2., 3.));
        assert!(circle_circle(&mut manifold));
        assert_eq!(manifold.penetration(), 1.);
        assert_eq!(manifold.normal(), Vector::new(1., 0.));
    }

    #[test]
    fn test_circle_circle_apart() {
        let mut manifold = manifold_with(circle(0., 0., 1.), circle(3., 0., 1.));
        assert!(!circle_circle(&mut manifold));
        assert_eq!(manifold.contacts_count(), 0);
    }

    #[test]
    fn test_box_box_picks_x_axis() {
        let mut manifold = manifold_with(aabb(0., 0., 0.5, 0.5), aabb(0.5, 0., 0.5, 0.5));
        assert!(box_box(&mut manifold));
        assert_eq!(manifold.normal(), Vector::new(1., 0.));
        assert!((manifold.penetration() - 0.5).abs() < 1e-6);
        assert_eq!(manifold.contacts()[0], Point::new(0.25, 0.));
    }

    #[test]
    fn test_box_box_tie_goes_to_y() {
        let mut manifold = manifold_with(aabb(0., 0., 1., 1.), aabb(-1., -1., 1., 1.));
        assert!(box_box(&mut manifold));
        assert_eq!(manifold.normal(), Vector::new(0., -1.));
        assert_eq!(manifold.penetration(), 1.);
    }

    #[test]
    fn test_box_box_apart() {
        let mut manifold = manifold_with(aabb(0., 0., 1., 1.), aabb(3., 0., 1., 1.));
        assert!(!box_box(&mut manifold));
    }

    #[test]
    fn test_box_circle_outside() {
        let mut manifold = manifold_with(aabb(0., 0., 1., 1.), circle(0., 1.5, 1.));
        assert!(box_circle(&mut manifold));
        assert_eq!(manifold.normal(), Vector::new(0., 1.));
        assert!((manifold.penetration() - 0.5).abs() < 1e-6);
        assert_eq!(manifold.contacts()[0], Point::new(0., 0.5));
    }

    #[test]
    fn test_box_circle_centre_inside() {
        let mut manifold = manifold_with(aabb(0., 0., 2., 1.), circle(1.5, 0., 0.5));
        assert!(box_circle(&mut manifold));
        // pushed out through the right face
        assert_eq!(manifold.normal(), Vector::new(1., 0.));
    }

    #[test]
    fn test_box_circle_apart() {
        let mut manifold = manifold_with(aabb(0., 0., 1., 1.), circle(3., 3., 1.));
        assert!(!box_circle(&mut manifold));
    }

    #[test]
    fn test_circle_box_normal_points_from_circle() {
        let mut manifold = manifold_with(circle(0., 1.5, 1.), aabb(0., 0., 1., 1.));
        assert!(circle_box(&mut manifold));
        assert_eq!(manifold.normal(), Vector::new(0., -1.));
        assert_eq!(manifold.a().position(), Point::new(0., 1.5));
        assert_eq!(manifold.radial_contacts_a()[0], Vector::new(0., -1.));
        assert_eq!(manifold.radial_contacts_b()[0], Vector::new(0., 0.5));
    }

    #[test]
    fn test_sat_separated_squares() {
        let a = Polygon::rectangle((0., 0.).into(), (1., 1.).into()).unwrap();
        let b = Polygon::rectangle((5., 5.).into(), (6., 6.).into()).unwrap();
        let mut manifold = Manifold::default();
        assert!(!polygon_polygon(&mut manifold, &a, &b));
    }

    #[test]
    fn test_sat_known_penetration() {
        let a = square(0., 0., 0.5);
        let b = square(0.5, 0., 0.5);
        let mut manifold = Manifold::default();
        assert!(polygon_polygon(&mut manifold, &a, &b));
        assert!((manifold.penetration() - 0.5).abs() < 1e-6);
        assert!(manifold.normal().y().abs() < 1e-6);
        assert!((manifold.normal().x().abs() - 1.).abs() < 1e-6);
        assert_eq!(manifold.contacts_count(), 2);
    }

    #[test]
    fn test_sat_normal_points_from_a_to_b() {
        let a = square(0.5, 0., 0.5);
        let b = square(0., 0., 0.5);
        let mut manifold = Manifold::default();
        assert!(polygon_polygon(&mut manifold, &a, &b));
        assert_eq!(manifold.normal(), Vector::new(-1., 0.));
    }

    #[test]
    fn test_sat_containment() {
        let big = square(0., 0., 4.);
        let small = square(1., 0., 0.5);
        let mut manifold = Manifold::default();
        assert!(polygon_polygon(&mut manifold, &big, &small));
        // leaving through the right side is the shortest way out
        assert_eq!(manifold.normal(), Vector::new(1., 0.));
        assert!((manifold.penetration() - 3.5).abs() < 1e-5);
    }
}
