use crate::{body::Body, math::FloatNum};

/// Newtonian attraction between two bodies, using gravitational mass.
///
/// Returns the potential energy of the pair, measured with the gap between
/// the bounding radii so touching bodies stay finite. Overlapping bodies
/// contribute no potential energy, coincident bodies are skipped entirely.
pub fn gravitate(a: &mut Body, b: &mut Body, gravitational_constant: FloatNum) -> FloatNum {
    let a_to_b = b.position() - a.position();
    let distance_squared = a_to_b.abs_squared();
    if distance_squared == 0. {
        return 0.;
    }

    let distance = distance_squared.sqrt();
    let mass_product = a.gravitational_mass() * b.gravitational_mass();
    let magnitude = gravitational_constant * mass_product / distance_squared;
    let force = a_to_b * (magnitude / distance);

    a.apply_force(force);
    b.apply_force(-force);

    let gap = distance - (a.radius() + b.radius());
    if gap > 0. {
        -gravitational_constant * mass_product / gap
    } else {
        0.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bounds::Bounds, meta::MaterialBuilder, shape::Shape};

    fn circle(x: FloatNum) -> Body {
        Body::new(
            Bounds::new((x - 0.5, -0.5), (x + 0.5, 0.5)).shared(),
            Shape::Circle,
            MaterialBuilder::new().density(2.).build(),
        )
    }

    #[test]
    fn test_equal_and_opposite() {
        let mut a = circle(0.);
        let mut b = circle(2.);
        let potential = gravitate(&mut a, &mut b, 1.);

        // g-mass 2 each, distance 2
        assert!((a.force().x() - 1.).abs() < 1e-6);
        assert!((b.force().x() + 1.).abs() < 1e-6);
        assert_eq!(a.force().y(), 0.);
        // gap 1
        assert!((potential + 4.).abs() < 1e-6);
    }

    #[test]
    fn test_uses_gravitational_mass() {
        let mut a = circle(0.);
        let mut b = circle(2.);
        a.set_gravitational_mass(0.);
        gravitate(&mut a, &mut b, 1.);
        assert!(a.force().is_zero());
    }

    #[test]
    fn test_coincident_and_overlapping() {
        let mut a = circle(0.);
        let mut b = circle(0.);
        assert_eq!(gravitate(&mut a, &mut b, 1.), 0.);
        assert!(a.force().is_zero());

        let mut c = circle(0.5);
        assert_eq!(gravitate(&mut a, &mut c, 1.), 0.);
        assert!(a.force().x() > 0.);
    }
}
