use sketchbody_macro_tools::{Builder, Fields};

use crate::{
    body::Body,
    math::{vector::Vector, FloatNum},
};

use super::manifold::Manifold;

/// Tuning of the impulse solver and positional correction.
#[derive(Builder, Fields, Clone, Copy, Debug, PartialEq)]
#[r]
pub struct SolverParameters {
    /// Fraction of the penetration removed per step.
    #[default = 1.0]
    penetration_percent: FloatNum,
    /// Penetration left alone to avoid jitter.
    #[default = 0.02]
    penetration_slop: FloatNum,
    /// Skip only the separating contact instead of the whole manifold.
    #[default = false]
    skip_separating_contacts: bool,
}

fn relative_velocity(a: &Body, b: &Body, radial_a: Vector, radial_b: Vector) -> Vector {
    b.velocity() + Vector::cross_scalar(b.angular_velocity(), radial_b)
        - a.velocity()
        - Vector::cross_scalar(a.angular_velocity(), radial_a)
}

fn effective_inverse_mass(
    manifold: &Manifold,
    radial_a: Vector,
    radial_b: Vector,
    direction: Vector,
) -> FloatNum {
    let a = manifold.a();
    let b = manifold.b();
    a.inverse_mass()
        + b.inverse_mass()
        + (radial_a ^ direction).powi(2) * a.inverse_moment()
        + (radial_b ^ direction).powi(2) * b.inverse_moment()
}

// inactive bodies take part in collisions without being moved
fn exchange_impulse(
    a: &mut Body,
    b: &mut Body,
    impulse: Vector,
    radial_a: Vector,
    radial_b: Vector,
) {
    if a.active() {
        a.apply_impulse(-impulse, radial_a);
    }
    if b.active() {
        b.apply_impulse(impulse, radial_b);
    }
}

/// Normal impulse for every contact, split evenly between the contacts.
///
/// A separating contact ends resolution of the whole manifold unless
/// `skip_separating_contacts` is set.
pub fn resolve_collision(
    manifold: &mut Manifold,
    a: &mut Body,
    b: &mut Body,
    parameters: &SolverParameters,
) {
    let count = manifold.contacts_count();
    let normal = manifold.normal();
    let restitution = manifold.a().restitution().min(manifold.b().restitution());

    for i in 0..count {
        let radial_a = manifold.radial_contacts_a()[i];
        let radial_b = manifold.radial_contacts_b()[i];

        let normal_speed = relative_velocity(a, b, radial_a, radial_b) * normal;
        if normal_speed >= 0. {
            if parameters.skip_separating_contacts {
                continue;
            }
            return;
        }

        let inverse_mass_sum = effective_inverse_mass(manifold, radial_a, radial_b, normal);
        if inverse_mass_sum <= 0. {
            continue;
        }

        let impulse_scalar =
            -(1. + restitution) * normal_speed / inverse_mass_sum / count as FloatNum;
        manifold.set_impulse(i, impulse_scalar);

        exchange_impulse(a, b, normal * impulse_scalar, radial_a, radial_b);
    }
}

/// Coulomb friction along the contact tangent, using the normal impulse of
/// the same contact as the limit.
pub fn apply_friction_impulse(manifold: &Manifold, a: &mut Body, b: &mut Body) {
    let count = manifold.contacts_count();
    let normal = manifold.normal();

    let static_friction = manifold
        .a()
        .static_friction()
        .hypot(manifold.b().static_friction());
    let dynamic_friction = manifold
        .a()
        .dynamic_friction()
        .hypot(manifold.b().dynamic_friction());

    for i in 0..count {
        let impulse_scalar = manifold.impulses()[i];
        if impulse_scalar == 0. {
            continue;
        }

        let radial_a = manifold.radial_contacts_a()[i];
        let radial_b = manifold.radial_contacts_b()[i];

        let velocity = relative_velocity(a, b, radial_a, radial_b);
        let Ok(tangent) = (velocity - normal * (velocity * normal)).try_normalize() else {
            continue;
        };

        let inverse_mass_sum = effective_inverse_mass(manifold, radial_a, radial_b, tangent);
        if inverse_mass_sum <= 0. {
            continue;
        }

        let tangent_scalar = -(velocity * tangent) / inverse_mass_sum / count as FloatNum;

        let friction_impulse = if tangent_scalar.abs() < impulse_scalar * static_friction {
            tangent * tangent_scalar
        } else {
            tangent * (-impulse_scalar * dynamic_friction)
        };

        exchange_impulse(a, b, friction_impulse, radial_a, radial_b);
    }
}

/// Push the bodies apart along the normal, split by inverse mass.
pub fn separate_colliding_bodies(
    manifold: &Manifold,
    a: &mut Body,
    b: &mut Body,
    parameters: &SolverParameters,
) {
    let inverse_mass_a = manifold.a().inverse_mass();
    let inverse_mass_b = manifold.b().inverse_mass();
    let inverse_mass_sum = inverse_mass_a + inverse_mass_b;
    if inverse_mass_sum <= 0. {
        return;
    }

    let depth = (manifold.penetration() - parameters.penetration_slop).max(0.);
    let correction =
        manifold.normal() * (depth / inverse_mass_sum * parameters.penetration_percent);

    a.translate(-correction * inverse_mass_a);
    b.translate(correction * inverse_mass_b);
}
