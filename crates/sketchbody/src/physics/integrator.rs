use serde::{Deserialize, Serialize};

use crate::{body::Body, math::FloatNum};

/// Time integration scheme applied to active bodies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Integrator {
    /// Position from the old velocity, then velocity from the force.
    #[default]
    Euler,
    /// Velocity first, then position from the new velocity.
    SymplecticEuler,
    /// Position from the previous position difference.
    Verlet,
}

impl Integrator {
    /// Unknown names fall back to euler.
    pub fn from_name(name: &str) -> Self {
        match name {
            "euler" => Integrator::Euler,
            "symplectic-euler" => Integrator::SymplecticEuler,
            "verlet" => Integrator::Verlet,
            unknown => {
                tracing::warn!(name = unknown, "unknown integrator, using euler");
                Integrator::Euler
            }
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Integrator::Euler => "euler",
            Integrator::SymplecticEuler => "symplectic-euler",
            Integrator::Verlet => "verlet",
        }
    }

    pub fn integrate(self, body: &mut Body, _t: FloatNum, dt: FloatNum) {
        let acceleration = body.force() * body.inverse_mass();
        let angular_acceleration = body.torque() * body.inverse_moment_of_inertia();

        match self {
            Integrator::Euler => {
                *body.previous_position_mut() = body.position();
                *body.previous_angle_mut() = body.angle();

                body.translate(body.velocity() * dt);
                body.rotate(body.angular_velocity() * dt);

                body.accelerate(acceleration * dt);
                body.set_angular_velocity(|w| w + angular_acceleration * dt);
            }
            Integrator::SymplecticEuler => {
                *body.previous_position_mut() = body.position();
                *body.previous_angle_mut() = body.angle();

                body.accelerate(acceleration * dt);
                body.set_angular_velocity(|w| w + angular_acceleration * dt);

                body.translate(body.velocity() * dt);
                body.rotate(body.angular_velocity() * dt);
            }
            Integrator::Verlet => {
                let delta_velocity = acceleration * dt;
                body.accelerate(delta_velocity);
                let delta_position =
                    (body.position() - body.previous_position()) + delta_velocity * dt;
                *body.previous_position_mut() = body.position();
                body.translate(delta_position);

                let delta_angular_velocity = angular_acceleration * dt;
                body.set_angular_velocity(|w| w + delta_angular_velocity);
                let delta_angle =
                    (body.angle() - body.previous_angle()) + delta_angular_velocity * dt;
                *body.previous_angle_mut() = body.angle();
                body.rotate(delta_angle);
            }
        }
    }
}

impl From<String> for Integrator {
    fn from(name: String) -> Self {
        Integrator::from_name(&name)
    }
}

impl From<Integrator> for String {
    fn from(integrator: Integrator) -> Self {
        integrator.name().to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        bounds::Bounds,
        math::{point::Point, vector::Vector},
        meta::Material,
        shape::Shape,
    };

    const ALL: [Integrator; 3] = [
        Integrator::Euler,
        Integrator::SymplecticEuler,
        Integrator::Verlet,
    ];

    fn unit_box() -> Body {
        Body::new(
            Bounds::new((0., 0.), (1., 1.)).shared(),
            Shape::Box,
            Material::default(),
        )
    }

    #[test]
    fn test_idempotent_at_rest() {
        for integrator in ALL {
            let mut body = unit_box();
            integrator.integrate(&mut body, 0., 1. / 60.);
            assert_eq!(body.position(), Point::new(0.5, 0.5), "{}", integrator.name());
            assert_eq!(body.angle(), 0., "{}", integrator.name());
        }
    }

    #[test]
    fn test_euler_moves_with_old_velocity() {
        let mut body = unit_box();
        body.set_velocity(|_| (1., 0.).into());
        body.apply_force((0., 2.).into());
        Integrator::Euler.integrate(&mut body, 0., 0.5);

        assert_eq!(body.position(), Point::new(1., 0.5));
        assert_eq!(body.velocity(), Vector::new(1., 1.));
        assert_eq!(body.delta_velocity(), Vector::new(0., 1.));
    }

    #[test]
    fn test_symplectic_euler_moves_with_new_velocity() {
        let mut body = unit_box();
        body.set_velocity(|_| (1., 0.).into());
        body.apply_force((0., 2.).into());
        Integrator::SymplecticEuler.integrate(&mut body, 0., 0.5);

        assert_eq!(body.position(), Point::new(1., 1.));
        assert_eq!(body.delta_position(), Vector::new(0.5, 0.5));
    }

    #[test]
    fn test_verlet_uses_previous_position() {
        let mut body = unit_box();
        *body.previous_position_mut() = (0.25, 0.5).into();
        Integrator::Verlet.integrate(&mut body, 0., 0.1);

        assert_eq!(body.previous_position(), Point::new(0.5, 0.5));
        assert_eq!(body.position(), Point::new(0.75, 0.5));
    }

    #[test]
    fn test_name_lookup() {
        for integrator in ALL {
            assert_eq!(Integrator::from_name(integrator.name()), integrator);
        }
        assert_eq!(Integrator::from_name("runge-kutta"), Integrator::Euler);
    }
}
