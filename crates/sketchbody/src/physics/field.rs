use std::fmt::Debug;

use crate::{
    body::Body,
    math::{point::Point, vector::Vector, FloatNum},
};

/// Acceleration field applied to every active body once per step. The force
/// added is the acceleration scaled by the body's gravitational mass.
pub enum ForceField {
    ConstantGravitational { acceleration: Vector },
    /// Acceleration as a function of position.
    VariableGravitational(Box<dyn Fn(Point) -> Vector>),
    /// Acceleration as a function of position and step duration.
    DynamicGravitational(Box<dyn Fn(Point, FloatNum) -> Vector>),
}

impl Debug for ForceField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ForceField::ConstantGravitational { acceleration } => f
                .debug_struct("ConstantGravitational")
                .field("acceleration", acceleration)
                .finish(),
            ForceField::VariableGravitational(_) => f.write_str("VariableGravitational"),
            ForceField::DynamicGravitational(_) => f.write_str("DynamicGravitational"),
        }
    }
}

impl ForceField {
    pub fn constant(acceleration: impl Into<Vector>) -> Self {
        ForceField::ConstantGravitational {
            acceleration: acceleration.into(),
        }
    }

    pub fn variable(field: impl Fn(Point) -> Vector + 'static) -> Self {
        ForceField::VariableGravitational(Box::new(field))
    }

    pub fn dynamic(field: impl Fn(Point, FloatNum) -> Vector + 'static) -> Self {
        ForceField::DynamicGravitational(Box::new(field))
    }

    pub fn acceleration_at(&self, position: Point, dt: FloatNum) -> Vector {
        match self {
            ForceField::ConstantGravitational { acceleration } => *acceleration,
            ForceField::VariableGravitational(field) => field(position),
            ForceField::DynamicGravitational(field) => field(position, dt),
        }
    }

    pub fn apply(&self, body: &mut Body, dt: FloatNum) {
        let acceleration = self.acceleration_at(body.position(), dt);
        body.apply_force(acceleration * body.gravitational_mass());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bounds::Bounds, meta::MaterialBuilder, shape::Shape};

    fn body_at(x: FloatNum, y: FloatNum) -> Body {
        Body::new(
            Bounds::new((x - 1., y - 1.), (x + 1., y + 1.)).shared(),
            Shape::Circle,
            MaterialBuilder::new().density(0.5).build(),
        )
    }

    #[test]
    fn test_constant_field_scales_with_gravitational_mass() {
        let mut body = body_at(0., 0.);
        ForceField::constant((0., 9.8)).apply(&mut body, 0.1);
        // area 4, density 0.5
        assert_eq!(body.force(), Vector::new(0., 19.6));

        body.set_gravitational_mass(1.);
        body.clear_forces_and_deltas();
        ForceField::constant((0., 9.8)).apply(&mut body, 0.1);
        assert_eq!(body.force(), Vector::new(0., 9.8));
    }

    #[test]
    fn test_variable_field_reads_position() {
        let mut body = body_at(3., 0.);
        let field = ForceField::variable(|p| (-p.x(), 0.).into());
        field.apply(&mut body, 0.1);
        assert_eq!(body.force(), Vector::new(-6., 0.));
    }

    #[test]
    fn test_dynamic_field_reads_step() {
        let field = ForceField::dynamic(|_, dt| (dt, 0.).into());
        assert_eq!(
            field.acceleration_at(Point::default(), 0.25),
            Vector::new(0.25, 0.)
        );
    }
}
