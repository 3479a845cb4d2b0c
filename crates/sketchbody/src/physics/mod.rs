pub mod constraint;
pub mod field;
pub mod gravitation;
pub mod inertia;
pub mod integrator;
pub mod settings;

use std::collections::BTreeMap;

use crate::{
    body::{Body, BodyStore, IDDispatcher, ID},
    bounds::SharedBounds,
    collision::Collision,
    errors::{PhysicsError, Result},
    math::{vector::Vector, FloatNum},
    meta::Material,
    shape::{Polygon, Shape, ShapeKind},
};

pub use constraint::Constraint;
pub use field::ForceField;
pub use gravitation::gravitate;
pub use inertia::{rotational_inertia, InertiaProps, InertiaPropsBuilder, InertiaShape};
pub use integrator::Integrator;
pub use settings::{Setting, SettingValue, Settings, SettingsBuilder};

/// The simulated world.
///
/// Owns the bodies, force fields and constraints, and advances them with
/// [`Physics::step`]. Everything runs on the calling thread.
#[derive(Debug)]
pub struct Physics {
    settings: Settings,
    bodies: BodyStore,
    gravity_field: ID,
    force_fields: BTreeMap<ID, ForceField>,
    field_id_dispatcher: IDDispatcher,
    constraints: BTreeMap<ID, Constraint>,
    constraint_id_dispatcher: IDDispatcher,
    collision: Collision,
    potential_energy: FloatNum,
    frame_count: u64,
    elapsed: FloatNum,
}

impl Default for Physics {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Physics {
    pub fn new(settings: Settings) -> Self {
        let mut field_id_dispatcher = IDDispatcher::default();
        let gravity_field = field_id_dispatcher.gen_id();
        let mut force_fields = BTreeMap::new();
        force_fields.insert(
            gravity_field,
            ForceField::constant((0., settings.gravity())),
        );

        Self {
            collision: Collision::new(settings.solver_parameters()),
            settings,
            bodies: BodyStore::default(),
            gravity_field,
            force_fields,
            field_id_dispatcher,
            constraints: BTreeMap::new(),
            constraint_id_dispatcher: IDDispatcher::default(),
            potential_energy: 0.,
            frame_count: 0,
            elapsed: 0.,
        }
    }

    /// Same as [`Physics::new`], named for callers building settings from
    /// deserialized options.
    pub fn from_options(options: Settings) -> Self {
        Self::new(options)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn add_body(&mut self, body: Body) -> ID {
        self.bodies.push(body)
    }

    /// Constraints referencing the body are removed with it.
    pub fn remove_body(&mut self, id: ID) -> Option<Body> {
        let body = self.bodies.remove(id)?;
        self.constraints.retain(|_, constraint| {
            let (a, b) = constraint.bodies();
            a != id && b != id
        });
        Some(body)
    }

    pub fn body(&self, id: ID) -> Option<&Body> {
        self.bodies.get(id)
    }

    pub fn body_mut(&mut self, id: ID) -> Option<&mut Body> {
        self.bodies.get_mut(id)
    }

    pub fn bodies(&self) -> &BodyStore {
        &self.bodies
    }

    pub fn bodies_mut(&mut self) -> &mut BodyStore {
        &mut self.bodies
    }

    pub fn add_force_field(&mut self, field: ForceField) -> ID {
        let id = self.field_id_dispatcher.gen_id();
        self.force_fields.insert(id, field);
        id
    }

    /// The built in gravity field stays; `None` for it and for unknown ids.
    pub fn remove_force_field(&mut self, id: ID) -> Option<ForceField> {
        if id == self.gravity_field {
            tracing::warn!(id, "the gravity field cannot be removed");
            return None;
        }
        self.force_fields.remove(&id)
    }

    pub fn gravity_field_id(&self) -> ID {
        self.gravity_field
    }

    pub fn force_field_count(&self) -> usize {
        self.force_fields.len()
    }

    pub fn add_constraint(&mut self, constraint: Constraint) -> Result<ID> {
        let (a, b) = constraint.bodies();
        for id in [a, b] {
            if !self.bodies.contains(id) {
                return Err(PhysicsError::BodyNotFound(id));
            }
        }

        let id = self.constraint_id_dispatcher.gen_id();
        self.constraints.insert(id, constraint);
        Ok(id)
    }

    pub fn remove_constraint(&mut self, id: ID) -> Option<Constraint> {
        self.constraints.remove(&id)
    }

    pub fn constraints(&self) -> impl Iterator<Item = (ID, &Constraint)> {
        self.constraints.iter().map(|(id, constraint)| (*id, constraint))
    }

    /// Collision geometry for `kind` follows the bounds. A polygon starts as
    /// the bounds rectangle, which fails for degenerate bounds.
    pub fn new_body(kind: ShapeKind, bounds: SharedBounds, material: Material) -> Result<Body> {
        let shape = match kind {
            ShapeKind::Circle => Shape::Circle,
            ShapeKind::Box => Shape::Box,
            ShapeKind::Polygon => {
                let (min, max) = {
                    let bounds = bounds.borrow();
                    (bounds.min(), bounds.max())
                };
                Shape::Polygon(Polygon::rectangle(min, max)?)
            }
        };
        Ok(Body::new(bounds, shape, material))
    }

    /// Unknown shape names give a box, unknown materials give `static`.
    pub fn new_body_named(
        type_name: &str,
        bounds: SharedBounds,
        material_name: &str,
    ) -> Result<Body> {
        Self::new_body(
            ShapeKind::from_name(type_name),
            bounds,
            Self::material(material_name),
        )
    }

    pub fn material(name: &str) -> Material {
        Material::named(name)
    }

    pub fn constraint_distance(body_a: ID, body_b: ID, distance: FloatNum) -> Constraint {
        Constraint::distance(body_a, body_b, distance)
    }

    /// Live tuning by name. Returns whether the setting was applied.
    pub fn set_setting(&mut self, name: &str, value: impl Into<SettingValue>) -> bool {
        let value = value.into();
        match Setting::parse(name, &value) {
            Some(setting) => {
                self.apply_setting(setting);
                true
            }
            None => {
                tracing::warn!(name, ?value, "ignored setting");
                false
            }
        }
    }

    pub fn apply_setting(&mut self, setting: Setting) {
        self.settings.apply(setting);

        match setting {
            Setting::Gravity(gravity) => {
                self.force_fields
                    .insert(self.gravity_field, ForceField::constant((0., gravity)));
            }
            Setting::PenetrationPercent(_)
            | Setting::PenetrationSlop(_)
            | Setting::SkipSeparatingContacts(_) => {
                self.collision
                    .set_parameters(self.settings.solver_parameters());
            }
            _ => {}
        }
    }

    /// Advance the world by `dt`. `t` is the caller's clock, passed through
    /// to the integrator.
    pub fn step(&mut self, t: FloatNum, dt: FloatNum) {
        // deltas and debug contacts are per step, active or not
        for body in self.bodies.iter_mut() {
            body.sync_bounds();
            body.clear_forces_and_deltas();
        }

        for body in self.bodies.iter_mut().filter(|body| body.active()) {
            for field in self.force_fields.values() {
                field.apply(body, dt);
            }
        }

        self.potential_energy = 0.;
        let gravitational_constant = self.settings.gravitational_constant();
        if gravitational_constant > 0. {
            self.potential_energy = self.gravitate_all(gravitational_constant);
        }

        for constraint in self.constraints.values() {
            constraint.apply(&mut self.bodies);
        }

        self.collision.resolve_all(self.bodies.as_mut_slice());

        let integrator = self.settings.integrator();
        let linear_damping = self.settings.linear_damping();
        let rotational_damping = self.settings.rotational_damping();
        for body in self.bodies.iter_mut().filter(|body| body.active()) {
            integrator.integrate(body, t, dt);
            body.set_velocity(|velocity| velocity * linear_damping);
            body.set_angular_velocity(|w| w * rotational_damping);
        }

        for body in self.bodies.iter_mut() {
            body.commit_deltas();
        }

        self.frame_count += 1;
        self.elapsed += dt;

        tracing::debug!(
            frame = self.frame_count,
            bodies = self.bodies.len(),
            colliding_pairs = self.collision.last_colliding_pairs(),
            contacts = self.collision.last_contacts(),
            "step"
        );
    }

    fn gravitate_all(&mut self, gravitational_constant: FloatNum) -> FloatNum {
        let bodies = self.bodies.as_mut_slice();
        let mut potential_energy = 0.;
        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (left, right) = bodies.split_at_mut(j);
                let (a, b) = (&mut left[i], &mut right[0]);
                if a.active() && b.active() {
                    potential_energy += gravitate(a, b, gravitational_constant);
                }
            }
        }
        potential_energy
    }

    pub fn total_kinetic_energy(&self) -> FloatNum {
        self.bodies.iter().map(Body::kinetic_energy).sum()
    }

    /// Pairwise gravitational potential of the last step.
    pub fn potential_energy(&self) -> FloatNum {
        self.potential_energy
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn elapsed(&self) -> FloatNum {
        self.elapsed
    }

    pub fn collision(&self) -> &Collision {
        &self.collision
    }

    /// Momentum of every active body with a positive mass.
    pub fn total_momentum(&self) -> Vector {
        self.bodies
            .iter()
            .filter(|body| body.active())
            .fold(Vector::ZERO, |sum, body| {
                sum + body.velocity() * body.inertial_mass().max(0.)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bounds::Bounds, math::point::Point};

    fn circle_at(x: FloatNum, y: FloatNum) -> Body {
        Physics::new_body(
            ShapeKind::Circle,
            Bounds::new((x - 1., y - 1.), (x + 1., y + 1.)).shared(),
            Physics::material("rock"),
        )
        .unwrap()
    }

    #[test]
    fn test_gravity_field_cannot_be_removed() {
        let mut physics = Physics::default();
        let gravity = physics.gravity_field_id();
        assert!(physics.remove_force_field(gravity).is_none());
        assert_eq!(physics.force_field_count(), 1);

        let wind = physics.add_force_field(ForceField::constant((1., 0.)));
        assert_ne!(wind, gravity);
        assert!(physics.remove_force_field(wind).is_some());
        assert_eq!(physics.force_field_count(), 1);
    }

    #[test]
    fn test_constraint_requires_bodies() {
        let mut physics = Physics::default();
        let a = physics.add_body(circle_at(0., 0.));
        let result = physics.add_constraint(Physics::constraint_distance(a, 42, 3.));
        assert_eq!(result, Err(PhysicsError::BodyNotFound(42)));

        let b = physics.add_body(circle_at(5., 0.));
        let id = physics
            .add_constraint(Physics::constraint_distance(a, b, 3.))
            .unwrap();
        assert_eq!(physics.constraints().count(), 1);

        physics.remove_body(b);
        assert_eq!(physics.constraints().count(), 0);
        assert!(physics.remove_constraint(id).is_none());
    }

    #[test]
    fn test_step_falls_under_gravity() {
        let mut physics = Physics::default();
        let id = physics.add_body(circle_at(0., 0.));

        physics.step(0., 0.1);

        let body = physics.body(id).unwrap();
        assert!((body.velocity().y() - 0.98).abs() < 1e-5);
        // euler moves with the old velocity
        assert_eq!(body.position(), Point::new(0., 0.));
        assert_eq!(physics.frame_count(), 1);

        physics.step(0.1, 0.1);
        let body = physics.body(id).unwrap();
        assert!((body.position().y() - 0.098).abs() < 1e-5);
        let bounds = body.bounds().borrow();
        assert!((bounds.centroid().y() - 0.098).abs() < 1e-5);
    }

    #[test]
    fn test_inactive_body_is_not_integrated() {
        let mut physics = Physics::default();
        let id = physics.add_body(circle_at(0., 0.));
        physics.body_mut(id).unwrap().deactivate();

        for i in 0..10 {
            physics.step(i as FloatNum * 0.1, 0.1);
        }

        let body = physics.body(id).unwrap();
        assert_eq!(body.position(), Point::new(0., 0.));
        assert_eq!(body.velocity(), Vector::ZERO);
    }

    #[test]
    fn test_set_setting() {
        let mut physics = Physics::default();
        assert!(physics.set_setting("gravity", 0_f32));
        assert!(physics.set_setting("integrator", "verlet"));
        assert!(!physics.set_setting("gravity", "down"));
        assert!(!physics.set_setting("unknown", 1_f32));

        assert_eq!(physics.settings().integrator(), Integrator::Verlet);

        let id = physics.add_body(circle_at(0., 0.));
        physics.step(0., 0.1);
        assert_eq!(physics.body(id).unwrap().velocity(), Vector::ZERO);
    }

    #[test]
    fn test_gravitation_between_bodies() {
        let settings = SettingsBuilder::new()
            .gravity(0.)
            .gravitational_constant(1.)
            .build();
        let mut physics = Physics::new(settings);
        let a = physics.add_body(circle_at(0., 0.));
        let b = physics.add_body(circle_at(10., 0.));

        physics.step(0., 0.1);

        assert!(physics.potential_energy() < 0.);
        let va = physics.body(a).unwrap().velocity();
        let vb = physics.body(b).unwrap().velocity();
        assert!(va.x() > 0.);
        assert!(vb.x() < 0.);
        assert!((va.x() + vb.x()).abs() < 1e-6);
    }

    #[test]
    fn test_body_named_fallbacks() {
        let bounds = Bounds::new((0., 0.), (2., 4.)).shared();
        let body = Physics::new_body_named("triangle", bounds, "glass").unwrap();
        assert_eq!(body.shape().kind(), ShapeKind::Box);
        assert_eq!(body.material(), Material::fixed());
        assert_eq!(body.inertial_mass(), 0.);

        let bounds = Bounds::new((0., 0.), (2., 4.)).shared();
        let body = Physics::new_body_named("polygon", bounds, "wood").unwrap();
        let polygon = body.shape().as_polygon().unwrap();
        assert_eq!(polygon.vertices().len(), 4);

        let flat = Bounds::new((0., 0.), (0., 0.)).shared();
        assert!(Physics::new_body(ShapeKind::Polygon, flat, Material::default()).is_err());
    }
}
