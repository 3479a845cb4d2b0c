mod store;

use std::{cell::Cell, rc::Rc};

use sketchbody_macro_tools::Fields;

use crate::{
    bounds::{SharedBounds, SubscriptionId},
    math::{point::Point, vector::Vector, FloatNum},
    meta::{Mass, Material, ValueWithInv},
    physics::inertia::{InertiaPropsBuilder, InertiaShape},
    shape::Shape,
};

pub(crate) use store::IDDispatcher;
pub use store::BodyStore;

pub type ID = u32;

/// A simulated rigid object.
///
/// The body reads its size from a [`SharedBounds`] owned by the editor and
/// listens to its resize notification. Dropping the body unsubscribes.
#[derive(Fields, Debug)]
#[r]
pub struct Body {
    id: ID,
    #[r(skip)]
    bounds: SharedBounds,
    #[r(skip)]
    subscription: SubscriptionId,
    #[r(skip)]
    resized: Rc<Cell<bool>>,
    #[w]
    shape: Shape,

    position: Point,
    #[w]
    previous_position: Point,
    #[w(reducer)]
    velocity: Vector,
    delta_position: Vector,
    delta_velocity: Vector,
    force: Vector,

    angle: FloatNum,
    #[w]
    previous_angle: FloatNum,
    #[w(reducer)]
    angular_velocity: FloatNum,
    delta_angle: FloatNum,
    torque: FloatNum,

    #[r(skip)]
    mass: ValueWithInv,
    #[r(skip)]
    g_mass: ValueWithInv,
    #[r(skip)]
    moment: ValueWithInv,

    density: FloatNum,
    #[w(set)]
    restitution: FloatNum,
    #[w(set)]
    linear_static_friction: FloatNum,
    #[w(set)]
    linear_dynamic_friction: FloatNum,

    active: bool,
    #[w(set)]
    asleep: bool,

    debug_contacts: Vec<Point>,
}

impl Body {
    pub fn new(bounds: SharedBounds, shape: Shape, material: Material) -> Self {
        let resized = Rc::new(Cell::new(false));
        let (subscription, centroid) = {
            let mut bounds = bounds.borrow_mut();
            let flag = resized.clone();
            let subscription = bounds.on_resize(move |_| flag.set(true));
            (subscription, bounds.centroid())
        };

        let mut body = Self {
            id: 0,
            bounds,
            subscription,
            resized,
            shape,
            position: centroid,
            previous_position: centroid,
            velocity: Vector::ZERO,
            delta_position: Vector::ZERO,
            delta_velocity: Vector::ZERO,
            force: Vector::ZERO,
            angle: 0.,
            previous_angle: 0.,
            angular_velocity: 0.,
            delta_angle: 0.,
            torque: 0.,
            mass: Default::default(),
            g_mass: Default::default(),
            moment: Default::default(),
            density: material.density(),
            restitution: material.restitution(),
            linear_static_friction: material.static_friction(),
            linear_dynamic_friction: material.dynamic_friction(),
            active: true,
            asleep: false,
            debug_contacts: Vec::new(),
        };
        body.set_density(material.density());
        body
    }

    pub(crate) fn inject_id(&mut self, id: ID) {
        self.id = id
    }

    pub fn bounds(&self) -> &SharedBounds {
        &self.bounds
    }

    pub fn material(&self) -> Material {
        Material::new(
            self.density,
            self.restitution,
            self.linear_static_friction,
            self.linear_dynamic_friction,
        )
    }

    /// Also recomputes inertial and gravitational mass from the bounds area,
    /// and the moment of inertia from the new mass.
    pub fn set_density(&mut self, density: FloatNum) -> &mut Self {
        self.density = density;
        let mass = self.bounds.borrow().area() * density;
        self.set_inertial_mass(mass);
        self.set_gravitational_mass(mass);
        let moment = self.compute_moment_of_inertia();
        self.set_moment_of_inertia(moment);
        self
    }

    fn compute_moment_of_inertia(&self) -> Mass {
        let bounds = self.bounds.borrow();
        let props = InertiaPropsBuilder::new()
            .mass(*self.mass)
            .radius(bounds.radius())
            .width(bounds.width())
            .height(bounds.height())
            .build();
        let inertia_shape = match self.shape {
            Shape::Circle => InertiaShape::CircularDisk,
            Shape::Box | Shape::Polygon(_) => InertiaShape::Rectangle,
        };
        inertia_shape.moment(&props)
    }

    pub fn inertial_mass(&self) -> Mass {
        *self.mass
    }

    pub fn inverse_mass(&self) -> Mass {
        self.mass.inv()
    }

    /// A non positive mass pins the body: inverse mass and velocity become zero.
    pub fn set_inertial_mass(&mut self, mass: Mass) -> &mut Self {
        self.mass.set_value(mass);
        if mass <= 0. {
            self.velocity.set_zero();
        }
        self
    }

    pub fn gravitational_mass(&self) -> Mass {
        *self.g_mass
    }

    pub fn inverse_gravitational_mass(&self) -> Mass {
        self.g_mass.inv()
    }

    pub fn set_gravitational_mass(&mut self, mass: Mass) -> &mut Self {
        self.g_mass.set_value(mass);
        self
    }

    pub fn moment_of_inertia(&self) -> Mass {
        *self.moment
    }

    pub fn inverse_moment_of_inertia(&self) -> Mass {
        self.moment.inv()
    }

    pub fn set_moment_of_inertia(&mut self, moment: Mass) -> &mut Self {
        self.moment.set_value(moment);
        self
    }

    pub fn activate(&mut self) -> &mut Self {
        self.active = true;
        self
    }

    pub fn deactivate(&mut self) -> &mut Self {
        self.active = false;
        self.velocity.set_zero();
        self.angular_velocity = 0.;
        self
    }

    pub fn clear_forces_and_deltas(&mut self) {
        self.force.set_zero();
        self.torque = 0.;
        self.delta_position.set_zero();
        self.delta_velocity.set_zero();
        self.delta_angle = 0.;
        self.debug_contacts.clear();
    }

    pub fn apply_force(&mut self, force: Vector) {
        self.force += force;
    }

    pub fn apply_torque(&mut self, torque: FloatNum) {
        self.torque += torque;
    }

    /// `radial` points from the body's position to where the impulse acts.
    pub fn apply_impulse(&mut self, impulse: Vector, radial: Vector) {
        self.velocity += impulse * self.mass.inv();
        self.angular_velocity += self.moment.inv() * (radial ^ impulse);
    }

    pub(crate) fn accelerate(&mut self, delta_velocity: Vector) {
        self.velocity += delta_velocity;
        self.delta_velocity += delta_velocity;
    }

    /// Moves the body and records the move for this step.
    pub fn translate(&mut self, offset: Vector) {
        self.position += offset;
        self.delta_position += offset;
    }

    pub fn rotate(&mut self, delta_angle: FloatNum) {
        self.angle += delta_angle;
        self.delta_angle += delta_angle;
    }

    pub(crate) fn push_debug_contacts(&mut self, contacts: &[Point]) {
        self.debug_contacts.extend_from_slice(contacts);
    }

    /// Apply a pending resize of the bounds. Returns whether one was pending.
    ///
    /// The position moves to the new centroid and a polygon shape is only
    /// translated there, never scaled to the new size. Mass, gravitational
    /// mass and moment of inertia are recomputed from the density and the new
    /// area, so values set through their setters are replaced.
    pub fn sync_bounds(&mut self) -> bool {
        if !self.resized.replace(false) {
            return false;
        }

        let centroid = self.bounds.borrow().centroid();
        let offset = centroid - self.position;
        if let Shape::Polygon(polygon) = &mut self.shape {
            polygon.translate(offset);
        }
        self.position = centroid;
        self.previous_position = centroid;
        // the area changed
        self.set_density(self.density);
        true
    }

    pub fn has_pending_resize(&self) -> bool {
        self.resized.get()
    }

    /// Push this step's translation and rotation into the bounds and polygon.
    pub(crate) fn commit_deltas(&mut self) {
        let offset = self.delta_position;
        let delta_angle = self.delta_angle;
        if offset.is_zero() && delta_angle == 0. {
            return;
        }

        {
            let mut bounds = self.bounds.borrow_mut();
            bounds.translate(offset.x(), offset.y());
            bounds.rotate(delta_angle);
        }

        if let Shape::Polygon(polygon) = &mut self.shape {
            polygon.translate(offset);
            polygon.rotate_about(&self.position, delta_angle);
        }
    }

    /// Axis aligned box used by the broad phase.
    pub fn envelope(&self) -> (Point, Point) {
        match &self.shape {
            Shape::Polygon(polygon) => polygon.envelope(),
            Shape::Circle | Shape::Box => {
                let bounds = self.bounds.borrow();
                (bounds.min(), bounds.max())
            }
        }
    }

    pub fn radius(&self) -> FloatNum {
        self.bounds.borrow().radius()
    }

    pub fn half_extents(&self) -> Vector {
        self.bounds.borrow().half_extents()
    }

    pub fn kinetic_energy(&self) -> FloatNum {
        0.5 * (*self.mass).max(0.) * self.velocity.abs_squared()
            + 0.5 * (*self.moment).max(0.) * self.angular_velocity.powi(2)
    }

    /// Copy motion and material onto `bounds`. Polygon vertices follow the
    /// new centroid.
    pub fn duplicate(&self, bounds: SharedBounds) -> Body {
        let mut body = Body::new(bounds, self.shape.clone(), self.material());

        let offset = body.position - self.position;
        if let Shape::Polygon(polygon) = &mut body.shape {
            polygon.translate(offset);
        }

        body.previous_position = body.position + (self.previous_position - self.position);
        body.velocity = self.velocity;
        body.angle = self.angle;
        body.previous_angle = self.previous_angle;
        body.angular_velocity = self.angular_velocity;
        body.active = self.active;
        body.asleep = self.asleep;
        if self.mass.value() <= 0. {
            body.set_inertial_mass(0.);
        }
        body
    }
}

impl Drop for Body {
    fn drop(&mut self) {
        if let Ok(mut bounds) = self.bounds.try_borrow_mut() {
            bounds.off_resize(self.subscription);
        }
    }
}
