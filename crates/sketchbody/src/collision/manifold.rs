use sketchbody_macro_tools::Fields;

use crate::{
    body::{Body, ID},
    math::{point::Point, vector::Vector, FloatNum},
};

pub const MAX_CONTACTS: usize = 2;

/// Scalars copied from one body of the pair.
#[derive(Clone, Copy, Debug, Default, Fields)]
#[r]
pub struct ManifoldBody {
    id: ID,
    inverse_mass: FloatNum,
    inverse_moment: FloatNum,
    restitution: FloatNum,
    static_friction: FloatNum,
    dynamic_friction: FloatNum,
    radius: FloatNum,
    position: Point,
    half_extents: Vector,
}

impl ManifoldBody {
    fn copy_from(&mut self, body: &Body) {
        self.id = body.id();
        // inactive bodies behave as immovable
        (self.inverse_mass, self.inverse_moment) = if body.active() {
            (body.inverse_mass(), body.inverse_moment_of_inertia())
        } else {
            (0., 0.)
        };
        self.restitution = body.restitution();
        self.static_friction = body.linear_static_friction();
        self.dynamic_friction = body.linear_dynamic_friction();
        self.radius = body.radius();
        self.position = body.position();
        self.half_extents = body.half_extents();
    }
}

#[cfg(test)]
impl ManifoldBody {
    pub(crate) fn for_test(position: Point, radius: FloatNum, half_extents: Vector) -> Self {
        Self {
            position,
            radius,
            half_extents,
            inverse_mass: 1.,
            inverse_moment: 1.,
            ..Default::default()
        }
    }
}

/// Contact data for the pair currently being resolved.
///
/// One instance lives inside `Collision` and is reset for every pair, the
/// fixed arrays are never reallocated. Only the first `contacts_count` entries
/// are meaningful.
#[derive(Clone, Debug, Default, Fields)]
#[r]
pub struct Manifold {
    #[w(vis(pub(crate)))]
    a: ManifoldBody,
    #[w(vis(pub(crate)))]
    b: ManifoldBody,
    /// Unit vector pointing from A toward B.
    #[w(set, vis(pub(crate)))]
    normal: Vector,
    #[w(set, vis(pub(crate)))]
    penetration: FloatNum,
    contacts: [Point; MAX_CONTACTS],
    radial_contacts_a: [Vector; MAX_CONTACTS],
    radial_contacts_b: [Vector; MAX_CONTACTS],
    impulses: [FloatNum; MAX_CONTACTS],
    contacts_count: usize,
}

impl Manifold {
    pub(crate) fn reset(&mut self) {
        self.normal = Vector::ZERO;
        self.penetration = 0.;
        self.impulses = [0.; MAX_CONTACTS];
        self.contacts_count = 0;
    }

    /// Reset and copy the scalars of both bodies.
    pub(crate) fn prepare(&mut self, a: &Body, b: &Body) {
        self.reset();
        self.a.copy_from(a);
        self.b.copy_from(b);
    }

    /// Contacts past the capacity are dropped.
    pub(crate) fn push_contact(&mut self, contact: Point) {
        if self.contacts_count == MAX_CONTACTS {
            return;
        }
        let i = self.contacts_count;
        self.contacts[i] = contact;
        self.radial_contacts_a[i] = contact - self.a.position;
        self.radial_contacts_b[i] = contact - self.b.position;
        self.contacts_count += 1;
    }

    pub(crate) fn clear_contacts(&mut self) {
        self.contacts_count = 0;
    }

    pub(crate) fn set_impulse(&mut self, index: usize, impulse: FloatNum) {
        self.impulses[index] = impulse;
    }

    /// Exchange the roles of A and B, radial vectors included.
    pub(crate) fn swap_bodies(&mut self) {
        std::mem::swap(&mut self.a, &mut self.b);
        std::mem::swap(&mut self.radial_contacts_a, &mut self.radial_contacts_b);
    }

    pub fn active_contacts(&self) -> &[Point] {
        &self.contacts[..self.contacts_count]
    }

    pub fn is_colliding(&self) -> bool {
        self.contacts_count > 0
    }
}
