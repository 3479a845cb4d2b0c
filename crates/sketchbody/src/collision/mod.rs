//! Pairwise collision detection and response.
//!
//! Every distinct pair runs through a broad phase envelope test, then the
//! narrow phase matching the two shapes, then the solver: normal impulse,
//! friction impulse and positional correction.

mod clip;
mod manifold;
mod narrow;
mod solver;

use sketchbody_macro_tools::Deref;

use crate::{body::Body, bounds::Bounds, shape::Shape};

pub use clip::{clip, ClipPoints};
pub use manifold::{Manifold, ManifoldBody, MAX_CONTACTS};
pub use solver::{
    apply_friction_impulse, resolve_collision, separate_colliding_bodies, SolverParameters,
    SolverParametersBuilder,
};

/// Envelope test, touching counts as overlap.
pub fn broad_phase(a: &Body, b: &Body) -> bool {
    let (min_a, max_a) = a.envelope();
    let (min_b, max_b) = b.envelope();
    Bounds::envelopes_overlap((&min_a, &max_a), (&min_b, &max_b))
}

/// Fill `manifold` for a pair whose scalars were already copied in. Shape
/// combinations without a test never collide.
pub fn narrow_phase(manifold: &mut Manifold, shape_a: &Shape, shape_b: &Shape) -> bool {
    match (shape_a, shape_b) {
        (Shape::Circle, Shape::Circle) => narrow::circle_circle(manifold),
        (Shape::Box, Shape::Box) => narrow::box_box(manifold),
        (Shape::Box, Shape::Circle) => narrow::box_circle(manifold),
        (Shape::Circle, Shape::Box) => narrow::circle_box(manifold),
        (Shape::Polygon(a), Shape::Polygon(b)) => narrow::polygon_polygon(manifold, a, b),
        _ => false,
    }
}

/// Owns the manifold workspace reused for every pair.
#[derive(Debug, Default, Deref)]
pub struct Collision {
    #[deref]
    manifold: Manifold,
    parameters: SolverParameters,
    last_contacts: usize,
    last_colliding_pairs: usize,
}

impl Collision {
    pub fn new(parameters: SolverParameters) -> Self {
        Self {
            parameters,
            ..Default::default()
        }
    }

    pub fn parameters(&self) -> &SolverParameters {
        &self.parameters
    }

    pub fn set_parameters(&mut self, parameters: SolverParameters) {
        self.parameters = parameters;
    }

    /// Contacts found by the last [`Collision::resolve_all`].
    pub fn last_contacts(&self) -> usize {
        self.last_contacts
    }

    pub fn last_colliding_pairs(&self) -> usize {
        self.last_colliding_pairs
    }

    /// Detect without responding. The manifold keeps the result.
    pub fn detect(&mut self, a: &Body, b: &Body) -> bool {
        if !broad_phase(a, b) {
            return false;
        }
        self.manifold.prepare(a, b);
        narrow_phase(&mut self.manifold, a.shape(), b.shape())
    }

    /// Detect and respond for one pair. Returns whether they collided.
    pub fn resolve_pair(&mut self, a: &mut Body, b: &mut Body) -> bool {
        if !broad_phase(a, b) {
            return false;
        }

        self.manifold.prepare(a, b);
        if self.manifold.a().inverse_mass() + self.manifold.b().inverse_mass() <= 0. {
            return false;
        }

        if !narrow_phase(&mut self.manifold, a.shape(), b.shape()) {
            return false;
        }

        tracing::trace!(
            a = a.id(),
            b = b.id(),
            normal = %self.manifold.normal(),
            penetration = self.manifold.penetration(),
            contacts = self.manifold.contacts_count(),
            "collision"
        );

        resolve_collision(&mut self.manifold, a, b, &self.parameters);
        apply_friction_impulse(&self.manifold, a, b);
        separate_colliding_bodies(&self.manifold, a, b, &self.parameters);

        a.push_debug_contacts(self.manifold.active_contacts());
        b.push_debug_contacts(self.manifold.active_contacts());
        self.last_contacts += self.manifold.contacts_count();
        true
    }

    /// Every distinct pair `(i, j)` with `i < j`, in order.
    pub fn resolve_all(&mut self, bodies: &mut [Body]) -> usize {
        self.last_contacts = 0;
        self.last_colliding_pairs = 0;

        for i in 0..bodies.len() {
            for j in (i + 1)..bodies.len() {
                let (left, right) = bodies.split_at_mut(j);
                if self.resolve_pair(&mut left[i], &mut right[0]) {
                    self.last_colliding_pairs += 1;
                }
            }
        }

        self.last_colliding_pairs
    }
}
