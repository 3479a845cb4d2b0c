use crate::{
    body::{BodyStore, ID},
    math::FloatNum,
};

/// Position level constraints applied before collision resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Constraint {
    /// Keep two body positions `distance` apart.
    Distance {
        body_a: ID,
        body_b: ID,
        distance: FloatNum,
    },
}

impl Constraint {
    pub fn distance(body_a: ID, body_b: ID, distance: FloatNum) -> Self {
        Constraint::Distance {
            body_a,
            body_b,
            distance,
        }
    }

    pub fn bodies(&self) -> (ID, ID) {
        match *self {
            Constraint::Distance { body_a, body_b, .. } => (body_a, body_b),
        }
    }

    /// Moves the bodies directly, each by its share of the inverse mass. Does
    /// nothing when a body is missing, both are immovable or they coincide.
    pub fn apply(&self, bodies: &mut BodyStore) {
        match *self {
            Constraint::Distance {
                body_a,
                body_b,
                distance,
            } => {
                let Some((a, b)) = bodies.pair_mut(body_a, body_b) else {
                    return;
                };

                let a_to_b = b.position() - a.position();
                let length = a_to_b.abs();
                let inverse_mass_a = a.inverse_mass();
                let inverse_mass_b = b.inverse_mass();
                let inverse_mass_sum = inverse_mass_a + inverse_mass_b;

                if length == 0. || inverse_mass_sum <= 0. {
                    return;
                }

                let correction = a_to_b * ((length - distance) / length / inverse_mass_sum);
                a.translate(correction * inverse_mass_a);
                b.translate(-correction * inverse_mass_b);
            }
        }
    }
}
