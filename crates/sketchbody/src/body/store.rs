use super::{Body, ID};

/// Hands out increasing ids, never reusing one.
#[derive(Debug, Default, Clone)]
pub(crate) struct IDDispatcher {
    current_id: ID,
}

impl IDDispatcher {
    pub(crate) fn gen_id(&mut self) -> ID {
        self.current_id += 1;
        self.current_id
    }
}

/// Bodies in insertion order, addressed by id.
#[derive(Debug, Default)]
pub struct BodyStore {
    bodies: Vec<Body>,
    id_dispatcher: IDDispatcher,
}

impl BodyStore {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bodies: Vec::with_capacity(capacity),
            id_dispatcher: Default::default(),
        }
    }

    pub fn push(&mut self, mut body: Body) -> ID {
        let id = self.id_dispatcher.gen_id();
        body.inject_id(id);
        self.bodies.push(body);
        id
    }

    fn index_of(&self, id: ID) -> Option<usize> {
        self.bodies.iter().position(|body| body.id() == id)
    }

    pub fn remove(&mut self, id: ID) -> Option<Body> {
        let index = self.index_of(id)?;
        Some(self.bodies.remove(index))
    }

    pub fn contains(&self, id: ID) -> bool {
        self.index_of(id).is_some()
    }

    pub fn get(&self, id: ID) -> Option<&Body> {
        self.bodies.iter().find(|body| body.id() == id)
    }

    pub fn get_mut(&mut self, id: ID) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|body| body.id() == id)
    }

    /// Two distinct bodies borrowed mutably at once.
    pub fn pair_mut(&mut self, a: ID, b: ID) -> Option<(&mut Body, &mut Body)> {
        let i = self.index_of(a)?;
        let j = self.index_of(b)?;
        if i == j {
            return None;
        }
        if i < j {
            let (left, right) = self.bodies.split_at_mut(j);
            Some((&mut left[i], &mut right[0]))
        } else {
            let (left, right) = self.bodies.split_at_mut(i);
            Some((&mut right[0], &mut left[j]))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Body> {
        self.bodies.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Body> {
        self.bodies.iter_mut()
    }

    pub fn as_mut_slice(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn clear(&mut self) {
        self.bodies.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bounds::Bounds, meta::Material, shape::Shape};

    fn body_at(x: f32) -> Body {
        Body::new(
            Bounds::new((x, 0.), (x + 1., 1.)).shared(),
            Shape::Box,
            Material::default(),
        )
    }

    #[test]
    fn test_ids_are_not_reused() {
        let mut store = BodyStore::default();
        let a = store.push(body_at(0.));
        let b = store.push(body_at(2.));
        assert_ne!(a, b);

        assert!(store.remove(a).is_some());
        assert!(!store.contains(a));
        let c = store.push(body_at(4.));
        assert_ne!(a, c);
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(c).map(|body| body.id()), Some(c));
    }

    #[test]
    fn test_pair_mut_keeps_argument_order() {
        let mut store = BodyStore::default();
        let a = store.push(body_at(0.));
        let b = store.push(body_at(2.));

        let (second, first) = store.pair_mut(b, a).unwrap();
        assert_eq!(second.id(), b);
        assert_eq!(first.id(), a);
        assert!(store.pair_mut(a, a).is_none());
        assert!(store.pair_mut(a, 99).is_none());
    }
}
