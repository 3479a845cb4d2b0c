use crate::math::{point::Point, FloatNum};

pub type SubscriptionId = u32;

/// Geometry of a bounds right after it was resized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResizeEvent {
    pub min: Point,
    pub max: Point,
    pub centroid: Point,
    pub radius: FloatNum,
}

struct ResizeCallback {
    id: SubscriptionId,
    callback: Box<dyn FnMut(&ResizeEvent)>,
}

impl ResizeCallback {
    fn call(&mut self, event: &ResizeEvent) {
        (self.callback)(event)
    }
}

#[derive(Default)]
pub(crate) struct ResizeHooks {
    callback_id_count: SubscriptionId,
    callbacks: Vec<ResizeCallback>,
}

impl ResizeHooks {
    pub fn register_callback<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ResizeEvent) + 'static,
    {
        self.callback_id_count += 1;
        let id = self.callback_id_count;
        self.callbacks.push(ResizeCallback {
            id,
            callback: Box::new(callback),
        });
        id
    }

    pub fn unregister_callback(&mut self, callback_id: SubscriptionId) -> bool {
        let count = self.callbacks.len();
        self.callbacks.retain(|callback| callback.id != callback_id);
        count != self.callbacks.len()
    }

    pub fn emit(&mut self, event: &ResizeEvent) {
        for callback in self.callbacks.iter_mut() {
            callback.call(event);
        }
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }
}
