mod hooks;

use std::{cell::RefCell, fmt::Debug, rc::Rc};

use sketchbody_macro_tools::Fields;

use crate::{
    errors::{PhysicsError, Result},
    math::{point::Point, vector::Vector, FloatNum},
};

pub use hooks::{ResizeEvent, SubscriptionId};
use hooks::ResizeHooks;

/// Bounds shared between the editor geometry and the body simulating it.
pub type SharedBounds = Rc<RefCell<Bounds>>;

/// Axis aligned box with cached extents.
///
/// `radius` is always `max(half_width, half_height)` and `centroid` sits halfway
/// between `min` and `max`. `angle` is tracked separately and never re-derives
/// the box; rotated geometry belongs to the shape.
#[derive(Fields)]
#[r]
pub struct Bounds {
    min: Point,
    max: Point,
    width: FloatNum,
    height: FloatNum,
    half_width: FloatNum,
    half_height: FloatNum,
    radius: FloatNum,
    centroid: Point,
    angle: FloatNum,
    #[r(skip)]
    hooks: ResizeHooks,
}

impl Debug for Bounds {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bounds")
            .field("min", &self.min)
            .field("max", &self.max)
            .field("centroid", &self.centroid)
            .field("radius", &self.radius)
            .field("angle", &self.angle)
            .field("subscribers", &self.hooks.len())
            .finish()
    }
}

// cloned bounds start without subscribers
impl Clone for Bounds {
    fn clone(&self) -> Self {
        let mut bounds = Bounds::new(self.min, self.max);
        bounds.angle = self.angle;
        bounds
    }
}

fn envelope(points: &[Point]) -> Result<(Point, Point)> {
    let (first, rest) = points
        .split_first()
        .ok_or(PhysicsError::TooFewVertices { count: 0 })?;

    let (min, max) = rest.iter().fold((*first, *first), |(min, max), p| {
        (
            (min.x().min(p.x()), min.y().min(p.y())).into(),
            (max.x().max(p.x()), max.y().max(p.y())).into(),
        )
    });
    Ok((min, max))
}

impl Bounds {
    pub fn new(min: impl Into<Point>, max: impl Into<Point>) -> Self {
        let mut bounds = Bounds {
            min: Point::default(),
            max: Point::default(),
            width: 0.,
            height: 0.,
            half_width: 0.,
            half_height: 0.,
            radius: 0.,
            centroid: Point::default(),
            angle: 0.,
            hooks: Default::default(),
        };
        bounds.set_corners(min.into(), max.into());
        bounds
    }

    /// Envelope of the given points. Fails on an empty slice.
    pub fn from_polygon(points: &[Point]) -> Result<Self> {
        let (min, max) = envelope(points)?;
        Ok(Self::new(min, max))
    }

    pub fn shared(self) -> SharedBounds {
        Rc::new(RefCell::new(self))
    }

    fn set_corners(&mut self, a: Point, b: Point) {
        self.min = (a.x().min(b.x()), a.y().min(b.y())).into();
        self.max = (a.x().max(b.x()), a.y().max(b.y())).into();
        self.update_extents();
    }

    fn update_extents(&mut self) {
        self.width = self.max.x() - self.min.x();
        self.height = self.max.y() - self.min.y();
        self.half_width = self.width * 0.5;
        self.half_height = self.height * 0.5;
        self.radius = self.half_width.max(self.half_height);
        self.centroid = self.min.lerp(&self.max, 0.5);
    }

    /// Resize and notify every subscriber.
    pub fn resize(
        &mut self,
        min_x: FloatNum,
        min_y: FloatNum,
        max_x: FloatNum,
        max_y: FloatNum,
    ) -> ResizeEvent {
        self.set_corners((min_x, min_y).into(), (max_x, max_y).into());
        let event = ResizeEvent {
            min: self.min,
            max: self.max,
            centroid: self.centroid,
            radius: self.radius,
        };
        self.hooks.emit(&event);
        event
    }

    pub fn resize_as_polygon(&mut self, points: &[Point]) -> Result<ResizeEvent> {
        let (min, max) = envelope(points)?;
        Ok(self.resize(min.x(), min.y(), max.x(), max.y()))
    }

    /// Move without notifying subscribers.
    pub fn translate(&mut self, dx: FloatNum, dy: FloatNum) {
        let offset: Vector = (dx, dy).into();
        self.min += offset;
        self.max += offset;
        self.centroid += offset;
    }

    pub fn rotate(&mut self, delta_angle: FloatNum) {
        self.angle += delta_angle;
    }

    pub fn hit_test(&self, x: FloatNum, y: FloatNum) -> bool {
        x >= self.min.x() && x <= self.max.x() && y >= self.min.y() && y <= self.max.y()
    }

    /// Closed interval overlap on both axes, touching boxes collide.
    pub fn box_collision_test(&self, other_min: &Point, other_max: &Point) -> bool {
        Self::envelopes_overlap((&self.min, &self.max), (other_min, other_max))
    }

    pub fn envelopes_overlap(a: (&Point, &Point), b: (&Point, &Point)) -> bool {
        let ((min_a, max_a), (min_b, max_b)) = (a, b);
        min_a.x() <= max_b.x()
            && min_b.x() <= max_a.x()
            && min_a.y() <= max_b.y()
            && min_b.y() <= max_a.y()
    }

    pub fn area(&self) -> FloatNum {
        self.width * self.height
    }

    pub fn half_extents(&self) -> Vector {
        (self.half_width, self.half_height).into()
    }

    pub fn on_resize<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ResizeEvent) + 'static,
    {
        self.hooks.register_callback(callback)
    }

    /// Returns whether the subscription existed.
    pub fn off_resize(&mut self, id: SubscriptionId) -> bool {
        self.hooks.unregister_callback(id)
    }

    pub fn subscriber_count(&self) -> usize {
        self.hooks.len()
    }
}
