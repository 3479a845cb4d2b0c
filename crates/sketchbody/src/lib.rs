pub mod body;
pub mod bounds;
pub mod collision;
pub mod errors;
pub mod math;
pub mod meta;
pub mod physics;
pub mod shape;

pub mod prelude {
    pub use super::body::{Body, BodyStore, ID};
    pub use super::bounds::{Bounds, ResizeEvent, SharedBounds, SubscriptionId};
    pub use super::collision::{Collision, Manifold, SolverParameters};
    pub use super::errors::{PhysicsError, Result};
    pub use super::math::{interval::Interval, point::Point, vector::Vector, FloatNum};
    pub use super::meta::{Mass, Material, MaterialBuilder};
    pub use super::physics::{
        gravitate, rotational_inertia, Constraint, ForceField, InertiaProps,
        InertiaPropsBuilder, Integrator, Physics, Setting, SettingValue, Settings,
        SettingsBuilder,
    };
    pub use super::shape::{Polygon, Projector, Shape, ShapeKind};
}
