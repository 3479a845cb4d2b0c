use sketchbody_macro_tools::Builder;

use crate::{math::FloatNum, meta::Mass};

/// Closed form moments of inertia, selected by name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InertiaShape {
    TwoPointMasses,
    RodCentre,
    RodEnd,
    CircularHoop,
    CircularDisk,
    Cylinder,
    Rectangle,
    PointMass,
}

/// Inputs for [`rotational_inertia`]. Each formula reads only the fields it needs.
#[derive(Builder, Clone, Copy, Debug, PartialEq)]
pub struct InertiaProps {
    mass: Mass,
    // second mass of `two-point-masses`
    other_mass: Mass,
    distance: FloatNum,
    length: FloatNum,
    radius: FloatNum,
    inner_radius: FloatNum,
    outer_radius: FloatNum,
    width: FloatNum,
    height: FloatNum,
}

impl InertiaShape {
    /// Unknown names are a point mass at `radius`.
    pub fn from_name(name: &str) -> Self {
        use InertiaShape::*;
        match name {
            "two-point-masses" => TwoPointMasses,
            "rod-centre" | "rod-center" => RodCentre,
            "rod-end" => RodEnd,
            "circular-hoop" => CircularHoop,
            "circular-disk" => CircularDisk,
            "cylinder" => Cylinder,
            "rectangle" => Rectangle,
            _ => PointMass,
        }
    }

    pub fn moment(self, props: &InertiaProps) -> Mass {
        use InertiaShape::*;
        let m = props.mass;
        match self {
            TwoPointMasses => {
                let total = props.mass + props.other_mass;
                if total <= 0. {
                    return 0.;
                }
                let reduced_mass = props.mass * props.other_mass / total;
                reduced_mass * props.distance.powi(2)
            }
            RodCentre => m * props.length.powi(2) / 12.,
            RodEnd => m * props.length.powi(2) / 3.,
            CircularHoop => m * props.radius.powi(2),
            CircularDisk => m * props.radius.powi(2) * 0.5,
            Cylinder => 0.5 * m * (props.inner_radius.powi(2) + props.outer_radius.powi(2)),
            Rectangle => m * (props.width.powi(2) + props.height.powi(2)) / 12.,
            PointMass => m * props.radius.powi(2),
        }
    }
}

pub fn rotational_inertia(name: &str, props: &InertiaProps) -> Mass {
    InertiaShape::from_name(name).moment(props)
}
