use std::ops::Not;

use super::vector::Vector;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisDirection {
    X,
    Y,
}

impl Not for AxisDirection {
    type Output = Self;
    fn not(self) -> Self::Output {
        use AxisDirection::*;
        match self {
            X => Y,
            Y => X,
        }
    }
}

impl From<AxisDirection> for Vector {
    fn from(axis: AxisDirection) -> Self {
        use AxisDirection::*;
        match axis {
            X => (1., 0.).into(),
            Y => (0., 1.).into(),
        }
    }
}

impl AxisDirection {
    pub fn component(self, vector: Vector) -> super::FloatNum {
        match self {
            AxisDirection::X => vector.x(),
            AxisDirection::Y => vector.y(),
        }
    }
}
