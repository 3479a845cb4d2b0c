mod material;

use std::ops::Deref;

use crate::math::{num::clamped_recip, FloatNum};

pub use material::{Material, MaterialBuilder};

pub type Mass = FloatNum;

/// A value stored next to its inverse. Non positive values get an inverse of
/// exactly zero, which the solver reads as immovable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ValueWithInv {
    value: FloatNum,
    inv_value: FloatNum,
}

impl Deref for ValueWithInv {
    type Target = FloatNum;
    fn deref(&self) -> &Self::Target {
        &self.value
    }
}

impl From<FloatNum> for ValueWithInv {
    fn from(value: FloatNum) -> Self {
        Self {
            value,
            inv_value: clamped_recip(value),
        }
    }
}

impl ValueWithInv {
    #[inline]
    pub fn value(&self) -> FloatNum {
        self.value
    }

    #[inline]
    pub fn inv(&self) -> FloatNum {
        self.inv_value
    }

    pub fn set_value(&mut self, new_value: FloatNum) {
        *self = new_value.into();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_with_inv() {
        let mut mass: ValueWithInv = 4.0.into();
        assert_eq!(*mass, 4.);
        assert_eq!(mass.inv(), 0.25);

        mass.set_value(-1.);
        assert_eq!(mass.value(), -1.);
        assert_eq!(mass.inv(), 0.);
    }
}
