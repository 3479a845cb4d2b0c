use std::{
    fmt::Display,
    ops::{Add, AddAssign, BitXor, Div, DivAssign, Mul, MulAssign, Neg, Not, Shr, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use super::{point::Point, FloatNum};
use crate::errors::PhysicsError;

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Vector {
    pub(crate) x: FloatNum,
    pub(crate) y: FloatNum,
}

impl Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{ x: {}, y: {} }}", self.x, self.y)
    }
}

impl PartialEq for Vector {
    fn eq(&self, other: &Self) -> bool {
        (self.x - other.x).abs() < FloatNum::EPSILON && (self.y - other.y).abs() < FloatNum::EPSILON
    }
}

impl Vector {
    pub const ZERO: Vector = Vector::new(0., 0.);

    #[inline]
    pub const fn new(x: FloatNum, y: FloatNum) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn x(&self) -> FloatNum {
        self.x
    }

    #[inline]
    pub fn y(&self) -> FloatNum {
        self.y
    }

    #[inline]
    pub fn set_x(&mut self, reducer: impl FnOnce(FloatNum) -> FloatNum) {
        self.x = reducer(self.x);
    }

    #[inline]
    pub fn set_y(&mut self, reducer: impl FnOnce(FloatNum) -> FloatNum) {
        self.y = reducer(self.y);
    }

    #[inline]
    pub fn to_point(&self) -> Point {
        (self.x, self.y).into()
    }

    #[inline]
    pub fn abs(&self) -> FloatNum {
        self.x.hypot(self.y)
    }

    #[inline]
    pub fn abs_squared(&self) -> FloatNum {
        self.x * self.x + self.y * self.y
    }

    /// Unit vector in the same direction. A zero vector yields NaN components,
    /// use [`Vector::try_normalize`] when the length is not known to be positive.
    pub fn normalize(&self) -> Vector {
        let shrink = self.abs().recip();
        (self.x * shrink, self.y * shrink).into()
    }

    pub fn try_normalize(&self) -> Result<Vector, PhysicsError> {
        let length = self.abs();
        if length <= FloatNum::EPSILON || !length.is_finite() {
            return Err(PhysicsError::DegenerateVector);
        }
        Ok(*self * length.recip())
    }

    /// (x, y) -> (y, -x)
    #[inline]
    pub fn perpendicular_clockwise(&self) -> Vector {
        (self.y, -self.x).into()
    }

    /// (x, y) -> (-y, x)
    #[inline]
    pub fn perpendicular_anticlockwise(&self) -> Vector {
        (-self.y, self.x).into()
    }

    #[inline]
    pub fn affine_transformation_rotate(&self, rad: FloatNum) -> Vector {
        let (s, c) = rad.sin_cos();
        (self.x * c - self.y * s, self.x * s + self.y * c).into()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.x == 0. && self.y == 0.
    }

    #[inline]
    pub fn set_zero(&mut self) {
        self.x = 0.;
        self.y = 0.;
    }

    /// Cross product of a scalar angular velocity (z axis) with this vector.
    #[inline]
    pub fn cross_scalar(angular: FloatNum, r: Vector) -> Vector {
        (-angular * r.y, angular * r.x).into()
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(FloatNum, FloatNum)> for Vector {
    fn from((x, y): (FloatNum, FloatNum)) -> Self {
        Self { x, y }
    }
}

impl From<[FloatNum; 2]> for Vector {
    fn from([x, y]: [FloatNum; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Vector> for (FloatNum, FloatNum) {
    fn from(value: Vector) -> Self {
        (value.x, value.y)
    }
}

// vector from p1 to p2
impl From<(Point, Point)> for Vector {
    fn from((p1, p2): (Point, Point)) -> Self {
        (p2.x() - p1.x(), p2.y() - p1.y()).into()
    }
}

impl From<(&Point, &Point)> for Vector {
    fn from((p1, p2): (&Point, &Point)) -> Self {
        (p2.x() - p1.x(), p2.y() - p1.y()).into()
    }
}

macro_rules! impl_binary_ops {
    ($($rhs:ty),*) => {
        $(
            impl Add<$rhs> for Vector {
                type Output = Vector;
                fn add(self, rhs: $rhs) -> Self::Output {
                    (self.x + rhs.x, self.y + rhs.y).into()
                }
            }

            impl AddAssign<$rhs> for Vector {
                fn add_assign(&mut self, rhs: $rhs) {
                    self.x += rhs.x;
                    self.y += rhs.y;
                }
            }

            impl Sub<$rhs> for Vector {
                type Output = Vector;
                fn sub(self, rhs: $rhs) -> Self::Output {
                    (self.x - rhs.x, self.y - rhs.y).into()
                }
            }

            impl SubAssign<$rhs> for Vector {
                fn sub_assign(&mut self, rhs: $rhs) {
                    self.x -= rhs.x;
                    self.y -= rhs.y;
                }
            }
        )*
    };
}

impl_binary_ops![Vector, &Vector];

// dot product
impl Mul<Vector> for Vector {
    type Output = FloatNum;
    fn mul(self, rhs: Vector) -> Self::Output {
        self.x * rhs.x + self.y * rhs.y
    }
}

impl Mul<FloatNum> for Vector {
    type Output = Vector;
    fn mul(self, rhs: FloatNum) -> Self::Output {
        (self.x * rhs, self.y * rhs).into()
    }
}

impl MulAssign<FloatNum> for Vector {
    fn mul_assign(&mut self, rhs: FloatNum) {
        self.x *= rhs;
        self.y *= rhs;
    }
}

impl Div<FloatNum> for Vector {
    type Output = Vector;
    fn div(self, rhs: FloatNum) -> Self::Output {
        (self.x / rhs, self.y / rhs).into()
    }
}

impl DivAssign<FloatNum> for Vector {
    fn div_assign(&mut self, rhs: FloatNum) {
        self.x /= rhs;
        self.y /= rhs;
    }
}

impl Neg for Vector {
    type Output = Vector;
    fn neg(self) -> Self::Output {
        (-self.x, -self.y).into()
    }
}

impl Not for Vector {
    type Output = Vector;
    fn not(self) -> Self::Output {
        self.perpendicular_clockwise()
    }
}

// z component of the cross product
impl BitXor for Vector {
    type Output = FloatNum;
    fn bitxor(self, rhs: Self) -> Self::Output {
        self.x * rhs.y - self.y * rhs.x
    }
}

// length of the projection of self onto rhs
impl Shr<Vector> for Vector {
    type Output = FloatNum;
    fn shr(self, rhs: Vector) -> Self::Output {
        self * rhs * rhs.abs().recip()
    }
}
