use std::{
    fmt::Display,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

use super::{vector::Vector, FloatNum};

#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    pub(crate) x: FloatNum,
    pub(crate) y: FloatNum,
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl PartialEq for Point {
    fn eq(&self, other: &Self) -> bool {
        ((self.x - other.x).abs() < FloatNum::EPSILON)
            && ((self.y - other.y).abs() < FloatNum::EPSILON)
    }
}

impl Point {
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
    pub fn set_x(&mut self, x_reducer: impl FnOnce(FloatNum) -> FloatNum) {
        self.x = x_reducer(self.x)
    }

    #[inline]
    pub fn set_y(&mut self, y_reducer: impl FnOnce(FloatNum) -> FloatNum) {
        self.y = y_reducer(self.y)
    }

    #[inline]
    pub fn to_vector(self) -> Vector {
        (self.x, self.y).into()
    }

    /// Linear interpolation, `t = 0` yields self and `t = 1` yields `other`.
    #[inline]
    pub fn lerp(&self, other: &Point, t: FloatNum) -> Point {
        (
            self.x + (other.x - self.x) * t,
            self.y + (other.y - self.y) * t,
        )
            .into()
    }

    /// Rotate around `pivot` by `rad`.
    pub fn rotate_about(&self, pivot: &Point, rad: FloatNum) -> Point {
        let offset: Vector = (pivot, self).into();
        *pivot + offset.affine_transformation_rotate(rad)
    }

    pub fn distance_squared(&self, other: &Point) -> FloatNum {
        Vector::from((self, other)).abs_squared()
    }
}

impl From<(FloatNum, FloatNum)> for Point {
    fn from((x, y): (FloatNum, FloatNum)) -> Self {
        Point { x, y }
    }
}

impl From<[FloatNum; 2]> for Point {
    fn from([x, y]: [FloatNum; 2]) -> Self {
        Point { x, y }
    }
}

impl From<Vector> for Point {
    fn from(value: Vector) -> Self {
        value.to_point()
    }
}

impl Add<Vector> for Point {
    type Output = Point;
    fn add(self, rhs: Vector) -> Self::Output {
        (self.x + rhs.x(), self.y + rhs.y()).into()
    }
}

impl AddAssign<Vector> for Point {
    fn add_assign(&mut self, rhs: Vector) {
        self.x += rhs.x();
        self.y += rhs.y();
    }
}

impl Sub<Vector> for Point {
    type Output = Point;
    fn sub(self, rhs: Vector) -> Self::Output {
        (self.x - rhs.x(), self.y - rhs.y()).into()
    }
}

impl SubAssign<Vector> for Point {
    fn sub_assign(&mut self, rhs: Vector) {
        self.x -= rhs.x();
        self.y -= rhs.y();
    }
}

// vector pointing from rhs to self
impl Sub<Point> for Point {
    type Output = Vector;
    fn sub(self, rhs: Point) -> Self::Output {
        (rhs, self).into()
    }
}
