pub mod axis;
pub mod interval;
pub mod point;
pub mod vector;

pub(crate) mod num;

pub type FloatNum = f32;

pub const fn pi() -> FloatNum {
    std::f32::consts::PI
}

pub const fn tau() -> FloatNum {
    std::f32::consts::TAU
}
