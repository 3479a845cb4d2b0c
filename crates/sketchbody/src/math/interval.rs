use super::FloatNum;

/// Closed range `[min, max]`, usually the projection of a shape onto an axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Interval {
    pub(crate) min: FloatNum,
    pub(crate) max: FloatNum,
}

impl Interval {
    #[inline]
    pub fn new(min: FloatNum, max: FloatNum) -> Self {
        if min > max {
            Self { min: max, max: min }
        } else {
            Self { min, max }
        }
    }

    #[inline]
    pub fn min(&self) -> FloatNum {
        self.min
    }

    #[inline]
    pub fn max(&self) -> FloatNum {
        self.max
    }

    #[inline]
    pub fn length(&self) -> FloatNum {
        self.max - self.min
    }

    /// Touching intervals overlap.
    #[inline]
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.min <= other.max && other.min <= self.max
    }

    /// Length of the shared range, zero when the intervals do not overlap.
    pub fn overlap(&self, other: &Interval) -> FloatNum {
        if !self.overlaps(other) {
            return 0.;
        }
        self.max.min(other.max) - self.min.max(other.min)
    }

    /// `other` lies strictly inside self.
    pub fn contains_exclusive(&self, other: &Interval) -> bool {
        self.min < other.min && other.max < self.max
    }

    /// Grow to cover `value`.
    pub fn include(&mut self, value: FloatNum) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }
}
