//! Physical pixel values used for strides and transforms.
//!
//! Carousel offsets are whole physical pixels: a stride is measured from the
//! host layout as an integer and every committed transform is a multiple of
//! it. Live drag offsets are computed in `f32` and converted back with
//! [`Px::saturating_from_f32`].
//!
//! # Example
//!
//! ```
//! use revolve_ui::px::Px;
//!
//! let stride = Px::new(336);
//! let offset = -stride.saturating_mul_index(5);
//! assert_eq!(offset, Px::new(-1680));
//! ```

use std::{
    fmt,
    ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign},
};

/// A physical pixel value.
///
/// Negative values are allowed; carousel transforms are always zero or
/// negative because the track moves left as the index grows.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd, Eq, Ord, Hash)]
pub struct Px(pub i32);

impl Px {
    /// Zero pixels.
    pub const ZERO: Self = Self(0);

    /// The largest representable pixel value.
    pub const MAX: Self = Self(i32::MAX);

    /// The smallest representable pixel value.
    pub const MIN: Self = Self(i32::MIN);

    /// Creates a new `Px` from an `i32`.
    pub const fn new(value: i32) -> Self {
        Px(value)
    }

    /// Returns the raw `i32` value.
    ///
    /// ```
    /// use revolve_ui::px::Px;
    ///
    /// assert_eq!(Px::new(42).raw(), 42);
    /// ```
    pub fn raw(self) -> i32 {
        self.0
    }

    /// Returns the value as `f32`.
    pub fn to_f32(self) -> f32 {
        self.0 as f32
    }

    /// Returns `true` when the value is strictly greater than zero.
    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Creates a `Px` from an `f32`, truncating toward zero and saturating at
    /// the `i32` bounds. `NaN` maps to zero.
    ///
    /// ```
    /// use revolve_ui::px::Px;
    ///
    /// assert_eq!(Px::saturating_from_f32(42.7), Px::new(42));
    /// assert_eq!(Px::saturating_from_f32(f32::MAX), Px::MAX);
    /// ```
    pub fn saturating_from_f32(value: f32) -> Self {
        // `as` saturates on overflow and maps NaN to 0.
        Px(value as i32)
    }

    /// Rounds an `f32` to the nearest pixel, saturating at the `i32` bounds.
    pub fn saturating_round(value: f32) -> Self {
        Self::saturating_from_f32(value.round())
    }

    /// Saturating addition.
    pub fn saturating_add(self, rhs: Self) -> Self {
        Px(self.0.saturating_add(rhs.0))
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Px(self.0.saturating_sub(rhs.0))
    }

    /// Multiplies by an item count, saturating at the `i32` bounds.
    ///
    /// Used for `index × stride`; indices are `usize` and the product can
    /// exceed `i32` for absurd inputs.
    pub fn saturating_mul_index(self, times: usize) -> Self {
        if times == 0 {
            return Px::ZERO;
        }
        let times = i64::try_from(times).unwrap_or(i64::MAX);
        let value = i64::from(self.0).saturating_mul(times);
        Px(value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
    }
}

impl fmt::Display for Px {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}px", self.0)
    }
}

impl From<i32> for Px {
    fn from(value: i32) -> Self {
        Px(value)
    }
}

impl Add for Px {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.saturating_add(rhs)
    }
}

impl Sub for Px {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.saturating_sub(rhs)
    }
}

impl Neg for Px {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Px(self.0.saturating_neg())
    }
}

impl Mul<i32> for Px {
    type Output = Self;

    fn mul(self, rhs: i32) -> Self::Output {
        Px(self.0.saturating_mul(rhs))
    }
}

impl AddAssign for Px {
    fn add_assign(&mut self, rhs: Self) {
        *self = self.saturating_add(rhs);
    }
}

impl SubAssign for Px {
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.saturating_sub(rhs);
    }
}
