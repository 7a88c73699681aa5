use std::fmt::Debug;

use num_traits::{Bounded, Num, NumCast, ToPrimitive};

/// A trait for types that can be used for indexed coordinates.
///
/// This trait is sealed and cannot be implemented for external types. Every implementor names a
/// [`Distance`][IndexableNum::Distance] type wide enough that squared Euclidean distances between
/// any two in-range points, summed over any practical number of dimensions, cannot overflow. For
/// `u8` color channels that means `3 * 255^2` fits with plenty of headroom; for 32-bit integers
/// the accumulator is `i128`.
pub trait IndexableNum:
    private::Sealed
    + Num
    + NumCast
    + ToPrimitive
    + PartialOrd
    + Debug
    + Send
    + Sync
    + bytemuck::Pod
    + Bounded
{
    /// The signed accumulator used for coordinate differences and squared distances.
    type Distance: Num + PartialOrd + Copy + Debug + Default + Send + Sync;

    /// Losslessly convert a coordinate into the distance accumulator.
    fn widen(self) -> Self::Distance;
}

impl IndexableNum for i8 {
    type Distance = i64;

    #[inline]
    fn widen(self) -> i64 {
        self as i64
    }
}

impl IndexableNum for u8 {
    type Distance = i64;

    #[inline]
    fn widen(self) -> i64 {
        self as i64
    }
}

impl IndexableNum for i16 {
    type Distance = i64;

    #[inline]
    fn widen(self) -> i64 {
        self as i64
    }
}

impl IndexableNum for u16 {
    type Distance = i64;

    #[inline]
    fn widen(self) -> i64 {
        self as i64
    }
}

impl IndexableNum for i32 {
    type Distance = i128;

    #[inline]
    fn widen(self) -> i128 {
        self as i128
    }
}

impl IndexableNum for u32 {
    type Distance = i128;

    #[inline]
    fn widen(self) -> i128 {
        self as i128
    }
}

impl IndexableNum for f32 {
    type Distance = f64;

    #[inline]
    fn widen(self) -> f64 {
        self as f64
    }
}

impl IndexableNum for f64 {
    type Distance = f64;

    #[inline]
    fn widen(self) -> f64 {
        self
    }
}

// https://rust-lang.github.io/api-guidelines/future-proofing.html#sealed-traits-protect-against-downstream-implementations-c-sealed
mod private {
    pub trait Sealed {}

    impl Sealed for i8 {}
    impl Sealed for u8 {}
    impl Sealed for i16 {}
    impl Sealed for u16 {}
    impl Sealed for i32 {}
    impl Sealed for u32 {}
    impl Sealed for f32 {}
    impl Sealed for f64 {}
}

#[cfg(test)]
mod test {
    use super::IndexableNum;

    #[test]
    fn widened_extremes_do_not_overflow() {
        let d = u8::MAX.widen() - u8::MIN.widen();
        assert_eq!(d * d * 3, 195_075);

        let d = u32::MAX.widen() - u32::MIN.widen();
        let sq = d * d;
        assert!(sq.checked_mul(3).is_some());

        let d = i32::MIN.widen() - i32::MAX.widen();
        assert!(d < 0);
        assert!((d * d).checked_mul(3).is_some());
    }
}
