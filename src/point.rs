//! A fixed-size coordinate tuple.

use std::cmp::Ordering;
use std::ops::Index;

use geo_traits::{CoordTrait, Dimensions};
use num_traits::Zero;
use rgb::RGB8;

use crate::error::{MosaicIndexError, Result};
use crate::r#type::IndexableNum;

/// A point with `D` coordinates of type `N`.
///
/// Points are ordered lexicographically over their dimensions: the first differing coordinate
/// decides, and points with all coordinates equal compare equal. This order is also the
/// tie-break used by the [`KDTree`][crate::kdtree::KDTree] both when partitioning and when two
/// candidates are equally distant from a query.
///
/// Float coordinates must not be NaN.
#[derive(Debug, Clone, Copy, PartialEq)]
#[repr(transparent)]
pub struct Point<N: IndexableNum, const D: usize> {
    coords: [N; D],
}

impl<N: IndexableNum, const D: usize> Point<N, D> {
    /// Create a new point from its coordinates.
    pub const fn new(coords: [N; D]) -> Self {
        Self { coords }
    }

    /// Create a point from any [`CoordTrait`] implementation with exactly `D` dimensions.
    pub fn try_from_coord(coord: &impl CoordTrait<T = N>) -> Result<Self> {
        let actual = coord.dim().size();
        if actual != D {
            return Err(MosaicIndexError::DimensionMismatch {
                expected: D,
                actual,
            });
        }
        Ok(Self::new(std::array::from_fn(|i| coord.nth_or_panic(i))))
    }

    /// The coordinate along dimension `i`.
    ///
    /// Panics if `i >= D`.
    #[inline]
    pub fn dimension(&self, i: usize) -> N {
        self.coords[i]
    }

    /// All coordinates of this point.
    #[inline]
    pub fn coords(&self) -> &[N; D] {
        &self.coords
    }

    /// Lexicographic comparison across dimensions `0..D`.
    pub fn compare(&self, other: &Self) -> Ordering {
        for (a, b) in self.coords.iter().zip(other.coords.iter()) {
            match a.partial_cmp(b) {
                Some(Ordering::Equal) | None => continue,
                Some(ord) => return ord,
            }
        }
        Ordering::Equal
    }

    /// Squared Euclidean distance to `other`, accumulated in [`IndexableNum::Distance`].
    #[inline]
    pub fn squared_distance(&self, other: &Self) -> N::Distance {
        let mut d = N::Distance::zero();
        for i in 0..D {
            let diff = self.coords[i].widen() - other.coords[i].widen();
            d = d + diff * diff;
        }
        d
    }
}

impl<N: IndexableNum, const D: usize> Index<usize> for Point<N, D> {
    type Output = N;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.coords[index]
    }
}

impl<N: IndexableNum, const D: usize> From<[N; D]> for Point<N, D> {
    fn from(coords: [N; D]) -> Self {
        Self::new(coords)
    }
}

impl<N: IndexableNum, const D: usize> PartialOrd for Point<N, D> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl<N: IndexableNum + Eq, const D: usize> Eq for Point<N, D> {}

impl<N: IndexableNum + Ord, const D: usize> Ord for Point<N, D> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl From<RGB8> for Point<u8, 3> {
    fn from(color: RGB8) -> Self {
        Self::new([color.r, color.g, color.b])
    }
}

impl From<Point<u8, 3>> for RGB8 {
    fn from(point: Point<u8, 3>) -> Self {
        let [r, g, b] = point.coords;
        RGB8 { r, g, b }
    }
}

// The derive macros cannot see through the generic `N` and const `D` to prove these hold.
//
// SAFETY: `Point` is `repr(transparent)` over `[N; D]`, and an all-zero `[N; D]` is valid for
// any `N: Pod`.
unsafe impl<N: IndexableNum, const D: usize> bytemuck::Zeroable for Point<N, D> {}
// SAFETY: `repr(transparent)` over `[N; D]`, which is `Pod` for any `N: Pod`; it is `Copy`,
// has no padding, and every bit pattern is valid.
unsafe impl<N: IndexableNum, const D: usize> bytemuck::Pod for Point<N, D> {}

impl<N: IndexableNum> CoordTrait for Point<N, 2> {
    type T = N;

    fn dim(&self) -> Dimensions {
        Dimensions::Xy
    }

    fn x(&self) -> Self::T {
        self.coords[0]
    }

    fn y(&self) -> Self::T {
        self.coords[1]
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0 | 1 => self.coords[n],
            _ => panic!("Invalid index of coord"),
        }
    }
}

impl<N: IndexableNum> CoordTrait for Point<N, 3> {
    type T = N;

    fn dim(&self) -> Dimensions {
        Dimensions::Xyz
    }

    fn x(&self) -> Self::T {
        self.coords[0]
    }

    fn y(&self) -> Self::T {
        self.coords[1]
    }

    fn nth_or_panic(&self, n: usize) -> Self::T {
        match n {
            0..=2 => self.coords[n],
            _ => panic!("Invalid index of coord"),
        }
    }
}

#[cfg(test)]
mod test {
    use std::cmp::Ordering;

    use rgb::RGB8;

    use super::Point;
    use crate::MosaicIndexError;

    #[test]
    fn orders_lexicographically() {
        let a = Point::new([1, 5, 9]);
        let b = Point::new([1, 6, 0]);
        let c = Point::new([2, 0, 0]);

        assert_eq!(a.compare(&b), Ordering::Less);
        assert_eq!(c.compare(&b), Ordering::Greater);
        assert_eq!(a.compare(&a), Ordering::Equal);
        assert!(a < b && b < c);

        let mut points = vec![c, a, b];
        points.sort();
        assert_eq!(points, vec![a, b, c]);
    }

    #[test]
    fn float_points_compare() {
        let a = Point::new([0.5f64, 2.0]);
        let b = Point::new([0.5f64, 3.0]);
        assert_eq!(a.compare(&b), Ordering::Less);
        assert!(a < b);
    }

    #[test]
    fn dimension_access() {
        let p = Point::new([3i16, -4]);
        assert_eq!(p.dimension(0), 3);
        assert_eq!(p[1], -4);
        assert_eq!(p.coords(), &[3, -4]);
    }

    #[test]
    #[should_panic]
    fn dimension_out_of_range_panics() {
        let p = Point::new([3i16, -4]);
        let _ = p.dimension(2);
    }

    #[test]
    fn squared_distance_uses_wide_accumulator() {
        let black = Point::new([0u8, 0, 0]);
        let white = Point::new([255u8, 255, 255]);
        assert_eq!(black.squared_distance(&white), 195_075);
        assert_eq!(white.squared_distance(&black), 195_075);

        let a = Point::new([i32::MIN, 0]);
        let b = Point::new([i32::MAX, 0]);
        let d = (i32::MAX as i128) - (i32::MIN as i128);
        assert_eq!(a.squared_distance(&b), d * d);
    }

    #[test]
    fn rgb_round_trip() {
        let color = RGB8 { r: 10, g: 20, b: 30 };
        let p: Point<u8, 3> = color.into();
        assert_eq!(p.coords(), &[10, 20, 30]);
        assert_eq!(RGB8::from(p), color);
    }

    #[test]
    fn from_coord_checks_dimensions() {
        let p2 = Point::new([1.0f64, 2.0]);
        let p3 = Point::new([1.0f64, 2.0, 3.0]);

        let ok = Point::<f64, 2>::try_from_coord(&p2).unwrap();
        assert_eq!(ok, p2);

        let err = Point::<f64, 2>::try_from_coord(&p3).unwrap_err();
        assert_eq!(
            err,
            MosaicIndexError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        );
    }

    #[test]
    fn flat_coordinate_view() {
        let points = [Point::new([1u16, 2]), Point::new([3u16, 4])];
        let flat: &[u16] = bytemuck::cast_slice(&points);
        assert_eq!(flat, &[1, 2, 3, 4]);
    }
}
