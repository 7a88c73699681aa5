use std::cmp::Ordering;

use crate::kdtree::KDTree;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// Subtrees at least this large are constructed on separate rayon tasks.
#[cfg(feature = "rayon")]
const PARALLEL_THRESHOLD: usize = 4096;

/// A builder to create a [`KDTree`].
///
/// ```
/// use mosaic_index::kdtree::{KDTreeBuilder, KDTreeIndex};
/// use mosaic_index::Point;
///
/// let mut builder = KDTreeBuilder::<i32, 2>::new(3);
/// builder.add_coords([0, 0]);
/// builder.add_coords([10, 10]);
/// builder.add_coords([4, 7]);
/// let tree = builder.finish();
///
/// assert_eq!(tree.nearest_id(&Point::new([5, 5])).unwrap(), 2);
/// ```
pub struct KDTreeBuilder<N: IndexableNum, const D: usize> {
    points: Vec<Point<N, D>>,
    ids: Vec<u32>,
    num_items: usize,
}

impl<N: IndexableNum, const D: usize> KDTreeBuilder<N, D> {
    /// Create a new builder expecting exactly `num_items` points.
    pub fn new(num_items: usize) -> Self {
        assert!(D > 0, "A KDTree needs at least one dimension.");
        assert!(num_items <= u32::MAX as usize);

        Self {
            points: Vec::with_capacity(num_items),
            ids: Vec::with_capacity(num_items),
            num_items,
        }
    }

    /// Add a point to the index, returning its insertion index.
    pub fn add(&mut self, point: Point<N, D>) -> usize {
        let index = self.points.len();
        assert!(
            index < self.num_items,
            "Cannot add more than {} items.",
            self.num_items
        );

        self.points.push(point);
        self.ids.push(index as u32);
        index
    }

    /// Add a point given by its raw coordinates.
    pub fn add_coords(&mut self, coords: [N; D]) -> usize {
        self.add(Point::new(coords))
    }

    /// Consume this builder, performing the k-d sort and generating a KDTree ready for queries.
    pub fn finish(mut self) -> KDTree<N, D> {
        assert_eq!(
            self.points.len(),
            self.num_items,
            "Added {} items when expected {}.",
            self.points.len(),
            self.num_items
        );

        // kd-sort both arrays for efficient search
        sort(&mut self.points, &mut self.ids, 0);

        tracing::debug!(num_items = self.num_items, dims = D, "built k-d tree");

        KDTree {
            points: self.points,
            ids: self.ids,
        }
    }
}

/// True if `a` sorts before `b` on `dim`, falling back to the lexicographic order of the whole
/// point when the two coordinates are equal.
#[inline]
pub(crate) fn smaller_dim_val<N: IndexableNum, const D: usize>(
    a: &Point<N, D>,
    b: &Point<N, D>,
    dim: usize,
) -> bool {
    match a[dim].partial_cmp(&b[dim]) {
        Some(Ordering::Less) => true,
        Some(Ordering::Equal) => a.compare(b) == Ordering::Less,
        _ => false,
    }
}

/// Index of the median node of the non-empty half-open range `start..end`.
#[inline]
pub(crate) fn middle(start: usize, end: usize) -> usize {
    (start + end - 1) >> 1
}

fn sort<N: IndexableNum, const D: usize>(points: &mut [Point<N, D>], ids: &mut [u32], axis: usize) {
    if points.len() < 2 {
        return;
    }

    let m = middle(0, points.len());

    // place the median on `axis` at m, with smaller points before it and the rest after
    select(points, ids, m, axis);

    let (left_points, rest_points) = points.split_at_mut(m);
    let (left_ids, rest_ids) = ids.split_at_mut(m);
    let right_points = &mut rest_points[1..];
    let right_ids = &mut rest_ids[1..];
    let next_axis = (axis + 1) % D;

    #[cfg(feature = "rayon")]
    {
        if left_points.len() >= PARALLEL_THRESHOLD {
            rayon::join(
                || sort(left_points, left_ids, next_axis),
                || sort(right_points, right_ids, next_axis),
            );
            return;
        }
    }

    sort(left_points, left_ids, next_axis);
    sort(right_points, right_ids, next_axis);
}

/// Quickselect: reorder `points` and `ids` so that the k-th smallest point on `axis` lands at
/// `k`, with all smaller points before it and all others after it.
fn select<N: IndexableNum, const D: usize>(
    points: &mut [Point<N, D>],
    ids: &mut [u32],
    k: usize,
    axis: usize,
) {
    let mut left = 0;
    let mut right = points.len() - 1;

    while right > left {
        let pivot = partition(points, ids, left, right, k, axis);
        match k.cmp(&pivot) {
            Ordering::Equal => return,
            Ordering::Less => right = pivot - 1,
            Ordering::Greater => left = pivot + 1,
        }
    }
}

/// Lomuto partition of `left..=right` around the point currently at `pivot_index`. Returns the
/// pivot's final position.
fn partition<N: IndexableNum, const D: usize>(
    points: &mut [Point<N, D>],
    ids: &mut [u32],
    left: usize,
    right: usize,
    pivot_index: usize,
    axis: usize,
) -> usize {
    let pivot = points[pivot_index];
    swap_item(points, ids, pivot_index, right);

    let mut store = left;
    for i in left..right {
        if smaller_dim_val(&points[i], &pivot, axis) {
            swap_item(points, ids, i, store);
            store += 1;
        }
    }

    swap_item(points, ids, right, store);
    store
}

#[inline]
fn swap_item<N: IndexableNum, const D: usize>(
    points: &mut [Point<N, D>],
    ids: &mut [u32],
    i: usize,
    j: usize,
) {
    points.swap(i, j);
    ids.swap(i, j);
}
