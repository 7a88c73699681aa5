use std::cmp::Ordering;

use geo_traits::CoordTrait;
use num_traits::Zero;
use tinyvec::TinyVec;

use crate::error::{MosaicIndexError, Result};
use crate::kdtree::builder::{middle, smaller_dim_val};
use crate::kdtree::{KDTree, KDTreeRef, Node};
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A trait for searching and accessing data out of a KDTree.
pub trait KDTreeIndex<N: IndexableNum, const D: usize>: Sized {
    /// The kd-sorted points of this tree
    fn points(&self) -> &[Point<N, D>];

    /// The insertion index of each point in [`points`][KDTreeIndex::points]
    fn ids(&self) -> &[u32];

    /// The kd-sorted points as a flat coordinate buffer, `D` values per point
    fn coords(&self) -> &[N] {
        bytemuck::cast_slice(self.points())
    }

    /// The number of items in this KDTree
    fn num_items(&self) -> usize {
        self.points().len()
    }

    /// Returns `true` if this KDTree holds no points.
    fn is_empty(&self) -> bool {
        self.points().is_empty()
    }

    /// Position within [`points`][KDTreeIndex::points] of the point nearest to `query`.
    ///
    /// Distance is squared Euclidean. When several points are exactly as close, the one that is
    /// smallest in [`Point`] order wins, and identical points resolve to the smaller id.
    ///
    /// Returns [`MosaicIndexError::EmptyIndex`] if the tree holds no points.
    fn nearest_index(&self, query: &Point<N, D>) -> Result<usize> {
        let points = self.points();
        let ids = self.ids();
        if points.is_empty() {
            return Err(MosaicIndexError::EmptyIndex);
        }

        // Each entry is a range still to search together with a lower bound on the squared
        // distance from the query to any point in it.
        let mut stack: TinyVec<[(usize, usize, usize, N::Distance); 33]> = TinyVec::new();
        stack.push((0, points.len(), 0, N::Distance::zero()));

        let mut best: Option<(usize, N::Distance)> = None;

        while let Some((start, end, axis, bound)) = stack.pop() {
            // prune ranges that lie wholly beyond the current best radius
            if let Some((_, best_dist)) = best {
                if bound > best_dist {
                    continue;
                }
            }

            let m = middle(start, end);
            let median = &points[m];

            let replace = match best {
                None => true,
                Some((b, _)) => should_replace(query, points, ids, b, m),
            };
            if replace {
                best = Some((m, query.squared_distance(median)));
            }

            let next_axis = (axis + 1) % D;
            let diff = median[axis].widen() - query[axis].widen();
            let plane_dist = diff * diff;

            let left = (start, m);
            let right = (m + 1, end);
            let (near, far) = if smaller_dim_val(query, median, axis) {
                (left, right)
            } else {
                (right, left)
            };

            // Note: the far side is pushed first so that the near side is searched first
            if far.0 < far.1 {
                stack.push((far.0, far.1, next_axis, plane_dist));
            }
            if near.0 < near.1 {
                stack.push((near.0, near.1, next_axis, bound));
            }
        }

        best.map(|(i, _)| i).ok_or(MosaicIndexError::EmptyIndex)
    }

    /// The point nearest to `query`.
    ///
    /// ```
    /// use mosaic_index::kdtree::{KDTree, KDTreeIndex};
    /// use mosaic_index::Point;
    ///
    /// let tree = KDTree::from_points([
    ///     Point::new([0, 0]),
    ///     Point::new([6, 0]),
    ///     Point::new([0, 6]),
    /// ]);
    /// assert_eq!(tree.nearest(&Point::new([1, 2])).unwrap(), &Point::new([0, 0]));
    ///
    /// // (6, 0) and (0, 6) are equally far; the lexicographically smaller one wins
    /// assert_eq!(tree.nearest(&Point::new([5, 5])).unwrap(), &Point::new([0, 6]));
    /// ```
    fn nearest(&self, query: &Point<N, D>) -> Result<&Point<N, D>> {
        let i = self.nearest_index(query)?;
        Ok(&self.points()[i])
    }

    /// The insertion index of the point nearest to `query`.
    fn nearest_id(&self, query: &Point<N, D>) -> Result<u32> {
        let i = self.nearest_index(query)?;
        Ok(self.ids()[i])
    }

    /// The point nearest to a coordinate from any geo-traits implementation.
    ///
    /// Returns [`MosaicIndexError::DimensionMismatch`] if the coordinate does not have `D`
    /// dimensions.
    fn nearest_coord(&self, coord: &impl CoordTrait<T = N>) -> Result<&Point<N, D>> {
        let query = Point::try_from_coord(coord)?;
        self.nearest(&query)
    }

    /// Search the index for items within a given radius.
    ///
    /// - query: query point
    /// - r: radius
    ///
    /// Returns insertion indices of found items
    fn within(&self, query: &Point<N, D>, r: N) -> Vec<u32> {
        let points = self.points();
        let ids = self.ids();

        let mut result: Vec<u32> = vec![];
        if points.is_empty() {
            return result;
        }

        let r = r.widen();
        let r2 = r * r;

        let mut stack: TinyVec<[(usize, usize, usize); 33]> = TinyVec::new();
        stack.push((0, points.len(), 0));

        while let Some((start, end, axis)) = stack.pop() {
            let m = middle(start, end);
            let median = &points[m];

            // include the middle item if it's in range
            if query.squared_distance(median) <= r2 {
                result.push(ids[m]);
            }

            // queue search in halves that intersect the query
            let q = query[axis].widen();
            let split = median[axis].widen();
            let next_axis = (axis + 1) % D;
            if start < m && q - r <= split {
                stack.push((start, m, next_axis));
            }
            if m + 1 < end && q + r >= split {
                stack.push((m + 1, end, next_axis));
            }
        }

        result
    }

    /// Search the index for items within the closed box spanned by `min` and `max`.
    ///
    /// Returns insertion indices of found items
    fn range(&self, min: &Point<N, D>, max: &Point<N, D>) -> Vec<u32> {
        let points = self.points();
        let ids = self.ids();

        let mut result: Vec<u32> = vec![];
        if points.is_empty() {
            return result;
        }

        let mut stack: TinyVec<[(usize, usize, usize); 33]> = TinyVec::new();
        stack.push((0, points.len(), 0));

        while let Some((start, end, axis)) = stack.pop() {
            let m = middle(start, end);
            let median = &points[m];

            let inside = (0..D).all(|i| min[i] <= median[i] && median[i] <= max[i]);
            if inside {
                result.push(ids[m]);
            }

            let next_axis = (axis + 1) % D;
            if start < m && min[axis] <= median[axis] {
                stack.push((start, m, next_axis));
            }
            if m + 1 < end && max[axis] >= median[axis] {
                stack.push((m + 1, end, next_axis));
            }
        }

        result
    }

    /// Access the root node of the KDTree for manual traversal.
    ///
    /// Returns `None` if the tree holds no points.
    fn root(&self) -> Option<Node<'_, N, D, Self>> {
        Node::from_root(self)
    }
}

impl<N: IndexableNum, const D: usize> KDTreeIndex<N, D> for KDTree<N, D> {
    fn points(&self) -> &[Point<N, D>] {
        &self.points
    }

    fn ids(&self) -> &[u32] {
        &self.ids
    }
}

impl<N: IndexableNum, const D: usize> KDTreeIndex<N, D> for KDTreeRef<'_, N, D> {
    fn points(&self) -> &[Point<N, D>] {
        self.points
    }

    fn ids(&self) -> &[u32] {
        self.ids
    }
}

/// Whether the point stored at `candidate` should take the place of the one at `best` as the
/// nearest point to `target`.
///
/// `best` and `candidate` are positions within `points`, so identity does not depend on the ids
/// being distinct. Ids only decide between identical points.
#[inline]
pub(crate) fn should_replace<N: IndexableNum, const D: usize>(
    target: &Point<N, D>,
    points: &[Point<N, D>],
    ids: &[u32],
    best: usize,
    candidate: usize,
) -> bool {
    if candidate == best {
        return true;
    }

    let best_dist = target.squared_distance(&points[best]);
    let candidate_dist = target.squared_distance(&points[candidate]);

    if candidate_dist < best_dist {
        true
    } else if candidate_dist == best_dist {
        match points[candidate].compare(&points[best]) {
            Ordering::Less => true,
            Ordering::Equal => ids[candidate] < ids[best],
            Ordering::Greater => false,
        }
    } else {
        false
    }
}
