use tinyvec::TinyVec;

use crate::error::{MosaicIndexError, Result};
use crate::kdtree::builder::{middle, smaller_dim_val};
use crate::kdtree::KDTreeBuilder;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// An owned KDTree.
///
/// Usually this will be created from scratch via [`KDTreeBuilder`] or
/// [`from_points`][KDTree::from_points]. The points are stored kd-sorted: the node for the
/// range `[low, high]` is the point at `(low + high) / 2`, and its children are the ranges on
/// either side of it, split on the next dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct KDTree<N: IndexableNum, const D: usize> {
    pub(crate) points: Vec<Point<N, D>>,
    pub(crate) ids: Vec<u32>,
}

impl<N: IndexableNum, const D: usize> KDTree<N, D> {
    /// Build a tree from any sequence of points.
    ///
    /// Ids returned by queries are positions in this sequence.
    pub fn from_points(points: impl IntoIterator<Item = Point<N, D>>) -> Self {
        let points: Vec<_> = points.into_iter().collect();
        let mut builder = KDTreeBuilder::new(points.len());
        for point in points {
            builder.add(point);
        }
        builder.finish()
    }

    /// Consume the tree, returning its kd-sorted points and their insertion ids.
    ///
    /// The two vectors can be handed back to [`KDTreeRef::try_new`] later.
    pub fn into_inner(self) -> (Vec<Point<N, D>>, Vec<u32>) {
        (self.points, self.ids)
    }

    /// A borrowed view onto this tree.
    pub fn as_ref(&self) -> KDTreeRef<'_, N, D> {
        KDTreeRef {
            points: &self.points,
            ids: &self.ids,
        }
    }
}

/// A reference onto external kd-sorted storage.
///
/// Usually this will be created from a [`KDTree`] via its [`as_ref`][KDTree::as_ref] method,
/// but it can also wrap points and ids that were kd-sorted earlier and stored elsewhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KDTreeRef<'a, N: IndexableNum, const D: usize> {
    pub(crate) points: &'a [Point<N, D>],
    pub(crate) ids: &'a [u32],
}

impl<'a, N: IndexableNum, const D: usize> KDTreeRef<'a, N, D> {
    /// Wrap existing storage, checking that it is kd-sorted.
    pub fn try_new(points: &'a [Point<N, D>], ids: &'a [u32]) -> Result<Self> {
        if D == 0 {
            return Err(MosaicIndexError::General(
                "A KDTree needs at least one dimension.".to_string(),
            ));
        }
        if points.len() != ids.len() {
            return Err(MosaicIndexError::General(format!(
                "Got {} ids for {} points.",
                ids.len(),
                points.len()
            )));
        }
        check_kd_order(points)?;

        Ok(Self { points, ids })
    }
}

/// Verify that every node of the implicit tree partitions its range: nothing before the median
/// sorts after it on the node's axis, and nothing after it sorts before it.
pub(crate) fn check_kd_order<N: IndexableNum, const D: usize>(
    points: &[Point<N, D>],
) -> Result<()> {
    let mut stack: TinyVec<[(usize, usize, usize); 33]> = TinyVec::new();
    stack.push((0, points.len(), 0));

    while let Some((start, end, axis)) = stack.pop() {
        if end - start < 2 {
            continue;
        }

        let m = middle(start, end);
        let median = &points[m];

        if let Some(i) = (start..m).find(|&i| smaller_dim_val(median, &points[i], axis)) {
            return Err(MosaicIndexError::General(format!(
                "Point {} sorts after median {} on axis {}.",
                i, m, axis
            )));
        }
        if let Some(i) = (m + 1..end).find(|&i| smaller_dim_val(&points[i], median, axis)) {
            return Err(MosaicIndexError::General(format!(
                "Point {} sorts before median {} on axis {}.",
                i, m, axis
            )));
        }

        let next_axis = (axis + 1) % D;
        stack.push((start, m, next_axis));
        stack.push((m + 1, end, next_axis));
    }

    Ok(())
}
