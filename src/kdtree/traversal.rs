//! Utilities to traverse the KDTree structure.

use std::marker::PhantomData;

use crate::kdtree::builder::middle;
use crate::kdtree::KDTreeIndex;
use crate::point::Point;
use crate::r#type::IndexableNum;

/// A node in the KDTree, covering a contiguous range of the kd-sorted points.
///
/// The node's own point is the median of that range; the points before it form the left
/// subtree and the points after it form the right subtree.
#[derive(Debug, Clone)]
pub struct Node<'a, N: IndexableNum, const D: usize, T: KDTreeIndex<N, D>> {
    /// The tree that this node is a reference onto
    tree: &'a T,

    /// Half-open range of positions in the tree's points. Never empty.
    start: usize,
    end: usize,

    /// The axis that the children of this node are split over
    axis: usize,
    depth: usize,

    phantom: PhantomData<N>,
}

impl<'a, N: IndexableNum, const D: usize, T: KDTreeIndex<N, D>> Node<'a, N, D, T> {
    pub(crate) fn from_root(tree: &'a T) -> Option<Self> {
        if tree.is_empty() {
            return None;
        }

        Some(Self {
            tree,
            start: 0,
            end: tree.num_items(),
            axis: 0,
            depth: 0,
            phantom: PhantomData,
        })
    }

    /// Note: this is the index into the points array, not the insertion index.
    #[inline]
    pub fn middle_index(&self) -> usize {
        middle(self.start, self.end)
    }

    /// The point stored at this node.
    pub fn point(&self) -> &'a Point<N, D> {
        &self.tree.points()[self.middle_index()]
    }

    /// The insertion index of the point stored at this node.
    pub fn id(&self) -> u32 {
        self.tree.ids()[self.middle_index()]
    }

    /// The dimension this node splits its children on.
    pub fn axis(&self) -> usize {
        self.axis
    }

    /// Distance from the root, which has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The number of points in the subtree rooted here, including this node's own point.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// All points in the subtree rooted here, in kd-sorted order.
    pub fn points(&self) -> &'a [Point<N, D>] {
        &self.tree.points()[self.start..self.end]
    }

    /// The child node representing the "left" half, or `None` if it is empty.
    ///
    /// Note that this **does not include** the middle index of the current node.
    pub fn left_child(&self) -> Option<Node<'a, N, D, T>> {
        let m = self.middle_index();
        self.child(self.start, m)
    }

    /// The child node representing the "right" half, or `None` if it is empty.
    ///
    /// Note that this **does not include** the middle index of the current node.
    pub fn right_child(&self) -> Option<Node<'a, N, D, T>> {
        let m = self.middle_index();
        self.child(m + 1, self.end)
    }

    fn child(&self, start: usize, end: usize) -> Option<Node<'a, N, D, T>> {
        if start >= end {
            return None;
        }

        Some(Self {
            tree: self.tree,
            start,
            end,
            axis: (self.axis + 1) % D,
            depth: self.depth + 1,
            phantom: PhantomData,
        })
    }

    /// Returns `true` if this is a leaf node without children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.len() == 1
    }

    /// Returns `true` if this is an intermediate node with children.
    #[inline]
    pub fn is_parent(&self) -> bool {
        !self.is_leaf()
    }
}
