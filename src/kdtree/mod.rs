//! An implementation of an immutable K-D Tree over points of any fixed dimension.

#![warn(missing_docs)]

mod builder;
mod index;
mod r#trait;
mod traversal;

pub use builder::KDTreeBuilder;
pub use index::{KDTree, KDTreeRef};
pub use r#trait::KDTreeIndex;
pub use traversal::Node;

#[cfg(test)]
pub(crate) use index::check_kd_order;
