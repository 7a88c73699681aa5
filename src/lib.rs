#![doc = include_str!("../README.md")]

mod error;
pub mod kdtree;
pub mod mosaic;
mod point;
mod r#type;

pub use error::{MosaicIndexError, Result};
pub use point::Point;
pub use r#type::IndexableNum;

#[cfg(test)]
pub(crate) mod test;
