//! Map the cells of a color grid onto the nearest items of a palette.
//!
//! The palette's average colors are indexed in a [`KDTree`][crate::kdtree::KDTree] over RGB
//! space, and every cell of the source grid is resolved to the palette item whose average color
//! is nearest to the cell's color.

mod grid;
mod mapper;

pub use grid::{Canvas, ColorGrid, PaletteItem, SourceGrid, TileGrid};
pub use mapper::{map_tiles, PaletteMapper};
