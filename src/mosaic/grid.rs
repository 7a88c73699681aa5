//! Collaborator traits for the palette mapper, plus simple in-memory implementations.

use rgb::RGB8;

use crate::error::{MosaicIndexError, Result};

/// Something that can be placed on a grid cell, summarized by one representative color.
pub trait PaletteItem {
    /// The color this item stands for when matching against grid cells.
    fn average_color(&self) -> RGB8;
}

impl PaletteItem for RGB8 {
    fn average_color(&self) -> RGB8 {
        *self
    }
}

impl<T: PaletteItem + ?Sized> PaletteItem for &T {
    fn average_color(&self) -> RGB8 {
        (**self).average_color()
    }
}

/// A grid of regions to be matched, each with a representative color.
pub trait SourceGrid {
    /// Number of rows in the grid.
    fn rows(&self) -> usize;

    /// Number of columns in the grid.
    fn columns(&self) -> usize;

    /// The representative color of the cell at `row`, `column`.
    fn region_color(&self, row: usize, column: usize) -> RGB8;
}

/// An output grid that receives one item per cell.
pub trait Canvas<T> {
    /// Assign `item` to the cell at `row`, `column`.
    fn set_cell(&mut self, row: usize, column: usize, item: T);
}

/// A row-major grid of colors held in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorGrid {
    rows: usize,
    columns: usize,
    colors: Vec<RGB8>,
}

impl ColorGrid {
    /// Wrap a row-major color buffer of `rows * columns` entries.
    pub fn try_new(rows: usize, columns: usize, colors: Vec<RGB8>) -> Result<Self> {
        if colors.len() != rows * columns {
            return Err(MosaicIndexError::General(format!(
                "Color buffer length {} does not match dimensions {}x{}.",
                colors.len(),
                rows,
                columns
            )));
        }
        Ok(Self {
            rows,
            columns,
            colors,
        })
    }

    /// Build a grid by evaluating `f(row, column)` for every cell.
    pub fn from_fn(rows: usize, columns: usize, mut f: impl FnMut(usize, usize) -> RGB8) -> Self {
        let mut colors = Vec::with_capacity(rows * columns);
        for row in 0..rows {
            for column in 0..columns {
                colors.push(f(row, column));
            }
        }
        Self {
            rows,
            columns,
            colors,
        }
    }
}

impl SourceGrid for ColorGrid {
    fn rows(&self) -> usize {
        self.rows
    }

    fn columns(&self) -> usize {
        self.columns
    }

    fn region_color(&self, row: usize, column: usize) -> RGB8 {
        assert!(row < self.rows && column < self.columns);
        self.colors[row * self.columns + column]
    }
}

/// A row-major grid of palette items, filled in cell by cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TileGrid<T> {
    rows: usize,
    columns: usize,
    cells: Vec<Option<T>>,
}

impl<T> TileGrid<T> {
    /// Create a grid with every cell unassigned.
    pub fn new(rows: usize, columns: usize) -> Self {
        let mut cells = Vec::with_capacity(rows * columns);
        cells.resize_with(rows * columns, || None);
        Self {
            rows,
            columns,
            cells,
        }
    }

    #[cfg(feature = "rayon")]
    pub(crate) fn from_cells(rows: usize, columns: usize, cells: Vec<Option<T>>) -> Self {
        debug_assert_eq!(cells.len(), rows * columns);
        Self {
            rows,
            columns,
            cells,
        }
    }

    /// Number of rows in the grid.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the grid.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// The item at `row`, `column`, or `None` if it is out of bounds or was never assigned.
    pub fn get(&self, row: usize, column: usize) -> Option<&T> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        self.cells[row * self.columns + column].as_ref()
    }

    /// Returns `true` once every cell has been assigned.
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Option<T>] {
        &self.cells
    }
}

impl<T> Canvas<T> for TileGrid<T> {
    fn set_cell(&mut self, row: usize, column: usize, item: T) {
        assert!(
            row < self.rows && column < self.columns,
            "Cell ({}, {}) is outside a {}x{} grid.",
            row,
            column,
            self.rows,
            self.columns
        );
        self.cells[row * self.columns + column] = Some(item);
    }
}
