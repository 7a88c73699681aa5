use std::collections::BTreeMap;

#[cfg(feature = "rayon")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use rgb::RGB8;

use crate::error::{MosaicIndexError, Result};
use crate::kdtree::{KDTree, KDTreeBuilder, KDTreeIndex};
use crate::mosaic::grid::{Canvas, PaletteItem, SourceGrid, TileGrid};
use crate::point::Point;

/// Matches colors to the palette item whose average color is nearest.
///
/// Items are looked up by their average color. When several items share an average color the
/// one added last is the one returned, and the earlier ones are reported by
/// [`shadowed`][PaletteMapper::shadowed].
///
/// ```
/// use mosaic_index::mosaic::{ColorGrid, PaletteMapper};
/// use rgb::RGB8;
///
/// let red = RGB8 { r: 255, g: 0, b: 0 };
/// let green = RGB8 { r: 0, g: 255, b: 0 };
/// let palette = [red, green];
/// let mapper = PaletteMapper::new(&palette).unwrap();
///
/// let source = ColorGrid::try_new(1, 2, vec![
///     RGB8 { r: 250, g: 10, b: 5 },
///     RGB8 { r: 10, g: 240, b: 5 },
/// ]).unwrap();
/// let tiles = mapper.map_grid(&source).unwrap();
/// assert_eq!(tiles.get(0, 0), Some(&&red));
/// assert_eq!(tiles.get(0, 1), Some(&&green));
/// ```
#[derive(Debug)]
pub struct PaletteMapper<'a, T: PaletteItem> {
    items: &'a [T],
    tree: KDTree<u8, 3>,
    by_color: BTreeMap<Point<u8, 3>, usize>,
    shadowed: Vec<usize>,
}

impl<'a, T: PaletteItem> PaletteMapper<'a, T> {
    /// Index the average colors of `items`.
    ///
    /// Returns [`MosaicIndexError::EmptyPalette`] if `items` is empty.
    pub fn new(items: &'a [T]) -> Result<Self> {
        if items.is_empty() {
            return Err(MosaicIndexError::EmptyPalette);
        }

        let mut builder = KDTreeBuilder::new(items.len());
        let mut by_color = BTreeMap::new();
        let mut shadowed = vec![];

        for (position, item) in items.iter().enumerate() {
            let color = Point::from(item.average_color());
            builder.add(color);

            if let Some(previous) = by_color.insert(color, position) {
                tracing::warn!(
                    shadowed = previous,
                    by = position,
                    color = ?color.coords(),
                    "Palette item shares its average color with a later item and cannot be selected"
                );
                shadowed.push(previous);
            }
        }

        Ok(Self {
            items,
            tree: builder.finish(),
            by_color,
            shadowed,
        })
    }

    /// The palette this mapper selects from.
    pub fn items(&self) -> &'a [T] {
        self.items
    }

    /// The color index over the palette's average colors.
    pub fn tree(&self) -> &KDTree<u8, 3> {
        &self.tree
    }

    /// Positions of palette items whose average color is repeated by a later item.
    pub fn shadowed(&self) -> &[usize] {
        &self.shadowed
    }

    /// Position within the palette of the item nearest to `color`.
    pub fn nearest_position(&self, color: RGB8) -> Result<usize> {
        let nearest = self.tree.nearest(&Point::from(color))?;
        self.by_color.get(nearest).copied().ok_or_else(|| {
            MosaicIndexError::General(format!(
                "No palette item for color {:?}.",
                nearest.coords()
            ))
        })
    }

    /// The palette item nearest to `color`.
    pub fn nearest_item(&self, color: RGB8) -> Result<&'a T> {
        let position = self.nearest_position(color)?;
        Ok(&self.items[position])
    }

    /// Assign every cell of `canvas` the palette item nearest to the matching cell of `source`.
    pub fn map_into<S, C>(&self, source: &S, canvas: &mut C) -> Result<()>
    where
        S: SourceGrid,
        C: Canvas<&'a T>,
    {
        for row in 0..source.rows() {
            for column in 0..source.columns() {
                let item = self.nearest_item(source.region_color(row, column))?;
                canvas.set_cell(row, column, item);
            }
        }

        tracing::debug!(
            rows = source.rows(),
            columns = source.columns(),
            "mapped grid onto palette"
        );
        Ok(())
    }

    /// Map `source` onto a new [`TileGrid`] of the same dimensions.
    pub fn map_grid<S: SourceGrid>(&self, source: &S) -> Result<TileGrid<&'a T>> {
        let mut canvas = TileGrid::new(source.rows(), source.columns());
        self.map_into(source, &mut canvas)?;
        Ok(canvas)
    }

    /// Like [`map_grid`][PaletteMapper::map_grid], matching cells on the rayon thread pool.
    #[cfg(feature = "rayon")]
    pub fn par_map_grid<S>(&self, source: &S) -> Result<TileGrid<&'a T>>
    where
        S: SourceGrid + Sync,
        T: Sync,
    {
        let rows = source.rows();
        let columns = source.columns();

        let cells = (0..rows * columns)
            .into_par_iter()
            .map(|i| {
                self.nearest_item(source.region_color(i / columns, i % columns))
                    .map(Some)
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(rows, columns, "mapped grid onto palette");
        Ok(TileGrid::from_cells(rows, columns, cells))
    }
}

/// Map every cell of `source` to the tile whose average color is nearest to the cell's color.
pub fn map_tiles<'a, S, T>(source: &S, tiles: &'a [T]) -> Result<TileGrid<&'a T>>
where
    S: SourceGrid,
    T: PaletteItem,
{
    PaletteMapper::new(tiles)?.map_grid(source)
}
