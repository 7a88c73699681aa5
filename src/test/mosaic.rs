use rgb::RGB8;

use crate::kdtree::KDTreeIndex;
use crate::mosaic::{map_tiles, ColorGrid, PaletteItem, PaletteMapper};

/// A tile image reduced to what the mapper needs: an id and its average color.
#[derive(Debug, Clone, PartialEq)]
struct TileImage {
    id: usize,
    average: RGB8,
}

impl PaletteItem for TileImage {
    fn average_color(&self) -> RGB8 {
        self.average
    }
}

fn tiles() -> Vec<TileImage> {
    let mut tiles = vec![];
    for r in [0u8, 128, 255] {
        for g in [0u8, 128, 255] {
            for b in [0u8, 128, 255] {
                tiles.push(TileImage {
                    id: tiles.len(),
                    average: RGB8 { r, g, b },
                });
            }
        }
    }
    tiles
}

#[test]
fn red_and_green_palette() {
    let tiles = vec![
        TileImage {
            id: 0,
            average: RGB8 { r: 255, g: 0, b: 0 },
        },
        TileImage {
            id: 1,
            average: RGB8 { r: 0, g: 255, b: 0 },
        },
    ];
    let source = ColorGrid::try_new(
        1,
        2,
        vec![RGB8 { r: 250, g: 10, b: 5 }, RGB8 { r: 10, g: 240, b: 5 }],
    )
    .unwrap();

    let mosaic = map_tiles(&source, &tiles).unwrap();
    assert_eq!(mosaic.get(0, 0).unwrap().id, 0);
    assert_eq!(mosaic.get(0, 1).unwrap().id, 1);
}

#[test]
fn snaps_gradient_to_cube_palette() {
    let tiles = tiles();
    let mapper = PaletteMapper::new(&tiles).unwrap();
    assert_eq!(mapper.tree().num_items(), 27);

    let source = ColorGrid::from_fn(8, 8, |row, column| RGB8 {
        r: (row * 36) as u8,
        g: (column * 36) as u8,
        b: 200,
    });
    let mosaic = mapper.map_grid(&source).unwrap();
    assert!(mosaic.is_complete());

    let snap = |c: u8| -> u8 {
        match c {
            0..=63 => 0,
            64..=191 => 128,
            _ => 255,
        }
    };
    for row in 0..8 {
        for column in 0..8 {
            let tile = mosaic.get(row, column).unwrap();
            let r = (row * 36) as u8;
            let g = (column * 36) as u8;
            assert_eq!(
                tile.average,
                RGB8 {
                    r: snap(r),
                    g: snap(g),
                    b: 255
                },
                "cell ({}, {})",
                row,
                column
            );
        }
    }
}
