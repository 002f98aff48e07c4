//! Static tile grid the raycaster traverses and entities collide against.

use thiserror::Error;

/// Material code stored in a single grid tile.
///
/// Zero is open floor; every other value is a distinct wall material.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCode(u8);

impl TileCode {
    /// Walkable floor.
    pub const EMPTY: Self = Self(0);
    /// Perimeter wall.
    pub const BORDER: Self = Self(1);
    /// Concrete building.
    pub const CONCRETE: Self = Self(2);
    /// Legacy park hedge wall.
    pub const PARK_WALL: Self = Self(3);
    /// Sand dune.
    pub const SAND_DUNE: Self = Self(4);
    /// Brick building.
    pub const BRICK: Self = Self(5);
    /// Glass window; never side-shaded.
    pub const WINDOW: Self = Self(6);
    /// Wooden pier.
    pub const PIER: Self = Self(7);
    /// Bushes.
    pub const BUSHES: Self = Self(8);

    /// Creates a tile code from its raw value.
    #[must_use]
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Raw material value.
    #[must_use]
    pub const fn get(&self) -> u8 {
        self.0
    }

    /// Reports whether the tile can be walked through.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }
}

/// Reasons a tile map may be rejected at construction time.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MapError {
    /// The map has no rows or no columns.
    #[error("tile map must contain at least one row and one column")]
    Empty,
    /// Rows disagree on their length.
    #[error("row {row} has {found} tiles but the map is {expected} tiles wide")]
    RaggedRow {
        /// Index of the offending row.
        row: usize,
        /// Width established by the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// The perimeter contains an open tile, so rays could leave the grid.
    #[error("border tile at column {column}, row {row} is open")]
    OpenBorder {
        /// Column of the open border tile.
        column: usize,
        /// Row of the open border tile.
        row: usize,
    },
}

/// Rectangular, fully enclosed tile grid.
///
/// Construction rejects any map whose perimeter contains an empty tile, so
/// traversal that starts on an interior floor tile always terminates on a
/// wall without leaving the grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileMap {
    columns: usize,
    rows: usize,
    tiles: Vec<TileCode>,
}

impl TileMap {
    /// Builds a map from row-major tile codes, validating the enclosure.
    pub fn new<R>(rows: &[R]) -> Result<Self, MapError>
    where
        R: AsRef<[u8]>,
    {
        let columns = rows.first().map_or(0, |row| row.as_ref().len());
        if rows.is_empty() || columns == 0 {
            return Err(MapError::Empty);
        }

        let mut tiles = Vec::with_capacity(columns * rows.len());
        for (index, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != columns {
                return Err(MapError::RaggedRow {
                    row: index,
                    expected: columns,
                    found: row.len(),
                });
            }
            tiles.extend(row.iter().copied().map(TileCode::new));
        }

        let map = Self {
            columns,
            rows: rows.len(),
            tiles,
        };
        map.validate_border()?;
        Ok(map)
    }

    fn validate_border(&self) -> Result<(), MapError> {
        for row in 0..self.rows {
            for column in 0..self.columns {
                let on_border = row == 0
                    || column == 0
                    || row + 1 == self.rows
                    || column + 1 == self.columns;
                if on_border && self.tiles[row * self.columns + column].is_empty() {
                    return Err(MapError::OpenBorder { column, row });
                }
            }
        }
        Ok(())
    }

    /// Number of tile columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of tile rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the tile at the provided coordinates, or `None` outside the grid.
    #[must_use]
    pub fn get(&self, column: i32, row: i32) -> Option<TileCode> {
        let column = usize::try_from(column).ok()?;
        let row = usize::try_from(row).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(self.tiles[row * self.columns + column])
    }

    /// Reports whether the tile containing the continuous point is walkable.
    ///
    /// Points outside the grid count as solid.
    #[must_use]
    pub fn is_open_at(&self, x: f32, y: f32) -> bool {
        self.get(x.floor() as i32, y.floor() as i32)
            .is_some_and(|tile| tile.is_empty())
    }
}
