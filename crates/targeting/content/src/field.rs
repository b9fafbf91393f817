//! Static cell layouts used to drive strategies outside a host.

use std::collections::HashMap;

use targeting_core::{GridCell, Region};

/// Canonical contents of a cell.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TileKind {
    #[default]
    Empty,
    Solid,
    Wall,
    Ore,
    Plant,
    Water,
}

impl TileKind {
    /// Returns true if the tile stops lines of sight.
    pub fn is_opaque(self) -> bool {
        matches!(self, TileKind::Solid | TileKind::Wall | TileKind::Ore)
    }

    /// Legend character used by [`TileField::render`].
    pub fn glyph(self) -> char {
        match self {
            TileKind::Empty => '.',
            TileKind::Solid => '#',
            TileKind::Wall => '=',
            TileKind::Ore => '*',
            TileKind::Plant => '"',
            TileKind::Water => '~',
        }
    }
}

/// Rectangular layout of tiles; cells without an explicit tile are empty.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct TileField {
    bounds: Region,
    tiles: HashMap<GridCell, TileKind>,
}

impl TileField {
    pub fn new(bounds: Region) -> Self {
        Self {
            bounds,
            tiles: HashMap::new(),
        }
    }

    pub fn bounds(&self) -> Region {
        self.bounds
    }

    /// Sets a tile. Cells outside the bounds are ignored; returns whether it was stored.
    pub fn set(&mut self, cell: GridCell, kind: TileKind) -> bool {
        if !self.bounds.contains(cell) {
            return false;
        }
        if kind == TileKind::Empty {
            self.tiles.remove(&cell);
        } else {
            self.tiles.insert(cell, kind);
        }
        true
    }

    /// Tile at `cell`, or `None` outside the bounds.
    pub fn get(&self, cell: GridCell) -> Option<TileKind> {
        if !self.bounds.contains(cell) {
            return None;
        }
        Some(self.tiles.get(&cell).copied().unwrap_or_default())
    }

    pub fn is(&self, cell: GridCell, kind: TileKind) -> bool {
        self.get(cell) == Some(kind)
    }

    /// Empty cell with at least one orthogonal non-empty neighbour.
    pub fn is_supported(&self, cell: GridCell) -> bool {
        self.is(cell, TileKind::Empty)
            && [(1, 0), (-1, 0), (0, 1), (0, -1)].iter().any(|&(dx, dy)| {
                self.get(cell.offset(dx, dy))
                    .is_some_and(|kind| kind != TileKind::Empty)
            })
    }

    /// Draws the field row by row, marking `marks` with their characters.
    pub fn render(&self, marks: &[(GridCell, char)]) -> String {
        let mut out = String::new();
        for row in 0..self.bounds.height as i32 {
            for col in 0..self.bounds.width as i32 {
                let cell = self.bounds.origin.offset(col, row);
                let glyph = marks
                    .iter()
                    .rev()
                    .find(|(marked, _)| *marked == cell)
                    .map(|&(_, glyph)| glyph)
                    .unwrap_or_else(|| self.get(cell).unwrap_or_default().glyph());
                out.push(glyph);
            }
            out.push('\n');
        }
        out
    }
}
