//! Tile field loader.

use std::path::Path;

use serde::{Deserialize, Serialize};
use targeting_core::{GridCell, Region};

use crate::field::{TileField, TileKind};
use crate::loaders::{LoadResult, read_file};

/// Field data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FieldDataRon {
    #[serde(default)]
    origin: (i32, i32),
    dimensions: (u32, u32),
    #[serde(default)]
    fills: Vec<(i32, i32, i32, i32, TileKind)>, // (x1, y1, x2, y2, kind), inclusive
    #[serde(default)]
    tiles: Vec<(i32, i32, TileKind)>, // (x, y, kind)
}

/// Loader for tile fields from RON files.
pub struct FieldLoader;

impl FieldLoader {
    pub fn load(path: &Path) -> LoadResult<TileField> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Parses a field; fills are applied first, then single tiles.
    ///
    /// Any cell outside the declared dimensions is an error.
    pub fn parse(content: &str) -> LoadResult<TileField> {
        let data: FieldDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse field RON: {}", e))?;

        let bounds = Region::new(data.origin.into(), data.dimensions.0, data.dimensions.1);
        let mut field = TileField::new(bounds);

        for (x1, y1, x2, y2, kind) in data.fills {
            let rect = Region::from_corners(GridCell::new(x1, y1), GridCell::new(x2, y2));
            for cell in rect.cells() {
                if !field.set(cell, kind) {
                    anyhow::bail!("fill cell {} lies outside field bounds {:?}", cell, bounds);
                }
            }
        }

        for (x, y, kind) in data.tiles {
            let cell = GridCell::new(x, y);
            if !field.set(cell, kind) {
                anyhow::bail!("tile {} lies outside field bounds {:?}", cell, bounds);
            }
        }

        Ok(field)
    }
}
