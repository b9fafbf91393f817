//! Closest-to-hint selection over the first ring that holds a valid cell.

use crate::grid::{GridCell, chebyshev, euclidean_sq};

/// What to do with valid cells buffered from the outermost ring when the
/// traversal runs out before a larger ring starts.
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
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TrailingRing {
    /// Pick the closest-to-hint cell from the final ring as usual.
    #[default]
    Select,
    /// Drop the final ring's candidates and report no target.
    Discard,
}

/// Streams cells in ring order and picks the valid cell nearest to `hint`
/// within the first ring that holds any valid cell.
///
/// Ring membership is measured with Chebyshev distance from `center`. Once a
/// cell from a farther ring arrives while candidates are buffered, the
/// candidate with the smallest Euclidean distance to `hint` wins (earliest
/// emitted on ties) and the rest of `cells` is not consumed. `is_valid` is
/// only called for cells that are actually examined.
pub fn select_nearest_in_first_ring<I, F>(
    cells: I,
    center: GridCell,
    hint: GridCell,
    trailing: TrailingRing,
    mut is_valid: F,
) -> Option<GridCell>
where
    I: IntoIterator<Item = GridCell>,
    F: FnMut(GridCell) -> bool,
{
    let mut candidates: Vec<GridCell> = Vec::new();
    let mut ring = 0;

    for cell in cells {
        let distance = chebyshev(center, cell);
        if distance > ring {
            if !candidates.is_empty() {
                return nearest_to(&candidates, hint);
            }
            ring = distance;
        }

        if is_valid(cell) {
            candidates.push(cell);
        }
    }

    match trailing {
        TrailingRing::Select => nearest_to(&candidates, hint),
        TrailingRing::Discard => None,
    }
}

fn nearest_to(candidates: &[GridCell], hint: GridCell) -> Option<GridCell> {
    let mut best: Option<(u64, GridCell)> = None;
    for &cell in candidates {
        let distance = euclidean_sq(cell, hint);
        if best.is_none_or(|(closest, _)| distance < closest) {
            best = Some((distance, cell));
        }
    }
    best.map(|(_, cell)| cell)
}
