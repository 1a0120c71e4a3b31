//! Ground grid placement.
//!
//! Placement is recomputed on every snapshot because the column count comes
//! from the current viewport. Items are resolved in insertion order; an item
//! whose stored cell is out of range or already claimed by an earlier item is
//! silently moved.
//!
//! Search is two-phase: a bounded random probe keeps the garden looking
//! scattered, then a row-major scan guarantees termination.

use std::collections::HashSet;

use rand::Rng;

use super::item::GridCell;

/// Random probes before falling back to the row-major scan.
pub const MAX_PROBE_ATTEMPTS: usize = 200;

/// Cells claimed so far in one placement pass.
#[derive(Debug, Clone, Default)]
pub struct Occupancy {
    cells: HashSet<GridCell>,
    max_row: u32,
}

impl Occupancy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: &GridCell) -> bool {
        self.cells.contains(cell)
    }

    /// Returns false if the cell was already claimed.
    pub fn insert(&mut self, cell: GridCell) -> bool {
        self.max_row = self.max_row.max(cell.row);
        self.cells.insert(cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Highest claimed row, 0 when empty.
    pub fn max_row(&self) -> u32 {
        self.max_row
    }
}

/// Pick an unclaimed cell for a grid `columns` wide.
///
/// Probes rows `1..=min(max_row + 2, rows_needed)`, where `rows_needed` is the
/// smallest row count that can hold every claimed cell plus one more. That
/// band always contains a free cell, so the garden stays compact.
pub fn find_free_cell<R: Rng + ?Sized>(rng: &mut R, columns: u32, occupied: &Occupancy) -> GridCell {
    let columns = columns.max(1);
    let claimed = u32::try_from(occupied.len()).unwrap_or(u32::MAX);
    let rows_needed = claimed.saturating_add(1).div_ceil(columns);
    let band = occupied.max_row().saturating_add(2).min(rows_needed).max(1);

    for _ in 0..MAX_PROBE_ATTEMPTS {
        let cell = GridCell::new(rng.gen_range(1..=columns), rng.gen_range(1..=band));
        if !occupied.contains(&cell) {
            return cell;
        }
    }
    tracing::debug!(columns, band, claimed, "ground probe exhausted, scanning");
    first_free_cell(columns, occupied)
}

/// Row-major scan from the top-left corner.
pub fn first_free_cell(columns: u32, occupied: &Occupancy) -> GridCell {
    let columns = columns.max(1);
    let mut row = 1;
    loop {
        for col in 1..=columns {
            let cell = GridCell::new(col, row);
            if !occupied.contains(&cell) {
                return cell;
            }
        }
        row += 1;
    }
}

/// Resolve one ground item against the cells claimed earlier in this pass.
///
/// Keeps `current` when it is inside the grid and unclaimed; otherwise picks a
/// new cell. Claims the result and reports whether it differs from `current`.
pub fn resolve_ground_position<R: Rng + ?Sized>(
    current: Option<GridCell>,
    occupied: &mut Occupancy,
    columns: u32,
    rng: &mut R,
) -> (GridCell, bool) {
    let columns = columns.max(1);
    let keep = current.filter(|c| {
        (1..=columns).contains(&c.col) && c.row >= 1 && !occupied.contains(c)
    });
    let cell = match keep {
        Some(cell) => cell,
        None => find_free_cell(rng, columns, occupied),
    };
    occupied.insert(cell);
    (cell, current != Some(cell))
}
