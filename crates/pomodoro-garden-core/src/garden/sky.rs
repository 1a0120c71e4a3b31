//! Sky plane placement.
//!
//! The sky is continuous: butterflies store percentage coordinates, so a
//! resized sky stretches them instead of moving them. A virtual grid derived
//! from the current sky size is used only to pick spots for new butterflies
//! and to keep them from landing on top of existing ones.

use std::collections::HashSet;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ground::MAX_PROBE_ATTEMPTS;
use super::item::{GridCell, PercentPoint};

/// Side of one virtual sky cell in pixels.
pub const SKY_CELL_PX: f64 = 80.0;
pub const MIN_SKY_COLS: u32 = 6;
pub const MIN_SKY_ROWS: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkyGrid {
    pub cols: u32,
    pub rows: u32,
}

impl Default for SkyGrid {
    fn default() -> Self {
        Self {
            cols: MIN_SKY_COLS,
            rows: MIN_SKY_ROWS,
        }
    }
}

impl SkyGrid {
    pub fn from_viewport(width_px: f64, height_px: f64) -> Self {
        // Negative and NaN sizes saturate to 0 and fall back to the minimum.
        let cols = (width_px / SKY_CELL_PX).floor() as u32;
        let rows = (height_px / SKY_CELL_PX).floor() as u32;
        Self {
            cols: cols.max(MIN_SKY_COLS),
            rows: rows.max(MIN_SKY_ROWS),
        }
    }

    /// Centre of `cell` as percentages of the sky box.
    pub fn cell_to_percent(&self, cell: GridCell) -> PercentPoint {
        PercentPoint {
            left: (cell.col as f64 - 0.5) / self.cols as f64 * 100.0,
            top: (cell.row as f64 - 0.5) / self.rows as f64 * 100.0,
        }
    }

    /// Nearest cell for a stored position, by rounding, clamped to the grid.
    pub fn percent_to_cell(&self, point: PercentPoint) -> GridCell {
        let col = (point.left / 100.0 * self.cols as f64).round();
        let row = (point.top / 100.0 * self.rows as f64).round();
        GridCell::new(
            (col as u32).clamp(1, self.cols),
            (row as u32).clamp(1, self.rows),
        )
    }
}

/// Random free sky cell, or `(1, 1)` when probing finds nothing.
pub fn find_free_sky_cell<R: Rng + ?Sized>(
    rng: &mut R,
    grid: SkyGrid,
    used: &HashSet<GridCell>,
) -> GridCell {
    for _ in 0..MAX_PROBE_ATTEMPTS {
        let cell = GridCell::new(rng.gen_range(1..=grid.cols), rng.gen_range(1..=grid.rows));
        if !used.contains(&cell) {
            return cell;
        }
    }
    GridCell::new(1, 1)
}

/// Resolve one butterfly. Stored positions are kept as they are and only
/// mark occupancy; missing ones are picked from the grid.
/// Returns the position and whether it was newly assigned.
pub fn resolve_sky_position<R: Rng + ?Sized>(
    current: Option<PercentPoint>,
    used: &mut HashSet<GridCell>,
    grid: SkyGrid,
    rng: &mut R,
) -> (PercentPoint, bool) {
    match current {
        Some(point) => {
            used.insert(grid.percent_to_cell(point));
            (point, false)
        }
        None => {
            let cell = find_free_sky_cell(rng, grid, used);
            used.insert(cell);
            (grid.cell_to_percent(cell), true)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Mcg128Xsl64;

    #[test]
    fn grid_has_minimum_size() {
        assert_eq!(SkyGrid::from_viewport(100.0, 50.0), SkyGrid { cols: 6, rows: 4 });
        assert_eq!(SkyGrid::from_viewport(-5.0, f64::NAN), SkyGrid { cols: 6, rows: 4 });
        assert_eq!(SkyGrid::from_viewport(1000.0, 500.0), SkyGrid { cols: 12, rows: 6 });
    }

    #[test]
    fn cell_centre_percentages() {
        let grid = SkyGrid { cols: 4, rows: 4 };
        let p = grid.cell_to_percent(GridCell::new(1, 4));
        assert_eq!(p.left, 12.5);
        assert_eq!(p.top, 87.5);
    }

    #[test]
    fn percent_maps_back_into_grid() {
        let grid = SkyGrid { cols: 6, rows: 4 };
        assert_eq!(
            grid.percent_to_cell(PercentPoint { left: 0.0, top: 100.0 }),
            GridCell::new(1, 4)
        );
        assert_eq!(
            grid.percent_to_cell(PercentPoint { left: 250.0, top: -3.0 }),
            GridCell::new(6, 1)
        );
    }

    #[test]
    fn stored_position_never_moves() {
        let mut used = HashSet::new();
        let mut rng = Mcg128Xsl64::seed_from_u64(1);
        let stored = PercentPoint { left: 33.3, top: 71.0 };
        let wide = SkyGrid::from_viewport(2000.0, 900.0);
        let (p, assigned) = resolve_sky_position(Some(stored), &mut used, wide, &mut rng);
        assert_eq!(p, stored);
        assert!(!assigned);
        assert_eq!(used.len(), 1);
    }

    #[test]
    fn full_sky_falls_back_to_first_cell() {
        let grid = SkyGrid::default();
        let used: HashSet<_> = (1..=grid.cols)
            .flat_map(|col| (1..=grid.rows).map(move |row| GridCell::new(col, row)))
            .collect();
        let mut rng = Mcg128Xsl64::seed_from_u64(3);
        assert_eq!(find_free_sky_cell(&mut rng, grid, &used), GridCell::new(1, 1));
    }
}
