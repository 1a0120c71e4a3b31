//! Plain-text garden rendering.
//!
//! Glyphs are emoji, which terminals draw two columns wide; empty cells use a
//! two-column filler so rows line up.

use std::fmt::Write;

use pomodoro_garden_core::{GardenSnapshot, GridCell, Translator};

const EMPTY_GROUND: &str = "··";
const EMPTY_SKY: &str = "  ";

/// Title, counters, sky map, ground grid and tree names.
pub fn garden<T: Translator>(snapshot: &GardenSnapshot, tr: &T) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", tr.translate("garden_title"));
    let _ = writeln!(
        out,
        "{}: {}  {}: {}",
        tr.translate("plants_label"),
        snapshot.plant_count,
        tr.translate("butterflies_label"),
        snapshot.butterfly_count
    );
    out.push('\n');
    out.push_str(&sky(snapshot));
    out.push_str(&ground(snapshot));

    let named: Vec<_> = snapshot
        .ground
        .iter()
        .filter_map(|t| t.name.as_deref().map(|name| (t, name)))
        .collect();
    if !named.is_empty() {
        out.push('\n');
        for (tile, name) in named {
            let _ = writeln!(out, "{} {name} ({}, {})", tile.glyph, tile.cell.col, tile.cell.row);
        }
    }
    out
}

/// The ground grid, one line per occupied row. Empty when nothing grows.
pub fn ground(snapshot: &GardenSnapshot) -> String {
    let mut out = String::new();
    for row in 1..=snapshot.rows_used() {
        for col in 1..=snapshot.columns {
            let cell = snapshot.tile_at(GridCell::new(col, row));
            out.push_str(cell.map_or(EMPTY_GROUND, |t| t.glyph.as_str()));
        }
        out.push('\n');
    }
    out
}

/// The sky quantized onto its virtual grid. Empty when no butterflies.
pub fn sky(snapshot: &GardenSnapshot) -> String {
    if snapshot.sky.is_empty() {
        return String::new();
    }
    let grid = snapshot.sky_grid;
    let cells: Vec<_> = snapshot
        .sky
        .iter()
        .map(|s| (grid.percent_to_cell(s.position), s.glyph.as_str()))
        .collect();

    let mut out = String::new();
    for row in 1..=grid.rows {
        let mut line = String::new();
        for col in 1..=grid.cols {
            let here = GridCell::new(col, row);
            let glyph = cells.iter().find(|(c, _)| *c == here).map(|(_, g)| *g);
            line.push_str(glyph.unwrap_or(EMPTY_SKY));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pomodoro_garden_core::garden::{GroundTile, PercentPoint, SkyGrid, SkySprite};
    use pomodoro_garden_core::{Locale, RewardKind};

    fn tile(glyph: &str, col: u32, row: u32, name: Option<&str>) -> GroundTile {
        GroundTile {
            id: format!("{col}-{row}"),
            kind: RewardKind::Tree,
            glyph: glyph.to_string(),
            cell: GridCell::new(col, row),
            name: name.map(str::to_string),
            fruits: Vec::new(),
            delay_secs: 0.0,
        }
    }

    fn snapshot(ground: Vec<GroundTile>, sky: Vec<SkySprite>) -> GardenSnapshot {
        GardenSnapshot {
            plant_count: ground.len(),
            butterfly_count: sky.len(),
            ground,
            sky,
            columns: 3,
            sky_grid: SkyGrid { cols: 6, rows: 4 },
        }
    }

    #[test]
    fn ground_fills_gaps() {
        let snap = snapshot(vec![tile("🌳", 1, 1, None), tile("🌻", 3, 2, None)], Vec::new());
        assert_eq!(ground(&snap), "🌳····\n····🌻\n");
    }

    #[test]
    fn empty_garden_renders_headers_only() {
        let out = garden(&snapshot(Vec::new(), Vec::new()), &Locale::En);
        assert_eq!(out, "Your Garden\nPlants: 0  Butterflies: 0\n\n");
    }

    #[test]
    fn butterflies_land_on_their_sky_cell() {
        let sprite = SkySprite {
            id: "b".into(),
            glyph: "🦋".into(),
            // Centre of column 2, row 1 on a 6x4 grid.
            position: PercentPoint { left: 25.0, top: 12.5 },
            delay_secs: 0.0,
        };
        let out = sky(&snapshot(Vec::new(), vec![sprite]));
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("🦋"));
        assert!(lines[1..].iter().all(|l| l.is_empty()));
    }

    #[test]
    fn named_trees_are_listed() {
        let snap = snapshot(vec![tile("🌴", 2, 1, Some("Coco"))], Vec::new());
        let out = garden(&snap, &Locale::En);
        assert!(out.ends_with("🌴 Coco (2, 1)\n"));
    }
}
