use serde::{Deserialize, Serialize};

use super::item::{GridCell, PercentPoint, RewardKind};
use super::sky::SkyGrid;

/// Viewport-derived dimensions of the two placement spaces.
///
/// Supplied by the renderer; can change between snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GardenLayout {
    /// Ground grid width in cells.
    pub columns: u32,
    pub sky_width_px: f64,
    pub sky_height_px: f64,
}

impl Default for GardenLayout {
    fn default() -> Self {
        Self::new(4, 480.0, 320.0)
    }
}

impl GardenLayout {
    pub fn new(columns: u32, sky_width_px: f64, sky_height_px: f64) -> Self {
        Self {
            columns: columns.max(1),
            sky_width_px,
            sky_height_px,
        }
    }

    pub fn sky_grid(&self) -> SkyGrid {
        SkyGrid::from_viewport(self.sky_width_px, self.sky_height_px)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FruitSprite {
    pub glyph: String,
    pub position: PercentPoint,
}

/// A placed ground item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroundTile {
    pub id: String,
    pub kind: RewardKind,
    pub glyph: String,
    pub cell: GridCell,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fruits: Vec<FruitSprite>,
    pub delay_secs: f64,
}

/// A placed butterfly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkySprite {
    pub id: String,
    pub glyph: String,
    pub position: PercentPoint,
    pub delay_secs: f64,
}

/// Read-only render view of the garden, in insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenSnapshot {
    pub ground: Vec<GroundTile>,
    pub sky: Vec<SkySprite>,
    pub plant_count: usize,
    pub butterfly_count: usize,
    pub columns: u32,
    pub sky_grid: SkyGrid,
}

impl GardenSnapshot {
    /// Deepest occupied ground row, 0 for an empty ground.
    pub fn rows_used(&self) -> u32 {
        self.ground.iter().map(|t| t.cell.row).max().unwrap_or(0)
    }

    pub fn tile_at(&self, cell: GridCell) -> Option<&GroundTile> {
        self.ground.iter().find(|t| t.cell == cell)
    }

    pub fn is_empty(&self) -> bool {
        self.ground.is_empty() && self.sky.is_empty()
    }
}
