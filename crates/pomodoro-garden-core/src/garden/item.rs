//! Persisted garden items.
//!
//! Items are stored as a JSON array in insertion order. The `type` tag picks
//! the variant; positional fields are optional because they are assigned
//! lazily by the placement pass and repaired when inconsistent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

pub const PALM_GLYPH: &str = "🌴";
pub const TREE_GLYPHS: &[&str] = &["🌳", PALM_GLYPH];
pub const FLOWER_GLYPHS: &[&str] = &["🌻", "🌹", "🌷", "🌺", "🌸", "🌼", "🪷"];
pub const BUTTERFLY_GLYPHS: &[&str] = &["🦋"];

/// Garden item category granted for a completed cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Tree,
    Flower,
    Butterfly,
}

impl RewardKind {
    pub fn glyphs(self) -> &'static [&'static str] {
        match self {
            RewardKind::Tree => TREE_GLYPHS,
            RewardKind::Flower => FLOWER_GLYPHS,
            RewardKind::Butterfly => BUTTERFLY_GLYPHS,
        }
    }

    /// Ground items live on the grid; the rest fly in the sky.
    pub fn is_ground(self) -> bool {
        !matches!(self, RewardKind::Butterfly)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RewardKind::Tree => "tree",
            RewardKind::Flower => "flower",
            RewardKind::Butterfly => "butterfly",
        }
    }

    /// Translation key of the completion message.
    pub fn alert_key(self) -> &'static str {
        match self {
            RewardKind::Tree => "alert_tree",
            RewardKind::Flower => "alert_flower",
            RewardKind::Butterfly => "alert_butterfly",
        }
    }
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RewardKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(RewardKind::Tree),
            "flower" => Ok(RewardKind::Flower),
            "butterfly" => Ok(RewardKind::Butterfly),
            other => Err(ValidationError::UnknownRewardKind(other.to_string())),
        }
    }
}

/// 1-based cell on a virtual grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub col: u32,
    pub row: u32,
}

impl GridCell {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }
}

/// Position as percentages of the containing box, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PercentPoint {
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TreeData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<GridCell>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fruits: Vec<String>,
    #[serde(default)]
    pub fruit_positions: Vec<PercentPoint>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowerData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cell: Option<GridCell>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ButterflyData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<PercentPoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ItemBody {
    Tree(TreeData),
    Flower(FlowerData),
    Butterfly(ButterflyData),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GardenItem {
    /// `<epoch-millis>-<random hex>`.
    pub id: String,
    /// Chosen once from the kind's pool.
    pub glyph: String,
    /// Animation delay handed through to the renderer.
    #[serde(default)]
    pub delay_secs: f64,
    #[serde(flatten)]
    pub body: ItemBody,
}

impl GardenItem {
    /// A fresh, unplaced item.
    pub fn new(id: impl Into<String>, kind: RewardKind, glyph: impl Into<String>, delay_secs: f64) -> Self {
        let body = match kind {
            RewardKind::Tree => ItemBody::Tree(TreeData::default()),
            RewardKind::Flower => ItemBody::Flower(FlowerData::default()),
            RewardKind::Butterfly => ItemBody::Butterfly(ButterflyData::default()),
        };
        Self {
            id: id.into(),
            glyph: glyph.into(),
            delay_secs,
            body,
        }
    }

    pub fn kind(&self) -> RewardKind {
        match self.body {
            ItemBody::Tree(_) => RewardKind::Tree,
            ItemBody::Flower(_) => RewardKind::Flower,
            ItemBody::Butterfly(_) => RewardKind::Butterfly,
        }
    }

    /// Ground cell, if this is a ground item that has been placed.
    pub fn cell(&self) -> Option<GridCell> {
        match &self.body {
            ItemBody::Tree(t) => t.cell,
            ItemBody::Flower(f) => f.cell,
            ItemBody::Butterfly(_) => None,
        }
    }

    /// Sky position, if this is a butterfly that has been placed.
    pub fn position(&self) -> Option<PercentPoint> {
        match &self.body {
            ItemBody::Butterfly(b) => b.position,
            _ => None,
        }
    }

    pub fn is_palm(&self) -> bool {
        matches!(self.body, ItemBody::Tree(_)) && self.glyph == PALM_GLYPH
    }

    pub fn tree(&self) -> Option<&TreeData> {
        match &self.body {
            ItemBody::Tree(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_items() {
        let json = r#"[
            {"id":"1-a","glyph":"🌴","type":"tree","cell":{"col":2,"row":1},"name":"Pal",
             "fruits":["🥥"],"fruit_positions":[{"left":20.0,"top":30.0}]},
            {"id":"2-b","glyph":"🌷","type":"flower"},
            {"id":"3-c","glyph":"🦋","delay_secs":0.4,"type":"butterfly","position":{"left":25.0,"top":12.5}}
        ]"#;
        let items: Vec<GardenItem> = serde_json::from_str(json).unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].kind(), RewardKind::Tree);
        assert!(items[0].is_palm());
        assert_eq!(items[0].cell(), Some(GridCell::new(2, 1)));
        assert_eq!(items[1].kind(), RewardKind::Flower);
        assert_eq!(items[1].cell(), None);
        assert_eq!(
            items[2].position(),
            Some(PercentPoint { left: 25.0, top: 12.5 })
        );
    }

    #[test]
    fn unknown_type_fails_to_parse() {
        let json = r#"[{"id":"1","glyph":"🐉","type":"dragon"}]"#;
        assert!(serde_json::from_str::<Vec<GardenItem>>(json).is_err());
    }

    #[test]
    fn reward_kind_rejects_unknown_names() {
        assert_eq!("flower".parse::<RewardKind>(), Ok(RewardKind::Flower));
        assert!("mushroom".parse::<RewardKind>().is_err());
    }

    #[test]
    fn serialized_item_carries_type_tag() {
        let item = GardenItem::new("9-z", RewardKind::Flower, "🌻", 0.0);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "flower");
        assert!(value.get("cell").is_none());
    }
}
