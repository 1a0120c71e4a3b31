mod engine;
pub mod fruit;
pub mod ground;
mod item;
pub mod sky;
mod snapshot;

pub use engine::Garden;
pub use item::{
    ButterflyData, FlowerData, GardenItem, GridCell, ItemBody, PercentPoint, RewardKind, TreeData,
    BUTTERFLY_GLYPHS, FLOWER_GLYPHS, PALM_GLYPH, TREE_GLYPHS,
};
pub use sky::SkyGrid;
pub use snapshot::{FruitSprite, GardenLayout, GardenSnapshot, GroundTile, SkySprite};
