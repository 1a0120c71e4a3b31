//! The garden: persisted reward items and their placement.
//!
//! Every snapshot runs a full placement pass in insertion order. Ground cells
//! are re-validated against the current column count, butterflies without a
//! position get one, tree fruit is repaired, and anything that changed is
//! written back once at the end of the pass.

use std::collections::HashSet;

use chrono::Utc;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Mcg128Xsl64;

use super::fruit;
use super::ground::{resolve_ground_position, Occupancy};
use super::item::{GardenItem, ItemBody, RewardKind};
use super::sky::resolve_sky_position;
use super::snapshot::{FruitSprite, GardenLayout, GardenSnapshot, GroundTile, SkySprite};
use crate::error::ValidationError;
use crate::storage::{load_json, save_json, KvStore, GARDEN_KEY};

/// Upper bound of the random animation delay, in seconds.
const MAX_DELAY_SECS: f64 = 1.2;

pub struct Garden<S: KvStore> {
    store: S,
    items: Vec<GardenItem>,
    layout: GardenLayout,
    rng: Mcg128Xsl64,
}

impl<S: KvStore> Garden<S> {
    /// Load the persisted garden. A missing or unreadable blob yields an
    /// empty garden.
    ///
    /// `seed` fixes the RNG for reproducible layouts; `None` seeds from entropy.
    pub fn load(store: S, layout: GardenLayout, seed: Option<u64>) -> Self {
        let items: Vec<GardenItem> = load_json(&store, GARDEN_KEY).unwrap_or_default();
        tracing::debug!(count = items.len(), "garden loaded");
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self {
            store,
            items,
            layout,
            rng,
        }
    }

    pub fn items(&self) -> &[GardenItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn layout(&self) -> GardenLayout {
        self.layout
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Adopt new viewport dimensions and re-place everything.
    pub fn set_layout(&mut self, layout: GardenLayout) -> GardenSnapshot {
        self.layout = layout;
        self.snapshot()
    }

    /// Grow a new item, persist, and return the updated snapshot.
    pub fn add_reward(&mut self, kind: RewardKind) -> GardenSnapshot {
        let glyph = kind
            .glyphs()
            .choose(&mut self.rng)
            .copied()
            .unwrap_or_default();
        let id = format!("{}-{:08x}", Utc::now().timestamp_millis(), self.rng.gen::<u32>());
        let delay = self.rng.gen_range(0.0..MAX_DELAY_SECS);
        let item = GardenItem::new(id, kind, glyph, delay);
        tracing::info!(id = %item.id, kind = %kind, glyph = %item.glyph, "reward added");

        self.items.push(item);
        self.persist();
        self.snapshot()
    }

    /// Like [`add_reward`](Self::add_reward) for an untyped kind name.
    /// Unknown names are logged and ignored.
    pub fn add_reward_by_name(&mut self, name: &str) -> Option<GardenSnapshot> {
        match name.parse::<RewardKind>() {
            Ok(kind) => Some(self.add_reward(kind)),
            Err(e) => {
                tracing::error!("{e}");
                None
            }
        }
    }

    /// Name a tree. Surrounding whitespace is trimmed; an empty name clears it.
    pub fn rename_tree(&mut self, id: &str, name: &str) -> Result<(), ValidationError> {
        let item = self
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| ValidationError::UnknownItem(id.to_string()))?;
        let ItemBody::Tree(tree) = &mut item.body else {
            return Err(ValidationError::NotATree(id.to_string()));
        };
        let trimmed = name.trim();
        tree.name = (!trimmed.is_empty()).then(|| trimmed.to_string());
        self.persist();
        Ok(())
    }

    /// Remove every item if `confirm` agrees. Irreversible.
    pub fn clear<F>(&mut self, confirm: F) -> bool
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return false;
        }
        tracing::info!(count = self.items.len(), "garden cleared");
        self.items.clear();
        self.persist();
        true
    }

    /// Run the placement pass and build the render view.
    pub fn snapshot(&mut self) -> GardenSnapshot {
        let columns = self.layout.columns.max(1);
        let sky_grid = self.layout.sky_grid();
        let mut occupied = Occupancy::new();
        let mut sky_used = HashSet::new();
        let mut dirty = false;
        let mut ground = Vec::new();
        let mut sky = Vec::new();

        for item in self.items.iter_mut() {
            let palm = item.is_palm();
            match &mut item.body {
                ItemBody::Tree(tree) => {
                    let (cell, moved) =
                        resolve_ground_position(tree.cell, &mut occupied, columns, &mut self.rng);
                    tree.cell = Some(cell);
                    let regrown = fruit::repair(tree, palm, &mut self.rng);
                    dirty |= moved || regrown;
                    let fruits = tree
                        .fruits
                        .iter()
                        .zip(&tree.fruit_positions)
                        .map(|(glyph, position)| FruitSprite {
                            glyph: glyph.clone(),
                            position: *position,
                        })
                        .collect();
                    ground.push(GroundTile {
                        id: item.id.clone(),
                        kind: RewardKind::Tree,
                        glyph: item.glyph.clone(),
                        cell,
                        name: tree.name.clone(),
                        fruits,
                        delay_secs: item.delay_secs,
                    });
                }
                ItemBody::Flower(flower) => {
                    let (cell, moved) =
                        resolve_ground_position(flower.cell, &mut occupied, columns, &mut self.rng);
                    flower.cell = Some(cell);
                    dirty |= moved;
                    ground.push(GroundTile {
                        id: item.id.clone(),
                        kind: RewardKind::Flower,
                        glyph: item.glyph.clone(),
                        cell,
                        name: None,
                        fruits: Vec::new(),
                        delay_secs: item.delay_secs,
                    });
                }
                ItemBody::Butterfly(butterfly) => {
                    let (position, assigned) = resolve_sky_position(
                        butterfly.position,
                        &mut sky_used,
                        sky_grid,
                        &mut self.rng,
                    );
                    butterfly.position = Some(position);
                    dirty |= assigned;
                    sky.push(SkySprite {
                        id: item.id.clone(),
                        glyph: item.glyph.clone(),
                        position,
                        delay_secs: item.delay_secs,
                    });
                }
            }
        }

        if dirty {
            self.persist();
        }

        GardenSnapshot {
            plant_count: ground.len(),
            butterfly_count: sky.len(),
            ground,
            sky,
            columns,
            sky_grid,
        }
    }

    fn persist(&self) {
        save_json(&self.store, GARDEN_KEY, &self.items);
    }
}
