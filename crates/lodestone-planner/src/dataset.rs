//! In-memory game data set and directory loading.
//!
//! All data files are fully materialized into an owned [`Dataset`] before
//! ingestion runs; no file handles outlive loading. Individual files that
//! fail to parse are skipped with a warning so one malformed record cannot
//! poison the whole pass.

use ahash::AHashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use lodestone_common::{DataError, DataResult};

use crate::records::{BlockRecord, LootTableRecord, RecipeRecord, TagRecord};

/// Fully materialized snapshot of the game data files.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Recipe definitions, in no particular order.
    pub recipes: Vec<RecipeRecord>,
    /// Entity loot tables, keyed by mob name.
    pub entity_loot: Vec<(String, LootTableRecord)>,
    /// Block drop tables, keyed by block name.
    pub block_drops: Vec<(String, LootTableRecord)>,
    /// Item tag files, keyed by tag name (namespace stripped).
    pub tags: AHashMap<String, TagRecord>,
    /// Block metadata table.
    pub blocks: Vec<BlockRecord>,
}

impl Dataset {
    /// Creates an empty data set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a recipe definition.
    pub fn push_recipe(&mut self, recipe: RecipeRecord) {
        self.recipes.push(recipe);
    }

    /// Adds an entity loot table under the given mob name.
    pub fn push_entity_loot(&mut self, mob: impl Into<String>, table: LootTableRecord) {
        self.entity_loot.push((mob.into(), table));
    }

    /// Adds a block drop table under the given block name.
    pub fn push_block_drops(&mut self, block: impl Into<String>, table: LootTableRecord) {
        self.block_drops.push((block.into(), table));
    }

    /// Registers an item tag.
    pub fn insert_tag(&mut self, name: impl Into<String>, tag: TagRecord) {
        self.tags.insert(name.into(), tag);
    }

    /// Adds a block metadata record.
    pub fn push_block(&mut self, block: BlockRecord) {
        self.blocks.push(block);
    }

    /// Loads a data set from a directory laid out as the game data dump:
    ///
    /// ```text
    /// <root>/recipes/*.json
    /// <root>/loot_tables/entities/*.json
    /// <root>/loot_tables/blocks/*.json
    /// <root>/tags/items/*.json
    /// <root>/blocks.json
    /// ```
    ///
    /// Missing subdirectories yield empty collections; files that fail to
    /// parse are skipped with a warning.
    pub fn load_dir(root: impl AsRef<Path>) -> DataResult<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            return Err(DataError::MissingRoot(root.display().to_string()));
        }

        let mut data = Self::new();

        data.recipes = load_json_dir::<RecipeRecord>(&root.join("recipes"))?
            .into_iter()
            .map(|(_, record)| record)
            .collect();
        data.entity_loot = load_json_dir(&root.join("loot_tables").join("entities"))?;
        data.block_drops = load_json_dir(&root.join("loot_tables").join("blocks"))?;
        for (name, tag) in load_json_dir::<TagRecord>(&root.join("tags").join("items"))? {
            data.tags.insert(name, tag);
        }

        let blocks_path = root.join("blocks.json");
        if blocks_path.is_file() {
            let text = fs::read_to_string(&blocks_path)?;
            data.blocks =
                serde_json::from_str(&text).map_err(|err| DataError::Parse {
                    path: blocks_path.display().to_string(),
                    message: err.to_string(),
                })?;
        }

        debug!(
            recipes = data.recipes.len(),
            entity_loot = data.entity_loot.len(),
            block_drops = data.block_drops.len(),
            tags = data.tags.len(),
            blocks = data.blocks.len(),
            "loaded data set"
        );
        Ok(data)
    }
}

/// Parses every `*.json` file in `dir` as `T`, returning `(file stem, value)`
/// pairs. A missing directory yields an empty list; unparseable files are
/// skipped with a warning.
fn load_json_dir<T: serde::de::DeserializeOwned>(dir: &Path) -> DataResult<Vec<(String, T)>> {
    let mut out = Vec::new();
    if !dir.is_dir() {
        return Ok(out);
    }
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().map_or(true, |ext| ext != "json") {
            continue;
        }
        let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
            continue;
        };
        let text = fs::read_to_string(&path)?;
        match serde_json::from_str::<T>(&text) {
            Ok(value) => out.push((stem.to_string(), value)),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping malformed data file");
            }
        }
    }
    Ok(out)
}
