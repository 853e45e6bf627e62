//! Knowledge base: recipe ingestion into the production cross-indices.
//!
//! Ingestion merges four heterogeneous sources - crafting recipes (shapeless,
//! shaped, smelting), entity loot tables, block drop tables, and the block
//! metadata table - into two indices:
//!
//! - producible: item -> every known way to obtain one unit (or batch) of it
//! - consumes: item -> every item it helps produce, and by which method
//!
//! Both indices are deduplicated on insertion and immutable once built, so a
//! [`KnowledgeBase`] can be shared read-only across any number of queries.

use ahash::{AHashMap, AHashSet};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use lodestone_common::{CraftMethod, ToolTier};

use crate::condition::{append_clause, normalize};
use crate::dataset::Dataset;
use crate::records::{
    item_key, BlockRecord, IngredientSpec, LootEntry, LootTableRecord, RecipeRecord,
};

/// One way to produce one unit (or a fixed batch) of an item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecipeVariant {
    /// Required ingredients and counts. For mine/combat variants this is the
    /// single source block or mob at count 1.
    pub ingredients: BTreeMap<String, u32>,
    /// How the item is obtained.
    pub method: CraftMethod,
    /// Normalized drop condition; empty means unconditional. Only mine and
    /// combat variants carry conditions.
    pub condition: String,
}

impl RecipeVariant {
    /// Creates an unconditional variant.
    #[must_use]
    pub fn new(ingredients: BTreeMap<String, u32>, method: CraftMethod) -> Self {
        Self {
            ingredients,
            method,
            condition: String::new(),
        }
    }

    /// Creates an acquisition variant sourcing one unit from a block or mob.
    #[must_use]
    pub fn acquisition(source: impl Into<String>, method: CraftMethod) -> Self {
        let mut ingredients = BTreeMap::new();
        ingredients.insert(source.into(), 1);
        Self::new(ingredients, method)
    }
}

/// An inverse-index entry: some item this one helps produce.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Consumer {
    /// The item produced.
    pub item: String,
    /// The method of the producing variant.
    pub method: CraftMethod,
}

/// Mobs whose loot tables are ingested as combat sources. Boss, nether-only
/// and otherwise impractical kill targets are deliberately left out.
const NORMAL_MOBS: &[&str] = &[
    "chicken",
    "cow",
    "mooshroom",
    "pig",
    "rabbit",
    "sheep",
    "squid",
    "zombie",
    "husk",
    "drowned",
    "skeleton",
    "stray",
    "spider",
    "cave_spider",
    "creeper",
    "witch",
    "slime",
    "enderman",
    "phantom",
];

/// Harvest-tool item-id codes from the block metadata table, weakest first.
const HARVEST_TIER_CODES: &[(&str, ToolTier)] = &[
    ("737", ToolTier::Wooden),
    ("742", ToolTier::Stone),
    ("752", ToolTier::Iron),
    ("757", ToolTier::Diamond),
    ("762", ToolTier::Netherite),
];

/// Blocks worth mining for their drops: ores, logs, stone-likes, dirt,
/// wood, and obsidian. Everything else in the drop tables is noise for
/// planning purposes.
fn is_normal_block(name: &str) -> bool {
    name == "obsidian"
        || ["ore", "log", "stone", "dirt", "wood"]
            .iter()
            .any(|suffix| name.ends_with(suffix))
}

/// The production knowledge base: both cross-indices, built once from a
/// [`Dataset`] and immutable afterwards.
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    producible: AHashMap<String, Vec<RecipeVariant>>,
    consumes: AHashMap<String, Vec<Consumer>>,
}

impl KnowledgeBase {
    /// Builds the knowledge base from a data set. Pure over its input: no
    /// files, no globals, just the two indices out.
    #[must_use]
    pub fn ingest(data: &Dataset) -> Self {
        let mut ingestor = Ingestor::new(data);
        ingestor.run();
        let kb = KnowledgeBase {
            producible: ingestor.producible,
            consumes: ingestor.consumes,
        };
        debug!(
            producible_items = kb.producible.len(),
            consumed_items = kb.consumes.len(),
            "knowledge base built"
        );
        kb
    }

    /// Every known way to produce `item` (empty for unknown items).
    #[must_use]
    pub fn variants_for(&self, item: &str) -> &[RecipeVariant] {
        self.producible.get(item).map_or(&[], Vec::as_slice)
    }

    /// Every item that `item` helps produce (empty for unknown items).
    #[must_use]
    pub fn consumers_of(&self, item: &str) -> &[Consumer] {
        self.consumes.get(item).map_or(&[], Vec::as_slice)
    }

    /// Whether at least one production variant is known for `item`.
    #[must_use]
    pub fn is_producible(&self, item: &str) -> bool {
        self.producible.contains_key(item)
    }

    /// Number of items with at least one known production variant.
    #[must_use]
    pub fn producible_len(&self) -> usize {
        self.producible.len()
    }
}

/// Scratch state for one ingestion pass.
struct Ingestor<'a> {
    data: &'a Dataset,
    producible: AHashMap<String, Vec<RecipeVariant>>,
    consumes: AHashMap<String, Vec<Consumer>>,
    // Keyed dedup sets; structural equality of the whole entry is the key.
    seen_variants: AHashSet<(String, RecipeVariant)>,
    seen_consumers: AHashSet<(String, Consumer)>,
}

impl<'a> Ingestor<'a> {
    fn new(data: &'a Dataset) -> Self {
        Self {
            data,
            producible: AHashMap::new(),
            consumes: AHashMap::new(),
            seen_variants: AHashSet::new(),
            seen_consumers: AHashSet::new(),
        }
    }

    fn run(&mut self) {
        for recipe in &self.data.recipes {
            match recipe {
                RecipeRecord::Shapeless {
                    ingredients,
                    result,
                } => self.ingest_shapeless(ingredients, &result.item),
                RecipeRecord::Shaped {
                    pattern,
                    key,
                    result,
                } => self.ingest_shaped(pattern, key, &result.item),
                RecipeRecord::Smelting { ingredient, result } => {
                    self.ingest_smelting(ingredient, result);
                }
                RecipeRecord::Other => {}
            }
        }
        for (mob, table) in &self.data.entity_loot {
            self.ingest_entity_loot(mob, table);
        }
        for (block, table) in &self.data.block_drops {
            self.ingest_block_drops(block, table);
        }
        // Condition back-annotation runs after all drop variants exist so
        // pool- and entry-level predicates can find their variants.
        for (block, table) in &self.data.block_drops {
            self.annotate_drop_conditions(block, table);
        }
        self.annotate_harvest_tiers();
    }

    /// Records a variant, registering its ingredients in the inverse index.
    /// Structural duplicates are dropped, which makes ingestion idempotent
    /// and insensitive to file order.
    fn add_variant(&mut self, product: &str, variant: RecipeVariant) {
        if !self
            .seen_variants
            .insert((product.to_string(), variant.clone()))
        {
            return;
        }
        for ingredient in variant.ingredients.keys() {
            let consumer = Consumer {
                item: product.to_string(),
                method: variant.method,
            };
            if self
                .seen_consumers
                .insert((ingredient.clone(), consumer.clone()))
            {
                self.consumes
                    .entry(ingredient.clone())
                    .or_default()
                    .push(consumer);
            }
        }
        self.producible
            .entry(product.to_string())
            .or_default()
            .push(variant);
    }

    /// Expands a tag transitively into concrete item names. Tag graphs are
    /// assumed acyclic; the visited set turns a violated assumption into a
    /// truncated expansion instead of a hang. A missing tag expands to the
    /// empty list.
    fn expand_tag(&self, tag: &str) -> Vec<String> {
        let mut items = Vec::new();
        let mut visited = AHashSet::new();
        let mut pending = vec![item_key(tag).to_string()];
        while let Some(name) = pending.pop() {
            if !visited.insert(name.clone()) {
                continue;
            }
            let Some(record) = self.data.tags.get(&name) else {
                warn!(tag = %name, "tag file missing, expanding to empty list");
                continue;
            };
            for value in &record.values {
                if let Some(nested) = value.strip_prefix('#') {
                    pending.push(item_key(nested).to_string());
                } else {
                    items.push(item_key(value).to_string());
                }
            }
        }
        items
    }

    /// The interchangeable options an ingredient slot can be filled with,
    /// or an empty list for a plain concrete item.
    fn slot_options(&self, spec: &IngredientSpec) -> Vec<String> {
        match spec {
            IngredientSpec::Item { .. } => Vec::new(),
            IngredientSpec::Tag { tag } => self.expand_tag(tag),
            IngredientSpec::AnyOf(list) => {
                list.iter().map(|r| item_key(&r.item).to_string()).collect()
            }
        }
    }

    fn ingest_shapeless(&mut self, ingredients: &[IngredientSpec], result_item: &str) {
        let method = if ingredients.len() > 4 {
            CraftMethod::CraftingTable
        } else {
            CraftMethod::PlayerCraft
        };
        let product = item_key(result_item).to_string();

        let mut variants = vec![RecipeVariant::new(BTreeMap::new(), method)];
        for spec in ingredients {
            if let IngredientSpec::Item { item } = spec {
                *variants[0]
                    .ingredients
                    .entry(item_key(item).to_string())
                    .or_insert(0) += 1;
            }
        }

        // One varying slot at a time: the first multi-option slot fans the
        // base variant out, later multi-option slots write into the fanned
        // copies by position. Lists fan out before tags.
        let multi_specs = ingredients
            .iter()
            .filter(|spec| matches!(spec, IngredientSpec::AnyOf(_)))
            .chain(
                ingredients
                    .iter()
                    .filter(|spec| matches!(spec, IngredientSpec::Tag { .. })),
            );
        for spec in multi_specs {
            let options = self.slot_options(spec);
            if options.is_empty() {
                continue;
            }
            if variants.len() == 1 {
                let base = variants[0].clone();
                variants.resize(options.len(), base);
            }
            for (ind, option) in options.iter().enumerate() {
                if let Some(variant) = variants.get_mut(ind) {
                    *variant.ingredients.entry(option.clone()).or_insert(0) += 1;
                }
            }
        }

        for variant in variants {
            self.add_variant(&product, variant);
        }
    }

    fn ingest_shaped(
        &mut self,
        pattern: &[String],
        key: &BTreeMap<String, IngredientSpec>,
        result_item: &str,
    ) {
        let method = if pattern.iter().any(|row| row.len() >= 3) || pattern.len() >= 3 {
            CraftMethod::CraftingTable
        } else {
            CraftMethod::PlayerCraft
        };
        let product = item_key(result_item).to_string();
        // Data-quality carve-out: these shaped recipes reference tags whose
        // expansions produce unusable variants, so they are not ingested.
        if matches!(product.as_str(), "barrel" | "campfire" | "soul_campfire") {
            return;
        }

        // Occurrences of each legend character across the pattern.
        let mut key_counts: BTreeMap<String, u32> = BTreeMap::new();
        for row in pattern {
            for ch in row.chars() {
                if ch != ' ' {
                    *key_counts.entry(ch.to_string()).or_insert(0) += 1;
                }
            }
        }

        let mut variants = vec![RecipeVariant::new(BTreeMap::new(), method)];
        for (legend, spec) in key {
            if let IngredientSpec::Item { item } = spec {
                let count = key_counts.get(legend).copied().unwrap_or(0);
                variants[0]
                    .ingredients
                    .insert(item_key(item).to_string(), count);
            }
        }

        // Total variant count is the product of every multi-option key's
        // option count.
        let mut req_num: usize = 1;
        for spec in key.values() {
            match spec {
                IngredientSpec::Tag { tag } => req_num *= self.expand_tag(tag).len(),
                IngredientSpec::AnyOf(list) => req_num *= list.len(),
                IngredientSpec::Item { .. } => {}
            }
        }

        if req_num > 1 {
            let base = variants[0].clone();
            variants = vec![base; req_num];

            // Variants are laid out in strided blocks per key so that each
            // combination of per-key choices lands in exactly one variant:
            // list keys fill contiguous blocks, tag keys step by the block
            // stride once a list axis has been laid out.
            let mut list_axis_laid = false;
            for (legend, spec) in key {
                if let IngredientSpec::AnyOf(list) = spec {
                    list_axis_laid = true;
                    let count = key_counts.get(legend).copied().unwrap_or(0);
                    let stride = req_num / list.len();
                    for (ind, item_ref) in list.iter().enumerate() {
                        for variant in &mut variants[ind * stride..(ind + 1) * stride] {
                            variant
                                .ingredients
                                .insert(item_key(&item_ref.item).to_string(), count);
                        }
                    }
                }
            }
            for (legend, spec) in key {
                if let IngredientSpec::Tag { tag } = spec {
                    let options = self.expand_tag(tag);
                    if options.is_empty() {
                        continue;
                    }
                    let count = key_counts.get(legend).copied().unwrap_or(0);
                    let stride = req_num / options.len();
                    for (ind, option) in options.iter().enumerate() {
                        if list_axis_laid {
                            let mut i = ind;
                            while i < req_num {
                                variants[i].ingredients.insert(option.clone(), count);
                                i += stride;
                            }
                        } else {
                            for variant in &mut variants[ind * stride..(ind + 1) * stride] {
                                variant.ingredients.insert(option.clone(), count);
                            }
                        }
                    }
                }
            }
        }

        for variant in variants {
            self.add_variant(&product, variant);
        }
    }

    fn ingest_smelting(&mut self, ingredient: &IngredientSpec, result_item: &str) {
        let product = item_key(result_item).to_string();
        match ingredient {
            IngredientSpec::Item { item } => {
                let mut ingredients = BTreeMap::new();
                ingredients.insert(item_key(item).to_string(), 1);
                self.add_variant(
                    &product,
                    RecipeVariant::new(ingredients, CraftMethod::Furnace),
                );
            }
            _ => {
                for option in self.slot_options(ingredient) {
                    let mut ingredients = BTreeMap::new();
                    ingredients.insert(option, 1);
                    self.add_variant(
                        &product,
                        RecipeVariant::new(ingredients, CraftMethod::Furnace),
                    );
                }
            }
        }
    }

    fn ingest_entity_loot(&mut self, mob: &str, table: &LootTableRecord) {
        if !NORMAL_MOBS.contains(&mob) {
            return;
        }
        for pool in &table.pools {
            for entry in &pool.entries {
                let Some(name) = &entry.name else { continue };
                let item = item_key(name).to_string();
                self.add_variant(&item, RecipeVariant::acquisition(mob, CraftMethod::Combat));
            }
        }
    }

    fn ingest_block_drops(&mut self, block: &str, table: &LootTableRecord) {
        if !is_normal_block(block) {
            return;
        }
        for pool in &table.pools {
            for entry in &pool.entries {
                for child in &entry.children {
                    if let Some(name) = &child.name {
                        let item = item_key(name).to_string();
                        self.add_variant(
                            &item,
                            RecipeVariant::acquisition(block, CraftMethod::Mine),
                        );
                    }
                }
                if let Some(name) = &entry.name {
                    let item = item_key(name).to_string();
                    self.add_variant(&item, RecipeVariant::acquisition(block, CraftMethod::Mine));
                }
            }
        }
    }

    /// Appends a condition clause to the mine variant sourcing `item` from
    /// `block`, if one exists.
    fn append_mine_condition(&mut self, item: &str, block: &str, clause: &str) {
        let Some(variants) = self.producible.get_mut(item) else {
            return;
        };
        if let Some(variant) = variants.iter_mut().find(|v| {
            v.method == CraftMethod::Mine
                && v.ingredients.len() == 1
                && v.ingredients.get(block) == Some(&1)
        }) {
            append_clause(&mut variant.condition, clause);
        }
    }

    /// Second pass over a block drop table: normalizes pool- and
    /// entry-level predicates and attaches them to the matching mine
    /// variants created by the first pass.
    fn annotate_drop_conditions(&mut self, block: &str, table: &LootTableRecord) {
        for pool in &table.pools {
            for condition in &pool.conditions {
                let clause = normalize(condition);
                if clause.is_empty() {
                    continue;
                }
                for entry in &pool.entries {
                    for item in entry_item_names(entry) {
                        self.append_mine_condition(&item, block, &clause);
                    }
                }
            }
            for entry in &pool.entries {
                for child in &entry.children {
                    let Some(name) = &child.name else { continue };
                    let item = item_key(name).to_string();
                    for condition in &child.conditions {
                        let clause = normalize(condition);
                        if !clause.is_empty() {
                            self.append_mine_condition(&item, block, &clause);
                        }
                    }
                }
                let Some(name) = &entry.name else { continue };
                let item = item_key(name).to_string();
                for condition in &entry.conditions {
                    let clause = normalize(condition);
                    if !clause.is_empty() {
                        self.append_mine_condition(&item, block, &clause);
                    }
                }
            }
        }
    }

    /// Derives a `tool: <tier>_pickaxe` clause for every pickaxe-mineable
    /// block with harvest requirements, and appends it to each mine variant
    /// produced from that block (found through the inverse index).
    fn annotate_harvest_tiers(&mut self) {
        for block in &self.data.blocks {
            if block.material.as_deref() != Some("mineable/pickaxe") {
                continue;
            }
            let Some(tier) = harvest_tier(block) else {
                continue;
            };
            let clause = format!("tool: {}", tier.pickaxe_item());
            let produced: Vec<String> = self
                .consumes
                .get(&block.name)
                .map(|consumers| {
                    consumers
                        .iter()
                        .filter(|c| c.method == CraftMethod::Mine)
                        .map(|c| c.item.clone())
                        .collect()
                })
                .unwrap_or_default();
            for item in produced {
                self.append_mine_condition(&item, &block.name, &clause);
            }
        }
    }
}

/// Every dropped item name in a loot entry, including alternatives children.
fn entry_item_names(entry: &LootEntry) -> Vec<String> {
    let mut names: Vec<String> = entry
        .children
        .iter()
        .filter_map(|child| child.name.as_deref())
        .map(|name| item_key(name).to_string())
        .collect();
    if let Some(name) = &entry.name {
        names.push(item_key(name).to_string());
    }
    names
}

/// The weakest pickaxe tier able to harvest a block, per its tool codes.
fn harvest_tier(block: &BlockRecord) -> Option<ToolTier> {
    let tools = block.harvest_tools.as_ref()?;
    HARVEST_TIER_CODES
        .iter()
        .find(|(code, _)| tools.contains_key(*code))
        .map(|&(_, tier)| tier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::TagRecord;
    use proptest::prelude::*;

    fn recipe(json: &str) -> RecipeRecord {
        serde_json::from_str(json).unwrap()
    }

    fn loot(json: &str) -> LootTableRecord {
        serde_json::from_str(json).unwrap()
    }

    fn tag(values: &[&str]) -> TagRecord {
        serde_json::from_str(&format!(
            "{{\"values\": [{}]}}",
            values
                .iter()
                .map(|v| format!("\"{v}\""))
                .collect::<Vec<_>>()
                .join(",")
        ))
        .unwrap()
    }

    fn ingredient_pairs(variant: &RecipeVariant) -> Vec<(&str, u32)> {
        variant
            .ingredients
            .iter()
            .map(|(k, v)| (k.as_str(), *v))
            .collect()
    }

    #[test]
    fn test_shapeless_method_threshold() {
        let mut data = Dataset::new();
        data.push_recipe(recipe(
            r#"{"type": "minecraft:crafting_shapeless",
                "ingredients": [{"item": "m:a"}, {"item": "m:b"}, {"item": "m:c"},
                                {"item": "m:d"}, {"item": "m:e"}],
                "result": {"item": "m:big"}}"#,
        ));
        data.push_recipe(recipe(
            r#"{"type": "minecraft:crafting_shapeless",
                "ingredients": [{"item": "m:a"}, {"item": "m:a"}],
                "result": {"item": "m:small"}}"#,
        ));
        let kb = KnowledgeBase::ingest(&data);

        assert_eq!(kb.variants_for("big")[0].method, CraftMethod::CraftingTable);
        let small = &kb.variants_for("small")[0];
        assert_eq!(small.method, CraftMethod::PlayerCraft);
        // Repeated ingredient entries accumulate counts.
        assert_eq!(ingredient_pairs(small), vec![("a", 2)]);
    }

    #[test]
    fn test_shapeless_list_fans_out_one_slot() {
        let mut data = Dataset::new();
        data.push_recipe(recipe(
            r#"{"type": "minecraft:crafting_shapeless",
                "ingredients": [{"item": "m:bowl"},
                                [{"item": "m:red_mushroom"}, {"item": "m:brown_mushroom"}]],
                "result": {"item": "m:mushroom_stew"}}"#,
        ));
        let kb = KnowledgeBase::ingest(&data);

        let variants = kb.variants_for("mushroom_stew");
        assert_eq!(variants.len(), 2);
        assert!(variants
            .iter()
            .any(|v| ingredient_pairs(v) == vec![("bowl", 1), ("red_mushroom", 1)]));
        assert!(variants
            .iter()
            .any(|v| ingredient_pairs(v) == vec![("bowl", 1), ("brown_mushroom", 1)]));
    }

    #[test]
    fn test_tag_expansion_is_transitive() {
        let mut data = Dataset::new();
        data.insert_tag("logs", tag(&["#minecraft:oak_logs", "minecraft:birch_log"]));
        data.insert_tag("oak_logs", tag(&["minecraft:oak_log", "minecraft:oak_wood"]));
        data.push_recipe(recipe(
            r#"{"type": "minecraft:crafting_shapeless",
                "ingredients": [{"tag": "minecraft:logs"}],
                "result": {"item": "m:charcoal_briquette"}}"#,
        ));
        let kb = KnowledgeBase::ingest(&data);

        let sources: AHashSet<&str> = kb
            .variants_for("charcoal_briquette")
            .iter()
            .flat_map(|v| v.ingredients.keys().map(String::as_str))
            .collect();
        assert_eq!(
            sources,
            AHashSet::from_iter(["oak_log", "oak_wood", "birch_log"])
        );
    }

    #[test]
    fn test_missing_tag_expands_to_nothing() {
        let mut data = Dataset::new();
        data.push_recipe(recipe(
            r#"{"type": "minecraft:crafting_shapeless",
                "ingredients": [{"item": "m:stick"}, {"tag": "minecraft:unknown_tag"}],
                "result": {"item": "m:oddity"}}"#,
        ));
        let kb = KnowledgeBase::ingest(&data);

        // The recipe survives with only its concrete ingredients.
        let variants = kb.variants_for("oddity");
        assert_eq!(variants.len(), 1);
        assert_eq!(ingredient_pairs(&variants[0]), vec![("stick", 1)]);
    }

    #[test]
    fn test_shaped_method_rules() {
        let mut data = Dataset::new();
        data.push_recipe(recipe(
            r#"{"type": "minecraft:crafting_shaped",
                "pattern": ["XX", "XX"],
                "key": {"X": {"item": "m:oak_planks"}},
                "result": {"item": "m:crafting_table"}}"#,
        ));
        data.push_recipe(recipe(
            r#"{"type": "minecraft:crafting_shaped",
                "pattern": ["XXX", "XXX", "XXX"],
                "key": {"X": {"item": "m:iron_ingot"}},
                "result": {"item": "m:iron_block"}}"#,
        ));
        let kb = KnowledgeBase::ingest(&data);

        let table = &kb.variants_for("crafting_table")[0];
        assert_eq!(table.method, CraftMethod::PlayerCraft);
        assert_eq!(ingredient_pairs(table), vec![("oak_planks", 4)]);

        let block = &kb.variants_for("iron_block")[0];
        assert_eq!(block.method, CraftMethod::CraftingTable);
        assert_eq!(ingredient_pairs(block), vec![("iron_ingot", 9)]);
    }

    #[test]
    fn test_shaped_carve_out_items_are_skipped() {
        let mut data = Dataset::new();
        data.push_recipe(recipe(
            r#"{"type": "minecraft:crafting_shaped",
                "pattern": ["PSP", "P P", "PPP"],
                "key": {"P": {"item": "m:oak_planks"}, "S": {"item": "m:oak_slab"}},
                "result": {"item": "m:barrel"}}"#,
        ));
        let kb = KnowledgeBase::ingest(&data);
        assert!(!kb.is_producible("barrel"));
    }

    #[test]
    fn test_shaped_tag_key_fans_out() {
        let mut data = Dataset::new();
        data.insert_tag(
            "planks",
            tag(&["minecraft:oak_planks", "minecraft:birch_planks"]),
        );
        data.push_recipe(recipe(
            r##"{"type": "minecraft:crafting_shaped",
                "pattern": ["X", "X", "#"],
                "key": {"X": {"tag": "minecraft:planks"}, "#": {"item": "m:stick"}},
                "result": {"item": "m:sign"}}"##,
        ));
        let kb = KnowledgeBase::ingest(&data);

        let variants = kb.variants_for("sign");
        assert_eq!(variants.len(), 2);
        for variant in variants {
            assert_eq!(variant.method, CraftMethod::CraftingTable);
            assert_eq!(variant.ingredients.get("stick"), Some(&1));
            let planks: Vec<&str> = variant
                .ingredients
                .keys()
                .filter(|k| k.ends_with("planks"))
                .map(String::as_str)
                .collect();
            assert_eq!(planks.len(), 1);
            assert_eq!(variant.ingredients[planks[0]], 2);
        }
    }

    #[test]
    fn test_shaped_list_and_tag_cover_all_combinations() {
        let mut data = Dataset::new();
        data.insert_tag("fuels", tag(&["minecraft:coal", "minecraft:charcoal"]));
        data.push_recipe(recipe(
            r#"{"type": "minecraft:crafting_shaped",
                "pattern": ["AB"],
                "key": {"A": [{"item": "m:flint"}, {"item": "m:quartz"}],
                        "B": {"tag": "minecraft:fuels"}},
                "result": {"item": "m:firestarter"}}"#,
        ));
        let kb = KnowledgeBase::ingest(&data);

        let combos: AHashSet<Vec<(&str, u32)>> = kb
            .variants_for("firestarter")
            .iter()
            .map(ingredient_pairs)
            .collect();
        assert_eq!(combos.len(), 4);
        assert!(combos.contains(&vec![("coal", 1), ("flint", 1)]));
        assert!(combos.contains(&vec![("charcoal", 1), ("flint", 1)]));
        assert!(combos.contains(&vec![("coal", 1), ("quartz", 1)]));
        assert!(combos.contains(&vec![("charcoal", 1), ("quartz", 1)]));
    }

    #[test]
    fn test_smelting_tag_yields_variant_per_option() {
        let mut data = Dataset::new();
        data.insert_tag("logs", tag(&["minecraft:oak_log", "minecraft:birch_log"]));
        data.push_recipe(recipe(
            r#"{"type": "minecraft:smelting",
                "ingredient": {"tag": "minecraft:logs"},
                "result": "minecraft:charcoal"}"#,
        ));
        let kb = KnowledgeBase::ingest(&data);

        let variants = kb.variants_for("charcoal");
        assert_eq!(variants.len(), 2);
        assert!(variants
            .iter()
            .all(|v| v.method == CraftMethod::Furnace && v.ingredients.values().all(|&n| n == 1)));
    }

    #[test]
    fn test_entity_loot_allow_list() {
        let mut data = Dataset::new();
        let table = r#"{"pools": [{"entries": [{"name": "minecraft:rotten_flesh"}]}]}"#;
        data.push_entity_loot("zombie", loot(table));
        data.push_entity_loot("ender_dragon", loot(table));
        let kb = KnowledgeBase::ingest(&data);

        let variants = kb.variants_for("rotten_flesh");
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].method, CraftMethod::Combat);
        assert_eq!(ingredient_pairs(&variants[0]), vec![("zombie", 1)]);
    }

    #[test]
    fn test_block_drop_heuristic() {
        let mut data = Dataset::new();
        let table = |item: &str| {
            loot(&format!(
                r#"{{"pools": [{{"entries": [{{"name": "minecraft:{item}"}}]}}]}}"#
            ))
        };
        data.push_block_drops("iron_ore", table("iron_ore"));
        data.push_block_drops("obsidian", table("obsidian"));
        data.push_block_drops("glass_pane", table("glass_pane"));
        let kb = KnowledgeBase::ingest(&data);

        assert!(kb.is_producible("iron_ore"));
        assert!(kb.is_producible("obsidian"));
        assert!(!kb.is_producible("glass_pane"));
    }

    #[test]
    fn test_alternatives_children_drops_and_annotation() {
        let mut data = Dataset::new();
        data.push_block_drops(
            "diamond_ore",
            loot(
                r#"{"pools": [{"entries": [{
                    "children": [
                        {"name": "minecraft:diamond_ore",
                         "conditions": [{"condition": "minecraft:match_tool",
                                         "predicate": {"enchantments": [{"enchantment": "minecraft:silk_touch"}]}}]},
                        {"name": "minecraft:diamond"}
                    ]
                }]}]}"#,
            ),
        );
        let kb = KnowledgeBase::ingest(&data);

        let ore_drop = &kb.variants_for("diamond_ore")[0];
        assert_eq!(ore_drop.condition, "enchant: silk_touch");
        let gem_drop = &kb.variants_for("diamond")[0];
        assert_eq!(gem_drop.condition, "");
    }

    #[test]
    fn test_harvest_tier_annotation_appends_clause() {
        let mut data = Dataset::new();
        data.push_block_drops(
            "diamond_ore",
            loot(
                r#"{"pools": [{
                    "conditions": [{"condition": "minecraft:match_tool",
                                    "predicate": {"enchantments": [{"enchantment": "minecraft:fortune"}]}}],
                    "entries": [{"name": "minecraft:diamond"}]
                }]}"#,
            ),
        );
        data.push_block(
            serde_json::from_str(
                r#"{"name": "diamond_ore", "material": "mineable/pickaxe",
                    "harvestTools": {"752": true, "757": true, "762": true}}"#,
            )
            .unwrap(),
        );
        let kb = KnowledgeBase::ingest(&data);

        let variant = &kb.variants_for("diamond")[0];
        assert_eq!(variant.condition, "enchant: fortune, tool: iron_pickaxe");
    }

    #[test]
    fn test_blocks_without_harvest_tools_stay_unconditional() {
        let mut data = Dataset::new();
        data.push_block_drops(
            "oak_log",
            loot(r#"{"pools": [{"entries": [{"name": "minecraft:oak_log"}]}]}"#),
        );
        data.push_block(
            serde_json::from_str(r#"{"name": "oak_log", "material": "mineable/axe"}"#).unwrap(),
        );
        let kb = KnowledgeBase::ingest(&data);
        assert_eq!(kb.variants_for("oak_log")[0].condition, "");
    }

    #[test]
    fn test_consumes_index_inverse_view() {
        let mut data = Dataset::new();
        data.push_recipe(recipe(
            r#"{"type": "minecraft:crafting_shapeless",
                "ingredients": [{"item": "m:iron_ingot"}, {"item": "m:flint"}],
                "result": {"item": "m:flint_and_steel"}}"#,
        ));
        data.push_recipe(recipe(
            r#"{"type": "minecraft:smelting",
                "ingredient": {"item": "m:iron_ingot"},
                "result": "m:iron_nugget"}"#,
        ));
        let kb = KnowledgeBase::ingest(&data);

        let consumers: AHashSet<(&str, CraftMethod)> = kb
            .consumers_of("iron_ingot")
            .iter()
            .map(|c| (c.item.as_str(), c.method))
            .collect();
        assert_eq!(
            consumers,
            AHashSet::from_iter([
                ("flint_and_steel", CraftMethod::PlayerCraft),
                ("iron_nugget", CraftMethod::Furnace),
            ])
        );
    }

    #[test]
    fn test_duplicate_records_are_deduplicated() {
        let mut data = Dataset::new();
        let json = r#"{"type": "minecraft:smelting",
                       "ingredient": {"item": "m:iron_ore"},
                       "result": "m:iron_ingot"}"#;
        data.push_recipe(recipe(json));
        data.push_recipe(recipe(json));
        let kb = KnowledgeBase::ingest(&data);

        assert_eq!(kb.variants_for("iron_ingot").len(), 1);
        assert_eq!(kb.consumers_of("iron_ore").len(), 1);
    }

    proptest! {
        // Ingestion is order-insensitive: any permutation of the recipe
        // files yields the same variant sets.
        #[test]
        fn prop_ingestion_order_insensitive(order in Just(vec![0usize, 1, 2]).prop_shuffle()) {
            let jsons = [
                r#"{"type": "minecraft:smelting",
                    "ingredient": {"item": "m:iron_ore"}, "result": "m:iron_ingot"}"#,
                r#"{"type": "minecraft:crafting_shapeless",
                    "ingredients": [{"item": "m:iron_ingot"}, {"item": "m:stick"}],
                    "result": {"item": "m:iron_shovel"}}"#,
                r#"{"type": "minecraft:smelting",
                    "ingredient": {"item": "m:iron_ore"}, "result": "m:iron_ingot"}"#,
            ];
            let mut data = Dataset::new();
            for &idx in &order {
                data.push_recipe(recipe(jsons[idx]));
            }
            let kb = KnowledgeBase::ingest(&data);

            let ingots: AHashSet<&RecipeVariant> = kb.variants_for("iron_ingot").iter().collect();
            prop_assert_eq!(ingots.len(), 1);
            prop_assert_eq!(kb.variants_for("iron_shovel").len(), 1);
        }
    }
}
