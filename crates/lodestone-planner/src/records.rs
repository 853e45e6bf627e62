//! Raw serde models of the game data files.
//!
//! These mirror the on-disk JSON shapes one-to-one: recipe definitions
//! (shapeless, shaped, smelting), loot/drop tables with their condition
//! predicates, item tag files, and the block metadata table. Normalization
//! into the knowledge indices happens later; nothing here interprets the
//! data beyond deserialization.

use serde::Deserialize;
use std::collections::BTreeMap;

/// Strips the namespace prefix (and any leading tag marker) from a game
/// identifier: `"#minecraft:planks"` and `"minecraft:planks"` both become
/// `"planks"`.
#[must_use]
pub fn item_key(name: &str) -> &str {
    let name = name.strip_prefix('#').unwrap_or(name);
    name.rsplit(':').next().unwrap_or(name)
}

/// One recipe definition file, discriminated by its `type` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum RecipeRecord {
    /// Shapeless crafting: a bag of ingredients in any arrangement.
    #[serde(rename = "minecraft:crafting_shapeless")]
    Shapeless {
        /// Required ingredients, one entry per grid slot.
        ingredients: Vec<IngredientSpec>,
        /// Crafted result.
        result: CraftResult,
    },
    /// Shaped crafting: a pattern of rows over a keyed legend.
    #[serde(rename = "minecraft:crafting_shaped")]
    Shaped {
        /// Pattern rows; each character indexes into `key`, space is empty.
        pattern: Vec<String>,
        /// Legend mapping pattern characters to ingredients.
        key: BTreeMap<String, IngredientSpec>,
        /// Crafted result.
        result: CraftResult,
    },
    /// Furnace smelting.
    #[serde(rename = "minecraft:smelting")]
    Smelting {
        /// Input ingredient.
        ingredient: IngredientSpec,
        /// Smelted result item name.
        result: String,
    },
    /// Any recipe type this system does not ingest (stonecutting, smithing,
    /// special recipes, ...).
    #[serde(other)]
    Other,
}

/// Crafted result of a shapeless or shaped recipe.
#[derive(Debug, Clone, Deserialize)]
pub struct CraftResult {
    /// Result item name.
    pub item: String,
    /// Batch size, when larger than one.
    #[serde(default)]
    pub count: Option<u32>,
}

/// One ingredient slot: a concrete item, a tag reference, or a list of
/// interchangeable concrete items.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IngredientSpec {
    /// A single concrete item.
    Item {
        /// Item name.
        item: String,
    },
    /// A tag reference expanding to a set of items.
    Tag {
        /// Tag name.
        tag: String,
    },
    /// Interchangeable alternatives.
    AnyOf(Vec<ItemRef>),
}

/// A bare `{ "item": ... }` reference inside an alternatives list.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRef {
    /// Item name.
    pub item: String,
}

/// A loot or block-drop table: pools of weighted entries.
///
/// The same shape serves entity loot tables (combat drops) and block drop
/// tables (mining drops).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LootTableRecord {
    /// Drop pools; absent pools mean the table yields nothing.
    #[serde(default)]
    pub pools: Vec<LootPool>,
}

/// One pool of a loot table.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LootPool {
    /// Candidate entries within this pool.
    #[serde(default)]
    pub entries: Vec<LootEntry>,
    /// Conditions gating the whole pool.
    #[serde(default)]
    pub conditions: Vec<ConditionRecord>,
}

/// One entry of a loot pool.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LootEntry {
    /// Dropped item name; entries without a name (e.g. bare alternatives
    /// wrappers) are skipped.
    #[serde(default)]
    pub name: Option<String>,
    /// Conditions gating this entry alone.
    #[serde(default)]
    pub conditions: Vec<ConditionRecord>,
    /// Child entries of alternatives/group wrappers.
    #[serde(default)]
    pub children: Vec<LootEntry>,
}

/// A declarative drop predicate attached to a pool or entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionRecord {
    /// Predicate kind, e.g. `minecraft:match_tool`.
    #[serde(rename = "condition", default)]
    pub kind: String,
    /// Tool predicate payload for `match_tool`.
    #[serde(default)]
    pub predicate: Option<ToolPredicate>,
    /// Sub-predicates of `alternative`.
    #[serde(default)]
    pub terms: Vec<ConditionRecord>,
    /// Sub-predicate of `inverted`.
    #[serde(default)]
    pub term: Option<Box<ConditionRecord>>,
}

/// Payload of a `match_tool` predicate.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToolPredicate {
    /// Explicit tool item names.
    #[serde(default)]
    pub items: Vec<String>,
    /// Required enchantments.
    #[serde(default)]
    pub enchantments: Vec<EnchantmentRef>,
}

/// One required enchantment inside a tool predicate.
#[derive(Debug, Clone, Deserialize)]
pub struct EnchantmentRef {
    /// Enchantment name.
    pub enchantment: String,
}

/// An item tag file: a named set of item names, possibly nesting other
/// tags via a `#` prefix.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagRecord {
    /// Member item names and nested `#tag` references.
    #[serde(default)]
    pub values: Vec<String>,
}

/// Block metadata: material class and harvest tool requirements.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockRecord {
    /// Block name.
    pub name: String,
    /// Material class, e.g. `mineable/pickaxe`.
    #[serde(default)]
    pub material: Option<String>,
    /// Map from harvesting tool item-id code to effectiveness; presence of
    /// a code means that tool (or better) can harvest the block.
    #[serde(rename = "harvestTools", default)]
    pub harvest_tools: Option<BTreeMap<String, bool>>,
}
