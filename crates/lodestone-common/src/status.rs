//! Snapshot of the agent's current possessions.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::tier::ToolTier;

/// Item-to-quantity snapshot of everything the agent currently holds.
///
/// Owned by the caller and passed read-only into queries. Special keys
/// double as capability flags: the station items (`crafting_table`,
/// `furnace`) and the `<tier>_pickaxe` items.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusSnapshot {
    items: AHashMap<String, u32>,
}

impl StatusSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a snapshot from `(item, quantity)` pairs.
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, u32)>) -> Self {
        Self {
            items: pairs
                .into_iter()
                .map(|(item, qty)| (item.to_string(), qty))
                .collect(),
        }
    }

    /// Sets the possessed quantity of an item.
    pub fn set(&mut self, item: impl Into<String>, quantity: u32) {
        self.items.insert(item.into(), quantity);
    }

    /// Quantity possessed of an item (zero when absent).
    #[must_use]
    pub fn count(&self, item: &str) -> u32 {
        self.items.get(item).copied().unwrap_or(0)
    }

    /// Whether the item is present at all.
    #[must_use]
    pub fn contains(&self, item: &str) -> bool {
        self.items.contains_key(item)
    }

    /// Whether at least `quantity` of `item` is possessed.
    #[must_use]
    pub fn has_at_least(&self, item: &str, quantity: u32) -> bool {
        self.count(item) >= quantity
    }

    /// The best pickaxe tier currently possessed, if any.
    #[must_use]
    pub fn best_pickaxe_tier(&self) -> Option<ToolTier> {
        self.items
            .keys()
            .filter_map(|item| ToolTier::from_pickaxe_item(item))
            .max()
    }

    /// Number of distinct items in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the snapshot holds nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<(String, u32)> for StatusSnapshot {
    fn from_iter<I: IntoIterator<Item = (String, u32)>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
