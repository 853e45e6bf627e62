//! Tool tiers for harvest capability checks.

use serde::{Deserialize, Serialize};

/// Ordered ranking of pickaxe material.
///
/// A tool of a higher tier satisfies any lower-tier harvest requirement
/// (monotonic), so the derived `Ord` is the whole capability check. Golden
/// pickaxes mine the same blocks as wooden ones and parse as [`Self::Wooden`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ToolTier {
    /// Wooden (and golden) tools.
    Wooden,
    /// Stone tools.
    Stone,
    /// Iron tools.
    Iron,
    /// Diamond tools.
    Diamond,
    /// Netherite tools.
    Netherite,
}

impl ToolTier {
    /// All tiers, weakest first.
    pub const ALL: [Self; 5] = [
        Self::Wooden,
        Self::Stone,
        Self::Iron,
        Self::Diamond,
        Self::Netherite,
    ];

    /// Parses a tier from a pickaxe item name such as `"stone_pickaxe"`.
    ///
    /// Returns `None` for anything that is not a known pickaxe.
    #[must_use]
    pub fn from_pickaxe_item(item: &str) -> Option<Self> {
        match item {
            "wooden_pickaxe" | "golden_pickaxe" => Some(Self::Wooden),
            "stone_pickaxe" => Some(Self::Stone),
            "iron_pickaxe" => Some(Self::Iron),
            "diamond_pickaxe" => Some(Self::Diamond),
            "netherite_pickaxe" => Some(Self::Netherite),
            _ => None,
        }
    }

    /// The canonical pickaxe item name for this tier.
    #[must_use]
    pub const fn pickaxe_item(self) -> &'static str {
        match self {
            Self::Wooden => "wooden_pickaxe",
            Self::Stone => "stone_pickaxe",
            Self::Iron => "iron_pickaxe",
            Self::Diamond => "diamond_pickaxe",
            Self::Netherite => "netherite_pickaxe",
        }
    }
}
