//! Crafting and acquisition method tags.

use serde::{Deserialize, Serialize};

/// How a recipe variant produces its item.
///
/// The game data encodes these as plain strings (`"crafting_table"`,
/// `"player"`, `"furnace"`, `"mine"`, `"combat"`, and the empty string for a
/// synthetic query root); this enum closes that set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CraftMethod {
    /// Crafted on a crafting table (3x3 grid or more than 4 ingredients).
    #[serde(rename = "crafting_table")]
    CraftingTable,
    /// Crafted in the player's own 2x2 grid, no station needed.
    #[serde(rename = "player")]
    PlayerCraft,
    /// Smelted in a furnace.
    #[serde(rename = "furnace")]
    Furnace,
    /// Obtained by mining a block.
    #[serde(rename = "mine")]
    Mine,
    /// Dropped by killing a mob.
    #[serde(rename = "combat")]
    Combat,
    /// Synthetic root of a query tree; produces nothing itself.
    #[serde(rename = "")]
    Root,
}

impl CraftMethod {
    /// Wire string used by the game data for this method.
    #[must_use]
    pub const fn wire_name(self) -> &'static str {
        match self {
            Self::CraftingTable => "crafting_table",
            Self::PlayerCraft => "player",
            Self::Furnace => "furnace",
            Self::Mine => "mine",
            Self::Combat => "combat",
            Self::Root => "",
        }
    }

    /// Whether this method acquires an item from the world rather than
    /// assembling it from ingredients. Acquisition nodes are always leaves.
    #[must_use]
    pub const fn is_acquisition(self) -> bool {
        matches!(self, Self::Mine | Self::Combat)
    }

    /// The station item that must be possessed before recipes of this
    /// method become usable, if any.
    #[must_use]
    pub const fn station_item(self) -> Option<&'static str> {
        match self {
            Self::CraftingTable => Some("crafting_table"),
            Self::Furnace => Some("furnace"),
            _ => None,
        }
    }
}

impl std::fmt::Display for CraftMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.wire_name())
    }
}
