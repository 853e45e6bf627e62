//! Drop-condition normalization and capability evaluation.
//!
//! Loot predicates are flattened into short human-readable strings at
//! ingestion time (`"tool: iron_pickaxe"`, `"enchant: silk_touch"`, ...).
//! At query time only the pickaxe-tier clauses actually gate anything:
//! every other clause kind is treated as satisfied, matching the permissive
//! behavior of the drop tables' consumers.

use lodestone_common::{StatusSnapshot, ToolTier};

use crate::records::{item_key, ConditionRecord};

/// Flattens a predicate record into its normalized string form.
///
/// Unrecognized predicate kinds normalize to the empty string, which reads
/// as "always satisfied" - a deliberate permissive fallback.
#[must_use]
pub fn normalize(condition: &ConditionRecord) -> String {
    match condition.kind.as_str() {
        "minecraft:match_tool" => {
            let Some(predicate) = &condition.predicate else {
                return String::new();
            };
            if !predicate.items.is_empty() {
                let items: Vec<&str> = predicate.items.iter().map(|i| item_key(i)).collect();
                format!("tool: {}", items.join(","))
            } else if !predicate.enchantments.is_empty() {
                let enchants: Vec<&str> = predicate
                    .enchantments
                    .iter()
                    .map(|e| item_key(&e.enchantment))
                    .collect();
                format!("enchant: {}", enchants.join(","))
            } else {
                String::new()
            }
        }
        "minecraft:table_bonus" => "table_bonus".to_string(),
        "minecraft:alternative" => {
            let clauses: Vec<String> = condition
                .terms
                .iter()
                .map(normalize)
                .filter(|c| !c.is_empty())
                .collect();
            clauses.join(" or ")
        }
        "minecraft:inverted" => {
            let inner = condition.term.as_deref().map(normalize).unwrap_or_default();
            if inner.is_empty() {
                return String::new();
            }
            let negated: Vec<String> = inner
                .split(" or ")
                .map(|clause| format!("not {clause}"))
                .collect();
            negated.join(" or ")
        }
        _ => String::new(),
    }
}

/// Appends a clause to an accumulated condition string, comma-joining when
/// a condition is already present.
pub fn append_clause(condition: &mut String, clause: &str) {
    if clause.is_empty() {
        return;
    }
    if !condition.is_empty() {
        condition.push_str(", ");
    }
    condition.push_str(clause);
}

/// The pickaxe tier a condition string demands, if any.
///
/// When several tiers are named the strictest one wins; a condition naming
/// no pickaxe demands nothing.
#[must_use]
pub fn required_tier(condition: &str) -> Option<ToolTier> {
    ToolTier::ALL
        .iter()
        .copied()
        .filter(|tier| condition.contains(tier.pickaxe_item()))
        .max()
}

/// Whether a normalized condition is satisfied by the given snapshot.
///
/// The empty condition always passes. Pickaxe-tier clauses pass when a
/// pickaxe of at least the demanded tier is possessed. All other clause
/// kinds (enchantments, table bonus, alternatives, inversions, anything
/// unrecognized) are treated as satisfied.
#[must_use]
pub fn evaluate(condition: &str, status: &StatusSnapshot) -> bool {
    match required_tier(condition) {
        None => true,
        Some(required) => status
            .best_pickaxe_tier()
            .map_or(false, |owned| owned >= required),
    }
}

/// Extracts the single pickaxe item named by a condition, for use as a
/// re-resolution sub-goal when the condition is not yet satisfied.
#[must_use]
pub fn required_pickaxe(condition: &str) -> Option<&str> {
    condition
        .split([' ', ','])
        .find(|token| token.contains("pickaxe") && !token.is_empty())
}
