//! Bounded AND/OR task trees over the knowledge base.
//!
//! - [`TaskNode`]: one way of producing one item, with per-ingredient
//!   OR-slots of alternative sub-trees
//! - [`BuildLimits`]: depth and breadth bounds on construction
//! - [`KnowledgeBase::task_tree`]: builds a tree for a goal map
//!
//! Trees are owned, acyclic, and built fresh per query; nothing is cached
//! or shared between calls. Acquisition variants (mining, combat) are
//! terminal leaves, and a variant whose ingredients include the item being
//! produced one level up is skipped so recipe cycles cannot recurse.

use std::collections::BTreeMap;

use lodestone_common::method::CraftMethod;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::knowledge::{KnowledgeBase, RecipeVariant};

/// One node of a task tree: produce `quantity` of `target` via `method`.
///
/// `ingredients` lists the chosen variant's requirements in sorted order,
/// and `slots[i]` holds the OR-alternatives for `ingredients[i]`. A leaf
/// (acquisition, truncation, or unknown item) has empty `slots`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskNode {
    /// Item this node produces; empty for the synthetic root.
    pub target: String,
    /// Quantity of `target` required one level up; zero at the root.
    pub quantity: u32,
    /// How `target` is produced.
    pub method: CraftMethod,
    /// Normalized condition string inherited from the variant.
    pub condition: String,
    /// Required `(item, count)` pairs, in sorted item order.
    pub ingredients: Vec<(String, u32)>,
    /// `slots[i]` holds the alternative sub-trees satisfying `ingredients[i]`.
    pub slots: Vec<Vec<TaskNode>>,
}

impl TaskNode {
    /// Whether this node has no sub-trees left to expand.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.slots.iter().all(Vec::is_empty)
    }
}

/// Depth and breadth bounds for tree construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildLimits {
    /// Maximum recursion depth; nodes at this depth truncate unsuccessfully.
    pub max_depth: usize,
    /// Maximum successful alternatives kept per OR-slot.
    pub max_breadth: usize,
}

impl BuildLimits {
    /// Default bounds.
    pub const DEFAULT: Self = Self {
        max_depth: 10,
        max_breadth: 10,
    };
}

impl Default for BuildLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl KnowledgeBase {
    /// Builds a task tree for a goal map with [`BuildLimits::DEFAULT`].
    ///
    /// Returns the synthetic root (empty target, [`CraftMethod::Root`])
    /// whose slots cover the goal items, and whether the tree fully
    /// resolved within the limits. `false` means the tree may be partial;
    /// it never signals an error.
    #[must_use]
    pub fn task_tree(&self, goal: &BTreeMap<String, u32>) -> (TaskNode, bool) {
        self.task_tree_with_limits(goal, BuildLimits::DEFAULT)
    }

    /// Builds a task tree for a goal map with explicit limits.
    #[must_use]
    pub fn task_tree_with_limits(
        &self,
        goal: &BTreeMap<String, u32>,
        limits: BuildLimits,
    ) -> (TaskNode, bool) {
        let builder = TreeBuilder { kb: self, limits };
        builder.build(goal, 0, 1, "", "", CraftMethod::Root)
    }
}

struct TreeBuilder<'a> {
    kb: &'a KnowledgeBase,
    limits: BuildLimits,
}

impl TreeBuilder<'_> {
    /// Recursively expands `required` into per-item OR-slots.
    ///
    /// The node's success is the success of the last-processed required
    /// item (true for an empty requirement set). A slot succeeds when it
    /// retains at least one alternative; acquisition slots always do.
    fn build(
        &self,
        required: &BTreeMap<String, u32>,
        quantity: u32,
        depth: usize,
        condition: &str,
        parent_item: &str,
        method: CraftMethod,
    ) -> (TaskNode, bool) {
        let mut node = TaskNode {
            target: parent_item.to_owned(),
            quantity,
            method,
            condition: condition.to_owned(),
            ingredients: required.iter().map(|(k, v)| (k.clone(), *v)).collect(),
            slots: Vec::new(),
        };

        if depth >= self.limits.max_depth {
            return (node, false);
        }
        // Acquisition actions are terminal; tool feasibility is checked
        // later against the status snapshot, not here.
        if method.is_acquisition() {
            return (node, true);
        }

        let mut success = true;
        for (item, qty) in required {
            let variants = self.kb.variants_for(item);
            let mine: Vec<&RecipeVariant> = variants
                .iter()
                .filter(|v| v.method == CraftMethod::Mine)
                .collect();
            let mut alternatives = Vec::new();

            if mine.is_empty() {
                for variant in variants {
                    if variant.ingredients.contains_key(parent_item) {
                        trace!(item, parent = parent_item, "skipping cyclic variant");
                        continue;
                    }
                    let (child, ok) = self.build(
                        &variant.ingredients,
                        *qty,
                        depth + 1,
                        &variant.condition,
                        item,
                        variant.method,
                    );
                    if ok {
                        alternatives.push(child);
                        if alternatives.len() >= self.limits.max_breadth {
                            break;
                        }
                    }
                }
                success = !alternatives.is_empty();
            } else {
                // Direct acquisition is always preferred; crafting
                // alternatives for this item are not expanded at all.
                for variant in mine {
                    let (child, _) = self.build(
                        &variant.ingredients,
                        *qty,
                        depth + 1,
                        &variant.condition,
                        item,
                        variant.method,
                    );
                    alternatives.push(child);
                }
                success = true;
            }
            node.slots.push(alternatives);
        }

        (node, success)
    }
}
