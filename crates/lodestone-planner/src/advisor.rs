//! Frontier search over a task tree: which actions are executable now.
//!
//! - [`Tip`]: one ranked suggestion, a `(label, detail)` string pair
//! - [`KnowledgeBase::advise`]: breadth-first option collection and
//!   rendering against a status snapshot
//!
//! The walk visits a tree node only when its prerequisites are unmet;
//! fully satisfied craft nodes and reachable acquisition nodes become
//! options. Missing stations (crafting table, furnace) and missing tool
//! tiers redirect the search into freshly built sub-goal trees instead
//! of dead-ending.

use std::collections::{BTreeMap, VecDeque};

use ahash::AHashSet;
use lodestone_common::{method::CraftMethod, status::StatusSnapshot};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::condition;
use crate::knowledge::KnowledgeBase;
use crate::tree::TaskNode;

/// Default cap on collected option slots per query.
pub const DEFAULT_MAX_RESULTS: usize = 5;

const WOOD_FAMILY_LABEL: &str = "mine wood or log to get wood or log";
const WOOD_FAMILY_DETAIL: &str = "there are oak_log, birch_log, spruce_log, jungle_log, \
     acacia_log, dark_oak_log, mangrove_log and oak_wood, birch_wood, spruce_wood, \
     jungle_wood, acacia_wood, dark_oak_wood, mangrove_wood in Minecraft";

/// One actionable suggestion: a short imperative label plus a detail line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tip {
    /// Imperative summary, e.g. `craft stick with player crafting`.
    pub label: String,
    /// Supporting detail (required items, tool condition); may be empty.
    pub detail: String,
}

impl KnowledgeBase {
    /// Collects up to [`DEFAULT_MAX_RESULTS`] executable actions for a tree.
    #[must_use]
    pub fn advise(&self, tree: &TaskNode, status: &StatusSnapshot) -> Vec<Tip> {
        self.advise_with_limit(tree, status, DEFAULT_MAX_RESULTS)
    }

    /// Collects executable actions for a tree, capping the number of
    /// option slots examined.
    ///
    /// The cap bounds collection, not output: some collected options are
    /// dropped during rendering (silk-touch-gated mining, the synthetic
    /// root) and duplicates are folded, so fewer tips may come back.
    #[must_use]
    pub fn advise_with_limit(
        &self,
        tree: &TaskNode,
        status: &StatusSnapshot,
        max_results: usize,
    ) -> Vec<Tip> {
        let mut queue: VecDeque<TaskNode> = VecDeque::new();
        let mut options: Vec<TaskNode> = Vec::new();
        queue.push_back(tree.clone());

        while let Some(task) = queue.pop_front() {
            match task.method {
                CraftMethod::CraftingTable | CraftMethod::Furnace => {
                    if let Some(station) = task.method.station_item() {
                        self.visit_station(task, station, status, &mut queue, &mut options);
                    }
                }
                CraftMethod::PlayerCraft | CraftMethod::Root => {
                    if !enqueue_unsatisfied(&task, status, &mut queue) {
                        options.push(task);
                    }
                }
                CraftMethod::Mine | CraftMethod::Combat => {
                    if condition::evaluate(&task.condition, status) {
                        options.push(task);
                    } else if let Some(tool) = condition::required_pickaxe(&task.condition) {
                        trace!(tool, target = %task.target, "redirecting to tool sub-goal");
                        let goal = BTreeMap::from([(tool.to_owned(), 1)]);
                        let (sub_tree, _) = self.task_tree(&goal);
                        queue.push_back(sub_tree);
                    }
                }
            }
            if options.len() > max_results {
                break;
            }
        }

        render_tips(&options)
    }

    /// Handles a station-gated craft node: redirect to a station sub-goal
    /// when the station is missing, otherwise treat it like a plain craft.
    fn visit_station(
        &self,
        task: TaskNode,
        station: &str,
        status: &StatusSnapshot,
        queue: &mut VecDeque<TaskNode>,
        options: &mut Vec<TaskNode>,
    ) {
        if status.contains(station) {
            if !enqueue_unsatisfied(&task, status, queue) {
                options.push(task);
            }
        } else {
            trace!(station, target = %task.target, "redirecting to station sub-goal");
            let goal = BTreeMap::from([(station.to_owned(), 1)]);
            let (sub_tree, _) = self.task_tree(&goal);
            queue.push_back(sub_tree);
        }
    }
}

/// Enqueues the OR-alternatives of every ingredient the snapshot does not
/// cover. Returns whether anything was unsatisfied.
fn enqueue_unsatisfied(
    task: &TaskNode,
    status: &StatusSnapshot,
    queue: &mut VecDeque<TaskNode>,
) -> bool {
    let mut pending = false;
    for (index, (item, required)) in task.ingredients.iter().enumerate() {
        if !status.has_at_least(item, *required) {
            if let Some(slot) = task.slots.get(index) {
                queue.extend(slot.iter().cloned());
            }
            pending = true;
        }
    }
    pending
}

fn render_tips(options: &[TaskNode]) -> Vec<Tip> {
    let mut seen: AHashSet<Tip> = AHashSet::new();
    let mut tips = Vec::new();
    for option in options {
        if let Some(tip) = render_option(option) {
            if seen.insert(tip.clone()) {
                tips.push(tip);
            }
        }
    }
    tips
}

fn render_option(option: &TaskNode) -> Option<Tip> {
    let source = option
        .ingredients
        .first()
        .map_or("", |(item, _)| item.as_str());
    match option.method {
        CraftMethod::CraftingTable => Some(Tip {
            label: format!("craft {} with crafting table", option.target),
            detail: needs_detail(&format!("to craft {}", option.target), option, " * "),
        }),
        CraftMethod::Furnace => Some(Tip {
            label: format!("smelt {source} with furnace"),
            detail: needs_detail(&format!("to smelt {source}"), option, "*"),
        }),
        CraftMethod::PlayerCraft => Some(Tip {
            label: format!("craft {} with player crafting", option.target),
            detail: needs_detail(&format!("to craft {}", option.target), option, "*"),
        }),
        CraftMethod::Mine => {
            // Silk-touch-gated drops are not actionable instructions.
            if option.condition.contains("silk_touch") {
                return None;
            }
            if option.target.ends_with("log") || option.target.ends_with("wood") {
                return Some(Tip {
                    label: WOOD_FAMILY_LABEL.to_owned(),
                    detail: WOOD_FAMILY_DETAIL.to_owned(),
                });
            }
            let detail = if option.condition.is_empty() {
                String::new()
            } else {
                format!("to mine {source}, you need: {}", option.condition)
            };
            Some(Tip {
                label: format!("mine {source} to get {}", option.target),
                detail,
            })
        }
        CraftMethod::Combat => Some(Tip {
            label: format!("kill {source} to get {}", option.target),
            detail: String::new(),
        }),
        CraftMethod::Root => None,
    }
}

/// `"{prefix}, you need: a * 1, b * 2, "` with the separator the caller
/// picks between item and count. The trailing separator is part of the
/// output contract.
fn needs_detail(prefix: &str, option: &TaskNode, join: &str) -> String {
    let mut detail = format!("{prefix}, you need: ");
    for (item, count) in &option.ingredients {
        detail.push_str(&format!("{item}{join}{count}, "));
    }
    detail
}
