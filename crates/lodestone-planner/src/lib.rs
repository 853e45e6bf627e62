//! # Lodestone Planner
//!
//! Crafting knowledge base and action planning for Lodestone.
//!
//! This crate turns raw Minecraft data exports into actionable advice:
//! - Record schemas for recipe, loot, drop, tag, and block files
//! - Dataset loading from a data directory
//! - Drop-condition normalization and tool-tier evaluation
//! - Ingestion into producible/consumes cross-indices
//! - Bounded AND/OR task-tree construction per goal
//! - Breadth-first action selection against a status snapshot
//!
//! The indices are immutable once built; queries are pure and reentrant,
//! so a [`knowledge::KnowledgeBase`] can be shared read-only across
//! threads. No tracing subscriber is installed here; hosts own that.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod advisor;
pub mod condition;
pub mod dataset;
pub mod knowledge;
pub mod records;
pub mod tree;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::advisor::*;
    pub use crate::dataset::*;
    pub use crate::knowledge::*;
    pub use crate::records::*;
    pub use crate::tree::*;
    pub use lodestone_common::prelude::*;
}

pub use prelude::*;
