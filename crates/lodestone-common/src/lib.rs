//! # Lodestone Common
//!
//! Common types and shared abstractions for Lodestone.
//!
//! This crate provides foundational types used across all Lodestone subsystems:
//! - Crafting/acquisition method tags
//! - Tool tiers for harvest capability checks
//! - Status snapshots of the agent's current possessions
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod error;
pub mod method;
pub mod status;
pub mod tier;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::error::*;
    pub use crate::method::*;
    pub use crate::status::*;
    pub use crate::tier::*;
}

pub use prelude::*;
