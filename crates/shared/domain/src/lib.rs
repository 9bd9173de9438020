//! # Domain
//!
//! Plain data shared by every CarGroup crate: configuration shapes, the fixed
//! region list and group bounds, and the feature-slice registry trait.
//! No I/O, networking or business logic lives here.

pub mod config;
pub mod constants;
pub mod registry;
