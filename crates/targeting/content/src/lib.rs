//! Data-driven targeting content and loaders.
//!
//! This crate houses static content consumed outside a host:
//! - Tile fields (data-driven via RON), used by demo strategies and tests
//! - Targeting configuration (data-driven via TOML)
//!
//! All loaders use targeting-core types directly with serde for RON/TOML deserialization.

pub mod field;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use field::{TileField, TileKind};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, FieldLoader};
