//! Grouping and lookup engine for refbook sites.
//!
//! This crate turns flat lists of content records into the hierarchical
//! structure the site renders: categories with their subcategories, and code
//! examples paired with their preview images.

pub mod group;
pub mod matcher;
pub mod record;
pub mod unique;

pub use group::{group, CoreError, Grouping};
pub use matcher::{match_assets, AssetIndex, MatchedPair};
pub use record::{ContentRecord, ExampleRecord, ImageRecord};
pub use unique::unique;
