//! Static site generator for refbook documentation.
//!
//! Builds reference pages, categorized example pages and their listings from
//! a content directory.

pub mod assets;
pub mod builder;
pub mod templates;

pub use builder::{BuildConfig, BuildError, BuildResult, StaticBuilder};
