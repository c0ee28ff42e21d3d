//! Content loading for refbook sites.
//!
//! Reads reference entries (JSON), example pages (MDX with YAML frontmatter),
//! example code files and preview images from a content directory, and
//! validates their shape before they reach the grouping engine.

pub mod assets;
pub mod error;
pub mod examples;
pub mod frontmatter;
pub mod reference;

pub use assets::{load_assets, AssetDir, ImageFile};
pub use error::ContentError;
pub use examples::{load_examples, slugify, ExamplePage};
pub use frontmatter::{extract_frontmatter, ExampleFrontmatter, FrontmatterError};
pub use reference::{
    fallback_link, load_reference, page_path, Localized, Parameter, ReferenceEntry,
    ReferenceSet, DEFAULT_LIBRARY,
};
