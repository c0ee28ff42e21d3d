//! Example pages.
//!
//! Each example lives in its own directory,
//! `examples/<Category>/<Subcategory>/<Example>/`, holding one MDX file per
//! locale (`<stem>.<locale>.mdx`) next to its `.pde` sketches and images.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use refbook_core::ContentRecord;

use crate::assets::{load_assets, AssetDir};
use crate::error::ContentError;
use crate::frontmatter::extract_frontmatter;

/// A localized example page.
#[derive(Debug, Clone, PartialEq)]
pub struct ExamplePage {
    /// Directory name of the example
    pub name: String,

    /// Title from frontmatter, or the directory name
    pub title: String,

    /// URL slug
    pub slug: String,

    pub description: Option<String>,

    pub order: Option<i32>,

    /// Directory relative to `examples/`, `/`-separated
    pub relative_directory: String,

    /// Markdown body without frontmatter
    pub body: String,

    /// Code files and images next to the MDX file
    pub assets: AssetDir,

    /// Source MDX path
    pub source_path: PathBuf,
}

impl ExamplePage {
    /// Grouping record: path is the relative directory, identifier the slug.
    pub fn to_record(&self) -> ContentRecord {
        ContentRecord::new(self.relative_directory.clone(), self.slug.clone())
    }
}

/// Load every example page of `locale` under `<root>/examples`.
///
/// Pages are ordered by directory, then by frontmatter `order` within a
/// subcategory. Slugs name output files, so each must be a single path
/// segment and unique within the locale.
pub fn load_examples(root: &Path, locale: &str) -> Result<Vec<ExamplePage>, ContentError> {
    let dir = root.join("examples");
    if !dir.exists() {
        return Err(ContentError::NotFound(dir));
    }

    let suffix = format!(".{}.mdx", locale);
    let mut pages = Vec::new();
    let mut slugs: HashMap<String, PathBuf> = HashMap::new();

    for entry in WalkDir::new(&dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !path.is_file() || !file_name.ends_with(&suffix) {
            continue;
        }

        let parent = path.parent().unwrap_or(&dir);
        let relative_directory = parent
            .strip_prefix(&dir)
            .unwrap_or(parent)
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .collect::<Vec<_>>()
            .join("/");

        if relative_directory.is_empty() {
            tracing::warn!("Skipping example outside a category: {}", path.display());
            continue;
        }

        let source = fs::read_to_string(path).map_err(|e| ContentError::io(path, e))?;
        let (frontmatter, body) =
            extract_frontmatter(&source).map_err(|e| ContentError::Frontmatter {
                path: path.to_path_buf(),
                source: e,
            })?;

        let name = parent
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        let (title, slug, description, order) = match frontmatter {
            Some(fm) => (fm.title, fm.slug, fm.description, fm.order),
            None => (name.clone(), None, None, None),
        };

        let slug = slug.unwrap_or_else(|| slugify(&relative_directory));
        if !is_path_segment(&slug) {
            return Err(ContentError::schema(
                path,
                format!("slug '{}' must be a single path segment", slug),
            ));
        }
        if let Some(other) = slugs.insert(slug.clone(), path.to_path_buf()) {
            return Err(ContentError::schema(
                path,
                format!("slug '{}' is already used by {}", slug, other.display()),
            ));
        }

        pages.push(ExamplePage {
            slug,
            title,
            description,
            order,
            body: body.to_string(),
            assets: load_assets(parent)?,
            relative_directory,
            source_path: path.to_path_buf(),
            name,
        });
    }

    pages.sort_by(|a, b| {
        let parent_a = a.relative_directory.rsplit_once('/').map(|(p, _)| p);
        let parent_b = b.relative_directory.rsplit_once('/').map(|(p, _)| p);
        parent_a
            .cmp(&parent_b)
            .then(a.order.unwrap_or(i32::MAX).cmp(&b.order.unwrap_or(i32::MAX)))
            .then_with(|| a.relative_directory.cmp(&b.relative_directory))
    });

    tracing::debug!("Loaded {} examples for locale {}", pages.len(), locale);

    Ok(pages)
}

fn is_path_segment(slug: &str) -> bool {
    !slug.is_empty() && slug != "." && slug != ".." && !slug.contains(['/', '\\'])
}

/// Convert a path or title to a URL-safe slug.
///
/// Path separators, whitespace and underscores become `-`.
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c.is_whitespace() || matches!(c, '-' | '_' | '/') {
                Some('-')
            } else {
                None
            }
        })
        .collect::<String>()
        .split('-')
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn loads_examples_for_locale() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "examples/Basics/Color/Brightness/Brightness.en.mdx",
            "---\ntitle: Brightness\n---\nMove the mouse.",
        );
        write(
            temp.path(),
            "examples/Basics/Color/Brightness/Brightness.es.mdx",
            "---\ntitle: Brillo\n---\nMueve el ratón.",
        );
        write(
            temp.path(),
            "examples/Basics/Color/Brightness/Brightness.pde",
            "void setup() {}",
        );
        write(temp.path(), "examples/Basics/Color/Brightness/Brightness.png", "");

        let pages = load_examples(temp.path(), "en").unwrap();

        assert_eq!(pages.len(), 1);
        let page = &pages[0];
        assert_eq!(page.title, "Brightness");
        assert_eq!(page.name, "Brightness");
        assert_eq!(page.relative_directory, "Basics/Color/Brightness");
        assert_eq!(page.slug, "basics-color-brightness");
        assert_eq!(page.body, "Move the mouse.");
        assert_eq!(page.assets.code.len(), 1);
        assert_eq!(page.assets.images.len(), 1);
        assert_eq!(
            page.to_record(),
            ContentRecord::new("Basics/Color/Brightness", "basics-color-brightness")
        );
    }

    #[test]
    fn orders_by_frontmatter_within_subcategory() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "examples/Basics/Shape/Arc/Arc.en.mdx",
            "---\ntitle: Arc\norder: 2\n---\n",
        );
        write(
            temp.path(),
            "examples/Basics/Shape/Points/Points.en.mdx",
            "---\ntitle: Points\norder: 1\n---\n",
        );
        write(
            temp.path(),
            "examples/Basics/Color/Hue/Hue.en.mdx",
            "---\ntitle: Hue\n---\n",
        );

        let pages = load_examples(temp.path(), "en").unwrap();

        let titles: Vec<_> = pages.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Hue", "Points", "Arc"]);
    }

    #[test]
    fn slug_override_and_missing_frontmatter() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "examples/Topics/Motion/Bounce/Bounce.en.mdx",
            "---\ntitle: Bounce\nslug: bounce\n---\n",
        );
        write(
            temp.path(),
            "examples/Topics/Motion/Linear/Linear.en.mdx",
            "Moves in a straight line.",
        );

        let pages = load_examples(temp.path(), "en").unwrap();

        assert_eq!(pages[0].slug, "bounce");
        assert_eq!(pages[1].title, "Linear");
        assert_eq!(pages[1].slug, "topics-motion-linear");
    }

    #[test]
    fn bad_frontmatter_is_reported() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "examples/Basics/Broken/Broken.en.mdx",
            "---\ntitle: Broken\n",
        );

        assert!(matches!(
            load_examples(temp.path(), "en"),
            Err(ContentError::Frontmatter { .. })
        ));
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "examples/Basics/Color/Hue/Hue.en.mdx",
            "---\ntitle: Hue\nslug: color\n---\n",
        );
        write(
            temp.path(),
            "examples/Basics/Color/Mix/Mix.en.mdx",
            "---\ntitle: Mix\nslug: color\n---\n",
        );

        let err = load_examples(temp.path(), "en").unwrap_err();

        match err {
            ContentError::Schema { message, .. } => assert!(message.contains("already used")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn slugs_must_be_one_path_segment() {
        for slug in ["../escape", "nested/page", "..", "back\\slash"] {
            let temp = tempdir().unwrap();
            write(
                temp.path(),
                "examples/Basics/Color/Hue/Hue.en.mdx",
                &format!("---\ntitle: Hue\nslug: '{}'\n---\n", slug),
            );

            assert!(
                matches!(
                    load_examples(temp.path(), "en"),
                    Err(ContentError::Schema { .. })
                ),
                "slug {slug} was accepted"
            );
        }
    }

    #[test]
    fn same_slug_in_other_locale_is_fine() {
        let temp = tempdir().unwrap();
        write(
            temp.path(),
            "examples/Basics/Color/Hue/Hue.en.mdx",
            "---\ntitle: Hue\nslug: color\n---\n",
        );
        write(
            temp.path(),
            "examples/Basics/Color/Hue/Hue.es.mdx",
            "---\ntitle: Tono\nslug: color\n---\n",
        );

        assert_eq!(load_examples(temp.path(), "en").unwrap()[0].slug, "color");
        assert_eq!(load_examples(temp.path(), "es").unwrap()[0].slug, "color");
    }

    #[test]
    fn slugify_works() {
        assert_eq!(slugify("Basics/Color/Brightness"), "basics-color-brightness");
        assert_eq!(slugify("Creating_Colors"), "creating-colors");
        assert_eq!(slugify("  Multiple   Spaces  "), "multiple-spaces");
        assert_eq!(slugify("Arrays (2D)"), "arrays-2d");
    }
}
