//! Static site builder.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use rayon::prelude::*;
use serde::Serialize;

use refbook_content::{
    load_assets, load_examples, load_reference, page_path, ContentError, ExamplePage, ImageFile,
    Localized, ReferenceEntry, ReferenceSet, DEFAULT_LIBRARY,
};
use refbook_core::{group, match_assets, CoreError, ExampleRecord, ImageRecord};

use crate::assets::AssetPipeline;
use crate::templates::{
    category_groups, CategoryGroup, Context, ExampleView, NavLink, TemplateEngine,
};

/// Configuration for building a static site.
#[derive(Debug, Clone)]
pub struct BuildConfig {
    /// Content root (holds `reference/` and `examples/`)
    pub content_dir: PathBuf,

    /// Output directory
    pub output_dir: PathBuf,

    /// Minify CSS output
    pub minify: bool,

    /// Base URL for the site
    pub base_url: String,

    /// Site title
    pub title: String,

    /// Locales to build
    pub locales: Vec<String>,

    /// Locale whose entries define the set of reference pages
    pub default_locale: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            output_dir: PathBuf::from("dist"),
            minify: true,
            base_url: "/".to_string(),
            title: "Reference".to_string(),
            locales: vec!["en".to_string()],
            default_locale: "en".to_string(),
        }
    }
}

/// Result of a build operation.
#[derive(Debug)]
pub struct BuildResult {
    /// Number of HTML pages generated
    pub pages: usize,

    /// Number of example pages generated
    pub examples: usize,

    /// Number of reference pages rendered as untranslated fallbacks
    pub fallbacks: usize,

    /// Total build time in milliseconds
    pub duration_ms: u64,

    /// Output directory
    pub output_dir: PathBuf,
}

/// Errors that can occur during build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Content(#[from] ContentError),

    #[error(transparent)]
    Group(#[from] CoreError),

    #[error("Failed to render template: {0}")]
    TemplateError(String),

    #[error("Failed to write output: {0}")]
    WriteError(String),
}

/// A reference page and its example assets, shared by all locales.
#[derive(Debug)]
struct ReferenceSource {
    library: String,
    name: String,
    code: Vec<ExampleRecord>,
    images: Vec<ImageRecord>,
}

/// An example page with its published images.
#[derive(Debug)]
struct ExampleSource {
    page: ExamplePage,
    images: Vec<ImageRecord>,
}

/// A written page, for the sitemap and search index.
#[derive(Debug)]
struct PageOutput {
    url: String,
    title: String,
    summary: String,
    fallback: bool,
}

#[derive(Serialize)]
struct ReferencePage<'a> {
    entry: &'a ReferenceEntry,
    examples: Vec<ExampleView>,
    related: Vec<NavLink>,
    in_use: Vec<NavLink>,
}

#[derive(Serialize)]
struct ListingPage<'a> {
    categories: &'a [CategoryGroup],
}

#[derive(Serialize)]
struct ExampleContent<'a> {
    title: &'a str,
    content: String,
    examples: Vec<ExampleView>,
}

/// Static site builder.
pub struct StaticBuilder {
    config: BuildConfig,
    templates: TemplateEngine,
}

impl StaticBuilder {
    /// Create a new static builder.
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            templates: TemplateEngine::new(),
        }
    }

    /// Build the static site.
    pub async fn build(&self) -> Result<BuildResult, BuildError> {
        let start = Instant::now();

        fs::create_dir_all(&self.config.output_dir)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let reference = self.load_reference()?;
        let sources = self.prepare_reference(&reference)?;

        let mut outputs = Vec::new();
        let mut examples = 0;

        for locale in self.locales() {
            tracing::info!("Building locale {}", locale);

            outputs.extend(self.build_reference(locale, &reference, &sources)?);

            let (example_pages, count) = self.build_examples(locale)?;
            outputs.extend(example_pages);
            examples += count;
        }

        self.generate_assets()?;
        self.generate_search_index(&outputs)?;
        self.generate_sitemap(&outputs)?;

        let duration = start.elapsed();

        Ok(BuildResult {
            pages: outputs.len(),
            examples,
            fallbacks: outputs.iter().filter(|o| o.fallback).count(),
            duration_ms: duration.as_millis() as u64,
            output_dir: self.config.output_dir.clone(),
        })
    }

    /// Configured locales, default locale first.
    fn locales(&self) -> Vec<&str> {
        let default = self.config.default_locale.as_str();
        let mut locales = vec![default];
        locales.extend(
            self.config
                .locales
                .iter()
                .map(String::as_str)
                .filter(|l| *l != default),
        );
        locales
    }

    /// Path prefix of a locale: empty for the default locale.
    fn locale_prefix(&self, locale: &str) -> String {
        if locale == self.config.default_locale {
            String::new()
        } else {
            format!("{}/", locale)
        }
    }

    fn load_reference(&self) -> Result<ReferenceSet, BuildError> {
        match load_reference(&self.config.content_dir) {
            Ok(set) => {
                if set.is_empty() {
                    tracing::warn!("No reference entries found");
                }
                Ok(set)
            }
            Err(ContentError::NotFound(dir)) => {
                tracing::warn!("No reference content at {}", dir.display());
                Ok(ReferenceSet::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Load example assets of every default-locale page and publish their images.
    fn prepare_reference(
        &self,
        reference: &ReferenceSet,
    ) -> Result<Vec<ReferenceSource>, BuildError> {
        let locale = self.config.default_locale.as_str();
        let assets_root = self.config.content_dir.join("reference").join("assets");
        let mut sources = Vec::new();

        for library in reference.libraries(locale) {
            for name in reference.names(locale, library) {
                let assets = load_assets(&assets_root.join(name))?;
                let images =
                    self.publish_images(&assets.images, &format!("reference/images/{}", name))?;

                sources.push(ReferenceSource {
                    library: library.to_string(),
                    name: name.to_string(),
                    code: assets.code,
                    images,
                });
            }
        }

        tracing::info!("Found {} reference pages", sources.len());

        Ok(sources)
    }

    /// Copy images under `dest` in the output directory and return their records.
    fn publish_images(
        &self,
        images: &[ImageFile],
        dest: &str,
    ) -> Result<Vec<ImageRecord>, BuildError> {
        if images.is_empty() {
            return Ok(Vec::new());
        }

        let dir = self.config.output_dir.join(dest);
        fs::create_dir_all(&dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        images
            .iter()
            .map(|image| -> Result<ImageRecord, BuildError> {
                fs::copy(&image.path, dir.join(&image.file_name)).map_err(|e| {
                    BuildError::WriteError(format!("{}: {}", image.path.display(), e))
                })?;
                Ok(ImageRecord::new(
                    image.name.clone(),
                    format!("{}{}/{}", self.config.base_url, dest, image.file_name),
                ))
            })
            .collect()
    }

    fn url(&self, locale: &str, path: &str) -> String {
        format!("{}{}{}", self.config.base_url, self.locale_prefix(locale), path)
    }

    fn context(&self, locale: &str, title: &str, sidebar: Option<Vec<CategoryGroup>>) -> Context {
        Context {
            title: title.to_string(),
            site_title: self.config.title.clone(),
            base_url: self.config.base_url.clone(),
            locale: locale.to_string(),
            sidebar,
        }
    }

    /// Build the reference pages and reference index of one locale.
    ///
    /// Listings hold every default-locale entry; links stay under `locale`.
    fn build_reference(
        &self,
        locale: &str,
        reference: &ReferenceSet,
        sources: &[ReferenceSource],
    ) -> Result<Vec<PageOutput>, BuildError> {
        let default = self.config.default_locale.as_str();
        let records = reference.sidebar_items(default, DEFAULT_LIBRARY);
        let grouping = group(&records)?;
        let groups = category_groups(&grouping, |id| {
            reference.get(default, DEFAULT_LIBRARY, id).map(|e| NavLink {
                title: e.name.clone(),
                path: self.url(locale, &page_path(DEFAULT_LIBRARY, id)),
            })
        });

        let results: Vec<Result<PageOutput, BuildError>> = sources
            .par_iter()
            .map(|source| self.build_reference_page(locale, source, reference, &groups))
            .collect();

        let mut outputs = Vec::with_capacity(results.len() + 1);
        for result in results {
            outputs.push(result?);
        }

        let index_path = "reference/index.html";
        let html = self.render(
            "reference_index.html",
            &self.context(locale, "Reference", None),
            &ListingPage { categories: &groups },
        )?;
        self.write_page(locale, index_path, &html)?;
        outputs.push(PageOutput {
            url: self.url(locale, "reference/"),
            title: "Reference".to_string(),
            summary: String::new(),
            fallback: false,
        });

        Ok(outputs)
    }

    /// Build one reference page, or its untranslated fallback.
    fn build_reference_page(
        &self,
        locale: &str,
        source: &ReferenceSource,
        reference: &ReferenceSet,
        groups: &[CategoryGroup],
    ) -> Result<PageOutput, BuildError> {
        let path = page_path(&source.library, &source.name);
        let sidebar = (source.library == DEFAULT_LIBRARY).then(|| groups.to_vec());

        let (html, title, summary, fallback) =
            match reference.resolve(locale, &source.library, &source.name) {
                Localized::Translated(entry) => {
                    let examples = match_assets(&source.code, &source.images)
                        .iter()
                        .map(ExampleView::from)
                        .collect();
                    let page = ReferencePage {
                        entry,
                        examples,
                        related: related_links(&entry.related),
                        in_use: entry.in_use.as_deref().map(related_links).unwrap_or_default(),
                    };
                    let html = self.render(
                        "reference.html",
                        &self.context(locale, &entry.name, sidebar),
                        &page,
                    )?;
                    let summary = entry.brief.clone().unwrap_or_default();
                    (html, entry.name.clone(), summary, false)
                }
                Localized::Fallback { link } => {
                    tracing::debug!("No {} translation for {}", locale, source.name);
                    let link = format!("{}{}", self.config.base_url.trim_end_matches('/'), link);
                    let html = self.render(
                        "fallback.html",
                        &self.context(locale, &source.name, sidebar),
                        &minijinja::context! { link => link },
                    )?;
                    (html, source.name.clone(), String::new(), true)
                }
            };

        self.write_page(locale, &path, &html)?;

        Ok(PageOutput {
            url: self.url(locale, &path),
            title,
            summary,
            fallback,
        })
    }

    /// Build the example pages and examples index of one locale.
    ///
    /// Returns the written pages and the number of example pages among them.
    fn build_examples(&self, locale: &str) -> Result<(Vec<PageOutput>, usize), BuildError> {
        let pages = match load_examples(&self.config.content_dir, locale) {
            Ok(pages) => pages,
            Err(ContentError::NotFound(dir)) => {
                tracing::warn!("No examples at {}", dir.display());
                return Ok((Vec::new(), 0));
            }
            Err(e) => return Err(e.into()),
        };

        let mut sources = Vec::with_capacity(pages.len());
        for page in pages {
            let dest = format!("examples/images/{}", page.slug);
            let images = self.publish_images(&page.assets.images, &dest)?;
            sources.push(ExampleSource { page, images });
        }

        let by_slug: HashMap<&str, &ExamplePage> = sources
            .iter()
            .map(|s| (s.page.slug.as_str(), &s.page))
            .collect();
        let records: Vec<_> = sources.iter().map(|s| s.page.to_record()).collect();
        let grouping = group(&records)?;
        let groups = category_groups(&grouping, |slug| {
            by_slug.get(slug).map(|p| NavLink {
                title: p.title.clone(),
                path: self.url(locale, &format!("examples/{}.html", p.slug)),
            })
        });

        let results: Vec<Result<PageOutput, BuildError>> = sources
            .par_iter()
            .map(|source| self.build_example_page(locale, source))
            .collect();

        let mut outputs = Vec::with_capacity(results.len() + 1);
        for result in results {
            outputs.push(result?);
        }
        let count = outputs.len();

        let html = self.render(
            "examples_index.html",
            &self.context(locale, "Examples", None),
            &ListingPage { categories: &groups },
        )?;
        self.write_page(locale, "examples/index.html", &html)?;
        outputs.push(PageOutput {
            url: self.url(locale, "examples/"),
            title: "Examples".to_string(),
            summary: String::new(),
            fallback: false,
        });

        Ok((outputs, count))
    }

    fn build_example_page(
        &self,
        locale: &str,
        source: &ExampleSource,
    ) -> Result<PageOutput, BuildError> {
        let page = &source.page;
        let path = format!("examples/{}.html", page.slug);

        let examples = match_assets(&page.assets.code, &source.images)
            .iter()
            .map(ExampleView::from)
            .collect();
        let content = ExampleContent {
            title: &page.title,
            content: render_markdown(&page.body),
            examples,
        };

        let html = self.render(
            "example.html",
            &self.context(locale, &page.title, None),
            &content,
        )?;
        self.write_page(locale, &path, &html)?;

        tracing::debug!("Rendered example {}", page.relative_directory);

        Ok(PageOutput {
            url: self.url(locale, &path),
            title: page.title.clone(),
            summary: page.description.clone().unwrap_or_default(),
            fallback: false,
        })
    }

    fn render<P: Serialize>(
        &self,
        template: &str,
        context: &Context,
        page: &P,
    ) -> Result<String, BuildError> {
        self.templates
            .render_page(template, context, page)
            .map_err(|e| BuildError::TemplateError(e.to_string()))
    }

    /// Write `html` to the site-relative `path` of `locale`.
    fn write_page(&self, locale: &str, path: &str, html: &str) -> Result<(), BuildError> {
        let output_path = self
            .config
            .output_dir
            .join(self.locale_prefix(locale))
            .join(path);

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|e| BuildError::WriteError(e.to_string()))?;
        }

        fs::write(&output_path, html).map_err(|e| BuildError::WriteError(e.to_string()))
    }

    /// Generate static assets.
    fn generate_assets(&self) -> Result<(), BuildError> {
        let assets_dir = self.config.output_dir.join("assets");
        fs::create_dir_all(&assets_dir).map_err(|e| BuildError::WriteError(e.to_string()))?;

        let css = AssetPipeline::generate_css();
        let css = if self.config.minify {
            AssetPipeline::minify_css(&css).unwrap_or_else(|e| {
                tracing::warn!("Keeping unminified CSS: {}", e);
                css
            })
        } else {
            css
        };
        fs::write(assets_dir.join("main.css"), css)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(assets_dir.join("main.js"), AssetPipeline::generate_js())
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Generate search index.
    fn generate_search_index(&self, outputs: &[PageOutput]) -> Result<(), BuildError> {
        let index: Vec<serde_json::Value> = outputs
            .iter()
            .filter(|o| !o.fallback)
            .map(|o| {
                serde_json::json!({
                    "title": o.title,
                    "url": o.url,
                    "summary": o.summary,
                })
            })
            .collect();

        let json = serde_json::to_string_pretty(&index)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        fs::write(self.config.output_dir.join("search-index.json"), json)
            .map_err(|e| BuildError::WriteError(e.to_string()))
    }

    /// Generate sitemap.
    fn generate_sitemap(&self, outputs: &[PageOutput]) -> Result<(), BuildError> {
        let urls: Vec<String> = outputs
            .iter()
            .filter(|o| !o.fallback)
            .map(|o| format!("  <url>\n    <loc>{}</loc>\n  </url>", xml_escape(&o.url)))
            .collect();

        let sitemap = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
{}
</urlset>"#,
            urls.join("\n")
        );

        fs::write(self.config.output_dir.join("sitemap.xml"), sitemap)
            .map_err(|e| BuildError::WriteError(e.to_string()))?;

        let robots = format!(
            "User-agent: *\nAllow: /\nSitemap: {}sitemap.xml",
            self.config.base_url
        );
        fs::write(self.config.output_dir.join("robots.txt"), robots)
            .map_err(|e| BuildError::WriteError(e.to_string()))
    }
}

/// Links to related entries: `abs_` becomes `abs()` pointing at `abs_.html`.
fn related_links(names: &[String]) -> Vec<NavLink> {
    names
        .iter()
        .map(|name| NavLink {
            title: name.replace('_', "()"),
            path: format!("{}.html", name),
        })
        .collect()
}

/// Escape XML special characters.
fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Render markdown to HTML.
fn render_markdown(content: &str) -> String {
    use pulldown_cmark::{html, Options, Parser};

    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(content, options);

    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);

    html_output
}
