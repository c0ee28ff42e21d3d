//! Static site build command.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use refbook_static::{BuildConfig, StaticBuilder};
use serde::Deserialize;

/// Configuration file structure (refbook.toml).
#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    site: SiteConfig,
    #[serde(default)]
    build: BuildSettings,
}

#[derive(Debug, Deserialize)]
struct SiteConfig {
    #[serde(default = "default_title")]
    title: String,
    #[serde(default = "default_base_url")]
    base_url: String,
    #[serde(default = "default_content")]
    content: String,
    #[serde(default = "default_output")]
    output: String,
    #[serde(default = "default_locales")]
    locales: Vec<String>,
    #[serde(default = "default_locale")]
    default_locale: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            base_url: default_base_url(),
            content: default_content(),
            output: default_output(),
            locales: default_locales(),
            default_locale: default_locale(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BuildSettings {
    #[serde(default = "default_minify")]
    minify: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            minify: default_minify(),
        }
    }
}

fn default_title() -> String {
    "Reference".to_string()
}
fn default_base_url() -> String {
    "/".to_string()
}
fn default_content() -> String {
    "content".to_string()
}
fn default_output() -> String {
    "dist".to_string()
}
fn default_locales() -> Vec<String> {
    vec![default_locale()]
}
fn default_locale() -> String {
    "en".to_string()
}
fn default_minify() -> bool {
    true
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ConfigFile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::info!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}

/// Merge the config file with command-line overrides.
fn build_config(file: ConfigFile, output: Option<PathBuf>, minify: Option<bool>) -> BuildConfig {
    let mut base_url = file.site.base_url;
    if !base_url.ends_with('/') {
        base_url.push('/');
    }

    BuildConfig {
        content_dir: PathBuf::from(&file.site.content),
        output_dir: output.unwrap_or_else(|| PathBuf::from(&file.site.output)),
        minify: minify.unwrap_or(file.build.minify),
        base_url,
        title: file.site.title,
        locales: file.site.locales,
        default_locale: file.site.default_locale,
    }
}

/// Run the build command.
pub async fn run(config_path: &Path, output: Option<PathBuf>, minify: Option<bool>) -> Result<()> {
    tracing::info!("Building static site...");

    let config = build_config(load_config(config_path)?, output, minify);

    let result = StaticBuilder::new(config).build().await?;

    tracing::info!(
        "Built {} pages ({} examples, {} untranslated) in {}ms",
        result.pages,
        result.examples,
        result.fallbacks,
        result.duration_ms
    );

    tracing::info!("Output: {}", result.output_dir.display());

    Ok(())
}
