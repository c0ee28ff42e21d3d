//! Initialize a refbook project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Files created by `init`, relative to the content directory.
const SAMPLE_CONTENT: &[(&str, &str)] = &[
    ("reference/en/processing/abs_.json", SAMPLE_ABS),
    ("reference/en/processing/ceil_.json", SAMPLE_CEIL),
    ("reference/assets/abs_/abs_0.pde", SAMPLE_ABS_CODE),
    (
        "examples/Basics/Color/Brightness/Brightness.en.mdx",
        SAMPLE_EXAMPLE,
    ),
    (
        "examples/Basics/Color/Brightness/Brightness.pde",
        SAMPLE_EXAMPLE_CODE,
    ),
];

/// Run the init command.
pub async fn run(config_path: &Path, yes: bool) -> Result<()> {
    tracing::info!("Initializing refbook...");

    scaffold(Path::new("."), config_path, yes)?;

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'refbook build' to generate the site.");

    Ok(())
}

/// Write the default config and sample content under `root`.
///
/// Existing files are kept unless `yes` is set.
fn scaffold(root: &Path, config_path: &Path, yes: bool) -> Result<()> {
    let content_dir = root.join("content");

    if content_dir.exists() && !yes {
        tracing::warn!("content/ directory already exists. Use --yes to overwrite.");
        return Ok(());
    }

    let config_path = root.join(config_path);
    if !config_path.exists() || yes {
        fs::write(&config_path, DEFAULT_CONFIG)
            .with_context(|| format!("Failed to write {}", config_path.display()))?;
        tracing::info!("Created {}", config_path.display());
    }

    for (relative, content) in SAMPLE_CONTENT {
        let path = content_dir.join(relative);
        if path.exists() && !yes {
            continue;
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
        tracing::info!("Created content/{}", relative);
    }

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# refbook configuration

[site]
# Site title
title = "Reference"

# Base URL (for deployment)
base_url = "/"

# Content directory (holds reference/ and examples/)
content = "content"

# Output directory for built site
output = "dist"

# Locales to build; pages missing in a locale link to the default locale
locales = ["en"]
default_locale = "en"

[build]
# Minify CSS
minify = true
"#;

const SAMPLE_ABS: &str = r#"{
  "name": "abs()",
  "brief": "Calculates the absolute value (magnitude) of a number",
  "description": "<p>Calculates the absolute value (magnitude) of a number. The absolute value of a number is always positive.</p>",
  "category": "math",
  "subcategory": "calculation",
  "type": "function",
  "syntax": ["abs(n)"],
  "parameters": [
    { "name": "n", "type": "int, float", "description": "number to compute" }
  ],
  "returns": "float or int",
  "related": ["ceil_"]
}
"#;

const SAMPLE_CEIL: &str = r#"{
  "name": "ceil()",
  "brief": "Calculates the closest int value that is greater than or equal to the value of the parameter",
  "description": "<p>Calculates the closest int value that is greater than or equal to the value of the parameter.</p>",
  "category": "math",
  "subcategory": "calculation",
  "type": "function",
  "syntax": ["ceil(n)"],
  "parameters": [
    { "name": "n", "type": "float", "description": "number to round up" }
  ],
  "returns": "int",
  "related": ["abs_"]
}
"#;

const SAMPLE_ABS_CODE: &str = r#"int a = abs(153);  // Sets 'a' to 153
int b = abs(-15);  // Sets 'b' to 15
float c = abs(12.234);  // Sets 'c' to 12.234
float d = abs(-9.23);  // Sets 'd' to 9.23
"#;

const SAMPLE_EXAMPLE: &str = r#"---
title: Brightness
description: Adjusts the brightness of part of an image.
---

This program adjusts the brightness of a part of the image by calculating
the distance of each pixel to the mouse.
"#;

const SAMPLE_EXAMPLE_CODE: &str = r#"void setup() {
  size(640, 360);
  colorMode(HSB, 360, 100, 100);
}

void draw() {
  float b = map(mouseX, 0, width, 0, 100);
  background(200, 80, b);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn writes_config_and_content() {
        let temp = tempdir().unwrap();

        scaffold(temp.path(), Path::new("refbook.toml"), false).unwrap();

        assert!(temp.path().join("refbook.toml").exists());
        for (relative, _) in SAMPLE_CONTENT {
            assert!(temp.path().join("content").join(relative).exists());
        }
    }

    #[test]
    fn keeps_existing_content_without_yes() {
        let temp = tempdir().unwrap();
        let content = temp.path().join("content");
        fs::create_dir_all(&content).unwrap();

        scaffold(temp.path(), Path::new("refbook.toml"), false).unwrap();

        assert!(!temp.path().join("refbook.toml").exists());
        assert!(!content.join("reference").exists());
    }

    #[tokio::test]
    async fn sample_content_builds() {
        use refbook_static::{BuildConfig, StaticBuilder};

        let temp = tempdir().unwrap();
        scaffold(temp.path(), Path::new("refbook.toml"), false).unwrap();

        let out = temp.path().join("dist");
        let result = StaticBuilder::new(BuildConfig {
            content_dir: temp.path().join("content"),
            output_dir: out.clone(),
            ..Default::default()
        })
        .build()
        .await
        .unwrap();

        assert_eq!(result.examples, 1);
        assert!(out.join("reference/abs_.html").exists());
        assert!(out.join("reference/ceil_.html").exists());
        assert!(out.join("examples/basics-color-brightness.html").exists());
    }
}
