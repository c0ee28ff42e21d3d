//! Frontmatter extraction for example pages.

use serde::Deserialize;

/// Parsed frontmatter of an example MDX file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExampleFrontmatter {
    /// Example title (required)
    pub title: String,

    /// URL slug override
    #[serde(default)]
    pub slug: Option<String>,

    /// Short description shown in listings
    #[serde(default)]
    pub description: Option<String>,

    /// Order within its subcategory (lower = first)
    #[serde(default)]
    pub order: Option<i32>,
}

/// Extract frontmatter from MDX content.
///
/// Returns the parsed frontmatter and the remaining content after the frontmatter block.
pub fn extract_frontmatter(
    source: &str,
) -> Result<(Option<ExampleFrontmatter>, &str), FrontmatterError> {
    let trimmed = source.trim_start();

    if !trimmed.starts_with("---") {
        return Ok((None, source));
    }

    let after_open = &trimmed[3..];
    let Some(close_pos) = after_open.find("\n---") else {
        return Err(FrontmatterError::Unclosed);
    };

    let yaml_content = after_open[..close_pos].trim();
    let remaining = &after_open[close_pos + 4..];

    let frontmatter: ExampleFrontmatter = serde_yaml::from_str(yaml_content)
        .map_err(|e| FrontmatterError::InvalidYaml(e.to_string()))?;

    if frontmatter.title.trim().is_empty() {
        return Err(FrontmatterError::EmptyTitle);
    }

    Ok((Some(frontmatter), remaining.trim_start()))
}

/// Errors that can occur when parsing frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Unclosed frontmatter block - missing closing ---")]
    Unclosed,

    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(String),

    #[error("Frontmatter title must not be empty")]
    EmptyTitle,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_valid_frontmatter() {
        let source = r#"---
title: Brightness
slug: brightness
order: 2
---

Hold the mouse to change the brightness of the image.
"#;

        let (fm, content) = extract_frontmatter(source).unwrap();
        let fm = fm.unwrap();

        assert_eq!(fm.title, "Brightness");
        assert_eq!(fm.slug, Some("brightness".to_string()));
        assert_eq!(fm.order, Some(2));
        assert!(content.starts_with("Hold the mouse"));
    }

    #[test]
    fn handles_no_frontmatter() {
        let source = "Plain example description.";

        let (fm, content) = extract_frontmatter(source).unwrap();

        assert!(fm.is_none());
        assert_eq!(content, source);
    }

    #[test]
    fn errors_on_unclosed_frontmatter() {
        let source = "---\ntitle: Test\nno closing";

        assert!(matches!(
            extract_frontmatter(source),
            Err(FrontmatterError::Unclosed)
        ));
    }

    #[test]
    fn errors_on_missing_title() {
        let source = "---\nslug: orphan\n---\n";

        assert!(matches!(
            extract_frontmatter(source),
            Err(FrontmatterError::InvalidYaml(_))
        ));
    }

    #[test]
    fn errors_on_blank_title() {
        let source = "---\ntitle: \"  \"\n---\n";

        assert!(matches!(
            extract_frontmatter(source),
            Err(FrontmatterError::EmptyTitle)
        ));
    }
}
