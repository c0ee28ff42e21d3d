//! Example code files and preview images of a single directory.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use refbook_core::ExampleRecord;

use crate::error::ContentError;

static IMAGE_EXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(jpg|jpeg|png|gif)$").expect("Invalid image extension regex"));

/// Extension of example code files.
const CODE_EXT: &str = "pde";

/// An image file found next to example code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    /// File stem, matched against example names
    pub name: String,

    /// Full file name including extension
    pub file_name: String,

    /// Source path
    pub path: PathBuf,
}

/// The example code and images of one directory.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetDir {
    /// Code examples, sorted by file name
    pub code: Vec<ExampleRecord>,

    /// Images, sorted by file name
    pub images: Vec<ImageFile>,
}

impl AssetDir {
    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.images.is_empty()
    }
}

/// Load the code files and images directly inside `dir`.
///
/// Subdirectories are not searched. A missing directory yields an empty set,
/// since most entries have no examples.
pub fn load_assets(dir: &Path) -> Result<AssetDir, ContentError> {
    if !dir.is_dir() {
        return Ok(AssetDir::default());
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .map_err(|e| ContentError::io(dir, e))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file())
        .collect();
    files.sort();

    let mut assets = AssetDir::default();

    for path in files {
        let (Some(stem), Some(file_name)) = (
            path.file_stem().and_then(|s| s.to_str()),
            path.file_name().and_then(|s| s.to_str()),
        ) else {
            continue;
        };
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();

        if ext == CODE_EXT {
            let code = fs::read_to_string(&path).map_err(|e| ContentError::io(&path, e))?;
            assets.code.push(ExampleRecord::new(stem, code));
        } else if IMAGE_EXT_RE.is_match(&ext) {
            assets.images.push(ImageFile {
                name: stem.to_string(),
                file_name: file_name.to_string(),
                path: path.clone(),
            });
        }
    }

    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn splits_code_and_images() {
        let temp = tempdir().unwrap();
        let dir = temp.path();
        fs::write(dir.join("abs_1.pde"), "float x = abs(-2.5);").unwrap();
        fs::write(dir.join("abs_0.pde"), "int a = abs(-1);").unwrap();
        fs::write(dir.join("abs_0.png"), [0u8; 4]).unwrap();
        fs::write(dir.join("abs_1.JPG"), [0u8; 4]).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();
        fs::write(dir.join("abs_2.svg"), "ignored").unwrap();

        let assets = load_assets(dir).unwrap();

        let code: Vec<_> = assets.code.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(code, vec!["abs_0", "abs_1"]);
        assert_eq!(assets.code[0].code_text, "int a = abs(-1);");

        let images: Vec<_> = assets.images.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(images, vec!["abs_0.png", "abs_1.JPG"]);
        assert_eq!(assets.images[1].name, "abs_1");
    }

    #[test]
    fn ignores_subdirectories() {
        let temp = tempdir().unwrap();
        let nested = temp.path().join("data");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("inner.pde"), "").unwrap();

        let assets = load_assets(temp.path()).unwrap();

        assert!(assets.is_empty());
    }

    #[test]
    fn missing_directory_is_empty() {
        let temp = tempdir().unwrap();

        let assets = load_assets(&temp.path().join("nope")).unwrap();

        assert!(assets.is_empty());
    }
}
