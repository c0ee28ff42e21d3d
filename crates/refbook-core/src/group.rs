//! Category grouping of content records.

use std::collections::HashMap;

use crate::record::ContentRecord;
use crate::unique::unique;

/// Errors that can occur when grouping records.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid record '{identifier}': path '{path}' has no category segment")]
    InvalidRecord { identifier: String, path: String },
}

/// Categories and their subcategories derived from a list of records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Grouping {
    /// Categories in order of first appearance
    categories: Vec<String>,

    /// Subcategories per category; `None` marks records directly under the category
    subcategories: HashMap<String, Vec<Option<String>>>,

    /// Input records, in input order
    records: Vec<ContentRecord>,
}

/// Group records by category and subcategory.
///
/// Categories keep the order in which they first appear. Each category's
/// subcategory set is built only from the records of that category, so a
/// `None` entry appears exactly when the category has records without a
/// second path segment.
pub fn group(records: &[ContentRecord]) -> Result<Grouping, CoreError> {
    let mut keyed = Vec::with_capacity(records.len());

    for record in records {
        let Some(category) = record.category() else {
            return Err(CoreError::InvalidRecord {
                identifier: record.identifier.clone(),
                path: record.relative_path.clone(),
            });
        };
        keyed.push((category, record.subcategory()));
    }

    let categories = unique(keyed.iter().map(|(c, _)| c.to_string()));

    let subcategories = categories
        .iter()
        .map(|category| {
            let subs = unique(
                keyed
                    .iter()
                    .filter(|(c, _)| c == category)
                    .map(|(_, s)| s.map(str::to_string)),
            );
            (category.clone(), subs)
        })
        .collect();

    Ok(Grouping {
        categories,
        subcategories,
        records: records.to_vec(),
    })
}

impl Grouping {
    /// Categories in order of first appearance.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Ordered, de-duplicated subcategories of `category`.
    ///
    /// Returns an empty slice for unknown categories.
    pub fn subcategories(&self, category: &str) -> &[Option<String>] {
        self.subcategories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Whether `category` has records with no subcategory.
    pub fn has_top_level_entries(&self, category: &str) -> bool {
        self.subcategories(category).iter().any(Option::is_none)
    }

    /// Records of `category` whose subcategory is `subcategory`, in input order.
    ///
    /// `None` selects the records sitting directly under the category.
    pub fn records_in_subcategory(
        &self,
        category: &str,
        subcategory: Option<&str>,
    ) -> Vec<&ContentRecord> {
        self.records
            .iter()
            .filter(|r| r.category() == Some(category) && r.subcategory() == subcategory)
            .collect()
    }
}
