//! Pairing code examples with their preview images.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{ExampleRecord, ImageRecord};

/// An example with its optional preview image.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedPair<'a> {
    /// The code example
    pub example: &'a ExampleRecord,

    /// The image sharing the example's name, if any
    pub image: Option<&'a ImageRecord>,
}

/// Pair every example with the first image of the same name.
///
/// Names are compared exactly (case-sensitive). Examples keep their input
/// order; an example without an image gets `None`.
pub fn match_assets<'a>(
    examples: &'a [ExampleRecord],
    images: &'a [ImageRecord],
) -> Vec<MatchedPair<'a>> {
    examples
        .iter()
        .map(|example| MatchedPair {
            example,
            image: images.iter().find(|img| img.name == example.name),
        })
        .collect()
}

/// Name to image lookup for larger image sets.
///
/// Produces the same pairs as [`match_assets`]: when several images share a
/// name, the first one in input order wins.
#[derive(Debug, Default)]
pub struct AssetIndex<'a> {
    by_name: HashMap<&'a str, &'a ImageRecord>,
}

impl<'a> AssetIndex<'a> {
    /// Index `images` by name.
    pub fn new(images: &'a [ImageRecord]) -> Self {
        let mut by_name = HashMap::with_capacity(images.len());
        for image in images {
            by_name.entry(image.name.as_str()).or_insert(image);
        }
        Self { by_name }
    }

    /// Look up the image for `name`.
    pub fn get(&self, name: &str) -> Option<&'a ImageRecord> {
        self.by_name.get(name).copied()
    }

    /// Pair every example with its indexed image.
    pub fn pair(&self, examples: &'a [ExampleRecord]) -> Vec<MatchedPair<'a>> {
        examples
            .iter()
            .map(|example| MatchedPair {
                example,
                image: self.get(&example.name),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn example(name: &str) -> ExampleRecord {
        ExampleRecord::new(name, format!("// {}", name))
    }

    fn image(name: &str, asset: &str) -> ImageRecord {
        ImageRecord::new(name, asset)
    }

    #[test]
    fn matches_by_name_regardless_of_order() {
        let examples = vec![example("a"), example("b")];
        let images = vec![image("b", "b.png"), image("a", "a.png")];

        let pairs = match_assets(&examples, &images);

        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].example.name, "a");
        assert_eq!(pairs[0].image.map(|i| i.asset.as_str()), Some("a.png"));
        assert_eq!(pairs[1].example.name, "b");
        assert_eq!(pairs[1].image.map(|i| i.asset.as_str()), Some("b.png"));
    }

    #[test]
    fn missing_image_is_none() {
        let examples = vec![example("a")];

        let pairs = match_assets(&examples, &[]);

        assert_eq!(
            pairs,
            vec![MatchedPair {
                example: &examples[0],
                image: None,
            }]
        );
    }

    #[test]
    fn first_image_wins_on_duplicates() {
        let examples = vec![example("a")];
        let images = vec![image("a", "first.png"), image("a", "second.gif")];

        let pairs = match_assets(&examples, &images);

        assert_eq!(pairs[0].image.unwrap().asset, "first.png");
    }

    #[test]
    fn names_are_case_sensitive() {
        let examples = vec![example("abs_0")];
        let images = vec![image("Abs_0", "Abs_0.png")];

        let pairs = match_assets(&examples, &images);

        assert!(pairs[0].image.is_none());
    }

    #[test]
    fn index_agrees_with_scan() {
        let examples = vec![example("a"), example("b"), example("c")];
        let images = vec![
            image("c", "c1.png"),
            image("a", "a.png"),
            image("c", "c2.png"),
        ];

        let scanned = match_assets(&examples, &images);
        let indexed = AssetIndex::new(&images).pair(&examples);

        assert_eq!(scanned, indexed);
        assert_eq!(indexed[2].image.unwrap().asset, "c1.png");
    }
}
