//! Inline asset extraction for markup templates.
//!
//! Locates inline `<script>` and `<style>` regions, hands their content to
//! downstream transforms, and substitutes the transformed text back at the
//! original position. Matching is case-insensitive, non-nested, and stops
//! at the first closing tag. Unbalanced markup yields undefined region
//! boundaries rather than an error.

use std::ops::Range;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Script,
    Style,
}

/// One inline region. `span` is the byte range of the inner content
/// within the source document.
#[derive(Debug, Clone)]
pub struct SourceAsset {
    pub kind: AssetKind,
    pub content: String,
    pub span: Range<usize>,
}

impl SourceAsset {
    /// Empty or whitespace-only regions are passed through untransformed.
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

pub struct AssetExtractor {
    script_pattern: Regex,
    style_pattern: Regex,
}

impl AssetExtractor {
    pub fn new() -> Self {
        Self {
            script_pattern: Regex::new(r"(?is)<script[^>]*>(.*?)</script>").unwrap(),
            style_pattern: Regex::new(r"(?is)<style[^>]*>(.*?)</style>").unwrap(),
        }
    }

    /// Returns all inline script and style regions in document order.
    pub fn extract(&self, document: &str) -> Vec<SourceAsset> {
        let mut assets = Vec::new();

        for caps in self.script_pattern.captures_iter(document) {
            let inner = caps.get(1).unwrap();
            assets.push(SourceAsset {
                kind: AssetKind::Script,
                content: inner.as_str().to_string(),
                span: inner.range(),
            });
        }

        for caps in self.style_pattern.captures_iter(document) {
            let inner = caps.get(1).unwrap();
            assets.push(SourceAsset {
                kind: AssetKind::Style,
                content: inner.as_str().to_string(),
                span: inner.range(),
            });
        }

        assets.sort_by_key(|a| a.span.start);
        assets
    }

    /// Rebuilds the document with each span replaced by its new content.
    /// Replacements must be in document order with non-overlapping spans,
    /// as produced by `extract`.
    pub fn reinject(&self, document: &str, replacements: &[(Range<usize>, String)]) -> String {
        let mut result = String::with_capacity(document.len());
        let mut last_end = 0;

        for (span, content) in replacements {
            result.push_str(&document[last_end..span.start]);
            result.push_str(content);
            last_end = span.end;
        }

        result.push_str(&document[last_end..]);
        result
    }

    /// Applies a synchronous transform to every non-blank region in place.
    pub fn transform_assets<F>(&self, document: &str, mut transform: F) -> String
    where
        F: FnMut(&SourceAsset) -> String,
    {
        let replacements: Vec<(Range<usize>, String)> = self
            .extract(document)
            .into_iter()
            .map(|asset| {
                let content = if asset.is_blank() {
                    asset.content.clone()
                } else {
                    transform(&asset)
                };
                (asset.span.clone(), content)
            })
            .collect();

        self.reinject(document, &replacements)
    }
}

impl Default for AssetExtractor {
    fn default() -> Self {
        Self::new()
    }
}
