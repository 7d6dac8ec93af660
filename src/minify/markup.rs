use async_trait::async_trait;
use regex::Regex;

use super::{minify_script, minify_stylesheet, MarkupMinifier};
use super::{BasicScriptMinifier, BasicStylesheetMinifier};
use crate::error::Result;
use crate::extract::{AssetExtractor, AssetKind};

/// Whole-document minifier: HTML comments removed (conditional comments
/// kept), inter-tag whitespace collapsed, quotes dropped from single-token
/// attribute values, and any remaining inline script/style minified via
/// the other two adapters.
pub struct BasicMarkupMinifier {
    extractor: AssetExtractor,
    script: BasicScriptMinifier,
    stylesheet: BasicStylesheetMinifier,
    html_comment: Regex,
    intertag: Regex,
    attr_quotes: Regex,
}

impl BasicMarkupMinifier {
    pub fn new() -> Self {
        Self {
            extractor: AssetExtractor::new(),
            script: BasicScriptMinifier::new(),
            stylesheet: BasicStylesheetMinifier::new(),
            html_comment: Regex::new(r"(?s)<!--[^\[].*?-->").unwrap(),
            intertag: Regex::new(r">\s+<").unwrap(),
            attr_quotes: Regex::new(r#"([a-zA-Z-]+)="([a-zA-Z0-9_/.-]+)""#).unwrap(),
        }
    }

    /// Comment removal, inter-tag whitespace collapse, attribute
    /// unquoting. Only ever applied to markup between asset regions.
    fn minify_structure(&self, markup: &str) -> String {
        let out = self.html_comment.replace_all(markup, "");
        let out = self.intertag.replace_all(&out, "><");
        self.attr_quotes.replace_all(&out, "$1=$2").into_owned()
    }
}

impl Default for BasicMarkupMinifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarkupMinifier for BasicMarkupMinifier {
    async fn minify(&self, html: &str) -> Result<String> {
        // Assets and surrounding markup are minified segment by segment;
        // the structural passes never see script or style text.
        let mut out = String::with_capacity(html.len());
        let mut last_end = 0;

        for asset in self.extractor.extract(html) {
            out.push_str(&self.minify_structure(&html[last_end..asset.span.start]));

            let content = if asset.is_blank() {
                asset.content.clone()
            } else {
                match asset.kind {
                    AssetKind::Script => minify_script(&self.script, &asset.content).await,
                    AssetKind::Style => minify_stylesheet(&self.stylesheet, &asset.content),
                }
            };
            out.push_str(&content);
            last_end = asset.span.end;
        }

        out.push_str(&self.minify_structure(&html[last_end..]));
        Ok(out.trim().to_string())
    }
}
