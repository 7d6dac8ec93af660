use regex::Regex;

use super::StylesheetMinifier;
use crate::error::Result;

/// Aggressive stylesheet compaction: comments out, whitespace tightened
/// around structural punctuation, trailing semicolons before `}` dropped.
pub struct BasicStylesheetMinifier {
    comment: Regex,
    whitespace_run: Regex,
    around_punct: Regex,
    trailing_semi: Regex,
}

impl BasicStylesheetMinifier {
    pub fn new() -> Self {
        Self {
            comment: Regex::new(r"(?s)/\*.*?\*/").unwrap(),
            whitespace_run: Regex::new(r"\s+").unwrap(),
            around_punct: Regex::new(r"\s*([{}:;,])\s*").unwrap(),
            trailing_semi: Regex::new(r";+\}").unwrap(),
        }
    }
}

impl Default for BasicStylesheetMinifier {
    fn default() -> Self {
        Self::new()
    }
}

impl StylesheetMinifier for BasicStylesheetMinifier {
    fn minify(&self, css: &str) -> Result<String> {
        let out = self.comment.replace_all(css, "");
        let out = self.whitespace_run.replace_all(&out, " ");
        let out = self.around_punct.replace_all(&out, "$1");
        let out = self.trailing_semi.replace_all(&out, "}");
        Ok(out.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minify::StylesheetMinifier;

    #[test]
    fn test_compacts_simple_rule() {
        let minifier = BasicStylesheetMinifier::new();
        let out = minifier.minify("body{ color: red; }").unwrap();
        assert_eq!(out, "body{color:red}");
    }

    #[test]
    fn test_strips_comments() {
        let minifier = BasicStylesheetMinifier::new();
        let out = minifier.minify("/* palette */ h1 { margin: 0; }").unwrap();
        assert_eq!(out, "h1{margin:0}");
    }

    #[test]
    fn test_multiple_declarations() {
        let minifier = BasicStylesheetMinifier::new();
        let out = minifier
            .minify(".card {\n  padding: 4px;\n  border: none;\n}")
            .unwrap();
        assert_eq!(out, ".card{padding:4px;border:none}");
    }

    #[test]
    fn test_selector_lists_tightened() {
        let minifier = BasicStylesheetMinifier::new();
        let out = minifier.minify("h1 , h2 { font-weight: bold; }").unwrap();
        assert_eq!(out, "h1,h2{font-weight:bold}");
    }
}
