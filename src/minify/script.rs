use async_trait::async_trait;
use regex::Regex;

use super::strip::{map_outside_strings, strip_script_comments};
use super::ScriptMinifier;
use crate::error::Result;

/// Fixed production configuration: diagnostic calls dropped, two collapse
/// passes, comments removed.
#[derive(Debug, Clone)]
pub struct ScriptMinifyOptions {
    pub drop_diagnostics: bool,
    pub passes: usize,
}

impl Default for ScriptMinifyOptions {
    fn default() -> Self {
        Self {
            drop_diagnostics: true,
            passes: 2,
        }
    }
}

/// Conservative pure-Rust script minifier: string-aware comment
/// stripping, diagnostic-call removal, whitespace collapse. Identifier
/// mangling is the obfuscation pass's job, not this one's; anything this
/// minifier is unsure about it emits unchanged.
pub struct BasicScriptMinifier {
    options: ScriptMinifyOptions,
    diagnostic_call: Regex,
    whitespace_run: Regex,
    around_punct: Regex,
}

impl BasicScriptMinifier {
    pub fn new() -> Self {
        Self::with_options(ScriptMinifyOptions::default())
    }

    pub fn with_options(options: ScriptMinifyOptions) -> Self {
        Self {
            options,
            // Simple calls only: an argument list containing parentheses
            // is left alone rather than risk unbalanced output.
            diagnostic_call: Regex::new(r"console\.(log|info|debug)\s*\([^()]*\)\s*;?").unwrap(),
            whitespace_run: Regex::new(r"[ \t]+").unwrap(),
            around_punct: Regex::new(r"\s*([{};,=()])\s*").unwrap(),
        }
    }

    /// Collapse runs only between string literals; literal interiors are
    /// emitted byte for byte.
    fn collapse(&self, code: &str) -> String {
        let mut out = code.to_string();
        for _ in 0..self.options.passes.max(1) {
            out = map_outside_strings(&out, |segment| {
                let segment = self.whitespace_run.replace_all(segment, " ");
                let segment = self.around_punct.replace_all(&segment, "$1");
                segment
                    .lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n")
            });
        }
        out
    }
}

impl Default for BasicScriptMinifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ScriptMinifier for BasicScriptMinifier {
    async fn minify(&self, code: &str) -> Result<String> {
        let mut out = strip_script_comments(code);
        if self.options.drop_diagnostics {
            out = self.diagnostic_call.replace_all(&out, "").into_owned();
        }
        Ok(self.collapse(&out))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::minify::ScriptMinifier;

    #[tokio::test]
    async fn test_drops_diagnostic_calls() {
        let minifier = BasicScriptMinifier::new();
        let out = minifier.minify("console.log('debug'); run();").await.unwrap();
        assert!(!out.contains("console.log"));
        assert!(out.contains("run()"));
    }

    #[tokio::test]
    async fn test_keeps_nested_paren_diagnostics() {
        let minifier = BasicScriptMinifier::new();
        let out = minifier.minify("console.log(fmt(x)); run();").await.unwrap();
        assert!(out.contains("console.log"));
    }

    #[tokio::test]
    async fn test_strips_comments_and_collapses() {
        let minifier = BasicScriptMinifier::new();
        let src = "var x = 1;  // count\nvar y   =   2;";
        let out = minifier.minify(src).await.unwrap();
        assert!(!out.contains("count"));
        assert!(out.contains("var x=1;"));
        assert!(out.contains("var y=2;"));
    }

    #[tokio::test]
    async fn test_diagnostics_kept_when_disabled() {
        let minifier = BasicScriptMinifier::with_options(ScriptMinifyOptions {
            drop_diagnostics: false,
            passes: 2,
        });
        let out = minifier.minify("console.log('hi');").await.unwrap();
        assert!(out.contains("console.log"));
    }

    #[tokio::test]
    async fn test_string_literal_interiors_untouched() {
        let minifier = BasicScriptMinifier::new();
        let out = minifier
            .minify("var msg = 'hello, world (and you)'; alert(msg);")
            .await
            .unwrap();
        assert_eq!(out, "var msg='hello, world (and you)';alert(msg);");
    }

    #[tokio::test]
    async fn test_template_literal_interiors_untouched() {
        let minifier = BasicScriptMinifier::new();
        let out = minifier.minify("var t = `a,  b  {c}`;").await.unwrap();
        assert!(out.contains("`a,  b  {c}`"));
    }

    #[tokio::test]
    async fn test_deterministic() {
        let minifier = BasicScriptMinifier::new();
        let src = "var a = 1; /* c */ var b = 2;";
        let first = minifier.minify(src).await.unwrap();
        let second = minifier.minify(src).await.unwrap();
        assert_eq!(first, second);
    }
}
