//! Minifier adapter set.
//!
//! Three boundary traits wrap the actual minifier implementations, and
//! three fail-soft wrappers guarantee the orchestrator never aborts
//! because a single asset's minifier failed: any error is logged and the
//! caller receives the original input unchanged. Worst case is
//! "unminified but valid" output.

mod markup;
mod script;
mod strip;
mod stylesheet;

pub use markup::BasicMarkupMinifier;
pub use script::{BasicScriptMinifier, ScriptMinifyOptions};
pub use strip::strip_script_comments;
pub use stylesheet::BasicStylesheetMinifier;

use async_trait::async_trait;
use tracing::warn;

use crate::error::Result;

#[async_trait]
pub trait ScriptMinifier: Send + Sync {
    async fn minify(&self, code: &str) -> Result<String>;
}

pub trait StylesheetMinifier: Send + Sync {
    fn minify(&self, css: &str) -> Result<String>;
}

#[async_trait]
pub trait MarkupMinifier: Send + Sync {
    async fn minify(&self, html: &str) -> Result<String>;
}

/// Fail-soft script minification: on error, logs and returns the input.
pub async fn minify_script(minifier: &dyn ScriptMinifier, code: &str) -> String {
    match minifier.minify(code).await {
        Ok(minified) => minified,
        Err(e) => {
            warn!("Script minification failed, keeping original: {}", e);
            code.to_string()
        }
    }
}

/// Fail-soft stylesheet minification.
pub fn minify_stylesheet(minifier: &dyn StylesheetMinifier, css: &str) -> String {
    match minifier.minify(css) {
        Ok(minified) => minified,
        Err(e) => {
            warn!("Stylesheet minification failed, keeping original: {}", e);
            css.to_string()
        }
    }
}

/// Fail-soft markup minification.
pub async fn minify_markup(minifier: &dyn MarkupMinifier, html: &str) -> String {
    match minifier.minify(html).await {
        Ok(minified) => minified,
        Err(e) => {
            warn!("Markup minification failed, keeping original: {}", e);
            html.to_string()
        }
    }
}
