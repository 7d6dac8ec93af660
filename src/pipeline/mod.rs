//! Pipeline orchestrator.
//!
//! Runs once per build invocation: reads the template, produces the
//! "protected" artifact (renamed scripts with the anti-debug snippet,
//! compacted styles) and the "minified" artifact (minifier-processed
//! scripts with the integrity guard, compacted styles, whole-document
//! markup pass), writes both as siblings of the template, and reports
//! sizes. Template I/O failures abort the run; per-asset transform
//! failures are absorbed by the fail-soft adapters and never do.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::error::{PageGuardError, Result};
use crate::extract::{AssetExtractor, AssetKind};
use crate::fingerprint::guard_snippet;
use crate::minify::{
    minify_markup, minify_script, minify_stylesheet, BasicMarkupMinifier, BasicScriptMinifier,
    BasicStylesheetMinifier, MarkupMinifier, ScriptMinifier, StylesheetMinifier,
};
use crate::obfuscate::{antidebug_snippet, Renamer};

#[derive(Debug, Clone, Serialize)]
pub struct Artifact {
    pub template_path: PathBuf,
    pub output_path: PathBuf,
    pub size_bytes: u64,
    /// Percent reduction relative to the template, negative when the
    /// output grew (the protected variant usually does, snippets included).
    pub compression_ratio: f64,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildReport {
    pub script_count: usize,
    pub style_count: usize,
    pub original_bytes: u64,
    pub artifacts: Vec<Artifact>,
}

pub struct Pipeline {
    extractor: AssetExtractor,
    script_minifier: Box<dyn ScriptMinifier>,
    stylesheet_minifier: Box<dyn StylesheetMinifier>,
    markup_minifier: Box<dyn MarkupMinifier>,
    renamer_seed: Option<u64>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::with_minifiers(
            Box::new(BasicScriptMinifier::new()),
            Box::new(BasicStylesheetMinifier::new()),
            Box::new(BasicMarkupMinifier::new()),
        )
    }

    /// Injection point for alternative minifier implementations.
    pub fn with_minifiers(
        script: Box<dyn ScriptMinifier>,
        stylesheet: Box<dyn StylesheetMinifier>,
        markup: Box<dyn MarkupMinifier>,
    ) -> Self {
        Self {
            extractor: AssetExtractor::new(),
            script_minifier: script,
            stylesheet_minifier: stylesheet,
            markup_minifier: markup,
            renamer_seed: None,
        }
    }

    /// Pins the renamer seed so repeated builds assign the same aliases.
    pub fn with_renamer_seed(mut self, seed: u64) -> Self {
        self.renamer_seed = Some(seed);
        self
    }

    fn renamer(&self) -> Renamer {
        match self.renamer_seed {
            Some(seed) => Renamer::with_seed(seed),
            None => Renamer::new(),
        }
    }

    fn read_template(&self, template: &Path) -> Result<String> {
        if !template.exists() {
            return Err(PageGuardError::TemplateNotFound(
                template.display().to_string(),
            ));
        }
        Ok(fs::read_to_string(template)?)
    }

    fn output_path(template: &Path, suffix: &str) -> PathBuf {
        let stem = template
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let ext = template
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        template.with_file_name(format!("{}_{}{}", stem, suffix, ext))
    }

    fn write_artifact(&self, template: &Path, output: &Path, content: &str) -> Result<Artifact> {
        fs::write(output, content)?;
        let original_bytes = fs::metadata(template)?.len();
        let size_bytes = fs::metadata(output)?.len();
        let compression_ratio = if original_bytes > 0 {
            (original_bytes as f64 - size_bytes as f64) / original_bytes as f64 * 100.0
        } else {
            0.0
        };
        Ok(Artifact {
            template_path: template.to_path_buf(),
            output_path: output.to_path_buf(),
            size_bytes,
            compression_ratio,
        })
    }

    /// Produces both artifacts and the combined stats report.
    pub async fn build(&self, template: &Path) -> Result<BuildReport> {
        info!("Protecting template {}", template.display());
        let document = self.read_template(template)?;

        let mut report = BuildReport {
            original_bytes: document.len() as u64,
            ..Default::default()
        };
        for asset in self.extractor.extract(&document) {
            if asset.is_blank() {
                continue;
            }
            match asset.kind {
                AssetKind::Script => report.script_count += 1,
                AssetKind::Style => report.style_count += 1,
            }
        }

        report.artifacts.push(self.protect(template)?);
        report.artifacts.push(self.minify(template).await?);

        info!(
            "Processed {} scripts, {} styles",
            report.script_count, report.style_count
        );
        for artifact in &report.artifacts {
            info!(
                "Wrote {} ({} bytes, {:.2}% compression)",
                artifact.output_path.display(),
                artifact.size_bytes,
                artifact.compression_ratio
            );
        }
        Ok(report)
    }

    /// Protected variant: declaration-renamed scripts behind the
    /// anti-debug snippet, compacted styles, markup untouched.
    pub fn protect(&self, template: &Path) -> Result<Artifact> {
        let document = self.read_template(template)?;
        let mut renamer = self.renamer();

        let protected = self.extractor.transform_assets(&document, |asset| match asset.kind {
            AssetKind::Script => {
                let obfuscated = renamer.obfuscate(&asset.content);
                debug!("Renamed {} declarations", obfuscated.aliases.len());
                format!("{}{}", antidebug_snippet(), obfuscated.code)
            }
            AssetKind::Style => minify_stylesheet(self.stylesheet_minifier.as_ref(), &asset.content),
        });

        let output = Self::output_path(template, "protected");
        self.write_artifact(template, &output, &protected)
    }

    /// Minified variant: minifier-processed scripts behind the integrity
    /// guard, compacted styles, then a whole-document markup pass.
    pub async fn minify(&self, template: &Path) -> Result<Artifact> {
        let document = self.read_template(template)?;

        let assets = self.extractor.extract(&document);
        let mut replacements = Vec::with_capacity(assets.len());
        for asset in assets {
            let content = if asset.is_blank() {
                asset.content.clone()
            } else {
                match asset.kind {
                    AssetKind::Script => {
                        let minified =
                            minify_script(self.script_minifier.as_ref(), &asset.content).await;
                        format!("{}{}", guard_snippet(&minified), minified)
                    }
                    AssetKind::Style => {
                        minify_stylesheet(self.stylesheet_minifier.as_ref(), &asset.content)
                    }
                }
            };
            replacements.push((asset.span.clone(), content));
        }
        let reassembled = self.extractor.reinject(&document, &replacements);
        let minified = minify_markup(self.markup_minifier.as_ref(), &reassembled).await;

        let output = Self::output_path(template, "minified");
        self.write_artifact(template, &output, &minified)
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new()
    }
}
