pub mod error;
pub mod extract;
pub mod fingerprint;
pub mod minify;
pub mod monitor;
pub mod obfuscate;
pub mod pipeline;

pub use error::{PageGuardError, Result};
pub use extract::{AssetExtractor, AssetKind, SourceAsset};
pub use fingerprint::{additive_checksum, fingerprint, guard_snippet};
pub use minify::{
    minify_markup, minify_script, minify_stylesheet, BasicMarkupMinifier, BasicScriptMinifier,
    BasicStylesheetMinifier, MarkupMinifier, ScriptMinifier, ScriptMinifyOptions,
    StylesheetMinifier,
};
pub use monitor::{
    DefenseEvent, DefenseMonitor, DefenseState, Effect, GestureKind, MonitorOptions, Phase,
    Platform,
};
pub use obfuscate::{antidebug_snippet, AliasTable, Obfuscated, Renamer};
pub use pipeline::{Artifact, BuildReport, Pipeline};
