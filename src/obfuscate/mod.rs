mod alias;
mod antidebug;
mod renamer;

pub use alias::AliasTable;
pub use antidebug::antidebug_snippet;
pub use renamer::{Obfuscated, Renamer};
