//! Target languages and their reserved words.

use serde::{Deserialize, Serialize};

/// Kotlin hard keywords, plus `_` which cannot name a property.
const KOTLIN_RESERVED: &[&str] = &[
    "_", "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

/// Rust strict and reserved keywords across editions, plus `_`.
const RUST_RESERVED: &[&str] = &[
    "_", "Self", "abstract", "as", "async", "await", "become", "box", "break", "const",
    "continue", "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for",
    "gen", "if", "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut",
    "override", "priv", "pub", "ref", "return", "self", "static", "struct", "super", "trait",
    "true", "try", "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while",
    "yield",
];

/// The language generated accessors are written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetLanguage {
    #[default]
    Kotlin,
    Rust,
}

impl TargetLanguage {
    pub fn as_str(&self) -> &'static str {
        match self {
            TargetLanguage::Kotlin => "kotlin",
            TargetLanguage::Rust => "rust",
        }
    }

    /// Words that cannot be used as a plain identifier.
    pub fn reserved_words(&self) -> &'static [&'static str] {
        match self {
            TargetLanguage::Kotlin => KOTLIN_RESERVED,
            TargetLanguage::Rust => RUST_RESERVED,
        }
    }

    pub fn is_reserved(&self, ident: &str) -> bool {
        self.reserved_words().contains(&ident)
    }
}

impl std::str::FromStr for TargetLanguage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "kotlin" | "kt" => Ok(TargetLanguage::Kotlin),
            "rust" | "rs" => Ok(TargetLanguage::Rust),
            _ => Err(format!(
                "invalid target language '{}', valid values: kotlin, rust",
                s
            )),
        }
    }
}

impl std::fmt::Display for TargetLanguage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
