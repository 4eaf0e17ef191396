//! @ai:module:intent Select the source grammar for an input file
//! @ai:module:layer domain
//! @ai:module:public_api Language, detect_language
//! @ai:module:stateless true

use std::path::Path;

/// @ai:intent Source languages the extractor can parse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    TypeScript,
    Tsx,
    JavaScript,
}

impl Language {
    /// @ai:intent Get file extensions for this language
    /// @ai:effects pure
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::TypeScript => &["ts", "mts", "cts"],
            Language::Tsx => &["tsx"],
            Language::JavaScript => &["js", "jsx", "mjs", "cjs"],
        }
    }

    /// @ai:intent Get language name as string
    /// @ai:effects pure
    pub fn name(&self) -> &'static str {
        match self {
            Language::TypeScript => "typescript",
            Language::Tsx => "tsx",
            Language::JavaScript => "javascript",
        }
    }

    /// @ai:intent Get the tree-sitter grammar for this language
    /// @ai:effects pure
    pub fn grammar(&self) -> tree_sitter::Language {
        match self {
            Language::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            Language::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
            Language::JavaScript => tree_sitter_javascript::LANGUAGE.into(),
        }
    }
}

/// @ai:intent Detect the source language from a file path
/// @ai:post unknown or missing extensions fall back to TypeScript, a superset of JavaScript
/// @ai:example ("functions.ts") -> TypeScript
/// @ai:example ("functions.tsx") -> Tsx
/// @ai:example ("functions.js") -> JavaScript
/// @ai:example ("functions") -> TypeScript
/// @ai:effects pure
pub fn detect_language(path: &Path) -> Language {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return Language::default();
    };
    let ext = ext.to_ascii_lowercase();

    if Language::JavaScript.extensions().contains(&ext.as_str()) {
        Language::JavaScript
    } else if Language::Tsx.extensions().contains(&ext.as_str()) {
        Language::Tsx
    } else {
        Language::TypeScript
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_typescript() {
        assert_eq!(
            detect_language(Path::new("functions.ts")),
            Language::TypeScript
        );
    }

    #[test]
    fn test_detect_tsx() {
        assert_eq!(detect_language(Path::new("view.tsx")), Language::Tsx);
        assert_eq!(detect_language(Path::new("view.TSX")), Language::Tsx);
    }

    #[test]
    fn test_detect_javascript() {
        assert_eq!(
            detect_language(Path::new("functions.js")),
            Language::JavaScript
        );
        assert_eq!(
            detect_language(Path::new("functions.MJS")),
            Language::JavaScript
        );
    }

    #[test]
    fn test_unknown_extension_defaults_to_typescript() {
        assert_eq!(detect_language(Path::new("functions.txt")), Language::TypeScript);
        assert_eq!(detect_language(Path::new("functions")), Language::TypeScript);
    }
}
