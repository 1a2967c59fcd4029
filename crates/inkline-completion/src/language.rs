//! Language resolution for completion requests
//!
//! Maps the editor-reported MIME type to a registered language and derives
//! the canonical backend label and human-readable display name from it. Two
//! notebook dialect identifiers are special-cased: `ipython` resolves to
//! `python`, and `ipythongfm` (the notebook markdown dialect) resolves to
//! `markdown`.

use serde::{Deserialize, Serialize};

/// Label sent to the backend when no language is recognized
pub const UNKNOWN_LANGUAGE_LABEL: &str = "plain English";

/// A language known to the editing surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInfo {
    /// Raw language identifier (e.g. "python", "ipythongfm")
    pub name: String,
    /// Human-readable name, when it differs from the identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    /// MIME types the editor reports for this language
    pub mime_types: Vec<String>,
}

impl LanguageInfo {
    /// Create a language entry
    pub fn new(
        name: impl Into<String>,
        display_name: Option<&str>,
        mime_types: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            display_name: display_name.map(str::to_string),
            mime_types: mime_types.iter().map(|m| m.to_string()).collect(),
        }
    }
}

/// Registry of languages the editing surface knows about
///
/// Stands in for the host editor language registry at the core's boundary;
/// hosts register their own entries on top of the defaults.
#[derive(Debug, Clone, Default)]
pub struct LanguageRegistry {
    languages: Vec<LanguageInfo>,
}

impl LanguageRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry pre-populated with common notebook languages
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(LanguageInfo::new(
            "python",
            Some("Python"),
            &["text/x-python"],
        ));
        registry.register(LanguageInfo::new(
            "ipython",
            None,
            &["text/x-ipython"],
        ));
        registry.register(LanguageInfo::new(
            "markdown",
            Some("Markdown"),
            &["text/x-markdown", "text/markdown"],
        ));
        registry.register(LanguageInfo::new(
            "ipythongfm",
            None,
            &["text/x-ipythongfm"],
        ));
        registry.register(LanguageInfo::new("r", Some("R"), &["text/x-rsrc"]));
        registry.register(LanguageInfo::new(
            "julia",
            Some("Julia"),
            &["text/x-julia"],
        ));
        registry.register(LanguageInfo::new(
            "json",
            Some("JSON"),
            &["application/json"],
        ));
        registry
    }

    /// Register a language, replacing any entry with the same name
    pub fn register(&mut self, info: LanguageInfo) {
        self.languages.retain(|l| l.name != info.name);
        self.languages.push(info);
    }

    /// Look up a language by MIME type
    pub fn find_by_mime(&self, mime: &str) -> Option<&LanguageInfo> {
        self.languages
            .iter()
            .find(|l| l.mime_types.iter().any(|m| m == mime))
    }

    /// All registered languages
    pub fn languages(&self) -> &[LanguageInfo] {
        &self.languages
    }
}

/// Human-friendly label for a language
///
/// Special-cases the two notebook dialect identifiers; otherwise falls back
/// to the language's own display name or raw name.
pub fn display_name(language: Option<&LanguageInfo>) -> String {
    match language {
        Some(l) if l.name == "ipythongfm" => "Markdown (IPython)".to_string(),
        Some(l) if l.name == "ipython" => "IPython".to_string(),
        Some(l) => l.display_name.clone().unwrap_or_else(|| l.name.clone()),
        None => UNKNOWN_LANGUAGE_LABEL.to_string(),
    }
}

/// Canonical label sent to the backend for a language
///
/// Total over its input: absent or unknown languages map to
/// [`UNKNOWN_LANGUAGE_LABEL`].
pub fn resolve_language(language: Option<&LanguageInfo>) -> String {
    match language {
        Some(l) if l.name == "ipython" => "python".to_string(),
        Some(l) if l.name == "ipythongfm" => "markdown".to_string(),
        Some(l) => l.name.clone(),
        None => UNKNOWN_LANGUAGE_LABEL.to_string(),
    }
}
