//! Provider settings and the schema exposed to the host configuration system
//!
//! Settings are applied wholesale: the host hands the provider a complete
//! [`ProviderSettings`] value via `configure` and the previous snapshot is
//! replaced atomically. There is no partial-update contract; persistence and
//! merge semantics belong to the host.

use crate::error::{CompletionError, CompletionResult};
use crate::language::LanguageRegistry;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::HashSet;

/// When the backend should stream incremental chunks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamingMode {
    /// Stream every request
    Always,
    /// Stream only explicitly invoked requests
    #[default]
    Manual,
    /// Never stream
    Never,
}

/// Inline completion provider settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderSettings {
    /// Maximum characters of leading context sent to the backend (>= 1)
    pub max_prefix: usize,
    /// Maximum characters of trailing context sent to the backend
    pub max_suffix: usize,
    /// Languages for which no completion is offered
    pub disabled_languages: HashSet<String>,
    /// Streaming trigger policy
    pub streaming: StreamingMode,
    /// Global on/off switch
    pub enabled: bool,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            max_prefix: 10_000,
            max_suffix: 10_000,
            disabled_languages: HashSet::new(),
            streaming: StreamingMode::Manual,
            enabled: true,
        }
    }
}

impl ProviderSettings {
    /// Validate settings before applying them
    pub fn validate(&self) -> CompletionResult<()> {
        if self.max_prefix < 1 {
            return Err(CompletionError::config(
                "max_prefix must be at least 1 character",
            ));
        }
        Ok(())
    }
}

/// JSON schema describing the recognized settings, for the host settings UI
///
/// The `disabled_languages` entry enumerates the registry's known language
/// identifiers together with their display titles.
pub fn settings_schema(registry: &LanguageRegistry) -> Value {
    let language_names: Vec<&str> = registry
        .languages()
        .iter()
        .map(|l| l.name.as_str())
        .collect();
    let language_titles: Vec<String> = registry
        .languages()
        .iter()
        .map(|l| crate::language::display_name(Some(l)))
        .collect();
    let defaults = ProviderSettings::default();

    json!({
        "type": "object",
        "properties": {
            "max_prefix": {
                "title": "Maximum prefix length",
                "description": "At most this many characters of leading context are sent to the completion backend.",
                "type": "number",
                "minimum": 1,
                "default": defaults.max_prefix,
            },
            "max_suffix": {
                "title": "Maximum suffix length",
                "description": "At most this many characters of trailing context are sent to the completion backend.",
                "type": "number",
                "minimum": 0,
                "default": defaults.max_suffix,
            },
            "disabled_languages": {
                "title": "Disabled languages",
                "description": "Languages for which no inline completion is offered.",
                "type": "array",
                "items": {
                    "type": "string",
                    "oneOf": language_names
                        .iter()
                        .zip(language_titles.iter())
                        .map(|(name, title)| json!({ "const": name, "title": title }))
                        .collect::<Vec<_>>(),
                },
                "default": [],
            },
            "streaming": {
                "title": "Streaming",
                "description": "Whether to stream completions: always, only on explicit invocation (manual), or never.",
                "type": "string",
                "enum": ["always", "manual", "never"],
                "default": "manual",
            },
            "enabled": {
                "title": "Enabled",
                "description": "Enable inline completions.",
                "type": "boolean",
                "default": defaults.enabled,
            },
        },
        "default": serde_json::to_value(&defaults).unwrap_or(Value::Null),
    })
}
