//! Per-request policy decisions
//!
//! A [`RequestPolicy`] is built from a settings snapshot at the start of each
//! fetch, so a concurrent `configure` cannot change the rules mid-request.

use crate::settings::{ProviderSettings, StreamingMode};
use serde::{Deserialize, Serialize};

/// What caused a completion request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerKind {
    /// Explicit user invocation
    Invoked,
    /// Automatic as-you-type triggering
    Automatic,
}

/// Policy decisions for one completion request
#[derive(Debug, Clone)]
pub struct RequestPolicy {
    settings: ProviderSettings,
}

impl RequestPolicy {
    /// Build a policy from a settings snapshot
    pub fn new(settings: ProviderSettings) -> Self {
        Self { settings }
    }

    /// Whether completions are globally active
    pub fn is_enabled(&self) -> bool {
        self.settings.enabled
    }

    /// Whether completions are offered for the given language
    ///
    /// False iff the language identifier is in the disabled set.
    pub fn is_language_enabled(&self, language: &str) -> bool {
        !self.settings.disabled_languages.contains(language)
    }

    /// Whether this request should ask the backend for streaming chunks
    pub fn should_stream(&self, trigger: TriggerKind) -> bool {
        match self.settings.streaming {
            StreamingMode::Always => true,
            StreamingMode::Never => false,
            StreamingMode::Manual => trigger == TriggerKind::Invoked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn policy_with_streaming(streaming: StreamingMode) -> RequestPolicy {
        RequestPolicy::new(ProviderSettings {
            streaming,
            ..Default::default()
        })
    }

    #[test]
    fn test_stream_decision_all_combinations() {
        let cases = [
            (StreamingMode::Always, TriggerKind::Invoked, true),
            (StreamingMode::Always, TriggerKind::Automatic, true),
            (StreamingMode::Never, TriggerKind::Invoked, false),
            (StreamingMode::Never, TriggerKind::Automatic, false),
            (StreamingMode::Manual, TriggerKind::Invoked, true),
            (StreamingMode::Manual, TriggerKind::Automatic, false),
        ];

        for (mode, trigger, expected) in cases {
            assert_eq!(
                policy_with_streaming(mode).should_stream(trigger),
                expected,
                "mode {mode:?}, trigger {trigger:?}"
            );
        }
    }

    #[test]
    fn test_language_enabled_is_negation_of_membership() {
        let mut settings = ProviderSettings::default();
        settings.disabled_languages.insert("markdown".to_string());
        let policy = RequestPolicy::new(settings);

        assert!(!policy.is_language_enabled("markdown"));
        assert!(policy.is_language_enabled("python"));
    }

    #[test]
    fn test_is_enabled_reflects_snapshot() {
        let policy = RequestPolicy::new(ProviderSettings {
            enabled: false,
            ..Default::default()
        });
        assert!(!policy.is_enabled());

        assert!(RequestPolicy::new(ProviderSettings::default()).is_enabled());
    }
}
