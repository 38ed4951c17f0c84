#![forbid(unsafe_code)]

//! Session configuration.
//!
//! Defaults match the behaviour hosts expect out of the box. Every field can
//! be overridden with a `with_*` builder or from the environment:
//!
//! | Variable                 | Field                     | Values          |
//! |--------------------------|---------------------------|-----------------|
//! | `TAGKIT_MAX_SUGGESTIONS` | `max_suggestions`         | positive integer |
//! | `TAGKIT_TEMPLATE_FONT`   | `template_font`           | any non-empty name |
//! | `TAGKIT_SPAWN_POSITION`  | `spawn_relative_position` | `1/true/yes/on`, `0/false/no/off` |
//! | `TAGKIT_NORMALIZATION`   | `key_options.form`        | `nfc`, `nfkc`   |
//!
//! Invalid values are logged and ignored.

use tagkit_fonts::{KeyOptions, NormalizationForm};
use tracing::warn;

use crate::event::Modifiers;

/// Environment variable overriding [`SessionConfig::max_suggestions`].
pub const ENV_MAX_SUGGESTIONS: &str = "TAGKIT_MAX_SUGGESTIONS";
/// Environment variable overriding [`SessionConfig::template_font`].
pub const ENV_TEMPLATE_FONT: &str = "TAGKIT_TEMPLATE_FONT";
/// Environment variable overriding [`SessionConfig::spawn_relative_position`].
pub const ENV_SPAWN_POSITION: &str = "TAGKIT_SPAWN_POSITION";
/// Environment variable overriding the catalog normalization form.
pub const ENV_NORMALIZATION: &str = "TAGKIT_NORMALIZATION";

/// Default font written by the font template of the insert menu.
pub const DEFAULT_TEMPLATE_FONT: &str = "ＭＳ Ｐゴシック";

/// Tunables for a [`Session`](crate::Session).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Most font names shown in the suggestion menu.
    pub max_suggestions: usize,
    /// Modifiers that must be held for a key to reach the session.
    pub trigger: Modifiers,
    /// Spawn a relative position tag when an arrow is pressed outside a tag.
    pub spawn_relative_position: bool,
    /// Font name used by the insert menu's font template.
    pub template_font: String,
    /// How catalog names are keyed for ranking.
    pub key_options: KeyOptions,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 10,
            trigger: Modifiers::ALT,
            spawn_relative_position: true,
            template_font: DEFAULT_TEMPLATE_FONT.to_string(),
            key_options: KeyOptions::default(),
        }
    }
}

impl SessionConfig {
    #[must_use]
    pub fn with_max_suggestions(mut self, max_suggestions: usize) -> Self {
        self.max_suggestions = max_suggestions;
        self
    }

    #[must_use]
    pub fn with_trigger(mut self, trigger: Modifiers) -> Self {
        self.trigger = trigger;
        self
    }

    #[must_use]
    pub fn with_spawn_relative_position(mut self, enabled: bool) -> Self {
        self.spawn_relative_position = enabled;
        self
    }

    #[must_use]
    pub fn with_template_font(mut self, font: impl Into<String>) -> Self {
        self.template_font = font.into();
        self
    }

    #[must_use]
    pub fn with_key_options(mut self, key_options: KeyOptions) -> Self {
        self.key_options = key_options;
        self
    }

    /// Defaults overridden by the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_env_with(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by a caller-supplied lookup (testable form of
    /// [`from_env`](Self::from_env)).
    #[must_use]
    pub fn from_env_with<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = get_env(ENV_MAX_SUGGESTIONS) {
            match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => config.max_suggestions = n,
                _ => warn!(var = ENV_MAX_SUGGESTIONS, value = %raw, "ignoring invalid value"),
            }
        }

        if let Some(raw) = get_env(ENV_TEMPLATE_FONT) {
            let font = raw.trim();
            if font.is_empty() {
                warn!(var = ENV_TEMPLATE_FONT, "ignoring empty font name");
            } else {
                config.template_font = font.to_string();
            }
        }

        if let Some(raw) = get_env(ENV_SPAWN_POSITION) {
            match parse_bool(&raw) {
                Some(enabled) => config.spawn_relative_position = enabled,
                None => warn!(var = ENV_SPAWN_POSITION, value = %raw, "ignoring invalid value"),
            }
        }

        if let Some(raw) = get_env(ENV_NORMALIZATION) {
            match NormalizationForm::from_name(raw.trim()) {
                Some(form) => config.key_options = KeyOptions::with_form(form),
                None => warn!(var = ENV_NORMALIZATION, value = %raw, "ignoring invalid value"),
            }
        }

        config
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn map_env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn get_env(map: &HashMap<String, String>) -> impl Fn(&str) -> Option<String> + '_ {
        |key| map.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.max_suggestions, 10);
        assert_eq!(config.trigger, Modifiers::ALT);
        assert!(config.spawn_relative_position);
        assert_eq!(config.template_font, DEFAULT_TEMPLATE_FONT);
        assert_eq!(config.key_options.form, NormalizationForm::Canonical);
    }

    #[test]
    fn empty_env_gives_defaults() {
        let env = map_env(&[]);
        assert_eq!(SessionConfig::from_env_with(get_env(&env)), SessionConfig::default());
    }

    #[test]
    fn env_overrides() {
        let env = map_env(&[
            (ENV_MAX_SUGGESTIONS, "5"),
            (ENV_TEMPLATE_FONT, " Arial "),
            (ENV_SPAWN_POSITION, "off"),
            (ENV_NORMALIZATION, "nfkc"),
        ]);
        let config = SessionConfig::from_env_with(get_env(&env));
        assert_eq!(config.max_suggestions, 5);
        assert_eq!(config.template_font, "Arial");
        assert!(!config.spawn_relative_position);
        assert_eq!(config.key_options.form, NormalizationForm::Compatibility);
    }

    #[test]
    fn invalid_env_values_are_ignored() {
        let env = map_env(&[
            (ENV_MAX_SUGGESTIONS, "0"),
            (ENV_TEMPLATE_FONT, "  "),
            (ENV_SPAWN_POSITION, "maybe"),
            (ENV_NORMALIZATION, "nfd"),
        ]);
        assert_eq!(SessionConfig::from_env_with(get_env(&env)), SessionConfig::default());
    }

    #[test]
    fn parse_bool_variants() {
        for yes in ["1", "true", "YES", " on "] {
            assert_eq!(parse_bool(yes), Some(true), "{yes}");
        }
        for no in ["0", "False", "no", "OFF"] {
            assert_eq!(parse_bool(no), Some(false), "{no}");
        }
        assert_eq!(parse_bool(""), None);
    }

    #[test]
    fn builders_chain() {
        let config = SessionConfig::default()
            .with_max_suggestions(3)
            .with_trigger(Modifiers::CTRL | Modifiers::ALT)
            .with_spawn_relative_position(false)
            .with_template_font("Meiryo")
            .with_key_options(KeyOptions::with_form(NormalizationForm::Compatibility));
        assert_eq!(config.max_suggestions, 3);
        assert!(config.trigger.contains(Modifiers::CTRL));
        assert!(!config.spawn_relative_position);
        assert_eq!(config.template_font, "Meiryo");
    }
}
