use serde::{Deserialize, Serialize};

/// Which gesture family the page listens to. Fixed for the lifetime of a session.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TriggerMode {
    /// Modifier + pointer hover highlights, modifier + click translates
    Hover,
    /// A single key translates the current text selection
    Selection,
}

fn default_mode() -> TriggerMode {
    TriggerMode::Hover
}

fn default_word_modifier() -> String {
    "Control".to_string()
}

fn default_sentence_modifier() -> String {
    "Alt".to_string()
}

fn default_selection_key() -> String {
    "t".to_string()
}

fn default_highlight_class() -> String {
    "itf-highlight".to_string()
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct TriggerConfig {
    #[serde(default = "default_mode")]
    pub mode: TriggerMode,
    /// Key name (as reported by the host) of the word-scope modifier
    #[serde(default = "default_word_modifier")]
    pub word_modifier: String,
    #[serde(default = "default_sentence_modifier")]
    pub sentence_modifier: String,
    /// Key that translates the selection in selection mode, matched case-insensitively
    #[serde(default = "default_selection_key")]
    pub selection_key: String,
    #[serde(default = "default_highlight_class")]
    pub highlight_class: String,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            mode: default_mode(),
            word_modifier: default_word_modifier(),
            sentence_modifier: default_sentence_modifier(),
            selection_key: default_selection_key(),
            highlight_class: default_highlight_class(),
        }
    }
}
