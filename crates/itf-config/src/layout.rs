use serde::{Deserialize, Serialize};

fn default_top_offset() -> f64 {
    20.0
}

fn default_gap() -> f64 {
    20.0
}

fn default_exit_delay_ms() -> u64 {
    300
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Top of the first card, in pixels from the viewport top
    #[serde(default = "default_top_offset")]
    pub top_offset: f64,
    /// Vertical space between stacked cards
    #[serde(default = "default_gap")]
    pub gap: f64,
    /// Time a closing card stays in place for its exit styling
    #[serde(default = "default_exit_delay_ms")]
    pub exit_delay_ms: u64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            top_offset: default_top_offset(),
            gap: default_gap(),
            exit_delay_ms: default_exit_delay_ms(),
        }
    }
}
