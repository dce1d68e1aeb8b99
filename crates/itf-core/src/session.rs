use itf_types::TriggerIntent;

use crate::resolver::Highlighter;

/// Modifier keys currently held
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Modifiers {
    pub word: bool,
    pub sentence: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.word || self.sentence
    }

    /// Word scope wins when both are held
    pub fn intent(&self) -> Option<TriggerIntent> {
        if self.word {
            Some(TriggerIntent::Word)
        } else if self.sentence {
            Some(TriggerIntent::Sentence)
        } else {
            None
        }
    }
}

/// Mutable per-page state shared by all event handlers
#[derive(Debug)]
pub struct Session {
    pub enabled: bool,
    pub modifiers: Modifiers,
    pub highlight: Highlighter,
}

impl Session {
    pub fn new(enabled: bool, highlight_class: &str) -> Self {
        Self {
            enabled,
            modifiers: Modifiers::default(),
            highlight: Highlighter::new(highlight_class),
        }
    }
}
