//! Decides which page text a gesture points at.

use std::sync::LazyLock;

use itf_types::{NodeId, Point, Rect, TriggerIntent};
use regex::Regex;

use crate::error::TriggerError;
use crate::host::Dom;
use crate::sentence::extend_to_sentence;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z-]+$").expect("word pattern is valid"));

/// Letters and hyphens only
pub fn is_single_word(text: &str) -> bool {
    WORD_PATTERN.is_match(text)
}

/// Owns the single highlighted element.
///
/// At most one element carries the highlight class; marking a new one
/// always un-marks the previous one first.
#[derive(Debug)]
pub struct Highlighter {
    class: String,
    current: Option<NodeId>,
}

impl Highlighter {
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            current: None,
        }
    }

    pub fn current(&self) -> Option<NodeId> {
        self.current
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    pub fn is_marked<D: Dom + ?Sized>(&self, dom: &D, node: NodeId) -> bool {
        dom.has_class(node, &self.class)
    }

    pub fn mark<D: Dom + ?Sized>(&mut self, dom: &mut D, node: NodeId) {
        self.clear(dom);
        dom.add_class(node, &self.class);
        self.current = Some(node);
    }

    pub fn clear<D: Dom + ?Sized>(&mut self, dom: &mut D) {
        if let Some(node) = self.current.take() {
            dom.remove_class(node, &self.class);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoverOutcome {
    Unchanged,
    Highlighted(NodeId),
    Cleared,
}

/// Update the highlight for a pointer position.
///
/// Only leaf text containers (one child, a text node) with non-blank text
/// are eligible. The overlay's own UI and the already highlighted element
/// leave the state alone.
pub fn resolve_hover<D: Dom + ?Sized>(
    dom: &mut D,
    highlighter: &mut Highlighter,
    point: Point,
) -> HoverOutcome {
    let Some(target) = dom.element_at(point) else {
        highlighter.clear(dom);
        return HoverOutcome::Cleared;
    };

    if dom.is_overlay(target) || highlighter.is_marked(&*dom, target) {
        return HoverOutcome::Unchanged;
    }

    if !dom.has_single_text_child(target) {
        highlighter.clear(dom);
        return HoverOutcome::Cleared;
    }

    if highlighter.current() == Some(target) {
        return HoverOutcome::Unchanged;
    }

    if dom.text_content(target).trim().is_empty() {
        highlighter.clear(dom);
        return HoverOutcome::Cleared;
    }

    highlighter.mark(dom, target);
    HoverOutcome::Highlighted(target)
}

/// Source and context text for one translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerText {
    pub text: String,
    pub context: String,
}

/// Text to translate for a click on a highlighted element.
///
/// Word intent sends the parent's text as context (or the word itself when
/// the parent is blank) and rejects anything that is not a single word.
/// Sentence intent sends the element's text as both.
pub fn hover_text<D: Dom + ?Sized>(
    dom: &D,
    node: NodeId,
    intent: TriggerIntent,
) -> Result<TriggerText, TriggerError> {
    let text = dom.text_content(node).trim().to_string();
    if text.is_empty() {
        return Err(TriggerError::NoTarget);
    }

    match intent {
        TriggerIntent::Word => {
            if !is_single_word(&text) {
                return Err(TriggerError::NotAWord(text));
            }

            let context = dom
                .parent_element(node)
                .map(|parent| dom.text_content(parent).trim().to_string())
                .filter(|context| !context.is_empty())
                .unwrap_or_else(|| text.clone());

            Ok(TriggerText { text, context })
        }
        TriggerIntent::Sentence => Ok(TriggerText {
            context: text.clone(),
            text,
        }),
    }
}

/// Active selection resolved into translatable text
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionTarget {
    pub text: TriggerText,
    /// Selection bounds in page coordinates
    pub anchor: Rect,
}

pub fn selection_target<D: Dom + ?Sized>(dom: &D) -> Result<SelectionTarget, TriggerError> {
    let selection = dom.selection().ok_or(TriggerError::EmptySelection)?;

    let text = selection.text.trim();
    if selection.collapsed || text.is_empty() {
        return Err(TriggerError::EmptySelection);
    }

    let scroll = dom.scroll_offset();
    let anchor = selection.client_rect.translate(scroll.x, scroll.y);
    let context = extend_to_sentence(dom, text, selection.container);

    Ok(SelectionTarget {
        text: TriggerText {
            text: text.to_string(),
            context,
        },
        anchor,
    })
}
