//! Sentence context around a selection.
//!
//! Boundaries come from a punctuation heuristic: a sentence starts after
//! `.`, `?` or `!` followed by a space and ends at the next terminator.
//! Results are deterministic, not linguistically correct.

use itf_types::NodeId;

use crate::host::Dom;

fn is_terminator(byte: u8) -> bool {
    matches!(byte, b'.' | b'?' | b'!')
}

/// Sentence containing `selection_text` inside the nearest block ancestor of
/// `container`. Falls back to the trimmed selection whenever the heuristic
/// cannot find it.
pub fn extend_to_sentence<D: Dom + ?Sized>(
    dom: &D,
    selection_text: &str,
    container: Option<NodeId>,
) -> String {
    let selection_text = selection_text.trim();

    let Some(block) = container.and_then(|node| block_ancestor(dom, node)) else {
        return selection_text.to_string();
    };

    let all_text = dom.text_content(block);
    if all_text.is_empty() {
        return selection_text.to_string();
    }

    sentence_around(&all_text, selection_text).unwrap_or_else(|| selection_text.to_string())
}

/// Nearest element whose computed display is not inline, starting at the
/// node itself (or its parent element for text nodes)
pub fn block_ancestor<D: Dom + ?Sized>(dom: &D, node: NodeId) -> Option<NodeId> {
    let mut current = if dom.is_text_node(node) {
        dom.parent_element(node)
    } else {
        Some(node)
    };

    while let Some(element) = current {
        if !dom.computed_display(element).starts_with("inline") {
            return Some(element);
        }
        current = dom.parent_element(element);
    }

    None
}

/// Sentence of `text` around the first occurrence of `selection`.
///
/// `None` when the selection does not occur verbatim or the sentence trims
/// to nothing.
pub fn sentence_around(text: &str, selection: &str) -> Option<String> {
    let selection_start = text.find(selection)?;
    let selection_end = selection_start + selection.len();
    let bytes = text.as_bytes();

    // Terminators and the space are ASCII, so these offsets are char boundaries.
    let start = (1..=selection_start)
        .rev()
        .find(|&i| is_terminator(bytes[i]) && bytes.get(i + 1) == Some(&b' '))
        .map_or(0, |i| i + 2);

    let end = (selection_end..bytes.len())
        .find(|&i| is_terminator(bytes[i]))
        .map_or(bytes.len(), |i| i + 1);

    let sentence = text.get(start..end)?.trim();
    if sentence.is_empty() {
        None
    } else {
        Some(sentence.to_string())
    }
}
