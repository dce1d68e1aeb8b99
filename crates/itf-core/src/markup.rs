//! Markup helpers for hosts that render cards as HTML.

use itf_types::{CardBody, LineGeometry};

pub fn escape_html(unsafe_text: &str) -> String {
    let mut escaped = String::with_capacity(unsafe_text.len());
    for c in unsafe_text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Inner markup of a card's body element
pub fn body_markup(body: &CardBody) -> String {
    match body {
        CardBody::Loading => r#"<div class="itf-loading-spinner"></div>"#.to_string(),
        CardBody::Result(text) => {
            format!(r#"<div class="itf-result-text">{}</div>"#, escape_html(text))
        }
        CardBody::Error(error) => format!(
            r#"<div class="itf-error-text" title="Click to retry">Translation failed: {}</div>"#,
            escape_html(error)
        ),
    }
}

/// Inline style laying a connector element along `line`, rotated about
/// its left end
pub fn connector_style(line: &LineGeometry) -> String {
    format!(
        "left: {:.1}px; top: {:.1}px; width: {:.1}px; transform-origin: 0 50%; transform: rotate({:.2}deg);",
        line.start.x,
        line.start.y,
        line.length,
        line.angle_degrees()
    )
}
