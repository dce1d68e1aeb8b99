use std::time::Duration;

use itf_types::{CardBody, CardId, CardState, CardView, DeferredAction, LineGeometry, NodeId, Point, Rect};

/// Snapshot of the page's active text selection
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub text: String,
    pub collapsed: bool,
    /// Common ancestor of the selected range, text node or element
    pub container: Option<NodeId>,
    /// Bounding box of the range in viewport coordinates
    pub client_rect: Rect,
}

/// Read and mark the page the overlay lives on
pub trait Dom {
    /// Topmost element at a viewport point
    fn element_at(&self, point: Point) -> Option<NodeId>;

    /// Whether the node is part of the overlay's own UI (a card or inside one)
    fn is_overlay(&self, node: NodeId) -> bool;

    fn has_class(&self, node: NodeId, class: &str) -> bool;

    fn add_class(&mut self, node: NodeId, class: &str);

    fn remove_class(&mut self, node: NodeId, class: &str);

    /// Element has exactly one child and that child is a text node
    fn has_single_text_child(&self, node: NodeId) -> bool;

    /// Concatenated text of the node and its descendants, untrimmed
    fn text_content(&self, node: NodeId) -> String;

    fn parent_element(&self, node: NodeId) -> Option<NodeId>;

    fn is_text_node(&self, node: NodeId) -> bool;

    /// Computed CSS `display` value
    fn computed_display(&self, node: NodeId) -> String;

    fn selection(&self) -> Option<Selection>;

    fn clear_selection(&mut self);

    /// Current horizontal and vertical scroll of the page
    fn scroll_offset(&self) -> Point;
}

/// Render cards and connectors, and run deferred work
pub trait Surface {
    fn mount_card(&mut self, card: &CardView);

    fn set_card_state(&mut self, id: &CardId, state: CardState);

    fn set_card_body(&mut self, id: &CardId, body: &CardBody);

    fn set_card_top(&mut self, id: &CardId, top: f64);

    /// Rendered height of a mounted card
    fn card_height(&self, id: &CardId) -> f64;

    /// Bounding box of a mounted card in viewport coordinates
    fn card_rect(&self, id: &CardId) -> Option<Rect>;

    fn unmount_card(&mut self, id: &CardId);

    fn mount_connector(&mut self, id: &CardId);

    fn place_connector(&mut self, id: &CardId, line: &LineGeometry);

    fn unmount_connector(&mut self, id: &CardId);

    /// Feed `action` back as `PageEvent::Deferred` once `delay` has passed
    fn schedule(&mut self, delay: Duration, action: DeferredAction);
}

/// A full host: page access plus overlay rendering
pub trait Host: Dom + Surface {}

impl<T: Dom + Surface> Host for T {}
