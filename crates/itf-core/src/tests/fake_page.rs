//! In-memory page used to drive the controller without a browser

use std::collections::{BTreeMap, HashMap, HashSet};
use std::time::Duration;

use itf_types::{
    CardBody, CardId, CardState, CardView, DeferredAction, LineGeometry, NodeId, Point, Rect,
};

use crate::host::{Dom, Selection, Surface};
use crate::markup::body_markup;

pub const CARD_LEFT: f64 = 900.0;
pub const CARD_WIDTH: f64 = 300.0;
pub const LOADING_HEIGHT: f64 = 40.0;
pub const DONE_HEIGHT: f64 = 90.0;

struct FakeNode {
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    text: Option<String>,
    display: String,
    classes: HashSet<String>,
    overlay: bool,
}

#[derive(Debug, Clone)]
pub struct FakeCard {
    pub order: u64,
    pub state: CardState,
    pub source: String,
    pub body: String,
    pub top: f64,
    pub height: f64,
}

#[derive(Default)]
pub struct FakePage {
    nodes: HashMap<NodeId, FakeNode>,
    next_node: u64,
    hits: HashMap<(i64, i64), NodeId>,
    pub selection: Option<Selection>,
    pub scroll: Point,
    pub cards: BTreeMap<CardId, FakeCard>,
    pub connectors: HashMap<CardId, Option<LineGeometry>>,
    pub scheduled: Vec<(Duration, DeferredAction)>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    fn insert(&mut self, parent: Option<NodeId>, node: FakeNode) -> NodeId {
        let id = NodeId(self.next_node);
        self.next_node += 1;
        if let Some(parent) = parent {
            self.nodes.get_mut(&parent).unwrap().children.push(id);
        }
        self.nodes.insert(id, node);
        id
    }

    pub fn element(&mut self, parent: Option<NodeId>, display: &str) -> NodeId {
        self.insert(
            parent,
            FakeNode {
                parent,
                children: Vec::new(),
                text: None,
                display: display.to_string(),
                classes: HashSet::new(),
                overlay: false,
            },
        )
    }

    pub fn text(&mut self, parent: NodeId, text: &str) -> NodeId {
        self.insert(
            Some(parent),
            FakeNode {
                parent: Some(parent),
                children: Vec::new(),
                text: Some(text.to_string()),
                display: "inline".to_string(),
                classes: HashSet::new(),
                overlay: false,
            },
        )
    }

    /// Element holding a single text node
    pub fn leaf(&mut self, parent: Option<NodeId>, display: &str, text: &str) -> NodeId {
        let element = self.element(parent, display);
        self.text(element, text);
        element
    }

    pub fn mark_overlay(&mut self, node: NodeId) {
        self.nodes.get_mut(&node).unwrap().overlay = true;
    }

    pub fn place(&mut self, point: Point, node: NodeId) {
        self.hits.insert((point.x as i64, point.y as i64), node);
    }

    pub fn select(&mut self, text: &str, container: NodeId, client_rect: Rect) {
        self.selection = Some(Selection {
            text: text.to_string(),
            collapsed: text.is_empty(),
            container: Some(container),
            client_rect,
        });
    }

    pub fn highlighted(&self, class: &str) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self
            .nodes
            .iter()
            .filter(|(_, node)| node.classes.contains(class))
            .map(|(id, _)| *id)
            .collect();
        nodes.sort_by_key(|id| id.0);
        nodes
    }

    pub fn card(&self, id: &CardId) -> &FakeCard {
        self.cards.get(id).unwrap()
    }

    pub fn set_card_height(&mut self, id: &CardId, height: f64) {
        self.cards.get_mut(id).unwrap().height = height;
    }

    /// Drain scheduled actions as if their timers fired
    pub fn take_scheduled(&mut self) -> Vec<DeferredAction> {
        self.scheduled.drain(..).map(|(_, action)| action).collect()
    }
}

impl Dom for FakePage {
    fn element_at(&self, point: Point) -> Option<NodeId> {
        self.hits.get(&(point.x as i64, point.y as i64)).copied()
    }

    fn is_overlay(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            let node = &self.nodes[&id];
            if node.overlay {
                return true;
            }
            current = node.parent;
        }
        false
    }

    fn has_class(&self, node: NodeId, class: &str) -> bool {
        self.nodes[&node].classes.contains(class)
    }

    fn add_class(&mut self, node: NodeId, class: &str) {
        self.nodes.get_mut(&node).unwrap().classes.insert(class.to_string());
    }

    fn remove_class(&mut self, node: NodeId, class: &str) {
        self.nodes.get_mut(&node).unwrap().classes.remove(class);
    }

    fn has_single_text_child(&self, node: NodeId) -> bool {
        let children = &self.nodes[&node].children;
        children.len() == 1 && self.nodes[&children[0]].text.is_some()
    }

    fn text_content(&self, node: NodeId) -> String {
        let node = &self.nodes[&node];
        match &node.text {
            Some(text) => text.clone(),
            None => node
                .children
                .iter()
                .map(|child| self.text_content(*child))
                .collect(),
        }
    }

    fn parent_element(&self, node: NodeId) -> Option<NodeId> {
        self.nodes[&node].parent
    }

    fn is_text_node(&self, node: NodeId) -> bool {
        self.nodes[&node].text.is_some()
    }

    fn computed_display(&self, node: NodeId) -> String {
        self.nodes[&node].display.clone()
    }

    fn selection(&self) -> Option<Selection> {
        self.selection.clone()
    }

    fn clear_selection(&mut self) {
        self.selection = None;
    }

    fn scroll_offset(&self) -> Point {
        self.scroll
    }
}

impl Surface for FakePage {
    fn mount_card(&mut self, card: &CardView) {
        self.cards.insert(
            card.id.clone(),
            FakeCard {
                order: card.order,
                state: card.state,
                source: card.source.clone(),
                body: body_markup(&CardBody::Loading),
                top: 0.0,
                height: LOADING_HEIGHT,
            },
        );
    }

    fn set_card_state(&mut self, id: &CardId, state: CardState) {
        if let Some(card) = self.cards.get_mut(id) {
            card.state = state;
        }
    }

    fn set_card_body(&mut self, id: &CardId, body: &CardBody) {
        if let Some(card) = self.cards.get_mut(id) {
            card.body = body_markup(body);
            card.height = match body {
                CardBody::Loading => LOADING_HEIGHT,
                _ => DONE_HEIGHT,
            };
        }
    }

    fn set_card_top(&mut self, id: &CardId, top: f64) {
        if let Some(card) = self.cards.get_mut(id) {
            card.top = top;
        }
    }

    fn card_height(&self, id: &CardId) -> f64 {
        self.cards.get(id).map_or(0.0, |card| card.height)
    }

    fn card_rect(&self, id: &CardId) -> Option<Rect> {
        self.cards
            .get(id)
            .map(|card| Rect::new(CARD_LEFT, card.top, CARD_WIDTH, card.height))
    }

    fn unmount_card(&mut self, id: &CardId) {
        self.cards.remove(id);
    }

    fn mount_connector(&mut self, id: &CardId) {
        self.connectors.insert(id.clone(), None);
    }

    fn place_connector(&mut self, id: &CardId, line: &LineGeometry) {
        if let Some(slot) = self.connectors.get_mut(id) {
            *slot = Some(*line);
        }
    }

    fn unmount_connector(&mut self, id: &CardId) {
        self.connectors.remove(id);
    }

    fn schedule(&mut self, delay: Duration, action: DeferredAction) {
        self.scheduled.push((delay, action));
    }
}
