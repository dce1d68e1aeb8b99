//! Lines tying selection-anchored cards to their source text.

use std::collections::HashMap;

use itf_types::{CardId, LineGeometry, Point, Rect};

use crate::host::Surface;

#[derive(Debug, Clone, PartialEq)]
pub struct Connector {
    pub card_id: CardId,
    /// Page-coordinate bounds of the original selection, fixed at creation
    pub anchor: Rect,
}

/// Line from the anchor's center (moved into the viewport by `scroll`) to
/// the middle of the card's left edge
pub fn connector_line(anchor: Rect, scroll: Point, card_rect: Rect) -> LineGeometry {
    let center = anchor.center();
    let start = Point::new(center.x - scroll.x, center.y - scroll.y);
    LineGeometry::between(start, card_rect.left_center())
}

/// Connectors keyed by the card they belong to
#[derive(Debug, Default)]
pub struct ConnectorManager {
    connectors: HashMap<CardId, Connector>,
}

impl ConnectorManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_connector<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        card_id: CardId,
        anchor: Rect,
    ) {
        if self.connectors.contains_key(&card_id) {
            tracing::debug!("Connector for {} already exists", card_id);
            return;
        }

        surface.mount_connector(&card_id);
        self.connectors
            .insert(card_id.clone(), Connector { card_id, anchor });
    }

    /// Recompute one connector from scratch.
    ///
    /// A connector whose card has no rendered box is garbage and is removed.
    pub fn update_connector_position<S: Surface + ?Sized>(
        &mut self,
        surface: &mut S,
        card_id: &CardId,
        scroll: Point,
    ) {
        let Some(connector) = self.connectors.get(card_id) else {
            return;
        };

        match surface.card_rect(card_id) {
            Some(card_rect) => {
                let line = connector_line(connector.anchor, scroll, card_rect);
                surface.place_connector(card_id, &line);
            }
            None => {
                tracing::debug!("Card {} is gone, dropping its connector", card_id);
                self.remove_connector(surface, card_id);
            }
        }
    }

    pub fn update_all<S: Surface + ?Sized>(&mut self, surface: &mut S, scroll: Point) {
        let ids: Vec<CardId> = self.connectors.keys().cloned().collect();
        for id in &ids {
            self.update_connector_position(surface, id, scroll);
        }
    }

    /// Idempotent
    pub fn remove_connector<S: Surface + ?Sized>(&mut self, surface: &mut S, card_id: &CardId) -> bool {
        if self.connectors.remove(card_id).is_some() {
            surface.unmount_connector(card_id);
            true
        } else {
            false
        }
    }

    /// Drop every connector whose card fails `is_live`
    pub fn retain_live<S, F>(&mut self, surface: &mut S, is_live: F)
    where
        S: Surface + ?Sized,
        F: Fn(&CardId) -> bool,
    {
        let garbage: Vec<CardId> = self
            .connectors
            .keys()
            .filter(|id| !is_live(id))
            .cloned()
            .collect();

        for id in &garbage {
            self.remove_connector(surface, id);
        }
    }

    pub fn get(&self, card_id: &CardId) -> Option<&Connector> {
        self.connectors.get(card_id)
    }

    pub fn contains(&self, card_id: &CardId) -> bool {
        self.connectors.contains_key(card_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &CardId> {
        self.connectors.keys()
    }

    pub fn len(&self) -> usize {
        self.connectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connectors.is_empty()
    }
}
