//! Card set and vertical stacking.

use std::collections::{BTreeMap, HashMap};

use itf_config::layout::LayoutConfig;
use itf_types::{CardBody, CardId, CardState, CardView, TranslateRequest};

use crate::host::Surface;

/// A floating translation card
#[derive(Debug, Clone)]
pub struct Card {
    pub id: CardId,
    /// Creation order; the only stacking key
    pub ordinal: u64,
    pub state: CardState,
    pub body: CardBody,
    pub source: String,
    /// Request to repeat on retry
    pub request: TranslateRequest,
}

impl Card {
    pub fn view(&self) -> CardView {
        CardView {
            id: self.id.clone(),
            order: self.ordinal,
            state: self.state,
            source: self.source.clone(),
        }
    }

    pub fn is_failed(&self) -> bool {
        self.state == CardState::Done && self.body.is_error()
    }
}

/// Where one card ended up after a layout pass
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    pub id: CardId,
    pub top: f64,
    pub height: f64,
}

/// Stack cards top to bottom in the given order, `gap` apart
pub fn stack<I>(heights: I, top_offset: f64, gap: f64) -> Vec<Placement>
where
    I: IntoIterator<Item = (CardId, f64)>,
{
    let mut top = top_offset;
    heights
        .into_iter()
        .map(|(id, height)| {
            let placement = Placement { id, top, height };
            top += height + gap;
            placement
        })
        .collect()
}

/// Owns every live card, including ones playing their exit transition
#[derive(Debug)]
pub struct CardLayout {
    cards: BTreeMap<u64, Card>,
    ordinals: HashMap<CardId, u64>,
    next_ordinal: u64,
    top_offset: f64,
    gap: f64,
}

impl CardLayout {
    pub fn new(config: &LayoutConfig) -> Self {
        Self {
            cards: BTreeMap::new(),
            ordinals: HashMap::new(),
            next_ordinal: 0,
            top_offset: config.top_offset,
            gap: config.gap,
        }
    }

    /// Add a loading card for `request`
    pub fn create(&mut self, request: TranslateRequest, source: String) -> &Card {
        let ordinal = self.next_ordinal;
        self.next_ordinal += 1;

        let card = Card {
            id: request.id.clone(),
            ordinal,
            state: CardState::Loading,
            body: CardBody::Loading,
            source,
            request,
        };

        self.ordinals.insert(card.id.clone(), ordinal);
        self.cards.entry(ordinal).or_insert(card)
    }

    pub fn get(&self, id: &CardId) -> Option<&Card> {
        self.ordinals.get(id).and_then(|ordinal| self.cards.get(ordinal))
    }

    pub fn get_mut(&mut self, id: &CardId) -> Option<&mut Card> {
        self.ordinals
            .get(id)
            .and_then(|ordinal| self.cards.get_mut(ordinal))
    }

    pub fn contains(&self, id: &CardId) -> bool {
        self.ordinals.contains_key(id)
    }

    /// Remove by id; `None` if it is already gone
    pub fn remove(&mut self, id: &CardId) -> Option<Card> {
        let ordinal = self.ordinals.remove(id)?;
        self.cards.remove(&ordinal)
    }

    /// Cards in creation order
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.values()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Recompute and apply the top of every card from its rendered height
    pub fn layout_cards<S: Surface + ?Sized>(&self, surface: &mut S) -> Vec<Placement> {
        let heights: Vec<(CardId, f64)> = self
            .cards
            .values()
            .map(|card| (card.id.clone(), surface.card_height(&card.id)))
            .collect();

        let placements = stack(heights, self.top_offset, self.gap);
        for placement in &placements {
            surface.set_card_top(&placement.id, placement.top);
        }

        placements
    }
}
