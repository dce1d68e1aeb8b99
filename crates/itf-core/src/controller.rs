use std::time::Duration;

use itf_config::Config;
use itf_config::trigger::{TriggerConfig, TriggerMode};
use itf_types::{
    CardBody, CardId, CardState, DeferredAction, Disposition, NodeId, PageEvent, Point, Rect,
    TranslateRequest, TranslateResponse, TriggerIntent,
};
use uuid::Uuid;

use crate::connector::ConnectorManager;
use crate::error::TriggerError;
use crate::host::Host;
use crate::layout::{CardLayout, Placement};
use crate::resolver::{self, HoverOutcome, TriggerText};
use crate::session::{Modifiers, Session};
use crate::sink::RequestSink;

/// Unique id for a card and its translation request
pub fn new_card_id() -> CardId {
    CardId::new(format!("itf-card-{}", Uuid::new_v4().simple()))
}

/// Coordinates gestures, cards, connectors and translation round-trips for
/// one page.
///
/// All state lives here; the host only forwards events and renders.
pub struct TriggerController<H, S> {
    trigger: TriggerConfig,
    exit_delay: Duration,
    session: Session,
    cards: CardLayout,
    connectors: ConnectorManager,
    host: H,
    sink: S,
}

impl<H: Host, S: RequestSink> TriggerController<H, S> {
    pub fn new(config: &Config, host: H, sink: S) -> Self {
        Self {
            trigger: config.trigger.clone(),
            exit_delay: Duration::from_millis(config.layout.exit_delay_ms),
            session: Session::new(config.enabled, &config.trigger.highlight_class),
            cards: CardLayout::new(&config.layout),
            connectors: ConnectorManager::new(),
            host,
            sink,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn cards(&self) -> &CardLayout {
        &self.cards
    }

    pub fn connectors(&self) -> &ConnectorManager {
        &self.connectors
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Single entry point for every page input
    pub fn handle(&mut self, event: PageEvent) -> Disposition {
        match event {
            PageEvent::KeyDown { key } => return self.on_key_down(&key),
            PageEvent::KeyUp { key } => self.on_key_up(&key),
            PageEvent::PointerMove(point) => self.on_pointer_move(point),
            PageEvent::Click { target } => return self.on_click(target),
            PageEvent::Scroll => self.on_scroll(),
            PageEvent::Resize => {
                self.relayout();
            }
            PageEvent::CloseClicked(id) => self.close_card(&id),
            PageEvent::RetryClicked(id) => self.retry(&id),
            PageEvent::SettingsChanged { enabled } => self.set_enabled(enabled),
            PageEvent::TranslationResult(response) => self.deliver(response),
            PageEvent::Deferred(DeferredAction::RemoveCard(id)) => self.finish_close(&id),
        }

        Disposition::Passthrough
    }

    fn on_key_down(&mut self, key: &str) -> Disposition {
        if !self.session.enabled {
            return Disposition::Passthrough;
        }

        if key == self.trigger.word_modifier {
            self.session.modifiers.word = true;
        } else if key == self.trigger.sentence_modifier {
            self.session.modifiers.sentence = true;
        } else if self.trigger.mode == TriggerMode::Selection
            && !self.session.modifiers.any()
            && key.eq_ignore_ascii_case(&self.trigger.selection_key)
        {
            return self.on_selection_trigger();
        }

        Disposition::Passthrough
    }

    fn on_key_up(&mut self, key: &str) {
        if !self.session.enabled {
            return;
        }

        if key == self.trigger.word_modifier || key == self.trigger.sentence_modifier {
            self.session.modifiers = Modifiers::default();
            self.session.highlight.clear(&mut self.host);
        }
    }

    fn on_pointer_move(&mut self, point: Point) {
        if !self.session.enabled
            || !self.session.modifiers.any()
            || self.trigger.mode != TriggerMode::Hover
        {
            return;
        }

        if let HoverOutcome::Highlighted(node) =
            resolver::resolve_hover(&mut self.host, &mut self.session.highlight, point)
        {
            tracing::trace!("Highlighted {:?}", node);
        }
    }

    fn on_click(&mut self, target: Option<NodeId>) -> Disposition {
        if !self.session.enabled || self.trigger.mode != TriggerMode::Hover {
            return Disposition::Passthrough;
        }

        let Some(intent) = self.session.modifiers.intent() else {
            return Disposition::Passthrough;
        };

        let Some(target) = target else {
            return Disposition::Passthrough;
        };

        if !self.session.highlight.is_marked(&self.host, target) {
            return Disposition::Passthrough;
        }

        match resolver::hover_text(&self.host, target, intent) {
            Ok(text) => {
                self.open_card(text, None);
                self.session.highlight.clear(&mut self.host);
            }
            Err(e) => self.report(intent, e),
        }

        Disposition::Consumed
    }

    fn on_selection_trigger(&mut self) -> Disposition {
        match resolver::selection_target(&self.host) {
            Ok(target) => {
                self.open_card(target.text, Some(target.anchor));
                self.host.clear_selection();
                Disposition::Consumed
            }
            Err(e) => {
                self.report(TriggerIntent::Sentence, e);
                Disposition::Passthrough
            }
        }
    }

    fn on_scroll(&mut self) {
        let scroll = self.host.scroll_offset();
        self.connectors.update_all(&mut self.host, scroll);
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.session.enabled = enabled;
        if !enabled {
            self.session.modifiers = Modifiers::default();
            self.session.highlight.clear(&mut self.host);
        }
        tracing::info!("Translation overlay {}", if enabled { "enabled" } else { "disabled" });
    }

    fn report(&self, intent: TriggerIntent, error: TriggerError) {
        match error {
            TriggerError::NotAWord(_) => tracing::warn!(
                "{}. {}+Click is for single words, use {}+Click for sentences",
                error,
                self.trigger.word_modifier,
                self.trigger.sentence_modifier
            ),
            _ => tracing::debug!("{:?} trigger ignored: {}", intent, error),
        }
    }

    /// Create a loading card, connect it to `anchor` if given, and send its request
    fn open_card(&mut self, text: TriggerText, anchor: Option<Rect>) -> CardId {
        let request = TranslateRequest {
            id: new_card_id(),
            text: text.text,
            context: text.context,
        };
        let id = request.id.clone();

        let view = self.cards.create(request.clone(), request.text.clone()).view();
        self.host.mount_card(&view);
        tracing::debug!("Opened card {} (order {})", id, view.order);

        if let Some(anchor) = anchor {
            self.connectors
                .create_connector(&mut self.host, id.clone(), anchor);
        }

        self.relayout();
        self.dispatch(request);
        id
    }

    fn dispatch(&mut self, request: TranslateRequest) {
        let id = request.id.clone();
        if let Err(e) = self.sink.send_request(request) {
            tracing::warn!("Failed to send translation request {}: {}", id, e);
            self.deliver(TranslateResponse::failed(id, e.to_string()));
        }
    }

    /// Apply a translation result to its card. Results for cards that are
    /// gone, closing, or no longer loading are dropped.
    fn deliver(&mut self, response: TranslateResponse) {
        let Some(card) = self.cards.get_mut(&response.id) else {
            tracing::debug!("Dropping result for unknown card {}", response.id);
            return;
        };

        if card.state != CardState::Loading {
            tracing::debug!("Dropping result for {} card {}", card.state.as_str(), card.id);
            return;
        }

        card.body = match response.into_outcome() {
            Ok(text) => CardBody::Result(text),
            Err(error) => CardBody::Error(error),
        };
        card.state = CardState::Done;

        self.host.set_card_body(&card.id, &card.body);
        self.host.set_card_state(&card.id, card.state);
        self.relayout();
    }

    /// Re-send a failed card's original request
    fn retry(&mut self, id: &CardId) {
        let Some(card) = self.cards.get_mut(id) else {
            return;
        };

        if !card.is_failed() {
            tracing::debug!("Card {} has nothing to retry", id);
            return;
        }

        card.body = CardBody::Loading;
        card.state = CardState::Loading;
        let request = card.request.clone();

        self.host.set_card_body(id, &CardBody::Loading);
        self.host.set_card_state(id, CardState::Loading);
        self.relayout();
        self.dispatch(request);
    }

    /// First phase of removal: mark closing and schedule the real removal
    fn close_card(&mut self, id: &CardId) {
        let Some(card) = self.cards.get_mut(id) else {
            return;
        };

        if card.state == CardState::Closing {
            return;
        }

        card.state = CardState::Closing;
        self.host.set_card_state(id, CardState::Closing);
        self.host
            .schedule(self.exit_delay, DeferredAction::RemoveCard(id.clone()));
    }

    /// Second phase of removal. Idempotent by id.
    fn finish_close(&mut self, id: &CardId) {
        if self.cards.remove(id).is_none() {
            return;
        }

        self.connectors.remove_connector(&mut self.host, id);
        self.host.unmount_card(id);
        self.relayout();
    }

    /// Stack every card, then move each anchored card's connector to match
    fn relayout(&mut self) -> Vec<Placement> {
        let placements = self.cards.layout_cards(&mut self.host);

        let cards = &self.cards;
        self.connectors
            .retain_live(&mut self.host, |id| cards.contains(id));

        let scroll = self.host.scroll_offset();
        for placement in &placements {
            if self.connectors.contains(&placement.id) {
                self.connectors
                    .update_connector_position(&mut self.host, &placement.id, scroll);
            }
        }

        placements
    }
}
