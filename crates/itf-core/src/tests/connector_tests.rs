use std::collections::HashSet;

use itf_config::Config;
use itf_config::trigger::TriggerMode;
use itf_types::{CardId, NodeId, PageEvent, Point, Rect, TranslateRequest, TranslateResponse};

use super::fake_page::{CARD_LEFT, FakePage};
use crate::controller::TriggerController;

type Controller = TriggerController<FakePage, kanal::Sender<TranslateRequest>>;

fn setup() -> (Controller, NodeId, kanal::Receiver<TranslateRequest>) {
    let mut config = Config::default();
    config.enabled = true;
    config.trigger.mode = TriggerMode::Selection;

    let mut fake = FakePage::new();
    let paragraph = fake.element(None, "block");
    let text = fake.text(paragraph, "First one. Second sentence here. Third.");

    let (tx, rx) = kanal::unbounded();
    (TriggerController::new(&config, fake, tx), text, rx)
}

/// Select `rect` at the current scroll and press the trigger key
fn open_anchored(
    controller: &mut Controller,
    text: NodeId,
    rect: Rect,
    rx: &kanal::Receiver<TranslateRequest>,
) -> CardId {
    controller.host_mut().select("Second", text, rect);
    controller.handle(PageEvent::KeyDown { key: "t".into() });
    rx.try_recv().unwrap().unwrap().id
}

fn close(controller: &mut Controller, id: &CardId) {
    controller.handle(PageEvent::CloseClicked(id.clone()));
    for action in controller.host_mut().take_scheduled() {
        controller.handle(PageEvent::Deferred(action));
    }
}

fn assert_no_orphans(controller: &Controller) {
    let live: HashSet<&CardId> = controller.cards().iter().map(|card| &card.id).collect();
    for id in controller.connectors().ids() {
        assert!(live.contains(id), "connector {} outlived its card", id);
    }
    let rendered: HashSet<&CardId> = controller.host().connectors.keys().collect();
    let tracked: HashSet<&CardId> = controller.connectors().ids().collect();
    assert_eq!(rendered, tracked);
}

#[test]
fn start_point_stays_on_anchor_while_scrolling() {
    let (mut controller, text, rx) = setup();
    controller.host_mut().scroll = Point::new(0.0, 100.0);
    let id = open_anchored(&mut controller, text, Rect::new(100.0, 500.0, 40.0, 20.0), &rx);

    // Anchor center in page coordinates is (120, 610)
    let line = controller.host().connectors[&id].unwrap();
    assert_eq!(line.start, Point::new(120.0, 510.0));

    controller.host_mut().scroll = Point::new(15.0, 350.0);
    controller.handle(PageEvent::Scroll);

    let line = controller.host().connectors[&id].unwrap();
    assert_eq!(line.start, Point::new(105.0, 260.0));

    let card = controller.host().card(&id);
    let end = line.end();
    assert!((end.x - CARD_LEFT).abs() < 1e-6);
    assert!((end.y - (card.top + card.height / 2.0)).abs() < 1e-6);
}

#[test]
fn connector_follows_card_when_layout_changes() {
    let (mut controller, text, rx) = setup();
    let first = open_anchored(&mut controller, text, Rect::new(0.0, 0.0, 10.0, 10.0), &rx);
    let second = open_anchored(&mut controller, text, Rect::new(50.0, 50.0, 10.0, 10.0), &rx);
    let before = controller.host().connectors[&second].unwrap().end();

    controller.handle(PageEvent::TranslationResult(TranslateResponse::ok(
        first.clone(),
        "premier",
    )));
    let after_result = controller.host().connectors[&second].unwrap().end();
    assert!(after_result.y > before.y);

    close(&mut controller, &first);
    let after_close = controller.host().connectors[&second].unwrap().end();
    let card = controller.host().card(&second);
    assert_eq!(card.top, 20.0);
    assert!((after_close.y - (20.0 + card.height / 2.0)).abs() < 1e-6);
}

#[test]
fn closing_a_card_removes_its_connector() {
    let (mut controller, text, rx) = setup();
    let id = open_anchored(&mut controller, text, Rect::new(0.0, 0.0, 10.0, 10.0), &rx);
    assert!(controller.connectors().contains(&id));

    controller.handle(PageEvent::CloseClicked(id.clone()));
    assert!(controller.connectors().contains(&id));

    close(&mut controller, &id);
    assert!(!controller.connectors().contains(&id));
    assert!(controller.host().connectors.is_empty());
}

#[test]
fn no_orphan_connectors_after_mixed_sequences() {
    let (mut controller, text, rx) = setup();
    let mut open = Vec::new();

    for round in 0..6 {
        let rect = Rect::new(round as f64 * 10.0, 300.0, 30.0, 12.0);
        open.push(open_anchored(&mut controller, text, rect, &rx));
        assert_no_orphans(&controller);

        if round % 2 == 1 {
            let victim = open.remove(0);
            close(&mut controller, &victim);
            assert_no_orphans(&controller);
        }
    }

    for id in open.drain(..) {
        close(&mut controller, &id);
        assert_no_orphans(&controller);
    }

    assert!(controller.connectors().is_empty());
    assert!(controller.cards().is_empty());
}
