//! Full lifecycle of the overview (dashboard) view: mount, first cycle,
//! interval ticks, partial failure, idempotent re-registration, unmount.

use chainpulse::{config::Config, prelude::*, transport::FetchError};
use chainpulse_testkit::{ManualTimerDriver, ScriptedTransport, builders};
use std::rc::Rc;

const RESOURCES_URL: &str = "/api/analytics/stats/resources";
const TRANSACTIONS_URL: &str = "/api/analytics/stats/transactions";
const INTENTS_URL: &str = "/api/analytics/stats/intents";
const NETWORK_URL: &str = "/api/analytics/stats/network?hours=24";

fn init_config() {
    let _ = Config::init_default();
}

fn script_healthy_cycle(transport: &ScriptedTransport) {
    transport.respond(
        RESOURCES_URL,
        builders::resource_stats(&[("token", 30), ("nft", 12)]),
    );
    transport.respond(
        TRANSACTIONS_URL,
        builders::transaction_stats(&[("2026-08-29", 40), ("2026-08-30", 60)]),
    );
    transport.respond(INTENTS_URL, builders::intent_stats(&[("pending", 7)]));
    transport.respond(
        NETWORK_URL,
        builders::network_stats(vec![
            builders::network_sample(0, 10.0, 1040),
            builders::network_sample(1, 20.0, 1049),
        ]),
    );
}

#[test]
fn first_cycle_commits_and_derives_cards() {
    init_config();

    let driver = Rc::new(ManualTimerDriver::new());
    let transport = Rc::new(ScriptedTransport::new());
    script_healthy_cycle(&transport);

    let view = OverviewView::mount(transport.clone(), driver.clone()).unwrap();
    assert!(view.snapshot().is_loading());

    // the immediate first cycle is queued at mount time
    driver.run_one_shots();

    let cards = view.cards();
    assert_eq!(cards.total_resources, 42);
    assert_eq!(cards.total_transactions, 100);
    assert_eq!(cards.total_intents, 7);
    assert_eq!(cards.current_block, Some(1049));

    // first cycle completion armed the recurring interval
    assert_eq!(driver.active_intervals(), 1);
    assert_eq!(transport.request_count(RESOURCES_URL), 1);
}

#[test]
fn failing_endpoint_degrades_to_stale_without_touching_siblings() {
    init_config();

    let driver = Rc::new(ManualTimerDriver::new());
    let transport = Rc::new(ScriptedTransport::new());
    script_healthy_cycle(&transport);

    let view = OverviewView::mount(transport.clone(), driver.clone()).unwrap();
    driver.run_one_shots();

    // second cycle: resources endpoint fails, network moves forward
    transport.fail(RESOURCES_URL, FetchError::Http(503));
    transport.respond(TRANSACTIONS_URL, builders::transaction_stats(&[("2026-08-30", 61)]));
    transport.respond(INTENTS_URL, builders::intent_stats(&[("pending", 8)]));
    transport.respond(
        NETWORK_URL,
        builders::network_stats(vec![builders::network_sample(2, 15.0, 1055)]),
    );

    driver.fire_intervals();

    let snapshot = view.snapshot();
    // stale payload retained for the failed endpoint
    assert_eq!(view.cards().total_resources, 42);
    assert!(snapshot.resources.error().is_some());
    // siblings committed their fresh results
    assert_eq!(view.cards().total_intents, 8);
    assert_eq!(view.cards().current_block, Some(1055));
}

#[test]
fn a_failed_tick_does_not_stop_the_cadence() {
    init_config();

    let driver = Rc::new(ManualTimerDriver::new());
    let transport = Rc::new(ScriptedTransport::new());
    script_healthy_cycle(&transport);

    let view = OverviewView::mount(transport.clone(), driver.clone()).unwrap();
    driver.run_one_shots();

    // every endpoint fails on the next tick; nothing is scripted
    driver.fire_intervals();
    assert_eq!(view.cards().total_resources, 42);

    // the cadence is still armed and the tick after that recovers
    assert_eq!(driver.active_intervals(), 1);
    script_healthy_cycle(&transport);
    driver.fire_intervals();
    assert!(view.snapshot().resources.error().is_none());
}

#[test]
fn re_registration_never_stacks_a_second_timer() {
    init_config();

    let driver = Rc::new(ManualTimerDriver::new());
    let transport = Rc::new(ScriptedTransport::new());
    script_healthy_cycle(&transport);

    let view = OverviewView::mount(transport.clone(), driver.clone()).unwrap();
    driver.run_one_shots();

    // a view re-render calling start again must be a no-op
    let started = view.session().scheduler().start(|| async {});
    assert!(!started);
    assert_eq!(driver.active_intervals(), 1);
}

#[test]
fn unmount_stops_polling() {
    init_config();

    let driver = Rc::new(ManualTimerDriver::new());
    let transport = Rc::new(ScriptedTransport::new());
    script_healthy_cycle(&transport);

    let view = OverviewView::mount(transport.clone(), driver.clone()).unwrap();
    driver.run_one_shots();

    view.unmount();

    assert_eq!(driver.active_intervals(), 0);
    assert_eq!(driver.fire_intervals(), 0);
    // the committed snapshot is untouched by teardown
    assert_eq!(view.cards().total_resources, 42);
}

#[test]
fn configured_interval_reaches_the_scheduler() {
    let _ = Config::init_from_toml("poll_interval_secs = 10");

    let driver = Rc::new(ManualTimerDriver::new());
    let transport = Rc::new(ScriptedTransport::new());
    script_healthy_cycle(&transport);

    let view = OverviewView::mount(transport, driver.clone()).unwrap();
    driver.run_one_shots();

    assert_eq!(
        driver.sole_interval(),
        Some(std::time::Duration::from_secs(10))
    );
    assert_eq!(
        view.session().scheduler().interval(),
        std::time::Duration::from_secs(10)
    );
}
