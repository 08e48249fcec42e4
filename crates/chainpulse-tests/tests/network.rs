//! The network statistics page: week-long window, headline and series
//! summaries, stale retention across a failed tick.

use chainpulse::{config::Config, prelude::*, transport::FetchError};
use chainpulse_testkit::{ManualTimerDriver, ScriptedTransport, builders};
use std::rc::Rc;

const NETWORK_URL: &str = "/api/analytics/stats/network?hours=168";

fn init_config() {
    let _ = Config::init_default();
}

#[test]
fn page_polls_the_week_window_and_derives_the_headline() {
    init_config();

    let driver = Rc::new(ManualTimerDriver::new());
    let transport = Rc::new(ScriptedTransport::new());
    transport.respond(
        NETWORK_URL,
        builders::network_stats(vec![
            builders::network_sample(0, 10.0, 3000),
            builders::network_sample(1, 20.0, 3010),
            builders::network_sample(2, 5.0, 3020),
        ]),
    );

    let view = NetworkView::mount(transport.clone(), driver.clone()).unwrap();
    driver.run_one_shots();

    // the page window, not the overview's 24h one
    assert_eq!(transport.requests(), vec![NETWORK_URL.to_string()]);

    let headline = view.headline().unwrap();
    assert_eq!(headline.tps, 5.0);
    assert!((view.tps_average() - 11.666_666).abs() < 1e-4);
    assert_eq!(view.tps_peak(), 20.0);
    assert_eq!(driver.active_intervals(), 1);
}

#[test]
fn failed_tick_keeps_the_previous_series() {
    init_config();

    let driver = Rc::new(ManualTimerDriver::new());
    let transport = Rc::new(ScriptedTransport::new());
    transport.respond(
        NETWORK_URL,
        builders::network_stats(vec![builders::network_sample(0, 10.0, 3000)]),
    );

    let view = NetworkView::mount(transport.clone(), driver.clone()).unwrap();
    driver.run_one_shots();

    transport.fail(NETWORK_URL, FetchError::Http(503));
    driver.fire_intervals();

    let series = view.series();
    assert_eq!(series.latest().map(Vec::len), Some(1));
    assert_eq!(series.error(), Some(&FetchError::Http(503)));
    assert!(view.headline().is_some());
}

#[test]
fn empty_window_has_no_headline() {
    init_config();

    let driver = Rc::new(ManualTimerDriver::new());
    let transport = Rc::new(ScriptedTransport::new());
    transport.respond(NETWORK_URL, builders::network_stats(vec![]));

    let view = NetworkView::mount(transport.clone(), driver.clone()).unwrap();
    driver.run_one_shots();

    assert!(view.headline().is_none());
    assert_eq!(view.tps_average(), 0.0);
    assert_eq!(view.tps_peak(), 0.0);
}
