use rstest::rstest;
use session_walkthrough::config::{
    MEOW_DATA_KEY, PICKUP_ROWS, RADIO_OPTIONS, RADIO_OPTION_KEY, RELOAD_COUNT_KEY,
};
use session_walkthrough::progress::{run_with_progress, ProgressUpdate};
use session_walkthrough::session::{reload_counter, SessionHandle};
use session_walkthrough::utils::next_option;
use session_walkthrough::{
    dataset, load_pickup_data, pickups, reset_session_data, session_meow_data,
};
use std::rc::Rc;
use std::time::Duration;

/// Several render passes over one session, with a Reload in the middle.
#[test]
fn render_passes_reuse_session_data_until_reload() {
    let session = SessionHandle::new();

    let mut tables = Vec::new();
    for pass in 0..3u64 {
        let count = session.with(|s| reload_counter(s, RELOAD_COUNT_KEY));
        assert_eq!(count, pass);
        tables.push(session.with(session_meow_data));
    }
    assert!(tables.windows(2).all(|w| Rc::ptr_eq(&w[0], &w[1])));

    assert!(session.with(reset_session_data));
    assert!(session.get::<dataset::Table>(MEOW_DATA_KEY).is_none());

    let regenerated = session.with(session_meow_data);
    assert!(!Rc::ptr_eq(&tables[0], &regenerated));
    assert_eq!(session.with(|s| reload_counter(s, RELOAD_COUNT_KEY)), 3);
}

/// A widget deep in the page re-runs the page, not just itself.
#[test]
fn widget_changes_count_as_page_reruns() {
    let session = SessionHandle::new();
    let page = session.clone();
    let render_page = move || page.with(|s| reload_counter(s, RELOAD_COUNT_KEY));
    assert_eq!(render_page(), 0);

    let rerender = render_page.clone();
    session.set_rerun(move || {
        rerender();
    });

    for expected in 1..=3u64 {
        let current = session
            .get::<String>(RADIO_OPTION_KEY)
            .map_or_else(|| RADIO_OPTIONS[0].to_string(), |v| (*v).clone());
        let next = next_option(RADIO_OPTIONS, &current).unwrap();
        session.set(RADIO_OPTION_KEY, next.to_string());
        session.request_rerun();

        assert_eq!(session.get::<u64>(RELOAD_COUNT_KEY).as_deref(), Some(&expected));
    }
    assert_eq!(session.get::<String>(RADIO_OPTION_KEY).as_deref().map(String::as_str), Some("a"));
}

#[test]
fn sessions_do_not_share_slots() {
    let a = SessionHandle::new();
    let b = SessionHandle::new();
    let from_a = a.with(session_meow_data);
    let from_b = b.with(session_meow_data);
    assert!(!Rc::ptr_eq(&from_a, &from_b));
}

#[test]
fn progress_reports_strictly_increasing_steps() {
    let mut updates: Vec<ProgressUpdate> = Vec::new();
    run_with_progress(100, Duration::ZERO, |u| updates.push(u));

    assert_eq!(updates.len(), 100);
    assert!(updates.windows(2).all(|w| w[0].iteration < w[1].iteration));
    assert_eq!(updates[0].iteration, 1);
    assert!(updates[99].is_last());
    assert_eq!(updates[99].ratio(), 1.0);
}

#[test]
fn short_pause_between_steps() {
    let started = std::time::Instant::now();
    run_with_progress(3, Duration::from_millis(5), |_| {});
    assert!(started.elapsed() >= Duration::from_millis(15));
}

#[rstest]
#[case(0)]
#[case(8)]
#[case(17)]
#[case(23)]
fn bundled_pickups_filter_by_hour(#[case] hour: u32) {
    let all = load_pickup_data(PICKUP_ROWS).unwrap();
    let filtered = pickups::filter_by_hour(&all, hour).unwrap();
    assert!(filtered.iter().all(|p| u32::from(p.time.hour) == hour));
    assert_eq!(
        filtered.len() as u32,
        pickups::hourly_histogram(&all)[hour as usize]
    );
}
