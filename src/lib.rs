//! Session walkthrough: session-scoped state, memoised data functions, a
//! simulated long-running task and a few small datasets, rendered by the Yew
//! front end in `main.rs`.
//!
//! Everything in this library is UI-agnostic and runs natively, so it can be
//! tested without a browser.

use log::info;
use std::rc::Rc;

pub mod cache;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod pickups;
pub mod progress;
pub mod secrets;
pub mod session;
pub mod utils;

use cache::{cache_data, try_cache_data};
use config::{MEOW_DATA_KEY, RANDOM_COLS, RANDOM_ROWS};
use dataset::Table;
use pickups::{Pickup, PickupError};
use secrets::{Secrets, SecretsError};
use session::SessionState;

/// Pickup sample shipped with the app.
pub const PICKUPS_CSV: &str = include_str!("pickups_sample.csv");
/// Secrets shipped with the app.
pub const SECRETS_JSON: &str = include_str!("secrets.json");

/// Meow table for this session, generated on first use.
pub fn session_meow_data(session: &mut SessionState) -> Rc<Table> {
    session.get_or_create(MEOW_DATA_KEY, || dataset::meow_data(&mut rand::rng()))
}

/// Forget the session's generated data so the next render builds it afresh.
pub fn reset_session_data(session: &mut SessionState) -> bool {
    let reset = session.remove(MEOW_DATA_KEY);
    if reset {
        info!("Session data reset, regenerating on next render");
    }
    reset
}

/// Fresh random array; deliberately not cached, so it changes every render.
pub fn random_array() -> Table {
    dataset::random_normal(RANDOM_ROWS, RANDOM_COLS, &mut rand::rng())
}

pub fn quadratic_demo() -> Rc<Table> {
    cache_data("quadratic_demo", (), dataset::quadratic)
}

pub fn linear_plot_demo() -> Rc<Table> {
    cache_data("linear_plot_demo", (), dataset::linear)
}

/// First `nrows` pickups of the bundled sample, memoised per row count.
pub fn load_pickup_data(nrows: usize) -> Result<Rc<Vec<Pickup>>, PickupError> {
    try_cache_data("load_pickup_data", nrows, || {
        pickups::load_pickups(PICKUPS_CSV, nrows)
    })
}

pub fn load_secrets() -> Result<Secrets, SecretsError> {
    Secrets::from_json(SECRETS_JSON)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SECRET_KEY;

    #[test]
    fn meow_data_is_stable_until_reset() {
        let mut session = SessionState::new();
        let first = session_meow_data(&mut session);
        let second = session_meow_data(&mut session);
        assert!(Rc::ptr_eq(&first, &second));

        assert!(reset_session_data(&mut session));
        let third = session_meow_data(&mut session);
        assert!(!Rc::ptr_eq(&first, &third));
        assert_eq!(third.shape(), (24, 3));
    }

    #[test]
    fn demos_are_memoised() {
        assert!(Rc::ptr_eq(&quadratic_demo(), &quadratic_demo()));
        assert!(Rc::ptr_eq(&linear_plot_demo(), &linear_plot_demo()));
    }

    #[test]
    fn bundled_pickups_load() {
        let pickups = load_pickup_data(10_000).unwrap();
        assert!(!pickups.is_empty());
        let limited = load_pickup_data(10).unwrap();
        assert_eq!(limited.len(), 10);
    }

    #[test]
    fn bundled_secret_is_present() {
        let secrets = load_secrets().unwrap();
        assert!(secrets.get(SECRET_KEY).is_ok());
    }

    #[test]
    fn random_array_has_configured_shape() {
        assert_eq!(random_array().shape(), (RANDOM_ROWS, RANDOM_COLS));
    }
}
