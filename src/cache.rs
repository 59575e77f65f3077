//! Thread-local memo cache for data-producing functions.
//!
//! Unlike [`crate::session`], this cache is shared by every render pass in
//! the process and is only emptied by [`clear_data_cache`]. Entries are keyed
//! by a function name plus a hash of the arguments the function was called
//! with, so `load(10)` and `load(20)` occupy different entries.
//!
//! # Cache Key Structure
//! - `&'static str`: name of the memoised function
//! - `u64`: hash of its arguments

use crate::session::downcast_slot;
use log::debug;
use std::any::Any;
use std::cell::RefCell;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Cache key: (function name, argument hash)
pub type CacheKey = (&'static str, u64);

thread_local! {
    /// Memoised values that survive component lifetimes.
    /// Thread-local since the app runs on a single thread.
    static DATA_CACHE: RefCell<HashMap<CacheKey, Rc<dyn Any>>> =
        RefCell::new(HashMap::with_capacity(16));
}

fn cache_key(name: &'static str, args: &impl Hash) -> CacheKey {
    let mut hasher = DefaultHasher::new();
    args.hash(&mut hasher);
    (name, hasher.finish())
}

/// Return the memoised result of `factory` for `(name, args)`, computing it on
/// the first call.
///
/// A stored value of a different type under the same key is recomputed and
/// overwritten.
pub fn cache_data<A: Hash, T: 'static>(
    name: &'static str,
    args: A,
    factory: impl FnOnce() -> T,
) -> Rc<T> {
    let key = cache_key(name, &args);

    let hit = DATA_CACHE.with(|c| c.borrow().get(&key).and_then(downcast_slot::<T>));
    if let Some(value) = hit {
        debug!("Data cache hit for '{}'", name);
        return value;
    }

    debug!("Data cache miss for '{}', computing", name);
    // The factory runs outside the borrow so it may itself use the cache.
    let value = Rc::new(factory());
    DATA_CACHE.with(|c| {
        c.borrow_mut()
            .insert(key, Rc::clone(&value) as Rc<dyn Any>);
    });
    value
}

/// Like [`cache_data`] for fallible factories. Only `Ok` values are stored,
/// so a failed call is retried on the next render.
pub fn try_cache_data<A: Hash, T: 'static, E>(
    name: &'static str,
    args: A,
    factory: impl FnOnce() -> Result<T, E>,
) -> Result<Rc<T>, E> {
    let key = cache_key(name, &args);
    if let Some(value) = DATA_CACHE.with(|c| c.borrow().get(&key).and_then(downcast_slot::<T>)) {
        debug!("Data cache hit for '{}'", name);
        return Ok(value);
    }

    debug!("Data cache miss for '{}', computing", name);
    let value = Rc::new(factory()?);
    DATA_CACHE.with(|c| {
        c.borrow_mut()
            .insert(key, Rc::clone(&value) as Rc<dyn Any>);
    });
    Ok(value)
}

pub fn is_cached<A: Hash>(name: &'static str, args: A) -> bool {
    let key = cache_key(name, &args);
    DATA_CACHE.with(|c| c.borrow().contains_key(&key))
}

pub fn data_cache_len() -> usize {
    DATA_CACHE.with(|c| c.borrow().len())
}

pub fn clear_data_cache() {
    DATA_CACHE.with(|c| c.borrow_mut().clear());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    // Each test runs on its own thread, so the thread-local cache starts empty.

    thread_local! {
        static CAPTURED: RefCell<Vec<String>> = const { RefCell::new(Vec::new()) };
    }

    /// Collects log lines per thread so parallel tests don't see each other.
    struct CaptureLog;

    impl log::Log for CaptureLog {
        fn enabled(&self, _: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            CAPTURED.with(|c| c.borrow_mut().push(record.args().to_string()));
        }

        fn flush(&self) {}
    }

    static LOGGER: CaptureLog = CaptureLog;

    fn captured_logs() -> Vec<String> {
        CAPTURED.with(|c| c.borrow().clone())
    }

    #[test]
    fn memoises_per_argument() {
        let calls = Cell::new(0);
        let compute = |n: usize| {
            cache_data("squares", n, || {
                calls.set(calls.get() + 1);
                n * n
            })
        };

        assert_eq!(*compute(3), 9);
        assert_eq!(*compute(3), 9);
        assert_eq!(*compute(4), 16);
        assert_eq!(calls.get(), 2);
        assert_eq!(data_cache_len(), 2);
    }

    #[test]
    fn hit_returns_same_rc() {
        let a = cache_data("table", (), || vec![1.0, 2.0]);
        let b = cache_data("table", (), || vec![5.0]);
        assert!(Rc::ptr_eq(&a, &b));
        assert!(is_cached("table", ()));
    }

    #[test]
    fn clear_forces_recompute() {
        let a = cache_data("value", 1u8, || String::from("first"));
        clear_data_cache();
        assert!(!is_cached("value", 1u8));
        let b = cache_data("value", 1u8, || String::from("second"));
        assert!(!Rc::ptr_eq(&a, &b));
        assert_eq!(*b, "second");
    }

    #[test]
    fn failures_are_not_cached() {
        let failed: Result<Rc<u32>, &str> = try_cache_data("flaky", 5u32, || Err("offline"));
        assert_eq!(failed, Err("offline"));
        assert!(!is_cached("flaky", 5u32));

        let ok: Result<Rc<u32>, &str> = try_cache_data("flaky", 5u32, || Ok(10));
        let again: Result<Rc<u32>, &str> = try_cache_data("flaky", 5u32, || Err("unused"));
        assert!(Rc::ptr_eq(&ok.unwrap(), &again.unwrap()));
    }

    #[test]
    fn type_mismatch_recomputes() {
        cache_data("mixed", 0u8, || 1u32);
        let s = cache_data("mixed", 0u8, || String::from("now a string"));
        assert_eq!(*s, "now a string");
        assert_eq!(data_cache_len(), 1);
    }

    #[test]
    fn fallible_loads_log_like_infallible_ones() {
        // Ignore the error when a logger is already installed.
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Debug);

        let first: Result<Rc<u8>, ()> = try_cache_data("logged", (), || Ok(1));
        let second: Result<Rc<u8>, ()> = try_cache_data("logged", (), || Ok(2));
        assert_eq!(first.map(|v| *v), Ok(1));
        assert_eq!(second.map(|v| *v), Ok(1));
        assert_eq!(
            captured_logs(),
            vec![
                "Data cache miss for 'logged', computing".to_string(),
                "Data cache hit for 'logged'".to_string(),
            ]
        );
    }
}
