//! Session-scoped state for one interactive session.
//!
//! Every render pass reads and writes the same [`SessionState`], so values
//! stored here survive re-renders. Nothing is global: the UI owns one
//! [`SessionHandle`] per page load and hands it to components through a Yew
//! context.
//!
//! Slots hold `Rc<dyn Any>`. Reading a slot as a different type than the one
//! stored behaves as if the slot were empty.

use log::debug;
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Downcast a type-erased slot, cloning the `Rc` on success.
pub(crate) fn downcast_slot<T: 'static>(slot: &Rc<dyn Any>) -> Option<Rc<T>> {
    Rc::clone(slot).downcast::<T>().ok()
}

/// Key-value store scoped to a single session.
#[derive(Default)]
pub struct SessionState {
    slots: HashMap<String, Rc<dyn Any>>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the value stored under `key`, creating it with `factory` first
    /// if the slot is empty.
    ///
    /// Repeated calls return the same `Rc` until the slot is removed.
    pub fn get_or_create<T: 'static>(&mut self, key: &str, factory: impl FnOnce() -> T) -> Rc<T> {
        if let Some(existing) = self.get::<T>(key) {
            return existing;
        }
        debug!("Creating session slot '{}'", key);
        self.set(key, factory())
    }

    pub fn get<T: 'static>(&self, key: &str) -> Option<Rc<T>> {
        self.slots.get(key).and_then(downcast_slot::<T>)
    }

    /// Store `value` under `key`, replacing whatever was there.
    pub fn set<T: 'static>(&mut self, key: &str, value: T) -> Rc<T> {
        let rc = Rc::new(value);
        self.slots
            .insert(key.to_string(), Rc::clone(&rc) as Rc<dyn Any>);
        rc
    }

    /// Read-modify-write a slot. An empty slot starts from `default()`.
    pub fn update<T: Clone + 'static>(
        &mut self,
        key: &str,
        default: impl FnOnce() -> T,
        f: impl FnOnce(&mut T),
    ) -> Rc<T> {
        let mut value = match self.get::<T>(key) {
            Some(current) => (*current).clone(),
            None => default(),
        };
        f(&mut value);
        self.set(key, value)
    }

    /// Drop a slot so the next `get_or_create` regenerates it.
    pub fn remove(&mut self, key: &str) -> bool {
        let removed = self.slots.remove(key).is_some();
        if removed {
            debug!("Reset session slot '{}'", key);
        }
        removed
    }

    pub fn contains(&self, key: &str) -> bool {
        self.slots.contains_key(key)
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Slot keys in sorted order.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.slots.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }
}

/// Shared handle to a session, cheap to clone into callbacks.
///
/// Two handles are equal only when they point at the same session.
#[derive(Clone, Default)]
pub struct SessionHandle {
    state: Rc<RefCell<SessionState>>,
    rerun: Rc<RefCell<Option<Rc<dyn Fn()>>>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `f` with mutable access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut SessionState) -> R) -> R {
        f(&mut self.state.borrow_mut())
    }

    /// Like [`SessionState::get_or_create`], but the factory runs with no
    /// borrow held so it may read the session itself.
    pub fn get_or_create<T: 'static>(&self, key: &str, factory: impl FnOnce() -> T) -> Rc<T> {
        if let Some(existing) = self.get::<T>(key) {
            return existing;
        }
        let value = factory();
        self.with(|s| s.get_or_create(key, || value))
    }

    pub fn get<T: 'static>(&self, key: &str) -> Option<Rc<T>> {
        self.state.borrow().get(key)
    }

    pub fn set<T: 'static>(&self, key: &str, value: T) -> Rc<T> {
        self.with(|s| s.set(key, value))
    }

    pub fn remove(&self, key: &str) -> bool {
        self.with(|s| s.remove(key))
    }

    /// Install what re-runs the whole page, replacing any earlier one.
    pub fn set_rerun(&self, rerun: impl Fn() + 'static) {
        *self.rerun.borrow_mut() = Some(Rc::new(rerun));
    }

    /// Ask for a full re-run of the page after a widget changed.
    /// Does nothing until a re-run has been installed.
    pub fn request_rerun(&self) {
        let rerun = self.rerun.borrow().clone();
        if let Some(rerun) = rerun {
            debug!("Re-run requested");
            rerun();
        }
    }
}

impl PartialEq for SessionHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.state, &other.state)
    }
}

/// Count render passes in the session: 0 on the first pass, then +1 for
/// every pass after it.
pub fn reload_counter(session: &mut SessionState, key: &str) -> u64 {
    let count = match session.get::<u64>(key) {
        None => 0,
        Some(previous) => *previous + 1,
    };
    session.set(key, count);
    count
}
