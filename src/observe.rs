//! Single-threaded change notification: callback registries with RAII
//! subscriptions, and a value cell that notifies on change.

use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::{Rc, Weak};

type Callback<T> = Box<dyn FnMut(&T)>;

struct Registry<T> {
    next_id: u64,
    callbacks: Vec<(u64, Callback<T>)>,
    // Ids released while their callback was checked out by `emit`.
    released: HashSet<u64>,
}

impl<T> Registry<T> {
    fn release(&mut self, id: u64) {
        if let Some(pos) = self.callbacks.iter().position(|(i, _)| *i == id) {
            drop(self.callbacks.remove(pos));
        } else {
            self.released.insert(id);
        }
    }
}

pub struct Listeners<T> {
    inner: Rc<RefCell<Registry<T>>>,
}

impl<T: 'static> Listeners<T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Registry {
                next_id: 0,
                callbacks: Vec::new(),
                released: HashSet::new(),
            })),
        }
    }

    pub fn subscribe(&self, f: impl FnMut(&T) + 'static) -> Subscription {
        let id = {
            let mut reg = self.inner.borrow_mut();
            let id = reg.next_id;
            reg.next_id += 1;
            reg.callbacks.push((id, Box::new(f)));
            id
        };

        let weak: Weak<RefCell<Registry<T>>> = Rc::downgrade(&self.inner);
        Subscription {
            release: Some(Box::new(move || {
                if let Some(reg) = weak.upgrade() {
                    reg.borrow_mut().release(id);
                }
            })),
        }
    }

    /// Calls every listener in subscription order. Listeners added during the
    /// call first hear the next emit.
    pub fn emit(&self, value: &T) {
        let mut active = std::mem::take(&mut self.inner.borrow_mut().callbacks);
        for (_, cb) in active.iter_mut() {
            cb(value);
        }

        let mut reg = self.inner.borrow_mut();
        let added = std::mem::take(&mut reg.callbacks);
        let released = std::mem::take(&mut reg.released);
        active.retain(|(id, _)| !released.contains(id));
        active.extend(added);
        reg.callbacks = active;
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: 'static> Default for Listeners<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Keeps a listener registered until dropped.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    pub fn unsubscribe(mut self) {
        self.release_now();
    }

    fn release_now(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release_now();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.release.is_some())
            .finish()
    }
}

pub struct Observable<T> {
    value: T,
    listeners: Listeners<T>,
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            listeners: Listeners::new(),
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Returns true (and notifies) only when the value actually changed.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.listeners.emit(&self.value);
        true
    }

    pub fn subscribe(&self, f: impl FnMut(&T) + 'static) -> Subscription {
        self.listeners.subscribe(f)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

#[cfg(test)]
#[path = "tests/observe_tests.rs"]
mod tests;
