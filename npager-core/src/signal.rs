use indexmap::IndexMap;
use std::cell::{Ref, RefCell};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

/// A listener that is called with the new value whenever a signal notifies.
pub type Listener<T> = Box<dyn Fn(&T)>;

/// Key a listener is registered under.
///
/// Registering twice under the same id replaces the earlier listener instead of
/// adding a second one, so setup code can run repeatedly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

impl ListenerId {
    /// Allocates a fresh, process-unique id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Simple signal implementation based on [Rc] and [RefCell] to get/set a value and notify listeners when it changes.
///
/// You can also mutate the inner value, but only in a set scope via [StateSignal::mutate].
pub struct StateSignal<T: 'static> {
    value: Rc<RefCell<T>>,
    listeners: Rc<RefCell<IndexMap<ListenerId, Rc<Listener<T>>>>>,
}

impl<T: 'static> StateSignal<T> {
    /// Creates a new signal with the given value.
    pub fn new(value: T) -> Self {
        Self {
            value: Rc::new(RefCell::new(value)),
            listeners: Rc::new(RefCell::new(IndexMap::with_capacity(1))),
        }
    }

    /// Borrows the current value.
    pub fn get(&self) -> Ref<'_, T> {
        self.value.borrow()
    }

    /// Replaces the value and notifies listeners.
    pub fn set(&self, value: T) {
        self.mutate(move |old| *old = value);
    }

    /// Replaces the value without notifying anyone.
    pub fn set_silent(&self, value: T) {
        *self.value.borrow_mut() = value;
    }

    /// Mutate the inner value in a set scope. This scope is needed in order to notify listeners.
    pub fn mutate(&self, op: impl FnOnce(&mut T)) {
        op(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Registers `listener` under `id`, replacing any listener already registered with that id.
    pub fn listen(&self, id: ListenerId, listener: Listener<T>) {
        self.listeners.borrow_mut().insert(id, Rc::new(listener));
    }

    /// Removes the listener registered under `id`. Returns whether one was registered.
    pub fn unlisten(&self, id: ListenerId) -> bool {
        self.listeners.borrow_mut().shift_remove(&id).is_some()
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Calls every listener with the current value, in registration order.
    pub fn notify(&self) {
        // Listeners may register or remove listeners while running.
        let listeners: Vec<Rc<Listener<T>>> = self.listeners.borrow().values().cloned().collect();
        let value = self.value.borrow();
        for listener in listeners {
            listener(&*value);
        }
    }
}

impl<T: 'static> Clone for StateSignal<T> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            listeners: self.listeners.clone(),
        }
    }
}
