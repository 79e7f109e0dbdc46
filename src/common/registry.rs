use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

type Callback<T> = Box<dyn FnMut(&T) + Send>;

struct Slot<T> {
    active: Arc<AtomicBool>,
    callback: Mutex<Callback<T>>,
}

/// Ordered list of subscriber callbacks.
///
/// Callbacks are invoked in insertion order. The list lock is never held
/// while a callback runs, so a callback may subscribe or unsubscribe
/// (itself included) without deadlocking.
pub(crate) struct Registry<T> {
    slots: Arc<Mutex<Vec<Arc<Slot<T>>>>>,
}

impl<T: 'static> Registry<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Append a callback and return its cancellation handle.
    pub(crate) fn add(&self, callback: impl FnMut(&T) + Send + 'static) -> Subscription {
        let active = Arc::new(AtomicBool::new(true));
        let slot = Arc::new(Slot {
            active: Arc::clone(&active),
            callback: Mutex::new(Box::new(callback) as Callback<T>),
        });

        if let Ok(mut slots) = self.slots.lock() {
            slots.push(slot);
        }

        let list = Arc::downgrade(&self.slots);
        let id = Arc::clone(&active);
        Subscription::new(active, move || {
            if let Some(slots) = Weak::upgrade(&list)
                && let Ok(mut slots) = slots.lock()
            {
                slots.retain(|slot| !Arc::ptr_eq(&slot.active, &id));
            }
        })
    }

    /// Invoke every active callback with `value`, in insertion order.
    ///
    /// Works on a snapshot of the list: callbacks added during delivery do
    /// not see the current value, and each slot's active flag is rechecked
    /// immediately before invocation so mid-delivery unsubscribes stick.
    pub(crate) fn notify(&self, value: &T) {
        let snapshot: Vec<Arc<Slot<T>>> = match self.slots.lock() {
            Ok(slots) => slots.iter().map(Arc::clone).collect(),
            Err(_) => return,
        };

        for slot in snapshot {
            if !slot.active.load(Ordering::Acquire) {
                continue;
            }
            if let Ok(mut callback) = slot.callback.lock() {
                (callback)(value);
            }
        }
    }
}

impl<T> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            slots: Arc::clone(&self.slots),
        }
    }
}

struct SubscriptionInner {
    active: Arc<AtomicBool>,
    detach: Mutex<Option<Box<dyn FnOnce() + Send>>>,
}

impl SubscriptionInner {
    fn cancel(&self) {
        self.active.store(false, Ordering::Release);
        if let Ok(mut detach) = self.detach.lock()
            && let Some(detach) = detach.take()
        {
            detach();
        }
    }
}

impl Drop for SubscriptionInner {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Handle for a registered callback.
///
/// The callback stays registered while at least one clone of the handle is
/// alive. Dropping the last clone, or calling [`unsubscribe`], removes it;
/// no delivery happens afterwards. Cancellation is idempotent and safe to
/// perform from inside the callback itself.
///
/// [`unsubscribe`]: Subscription::unsubscribe
#[derive(Clone)]
pub struct Subscription {
    inner: Arc<SubscriptionInner>,
}

impl Subscription {
    fn new(active: Arc<AtomicBool>, detach: impl FnOnce() + Send + 'static) -> Self {
        Self {
            inner: Arc::new(SubscriptionInner {
                active,
                detach: Mutex::new(Some(Box::new(detach))),
            }),
        }
    }

    /// Cancel the callback registration immediately.
    pub fn unsubscribe(&self) {
        self.inner.cancel();
    }

    /// Whether the callback is still registered.
    pub fn is_active(&self) -> bool {
        self.inner.active.load(Ordering::Acquire)
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::{Arc, Mutex};

    use super::*;

    fn collector() -> (Arc<Mutex<Vec<i32>>>, impl FnMut(&i32) + Send + 'static) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        (seen, move |value: &i32| sink.lock().unwrap().push(*value))
    }

    #[test]
    fn notifies_in_insertion_order() {
        let registry = Registry::new();
        let order = Arc::new(Mutex::new(Vec::new()));

        let first = Arc::clone(&order);
        let _a = registry.add(move |_: &i32| first.lock().unwrap().push("first"));
        let second = Arc::clone(&order);
        let _b = registry.add(move |_: &i32| second.lock().unwrap().push("second"));

        registry.notify(&1);

        assert_eq!(*order.lock().unwrap(), vec!["first", "second"]);
    }

    #[test]
    fn unsubscribe_stops_delivery() {
        let registry = Registry::new();
        let (seen, callback) = collector();
        let subscription = registry.add(callback);

        registry.notify(&1);
        subscription.unsubscribe();
        registry.notify(&2);

        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert!(!subscription.is_active());
    }

    #[test]
    fn drop_unsubscribes() {
        let registry = Registry::new();
        let (seen, callback) = collector();
        let subscription = registry.add(callback);

        registry.notify(&1);
        drop(subscription);
        registry.notify(&2);

        assert_eq!(*seen.lock().unwrap(), vec![1]);
    }

    #[test]
    fn unsubscribe_from_own_callback_skips_later_notifications() {
        let registry = Registry::new();
        let handle: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
        let (seen, mut record) = collector();

        let own = Arc::clone(&handle);
        let subscription = registry.add(move |value: &i32| {
            record(value);
            if let Some(own) = own.lock().unwrap().as_ref() {
                own.unsubscribe();
            }
        });
        *handle.lock().unwrap() = Some(subscription);

        let (other_seen, other_callback) = collector();
        let _other = registry.add(other_callback);

        registry.notify(&1);
        registry.notify(&2);

        assert_eq!(*seen.lock().unwrap(), vec![1]);
        assert_eq!(*other_seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn unsubscribe_is_idempotent() {
        let registry = Registry::new();
        let (_, callback) = collector();
        let subscription = registry.add(callback);

        subscription.unsubscribe();
        subscription.unsubscribe();

        assert!(!subscription.is_active());
    }
}
