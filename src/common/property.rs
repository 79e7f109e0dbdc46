use std::fmt::Debug;

use futures::stream::Stream;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;

use super::registry::{Registry, Subscription};

/// A reactive property that can be observed for changes.
///
/// Each property is one state channel: it holds the latest committed value
/// and pushes changes to observers. Two observation tiers are offered:
///
/// - [`subscribe`] registers a synchronous callback, invoked in insertion
///   order within the same call that commits the change.
/// - [`watch`] returns an async stream that yields the current value
///   immediately and then on every change.
///
/// Mutation is crate-private; external consumers only read.
///
/// [`subscribe`]: Property::subscribe
/// [`watch`]: Property::watch
#[derive(Clone)]
pub struct Property<T: Clone + Send + Sync + 'static> {
    tx: watch::Sender<T>,
    rx: watch::Receiver<T>,
    subscribers: Registry<T>,
}

impl<T: Clone + Send + Sync + 'static> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(initial: T) -> Self {
        let (tx, rx) = watch::channel(initial);
        Self {
            tx,
            rx,
            subscribers: Registry::new(),
        }
    }

    /// Set a new value and notify all observers if it differs.
    pub(crate) fn set(&self, new_value: T)
    where
        T: PartialEq,
    {
        if self.stage(new_value) {
            self.flush();
        }
    }

    /// Store a new value without notifying synchronous subscribers.
    ///
    /// Returns whether the stored value changed. Used by multi-field
    /// transitions: every field of the transition is staged before any
    /// callback runs, so no callback can observe a half-applied update.
    /// Each staged change must be followed by a [`flush`].
    ///
    /// [`flush`]: Property::flush
    pub(crate) fn stage(&self, new_value: T) -> bool
    where
        T: PartialEq,
    {
        self.tx.send_if_modified(|current| {
            if *current != new_value {
                *current = new_value;
                true
            } else {
                false
            }
        })
    }

    /// Invoke every subscriber with the current value.
    pub(crate) fn flush(&self) {
        let value = self.get();
        self.subscribers.notify(&value);
    }

    /// Get the current value.
    ///
    /// This is a synchronous operation that clones the current value.
    pub fn get(&self) -> T {
        self.rx.borrow().clone()
    }

    /// Register a callback invoked with every committed change.
    ///
    /// Delivery is synchronous and in subscriber insertion order. The
    /// callback stays registered while the returned [`Subscription`] (or a
    /// clone of it) is alive; dropping or unsubscribing it stops delivery
    /// immediately, even mid-broadcast.
    pub fn subscribe(&self, callback: impl FnMut(&T) + Send + 'static) -> Subscription {
        self.subscribers.add(callback)
    }

    /// Watch for changes to this property.
    ///
    /// The stream immediately yields the current value, then yields
    /// whenever the value changes. Intended for async consumers; the
    /// synchronous ordering guarantees of [`subscribe`] do not extend
    /// across await points.
    ///
    /// [`subscribe`]: Property::subscribe
    pub fn watch(&self) -> impl Stream<Item = T> + Send + use<T> {
        WatchStream::new(self.rx.clone())
    }
}

impl<T: Clone + Send + Sync + Debug + 'static> Debug for Property<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::sync::{Arc, Mutex};

    use futures::StreamExt;

    use super::*;

    #[test]
    fn get_returns_latest_committed_value() {
        let property = Property::new(0.5);

        property.set(0.75);

        assert_eq!(property.get(), 0.75);
    }

    #[test]
    fn set_notifies_subscribers_with_new_value() {
        let property = Property::new(0);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let sink = Arc::clone(&seen);
        let _subscription = property.subscribe(move |value: &i32| {
            sink.lock().unwrap().push(*value);
        });

        property.set(1);
        property.set(2);

        assert_eq!(*seen.lock().unwrap(), vec![1, 2]);
    }

    #[test]
    fn set_with_equal_value_does_not_notify() {
        let property = Property::new(0.5);
        let calls = Arc::new(Mutex::new(0));

        let counter = Arc::clone(&calls);
        let _subscription = property.subscribe(move |_: &f64| {
            *counter.lock().unwrap() += 1;
        });

        property.set(0.5);

        assert_eq!(*calls.lock().unwrap(), 0);
    }

    #[test]
    fn staged_value_is_readable_before_flush() {
        let property = Property::new(false);
        let observed = Arc::new(Mutex::new(None));

        let reader = property.clone();
        let sink = Arc::clone(&observed);
        let _subscription = property.subscribe(move |_: &bool| {
            *sink.lock().unwrap() = Some(reader.get());
        });

        assert!(property.stage(true));
        assert!(property.get());
        assert!(observed.lock().unwrap().is_none());

        property.flush();
        assert_eq!(*observed.lock().unwrap(), Some(true));
    }

    #[test]
    fn clones_share_the_same_channel() {
        let property = Property::new(1);
        let clone = property.clone();

        property.set(2);

        assert_eq!(clone.get(), 2);
    }

    #[tokio::test]
    async fn watch_yields_current_value_then_changes() {
        let property = Property::new(10);
        let mut stream = property.watch();

        assert_eq!(stream.next().await, Some(10));

        property.set(20);
        assert_eq!(stream.next().await, Some(20));
    }
}
