use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, PoisonError, Weak};

use flume::{Receiver, Sender, TryRecvError};

struct BusInner<E> {
    next_id: u64,
    subscribers: BTreeMap<u64, Sender<E>>,
}

/// Fan-out channel whose subscribers unsubscribe by being dropped.
///
/// Every live [`Subscription`] receives its own copy of each published event,
/// in publish order. A subscription's lifetime is the lifetime of whatever
/// state owns it (a drag gesture, a preview session, a controller).
pub struct EventBus<E> {
    inner: Arc<Mutex<BusInner<E>>>,
}

impl<E> Clone for EventBus<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E: Clone> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> EventBus<E> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(BusInner {
                next_id: 0,
                subscribers: BTreeMap::new(),
            })),
        }
    }

    pub fn subscribe(&self) -> Subscription<E> {
        let (tx, rx) = flume::unbounded();
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let id = inner.next_id;
        inner.next_id += 1;
        inner.subscribers.insert(id, tx);

        Subscription {
            id,
            rx,
            bus: Arc::downgrade(&self.inner),
        }
    }

    pub fn publish(&self, event: E) -> usize {
        let mut inner = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        inner
            .subscribers
            .retain(|_, tx| tx.send(event.clone()).is_ok());
        inner.subscribers.len()
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .subscribers
            .len()
    }
}

pub struct Subscription<E> {
    id: u64,
    rx: Receiver<E>,
    bus: Weak<Mutex<BusInner<E>>>,
}

impl<E> Subscription<E> {
    pub fn try_recv(&self) -> Option<E> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    pub fn drain(&self) -> Vec<E> {
        self.rx.try_iter().collect()
    }

    pub async fn recv_async(&self) -> Option<E> {
        self.rx.recv_async().await.ok()
    }
}

impl<E> Drop for Subscription<E> {
    fn drop(&mut self) {
        if let Some(bus) = self.bus.upgrade() {
            bus.lock()
                .unwrap_or_else(PoisonError::into_inner)
                .subscribers
                .remove(&self.id);
        }
    }
}
