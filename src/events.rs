//! Typed publish/subscribe channel.
//!
//! Decouples the controller from presentation: subscribers register for one
//! event kind or for every event, and receive a `Subscription` handle used to
//! unsubscribe. For each emitted event the kind-specific subscribers run
//! first, in subscription order, followed by the wildcard subscribers.

use std::collections::HashMap;
use std::hash::Hash;

/// An event that can be routed by kind.
pub trait Event {
    type Kind: Copy + Eq + Hash;

    fn kind(&self) -> Self::Kind;
}

type Handler<E> = Box<dyn FnMut(&E)>;

/// Handle returned by subscribe calls; pass to [`EventChannel::unsubscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription<K> {
    channel: Option<K>,
    id: u64,
}

/// Ordered per-kind subscriber lists plus a wildcard channel.
pub struct EventChannel<E: Event> {
    subscribers: HashMap<Option<E::Kind>, Vec<(u64, Handler<E>)>>,
    next_id: u64,
}

impl<E: Event> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Event> EventChannel<E> {
    pub fn new() -> Self {
        Self { subscribers: HashMap::new(), next_id: 0 }
    }

    /// Subscribe to one event kind.
    pub fn subscribe(
        &mut self,
        kind: E::Kind,
        handler: impl FnMut(&E) + 'static,
    ) -> Subscription<E::Kind> {
        self.push(Some(kind), Box::new(handler))
    }

    /// Subscribe to every event; fired after the kind-specific subscribers.
    pub fn subscribe_any(&mut self, handler: impl FnMut(&E) + 'static) -> Subscription<E::Kind> {
        self.push(None, Box::new(handler))
    }

    fn push(&mut self, channel: Option<E::Kind>, handler: Handler<E>) -> Subscription<E::Kind> {
        let id = self.next_id;
        self.next_id += 1;
        self.subscribers.entry(channel).or_default().push((id, handler));
        Subscription { channel, id }
    }

    /// Remove a subscriber; unknown handles are ignored.
    pub fn unsubscribe(&mut self, subscription: Subscription<E::Kind>) {
        if let Some(handlers) = self.subscribers.get_mut(&subscription.channel) {
            handlers.retain(|(id, _)| *id != subscription.id);
        }
    }

    /// Deliver `event` to its kind channel, then to the wildcard channel.
    pub fn emit(&mut self, event: &E) {
        if let Some(handlers) = self.subscribers.get_mut(&Some(event.kind())) {
            for (_, handler) in handlers.iter_mut() {
                handler(event);
            }
        }
        if let Some(handlers) = self.subscribers.get_mut(&None) {
            for (_, handler) in handlers.iter_mut() {
                handler(event);
            }
        }
    }
}
