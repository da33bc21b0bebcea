//! # satchel_event - Observer Registry
//!
//! Synchronous event delivery for a single owner:
//! - Typed handlers, one registry per event type
//! - Priority-based delivery order
//! - A pollable channel for consumers that prefer draining over callbacks
//!
//! Dispatch happens inside `publish`; there is no deferred queue between a
//! publisher and its subscribers.

use std::collections::VecDeque;

/// Handler priority
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Priority {
    Low = 0,
    Normal = 1,
    High = 2,
    Critical = 3,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Normal
    }
}

/// Boxed callback invoked for each published event
pub type EventHandler<E> = Box<dyn Fn(&E) + Send + Sync>;

/// Subscriber ID
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubscriberId(pub u64);

struct Subscriber<E> {
    id: SubscriberId,
    priority: Priority,
    handler: EventHandler<E>,
}

/// Registry of handlers for events of type `E`
pub struct EventBus<E> {
    /// Handlers, kept sorted by priority (higher first)
    subscribers: Vec<Subscriber<E>>,
    /// Next subscriber ID
    next_subscriber_id: u64,
    /// Number of events published so far
    published: u64,
}

impl<E> EventBus<E> {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_subscriber_id: 1,
            published: 0,
        }
    }

    /// Subscribe to events
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        self.subscribe_with_priority(handler, Priority::Normal)
    }

    /// Subscribe with priority
    pub fn subscribe_with_priority<F>(&mut self, handler: F, priority: Priority) -> SubscriberId
    where
        F: Fn(&E) + Send + Sync + 'static,
    {
        let id = SubscriberId(self.next_subscriber_id);
        self.next_subscriber_id += 1;

        self.subscribers.push(Subscriber {
            id,
            priority,
            handler: Box::new(handler),
        });

        // Stable sort: equal priorities keep registration order
        self.subscribers.sort_by(|a, b| b.priority.cmp(&a.priority));

        id
    }

    /// Unsubscribe. Returns false if the ID was not registered.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|s| s.id != id);
        self.subscribers.len() != before
    }

    /// Deliver an event to every subscriber, highest priority first
    pub fn publish(&mut self, event: &E) {
        for subscriber in &self.subscribers {
            (subscriber.handler)(event);
        }
        self.published += 1;
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Number of events published since creation
    pub fn published_count(&self) -> u64 {
        self.published
    }
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscribers.len())
            .field("published", &self.published)
            .finish()
    }
}

/// FIFO channel for single-type events
#[derive(Debug)]
pub struct EventChannel<E> {
    queue: VecDeque<E>,
}

impl<E> EventChannel<E> {
    /// Create an empty channel
    pub fn new() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }

    /// Queue an event
    pub fn send(&mut self, event: E) {
        self.queue.push_back(event);
    }

    /// Receive the oldest event
    pub fn receive(&mut self) -> Option<E> {
        self.queue.pop_front()
    }

    /// Drain all events in send order
    pub fn drain(&mut self) -> Vec<E> {
        self.queue.drain(..).collect()
    }

    /// Drop all pending events
    pub fn clear(&mut self) {
        self.queue.clear();
    }

    /// True when nothing is queued
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of queued events
    pub fn len(&self) -> usize {
        self.queue.len()
    }
}

impl<E> Default for EventChannel<E> {
    fn default() -> Self {
        Self::new()
    }
}

pub mod prelude {
    pub use crate::{EventBus, EventChannel, EventHandler, Priority, SubscriberId};
}
