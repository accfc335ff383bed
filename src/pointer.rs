//! Pointer events for the color field and the subscription that delivers them.
//!
//! The field does not listen to raw pointer motion itself. It subscribes to a
//! [`PointerEventSource`] under an event name with a throttle interval and is
//! handed [`PointerSample`]s. The subscription is held by a
//! [`PointerSubscription`] guard that unsubscribes when released or dropped.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Bit set in [`PointerSample::buttons`] while the primary button is down.
pub const PRIMARY_BUTTON: u16 = 1;

/// A pointer event in field-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub offset_x: f64,
    pub offset_y: f64,
    /// Pressed-buttons bitmask.
    pub buttons: u16,
}

impl PointerSample {
    pub fn new(offset_x: f64, offset_y: f64, buttons: u16) -> Self {
        Self {
            offset_x,
            offset_y,
            buttons,
        }
    }

    /// True when exactly the primary button is held.
    pub fn is_primary_drag(&self) -> bool {
        self.buttons == PRIMARY_BUTTON
    }
}

/// Handle returned by [`PointerEventSource::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub type PointerCallback = Rc<dyn Fn(PointerSample)>;

/// A service that delivers named pointer events to subscribers.
pub trait PointerEventSource {
    /// Register `callback` for `event`, delivering at most one sample per
    /// `throttle_ms`.
    fn subscribe(&self, event: &str, throttle_ms: u64, callback: PointerCallback) -> SubscriptionId;

    /// Remove a subscription. Returns false if `id` was not registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

struct Listener {
    id: SubscriptionId,
    event: String,
    throttle: Duration,
    last_delivery: Cell<Option<Instant>>,
    callback: PointerCallback,
}

/// In-process [`PointerEventSource`] with per-subscription throttling.
///
/// Single-threaded: owned by the UI thread and shared through `Rc`.
#[derive(Default)]
pub struct ThrottledPointerEvents {
    next_id: Cell<u64>,
    listeners: RefCell<Vec<Listener>>,
}

impl ThrottledPointerEvents {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Deliver `sample` to every subscriber of `event` whose throttle window
    /// has elapsed. Returns how many callbacks ran.
    pub fn dispatch(&self, event: &str, sample: PointerSample) -> usize {
        self.dispatch_at(event, sample, Instant::now())
    }

    /// [`dispatch`](Self::dispatch) with an explicit timestamp.
    pub fn dispatch_at(&self, event: &str, sample: PointerSample, now: Instant) -> usize {
        // Callbacks run after the borrow ends so they may touch the registry.
        let due: Vec<PointerCallback> = self
            .listeners
            .borrow()
            .iter()
            .filter(|l| l.event == event)
            .filter(|l| match l.last_delivery.get() {
                Some(last) => now.duration_since(last) >= l.throttle,
                None => true,
            })
            .map(|l| {
                l.last_delivery.set(Some(now));
                l.callback.clone()
            })
            .collect();

        for callback in &due {
            callback(sample);
        }
        due.len()
    }
}

impl PointerEventSource for ThrottledPointerEvents {
    fn subscribe(&self, event: &str, throttle_ms: u64, callback: PointerCallback) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push(Listener {
            id,
            event: event.to_string(),
            throttle: Duration::from_millis(throttle_ms),
            last_delivery: Cell::new(None),
            callback,
        });
        log::debug!("subscribed {:?} to {} ({}ms)", id, event, throttle_ms);
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|l| l.id != id);
        let removed = listeners.len() != before;
        if removed {
            log::debug!("unsubscribed {:?}", id);
        }
        removed
    }
}

/// Scoped pointer-event subscription.
///
/// Acquired when the field mounts; released by [`release`](Self::release)
/// or on drop, whichever comes first. Releasing again is a no-op.
pub struct PointerSubscription {
    source: Rc<dyn PointerEventSource>,
    id: Option<SubscriptionId>,
}

impl PointerSubscription {
    pub fn acquire(
        source: Rc<dyn PointerEventSource>,
        event: &str,
        throttle_ms: u64,
        callback: PointerCallback,
    ) -> Self {
        let id = source.subscribe(event, throttle_ms, callback);
        Self {
            source,
            id: Some(id),
        }
    }

    pub fn id(&self) -> Option<SubscriptionId> {
        self.id
    }

    pub fn is_active(&self) -> bool {
        self.id.is_some()
    }

    pub fn release(&mut self) {
        if let Some(id) = self.id.take() {
            self.source.unsubscribe(id);
        }
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
