use crossbeam_channel::{Receiver, Sender, TryRecvError};

use super::sink::InputSink;
use super::types::{InputEvent, KeyEvent, MouseButtonEvent, MouseMovedEvent, ScrollEvent};

/// Multi-producer, single-consumer FIFO of input events.
///
/// Producers (window callbacks, possibly on another thread) call
/// [`enqueue`](Self::enqueue) or go through a cloned [`EventProducer`]. The
/// render loop drains it once per frame with [`flush`](Self::flush).
pub struct EventQueue {
    tx: Sender<InputEvent>,
    rx: Receiver<InputEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        let (tx, rx) = crossbeam_channel::unbounded();
        Self { tx, rx }
    }

    /// Returns a cloneable enqueue handle for callback contexts.
    pub fn producer(&self) -> EventProducer {
        EventProducer {
            tx: self.tx.clone(),
        }
    }

    /// Appends an event to the tail. Never blocks.
    pub fn enqueue(&self, event: impl Into<InputEvent>) {
        push(&self.tx, event.into());
    }

    pub fn len(&self) -> usize {
        self.rx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }

    /// Delivers the events present when the call starts, in arrival order.
    ///
    /// Events enqueued while the flush runs (including by `sink` itself) stay
    /// queued for the next call. Returns the number of events delivered.
    pub fn flush<S: InputSink + ?Sized>(&self, sink: &mut S) -> usize {
        let pending = self.rx.len();

        let mut delivered = 0;
        while delivered < pending {
            match self.rx.try_recv() {
                Ok(event) => {
                    event.dispatch(sink);
                    delivered += 1;
                }
                // Queue owns a sender, so only `Empty` is reachable here.
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }

        delivered
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Enqueue-only handle to an [`EventQueue`]. `Send + Sync`, cheap to clone.
#[derive(Clone)]
pub struct EventProducer {
    tx: Sender<InputEvent>,
}

impl EventProducer {
    pub fn enqueue(&self, event: impl Into<InputEvent>) {
        push(&self.tx, event.into());
    }
}

/// A producer is itself a sink, so anything that feeds an [`InputSink`] can
/// feed the queue.
impl InputSink for EventProducer {
    fn mouse_moved(&mut self, e: MouseMovedEvent) {
        self.enqueue(e);
    }

    fn mouse_button(&mut self, e: MouseButtonEvent) {
        self.enqueue(e);
    }

    fn key(&mut self, e: KeyEvent) {
        self.enqueue(e);
    }

    fn scroll(&mut self, e: ScrollEvent) {
        self.enqueue(e);
    }
}

fn push(tx: &Sender<InputEvent>, event: InputEvent) {
    if !event.is_well_formed() {
        debug_assert!(false, "malformed input event: {event:?}");
        log::warn!("dropping malformed input event: {event:?}");
        return;
    }

    if tx.send(event).is_err() {
        log::debug!("event queue is gone; discarding {event:?}");
    }
}
