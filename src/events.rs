//! Asynchronous event system.
//!
//! Events are produced by:
//! - The rotary encoder poller (rotation and push switch)
//! - Timer callbacks (1 Hz clock tick, display redraw)
//! - The alarm comparator (wall clock reached the armed alarm time)
//!
//! Events are consumed by the main control loop, which processes them
//! one at a time in strict FIFO order.  No priorities, no coalescing.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Encoder     │────▶│              │     │              │
//! │ Timer cb    │────▶│  Event Queue │────▶│  Main Loop   │
//! │ Alarm cmp   │────▶│  (lock-free) │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```
//!
//! The ring keeps one slot empty to tell "full" from "empty": with
//! [`EVENT_QUEUE_CAP`] slots at most `EVENT_QUEUE_CAP - 1` events are
//! pending at once.  A push into a full queue drops the *new* event and
//! reports [`QueueError::Overflow`]; queued events are never overwritten.

use core::sync::atomic::{AtomicU8, AtomicU32, Ordering};

use crate::error::QueueError;

/// Number of ring slots (one is always kept free).
pub const EVENT_QUEUE_CAP: usize = 10;

/// Hardware-originated occurrences consumed by the dispatcher.
///
/// Events carry no payload; all context lives in the FSM's `StateData`.
/// "No event" is expressed as `None` from [`EventQueue::pop`], so it can
/// never be enqueued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Event {
    /// Periodic 1 Hz heartbeat: refresh clock, poll heater/brew sensors.
    NextTick = 0,
    /// Re-render the current view.
    Redraw = 1,
    /// Encoder push switch pressed.
    EncoderPress = 2,
    /// Encoder rotated one detent clockwise.
    EncoderInc = 3,
    /// Encoder rotated one detent counter-clockwise.
    EncoderDec = 4,
    /// Wall clock reached the armed alarm time.
    Alarm = 5,
}

impl Event {
    /// Every event, in discriminant order.
    pub const ALL: [Event; 6] = [
        Event::NextTick,
        Event::Redraw,
        Event::EncoderPress,
        Event::EncoderInc,
        Event::EncoderDec,
        Event::Alarm,
    ];

    fn from_u8(raw: u8) -> Option<Self> {
        Self::ALL.get(raw as usize).copied()
    }
}

// ── Lock-free SPSC ring buffer ────────────────────────────────
//
// ISRs write (produce), main loop reads (consume).  Cursors and slots are
// atomics so the whole structure lives in a plain `static` without
// `unsafe`.  `head` is only advanced by the producer and `tail` only by
// the consumer.

/// Fixed-capacity single-producer / single-consumer event ring.
pub struct EventQueue<const N: usize> {
    head: AtomicU8,
    tail: AtomicU8,
    slots: [AtomicU8; N],
    /// Events rejected since the last [`take_dropped`](Self::take_dropped).
    dropped: AtomicU32,
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue.  `N` must be in `2..=255`.
    pub const fn new() -> Self {
        const { assert!(N >= 2 && N <= u8::MAX as usize, "queue size must fit u8 cursors") };
        Self {
            head: AtomicU8::new(0),
            tail: AtomicU8::new(0),
            slots: [const { AtomicU8::new(0) }; N],
            dropped: AtomicU32::new(0),
        }
    }

    /// Maximum number of events that can be pending at once.
    pub const fn capacity(&self) -> usize {
        N - 1
    }

    /// Append an event at the tail.
    ///
    /// Safe to call from ISR context (lock-free, bounded time).  When the
    /// queue is full the event is dropped and `Overflow` is returned; the
    /// queued events are left untouched.
    pub fn push(&self, event: Event) -> Result<(), QueueError> {
        let head = self.head.load(Ordering::Relaxed) as usize;
        let tail = self.tail.load(Ordering::Acquire) as usize;
        let next_head = (head + 1) % N;

        if next_head == tail {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return Err(QueueError::Overflow);
        }

        self.slots[head].store(event as u8, Ordering::Relaxed);
        self.head.store(next_head as u8, Ordering::Release);
        Ok(())
    }

    /// Remove and return the oldest event, or `None` when empty.
    /// Called from the main loop (single consumer).  Never blocks.
    pub fn pop(&self) -> Option<Event> {
        let tail = self.tail.load(Ordering::Relaxed) as usize;
        let head = self.head.load(Ordering::Acquire) as usize;

        if tail == head {
            return None;
        }

        let raw = self.slots[tail].load(Ordering::Relaxed);
        self.tail.store(((tail + 1) % N) as u8, Ordering::Release);

        let event = Event::from_u8(raw);
        debug_assert!(event.is_some(), "corrupt event slot: {raw}");
        event
    }

    /// Drain all pending events into a callback, oldest first.
    pub fn drain(&self, mut handler: impl FnMut(Event)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tail.load(Ordering::Relaxed) == self.head.load(Ordering::Acquire)
    }

    pub fn is_full(&self) -> bool {
        let head = self.head.load(Ordering::Acquire) as usize;
        let tail = self.tail.load(Ordering::Acquire) as usize;
        (head + 1) % N == tail
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        let head = self.head.load(Ordering::Acquire) as usize;
        let tail = self.tail.load(Ordering::Acquire) as usize;
        (head + N - tail) % N
    }

    /// Number of events dropped on overflow since the last call; resets
    /// the counter.
    pub fn take_dropped(&self) -> u32 {
        self.dropped.swap(0, Ordering::Relaxed)
    }
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Process-wide queue ────────────────────────────────────────

/// The single queue shared by the producers and the main loop.
pub static EVENT_QUEUE: EventQueue<EVENT_QUEUE_CAP> = EventQueue::new();

/// Push an event into the global queue.
/// Safe to call from ISR context (lock-free).
pub fn push_event(event: Event) -> Result<(), QueueError> {
    EVENT_QUEUE.push(event)
}

/// Pop the next event from the global queue.
pub fn pop_event() -> Option<Event> {
    EVENT_QUEUE.pop()
}

/// Drain the global queue into a callback, in FIFO order.
pub fn drain_events(handler: impl FnMut(Event)) {
    EVENT_QUEUE.drain(handler);
}

/// Check if the global queue is empty.
pub fn queue_is_empty() -> bool {
    EVENT_QUEUE.is_empty()
}
