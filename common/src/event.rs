//! Inbound events and the bounded event queue.
//!
//! Hosts push events as they happen and a driver loop drains the queue into
//! [`crate::WatchFace::drain`], one event at a time. When the queue is full
//! the oldest event is dropped so the face always catches up with the most
//! recent state.

use heapless::Deque;
use log::warn;

use crate::message::ConfigMessage;
use crate::time::{TickTime, TimeUnits};

/// Maximum number of pending events.
pub const EVENT_QUEUE_LEN: usize = 16;

/// Something the watchface reacts to.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Event {
    /// Clock tick with the units changed since the previous tick.
    Tick(TickTime, TimeUnits),
    /// Battery charge in percent.
    Battery(u8),
    /// Companion connectivity changed.
    Connection(bool),
    /// Decoded configuration message.
    Config(ConfigMessage),
}

/// Bounded FIFO of pending events.
pub struct EventQueue {
    events: Deque<Event, EVENT_QUEUE_LEN>,
    dropped: u32,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            events: Deque::new(),
            dropped: 0,
        }
    }

    /// Queue an event, dropping the oldest one if the queue is full.
    pub fn push(
        &mut self,
        event: Event,
    ) {
        if self.events.is_full() {
            self.events.pop_front();
            self.dropped = self.dropped.wrapping_add(1);
            warn!("Event queue full, dropped oldest event ({} total)", self.dropped);
        }
        // Cannot fail: a slot was freed above
        let _ = self.events.push_back(event);
    }

    #[inline]
    pub fn pop(&mut self) -> Option<Event> { self.events.pop_front() }

    #[inline]
    pub fn len(&self) -> usize { self.events.len() }

    #[inline]
    pub fn is_empty(&self) -> bool { self.events.is_empty() }

    /// Events dropped because the queue was full.
    #[inline]
    pub const fn dropped(&self) -> u32 { self.dropped }
}

impl Default for EventQueue {
    fn default() -> Self { Self::new() }
}
