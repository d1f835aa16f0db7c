//! Per-channel pixel store with double-buffered transfer hand-off.

use crate::{MAX_LEDS_PER_CHANNEL, TransferEngine};

/// One LED strip output.
///
/// Owns two equal-capacity word buffers alternating between the writable
/// *active* role and the read-only *in-flight* role. Roles swap atomically
/// at flush time, so the producer never writes the buffer the transfer
/// engine is reading. At most one transfer is in flight per channel.
pub struct Channel {
    index: u8,
    buffers: [[u32; MAX_LEDS_PER_CHANNEL]; 2],
    active: usize,
    in_flight: bool,
    led_count: u16,
    tripped: bool,
    trip_count: u32,
    limit_events: u32,
}

impl Channel {
    pub(crate) const fn new(index: u8) -> Self {
        Self {
            index,
            buffers: [[0; MAX_LEDS_PER_CHANNEL]; 2],
            active: 0,
            in_flight: false,
            led_count: 0,
            tripped: false,
            trip_count: 0,
            limit_events: 0,
        }
    }

    pub fn index(&self) -> u8 {
        self.index
    }

    /// Configured strip length; zero means the channel is idle.
    pub fn led_count(&self) -> u16 {
        self.led_count
    }

    pub(crate) fn set_led_count(&mut self, count: u16) {
        self.led_count = count;
    }

    /// The words of the writable buffer, sized to the current LED count.
    pub fn active_words(&self) -> &[u32] {
        &self.buffers[self.active][..usize::from(self.led_count)]
    }

    pub(crate) fn active_words_mut(&mut self) -> &mut [u32] {
        &mut self.buffers[self.active][..usize::from(self.led_count)]
    }

    pub(crate) fn write_word(&mut self, index: usize, word: u32) {
        self.buffers[self.active][index] = word;
    }

    pub(crate) fn clear_active(&mut self) {
        self.buffers[self.active] = [0; MAX_LEDS_PER_CHANNEL];
    }

    /// Whether a transfer was started and not yet observed complete.
    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Swap buffer roles and hand the previously active buffer to the
    /// transfer engine for exactly `led_count` words.
    ///
    /// If the prior transfer is still running this blocks until it
    /// completes — the one synchronization point in the pipeline, bounded
    /// by the strip length at the fixed signal rate. Returns `false` for
    /// an idle channel (nothing is started).
    pub(crate) fn flush<T: TransferEngine>(&mut self, engine: &mut T) -> bool {
        if self.led_count == 0 {
            return false;
        }
        if self.in_flight {
            engine.wait_complete(self.index);
            self.in_flight = false;
        }
        self.active ^= 1;
        // TODO: decide whether the fresh active buffer should be cleared
        // here; a shorter next frame currently inherits the stale tail.
        let words = &self.buffers[self.active ^ 1][..usize::from(self.led_count)];
        engine.start(self.index, words);
        self.in_flight = true;
        true
    }

    /// Fault state, owned by the external feedback monitor. A false→true
    /// edge counts as a new trip.
    pub fn set_tripped(&mut self, tripped: bool) {
        if tripped && !self.tripped {
            self.trip_count += 1;
        }
        self.tripped = tripped;
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped
    }

    pub fn trip_count(&self) -> u32 {
        self.trip_count
    }

    /// Times the current limiter had to scale this channel's output.
    pub fn limit_events(&self) -> u32 {
        self.limit_events
    }

    pub(crate) fn record_limit_event(&mut self) {
        self.limit_events += 1;
    }
}
