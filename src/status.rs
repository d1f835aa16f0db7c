//! Read-only observation surface for external reporters.

use crate::NUM_CHANNELS;
use crate::bridge::SystemMode;
use crate::pattern::PatternId;

/// Monotonic event counters. Only the core mutates them.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Statistics {
    /// Bytes interpreted as command bytes (known or not).
    pub commands: u32,
    /// Pixels written into channel buffers.
    pub pixels: u32,
    /// Transfers started.
    pub flushes: u32,
    /// Protocol validation failures.
    pub errors: u32,
}

/// Per-channel health counters for a report.
#[derive(Debug, Default, Clone, Copy)]
pub struct ChannelReport {
    pub led_count: u16,
    pub tripped: bool,
    pub trip_count: u32,
    pub limit_events: u32,
}

/// Snapshot handed to the status/report collaborator.
#[derive(Debug, Clone, Copy)]
pub struct StatusSnapshot {
    pub stats: Statistics,
    pub mode: SystemMode,
    /// Active diagnostic pattern, if any.
    pub pattern: Option<PatternId>,
    pub channels: [ChannelReport; NUM_CHANNELS],
}
