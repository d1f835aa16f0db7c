#![no_std]

pub mod bridge;
pub mod channel;
pub mod color;
pub mod decoder;
pub mod intake;
pub mod limiter;
pub mod pacing;
pub mod pattern;
pub mod status;

pub use bridge::{Bridge, BridgeConfig, SystemMode};
pub use channel::Channel;
pub use color::{ColorPipeline, Rgb};
pub use decoder::{Command, Parser, ParserState};
pub use intake::{ByteIntake, IntakeReader, IntakeWriter};
pub use limiter::{CurrentLimiter, brightness_units};
pub use pacing::Pacer;
pub use pattern::{Pattern, PatternId, PatternSlot};
pub use status::{ChannelReport, Statistics, StatusSnapshot};

pub use embassy_time::{Duration, Instant};

/// Number of independently addressable strip outputs.
pub const NUM_CHANNELS: usize = 8;

/// Upper bound on LEDs per channel; buffers are sized to this.
pub const MAX_LEDS_PER_CHANNEL: usize = 200;

/// Wire bytes per pixel (R, G, B).
pub const BYTES_PER_LED: usize = 3;

/// Abstraction over the hardware signal generator.
///
/// Implement this trait to drive real outputs (PIO + DMA, SPI, a test
/// recorder). A started transfer reads the given words asynchronously;
/// the caller guarantees the slice stays valid and untouched until the
/// transfer for that channel has completed.
pub trait TransferEngine {
    /// Begin a non-blocking transfer of encoded pixel words on one output.
    fn start(&mut self, channel: u8, words: &[u32]);

    /// Whether the channel's last transfer has finished.
    fn is_complete(&self, channel: u8) -> bool;

    /// Block until the channel's last transfer has finished.
    fn wait_complete(&mut self, channel: u8);
}

#[cfg(feature = "defmt")]
macro_rules! diag {
    ($($arg:tt)*) => { defmt::info!($($arg)*) };
}

#[cfg(not(feature = "defmt"))]
macro_rules! diag {
    ($($arg:tt)*) => {};
}

pub(crate) use diag;
