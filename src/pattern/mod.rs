//! Diagnostic pattern system with compile-time known pattern variants.
//!
//! Each pattern is a deterministic function of the tick counter, channel
//! index and pixel position, so an external camera (or a test) can predict
//! every frame. Patterns compute raw colors only; the bridge pushes them
//! through the same gamma/limit/flush path the protocol decoder uses.

mod channel_id;
mod cycle;
mod end_blink;
mod ternary;
mod twinkle;

pub use channel_id::ChannelIdPattern;
pub use cycle::{ColorCyclePattern, RgbCyclePattern};
pub use end_blink::EndBlinkPattern;
pub use ternary::{TERNARY_DIGITS, TernaryPattern, ternary_digit};
pub use twinkle::TwinklePattern;

use crate::color::Rgb;

/// Animation tick rate.
pub const TICK_RATE_HZ: u64 = 30;

/// Ticks per half of a 1 Hz blink cycle.
pub(crate) const HALF_CYCLE_TICKS: u32 = 15;

/// Ticks each solid color is held in the cycle patterns (1 s per color).
pub(crate) const TICKS_PER_COLOR: u32 = 30;

/// A single diagnostic pattern.
pub trait Pattern {
    /// Compute one channel's frame for the given tick counter.
    fn render(&self, frame: u32, channel: u8, leds: &mut [Rgb]);
}

const PATTERN_ID_CHANNEL_ID: u8 = 0;
const PATTERN_ID_RGB_CYCLE: u8 = 1;
const PATTERN_ID_COLOR_CYCLE: u8 = 2;
const PATTERN_ID_END_BLINK: u8 = 3;
const PATTERN_ID_TERNARY: u8 = 4;
const PATTERN_ID_TWINKLE: u8 = 5;

/// Number of defined patterns; wire ids wrap modulo this.
pub const NUM_PATTERNS: u8 = 6;

/// Known pattern ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PatternId {
    /// Minimal-power strip identification blink.
    ChannelId = PATTERN_ID_CHANNEL_ID,
    /// Solid red, green, blue cycle.
    RgbCycle = PATTERN_ID_RGB_CYCLE,
    /// Eight-color cycle ending in black.
    ColorCycle = PATTERN_ID_COLOR_CYCLE,
    /// First and last pixel alternating red.
    EndBlink = PATTERN_ID_END_BLINK,
    /// Per-LED base-3 identity codes for camera calibration.
    Ternary = PATTERN_ID_TERNARY,
    /// Sine-modulated twinkle in the channel identity color.
    Twinkle = PATTERN_ID_TWINKLE,
}

impl PatternId {
    /// Decode a wire id; out-of-range values wrap around.
    pub const fn from_wire(value: u8) -> Self {
        match value % NUM_PATTERNS {
            PATTERN_ID_CHANNEL_ID => Self::ChannelId,
            PATTERN_ID_RGB_CYCLE => Self::RgbCycle,
            PATTERN_ID_COLOR_CYCLE => Self::ColorCycle,
            PATTERN_ID_END_BLINK => Self::EndBlink,
            PATTERN_ID_TERNARY => Self::Ternary,
            _ => Self::Twinkle,
        }
    }

    /// The pattern after this one, wrapping at the end. Used by the
    /// button's cycle action.
    pub const fn next(self) -> Self {
        Self::from_wire(self as u8 + 1)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ChannelId => "channel_id",
            Self::RgbCycle => "rgb_cycle",
            Self::ColorCycle => "color_cycle",
            Self::EndBlink => "end_blink",
            Self::Ternary => "ternary",
            Self::Twinkle => "twinkle",
        }
    }

    /// Instantiate the pattern behind this id.
    pub fn to_slot(self) -> PatternSlot {
        match self {
            Self::ChannelId => PatternSlot::ChannelId(ChannelIdPattern),
            Self::RgbCycle => PatternSlot::RgbCycle(RgbCyclePattern),
            Self::ColorCycle => PatternSlot::ColorCycle(ColorCyclePattern),
            Self::EndBlink => PatternSlot::EndBlink(EndBlinkPattern),
            Self::Ternary => PatternSlot::Ternary(TernaryPattern),
            Self::Twinkle => PatternSlot::Twinkle(TwinklePattern::new()),
        }
    }
}

/// Pattern slot - enum containing all pattern implementations.
pub enum PatternSlot {
    ChannelId(ChannelIdPattern),
    RgbCycle(RgbCyclePattern),
    ColorCycle(ColorCyclePattern),
    EndBlink(EndBlinkPattern),
    Ternary(TernaryPattern),
    Twinkle(TwinklePattern),
}

impl PatternSlot {
    /// Render the active pattern for one channel.
    pub fn render(&self, frame: u32, channel: u8, leds: &mut [Rgb]) {
        match self {
            Self::ChannelId(pattern) => pattern.render(frame, channel, leds),
            Self::RgbCycle(pattern) => pattern.render(frame, channel, leds),
            Self::ColorCycle(pattern) => pattern.render(frame, channel, leds),
            Self::EndBlink(pattern) => pattern.render(frame, channel, leds),
            Self::Ternary(pattern) => pattern.render(frame, channel, leds),
            Self::Twinkle(pattern) => pattern.render(frame, channel, leds),
        }
    }

    /// Get the pattern id for external observation.
    pub fn id(&self) -> PatternId {
        match self {
            Self::ChannelId(_) => PatternId::ChannelId,
            Self::RgbCycle(_) => PatternId::RgbCycle,
            Self::ColorCycle(_) => PatternId::ColorCycle,
            Self::EndBlink(_) => PatternId::EndBlink,
            Self::Ternary(_) => PatternId::Ternary,
            Self::Twinkle(_) => PatternId::Twinkle,
        }
    }
}
