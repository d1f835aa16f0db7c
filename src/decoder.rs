//! Wire-protocol commands and the resumable parser context.
//!
//! The decoder itself lives on [`crate::Bridge`]; this module holds the
//! pieces of state it carries between invocations. The context is never
//! discarded mid-stream — it returns to the resting state on command
//! completion or on any validation failure, so a byte stream may be
//! delivered in arbitrary chunks.

/// Command bytes of the wire protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// `0xFF`: update a channel, flush on frame completion.
    UpdateAndFlush,
    /// `0xFE`: update a channel's buffer only.
    UpdateOnly,
    /// `0xFD`: flush channels by bitmask.
    Flush,
    /// `0xFC`: request a device reset.
    Reset,
    /// `0xFB`: start a diagnostic pattern.
    StartPattern,
    /// `0xFA`: stop the diagnostic pattern.
    StopPattern,
    /// `0xF9`: black out all channels and flush.
    ClearAll,
}

impl Command {
    /// Classify a byte observed in the resting state. Anything below the
    /// command range is not an error — it is simply skipped.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        Some(match byte {
            0xFF => Self::UpdateAndFlush,
            0xFE => Self::UpdateOnly,
            0xFD => Self::Flush,
            0xFC => Self::Reset,
            0xFB => Self::StartPattern,
            0xFA => Self::StopPattern,
            0xF9 => Self::ClearAll,
            _ => return None,
        })
    }
}

/// Decoder states. `WaitCommand` is the initial and resting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParserState {
    #[default]
    WaitCommand,
    ReadChannel,
    ReadCountLow,
    ReadCountHigh,
    ReadRgb,
    ReadFlushMask,
    ReadPatternId,
}

/// Parser context carried across decoder invocations.
#[derive(Debug, Default)]
pub struct Parser {
    pub(crate) state: ParserState,
    pub(crate) channel: u8,
    pub(crate) led_count: u16,
    pub(crate) write_index: u16,
    pub(crate) rgb_index: u8,
    pub(crate) pending_r: u8,
    pub(crate) pending_g: u8,
    pub(crate) auto_flush: bool,
}

impl Parser {
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Whether the decoder is between commands.
    pub fn is_resting(&self) -> bool {
        matches!(self.state, ParserState::WaitCommand)
    }

    /// Abort or complete: back to the resting state.
    pub(crate) fn rest(&mut self) {
        self.state = ParserState::WaitCommand;
    }
}
