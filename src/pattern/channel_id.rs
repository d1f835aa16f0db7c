//! Strip identification with minimal lit-pixel count.

use super::{HALF_CYCLE_TICKS, Pattern};
use crate::color::{BLACK, CHANNEL_COLORS, Rgb};

/// The first `channel + 1` pixels show the channel's identity color on one
/// half of a 1 Hz toggle, the last `channel + 1` on the other half, and
/// everything in between stays dark. Lights the fewest pixels that still
/// identify both the strip and its orientation.
pub struct ChannelIdPattern;

impl Pattern for ChannelIdPattern {
    fn render(&self, frame: u32, channel: u8, leds: &mut [Rgb]) {
        let toggle = (frame / HALF_CYCLE_TICKS) & 1 == 1;
        let ident = usize::from(channel) + 1;
        let color = CHANNEL_COLORS[usize::from(channel & 7)];
        let count = leds.len();

        for (i, led) in leds.iter_mut().enumerate() {
            let is_first = i < ident;
            let is_last = i >= count.saturating_sub(ident);
            *led = if is_first {
                if toggle { color } else { BLACK }
            } else if is_last {
                if toggle { BLACK } else { color }
            } else {
                BLACK
            };
        }
    }
}
