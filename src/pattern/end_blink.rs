//! Strip-end marker blink.

use super::{HALF_CYCLE_TICKS, Pattern};
use crate::color::{BLACK, RED, Rgb};

/// Pixel 0 and the last pixel alternate red in antiphase at 1 Hz; all
/// other pixels stay dark. Marks both physical ends of a run.
pub struct EndBlinkPattern;

impl Pattern for EndBlinkPattern {
    fn render(&self, frame: u32, _channel: u8, leds: &mut [Rgb]) {
        let toggle = (frame / HALF_CYCLE_TICKS) & 1 == 1;
        let count = leds.len();

        for (i, led) in leds.iter_mut().enumerate() {
            *led = if i == 0 {
                if toggle { RED } else { BLACK }
            } else if i + 1 == count {
                if toggle { BLACK } else { RED }
            } else {
                BLACK
            };
        }
    }
}
