//! Solid-color cycling over all channels.

use super::{Pattern, TICKS_PER_COLOR};
use crate::color::{BLACK, BLUE, CYAN, GREEN, MAGENTA, RED, Rgb, WHITE, YELLOW};

const RGB_SEQUENCE: [Rgb; 3] = [RED, GREEN, BLUE];

const FULL_SEQUENCE: [Rgb; 8] = [RED, GREEN, BLUE, CYAN, MAGENTA, YELLOW, WHITE, BLACK];

/// Solid red, green, blue held one second each.
pub struct RgbCyclePattern;

impl Pattern for RgbCyclePattern {
    fn render(&self, frame: u32, _channel: u8, leds: &mut [Rgb]) {
        let phase = (frame / TICKS_PER_COLOR) as usize % RGB_SEQUENCE.len();
        leds.fill(RGB_SEQUENCE[phase]);
    }
}

/// Eight-color sweep (primaries, secondaries, white, black), one second
/// per color. Useful for spotting dead subpixels and color-order mistakes.
pub struct ColorCyclePattern;

impl Pattern for ColorCyclePattern {
    fn render(&self, frame: u32, _channel: u8, leds: &mut [Rgb]) {
        let phase = (frame / TICKS_PER_COLOR) as usize % FULL_SEQUENCE.len();
        leds.fill(FULL_SEQUENCE[phase]);
    }
}
