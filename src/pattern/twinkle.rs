//! Sine-modulated twinkle in the channel identity color.

use super::Pattern;
use crate::color::{CHANNEL_COLORS, Rgb};

const SINE_TABLE_SIZE: usize = 512;

/// Every pixel breathes in the channel's identity color with a phase and
/// speed derived deterministically from its position, sampled from a
/// precomputed one-cycle sine table spanning 30%–100% brightness.
pub struct TwinklePattern {
    sine: [u16; SINE_TABLE_SIZE],
}

impl TwinklePattern {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new() -> Self {
        let mut sine = [0u16; SINE_TABLE_SIZE];
        for (i, slot) in sine.iter_mut().enumerate() {
            let angle = i as f32 * core::f32::consts::TAU / SINE_TABLE_SIZE as f32;
            let brightness = 0.3 + 0.7 * (libm::sinf(angle) * 0.5 + 0.5);
            // 1.15 fixed point, full brightness = 32768
            *slot = (brightness * 32768.0) as u16;
        }
        Self { sine }
    }
}

impl Default for TwinklePattern {
    fn default() -> Self {
        Self::new()
    }
}

impl Pattern for TwinklePattern {
    #[allow(clippy::cast_possible_truncation)]
    fn render(&self, frame: u32, channel: u8, leds: &mut [Rgb]) {
        let color = CHANNEL_COLORS[usize::from(channel & 7)];
        let table_size = SINE_TABLE_SIZE as u32;

        for (i, led) in leds.iter_mut().enumerate() {
            let seed = u32::from(channel) * 37 + i as u32 * 73;
            let phase = seed.wrapping_mul(17) % table_size;
            let speed = seed % 7 + 1;

            let position = frame.wrapping_mul(speed).wrapping_add(phase) % table_size;
            let brightness = u32::from(self.sine[position as usize]);

            *led = Rgb {
                r: ((u32::from(color.r) * brightness) >> 15) as u8,
                g: ((u32::from(color.g) * brightness) >> 15) as u8,
                b: ((u32::from(color.b) * brightness) >> 15) as u8,
            };
        }
    }
}
