//! Per-LED base-3 identity codes for camera calibration.
//!
//! Every physical LED gets a global id `channel * 200 + index` encoded as
//! a checksummed base-3 number and blinked out over time: black, a magenta
//! sync marker, black, then nine digit frames each followed by a black
//! spacer. An external camera watching the whole installation can recover
//! every LED's id and position from one cycle.

use super::Pattern;
use crate::MAX_LEDS_PER_CHANNEL;
use crate::color::{BLACK, BLUE, GREEN, MAGENTA, RED, Rgb};

/// Base-3 digits shown per code cycle. Nine digits cover ids up to
/// `3^9 / 9` with the checksum folded in, comfortably above the 1600
/// addressable LEDs.
pub const TERNARY_DIGITS: u32 = 9;

/// Ticks each frame of the code sequence is held (0.2 s at 30 Hz).
const TICKS_PER_STATE: u32 = 6;

/// States per cycle: black, sync, black, then digit/spacer pairs.
const CYCLE_STATES: u32 = 3 + TERNARY_DIGITS * 2;

/// Digit 0, 1, 2 → red, green, blue.
const DIGIT_COLORS: [Rgb; 3] = [RED, GREEN, BLUE];

/// Encode an LED id and return the base-3 digit at `position` (0 = least
/// significant).
///
/// The code is `9 * id` plus the checksum that makes it divisible by 7,
/// so a decoder can recover `id` as `n / 9` and reject misreads where
/// `n % 7 != 0`.
pub fn ternary_digit(led_id: u32, position: u32) -> u8 {
    let mut n = led_id * 9;
    n += 7 - n % 7;
    for _ in 0..position {
        n /= 3;
    }
    (n % 3) as u8
}

pub struct TernaryPattern;

impl Pattern for TernaryPattern {
    fn render(&self, frame: u32, channel: u8, leds: &mut [Rgb]) {
        let state = (frame / TICKS_PER_STATE) % CYCLE_STATES;

        for (i, led) in leds.iter_mut().enumerate() {
            *led = match state {
                0 | 2 => BLACK,
                1 => MAGENTA, // sync marker
                _ => {
                    let digit_frame = state - 3;
                    if digit_frame % 2 == 0 {
                        let position = digit_frame / 2;
                        let global_id = u32::from(channel) * MAX_LEDS_PER_CHANNEL as u32
                            + i as u32;
                        DIGIT_COLORS[usize::from(ternary_digit(global_id, position))]
                    } else {
                        // spacer between digits
                        BLACK
                    }
                }
            };
        }
    }
}
