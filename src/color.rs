//! Color pipeline: gamma correction and hardware word packing.
//!
//! Raw RGB exists only in flight through this module; channel buffers
//! store the packed word form exclusively.

use smart_leds::RGB8;

use crate::NUM_CHANNELS;

pub type Rgb = RGB8;

pub const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
pub const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
pub const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
pub const CYAN: Rgb = Rgb { r: 0, g: 255, b: 255 };
pub const MAGENTA: Rgb = Rgb { r: 255, g: 0, b: 255 };
pub const YELLOW: Rgb = Rgb { r: 255, g: 255, b: 0 };
pub const WHITE: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
pub const LIGHT_RED: Rgb = Rgb {
    r: 255,
    g: 128,
    b: 128,
};
pub const LIGHT_BLUE: Rgb = Rgb {
    r: 128,
    g: 128,
    b: 255,
};

/// High-saturation identity colors used to tell channels apart in the
/// diagnostic patterns.
pub const CHANNEL_COLORS: [Rgb; NUM_CHANNELS] = [
    RED, GREEN, BLUE, CYAN, MAGENTA, YELLOW, LIGHT_RED, LIGHT_BLUE,
];

/// Gamma lookup plus packing into the transfer word layout.
///
/// The table maps `i` to `round(255 * (i/255)^gamma)` with `table[0] = 0`,
/// or to the identity when gamma correction is disabled.
pub struct ColorPipeline {
    lut: [u8; 256],
}

impl ColorPipeline {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn new(gamma: Option<f32>) -> Self {
        let mut lut = [0u8; 256];
        match gamma {
            Some(gamma) => {
                for (i, slot) in lut.iter_mut().enumerate().skip(1) {
                    let normalized = i as f32 / 255.0;
                    let corrected = libm::powf(normalized, gamma);
                    *slot = (corrected * 255.0 + 0.5) as u8;
                }
            }
            None => {
                for (i, slot) in lut.iter_mut().enumerate() {
                    *slot = i as u8;
                }
            }
        }
        Self { lut }
    }

    /// Look up the drive value for one raw component.
    #[inline]
    pub fn correct(&self, value: u8) -> u8 {
        self.lut[usize::from(value)]
    }

    /// Encode one raw color into the word the signal generator consumes:
    /// gamma per component, G/R/B order, shifted into bits [31:8].
    #[inline]
    pub fn encode(&self, color: Rgb) -> u32 {
        pack(
            self.correct(color.g),
            self.correct(color.r),
            self.correct(color.b),
        )
    }
}

/// Pack already-corrected magnitudes into the transfer word layout.
#[inline]
pub const fn pack(g: u8, r: u8, b: u8) -> u32 {
    ((g as u32) << 16 | (r as u32) << 8 | (b as u32)) << 8
}

/// Unpack the (G, R, B) magnitudes of an encoded word.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn components(word: u32) -> (u8, u8, u8) {
    let grb = word >> 8;
    (
        ((grb >> 16) & 0xFF) as u8,
        ((grb >> 8) & 0xFF) as u8,
        (grb & 0xFF) as u8,
    )
}
