//! Power-safety scaling of encoded frames.

use crate::color;

/// Sum of gamma-corrected component magnitudes over a frame — the proxy
/// for the strip's instantaneous current draw.
pub fn brightness_units(words: &[u32]) -> u32 {
    words
        .iter()
        .map(|&word| {
            let (g, r, b) = color::components(word);
            u32::from(g) + u32::from(r) + u32::from(b)
        })
        .sum()
}

/// Uniform scale-down keeping a frame under a fixed brightness budget.
///
/// Runs after a full frame write and before the flush. A frame at or
/// under budget is left byte-identical; scaling never refuses a flush
/// and surfaces only through the channel's limit-event counter.
#[derive(Debug, Clone, Copy)]
pub struct CurrentLimiter {
    threshold: Option<u32>,
}

impl CurrentLimiter {
    pub const fn new(threshold: Option<u32>) -> Self {
        Self { threshold }
    }

    /// Scale the frame in place if it exceeds the budget. Returns whether
    /// scaling happened.
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn apply(&self, words: &mut [u32]) -> bool {
        let Some(threshold) = self.threshold else {
            return false;
        };
        let total = brightness_units(words);
        // Covers the zero sum, so the scale division below is always valid.
        if total <= threshold {
            return false;
        }
        let scale = threshold as f32 / total as f32;
        for word in &mut *words {
            let (g, r, b) = color::components(*word);
            *word = color::pack(
                (f32::from(g) * scale) as u8,
                (f32::from(r) * scale) as u8,
                (f32::from(b) * scale) as u8,
            );
        }
        true
    }
}
