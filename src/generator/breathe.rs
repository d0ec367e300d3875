//! Breathe effect
//!
//! Every LED follows the same raised-cosine brightness curve between a
//! minimum and a maximum level.

use core::f32::consts::PI;

use alloc::vec::Vec;

use super::Generator;
use crate::{
    color::level_to_u8,
    frame::{FrameBuffer, Pixel},
};

/// Frames in one pass of the breathe animation
const BREATHE_FRAME_COUNT: usize = 90;

/// Whole strip fading in and out
#[derive(Debug, Clone, PartialEq)]
pub struct BreatheParams {
    /// Lowest level, `[0, 1]`
    pub min_brightness: f32,
    /// Highest level, `[0, 1]`
    pub max_brightness: f32,
    /// Full breaths per pass
    pub frequency: f32,
}

impl BreatheParams {
    /// Brightness level at pass position `t` in `[0, 1)`
    fn level_at(&self, t: f32) -> f32 {
        let eased = 0.5 - 0.5 * libm::cosf(2.0 * PI * t * self.frequency);
        self.min_brightness + (self.max_brightness - self.min_brightness) * eased
    }
}

impl Generator for BreatheParams {
    const NAME: &'static str = "Breathe";

    #[allow(clippy::cast_precision_loss)]
    fn frames(&self, led_count: u16) -> FrameBuffer {
        (0..BREATHE_FRAME_COUNT)
            .map(|i| {
                let value = level_to_u8(self.level_at(i as f32 / BREATHE_FRAME_COUNT as f32));
                (0..led_count)
                    .map(|led| Pixel::gray(led, value))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
