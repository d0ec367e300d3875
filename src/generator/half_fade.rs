//! Half fade effect
//!
//! Starts fully lit; button presses dim the upper or the lower half.

use super::Generator;
use crate::{
    color::level_to_u8,
    frame::{Frame, FrameBuffer, Pixel},
};

#[derive(Debug, Clone, PartialEq)]
pub struct HalfFadeParams {
    /// Level removed from a half on each press, `[0, 1]`
    pub dim_level: f32,
    /// Ramp between the halves instead of a hard split
    pub gradient_fade: bool,
}

/// Strip with the lower and upper halves at their own levels
///
/// With `gradient` the level ramps linearly from the first LED (lower level)
/// to the last LED (upper level).
pub(crate) fn half_fade_frame(led_count: u16, lower: f32, upper: f32, gradient: bool) -> Frame {
    let middle = led_count / 2;
    let last = f32::from(led_count.saturating_sub(1).max(1));
    (0..led_count)
        .map(|led| {
            let level = if gradient {
                lower + (upper - lower) * f32::from(led) / last
            } else if led < middle {
                lower
            } else {
                upper
            };
            Pixel::gray(led, level_to_u8(level))
        })
        .collect()
}

impl Generator for HalfFadeParams {
    const NAME: &'static str = "Half Fade";

    fn frames(&self, led_count: u16) -> FrameBuffer {
        alloc::vec![half_fade_frame(led_count, 1.0, 1.0, self.gradient_fade)]
    }
}
