//! Pulse effect
//!
//! Quick cubic rise followed by an exponential decay, on the whole strip.

use alloc::vec::Vec;

use super::Generator;
use crate::{
    color::level_to_u8,
    frame::{FrameBuffer, Pixel},
};

const MIN_FREQUENCY: f32 = 0.1;
const MIN_FRAME_COUNT: usize = 10;
/// Frames of one pulse at unit frequency
const BASE_FRAME_COUNT: f32 = 60.0;
const DECAY_RATE: f32 = 2.5;

#[derive(Debug, Clone, PartialEq)]
pub struct PulseParams {
    /// Resting level, `[0, 1]`
    pub min_brightness: f32,
    /// Peak level, `[0, 1]`
    pub max_brightness: f32,
    /// Share of the pulse spent rising, `[0, 1]`
    pub attack_proportion: f32,
    /// Relative speed, higher is faster
    pub frequency: f32,
}

impl PulseParams {
    fn frequency(&self) -> f32 {
        self.frequency.max(MIN_FREQUENCY)
    }

    /// Total frames and attack frames of one pulse
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn frame_counts(&self) -> (usize, usize) {
        let total = ((BASE_FRAME_COUNT / self.frequency()) as usize).max(MIN_FRAME_COUNT);
        let attack_proportion = self.attack_proportion.clamp(0.0, 1.0);
        let attack = ((total as f32 * attack_proportion) as usize).clamp(1, total);
        (total, attack)
    }
}

impl Generator for PulseParams {
    const NAME: &'static str = "Pulse";

    #[allow(clippy::cast_precision_loss)]
    fn frames(&self, led_count: u16) -> FrameBuffer {
        let (total, attack) = self.frame_counts();
        let decay = total - attack;
        let span = self.max_brightness - self.min_brightness;
        let decay_rate = DECAY_RATE * self.frequency();

        (0..total)
            .map(|i| {
                let level = if i < attack {
                    let progress = i as f32 / attack as f32;
                    self.min_brightness + span * progress * progress * progress
                } else {
                    let progress = (i - attack) as f32 / decay as f32;
                    self.max_brightness - span * (1.0 - libm::expf(-decay_rate * progress))
                };
                let value = level_to_u8(level);
                (0..led_count)
                    .map(|led| Pixel::gray(led, value))
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
