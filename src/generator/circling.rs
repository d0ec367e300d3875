//! Circling effects
//!
//! The strip is treated as a ring: one frame per LED, the moving position
//! wraps around `led_count`.

use alloc::vec::Vec;

use super::Generator;
use crate::frame::{FrameBuffer, Pixel};

/// Brightness ratio between consecutive trail LEDs
const TRAIL_DECAY: f32 = 0.2;
/// Trail LEDs dimmer than this are not emitted
const MIN_TRAIL_BRIGHTNESS: u8 = 5;

/// Ring position of `frame` moving in the given direction
fn ring_position(frame: u16, led_count: u16, clockwise: bool) -> u16 {
    if clockwise {
        frame % led_count
    } else {
        (led_count - frame % led_count) % led_count
    }
}

/// LED `offset` steps away from `from`, forward or backward around the ring
#[allow(clippy::cast_possible_truncation)]
fn ring_step(from: u16, offset: u16, forward: bool, led_count: u16) -> u16 {
    let count = u32::from(led_count);
    let offset = u32::from(offset) % count;
    let led = if forward {
        u32::from(from) + offset
    } else {
        u32::from(from) + count - offset
    };
    (led % count) as u16
}

/// Shortest distance between two LEDs on the ring
fn ring_distance(a: u16, b: u16, led_count: u16) -> u16 {
    let distance = a.abs_diff(b);
    if distance > led_count / 2 {
        led_count - distance
    } else {
        distance
    }
}

/// Single bright LED running around the ring, optionally with a trail
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CirclingBrightDotParams {
    /// Without a trail when set
    pub abrupt_fade: bool,
    pub clockwise: bool,
    /// Trail length including the dot itself
    pub trail_length: u16,
    pub brightness: u8,
}

impl CirclingBrightDotParams {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn trail_brightness(&self, distance: u16) -> u8 {
        (f32::from(self.brightness) * libm::powf(TRAIL_DECAY, f32::from(distance))) as u8
    }
}

impl Generator for CirclingBrightDotParams {
    const NAME: &'static str = "Circling Bright Dot";

    fn frames(&self, led_count: u16) -> FrameBuffer {
        if led_count == 0 {
            return FrameBuffer::new();
        }
        (0..led_count)
            .map(|frame| {
                let main = ring_position(frame, led_count, self.clockwise);
                let mut pixels = Vec::with_capacity(usize::from(self.trail_length.max(1)));
                pixels.push(Pixel::gray(main, self.brightness));

                if !self.abrupt_fade {
                    for i in 1..self.trail_length {
                        let value = self.trail_brightness(i);
                        if value < MIN_TRAIL_BRIGHTNESS {
                            continue;
                        }
                        // the trail follows behind the dot
                        let led = ring_step(main, i, !self.clockwise, led_count);
                        pixels.push(Pixel::gray(led, value));
                    }
                }
                pixels
            })
            .collect()
    }
}

/// Fully lit ring with a dark spot running around it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CirclingDarkSpotParams {
    /// Single dark LED when set, quadratic edge otherwise
    pub abrupt_transition: bool,
    pub clockwise: bool,
    pub spot_width: u16,
    pub background_brightness: u8,
}

impl CirclingDarkSpotParams {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn led_brightness(&self, distance: u16) -> u8 {
        if self.abrupt_transition {
            return if distance == 0 {
                0
            } else {
                self.background_brightness
            };
        }
        if distance >= self.spot_width {
            return self.background_brightness;
        }
        let factor = f32::from(distance) / f32::from(self.spot_width);
        (f32::from(self.background_brightness) * (factor * factor).min(1.0)) as u8
    }
}

impl Generator for CirclingDarkSpotParams {
    const NAME: &'static str = "Circling Dark Spot";

    fn frames(&self, led_count: u16) -> FrameBuffer {
        if led_count == 0 {
            return FrameBuffer::new();
        }
        (0..led_count)
            .map(|frame| {
                let main = ring_position(frame, led_count, self.clockwise);
                (0..led_count)
                    .map(|led| {
                        let distance = ring_distance(led, main, led_count);
                        Pixel::gray(led, self.led_brightness(distance))
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    }
}
