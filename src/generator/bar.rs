//! Bar effects
//!
//! All bars are centred on `led_count / 2`. With an abrupt fade only the lit
//! LEDs are emitted (sparse frames); with a soft fade every LED is emitted and
//! LEDs outside the bar get a linear falloff from the nearest bar edge.

use alloc::vec::Vec;

use super::Generator;
use crate::frame::{Frame, FrameBuffer, Pixel};

/// Soft edge falloff per LED for the growing and shrinking bars
const HEIGHT_FALLOFF: i32 = 5;
/// Soft edge falloff per LED for the extending and extinguishing bars
const EXTENT_FALLOFF: i32 = 25;
/// Milliseconds of hold represented by one retention frame
const RETENTION_FRAME_MS: u16 = 100;

/// Symmetric bar covering `low..=high`
///
/// `soft_falloff` selects the soft edge and its per-LED falloff.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn centered_bar_frame(
    led_count: u16,
    low: i32,
    high: i32,
    brightness: u8,
    soft_falloff: Option<i32>,
) -> Frame {
    let count = i32::from(led_count);
    match soft_falloff {
        None => (low.max(0)..=high.min(count - 1))
            .map(|led| Pixel::gray(led as u16, brightness))
            .collect(),
        Some(falloff) => (0..count)
            .map(|led| {
                let value = if (low..=high).contains(&led) {
                    brightness
                } else {
                    let distance = (led - low).abs().min((led - high).abs());
                    (i32::from(brightness) - distance * falloff).max(0) as u8
                };
                Pixel::gray(led as u16, value)
            })
            .collect(),
    }
}

/// Bar of `bar_size` LEDs starting half a bar before `center`
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn moving_bar_frame(led_count: u16, center: i32, bar_size: u16, brightness: u8) -> Frame {
    let size = i32::from(bar_size.max(1));
    let start = center - size / 2;
    (start..start + size)
        .filter(|led| (0..i32::from(led_count)).contains(led))
        .map(|led| Pixel::gray(led as u16, brightness))
        .collect()
}

/// One-sided bar from the centre, `extent` LEDs up or down
///
/// With a soft edge the outermost LED is at half brightness.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub(crate) fn grow_frame(
    led_count: u16,
    extent: u16,
    upward: bool,
    brightness: u8,
    abrupt_fade: bool,
) -> Frame {
    let count = i32::from(led_count);
    let middle = count / 2;
    let extent = i32::from(extent);
    let edge = if upward { middle + extent } else { middle - extent };

    let pixel = |led: i32| {
        let value = if !abrupt_fade && led == edge {
            brightness / 2
        } else {
            brightness
        };
        Pixel::gray(led as u16, value)
    };

    if upward {
        (middle..=edge).take_while(|led| *led < count).map(pixel).collect()
    } else {
        (edge..=middle).rev().take_while(|led| *led >= 0).map(pixel).collect()
    }
}

/// Growing or shrinking bar of `height` LEDs
pub(crate) fn height_frame(led_count: u16, height: u16, brightness: u8, abrupt_fade: bool) -> Frame {
    let middle = i32::from(led_count / 2);
    let half = i32::from(height / 2);
    centered_bar_frame(
        led_count,
        middle - half,
        middle + half,
        brightness,
        (!abrupt_fade).then_some(HEIGHT_FALLOFF),
    )
}

/// Bar reaching `extent` LEDs to both sides of the centre
pub(crate) fn extent_frame(led_count: u16, extent: u16, brightness: u8, abrupt_fade: bool) -> Frame {
    let middle = i32::from(led_count / 2);
    let extent = i32::from(extent);
    centered_bar_frame(
        led_count,
        middle - extent,
        middle + extent,
        brightness,
        (!abrupt_fade).then_some(EXTENT_FALLOFF),
    )
}

fn default_min_height(led_count: u16) -> u16 {
    (led_count / 10).max(1)
}

/// Centred bar growing from `start_height` to `end_height`
///
/// A zero start height defaults to a tenth of the strip, a zero end height
/// to the whole strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowingBarParams {
    pub max_brightness: u8,
    pub start_height: u16,
    pub end_height: u16,
    pub abrupt_fade: bool,
}

impl GrowingBarParams {
    /// Height of the first frame
    pub fn first_height(&self, led_count: u16) -> u16 {
        match self.start_height {
            0 => default_min_height(led_count),
            height => height,
        }
    }
}

impl Generator for GrowingBarParams {
    const NAME: &'static str = "Growing Bar";

    fn frames(&self, led_count: u16) -> FrameBuffer {
        let start = self.first_height(led_count);
        let end = match self.end_height {
            0 => led_count,
            height => height,
        };
        (start..=end)
            .map(|height| height_frame(led_count, height, self.max_brightness, self.abrupt_fade))
            .collect()
    }
}

/// Centred bar shrinking from `start_height` to `end_height`
///
/// A zero start height defaults to the whole strip, a zero end height to a
/// tenth of the strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShrinkingBarParams {
    pub max_brightness: u8,
    pub start_height: u16,
    pub end_height: u16,
    pub abrupt_fade: bool,
}

impl Generator for ShrinkingBarParams {
    const NAME: &'static str = "Shrinking Bar";

    fn frames(&self, led_count: u16) -> FrameBuffer {
        let start = match self.start_height {
            0 => led_count,
            height => height,
        };
        let end = match self.end_height {
            0 => default_min_height(led_count),
            height => height,
        };
        (end..=start)
            .rev()
            .map(|height| height_frame(led_count, height, self.max_brightness, self.abrupt_fade))
            .collect()
    }
}

/// Bar extending symmetrically from the centre by one LED per frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtendingBarParams {
    pub max_brightness: u8,
    /// Final distance from the centre, zero for half the strip
    pub end_distance: u16,
    pub abrupt_fade: bool,
}

impl Generator for ExtendingBarParams {
    const NAME: &'static str = "Extending Bar";

    fn frames(&self, led_count: u16) -> FrameBuffer {
        let end = match self.end_distance {
            0 => led_count / 2,
            distance => distance,
        };
        (0..=end)
            .map(|extent| extent_frame(led_count, extent, self.max_brightness, self.abrupt_fade))
            .collect()
    }
}

/// Fully lit strip contracting to its centre, held, then switched off
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtinguishingBarParams {
    pub max_brightness: u8,
    /// Hold time of the centre LED in milliseconds, one frame per 100 ms
    pub retention_time: u16,
    pub abrupt_fade: bool,
}

impl ExtinguishingBarParams {
    pub const fn retention_frames(&self) -> u16 {
        self.retention_time / RETENTION_FRAME_MS
    }
}

impl Generator for ExtinguishingBarParams {
    const NAME: &'static str = "Extinguishing Bar";

    fn frames(&self, led_count: u16) -> FrameBuffer {
        let middle = led_count / 2;
        let retention = usize::from(self.retention_frames());
        let mut frames = Vec::with_capacity(usize::from(middle) + retention + 3);

        frames.push(
            (0..led_count)
                .map(|led| Pixel::gray(led, self.max_brightness))
                .collect(),
        );
        frames.extend(
            (0..=middle)
                .rev()
                .map(|extent| extent_frame(led_count, extent, self.max_brightness, self.abrupt_fade)),
        );

        let hold: Frame = alloc::vec![Pixel::gray(middle, self.max_brightness)];
        frames.extend(core::iter::repeat_n(hold, retention));

        frames.push((0..led_count).map(|led| Pixel::gray(led, 0)).collect());
        frames
    }
}

/// Single bar in the centre, moved by button presses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovingBarParams {
    pub brightness: u8,
    /// Bar length in LEDs, zero for one LED
    pub bar_size: u16,
}

impl Generator for MovingBarParams {
    const NAME: &'static str = "Moving Bar";

    fn frames(&self, led_count: u16) -> FrameBuffer {
        alloc::vec![moving_bar_frame(
            led_count,
            i32::from(led_count / 2),
            self.bar_size,
            self.brightness,
        )]
    }
}

/// Bar growing from the centre towards the end of the strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowUpParams {
    pub brightness: u8,
    /// Final distance from the centre, zero for half the strip
    pub end_distance: u16,
    pub abrupt_fade: bool,
}

impl Generator for GrowUpParams {
    const NAME: &'static str = "Grow Up";

    fn frames(&self, led_count: u16) -> FrameBuffer {
        let end = match self.end_distance {
            0 => led_count / 2,
            distance => distance,
        };
        (0..=end)
            .map(|extent| grow_frame(led_count, extent, true, self.brightness, self.abrupt_fade))
            .collect()
    }
}

/// Bar growing from the centre towards the start of the strip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowDownParams {
    pub brightness: u8,
    /// Final distance from the centre, zero for half the strip
    pub end_distance: u16,
    pub abrupt_fade: bool,
}

impl Generator for GrowDownParams {
    const NAME: &'static str = "Grow Down";

    fn frames(&self, led_count: u16) -> FrameBuffer {
        let end = match self.end_distance {
            0 => led_count / 2,
            distance => distance,
        };
        (0..=end)
            .map(|extent| grow_frame(led_count, extent, false, self.brightness, self.abrupt_fade))
            .collect()
    }
}
