//! Physical strip handle
//!
//! [`Strip`] stages colors in a fixed-capacity buffer and pushes the whole
//! buffer to the [`OutputDriver`] on [`Strip::show`].

use core::fmt::Debug;

use heapless::Vec;
use smart_leds::SmartLedsWrite;

use crate::OutputDriver;
use crate::color::{BLACK, Rgb};

pub(crate) struct Strip<O: OutputDriver, const MAX_LEDS: usize> {
    driver: O,
    pixels: Vec<Rgb, MAX_LEDS>,
}

impl<O: OutputDriver, const MAX_LEDS: usize> Strip<O, MAX_LEDS> {
    /// Buffer sized for `led_count` LEDs; the driver is not touched until
    /// [`Strip::begin`]
    pub(crate) fn new(driver: O, led_count: usize) -> Self {
        let mut strip = Self {
            driver,
            pixels: Vec::new(),
        };
        strip.resize(led_count);
        strip
    }

    fn resize(&mut self, led_count: usize) {
        self.pixels.clear();
        // cannot fail: the length never exceeds the capacity
        let _ = self.pixels.resize(led_count.min(MAX_LEDS), BLACK);
    }

    /// Size the buffer for `led_count` LEDs, all black, and configure the driver
    ///
    /// `led_count` is capped at `MAX_LEDS`.
    pub(crate) fn begin(&mut self, led_count: usize, pin: u8) {
        self.resize(led_count);
        self.driver.begin(self.pixels.len(), pin);
    }

    /// Stage a color; indices outside the strip are ignored
    pub(crate) fn set_pixel(&mut self, index: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(index) {
            *pixel = color;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.pixels.fill(BLACK);
    }

    /// Push all staged colors to the hardware
    pub(crate) fn show(&mut self) {
        self.driver.write(&self.pixels);
    }

    pub(crate) const fn pixels(&self) -> &Vec<Rgb, MAX_LEDS> {
        &self.pixels
    }
}

/// [`OutputDriver`] over any `smart-leds` writer
///
/// Write errors are logged and the frame is dropped.
pub struct SmartLedsOutput<W> {
    writer: W,
}

impl<W> SmartLedsOutput<W> {
    pub const fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W> OutputDriver for SmartLedsOutput<W>
where
    W: SmartLedsWrite<Color = Rgb>,
    W::Error: Debug,
{
    fn write(&mut self, colors: &[Rgb]) {
        if let Err(err) = self.writer.write(colors.iter().copied()) {
            log::warn!("strip write failed: {:?}", err);
        }
    }
}
