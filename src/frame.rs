//! Pixel and frame data model
//!
//! A [`Frame`] is one displayed instant: an ordered list of [`Pixel`]s.
//! A [`FrameBuffer`] is the full playback sequence of an animation.

use alloc::vec::Vec;

use crate::color::{Rgb, gray};

/// Ordered list of pixels shown at one instant
///
/// A frame may be dense (one pixel per LED) or sparse (only lit LEDs).
pub type Frame = Vec<Pixel>;

/// Ordered list of frames. An empty buffer means "no content".
pub type FrameBuffer = Vec<Frame>;

/// Target color of a single LED
///
/// The index is the pixel's identity and is fixed at construction.
/// Colors are state and can be reassigned freely with [`Pixel::assign_color`].
/// Neither the index nor the channels are validated here; out-of-range
/// indices are dropped when the frame is written to the strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    index: u16,
    pub color: Rgb,
}

impl Pixel {
    pub const fn new(index: u16, color: Rgb) -> Self {
        Self { index, color }
    }

    /// Pixel with all three channels set to `value`
    pub const fn gray(index: u16, value: u8) -> Self {
        Self::new(index, gray(value))
    }

    /// LED position, 0-based
    pub const fn index(&self) -> u16 {
        self.index
    }

    /// Copy the color of `other`, keeping this pixel's index
    pub fn assign_color(&mut self, other: &Pixel) {
        self.color = other.color;
    }
}

/// How a frame is composed onto the strip
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FrameMode {
    /// Clear the strip before writing the frame.
    ///
    /// LEDs the frame does not mention go dark.
    #[default]
    Replace,
    /// Write the frame over the previous strip contents.
    ///
    /// LEDs the frame does not mention keep their last color.
    Overlay,
}
