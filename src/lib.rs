#![no_std]

extern crate alloc;

pub mod animation;
pub mod color;
pub mod frame;
pub mod generator;
pub mod interactive;
pub mod render_loop;
pub mod renderer;
pub mod strip;

pub use animation::{Animation, SharedAnimation, name_hash};
pub use frame::{Frame, FrameBuffer, FrameMode, Pixel};
pub use generator::{EffectId, EffectParams, Generator, PresetOptions};
pub use interactive::{Button, ButtonQueue, InteractiveMode, InteractiveSession};
pub use render_loop::{PassOutcome, RenderTask, render_pass};
pub use renderer::{
    DEFAULT_CHECK_INTERVAL, LedCountOutOfRange, MIN_SPEED, RenderState, Renderer, RendererConfig,
};
pub use strip::SmartLedsOutput;

pub use color::Rgb;
pub use embassy_time::{Duration, Instant};

/// Abstract LED driver trait
///
/// Implement this trait to support different hardware platforms.
/// The renderer is generic over this trait and is its only caller.
pub trait OutputDriver {
    /// (Re)configure the driver for a strip of `led_count` LEDs on `pin`
    ///
    /// Called on screen initialization and after every LED count change.
    fn begin(&mut self, _led_count: usize, _pin: u8) {}

    /// Write colors to the LED strip
    fn write(&mut self, colors: &[Rgb]);
}
