//! Shared render state
//!
//! The [`Renderer`] is the only owner of the strip and of the active
//! animation. The render core and the control core share it by reference;
//! every accessor runs in a short critical section, and no critical section
//! is ever held across a delay.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::{Duration, block_for};

use crate::OutputDriver;
use crate::animation::{Animation, SharedAnimation};
use crate::color::{Rgb, scale_color};
use crate::frame::{FrameBuffer, FrameMode, Pixel};
use crate::strip::Strip;

/// Lowest accepted speed coefficient
pub const MIN_SPEED: f32 = 0.1;
/// Default polling slice of [`Renderer::interruptible_delay`]
pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_millis(10);
/// Bytes of the animation name kept in a [`RenderState`]
pub const ANIMATION_NAME_CAPACITY: usize = 32;

/// Initial renderer configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RendererConfig {
    pub led_count: u16,
    /// Data pin handed to the output driver
    pub pin: u8,
    /// Delay between frames at unit speed
    pub frame_delay: Duration,
    /// Pause between passes, also the quiescence wait of an animation swap
    pub repeat_delay: Duration,
    pub speed: f32,
    /// Brightness coefficient applied at write time, `[0, 1]`
    pub peak_brightness: f32,
    pub repeat: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            led_count: 10,
            pin: 42,
            frame_delay: Duration::from_millis(50),
            repeat_delay: Duration::from_millis(50),
            speed: 1.0,
            peak_brightness: 0.40,
            repeat: true,
        }
    }
}

/// Error returned when an LED count is zero or above the strip capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedCountOutOfRange {
    pub requested: u16,
    pub max: usize,
}

/// Point-in-time copy of the render configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    pub exit_early: bool,
    pub is_running: bool,
    pub repeat: bool,
    pub led_count: u16,
    pub pin: u8,
    pub frame_delay: Duration,
    pub repeat_delay: Duration,
    pub speed: f32,
    pub peak_brightness: f32,
    /// Animation name, truncated to [`ANIMATION_NAME_CAPACITY`] bytes
    pub animation_name: heapless::String<ANIMATION_NAME_CAPACITY>,
    pub animation_hash: u32,
}

impl RenderState {
    /// Frame delay adjusted by the speed coefficient
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn frame_interval(&self) -> Duration {
        let speed = self.speed.max(MIN_SPEED);
        Duration::from_micros((self.frame_delay.as_micros() as f32 / speed) as u64)
    }
}

#[derive(Debug, Clone, Copy)]
struct Settings {
    exit_early: bool,
    is_running: bool,
    repeat: bool,
    led_count: u16,
    pin: u8,
    frame_delay: Duration,
    repeat_delay: Duration,
    speed: f32,
    peak_brightness: f32,
}

struct RendererState<O: OutputDriver, const MAX_LEDS: usize> {
    settings: Settings,
    strip: Strip<O, MAX_LEDS>,
}

fn clamp_brightness(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

fn clamp_speed(value: f32) -> f32 {
    // `max` also maps NaN to the floor
    value.max(MIN_SPEED)
}

fn truncated_name(name: &str) -> heapless::String<ANIMATION_NAME_CAPACITY> {
    let mut truncated = heapless::String::new();
    for c in name.chars() {
        if truncated.push(c).is_err() {
            break;
        }
    }
    truncated
}

/// Render engine shared between the render and control cores
///
/// `MAX_LEDS` is the hardware limit of the strip.
pub struct Renderer<O: OutputDriver, const MAX_LEDS: usize> {
    state: Mutex<RefCell<RendererState<O, MAX_LEDS>>>,
    animation: SharedAnimation,
}

impl<O: OutputDriver, const MAX_LEDS: usize> Renderer<O, MAX_LEDS> {
    /// Create a stopped renderer with the empty animation
    ///
    /// The configuration is clamped the same way the live setters clamp.
    pub fn new(driver: O, config: &RendererConfig) -> Self {
        let max = u16::try_from(MAX_LEDS).unwrap_or(u16::MAX);
        let led_count = config.led_count.clamp(1_u16.min(max), max);
        if led_count != config.led_count {
            log::warn!(
                "led count {} out of range, using {}",
                config.led_count,
                led_count
            );
        }

        let settings = Settings {
            exit_early: false,
            is_running: false,
            repeat: config.repeat,
            led_count,
            pin: config.pin,
            frame_delay: config.frame_delay,
            repeat_delay: config.repeat_delay,
            speed: clamp_speed(config.speed),
            peak_brightness: clamp_brightness(config.peak_brightness),
        };

        Self {
            state: Mutex::new(RefCell::new(RendererState {
                settings,
                strip: Strip::new(driver, usize::from(led_count)),
            })),
            animation: SharedAnimation::default(),
        }
    }

    fn settings(&self) -> Settings {
        critical_section::with(|cs| self.state.borrow_ref(cs).settings)
    }

    fn update<R>(&self, f: impl FnOnce(&mut Settings) -> R) -> R {
        critical_section::with(|cs| f(&mut self.state.borrow_ref_mut(cs).settings))
    }

    /// Install a new animation and start playing it
    ///
    /// Playback is stopped first, then the call blocks for one repeat delay
    /// so a render pass in flight can observe the stop before the swap.
    pub fn set_animation(&self, animation: Animation) {
        let repeat_delay = self.update(|settings| {
            settings.is_running = false;
            settings.exit_early = true;
            settings.repeat_delay
        });
        block_for(repeat_delay);

        log::info!(
            "installing animation '{}' ({} frames)",
            animation.name(),
            animation.frame_count()
        );
        let previous = critical_section::with(|cs| {
            let previous = self.animation.borrow(cs).replace(animation);
            let settings = &mut self.state.borrow_ref_mut(cs).settings;
            settings.is_running = true;
            settings.exit_early = false;
            previous
        });
        drop(previous);
    }

    /// Copy of the active animation
    pub fn current_animation(&self) -> Animation {
        self.animation.snapshot()
    }

    /// Re-run the generator of the active animation for the current LED count
    ///
    /// Returns `false` when the animation was not generated.
    pub fn regenerate_animation(&self) -> bool {
        let Some(source) = self.animation.with(|animation| animation.source().cloned()) else {
            log::debug!("animation has no generator, not regenerating");
            return false;
        };
        self.set_animation(source.generate(self.led_count()));
        true
    }

    pub fn is_running(&self) -> bool {
        self.settings().is_running
    }

    /// Start or stop playback
    ///
    /// Stopping also wakes a render pass sleeping between frames. Starting
    /// drops a wake-up nobody consumed, so the next pass is not cut short.
    pub fn set_running(&self, running: bool) {
        self.update(|settings| {
            settings.is_running = running;
            settings.exit_early = !running;
        });
    }

    /// Stop after the last frame of a non-repeating animation
    ///
    /// Unlike [`Renderer::set_running`] this leaves the exit-early flag alone.
    pub(crate) fn finish_playback(&self) {
        self.update(|settings| settings.is_running = false);
    }

    pub fn repeat(&self) -> bool {
        self.settings().repeat
    }

    /// Enable or disable looping; enabling also resumes playback
    pub fn set_repeat(&self, repeat: bool) {
        self.update(|settings| {
            settings.repeat = repeat;
            if repeat {
                settings.is_running = true;
            }
        });
    }

    /// Configure the driver for the current LED count and pin, then blank the strip
    ///
    /// Safe to call again after the LED count changes.
    pub fn initialize_screen(&self) {
        critical_section::with(|cs| {
            let state = &mut *self.state.borrow_ref_mut(cs);
            let Settings { led_count, pin, .. } = state.settings;
            state.strip.begin(usize::from(led_count), pin);
            state.strip.show();
        });
        log::info!("screen initialized");
    }

    pub fn peak_brightness(&self) -> f32 {
        self.settings().peak_brightness
    }

    /// Set the brightness coefficient, clamped to `[0, 1]`
    pub fn set_peak_brightness(&self, brightness: f32) {
        let clamped = clamp_brightness(brightness);
        if clamped.to_bits() != brightness.to_bits() {
            log::warn!("brightness {} clamped to {}", brightness, clamped);
        }
        self.update(|settings| settings.peak_brightness = clamped);
    }

    pub fn speed(&self) -> f32 {
        self.settings().speed
    }

    /// Set the speed coefficient, floored at [`MIN_SPEED`]
    ///
    /// Wakes a render pass sleeping between frames so the new timing applies
    /// immediately.
    pub fn set_speed(&self, speed: f32) {
        let clamped = clamp_speed(speed);
        if clamped.to_bits() != speed.to_bits() {
            log::warn!("speed {} raised to {}", speed, clamped);
        }
        self.update(|settings| {
            settings.speed = clamped;
            settings.exit_early = true;
        });
    }

    pub fn led_count(&self) -> u16 {
        self.settings().led_count
    }

    /// Resize the strip; zero and counts above `MAX_LEDS` are rejected
    ///
    /// The active animation is left as is: pixels beyond the new count are
    /// dropped at write time until [`Renderer::regenerate_animation`] is called.
    pub fn set_led_count(&self, led_count: u16) -> Result<(), LedCountOutOfRange> {
        if led_count == 0 || usize::from(led_count) > MAX_LEDS {
            log::warn!("rejected led count {} (max {})", led_count, MAX_LEDS);
            return Err(LedCountOutOfRange {
                requested: led_count,
                max: MAX_LEDS,
            });
        }
        critical_section::with(|cs| {
            let state = &mut *self.state.borrow_ref_mut(cs);
            state.settings.led_count = led_count;
            state.strip.begin(usize::from(led_count), state.settings.pin);
        });
        log::info!("led count set to {}", led_count);
        Ok(())
    }

    pub fn pin(&self) -> u8 {
        self.settings().pin
    }

    /// Snapshot of the configuration and the active animation identity
    pub fn output_state(&self) -> RenderState {
        critical_section::with(|cs| {
            let settings = self.state.borrow_ref(cs).settings;
            let animation = self.animation.borrow(cs).borrow();
            Self::render_state(settings, &animation)
        })
    }

    /// Snapshot plus the frames and frame mode of the same animation
    ///
    /// Taken at the start of a pass. A running pass re-reads all timing, so
    /// an exit-early flag raised before it started is stale and is cleared.
    pub(crate) fn playback_snapshot(&self) -> (RenderState, FrameBuffer, FrameMode) {
        critical_section::with(|cs| {
            let settings = &mut self.state.borrow_ref_mut(cs).settings;
            if settings.is_running {
                settings.exit_early = false;
            }
            let settings = *settings;
            let animation = self.animation.borrow(cs).borrow();
            (
                Self::render_state(settings, &animation),
                animation.frames_deep_copy(),
                animation.frame_mode(),
            )
        })
    }

    fn render_state(settings: Settings, animation: &Animation) -> RenderState {
        RenderState {
            exit_early: settings.exit_early,
            is_running: settings.is_running,
            repeat: settings.repeat,
            led_count: settings.led_count,
            pin: settings.pin,
            frame_delay: settings.frame_delay,
            repeat_delay: settings.repeat_delay,
            speed: settings.speed,
            peak_brightness: settings.peak_brightness,
            animation_name: truncated_name(animation.name()),
            animation_hash: animation.name_hash(),
        }
    }

    /// Write a frame over the current strip contents and show it
    ///
    /// Colors are scaled by the peak brightness. Pixels at or beyond the LED
    /// count are dropped.
    pub fn write_frame_to_screen(&self, frame: &[Pixel]) {
        self.present_frame(frame, FrameMode::Overlay);
    }

    pub(crate) fn present_frame(&self, frame: &[Pixel], mode: FrameMode) {
        critical_section::with(|cs| {
            let state = &mut *self.state.borrow_ref_mut(cs);
            let brightness = state.settings.peak_brightness;

            if mode == FrameMode::Replace {
                state.strip.clear();
            }
            // the strip holds exactly `led_count` pixels, so it drops the rest
            for pixel in frame {
                state
                    .strip
                    .set_pixel(usize::from(pixel.index()), scale_color(pixel.color, brightness));
            }
            state.strip.show();
        });
    }

    /// Blank the strip and show it
    pub fn clear_screen(&self) {
        critical_section::with(|cs| {
            let strip = &mut self.state.borrow_ref_mut(cs).strip;
            strip.clear();
            strip.show();
        });
    }

    pub fn exit_early(&self) -> bool {
        self.settings().exit_early
    }

    pub fn set_exit_early(&self, exit_early: bool) {
        self.update(|settings| settings.exit_early = exit_early);
    }

    /// Busy-wait `total` in `check_interval` slices
    ///
    /// Returns `true` as soon as the exit-early flag is seen, `false` once the
    /// full duration has elapsed. The flag is left set for the caller to clear.
    /// A zero `check_interval` falls back to [`DEFAULT_CHECK_INTERVAL`].
    pub fn interruptible_delay(&self, total: Duration, check_interval: Duration) -> bool {
        let check_interval = if check_interval.as_ticks() == 0 {
            DEFAULT_CHECK_INTERVAL
        } else {
            check_interval
        };
        let slices = total.as_ticks() / check_interval.as_ticks();
        let remainder = Duration::from_ticks(total.as_ticks() % check_interval.as_ticks());

        for _ in 0..slices {
            if self.exit_early() {
                return true;
            }
            block_for(check_interval);
        }
        if remainder.as_ticks() > 0 {
            if self.exit_early() {
                return true;
            }
            block_for(remainder);
        }
        self.exit_early()
    }

    pub fn current_animation_name(&self) -> alloc::string::String {
        self.animation.name()
    }

    pub fn is_animation_empty(&self) -> bool {
        self.animation.with(Animation::is_empty)
    }

    pub fn frame_count(&self) -> usize {
        self.animation.frame_count()
    }

    /// Independent copy of the active frames
    pub fn current_frames(&self) -> FrameBuffer {
        self.animation.frames_deep_copy()
    }

    /// Copy of the colors last staged on the strip
    pub fn pixels(&self) -> heapless::Vec<Rgb, MAX_LEDS> {
        critical_section::with(|cs| self.state.borrow_ref(cs).strip.pixels().clone())
    }
}

impl<O: OutputDriver, const MAX_LEDS: usize> Drop for Renderer<O, MAX_LEDS> {
    fn drop(&mut self) {
        let strip = &mut self.state.get_mut().get_mut().strip;
        strip.clear();
        strip.show();
    }
}
