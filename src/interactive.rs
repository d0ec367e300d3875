//! Button-driven effects
//!
//! Interactive effects show a single frame that changes on every button
//! press. Presses are queued from the input interrupt with [`ButtonQueue`]
//! and applied on the control core by [`InteractiveSession`].

use core::cell::RefCell;

use critical_section::Mutex;
use heapless::Deque;

use crate::OutputDriver;
use crate::animation::Animation;
use crate::frame::Frame;
use crate::generator::{
    EffectId, EffectParams, extent_frame, grow_frame, half_fade_frame, height_frame,
    moving_bar_frame,
};
use crate::renderer::Renderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    Up,
    Down,
}

/// Effects driven by button presses
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractiveMode {
    /// Up and Down move the bar one LED
    MovingBar,
    /// Up and Down grow and shrink the bar height
    GrowingBar,
    /// Up and Down extend and contract the bar around the centre
    ExtendingBar,
    /// Up dims the upper half, Down dims the lower half
    HalfFade,
    /// Up grows the bar upwards, restarting once it is full
    GrowUp,
    /// Down grows the bar downwards, restarting once it is full
    GrowDown,
}

impl InteractiveMode {
    pub const fn from_effect(id: EffectId) -> Option<Self> {
        Some(match id {
            EffectId::MovingBar => Self::MovingBar,
            EffectId::GrowingBar => Self::GrowingBar,
            EffectId::ExtendingBar => Self::ExtendingBar,
            EffectId::HalfFade => Self::HalfFade,
            EffectId::GrowUp => Self::GrowUp,
            EffectId::GrowDown => Self::GrowDown,
            _ => return None,
        })
    }

    pub const fn effect(self) -> EffectId {
        match self {
            Self::MovingBar => EffectId::MovingBar,
            Self::GrowingBar => EffectId::GrowingBar,
            Self::ExtendingBar => EffectId::ExtendingBar,
            Self::HalfFade => EffectId::HalfFade,
            Self::GrowUp => EffectId::GrowUp,
            Self::GrowDown => EffectId::GrowDown,
        }
    }
}

/// Bounded queue of button presses, safe to fill from an interrupt
pub struct ButtonQueue<const SIZE: usize> {
    inner: Mutex<RefCell<Deque<Button, SIZE>>>,
}

impl<const SIZE: usize> ButtonQueue<SIZE> {
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Queue a press
    ///
    /// Returns `Err(button)` if the queue is full.
    pub fn press(&self, button: Button) -> Result<(), Button> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).push_back(button))
    }

    /// Take the oldest press
    pub fn take(&self) -> Option<Button> {
        critical_section::with(|cs| self.inner.borrow_ref_mut(cs).pop_front())
    }

    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.inner.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for ButtonQueue<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

/// Step state of one interactive effect
#[derive(Debug, Clone, PartialEq)]
pub struct InteractiveSession {
    mode: InteractiveMode,
    led_count: u16,
    brightness: u8,
    abrupt_fade: bool,
    bar_size: u16,
    /// Bar centre of the moving bar
    position: i32,
    /// Bar height of the growing bar
    height: u16,
    /// Distance from the centre of the extending and one-sided bars
    extent: u16,
    /// Level removed from a half per press
    dim_step: f32,
    gradient: bool,
    lower_level: f32,
    upper_level: f32,
}

impl InteractiveSession {
    /// Start a session from the parameters of an interactive effect
    ///
    /// Returns `None` for effects that do not react to buttons.
    pub fn new(params: &EffectParams, led_count: u16) -> Option<Self> {
        let mode = InteractiveMode::from_effect(params.id())?;
        let mut session = Self {
            mode,
            led_count,
            brightness: u8::MAX,
            abrupt_fade: true,
            bar_size: 1,
            position: i32::from(led_count / 2),
            height: 1,
            extent: 0,
            dim_step: 0.0,
            gradient: false,
            lower_level: 1.0,
            upper_level: 1.0,
        };

        match params {
            EffectParams::MovingBar(p) => {
                session.brightness = p.brightness;
                session.bar_size = p.bar_size.max(1);
            }
            EffectParams::GrowingBar(p) => {
                session.brightness = p.max_brightness;
                session.abrupt_fade = p.abrupt_fade;
                session.height = p.first_height(led_count).max(1);
            }
            EffectParams::ExtendingBar(p) => {
                session.brightness = p.max_brightness;
                session.abrupt_fade = p.abrupt_fade;
            }
            EffectParams::HalfFade(p) => {
                session.dim_step = p.dim_level.clamp(0.0, 1.0);
                session.gradient = p.gradient_fade;
            }
            EffectParams::GrowUp(p) => {
                session.brightness = p.brightness;
                session.abrupt_fade = p.abrupt_fade;
            }
            EffectParams::GrowDown(p) => {
                session.brightness = p.brightness;
                session.abrupt_fade = p.abrupt_fade;
            }
            _ => return None,
        }

        log::debug!("interactive session: {:?} on {} leds", mode, led_count);
        Some(session)
    }

    pub const fn mode(&self) -> InteractiveMode {
        self.mode
    }

    /// Apply one press and return the resulting animation
    pub fn press(&mut self, button: Button) -> Animation {
        self.step(button);
        self.animation()
    }

    fn step(&mut self, button: Button) {
        let up = button == Button::Up;
        let max_extent = self.led_count / 2;
        match self.mode {
            InteractiveMode::MovingBar => {
                let last = i32::from(self.led_count.saturating_sub(1));
                let delta = if up { 1 } else { -1 };
                self.position = (self.position + delta).clamp(0, last);
            }
            InteractiveMode::GrowingBar => {
                self.height = if up {
                    self.height.saturating_add(1).min(self.led_count.max(1))
                } else {
                    self.height.saturating_sub(1).max(1)
                };
            }
            InteractiveMode::ExtendingBar => {
                self.extent = if up {
                    (self.extent + 1).min(max_extent)
                } else {
                    self.extent.saturating_sub(1)
                };
            }
            InteractiveMode::HalfFade => {
                let level = if up {
                    &mut self.upper_level
                } else {
                    &mut self.lower_level
                };
                *level = (*level - self.dim_step).max(0.0);
            }
            InteractiveMode::GrowUp | InteractiveMode::GrowDown => {
                let grows = match self.mode {
                    InteractiveMode::GrowUp => up,
                    _ => !up,
                };
                if grows {
                    self.extent = if self.extent >= max_extent {
                        0
                    } else {
                        self.extent + 1
                    };
                }
            }
        }
    }

    /// Fit the step state to a strip of `led_count` LEDs
    ///
    /// Positions and extents beyond the new strip are pulled back inside it.
    pub fn set_led_count(&mut self, led_count: u16) {
        if led_count == self.led_count {
            return;
        }
        log::debug!("interactive session resized to {} leds", led_count);
        self.led_count = led_count;
        self.position = self
            .position
            .clamp(0, i32::from(led_count.saturating_sub(1)));
        self.height = self.height.min(led_count.max(1));
        self.extent = self.extent.min(led_count / 2);
    }

    /// Single-frame animation for the current step
    ///
    /// The animation carries no generator parameters, so
    /// [`Renderer::regenerate_animation`] leaves it alone; the session itself
    /// follows LED count changes in [`InteractiveSession::process_pending`].
    pub fn animation(&self) -> Animation {
        Animation::new(self.mode.effect().display_name(), alloc::vec![self.frame()])
    }

    fn frame(&self) -> Frame {
        let count = self.led_count;
        match self.mode {
            InteractiveMode::MovingBar => {
                moving_bar_frame(count, self.position, self.bar_size, self.brightness)
            }
            InteractiveMode::GrowingBar => {
                height_frame(count, self.height, self.brightness, self.abrupt_fade)
            }
            InteractiveMode::ExtendingBar => {
                extent_frame(count, self.extent, self.brightness, self.abrupt_fade)
            }
            InteractiveMode::HalfFade => {
                half_fade_frame(count, self.lower_level, self.upper_level, self.gradient)
            }
            InteractiveMode::GrowUp => {
                grow_frame(count, self.extent, true, self.brightness, self.abrupt_fade)
            }
            InteractiveMode::GrowDown => {
                grow_frame(count, self.extent, false, self.brightness, self.abrupt_fade)
            }
        }
    }

    /// Apply every queued press and install the result once
    ///
    /// The session is first fitted to the renderer's current LED count.
    /// Returns the number of presses applied.
    pub fn process_pending<O: OutputDriver, const MAX_LEDS: usize, const SIZE: usize>(
        &mut self,
        queue: &ButtonQueue<SIZE>,
        renderer: &Renderer<O, MAX_LEDS>,
    ) -> usize {
        self.set_led_count(renderer.led_count());
        let mut applied = 0;
        while let Some(button) = queue.take() {
            self.step(button);
            applied += 1;
        }
        if applied > 0 {
            renderer.set_animation(self.animation());
        }
        applied
    }
}
