//! Render loop
//!
//! [`render_pass`] plays the active animation once. [`RenderTask`] wraps it
//! for the render core: call [`RenderTask::run`] from a dedicated task, or
//! [`RenderTask::run_once`] from an existing scheduler loop.

use embassy_time::{Duration, block_for};

use crate::OutputDriver;
use crate::renderer::{DEFAULT_CHECK_INTERVAL, Renderer};

/// Wait between checks while nothing is playing
pub const DEFAULT_IDLE_POLL: Duration = Duration::from_millis(10);

/// How a render pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassOutcome {
    /// Not running, or the animation has no frames
    Idle,
    /// All frames were shown and the animation repeats
    Completed,
    /// All frames were shown and playback stopped since repeat is off
    Finished,
    /// A delay between frames was cut short by the exit-early flag
    Interrupted,
    /// Another animation was installed during the pass
    AnimationChanged,
    /// Playback was stopped during the pass
    Stopped,
}

/// Play the active animation once
///
/// The frames are copied once at the start of the pass. The render state is
/// re-read before every frame, so brightness and speed changes apply from the
/// next frame on. The pass ends early when the animation is swapped, when
/// playback stops, or when a delay is interrupted; in the last case the
/// exit-early flag is cleared here.
pub fn render_pass<O: OutputDriver, const MAX_LEDS: usize>(
    renderer: &Renderer<O, MAX_LEDS>,
) -> PassOutcome {
    let (state, frames, mode) = renderer.playback_snapshot();
    if !state.is_running || frames.is_empty() {
        return PassOutcome::Idle;
    }

    let animation_hash = state.animation_hash;
    log::debug!(
        "pass of '{}' started: {} frames",
        state.animation_name,
        frames.len()
    );

    let last = frames.len() - 1;
    for (index, frame) in frames.iter().enumerate() {
        let state = renderer.output_state();
        if state.animation_hash != animation_hash {
            log::debug!("animation changed to '{}'", state.animation_name);
            return PassOutcome::AnimationChanged;
        }
        if !state.is_running {
            log::debug!("playback stopped at frame {}", index);
            return PassOutcome::Stopped;
        }

        renderer.present_frame(frame, mode);

        if renderer.interruptible_delay(state.frame_interval(), DEFAULT_CHECK_INTERVAL) {
            renderer.set_exit_early(false);
            log::debug!("pass interrupted at frame {}", index);
            return PassOutcome::Interrupted;
        }

        if index == last && !state.repeat {
            renderer.finish_playback();
            log::debug!("'{}' finished", state.animation_name);
            return PassOutcome::Finished;
        }
    }

    PassOutcome::Completed
}

/// Render core entry point
pub struct RenderTask<'r, O: OutputDriver, const MAX_LEDS: usize> {
    renderer: &'r Renderer<O, MAX_LEDS>,
    idle_poll: Duration,
}

impl<'r, O: OutputDriver, const MAX_LEDS: usize> RenderTask<'r, O, MAX_LEDS> {
    pub const fn new(renderer: &'r Renderer<O, MAX_LEDS>) -> Self {
        Self {
            renderer,
            idle_poll: DEFAULT_IDLE_POLL,
        }
    }

    /// Set the wait between checks while nothing is playing
    #[must_use]
    pub const fn with_idle_poll(mut self, idle_poll: Duration) -> Self {
        self.idle_poll = idle_poll;
        self
    }

    pub const fn renderer(&self) -> &'r Renderer<O, MAX_LEDS> {
        self.renderer
    }

    /// Run one pass, then pause
    ///
    /// A completed pass is followed by an interruptible repeat delay, an idle
    /// pass by the idle poll. Any other outcome returns immediately so the
    /// next pass picks up the change.
    pub fn run_once(&self) -> PassOutcome {
        let outcome = render_pass(self.renderer);
        match outcome {
            PassOutcome::Idle => block_for(self.idle_poll),
            PassOutcome::Completed => {
                let repeat_delay = self.renderer.output_state().repeat_delay;
                if self
                    .renderer
                    .interruptible_delay(repeat_delay, DEFAULT_CHECK_INTERVAL)
                {
                    self.renderer.set_exit_early(false);
                }
            }
            _ => {}
        }
        outcome
    }

    /// Render forever
    pub fn run(&self) -> ! {
        log::info!("render task started");
        loop {
            self.run_once();
        }
    }
}
