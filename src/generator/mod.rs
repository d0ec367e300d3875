//! Procedural frame generators
//!
//! Every generator is a pure function of the LED count and its parameter
//! struct. Generated animations keep their parameters, so the renderer can
//! re-run the generator after a live LED count change.

mod bar;
mod breathe;
mod circling;
mod half_fade;
mod pulse;

pub use bar::{
    ExtendingBarParams, ExtinguishingBarParams, GrowDownParams, GrowUpParams, GrowingBarParams,
    MovingBarParams, ShrinkingBarParams,
};
pub use breathe::BreatheParams;
pub use circling::{CirclingBrightDotParams, CirclingDarkSpotParams};
pub use half_fade::HalfFadeParams;
pub use pulse::PulseParams;

pub(crate) use bar::{extent_frame, grow_frame, height_frame, moving_bar_frame};
pub(crate) use half_fade::half_fade_frame;

use crate::animation::Animation;
use crate::frame::FrameBuffer;

const EFFECT_NAME_BREATHE: &str = "breathe";
const EFFECT_NAME_GROWING_BAR: &str = "growing_bar";
const EFFECT_NAME_SHRINKING_BAR: &str = "shrinking_bar";
const EFFECT_NAME_EXTENDING_BAR: &str = "extending_bar";
const EFFECT_NAME_EXTINGUISHING_BAR: &str = "extinguishing_bar";
const EFFECT_NAME_MOVING_BAR: &str = "moving_bar";
const EFFECT_NAME_GROW_UP: &str = "grow_up";
const EFFECT_NAME_GROW_DOWN: &str = "grow_down";
const EFFECT_NAME_HALF_FADE: &str = "half_fade";
const EFFECT_NAME_PULSE: &str = "pulse";
const EFFECT_NAME_CIRCLING_BRIGHT_DOT: &str = "circling_bright_dot";
const EFFECT_NAME_CIRCLING_DARK_SPOT: &str = "circling_dark_spot";

const EFFECT_ID_BREATHE: u8 = 0;
const EFFECT_ID_GROWING_BAR: u8 = 1;
const EFFECT_ID_SHRINKING_BAR: u8 = 2;
const EFFECT_ID_EXTENDING_BAR: u8 = 3;
const EFFECT_ID_EXTINGUISHING_BAR: u8 = 4;
const EFFECT_ID_MOVING_BAR: u8 = 5;
const EFFECT_ID_GROW_UP: u8 = 6;
const EFFECT_ID_GROW_DOWN: u8 = 7;
const EFFECT_ID_HALF_FADE: u8 = 8;
const EFFECT_ID_PULSE: u8 = 9;
const EFFECT_ID_CIRCLING_BRIGHT_DOT: u8 = 10;
const EFFECT_ID_CIRCLING_DARK_SPOT: u8 = 11;

/// Full brightness used by presets; the renderer scales it at write time
const PRESET_BRIGHTNESS: u8 = 255;

pub trait Generator: Clone + Into<EffectParams> {
    /// Display name of the generated animation
    const NAME: &'static str;

    /// Build the frame sequence for a strip of `led_count` LEDs
    fn frames(&self, led_count: u16) -> FrameBuffer;

    /// Build a named animation that remembers these parameters
    ///
    /// A zero LED count yields an animation without frames.
    fn generate(&self, led_count: u16) -> Animation {
        let frames = if led_count == 0 {
            FrameBuffer::new()
        } else {
            self.frames(led_count)
        };
        log::debug!(
            "generated '{}': {} frames for {} leds",
            Self::NAME,
            frames.len(),
            led_count
        );
        Animation::new(Self::NAME, frames).with_source(self.clone().into())
    }
}

/// Parameters of any known generator
#[derive(Debug, Clone, PartialEq)]
pub enum EffectParams {
    Breathe(BreatheParams),
    GrowingBar(GrowingBarParams),
    ShrinkingBar(ShrinkingBarParams),
    ExtendingBar(ExtendingBarParams),
    ExtinguishingBar(ExtinguishingBarParams),
    MovingBar(MovingBarParams),
    GrowUp(GrowUpParams),
    GrowDown(GrowDownParams),
    HalfFade(HalfFadeParams),
    Pulse(PulseParams),
    CirclingBrightDot(CirclingBrightDotParams),
    CirclingDarkSpot(CirclingDarkSpotParams),
}

macro_rules! impl_into_params {
    ($($params:ident => $variant:ident),* $(,)?) => {
        $(
            impl From<$params> for EffectParams {
                fn from(params: $params) -> Self {
                    Self::$variant(params)
                }
            }
        )*
    };
}

impl_into_params! {
    BreatheParams => Breathe,
    GrowingBarParams => GrowingBar,
    ShrinkingBarParams => ShrinkingBar,
    ExtendingBarParams => ExtendingBar,
    ExtinguishingBarParams => ExtinguishingBar,
    MovingBarParams => MovingBar,
    GrowUpParams => GrowUp,
    GrowDownParams => GrowDown,
    HalfFadeParams => HalfFade,
    PulseParams => Pulse,
    CirclingBrightDotParams => CirclingBrightDot,
    CirclingDarkSpotParams => CirclingDarkSpot,
}

impl EffectParams {
    /// Generate the animation for a strip of `led_count` LEDs
    pub fn generate(&self, led_count: u16) -> Animation {
        match self {
            Self::Breathe(params) => params.generate(led_count),
            Self::GrowingBar(params) => params.generate(led_count),
            Self::ShrinkingBar(params) => params.generate(led_count),
            Self::ExtendingBar(params) => params.generate(led_count),
            Self::ExtinguishingBar(params) => params.generate(led_count),
            Self::MovingBar(params) => params.generate(led_count),
            Self::GrowUp(params) => params.generate(led_count),
            Self::GrowDown(params) => params.generate(led_count),
            Self::HalfFade(params) => params.generate(led_count),
            Self::Pulse(params) => params.generate(led_count),
            Self::CirclingBrightDot(params) => params.generate(led_count),
            Self::CirclingDarkSpot(params) => params.generate(led_count),
        }
    }

    /// Get the effect ID for external observation
    pub const fn id(&self) -> EffectId {
        match self {
            Self::Breathe(_) => EffectId::Breathe,
            Self::GrowingBar(_) => EffectId::GrowingBar,
            Self::ShrinkingBar(_) => EffectId::ShrinkingBar,
            Self::ExtendingBar(_) => EffectId::ExtendingBar,
            Self::ExtinguishingBar(_) => EffectId::ExtinguishingBar,
            Self::MovingBar(_) => EffectId::MovingBar,
            Self::GrowUp(_) => EffectId::GrowUp,
            Self::GrowDown(_) => EffectId::GrowDown,
            Self::HalfFade(_) => EffectId::HalfFade,
            Self::Pulse(_) => EffectId::Pulse,
            Self::CirclingBrightDot(_) => EffectId::CirclingBrightDot,
            Self::CirclingDarkSpot(_) => EffectId::CirclingDarkSpot,
        }
    }

    /// Display name of the generated animation
    pub const fn name(&self) -> &'static str {
        self.id().display_name()
    }
}

/// Options shared by the effect presets
#[derive(Debug, Clone, Copy)]
pub struct PresetOptions {
    /// Sharp bar edges and dots without trails
    pub abrupt_fade: bool,
    /// Relative speed of the cyclic effects (breathe, pulse)
    pub frequency: f32,
}

impl Default for PresetOptions {
    fn default() -> Self {
        Self {
            abrupt_fade: true,
            frequency: 1.0,
        }
    }
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Breathe = EFFECT_ID_BREATHE,
    GrowingBar = EFFECT_ID_GROWING_BAR,
    ShrinkingBar = EFFECT_ID_SHRINKING_BAR,
    ExtendingBar = EFFECT_ID_EXTENDING_BAR,
    ExtinguishingBar = EFFECT_ID_EXTINGUISHING_BAR,
    MovingBar = EFFECT_ID_MOVING_BAR,
    GrowUp = EFFECT_ID_GROW_UP,
    GrowDown = EFFECT_ID_GROW_DOWN,
    HalfFade = EFFECT_ID_HALF_FADE,
    Pulse = EFFECT_ID_PULSE,
    CirclingBrightDot = EFFECT_ID_CIRCLING_BRIGHT_DOT,
    CirclingDarkSpot = EFFECT_ID_CIRCLING_DARK_SPOT,
}

impl EffectId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            EFFECT_ID_BREATHE => Self::Breathe,
            EFFECT_ID_GROWING_BAR => Self::GrowingBar,
            EFFECT_ID_SHRINKING_BAR => Self::ShrinkingBar,
            EFFECT_ID_EXTENDING_BAR => Self::ExtendingBar,
            EFFECT_ID_EXTINGUISHING_BAR => Self::ExtinguishingBar,
            EFFECT_ID_MOVING_BAR => Self::MovingBar,
            EFFECT_ID_GROW_UP => Self::GrowUp,
            EFFECT_ID_GROW_DOWN => Self::GrowDown,
            EFFECT_ID_HALF_FADE => Self::HalfFade,
            EFFECT_ID_PULSE => Self::Pulse,
            EFFECT_ID_CIRCLING_BRIGHT_DOT => Self::CirclingBrightDot,
            EFFECT_ID_CIRCLING_DARK_SPOT => Self::CirclingDarkSpot,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Breathe => EFFECT_NAME_BREATHE,
            Self::GrowingBar => EFFECT_NAME_GROWING_BAR,
            Self::ShrinkingBar => EFFECT_NAME_SHRINKING_BAR,
            Self::ExtendingBar => EFFECT_NAME_EXTENDING_BAR,
            Self::ExtinguishingBar => EFFECT_NAME_EXTINGUISHING_BAR,
            Self::MovingBar => EFFECT_NAME_MOVING_BAR,
            Self::GrowUp => EFFECT_NAME_GROW_UP,
            Self::GrowDown => EFFECT_NAME_GROW_DOWN,
            Self::HalfFade => EFFECT_NAME_HALF_FADE,
            Self::Pulse => EFFECT_NAME_PULSE,
            Self::CirclingBrightDot => EFFECT_NAME_CIRCLING_BRIGHT_DOT,
            Self::CirclingDarkSpot => EFFECT_NAME_CIRCLING_DARK_SPOT,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        match s {
            EFFECT_NAME_BREATHE => Some(Self::Breathe),
            EFFECT_NAME_GROWING_BAR => Some(Self::GrowingBar),
            EFFECT_NAME_SHRINKING_BAR => Some(Self::ShrinkingBar),
            EFFECT_NAME_EXTENDING_BAR => Some(Self::ExtendingBar),
            EFFECT_NAME_EXTINGUISHING_BAR => Some(Self::ExtinguishingBar),
            EFFECT_NAME_MOVING_BAR => Some(Self::MovingBar),
            EFFECT_NAME_GROW_UP => Some(Self::GrowUp),
            EFFECT_NAME_GROW_DOWN => Some(Self::GrowDown),
            EFFECT_NAME_HALF_FADE => Some(Self::HalfFade),
            EFFECT_NAME_PULSE => Some(Self::Pulse),
            EFFECT_NAME_CIRCLING_BRIGHT_DOT => Some(Self::CirclingBrightDot),
            EFFECT_NAME_CIRCLING_DARK_SPOT => Some(Self::CirclingDarkSpot),
            _ => None,
        }
    }

    /// Name of the animation this effect generates
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Breathe => BreatheParams::NAME,
            Self::GrowingBar => GrowingBarParams::NAME,
            Self::ShrinkingBar => ShrinkingBarParams::NAME,
            Self::ExtendingBar => ExtendingBarParams::NAME,
            Self::ExtinguishingBar => ExtinguishingBarParams::NAME,
            Self::MovingBar => MovingBarParams::NAME,
            Self::GrowUp => GrowUpParams::NAME,
            Self::GrowDown => GrowDownParams::NAME,
            Self::HalfFade => HalfFadeParams::NAME,
            Self::Pulse => PulseParams::NAME,
            Self::CirclingBrightDot => CirclingBrightDotParams::NAME,
            Self::CirclingDarkSpot => CirclingDarkSpotParams::NAME,
        }
    }

    /// Default parameters for this effect
    ///
    /// Brightness parameters are at full scale: the renderer applies the
    /// peak brightness when frames are written.
    pub fn preset(self, options: PresetOptions) -> EffectParams {
        let abrupt_fade = options.abrupt_fade;
        match self {
            Self::Breathe => BreatheParams {
                min_brightness: 0.025,
                max_brightness: 1.0,
                frequency: options.frequency,
            }
            .into(),
            Self::GrowingBar => GrowingBarParams {
                max_brightness: PRESET_BRIGHTNESS,
                start_height: 0,
                end_height: 0,
                abrupt_fade,
            }
            .into(),
            Self::ShrinkingBar => ShrinkingBarParams {
                max_brightness: PRESET_BRIGHTNESS,
                start_height: 0,
                end_height: 0,
                abrupt_fade,
            }
            .into(),
            Self::ExtendingBar => ExtendingBarParams {
                max_brightness: PRESET_BRIGHTNESS,
                end_distance: 0,
                abrupt_fade,
            }
            .into(),
            Self::ExtinguishingBar => ExtinguishingBarParams {
                max_brightness: PRESET_BRIGHTNESS,
                retention_time: 500,
                abrupt_fade,
            }
            .into(),
            Self::MovingBar => MovingBarParams {
                brightness: PRESET_BRIGHTNESS,
                bar_size: 3,
            }
            .into(),
            Self::GrowUp => GrowUpParams {
                brightness: PRESET_BRIGHTNESS,
                end_distance: 0,
                abrupt_fade,
            }
            .into(),
            Self::GrowDown => GrowDownParams {
                brightness: PRESET_BRIGHTNESS,
                end_distance: 0,
                abrupt_fade,
            }
            .into(),
            Self::HalfFade => HalfFadeParams {
                dim_level: 0.25,
                gradient_fade: !abrupt_fade,
            }
            .into(),
            Self::Pulse => PulseParams {
                min_brightness: 0.015,
                max_brightness: 1.0,
                attack_proportion: 0.15,
                frequency: options.frequency,
            }
            .into(),
            Self::CirclingBrightDot => CirclingBrightDotParams {
                abrupt_fade,
                clockwise: true,
                trail_length: 3,
                brightness: PRESET_BRIGHTNESS,
            }
            .into(),
            Self::CirclingDarkSpot => CirclingDarkSpotParams {
                abrupt_transition: abrupt_fade,
                clockwise: true,
                spot_width: 3,
                background_brightness: PRESET_BRIGHTNESS,
            }
            .into(),
        }
    }
}
