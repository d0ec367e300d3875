use smart_leds::RGB8;

pub type Rgb = RGB8;

/// Black, used to clear the strip
pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

/// Gray level with all channels set to `value`
#[inline]
pub const fn gray(value: u8) -> Rgb {
    Rgb {
        r: value,
        g: value,
        b: value,
    }
}

/// Scale every channel by a brightness coefficient in `[0, 1]`
///
/// Channels are truncated, so a coefficient of `0.5` maps `255` to `127`.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn scale_color(color: Rgb, coefficient: f32) -> Rgb {
    Rgb {
        r: (f32::from(color.r) * coefficient) as u8,
        g: (f32::from(color.g) * coefficient) as u8,
        b: (f32::from(color.b) * coefficient) as u8,
    }
}

/// Convert a `[0, 1]` brightness level to an 8-bit channel value
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn level_to_u8(level: f32) -> u8 {
    (level * 255.0) as u8
}
