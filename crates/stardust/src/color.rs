//! Tint values carried by bodies
//!
//! Tints are rendering hints only. They take part in merges (the survivor's
//! tint shifts toward the absorbed body's) but never affect the physics.

use seeded_rng::SeededRng;
use serde::{Deserialize, Serialize};

/// Packed 0xRRGGBB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Tint(pub u32);

impl Tint {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Tint((u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b))
    }

    pub fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    pub fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    pub fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Blends `base` toward `toward` by `ratio`, channel by channel
    ///
    /// A ratio of 0 returns `base`, 1 returns `toward`.
    ///
    /// # Examples
    ///
    /// ```
    /// use stardust::color::Tint;
    ///
    /// let black = Tint::from_rgb(0, 0, 0);
    /// let white = Tint::from_rgb(255, 255, 255);
    ///
    /// assert_eq!(Tint::mix(white, black, 0.0), black);
    /// assert_eq!(Tint::mix(white, black, 0.5), Tint::from_rgb(128, 128, 128));
    /// ```
    pub fn mix(toward: Tint, base: Tint, ratio: f64) -> Tint {
        let channel = |from: u8, to: u8| -> u8 {
            let from = f64::from(from);
            let to = f64::from(to);
            (from + (to - from) * ratio).round().clamp(0.0, 255.0) as u8
        };
        Tint::from_rgb(
            channel(base.r(), toward.r()),
            channel(base.g(), toward.g()),
            channel(base.b(), toward.b()),
        )
    }

    /// Converts HSL (hue in degrees, saturation and lightness in percent)
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64) -> Tint {
        let h = hue.rem_euclid(360.0);
        let s = (saturation / 100.0).clamp(0.0, 1.0);
        let l = (lightness / 100.0).clamp(0.0, 1.0);

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = match (h / 60.0) as u32 {
            0 => (c, x, 0.0),
            1 => (x, c, 0.0),
            2 => (0.0, c, x),
            3 => (0.0, x, c),
            4 => (x, 0.0, c),
            _ => (c, 0.0, x),
        };

        let to_byte = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Tint::from_rgb(to_byte(r), to_byte(g), to_byte(b))
    }
}

/// Draws a bright, fully saturated tint (two draws: hue then lightness)
pub fn random_tint(rng: &mut SeededRng) -> Tint {
    let hue = (rng.next_f64() * 255.0 + 1.0).floor();
    let lightness = rng.range(50.0, 90.0);
    Tint::from_hsl(hue, 100.0, lightness)
}
