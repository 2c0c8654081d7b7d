//! Deterministic color allocation.
//!
//! Colors are points on the HSL hue wheel at fixed saturation and lightness.
//! The hue advances by a fixed step per allocation, so with the default 75°
//! step there are `360 / gcd(360, 75) = 24` distinct hues before the cycle
//! repeats, and a repeat is an exact duplicate.

use strata_css::ColorValue;

use crate::config::PaletteConfig;

/// Maps a color counter to a `#rrggbb` color.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorAllocator {
    hue_step: u32,
    saturation: f64,
    lightness: f64,
}

impl Default for ColorAllocator {
    fn default() -> Self {
        Self::new(&PaletteConfig::default())
    }
}

impl ColorAllocator {
    /// Build an allocator from palette settings.
    #[must_use]
    pub const fn new(config: &PaletteConfig) -> Self {
        Self {
            hue_step: config.hue_step,
            saturation: config.saturation,
            lightness: config.lightness,
        }
    }

    /// `(counter * hue_step) mod 360`, without overflow for any counter.
    #[must_use]
    pub fn hue(&self, counter: u64) -> u32 {
        let hue = (counter % 360) * u64::from(self.hue_step % 360) % 360;
        // Always < 360.
        u32::try_from(hue).unwrap_or_default()
    }

    /// The color at position `counter` in the sequence.
    #[must_use]
    pub fn color_at(&self, counter: u64) -> String {
        ColorValue::from_hsl(f64::from(self.hue(counter)), self.saturation, self.lightness)
            .to_hex_string()
    }

    /// `next(counter) -> (color, counter + 1)`.
    ///
    /// The allocator holds no cursor; the caller owns and stores it.
    #[must_use]
    pub fn next(&self, counter: u64) -> (String, u64) {
        (self.color_at(counter), counter.saturating_add(1))
    }

    /// Number of allocations before hues repeat.
    #[must_use]
    pub fn cycle_len(&self) -> u64 {
        u64::from(360 / gcd(360, self.hue_step % 360))
    }
}

const fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
