//! Galaxy parameter set
//!
//! The tunable fields edited by the parameter panel and read by the
//! generator at regeneration time. Ranges here are the only validation:
//! the panel clamps to them and the config loader rejects values outside.

use std::fmt;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

pub const POINT_COUNT_RANGE: RangeInclusive<u32> = 100..=1_000_000;
pub const POINT_SIZE_RANGE: RangeInclusive<f32> = 10.0..=100.0;
pub const LERP_DISTANCE_RANGE: RangeInclusive<f32> = 0.01..=10.0;
pub const BRANCH_COUNT_RANGE: RangeInclusive<u32> = 1..=50;
pub const RANDOMNESS_RANGE: RangeInclusive<f32> = 0.0..=10.0;
pub const SIGMA_RANGE: RangeInclusive<f32> = 0.0..=2.0;
pub const MU_RANGE: RangeInclusive<f32> = 0.0..=5.0;

/// Framebuffer blending applied to the star sprites
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlendMode {
    None,
    Normal,
    #[default]
    Additive,
    Subtractive,
    Multiply,
}

impl BlendMode {
    pub const ALL: &'static [BlendMode] = &[
        BlendMode::None,
        BlendMode::Normal,
        BlendMode::Additive,
        BlendMode::Subtractive,
        BlendMode::Multiply,
    ];

    pub fn label(self) -> &'static str {
        match self {
            BlendMode::None => "None",
            BlendMode::Normal => "Normal",
            BlendMode::Additive => "Additive",
            BlendMode::Subtractive => "Subtractive",
            BlendMode::Multiply => "Multiply",
        }
    }

    /// Position in [`BlendMode::ALL`], used to index per-mode pipelines
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Linear RGB color, components nominally in [0, 1].
///
/// Hex bytes map straight to `byte / 255` with no sRGB conversion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_bytes(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, ConfigError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.is_ascii() {
            return Err(ConfigError::InvalidColor(hex.to_string()));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ConfigError::InvalidColor(hex.to_string()))
        };
        Ok(Self::from_bytes(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    pub fn to_hex(self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Interpolate towards `other`. `t` is not clamped, so values past 1.0
    /// extrapolate beyond `other`. Exact at both `t = 0` and `t = 1`.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Rgb {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn from_array([r, g, b]: [f32; 3]) -> Self {
        Self { r, g, b }
    }
}

impl TryFrom<String> for Rgb {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Rgb::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(color: Rgb) -> Self {
        color.to_hex()
    }
}

/// Everything the panel can tune
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GalaxyParams {
    /// Regenerate on every edit instead of on commit
    pub instant_update: bool,
    pub point_count: u32,
    /// Sprite size in logical pixels at unit view depth
    pub point_size: f32,
    pub blend_mode: BlendMode,
    /// Radius at which the color reaches `outer_color`
    pub color_lerp_distance: f32,
    pub branch_count: u32,
    pub randomness_scale: f32,
    pub distribution_sigma: f32,
    pub distribution_mu: f32,
    pub inner_color: Rgb,
    pub outer_color: Rgb,
}

impl Default for GalaxyParams {
    fn default() -> Self {
        Self {
            instant_update: false,
            point_count: 300_000,
            point_size: 40.0,
            blend_mode: BlendMode::Additive,
            color_lerp_distance: 2.0,
            branch_count: 20,
            randomness_scale: 2.0,
            distribution_sigma: 1.75,
            distribution_mu: 1.0,
            inner_color: Rgb::from_bytes(0xff, 0x60, 0x30),
            outer_color: Rgb::from_bytes(0x1b, 0x39, 0x84),
        }
    }
}

impl GalaxyParams {
    /// Check every numeric field against its panel range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check("point_count", self.point_count, &POINT_COUNT_RANGE)?;
        check("point_size", self.point_size, &POINT_SIZE_RANGE)?;
        check("color_lerp_distance", self.color_lerp_distance, &LERP_DISTANCE_RANGE)?;
        check("branch_count", self.branch_count, &BRANCH_COUNT_RANGE)?;
        check("randomness_scale", self.randomness_scale, &RANDOMNESS_RANGE)?;
        check("distribution_sigma", self.distribution_sigma, &SIGMA_RANGE)?;
        check("distribution_mu", self.distribution_mu, &MU_RANGE)?;
        Ok(())
    }
}

fn check<T: Copy + Into<f64>>(
    field: &'static str,
    value: T,
    range: &RangeInclusive<T>,
) -> Result<(), ConfigError> {
    let value: f64 = value.into();
    let (min, max): (f64, f64) = ((*range.start()).into(), (*range.end()).into());
    // NaN fails both comparisons and is rejected too
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange { field, value, min, max })
    }
}
