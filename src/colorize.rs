//! Escape-time colouring.
//!
//! Every particle seeds a quadratic recurrence with the driving value and
//! its own normalized position:
//!
//! ```text
//! a = driving, b = z, c = x, d = y
//! while iter < max && a² + b² < threshold:
//!     (a, b) = (a² - b² + c, 2ab + d)
//! ```
//!
//! The iteration count over the bound gives an escape ratio in `[0, 1]`,
//! which is spread across the three colour channels in [`ChannelOrder`]
//! sequence, each channel taking up to a third of the ratio. The default
//! [`ColorStyle::Toned`] then applies a fixed tone pass.
//!
//! Channel values are not clamped. They can go negative or past 1.0, and
//! clamping is left to whoever packs them for display.

use crate::channels::ChannelOrder;
use crate::config::FieldConfig;
use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Share of the escape ratio each channel absorbs before the next one starts.
pub const SPLIT: f64 = 1.0 / 3.0;

/// How the escape ratio becomes a colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorStyle {
    /// Fill channels in [`ChannelOrder`] sequence, then apply the tone pass.
    #[default]
    Toned,
    /// Fill red, green, blue in fixed order with no tone pass. Ignores the
    /// channel order.
    Flat,
}

/// Run the recurrence and return the number of iterations taken.
#[inline]
pub fn escape_time(mut a: f64, mut b: f64, c: f64, d: f64, max_iterations: u32, threshold: f64) -> u32 {
    let mut iter = 0;
    while iter < max_iterations && a * a + b * b < threshold {
        let temp = a * a - b * b + c;
        b = 2.0 * a * b + d;
        a = temp;
        iter += 1;
    }
    iter
}

/// `iterations / max_iterations`, or 0 when the bound is 0.
#[inline]
pub fn escape_ratio(iterations: u32, max_iterations: u32) -> f64 {
    if max_iterations == 0 {
        return 0.0;
    }
    iterations as f64 / max_iterations as f64
}

/// Spread `ratio` over the channels in `order` sequence.
///
/// Each channel whose slice of the ratio is full gets the whole magnitude
/// (`ratio`); the first partial slice gets `remaining * 3 * ratio` and the
/// walk stops there.
pub fn distribute(ratio: f64, order: ChannelOrder) -> [f64; 3] {
    let magnitude = ratio;
    let mut remaining = ratio;
    let mut rgb = [0.0; 3];
    for slot in 0..3 {
        let channel = order.get(slot);
        if remaining > SPLIT {
            rgb[channel] = magnitude;
            remaining -= SPLIT;
        } else {
            rgb[channel] = remaining * 3.0 * magnitude;
            break;
        }
    }
    rgb
}

/// Tone pass applied after [`distribute`].
///
/// Each line reads values written by the previous ones, so the sequence
/// matters.
pub fn tone(rgb: &mut [f64; 3], order: ChannelOrder) {
    let (first, second, third) = (order.get(0), order.get(1), order.get(2));
    rgb[first] -= rgb[second];
    rgb[second] -= rgb[third];
    rgb[first] *= 0.5;
    rgb[third] *= 0.02;
}

/// Fixed-order spread used by [`ColorStyle::Flat`].
///
/// Full slices take the magnitude; the first partial slice takes
/// `remaining * magnitude` and zeroes what is left.
pub fn distribute_flat(ratio: f64) -> [f64; 3] {
    let magnitude = ratio;
    let mut remaining = ratio;
    let mut rgb = [0.0; 3];
    for channel in rgb.iter_mut() {
        if remaining > SPLIT {
            *channel = magnitude;
            remaining -= SPLIT;
        } else {
            *channel = remaining * magnitude;
            remaining = 0.0;
        }
    }
    rgb
}

/// Per-particle colour function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Colorizer {
    pub max_iterations: u32,
    pub escape_threshold: f64,
    pub style: ColorStyle,
}

impl Colorizer {
    pub fn from_config(config: &FieldConfig) -> Self {
        Self {
            max_iterations: config.max_iterations,
            escape_threshold: config.escape_threshold,
            style: config.color_style,
        }
    }

    /// Escape ratio for a normalized position at the given driving value.
    #[inline]
    pub fn ratio(&self, normalized: Vec3, driving: f64) -> f64 {
        let iterations = escape_time(
            driving,
            normalized.z as f64,
            normalized.x as f64,
            normalized.y as f64,
            self.max_iterations,
            self.escape_threshold,
        );
        escape_ratio(iterations, self.max_iterations)
    }

    /// Opaque RGBA colour for a normalized position.
    pub fn color(&self, normalized: Vec3, driving: f64, order: ChannelOrder) -> Vec4 {
        let ratio = self.ratio(normalized, driving);
        let rgb = match self.style {
            ColorStyle::Toned => {
                let mut rgb = distribute(ratio, order);
                tone(&mut rgb, order);
                rgb
            }
            ColorStyle::Flat => distribute_flat(ratio),
        };
        Vec4::new(rgb[0] as f32, rgb[1] as f32, rgb[2] as f32, 1.0)
    }
}

impl Default for Colorizer {
    fn default() -> Self {
        Self::from_config(&FieldConfig::default())
    }
}
