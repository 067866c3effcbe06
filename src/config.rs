//! Field configuration.
//!
//! [`FieldConfig`] holds every constant that shapes the field: particle
//! count, sampling domain, display scale, iteration bound and oscillator
//! tuning. It serializes to JSON so a runner can load tweaked setups, and
//! [`FieldConfig::default`] reproduces the classic 531,441-particle set.
//!
//! ```ignore
//! let config = FieldConfig::default()
//!     .with_particle_count(27)
//!     .with_unit(0.2)
//!     .with_max_iterations(32);
//! config.save("julia.json")?;
//! ```

use crate::colorize::ColorStyle;
use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Particle count of the classic setup: 729 batches of 3^6 particles.
pub const DEFAULT_PARTICLE_COUNT: usize = 3 * 3 * 3 * 3 * 3 * 3 * 729;

fn default_particle_count() -> usize {
    DEFAULT_PARTICLE_COUNT
}

fn default_unit() -> f32 {
    0.2
}

fn default_max_iterations() -> u32 {
    64
}

fn default_escape_threshold() -> f64 {
    8.0
}

fn default_parallel() -> bool {
    true
}

/// Closed sampling interval along one axis.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the interval.
    #[inline]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

impl Default for AxisRange {
    fn default() -> Self {
        Self::new(-3.0, 3.0)
    }
}

/// Tuning for the driving-value oscillator.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OscillatorConfig {
    /// Initial driving value.
    pub start: f64,
    /// Velocity change applied every frame.
    pub step: f64,
}

impl Default for OscillatorConfig {
    fn default() -> Self {
        Self {
            start: -2.0,
            step: 0.0005,
        }
    }
}

/// Complete field configuration.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FieldConfig {
    /// Number of particles in the field.
    #[serde(default = "default_particle_count")]
    pub particle_count: usize,
    /// Sampling domain per axis, in x, y, z order.
    #[serde(default)]
    pub ranges: [AxisRange; 3],
    /// Spacing between neighbouring particles in display space.
    #[serde(default = "default_unit")]
    pub unit: f32,
    /// Upper bound on escape-time iterations.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,
    /// Iteration stops once `a*a + b*b` reaches this value.
    #[serde(default = "default_escape_threshold")]
    pub escape_threshold: f64,
    #[serde(default)]
    pub oscillator: OscillatorConfig,
    /// How many lexicographic permutation steps to take at start-up.
    #[serde(default)]
    pub permutation_steps: u32,
    #[serde(default)]
    pub color_style: ColorStyle,
    /// Colour particles on the rayon pool (needs the `parallel` feature).
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: DEFAULT_PARTICLE_COUNT,
            ranges: [AxisRange::default(); 3],
            unit: default_unit(),
            max_iterations: default_max_iterations(),
            escape_threshold: default_escape_threshold(),
            oscillator: OscillatorConfig::default(),
            permutation_steps: 0,
            color_style: ColorStyle::default(),
            parallel: default_parallel(),
        }
    }
}

impl FieldConfig {
    /// Set the number of particles.
    pub fn with_particle_count(mut self, count: usize) -> Self {
        self.particle_count = count;
        self
    }

    /// Use the same sampling interval on all three axes.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.ranges = [AxisRange::new(min, max); 3];
        self
    }

    /// Set the sampling interval of each axis independently.
    pub fn with_ranges(mut self, x: AxisRange, y: AxisRange, z: AxisRange) -> Self {
        self.ranges = [x, y, z];
        self
    }

    /// Set the display-space spacing between particles.
    pub fn with_unit(mut self, unit: f32) -> Self {
        self.unit = unit;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_escape_threshold(mut self, threshold: f64) -> Self {
        self.escape_threshold = threshold;
        self
    }

    pub fn with_oscillator(mut self, start: f64, step: f64) -> Self {
        self.oscillator = OscillatorConfig { start, step };
        self
    }

    pub fn with_permutation_steps(mut self, steps: u32) -> Self {
        self.permutation_steps = steps;
        self
    }

    pub fn with_color_style(mut self, style: ColorStyle) -> Self {
        self.color_style = style;
        self
    }

    /// Enable or disable data-parallel colouring.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Check that the configuration can build a field.
    pub fn validate(&self) -> Result<(), FieldError> {
        if self.particle_count == 0 {
            return Err(FieldError::invalid("particle_count must be greater than zero"));
        }
        if self.max_iterations == 0 {
            return Err(FieldError::invalid("max_iterations must be greater than zero"));
        }
        for (axis, range) in ["x", "y", "z"].iter().zip(&self.ranges) {
            if !range.min.is_finite() || !range.max.is_finite() || range.max <= range.min {
                return Err(FieldError::invalid(format!(
                    "{} range [{}, {}] must be finite with max > min",
                    axis, range.min, range.max
                )));
            }
        }
        if !self.unit.is_finite() || self.unit <= 0.0 {
            return Err(FieldError::invalid(format!(
                "unit must be finite and positive, got {}",
                self.unit
            )));
        }
        if !self.escape_threshold.is_finite() || self.escape_threshold <= 0.0 {
            return Err(FieldError::invalid(format!(
                "escape_threshold must be finite and positive, got {}",
                self.escape_threshold
            )));
        }
        let osc = &self.oscillator;
        if !osc.start.is_finite() || !osc.step.is_finite() || osc.step <= 0.0 {
            return Err(FieldError::invalid(format!(
                "oscillator start {} / step {} must be finite with a positive step",
                osc.start, osc.step
            )));
        }
        Ok(())
    }

    /// Save the configuration to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), FieldError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Load a configuration from a JSON file.
    ///
    /// Missing keys fall back to their defaults. The result is not validated;
    /// [`ParticleField::new`](crate::ParticleField::new) does that.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, FieldError> {
        let json = fs::read_to_string(path)?;
        let config = serde_json::from_str(&json)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_classic_setup() {
        let config = FieldConfig::default();
        assert_eq!(config.particle_count, 531_441);
        assert_eq!(config.ranges, [AxisRange::new(-3.0, 3.0); 3]);
        assert_eq!(config.unit, 0.2);
        assert_eq!(config.max_iterations, 64);
        assert_eq!(config.escape_threshold, 8.0);
        assert_eq!(config.oscillator.start, -2.0);
        assert_eq!(config.oscillator.step, 0.0005);
        assert_eq!(config.permutation_steps, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_count_rejected() {
        let config = FieldConfig::default().with_particle_count(0);
        assert!(matches!(
            config.validate(),
            Err(FieldError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_zero_iterations_rejected() {
        let config = FieldConfig::default().with_max_iterations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_degenerate_range_rejected() {
        let config = FieldConfig::default().with_ranges(
            AxisRange::default(),
            AxisRange::new(1.0, 1.0),
            AxisRange::default(),
        );
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("y range"));
    }

    #[test]
    fn test_bad_unit_and_step_rejected() {
        assert!(FieldConfig::default().with_unit(0.0).validate().is_err());
        assert!(FieldConfig::default().with_unit(f32::NAN).validate().is_err());
        assert!(FieldConfig::default().with_oscillator(-2.0, 0.0).validate().is_err());
        assert!(FieldConfig::default().with_escape_threshold(-1.0).validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FieldConfig =
            serde_json::from_str(r#"{ "particle_count": 27, "unit": 0.5 }"#).unwrap();
        assert_eq!(config.particle_count, 27);
        assert_eq!(config.unit, 0.5);
        assert_eq!(config.max_iterations, 64);
        assert_eq!(config.oscillator, OscillatorConfig::default());
        assert_eq!(config.color_style, ColorStyle::Toned);
        assert!(config.parallel);
    }

    #[test]
    fn test_save_load_file() {
        let path = std::env::temp_dir().join(format!(
            "julia_particles_config_{}.json",
            std::process::id()
        ));
        let config = FieldConfig::default()
            .with_particle_count(1000)
            .with_color_style(ColorStyle::Flat)
            .with_permutation_steps(5);
        config.save(&path).unwrap();
        let loaded = FieldConfig::load(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = FieldConfig::load("/definitely/not/here/julia.json").unwrap_err();
        assert!(matches!(err, FieldError::Io(_)));
    }
}
