//! Lattice layout for the particle field.
//!
//! Particles sit on a `width × height × depth` lattice derived from the
//! particle count. Each lattice cell maps to two positions:
//!
//! - a **normalized** position inside the sampling domain, fed to the
//!   escape-time iteration
//! - a **display** position, centred on the lattice midpoint and scaled by
//!   `unit`, handed to the renderer
//!
//! The z index divides by `height` twice rather than by `width * height`.
//! That stretches the lattice along z when `width != height`, and is the
//! layout the animation is tuned for, so it is kept as is.

use crate::config::AxisRange;
use crate::error::FieldError;
use glam::Vec3;

/// Integer lattice coordinate of a particle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LatticeCoord {
    pub x: usize,
    pub y: usize,
    pub z: usize,
}

/// Lattice dimensions derived from a particle count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridDims {
    pub width: usize,
    pub height: usize,
    pub depth: usize,
}

impl GridDims {
    /// Size a lattice for `count` particles.
    ///
    /// `width` is the integer cube root of `count`, `height = count / width²`
    /// and `depth = count / height²` (at least 1). The product can differ
    /// from `count`; the field is always sized by `count`.
    pub fn from_count(count: usize) -> Result<Self, FieldError> {
        if count == 0 {
            return Err(FieldError::invalid("particle_count must be greater than zero"));
        }
        let width = integer_cbrt(count);
        let height = count / width / width;
        let depth = (count / height / height).max(1);
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    /// Number of lattice cells (`width * height * depth`).
    pub fn cells(&self) -> usize {
        self.width * self.height * self.depth
    }

    /// Lattice coordinate of the particle at linear `index`.
    #[inline]
    pub fn coord(&self, index: usize) -> LatticeCoord {
        LatticeCoord {
            x: index % self.width,
            y: (index / self.width) % self.height,
            z: (index / self.height / self.height) % self.depth,
        }
    }

    /// Position of `coord` inside the sampling domain.
    ///
    /// Each axis maps `[0, dim)` onto `[min, max)`.
    pub fn normalized_position(&self, coord: LatticeCoord, ranges: &[AxisRange; 3]) -> Vec3 {
        let axis = |i: usize, dim: usize, range: &AxisRange| -> f32 {
            (i as f64 / dim as f64 * range.span() + range.min) as f32
        };
        Vec3::new(
            axis(coord.x, self.width, &ranges[0]),
            axis(coord.y, self.height, &ranges[1]),
            axis(coord.z, self.depth, &ranges[2]),
        )
    }

    /// Position of `coord` centred on the lattice midpoint, scaled by `unit`.
    pub fn display_position(&self, coord: LatticeCoord, unit: f32) -> Vec3 {
        let centred = Vec3::new(
            coord.x as f32 - self.width as f32 * 0.5,
            coord.y as f32 - self.height as f32 * 0.5,
            coord.z as f32 - self.depth as f32 * 0.5,
        );
        centred * unit
    }
}

/// Largest `w` with `w³ <= n`.
fn integer_cbrt(n: usize) -> usize {
    let mut w = (n as f64).cbrt().round() as usize;
    while w > 1 && w.saturating_mul(w).saturating_mul(w) > n {
        w -= 1;
    }
    while (w + 1).saturating_mul(w + 1).saturating_mul(w + 1) <= n {
        w += 1;
    }
    w.max(1)
}
