//! # julia-particles
//!
//! A dense 3D lattice of particles coloured by a Julia-style escape-time
//! iteration, animated by an oscillating fourth coordinate.
//!
//! The crate is the simulation core only. It produces, per particle, an
//! object-space position and an RGBA colour; windows, cameras and draw calls
//! belong to whatever renderer consumes them.
//!
//! ## Quick Start
//!
//! ```ignore
//! use julia_particles::prelude::*;
//!
//! let mut field = ParticleField::new(
//!     FieldConfig::default()
//!         .with_particle_count(27 * 27 * 27)
//!         .with_unit(0.5),
//! )?;
//!
//! // Once per rendered frame
//! field.update();
//! for (position, color) in field.iter() {
//!     // hand to the renderer
//! }
//! ```
//!
//! ## Pipeline
//!
//! Each [`ParticleField::update`] runs:
//!
//! 1. [`Oscillator::step`] advances the driving value.
//! 2. On a velocity sign change, [`ChannelOrder::rotate`] shifts which colour
//!    channel fills first.
//! 3. [`Colorizer::color`] recolours every particle from its normalized
//!    position, the driving value and the channel order.
//!
//! | Module | Role |
//! |--------|------|
//! | [`grid`] | Lattice sizing and per-particle positions |
//! | [`oscillator`] | Driving-value state machine |
//! | [`channels`] | Colour channel order |
//! | [`colorize`] | Escape-time iteration and channel spread |
//! | [`permutation`] | Lexicographic permutation table |
//! | [`field`] | The aggregate that ties them together |
//! | [`config`] | Serializable configuration |

pub mod channels;
pub mod colorize;
pub mod config;
mod error;
pub mod field;
pub mod grid;
pub mod oscillator;
mod particle;
pub mod permutation;

pub use bytemuck;
pub use channels::ChannelOrder;
pub use colorize::{ColorStyle, Colorizer};
pub use config::{AxisRange, FieldConfig, OscillatorConfig, DEFAULT_PARTICLE_COUNT};
pub use error::FieldError;
pub use field::ParticleField;
pub use glam::{Vec3, Vec4};
pub use grid::{GridDims, LatticeCoord};
pub use oscillator::{Direction, Oscillator, OscillatorStep};
pub use particle::{Particle, ParticleVertex, INITIAL_COLOR};
pub use permutation::PermutationTable;

/// Convenient re-exports for common usage.
///
/// ```ignore
/// use julia_particles::prelude::*;
/// ```
pub mod prelude {
    pub use crate::channels::ChannelOrder;
    pub use crate::colorize::{ColorStyle, Colorizer};
    pub use crate::config::{AxisRange, FieldConfig, OscillatorConfig};
    pub use crate::error::FieldError;
    pub use crate::field::ParticleField;
    pub use crate::oscillator::{Direction, Oscillator};
    pub use crate::particle::{Particle, ParticleVertex};
    pub use crate::{Vec3, Vec4};
}
