//! The particle field: lattice, oscillator, channel order and colours.
//!
//! [`ParticleField`] owns all per-frame state. A renderer builds one, calls
//! [`ParticleField::update`] once per frame and then reads positions and
//! colours back, either as [`Particle`] records or as packed
//! [`ParticleVertex`] data ready for upload.
//!
//! # Example
//!
//! ```ignore
//! use julia_particles::prelude::*;
//!
//! let mut field = ParticleField::new(FieldConfig::default())?;
//! loop {
//!     field.update();
//!     for batch in field.vertex_batches(729) {
//!         renderer.draw_points(bytemuck::cast_slice(&batch));
//!     }
//! }
//! ```
//!
//! # Frame order
//!
//! `update` advances the oscillator, rotates the channel order if the
//! velocity changed sign, and only then recolours particles. Colouring reads
//! nothing but the driving value, the channel order and each particle's own
//! normalized position, so with the `parallel` feature it runs on rayon's
//! pool and gives the same result as the sequential pass.

use crate::channels::ChannelOrder;
use crate::colorize::Colorizer;
use crate::config::FieldConfig;
use crate::error::FieldError;
use crate::grid::GridDims;
use crate::oscillator::Oscillator;
use crate::particle::{Particle, ParticleVertex};
use crate::permutation::PermutationTable;
use glam::{Vec3, Vec4};
use tracing::{debug, debug_span, info, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Animated Julia-set particle field.
#[derive(Clone, Debug)]
pub struct ParticleField {
    config: FieldConfig,
    dims: GridDims,
    particles: Vec<Particle>,
    oscillator: Oscillator,
    order: ChannelOrder,
    colorizer: Colorizer,
    permutation: PermutationTable,
    frame: u64,
}

impl ParticleField {
    /// Build a field from a configuration.
    ///
    /// Fails with [`FieldError::InvalidConfiguration`] if the configuration
    /// does not validate.
    pub fn new(config: FieldConfig) -> Result<Self, FieldError> {
        config.validate()?;
        let dims = GridDims::from_count(config.particle_count)?;

        let particles: Vec<Particle> = (0..config.particle_count)
            .map(|i| {
                let coord = dims.coord(i);
                Particle::new(
                    dims.normalized_position(coord, &config.ranges),
                    dims.display_position(coord, config.unit),
                )
            })
            .collect();

        info!(
            count = config.particle_count,
            width = dims.width,
            height = dims.height,
            depth = dims.depth,
            unit = config.unit,
            max_iterations = config.max_iterations,
            "particle field built"
        );

        Ok(Self {
            dims,
            particles,
            oscillator: Oscillator::from_config(&config.oscillator),
            order: ChannelOrder::IDENTITY,
            colorizer: Colorizer::from_config(&config),
            permutation: PermutationTable::new(config.permutation_steps),
            frame: 0,
            config,
        })
    }

    /// Build a field of `count` particles with every other setting at its default.
    pub fn with_count(count: usize) -> Result<Self, FieldError> {
        Self::new(FieldConfig::default().with_particle_count(count))
    }

    /// Advance one frame and recolour every particle.
    pub fn update(&mut self) {
        self.frame += 1;
        let _span = debug_span!("field_update", frame = self.frame).entered();

        let step = self.oscillator.step();
        if step.flipped {
            debug!(
                frame = self.frame,
                position = self.oscillator.position(),
                direction = ?self.oscillator.direction(),
                "oscillator direction flipped"
            );
        }
        if step.reversed {
            self.order.rotate();
            debug!(
                frame = self.frame,
                velocity = self.oscillator.velocity(),
                order = %self.order,
                "channel order rotated"
            );
        }

        self.colorize();
        trace!(
            frame = self.frame,
            driving = self.oscillator.position(),
            order = %self.order,
            "field recoloured"
        );
    }

    fn colorize(&mut self) {
        let colorizer = self.colorizer;
        let driving = self.oscillator.position();
        let order = self.order;
        self.for_each_particle(move |p| {
            p.color = colorizer.color(p.normalized_position(), driving, order);
        });
    }

    #[cfg(feature = "parallel")]
    fn for_each_particle<F>(&mut self, f: F)
    where
        F: Fn(&mut Particle) + Send + Sync,
    {
        if self.config.parallel {
            self.particles.par_iter_mut().for_each(f);
        } else {
            self.particles.iter_mut().for_each(f);
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn for_each_particle<F>(&mut self, f: F)
    where
        F: Fn(&mut Particle),
    {
        self.particles.iter_mut().for_each(f);
    }

    /// All particles in lattice order.
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// `(display_position, color)` for every particle.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Vec3, Vec4)> + '_ {
        self.particles
            .iter()
            .map(|p| (p.display_position(), p.color()))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Packed vertices for every particle.
    pub fn vertices(&self) -> Vec<ParticleVertex> {
        self.particles.iter().map(Particle::vertex).collect()
    }

    /// Fill `out` with vertices from the start of the field.
    ///
    /// Returns how many were written: the shorter of `out.len()` and
    /// [`len`](Self::len).
    pub fn write_vertices(&self, out: &mut [ParticleVertex]) -> usize {
        let n = out.len().min(self.particles.len());
        for (slot, particle) in out.iter_mut().zip(&self.particles) {
            *slot = particle.vertex();
        }
        n
    }

    /// Vertices in consecutive batches of `batch_len` (the last may be
    /// shorter). A `batch_len` of 0 is treated as 1.
    pub fn vertex_batches(&self, batch_len: usize) -> impl Iterator<Item = Vec<ParticleVertex>> + '_ {
        self.particles
            .chunks(batch_len.max(1))
            .map(|chunk| chunk.iter().map(Particle::vertex).collect())
    }

    /// Vertex data as raw bytes, [`ParticleVertex::STRIDE`] bytes per particle.
    ///
    /// Written straight into one byte buffer. `bytemuck::cast_vec` cannot
    /// reinterpret a `Vec<ParticleVertex>` as `Vec<u8>` because the
    /// alignments differ.
    pub fn vertex_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.particles.len() * ParticleVertex::STRIDE);
        for particle in &self.particles {
            bytes.extend_from_slice(bytemuck::bytes_of(&particle.vertex()));
        }
        bytes
    }

    /// Frames advanced so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Current driving value (the oscillator position).
    #[inline]
    pub fn driving_value(&self) -> f64 {
        self.oscillator.position()
    }

    #[inline]
    pub fn channel_order(&self) -> ChannelOrder {
        self.order
    }

    #[inline]
    pub fn oscillator(&self) -> &Oscillator {
        &self.oscillator
    }

    #[inline]
    pub fn permutation(&self) -> &PermutationTable {
        &self.permutation
    }

    #[inline]
    pub fn colorizer(&self) -> &Colorizer {
        &self.colorizer
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }
}
