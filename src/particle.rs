//! Particle record and its renderer-facing vertex.

use bytemuck::{Pod, Zeroable};
use glam::{Vec3, Vec4};

/// Colour every particle shows before the first update (opaque yellow).
pub const INITIAL_COLOR: Vec4 = Vec4::new(1.0, 1.0, 0.0, 1.0);

/// One lattice cell.
///
/// Both positions are fixed at construction; only the colour changes from
/// frame to frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    normalized_position: Vec3,
    display_position: Vec3,
    pub(crate) color: Vec4,
}

impl Particle {
    pub(crate) fn new(normalized_position: Vec3, display_position: Vec3) -> Self {
        Self {
            normalized_position,
            display_position,
            color: INITIAL_COLOR,
        }
    }

    /// Position in the sampling domain, fed to the escape-time iteration.
    #[inline]
    pub fn normalized_position(&self) -> Vec3 {
        self.normalized_position
    }

    /// Object-space position for drawing.
    #[inline]
    pub fn display_position(&self) -> Vec3 {
        self.display_position
    }

    /// Current RGBA colour. RGB is unclamped; alpha is always 1.
    #[inline]
    pub fn color(&self) -> Vec4 {
        self.color
    }

    #[inline]
    pub fn vertex(&self) -> ParticleVertex {
        ParticleVertex {
            position: self.display_position.to_array(),
            color: self.color.to_array(),
        }
    }
}

/// Position and colour laid out for a vertex buffer.
///
/// `#[repr(C)]` with no padding: 12 bytes of position followed by 16 bytes
/// of colour.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct ParticleVertex {
    pub position: [f32; 3],
    pub color: [f32; 4],
}

impl ParticleVertex {
    /// Byte stride of one vertex.
    pub const STRIDE: usize = std::mem::size_of::<Self>();
}
