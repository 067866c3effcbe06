//! Assignment of colour channels to escape-time magnitude.
//!
//! The colouriser fills channels in the sequence held by [`ChannelOrder`].
//! Each velocity reversal of the oscillator rotates the order, so the
//! dominant hue cycles red → green → blue as the fractal breathes.

use std::fmt;

/// A permutation of the RGB channel indices `{0, 1, 2}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChannelOrder([usize; 3]);

impl ChannelOrder {
    /// `[0, 1, 2]`: red first, then green, then blue.
    pub const IDENTITY: Self = Self([0, 1, 2]);

    /// Build from an explicit order, or `None` if it is not a permutation
    /// of `{0, 1, 2}`.
    pub fn new(order: [usize; 3]) -> Option<Self> {
        let mut seen = [false; 3];
        for &channel in &order {
            if channel > 2 || seen[channel] {
                return None;
            }
            seen[channel] = true;
        }
        Some(Self(order))
    }

    /// Rotate one position: `(o0, o1, o2)` becomes `(o1, o2, o0)`.
    ///
    /// Done as two pairwise swaps, slot 0 with 1 and then slot 1 with 2.
    pub fn rotate(&mut self) {
        self.0.swap(0, 1);
        self.0.swap(1, 2);
    }

    /// Channel index filled at position `slot` (0 to 2).
    #[inline]
    pub fn get(&self, slot: usize) -> usize {
        self.0[slot]
    }

    #[inline]
    pub fn as_array(&self) -> [usize; 3] {
        self.0
    }
}

impl Default for ChannelOrder {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [char; 3] = ['r', 'g', 'b'];
        write!(f, "{}{}{}", NAMES[self.0[0]], NAMES[self.0[1]], NAMES[self.0[2]])
    }
}
