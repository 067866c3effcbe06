//! Lexicographic permutation table.
//!
//! The field keeps a 4-element permutation of `[0, 1, 2, 3]`, advanced
//! `permutation_steps` times at start-up. With the default of zero steps it
//! stays sorted. Nothing in the colouring pipeline reads it yet; it is
//! exposed through [`ParticleField::permutation`](crate::ParticleField::permutation).

/// Rearrange `items` into the next lexicographically greater permutation.
///
/// Returns `false` and resets `items` to ascending order when it already
/// holds the last permutation.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }

    // Rightmost ascent
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }
    if i == 0 {
        items.reverse();
        return false;
    }

    let mut j = items.len() - 1;
    while items[j] <= items[i - 1] {
        j -= 1;
    }
    items.swap(i - 1, j);
    items[i..].reverse();
    true
}

/// Number of elements in the table.
pub const PERMUTATION_LEN: usize = 4;

/// A permutation of `0..4` advanced a fixed number of lexicographic steps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    indices: [usize; PERMUTATION_LEN],
}

impl PermutationTable {
    /// Start from sorted order and take `steps` lexicographic steps,
    /// wrapping back to sorted order after the last permutation.
    pub fn new(steps: u32) -> Self {
        let mut indices = [0, 1, 2, 3];
        let steps = steps as usize % Self::cycle_len();
        for _ in 0..steps {
            next_permutation(&mut indices);
        }
        Self { indices }
    }

    /// Number of distinct tables (`4!`).
    pub const fn cycle_len() -> usize {
        factorial(PERMUTATION_LEN)
    }

    #[inline]
    pub fn indices(&self) -> &[usize; PERMUTATION_LEN] {
        &self.indices
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::new(0)
    }
}

const fn factorial(n: usize) -> usize {
    if n <= 1 {
        1
    } else {
        n * factorial(n - 1)
    }
}
