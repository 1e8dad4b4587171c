//! Deterministic seeded random stream for board generation.
//!
//! Boards are reproducible from a seed label: the label is hashed with 32-bit
//! FNV-1a over its UTF-16 code units, and the hash seeds a Mulberry32 stream.
//! Both are plain wrapping `u32` arithmetic, so a label yields the same board on
//! every platform and in every browser.
//!
//! Fresh labels for "random" games come from the `rand` crate with `SmallRng`,
//! seeded from system entropy (browser crypto API under WASM).

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Substitute state for a zero seed, which would otherwise start a weak stream.
const ZERO_SEED_STATE: u32 = 0xdead_beef;

const LABEL_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const LABEL_LEN: usize = 6;

/// Hash a seed label into a 32-bit generator seed.
pub fn hash_seed(label: &str) -> u32 {
    label.encode_utf16().fold(FNV_OFFSET_BASIS, |h, unit| {
        (h ^ u32::from(unit)).wrapping_mul(FNV_PRIME)
    })
}

/// Mulberry32 stream of floats in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct SeedRng {
    state: u32,
}

impl SeedRng {
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED_STATE } else { seed };
        Self { state }
    }

    /// Create the stream a seed label stands for.
    pub fn from_label(label: &str) -> Self {
        Self::new(hash_seed(label))
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_add(0x6d2b_79f5);
        let t = self.state;
        let mut r = (t ^ (t >> 15)).wrapping_mul(1 | t);
        r ^= r.wrapping_add((r ^ (r >> 7)).wrapping_mul(61 | r));
        r ^ (r >> 14)
    }

    /// Next float in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / 4_294_967_296.0
    }

    /// Draw a strain index in `[0, strains)`.
    #[inline]
    pub fn next_strain(&mut self, strains: u8) -> u8 {
        // Always < strains because next_f64() < 1.
        (self.next_f64() * f64::from(strains)) as u8
    }
}

/// Generate a short random seed label from system entropy.
pub fn random_seed_label() -> String {
    random_seed_label_with(&mut SmallRng::from_os_rng())
}

/// Generate a short base-36 seed label from the given RNG.
pub fn random_seed_label_with<R: Rng>(rng: &mut R) -> String {
    (0..LABEL_LEN)
        .map(|_| LABEL_ALPHABET[rng.random_range(0..LABEL_ALPHABET.len())] as char)
        .collect()
}
