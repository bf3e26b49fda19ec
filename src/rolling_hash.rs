use crate::error::MatchError;
use crate::modular::{Modulus, RADIX};

/// Rabin-Karp polynomial rolling hash over a fixed-width byte window.
///
/// The hash of a window is `sum(byte[j] * 256^(k-1-j)) mod P`, with bytes
/// entering the polynomial as unsigned 0..=255 values. `rotate` slides the
/// window one byte to the right in O(1) using the precomputed weight of the
/// leading byte, `256^(k-1) mod P`.
#[derive(Debug, Clone)]
pub struct RollingHash {
    modulus: Modulus,
    window_size: usize,
    /// `256^(window_size - 1) mod P`.
    head_factor: u64,
    hash: u64,
}

impl RollingHash {
    pub fn new(modulus: Modulus, window_size: usize) -> Result<Self, MatchError> {
        if window_size == 0 {
            return Err(MatchError::InvalidChunkSize);
        }
        let mut head_factor = 1;
        for _ in 1..window_size {
            head_factor = modulus.mul(head_factor, RADIX);
        }
        Ok(Self {
            modulus,
            window_size,
            head_factor,
            hash: 0,
        })
    }

    /// Compute the hash of an initial window from scratch in O(k).
    pub fn init(&mut self, window: &[u8]) {
        debug_assert_eq!(window.len(), self.window_size);
        self.hash = 0;
        for &byte in window {
            self.hash = self
                .modulus
                .add(self.modulus.mul(self.hash, RADIX), u64::from(byte));
        }
    }

    /// Slide the window one byte right: drop `old_byte` from the front, take
    /// `new_byte` in at the back.
    pub fn rotate(&mut self, old_byte: u8, new_byte: u8) {
        let stripped = self
            .modulus
            .sub(self.hash, self.modulus.mul(u64::from(old_byte), self.head_factor));
        self.hash = self
            .modulus
            .add(self.modulus.mul(stripped, RADIX), u64::from(new_byte));
    }

    pub fn digest(&self) -> u64 {
        self.hash
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }
}
