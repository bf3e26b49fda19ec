use crate::error::MatchError;

/// Default hash modulus: a 53-bit prime, leaving room for `P * 256` in 64 bits.
pub const DEFAULT_MODULUS: u64 = 5_003_943_032_159_437;

/// Byte radix of the polynomial hash.
pub const RADIX: u64 = 256;

/// Modular arithmetic over a fixed prime `P`.
///
/// The modulus is an explicit value threaded through the hash engine, so two
/// concurrent matches can use different primes without sharing any state.
/// `new` rejects moduli at or above 2^56: operands stay below `P`, which keeps
/// every sum comfortably inside `u64` and the rolling recurrence's
/// multiply-by-256 inside the headroom the hash was designed around.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modulus(u64);

impl Modulus {
    pub fn new(p: u64) -> Result<Self, MatchError> {
        if p == 0 || p.checked_mul(RADIX).is_none() {
            return Err(MatchError::InvalidModulus(p));
        }
        Ok(Self(p))
    }

    pub fn get(self) -> u64 {
        self.0
    }

    /// `(a + b) mod P` for `a, b < P`.
    #[inline]
    pub fn add(self, a: u64, b: u64) -> u64 {
        let sum = a + b;
        if sum >= self.0 {
            sum - self.0
        } else {
            sum
        }
    }

    /// `(a - b) mod P` for `a, b < P`, never wrapping below zero.
    #[inline]
    pub fn sub(self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            a + self.0 - b
        }
    }

    /// `(a * b) mod P`, widening through `u128` so the product cannot wrap.
    #[inline]
    pub fn mul(self, a: u64, b: u64) -> u64 {
        ((u128::from(a) * u128::from(b)) % u128::from(self.0)) as u64
    }
}

impl Default for Modulus {
    fn default() -> Self {
        Self(DEFAULT_MODULUS)
    }
}
