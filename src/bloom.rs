use crate::error::MatchError;

/// Auxiliary primes of the double-hash index family.
const H1_PRIME: u64 = 4_189_793;
const H2_PRIME: u64 = 3_296_731;

/// Number of bits set per inserted value and probed per query.
const HASH_COUNT: u64 = 10;

/// Fixed-size bit-packed Bloom filter keyed by 64-bit hash values.
///
/// Inserted values always test positive (no false negatives); values never
/// inserted may test positive with a probability governed by the filter size.
/// The filter is write-once, read-many: bits are never cleared and there is
/// no deletion. The bitmap is owned by the filter and freed on drop.
pub struct BloomFilter {
    /// Bit array, MSB-first within each byte.
    bits: Vec<u8>,
    bit_count: usize,
}

/// Bit position probed by hash function `i` for `value`.
///
/// A pure double-hash formula: `(v mod H1) + i*(v mod H2) + 1 + i*i`, reduced
/// modulo the filter width. The same value always maps to the same set of
/// `HASH_COUNT` positions.
fn bit_index(i: u64, value: u64, bit_count: usize) -> usize {
    let spread = (value % H1_PRIME) + i * (value % H2_PRIME) + 1 + i * i;
    (spread % bit_count as u64) as usize
}

impl BloomFilter {
    /// Allocate a zero-filled filter of `bit_count` bits.
    ///
    /// Fails with [`MatchError::InvalidFilterSize`] when `bit_count` is zero
    /// and with [`MatchError::FilterAllocation`] when the bitmap cannot be
    /// allocated.
    pub fn new(bit_count: usize) -> Result<Self, MatchError> {
        if bit_count == 0 {
            return Err(MatchError::InvalidFilterSize);
        }
        let byte_count = bit_count.div_ceil(8);
        let mut bits = Vec::new();
        bits.try_reserve_exact(byte_count)
            .map_err(|source| MatchError::FilterAllocation {
                bytes: byte_count,
                source,
            })?;
        bits.resize(byte_count, 0);
        Ok(Self { bits, bit_count })
    }

    pub fn bit_count(&self) -> usize {
        self.bit_count
    }

    /// Set all `HASH_COUNT` bit positions for `value`.
    pub fn insert(&mut self, value: u64) {
        for i in 0..HASH_COUNT {
            let pos = bit_index(i, value, self.bit_count);
            self.bits[pos / 8] |= 1 << (7 - pos % 8);
        }
    }

    /// Probe all `HASH_COUNT` bit positions for `value`; true only if every
    /// one is set. Stops at the first clear bit.
    pub fn contains(&self, value: u64) -> bool {
        (0..HASH_COUNT).all(|i| {
            let pos = bit_index(i, value, self.bit_count);
            self.bits[pos / 8] & (1 << (7 - pos % 8)) != 0
        })
    }

    /// Hex rendering of the first `prefix_bits` bits, two lowercase digits per
    /// byte, space separated, capped at the filter's actual width.
    ///
    /// `prefix_bits` must be a multiple of 8.
    pub fn dump(&self, prefix_bits: usize) -> String {
        assert!(prefix_bits % 8 == 0, "dump length must be a multiple of 8 bits");
        let byte_count = (prefix_bits / 8).min(self.bits.len());
        self.bits[..byte_count]
            .iter()
            .map(|b| format!("{b:02x}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
