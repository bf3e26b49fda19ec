use std::collections::TryReserveError;

use thiserror::Error;

/// Errors produced by the matching engine.
///
/// A target document shorter than the chunk size is not an error; it is
/// defined as zero matches by the matcher itself.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("chunk size must be positive")]
    InvalidChunkSize,

    #[error("bloom filter needs a positive number of bits")]
    InvalidFilterSize,

    #[error("invalid modulus {0}: must be positive and below 2^56 so hash arithmetic stays in 64 bits")]
    InvalidModulus(u64),

    #[error("failed to allocate {bytes} bytes for the bloom filter bitmap")]
    FilterAllocation {
        bytes: usize,
        #[source]
        source: TryReserveError,
    },
}
