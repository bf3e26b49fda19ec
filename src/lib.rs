//! Chunk-level document matching.
//!
//! The query document is cut into fixed-size chunks and each chunk is searched
//! for verbatim anywhere in a target document. The batch path hashes every
//! chunk into a Bloom filter and scans the target with a rolling hash in one
//! linear pass; every filter hit is verified byte-for-byte, so counts are
//! exact despite the probabilistic filter.

pub mod bloom;
pub mod error;
pub mod matcher;
pub mod modular;
pub mod rolling_hash;
pub mod util;
