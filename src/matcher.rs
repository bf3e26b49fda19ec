use crate::bloom::BloomFilter;
use crate::error::MatchError;
use crate::modular::Modulus;
use crate::rolling_hash::RollingHash;

/// Naive baseline: does `chunk` occur anywhere in `target`?
pub fn simple_match(chunk: &[u8], target: &[u8]) -> bool {
    !chunk.is_empty()
        && target.len() >= chunk.len()
        && target.windows(chunk.len()).any(|w| w == chunk)
}

/// Rabin-Karp single-chunk path: hash the chunk once, roll a window across
/// the target, and byte-compare whenever the hashes collide. The comparison
/// rules out genuine hash collisions, so the result is exact.
///
/// A target shorter than the chunk is not an error: it simply holds no match.
pub fn rolling_match(chunk: &[u8], target: &[u8], modulus: Modulus) -> Result<bool, MatchError> {
    let k = chunk.len();
    let mut hasher = RollingHash::new(modulus, k)?;
    if target.len() < k {
        return Ok(false);
    }

    hasher.init(chunk);
    let needle = hasher.digest();

    hasher.init(&target[..k]);
    for i in 0..=target.len() - k {
        if hasher.digest() == needle && target[i..i + k] == *chunk {
            return Ok(true);
        }
        if i + k < target.len() {
            hasher.rotate(target[i], target[i + k]);
        }
    }
    Ok(false)
}

/// Matches every fixed-size chunk of one query document against target
/// documents in a single linear pass per target.
///
/// Construction is the insert phase: each of the `⌊m/k⌋` query chunks is
/// hashed once and inserted into a Bloom filter the matcher owns. After that
/// the matcher is immutable, so one instance can be shared by reference
/// across threads querying different targets concurrently.
pub struct BatchMatcher<'a> {
    chunks: Vec<&'a [u8]>,
    filter: BloomFilter,
    /// Pre-validated hasher template, cloned for each target scan.
    hasher: RollingHash,
}

impl<'a> BatchMatcher<'a> {
    pub fn new(
        query: &'a [u8],
        chunk_size: usize,
        filter_bits: usize,
        modulus: Modulus,
    ) -> Result<Self, MatchError> {
        let mut hasher = RollingHash::new(modulus, chunk_size)?;
        let mut filter = BloomFilter::new(filter_bits)?;

        // Trailing bytes that do not fill a whole chunk are not matched.
        let chunks: Vec<&[u8]> = query.chunks_exact(chunk_size).collect();
        for chunk in &chunks {
            hasher.init(chunk);
            filter.insert(hasher.digest());
        }

        Ok(Self {
            chunks,
            filter,
            hasher,
        })
    }

    pub fn filter(&self) -> &BloomFilter {
        &self.filter
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Count how many query chunks occur verbatim in `target`.
    ///
    /// One rolling-hash pass over the target. Every filter hit falls through
    /// to a byte-exact comparison: the filter never false-negatives, so no
    /// true occurrence is skipped, and it may false-positive, so the
    /// comparison is mandatory to avoid overcounting.
    ///
    /// Each query chunk is credited at most once, and a single target window
    /// credits at most one chunk (the first not-yet-matched one in chunk
    /// order). Duplicate query chunks therefore count independently, each
    /// needing its own window. The count never exceeds `chunk_count()`.
    pub fn count_matches(&self, target: &[u8]) -> usize {
        let k = self.hasher.window_size();
        if target.len() < k || self.chunks.is_empty() {
            return 0;
        }

        let mut hasher = self.hasher.clone();
        hasher.init(&target[..k]);

        let mut matched = vec![false; self.chunks.len()];
        let mut score = 0;
        for i in 0..=target.len() - k {
            if self.filter.contains(hasher.digest()) {
                let window = &target[i..i + k];
                for (j, chunk) in self.chunks.iter().enumerate() {
                    if !matched[j] && window == *chunk {
                        matched[j] = true;
                        score += 1;
                        break;
                    }
                }
            }
            if i + k < target.len() {
                hasher.rotate(target[i], target[i + k]);
            }
        }
        score
    }
}

/// One-shot batch match: build the filter from `query`, scan `target` once,
/// return the number of query chunks found.
pub fn batch_match(
    query: &[u8],
    target: &[u8],
    chunk_size: usize,
    filter_bits: usize,
    modulus: Modulus,
) -> Result<usize, MatchError> {
    Ok(BatchMatcher::new(query, chunk_size, filter_bits, modulus)?.count_matches(target))
}

/// First `limit` rolling window hashes of `target`, for diagnostics.
pub fn window_hashes(
    target: &[u8],
    chunk_size: usize,
    modulus: Modulus,
    limit: usize,
) -> Result<Vec<u64>, MatchError> {
    let mut hasher = RollingHash::new(modulus, chunk_size)?;
    if target.len() < chunk_size || limit == 0 {
        return Ok(Vec::new());
    }

    let window_count = target.len() - chunk_size + 1;
    let mut out = Vec::with_capacity(limit.min(window_count));
    hasher.init(&target[..chunk_size]);
    for i in 0..window_count {
        out.push(hasher.digest());
        if out.len() == limit {
            break;
        }
        if i + chunk_size < target.len() {
            hasher.rotate(target[i], target[i + chunk_size]);
        }
    }
    Ok(out)
}
