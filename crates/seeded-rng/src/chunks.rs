//! Random partitioning of the unit interval
//!
//! A chunk partition splits `1.0` into `count` proportions. Each proportion
//! receives at least `min_chunk`; the budget left after that reservation is
//! spread according to a uniform random partition (sorted cut points).

use crate::{ChunkError, SeededRng};

/// Tolerance for treating sums and reservations as exact
pub const EPSILON: f64 = 1e-12;

/// How many chunks to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChunkCount {
    /// Exactly this many chunks
    Exact(usize),
    /// A count drawn uniformly from the inclusive range (one draw)
    Between { min: usize, max: usize },
}

/// Parameters for [`SeededRng::chunks`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkRequest {
    pub count: ChunkCount,
    /// Minimum fraction every chunk must receive
    pub min_chunk: f64,
}

impl ChunkRequest {
    /// Requests exactly `count` chunks
    pub fn exact(count: usize, min_chunk: f64) -> Self {
        Self {
            count: ChunkCount::Exact(count),
            min_chunk,
        }
    }

    /// Requests a random number of chunks in `[min_count, max_count]`
    pub fn between(min_count: usize, max_count: usize, min_chunk: f64) -> Self {
        Self {
            count: ChunkCount::Between {
                min: min_count,
                max: max_count,
            },
            min_chunk,
        }
    }
}

fn resolve_count(rng: &mut SeededRng, count: ChunkCount) -> Result<usize, ChunkError> {
    match count {
        ChunkCount::Exact(n) => Ok(n),
        ChunkCount::Between { min, max } => {
            if min > max {
                return Err(ChunkError::invalid(format!(
                    "min_count {min} exceeds max_count {max}"
                )));
            }
            let span = max
                .checked_sub(min)
                .and_then(|s| s.checked_add(1))
                .ok_or_else(|| {
                    ChunkError::invalid(format!("count range [{min}, {max}] is too wide"))
                })?;
            Ok((rng.next_f64() * span as f64 + min as f64).floor() as usize)
        }
    }
}

/// Partitions the unit interval according to `request`
///
/// Steps:
/// 1. Resolve the count (drawing it when a range is given).
/// 2. Reject a negative or non-finite `min_chunk`.
/// 3. Degenerate cases: zero chunks is empty, one chunk is `[1.0]`, and a
///    reservation equal to the whole yields equal shares without drawing.
/// 4. Otherwise draw `count - 1` cut points, sort them, and scale the gaps
///    into the budget left after reserving `min_chunk` per chunk.
///
/// The result sums to 1 (renormalised if rounding drifted) and every element
/// is at least `min_chunk` up to rounding.
pub fn partition(rng: &mut SeededRng, request: &ChunkRequest) -> Result<Vec<f64>, ChunkError> {
    let count = resolve_count(rng, request.count)?;
    let min_chunk = request.min_chunk;

    if !min_chunk.is_finite() {
        return Err(ChunkError::invalid("min_chunk must be finite"));
    }
    if min_chunk < 0.0 {
        return Err(ChunkError::invalid(format!(
            "min_chunk must not be negative, got {min_chunk}"
        )));
    }

    if count == 0 {
        return Ok(Vec::new());
    }

    if count == 1 {
        if min_chunk > 1.0 {
            return Err(ChunkError::invalid(format!(
                "min_chunk {min_chunk} too large for a single chunk"
            )));
        }
        return Ok(vec![1.0]);
    }

    let reserved = min_chunk * count as f64;
    if (reserved - 1.0).abs() <= EPSILON {
        return Ok(vec![1.0 / count as f64; count]);
    }
    if reserved > 1.0 + EPSILON {
        return Err(ChunkError::invalid(format!(
            "count * min_chunk = {reserved} exceeds 1"
        )));
    }
    let remaining = (1.0 - reserved).max(0.0);

    let mut cuts: Vec<f64> = (0..count - 1).map(|_| rng.next_f64()).collect();
    cuts.sort_by(f64::total_cmp);

    let mut out: Vec<f64> = std::iter::once(0.0)
        .chain(cuts.iter().copied())
        .zip(cuts.iter().copied().chain(std::iter::once(1.0)))
        .map(|(lo, hi)| {
            let gap = hi - lo;
            let gap = if gap < 0.0 && gap > -EPSILON { 0.0 } else { gap };
            min_chunk + gap * remaining
        })
        .collect();

    let sum: f64 = out.iter().sum();
    if sum != 0.0 && (sum - 1.0).abs() > EPSILON {
        out.iter_mut().for_each(|c| *c /= sum);
    }

    out.iter_mut()
        .filter(|c| **c < 0.0 && **c > -EPSILON)
        .for_each(|c| *c = 0.0);

    Ok(out)
}
