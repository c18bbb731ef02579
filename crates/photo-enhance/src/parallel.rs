//! Row-partitioned data parallelism.
//!
//! Every helper produces bit-identical results whether it runs on rayon or
//! on the calling thread: rows are computed independently, and reductions
//! are returned per band in row order so callers merge them sequentially.
//! The band partition depends only on the image height, never on the
//! thread count.

use std::ops::Range;

use rayon::prelude::*;

/// Below this many samples the rayon dispatch costs more than it saves.
pub(crate) const PARALLEL_THRESHOLD: usize = 64 * 64 * 3;

/// Rows per reduction band.
pub(crate) const BAND_ROWS: usize = 32;

#[inline]
fn use_rayon(parallel: bool, samples: usize) -> bool {
    parallel && samples >= PARALLEL_THRESHOLD
}

/// Run `f(y, row)` over every `row_len`-sized row of `data`.
pub(crate) fn for_each_row_mut<T, F>(data: &mut [T], row_len: usize, parallel: bool, f: F)
where
    T: Send,
    F: Fn(usize, &mut [T]) + Sync,
{
    if row_len == 0 || data.is_empty() {
        return;
    }
    if use_rayon(parallel, data.len()) {
        data.par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| f(y, row));
    } else {
        for (y, row) in data.chunks_mut(row_len).enumerate() {
            f(y, row);
        }
    }
}

/// Split `rows` into fixed bands of [`BAND_ROWS`] and map each band.
///
/// Results come back in band order.
pub(crate) fn map_bands<R, F>(rows: usize, samples_per_row: usize, parallel: bool, f: F) -> Vec<R>
where
    R: Send,
    F: Fn(Range<usize>) -> R + Sync,
{
    let bands = rows.div_ceil(BAND_ROWS);
    let band = |i: usize| i * BAND_ROWS..((i + 1) * BAND_ROWS).min(rows);
    if use_rayon(parallel, rows * samples_per_row) {
        (0..bands).into_par_iter().map(|i| f(band(i))).collect()
    } else {
        (0..bands).map(|i| f(band(i))).collect()
    }
}
