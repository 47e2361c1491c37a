//! Initial reference set: Chebyshev nodes mapped onto grid indices.
//!
//! `x_k = cos(kπ / (n − 1))`, `index_k = round((1 − x_k) · (N − 1) / 2)`
//!
//! The nodes cluster near both ends of the grid, which is where the
//! extrema of typical lowpass/bandpass designs end up.

/// Map `n_extrema` Chebyshev nodes onto a grid of `grid_len` points.
///
/// The result is non-decreasing and starts at `0` and ends at
/// `grid_len − 1`.  On very small grids neighbouring nodes can round to the
/// same index; those collisions are kept (see [`resolve_collisions`]).
pub fn initial_reference(grid_len: usize, n_extrema: usize) -> Vec<usize> {
    if grid_len == 0 {
        return vec![];
    }
    if n_extrema < 2 {
        return vec![0; n_extrema];
    }
    let half_span = (grid_len - 1) as f64 / 2.0;
    let last = (n_extrema - 1) as f64;
    (0..n_extrema)
        .map(|k| {
            let x = (std::f64::consts::PI * k as f64 / last).cos();
            ((1.0 - x) * half_span).round() as usize
        })
        .collect()
}

/// Move every repeated index to the nearest unused index (upwards first),
/// then sort.  Indices that are already unique come back unchanged.
pub fn resolve_collisions(indices: &[usize], grid_len: usize) -> Vec<usize> {
    let mut used = vec![false; grid_len];
    let mut out = Vec::with_capacity(indices.len());
    for &idx in indices {
        let slot = (0..grid_len)
            .flat_map(|d| [idx.checked_add(d), idx.checked_sub(d)])
            .flatten()
            .find(|&i| i < grid_len && !used[i]);
        match slot {
            Some(i) => {
                used[i] = true;
                out.push(i);
            }
            None => out.push(idx),
        }
    }
    out.sort_unstable();
    out
}
