//! Extremum exchange: pick the next reference set from the error curve.
//!
//! The strongest interior peaks are taken first, alternating in sign, with
//! both grid ends always present.  When the curve does not have enough
//! alternating peaks (flat regions, tiny grids) the set is padded, first
//! with the remaining peaks and then with evenly spaced indices, so the
//! solver always receives exactly `n_required` points.
use ndarray::ArrayView1;

/// Select exactly `n_required` strictly increasing indices of `error`,
/// always including `0` and `error.len() − 1`.
///
/// Requires `error.len() >= n_required >= 2`; with a shorter curve every
/// index is returned.
pub fn select_extrema(error: ArrayView1<f64>, n_required: usize) -> Vec<usize> {
    let n = error.len();
    if n <= n_required || n_required < 2 {
        return (0..n.min(n_required)).collect();
    }
    let last = n - 1;

    let mut candidates: Vec<usize> = (1..last)
        .filter(|&i| {
            let (prev, cur, next) = (error[i - 1], error[i], error[i + 1]);
            (cur > prev && cur > next) || (cur < prev && cur < next)
        })
        .collect();
    candidates.sort_by(|&i, &j| error[j].abs().total_cmp(&error[i].abs()));

    let mut chosen = vec![0];
    let mut last_sign = sign(error[0]);
    for &i in &candidates {
        if chosen.len() == n_required - 1 {
            break;
        }
        let s = sign(error[i]);
        if s != last_sign {
            chosen.push(i);
            last_sign = s;
        }
    }
    chosen.push(last);

    if chosen.len() < n_required {
        for &i in &candidates {
            if chosen.len() == n_required {
                break;
            }
            if !chosen.contains(&i) {
                chosen.push(i);
            }
        }
    }

    if chosen.len() < n_required {
        let step = last as f64 / (n_required - 1) as f64;
        for k in 0..n_required {
            if chosen.len() == n_required {
                break;
            }
            let i = (k as f64 * step).round() as usize;
            if !chosen.contains(&i) {
                chosen.push(i);
            }
        }
    }

    chosen.sort_unstable();
    chosen
}

/// −1, 0 or +1.
fn sign(v: f64) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}
