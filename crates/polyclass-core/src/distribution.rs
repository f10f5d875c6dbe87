//! Arithmetic on class-probability vectors.
//!
//! A distribution is a dense `[f64]` indexed by class. Decoders build an
//! unnormalized accumulator first and normalize it once at the end.

/// Total mass of a distribution.
pub fn sum(dist: &[f64]) -> f64 {
    dist.iter().sum()
}

/// Scale `dist` in place so that it sums to one.
///
/// Returns `false` and leaves `dist` untouched when the total is not
/// strictly positive (an all-zero vote cannot be normalized).
pub fn normalize(dist: &mut [f64]) -> bool {
    let total = sum(dist);
    if !(total > 0.0) || !total.is_finite() {
        return false;
    }
    for p in dist.iter_mut() {
        *p /= total;
    }
    true
}

/// Index of the largest entry; ties resolve to the lowest index.
/// NaN entries are ignored.
pub fn argmax(dist: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in dist.iter().enumerate() {
        if p.is_nan() {
            continue;
        }
        match best {
            Some((_, bp)) if bp >= p => {}
            _ => best = Some((i, p)),
        }
    }
    best.map(|(i, _)| i)
}
