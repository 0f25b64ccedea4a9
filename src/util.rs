//! Random sampling helpers shared by the games

use rand::Rng;

/// Uniform integer in `[min, max]` (both inclusive)
///
/// `min == max` returns that value. `min > max` is a caller error; it yields
/// `min` instead of panicking.
pub fn random_int<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if min >= max {
        return min;
    }
    rng.random_range(min..=max)
}

/// Pick one item with probability proportional to its weight
///
/// Draws a uniform value in `[0, total)` and returns the first item whose
/// cumulative weight exceeds it. When no item matches (all-zero weights or a
/// rounding edge at the top of the range) the first item is returned.
/// Returns `None` only for an empty item list.
pub fn weighted_choice<'a, T, R: Rng + ?Sized>(
    rng: &mut R,
    items: &'a [T],
    weights: &[f64],
) -> Option<&'a T> {
    let first = items.first()?;

    let mut cumulative = Vec::with_capacity(weights.len());
    let mut sum = 0.0;
    for &w in weights {
        sum += w;
        cumulative.push(sum);
    }

    let draw = rng.random::<f64>() * sum;
    let picked = cumulative
        .iter()
        .zip(items)
        .find(|(c, _)| draw < **c)
        .map(|(_, item)| item);

    Some(picked.unwrap_or(first))
}
