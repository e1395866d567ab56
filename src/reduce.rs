//! Slice reductions built on packs.
//!
//! Full packs are accumulated lane-wise, the accumulator is reduced with a
//! horizontal sum, and the remaining `len % LANES` elements are folded in
//! sequentially. The width class is the first type parameter:
//!
//! ```
//! use simdpack::{reduce, Avx, Sse};
//!
//! let xs: Vec<f64> = (1..=10).map(f64::from).collect();
//! assert_eq!(reduce::sum::<Avx, _>(&xs), 55.0);
//! assert_eq!(reduce::max::<Sse, _>(&xs), Some(10.0));
//! assert_eq!(reduce::min::<Sse, f32>(&[]), None);
//! ```

use crate::pack::Pack;
use crate::simd::SimdScalar;
use crate::traits::Width;

/// Σ xᵢ. Zero for an empty slice.
pub fn sum<W: Width, T: SimdScalar<W>>(xs: &[T]) -> T {
    let mut chunks = xs.chunks_exact(T::LANES);
    let mut acc = Pack::<T, W>::zeros();
    for c in &mut chunks {
        acc += Pack::from_slice(c);
    }
    chunks.remainder().iter().fold(acc.hsum(), |s, &x| s + x)
}

/// Σ aᵢ bᵢ.
///
/// # Panics
/// If the slices differ in length.
pub fn dot<W: Width, T: SimdScalar<W>>(a: &[T], b: &[T]) -> T {
    assert_eq!(a.len(), b.len(), "reduce::dot: length mismatch");
    let mut ca = a.chunks_exact(T::LANES);
    let mut cb = b.chunks_exact(T::LANES);
    let mut acc = Pack::<T, W>::zeros();
    for (x, y) in (&mut ca).zip(&mut cb) {
        acc += Pack::from_slice(x) * Pack::from_slice(y);
    }
    ca.remainder()
        .iter()
        .zip(cb.remainder())
        .fold(acc.hsum(), |s, (&x, &y)| s + x * y)
}

/// Σ xᵢ².
pub fn sum_sq<W: Width, T: SimdScalar<W>>(xs: &[T]) -> T {
    let mut chunks = xs.chunks_exact(T::LANES);
    let mut acc = Pack::<T, W>::zeros();
    for c in &mut chunks {
        acc += Pack::from_slice(c).sqr();
    }
    chunks.remainder().iter().fold(acc.hsum(), |s, &x| s + x * x)
}

/// Largest element, `None` for an empty slice. Inputs must not contain NaN.
pub fn max<W: Width, T: SimdScalar<W>>(xs: &[T]) -> Option<T> {
    extremum::<W, T>(xs, Pack::max, |a, b| if a > b { a } else { b })
}

/// Smallest element, `None` for an empty slice. Inputs must not contain NaN.
pub fn min<W: Width, T: SimdScalar<W>>(xs: &[T]) -> Option<T> {
    extremum::<W, T>(xs, Pack::min, |a, b| if a < b { a } else { b })
}

fn extremum<W: Width, T: SimdScalar<W>>(
    xs: &[T],
    lanes: impl Fn(Pack<T, W>, Pack<T, W>) -> Pack<T, W>,
    pick: impl Fn(T, T) -> T,
) -> Option<T> {
    let (&first, _) = xs.split_first()?;
    let mut chunks = xs.chunks_exact(T::LANES);
    let mut best = match chunks.next() {
        Some(c) => {
            let acc = chunks.by_ref().fold(Pack::from_slice(c), |m, c| lanes(m, Pack::from_slice(c)));
            acc.to_array().as_ref().iter().fold(first, |m, &x| pick(m, x))
        }
        None => first,
    };
    for &x in chunks.remainder() {
        best = pick(best, x);
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{Avx, Sse};

    fn rel_close(a: f64, b: f64, tol: f64) {
        assert!(
            (a - b).abs() <= tol * b.abs().max(1.0),
            "rel_close failed: {a} vs {b}"
        );
    }

    // Prefix lengths straddle several packs plus every tail size.
    #[test]
    fn sum_matches_sequential_for_every_prefix() {
        let xs: Vec<f64> = (0..48).map(|i| 1.0 + (i as f64 * 0.7).sin() * 3.5).collect();
        for k in 0..=48 {
            let seq: f64 = xs[..k].iter().fold(0.0, |s, &x| s + x);
            rel_close(sum::<Sse, _>(&xs[..k]), seq, 1e-12);
            rel_close(sum::<Avx, _>(&xs[..k]), seq, 1e-12);
        }
    }

    #[test]
    fn sum_f32_prefixes() {
        let xs: Vec<f32> = (0..48).map(|i| (i % 7) as f32 - 2.5).collect();
        for k in 0..=48 {
            let seq: f32 = xs[..k].iter().sum();
            assert_eq!(sum::<Sse, _>(&xs[..k]), seq);
            assert_eq!(sum::<Avx, _>(&xs[..k]), seq);
        }
    }

    #[test]
    fn empty_slices() {
        assert_eq!(sum::<Avx, f64>(&[]), 0.0);
        assert_eq!(sum_sq::<Sse, f32>(&[]), 0.0);
        assert_eq!(dot::<Avx, f32>(&[], &[]), 0.0);
        assert_eq!(max::<Avx, f64>(&[]), None);
        assert_eq!(min::<Sse, f64>(&[]), None);
    }

    #[test]
    fn dot_and_sum_sq() {
        let a: Vec<f64> = (0..13).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..13).map(|i| 2.0 - i as f64 * 0.5).collect();
        let want: f64 = a.iter().zip(&b).map(|(x, y)| x * y).sum();
        rel_close(dot::<Avx, _>(&a, &b), want, 1e-14);
        rel_close(dot::<Sse, _>(&a, &b), want, 1e-14);
        assert_eq!(sum_sq::<Avx, _>(&a), 650.0);
        assert_eq!(sum_sq::<Sse, _>(&a), 650.0);
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn dot_rejects_mismatched_lengths() {
        let _ = dot::<Sse, f64>(&[1.0, 2.0], &[1.0]);
    }

    #[test]
    fn extrema_anywhere_in_the_slice() {
        for len in 1..=19 {
            for pos in 0..len {
                let mut xs = vec![0.5_f32; len];
                xs[pos] = 9.0;
                assert_eq!(max::<Avx, _>(&xs), Some(9.0));
                assert_eq!(max::<Sse, _>(&xs), Some(9.0));
                xs[pos] = -9.0;
                assert_eq!(min::<Avx, _>(&xs), Some(-9.0));
                assert_eq!(min::<Sse, _>(&xs), Some(-9.0));
            }
        }
    }
}
