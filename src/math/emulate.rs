//! Scalar-replicated fallback.
//!
//! Lane `i` of the result is the scalar function applied to lane `i` of the
//! input(s), so results are bit-identical to calling the scalar function
//! directly. Every [`PackMath`](super::PackMath) method defaults to this.

use crate::pack::Pack;
use crate::simd::SimdScalar;
use crate::traits::Width;
#[allow(unused_imports)]
use crate::{math::PackMath, traits::{Avx, Sse}};

/// `f` applied to every lane of `a`.
#[inline]
pub fn map1<T: SimdScalar<W>, W: Width>(a: Pack<T, W>, f: impl Fn(T) -> T) -> Pack<T, W> {
    a.map(f)
}

/// `f` applied to every pair of lanes of `a` and `b`.
#[inline]
pub fn map2<T: SimdScalar<W>, W: Width>(
    a: Pack<T, W>,
    b: Pack<T, W>,
    f: impl Fn(T, T) -> T,
) -> Pack<T, W> {
    a.zip_map(b, f)
}

#[inline]
pub(crate) fn map1_reg<T: SimdScalar<W>, W: Width>(a: T::Reg, f: impl Fn(T) -> T) -> T::Reg {
    map1(Pack::<T, W>::from_reg(a), f).reg()
}

#[inline]
pub(crate) fn map2_reg<T: SimdScalar<W>, W: Width>(
    a: T::Reg,
    b: T::Reg,
    f: impl Fn(T, T) -> T,
) -> T::Reg {
    map2(Pack::<T, W>::from_reg(a), Pack::from_reg(b), f).reg()
}

// Pairs without an external library take every default.

#[cfg(not(all(
    target_arch = "x86_64",
    any(feature = "svml", feature = "amd-libm")
)))]
impl PackMath<Sse> for f32 {}

#[cfg(not(all(
    target_arch = "x86_64",
    any(feature = "svml", feature = "amd-libm")
)))]
impl PackMath<Sse> for f64 {}

#[cfg(not(all(
    target_arch = "x86_64",
    target_feature = "avx",
    any(feature = "svml", feature = "amd-libm")
)))]
impl PackMath<Avx> for f32 {}

#[cfg(not(all(
    target_arch = "x86_64",
    target_feature = "avx",
    any(feature = "svml", feature = "amd-libm")
)))]
impl PackMath<Avx> for f64 {}
