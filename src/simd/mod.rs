//! Register backends with compile-time architecture dispatch.
//!
//! Every (lane type, width class) pair implements [`SimdScalar`], the
//! contract the pack types are written against. Exactly one implementation
//! per pair is compiled:
//!
//! | Pair          | `x86_64` (SSE2)       | `x86_64` + `avx`      | otherwise  |
//! |---------------|-----------------------|-----------------------|------------|
//! | `f32`, `Sse`  | `f32_sse` (`__m128`)  | `f32_sse`             | `portable` |
//! | `f64`, `Sse`  | `f64_sse` (`__m128d`) | `f64_sse`             | `portable` |
//! | `f32`, `Avx`  | `portable`            | `f32_avx` (`__m256`)  | `portable` |
//! | `f64`, `Avx`  | `portable`            | `f64_avx` (`__m256d`) | `portable` |
//!
//! The SSE backends use `roundps`/`roundpd` when `sse4.1` is enabled and a
//! shift-based rounding otherwise. Enable the AVX paths with
//! `-C target-cpu=native` or `-C target-feature=+avx`. The portable backend stores lanes in plain
//! arrays and reports [`Strategy::Emulated`] for every operation.
//!
//! ## Masks
//!
//! A mask lane is either all ones or all zeros. Native backends keep masks in
//! the float register, exactly as the compare instructions produce them; the
//! portable backend keeps them as arrays of the lane's bit type.
//!
//! ## Split-apply-combine
//!
//! Classification predicates are defined natively only at the 128-bit width.
//! The 256-bit backends apply them to each half through
//! [`split_apply_combine`] and glue the two masks back together.

#[cfg(target_arch = "x86_64")]
pub(crate) mod f32_sse;
#[cfg(target_arch = "x86_64")]
pub(crate) mod f64_sse;

#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub(crate) mod f32_avx;
#[cfg(all(target_arch = "x86_64", target_feature = "avx"))]
pub(crate) mod f64_avx;

#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
pub(crate) mod portable;

#[cfg(test)]
mod tests;

use crate::traits::{Avx, PackScalar, Sse, Strategy, Width};

/// Backend contract for one (lane type, width class) pair.
///
/// All functions are pure; the only memory access happens in
/// [`load`](SimdScalar::load) and [`store`](SimdScalar::store).
pub trait SimdScalar<W: Width>: PackScalar {
    /// Register holding `LANES` values.
    type Reg: Copy;
    /// Register holding `LANES` mask lanes.
    type Mask: Copy;
    /// `[Self; LANES]`.
    type Array: Copy + Default + AsRef<[Self]> + AsMut<[Self]>;

    /// Lane count.
    const LANES: usize;
    /// How elementary operations (arithmetic, sqrt, min/max, rounding) run.
    const STRATEGY: Strategy;

    fn splat(x: Self) -> Self::Reg;
    fn from_array(a: Self::Array) -> Self::Reg;
    fn to_array(r: Self::Reg) -> Self::Array;

    /// Unaligned load of `LANES` values.
    ///
    /// # Safety
    /// `p` must be valid for reading `LANES` elements.
    unsafe fn load(p: *const Self) -> Self::Reg;

    /// Unaligned store of `LANES` values.
    ///
    /// # Safety
    /// `p` must be valid for writing `LANES` elements.
    unsafe fn store(r: Self::Reg, p: *mut Self);

    // ── arithmetic ──────────────────────────────────────────────────

    fn add(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn sub(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn mul(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn div(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    /// XOR with the sign-bit mask.
    fn neg(a: Self::Reg) -> Self::Reg;
    /// AND-NOT with the sign-bit mask.
    fn abs(a: Self::Reg) -> Self::Reg;
    /// `if a < b { a } else { b }` per lane.
    fn min(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    /// `if a > b { a } else { b }` per lane.
    fn max(a: Self::Reg, b: Self::Reg) -> Self::Reg;
    fn sqrt(a: Self::Reg) -> Self::Reg;
    fn rcp(a: Self::Reg) -> Self::Reg;
    fn approx_rcp(a: Self::Reg) -> Self::Reg;
    fn rsqrt(a: Self::Reg) -> Self::Reg;
    fn approx_rsqrt(a: Self::Reg) -> Self::Reg;
    /// Sum of all lanes.
    fn hsum(a: Self::Reg) -> Self;

    // ── rounding ────────────────────────────────────────────────────

    /// Half to even.
    fn round(a: Self::Reg) -> Self::Reg;
    fn floor(a: Self::Reg) -> Self::Reg;
    fn ceil(a: Self::Reg) -> Self::Reg;
    fn trunc(a: Self::Reg) -> Self::Reg;

    // ── comparison (ordered quiet; `cmp_ne` unordered quiet) ────────

    fn cmp_eq(a: Self::Reg, b: Self::Reg) -> Self::Mask;
    fn cmp_ne(a: Self::Reg, b: Self::Reg) -> Self::Mask;
    fn cmp_lt(a: Self::Reg, b: Self::Reg) -> Self::Mask;
    fn cmp_le(a: Self::Reg, b: Self::Reg) -> Self::Mask;
    fn cmp_gt(a: Self::Reg, b: Self::Reg) -> Self::Mask;
    fn cmp_ge(a: Self::Reg, b: Self::Reg) -> Self::Mask;

    // ── classification ──────────────────────────────────────────────

    /// Sign bit set.
    fn is_neg(a: Self::Reg) -> Self::Mask;
    fn is_finite(a: Self::Reg) -> Self::Mask;
    fn is_inf(a: Self::Reg) -> Self::Mask;
    fn is_nan(a: Self::Reg) -> Self::Mask;

    // ── masks ───────────────────────────────────────────────────────

    fn mask_splat(b: bool) -> Self::Mask;
    /// Mask whose lane `i` is `f(i)`, for `i` in `0..LANES` in order.
    fn mask_from_fn(f: impl FnMut(usize) -> bool) -> Self::Mask;
    /// Bit `i` set iff lane `i` is true.
    fn mask_bits(m: Self::Mask) -> u32;
    fn mask_not(m: Self::Mask) -> Self::Mask;
    fn mask_and(a: Self::Mask, b: Self::Mask) -> Self::Mask;
    fn mask_or(a: Self::Mask, b: Self::Mask) -> Self::Mask;
    fn mask_xor(a: Self::Mask, b: Self::Mask) -> Self::Mask;
    /// `m ? a : b` per lane.
    fn select(m: Self::Mask, a: Self::Reg, b: Self::Reg) -> Self::Reg;
}

/// 256-bit registers seen as two 128-bit halves of the same lane type.
///
/// The default methods go through arrays and bitmasks, which works for any
/// pairing of backends; native AVX overrides them with lane-crossing
/// casts and inserts.
pub trait Halves: SimdScalar<Avx> + SimdScalar<Sse> {
    /// `(low, high)` halves.
    fn split(
        r: <Self as SimdScalar<Avx>>::Reg,
    ) -> (<Self as SimdScalar<Sse>>::Reg, <Self as SimdScalar<Sse>>::Reg) {
        let full = <Self as SimdScalar<Avx>>::to_array(r);
        let half = <Self as SimdScalar<Sse>>::LANES;
        let mut lo = <Self as SimdScalar<Sse>>::Array::default();
        let mut hi = <Self as SimdScalar<Sse>>::Array::default();
        lo.as_mut().copy_from_slice(&full.as_ref()[..half]);
        hi.as_mut().copy_from_slice(&full.as_ref()[half..]);
        (
            <Self as SimdScalar<Sse>>::from_array(lo),
            <Self as SimdScalar<Sse>>::from_array(hi),
        )
    }

    /// Mask whose low half is `lo` and high half is `hi`.
    fn combine_mask(
        lo: <Self as SimdScalar<Sse>>::Mask,
        hi: <Self as SimdScalar<Sse>>::Mask,
    ) -> <Self as SimdScalar<Avx>>::Mask {
        let half = <Self as SimdScalar<Sse>>::LANES;
        let bits = <Self as SimdScalar<Sse>>::mask_bits(lo)
            | (<Self as SimdScalar<Sse>>::mask_bits(hi) << half);
        <Self as SimdScalar<Avx>>::mask_from_fn(|i| (bits >> i) & 1 != 0)
    }
}

/// Extend a 128-bit predicate to 256 bits: split, apply to each half,
/// recombine.
#[inline]
pub fn split_apply_combine<T: Halves>(
    a: <T as SimdScalar<Avx>>::Reg,
    f: impl Fn(<T as SimdScalar<Sse>>::Reg) -> <T as SimdScalar<Sse>>::Mask,
) -> <T as SimdScalar<Avx>>::Mask {
    let (lo, hi) = T::split(a);
    T::combine_mask(f(lo), f(hi))
}
