//! SSE2 backend for f64 packs on x86_64.
//!
//! 128-bit registers → 2×f64 lanes. SSE2 is baseline on x86_64, so this
//! backend is always compiled there. With `sse4.1` the rounding operations
//! use `roundpd`; without it they use the 2^52 shift, which stays in
//! registers and gives the same results.

use core::arch::x86_64::*;

use crate::format::NumFormat;
use crate::simd::SimdScalar;
use crate::traits::{Sse, Strategy};

#[inline(always)]
fn sign_mask() -> __m128d {
    unsafe { _mm_castsi128_pd(_mm_set1_epi64x(<f64 as NumFormat>::SIGN_BIT as i64)) }
}

#[inline(always)]
fn all_ones() -> __m128d {
    unsafe { _mm_castsi128_pd(_mm_set1_epi64x(-1)) }
}

/// Splits `a` for the shift rounding: `(|a|, |a| rounded half-to-even,
/// sign bits of a, lanes with |a| < 2^52)`.
///
/// Lanes outside the last mask are already integral (or NaN) and must be
/// passed through unchanged.
#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn shift_round(a: __m128d) -> (__m128d, __m128d, __m128d, __m128d) {
    unsafe {
        let shift = _mm_set1_pd(4503599627370496.0);
        let sign = _mm_and_pd(a, sign_mask());
        let abs = _mm_andnot_pd(sign_mask(), a);
        let r = _mm_sub_pd(_mm_add_pd(abs, shift), shift);
        (abs, r, sign, _mm_cmplt_pd(abs, shift))
    }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn blend(m: __m128d, a: __m128d, b: __m128d) -> __m128d {
    unsafe { _mm_or_pd(_mm_and_pd(m, a), _mm_andnot_pd(m, b)) }
}

impl SimdScalar<Sse> for f64 {
    type Reg = __m128d;
    type Mask = __m128d;
    type Array = [f64; 2];

    const LANES: usize = 2;
    const STRATEGY: Strategy = Strategy::Native;

    #[inline]
    fn splat(x: f64) -> __m128d {
        unsafe { _mm_set1_pd(x) }
    }

    #[inline]
    fn from_array(a: [f64; 2]) -> __m128d {
        unsafe { _mm_loadu_pd(a.as_ptr()) }
    }

    #[inline]
    fn to_array(r: __m128d) -> [f64; 2] {
        let mut out = [0.0_f64; 2];
        unsafe { _mm_storeu_pd(out.as_mut_ptr(), r) };
        out
    }

    #[inline]
    unsafe fn load(p: *const f64) -> __m128d {
        unsafe { _mm_loadu_pd(p) }
    }

    #[inline]
    unsafe fn store(r: __m128d, p: *mut f64) {
        unsafe { _mm_storeu_pd(p, r) }
    }

    #[inline]
    fn add(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_add_pd(a, b) }
    }

    #[inline]
    fn sub(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_sub_pd(a, b) }
    }

    #[inline]
    fn mul(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_mul_pd(a, b) }
    }

    #[inline]
    fn div(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_div_pd(a, b) }
    }

    #[inline]
    fn neg(a: __m128d) -> __m128d {
        unsafe { _mm_xor_pd(sign_mask(), a) }
    }

    #[inline]
    fn abs(a: __m128d) -> __m128d {
        unsafe { _mm_andnot_pd(sign_mask(), a) }
    }

    #[inline]
    fn min(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_min_pd(a, b) }
    }

    #[inline]
    fn max(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_max_pd(a, b) }
    }

    #[inline]
    fn sqrt(a: __m128d) -> __m128d {
        unsafe { _mm_sqrt_pd(a) }
    }

    #[inline]
    fn rcp(a: __m128d) -> __m128d {
        unsafe { _mm_div_pd(_mm_set1_pd(1.0), a) }
    }

    // No double-precision estimate instructions: the approximate forms are
    // the exact ones.

    #[inline]
    fn approx_rcp(a: __m128d) -> __m128d {
        unsafe { _mm_div_pd(_mm_set1_pd(1.0), a) }
    }

    #[inline]
    fn rsqrt(a: __m128d) -> __m128d {
        unsafe { _mm_div_pd(_mm_set1_pd(1.0), _mm_sqrt_pd(a)) }
    }

    #[inline]
    fn approx_rsqrt(a: __m128d) -> __m128d {
        unsafe { _mm_div_pd(_mm_set1_pd(1.0), _mm_sqrt_pd(a)) }
    }

    #[inline]
    fn hsum(a: __m128d) -> f64 {
        unsafe {
            let high = _mm_unpackhi_pd(a, a);
            _mm_cvtsd_f64(_mm_add_sd(a, high))
        }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline]
    fn round(a: __m128d) -> __m128d {
        unsafe { _mm_round_pd::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(a) }
    }

    #[cfg(not(target_feature = "sse4.1"))]
    #[inline]
    fn round(a: __m128d) -> __m128d {
        unsafe {
            let (_, r, sign, small) = shift_round(a);
            blend(small, _mm_or_pd(r, sign), a)
        }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline]
    fn floor(a: __m128d) -> __m128d {
        unsafe { _mm_round_pd::<{ _MM_FROUND_TO_NEG_INF | _MM_FROUND_NO_EXC }>(a) }
    }

    #[cfg(not(target_feature = "sse4.1"))]
    #[inline]
    fn floor(a: __m128d) -> __m128d {
        unsafe {
            let (_, r, sign, small) = shift_round(a);
            let near = _mm_or_pd(r, sign);
            let down = _mm_and_pd(_mm_cmpgt_pd(near, a), _mm_set1_pd(1.0));
            blend(small, _mm_or_pd(_mm_sub_pd(near, down), sign), a)
        }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline]
    fn ceil(a: __m128d) -> __m128d {
        unsafe { _mm_round_pd::<{ _MM_FROUND_TO_POS_INF | _MM_FROUND_NO_EXC }>(a) }
    }

    #[cfg(not(target_feature = "sse4.1"))]
    #[inline]
    fn ceil(a: __m128d) -> __m128d {
        unsafe {
            let (_, r, sign, small) = shift_round(a);
            let near = _mm_or_pd(r, sign);
            let up = _mm_and_pd(_mm_cmplt_pd(near, a), _mm_set1_pd(1.0));
            blend(small, _mm_or_pd(_mm_add_pd(near, up), sign), a)
        }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline]
    fn trunc(a: __m128d) -> __m128d {
        unsafe { _mm_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(a) }
    }

    #[cfg(not(target_feature = "sse4.1"))]
    #[inline]
    fn trunc(a: __m128d) -> __m128d {
        unsafe {
            let (abs, r, sign, small) = shift_round(a);
            let down = _mm_and_pd(_mm_cmpgt_pd(r, abs), _mm_set1_pd(1.0));
            blend(small, _mm_or_pd(_mm_sub_pd(r, down), sign), a)
        }
    }

    // SSE has no predicate-immediate compare; the legacy forms give the same
    // lane results (only the exception flags differ for the relational ones).

    #[inline]
    fn cmp_eq(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_cmpeq_pd(a, b) }
    }

    #[inline]
    fn cmp_ne(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_cmpneq_pd(a, b) }
    }

    #[inline]
    fn cmp_lt(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_cmplt_pd(a, b) }
    }

    #[inline]
    fn cmp_le(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_cmple_pd(a, b) }
    }

    #[inline]
    fn cmp_gt(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_cmpgt_pd(a, b) }
    }

    #[inline]
    fn cmp_ge(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_cmpge_pd(a, b) }
    }

    // SSE2 has no 64-bit integer compare. The sign is broadcast from the high
    // dword of each lane; the exponent tests go through float compares on |a|.

    #[inline]
    fn is_neg(a: __m128d) -> __m128d {
        unsafe {
            let high = _mm_srai_epi32::<31>(_mm_castpd_si128(a));
            _mm_castsi128_pd(_mm_shuffle_epi32::<0b11_11_01_01>(high))
        }
    }

    #[inline]
    fn is_finite(a: __m128d) -> __m128d {
        unsafe { _mm_cmplt_pd(_mm_andnot_pd(sign_mask(), a), _mm_set1_pd(f64::INFINITY)) }
    }

    #[inline]
    fn is_inf(a: __m128d) -> __m128d {
        unsafe { _mm_cmpeq_pd(_mm_andnot_pd(sign_mask(), a), _mm_set1_pd(f64::INFINITY)) }
    }

    #[inline]
    fn is_nan(a: __m128d) -> __m128d {
        unsafe { _mm_cmpunord_pd(a, a) }
    }

    #[inline]
    fn mask_splat(b: bool) -> __m128d {
        unsafe { _mm_castsi128_pd(_mm_set1_epi64x(-(b as i64))) }
    }

    #[inline]
    fn mask_from_fn(mut f: impl FnMut(usize) -> bool) -> __m128d {
        let lanes: [i64; 2] = core::array::from_fn(|i| -(f(i) as i64));
        unsafe { _mm_castsi128_pd(_mm_loadu_si128(lanes.as_ptr() as *const __m128i)) }
    }

    #[inline]
    fn mask_bits(m: __m128d) -> u32 {
        unsafe { _mm_movemask_pd(m) as u32 }
    }

    #[inline]
    fn mask_not(m: __m128d) -> __m128d {
        unsafe { _mm_xor_pd(m, all_ones()) }
    }

    #[inline]
    fn mask_and(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_and_pd(a, b) }
    }

    #[inline]
    fn mask_or(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_or_pd(a, b) }
    }

    #[inline]
    fn mask_xor(a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_xor_pd(a, b) }
    }

    #[inline]
    fn select(m: __m128d, a: __m128d, b: __m128d) -> __m128d {
        unsafe { _mm_or_pd(_mm_and_pd(m, a), _mm_andnot_pd(m, b)) }
    }
}
