//! SSE2 backend for f32 packs on x86_64.
//!
//! 128-bit registers → 4×f32 lanes. SSE2 is baseline on x86_64, so this
//! backend is always compiled there. With `sse4.1` the rounding operations
//! use `roundps`; without it they use the 2^23 shift, which stays in
//! registers and gives the same results.

use core::arch::x86_64::*;

use crate::format::NumFormat;
use crate::simd::SimdScalar;
use crate::traits::{Sse, Strategy};

#[inline(always)]
fn sign_mask() -> __m128 {
    unsafe { _mm_castsi128_ps(_mm_set1_epi32(<f32 as NumFormat>::SIGN_BIT as i32)) }
}

#[inline(always)]
fn all_ones() -> __m128 {
    unsafe { _mm_castsi128_ps(_mm_set1_epi32(-1)) }
}

/// Splits `a` for the shift rounding: `(|a|, |a| rounded half-to-even,
/// sign bits of a, lanes with |a| < 2^23)`.
///
/// Lanes outside the last mask are already integral (or NaN) and must be
/// passed through unchanged.
#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn shift_round(a: __m128) -> (__m128, __m128, __m128, __m128) {
    unsafe {
        let shift = _mm_set1_ps(8388608.0);
        let sign = _mm_and_ps(a, sign_mask());
        let abs = _mm_andnot_ps(sign_mask(), a);
        let r = _mm_sub_ps(_mm_add_ps(abs, shift), shift);
        (abs, r, sign, _mm_cmplt_ps(abs, shift))
    }
}

#[cfg(not(target_feature = "sse4.1"))]
#[inline(always)]
fn blend(m: __m128, a: __m128, b: __m128) -> __m128 {
    unsafe { _mm_or_ps(_mm_and_ps(m, a), _mm_andnot_ps(m, b)) }
}

impl SimdScalar<Sse> for f32 {
    type Reg = __m128;
    type Mask = __m128;
    type Array = [f32; 4];

    const LANES: usize = 4;
    const STRATEGY: Strategy = Strategy::Native;

    #[inline]
    fn splat(x: f32) -> __m128 {
        unsafe { _mm_set1_ps(x) }
    }

    #[inline]
    fn from_array(a: [f32; 4]) -> __m128 {
        unsafe { _mm_loadu_ps(a.as_ptr()) }
    }

    #[inline]
    fn to_array(r: __m128) -> [f32; 4] {
        let mut out = [0.0_f32; 4];
        unsafe { _mm_storeu_ps(out.as_mut_ptr(), r) };
        out
    }

    #[inline]
    unsafe fn load(p: *const f32) -> __m128 {
        unsafe { _mm_loadu_ps(p) }
    }

    #[inline]
    unsafe fn store(r: __m128, p: *mut f32) {
        unsafe { _mm_storeu_ps(p, r) }
    }

    #[inline]
    fn add(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_add_ps(a, b) }
    }

    #[inline]
    fn sub(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_sub_ps(a, b) }
    }

    #[inline]
    fn mul(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_mul_ps(a, b) }
    }

    #[inline]
    fn div(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_div_ps(a, b) }
    }

    #[inline]
    fn neg(a: __m128) -> __m128 {
        unsafe { _mm_xor_ps(sign_mask(), a) }
    }

    #[inline]
    fn abs(a: __m128) -> __m128 {
        unsafe { _mm_andnot_ps(sign_mask(), a) }
    }

    #[inline]
    fn min(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_min_ps(a, b) }
    }

    #[inline]
    fn max(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_max_ps(a, b) }
    }

    #[inline]
    fn sqrt(a: __m128) -> __m128 {
        unsafe { _mm_sqrt_ps(a) }
    }

    #[inline]
    fn rcp(a: __m128) -> __m128 {
        unsafe { _mm_div_ps(_mm_set1_ps(1.0), a) }
    }

    #[inline]
    fn approx_rcp(a: __m128) -> __m128 {
        unsafe { _mm_rcp_ps(a) }
    }

    #[inline]
    fn rsqrt(a: __m128) -> __m128 {
        unsafe { _mm_div_ps(_mm_set1_ps(1.0), _mm_sqrt_ps(a)) }
    }

    #[inline]
    fn approx_rsqrt(a: __m128) -> __m128 {
        unsafe { _mm_rsqrt_ps(a) }
    }

    #[inline]
    fn hsum(a: __m128) -> f32 {
        unsafe {
            // [a, b, c, d] → [a+c, b+d, ..] → a+b+c+d
            let shuf = _mm_movehl_ps(a, a);
            let sums = _mm_add_ps(a, shuf);
            let shuf2 = _mm_shuffle_ps::<1>(sums, sums);
            _mm_cvtss_f32(_mm_add_ss(sums, shuf2))
        }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline]
    fn round(a: __m128) -> __m128 {
        unsafe { _mm_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(a) }
    }

    #[cfg(not(target_feature = "sse4.1"))]
    #[inline]
    fn round(a: __m128) -> __m128 {
        unsafe {
            let (_, r, sign, small) = shift_round(a);
            blend(small, _mm_or_ps(r, sign), a)
        }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline]
    fn floor(a: __m128) -> __m128 {
        unsafe { _mm_round_ps::<{ _MM_FROUND_TO_NEG_INF | _MM_FROUND_NO_EXC }>(a) }
    }

    #[cfg(not(target_feature = "sse4.1"))]
    #[inline]
    fn floor(a: __m128) -> __m128 {
        unsafe {
            let (_, r, sign, small) = shift_round(a);
            let near = _mm_or_ps(r, sign);
            let down = _mm_and_ps(_mm_cmpgt_ps(near, a), _mm_set1_ps(1.0));
            blend(small, _mm_or_ps(_mm_sub_ps(near, down), sign), a)
        }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline]
    fn ceil(a: __m128) -> __m128 {
        unsafe { _mm_round_ps::<{ _MM_FROUND_TO_POS_INF | _MM_FROUND_NO_EXC }>(a) }
    }

    #[cfg(not(target_feature = "sse4.1"))]
    #[inline]
    fn ceil(a: __m128) -> __m128 {
        unsafe {
            let (_, r, sign, small) = shift_round(a);
            let near = _mm_or_ps(r, sign);
            let up = _mm_and_ps(_mm_cmplt_ps(near, a), _mm_set1_ps(1.0));
            blend(small, _mm_or_ps(_mm_add_ps(near, up), sign), a)
        }
    }

    #[cfg(target_feature = "sse4.1")]
    #[inline]
    fn trunc(a: __m128) -> __m128 {
        unsafe { _mm_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(a) }
    }

    #[cfg(not(target_feature = "sse4.1"))]
    #[inline]
    fn trunc(a: __m128) -> __m128 {
        unsafe {
            let (abs, r, sign, small) = shift_round(a);
            let down = _mm_and_ps(_mm_cmpgt_ps(r, abs), _mm_set1_ps(1.0));
            blend(small, _mm_or_ps(_mm_sub_ps(r, down), sign), a)
        }
    }

    // SSE has no predicate-immediate compare; the legacy forms give the same
    // lane results (only the exception flags differ for the relational ones).

    #[inline]
    fn cmp_eq(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmpeq_ps(a, b) }
    }

    #[inline]
    fn cmp_ne(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmpneq_ps(a, b) }
    }

    #[inline]
    fn cmp_lt(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmplt_ps(a, b) }
    }

    #[inline]
    fn cmp_le(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmple_ps(a, b) }
    }

    #[inline]
    fn cmp_gt(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmpgt_ps(a, b) }
    }

    #[inline]
    fn cmp_ge(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_cmpge_ps(a, b) }
    }

    #[inline]
    fn is_neg(a: __m128) -> __m128 {
        unsafe {
            let sign = _mm_set1_epi32(<f32 as NumFormat>::SIGN_BIT as i32);
            let bits = _mm_and_si128(_mm_castps_si128(a), sign);
            _mm_castsi128_ps(_mm_cmpeq_epi32(bits, sign))
        }
    }

    #[inline]
    fn is_finite(a: __m128) -> __m128 {
        unsafe {
            let exp = _mm_set1_epi32(<f32 as NumFormat>::EXP_MASK as i32);
            let bits = _mm_and_si128(_mm_castps_si128(a), exp);
            _mm_xor_ps(_mm_castsi128_ps(_mm_cmpeq_epi32(bits, exp)), all_ones())
        }
    }

    #[inline]
    fn is_inf(a: __m128) -> __m128 {
        unsafe {
            let exp = _mm_set1_epi32(<f32 as NumFormat>::EXP_MASK as i32);
            let abs = _mm_andnot_si128(_mm_castps_si128(sign_mask()), _mm_castps_si128(a));
            _mm_castsi128_ps(_mm_cmpeq_epi32(abs, exp))
        }
    }

    #[inline]
    fn is_nan(a: __m128) -> __m128 {
        unsafe { _mm_cmpunord_ps(a, a) }
    }

    #[inline]
    fn mask_splat(b: bool) -> __m128 {
        unsafe { _mm_castsi128_ps(_mm_set1_epi32(-(b as i32))) }
    }

    #[inline]
    fn mask_from_fn(mut f: impl FnMut(usize) -> bool) -> __m128 {
        let lanes: [i32; 4] = core::array::from_fn(|i| -(f(i) as i32));
        unsafe { _mm_castsi128_ps(_mm_loadu_si128(lanes.as_ptr() as *const __m128i)) }
    }

    #[inline]
    fn mask_bits(m: __m128) -> u32 {
        unsafe { _mm_movemask_ps(m) as u32 }
    }

    #[inline]
    fn mask_not(m: __m128) -> __m128 {
        unsafe { _mm_xor_ps(m, all_ones()) }
    }

    #[inline]
    fn mask_and(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_and_ps(a, b) }
    }

    #[inline]
    fn mask_or(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_or_ps(a, b) }
    }

    #[inline]
    fn mask_xor(a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_xor_ps(a, b) }
    }

    #[inline]
    fn select(m: __m128, a: __m128, b: __m128) -> __m128 {
        unsafe { _mm_or_ps(_mm_and_ps(m, a), _mm_andnot_ps(m, b)) }
    }
}
