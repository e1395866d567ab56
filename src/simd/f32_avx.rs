//! AVX backend for f32 packs on x86_64.
//!
//! 256-bit registers → 8×f32 lanes. Compares use the predicate-immediate
//! `vcmpps` forms; classification is delegated to the SSE backend one
//! half at a time.

use core::arch::x86_64::*;

use crate::format::NumFormat;
use crate::simd::{split_apply_combine, Halves, SimdScalar};
use crate::traits::{Avx, Sse, Strategy};

#[inline(always)]
fn sign_mask() -> __m256 {
    unsafe { _mm256_castsi256_ps(_mm256_set1_epi32(<f32 as NumFormat>::SIGN_BIT as i32)) }
}

#[inline(always)]
fn all_ones() -> __m256 {
    unsafe { _mm256_castsi256_ps(_mm256_set1_epi32(-1)) }
}

impl SimdScalar<Avx> for f32 {
    type Reg = __m256;
    type Mask = __m256;
    type Array = [f32; 8];

    const LANES: usize = 8;
    const STRATEGY: Strategy = Strategy::Native;

    #[inline]
    fn splat(x: f32) -> __m256 {
        unsafe { _mm256_set1_ps(x) }
    }

    #[inline]
    fn from_array(a: [f32; 8]) -> __m256 {
        unsafe { _mm256_loadu_ps(a.as_ptr()) }
    }

    #[inline]
    fn to_array(r: __m256) -> [f32; 8] {
        let mut out = [0.0_f32; 8];
        unsafe { _mm256_storeu_ps(out.as_mut_ptr(), r) };
        out
    }

    #[inline]
    unsafe fn load(p: *const f32) -> __m256 {
        unsafe { _mm256_loadu_ps(p) }
    }

    #[inline]
    unsafe fn store(r: __m256, p: *mut f32) {
        unsafe { _mm256_storeu_ps(p, r) }
    }

    #[inline]
    fn add(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_add_ps(a, b) }
    }

    #[inline]
    fn sub(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_sub_ps(a, b) }
    }

    #[inline]
    fn mul(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_mul_ps(a, b) }
    }

    #[inline]
    fn div(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_div_ps(a, b) }
    }

    #[inline]
    fn neg(a: __m256) -> __m256 {
        unsafe { _mm256_xor_ps(sign_mask(), a) }
    }

    #[inline]
    fn abs(a: __m256) -> __m256 {
        unsafe { _mm256_andnot_ps(sign_mask(), a) }
    }

    #[inline]
    fn min(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_min_ps(a, b) }
    }

    #[inline]
    fn max(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_max_ps(a, b) }
    }

    #[inline]
    fn sqrt(a: __m256) -> __m256 {
        unsafe { _mm256_sqrt_ps(a) }
    }

    #[inline]
    fn rcp(a: __m256) -> __m256 {
        unsafe { _mm256_div_ps(_mm256_set1_ps(1.0), a) }
    }

    #[inline]
    fn approx_rcp(a: __m256) -> __m256 {
        unsafe { _mm256_rcp_ps(a) }
    }

    #[inline]
    fn rsqrt(a: __m256) -> __m256 {
        unsafe { _mm256_div_ps(_mm256_set1_ps(1.0), _mm256_sqrt_ps(a)) }
    }

    #[inline]
    fn approx_rsqrt(a: __m256) -> __m256 {
        unsafe { _mm256_rsqrt_ps(a) }
    }

    #[inline]
    fn hsum(a: __m256) -> f32 {
        unsafe {
            let hi128 = _mm256_extractf128_ps::<1>(a);
            let lo128 = _mm256_castps256_ps128(a);
            let sum128 = _mm_add_ps(hi128, lo128); // 4 lanes
            let shuf = _mm_movehl_ps(sum128, sum128);
            let sums = _mm_add_ps(sum128, shuf); // 2 partial sums
            let shuf2 = _mm_shuffle_ps::<1>(sums, sums);
            _mm_cvtss_f32(_mm_add_ss(sums, shuf2))
        }
    }

    #[inline]
    fn round(a: __m256) -> __m256 {
        unsafe { _mm256_round_ps::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline]
    fn floor(a: __m256) -> __m256 {
        unsafe { _mm256_round_ps::<{ _MM_FROUND_TO_NEG_INF | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline]
    fn ceil(a: __m256) -> __m256 {
        unsafe { _mm256_round_ps::<{ _MM_FROUND_TO_POS_INF | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline]
    fn trunc(a: __m256) -> __m256 {
        unsafe { _mm256_round_ps::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline]
    fn cmp_eq(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_cmp_ps::<_CMP_EQ_OQ>(a, b) }
    }

    #[inline]
    fn cmp_ne(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_cmp_ps::<_CMP_NEQ_UQ>(a, b) }
    }

    #[inline]
    fn cmp_lt(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_cmp_ps::<_CMP_LT_OQ>(a, b) }
    }

    #[inline]
    fn cmp_le(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_cmp_ps::<_CMP_LE_OQ>(a, b) }
    }

    #[inline]
    fn cmp_gt(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_cmp_ps::<_CMP_GT_OQ>(a, b) }
    }

    #[inline]
    fn cmp_ge(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_cmp_ps::<_CMP_GE_OQ>(a, b) }
    }

    // AVX1 has no 256-bit integer compare.

    #[inline]
    fn is_neg(a: __m256) -> __m256 {
        split_apply_combine::<f32>(a, <f32 as SimdScalar<Sse>>::is_neg)
    }

    #[inline]
    fn is_finite(a: __m256) -> __m256 {
        split_apply_combine::<f32>(a, <f32 as SimdScalar<Sse>>::is_finite)
    }

    #[inline]
    fn is_inf(a: __m256) -> __m256 {
        split_apply_combine::<f32>(a, <f32 as SimdScalar<Sse>>::is_inf)
    }

    #[inline]
    fn is_nan(a: __m256) -> __m256 {
        split_apply_combine::<f32>(a, <f32 as SimdScalar<Sse>>::is_nan)
    }

    #[inline]
    fn mask_splat(b: bool) -> __m256 {
        unsafe { _mm256_castsi256_ps(_mm256_set1_epi32(-(b as i32))) }
    }

    #[inline]
    fn mask_from_fn(mut f: impl FnMut(usize) -> bool) -> __m256 {
        let lanes: [i32; 8] = core::array::from_fn(|i| -(f(i) as i32));
        unsafe { _mm256_castsi256_ps(_mm256_loadu_si256(lanes.as_ptr() as *const __m256i)) }
    }

    #[inline]
    fn mask_bits(m: __m256) -> u32 {
        unsafe { _mm256_movemask_ps(m) as u32 }
    }

    #[inline]
    fn mask_not(m: __m256) -> __m256 {
        unsafe { _mm256_xor_ps(m, all_ones()) }
    }

    #[inline]
    fn mask_and(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_and_ps(a, b) }
    }

    #[inline]
    fn mask_or(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_or_ps(a, b) }
    }

    #[inline]
    fn mask_xor(a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_xor_ps(a, b) }
    }

    #[inline]
    fn select(m: __m256, a: __m256, b: __m256) -> __m256 {
        unsafe { _mm256_blendv_ps(b, a, m) }
    }
}

impl Halves for f32 {
    #[inline]
    fn split(r: __m256) -> (__m128, __m128) {
        unsafe { (_mm256_castps256_ps128(r), _mm256_extractf128_ps::<1>(r)) }
    }

    #[inline]
    fn combine_mask(lo: __m128, hi: __m128) -> __m256 {
        unsafe { _mm256_set_m128(hi, lo) }
    }
}
