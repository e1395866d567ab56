//! AVX backend for f64 packs on x86_64.
//!
//! 256-bit registers → 4×f64 lanes. Compares use the predicate-immediate
//! `vcmppd` forms; classification is delegated to the SSE backend one
//! half at a time.

use core::arch::x86_64::*;

use crate::format::NumFormat;
use crate::simd::{split_apply_combine, Halves, SimdScalar};
use crate::traits::{Avx, Sse, Strategy};

#[inline(always)]
fn sign_mask() -> __m256d {
    unsafe { _mm256_castsi256_pd(_mm256_set1_epi64x(<f64 as NumFormat>::SIGN_BIT as i64)) }
}

#[inline(always)]
fn all_ones() -> __m256d {
    unsafe { _mm256_castsi256_pd(_mm256_set1_epi64x(-1)) }
}

impl SimdScalar<Avx> for f64 {
    type Reg = __m256d;
    type Mask = __m256d;
    type Array = [f64; 4];

    const LANES: usize = 4;
    const STRATEGY: Strategy = Strategy::Native;

    #[inline]
    fn splat(x: f64) -> __m256d {
        unsafe { _mm256_set1_pd(x) }
    }

    #[inline]
    fn from_array(a: [f64; 4]) -> __m256d {
        unsafe { _mm256_loadu_pd(a.as_ptr()) }
    }

    #[inline]
    fn to_array(r: __m256d) -> [f64; 4] {
        let mut out = [0.0_f64; 4];
        unsafe { _mm256_storeu_pd(out.as_mut_ptr(), r) };
        out
    }

    #[inline]
    unsafe fn load(p: *const f64) -> __m256d {
        unsafe { _mm256_loadu_pd(p) }
    }

    #[inline]
    unsafe fn store(r: __m256d, p: *mut f64) {
        unsafe { _mm256_storeu_pd(p, r) }
    }

    #[inline]
    fn add(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_add_pd(a, b) }
    }

    #[inline]
    fn sub(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_sub_pd(a, b) }
    }

    #[inline]
    fn mul(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_mul_pd(a, b) }
    }

    #[inline]
    fn div(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_div_pd(a, b) }
    }

    #[inline]
    fn neg(a: __m256d) -> __m256d {
        unsafe { _mm256_xor_pd(sign_mask(), a) }
    }

    #[inline]
    fn abs(a: __m256d) -> __m256d {
        unsafe { _mm256_andnot_pd(sign_mask(), a) }
    }

    #[inline]
    fn min(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_min_pd(a, b) }
    }

    #[inline]
    fn max(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_max_pd(a, b) }
    }

    #[inline]
    fn sqrt(a: __m256d) -> __m256d {
        unsafe { _mm256_sqrt_pd(a) }
    }

    #[inline]
    fn rcp(a: __m256d) -> __m256d {
        unsafe { _mm256_div_pd(_mm256_set1_pd(1.0), a) }
    }

    // No double-precision estimate instructions: the approximate forms are
    // the exact ones.

    #[inline]
    fn approx_rcp(a: __m256d) -> __m256d {
        unsafe { _mm256_div_pd(_mm256_set1_pd(1.0), a) }
    }

    #[inline]
    fn rsqrt(a: __m256d) -> __m256d {
        unsafe { _mm256_div_pd(_mm256_set1_pd(1.0), _mm256_sqrt_pd(a)) }
    }

    #[inline]
    fn approx_rsqrt(a: __m256d) -> __m256d {
        unsafe { _mm256_div_pd(_mm256_set1_pd(1.0), _mm256_sqrt_pd(a)) }
    }

    #[inline]
    fn hsum(a: __m256d) -> f64 {
        unsafe {
            let hi128 = _mm256_extractf128_pd::<1>(a);
            let lo128 = _mm256_castpd256_pd128(a);
            let sum128 = _mm_add_pd(hi128, lo128); // 2 partial sums
            let hi64 = _mm_unpackhi_pd(sum128, sum128);
            _mm_cvtsd_f64(_mm_add_sd(sum128, hi64))
        }
    }

    #[inline]
    fn round(a: __m256d) -> __m256d {
        unsafe { _mm256_round_pd::<{ _MM_FROUND_TO_NEAREST_INT | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline]
    fn floor(a: __m256d) -> __m256d {
        unsafe { _mm256_round_pd::<{ _MM_FROUND_TO_NEG_INF | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline]
    fn ceil(a: __m256d) -> __m256d {
        unsafe { _mm256_round_pd::<{ _MM_FROUND_TO_POS_INF | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline]
    fn trunc(a: __m256d) -> __m256d {
        unsafe { _mm256_round_pd::<{ _MM_FROUND_TO_ZERO | _MM_FROUND_NO_EXC }>(a) }
    }

    #[inline]
    fn cmp_eq(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_cmp_pd::<_CMP_EQ_OQ>(a, b) }
    }

    #[inline]
    fn cmp_ne(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_cmp_pd::<_CMP_NEQ_UQ>(a, b) }
    }

    #[inline]
    fn cmp_lt(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_cmp_pd::<_CMP_LT_OQ>(a, b) }
    }

    #[inline]
    fn cmp_le(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_cmp_pd::<_CMP_LE_OQ>(a, b) }
    }

    #[inline]
    fn cmp_gt(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_cmp_pd::<_CMP_GT_OQ>(a, b) }
    }

    #[inline]
    fn cmp_ge(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_cmp_pd::<_CMP_GE_OQ>(a, b) }
    }

    // AVX1 has no 256-bit integer compare.

    #[inline]
    fn is_neg(a: __m256d) -> __m256d {
        split_apply_combine::<f64>(a, <f64 as SimdScalar<Sse>>::is_neg)
    }

    #[inline]
    fn is_finite(a: __m256d) -> __m256d {
        split_apply_combine::<f64>(a, <f64 as SimdScalar<Sse>>::is_finite)
    }

    #[inline]
    fn is_inf(a: __m256d) -> __m256d {
        split_apply_combine::<f64>(a, <f64 as SimdScalar<Sse>>::is_inf)
    }

    #[inline]
    fn is_nan(a: __m256d) -> __m256d {
        split_apply_combine::<f64>(a, <f64 as SimdScalar<Sse>>::is_nan)
    }

    #[inline]
    fn mask_splat(b: bool) -> __m256d {
        unsafe { _mm256_castsi256_pd(_mm256_set1_epi64x(-(b as i64))) }
    }

    #[inline]
    fn mask_from_fn(mut f: impl FnMut(usize) -> bool) -> __m256d {
        let lanes: [i64; 4] = core::array::from_fn(|i| -(f(i) as i64));
        unsafe { _mm256_castsi256_pd(_mm256_loadu_si256(lanes.as_ptr() as *const __m256i)) }
    }

    #[inline]
    fn mask_bits(m: __m256d) -> u32 {
        unsafe { _mm256_movemask_pd(m) as u32 }
    }

    #[inline]
    fn mask_not(m: __m256d) -> __m256d {
        unsafe { _mm256_xor_pd(m, all_ones()) }
    }

    #[inline]
    fn mask_and(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_and_pd(a, b) }
    }

    #[inline]
    fn mask_or(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_or_pd(a, b) }
    }

    #[inline]
    fn mask_xor(a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_xor_pd(a, b) }
    }

    #[inline]
    fn select(m: __m256d, a: __m256d, b: __m256d) -> __m256d {
        unsafe { _mm256_blendv_pd(b, a, m) }
    }
}

impl Halves for f64 {
    #[inline]
    fn split(r: __m256d) -> (__m128d, __m128d) {
        unsafe { (_mm256_castpd256_pd128(r), _mm256_extractf128_pd::<1>(r)) }
    }

    #[inline]
    fn combine_mask(lo: __m128d, hi: __m128d) -> __m256d {
        unsafe { _mm256_set_m128d(hi, lo) }
    }
}
