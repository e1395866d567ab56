//! Portable array backend.
//!
//! Used for every (lane type, width) pair whose native backend is not
//! compiled in. Lanes live in plain arrays and each operation is a loop the
//! compiler is free to auto-vectorize; results match the native backends
//! lane for lane, including NaN handling of `min`/`max` and the
//! compare predicates.

use num_traits::{Float, Zero};

use crate::format::NumFormat;
use crate::simd::SimdScalar;
use crate::special::ScalarSpecial;
use crate::traits::Strategy;
#[allow(unused_imports)]
use crate::traits::{Avx, Sse};

#[inline(always)]
fn map<T: Copy, const N: usize>(a: [T; N], f: impl Fn(T) -> T) -> [T; N] {
    core::array::from_fn(|i| f(a[i]))
}

#[inline(always)]
fn zip<T: Copy, const N: usize>(a: [T; N], b: [T; N], f: impl Fn(T, T) -> T) -> [T; N] {
    core::array::from_fn(|i| f(a[i], b[i]))
}

#[inline(always)]
fn lanes_where<T: NumFormat, const N: usize>(a: [T; N], f: impl Fn(T) -> bool) -> [T::Bits; N] {
    core::array::from_fn(|i| T::mask_of(f(a[i])))
}

#[inline(always)]
fn pairs_where<T: NumFormat, const N: usize>(
    a: [T; N],
    b: [T; N],
    f: impl Fn(T, T) -> bool,
) -> [T::Bits; N] {
    core::array::from_fn(|i| T::mask_of(f(a[i], b[i])))
}

macro_rules! impl_portable {
    ($t:ty, $w:ty, $n:literal, $cfg:meta) => {
        #[$cfg]
        impl SimdScalar<$w> for $t {
            type Reg = [$t; $n];
            type Mask = [<$t as NumFormat>::Bits; $n];
            type Array = [$t; $n];

            const LANES: usize = $n;
            const STRATEGY: Strategy = Strategy::Emulated;

            #[inline]
            fn splat(x: $t) -> [$t; $n] {
                [x; $n]
            }

            #[inline]
            fn from_array(a: [$t; $n]) -> [$t; $n] {
                a
            }

            #[inline]
            fn to_array(r: [$t; $n]) -> [$t; $n] {
                r
            }

            #[inline]
            unsafe fn load(p: *const $t) -> [$t; $n] {
                unsafe { core::ptr::read_unaligned(p as *const [$t; $n]) }
            }

            #[inline]
            unsafe fn store(r: [$t; $n], p: *mut $t) {
                unsafe { core::ptr::write_unaligned(p as *mut [$t; $n], r) }
            }

            #[inline]
            fn add(a: [$t; $n], b: [$t; $n]) -> [$t; $n] {
                zip(a, b, |x, y| x + y)
            }

            #[inline]
            fn sub(a: [$t; $n], b: [$t; $n]) -> [$t; $n] {
                zip(a, b, |x, y| x - y)
            }

            #[inline]
            fn mul(a: [$t; $n], b: [$t; $n]) -> [$t; $n] {
                zip(a, b, |x, y| x * y)
            }

            #[inline]
            fn div(a: [$t; $n], b: [$t; $n]) -> [$t; $n] {
                zip(a, b, |x, y| x / y)
            }

            #[inline]
            fn neg(a: [$t; $n]) -> [$t; $n] {
                map(a, NumFormat::flip_sign)
            }

            #[inline]
            fn abs(a: [$t; $n]) -> [$t; $n] {
                map(a, NumFormat::clear_sign)
            }

            // Second operand wins on NaN, like minps/maxps.

            #[inline]
            fn min(a: [$t; $n], b: [$t; $n]) -> [$t; $n] {
                zip(a, b, |x, y| if x < y { x } else { y })
            }

            #[inline]
            fn max(a: [$t; $n], b: [$t; $n]) -> [$t; $n] {
                zip(a, b, |x, y| if x > y { x } else { y })
            }

            #[inline]
            fn sqrt(a: [$t; $n]) -> [$t; $n] {
                map(a, Float::sqrt)
            }

            #[inline]
            fn rcp(a: [$t; $n]) -> [$t; $n] {
                map(a, |x| 1.0 / x)
            }

            #[inline]
            fn approx_rcp(a: [$t; $n]) -> [$t; $n] {
                <$t as SimdScalar<$w>>::rcp(a)
            }

            #[inline]
            fn rsqrt(a: [$t; $n]) -> [$t; $n] {
                map(a, |x| 1.0 / Float::sqrt(x))
            }

            #[inline]
            fn approx_rsqrt(a: [$t; $n]) -> [$t; $n] {
                <$t as SimdScalar<$w>>::rsqrt(a)
            }

            #[inline]
            fn hsum(a: [$t; $n]) -> $t {
                a.iter().fold(0.0, |acc, &x| acc + x)
            }

            #[inline]
            fn round(a: [$t; $n]) -> [$t; $n] {
                map(a, ScalarSpecial::round_even)
            }

            #[inline]
            fn floor(a: [$t; $n]) -> [$t; $n] {
                map(a, Float::floor)
            }

            #[inline]
            fn ceil(a: [$t; $n]) -> [$t; $n] {
                map(a, Float::ceil)
            }

            #[inline]
            fn trunc(a: [$t; $n]) -> [$t; $n] {
                map(a, Float::trunc)
            }

            #[inline]
            fn cmp_eq(a: [$t; $n], b: [$t; $n]) -> Self::Mask {
                pairs_where(a, b, |x, y| x == y)
            }

            #[inline]
            fn cmp_ne(a: [$t; $n], b: [$t; $n]) -> Self::Mask {
                pairs_where(a, b, |x, y| x != y)
            }

            #[inline]
            fn cmp_lt(a: [$t; $n], b: [$t; $n]) -> Self::Mask {
                pairs_where(a, b, |x, y| x < y)
            }

            #[inline]
            fn cmp_le(a: [$t; $n], b: [$t; $n]) -> Self::Mask {
                pairs_where(a, b, |x, y| x <= y)
            }

            #[inline]
            fn cmp_gt(a: [$t; $n], b: [$t; $n]) -> Self::Mask {
                pairs_where(a, b, |x, y| x > y)
            }

            #[inline]
            fn cmp_ge(a: [$t; $n], b: [$t; $n]) -> Self::Mask {
                pairs_where(a, b, |x, y| x >= y)
            }

            #[inline]
            fn is_neg(a: [$t; $n]) -> Self::Mask {
                lanes_where(a, NumFormat::sign_set)
            }

            #[inline]
            fn is_finite(a: [$t; $n]) -> Self::Mask {
                lanes_where(a, NumFormat::finite_bits)
            }

            #[inline]
            fn is_inf(a: [$t; $n]) -> Self::Mask {
                lanes_where(a, NumFormat::inf_bits)
            }

            #[inline]
            fn is_nan(a: [$t; $n]) -> Self::Mask {
                lanes_where(a, NumFormat::nan_bits)
            }

            #[inline]
            fn mask_splat(b: bool) -> Self::Mask {
                [<$t as NumFormat>::mask_of(b); $n]
            }

            #[inline]
            fn mask_from_fn(mut f: impl FnMut(usize) -> bool) -> Self::Mask {
                core::array::from_fn(|i| <$t as NumFormat>::mask_of(f(i)))
            }

            #[inline]
            fn mask_bits(m: Self::Mask) -> u32 {
                m.iter()
                    .enumerate()
                    .fold(0, |acc, (i, lane)| acc | (((!lane.is_zero()) as u32) << i))
            }

            #[inline]
            fn mask_not(m: Self::Mask) -> Self::Mask {
                m.map(|lane| !lane)
            }

            #[inline]
            fn mask_and(a: Self::Mask, b: Self::Mask) -> Self::Mask {
                core::array::from_fn(|i| a[i] & b[i])
            }

            #[inline]
            fn mask_or(a: Self::Mask, b: Self::Mask) -> Self::Mask {
                core::array::from_fn(|i| a[i] | b[i])
            }

            #[inline]
            fn mask_xor(a: Self::Mask, b: Self::Mask) -> Self::Mask {
                core::array::from_fn(|i| a[i] ^ b[i])
            }

            #[inline]
            fn select(m: Self::Mask, a: [$t; $n], b: [$t; $n]) -> [$t; $n] {
                core::array::from_fn(|i| if m[i].is_zero() { b[i] } else { a[i] })
            }
        }
    };
}

impl_portable!(f32, Sse, 4, cfg(not(target_arch = "x86_64")));
impl_portable!(f64, Sse, 2, cfg(not(target_arch = "x86_64")));
impl_portable!(f32, Avx, 8, cfg(not(all(target_arch = "x86_64", target_feature = "avx"))));
impl_portable!(f64, Avx, 4, cfg(not(all(target_arch = "x86_64", target_feature = "avx"))));

#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
impl crate::simd::Halves for f32 {}

#[cfg(not(all(target_arch = "x86_64", target_feature = "avx")))]
impl crate::simd::Halves for f64 {}
