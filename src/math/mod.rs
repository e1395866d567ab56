//! Transcendental functions on packs with compile-time strategy selection.
//!
//! Every function is available through the [`PackMath`] trait and as a
//! free function with a uniform signature:
//!
//! ```text
//! fn f(a: Pack<T, W>) -> Pack<T, W>                 // unary
//! fn f(a: Pack<T, W>, b: Pack<T, W>) -> Pack<T, W>  // pow, atan2, hypot
//! ```
//!
//! For each (lane type, width) pair exactly one `PackMath` impl is compiled:
//!
//! - `svml` feature: Intel SVML routines (`__svml_expf8`, ...) for all
//!   functions.
//! - `amd-libm` feature: AMD LIBM routines (`amd_vrs8_expf`, ...) for the
//!   exponential, logarithmic, power, cube-root and circular functions; the
//!   remaining ones are emulated.
//! - neither: every function is emulated, one scalar call per lane
//!   ([`emulate`]).
//!
//! An external library is only used where the native backend for that width
//! is compiled in (any `x86_64` target for [`Sse`](crate::Sse), `avx` for
//! [`Avx`](crate::Avx)). Each function carries a [`Strategy`] constant and
//! [`Caps`] turns those into plain `bool` flags.
//!
//! The two features are mutually exclusive.
//!
//! # Example
//!
//! ```
//! use simdpack::{math, F64x4};
//!
//! let x = F64x4::from_array([0.0, 1.0, 2.0, -1.0]);
//! let y = math::exp(x);
//! assert!((y.lane::<1>() - core::f64::consts::E).abs() < 1e-15);
//!
//! let z = math::xlogx(F64x4::from_array([0.0, 1.0, 2.0, 0.5]));
//! assert_eq!(z.lane::<0>(), 0.0);
//! ```

pub mod caps;
pub mod emulate;


pub use caps::Caps;

use num_traits::Float;

use crate::pack::Pack;
use crate::simd::SimdScalar;
use crate::special::ScalarSpecial;
use crate::traits::{Strategy, Width};

macro_rules! pack_math {
    (
        unary {
            $( $(#[$m1:meta])* $f1:ident / $C1:ident => $s1:path; )*
        }
        binary {
            $( $(#[$m2:meta])* $f2:ident / $C2:ident => $s2:path; )*
        }
    ) => {
        /// Vectorized math functions for one (lane type, width) pair.
        ///
        /// Every method defaults to lane-wise emulation and every strategy
        /// constant to [`Strategy::Emulated`]; external-library impls
        /// override both for the functions they provide.
        pub trait PackMath<W: Width>: SimdScalar<W> {
            $(
                #[doc = concat!("How [`", stringify!($f1), "`](PackMath::", stringify!($f1), ") is evaluated.")]
                const $C1: Strategy = Strategy::Emulated;
            )*
            $(
                #[doc = concat!("How [`", stringify!($f2), "`](PackMath::", stringify!($f2), ") is evaluated.")]
                const $C2: Strategy = Strategy::Emulated;
            )*

            $(
                $(#[$m1])*
                #[inline]
                fn $f1(a: Self::Reg) -> Self::Reg {
                    emulate::map1_reg::<Self, W>(a, $s1)
                }
            )*
            $(
                $(#[$m2])*
                #[inline]
                fn $f2(a: Self::Reg, b: Self::Reg) -> Self::Reg {
                    emulate::map2_reg::<Self, W>(a, b, $s2)
                }
            )*
        }

        $(
            $(#[$m1])*
            #[inline]
            pub fn $f1<T: PackMath<W>, W: Width>(a: Pack<T, W>) -> Pack<T, W> {
                Pack::from_reg(<T as PackMath<W>>::$f1(a.reg()))
            }
        )*
        $(
            $(#[$m2])*
            #[inline]
            pub fn $f2<T: PackMath<W>, W: Width>(a: Pack<T, W>, b: Pack<T, W>) -> Pack<T, W> {
                Pack::from_reg(<T as PackMath<W>>::$f2(a.reg(), b.reg()))
            }
        )*

        impl<T: PackMath<W>, W: Width> Caps<T, W> {
            $(
                #[doc = concat!("`", stringify!($f1), "` is vectorized.")]
                pub const $C1: bool = <T as PackMath<W>>::$C1.is_vectorized();
            )*
            $(
                #[doc = concat!("`", stringify!($f2), "` is vectorized.")]
                pub const $C2: bool = <T as PackMath<W>>::$C2.is_vectorized();
            )*
        }
    };
}

pack_math! {
    unary {
        /// eˣ.
        exp / EXP => Float::exp;
        /// Natural logarithm.
        log / LOG => Float::ln;
        log10 / LOG10 => Float::log10;
        sin / SIN => Float::sin;
        cos / COS => Float::cos;
        tan / TAN => Float::tan;
        asin / ASIN => Float::asin;
        acos / ACOS => Float::acos;
        atan / ATAN => Float::atan;
        sinh / SINH => Float::sinh;
        cosh / COSH => Float::cosh;
        tanh / TANH => Float::tanh;
        /// Cube root, defined for negative inputs.
        cbrt / CBRT => Float::cbrt;
        /// 2ˣ.
        exp2 / EXP2 => Float::exp2;
        log2 / LOG2 => Float::log2;
        /// eˣ − 1, accurate near zero.
        expm1 / EXPM1 => Float::exp_m1;
        /// ln(1 + x), accurate near zero.
        log1p / LOG1P => Float::ln_1p;
        asinh / ASINH => Float::asinh;
        acosh / ACOSH => Float::acosh;
        atanh / ATANH => Float::atanh;
        /// Error function.
        erf / ERF => ScalarSpecial::erf;
        /// Complementary error function.
        erfc / ERFC => ScalarSpecial::erfc;
        /// 10ˣ.
        exp10 / EXP10 => ScalarSpecial::exp10;
        /// Standard normal CDF Φ(x).
        cdfnorm / CDFNORM => ScalarSpecial::cdfnorm;
        /// Standard normal quantile Φ⁻¹(p).
        cdfnorminv / CDFNORMINV => ScalarSpecial::cdfnorminv;
    }
    binary {
        /// aᵇ.
        pow / POW => Float::powf;
        /// Four-quadrant arctangent of a / b.
        atan2 / ATAN2 => Float::atan2;
        /// √(a² + b²) without intermediate overflow.
        hypot / HYPOT => Float::hypot;
    }
}

/// `a · ln(b)` where `a > 0`, and `+0` in every other lane.
///
/// The product is formed before the select, so lanes with `a ≤ 0` (including
/// `-0.0` and `-∞`) give `+0` even when `ln(b)` is −∞ or NaN.
#[inline]
pub fn xlogy<T: PackMath<W>, W: Width>(a: Pack<T, W>, b: Pack<T, W>) -> Pack<T, W> {
    let zero = Pack::zeros();
    a.cmp_gt(&zero).select(log(b) * a, zero)
}

/// `x · ln(x)`, with `0 · ln(0) = 0`.
#[inline]
pub fn xlogx<T: PackMath<W>, W: Width>(a: Pack<T, W>) -> Pack<T, W> {
    xlogy(a, a)
}

/// Declares the routines of an external vectorized math library for one
/// (lane type, width) pair and routes the listed functions to them.
///
/// Symbols are `prefix ++ name ++ suffix`.
#[cfg(any(feature = "svml", feature = "amd-libm"))]
macro_rules! external_math {
    (
        #[$cfg:meta]
        mod $m:ident: $t:ty, $w:ident, $reg:ident;
        link $lib:literal, $pre:literal, $suf:literal;
        unary [ $( $f1:ident / $C1:ident ),* $(,)? ]
        binary [ $( $f2:ident / $C2:ident ),* $(,)? ]
    ) => {
        #[$cfg]
        mod $m {
            use core::arch::x86_64::$reg;

            use crate::math::PackMath;
            use crate::traits::{$w, Strategy};

            #[link(name = $lib)]
            unsafe extern "C" {
                $(
                    #[link_name = concat!($pre, stringify!($f1), $suf)]
                    fn $f1(a: $reg) -> $reg;
                )*
                $(
                    #[link_name = concat!($pre, stringify!($f2), $suf)]
                    fn $f2(a: $reg, b: $reg) -> $reg;
                )*
            }

            impl PackMath<$w> for $t {
                $( const $C1: Strategy = Strategy::External; )*
                $( const $C2: Strategy = Strategy::External; )*

                $(
                    #[inline]
                    fn $f1(a: $reg) -> $reg {
                        unsafe { $f1(a) }
                    }
                )*
                $(
                    #[inline]
                    fn $f2(a: $reg, b: $reg) -> $reg {
                        unsafe { $f2(a, b) }
                    }
                )*
            }
        }
    };
}

#[cfg(feature = "svml")]
mod svml;

#[cfg(feature = "amd-libm")]
mod amdlibm;
