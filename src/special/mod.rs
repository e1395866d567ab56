//! Scalar special functions backing the emulation path.
//!
//! `num_traits::Float` covers the elementary transcendental functions; the
//! ones it lacks (error functions, base-10 exponential, the normal CDF and
//! its inverse, round-half-to-even) live here so every lane type has a
//! scalar reference for each vectorized function.
//!
//! # Functions
//!
//! | Function | Description |
//! |----------|-------------|
//! | [`ScalarSpecial::erf`] | Error function |
//! | [`ScalarSpecial::erfc`] | Complementary error function 1−erf(x) |
//! | [`ScalarSpecial::exp10`] | 10ˣ |
//! | [`ScalarSpecial::cdfnorm`] | Standard normal CDF Φ(x) |
//! | [`ScalarSpecial::cdfnorminv`] | Standard normal quantile Φ⁻¹(p) |
//! | [`ScalarSpecial::round_even`] | Round half to even |
//!
//! # Example
//!
//! ```
//! use simdpack::special::ScalarSpecial;
//!
//! assert!((ScalarSpecial::erf(1.0_f64) - 0.8427007929497149).abs() < 1e-15);
//! assert!((ScalarSpecial::cdfnorm(0.0_f64) - 0.5).abs() < 1e-16);
//! assert_eq!(ScalarSpecial::round_even(2.5_f32), 2.0);
//! ```

mod normal;


pub(crate) use normal::{cdfnorm_f64, cdfnorminv_f64};

/// Scalar functions that `num_traits::Float` does not provide.
pub trait ScalarSpecial: Copy {
    /// Error function erf(x) = (2/√π) ∫₀ˣ e^{−t²} dt.
    fn erf(self) -> Self;

    /// Complementary error function 1 − erf(x), without cancellation for
    /// large x.
    fn erfc(self) -> Self;

    /// 10ˣ.
    fn exp10(self) -> Self;

    /// Standard normal cumulative distribution Φ(x) = erfc(−x/√2) / 2.
    fn cdfnorm(self) -> Self;

    /// Standard normal quantile Φ⁻¹(p).
    ///
    /// `p = 0` gives −∞, `p = 1` gives +∞, and `p` outside `[0, 1]` or NaN
    /// gives NaN.
    fn cdfnorminv(self) -> Self;

    /// Round to the nearest integer, ties to even.
    fn round_even(self) -> Self;
}

impl ScalarSpecial for f64 {
    #[inline]
    fn erf(self) -> f64 {
        libm::erf(self)
    }

    #[inline]
    fn erfc(self) -> f64 {
        libm::erfc(self)
    }

    #[inline]
    fn exp10(self) -> f64 {
        libm::exp10(self)
    }

    #[inline]
    fn cdfnorm(self) -> f64 {
        cdfnorm_f64(self)
    }

    #[inline]
    fn cdfnorminv(self) -> f64 {
        cdfnorminv_f64(self)
    }

    #[inline]
    fn round_even(self) -> f64 {
        libm::rint(self)
    }
}

impl ScalarSpecial for f32 {
    #[inline]
    fn erf(self) -> f32 {
        libm::erff(self)
    }

    #[inline]
    fn erfc(self) -> f32 {
        libm::erfcf(self)
    }

    #[inline]
    fn exp10(self) -> f32 {
        libm::exp10f(self)
    }

    // Evaluated in f64 and rounded once.
    #[inline]
    fn cdfnorm(self) -> f32 {
        cdfnorm_f64(self as f64) as f32
    }

    #[inline]
    fn cdfnorminv(self) -> f32 {
        cdfnorminv_f64(self as f64) as f32
    }

    #[inline]
    fn round_even(self) -> f32 {
        libm::rintf(self)
    }
}
