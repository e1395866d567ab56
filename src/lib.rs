//! # simdpack
//!
//! Fixed-width SIMD packs for `f32` and `f64`, no-std compatible. Each
//! operation is resolved at compile time to a native vector instruction, a
//! routine from an external vectorized math library, or a lane-by-lane
//! scalar emulation, behind one call signature.
//!
//! ## Quick start
//!
//! ```
//! use simdpack::{math, F64x4};
//!
//! let a = F64x4::from_array([1.0, -2.5, 0.0, 3.75]);
//! let b = a.abs() * F64x4::splat(2.0) - F64x4::ones();
//! assert_eq!(b.to_array(), [1.0, 4.0, -1.0, 6.5]);
//!
//! // lane-wise NaN-aware comparisons produce masks
//! let m = a.cmp_gt(&F64x4::zeros());
//! assert_eq!(m.bitmask(), 0b1001);
//!
//! // transcendental functions share one signature whatever the backend
//! let e = math::exp(F64x4::zeros());
//! assert_eq!(e.to_array(), [1.0; 4]);
//! ```
//!
//! ## Modules
//!
//! - [`pack`]: [`Pack<T, W>`] numeric packs and [`BoolPack<T, W>`] lane
//!   masks: construction, load/store, arithmetic operators, min/max,
//!   rounding, reciprocals, comparisons, classification, `select`.
//!   Aliases [`F32x4`], [`F64x2`], [`F32x8`], [`F64x4`] and their masks.
//!
//! - [`math`]: exp/log/trig/hyperbolic/error-function family through the
//!   [`PackMath`] trait and uniform free functions; [`Caps`] capability
//!   flags; [`math::emulate`] scalar-replicated fallback.
//!
//! - [`simd`]: the [`SimdScalar`] backend contract with SSE2, AVX and
//!   portable implementations.
//!
//! - [`format`]: IEEE-754 bit-layout facts ([`NumFormat`]).
//!
//! - [`special`]: scalar erf, erfc, exp10, normal CDF and quantile.
//!
//! - [`reduce`]: `sum`, `dot`, `sum_sq`, `max`, `min` over slices.
//!
//! - [`traits`]: width classes [`Sse`] / [`Avx`], [`PackScalar`],
//!   [`Strategy`].
//!
//! ## Lane counts
//!
//! | Width class | f32 | f64 | Native when |
//! |-------------|-----|-----|-------------|
//! | [`Sse`] (128-bit) | 4 | 2 | any `x86_64` |
//! | [`Avx`] (256-bit) | 8 | 4 | `x86_64` + `avx` |
//!
//! The 128-bit backends need only SSE2, so every `x86_64` build gets them.
//! Build with `RUSTFLAGS="-C target-cpu=native"` (or
//! `-C target-feature=+avx`) to get the 256-bit ones. Pairs without a native
//! backend use the portable one, and their [`Caps`] flags read `false`.
//!
//! ## Cargo features
//!
//! | Feature    | Default | Description |
//! |------------|---------|-------------|
//! | `std`      | yes     | Hardware FPU via system libm for the scalar paths |
//! | `svml`     | no      | Intel SVML for every math function (links `svml`) |
//! | `amd-libm` | no      | AMD LIBM for exp/log/pow/cbrt/sin/cos/tan (links `alm`) |
//!
//! `svml` and `amd-libm` are mutually exclusive. Both pass vector registers
//! across `extern "C"`, which needs a nightly toolchain (`simd_ffi`).

#![cfg_attr(not(any(feature = "std", test)), no_std)]
#![cfg_attr(any(feature = "svml", feature = "amd-libm"), feature(simd_ffi))]

#[cfg(all(feature = "svml", feature = "amd-libm"))]
compile_error!("features `svml` and `amd-libm` are mutually exclusive; enable at most one");

pub mod format;
pub mod math;
pub mod pack;
pub mod reduce;
pub mod simd;
pub mod special;
pub mod traits;

pub use format::NumFormat;
pub use math::{Caps, PackMath};
pub use pack::{B32x4, B32x8, B64x2, B64x4, BoolPack, F32x4, F32x8, F64x2, F64x4, Pack, PackError};
pub use simd::SimdScalar;
pub use special::ScalarSpecial;
pub use traits::{Avx, PackScalar, Sse, Strategy, Width};
