//! Compile-time capability flags.
//!
//! `Caps::<T, W>::NAME` is `true` when the operation runs as a hardware
//! instruction or an external vectorized routine for lane type `T` at
//! width `W`, and `false` when it is emulated lane by lane. Consumers read
//! these to choose an algorithm shape; the values are fixed per build.
//!
//! ```
//! use simdpack::{Avx, Caps, Sse};
//!
//! if Caps::<f64, Avx>::EXP {
//!     // vectorized exp available
//! }
//! assert_eq!(Caps::<f32, Sse>::XLOGX, Caps::<f32, Sse>::LOG);
//! ```

use core::marker::PhantomData;

use super::PackMath;
use crate::simd::SimdScalar;
use crate::traits::Width;

/// Capability flags for lane type `T` at width `W`.
///
/// The math-function flags (`EXP`, `POW`, ...) live on a second impl
/// generated next to [`PackMath`].
pub struct Caps<T, W>(PhantomData<fn() -> (T, W)>);

impl<T: SimdScalar<W>, W: Width> Caps<T, W> {
    const NATIVE: bool = T::STRATEGY.is_vectorized();

    pub const ADD: bool = Self::NATIVE;
    pub const SUB: bool = Self::NATIVE;
    pub const MUL: bool = Self::NATIVE;
    pub const DIV: bool = Self::NATIVE;
    pub const NEG: bool = Self::NATIVE;
    pub const ABS: bool = Self::NATIVE;
    pub const SQR: bool = Self::NATIVE;
    pub const CUBE: bool = Self::NATIVE;
    pub const RCP: bool = Self::NATIVE;
    pub const SQRT: bool = Self::NATIVE;
    pub const RSQRT: bool = Self::NATIVE;
    pub const MIN: bool = Self::NATIVE;
    pub const MAX: bool = Self::NATIVE;
    pub const FLOOR: bool = Self::NATIVE;
    pub const CEIL: bool = Self::NATIVE;
    pub const ROUND: bool = Self::NATIVE;
    pub const TRUNC: bool = Self::NATIVE;
}

impl<T: PackMath<W>, W: Width> Caps<T, W> {
    /// Same as `LOG`.
    pub const XLOGY: bool = Self::LOG;
    pub const XLOGX: bool = Self::LOG;
}
