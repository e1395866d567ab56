use core::fmt::Debug;
use num_traits::Float;

use crate::format::NumFormat;
use crate::special::ScalarSpecial;

/// Trait for types that can be used as pack lanes.
///
/// Blanket-implemented for all types satisfying the bounds, which in
/// practice means `f32` and `f64`.
pub trait PackScalar:
    Float + NumFormat + ScalarSpecial + Debug + Default + Send + Sync + 'static
{
}

impl<T> PackScalar for T where
    T: Float + NumFormat + ScalarSpecial + Debug + Default + Send + Sync + 'static
{
}

/// A vector register width class.
///
/// The lane count of a pack is `BITS / (8 * size_of::<T>())`, so a width
/// class fixes 4×f32 / 2×f64 for [`Sse`] and 8×f32 / 4×f64 for [`Avx`].
pub trait Width: Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Register width in bits.
    const BITS: usize;
    /// Instruction-set name, for diagnostics.
    const NAME: &'static str;
}

/// 128-bit width class (SSE registers).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Sse;

/// 256-bit width class (AVX registers).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Avx;

impl Width for Sse {
    const BITS: usize = 128;
    const NAME: &'static str = "sse";
}

impl Width for Avx {
    const BITS: usize = 256;
    const NAME: &'static str = "avx";
}

/// Number of `T` lanes in a register of width class `W`.
#[inline]
pub const fn lanes_of<T, W: Width>() -> usize {
    W::BITS / (8 * core::mem::size_of::<T>())
}

/// How an operation is carried out for a given scalar type and width.
///
/// Fixed at build time: it depends only on the target features and the
/// Cargo features the crate was compiled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// A single hardware vector instruction.
    Native,
    /// A routine from an external vectorized math library (SVML or AMD LIBM).
    External,
    /// One scalar call per lane, repacked into a vector.
    Emulated,
}

impl Strategy {
    /// `true` for [`Native`](Strategy::Native) and
    /// [`External`](Strategy::External).
    #[inline]
    pub const fn is_vectorized(self) -> bool {
        match self {
            Strategy::Native | Strategy::External => true,
            Strategy::Emulated => false,
        }
    }
}
