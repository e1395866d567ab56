//! Lane-format utilities.
//!
//! Bit-layout facts for IEEE-754 binary32 / binary64, used to implement sign
//! flips, absolute values and classification with bitwise operations instead
//! of per-lane branches.

use core::fmt::Debug;
use num_traits::{PrimInt, Zero};

/// Bit layout of a floating-point lane type.
pub trait NumFormat: Copy {
    /// Unsigned integer of the same width.
    type Bits: PrimInt + Debug + Default + Send + Sync + 'static;

    /// Width of the exponent field.
    const EXP_BITS: u32;
    /// Width of the stored mantissa (without the implicit bit).
    const MANT_BITS: u32;

    /// Only the sign bit set.
    const SIGN_BIT: Self::Bits;
    /// All exponent bits set.
    const EXP_MASK: Self::Bits;
    /// All mantissa bits set.
    const MANT_MASK: Self::Bits;
    /// Everything but the sign bit.
    const ABS_MASK: Self::Bits;
    /// Every bit set: the representation of a `true` mask lane.
    const ALL_ONES: Self::Bits;

    /// Raw bit pattern.
    fn raw(self) -> Self::Bits;

    /// Reinterpret a raw bit pattern.
    fn from_raw(bits: Self::Bits) -> Self;

    /// Flip the sign bit (exact negation, including zeros and NaNs).
    #[inline]
    fn flip_sign(self) -> Self {
        Self::from_raw(self.raw() ^ Self::SIGN_BIT)
    }

    /// Clear the sign bit (exact absolute value).
    #[inline]
    fn clear_sign(self) -> Self {
        Self::from_raw(self.raw() & Self::ABS_MASK)
    }

    /// Sign bit set. True for `-0.0` and for NaNs carrying a negative sign.
    #[inline]
    fn sign_set(self) -> bool {
        self.raw() & Self::SIGN_BIT != Self::Bits::zero()
    }

    /// Exponent field not saturated.
    #[inline]
    fn finite_bits(self) -> bool {
        self.raw() & Self::EXP_MASK != Self::EXP_MASK
    }

    /// Saturated exponent with an empty mantissa.
    #[inline]
    fn inf_bits(self) -> bool {
        self.raw() & Self::ABS_MASK == Self::EXP_MASK
    }

    /// Saturated exponent with a non-empty mantissa.
    #[inline]
    fn nan_bits(self) -> bool {
        self.raw() & Self::ABS_MASK > Self::EXP_MASK
    }

    /// Canonical mask lane for a boolean: all ones or all zeros.
    #[inline]
    fn mask_of(b: bool) -> Self::Bits {
        if b { Self::ALL_ONES } else { Self::Bits::zero() }
    }
}

macro_rules! impl_num_format {
    ($t:ty, $bits:ty, $exp:expr, $mant:expr) => {
        impl NumFormat for $t {
            type Bits = $bits;

            const EXP_BITS: u32 = $exp;
            const MANT_BITS: u32 = $mant;

            const SIGN_BIT: $bits = 1 << ($exp + $mant);
            const EXP_MASK: $bits = ((1 << $exp) - 1) << $mant;
            const MANT_MASK: $bits = (1 << $mant) - 1;
            const ABS_MASK: $bits = !(1 << ($exp + $mant));
            const ALL_ONES: $bits = !0;

            #[inline]
            fn raw(self) -> $bits {
                <$t>::to_bits(self)
            }

            #[inline]
            fn from_raw(bits: $bits) -> $t {
                <$t>::from_bits(bits)
            }
        }
    };
}

impl_num_format!(f32, u32, 8, 23);
impl_num_format!(f64, u64, 11, 52);
