//! Boolean pack: one all-ones / all-zeros lane per numeric lane.

use core::fmt;
use core::marker::PhantomData;
use core::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Not};

use super::{Pack, PackError};
use crate::simd::SimdScalar;
use crate::traits::Width;

/// Lane mask matching [`Pack<T, W>`].
///
/// Every lane is either all ones (true) or all zeros (false); the bitwise
/// operators rely on this, and no public operation produces anything else.
#[repr(transparent)]
pub struct BoolPack<T: SimdScalar<W>, W: Width> {
    mask: T::Mask,
    _width: PhantomData<W>,
}

impl<T: SimdScalar<W>, W: Width> Clone for BoolPack<T, W> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: SimdScalar<W>, W: Width> Copy for BoolPack<T, W> {}

impl<T: SimdScalar<W>, W: Width> fmt::Debug for BoolPack<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: SimdScalar<W>, W: Width> PartialEq for BoolPack<T, W> {
    fn eq(&self, other: &Self) -> bool {
        self.bitmask() == other.bitmask()
    }
}

impl<T: SimdScalar<W>, W: Width> Eq for BoolPack<T, W> {}

impl<T: SimdScalar<W>, W: Width> BoolPack<T, W> {
    pub const LANES: usize = T::LANES;

    /// Wrap a backend mask. Lanes must be canonical.
    #[inline]
    pub fn from_mask(mask: T::Mask) -> Self {
        Self { mask, _width: PhantomData }
    }

    /// The backend mask.
    #[inline]
    pub fn mask(self) -> T::Mask {
        self.mask
    }

    #[inline]
    pub fn splat(b: bool) -> Self {
        Self::from_mask(T::mask_splat(b))
    }

    #[inline]
    pub fn all_true() -> Self {
        Self::splat(true)
    }

    #[inline]
    pub fn all_false() -> Self {
        Self::splat(false)
    }

    /// Lane `i` set to `lanes[i]`.
    ///
    /// # Panics
    /// If `lanes.len() != LANES`.
    pub fn new(lanes: &[bool]) -> Self {
        match Self::try_new(lanes) {
            Ok(m) => m,
            Err(e) => panic!("BoolPack::new: {e}"),
        }
    }

    /// Lane `i` set to `lanes[i]`; `lanes` must hold exactly `LANES` values.
    pub fn try_new(lanes: &[bool]) -> Result<Self, PackError> {
        if lanes.len() != T::LANES {
            return Err(PackError::LengthMismatch { expected: T::LANES, found: lanes.len() });
        }
        Ok(Self::from_mask(T::mask_from_fn(|i| lanes[i])))
    }

    /// Lanes from the first `LANES` entries of `src`.
    ///
    /// # Panics
    /// If `src` is shorter than `LANES`.
    pub fn load(src: &[bool]) -> Self {
        assert!(
            src.len() >= T::LANES,
            "BoolPack::load: need {} entries, got {}",
            T::LANES,
            src.len()
        );
        Self::from_mask(T::mask_from_fn(|i| src[i]))
    }

    /// Write the lanes to the first `LANES` entries of `out`.
    ///
    /// # Panics
    /// If `out` is shorter than `LANES`.
    pub fn store(&self, out: &mut [bool]) {
        assert!(
            out.len() >= T::LANES,
            "BoolPack::store: need {} entries, got {}",
            T::LANES,
            out.len()
        );
        for (i, slot) in out[..T::LANES].iter_mut().enumerate() {
            *slot = self.extract(i);
        }
    }

    /// Lanes in order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + use<T, W> {
        let bits = self.bitmask();
        (0..T::LANES).map(move |i| (bits >> i) & 1 != 0)
    }

    /// Bit `i` set iff lane `i` is true.
    #[inline]
    pub fn bitmask(&self) -> u32 {
        T::mask_bits(self.mask)
    }

    /// Lane `i`.
    ///
    /// # Panics
    /// If `i >= LANES`.
    #[inline]
    pub fn extract(&self, i: usize) -> bool {
        assert!(i < T::LANES, "BoolPack::extract: lane {i} out of range");
        (self.bitmask() >> i) & 1 != 0
    }

    /// Lane `I`, with the index checked at compile time.
    #[inline]
    pub fn lane<const I: usize>(&self) -> bool {
        const { assert!(I < <T as SimdScalar<W>>::LANES, "lane index out of range") };
        (self.bitmask() >> I) & 1 != 0
    }

    /// Lane 0. Meant for masks known to be uniform.
    #[inline]
    pub fn to_scalar(&self) -> bool {
        self.lane::<0>()
    }

    #[inline]
    pub fn any(&self) -> bool {
        self.bitmask() != 0
    }

    #[inline]
    pub fn all(&self) -> bool {
        self.bitmask() == (1u32 << T::LANES) - 1
    }

    #[inline]
    pub fn none(&self) -> bool {
        self.bitmask() == 0
    }

    /// Lane-wise `a != b`, computed as `a ^ b`.
    #[inline]
    pub fn cmp_ne(&self, b: &Self) -> Self {
        *self ^ *b
    }

    /// Lane-wise `a == b`, computed as `!(a ^ b)`.
    #[inline]
    pub fn cmp_eq(&self, b: &Self) -> Self {
        !(*self ^ *b)
    }

    /// Lane-wise `mask ? a : b`.
    #[inline]
    pub fn select(&self, a: Pack<T, W>, b: Pack<T, W>) -> Pack<T, W> {
        Pack::from_reg(T::select(self.mask, a.reg(), b.reg()))
    }
}

impl<T: SimdScalar<W>, W: Width> Not for BoolPack<T, W> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::from_mask(T::mask_not(self.mask))
    }
}

macro_rules! impl_mask_op {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident, $f:ident) => {
        impl<T: SimdScalar<W>, W: Width> $Op for BoolPack<T, W> {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: Self) -> Self {
                Self::from_mask(T::$f(self.mask, rhs.mask))
            }
        }

        impl<T: SimdScalar<W>, W: Width> $OpAssign for BoolPack<T, W> {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

impl_mask_op!(BitAnd, bitand, BitAndAssign, bitand_assign, mask_and);
impl_mask_op!(BitOr, bitor, BitOrAssign, bitor_assign, mask_or);
impl_mask_op!(BitXor, bitxor, BitXorAssign, bitxor_assign, mask_xor);
