//! Fixed-width numeric and boolean packs.
//!
//! [`Pack<T, W>`] holds one register's worth of `T` lanes for width class
//! `W` ([`Sse`](crate::Sse) or [`Avx`](crate::Avx)); [`BoolPack<T, W>`] is
//! the matching lane mask. Both are `Copy` value types with no heap storage
//! and compile down to the backend register.
//!
//! | Alias | Lanes |
//! |-------|-------|
//! | [`F32x4`] / [`B32x4`] | 4 × f32 (128-bit) |
//! | [`F64x2`] / [`B64x2`] | 2 × f64 (128-bit) |
//! | [`F32x8`] / [`B32x8`] | 8 × f32 (256-bit) |
//! | [`F64x4`] / [`B64x4`] | 4 × f64 (256-bit) |
//!
//! # Example
//!
//! ```
//! use simdpack::F64x4;
//!
//! let a = F64x4::from_array([1.0, -2.5, 0.0, 3.75]);
//! assert_eq!(a.abs().to_array(), [1.0, 2.5, 0.0, 3.75]);
//! assert_eq!(a.floor().to_array(), [1.0, -3.0, 0.0, 3.0]);
//!
//! let neg = a.cmp_lt(&F64x4::zeros());
//! assert_eq!(neg.bitmask(), 0b0010);
//! assert_eq!(neg.select(-a, a).to_array(), [1.0, 2.5, 0.0, 3.75]);
//! ```

mod mask;
mod ops;


pub use mask::BoolPack;

use core::fmt;
use core::marker::PhantomData;

use crate::simd::SimdScalar;
use crate::traits::{Avx, Sse, Width};

/// 4 × f32 in a 128-bit register.
pub type F32x4 = Pack<f32, Sse>;
/// 2 × f64 in a 128-bit register.
pub type F64x2 = Pack<f64, Sse>;
/// 8 × f32 in a 256-bit register.
pub type F32x8 = Pack<f32, Avx>;
/// 4 × f64 in a 256-bit register.
pub type F64x4 = Pack<f64, Avx>;

/// Mask for [`F32x4`].
pub type B32x4 = BoolPack<f32, Sse>;
/// Mask for [`F64x2`].
pub type B64x2 = BoolPack<f64, Sse>;
/// Mask for [`F32x8`].
pub type B32x8 = BoolPack<f32, Avx>;
/// Mask for [`F64x4`].
pub type B64x4 = BoolPack<f64, Avx>;

/// Errors from the checked slice constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackError {
    /// Slice length differs from the pack's lane count.
    LengthMismatch { expected: usize, found: usize },
}

impl fmt::Display for PackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackError::LengthMismatch { expected, found } => {
                write!(f, "expected {expected} lanes, got a slice of length {found}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PackError {}

/// `LANES` values of `T` held in one register of width class `W`.
#[repr(transparent)]
pub struct Pack<T: SimdScalar<W>, W: Width> {
    reg: T::Reg,
    _width: PhantomData<W>,
}

impl<T: SimdScalar<W>, W: Width> Clone for Pack<T, W> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: SimdScalar<W>, W: Width> Copy for Pack<T, W> {}

impl<T: SimdScalar<W>, W: Width> Default for Pack<T, W> {
    fn default() -> Self {
        Self::zeros()
    }
}

impl<T: SimdScalar<W>, W: Width> fmt::Debug for Pack<T, W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.to_array().as_ref()).finish()
    }
}

impl<T: SimdScalar<W>, W: Width> Pack<T, W> {
    /// Number of lanes.
    pub const LANES: usize = T::LANES;

    /// Wrap a backend register.
    #[inline]
    pub fn from_reg(reg: T::Reg) -> Self {
        Self { reg, _width: PhantomData }
    }

    /// The backend register.
    #[inline]
    pub fn reg(self) -> T::Reg {
        self.reg
    }

    // ── construction ────────────────────────────────────────────────

    /// Every lane set to `x`.
    #[inline]
    pub fn splat(x: T) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::splat(x))
    }

    #[inline]
    pub fn zeros() -> Self {
        Self::splat(T::zero())
    }

    #[inline]
    pub fn ones() -> Self {
        Self::splat(T::one())
    }

    #[inline]
    pub fn from_array(a: T::Array) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::from_array(a))
    }

    /// Lanes from the first `LANES` elements of `s`.
    ///
    /// # Panics
    /// If `s` is shorter than `LANES`.
    #[inline]
    pub fn from_slice(s: &[T]) -> Self {
        assert!(
            s.len() >= T::LANES,
            "Pack::from_slice: need {} elements, got {}",
            T::LANES,
            s.len()
        );
        unsafe { Self::load(s.as_ptr()) }
    }

    /// Lanes from a slice of exactly `LANES` elements.
    pub fn try_from_slice(s: &[T]) -> Result<Self, PackError> {
        if s.len() != T::LANES {
            return Err(PackError::LengthMismatch { expected: T::LANES, found: s.len() });
        }
        Ok(unsafe { Self::load(s.as_ptr()) })
    }

    /// Unaligned load of `LANES` contiguous elements.
    ///
    /// # Safety
    /// `p` must be valid for reading `LANES` elements of `T`.
    #[inline]
    pub unsafe fn load(p: *const T) -> Self {
        Self::from_reg(unsafe { <T as SimdScalar<W>>::load(p) })
    }

    /// Write the lanes to the first `LANES` elements of `out`.
    ///
    /// # Panics
    /// If `out` is shorter than `LANES`.
    #[inline]
    pub fn store(&self, out: &mut [T]) {
        assert!(
            out.len() >= T::LANES,
            "Pack::store: need {} elements, got {}",
            T::LANES,
            out.len()
        );
        unsafe { self.store_ptr(out.as_mut_ptr()) }
    }

    /// Unaligned store of `LANES` contiguous elements.
    ///
    /// # Safety
    /// `p` must be valid for writing `LANES` elements of `T`.
    #[inline]
    pub unsafe fn store_ptr(&self, p: *mut T) {
        unsafe { <T as SimdScalar<W>>::store(self.reg, p) }
    }

    #[inline]
    pub fn to_array(&self) -> T::Array {
        <T as SimdScalar<W>>::to_array(self.reg)
    }

    /// Lane `i`.
    ///
    /// # Panics
    /// If `i >= LANES`.
    #[inline]
    pub fn extract(&self, i: usize) -> T {
        self.to_array().as_ref()[i]
    }

    /// Lane `I`, with the index checked at compile time.
    #[inline]
    pub fn lane<const I: usize>(&self) -> T {
        const { assert!(I < <T as SimdScalar<W>>::LANES, "lane index out of range") };
        self.to_array().as_ref()[I]
    }

    /// Lane 0. Meant for packs known to hold the same value in every lane.
    #[inline]
    pub fn to_scalar(&self) -> T {
        self.lane::<0>()
    }

    // ── elementary operations ───────────────────────────────────────

    #[inline]
    pub fn abs(self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::abs(self.reg))
    }

    /// `a * a`.
    #[inline]
    pub fn sqr(self) -> Self {
        self * self
    }

    /// `a * a * a`.
    #[inline]
    pub fn cube(self) -> Self {
        self * self * self
    }

    /// `(a - b)²`.
    #[inline]
    pub fn diff_sqr(self, b: Self) -> Self {
        (self - b).sqr()
    }

    /// `|a - b|`.
    #[inline]
    pub fn diff_abs(self, b: Self) -> Self {
        (self - b).abs()
    }

    /// Lane-wise `if a < b { a } else { b }`; `b` when either lane is NaN.
    #[inline]
    pub fn min(self, b: Self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::min(self.reg, b.reg))
    }

    /// Lane-wise `if a > b { a } else { b }`; `b` when either lane is NaN.
    #[inline]
    pub fn max(self, b: Self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::max(self.reg, b.reg))
    }

    #[inline]
    pub fn sqrt(self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::sqrt(self.reg))
    }

    /// `1 / a`.
    #[inline]
    pub fn rcp(self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::rcp(self.reg))
    }

    /// `1 / sqrt(a)`.
    #[inline]
    pub fn rsqrt(self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::rsqrt(self.reg))
    }

    /// Hardware reciprocal estimate where one exists (f32 on native
    /// backends, relative error ≤ 1.5·2⁻¹²); exact otherwise.
    #[inline]
    pub fn approx_rcp(self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::approx_rcp(self.reg))
    }

    /// Hardware reciprocal square root estimate where one exists; exact
    /// otherwise.
    #[inline]
    pub fn approx_rsqrt(self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::approx_rsqrt(self.reg))
    }

    /// Sum of all lanes.
    #[inline]
    pub fn hsum(self) -> T {
        <T as SimdScalar<W>>::hsum(self.reg)
    }

    // ── rounding ────────────────────────────────────────────────────

    /// Nearest integer, ties to even.
    #[inline]
    pub fn round(self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::round(self.reg))
    }

    #[inline]
    pub fn floor(self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::floor(self.reg))
    }

    #[inline]
    pub fn ceil(self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::ceil(self.reg))
    }

    #[inline]
    pub fn trunc(self) -> Self {
        Self::from_reg(<T as SimdScalar<W>>::trunc(self.reg))
    }

    // ── comparison ──────────────────────────────────────────────────

    /// Ordered: false on NaN.
    #[inline]
    pub fn cmp_eq(&self, b: &Self) -> BoolPack<T, W> {
        BoolPack::from_mask(<T as SimdScalar<W>>::cmp_eq(self.reg, b.reg))
    }

    /// Unordered: true on NaN.
    #[inline]
    pub fn cmp_ne(&self, b: &Self) -> BoolPack<T, W> {
        BoolPack::from_mask(<T as SimdScalar<W>>::cmp_ne(self.reg, b.reg))
    }

    #[inline]
    pub fn cmp_lt(&self, b: &Self) -> BoolPack<T, W> {
        BoolPack::from_mask(<T as SimdScalar<W>>::cmp_lt(self.reg, b.reg))
    }

    #[inline]
    pub fn cmp_le(&self, b: &Self) -> BoolPack<T, W> {
        BoolPack::from_mask(<T as SimdScalar<W>>::cmp_le(self.reg, b.reg))
    }

    #[inline]
    pub fn cmp_gt(&self, b: &Self) -> BoolPack<T, W> {
        BoolPack::from_mask(<T as SimdScalar<W>>::cmp_gt(self.reg, b.reg))
    }

    #[inline]
    pub fn cmp_ge(&self, b: &Self) -> BoolPack<T, W> {
        BoolPack::from_mask(<T as SimdScalar<W>>::cmp_ge(self.reg, b.reg))
    }

    // ── classification ──────────────────────────────────────────────

    /// Sign bit set: true for `-0.0` and negatively signed NaNs.
    #[inline]
    pub fn is_neg(&self) -> BoolPack<T, W> {
        BoolPack::from_mask(<T as SimdScalar<W>>::is_neg(self.reg))
    }

    #[inline]
    pub fn is_finite(&self) -> BoolPack<T, W> {
        BoolPack::from_mask(<T as SimdScalar<W>>::is_finite(self.reg))
    }

    #[inline]
    pub fn is_inf(&self) -> BoolPack<T, W> {
        BoolPack::from_mask(<T as SimdScalar<W>>::is_inf(self.reg))
    }

    #[inline]
    pub fn is_nan(&self) -> BoolPack<T, W> {
        BoolPack::from_mask(<T as SimdScalar<W>>::is_nan(self.reg))
    }

    // ── lane-wise scalar application ────────────────────────────────

    /// Lane `i` of the result is `f(self[i])`.
    #[inline]
    pub fn map(self, f: impl Fn(T) -> T) -> Self {
        let mut a = self.to_array();
        for x in a.as_mut() {
            *x = f(*x);
        }
        Self::from_array(a)
    }

    /// Lane `i` of the result is `f(self[i], b[i])`.
    #[inline]
    pub fn zip_map(self, b: Self, f: impl Fn(T, T) -> T) -> Self {
        let mut a = self.to_array();
        let b = b.to_array();
        for (x, &y) in a.as_mut().iter_mut().zip(b.as_ref()) {
            *x = f(*x, y);
        }
        Self::from_array(a)
    }
}
