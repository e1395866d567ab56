//! Operator overloads for [`Pack`].

use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::Pack;
use crate::simd::SimdScalar;
use crate::traits::Width;

macro_rules! impl_pack_binop {
    ($Op:ident, $op:ident, $OpAssign:ident, $op_assign:ident) => {
        impl<T: SimdScalar<W>, W: Width> $Op for Pack<T, W> {
            type Output = Self;

            #[inline]
            fn $op(self, rhs: Self) -> Self {
                Pack::from_reg(<T as SimdScalar<W>>::$op(self.reg(), rhs.reg()))
            }
        }

        impl<T: SimdScalar<W>, W: Width> $OpAssign for Pack<T, W> {
            #[inline]
            fn $op_assign(&mut self, rhs: Self) {
                *self = $Op::$op(*self, rhs);
            }
        }
    };
}

impl_pack_binop!(Add, add, AddAssign, add_assign);
impl_pack_binop!(Sub, sub, SubAssign, sub_assign);
impl_pack_binop!(Mul, mul, MulAssign, mul_assign);
impl_pack_binop!(Div, div, DivAssign, div_assign);

/// Flips the sign bit: `-(0.0)` is `-0.0`, NaN payloads are kept.
impl<T: SimdScalar<W>, W: Width> Neg for Pack<T, W> {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Pack::from_reg(<T as SimdScalar<W>>::neg(self.reg()))
    }
}
