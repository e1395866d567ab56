use super::*;
use crate::traits::lanes_of;
use num_traits::Float;

fn c<T: Float>(x: f64) -> T {
    T::from(x).unwrap()
}

fn reg<T: SimdScalar<W>, W: Width>(f: impl Fn(usize) -> f64) -> T::Reg {
    let mut a = T::Array::default();
    for (i, x) in a.as_mut().iter_mut().enumerate() {
        *x = c(f(i));
    }
    <T as SimdScalar<W>>::from_array(a)
}

fn lanes<T: SimdScalar<W>, W: Width>(r: T::Reg) -> Vec<f64> {
    <T as SimdScalar<W>>::to_array(r).as_ref().iter().map(|x| x.to_f64().unwrap()).collect()
}

fn bits_of(v: &[bool]) -> u32 {
    v.iter().enumerate().fold(0, |acc, (i, &b)| acc | ((b as u32) << i))
}

// Lane patterns cycle through these, so every width sees every case.
const SPECIALS: [f64; 8] = [
    -0.0,
    1.5,
    f64::INFINITY,
    f64::NAN,
    -3.0,
    f64::NEG_INFINITY,
    0.0,
    f64::MIN_POSITIVE,
];

fn check_lane_count<T: SimdScalar<W>, W: Width>() {
    assert_eq!(T::LANES, lanes_of::<T, W>());
    assert_eq!(T::Array::default().as_ref().len(), T::LANES);
}

fn check_arith<T: SimdScalar<W>, W: Width>() {
    let a = reg::<T, W>(|i| i as f64 + 1.0);
    let b = reg::<T, W>(|i| 0.5 * i as f64 - 1.25);
    let n = T::LANES;

    let sum = lanes::<T, W>(<T as SimdScalar<W>>::add(a, b));
    let diff = lanes::<T, W>(<T as SimdScalar<W>>::sub(a, b));
    let prod = lanes::<T, W>(<T as SimdScalar<W>>::mul(a, b));
    let quot = lanes::<T, W>(<T as SimdScalar<W>>::div(a, b));
    for i in 0..n {
        let (x, y) = (i as f64 + 1.0, 0.5 * i as f64 - 1.25);
        assert_eq!(sum[i], x + y);
        assert_eq!(diff[i], x - y);
        assert_eq!(prod[i], x * y);
        assert!((quot[i] - x / y).abs() <= 1e-6 * (x / y).abs());
    }

    let neg = lanes::<T, W>(<T as SimdScalar<W>>::neg(b));
    let abs = lanes::<T, W>(<T as SimdScalar<W>>::abs(b));
    for i in 0..n {
        let y = 0.5 * i as f64 - 1.25;
        assert_eq!(neg[i], -y);
        assert_eq!(abs[i], y.abs());
    }

    // exact sign handling on zeros
    let zero = <T as SimdScalar<W>>::splat(T::zero());
    let z = <T as SimdScalar<W>>::to_array(<T as SimdScalar<W>>::neg(zero));
    assert!(z.as_ref().iter().all(|x| x.is_sign_negative()));
    let neg_zero = <T as SimdScalar<W>>::splat(-T::zero());
    let z = <T as SimdScalar<W>>::to_array(<T as SimdScalar<W>>::abs(neg_zero));
    assert!(z.as_ref().iter().all(|x| x.is_sign_positive()));
}

fn check_roots<T: SimdScalar<W>, W: Width>() {
    let a = reg::<T, W>(|i| (i as f64 + 1.0) * 4.0);
    let sq = lanes::<T, W>(<T as SimdScalar<W>>::sqrt(a));
    let rc = lanes::<T, W>(<T as SimdScalar<W>>::rcp(a));
    let rs = lanes::<T, W>(<T as SimdScalar<W>>::rsqrt(a));
    let arc = lanes::<T, W>(<T as SimdScalar<W>>::approx_rcp(a));
    let ars = lanes::<T, W>(<T as SimdScalar<W>>::approx_rsqrt(a));
    for i in 0..T::LANES {
        let x = (i as f64 + 1.0) * 4.0;
        assert!((sq[i] - x.sqrt()).abs() <= 1e-6 * x.sqrt());
        assert!((rc[i] - 1.0 / x).abs() <= 1e-6 / x);
        assert!((rs[i] - 1.0 / x.sqrt()).abs() <= 1e-6 / x.sqrt());
        // hardware estimates guarantee 1.5 * 2^-12 relative error
        assert!((arc[i] * x - 1.0).abs() <= 4e-4);
        assert!((ars[i] * x.sqrt() - 1.0).abs() <= 4e-4);
    }
}

fn check_min_max<T: SimdScalar<W>, W: Width>() {
    let a = reg::<T, W>(|i| if i % 2 == 0 { 1.0 } else { f64::NAN });
    let b = reg::<T, W>(|i| if i % 2 == 0 { f64::NAN } else { 2.0 });
    let lo = lanes::<T, W>(<T as SimdScalar<W>>::min(a, b));
    let hi = lanes::<T, W>(<T as SimdScalar<W>>::max(a, b));
    for i in 0..T::LANES {
        // second operand on NaN
        if i % 2 == 0 {
            assert!(lo[i].is_nan() && hi[i].is_nan());
        } else {
            assert_eq!(lo[i], 2.0);
            assert_eq!(hi[i], 2.0);
        }
    }

    let a = reg::<T, W>(|i| i as f64 - 1.0);
    let b = reg::<T, W>(|i| 2.0 - i as f64);
    let lo = lanes::<T, W>(<T as SimdScalar<W>>::min(a, b));
    let hi = lanes::<T, W>(<T as SimdScalar<W>>::max(a, b));
    for i in 0..T::LANES {
        let (x, y) = (i as f64 - 1.0, 2.0 - i as f64);
        assert_eq!(lo[i], x.min(y));
        assert_eq!(hi[i], x.max(y));
    }
}

fn check_rounding<T: SimdScalar<W>, W: Width>() {
    let input = [0.5, 1.5, 2.5, -2.5, -0.4, 2.7, -3.5, 7.0];
    let a = reg::<T, W>(|i| input[i % 8]);
    let round = lanes::<T, W>(<T as SimdScalar<W>>::round(a));
    let floor = lanes::<T, W>(<T as SimdScalar<W>>::floor(a));
    let ceil = lanes::<T, W>(<T as SimdScalar<W>>::ceil(a));
    let trunc = lanes::<T, W>(<T as SimdScalar<W>>::trunc(a));
    let even = [0.0, 2.0, 2.0, -2.0, -0.0, 3.0, -4.0, 7.0];
    for i in 0..T::LANES {
        let x = input[i % 8];
        assert_eq!(round[i], even[i % 8], "round({x})");
        assert_eq!(floor[i], x.floor(), "floor({x})");
        assert_eq!(ceil[i], x.ceil(), "ceil({x})");
        assert_eq!(trunc[i], x.trunc(), "trunc({x})");
    }
}

// Signed zeros, values at the edge of the integral range, and non-finite
// lanes, each checked bitwise so a lost sign shows up.
const ROUNDING_EDGES: [f64; 12] = [
    -0.0,
    -0.3,
    -0.7,
    0.7,
    8388607.5,
    -8388609.0,
    4503599627370495.5,
    -1e30,
    f64::INFINITY,
    f64::NEG_INFINITY,
    f64::NAN,
    -2.5,
];

fn check_rounding_edges<T: SimdScalar<W>, W: Width>() {
    let n = ROUNDING_EDGES.len();
    for off in (0..n).step_by(T::LANES) {
        let x = |i: usize| ROUNDING_EDGES[(off + i) % n];
        let a = reg::<T, W>(x);
        let ops: [(&str, fn(T::Reg) -> T::Reg, fn(f64) -> f64); 4] = [
            ("round", <T as SimdScalar<W>>::round, f64::round_ties_even),
            ("floor", <T as SimdScalar<W>>::floor, f64::floor),
            ("ceil", <T as SimdScalar<W>>::ceil, f64::ceil),
            ("trunc", <T as SimdScalar<W>>::trunc, f64::trunc),
        ];
        for (name, op, scalar) in ops {
            let got = lanes::<T, W>(op(a));
            for (i, g) in got.iter().enumerate() {
                // the lane as stored in T, widened exactly
                let v = c::<T>(x(i)).to_f64().unwrap();
                let want = scalar(v);
                if want.is_nan() {
                    assert!(g.is_nan(), "{name}({v}) = {g}");
                } else {
                    assert_eq!(g.to_bits(), want.to_bits(), "{name}({v}) = {g}, want {want}");
                }
            }
        }
    }
}

fn check_compare<T: SimdScalar<W>, W: Width>() {
    let av = [1.0, 2.0, f64::NAN, 3.0, -1.0, 0.0, f64::NAN, 5.0];
    let bv = [1.0, 1.0, 1.0, 4.0, -1.0, -0.0, f64::NAN, 6.0];
    let a = reg::<T, W>(|i| av[i % 8]);
    let b = reg::<T, W>(|i| bv[i % 8]);
    let n = T::LANES;
    let expect = |f: fn(f64, f64) -> bool| -> u32 {
        bits_of(&(0..n).map(|i| f(av[i % 8], bv[i % 8])).collect::<Vec<_>>())
    };
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::cmp_eq(a, b)), expect(|x, y| x == y));
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::cmp_ne(a, b)), expect(|x, y| x != y));
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::cmp_lt(a, b)), expect(|x, y| x < y));
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::cmp_le(a, b)), expect(|x, y| x <= y));
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::cmp_gt(a, b)), expect(|x, y| x > y));
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::cmp_ge(a, b)), expect(|x, y| x >= y));
}

fn check_classify<T: SimdScalar<W>, W: Width>() {
    let a = reg::<T, W>(|i| SPECIALS[i % 8]);
    let n = T::LANES;
    let expect = |f: fn(f64) -> bool| -> u32 {
        bits_of(&(0..n).map(|i| f(SPECIALS[i % 8])).collect::<Vec<_>>())
    };
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::is_neg(a)), expect(|x| x.is_sign_negative()));
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::is_finite(a)), expect(f64::is_finite));
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::is_inf(a)), expect(f64::is_infinite));
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::is_nan(a)), expect(f64::is_nan));
}

fn check_masks<T: SimdScalar<W>, W: Width>() {
    let n = T::LANES;
    let full = (1u32 << n) - 1;
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::mask_splat(true)), full);
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::mask_splat(false)), 0);

    let even = <T as SimdScalar<W>>::mask_from_fn(|i| i % 2 == 0);
    let low = <T as SimdScalar<W>>::mask_from_fn(|i| i < n / 2);
    let even_bits = bits_of(&(0..n).map(|i| i % 2 == 0).collect::<Vec<_>>());
    let low_bits = bits_of(&(0..n).map(|i| i < n / 2).collect::<Vec<_>>());
    assert_eq!(<T as SimdScalar<W>>::mask_bits(even), even_bits);
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::mask_not(even)), !even_bits & full);
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::mask_and(even, low)), even_bits & low_bits);
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::mask_or(even, low)), even_bits | low_bits);
    assert_eq!(<T as SimdScalar<W>>::mask_bits(<T as SimdScalar<W>>::mask_xor(even, low)), even_bits ^ low_bits);

    let a = reg::<T, W>(|i| i as f64);
    let b = reg::<T, W>(|i| -(i as f64) - 10.0);
    let picked = lanes::<T, W>(<T as SimdScalar<W>>::select(even, a, b));
    for i in 0..n {
        let want = if i % 2 == 0 { i as f64 } else { -(i as f64) - 10.0 };
        assert_eq!(picked[i], want);
    }
}

fn check_memory<T: SimdScalar<W>, W: Width>() {
    let n = T::LANES;
    let src: Vec<T> = (0..n + 3).map(|i| c(i as f64 * 0.25)).collect();
    // deliberately misaligned
    let r = unsafe { <T as SimdScalar<W>>::load(src.as_ptr().add(1)) };
    let got = lanes::<T, W>(r);
    for i in 0..n {
        assert_eq!(got[i], (i + 1) as f64 * 0.25);
    }

    let mut dst = vec![T::zero(); n + 2];
    unsafe { <T as SimdScalar<W>>::store(r, dst.as_mut_ptr().add(1)) };
    assert_eq!(dst[0], T::zero());
    assert_eq!(dst[n + 1], T::zero());
    assert_eq!(&dst[1..=n], &src[1..=n]);

    let total = <T as SimdScalar<W>>::hsum(reg::<T, W>(|i| i as f64 + 1.0)).to_f64().unwrap();
    assert_eq!(total, (n * (n + 1) / 2) as f64);
}

macro_rules! backend_tests {
    ($name:ident, $t:ty, $w:ty) => {
        mod $name {
            use super::*;

            #[test]
            fn lane_count() {
                check_lane_count::<$t, $w>();
            }

            #[test]
            fn arithmetic() {
                check_arith::<$t, $w>();
            }

            #[test]
            fn roots_and_reciprocals() {
                check_roots::<$t, $w>();
            }

            #[test]
            fn min_max() {
                check_min_max::<$t, $w>();
            }

            #[test]
            fn rounding() {
                check_rounding::<$t, $w>();
            }

            #[test]
            fn rounding_edges() {
                check_rounding_edges::<$t, $w>();
            }

            #[test]
            fn compare() {
                check_compare::<$t, $w>();
            }

            #[test]
            fn classify() {
                check_classify::<$t, $w>();
            }

            #[test]
            fn masks_and_select() {
                check_masks::<$t, $w>();
            }

            #[test]
            fn load_store_hsum() {
                check_memory::<$t, $w>();
            }
        }
    };
}

backend_tests!(f32_sse, f32, Sse);
backend_tests!(f64_sse, f64, Sse);
backend_tests!(f32_avx, f32, Avx);
backend_tests!(f64_avx, f64, Avx);

// =====================================================================
// halves
// =====================================================================

fn check_halves<T: Halves>() {
    let n = <T as SimdScalar<Avx>>::LANES;
    let h = <T as SimdScalar<Sse>>::LANES;
    assert_eq!(n, 2 * h);

    let mut full = <T as SimdScalar<Avx>>::Array::default();
    for (i, x) in full.as_mut().iter_mut().enumerate() {
        *x = c(i as f64);
    }
    let (lo, hi) = T::split(<T as SimdScalar<Avx>>::from_array(full));
    let lo = <T as SimdScalar<Sse>>::to_array(lo);
    let hi = <T as SimdScalar<Sse>>::to_array(hi);
    assert_eq!(lo.as_ref(), &full.as_ref()[..h]);
    assert_eq!(hi.as_ref(), &full.as_ref()[h..]);

    let m = T::combine_mask(
        <T as SimdScalar<Sse>>::mask_splat(true),
        <T as SimdScalar<Sse>>::mask_from_fn(|i| i == 0),
    );
    let want = ((1u32 << h) - 1) | (1 << h);
    assert_eq!(<T as SimdScalar<Avx>>::mask_bits(m), want);

    // is_inf only in the high half
    let mut v = <T as SimdScalar<Avx>>::Array::default();
    v.as_mut()[n - 1] = T::infinity();
    let m = split_apply_combine::<T>(
        <T as SimdScalar<Avx>>::from_array(v),
        <T as SimdScalar<Sse>>::is_inf,
    );
    assert_eq!(<T as SimdScalar<Avx>>::mask_bits(m), 1 << (n - 1));

    // NaNs of either sign, one per half
    let mut v = <T as SimdScalar<Avx>>::Array::default();
    v.as_mut()[0] = T::nan();
    v.as_mut()[h] = -T::nan();
    v.as_mut()[n - 1] = T::infinity();
    let m = <T as SimdScalar<Avx>>::is_nan(<T as SimdScalar<Avx>>::from_array(v));
    assert_eq!(<T as SimdScalar<Avx>>::mask_bits(m), 1 | (1 << h));
}

#[test]
fn halves_f32() {
    check_halves::<f32>();
}

#[test]
fn halves_f64() {
    check_halves::<f64>();
}

#[test]
fn strategy_matches_build() {
    let sse_native = cfg!(target_arch = "x86_64");
    let avx_native = cfg!(all(target_arch = "x86_64", target_feature = "avx"));
    let expect = |native: bool| if native { Strategy::Native } else { Strategy::Emulated };
    assert_eq!(<f32 as SimdScalar<Sse>>::STRATEGY, expect(sse_native));
    assert_eq!(<f64 as SimdScalar<Sse>>::STRATEGY, expect(sse_native));
    assert_eq!(<f32 as SimdScalar<Avx>>::STRATEGY, expect(avx_native));
    assert_eq!(<f64 as SimdScalar<Avx>>::STRATEGY, expect(avx_native));
}
