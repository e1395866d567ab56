use simdpack::{
    math, reduce, Avx, B32x4, B64x4, BoolPack, Caps, F32x4, F32x8, F64x2, F64x4, Pack, PackError,
    PackMath, SimdScalar, Sse, Strategy, Width,
};

const TOL: f64 = 1e-12;

fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
    assert!((a - b).abs() <= tol * b.abs().max(1.0), "{msg}: {a} vs {b}");
}

// ── Concrete scenarios ───────────────────────────────────────────────

#[test]
fn f64x4_abs_floor_ceil() {
    let a = F64x4::from_array([1.0, -2.5, 0.0, 3.75]);
    assert_eq!(a.abs().to_array(), [1.0, 2.5, 0.0, 3.75]);
    assert_eq!(a.floor().to_array(), [1.0, -3.0, 0.0, 3.0]);
    assert_eq!(a.ceil().to_array(), [1.0, -2.0, 0.0, 4.0]);
}

#[test]
fn nan_lane_against_itself() {
    let a = F64x4::from_array([1.0, f64::NAN, -7.0, 0.0]);
    let eq = a.cmp_eq(&a);
    let ne = a.cmp_ne(&a);
    assert_eq!(eq.iter().collect::<Vec<_>>(), [true, false, true, true]);
    assert_eq!(ne.iter().collect::<Vec<_>>(), [false, true, false, false]);

    let b = F32x8::from_array([f32::NAN, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, f32::NAN]);
    assert_eq!(b.cmp_eq(&b).bitmask(), 0b0111_1110);
    assert_eq!(b.cmp_ne(&b).bitmask(), 0b1000_0001);
}

#[test]
fn lane_parallel_sum_over_prefixes() {
    let xs: Vec<f64> = (0..48).map(|i| ((i * 37) % 11) as f64 * 0.1 - 0.3).collect();
    for k in 0..=48 {
        let mut seq = 0.0;
        for &x in &xs[..k] {
            seq += x;
        }
        assert_near(reduce::sum::<Avx, _>(&xs[..k]), seq, TOL, "avx sum");
        assert_near(reduce::sum::<Sse, _>(&xs[..k]), seq, TOL, "sse sum");
    }
}

// ── Generic properties, every (type, width) pair ─────────────────────

fn bool_eq_ne<T: SimdScalar<W>, W: Width>() {
    let n = T::LANES;
    for x in 0u32..(1 << n) {
        let a: Vec<bool> = (0..n).map(|i| (x >> i) & 1 != 0).collect();
        let b: Vec<bool> = (0..n).map(|i| (x >> ((i + 1) % n)) & 1 == 0).collect();
        let (a, b) = (BoolPack::<T, W>::new(&a), BoolPack::<T, W>::new(&b));
        assert_eq!(a.cmp_eq(&b), !a.cmp_ne(&b));
    }
}

#[test]
fn bool_eq_is_complement_of_ne() {
    bool_eq_ne::<f32, Sse>();
    bool_eq_ne::<f64, Sse>();
    bool_eq_ne::<f32, Avx>();
    bool_eq_ne::<f64, Avx>();
}

fn xlogy_properties<T: PackMath<W>, W: Width>() {
    let n = T::LANES;
    let vals: Vec<T> = (0..n).map(|i| T::from(0.3 + 1.7 * i as f64).unwrap()).collect();
    let a = Pack::<T, W>::from_slice(&vals);
    assert_eq!(
        math::xlogy(a, a).to_array().as_ref(),
        math::xlogx(a).to_array().as_ref()
    );

    let zero = Pack::<T, W>::zeros();
    for b in [0.0, -1.0, 2.0, f64::INFINITY] {
        let b = Pack::<T, W>::splat(T::from(b).unwrap());
        assert!(math::xlogy(zero, b).cmp_eq(&zero).all());
    }

    // non-positive a never leaks a sign or a NaN from 0 · ln(b)
    let b = Pack::<T, W>::splat(T::from(2.0).unwrap());
    for a in [f64::NEG_INFINITY, -1.0, -0.0] {
        let r = math::xlogy(Pack::<T, W>::splat(T::from(a).unwrap()), b);
        assert!(r.cmp_eq(&zero).all());
        assert!(!r.is_neg().any(), "xlogy({a}, 2) carries a sign bit");
    }
}

#[test]
fn xlogy_at_zero_and_xlogx_identity() {
    xlogy_properties::<f32, Sse>();
    xlogy_properties::<f64, Sse>();
    xlogy_properties::<f32, Avx>();
    xlogy_properties::<f64, Avx>();
}

#[test]
fn emulated_math_is_bit_exact() {
    let xs = [0.1_f64, 0.7, 1.3, 2.9];
    let p = F64x4::from_array(xs);
    let got = math::sin(p).to_array();
    if <f64 as PackMath<Avx>>::SIN == Strategy::Emulated {
        for (g, x) in got.iter().zip(xs) {
            assert_eq!(g.to_bits(), x.sin().to_bits());
        }
    }
    let got = math::log1p(F32x4::from_array([0.0, 1e-7, 0.5, 3.0])).to_array();
    if <f32 as PackMath<Sse>>::LOG1P == Strategy::Emulated {
        for (g, x) in got.iter().zip([0.0_f32, 1e-7, 0.5, 3.0]) {
            assert_eq!(g.to_bits(), x.ln_1p().to_bits());
        }
    }
}

#[test]
fn rounding_brackets_value() {
    for k in -40..40 {
        let x = k as f64 * 0.37;
        let p = F64x2::from_array([x, -x]);
        for i in 0..2 {
            let v = p.extract(i);
            assert!(p.floor().extract(i) <= v && v <= p.ceil().extract(i));
            let t = p.trunc().extract(i);
            assert!(t == 0.0 || t.signum() == v.signum());
        }
    }
}

// ── API surface ───────────────────────────────────────────────────────

#[test]
fn mask_select_clamps_negatives() {
    let a = F32x4::from_array([-1.0, 2.0, -3.0, 4.0]);
    let clamped = a.is_neg().select(F32x4::zeros(), a);
    assert_eq!(clamped.to_array(), [0.0, 2.0, 0.0, 4.0]);

    let m: B32x4 = a.cmp_gt(&F32x4::splat(1.0)) | a.cmp_lt(&F32x4::splat(-2.0));
    assert_eq!(m.bitmask(), 0b1110);
}

#[test]
fn checked_constructors() {
    assert_eq!(
        F32x8::try_from_slice(&[1.0; 5]).unwrap_err(),
        PackError::LengthMismatch { expected: 8, found: 5 }
    );
    assert!(B64x4::try_new(&[true; 4]).is_ok());
    let err: Box<dyn std::error::Error> = Box::new(PackError::LengthMismatch { expected: 2, found: 0 });
    assert!(err.to_string().contains("expected 2"));
}

#[test]
fn caps_describe_the_build() {
    let avx = cfg!(all(target_arch = "x86_64", target_feature = "avx"));
    assert_eq!(Caps::<f32, Avx>::ADD, avx);
    assert_eq!(Caps::<f64, Avx>::FLOOR, avx);
    assert_eq!(Caps::<f64, Avx>::XLOGX, Caps::<f64, Avx>::LOG);
    // the 128-bit backends need nothing beyond baseline x86_64
    let sse = cfg!(target_arch = "x86_64");
    assert_eq!(Caps::<f32, Sse>::ROUND, sse);
    assert_eq!(Caps::<f64, Sse>::TRUNC, sse);
    if !cfg!(any(feature = "svml", feature = "amd-libm")) {
        assert!(!Caps::<f64, Sse>::EXP);
        assert!(!Caps::<f32, Avx>::CDFNORMINV);
    }
}
