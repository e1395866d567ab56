//! Intel SVML bindings.
//!
//! Symbol scheme: `__svml_<name>f4` (4×f32), `__svml_<name>2` (2×f64),
//! `__svml_<name>f8` (8×f32), `__svml_<name>4` (4×f64). Link against
//! `libsvml` (shipped with the Intel compilers and oneAPI).

macro_rules! svml {
    (#[$cfg:meta] mod $m:ident: $t:ty, $w:ident, $reg:ident; $suf:literal) => {
        external_math! {
            #[$cfg]
            mod $m: $t, $w, $reg;
            link "svml", "__svml_", $suf;
            unary [
                exp / EXP, log / LOG, log10 / LOG10,
                sin / SIN, cos / COS, tan / TAN,
                asin / ASIN, acos / ACOS, atan / ATAN,
                sinh / SINH, cosh / COSH, tanh / TANH,
                cbrt / CBRT, exp2 / EXP2, log2 / LOG2,
                expm1 / EXPM1, log1p / LOG1P,
                asinh / ASINH, acosh / ACOSH, atanh / ATANH,
                erf / ERF, erfc / ERFC, exp10 / EXP10,
                cdfnorm / CDFNORM, cdfnorminv / CDFNORMINV,
            ]
            binary [pow / POW, atan2 / ATAN2, hypot / HYPOT]
        }
    };
}

svml!(#[cfg(target_arch = "x86_64")] mod f32x4: f32, Sse, __m128; "f4");
svml!(#[cfg(target_arch = "x86_64")] mod f64x2: f64, Sse, __m128d; "2");
svml!(#[cfg(all(target_arch = "x86_64", target_feature = "avx"))] mod f32x8: f32, Avx, __m256; "f8");
svml!(#[cfg(all(target_arch = "x86_64", target_feature = "avx"))] mod f64x4: f64, Avx, __m256d; "4");
