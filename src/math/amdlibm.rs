//! AMD LIBM bindings.
//!
//! AMD's vector entry points cover the exponential and logarithmic
//! families, `pow`, `cbrt` and the circular functions; everything else keeps
//! the emulated default. Symbol scheme: `amd_vrs4_<name>f`,
//! `amd_vrd2_<name>`, `amd_vrs8_<name>f`, `amd_vrd4_<name>`. Link against
//! `libalm`.

macro_rules! amd_libm {
    (#[$cfg:meta] mod $m:ident: $t:ty, $w:ident, $reg:ident; $pre:literal, $suf:literal) => {
        external_math! {
            #[$cfg]
            mod $m: $t, $w, $reg;
            link "alm", $pre, $suf;
            unary [
                exp / EXP, exp2 / EXP2, exp10 / EXP10, expm1 / EXPM1,
                log / LOG, log2 / LOG2, log10 / LOG10, log1p / LOG1P,
                sin / SIN, cos / COS, tan / TAN, cbrt / CBRT,
            ]
            binary [pow / POW]
        }
    };
}

amd_libm!(#[cfg(target_arch = "x86_64")] mod f32x4: f32, Sse, __m128; "amd_vrs4_", "f");
amd_libm!(#[cfg(target_arch = "x86_64")] mod f64x2: f64, Sse, __m128d; "amd_vrd2_", "");
amd_libm!(#[cfg(all(target_arch = "x86_64", target_feature = "avx"))] mod f32x8: f32, Avx, __m256; "amd_vrs8_", "f");
amd_libm!(#[cfg(all(target_arch = "x86_64", target_feature = "avx"))] mod f64x4: f64, Avx, __m256d; "amd_vrd4_", "");
