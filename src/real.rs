//! Scalar and block numeric types.
//!
//! `Real` is the build-time-selectable floating point scalar everything in
//! the graph is expressed in. `RealVec` is a fixed-width block of `LANES`
//! `Real`s — the unit every node reads and writes one of per `update`.

use generic_array::GenericArray;
use numeric_array::NumericArray;

// `lanes4` is in the default feature set, so testing an alternate lane
// count means `cargo test --no-default-features --features lanes2` (or
// `lanes8`), not just `--features lanes2` on top of the defaults.
#[cfg(all(feature = "lanes2", feature = "lanes8"))]
compile_error!("choose at most one of the `lanes2`/`lanes4`/`lanes8` features");
#[cfg(all(feature = "lanes2", feature = "lanes4"))]
compile_error!("choose at most one of the `lanes2`/`lanes4`/`lanes8` features");
#[cfg(all(feature = "lanes4", feature = "lanes8"))]
compile_error!("choose at most one of the `lanes2`/`lanes4`/`lanes8` features");

#[cfg(feature = "f32")]
/// Build-time scalar type. Enable the `f32` feature to use single precision;
/// double precision (the default) matches the original `DOUBLE_PRECISION`
/// build switch.
pub type Real = f32;
#[cfg(not(feature = "f32"))]
/// Build-time scalar type. Enable the `f32` feature to use single precision;
/// double precision (the default) matches the original `DOUBLE_PRECISION`
/// build switch.
pub type Real = f64;

/// A pair (real, imag) of [`Real`].
pub type Complex = num_complex::Complex<Real>;

#[cfg(feature = "lanes2")]
/// Number of samples processed per block (the SIMD lane count `W`).
pub const LANES: usize = 2;
#[cfg(feature = "lanes8")]
/// Number of samples processed per block (the SIMD lane count `W`).
pub const LANES: usize = 8;
#[cfg(not(any(feature = "lanes2", feature = "lanes8")))]
/// Number of samples processed per block (the SIMD lane count `W`).
pub const LANES: usize = 4;

#[cfg(feature = "lanes2")]
pub type LaneCount = generic_array::typenum::U2;
#[cfg(feature = "lanes8")]
pub type LaneCount = generic_array::typenum::U8;
#[cfg(not(any(feature = "lanes2", feature = "lanes8")))]
pub type LaneCount = generic_array::typenum::U4;

/// A block of [`LANES`] [`Real`] samples, one per lane.
///
/// Supports elementwise arithmetic for free via [`numeric_array::NumericArray`];
/// this is the structural stand-in for the original's pointer-aligned SIMD
/// register, since this crate has no raw-pointer aligned allocator.
pub type RealVec = NumericArray<Real, LaneCount>;

/// Build a [`RealVec`] by evaluating `f` at each lane index.
pub fn from_fn(mut f: impl FnMut(usize) -> Real) -> RealVec {
    let array: GenericArray<Real, LaneCount> = GenericArray::generate(|i| f(i));
    NumericArray::new(array)
}

/// A [`RealVec`] whose every lane is zero.
pub fn zero() -> RealVec {
    from_fn(|_| 0.0)
}

/// A [`RealVec`] whose every lane holds the same value.
pub fn splat(value: Real) -> RealVec {
    from_fn(|_| value)
}

/// `sin(pi * x)`, elementwise.
pub fn sinpi(v: RealVec) -> RealVec {
    from_fn(|i| (core::f64::consts::PI as Real * v[i]).sin())
}

/// `cos(pi * x)`, elementwise.
pub fn cospi(v: RealVec) -> RealVec {
    from_fn(|i| (core::f64::consts::PI as Real * v[i]).cos())
}

/// `(cos(pi * x), sin(pi * x))`, elementwise, computed together.
pub fn sincospi(v: RealVec) -> (RealVec, RealVec) {
    (cospi(v), sinpi(v))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lanes_matches_feature_default() {
        assert_eq!(LANES, 4);
        assert_eq!(RealVec::default().len(), LANES);
    }

    #[test]
    fn sincospi_matches_unit_circle() {
        let v = from_fn(|i| i as Real * 0.5);
        let (c, s) = sincospi(v);
        assert!((c[0] - 1.0).abs() < 1e-9);
        assert!((s[0] - 0.0).abs() < 1e-9);
        assert!((c[1] - 0.0).abs() < 1e-9);
        assert!((s[1] - 1.0).abs() < 1e-9);
    }
}
