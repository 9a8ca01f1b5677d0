//! Windowed-sinc low-pass coefficient synthesis (SPEC_FULL.md §4.9).

use crate::fir::ScalarFir;
use crate::node::OutputKind;
use crate::real::Real;
use crate::window;

fn sinc(z: Real) -> Real {
    if z == 0.0 {
        1.0
    } else {
        (core::f64::consts::PI as Real * z).sin() / (core::f64::consts::PI as Real * z)
    }
}

fn ideal_response(cutoff_norm: Real, x: Real) -> Real {
    2.0 * cutoff_norm * sinc(2.0 * cutoff_norm * x)
}

/// Generate `taps` windowed-sinc low-pass coefficients for a cutoff of
/// `cutoff_frequency` Hz at `sample_rate` Hz, weighted by `window`.
pub fn coefficients(
    sample_rate: Real,
    cutoff_frequency: Real,
    taps: usize,
    window: impl Fn(Real) -> Real,
) -> Vec<Real> {
    let cutoff_norm = cutoff_frequency / sample_rate;
    (0..taps)
        .map(|k| {
            let w = window(k as Real / (taps - 1) as Real);
            let centered = k as Real - (taps - 1) as Real / 2.0;
            w * ideal_response(cutoff_norm, centered)
        })
        .collect()
}

/// Build a REAL low-pass FIR node. `taps` plays the role of the original's
/// static-vs-dynamic distinction: callers that know the tap count at
/// compile time can pass a `const` in scope, callers that don't can pass a
/// runtime value — the implementation is identical either way.
pub fn new_real(
    sample_rate: Real,
    cutoff_frequency: Real,
    taps: usize,
    window: impl Fn(Real) -> Real,
) -> ScalarFir {
    ScalarFir::new_real(sample_rate, coefficients(sample_rate, cutoff_frequency, taps, window))
}

/// Build a COMPLEX low-pass FIR node.
pub fn new_complex(
    sample_rate: Real,
    cutoff_frequency: Real,
    taps: usize,
    window: impl Fn(Real) -> Real,
) -> ScalarFir {
    ScalarFir::new_complex(sample_rate, coefficients(sample_rate, cutoff_frequency, taps, window))
}

/// Build a low-pass FIR node with [`window::rectangular`] weighting (the
/// original's default window function).
pub fn new_rectangular(sample_rate: Real, cutoff_frequency: Real, taps: usize, kind: OutputKind) -> ScalarFir {
    match kind {
        OutputKind::Real => new_real(sample_rate, cutoff_frequency, taps, window::rectangular),
        OutputKind::Complex => new_complex(sample_rate, cutoff_frequency, taps, window::rectangular),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coefficients_are_symmetric() {
        let c = coefficients(48000.0, 4000.0, 9, window::hann);
        for i in 0..c.len() {
            assert!((c[i] - c[c.len() - 1 - i]).abs() < 1e-9);
        }
    }

    #[test]
    fn dc_gain_is_near_unity_for_wide_cutoff() {
        let c = coefficients(48000.0, 20000.0, 63, window::hamming);
        let dc_gain: Real = c.iter().sum();
        assert!((dc_gain - 1.0).abs() < 0.05);
    }
}
