//! Discrete FIR convolution (SPEC_FULL.md §4.8).
//!
//! [`ScalarFir`] is the circular-buffer reference implementation.
//! [`SimdFir`] computes the identical convolution but vectorizes each
//! sample's dot product over [`RealVec`]-wide chunks of the coefficient
//! and delay-line storage (SPEC_FULL.md §4.8.2 / Open Question 2) instead
//! of the original's rotated coefficient-bank scheme, and implements the
//! COMPLEX path the original left an unimplemented stub.

use std::collections::VecDeque;

use crate::error::NodeError;
use crate::node::{Graph, InputRef, Node, Output, OutputKind};
use crate::real::{Real, RealVec, LANES};

/// One REAL delay line, or two (real/imaginary) for COMPLEX input.
enum Delay {
    Real(VecDeque<Real>),
    Complex(VecDeque<Real>, VecDeque<Real>),
}

impl Delay {
    fn new(kind: OutputKind, len: usize) -> Self {
        match kind {
            OutputKind::Real => Delay::Real(VecDeque::from(vec![0.0; len])),
            OutputKind::Complex => Delay::Complex(
                VecDeque::from(vec![0.0; len]),
                VecDeque::from(vec![0.0; len]),
            ),
        }
    }

    fn reset(&mut self) {
        match self {
            Delay::Real(d) => d.iter_mut().for_each(|x| *x = 0.0),
            Delay::Complex(re, im) => {
                re.iter_mut().for_each(|x| *x = 0.0);
                im.iter_mut().for_each(|x| *x = 0.0);
            }
        }
    }
}

#[inline]
fn push(delay: &mut VecDeque<Real>, x: Real) {
    delay.push_back(x);
    delay.pop_front();
}

#[inline]
fn dot_scalar(delay: &VecDeque<Real>, coeffs_rev: &[Real]) -> Real {
    delay.iter().zip(coeffs_rev.iter()).map(|(d, c)| d * c).sum()
}

/// Dot product of `delay` (length a multiple of `LANES`) against
/// `coeffs_rev`, walked `LANES` elements at a time through [`RealVec`]
/// multiply-accumulate with a final horizontal sum.
#[inline]
fn dot_simd(delay: &VecDeque<Real>, coeffs_rev: &[Real]) -> Real {
    debug_assert_eq!(delay.len(), coeffs_rev.len());
    debug_assert_eq!(delay.len() % LANES, 0);
    let contiguous: Vec<Real> = delay.iter().copied().collect();
    let mut acc: RealVec = RealVec::default();
    for chunk in contiguous.chunks_exact(LANES).zip(coeffs_rev.chunks_exact(LANES)) {
        let (d, c) = chunk;
        for lane in 0..LANES {
            acc[lane] += d[lane] * c[lane];
        }
    }
    (0..LANES).map(|lane| acc[lane]).sum()
}

fn reversed(coefficients: &[Real]) -> Vec<Real> {
    coefficients.iter().rev().copied().collect()
}

fn padded_len(taps: usize) -> usize {
    taps.div_ceil(LANES) * LANES
}

fn padded_coeffs(coefficients: &[Real]) -> Vec<Real> {
    let rev = reversed(coefficients);
    let pad = padded_len(coefficients.len()) - coefficients.len();
    let mut out = vec![0.0; pad];
    out.extend(rev);
    out
}

/// Circular-buffer reference FIR implementation.
pub struct ScalarFir {
    sample_rate: Real,
    taps: usize,
    coeffs_rev: Vec<Real>,
    delay: Delay,
    kind: OutputKind,
    input: Option<InputRef>,
    current: Output,
}

impl ScalarFir {
    pub fn new(sample_rate: Real, coefficients: Vec<Real>, kind: OutputKind) -> Self {
        let taps = coefficients.len();
        Self {
            sample_rate,
            taps,
            coeffs_rev: reversed(&coefficients),
            delay: Delay::new(kind, taps),
            kind,
            input: None,
            current: Output::real(crate::real::zero()),
        }
    }

    /// Construct with REAL input/output.
    pub fn new_real(sample_rate: Real, coefficients: Vec<Real>) -> Self {
        Self::new(sample_rate, coefficients, OutputKind::Real)
    }

    /// Construct with COMPLEX input/output.
    pub fn new_complex(sample_rate: Real, coefficients: Vec<Real>) -> Self {
        Self::new(sample_rate, coefficients, OutputKind::Complex)
    }

    /// Reinitialize coefficients and zero the delay line. The new
    /// coefficient vector's length must match the tap count fixed at
    /// construction.
    pub fn set_coefficients(&mut self, h: &[Real]) -> Result<(), NodeError> {
        if h.len() != self.taps {
            return Err(NodeError::BadCoefficientCount {
                expected: self.taps,
                actual: h.len(),
            });
        }
        self.coeffs_rev = reversed(h);
        self.delay.reset();
        Ok(())
    }
}

impl Node for ScalarFir {
    fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    fn set_input(&mut self, slot: usize, source: InputRef) {
        assert_eq!(slot, 0);
        self.input = Some(source);
    }

    fn update(&mut self, graph: &Graph) {
        self.current = match (&mut self.delay, self.kind) {
            (Delay::Real(delay), OutputKind::Real) => {
                let x = graph.read_real(self.input, 0);
                let y = crate::real::from_fn(|i| {
                    push(delay, x[i]);
                    dot_scalar(delay, &self.coeffs_rev)
                });
                Output::real(y)
            }
            (Delay::Complex(delay_re, delay_im), OutputKind::Complex) => {
                let (re, im) = graph.read_complex(self.input, 0);
                let y_re = crate::real::from_fn(|i| {
                    push(delay_re, re[i]);
                    dot_scalar(delay_re, &self.coeffs_rev)
                });
                let y_im = crate::real::from_fn(|i| {
                    push(delay_im, im[i]);
                    dot_scalar(delay_im, &self.coeffs_rev)
                });
                Output::complex(y_re, y_im)
            }
            _ => unreachable!("Delay variant always matches declared kind"),
        };
    }

    fn output(&self, index: usize) -> Output {
        assert_eq!(index, 0);
        self.current
    }
}

/// FIR implementation that vectorizes each sample's dot product over
/// [`RealVec`]-wide chunks (SPEC_FULL.md §4.8.2). Produces the same result
/// as [`ScalarFir`] for both REAL and COMPLEX input.
pub struct SimdFir {
    sample_rate: Real,
    taps: usize,
    coeffs_rev_padded: Vec<Real>,
    delay: Delay,
    kind: OutputKind,
    input: Option<InputRef>,
    current: Output,
}

impl SimdFir {
    pub fn new(sample_rate: Real, coefficients: Vec<Real>, kind: OutputKind) -> Self {
        let taps = coefficients.len();
        let len = padded_len(taps);
        Self {
            sample_rate,
            taps,
            coeffs_rev_padded: padded_coeffs(&coefficients),
            delay: Delay::new(kind, len),
            kind,
            input: None,
            current: Output::real(crate::real::zero()),
        }
    }

    pub fn new_real(sample_rate: Real, coefficients: Vec<Real>) -> Self {
        Self::new(sample_rate, coefficients, OutputKind::Real)
    }

    pub fn new_complex(sample_rate: Real, coefficients: Vec<Real>) -> Self {
        Self::new(sample_rate, coefficients, OutputKind::Complex)
    }

    pub fn set_coefficients(&mut self, h: &[Real]) -> Result<(), NodeError> {
        if h.len() != self.taps {
            return Err(NodeError::BadCoefficientCount {
                expected: self.taps,
                actual: h.len(),
            });
        }
        self.coeffs_rev_padded = padded_coeffs(h);
        self.delay.reset();
        Ok(())
    }
}

impl Node for SimdFir {
    fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    fn set_input(&mut self, slot: usize, source: InputRef) {
        assert_eq!(slot, 0);
        self.input = Some(source);
    }

    fn update(&mut self, graph: &Graph) {
        self.current = match (&mut self.delay, self.kind) {
            (Delay::Real(delay), OutputKind::Real) => {
                let x = graph.read_real(self.input, 0);
                let y = crate::real::from_fn(|i| {
                    push(delay, x[i]);
                    dot_simd(delay, &self.coeffs_rev_padded)
                });
                Output::real(y)
            }
            (Delay::Complex(delay_re, delay_im), OutputKind::Complex) => {
                let (re, im) = graph.read_complex(self.input, 0);
                let y_re = crate::real::from_fn(|i| {
                    push(delay_re, re[i]);
                    dot_simd(delay_re, &self.coeffs_rev_padded)
                });
                let y_im = crate::real::from_fn(|i| {
                    push(delay_im, im[i]);
                    dot_simd(delay_im, &self.coeffs_rev_padded)
                });
                Output::complex(y_re, y_im)
            }
            _ => unreachable!("Delay variant always matches declared kind"),
        };
    }

    fn output(&self, index: usize) -> Output {
        assert_eq!(index, 0);
        self.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Graph;
    use crate::vector_io::VectorInput;

    fn run(fir: impl Node + 'static, input: Vec<Real>, sample_rate: Real) -> Vec<Real> {
        let mut graph = Graph::new();
        let input_node = VectorInput::new(sample_rate, input.clone(), OutputKind::Real);
        let input_id = graph.insert(Box::new(input_node));
        let fir_id = graph.insert(Box::new(fir));
        graph.bind_input(fir_id, 0, input_id, 0);

        let ticks = input.len() / LANES;
        let mut out = Vec::new();
        for _ in 0..ticks {
            graph.update(input_id);
            graph.update(fir_id);
            let block = graph.output(fir_id, 0).as_real();
            out.extend((0..LANES).map(|i| block[i]));
        }
        out
    }

    #[test]
    fn s6_scalar_fir_matches_expected() {
        let coeffs = vec![1.0, 0.0, -1.0];
        let input = vec![
            0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.5, 2.0, 1.75, 1.5, 1.25, 1.0, 0.75, 0.5, 0.25, 0.0,
        ];
        let expected = vec![
            0.0, 0.0, 0.0, 0.0, 0.5, 1.0, 1.0, 1.0, 0.25, -0.5, -0.5, -0.5, -0.5, -0.5, -0.5, -0.5,
        ];
        let fir = ScalarFir::new_real(1.0, coeffs);
        let out = run(fir, input, 1.0);
        for (g, e) in out.iter().zip(expected.iter()) {
            assert!((g - e).abs() < 1e-9, "{:?} vs {:?}", out, expected);
        }
    }

    #[test]
    fn simd_fir_matches_scalar_fir() {
        let coeffs = vec![0.2, 0.5, -0.3, 0.1, 0.05];
        let input: Vec<Real> = (0..32).map(|i| (i as Real * 0.37).sin()).collect();
        let scalar = ScalarFir::new_real(8000.0, coeffs.clone());
        let simd = SimdFir::new_real(8000.0, coeffs);
        let a = run(scalar, input.clone(), 8000.0);
        let b = run(simd, input, 8000.0);
        for (x, y) in a.iter().zip(b.iter()) {
            assert!((x - y).abs() < 1e-9, "{:?} vs {:?}", a, b);
        }
    }

    #[test]
    fn identity_and_first_difference() {
        let input = vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let identity = ScalarFir::new_real(1.0, vec![1.0]);
        let out = run(identity, input.clone(), 1.0);
        assert_eq!(out, input);

        let diff = ScalarFir::new_real(1.0, vec![1.0, 0.0, -1.0]);
        let out = run(diff, input, 1.0);
        // y[n] = x[n] - x[n-2], with zero history.
        let expected = vec![1.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0, 2.0];
        assert_eq!(out, expected);
    }
}
