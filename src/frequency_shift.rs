//! Complex heterodyne mixer (SPEC_FULL.md §4.6).

use crate::node::{Graph, InputRef, Node, Output, OutputKind};
use crate::real::{self, Real, LANES};

/// `y = x * exp(j*2*pi*shift*t)`. Accepts a REAL or COMPLEX input; always
/// emits COMPLEX.
pub struct FrequencyShift {
    sample_rate: Real,
    input_kind: OutputKind,
    input: Option<InputRef>,
    phase_div_pi: real::RealVec,
    increment: Real,
    current: Output,
}

impl FrequencyShift {
    /// `shift` in Hz.
    pub fn new(sample_rate: Real, shift: Real, input_kind: OutputKind) -> Self {
        let delta = 2.0 * shift / sample_rate;
        Self {
            sample_rate,
            input_kind,
            input: None,
            phase_div_pi: real::from_fn(|i| i as Real * delta),
            increment: LANES as Real * delta,
            current: Output::complex(real::zero(), real::zero()),
        }
    }
}

impl Node for FrequencyShift {
    fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    fn set_input(&mut self, slot: usize, source: InputRef) {
        assert_eq!(slot, 0);
        self.input = Some(source);
    }

    fn update(&mut self, graph: &Graph) {
        let (cos, sin) = real::sincospi(self.phase_div_pi);

        let (out_re, out_im) = match self.input_kind {
            OutputKind::Real => {
                let x = graph.read_real(self.input, 0);
                (
                    real::from_fn(|i| cos[i] * x[i]),
                    real::from_fn(|i| sin[i] * x[i]),
                )
            }
            OutputKind::Complex => {
                let (re, im) = graph.read_complex(self.input, 0);
                (
                    real::from_fn(|i| cos[i] * re[i] - sin[i] * im[i]),
                    real::from_fn(|i| sin[i] * re[i] + cos[i] * im[i]),
                )
            }
        };
        self.current = Output::complex(out_re, out_im);

        // Advance, then reduce unconditionally by whole periods so the
        // middle lane stays near zero (SPEC_FULL.md §4.6 / Open Question 3;
        // a no-op whenever |phase[mid]| < 2 since trunc(x/2) == 0 there).
        let mut next = real::from_fn(|i| self.phase_div_pi[i] + self.increment);
        let mid = next[LANES / 2];
        let k = (mid / 2.0).trunc();
        if k != 0.0 {
            next = real::from_fn(|i| next[i] - 2.0 * k);
        }
        self.phase_div_pi = next;
    }

    fn output(&self, index: usize) -> Output {
        assert_eq!(index, 0);
        self.current
    }
}
