//! Real input multiplied by a carrier (SPEC_FULL.md §4.4).

use crate::node::{Graph, InputRef, Node, Output, OutputKind};
use crate::phase::Phase;
use crate::real::{self, Real};

/// `amp * m(t) * cospi(phase)` (REAL) or with an added `sinpi` imaginary
/// part (COMPLEX), where `m` is a single REAL input expected in `[-1, 1]`.
pub struct AmplitudeModulator {
    sample_rate: Real,
    amplitude: Real,
    kind: OutputKind,
    phase: Phase,
    input: Option<InputRef>,
    current: Output,
}

impl AmplitudeModulator {
    /// `carrier` in Hz, `phase_offset` in radians.
    pub fn new(
        sample_rate: Real,
        carrier: Real,
        amplitude: Real,
        phase_offset: Real,
        kind: OutputKind,
    ) -> Self {
        Self {
            sample_rate,
            amplitude,
            kind,
            phase: Phase::new(carrier, phase_offset, 1.0 / sample_rate),
            input: None,
            current: Output::real(real::zero()),
        }
    }
}

impl Node for AmplitudeModulator {
    fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    fn set_input(&mut self, slot: usize, source: InputRef) {
        assert_eq!(slot, 0);
        self.input = Some(source);
    }

    fn update(&mut self, graph: &Graph) {
        let m = graph.read_real(self.input, 0);
        let phase = self.phase.current();
        self.current = match self.kind {
            OutputKind::Real => {
                let c = real::cospi(phase);
                Output::real(real::from_fn(|i| self.amplitude * m[i] * c[i]))
            }
            OutputKind::Complex => {
                let (c, s) = real::sincospi(phase);
                Output::complex(
                    real::from_fn(|i| self.amplitude * m[i] * c[i]),
                    real::from_fn(|i| self.amplitude * m[i] * s[i]),
                )
            }
        };
        self.phase.advance();
    }

    fn output(&self, index: usize) -> Output {
        assert_eq!(index, 0);
        self.current
    }
}
