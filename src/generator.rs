//! Standalone sinusoid source (SPEC_FULL.md §4.3).

use crate::node::{Graph, Node, Output, OutputKind};
use crate::phase::Phase;
use crate::real::{self, Real};

/// Source node emitting `amp * cospi(phase)` (REAL) or
/// `(amp*cospi(phase), amp*sinpi(phase))` (COMPLEX) each block.
pub struct FrequencyGenerator {
    sample_rate: Real,
    amplitude: Real,
    kind: OutputKind,
    phase: Phase,
    current: Output,
}

impl FrequencyGenerator {
    /// `frequency` in Hz, `phase_offset` in radians.
    pub fn new(
        sample_rate: Real,
        frequency: Real,
        amplitude: Real,
        phase_offset: Real,
        kind: OutputKind,
    ) -> Self {
        let phase = Phase::new(frequency, phase_offset, 1.0 / sample_rate);
        let current = compute(kind, amplitude, phase.current());
        Self {
            sample_rate,
            amplitude,
            kind,
            phase,
            current,
        }
    }
}

fn compute(kind: OutputKind, amplitude: Real, phase: real::RealVec) -> Output {
    match kind {
        OutputKind::Real => Output::real(real::from_fn(|i| amplitude * real::cospi(phase)[i])),
        OutputKind::Complex => {
            let (c, s) = real::sincospi(phase);
            Output::complex(
                real::from_fn(|i| amplitude * c[i]),
                real::from_fn(|i| amplitude * s[i]),
            )
        }
    }
}

impl Node for FrequencyGenerator {
    fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    fn update(&mut self, _graph: &Graph) {
        // Emit for the current phase, then advance for the next block
        // (SPEC_FULL.md §4.2 ordering note).
        self.current = compute(self.kind, self.amplitude, self.phase.current());
        self.phase.advance();
    }

    fn output(&self, index: usize) -> Output {
        assert_eq!(index, 0);
        self.current
    }
}
