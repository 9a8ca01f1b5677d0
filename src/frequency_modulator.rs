//! Input-integrated phase accumulator (SPEC_FULL.md §4.5).
//!
//! Unlike [`crate::generator::FrequencyGenerator`]/
//! [`crate::amplitude_modulator::AmplitudeModulator`], phase here is
//! integrated *within* the block from the modulating input, one sample at a
//! time, carrying a single scalar phase forward between blocks rather than
//! advancing a whole `RealVec` uniformly.
//!
//! Both `frequency` and `bandwidth` are in Hz (SPEC_FULL.md §4.5 / Open
//! Question 1 — the original mixed normalized-phase and Hz units here).

use crate::node::{Graph, InputRef, Node, Output, OutputKind};
use crate::real::{self, Real, LANES};

pub struct FrequencyModulator {
    sample_rate: Real,
    frequency: Real,
    bandwidth: Real,
    amplitude: Real,
    kind: OutputKind,
    /// Phase carried over from the previous block's last sample (lane 0 of
    /// the next block).
    carryover: Real,
    input: Option<InputRef>,
    current: Output,
}

impl FrequencyModulator {
    pub fn new(
        sample_rate: Real,
        frequency: Real,
        bandwidth: Real,
        amplitude: Real,
        kind: OutputKind,
    ) -> Self {
        Self {
            sample_rate,
            frequency,
            bandwidth,
            amplitude,
            kind,
            carryover: 0.0,
            input: None,
            current: Output::real(real::zero()),
        }
    }

    #[inline]
    fn step(&self, m: Real) -> Real {
        2.0 * (self.frequency + m * self.bandwidth) * self.dt()
    }
}

impl Node for FrequencyModulator {
    fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    fn set_input(&mut self, slot: usize, source: InputRef) {
        assert_eq!(slot, 0);
        self.input = Some(source);
    }

    fn update(&mut self, graph: &Graph) {
        let m = graph.read_real(self.input, 0);

        let mut phase = [0.0 as Real; LANES];
        phase[0] = self.carryover;
        for i in 1..LANES {
            phase[i] = phase[i - 1] + self.step(m[i - 1]);
        }
        self.carryover = phase[LANES - 1] + self.step(m[LANES - 1]);

        if phase[0] > 1.0 {
            for p in phase.iter_mut() {
                *p -= 2.0;
            }
        }

        let phase_vec = real::from_fn(|i| phase[i]);
        self.current = match self.kind {
            OutputKind::Real => {
                let c = real::cospi(phase_vec);
                Output::real(real::from_fn(|i| self.amplitude * c[i]))
            }
            OutputKind::Complex => {
                let (c, s) = real::sincospi(phase_vec);
                Output::complex(
                    real::from_fn(|i| self.amplitude * c[i]),
                    real::from_fn(|i| self.amplitude * s[i]),
                )
            }
        };
    }

    fn output(&self, index: usize) -> Output {
        assert_eq!(index, 0);
        self.current
    }
}
