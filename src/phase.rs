//! Shared block-wise phase accumulator (SPEC_FULL.md §4.2).
//!
//! Used by [`crate::generator::FrequencyGenerator`] and
//! [`crate::amplitude_modulator::AmplitudeModulator`]. The original source
//! shared this logic by having `AmplitudeModulator` subclass
//! `FrequencyGenerator`; this crate gives each node its own `Phase` field
//! instead, since composition doesn't drag `FrequencyGenerator`'s own
//! unused output storage into `AmplitudeModulator`.

use crate::real::{self, Real, RealVec};

/// Normalized phase (`phase_div_pi`, one period = 2) for a block-wise
/// sinusoid generator.
#[derive(Debug, Clone, Copy)]
pub struct Phase {
    phase_div_pi: RealVec,
    increment: Real,
}

impl Phase {
    /// `frequency` in Hz, `phase_offset` in radians, `dt = 1/sample_rate`.
    pub fn new(frequency: Real, phase_offset: Real, dt: Real) -> Self {
        let phase_div_pi = real::from_fn(|i| {
            frequency * 2.0 * i as Real * dt + phase_offset / core::f64::consts::PI as Real
        });
        let increment = 2.0 * frequency * real::LANES as Real * dt;
        Self {
            phase_div_pi,
            increment,
        }
    }

    /// The current block's phase vector, for emitting this block's output.
    pub fn current(&self) -> RealVec {
        self.phase_div_pi
    }

    /// Advance to the next block: add the per-block increment, then reduce
    /// by one full period if lane 0 has exceeded it.
    pub fn advance(&mut self) {
        let mut next = real::from_fn(|i| self.phase_div_pi[i] + self.increment);
        if next[0] > 1.0 {
            next = real::from_fn(|i| next[i] - 2.0);
        }
        self.phase_div_pi = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s2_frequency_generator_phase_is_periodic() {
        // sample_rate = 1, f = 0.25, phi = pi (S2 in SPEC_FULL.md).
        let mut phase = Phase::new(0.25, core::f64::consts::PI as Real, 1.0);
        let first = phase.current();
        phase.advance();
        assert!((phase.current()[0] - first[0]).abs() < 1e-9);
    }
}
