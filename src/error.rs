//! Structured errors for the node graph and the WAVE codec.

use crate::node::OutputKind;
use thiserror::Error;

/// Errors raised by the node graph's data plane.
#[derive(Debug, Error)]
pub enum NodeError {
    /// A reader requested an output of the wrong kind.
    #[error("output kind mismatch: expected {expected:?}, got {actual:?}")]
    KindMismatch {
        expected: OutputKind,
        actual: OutputKind,
    },
    /// `update` ran with an input slot that was never bound.
    #[error("input slot {slot} of node is unbound")]
    UnboundInput { slot: usize },
    /// A FIR coefficient vector's length didn't match the declared tap count.
    #[error("expected {expected} FIR coefficients, got {actual}")]
    BadCoefficientCount { expected: usize, actual: usize },
}

/// Errors raised by the RIFF/WAVE codec and its graph nodes.
#[derive(Debug, Error)]
pub enum WaveError {
    /// PCM format type wasn't 1, bits-per-sample wasn't 8 or 16, or a
    /// COMPLEX-configured reader was given an odd channel count.
    #[error("unsupported WAVE format: {0}")]
    UnsupportedFormat(String),
    /// Underlying file I/O failure.
    #[error("WAVE I/O failure: {0}")]
    Io(#[from] std::io::Error),
}
