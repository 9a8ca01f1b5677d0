//! A block-oriented, pull-style digital signal processing graph.
//!
//! Processing nodes ("filters") read from upstream nodes' output buffers
//! and produce their own output in fixed-size blocks of [`real::LANES`]
//! samples (`W`, the build-time SIMD lane count). A [`node::Graph`] owns a
//! graph of nodes behind stable [`node::NodeId`] handles; advancing the
//! graph means invoking [`node::Graph::update`] on every node once, in an
//! order that respects the input-dependency DAG.
//!
//! Module map:
//! - [`real`]: scalar/complex/block numeric types, transcendentals.
//! - [`error`]: structured errors for the node graph ([`error::NodeError`])
//!   and the WAVE codec ([`error::WaveError`]).
//! - [`node`]: the node trait, output storage, and the graph arena.
//! - [`phase`]: the block-wise phase accumulator shared by the generators.
//! - [`generator`], [`amplitude_modulator`], [`frequency_modulator`],
//!   [`frequency_shift`], [`differentiator`]: the signal-processing nodes.
//! - [`fir`], [`low_pass`], [`window`]: FIR convolution and its
//!   windowed-low-pass derivation.
//! - [`vector_io`]: in-memory looping source / growing sink nodes.
//! - [`wave`]: the RIFF/WAVE PCM codec.
//! - [`wave_io`]: graph nodes bridging the codec to the graph.
//! - [`util`]: sign-extension and rounding helpers.

pub mod amplitude_modulator;
pub mod differentiator;
pub mod error;
pub mod fir;
pub mod frequency_modulator;
pub mod frequency_shift;
pub mod generator;
pub mod low_pass;
pub mod node;
pub mod phase;
pub mod real;
pub mod util;
pub mod vector_io;
pub mod wave;
pub mod wave_io;
pub mod window;

/// Common re-exports for constructing and driving a graph.
pub mod prelude {
    pub use crate::amplitude_modulator::AmplitudeModulator;
    pub use crate::differentiator::Differentiator;
    pub use crate::error::{NodeError, WaveError};
    pub use crate::fir::{ScalarFir, SimdFir};
    pub use crate::frequency_modulator::FrequencyModulator;
    pub use crate::frequency_shift::FrequencyShift;
    pub use crate::generator::FrequencyGenerator;
    pub use crate::node::{Graph, InputRef, Node, NodeId, Output, OutputKind};
    pub use crate::real::{Complex, Real, RealVec, LANES};
    pub use crate::vector_io::{VectorInput, VectorOutput};
    pub use crate::wave::{WaveReader, WaveWriter};
    pub use crate::wave_io::{RiffWaveInput, RiffWaveOutput};
}

