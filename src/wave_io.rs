//! Graph nodes bridging the RIFF/WAVE codec to the node graph
//! (SPEC_FULL.md §4.12 "Numeric contract for RiffWaveInput/RiffWaveOutput").
//!
//! Grounded on `original_source/include/filter/riff_wave_input.h` /
//! `riff_wave_output.h`.

use crate::error::WaveError;
use crate::node::{Graph, InputRef, Node, Output, OutputKind};
use crate::real::{self, Real, LANES};
use crate::wave::{WaveReader, WaveWriter};

/// Source node reading frames from a [`WaveReader`] and emitting them as
/// graph outputs, one REAL output per channel, or one COMPLEX output per
/// channel pair (channel `2k` -> real, `2k+1` -> imag) when the file has an
/// even channel count and [`OutputKind::Complex`] is requested.
pub struct RiffWaveInput {
    reader: WaveReader,
    kind: OutputKind,
    outputs: Vec<Output>,
}

impl RiffWaveInput {
    /// Open `path`. `kind` selects REAL (one output per channel) or
    /// COMPLEX (one output per channel pair; the channel count must be
    /// even).
    pub fn open(path: impl AsRef<std::path::Path>, kind: OutputKind) -> Result<Self, WaveError> {
        let reader = WaveReader::open(path)?;
        if kind == OutputKind::Complex && reader.channel_count() % 2 != 0 {
            return Err(WaveError::UnsupportedFormat(format!(
                "COMPLEX RiffWaveInput requires an even channel count, got {}",
                reader.channel_count()
            )));
        }
        let output_count = match kind {
            OutputKind::Real => reader.channel_count() as usize,
            OutputKind::Complex => reader.channel_count() as usize / 2,
        };
        let outputs = vec![
            match kind {
                OutputKind::Real => Output::real(real::zero()),
                OutputKind::Complex => Output::complex(real::zero(), real::zero()),
            };
            output_count
        ];
        Ok(Self {
            reader,
            kind,
            outputs,
        })
    }

    pub fn channel_count(&self) -> u16 {
        self.reader.channel_count()
    }

    pub fn output_count(&self) -> usize {
        self.outputs.len()
    }

    pub fn eof(&self) -> bool {
        self.reader.eof()
    }
}

impl Node for RiffWaveInput {
    fn sample_rate(&self) -> Real {
        self.reader.frame_rate() as Real
    }

    fn update(&mut self, _graph: &Graph) {
        let max = self.reader.max_sample_value() as Real;
        let channels = self.reader.channel_count() as usize;
        let mut frames = vec![[0 as Real; LANES]; channels];
        for lane in 0..LANES {
            assert!(!self.reader.eof(), "RiffWaveInput read past end of file");
            let frame = self
                .reader
                .read_frame()
                .expect("WAVE read failure mid-block");
            for (channel, sample) in frame.into_iter().enumerate() {
                frames[channel][lane] = sample as Real / max;
            }
        }
        match self.kind {
            OutputKind::Real => {
                for (channel, out) in self.outputs.iter_mut().enumerate() {
                    *out = Output::real(real::from_fn(|i| frames[channel][i]));
                }
            }
            OutputKind::Complex => {
                for (pair, out) in self.outputs.iter_mut().enumerate() {
                    let re = frames[2 * pair];
                    let im = frames[2 * pair + 1];
                    *out = Output::complex(real::from_fn(|i| re[i]), real::from_fn(|i| im[i]));
                }
            }
        }
    }

    fn output(&self, index: usize) -> Output {
        self.outputs[index]
    }
}

/// Sink node writing one block of input samples to a [`WaveWriter`] per
/// `update`. A REAL input becomes a 1-channel file; a COMPLEX input
/// becomes a 2-channel file (real then imaginary).
pub struct RiffWaveOutput {
    writer: WaveWriter,
    sample_rate: Real,
    kind: OutputKind,
    input: Option<InputRef>,
    dampening_factor: Real,
}

impl RiffWaveOutput {
    /// Create `path` at `sample_rate` Hz. `dampening_factor` multiplies
    /// every sample before it is scaled and truncated.
    pub fn create(
        path: impl AsRef<std::path::Path>,
        sample_rate: u32,
        kind: OutputKind,
        dampening_factor: Real,
    ) -> Result<Self, WaveError> {
        let channels = match kind {
            OutputKind::Real => 1,
            OutputKind::Complex => 2,
        };
        let writer = WaveWriter::create(path, sample_rate, channels)?;
        Ok(Self {
            writer,
            sample_rate: sample_rate as Real,
            kind,
            input: None,
            dampening_factor,
        })
    }

    /// Flush and finalize headers. Also happens on `Drop`.
    pub fn close(&mut self) -> Result<(), WaveError> {
        self.writer.close()
    }
}

impl Node for RiffWaveOutput {
    fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    fn set_input(&mut self, slot: usize, source: InputRef) {
        assert_eq!(slot, 0);
        self.input = Some(source);
    }

    fn update(&mut self, graph: &Graph) {
        let max = self.writer.max_sample_value() as Real;
        match self.kind {
            OutputKind::Real => {
                let x = graph.read_real(self.input, 0);
                for i in 0..LANES {
                    let sample = (max * x[i] * self.dampening_factor) as i32;
                    self.writer
                        .write_frame(&[sample])
                        .expect("WAVE write failure mid-block");
                }
            }
            OutputKind::Complex => {
                let (re, im) = graph.read_complex(self.input, 0);
                for i in 0..LANES {
                    let re_sample = (max * re[i] * self.dampening_factor) as i32;
                    let im_sample = (max * im[i] * self.dampening_factor) as i32;
                    self.writer
                        .write_frame(&[re_sample, im_sample])
                        .expect("WAVE write failure mid-block");
                }
            }
        }
    }

    fn output(&self, _index: usize) -> Output {
        panic!("RiffWaveOutput is a sink and has no outputs");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vector_io::VectorInput;

    #[test]
    fn real_round_trip_preserves_samples_without_normalization() {
        let dir = std::env::temp_dir();
        let path = dir.join(format!("signalgraph_wave_io_test_{}.wav", std::process::id()));

        let samples: Vec<Real> = vec![0.5, -0.5, 0.25, -0.25, 1.0, -1.0, 0.0, 0.0];
        {
            let mut graph = Graph::new();
            let input = VectorInput::new(8000.0, samples.clone(), OutputKind::Real);
            let input_id = graph.insert(Box::new(input));
            let output = RiffWaveOutput::create(&path, 8000, OutputKind::Real, 1.0).unwrap();
            let output_id = graph.insert(Box::new(output));
            graph.bind_input(output_id, 0, input_id, 0);
            for _ in 0..(samples.len() / LANES) {
                graph.update(input_id);
                graph.update(output_id);
            }
        }

        let mut reader = RiffWaveInput::open(&path, OutputKind::Real).unwrap();
        assert_eq!(reader.channel_count(), 1);
        let empty_graph = Graph::new();
        let mut got = Vec::new();
        while !reader.eof() {
            reader.update(&empty_graph);
            let out = reader.output(0).as_real();
            got.extend((0..LANES).map(|i| out[i]));
        }
        for (g, e) in got.iter().zip(samples.iter()) {
            assert!((g - e).abs() < 1e-4, "{:?} vs {:?}", got, samples);
        }
        let _ = std::fs::remove_file(&path);
    }
}
