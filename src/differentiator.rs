//! First-difference with sample-rate scaling (SPEC_FULL.md §4.7).

use crate::node::{Graph, InputRef, Node, Output, OutputKind};
use crate::real::{self, Real};

/// `y[i] = (x[i] - prev) * (sample_rate / 2*pi)`, `prev` updated per sample.
/// Accepts and emits REAL or COMPLEX (real/imag tracked independently).
pub struct Differentiator {
    sample_rate: Real,
    kind: OutputKind,
    input: Option<InputRef>,
    prev_re: Real,
    prev_im: Real,
    current: Output,
}

impl Differentiator {
    pub fn new(sample_rate: Real, kind: OutputKind) -> Self {
        Self {
            sample_rate,
            kind,
            input: None,
            prev_re: 0.0,
            prev_im: 0.0,
            current: Output::real(real::zero()),
        }
    }

    #[inline]
    fn scale(&self) -> Real {
        self.sample_rate / (2.0 * core::f64::consts::PI as Real)
    }
}

impl Node for Differentiator {
    fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    fn set_input(&mut self, slot: usize, source: InputRef) {
        assert_eq!(slot, 0);
        self.input = Some(source);
    }

    fn update(&mut self, graph: &Graph) {
        let scale = self.scale();
        self.current = match self.kind {
            OutputKind::Real => {
                let x = graph.read_real(self.input, 0);
                let mut prev = self.prev_re;
                let y = real::from_fn(|i| {
                    let d = (x[i] - prev) * scale;
                    prev = x[i];
                    d
                });
                self.prev_re = prev;
                Output::real(y)
            }
            OutputKind::Complex => {
                let (re, im) = graph.read_complex(self.input, 0);
                let mut prev_re = self.prev_re;
                let y_re = real::from_fn(|i| {
                    let d = (re[i] - prev_re) * scale;
                    prev_re = re[i];
                    d
                });
                let mut prev_im = self.prev_im;
                let y_im = real::from_fn(|i| {
                    let d = (im[i] - prev_im) * scale;
                    prev_im = im[i];
                    d
                });
                self.prev_re = prev_re;
                self.prev_im = prev_im;
                Output::complex(y_re, y_im)
            }
        };
    }

    fn output(&self, index: usize) -> Output {
        assert_eq!(index, 0);
        self.current
    }
}
