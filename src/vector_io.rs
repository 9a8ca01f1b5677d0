//! In-memory looping source and growing sink (SPEC_FULL.md §4.11).

use crate::node::{Graph, InputRef, Node, Output, OutputKind};
use crate::real::{self, Real};

/// Emits `W` samples per block starting at an internal cursor, wrapping
/// around modulo the held vector's length. REAL or COMPLEX, matching the
/// stored sample type.
pub struct VectorInput {
    sample_rate: Real,
    kind: OutputKind,
    re: Vec<Real>,
    im: Vec<Real>,
    cursor: usize,
    current: Output,
}

impl VectorInput {
    /// REAL source over `samples`.
    pub fn new(sample_rate: Real, samples: Vec<Real>, kind: OutputKind) -> Self {
        assert_eq!(kind, OutputKind::Real);
        let len = samples.len();
        Self {
            sample_rate,
            kind,
            re: samples,
            im: vec![0.0; len],
            cursor: 0,
            current: Output::real(real::zero()),
        }
    }

    /// COMPLEX source over parallel `re`/`im` vectors of equal length.
    pub fn new_complex(sample_rate: Real, re: Vec<Real>, im: Vec<Real>) -> Self {
        assert_eq!(re.len(), im.len());
        Self {
            sample_rate,
            kind: OutputKind::Complex,
            re,
            im,
            cursor: 0,
            current: Output::complex(real::zero(), real::zero()),
        }
    }
}

impl Node for VectorInput {
    fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    fn update(&mut self, _graph: &Graph) {
        let len = self.re.len();
        let re = real::from_fn(|i| self.re[(self.cursor + i) % len]);
        self.current = match self.kind {
            OutputKind::Real => Output::real(re),
            OutputKind::Complex => {
                let im = real::from_fn(|i| self.im[(self.cursor + i) % len]);
                Output::complex(re, im)
            }
        };
        self.cursor = (self.cursor + real::LANES) % len;
    }

    fn output(&self, index: usize) -> Output {
        assert_eq!(index, 0);
        self.current
    }
}

/// Appends `W` samples per block into an owned, growing vector.
pub struct VectorOutput {
    sample_rate: Real,
    kind: OutputKind,
    input: Option<InputRef>,
    re: Vec<Real>,
    im: Vec<Real>,
}

impl VectorOutput {
    pub fn new(sample_rate: Real, kind: OutputKind) -> Self {
        Self {
            sample_rate,
            kind,
            input: None,
            re: Vec::new(),
            im: Vec::new(),
        }
    }

    /// Read-only view of the accumulated REAL samples.
    pub fn samples(&self) -> &[Real] {
        &self.re
    }

    /// Read-only view of the accumulated COMPLEX samples as parallel
    /// `(re, im)` slices.
    pub fn complex_samples(&self) -> (&[Real], &[Real]) {
        (&self.re, &self.im)
    }
}

impl Node for VectorOutput {
    fn sample_rate(&self) -> Real {
        self.sample_rate
    }

    fn set_input(&mut self, slot: usize, source: InputRef) {
        assert_eq!(slot, 0);
        self.input = Some(source);
    }

    fn update(&mut self, graph: &Graph) {
        match self.kind {
            OutputKind::Real => {
                let x = graph.read_real(self.input, 0);
                self.re.extend((0..real::LANES).map(|i| x[i]));
            }
            OutputKind::Complex => {
                let (re, im) = graph.read_complex(self.input, 0);
                self.re.extend((0..real::LANES).map(|i| re[i]));
                self.im.extend((0..real::LANES).map(|i| im[i]));
            }
        }
    }

    fn output(&self, _index: usize) -> Output {
        panic!("VectorOutput is a sink and has no outputs");
    }
}
