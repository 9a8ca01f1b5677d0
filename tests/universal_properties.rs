//! Universal properties from SPEC_FULL.md §8 that aren't pinned to one
//! concrete scenario: rewiring, phase-drift bounds, and FIR linearity.

use signalgraph::prelude::*;

#[test]
fn property_2_rewiring_does_not_reorder_already_emitted_samples() {
    // The consumer is kept outside the arena (concrete `VectorOutput`, not
    // boxed) so its accumulated samples can be inspected directly; only the
    // two producers it reads from need stable `NodeId`s.
    let mut graph = Graph::new();
    let a = VectorInput::new(1.0, vec![1.0, 2.0, 3.0, 4.0], OutputKind::Real);
    let a_id = graph.insert(Box::new(a));
    let b = VectorInput::new(1.0, vec![9.0, 9.0, 9.0, 9.0], OutputKind::Real);
    let b_id = graph.insert(Box::new(b));

    let mut output = VectorOutput::new(1.0, OutputKind::Real);

    output.set_input(0, InputRef { source: a_id, output: 0 });
    graph.update(a_id);
    output.update(&graph);

    // Rebind between ticks (permitted per SPEC_FULL.md §5).
    output.set_input(0, InputRef { source: b_id, output: 0 });
    graph.update(b_id);
    output.update(&graph);

    assert_eq!(output.samples(), &[1.0, 2.0, 3.0, 4.0, 9.0, 9.0, 9.0, 9.0]);
}

#[test]
fn property_3_phase_stays_bounded_when_block_increment_is_whole_periods() {
    // 2*f*W/s = 0 mod 2 when f = s/W (one full period per block).
    let sample_rate = 8.0;
    let frequency = sample_rate / LANES as Real;
    let mut graph = Graph::new();
    let gen = FrequencyGenerator::new(sample_rate, frequency, 1.0, 0.0, OutputKind::Real);
    let gen_id = graph.insert(Box::new(gen));

    for _ in 0..10_000 {
        graph.update(gen_id);
        let block = graph.output(gen_id, 0).as_real();
        for i in 0..LANES {
            assert!(block[i].abs() <= 1.0 + 1e-9, "output escaped unit amplitude: {}", block[i]);
            assert!(block[i].is_finite());
        }
    }
}

#[test]
fn property_6_fir_is_linear() {
    let coeffs = vec![0.3, -0.2, 0.1, 0.05];
    let x: Vec<Real> = (0..32).map(|i| (i as Real * 0.11).sin()).collect();
    let y: Vec<Real> = (0..32).map(|i| (i as Real * 0.37).cos()).collect();
    let a = 2.0;
    let b = -0.5;
    let combined: Vec<Real> = x.iter().zip(y.iter()).map(|(&xi, &yi)| a * xi + b * yi).collect();

    let out_x = run_fir(&coeffs, &x);
    let out_y = run_fir(&coeffs, &y);
    let out_combined = run_fir(&coeffs, &combined);

    for i in 0..out_combined.len() {
        let expected = a * out_x[i] + b * out_y[i];
        assert!(
            (out_combined[i] - expected).abs() < 1e-9,
            "linearity violated at {}: {} vs {}",
            i,
            out_combined[i],
            expected
        );
    }
}

fn run_fir(coeffs: &[Real], input: &[Real]) -> Vec<Real> {
    let mut graph = Graph::new();
    let input_node = VectorInput::new(8000.0, input.to_vec(), OutputKind::Real);
    let input_id = graph.insert(Box::new(input_node));
    let fir = ScalarFir::new_real(8000.0, coeffs.to_vec());
    let fir_id = graph.insert(Box::new(fir));
    graph.bind_input(fir_id, 0, input_id, 0);

    let mut out = Vec::new();
    for _ in 0..(input.len() / LANES) {
        graph.update(input_id);
        graph.update(fir_id);
        let block = graph.output(fir_id, 0).as_real();
        out.extend((0..LANES).map(|i| block[i]));
    }
    out
}
