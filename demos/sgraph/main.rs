//! `sgraph` demo binary (SPEC_FULL.md §6 CLI, §10 "CLI / demo entry point").
//!
//! With no arguments, wires a small synthetic graph (tone generator ->
//! frequency shift -> WAVE writer) and runs it for a fixed duration,
//! writing `modified.wav`. With `-t`/`--test`, runs an in-process smoke
//! check instead and exits.
//!
//! Grounded on `original_source/src/main.cpp` for the pipeline shape;
//! argument parsing follows the sibling example repos' `clap` derive
//! convention, with `tracing-subscriber` installed here (library code only
//! emits events, per SPEC_FULL.md §10 "Logging").

use clap::Parser;
use signalgraph::prelude::*;

const DURATION_SECONDS: f64 = 300.0;
const SAMPLE_RATE: f64 = 44_100.0;

#[derive(Parser)]
#[command(name = "sgraph", about = "Synthetic DSP graph demo")]
struct Args {
    /// Run the built-in smoke tests and exit instead of rendering a file.
    #[arg(short = 't', long = "test")]
    test: bool,

    /// Output WAVE file path (ignored in `--test` mode).
    #[arg(short = 'o', long = "output", default_value = "modified.wav")]
    output: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    if args.test {
        run_smoke_test();
        println!("smoke test passed");
        return Ok(());
    }

    run_pipeline(&args.output)?;
    println!("wrote {}", args.output);
    Ok(())
}

/// Tone generator -> frequency shift -> WAVE writer, matching the intent of
/// `original_source/src/main.cpp`'s demo pipeline.
fn run_pipeline(output_path: &str) -> anyhow::Result<()> {
    let mut graph = Graph::new();

    let tone = FrequencyGenerator::new(SAMPLE_RATE, 440.0, 1.0, 0.0, OutputKind::Real);
    let tone_id = graph.insert(Box::new(tone));

    let shift = FrequencyShift::new(SAMPLE_RATE, 1000.0, OutputKind::Real);
    let shift_id = graph.insert(Box::new(shift));
    graph.bind_input(shift_id, 0, tone_id, 0);

    let writer =
        RiffWaveOutput::create(output_path, SAMPLE_RATE as u32, OutputKind::Complex, 0.8)?;
    let writer_id = graph.insert(Box::new(writer));
    graph.bind_input(writer_id, 0, shift_id, 0);

    let ticks = (DURATION_SECONDS * SAMPLE_RATE / LANES as f64).round() as u64;
    tracing::debug!(ticks, "rendering synthetic pipeline");
    for _ in 0..ticks {
        graph.update(tone_id);
        graph.update(shift_id);
        graph.update(writer_id);
    }

    Ok(())
}

/// Quick in-process check that the core nodes still behave sanely, run for
/// `-t`/`--test` instead of a full render (SPEC_FULL.md §6).
fn run_smoke_test() {
    let mut graph = Graph::new();
    let input = VectorInput::new(1.0, (0..8).map(|i| i as Real).collect(), OutputKind::Real);
    let input_id = graph.insert(Box::new(input));
    let output = VectorOutput::new(1.0, OutputKind::Real);
    let output_id = graph.insert(Box::new(output));
    graph.bind_input(output_id, 0, input_id, 0);
    for _ in 0..4 {
        graph.update(input_id);
        graph.update(output_id);
    }

    let tone = FrequencyGenerator::new(1.0, 0.25, 10.0, std::f64::consts::PI as Real, OutputKind::Real);
    let mut tone = tone;
    let empty = Graph::new();
    tone.update(&empty);
    let block = tone.output(0).as_real();
    assert!((block[0] - (-10.0)).abs() < 1e-6, "tone generator smoke check failed");
}
