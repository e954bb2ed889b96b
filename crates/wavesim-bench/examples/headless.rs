//! Headless frame loop.
//!
//! Demonstrates: build config → Controller → queue impulses from an input
//! thread → advance frames → map the field to display intensities → pause,
//! reset → repeat. Run with `RUST_LOG=wavesim_engine=trace` to see per-step
//! logging.

use std::thread;

use tracing::info;
use tracing_subscriber::EnvFilter;
use wavesim_bench::{reference_profile, seed_impulses};
use wavesim_core::{Impulse, Source};
use wavesim_engine::{Controller, DisplayScale};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("wavesim_engine=debug".parse().unwrap()),
        )
        .init();

    println!("=== wave_sim headless frame loop ===\n");

    let config = reference_profile().with_source(Source::new(64, 64, 0.5, 0.05));
    let mut sim = Controller::from_config(config).unwrap();
    seed_impulses(&mut sim, 4).unwrap();

    // Input arrives on another thread, as it would from a UI callback.
    let tx = sim.input_handle();
    let input = thread::spawn(move || {
        for i in 0..32 {
            let x = 32 + i * 6;
            tx.submit(Impulse::gaussian(x, 200, 0.3, 2.0)).unwrap();
        }
    });
    input.join().unwrap();

    let mut scale = DisplayScale::default();
    let mut pixels = Vec::new();

    println!("Episode 1: 200 frames");
    for frame_no in 0..200 {
        let frame = sim.advance_frame();
        scale.observe(frame.metrics.max_abs_amplitude);
        scale.intensities(&frame.field, &mut pixels);

        if frame_no % 50 == 0 || frame_no == 199 {
            let lit = pixels.iter().filter(|&&p| p > 0.5).count();
            println!(
                "  tick {:>3}: energy={:>10.4}, peak={:>7.4}, lit={:>6}, inputs={:>2}, time={:>6}μs",
                frame.field.tick(),
                frame.metrics.energy,
                frame.metrics.max_abs_amplitude,
                lit,
                frame.receipts.len(),
                frame.metrics.total_us,
            );
        }
    }

    sim.pause();
    sim.advance_frame();
    info!(tick = sim.tick(), paused = sim.is_paused(), "paused frame");

    sim.reset();
    sim.resume();
    sim.set_sources_enabled(false);
    println!("\nEpisode 2: after reset, sources off");
    sim.apply_impulse(Impulse::point(128, 128, 1.0)).unwrap();
    for _ in 0..100 {
        sim.step();
    }
    let m = sim.last_metrics();
    println!(
        "  tick {:>3}: energy={:>10.4}, peak={:>7.4}, memory={} KiB",
        m.tick,
        m.energy,
        m.max_abs_amplitude,
        m.memory_bytes / 1024,
    );
}
