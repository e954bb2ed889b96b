//! Benchmark profiles for wave_sim.
//!
//! Provides pre-built [`WaveConfig`] profiles for benchmarking and examples:
//!
//! - [`reference_profile`]: 256x256 grid (~65K cells), absorbing edges
//! - [`stress_profile`]: 1024x1024 grid (~1M cells) for stress testing
//! - [`seed_impulses`]: deterministic spread of initial impulses

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use wavesim_core::{BoundaryKind, FieldError, Impulse, SimulationParameters};
use wavesim_engine::{Controller, WaveConfig};

/// Build the reference profile: 256x256, `c = 1`, `dx = 1`, `dt` at 90% of
/// the CFL limit, Mur absorbing edges, light damping.
pub fn reference_profile() -> WaveConfig {
    profile(256)
}

/// Build the stress profile: 1024x1024 with the reference parameters.
pub fn stress_profile() -> WaveConfig {
    profile(1024)
}

fn profile(n: usize) -> WaveConfig {
    let params = SimulationParameters::with_stable_dt(1.0, 1.0, 0.9).with_damping(0.001);
    WaveConfig::new(n, n, params, BoundaryKind::Absorbing(0.0))
}

/// Place `count` Gaussian impulses on a fixed diagonal lattice so every
/// run starts from the same field.
///
/// Impulses alternate in sign and run from the lower left to the upper
/// right of the grid.
pub fn seed_impulses(controller: &mut Controller, count: usize) -> Result<(), FieldError> {
    let width = controller.width();
    let height = controller.height();
    for i in 0..count {
        let x = (i + 1) * width / (count + 1);
        let y = (count - i) * height / (count + 1);
        let amplitude = if i % 2 == 0 { 1.0 } else { -1.0 };
        controller.apply_impulse_clamped(Impulse::gaussian(x, y, amplitude, 3.0))?;
    }
    Ok(())
}
