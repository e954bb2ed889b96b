//! Test fixtures and field assertions for wave_sim development.
//!
//! Shared by the engine's integration tests and the benchmarks so both
//! build controllers the same way.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use wavesim_core::{BoundaryKind, Grid, Impulse, SimulationParameters};
use wavesim_engine::{Controller, WaveConfig};

/// Parameters with Courant number 0.5: `c = 1`, `dt = 0.5`, `dx = 1`.
pub fn half_courant() -> SimulationParameters {
    SimulationParameters::new(1.0, 0.5, 1.0)
}

/// An `n × n` configuration at [`half_courant`] with the given edges.
pub fn square_config(n: usize, boundary: BoundaryKind) -> WaveConfig {
    WaveConfig::new(n, n, half_courant(), boundary)
}

/// An `n × n` controller at [`half_courant`].
///
/// # Panics
///
/// If `n < 3` or `boundary` is malformed.
pub fn square_controller(n: usize, boundary: BoundaryKind) -> Controller {
    Controller::from_config(square_config(n, boundary)).expect("fixture config is valid")
}

/// 5×5, fixed zero edges, unit point impulse at the centre, not yet
/// stepped.
pub fn scenario_5x5() -> Controller {
    let mut c = square_controller(5, BoundaryKind::Fixed(0.0));
    c.apply_impulse(Impulse::point(2, 2, 1.0))
        .expect("centre is in bounds");
    c
}

/// Sum of squared amplitudes.
pub fn energy(grid: &Grid) -> f64 {
    grid.sum_of_squares()
}

/// Quadrature weight of a cell: 1 inside, 1/2 on an edge, 1/4 at a
/// corner. Mirrored edges conserve sums taken with these weights.
pub fn edge_weight(grid: &Grid, x: usize, y: usize) -> f64 {
    let half = |i: usize, len: usize| if i == 0 || i + 1 == len { 0.5 } else { 1.0 };
    half(x, grid.width()) * half(y, grid.height())
}

/// Sum of amplitudes, weighted by [`edge_weight`].
pub fn weighted_sum(grid: &Grid) -> f64 {
    let mut sum = 0.0;
    grid.for_each(|x, y, v| sum += edge_weight(grid, x, y) * f64::from(v));
    sum
}

/// Sum of squared amplitudes, weighted by [`edge_weight`].
pub fn weighted_energy(grid: &Grid) -> f64 {
    let mut sum = 0.0;
    grid.for_each(|x, y, v| sum += edge_weight(grid, x, y) * f64::from(v) * f64::from(v));
    sum
}

/// Mean of [`energy`] over the next `n` steps.
pub fn mean_energy_over(controller: &mut Controller, n: usize) -> f64 {
    let mut total = 0.0;
    for _ in 0..n {
        controller.step();
        total += energy(&controller.field_snapshot());
    }
    total / n as f64
}

/// Panic with the first offending cell if any amplitude is NaN or infinite.
pub fn assert_all_finite(grid: &Grid) {
    grid.for_each(|x, y, v| {
        assert!(v.is_finite(), "cell ({x}, {y}) is {v}");
    });
}

/// Step `controller` `n` times and return the largest energy seen,
/// including the starting field.
pub fn run_tracking_peak_energy(controller: &mut Controller, n: usize) -> f64 {
    let mut peak = energy(&controller.field_snapshot());
    for _ in 0..n {
        controller.step();
        peak = peak.max(energy(&controller.field_snapshot()));
    }
    peak
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weighted_sum_halves_edges_and_quarters_corners() {
        let mut g = Grid::new(3, 3).unwrap();
        g.fill(1.0);
        // 1 + 4·0.5 + 4·0.25
        assert_eq!(weighted_sum(&g), 4.0);
        assert_eq!(energy(&g), 9.0);
        g.fill(2.0);
        assert_eq!(weighted_energy(&g), 16.0);
        assert_eq!(edge_weight(&g, 0, 1), 0.5);
    }

    #[test]
    fn scenario_has_unit_centre() {
        let c = scenario_5x5();
        assert_eq!(c.field_snapshot().get(2, 2).unwrap(), 1.0);
        assert_eq!(c.tick(), 0);
    }
}
