//! Per-step telemetry.
//!
//! [`StepMetrics`] captures timing and field statistics for a single step,
//! for hosts that profile the frame loop or normalise the display.

use wavesim_core::Grid;

/// Timing and field statistics collected during one step.
///
/// Durations are in microseconds and are always zero on `wasm32`, where the
/// core has no clock to read.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Tick reached by this step.
    pub tick: u64,
    /// Wall-clock time for the whole step.
    pub total_us: u64,
    /// Time spent in the interior stencil pass.
    pub interior_us: u64,
    /// Time spent producing edge cells.
    pub boundary_us: u64,
    /// Impulses applied to `u[t]` since the previous step.
    pub impulses_applied: u32,
    /// Impulses rejected since the previous step.
    pub impulses_rejected: u32,
    /// Sum of squared amplitudes of the new `u[t]`.
    pub energy: f64,
    /// Largest absolute amplitude of the new `u[t]`.
    pub max_abs_amplitude: f32,
    /// Cells of the new `u[t]` that are NaN or infinite. Always zero for
    /// a validated configuration fed finite impulses.
    pub non_finite_cells: usize,
    /// Bytes held by the three field buffers.
    pub memory_bytes: usize,
}

impl StepMetrics {
    /// Fill `energy`, `max_abs_amplitude`, and `non_finite_cells` from one
    /// pass over `field`.
    pub(crate) fn record_field(&mut self, field: &Grid) {
        let mut energy = 0.0f64;
        let mut peak = 0.0f32;
        let mut non_finite = 0usize;
        for &v in field.as_slice() {
            if v.is_finite() {
                energy += f64::from(v) * f64::from(v);
                peak = peak.max(v.abs());
            } else {
                non_finite += 1;
            }
        }
        self.energy = energy;
        self.max_abs_amplitude = peak;
        self.non_finite_cells = non_finite;
    }
}

/// Microsecond stopwatch that compiles to a no-op on `wasm32`.
pub(crate) struct Stopwatch {
    #[cfg(not(target_arch = "wasm32"))]
    start: std::time::Instant,
}

impl Stopwatch {
    pub(crate) fn start() -> Self {
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            start: std::time::Instant::now(),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub(crate) fn elapsed_us(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    #[cfg(target_arch = "wasm32")]
    pub(crate) fn elapsed_us(&self) -> u64 {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.tick, 0);
        assert_eq!(m.total_us, 0);
        assert_eq!(m.impulses_applied, 0);
        assert_eq!(m.energy, 0.0);
        assert_eq!(m.non_finite_cells, 0);
    }

    #[test]
    fn record_field_stats() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set(0, 0, 3.0).unwrap();
        g.set(1, 1, -4.0).unwrap();
        let mut m = StepMetrics::default();
        m.record_field(&g);
        assert_eq!(m.energy, 25.0);
        assert_eq!(m.max_abs_amplitude, 4.0);
        assert_eq!(m.non_finite_cells, 0);
    }

    #[test]
    fn non_finite_cells_counted_and_excluded() {
        let mut g = Grid::new(3, 3).unwrap();
        g.set(0, 0, f32::NAN).unwrap();
        g.set(1, 0, f32::INFINITY).unwrap();
        g.set(2, 0, 2.0).unwrap();
        let mut m = StepMetrics::default();
        m.record_field(&g);
        assert_eq!(m.non_finite_cells, 2);
        assert_eq!(m.energy, 4.0);
        assert_eq!(m.max_abs_amplitude, 2.0);
    }

    #[test]
    fn stopwatch_is_monotonic() {
        let sw = Stopwatch::start();
        let a = sw.elapsed_us();
        let b = sw.elapsed_us();
        assert!(b >= a);
    }
}
