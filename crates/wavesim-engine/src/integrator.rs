//! Explicit leapfrog update for the damped 2D wave equation.
//!
//! ```text
//! u[t+1] = (2 - γ)·u[t] - (1 - γ)·u[t-1]
//!        + (c·dt/dx)² · (E + W + N + S - 4·u[t])
//! ```
//!
//! Only interior cells (`1 ≤ x < width-1`, `1 ≤ y < height-1`) are written
//! here; edges belong to the boundary policy. The pass reads `u[t]` and
//! `u[t-1]` only and cannot fail: buffers are pre-sized and the parameters
//! were CFL-checked at construction.

use wavesim_core::{Grid, SimulationParameters};

/// Per-run constants of the update, precomputed in field precision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coefficients {
    /// `2 - γ`, weight of `u[t]`.
    pub keep: f32,
    /// `1 - γ`, weight of `u[t-1]`.
    pub recall: f32,
    /// `(c·dt/dx)²`, weight of the Laplacian.
    pub weight: f32,
}

impl Coefficients {
    /// Derive the update weights from validated parameters.
    pub fn from_params(params: &SimulationParameters) -> Self {
        Self {
            keep: (2.0 - params.damping) as f32,
            recall: (1.0 - params.damping) as f32,
            weight: params.stencil_weight() as f32,
        }
    }

    /// Update a single cell from its value, its previous value, and its
    /// four neighbours at `t`.
    ///
    /// Shared by the interior pass and the periodic edge pass so both
    /// evaluate the stencil in the same order.
    #[inline(always)]
    pub fn leapfrog(
        &self,
        centre: f32,
        previous: f32,
        west: f32,
        east: f32,
        north: f32,
        south: f32,
    ) -> f32 {
        let laplacian = west + east + north + south - 4.0 * centre;
        self.keep * centre - self.recall * previous + self.weight * laplacian
    }
}

/// Write `u[t+1]` for every interior cell.
///
/// All three grids must share a shape; the controller guarantees this by
/// allocating them together.
pub fn step_interior(k: &Coefficients, previous: &Grid, current: &Grid, next: &mut Grid) {
    debug_assert!(current.same_shape(previous) && current.same_shape(next));
    let width = current.width();
    let height = current.height();
    let prev = previous.as_slice();
    let cur = current.as_slice();
    let out = next.as_mut_slice();

    for y in 1..height - 1 {
        let row = y * width;
        let above = row - width;
        let below = row + width;
        for x in 1..width - 1 {
            let i = row + x;
            out[i] = k.leapfrog(
                cur[i],
                prev[i],
                cur[i - 1],
                cur[i + 1],
                cur[above + x],
                cur[below + x],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coeffs(damping: f64) -> Coefficients {
        Coefficients::from_params(&SimulationParameters::new(1.0, 0.5, 1.0).with_damping(damping))
    }

    #[test]
    fn coefficients_from_params() {
        let k = coeffs(0.1);
        assert!((k.keep - 1.9).abs() < 1e-6);
        assert!((k.recall - 0.9).abs() < 1e-6);
        assert_eq!(k.weight, 0.25);
    }

    #[test]
    fn flat_field_at_rest_stays_flat() {
        let k = coeffs(0.0);
        assert_eq!(k.leapfrog(3.0, 3.0, 3.0, 3.0, 3.0, 3.0), 3.0);
    }

    #[test]
    fn centre_impulse_spreads_to_neighbours() {
        let k = coeffs(0.0);
        let mut cur = Grid::new(5, 5).unwrap();
        cur.set(2, 2, 1.0).unwrap();
        let prev = cur.clone();
        let mut next = Grid::new(5, 5).unwrap();
        next.fill(-9.0);

        step_interior(&k, &prev, &cur, &mut next);

        // 2·1 - 1 + 0.25·(-4) = 0 at the centre, 0.25 next to it.
        assert_eq!(next.get(2, 2).unwrap(), 0.0);
        for (x, y) in [(1, 2), (3, 2), (2, 1), (2, 3)] {
            assert_eq!(next.get(x, y).unwrap(), 0.25);
        }
        assert_eq!(next.get(1, 1).unwrap(), 0.0);
    }

    #[test]
    fn edges_are_not_written() {
        let k = coeffs(0.0);
        let mut cur = Grid::new(4, 4).unwrap();
        cur.fill(1.0);
        let prev = cur.clone();
        let mut next = Grid::new(4, 4).unwrap();
        next.fill(-1.0);

        step_interior(&k, &prev, &cur, &mut next);

        next.for_each(|x, y, v| {
            if next.is_edge(x, y) {
                assert_eq!(v, -1.0, "edge ({x}, {y}) was touched");
            } else {
                assert_eq!(v, 1.0);
            }
        });
    }

    #[test]
    fn damping_reduces_velocity() {
        let undamped = coeffs(0.0).leapfrog(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        let damped = coeffs(0.5).leapfrog(1.0, 0.0, 0.0, 0.0, 0.0, 0.0);
        assert!(damped < undamped);
    }

    #[test]
    fn minimal_grid_has_one_interior_cell() {
        let k = coeffs(0.0);
        let mut cur = Grid::new(3, 3).unwrap();
        cur.set(1, 1, 2.0).unwrap();
        let prev = cur.clone();
        let mut next = Grid::new(3, 3).unwrap();
        step_interior(&k, &prev, &cur, &mut next);
        // 2·2 - 2 + 0.25·(-8) = 0
        assert_eq!(next.get(1, 1).unwrap(), 0.0);
    }
}
