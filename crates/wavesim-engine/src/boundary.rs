//! Edge-cell policies, applied after the interior pass of every step.
//!
//! Ordering: the interior of `u[t+1]` is complete before anything here runs.
//! Each edge cell is then derived from `u[t]`, `u[t-1]`, and finished
//! interior cells of `u[t+1]`, never from another edge cell of the step in
//! progress.

use wavesim_core::{BoundaryKind, Grid};

use crate::integrator::Coefficients;

/// Produce every edge cell of `next` according to `kind`.
///
/// `courant` is `c·dt/dx`, needed by the Mur absorbing edge.
///
/// # Panics
///
/// Grids must share a shape of at least 3×3. Debug builds assert this;
/// smaller grids have no interior for the edge passes to read.
pub fn apply(
    kind: BoundaryKind,
    k: &Coefficients,
    courant: f32,
    previous: &Grid,
    current: &Grid,
    next: &mut Grid,
) {
    debug_assert!(
        next.width() >= 3 && next.height() >= 3,
        "edge passes need at least a 3x3 grid, got {}x{}",
        next.width(),
        next.height()
    );
    debug_assert!(current.same_shape(previous) && current.same_shape(next));
    match kind {
        BoundaryKind::Fixed(value) => fixed(value, next),
        BoundaryKind::Reflective => edge_stencil(k, previous, current, next, mirror),
        BoundaryKind::Absorbing(coefficient) => absorbing(coefficient, courant, current, next),
        BoundaryKind::Periodic => edge_stencil(k, previous, current, next, wrap),
    }
}

/// Visit each cell of the outer ring exactly once.
fn for_each_edge_cell(width: usize, height: usize, mut f: impl FnMut(usize, usize)) {
    for x in 0..width {
        f(x, 0);
        f(x, height - 1);
    }
    for y in 1..height - 1 {
        f(0, y);
        f(width - 1, y);
    }
}

/// Nearest interior cell: the inward neighbour for edge cells, the
/// diagonal one for corners.
#[inline]
fn inward(x: usize, y: usize, width: usize, height: usize) -> usize {
    y.clamp(1, height - 2) * width + x.clamp(1, width - 2)
}

/// Lower and upper neighbour along one axis, wrapping across the domain.
#[inline]
fn wrap(i: usize, len: usize) -> (usize, usize) {
    ((i + len - 1) % len, (i + 1) % len)
}

/// Lower and upper neighbour along one axis, mirrored at the ends: the
/// missing neighbour of an edge cell is its inward one, so the centred
/// gradient across the edge is zero.
#[inline]
fn mirror(i: usize, len: usize) -> (usize, usize) {
    let lower = if i == 0 { 1 } else { i - 1 };
    let upper = if i + 1 == len { len - 2 } else { i + 1 };
    (lower, upper)
}

fn fixed(value: f32, next: &mut Grid) {
    let (width, height) = (next.width(), next.height());
    let out = next.as_mut_slice();
    for_each_edge_cell(width, height, |x, y| out[y * width + x] = value);
}

/// First-order Mur: `u'[e] = u[i] + m·(u'[i] - u[e])` with
/// `m = (C - 1)/(C + 1)`, then scaled by `1 - coefficient`.
fn absorbing(coefficient: f32, courant: f32, current: &Grid, next: &mut Grid) {
    let (width, height) = (next.width(), next.height());
    let mur = (courant - 1.0) / (courant + 1.0);
    let retain = 1.0 - coefficient;
    let cur = current.as_slice();
    let out = next.as_mut_slice();
    for_each_edge_cell(width, height, |x, y| {
        let e = y * width + x;
        let i = inward(x, y, width, height);
        out[e] = retain * (cur[i] + mur * (out[i] - cur[e]));
    });
}

/// Full stencil on edge cells, with out-of-range neighbours resolved by
/// `neighbours`. Periodic edges wrap; reflective edges mirror.
fn edge_stencil(
    k: &Coefficients,
    previous: &Grid,
    current: &Grid,
    next: &mut Grid,
    neighbours: fn(usize, usize) -> (usize, usize),
) {
    let (width, height) = (next.width(), next.height());
    let prev = previous.as_slice();
    let cur = current.as_slice();
    let out = next.as_mut_slice();
    for_each_edge_cell(width, height, |x, y| {
        let (west, east) = neighbours(x, width);
        let (north, south) = neighbours(y, height);
        let i = y * width + x;
        out[i] = k.leapfrog(
            cur[i],
            prev[i],
            cur[y * width + west],
            cur[y * width + east],
            cur[north * width + x],
            cur[south * width + x],
        );
    });
}
