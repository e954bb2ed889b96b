//! Three-slot history ring for `u[t-1]`, `u[t]`, and `u[t+1]`.
//!
//! [`FieldState`] owns three equally sized grids allocated once at
//! construction. A cursor names which slot is "current"; the slot after it
//! is the scratch `u[t+1]` and the slot before it holds `u[t-1]`. Advancing
//! the cursor rotates the roles without touching any cell data:
//!
//! ```text
//! cursor = 0:  prev = slot 2   cur = slot 0   next = slot 1
//! cursor = 1:  prev = slot 0   cur = slot 1   next = slot 2
//! cursor = 2:  prev = slot 1   cur = slot 2   next = slot 0
//! ```
//!
//! After [`rotate`](FieldState::rotate) the old `u[t-1]` buffer becomes the
//! next step's scratch.

use wavesim_core::{ConfigError, Grid};

/// Borrowed views of all three slots for one step.
pub struct StepBuffers<'a> {
    /// `u[t-1]`, read-only.
    pub previous: &'a Grid,
    /// `u[t]`, read-only.
    pub current: &'a Grid,
    /// `u[t+1]`, written by the integrator and the boundary policy.
    pub next: &'a mut Grid,
}

/// Owner of the simulation's time history.
#[derive(Debug)]
pub struct FieldState {
    slots: [Grid; 3],
    cursor: usize,
}

impl FieldState {
    /// Allocate three zeroed `width × height` grids with spacing `dx`.
    pub fn new(width: usize, height: usize, dx: f64) -> Result<Self, ConfigError> {
        let grid = Grid::with_spacing(width, height, dx)?;
        Ok(Self {
            slots: [grid.clone(), grid.clone(), grid],
            cursor: 0,
        })
    }

    /// `u[t]`.
    pub fn current(&self) -> &Grid {
        &self.slots[self.cursor]
    }

    /// `u[t]`, mutable. Impulses and sources write here between steps.
    pub fn current_mut(&mut self) -> &mut Grid {
        &mut self.slots[self.cursor]
    }

    /// `u[t-1]`.
    pub fn previous(&self) -> &Grid {
        &self.slots[(self.cursor + 2) % 3]
    }

    /// `u[t-1]`, mutable. Only meaningful before the first step, when the
    /// slot is used to stage an initial velocity.
    pub fn previous_mut(&mut self) -> &mut Grid {
        &mut self.slots[(self.cursor + 2) % 3]
    }

    /// Seed `u[t-1] = u[t]`: the field starts at rest.
    pub fn seed_at_rest(&mut self) {
        let (previous, current) = self.previous_and_current();
        previous.as_mut_slice().copy_from_slice(current.as_slice());
    }

    /// Seed `u[t-1] = u[t] - dt·v`, where `v` was staged in the `u[t-1]`
    /// slot with [`previous_mut`](Self::previous_mut).
    pub fn seed_with_velocity(&mut self, dt: f32) {
        let (previous, current) = self.previous_and_current();
        for (p, &c) in previous.as_mut_slice().iter_mut().zip(current.as_slice()) {
            *p = c - dt * *p;
        }
    }

    fn previous_and_current(&mut self) -> (&mut Grid, &Grid) {
        let [a, b, c] = &mut self.slots;
        match self.cursor {
            0 => (c, a),
            1 => (a, b),
            _ => (b, c),
        }
    }

    /// Split into disjoint borrows of the three roles.
    pub fn buffers(&mut self) -> StepBuffers<'_> {
        let [a, b, c] = &mut self.slots;
        let (previous, current, next) = match self.cursor {
            0 => (c, a, b),
            1 => (a, b, c),
            _ => (b, c, a),
        };
        StepBuffers {
            previous,
            current,
            next,
        }
    }

    /// Rotate roles: `u[t-1] ← u[t]`, `u[t] ← u[t+1]`, and the old
    /// `u[t-1]` becomes scratch. No cell data is copied.
    pub fn rotate(&mut self) {
        self.cursor = (self.cursor + 1) % 3;
    }

    /// Zero every slot and return the cursor to its initial position.
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            slot.fill(0.0);
        }
        self.cursor = 0;
    }

    /// Bytes held by the three cell buffers.
    pub fn memory_bytes(&self) -> usize {
        3 * self.slots[0].cell_count() * std::mem::size_of::<f32>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_moves_next_into_current_and_current_into_previous() {
        let mut s = FieldState::new(3, 3, 1.0).unwrap();
        s.buffers().next.fill(2.0);
        s.current_mut().fill(1.0);
        s.rotate();
        assert!(s.current().as_slice().iter().all(|&v| v == 2.0));
        assert!(s.previous().as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn old_previous_becomes_scratch() {
        let mut s = FieldState::new(3, 3, 1.0).unwrap();
        // Slot that was `previous` at cursor 0 is slot 2; after one rotation
        // it must be handed out as `next`.
        let old_prev_ptr = s.previous().as_slice().as_ptr();
        s.rotate();
        let b = s.buffers();
        assert_eq!(b.next.as_slice().as_ptr(), old_prev_ptr);
    }

    #[test]
    fn three_rotations_return_to_start() {
        let mut s = FieldState::new(4, 3, 1.0).unwrap();
        let start = s.current().as_slice().as_ptr();
        for _ in 0..3 {
            s.rotate();
        }
        assert_eq!(s.current().as_slice().as_ptr(), start);
    }

    #[test]
    fn buffers_are_disjoint() {
        let mut s = FieldState::new(3, 3, 1.0).unwrap();
        for _ in 0..3 {
            let b = s.buffers();
            let p = b.previous.as_slice().as_ptr();
            let c = b.current.as_slice().as_ptr();
            let n = b.next.as_slice().as_ptr();
            assert!(p != c && c != n && p != n);
            s.rotate();
        }
    }

    #[test]
    fn seed_at_rest_copies_current() {
        let mut s = FieldState::new(3, 3, 1.0).unwrap();
        s.current_mut().set(1, 1, 0.5).unwrap();
        s.seed_at_rest();
        assert_eq!(s.previous().get(1, 1).unwrap(), 0.5);
    }

    #[test]
    fn seed_with_velocity_steps_backwards() {
        let mut s = FieldState::new(3, 3, 1.0).unwrap();
        s.current_mut().fill(1.0);
        s.previous_mut().fill(2.0);
        s.seed_with_velocity(0.25);
        assert!(s.previous().as_slice().iter().all(|&v| v == 0.5));
        assert!(s.current().as_slice().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn clear_zeroes_everything() {
        let mut s = FieldState::new(3, 3, 1.0).unwrap();
        s.current_mut().fill(1.0);
        s.rotate();
        s.current_mut().fill(2.0);
        s.clear();
        assert_eq!(s.current().max_abs(), 0.0);
        assert_eq!(s.previous().max_abs(), 0.0);
        assert_eq!(s.memory_bytes(), 3 * 9 * 4);
    }
}
