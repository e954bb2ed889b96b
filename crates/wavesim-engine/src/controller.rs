//! The simulation controller.
//!
//! [`Controller`] owns the field history, the boundary policy, and the
//! impulse queue. Each call to [`step`](Controller::step) advances exactly
//! one tick; [`advance_frame`](Controller::advance_frame) drains queued
//! impulses, applies them to `u[t]`, steps once, and returns a view of the
//! new field.
//!
//! # Ownership model
//!
//! `Controller` is [`Send`] but not meant to be shared: every mutating
//! method takes `&mut self`, and [`FieldView`] borrows from the controller.
//! A host therefore cannot step while still holding the previous frame's
//! view. Hosts that need to keep a frame past the next step copy it with
//! [`FieldView::to_grid`].
//!
//! # Step ordering
//!
//! 1. Driven sources are pinned in `u[t]`.
//! 2. On the first step after construction or reset, `u[t-1]` is seeded.
//! 3. The interior of `u[t+1]` is computed from `u[t]` and `u[t-1]`.
//! 4. The boundary policy writes every edge cell of `u[t+1]`.
//! 5. The ring rotates and the tick advances.

use std::ops::Deref;

use tracing::{debug, trace, warn};
use wavesim_core::{
    BoundaryKind, ConfigError, FieldError, Grid, Impulse, SimulationParameters,
};

use crate::boundary;
use crate::config::WaveConfig;
use crate::ingress::{ImpulseQueue, IngressError, InputSender, Receipt};
use crate::integrator::{self, Coefficients};
use crate::metrics::{StepMetrics, Stopwatch};
use crate::state::{FieldState, StepBuffers};

// Fails to compile if any field stops being Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Controller>();
        assert_send::<InputSender>();
    }
};

/// Read-only view of `u[t]` after a step.
///
/// Dereferences to [`Grid`], so every read accessor is available directly.
#[derive(Clone, Copy, Debug)]
pub struct FieldView<'a> {
    grid: &'a Grid,
    tick: u64,
    time: f64,
}

impl<'a> FieldView<'a> {
    /// Tick this field belongs to.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated time in seconds, `tick · dt`.
    pub fn time(&self) -> f64 {
        self.time
    }

    /// The underlying grid, with the view's lifetime.
    pub fn grid(&self) -> &'a Grid {
        self.grid
    }

    /// Owned copy of the field, independent of the controller.
    pub fn to_grid(&self) -> Grid {
        self.grid.clone()
    }
}

impl Deref for FieldView<'_> {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        self.grid
    }
}

/// Everything a host needs after one frame.
#[derive(Debug)]
pub struct FrameResult<'a> {
    /// `u[t]` after this frame's step.
    pub field: FieldView<'a>,
    /// One receipt per impulse drained this frame, in submission order.
    pub receipts: Vec<Receipt>,
    /// Metrics of this frame's step. Unchanged from the previous frame
    /// while paused.
    pub metrics: StepMetrics,
}

/// How `u[t-1]` is seeded on the first step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Seed {
    /// `u[t-1] = u[t]`.
    AtRest,
    /// `u[t-1] = u[t] - dt·v`, with `v` staged in the `u[t-1]` slot.
    Velocity,
}

/// Impulse outcomes since the last step.
#[derive(Clone, Copy, Debug, Default)]
struct ImpulseCounts {
    applied: u32,
    rejected: u32,
}

/// Owner and driver of a 2D wave simulation.
pub struct Controller {
    config: WaveConfig,
    coefficients: Coefficients,
    courant: f32,
    state: FieldState,
    ingress: ImpulseQueue,
    tick: u64,
    seed: Seed,
    paused: bool,
    sources_enabled: bool,
    pending: ImpulseCounts,
    last_metrics: StepMetrics,
}

impl Controller {
    /// Build a controller with no sources and the default queue capacity.
    ///
    /// Fails if the dimensions are below 3×3, a parameter is out of range,
    /// the CFL condition is violated, or the boundary is malformed.
    pub fn new(
        params: SimulationParameters,
        boundary: BoundaryKind,
        width: usize,
        height: usize,
    ) -> Result<Self, ConfigError> {
        Self::from_config(WaveConfig::new(width, height, params, boundary))
    }

    /// Build a controller from a full configuration.
    ///
    /// Validates first; nothing is allocated for an invalid configuration.
    pub fn from_config(config: WaveConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let state = FieldState::new(config.width, config.height, config.params.dx)?;
        let coefficients = Coefficients::from_params(&config.params);
        let courant = config.params.courant_number() as f32;
        let ingress = ImpulseQueue::new(config.max_pending_impulses);

        debug!(
            width = config.width,
            height = config.height,
            courant,
            boundary = config.boundary.name(),
            sources = config.sources.len(),
            "wave controller ready"
        );

        Ok(Self {
            config,
            coefficients,
            courant,
            state,
            ingress,
            tick: 0,
            seed: Seed::AtRest,
            paused: false,
            sources_enabled: true,
            pending: ImpulseCounts::default(),
            last_metrics: StepMetrics::default(),
        })
    }

    // ── Input ────────────────────────────────────────────────────

    /// Add an impulse to `u[t]` immediately.
    ///
    /// The centre must lie inside the grid; the field is untouched on
    /// error. Impulses applied before the first step become part of the
    /// initial displacement.
    pub fn apply_impulse(&mut self, impulse: Impulse) -> Result<(), FieldError> {
        let result = impulse.apply_to(self.state.current_mut());
        if result.is_ok() {
            self.pending.applied += 1;
        } else {
            self.pending.rejected += 1;
        }
        result
    }

    /// Like [`apply_impulse`](Self::apply_impulse), but an out-of-bounds
    /// centre is moved to the nearest cell instead of being rejected.
    pub fn apply_impulse_clamped(&mut self, impulse: Impulse) -> Result<(), FieldError> {
        let clamped = impulse.clamped(self.width(), self.height());
        self.apply_impulse(clamped)
    }

    /// Queue an impulse for the next [`advance_frame`](Self::advance_frame).
    pub fn queue_impulse(&self, impulse: Impulse) -> Result<(), IngressError> {
        self.ingress.sender().submit(impulse)
    }

    /// A cloneable handle for queuing impulses from other threads.
    pub fn input_handle(&self) -> InputSender {
        self.ingress.sender()
    }

    /// Impulses waiting for the next frame.
    pub fn pending_inputs(&self) -> usize {
        self.ingress.len()
    }

    /// Stage an initial velocity field `v`, so the first step starts from
    /// `u[t-1] = u[t] - dt·v` instead of rest.
    ///
    /// Returns `Ok(false)` and changes nothing once the simulation has
    /// stepped. Fails with [`FieldError::LengthMismatch`] if `velocity`
    /// does not have the field's shape.
    pub fn set_initial_velocity(&mut self, velocity: &Grid) -> Result<bool, FieldError> {
        if self.tick != 0 {
            return Ok(false);
        }
        let current = self.state.current();
        if !velocity.same_shape(current) {
            return Err(FieldError::LengthMismatch {
                expected: current.cell_count(),
                actual: velocity.cell_count(),
            });
        }
        self.state.previous_mut().load(velocity.as_slice())?;
        self.seed = Seed::Velocity;
        Ok(true)
    }

    // ── Stepping ─────────────────────────────────────────────────

    /// Advance one tick. Does nothing while paused.
    ///
    /// Cannot fail: every parameter was validated at construction and all
    /// buffers are pre-sized.
    pub fn step(&mut self) {
        if self.paused {
            return;
        }
        let total = Stopwatch::start();

        if self.sources_enabled && !self.config.sources.is_empty() {
            self.pin_sources();
        }
        if self.tick == 0 {
            match self.seed {
                Seed::AtRest => self.state.seed_at_rest(),
                Seed::Velocity => self.state.seed_with_velocity(self.config.params.dt as f32),
            }
        }

        let StepBuffers {
            previous,
            current,
            next,
        } = self.state.buffers();

        let interior = Stopwatch::start();
        integrator::step_interior(&self.coefficients, previous, current, next);
        let interior_us = interior.elapsed_us();

        let edges = Stopwatch::start();
        boundary::apply(
            self.config.boundary,
            &self.coefficients,
            self.courant,
            previous,
            current,
            next,
        );
        let boundary_us = edges.elapsed_us();

        self.state.rotate();
        self.tick += 1;

        let mut metrics = StepMetrics {
            tick: self.tick,
            interior_us,
            boundary_us,
            impulses_applied: self.pending.applied,
            impulses_rejected: self.pending.rejected,
            memory_bytes: self.state.memory_bytes(),
            ..StepMetrics::default()
        };
        metrics.record_field(self.state.current());
        metrics.total_us = total.elapsed_us();
        self.pending = ImpulseCounts::default();

        if metrics.non_finite_cells > 0 {
            warn!(
                tick = self.tick,
                cells = metrics.non_finite_cells,
                "non-finite amplitudes in field"
            );
        }
        trace!(
            tick = self.tick,
            energy = metrics.energy,
            peak = metrics.max_abs_amplitude,
            total_us = metrics.total_us,
            "step"
        );
        self.last_metrics = metrics;
    }

    /// Drain queued impulses, apply them in order, step once, and return
    /// the new field.
    ///
    /// A rejected impulse is reported in its receipt and never aborts the
    /// frame. While paused the impulses are still applied but no step runs.
    pub fn advance_frame(&mut self) -> FrameResult<'_> {
        let drained = self.ingress.drain();
        let mut receipts = Vec::with_capacity(drained.len());
        for impulse in drained {
            let result = self.apply_impulse(impulse);
            receipts.push(Receipt::from_result(impulse, result));
        }
        self.step();
        FrameResult {
            field: self.field_snapshot(),
            receipts,
            metrics: self.last_metrics.clone(),
        }
    }

    fn pin_sources(&mut self) {
        let t = self.time();
        let current = self.state.current_mut();
        let width = current.width();
        let cells = current.as_mut_slice();
        for source in &self.config.sources {
            cells[source.y * width + source.x] = source.value_at(t);
        }
    }

    // ── Lifecycle ────────────────────────────────────────────────

    /// Zero all three buffers, return to tick 0, and discard queued
    /// impulses and any staged velocity.
    ///
    /// Configuration, the pause flag, and the source toggle are kept, so
    /// resetting twice is the same as resetting once.
    pub fn reset(&mut self) {
        self.state.clear();
        self.tick = 0;
        self.seed = Seed::AtRest;
        self.ingress.clear();
        self.pending = ImpulseCounts::default();
        self.last_metrics = StepMetrics::default();
        debug!(
            width = self.config.width,
            height = self.config.height,
            "wave controller reset"
        );
    }

    /// Stop advancing; [`step`](Self::step) becomes a no-op.
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resume advancing.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Flip the pause flag and return the new state.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Whether stepping is paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Enable or disable all driven sources at once.
    pub fn set_sources_enabled(&mut self, enabled: bool) {
        self.sources_enabled = enabled;
    }

    /// Whether driven sources are pinned before each step.
    pub fn sources_enabled(&self) -> bool {
        self.sources_enabled
    }

    // ── Accessors ────────────────────────────────────────────────

    /// Borrow `u[t]`.
    pub fn field_snapshot(&self) -> FieldView<'_> {
        FieldView {
            grid: self.state.current(),
            tick: self.tick,
            time: self.time(),
        }
    }

    /// Steps taken since construction or the last reset.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.tick as f64 * self.config.params.dt
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.config.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.config.height
    }

    /// The configuration this controller was built from.
    pub fn config(&self) -> &WaveConfig {
        &self.config
    }

    /// Physical parameters.
    pub fn params(&self) -> &SimulationParameters {
        &self.config.params
    }

    /// Edge policy.
    pub fn boundary(&self) -> BoundaryKind {
        self.config.boundary
    }

    /// Metrics from the most recent step; all zero before the first.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("width", &self.config.width)
            .field("height", &self.config.height)
            .field("boundary", &self.config.boundary)
            .field("tick", &self.tick)
            .field("paused", &self.paused)
            .finish()
    }
}
