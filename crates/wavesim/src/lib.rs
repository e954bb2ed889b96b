//! wave_sim: a real-time 2D wave-equation simulation core.
//!
//! This is the facade crate that re-exports the public API of the wave_sim
//! sub-crates. For most hosts, adding `wavesim` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use wavesim::prelude::*;
//!
//! let params = SimulationParameters::new(1.0, 0.5, 1.0);
//! let mut sim = Controller::new(params, BoundaryKind::Fixed(0.0), 5, 5).unwrap();
//!
//! sim.apply_impulse(Impulse::point(2, 2, 1.0)).unwrap();
//! sim.step();
//!
//! let field = sim.field_snapshot();
//! assert_eq!(field.tick(), 1);
//! assert_eq!(field.get(1, 2).unwrap(), 0.25);
//! assert_eq!(field.get(0, 0).unwrap(), 0.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `wavesim-core` | Grid, parameters, boundaries, impulses, errors |
//! | [`engine`] | `wavesim-engine` | Controller, integrator, boundary passes, ingress |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core data types and errors (`wavesim-core`).
///
/// Contains [`types::Grid`], [`types::SimulationParameters`],
/// [`types::BoundaryKind`], and the error enums.
pub use wavesim_core as types;

/// Integrator and controller (`wavesim-engine`).
///
/// [`engine::Controller`] drives the simulation; the integrator and
/// boundary modules are public for hosts that step buffers themselves.
pub use wavesim_engine as engine;

/// Common imports for typical wave_sim usage.
///
/// ```rust
/// use wavesim::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use wavesim_core::{BoundaryKind, Grid, Impulse, SimulationParameters, Source};

    // Errors
    pub use wavesim_core::{ConfigError, FieldError};
    pub use wavesim_engine::IngressError;

    // Engine
    pub use wavesim_engine::{
        Controller, DisplayScale, FieldView, FrameResult, InputSender, Receipt, StepMetrics,
        WaveConfig,
    };
}
