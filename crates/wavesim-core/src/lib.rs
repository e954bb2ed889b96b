//! Core types for the wave_sim wave-equation engine.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! data the engine operates on and the errors it reports:
//!
//! - [`Grid`]: fixed-size, bounds-checked 2D amplitude buffer
//! - [`SimulationParameters`]: wave speed, time step, spacing, damping, and
//!   the CFL check
//! - [`BoundaryKind`]: the closed set of edge treatments
//! - [`Impulse`] and [`Source`]: external perturbations
//! - [`FieldError`] and [`ConfigError`]
//!
//! Nothing here performs I/O, so the crate builds unchanged for native and
//! `wasm32` targets. Enable the `serde` feature to (de)serialise the
//! configuration types.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod error;
pub mod grid;
pub mod impulse;
pub mod params;
pub mod source;

pub use boundary::BoundaryKind;
pub use error::{ConfigError, FieldError};
pub use grid::Grid;
pub use impulse::Impulse;
pub use params::SimulationParameters;
pub use source::Source;
