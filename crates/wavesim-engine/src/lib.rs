//! Integrator, boundary policies, and the frame-driven controller for
//! wave_sim.
//!
//! [`Controller`] is the entry point: build it from a [`WaveConfig`] (or
//! parameters, a boundary, and dimensions), feed it impulses, and call
//! [`Controller::step`] or [`Controller::advance_frame`] once per frame.
//! The lower-level pieces are public for hosts and benchmarks that drive
//! the update themselves:
//!
//! - [`FieldState`]: three-slot `u[t-1]`/`u[t]`/`u[t+1]` ring
//! - [`integrator`]: interior leapfrog pass and its [`Coefficients`]
//! - [`boundary`]: edge-cell policies
//! - [`DisplayScale`]: rolling-peak intensity mapping for rendering

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod boundary;
pub mod config;
pub mod controller;
pub mod display;
pub mod ingress;
pub mod integrator;
pub mod metrics;
pub mod state;

pub use config::WaveConfig;
pub use controller::{Controller, FieldView, FrameResult};
pub use display::DisplayScale;
pub use ingress::{IngressError, InputSender, Receipt};
pub use integrator::Coefficients;
pub use metrics::StepMetrics;
pub use state::{FieldState, StepBuffers};
