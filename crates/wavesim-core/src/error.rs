//! Error types for the wave simulation core.
//!
//! Two families, matching how they are handled:
//!
//! - [`ConfigError`] is fatal and only ever surfaces from construction.
//!   A controller that failed validation never exists.
//! - [`FieldError`] is recoverable and is returned to the immediate caller
//!   of an indexed access or impulse application.

use std::error::Error;
use std::fmt;

/// Errors from indexed grid access and impulse application.
#[derive(Clone, Debug, PartialEq)]
pub enum FieldError {
    /// A cell coordinate lies outside `[0, width) x [0, height)`.
    OutOfBounds {
        /// Requested column.
        x: usize,
        /// Requested row.
        y: usize,
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },
    /// A bulk load did not match the grid's cell count.
    LengthMismatch {
        /// Cell count of the target grid.
        expected: usize,
        /// Length of the supplied data.
        actual: usize,
    },
    /// An impulse carried a non-finite amplitude or an unusable radius.
    InvalidImpulse {
        /// What was wrong with it.
        reason: String,
    },
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                x,
                y,
                width,
                height,
            } => write!(
                f,
                "cell ({x}, {y}) out of bounds for {width}x{height} grid"
            ),
            Self::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} cells, got {actual}")
            }
            Self::InvalidImpulse { reason } => write!(f, "invalid impulse: {reason}"),
        }
    }
}

impl Error for FieldError {}

/// Errors detected while validating a simulation configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// The Courant number `c·dt/dx` exceeds the 2D five-point stencil
    /// limit of `1/√2`.
    UnstableConfiguration {
        /// The configured Courant number.
        courant: f64,
        /// The stability limit it exceeded.
        limit: f64,
    },
    /// Width or height is too small for the requested use (zero for a bare
    /// [`Grid`](crate::Grid), below 3 for a simulation that needs an
    /// interior), or the cell count overflows `usize`.
    InvalidDimensions {
        /// Requested width.
        width: usize,
        /// Requested height.
        height: usize,
    },
    /// A scalar parameter is NaN, infinite, or outside its valid range.
    InvalidParameter {
        /// Parameter name (`wave_speed`, `dt`, `dx`, `damping`).
        name: &'static str,
        /// The rejected value.
        value: f64,
        /// The range it must lie in.
        reason: &'static str,
    },
    /// The boundary variant's parameter is unusable.
    InvalidBoundary {
        /// Description of the problem.
        reason: String,
    },
    /// A driven source is out of bounds or has a non-finite parameter.
    InvalidSource {
        /// Position of the source in the configured list.
        index: usize,
        /// Description of the problem.
        reason: String,
    },
    /// `max_pending_impulses` is zero.
    IngressCapacityZero,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnstableConfiguration { courant, limit } => write!(
                f,
                "unstable configuration: courant number c*dt/dx = {courant} exceeds {limit}"
            ),
            Self::InvalidDimensions { width, height } => {
                write!(f, "invalid grid dimensions {width}x{height}")
            }
            Self::InvalidParameter {
                name,
                value,
                reason,
            } => write!(f, "{name} must be {reason}, got {value}"),
            Self::InvalidBoundary { reason } => write!(f, "invalid boundary: {reason}"),
            Self::InvalidSource { index, reason } => {
                write!(f, "invalid source #{index}: {reason}")
            }
            Self::IngressCapacityZero => write!(f, "max_pending_impulses must be at least 1"),
        }
    }
}

impl Error for ConfigError {}
