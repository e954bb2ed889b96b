//! Startup configuration and its validation.
//!
//! [`WaveConfig`] is everything a host supplies before the first frame.
//! It is immutable once a [`Controller`](crate::Controller) is built from
//! it; there is no hot-reload path.

use wavesim_core::{BoundaryKind, ConfigError, SimulationParameters, Source};

/// Complete configuration for constructing a [`Controller`](crate::Controller).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WaveConfig {
    /// Number of columns. At least 3.
    pub width: usize,
    /// Number of rows. At least 3.
    pub height: usize,
    /// Wave speed, time step, spacing, and damping.
    pub params: SimulationParameters,
    /// Edge treatment for all four sides.
    #[cfg_attr(feature = "serde", serde(default))]
    pub boundary: BoundaryKind,
    /// Continuously driven cells. Default: none.
    #[cfg_attr(feature = "serde", serde(default))]
    pub sources: Vec<Source>,
    /// Capacity of the cross-thread impulse queue. Default: 256.
    #[cfg_attr(
        feature = "serde",
        serde(default = "WaveConfig::default_max_pending_impulses")
    )]
    pub max_pending_impulses: usize,
}

impl WaveConfig {
    /// Smallest width or height: one interior cell surrounded by edges.
    pub const MIN_DIM: usize = 3;

    /// Default impulse queue capacity.
    pub const DEFAULT_MAX_PENDING_IMPULSES: usize = 256;

    /// A configuration with no sources and the default queue capacity.
    pub fn new(
        width: usize,
        height: usize,
        params: SimulationParameters,
        boundary: BoundaryKind,
    ) -> Self {
        Self {
            width,
            height,
            params,
            boundary,
            sources: Vec::new(),
            max_pending_impulses: Self::DEFAULT_MAX_PENDING_IMPULSES,
        }
    }

    /// Add a driven source.
    pub fn with_source(mut self, source: Source) -> Self {
        self.sources.push(source);
        self
    }

    #[cfg(feature = "serde")]
    fn default_max_pending_impulses() -> usize {
        Self::DEFAULT_MAX_PENDING_IMPULSES
    }

    /// Check every structural and numerical invariant.
    ///
    /// Checks run in a fixed order (dimensions, parameters, boundary,
    /// sources, queue) and the first failure is returned.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < Self::MIN_DIM
            || self.height < Self::MIN_DIM
            || self.width.checked_mul(self.height).is_none()
        {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        self.params.validate()?;
        self.boundary.validate()?;
        for (index, source) in self.sources.iter().enumerate() {
            source.validate(index, self.width, self.height)?;
        }
        if self.max_pending_impulses == 0 {
            return Err(ConfigError::IngressCapacityZero);
        }
        Ok(())
    }
}
