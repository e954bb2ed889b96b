//! Edge treatment for the outermost ring of cells.

use crate::error::ConfigError;

/// How edge cells are produced each step.
///
/// Chosen once per run and applied to all four edges. The set is closed:
/// the engine dispatches on it with a single `match` per step.
///
/// # Examples
///
/// ```
/// use wavesim_core::BoundaryKind;
///
/// assert!(BoundaryKind::Absorbing(0.2).validate().is_ok());
/// assert!(BoundaryKind::Absorbing(1.5).validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryKind {
    /// Dirichlet: edge cells are pinned to the given value every step.
    Fixed(f32),
    /// Neumann (zero gradient), a rigid wall: edge cells take the full
    /// stencil with the missing neighbour mirrored from the inward side.
    Reflective,
    /// First-order Mur absorbing edge, additionally scaled toward zero by
    /// the coefficient in `[0, 1]` each step.
    ///
    /// This only approximates a non-reflecting boundary: waves hitting the
    /// edge at an angle still reflect partially.
    Absorbing(f32),
    /// Edge cells take the full stencil with neighbours wrapped to the
    /// opposite edge, making the domain a torus.
    Periodic,
}

impl BoundaryKind {
    /// Check the variant's parameter.
    ///
    /// `Fixed` needs a finite value; `Absorbing` needs a coefficient in
    /// `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match *self {
            Self::Fixed(value) if !value.is_finite() => Err(ConfigError::InvalidBoundary {
                reason: format!("fixed edge value must be finite, got {value}"),
            }),
            Self::Absorbing(k) if !(0.0..=1.0).contains(&k) => {
                Err(ConfigError::InvalidBoundary {
                    reason: format!("absorbing coefficient must be in [0, 1], got {k}"),
                })
            }
            _ => Ok(()),
        }
    }

    /// Short lowercase name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed(_) => "fixed",
            Self::Reflective => "reflective",
            Self::Absorbing(_) => "absorbing",
            Self::Periodic => "periodic",
        }
    }
}

impl Default for BoundaryKind {
    fn default() -> Self {
        Self::Fixed(0.0)
    }
}
