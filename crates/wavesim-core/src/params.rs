//! Physical and numerical parameters of a simulation run.

use crate::error::ConfigError;

/// Wave speed, time step, cell spacing, and damping.
///
/// # CFL stability
///
/// The explicit five-point scheme is stable only while the Courant number
/// `c·dt/dx` stays at or below `1/√2` ([`CFL_LIMIT`](Self::CFL_LIMIT)).
/// [`validate`](Self::validate) rejects anything above it, so an unstable
/// run is a construction error rather than a diverging field.
///
/// # Examples
///
/// ```
/// use wavesim_core::SimulationParameters;
///
/// let p = SimulationParameters::new(1.0, 0.5, 1.0);
/// assert!(p.validate().is_ok());
/// assert_eq!(p.courant_number(), 0.5);
///
/// let bad = SimulationParameters::new(10.0, 1.0, 1.0);
/// assert!(bad.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationParameters {
    /// Propagation speed `c`.
    pub wave_speed: f64,
    /// Time step `dt`.
    pub dt: f64,
    /// Cell spacing `dx`.
    pub dx: f64,
    /// Damping `γ` in `[0, 1)`. Zero is lossless.
    #[cfg_attr(feature = "serde", serde(default))]
    pub damping: f64,
}

impl SimulationParameters {
    /// Largest stable Courant number for the 2D five-point stencil.
    pub const CFL_LIMIT: f64 = std::f64::consts::FRAC_1_SQRT_2;

    // Relative slack so that `with_stable_dt(.., 1.0)` survives rounding.
    const CFL_TOLERANCE: f64 = 1e-9;

    /// Undamped parameters.
    pub fn new(wave_speed: f64, dt: f64, dx: f64) -> Self {
        Self {
            wave_speed,
            dt,
            dx,
            damping: 0.0,
        }
    }

    /// Parameters whose `dt` is `safety` times the largest stable step.
    ///
    /// `safety` of 1.0 sits exactly on the CFL limit; hosts usually pick
    /// something like 0.9.
    pub fn with_stable_dt(wave_speed: f64, dx: f64, safety: f64) -> Self {
        let dt = safety * dx * Self::CFL_LIMIT / wave_speed;
        Self::new(wave_speed, dt, dx)
    }

    /// Set the damping coefficient.
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    /// `c·dt/dx`.
    pub fn courant_number(&self) -> f64 {
        self.wave_speed * self.dt / self.dx
    }

    /// Largest `dt` that keeps this `c` and `dx` stable.
    pub fn max_stable_dt(&self) -> f64 {
        Self::CFL_LIMIT * self.dx / self.wave_speed
    }

    /// `(c·dt/dx)²`, the Laplacian weight in the update.
    pub fn stencil_weight(&self) -> f64 {
        let r = self.courant_number();
        r * r
    }

    /// Check every parameter and the CFL condition.
    ///
    /// # Errors
    ///
    /// - `InvalidParameter` if `wave_speed`, `dt`, or `dx` is not finite and
    ///   positive, or `damping` is outside `[0, 1)`.
    /// - `UnstableConfiguration` if the Courant number exceeds
    ///   [`CFL_LIMIT`](Self::CFL_LIMIT).
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("wave_speed", self.wave_speed)?;
        positive("dt", self.dt)?;
        positive("dx", self.dx)?;
        if !(self.damping >= 0.0 && self.damping < 1.0) {
            return Err(ConfigError::InvalidParameter {
                name: "damping",
                value: self.damping,
                reason: "in [0, 1)",
            });
        }
        let courant = self.courant_number();
        if !courant.is_finite() || courant > Self::CFL_LIMIT * (1.0 + Self::CFL_TOLERANCE) {
            return Err(ConfigError::UnstableConfiguration {
                courant,
                limit: Self::CFL_LIMIT,
            });
        }
        Ok(())
    }
}

impl Default for SimulationParameters {
    /// Unit speed and spacing with `dt = 0.5`, a Courant number of 0.5.
    fn default() -> Self {
        Self::new(1.0, 0.5, 1.0)
    }
}

fn positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidParameter {
            name,
            value,
            reason: "finite and > 0",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn default_is_stable() {
        let p = SimulationParameters::default();
        assert!(p.validate().is_ok());
        assert_eq!(p.stencil_weight(), 0.25);
    }

    #[test]
    fn rejects_classic_unstable_case() {
        let p = SimulationParameters::new(10.0, 1.0, 1.0);
        match p.validate() {
            Err(ConfigError::UnstableConfiguration { courant, limit }) => {
                assert_eq!(courant, 10.0);
                assert_eq!(limit, SimulationParameters::CFL_LIMIT);
            }
            other => panic!("expected UnstableConfiguration, got {other:?}"),
        }
    }

    #[test]
    fn exactly_on_limit_is_accepted() {
        let p = SimulationParameters::with_stable_dt(3.0, 0.25, 1.0);
        assert!((p.courant_number() - SimulationParameters::CFL_LIMIT).abs() < 1e-12);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn just_over_limit_is_rejected() {
        let p = SimulationParameters::with_stable_dt(1.0, 1.0, 1.001);
        assert!(matches!(
            p.validate(),
            Err(ConfigError::UnstableConfiguration { .. })
        ));
    }

    #[test]
    fn damping_range() {
        let base = SimulationParameters::default();
        assert!(base.with_damping(0.0).validate().is_ok());
        assert!(base.with_damping(0.99).validate().is_ok());
        assert!(base.with_damping(1.0).validate().is_err());
        assert!(base.with_damping(-0.1).validate().is_err());
        assert!(base.with_damping(f64::NAN).validate().is_err());
    }

    #[test]
    fn non_positive_inputs_rejected() {
        for p in [
            SimulationParameters::new(0.0, 0.5, 1.0),
            SimulationParameters::new(1.0, -0.5, 1.0),
            SimulationParameters::new(1.0, 0.5, 0.0),
            SimulationParameters::new(f64::INFINITY, 0.5, 1.0),
        ] {
            assert!(
                matches!(p.validate(), Err(ConfigError::InvalidParameter { .. })),
                "{p:?} should be rejected"
            );
        }
    }

    #[test]
    fn max_stable_dt_matches_limit() {
        let p = SimulationParameters::new(2.0, 0.1, 1.0);
        let expected = SimulationParameters::CFL_LIMIT / 2.0;
        assert!((p.max_stable_dt() - expected).abs() < 1e-12);
    }

    proptest! {
        #[test]
        fn validate_agrees_with_courant(
            c in 0.01f64..20.0,
            dt in 0.001f64..2.0,
            dx in 0.01f64..5.0,
        ) {
            let p = SimulationParameters::new(c, dt, dx);
            let stable = c * dt / dx <= SimulationParameters::CFL_LIMIT;
            if stable {
                prop_assert!(p.validate().is_ok());
            } else if c * dt / dx > SimulationParameters::CFL_LIMIT * 1.000001 {
                let rejected = matches!(
                    p.validate(),
                    Err(ConfigError::UnstableConfiguration { .. })
                );
                prop_assert!(rejected);
            }
        }
    }
}
