//! Continuously driven point sources.

use std::f64::consts::TAU;

use crate::error::ConfigError;

/// A hard sinusoidal source pinned to one cell.
///
/// Before every step the cell's current amplitude is overwritten with
/// `amplitude · sin(2π·frequency_hz·t + phase)`, where `t` is simulated
/// time (`tick · dt`), so runs stay reproducible regardless of frame rate.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Source {
    /// Column of the driven cell.
    pub x: usize,
    /// Row of the driven cell.
    pub y: usize,
    /// Peak amplitude.
    pub amplitude: f32,
    /// Oscillation frequency in cycles per unit of simulated time.
    pub frequency_hz: f64,
    /// Phase offset in radians.
    #[cfg_attr(feature = "serde", serde(default))]
    pub phase: f64,
}

impl Source {
    /// Zero-phase source.
    pub fn new(x: usize, y: usize, amplitude: f32, frequency_hz: f64) -> Self {
        Self {
            x,
            y,
            amplitude,
            frequency_hz,
            phase: 0.0,
        }
    }

    /// Drive value at simulated time `t`.
    pub fn value_at(&self, t: f64) -> f32 {
        (f64::from(self.amplitude) * (TAU * self.frequency_hz * t + self.phase).sin()) as f32
    }

    /// Check the source against a `width × height` grid.
    ///
    /// `index` is the source's position in the configured list and is only
    /// used for the error message.
    pub fn validate(&self, index: usize, width: usize, height: usize) -> Result<(), ConfigError> {
        if self.x >= width || self.y >= height {
            return Err(ConfigError::InvalidSource {
                index,
                reason: format!(
                    "cell ({}, {}) outside {width}x{height} grid",
                    self.x, self.y
                ),
            });
        }
        if !self.amplitude.is_finite() || !self.frequency_hz.is_finite() || !self.phase.is_finite()
        {
            return Err(ConfigError::InvalidSource {
                index,
                reason: "amplitude, frequency and phase must be finite".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero_without_phase() {
        let s = Source::new(1, 1, 5.0, 4.0);
        assert_eq!(s.value_at(0.0), 0.0);
    }

    #[test]
    fn quarter_period_hits_peak() {
        let s = Source::new(1, 1, 5.0, 4.0);
        assert!((s.value_at(1.0 / 16.0) - 5.0).abs() < 1e-5);
    }

    #[test]
    fn phase_shifts_waveform() {
        let s = Source {
            phase: std::f64::consts::FRAC_PI_2,
            ..Source::new(0, 0, 2.0, 1.0)
        };
        assert!((s.value_at(0.0) - 2.0).abs() < 1e-6);
    }

    #[test]
    fn validate_bounds_and_finiteness() {
        assert!(Source::new(2, 2, 1.0, 1.0).validate(0, 3, 3).is_ok());
        assert!(matches!(
            Source::new(3, 0, 1.0, 1.0).validate(4, 3, 3),
            Err(ConfigError::InvalidSource { index: 4, .. })
        ));
        assert!(Source::new(0, 0, f32::NAN, 1.0).validate(0, 3, 3).is_err());
    }
}
