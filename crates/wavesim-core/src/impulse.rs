//! Transient perturbations injected into the current field.

use crate::error::FieldError;
use crate::grid::Grid;

/// A one-off amplitude kick at a grid cell.
///
/// With no radius the whole `amplitude` lands on `(x, y)`. With a radius
/// it is spread as a Gaussian bump of standard deviation `radius` cells,
/// peaking at `amplitude` on the centre and cut off at three standard
/// deviations. Cells of the bump that fall outside the grid are dropped;
/// only the centre must be in bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Impulse {
    /// Column of the centre cell.
    pub x: usize,
    /// Row of the centre cell.
    pub y: usize,
    /// Amplitude added at the centre.
    pub amplitude: f32,
    /// Gaussian standard deviation in cells, or `None` for a single cell.
    #[cfg_attr(feature = "serde", serde(default))]
    pub radius: Option<f32>,
}

impl Impulse {
    /// Single-cell impulse.
    pub fn point(x: usize, y: usize, amplitude: f32) -> Self {
        Self {
            x,
            y,
            amplitude,
            radius: None,
        }
    }

    /// Gaussian-smoothed impulse.
    pub fn gaussian(x: usize, y: usize, amplitude: f32, radius: f32) -> Self {
        Self {
            x,
            y,
            amplitude,
            radius: Some(radius),
        }
    }

    /// The same impulse with its centre moved to the nearest cell of a
    /// `width × height` grid.
    ///
    /// This is the explicit opt-in for hosts that prefer clamping to an
    /// `OutOfBounds` error (e.g. a click just past the plot edge).
    pub fn clamped(self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.min(width.saturating_sub(1)),
            y: self.y.min(height.saturating_sub(1)),
            ..self
        }
    }

    /// Reject non-finite amplitudes and non-positive radii.
    pub fn validate(&self) -> Result<(), FieldError> {
        if !self.amplitude.is_finite() {
            return Err(FieldError::InvalidImpulse {
                reason: format!("amplitude must be finite, got {}", self.amplitude),
            });
        }
        if let Some(r) = self.radius {
            if !(r.is_finite() && r > 0.0) {
                return Err(FieldError::InvalidImpulse {
                    reason: format!("radius must be finite and > 0, got {r}"),
                });
            }
        }
        Ok(())
    }

    /// Add this impulse to `grid` in place.
    ///
    /// # Errors
    ///
    /// `OutOfBounds` if the centre is outside the grid, `InvalidImpulse` if
    /// [`validate`](Self::validate) fails. The grid is untouched on error.
    pub fn apply_to(&self, grid: &mut Grid) -> Result<(), FieldError> {
        self.validate()?;
        let centre = grid.index(self.x, self.y)?;
        let Some(sigma) = self.radius else {
            grid.as_mut_slice()[centre] += self.amplitude;
            return Ok(());
        };

        let width = grid.width();
        let height = grid.height();
        // Nothing past the far side of the grid can be touched, so a huge
        // sigma is cut to the grid extent before any index arithmetic.
        let reach = ((3.0 * sigma).ceil() as usize).min(width.max(height));
        let two_sigma_sq = 2.0 * sigma * sigma;
        let x0 = self.x.saturating_sub(reach);
        let x1 = self.x.saturating_add(reach).min(width - 1);
        let y0 = self.y.saturating_sub(reach);
        let y1 = self.y.saturating_add(reach).min(height - 1);

        let cells = grid.as_mut_slice();
        for y in y0..=y1 {
            let dy = y as f32 - self.y as f32;
            for x in x0..=x1 {
                let dx = x as f32 - self.x as f32;
                let weight = (-(dx * dx + dy * dy) / two_sigma_sq).exp();
                cells[y * width + x] += self.amplitude * weight;
            }
        }
        Ok(())
    }
}
