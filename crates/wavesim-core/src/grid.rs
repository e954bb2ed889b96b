//! Fixed-size 2D amplitude buffer.

use crate::error::{ConfigError, FieldError};

/// A `width × height` scalar field with uniform cell spacing.
///
/// Cells are stored row-major: cell `(x, y)` lives at `y * width + x`.
/// Dimensions are fixed at construction. Indexed access is bounds-checked
/// and never clamps; edge cells are the boundary policy's job.
///
/// # Examples
///
/// ```
/// use wavesim_core::Grid;
///
/// let mut g = Grid::new(4, 3).unwrap();
/// g.set(3, 2, 0.5).unwrap();
/// assert_eq!(g.get(3, 2).unwrap(), 0.5);
/// assert!(g.get(4, 0).is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    width: usize,
    height: usize,
    spacing: f64,
    cells: Vec<f32>,
}

impl Grid {
    /// Create a zero-filled grid with unit spacing.
    ///
    /// Returns `Err(ConfigError::InvalidDimensions)` if either side is zero
    /// or `width * height` overflows.
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        Self::with_spacing(width, height, 1.0)
    }

    /// Create a zero-filled grid whose cells are `spacing` apart.
    ///
    /// `spacing` is metadata for hosts mapping cells to world space; the
    /// integrator takes its `dx` from [`SimulationParameters`](crate::SimulationParameters).
    pub fn with_spacing(width: usize, height: usize, spacing: f64) -> Result<Self, ConfigError> {
        let len = checked_cell_count(width, height)?;
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "dx",
                value: spacing,
                reason: "finite and > 0",
            });
        }
        Ok(Self {
            width,
            height,
            spacing,
            cells: vec![0.0; len],
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Distance between neighbouring cell centres.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `(x, y)` lies on the outermost ring of cells.
    pub fn is_edge(&self, x: usize, y: usize) -> bool {
        x == 0 || y == 0 || x + 1 == self.width || y + 1 == self.height
    }

    /// Flat index of `(x, y)`.
    pub fn index(&self, x: usize, y: usize) -> Result<usize, FieldError> {
        if x >= self.width || y >= self.height {
            return Err(FieldError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// Amplitude at `(x, y)`.
    pub fn get(&self, x: usize, y: usize) -> Result<f32, FieldError> {
        let i = self.index(x, y)?;
        Ok(self.cells[i])
    }

    /// Overwrite the amplitude at `(x, y)`.
    pub fn set(&mut self, x: usize, y: usize, value: f32) -> Result<(), FieldError> {
        let i = self.index(x, y)?;
        self.cells[i] = value;
        Ok(())
    }

    /// Add `delta` to the amplitude at `(x, y)`.
    pub fn add(&mut self, x: usize, y: usize, delta: f32) -> Result<(), FieldError> {
        let i = self.index(x, y)?;
        self.cells[i] += delta;
        Ok(())
    }

    /// Set every cell to `value`.
    pub fn fill(&mut self, value: f32) {
        self.cells.fill(value);
    }

    /// Replace all cells from a row-major slice of matching length.
    pub fn load(&mut self, data: &[f32]) -> Result<(), FieldError> {
        if data.len() != self.cells.len() {
            return Err(FieldError::LengthMismatch {
                expected: self.cells.len(),
                actual: data.len(),
            });
        }
        self.cells.copy_from_slice(data);
        Ok(())
    }

    /// Visit every cell in row-major order as `(x, y, value)`.
    pub fn for_each(&self, mut f: impl FnMut(usize, usize, f32)) {
        for (y, row) in self.rows().enumerate() {
            for (x, &v) in row.iter().enumerate() {
                f(x, y, v);
            }
        }
    }

    /// Iterate over rows, top (`y = 0`) first.
    pub fn rows(&self) -> std::slice::Chunks<'_, f32> {
        self.cells.chunks(self.width)
    }

    /// Raw row-major cells.
    pub fn as_slice(&self) -> &[f32] {
        &self.cells
    }

    /// Raw row-major cells, mutable.
    ///
    /// Used by the integrator's inner loop, which indexes interior cells
    /// directly instead of going through [`get`](Self::get).
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.cells
    }

    /// Sum of squared amplitudes, the energy proxy used by step metrics.
    pub fn sum_of_squares(&self) -> f64 {
        self.cells.iter().map(|&v| f64::from(v) * f64::from(v)).sum()
    }

    /// Largest absolute amplitude (0 for an all-zero grid).
    pub fn max_abs(&self) -> f32 {
        self.cells.iter().fold(0.0f32, |m, v| m.max(v.abs()))
    }

    /// Whether both grids have the same width and height.
    pub fn same_shape(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height
    }
}

fn checked_cell_count(width: usize, height: usize) -> Result<usize, ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(ConfigError::InvalidDimensions { width, height })
}
