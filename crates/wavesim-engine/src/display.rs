//! Amplitude-to-intensity mapping for hosts that render the field.
//!
//! The peak used for normalisation is a rolling average of recent per-frame
//! maxima, clamped to `[0.1, 0.9]`, so a single loud frame does not blank
//! the picture and a quiet field does not amplify noise. The mapping itself
//! is logarithmic:
//!
//! ```text
//! intensity = clamp(ln(48·|a| / peak + 1) / 4, 0, 1)
//! ```

use std::collections::VecDeque;

use wavesim_core::Grid;

const GAIN: f32 = 48.0;
const LOG_SCALE: f32 = 4.0;
const PEAK_MIN: f32 = 0.1;
const PEAK_MAX: f32 = 0.9;
const INITIAL_PEAK: f32 = 0.5;

/// Rolling peak tracker and intensity mapper.
#[derive(Clone, Debug)]
pub struct DisplayScale {
    window: usize,
    history: VecDeque<f32>,
    peak: f32,
}

impl Default for DisplayScale {
    fn default() -> Self {
        Self::new(Self::DEFAULT_WINDOW)
    }
}

impl DisplayScale {
    /// Frames averaged by [`Default`].
    pub const DEFAULT_WINDOW: usize = 8;

    /// A tracker averaging the last `window` frames (at least one).
    pub fn new(window: usize) -> Self {
        let window = window.max(1);
        Self {
            window,
            history: VecDeque::with_capacity(window),
            peak: INITIAL_PEAK,
        }
    }

    /// Record one frame's maximum absolute amplitude.
    ///
    /// Non-finite peaks are ignored.
    pub fn observe(&mut self, frame_peak: f32) {
        if !frame_peak.is_finite() {
            return;
        }
        if self.history.len() == self.window {
            self.history.pop_front();
        }
        self.history.push_back(frame_peak.abs());
        let mean = self.history.iter().sum::<f32>() / self.history.len() as f32;
        self.peak = mean.clamp(PEAK_MIN, PEAK_MAX);
    }

    /// Current normalisation peak.
    pub fn peak(&self) -> f32 {
        self.peak
    }

    /// Map one amplitude to `[0, 1]`. NaN maps to 0.
    pub fn intensity(&self, amplitude: f32) -> f32 {
        let v = (GAIN * amplitude.abs() / self.peak + 1.0).ln() / LOG_SCALE;
        if v.is_nan() {
            0.0
        } else {
            v.clamp(0.0, 1.0)
        }
    }

    /// Map a whole field into `out`, reusing its allocation.
    pub fn intensities(&self, field: &Grid, out: &mut Vec<f32>) {
        out.clear();
        out.extend(field.as_slice().iter().map(|&a| self.intensity(a)));
    }
}
