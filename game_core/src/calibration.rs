//! Finger-range calibration
//!
//! Two timed stages record how far the player can raise and lower their
//! index finger. The resulting [`CalibrationRange`] maps live finger offsets
//! onto a vertical paddle position for the rest of the match.

use thiserror::Error;
use tracing::info;

use crate::Params;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CalibrationError {
    #[error("degenerate calibration range: min {min_diff:.4} >= max {max_diff:.4}")]
    Degenerate { min_diff: f32, max_diff: f32 },
}

/// Observed finger offset extremes
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationRange {
    min_diff: f32,
    max_diff: f32,
}

impl CalibrationRange {
    pub fn new(min_diff: f32, max_diff: f32) -> Result<Self, CalibrationError> {
        // `!(a < b)` also rejects NaN
        if !(min_diff < max_diff) {
            return Err(CalibrationError::Degenerate { min_diff, max_diff });
        }
        Ok(Self { min_diff, max_diff })
    }

    /// Range used when calibration does not produce a usable one
    pub fn fallback() -> Self {
        Self {
            min_diff: Params::FALLBACK_MIN_DIFF,
            max_diff: Params::FALLBACK_MAX_DIFF,
        }
    }

    pub fn min_diff(&self) -> f32 {
        self.min_diff
    }

    pub fn max_diff(&self) -> f32 {
        self.max_diff
    }

    /// Normalise an offset into `[0, 1]`; `None` if the range has no width
    pub fn fraction(&self, offset: f32) -> Option<f32> {
        let motion_range = self.max_diff - self.min_diff;
        if !(motion_range > 0.0) {
            return None;
        }
        Some(((offset - self.min_diff) / motion_range).clamp(0.0, 1.0))
    }

    /// Vertical screen target for an offset. A raised finger gives a larger
    /// offset, which maps to a smaller y (higher on screen).
    pub fn target_y(&self, offset: f32, screen_height: f32) -> Option<f32> {
        self.fraction(offset)
            .map(|fraction| screen_height - fraction * screen_height)
    }
}

/// Calibration stage, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationStage {
    RaiseFinger,
    LowerFinger,
}

impl CalibrationStage {
    pub fn instruction(self) -> &'static str {
        match self {
            CalibrationStage::RaiseFinger => "Raise your index finger as HIGH as possible",
            CalibrationStage::LowerFinger => "Now, lower it as LOW as possible",
        }
    }
}

/// Progress report from [`Calibrator::tick`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CalibrationStatus {
    Running {
        stage: CalibrationStage,
        seconds_left: u32,
    },
    Finished,
}

/// Runs the two countdown stages against wall-clock time.
///
/// Time is passed in as seconds since an arbitrary epoch so the calibrator is
/// independent of the frame rate and can be driven from tests.
#[derive(Debug, Clone)]
pub struct Calibrator {
    countdown: f32,
    stage: Option<CalibrationStage>,
    stage_started: f32,
    min_diff: f32,
    max_diff: f32,
    samples: u32,
}

impl Calibrator {
    pub fn new(countdown: f32, now: f32) -> Self {
        Self {
            countdown,
            stage: Some(CalibrationStage::RaiseFinger),
            stage_started: now,
            min_diff: 1.0,
            max_diff: 0.0,
            samples: 0,
        }
    }

    /// Feed one tick. Ticks without a detected hand only advance the clock.
    pub fn tick(&mut self, now: f32, reading: Option<f32>) -> CalibrationStatus {
        let Some(mut stage) = self.stage else {
            return CalibrationStatus::Finished;
        };

        if now - self.stage_started >= self.countdown {
            match stage {
                CalibrationStage::RaiseFinger => {
                    stage = CalibrationStage::LowerFinger;
                    self.stage = Some(stage);
                    self.stage_started = now;
                }
                CalibrationStage::LowerFinger => {
                    self.stage = None;
                    return CalibrationStatus::Finished;
                }
            }
        }

        if let Some(diff) = reading {
            self.samples += 1;
            match stage {
                CalibrationStage::RaiseFinger => self.max_diff = self.max_diff.max(diff),
                CalibrationStage::LowerFinger => self.min_diff = self.min_diff.min(diff),
            }
        }

        let elapsed = (now - self.stage_started).max(0.0);
        CalibrationStatus::Running {
            stage,
            seconds_left: (self.countdown - elapsed.floor()).max(0.0) as u32,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.stage.is_none()
    }

    /// The measured range, or the reason it cannot be used
    pub fn finish(&self) -> Result<CalibrationRange, CalibrationError> {
        info!(
            min_diff = self.min_diff,
            max_diff = self.max_diff,
            samples = self.samples,
            "Calibration complete"
        );
        CalibrationRange::new(self.min_diff, self.max_diff)
    }
}
