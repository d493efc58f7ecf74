//! Reading-speed models and reading-time prediction.
//!
//! A [`SpeedAdjustment`] turns a baseline reading speed and a Flesch score
//! into an effective speed. [`ExponentialAdjustment`] is the default model:
//!
//! `speed = base / sqrt(factor) * exp(ln(factor) / span * score)`
//!
//! With the default `factor = 4` and `span = 121.5` the speed is halved at a
//! score of `0` and doubled at `121.5`. [`Unadjusted`] ignores the score.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default ratio between the effective speeds at `score = span` and
/// `score = 0`.
pub const DEFAULT_FACTOR: f64 = 4.0;
/// Default score at which the baseline is multiplied by `sqrt(factor)`.
pub const DEFAULT_SPAN: f64 = 121.5;
/// Default baseline in words per minute.
pub const DEFAULT_READING_SPEED: f64 = 200.0;

const SECONDS_PER_MINUTE: f64 = 60.0;

/// Errors returned while predicting a reading time.
#[derive(Debug, Error, PartialEq)]
pub enum ReadingTimeError {
    /// The caller supplied a baseline that is not a positive finite number.
    #[error("base reading speed must be finite and greater than zero, got {0}")]
    InvalidBaseSpeed(f64),
    /// The speed model produced a speed that cannot divide a word count.
    #[error("speed model produced an unusable speed {speed} for score {score}")]
    InvalidAdjustedSpeed { speed: f64, score: f64 },
    /// The speed is so small that the duration overflows, or it underflowed
    /// to zero.
    #[error("reading time for {word_count} words at {speed} words per minute is not finite")]
    NonFinite { word_count: usize, speed: f64 },
}

/// Strategy mapping `(base_speed, score)` to an effective reading speed.
///
/// Any `Fn(f64, f64) -> f64` closure is a strategy too.
///
/// # Examples
///
/// ```
/// use reading_time::speed::SpeedAdjustment;
///
/// let slower = |base: f64, _score: f64| base * 0.5;
/// assert_eq!(slower.adjust(200.0, 80.0), 100.0);
/// ```
pub trait SpeedAdjustment: Send + Sync {
    /// Effective speed for text with the given Flesch `score`.
    fn adjust(&self, base_speed: f64, score: f64) -> f64;
}

impl<F> SpeedAdjustment for F
where
    F: Fn(f64, f64) -> f64 + Send + Sync,
{
    fn adjust(&self, base_speed: f64, score: f64) -> f64 {
        self(base_speed, score)
    }
}

/// Smooth exponential scaling around the baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExponentialAdjustment {
    factor: f64,
    span: f64,
}

impl ExponentialAdjustment {
    /// Build a model from its parameters.
    ///
    /// Returns [`None`] unless both are finite and `factor > 0`, `span > 0`.
    #[must_use]
    pub fn new(factor: f64, span: f64) -> Option<Self> {
        (factor.is_finite() && span.is_finite() && factor > 0.0 && span > 0.0)
            .then_some(Self { factor, span })
    }

    #[must_use]
    pub fn factor(&self) -> f64 {
        self.factor
    }

    #[must_use]
    pub fn span(&self) -> f64 {
        self.span
    }
}

impl Default for ExponentialAdjustment {
    fn default() -> Self {
        Self {
            factor: DEFAULT_FACTOR,
            span: DEFAULT_SPAN,
        }
    }
}

impl SpeedAdjustment for ExponentialAdjustment {
    #[expect(clippy::float_arithmetic, reason = "exponential speed model")]
    fn adjust(&self, base_speed: f64, score: f64) -> f64 {
        base_speed / self.factor.sqrt() * (self.factor.ln() / self.span * score).exp()
    }
}

/// Uses the baseline speed for every score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unadjusted;

impl SpeedAdjustment for Unadjusted {
    fn adjust(&self, base_speed: f64, _score: f64) -> f64 {
        base_speed
    }
}

/// A predicted reading duration.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ReadingTime {
    minutes: f64,
}

impl ReadingTime {
    #[must_use]
    pub fn minutes(self) -> f64 {
        self.minutes
    }

    #[must_use]
    #[expect(clippy::float_arithmetic, reason = "unit conversion")]
    pub fn seconds(self) -> f64 {
        self.minutes * SECONDS_PER_MINUTE
    }
}

/// Predict how long `word_count` tokens take to read.
///
/// # Errors
///
/// Returns [`ReadingTimeError::InvalidBaseSpeed`] if `base_speed` is not a
/// positive finite number, [`ReadingTimeError::InvalidAdjustedSpeed`] if the
/// model's output is `NaN`, negative or infinite, and
/// [`ReadingTimeError::NonFinite`] if the duration in minutes or seconds is
/// not finite.
///
/// # Examples
///
/// ```
/// use reading_time::speed::{predict_reading_time, Unadjusted};
///
/// let time = predict_reading_time(400, &Unadjusted, 200.0, 55.0).unwrap();
/// assert_eq!(time.minutes(), 2.0);
/// assert_eq!(time.seconds(), 120.0);
/// ```
#[expect(clippy::float_arithmetic, reason = "words divided by speed")]
#[expect(clippy::cast_precision_loss, reason = "word counts fit in f64")]
pub fn predict_reading_time(
    word_count: usize,
    speed: &dyn SpeedAdjustment,
    base_speed: f64,
    score: f64,
) -> Result<ReadingTime, ReadingTimeError> {
    if !is_usable_speed(base_speed) {
        return Err(ReadingTimeError::InvalidBaseSpeed(base_speed));
    }
    let adjusted = speed.adjust(base_speed, score);
    if adjusted.is_nan() || adjusted.is_infinite() || adjusted < 0.0 {
        return Err(ReadingTimeError::InvalidAdjustedSpeed {
            speed: adjusted,
            score,
        });
    }
    let time = ReadingTime {
        minutes: word_count as f64 / adjusted,
    };
    if !(time.minutes.is_finite() && time.seconds().is_finite()) {
        return Err(ReadingTimeError::NonFinite {
            word_count,
            speed: adjusted,
        });
    }
    Ok(time)
}

pub(crate) fn is_usable_speed(speed: f64) -> bool {
    speed.is_finite() && speed > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::support::approx_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 100.0)]
    #[case(121.5, 400.0)]
    #[case(60.75, 200.0)]
    #[case(-121.5, 25.0)]
    fn default_model_matches_reference(#[case] score: f64, #[case] expected: f64) {
        let speed = ExponentialAdjustment::default().adjust(200.0, score);
        assert!(approx_eq(speed, expected, 1e-9), "got {speed}");
    }

    #[test]
    #[expect(clippy::float_arithmetic, reason = "reference formula")]
    fn default_model_equals_literal_formula() {
        for score in [-40.0, 0.0, 12.5, 77.7, 107.75, 150.0] {
            let literal = 200.0 / 2.0 * (4.0_f64.ln() / 121.5 * score).exp();
            let model = ExponentialAdjustment::default().adjust(200.0, score);
            assert!(approx_eq(model, literal, 1e-12));
        }
    }

    #[rstest]
    #[case(0.0, 121.5)]
    #[case(4.0, 0.0)]
    #[case(-4.0, 121.5)]
    #[case(f64::NAN, 121.5)]
    #[case(4.0, f64::INFINITY)]
    fn rejects_invalid_parameters(#[case] factor: f64, #[case] span: f64) {
        assert!(ExponentialAdjustment::new(factor, span).is_none());
    }

    #[rstest]
    #[case(0.0)]
    #[case(-10.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    fn rejects_unusable_base_speed(#[case] base: f64) {
        let result = predict_reading_time(10, &Unadjusted, base, 50.0);
        assert!(matches!(result, Err(ReadingTimeError::InvalidBaseSpeed(_))));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::INFINITY)]
    fn rejects_unusable_adjusted_speed(#[case] output: f64) {
        let broken = move |_: f64, _: f64| output;
        assert!(matches!(
            predict_reading_time(10, &broken, 200.0, 50.0),
            Err(ReadingTimeError::InvalidAdjustedSpeed { .. })
        ));
    }

    #[rstest]
    #[case(-61_878.5)]
    #[case(-69_878.5)]
    fn very_low_scores_are_not_finite(#[case] score: f64) {
        let result = predict_reading_time(70_000, &ExponentialAdjustment::default(), 200.0, score);
        assert!(
            matches!(
                result,
                Err(ReadingTimeError::NonFinite {
                    word_count: 70_000,
                    ..
                })
            ),
            "got {result:?}"
        );
    }

    #[test]
    fn zero_speed_is_not_finite() {
        let stalled = |_: f64, _: f64| 0.0;
        assert_eq!(
            predict_reading_time(10, &stalled, 200.0, 50.0),
            Err(ReadingTimeError::NonFinite {
                word_count: 10,
                speed: 0.0
            })
        );
    }

    #[test]
    fn zero_words_take_no_time() {
        let time = predict_reading_time(0, &ExponentialAdjustment::default(), 200.0, 50.0)
            .unwrap_or_else(|e| panic!("unexpected error: {e}"));
        assert!(approx_eq(time.seconds(), 0.0, f64::EPSILON));
    }

    proptest! {
        #[test]
        fn easier_text_reads_faster(
            words in 1usize..10_000,
            base in 50.0f64..600.0,
            a in -50.0f64..150.0,
            delta in 0.01f64..50.0,
        ) {
            let model = ExponentialAdjustment::default();
            let harder = predict_reading_time(words, &model, base, a);
            #[expect(clippy::float_arithmetic, reason = "offset score")]
            let easier = predict_reading_time(words, &model, base, a + delta);
            match (harder, easier) {
                (Ok(h), Ok(e)) => prop_assert!(e.minutes() < h.minutes()),
                other => prop_assert!(false, "unexpected result {other:?}"),
            }
        }
    }
}
