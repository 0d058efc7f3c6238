/// Coefficients for the misery-score linear formula.
///
/// Calibrated so a typical day lands around 35–45, a bad day around 60–75,
/// and a disaster at 80+. The numbers are tuning knobs, not a fitted model;
/// deployments adjust `base` to set their baseline dissatisfaction floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Points per minute of average delay.
    pub avg_delay: f64,
    /// Points per unit of delayed-train ratio.
    pub delay_ratio: f64,
    /// Points per cancelled train.
    pub cancellation: f64,
    /// Divisor applied to the worst single delay.
    pub worst_divisor: f64,
    /// Flat offset added to every score.
    pub base: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            avg_delay: 1.5,
            delay_ratio: 25.0,
            cancellation: 0.8,
            worst_divisor: 8.0,
            base: 15.0,
        }
    }
}

impl ScoreWeights {
    /// Default coefficients with a deployment-specific base offset.
    pub fn with_base(base: f64) -> Self {
        Self {
            base,
            ..Self::default()
        }
    }
}

/// Collapses one line's delay statistics into a misery score in 0..=100.
pub fn misery_score(
    avg_delay: f64,
    delay_ratio: f64,
    cancelled: usize,
    worst_delay: f64,
    weights: &ScoreWeights,
) -> u8 {
    let raw = avg_delay * weights.avg_delay
        + delay_ratio * weights.delay_ratio
        + cancelled as f64 * weights.cancellation
        + worst_delay / weights.worst_divisor
        + weights.base;

    raw.round().clamp(0.0, 100.0) as u8
}
