use rand::Rng;
use rand_distr::{Distribution, Normal};
use scenario_models::ScenarioError;

const MAX_REJECTIONS: usize = 10_000;

/// Normal distribution conditioned on `[low, high]`.
#[derive(Debug, Clone, Copy)]
pub struct TruncatedNormal {
    mean: f64,
    sd: f64,
    low: f64,
    high: f64,
    normal: Normal<f64>,
}

impl TruncatedNormal {
    pub fn new(mean: f64, sd: f64, low: f64, high: f64) -> Result<Self, ScenarioError> {
        if !(mean.is_finite() && sd.is_finite() && low.is_finite() && high.is_finite()) {
            return Err(ScenarioError::InvalidDistribution {
                reason: format!("non-finite parameter in N({mean}, {sd}) on [{low}, {high}]"),
            });
        }
        if sd <= 0.0 {
            return Err(ScenarioError::InvalidDistribution {
                reason: format!("standard deviation must be positive, got {sd}"),
            });
        }
        if low >= high {
            return Err(ScenarioError::InvalidDistribution {
                reason: format!("empty interval [{low}, {high}]"),
            });
        }
        let normal = Normal::new(mean, sd).map_err(|e| ScenarioError::InvalidDistribution {
            reason: e.to_string(),
        })?;

        Ok(Self {
            mean,
            sd,
            low,
            high,
            normal,
        })
    }

    /// Truncated on `[-1, 1]`, the range of every model parameter.
    pub fn unit(mean: f64, sd: f64) -> Result<Self, ScenarioError> {
        Self::new(mean, sd, -1.0, 1.0)
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn sd(&self) -> f64 {
        self.sd
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.low, self.high)
    }
}

impl Distribution<f64> for TruncatedNormal {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        for _ in 0..MAX_REJECTIONS {
            let x = self.normal.sample(rng);
            if x >= self.low && x <= self.high {
                return x;
            }
        }
        // Interval sits far in a tail; fall back to uniform over it.
        rng.gen_range(self.low..=self.high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn samples_stay_inside_bounds() {
        let dist = TruncatedNormal::unit(0.9, 0.5).unwrap();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..5_000 {
            let x = dist.sample(&mut rng);
            assert!((-1.0..=1.0).contains(&x), "{x} escaped [-1, 1]");
        }
    }

    #[test]
    fn narrow_distribution_centres_on_mean() {
        let dist = TruncatedNormal::unit(-0.3, 0.1 / 3.0).unwrap();
        let mut rng = StdRng::seed_from_u64(11);
        let n = 4_000;
        let mean: f64 = (0..n).map(|_| dist.sample(&mut rng)).sum::<f64>() / n as f64;
        assert!((mean + 0.3).abs() < 0.01, "mean was {mean}");
    }

    #[test]
    fn far_tail_interval_still_returns_in_range() {
        let dist = TruncatedNormal::new(-50.0, 0.01, 0.0, 1.0).unwrap();
        let mut rng = StdRng::seed_from_u64(3);
        let x = dist.sample(&mut rng);
        assert!((0.0..=1.0).contains(&x));
    }

    #[test]
    fn rejects_degenerate_parameters() {
        assert!(TruncatedNormal::unit(0.0, 0.0).is_err());
        assert!(TruncatedNormal::unit(0.0, -1.0).is_err());
        assert!(TruncatedNormal::new(0.0, 1.0, 1.0, 1.0).is_err());
        assert!(TruncatedNormal::new(f64::NAN, 1.0, -1.0, 1.0).is_err());
    }
}
