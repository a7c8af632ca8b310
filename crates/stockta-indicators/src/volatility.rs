//! Volatility indicators.

use serde::{Deserialize, Serialize};
use stockta_core::traits::{Indicator, MultiOutputIndicator};

use crate::moving_average::Sma;

/// Population standard deviation over a trailing window.
#[derive(Debug, Clone)]
pub struct StdDev {
    period: usize,
}

impl StdDev {
    /// Create a new standard deviation indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        Self { period }
    }
}

impl Indicator for StdDev {
    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() < self.period {
            return vec![];
        }

        let period_f64 = self.period as f64;

        data.windows(self.period)
            .map(|window| {
                let mean: f64 = window.iter().sum::<f64>() / period_f64;
                let variance: f64 =
                    window.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / period_f64;
                variance.sqrt()
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "StdDev"
    }
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
}

/// Bollinger Bands.
///
/// Consists of a middle band (SMA) with upper and lower bands
/// at a specified number of standard deviations.
#[derive(Debug, Clone)]
pub struct BollingerBands {
    period: usize,
    std_dev_multiplier: f64,
}

impl BollingerBands {
    /// Create new Bollinger Bands with default parameters (20, 2.0).
    pub fn new() -> Self {
        Self::with_params(20, 2.0)
    }

    /// Create Bollinger Bands with custom parameters.
    pub fn with_params(period: usize, std_dev_multiplier: f64) -> Self {
        assert!(period > 1, "Period must be greater than 1");
        assert!(
            std_dev_multiplier > 0.0,
            "Std dev multiplier must be positive"
        );
        Self {
            period,
            std_dev_multiplier,
        }
    }
}

impl Default for BollingerBands {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for BollingerBands {
    type Outputs = BollingerOutput;

    fn calculate(&self, data: &[f64]) -> Vec<BollingerOutput> {
        if data.len() < self.period {
            return vec![];
        }

        let middles = Sma::new(self.period).calculate(data);
        let std_devs = StdDev::new(self.period).calculate(data);

        middles
            .into_iter()
            .zip(std_devs)
            .map(|(middle, std_dev)| {
                let width = self.std_dev_multiplier * std_dev;
                BollingerOutput {
                    upper: middle + width,
                    middle,
                    lower: middle - width,
                }
            })
            .collect()
    }

    fn period(&self) -> usize {
        self.period
    }

    fn name(&self) -> &str {
        "Bollinger Bands"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_std_dev() {
        let std_dev = StdDev::new(3);
        let data = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let result = std_dev.calculate(&data);

        assert_eq!(result.len(), 3);
        // First window: [2, 4, 6], mean = 4, variance = (4+0+4)/3 = 8/3
        // std_dev = sqrt(8/3) ≈ 1.633
        assert!((result[0] - 1.633).abs() < 0.01);
    }

    #[test]
    fn test_bollinger_bands() {
        let bb = BollingerBands::new();
        let data: Vec<f64> = (0..30)
            .map(|i| 100.0 + (i as f64 * 0.1).sin() * 5.0)
            .collect();

        let result = bb.calculate(&data);
        assert_eq!(result.len(), 11);

        for output in &result {
            assert!(output.upper > output.middle);
            assert!(output.middle > output.lower);
        }
    }

    #[test]
    fn test_bollinger_constant_price_collapses() {
        let bb = BollingerBands::with_params(5, 2.0);
        let result = bb.calculate(&[100.0; 5]);

        assert_eq!(result.len(), 1);
        assert!((result[0].upper - 100.0).abs() < 1e-12);
        assert!((result[0].lower - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_bollinger_width_matches_std_dev() {
        let data = vec![2.0, 4.0, 6.0, 8.0, 10.0];
        let bands = BollingerBands::with_params(3, 1.5).calculate(&data);
        let std_dev = StdDev::new(3).calculate(&data);

        for (band, sd) in bands.iter().zip(std_dev.iter()) {
            assert!((band.upper - band.middle - 1.5 * sd).abs() < 1e-12);
            assert!((band.middle - band.lower - 1.5 * sd).abs() < 1e-12);
        }
    }
}
