//! Indicator trait definitions.

use crate::types::{align, Column};

/// Trait for technical indicators.
///
/// Indicators process price data and produce one value per row once
/// enough history has accumulated.
pub trait Indicator: Send + Sync {
    /// Calculate indicator values for the given data.
    ///
    /// # Arguments
    /// * `data` - Input data (typically prices)
    ///
    /// # Returns
    /// One value per fully warmed-up input, oldest first. The result is
    /// empty when `data` is shorter than [`Indicator::period`].
    fn calculate(&self, data: &[f64]) -> Vec<f64>;

    /// Get the minimum data points required for the first value.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;

    /// Calculate and pad the warm-up rows with `None` so the output
    /// has exactly one entry per input.
    fn calculate_aligned(&self, data: &[f64]) -> Column {
        align(&self.calculate(data), data.len())
    }
}

/// Multi-output indicator (e.g., Bollinger Bands, MACD).
///
/// Some indicators produce multiple related values.
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    /// Get the minimum data points required.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestIndicator {
        period: usize,
    }

    impl Indicator for TestIndicator {
        fn calculate(&self, data: &[f64]) -> Vec<f64> {
            if data.len() < self.period {
                return vec![];
            }
            // Simple sum indicator for testing
            data.windows(self.period)
                .map(|w| w.iter().sum())
                .collect()
        }

        fn period(&self) -> usize {
            self.period
        }

        fn name(&self) -> &str {
            "test"
        }
    }

    #[test]
    fn test_indicator_calculate() {
        let indicator = TestIndicator { period: 3 };
        let data = vec![1.0, 2.0, 3.0, 4.0, 5.0];
        let result = indicator.calculate(&data);

        assert_eq!(result.len(), 3);
        assert!((result[0] - 6.0).abs() < 0.001); // 1+2+3
        assert!((result[1] - 9.0).abs() < 0.001); // 2+3+4
        assert!((result[2] - 12.0).abs() < 0.001); // 3+4+5
    }

    #[test]
    fn test_calculate_aligned_pads_warmup() {
        let indicator = TestIndicator { period: 3 };
        let result = indicator.calculate_aligned(&[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(result, vec![None, None, Some(6.0), Some(9.0)]);

        let short = indicator.calculate_aligned(&[1.0, 2.0]);
        assert_eq!(short, vec![None, None]);
    }
}
