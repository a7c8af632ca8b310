//! Calculators that derive indicator columns from `Adj Close`.
//!
//! Each calculator validates its parameters, computes the indicator over the
//! table's `Adj Close` column and returns a new table with the derived
//! columns attached. The input table is never modified and the row count is
//! always preserved; warm-up rows hold `None`.

use stockta_core::error::IndicatorError;
use stockta_core::traits::{Indicator, MultiOutputIndicator};
use stockta_core::types::{
    align, BollingerColumns, Column, MacdColumns, MovingAverageColumns, PriceTable,
};
use tracing::debug;

use crate::momentum::{Macd, MacdOutput, Rsi};
use crate::moving_average::Sma;
use crate::params::{BollingerParams, MacdParams, MovingAverageParams, RsiParams};
use crate::volatility::{BollingerBands, BollingerOutput};

/// Add `MA_Short` and `MA_Long` simple moving averages.
pub fn add_moving_averages(
    table: &PriceTable,
    params: MovingAverageParams,
) -> Result<PriceTable, IndicatorError> {
    params.validate()?;
    let prices = table.adj_close();

    let short = Sma::new(params.window_short).calculate_aligned(prices);
    let long = Sma::new(params.window_long).calculate_aligned(prices);

    let mut out = table.clone();
    out.set_moving_averages(MovingAverageColumns {
        window_short: params.window_short,
        window_long: params.window_long,
        short,
        long,
    })?;

    debug!(
        window_short = params.window_short,
        window_long = params.window_long,
        rows = out.len(),
        "Added moving averages"
    );
    Ok(out)
}

/// Add the `RSI` column.
pub fn add_rsi(table: &PriceTable, params: RsiParams) -> Result<PriceTable, IndicatorError> {
    params.validate()?;

    let rsi = Rsi::new(params.period);
    let column = rsi.calculate_aligned(table.adj_close());

    let mut out = table.clone();
    out.set_rsi(column)?;

    debug!(period = params.period, rows = out.len(), "Added {}", rsi.name());
    Ok(out)
}

/// Add `MACD`, `MACD_Signal` and `MACD_Hist`.
pub fn add_macd(table: &PriceTable, params: MacdParams) -> Result<PriceTable, IndicatorError> {
    params.validate()?;

    let macd = Macd::with_periods(params.fast, params.slow, params.signal);
    let outputs = macd.calculate(table.adj_close());
    let series = |f: fn(&MacdOutput) -> f64| -> Column {
        let values: Vec<f64> = outputs.iter().map(f).collect();
        align(&values, table.len())
    };

    let columns = MacdColumns {
        macd: series(|o| o.macd),
        signal: series(|o| o.signal),
        histogram: series(|o| o.histogram),
    };

    let mut out = table.clone();
    out.set_macd(columns)?;

    debug!(
        fast = params.fast,
        slow = params.slow,
        signal = params.signal,
        warmup = macd.period() - 1,
        "Added {}",
        macd.name()
    );
    Ok(out)
}

/// Add `Bollinger_High`, `Bollinger_Mid` and `Bollinger_Low`.
pub fn add_bollinger_bands(
    table: &PriceTable,
    params: BollingerParams,
) -> Result<PriceTable, IndicatorError> {
    params.validate()?;

    let bands = BollingerBands::with_params(params.period, params.std_dev);
    let outputs = bands.calculate(table.adj_close());
    let series = |f: fn(&BollingerOutput) -> f64| -> Column {
        let values: Vec<f64> = outputs.iter().map(f).collect();
        align(&values, table.len())
    };

    let columns = BollingerColumns {
        high: series(|o| o.upper),
        middle: series(|o| o.middle),
        low: series(|o| o.lower),
    };

    let mut out = table.clone();
    out.set_bollinger(columns)?;

    debug!(
        period = params.period,
        std_dev = params.std_dev,
        "Added {}",
        bands.name()
    );
    Ok(out)
}

/// Apply moving averages, RSI and MACD, in that order, with default parameters.
///
/// Callers that need other windows should call the individual calculators.
pub fn apply_all(table: &PriceTable) -> Result<PriceTable, IndicatorError> {
    let table = add_moving_averages(table, MovingAverageParams::default())?;
    let table = add_rsi(&table, RsiParams::default())?;
    add_macd(&table, MacdParams::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use proptest::prelude::*;
    use stockta_core::types::RawColumn;

    fn dates(n: usize) -> Vec<NaiveDateTime> {
        let start = NaiveDate::from_ymd_opt(2023, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        (0..n).map(|i| start + Duration::days(i as i64)).collect()
    }

    fn table(prices: &[f64]) -> PriceTable {
        PriceTable::new(dates(prices.len()), prices.to_vec()).unwrap()
    }

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 8.0 + i as f64 * 0.1)
            .collect()
    }

    #[test]
    fn test_moving_average_scenario() {
        let t = table(&[10.0, 11.0, 12.0, 13.0, 14.0]);
        let out = add_moving_averages(
            &t,
            MovingAverageParams {
                window_short: 3,
                window_long: 5,
            },
        )
        .unwrap();

        let ma = out.moving_averages().unwrap();
        assert!(ma.short[0].is_none() && ma.short[1].is_none());
        for (value, expected) in ma.short[2..].iter().zip([11.0, 12.0, 13.0]) {
            assert!((value.unwrap() - expected).abs() < 1e-10);
        }
        assert_eq!(ma.long.iter().filter(|v| v.is_some()).count(), 1);
        assert!((ma.long[4].unwrap() - 12.0).abs() < 1e-10);
    }

    #[test]
    fn test_window_larger_than_table() {
        let t = table(&[1.0, 2.0, 3.0]);
        let out = add_moving_averages(&t, MovingAverageParams::default()).unwrap();

        let ma = out.moving_averages().unwrap();
        assert_eq!(ma.short, vec![None; 3]);
        assert_eq!(ma.long, vec![None; 3]);
    }

    #[test]
    fn test_input_table_untouched() {
        let t = table(&wave(60));
        let _ = apply_all(&t).unwrap();
        assert!(t.moving_averages().is_none());
        assert!(t.rsi().is_none());
        assert!(t.macd().is_none());
    }

    #[test]
    fn test_rsi_warmup_is_period() {
        let t = table(&wave(40));
        let out = add_rsi(&t, RsiParams { period: 14 }).unwrap();

        let rsi = out.rsi().unwrap();
        assert!(rsi[..14].iter().all(Option::is_none));
        assert!(rsi[14..].iter().all(Option::is_some));
    }

    #[test]
    fn test_macd_warmup() {
        let t = table(&wave(60));
        let out = add_macd(&t, MacdParams::default()).unwrap();

        let macd = out.macd().unwrap();
        let warmup = 26 + 9 - 2;
        for column in [&macd.macd, &macd.signal, &macd.histogram] {
            assert!(column[..warmup].iter().all(Option::is_none));
            assert!(column[warmup..].iter().all(Option::is_some));
        }
    }

    #[test]
    fn test_invalid_parameters_rejected() {
        let t = table(&wave(30));

        let err = add_macd(
            &t,
            MacdParams {
                fast: 26,
                slow: 12,
                signal: 9,
            },
        )
        .unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidParameter(_)));

        assert!(add_rsi(&t, RsiParams { period: 0 }).is_err());
        assert!(add_bollinger_bands(
            &t,
            BollingerParams {
                period: 20,
                std_dev: -1.0
            }
        )
        .is_err());
    }

    #[test]
    fn test_oversized_macd_windows_rejected_before_calculation() {
        let t = table(&wave(30));
        let err = add_macd(
            &t,
            MacdParams {
                fast: 12,
                slow: usize::MAX - 1,
                signal: 9,
            },
        )
        .unwrap_err();
        assert!(matches!(err, IndicatorError::InvalidParameter(_)));
        assert!(t.macd().is_none());
    }

    #[test]
    fn test_apply_all_columns() {
        let header = vec!["Date".to_string(), "Volume".to_string(), "Adj Close".to_string()];
        let prices = wave(80);
        let volume = RawColumn {
            name: "Volume".into(),
            values: (0..80).map(|i| (1000 + i).to_string()).collect(),
        };
        let t = PriceTable::from_parts(header, dates(80), prices, vec![volume]).unwrap();

        let out = apply_all(&t).unwrap();
        assert_eq!(out.len(), 80);
        assert_eq!(
            out.column_names(),
            vec![
                "Date",
                "Volume",
                "Adj Close",
                "MA_Short",
                "MA_Long",
                "RSI",
                "MACD",
                "MACD_Signal",
                "MACD_Hist"
            ]
        );
        assert_eq!(out.passthrough(), t.passthrough());
        assert_eq!(out.dates(), t.dates());
        assert_eq!(out.adj_close(), t.adj_close());
        assert!(out.bollinger().is_none());
    }

    #[test]
    fn test_bollinger_calculator() {
        let t = table(&wave(40));
        let out = add_bollinger_bands(&t, BollingerParams::default()).unwrap();

        let bands = out.bollinger().unwrap();
        assert!(bands.high[..19].iter().all(Option::is_none));
        for i in 19..40 {
            let high = bands.high[i].unwrap();
            let mid = bands.middle[i].unwrap();
            let low = bands.low[i].unwrap();
            assert!(high >= mid && mid >= low);
        }
    }

    #[test]
    fn test_empty_table() {
        let t = table(&[]);
        let out = apply_all(&t).unwrap();
        assert!(out.is_empty());
        assert!(out.rsi().unwrap().is_empty());
    }

    proptest! {
        #[test]
        fn prop_apply_all_preserves_rows(prices in prop::collection::vec(1.0f64..1000.0, 0..120)) {
            let t = table(&prices);
            let out = apply_all(&t).unwrap();

            prop_assert_eq!(out.len(), t.len());
            prop_assert_eq!(out.adj_close(), t.adj_close());
            prop_assert_eq!(out.rsi().unwrap().len(), prices.len());
            prop_assert_eq!(out.macd().unwrap().histogram.len(), prices.len());
        }

        #[test]
        fn prop_rsi_bounded(
            prices in prop::collection::vec(1.0f64..1000.0, 2..120),
            period in 1usize..30,
        ) {
            let out = add_rsi(&table(&prices), RsiParams { period }).unwrap();
            for value in out.rsi().unwrap().iter().flatten() {
                prop_assert!((0.0..=100.0).contains(value));
            }
        }

        #[test]
        fn prop_sma_first_defined_is_mean(
            prices in prop::collection::vec(1.0f64..1000.0, 1..80),
            window in 1usize..80,
        ) {
            let window = window.min(prices.len());
            let params = MovingAverageParams { window_short: window, window_long: window };
            let out = add_moving_averages(&table(&prices), params).unwrap();
            let short = &out.moving_averages().unwrap().short;

            prop_assert!(short[..window - 1].iter().all(Option::is_none));
            let mean = prices[..window].iter().sum::<f64>() / window as f64;
            prop_assert!((short[window - 1].unwrap() - mean).abs() < 1e-9 * mean.max(1.0));
        }

        #[test]
        fn prop_macd_hist_is_difference(prices in prop::collection::vec(1.0f64..1000.0, 0..120)) {
            let out = add_macd(&table(&prices), MacdParams::default()).unwrap();
            let macd = out.macd().unwrap();

            for i in 0..prices.len() {
                match (macd.macd[i], macd.signal[i], macd.histogram[i]) {
                    (Some(m), Some(s), Some(h)) => prop_assert!((h - (m - s)).abs() < 1e-9),
                    (None, None, None) => {}
                    other => prop_assert!(false, "misaligned MACD row {}: {:?}", i, other),
                }
            }
        }

        #[test]
        fn prop_calculators_idempotent(prices in prop::collection::vec(1.0f64..1000.0, 0..100)) {
            let t = table(&prices);
            prop_assert_eq!(apply_all(&t).unwrap(), apply_all(&t).unwrap());

            let once = add_bollinger_bands(&t, BollingerParams::default()).unwrap();
            let twice = add_bollinger_bands(&once, BollingerParams::default()).unwrap();
            prop_assert_eq!(once.bollinger(), twice.bollinger());
            prop_assert_eq!(once.column_names(), twice.column_names());
        }
    }
}
