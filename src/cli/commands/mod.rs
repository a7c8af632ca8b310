//! CLI command implementations.

pub mod bollinger;
pub mod default_config;
pub mod indicators;
pub mod summary;
pub mod validate;

use anyhow::{Context, Result};
use std::path::Path;
use stockta_chart::{Figure, RenderOptions, Viewer};
use stockta_config::{AppConfig, ChartSettings};
use stockta_core::error::RenderError;
use stockta_core::{PriceTable, StockResult};
use stockta_data::load_csv;
use stockta_indicators::{add_macd, add_moving_averages, add_rsi, IndicatorParams};
use tracing::info;

/// Load the price file named on the command line.
pub fn load_prices(path: &Path) -> Result<PriceTable> {
    load_csv(path).with_context(|| format!("Failed to load price data from {}", path.display()))
}

/// Moving averages, RSI and MACD with the configured parameters.
pub fn add_core_indicators(table: &PriceTable, params: &IndicatorParams) -> StockResult<PriceTable> {
    let table = add_moving_averages(table, params.moving_average)?;
    let table = add_rsi(&table, params.rsi)?;
    Ok(add_macd(&table, params.macd)?)
}

pub fn render_options(chart: &ChartSettings) -> RenderOptions {
    RenderOptions {
        rsi_overbought: chart.rsi_overbought,
        rsi_oversold: chart.rsi_oversold,
        ..Default::default()
    }
}

/// Save the figure as text when `save` is given, otherwise open the viewer.
pub fn present<F>(config: &AppConfig, save: Option<&Path>, mut render: F) -> Result<()>
where
    F: FnMut(Figure) -> Result<Figure, RenderError>,
{
    match save {
        Some(path) => {
            let figure = render(Figure::new(config.chart.width, config.chart.height))?;
            figure
                .save(path)
                .with_context(|| format!("Failed to save chart to {}", path.display()))?;
            println!("Chart saved to {}", path.display());
        }
        None => {
            info!("Opening chart viewer, press 'q' to quit");
            Viewer::default().show(render)?;
        }
    }
    Ok(())
}
