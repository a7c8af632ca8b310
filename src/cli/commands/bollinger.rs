//! Bollinger band chart command.

use anyhow::Result;
use stockta_chart::render_bollinger;
use stockta_config::AppConfig;
use stockta_indicators::add_bollinger_bands;
use tracing::info;

use super::{load_prices, present, render_options};
use crate::cli::ChartArgs;

pub fn run(args: ChartArgs, config: &AppConfig) -> Result<()> {
    let table = load_prices(&args.data)?;
    let table = add_bollinger_bands(&table, config.indicators.bollinger)?;
    info!(
        rows = table.len(),
        period = config.indicators.bollinger.period,
        "Calculated Bollinger bands"
    );

    let options = render_options(&config.chart);
    present(config, args.save.as_deref(), |figure| {
        render_bollinger(&table, figure, &options)
    })
}
