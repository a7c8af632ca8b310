//! Indicators chart command.

use anyhow::Result;
use stockta_chart::render_indicators;
use stockta_config::AppConfig;
use tracing::info;

use super::{add_core_indicators, load_prices, present, render_options};
use crate::cli::ChartArgs;

pub fn run(args: ChartArgs, config: &AppConfig) -> Result<()> {
    let table = load_prices(&args.data)?;
    let table = add_core_indicators(&table, &config.indicators)?;
    info!(rows = table.len(), "Calculated indicators");

    let options = render_options(&config.chart);
    present(config, args.save.as_deref(), |figure| {
        render_indicators(&table, figure, &options)
    })
}
