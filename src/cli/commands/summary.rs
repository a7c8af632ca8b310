//! Latest-row summary command.

use anyhow::Result;
use stockta_config::AppConfig;
use stockta_indicators::add_bollinger_bands;

use super::{add_core_indicators, load_prices};
use crate::cli::{OutputFormat, SummaryArgs};

pub fn run(args: SummaryArgs, config: &AppConfig) -> Result<()> {
    let table = load_prices(&args.data)?;
    let table = add_core_indicators(&table, &config.indicators)?;
    let table = add_bollinger_bands(&table, config.indicators.bollinger)?;

    let Some(snapshot) = table.latest() else {
        anyhow::bail!("{} has no rows", args.data.display());
    };

    match args.output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&snapshot)?),
        OutputFormat::Text => println!("{}", snapshot),
    }

    Ok(())
}
