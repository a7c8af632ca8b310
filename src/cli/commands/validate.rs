//! Validate configuration command.

use anyhow::Result;
use std::path::Path;
use stockta_config::load_config;

pub fn run(config_path: &Path) -> Result<()> {
    println!("Validating configuration: {:?}", config_path);

    let config = match load_config(config_path) {
        Ok(config) => config,
        Err(e) => {
            println!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = config.validate() {
        println!("Configuration error: {}", e);
        return Err(e.into());
    }

    let params = &config.indicators;
    println!("Configuration is valid!");
    println!();
    println!("App: {}", config.app.name);
    println!("Environment: {}", config.app.environment);
    println!("Log level: {}", config.logging.level);
    println!(
        "Moving averages: {} / {}",
        params.moving_average.window_short, params.moving_average.window_long
    );
    println!("RSI period: {}", params.rsi.period);
    println!(
        "MACD: {} / {} / {}",
        params.macd.fast, params.macd.slow, params.macd.signal
    );
    println!(
        "Bollinger: {} periods, {} std dev",
        params.bollinger.period, params.bollinger.std_dev
    );
    println!("Chart size: {}x{}", config.chart.width, config.chart.height);

    Ok(())
}
