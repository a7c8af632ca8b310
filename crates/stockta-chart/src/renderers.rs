//! Indicator and Bollinger band figures.

use chrono::NaiveDateTime;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, LegendPosition, Paragraph, Widget},
};
use stockta_core::error::RenderError;
use stockta_core::types::{names, Column, PriceTable};
use tracing::debug;

use crate::figure::Figure;

/// Vertical samples per row used to shade the Bollinger band.
const SHADE_STEPS: usize = 12;

type Points = Vec<(f64, f64)>;

/// Rendering knobs not carried by the table itself.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    /// `chrono` format used for the x axis labels.
    pub date_format: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            date_format: "%Y-%m-%d".to_string(),
        }
    }
}

/// Draw price with moving averages, RSI and MACD as three stacked panels.
///
/// The table must carry the moving average, RSI and MACD columns. Nothing is
/// drawn when one of them is missing.
pub fn render_indicators(
    table: &PriceTable,
    mut figure: Figure,
    options: &RenderOptions,
) -> Result<Figure, RenderError> {
    let averages = table
        .moving_averages()
        .ok_or(RenderError::MissingColumn(names::MA_SHORT))?;
    let rsi = table.rsi().ok_or(RenderError::MissingColumn(names::RSI))?;
    let macd = table.macd().ok_or(RenderError::MissingColumn(names::MACD))?;

    let area = figure.area();
    let buf = figure.buffer_mut();

    if table.is_empty() {
        render_no_data("Technical Indicators", area, buf);
        return Ok(figure);
    }

    let [price_area, rsi_area, macd_area] =
        Layout::vertical([Constraint::Ratio(1, 3); 3]).areas(area);

    // Price and moving averages
    let price = price_points(table.adj_close());
    let short = points(&averages.short);
    let long = points(&averages.long);
    panel(
        "Adjusted Close and Moving Averages",
        vec![
            line("Adjusted Close", Color::Blue, &price),
            line(format!("{}-Day MA", averages.window_short), Color::Red, &short),
            line(format!("{}-Day MA", averages.window_long), Color::Green, &long),
        ],
        x_axis(table.dates(), options),
        y_bounds(&[&price, &short, &long]),
    )
    .render(price_area, buf);

    // RSI with reference levels
    let rsi_points = points(rsi);
    let x_end = x_max(table.len());
    let overbought = [(0.0, options.rsi_overbought), (x_end, options.rsi_overbought)];
    let oversold = [(0.0, options.rsi_oversold), (x_end, options.rsi_oversold)];
    panel(
        "Relative Strength Index (RSI)",
        vec![
            reference(&overbought, Color::Red),
            reference(&oversold, Color::Green),
            line("RSI", Color::Magenta, &rsi_points),
        ],
        x_axis(table.dates(), options),
        [0.0, 100.0],
    )
    .render(rsi_area, buf);

    // MACD, signal and histogram
    let macd_line = points(&macd.macd);
    let signal = points(&macd.signal);
    let histogram = points(&macd.histogram);
    let [low, high] = y_bounds(&[&macd_line, &signal, &histogram]);
    panel(
        "MACD",
        vec![
            Dataset::default()
                .name("MACD Histogram")
                .marker(Marker::Braille)
                .graph_type(GraphType::Bar)
                .style(Style::default().fg(Color::DarkGray))
                .data(&histogram),
            line("MACD", Color::Blue, &macd_line),
            line("Signal Line", Color::Yellow, &signal),
        ],
        x_axis(table.dates(), options),
        [low.min(0.0), high.max(0.0)],
    )
    .render(macd_area, buf);

    debug!(rows = table.len(), width = area.width, height = area.height, "Rendered indicator figure");
    Ok(figure)
}

/// Draw price between the Bollinger High and Low lines with the band shaded.
pub fn render_bollinger(
    table: &PriceTable,
    mut figure: Figure,
    options: &RenderOptions,
) -> Result<Figure, RenderError> {
    let bands = table
        .bollinger()
        .ok_or(RenderError::MissingColumn(names::BOLLINGER_HIGH))?;

    let area = figure.area();
    let buf = figure.buffer_mut();

    if table.is_empty() {
        render_no_data("Bollinger Bands", area, buf);
        return Ok(figure);
    }

    let price = price_points(table.adj_close());
    let high = points(&bands.high);
    let low = points(&bands.low);
    let fill = band_fill(&bands.high, &bands.low);

    panel(
        "Bollinger Bands",
        vec![
            // Drawn first so the lines stay on top.
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Scatter)
                .style(Style::default().fg(Color::DarkGray))
                .data(&fill),
            line("Adjusted Close", Color::Blue, &price),
            line("Bollinger High", Color::Red, &high),
            line("Bollinger Low", Color::Green, &low),
        ],
        x_axis(table.dates(), options),
        y_bounds(&[&price, &high, &low]),
    )
    .render(area, buf);

    debug!(rows = table.len(), width = area.width, height = area.height, "Rendered Bollinger figure");
    Ok(figure)
}

/// Defined values as `(row, value)` points; warm-up rows are skipped.
fn points(column: &Column) -> Points {
    column
        .iter()
        .enumerate()
        .filter_map(|(i, value)| value.map(|v| (i as f64, v)))
        .collect()
}

fn price_points(prices: &[f64]) -> Points {
    prices
        .iter()
        .enumerate()
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

/// Evenly spaced points between low and high on every row where both exist.
fn band_fill(high: &Column, low: &Column) -> Points {
    high.iter()
        .zip(low)
        .enumerate()
        .filter_map(|(i, (h, l))| Some((i as f64, (*h)?, (*l)?)))
        .flat_map(|(x, h, l)| {
            (0..=SHADE_STEPS).map(move |step| (x, l + (h - l) * step as f64 / SHADE_STEPS as f64))
        })
        .collect()
}

fn x_max(len: usize) -> f64 {
    (len.saturating_sub(1) as f64).max(1.0)
}

/// Y range covering every series with a small margin.
fn y_bounds(series: &[&Points]) -> [f64; 2] {
    let (min_y, max_y) = series
        .iter()
        .flat_map(|s| s.iter())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &(_, y)| {
            (lo.min(y), hi.max(y))
        });

    if !min_y.is_finite() || !max_y.is_finite() {
        return [0.0, 1.0];
    }

    let padding = if max_y > min_y {
        (max_y - min_y) * 0.05
    } else {
        1.0
    };
    [min_y - padding, max_y + padding]
}

fn axis_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// First, middle and last dates.
fn x_axis<'a>(dates: &[NaiveDateTime], options: &RenderOptions) -> Axis<'a> {
    let last = dates.len().saturating_sub(1);
    let labels: Vec<Span> = [0, last / 2, last]
        .iter()
        .filter_map(|&i| dates.get(i))
        .map(|d| Span::styled(d.format(&options.date_format).to_string(), axis_style()))
        .collect();

    Axis::default()
        .style(axis_style())
        .bounds([0.0, x_max(dates.len())])
        .labels(labels)
}

fn y_axis<'a>(bounds: [f64; 2]) -> Axis<'a> {
    let [lo, hi] = bounds;
    Axis::default()
        .style(axis_style())
        .bounds(bounds)
        .labels(vec![
            Span::styled(format!("{:.2}", lo), axis_style()),
            Span::styled(format!("{:.2}", (lo + hi) / 2.0), axis_style()),
            Span::styled(format!("{:.2}", hi), axis_style()),
        ])
}

fn panel<'a>(
    title: &'a str,
    datasets: Vec<Dataset<'a>>,
    x_axis: Axis<'a>,
    y_bounds: [f64; 2],
) -> Chart<'a> {
    Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(title, Style::default().add_modifier(Modifier::BOLD))),
        )
        .x_axis(x_axis)
        .y_axis(y_axis(y_bounds))
        .legend_position(Some(LegendPosition::TopLeft))
        .hidden_legend_constraints((Constraint::Ratio(1, 3), Constraint::Ratio(3, 4)))
}

fn line<'a>(name: impl Into<Line<'a>>, color: Color, data: &'a [(f64, f64)]) -> Dataset<'a> {
    Dataset::default()
        .name(name)
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color))
        .data(data)
}

fn reference<'a>(data: &'a [(f64, f64)], color: Color) -> Dataset<'a> {
    Dataset::default()
        .marker(Marker::Dot)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(color).add_modifier(Modifier::DIM))
        .data(data)
}

fn render_no_data(title: &str, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    block.render(area, buf);

    let middle = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, inner.height.min(1));
    Paragraph::new("No Data")
        .alignment(Alignment::Center)
        .render(middle, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use stockta_core::ErrorKind;
    use stockta_indicators::{add_bollinger_bands, apply_all, BollingerParams};

    fn sample_table(rows: usize) -> PriceTable {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let dates = (0..rows).map(|i| start + Duration::days(i as i64)).collect();
        let prices = (0..rows)
            .map(|i| 100.0 + (i as f64 * 0.3).sin() * 5.0 + i as f64 * 0.1)
            .collect();
        PriceTable::new(dates, prices).unwrap()
    }

    #[test]
    fn test_points_skip_warm_up() {
        let column = vec![None, Some(1.0), None, Some(3.0)];
        assert_eq!(points(&column), vec![(1.0, 1.0), (3.0, 3.0)]);
    }

    #[test]
    fn test_band_fill_spans_band() {
        let high = vec![None, Some(12.0), Some(14.0)];
        let low = vec![None, Some(8.0), Some(10.0)];
        let fill = band_fill(&high, &low);

        assert_eq!(fill.len(), 2 * (SHADE_STEPS + 1));
        assert!(fill.iter().all(|&(x, _)| x >= 1.0));
        assert!(fill.contains(&(1.0, 8.0)));
        assert!(fill.contains(&(2.0, 14.0)));
        assert!(fill.iter().filter(|p| p.0 == 1.0).all(|p| (8.0..=12.0).contains(&p.1)));
    }

    #[test]
    fn test_y_bounds() {
        assert_eq!(y_bounds(&[]), [0.0, 1.0]);
        assert_eq!(y_bounds(&[&vec![(0.0, 5.0)]]), [4.0, 6.0]);

        let [lo, hi] = y_bounds(&[&vec![(0.0, 10.0)], &vec![(1.0, 20.0)]]);
        assert!(lo < 10.0 && lo > 9.0);
        assert!(hi > 20.0 && hi < 21.0);
    }

    #[test]
    fn test_indicators_requires_columns() {
        let err = render_indicators(&sample_table(10), Figure::new(140, 40), &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingColumn(name) if name == names::MA_SHORT));
        assert_eq!(err.kind(), ErrorKind::MissingColumn);
    }

    #[test]
    fn test_bollinger_requires_columns() {
        let table = apply_all(&sample_table(60)).unwrap();
        let err = render_bollinger(&table, Figure::new(140, 40), &RenderOptions::default())
            .unwrap_err();
        assert!(matches!(err, RenderError::MissingColumn(name) if name == names::BOLLINGER_HIGH));
    }

    #[test]
    fn test_indicators_draws_three_panels() {
        let table = apply_all(&sample_table(80)).unwrap();
        let figure =
            render_indicators(&table, Figure::new(140, 60), &RenderOptions::default()).unwrap();
        let text = figure.to_text();

        assert!(text.contains("Adjusted Close and Moving Averages"));
        assert!(text.contains("Relative Strength Index (RSI)"));
        assert!(text.contains("MACD"));
        assert!(text.contains("20-Day MA"));
        assert!(text.contains("50-Day MA"));
        assert!(text.contains("Signal Line"));
        assert!(text.contains("2024-01-01"));
        assert!(text.contains("2024-03-20"));
        assert!(!text.contains("No Data"));

        // Something besides borders and labels was plotted.
        let buf = figure.buffer();
        let plotted = (0..buf.area.height)
            .flat_map(|y| (0..buf.area.width).map(move |x| (x, y)))
            .filter(|&pos| {
                buf.cell(pos)
                    .map(|c| ('\u{2801}'..='\u{28FF}').contains(&c.symbol().chars().next().unwrap_or(' ')))
                    .unwrap_or(false)
            })
            .count();
        assert!(plotted > 50);
    }

    #[test]
    fn test_indicators_uses_configured_windows_in_legend() {
        let table = sample_table(40);
        let table = stockta_indicators::add_moving_averages(
            &table,
            stockta_indicators::MovingAverageParams {
                window_short: 5,
                window_long: 10,
            },
        )
        .unwrap();
        let table = apply_rsi_macd(&table);

        let text = render_indicators(&table, Figure::new(140, 60), &RenderOptions::default())
            .unwrap()
            .to_text();
        assert!(text.contains("5-Day MA"));
        assert!(text.contains("10-Day MA"));
    }

    fn apply_rsi_macd(table: &PriceTable) -> PriceTable {
        let table = stockta_indicators::add_rsi(table, Default::default()).unwrap();
        stockta_indicators::add_macd(&table, Default::default()).unwrap()
    }

    #[test]
    fn test_bollinger_draws_band() {
        let table = add_bollinger_bands(&sample_table(60), BollingerParams::default()).unwrap();
        let figure =
            render_bollinger(&table, Figure::new(140, 40), &RenderOptions::default()).unwrap();
        let text = figure.to_text();

        assert!(text.contains("Bollinger Bands"));
        assert!(text.contains("Bollinger High"));
        assert!(text.contains("Bollinger Low"));
        assert!(text.contains("Adjusted Close"));
    }

    #[test]
    fn test_empty_table_shows_no_data() {
        let table = apply_all(&sample_table(0)).unwrap();
        let text = render_indicators(&table, Figure::new(60, 20), &RenderOptions::default())
            .unwrap()
            .to_text();
        assert!(text.contains("No Data"));

        let table = add_bollinger_bands(&sample_table(0), BollingerParams::default()).unwrap();
        let text = render_bollinger(&table, Figure::new(60, 20), &RenderOptions::default())
            .unwrap()
            .to_text();
        assert!(text.contains("No Data"));
    }

    #[test]
    fn test_short_table_renders_without_indicator_values() {
        // Fewer rows than any window: every derived value is warm-up.
        let table = apply_all(&sample_table(3)).unwrap();
        let figure = render_indicators(&table, Figure::new(80, 30), &RenderOptions::default());
        assert!(figure.is_ok());
    }

    #[test]
    fn test_tiny_figure_does_not_panic() {
        let table = apply_all(&sample_table(60)).unwrap();
        assert!(render_indicators(&table, Figure::new(10, 4), &RenderOptions::default()).is_ok());
    }

    #[test]
    fn test_custom_date_format() {
        let table = apply_all(&sample_table(30)).unwrap();
        let options = RenderOptions {
            date_format: "%d/%m".to_string(),
            ..Default::default()
        };
        let text = render_indicators(&table, Figure::new(140, 40), &options)
            .unwrap()
            .to_text();
        assert!(text.contains("01/01"));
    }
}
