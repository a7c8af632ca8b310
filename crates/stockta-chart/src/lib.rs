//! Terminal chart rendering and logging setup.

mod figure;
mod logging;
mod renderers;
mod viewer;

pub use figure::Figure;
pub use logging::setup_logging;
pub use renderers::{render_bollinger, render_indicators, RenderOptions};
pub use viewer::Viewer;
