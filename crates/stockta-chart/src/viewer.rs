//! Full-screen figure viewer.

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use stockta_core::error::RenderError;
use tracing::debug;

use crate::figure::Figure;

/// Shows a figure on the alternate screen until `q` or `Esc`.
pub struct Viewer {
    poll_ms: u64,
}

impl Default for Viewer {
    fn default() -> Self {
        Self::new(250)
    }
}

impl Viewer {
    pub fn new(poll_ms: u64) -> Self {
        Self { poll_ms }
    }

    /// Run the viewer.
    ///
    /// `render` receives a blank figure sized to the terminal on every frame,
    /// so resizing the terminal re-lays out the chart.
    pub fn show<F>(&self, mut render: F) -> Result<(), RenderError>
    where
        F: FnMut(Figure) -> Result<Figure, RenderError>,
    {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            disable_raw_mode()?;
            return Err(e.into());
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => {
                disable_raw_mode()?;
                execute!(io::stdout(), LeaveAlternateScreen)?;
                return Err(e.into());
            }
        };

        let res = self.run_loop(&mut terminal, &mut render);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    fn run_loop<F>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        render: &mut F,
    ) -> Result<(), RenderError>
    where
        F: FnMut(Figure) -> Result<Figure, RenderError>,
    {
        loop {
            let mut failure = None;
            terminal.draw(|frame| {
                let area = frame.area();
                match render(Figure::new(area.width, area.height)) {
                    Ok(figure) => frame.buffer_mut().merge(figure.buffer()),
                    Err(e) => failure = Some(e),
                }
            })?;
            if let Some(e) = failure {
                return Err(e);
            }

            if event::poll(Duration::from_millis(self.poll_ms))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press
                        && (key.code == KeyCode::Char('q') || key.code == KeyCode::Esc)
                    {
                        debug!("Viewer closed");
                        return Ok(());
                    }
                }
            }
        }
    }
}
