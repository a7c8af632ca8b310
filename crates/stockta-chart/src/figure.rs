//! Drawing surface shared by the renderers.

use ratatui::{buffer::Buffer, layout::Rect};
use std::path::Path;
use stockta_core::error::RenderError;
use tracing::info;

/// An owned grid of terminal cells that renderers draw into.
///
/// Renderers take a `Figure` by value and hand it back, so there is no
/// implicit "current figure" shared between calls.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    buffer: Buffer,
}

impl Figure {
    /// Create a blank figure of `width` x `height` cells.
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            buffer: Buffer::empty(Rect::new(0, 0, width, height)),
        }
    }

    pub fn area(&self) -> Rect {
        self.buffer.area
    }

    pub fn buffer(&self) -> &Buffer {
        &self.buffer
    }

    pub fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.buffer
    }

    /// Plain-text rendering, one line per row, trailing blanks trimmed.
    pub fn to_text(&self) -> String {
        let area = self.area();
        let mut lines = Vec::with_capacity(area.height as usize);

        for y in area.top()..area.bottom() {
            let mut line = String::with_capacity(area.width as usize);
            for x in area.left()..area.right() {
                if let Some(cell) = self.buffer.cell((x, y)) {
                    line.push_str(cell.symbol());
                }
            }
            lines.push(line.trim_end().to_string());
        }

        lines.join("\n")
    }

    /// Write the plain-text rendering to `path`.
    pub fn save(&self, path: &Path) -> Result<(), RenderError> {
        let mut text = self.to_text();
        text.push('\n');
        std::fs::write(path, text)?;
        info!(path = %path.display(), "Saved figure");
        Ok(())
    }
}
