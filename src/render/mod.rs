// Presentation: pure layout helpers and the crossterm-backed renderer

pub mod layout;
mod terminal;

pub use terminal::TerminalRenderer;

use crate::history::HistoryBuffer;
use crate::models::MetricSnapshot;
use std::io;

/// What gets drawn for one tick.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub snapshot: &'a MetricSnapshot,
    pub cpu_history: &'a HistoryBuffer,
    pub ram_history: &'a HistoryBuffer,
    pub gpu_history: &'a HistoryBuffer,
}

/// A sink for frames.
pub trait Render {
    /// Called once before the first frame.
    fn begin(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()>;

    /// Called once after the last frame.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}
