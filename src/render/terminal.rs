use super::{
    Frame, Render,
    layout::{self, BAR_WIDTH, TrendGraph},
};
use crate::history::HistoryBuffer;
use crossterm::{
    QueueableCommand, cursor,
    style::{Color, Print, PrintStyledContent, Stylize},
    terminal::{self, ClearType},
};
use std::io::{self, Write};

/// Column where the info box and trend graphs start.
const RIGHT_COLUMN: u16 = 45;
const INFO_TOP_ROW: u16 = 2;
const CPU_GRAPH_TOP_ROW: u16 = 8;

/// Draws frames in place on an ANSI terminal.
///
/// Every frame repositions the cursor and overwrites the previous one; the
/// screen is cleared only once, in [`Render::begin`].
pub struct TerminalRenderer<W: Write = io::Stdout> {
    out: W,
    graph_height: usize,
}

impl TerminalRenderer<io::Stdout> {
    pub fn stdout(graph_height: usize) -> Self {
        Self::new(io::stdout(), graph_height)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, graph_height: usize) -> Self {
        Self { out, graph_height }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, x: u16, y: u16, text: String, color: Color) -> io::Result<()> {
        self.out
            .queue(cursor::MoveTo(x, y))?
            .queue(PrintStyledContent(text.with(color).bold()))?;
        Ok(())
    }

    fn metric(&mut self, y: u16, text: String, color: Color) -> io::Result<()> {
        self.line(0, y, text, color)?;
        // wipes leftovers of a longer previous value; the right column is redrawn afterwards.
        self.out.queue(terminal::Clear(ClearType::UntilNewLine))?;
        Ok(())
    }

    fn graph(&mut self, history: &HistoryBuffer, title: &str, top: u16, color: Color) -> io::Result<()> {
        let TrendGraph {
            top: header,
            rows,
            bottom,
        } = layout::trend_graph(history, title, self.graph_height);

        self.line(RIGHT_COLUMN, top, header, color)?;
        let mut y = top;
        for row in rows {
            y = y.saturating_add(1);
            self.out
                .queue(cursor::MoveTo(RIGHT_COLUMN, y))?
                .queue(PrintStyledContent("║ ".with(color).bold()))?;
            for cell in row.chars() {
                if cell == layout::GRAPH_FILLED {
                    self.out.queue(PrintStyledContent(cell.with(color).bold()))?;
                } else {
                    self.out.queue(Print(cell))?;
                }
            }
            self.out
                .queue(PrintStyledContent(" ║".with(color).bold()))?;
        }
        self.line(RIGHT_COLUMN, y.saturating_add(1), bottom, color)
    }

    /// Rows taken by one boxed graph including both borders.
    fn graph_span(&self) -> u16 {
        u16::try_from(self.graph_height)
            .unwrap_or(u16::MAX)
            .saturating_add(2)
    }
}

impl<W: Write> Render for TerminalRenderer<W> {
    fn begin(&mut self) -> io::Result<()> {
        self.out
            .queue(terminal::Clear(ClearType::All))?
            .queue(cursor::Hide)?;
        self.out.flush()
    }

    fn draw(&mut self, frame: &Frame<'_>) -> io::Result<()> {
        let s = frame.snapshot;

        self.line(0, 0, "=== CLI SYSTEM MONITOR ===".into(), Color::White)?;
        self.metric(
            2,
            format!("CPU Usage:        {:5.1}% {}", s.cpu_percent, layout::bar(s.cpu_percent, BAR_WIDTH)),
            Color::Yellow,
        )?;
        self.metric(3, format!("GPU Usage:        {:5.1}%", s.gpu_percent), Color::Blue)?;
        self.metric(
            4,
            format!("RAM Usage:        {:5.1}% {}", s.ram_percent, layout::bar(s.ram_percent, BAR_WIDTH)),
            Color::Cyan,
        )?;
        self.metric(
            5,
            format!(
                "Disk {} Usage: {:5.1}% {}",
                s.disk_volume,
                s.disk_percent,
                layout::bar(s.disk_percent, BAR_WIDTH)
            ),
            Color::Magenta,
        )?;
        self.metric(6, format!("Network Sent:     {:6.1} KB/s", s.net_sent_kbps), Color::Green)?;
        self.metric(7, format!("Network Received: {:6.1} KB/s", s.net_recv_kbps), Color::Green)?;
        self.metric(8, format!("CPU Temp:         {} °C", s.cpu_temperature), Color::Red)?;

        for (i, text) in layout::info_box(&s.host_name, &s.os_description, &s.uptime)
            .into_iter()
            .enumerate()
        {
            self.line(RIGHT_COLUMN, INFO_TOP_ROW + i as u16, text, Color::White)?;
        }

        let span = self.graph_span();
        let ram_top = CPU_GRAPH_TOP_ROW.saturating_add(span);
        let gpu_top = ram_top.saturating_add(span);
        self.graph(frame.cpu_history, "CPU Trend", CPU_GRAPH_TOP_ROW, Color::Yellow)?;
        self.graph(frame.ram_history, "RAM Trend", ram_top, Color::Cyan)?;
        self.graph(frame.gpu_history, "GPU Trend", gpu_top, Color::Blue)?;

        self.out.queue(cursor::MoveTo(0, gpu_top.saturating_add(span)))?;
        self.out.flush()
    }

    fn finish(&mut self) -> io::Result<()> {
        let (_, rows) = terminal::size().unwrap_or((0, 0));
        self.out
            .queue(cursor::MoveTo(0, rows.saturating_sub(1)))?
            .queue(cursor::Show)?;
        self.out.flush()
    }
}
