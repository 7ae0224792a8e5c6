//! Text building blocks of the dashboard, free of any terminal state.

use crate::history::HistoryBuffer;

pub const BAR_WIDTH: usize = 10;
pub const BAR_FILLED: char = '█';
pub const BAR_EMPTY: char = '-';
pub const GRAPH_FILLED: char = '█';
pub const GRAPH_EMPTY: char = '░';
/// Inner width of the host info box.
pub const INFO_BOX_WIDTH: usize = 28;

/// `[███-------]` for a percentage; out-of-range input is clamped.
pub fn bar(percent: f64, width: usize) -> String {
    let filled = ((width as f64 * percent / 100.0) as usize).min(width);
    let mut out = String::with_capacity(width + 2);
    out.push('[');
    out.extend(std::iter::repeat_n(BAR_FILLED, filled));
    out.extend(std::iter::repeat_n(BAR_EMPTY, width - filled));
    out.push(']');
    out
}

/// Host info box lines, top border to bottom border.
pub fn info_box(host: &str, os: &str, uptime: &str) -> Vec<String> {
    let row = |label: &str, value: &str| {
        let text = truncate(&format!("  {label} {value}"), INFO_BOX_WIDTH);
        format!("║{text:<width$}║", width = INFO_BOX_WIDTH)
    };
    vec![
        format!("╔{}╗", "═".repeat(INFO_BOX_WIDTH)),
        row("Host:", host),
        row("OS:  ", os),
        row("Uptime:", uptime),
        format!("╚{}╝", "═".repeat(INFO_BOX_WIDTH)),
    ]
}

/// A boxed trend graph, already split into border and cell segments so the
/// renderer can color filled cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrendGraph {
    pub top: String,
    /// One string of cells per band, top band first, padded to the window width.
    pub rows: Vec<String>,
    pub bottom: String,
}

pub fn trend_graph(history: &HistoryBuffer, title: &str, height: usize) -> TrendGraph {
    let width = history.capacity();
    let inner = width + 2;

    let label = format!(" {title} ");
    let label_len = label.chars().count();
    let top = if label_len >= inner {
        format!("╔{}╗", truncate(&label, inner))
    } else {
        let left = (inner - label_len) / 2;
        let right = inner - label_len - left;
        format!("╔{}{label}{}╗", "═".repeat(left), "═".repeat(right))
    };

    let rows = history
        .trend_rows(height)
        .into_iter()
        .map(|cells| {
            let mut row = cells
                .iter()
                .map(|&filled| if filled { GRAPH_FILLED } else { GRAPH_EMPTY })
                .collect::<String>();
            row.extend(std::iter::repeat_n(' ', width - cells.len()));
            row
        })
        .collect();

    TrendGraph {
        top,
        rows,
        bottom: format!("╚{}╝", "═".repeat(inner)),
    }
}

fn truncate(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}
