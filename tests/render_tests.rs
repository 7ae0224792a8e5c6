// Terminal renderer output

use sysdash::history::HistoryBuffer;
use sysdash::models::MetricSnapshot;
use sysdash::render::{Frame, Render, TerminalRenderer};

fn snapshot() -> MetricSnapshot {
    MetricSnapshot {
        cpu_percent: 42.0,
        ram_percent: 75.0,
        disk_percent: 70.0,
        gpu_percent: 12.5,
        net_sent_kbps: 3.5,
        net_recv_kbps: 120.25,
        host_name: "testbox".into(),
        os_description: "TestOS 1.0".into(),
        uptime: "00:01:05".into(),
        cpu_temperature: "N/A".into(),
        disk_volume: "/".into(),
    }
}

fn render(frame: &Frame<'_>) -> String {
    let mut renderer = TerminalRenderer::new(Vec::new(), 4);
    renderer.begin().unwrap();
    renderer.draw(frame).unwrap();
    String::from_utf8(renderer.into_inner()).unwrap()
}

#[test]
fn test_frame_shows_every_metric() {
    let snapshot = snapshot();
    let history = HistoryBuffer::new(25);
    let out = render(&Frame {
        snapshot: &snapshot,
        cpu_history: &history,
        ram_history: &history,
        gpu_history: &history,
    });

    assert!(out.contains("=== CLI SYSTEM MONITOR ==="));
    assert!(out.contains("CPU Usage:         42.0% [████------]"));
    assert!(out.contains("GPU Usage:         12.5%"));
    assert!(out.contains("RAM Usage:         75.0% [███████---]"));
    assert!(out.contains("Disk / Usage:  70.0% [███████---]"));
    assert!(out.contains("Network Sent:        3.5 KB/s"));
    assert!(out.contains("Network Received:  120.2 KB/s") || out.contains("Network Received:  120.3 KB/s"));
    assert!(out.contains("CPU Temp:         N/A °C"));
}

#[test]
fn test_frame_shows_host_box() {
    let snapshot = snapshot();
    let history = HistoryBuffer::new(25);
    let out = render(&Frame {
        snapshot: &snapshot,
        cpu_history: &history,
        ram_history: &history,
        gpu_history: &history,
    });

    assert!(out.contains("Host: testbox"));
    assert!(out.contains("OS:   TestOS 1.0"));
    assert!(out.contains("Uptime: 00:01:05"));
}

#[test]
fn test_trend_graphs_are_titled_and_filled() {
    let snapshot = snapshot();
    let mut cpu = HistoryBuffer::new(25);
    for v in [0.0, 0.0, 0.0, 0.0, 10.0] {
        cpu.push(v);
    }
    let empty = HistoryBuffer::new(25);
    let out = render(&Frame {
        snapshot: &snapshot,
        cpu_history: &cpu,
        ram_history: &empty,
        gpu_history: &empty,
    });

    assert!(out.contains(" CPU Trend "));
    assert!(out.contains(" RAM Trend "));
    assert!(out.contains(" GPU Trend "));
    // four zero samples per band render as empty cells.
    assert!(out.contains("░░░░"));
    assert!(out.contains('█'));
}

#[test]
fn test_output_repositions_instead_of_scrolling() {
    let snapshot = snapshot();
    let history = HistoryBuffer::new(25);
    let out = render(&Frame {
        snapshot: &snapshot,
        cpu_history: &history,
        ram_history: &history,
        gpu_history: &history,
    });

    // crossterm's MoveTo is 1-based CSI row;col H.
    assert!(out.contains("\x1b[1;1H"));
    assert!(out.contains("\x1b[9;46H"));
    assert!(!out.contains('\n'));
}

#[test]
fn test_graph_taller_than_the_terminal_does_not_panic() {
    let snapshot = snapshot();
    let history = HistoryBuffer::new(2);
    let mut renderer = TerminalRenderer::new(Vec::new(), 70_000);
    renderer
        .draw(&Frame {
            snapshot: &snapshot,
            cpu_history: &history,
            ram_history: &history,
            gpu_history: &history,
        })
        .unwrap();
    assert!(!renderer.into_inner().is_empty());
}
