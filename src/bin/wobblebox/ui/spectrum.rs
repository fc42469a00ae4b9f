//! Spectrum widget - log-spaced magnitudes from the analyser

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

pub fn render_spectrum(frame: &mut Frame, area: Rect, spectrum: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Spectrum [o] ")
        .borders(Borders::ALL);

    // Plot against log frequency so the bins spread evenly
    let data: Vec<(f64, f64)> = spectrum
        .iter()
        .map(|&(hz, db)| (hz.max(1.0).log10(), db))
        .collect();
    let (min_x, max_x) = data
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &(x, _)| (lo.min(x), hi.max(x)));
    let max_db = data.iter().map(|&(_, db)| db).fold(-100.0, f64::max);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([min_x.min(max_x), max_x.max(min_x + 1.0)])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
