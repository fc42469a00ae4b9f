//! Transport bar widget - tempo, play state, step, motion and meters

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::UiState;

pub fn render_transport(frame: &mut Frame, area: Rect, state: &UiState, motion: Option<f32>) {
    let block = Block::default().title(" wobblebox ").borders(Borders::ALL);

    let play_symbol = if state.is_playing { "▶" } else { "■" };
    let play_state = if state.is_playing { "Playing" } else { "Stopped" };
    let step = state
        .current_step
        .map_or_else(|| "--".to_string(), |s| format!("{:02}", s + 1));
    let motion = motion.map_or_else(|| "off".to_string(), |i| format!("{:.2}", i));

    let line = Line::from(vec![
        Span::styled(
            format!(" BPM: {:.0}  ", state.bpm),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{} {}  ", play_symbol, play_state),
            Style::default().fg(if state.is_playing {
                Color::Green
            } else {
                Color::Yellow
            }),
        ),
        Span::styled(format!("Step {}/16  ", step), Style::default().fg(Color::White)),
        Span::styled(
            format!("Motion: {}  ", motion),
            Style::default().fg(Color::LightBlue),
        ),
        Span::styled(
            format!("{:.1}kHz  ", state.sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", state.peak, state.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
