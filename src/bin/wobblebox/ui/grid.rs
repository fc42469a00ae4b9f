//! Step grid widget - four lanes, sixteen steps, playhead and edit cursor

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use wobblebox::sequencing::STEPS;

use super::{
    state::{bass_label, Lane},
    Cursor, UiState,
};

const CELL: usize = 4;

pub fn render_grid(frame: &mut Frame, area: Rect, state: &UiState, cursor: Cursor) {
    let block = Block::default().title(" Pattern ").borders(Borders::ALL);

    let mut lines = Vec::with_capacity(Lane::ALL.len() + 1);

    // Beat numbers over every fourth step
    let mut header = vec![Span::raw(format!("{:<14}", ""))];
    for step in 0..STEPS {
        let label = if step % 4 == 0 {
            format!("{:<CELL$}", step / 4 + 1)
        } else {
            " ".repeat(CELL)
        };
        header.push(Span::styled(label, Style::default().fg(Color::DarkGray)));
    }
    lines.push(Line::from(header));

    for (row, lane) in Lane::ALL.iter().enumerate() {
        let track = lane.track();
        let mut spans = vec![Span::styled(
            format!("{:<7}{:>5.0}dB ", track.name(), state.volume(track)),
            Style::default().fg(if row == cursor.lane {
                Color::White
            } else {
                Color::Gray
            }),
        )];

        for step in 0..STEPS {
            let cell = state.pattern.step(step);
            let (text, on) = match lane {
                Lane::Drum(drum) => {
                    let on = cell.drum(*drum);
                    (if on { "■" } else { "·" }, on)
                }
                Lane::Bass => (bass_label(cell.bass), cell.bass.is_some()),
            };

            let mut style = Style::default().fg(if on { lane_color(*lane) } else { Color::DarkGray });
            if state.current_step == Some(step) {
                style = style.bg(Color::Rgb(50, 50, 60));
            }
            if cursor.lane == row && cursor.step == step {
                style = style.add_modifier(Modifier::REVERSED);
            }
            spans.push(Span::styled(format!("{:<CELL$}", text), style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn lane_color(lane: Lane) -> Color {
    match lane {
        Lane::Drum(_) => Color::Yellow,
        Lane::Bass => Color::LightMagenta,
    }
}
